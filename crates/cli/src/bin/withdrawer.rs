// Path: crates/cli/src/bin/withdrawer.rs
//! The withdrawer binary: relays burns from the side chain to the main
//! chain.

use clap::Parser;
use relay_cli::wallet;
use relay_cli::parse_hex_address;
use relay_crypto::signing::neo::NeoSigner;
use relay_endpoint::{MainChainPool, SideChainPool};
use relay_pipeline::{Pipeline, WithdrawerDestination, WithdrawerSource};
use relay_txfactory::NeoTxBuilder;
use relay_types::RelayerConfig;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about = "Relays side-chain burns to the main chain", long_about = None)]
struct Opts {
    /// Path to the relayer JSON config file.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    /// Overrides the `/metrics` and `/healthz` listen address.
    #[clap(long, env = "WITHDRAWER_METRICS_ADDR", default_value = "127.0.0.1:9101", help = "Address the telemetry HTTP server binds to")]
    metrics_addr: std::net::SocketAddr,
}

#[tokio::main]
async fn main() {
    if let Err(e) = relay_telemetry::init::init_tracing() {
        eprintln!("failed to initialize tracing: {e}");
        std::process::exit(1);
    }

    let opts = Opts::parse();

    let sink = match relay_telemetry::prometheus::install() {
        Ok(sink) => sink,
        Err(e) => {
            tracing::error!(target: "withdrawer", error = %e, "failed to install metrics sink");
            std::process::exit(1);
        }
    };
    if relay_telemetry::sinks::SINK.set(sink).is_err() {
        tracing::warn!(target: "withdrawer", "metrics sink already installed");
    }
    tokio::spawn(relay_telemetry::http::run_server(opts.metrics_addr));

    let config = match RelayerConfig::load(&opts.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(target: "withdrawer", error = %e, "failed to load config");
            std::process::exit(1);
        }
    };

    let relayer_script_hash = match parse_hex_address(&config.relayer) {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(target: "withdrawer", error = %e, "invalid relayer address in config");
            std::process::exit(1);
        }
    };

    let private_key = match wallet::load_private_key(&PathBuf::from(&config.wallet), &config.relayer) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!(target: "withdrawer", error = %e, "failed to load wallet");
            std::process::exit(1);
        }
    };
    let signer = match NeoSigner::from_bytes(&private_key) {
        Ok(signer) => signer,
        Err(e) => {
            tracing::error!(target: "withdrawer", error = %e, "invalid main-chain signing key");
            std::process::exit(1);
        }
    };

    let main = Arc::new(MainChainPool::new(config.main_seeds.clone()));
    let side = Arc::new(SideChainPool::new(config.side_seeds.clone()));

    let source = match WithdrawerSource::new(Arc::clone(&side), config.bridge_contract) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(target: "withdrawer", error = %e, "failed to initialize side-chain decoder");
            std::process::exit(1);
        }
    };
    let factory = match NeoTxBuilder::new(Arc::clone(&main), signer, config.bridge_contract, relayer_script_hash).await
    {
        Ok(factory) => factory,
        Err(e) => {
            tracing::error!(target: "withdrawer", error = %e, "failed to initialize main-chain transaction factory");
            std::process::exit(1);
        }
    };
    let destination = WithdrawerDestination::new(main, factory);

    let pipeline = Pipeline::new(
        source,
        destination,
        config.bridge_contract,
        config.bridge_contract,
        config.verified_root_start,
        config.start,
        config.end,
    );

    tracing::info!(
        target: "withdrawer",
        event = "startup",
        start = config.start,
        end = config.end,
        "starting side-chain to main-chain relayer",
    );

    if let Err(e) = pipeline.run().await {
        relay_telemetry::metrics().inc_fatal_errors(e.kind_tag());
        tracing::error!(target: "withdrawer", error = %e, "relayer stopped with a fatal error");
        std::process::exit(1);
    }
}

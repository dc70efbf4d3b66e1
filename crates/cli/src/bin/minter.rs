// Path: crates/cli/src/bin/minter.rs
//! The minter binary: relays deposits and validator-set changes from the
//! main chain to the side chain.

use clap::Parser;
use relay_cli::wallet;
use relay_crypto::signing::evm::EvmSigner;
use relay_endpoint::{MainChainPool, SideChainPool};
use relay_pipeline::{MinterDestination, MinterSource, Pipeline};
use relay_txfactory::EvmTxBuilder;
use relay_types::RelayerConfig;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about = "Relays main-chain deposits and validator changes to the side chain", long_about = None)]
struct Opts {
    /// Path to the relayer JSON config file.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    /// Overrides the `/metrics` and `/healthz` listen address.
    #[clap(long, env = "MINTER_METRICS_ADDR", default_value = "127.0.0.1:9100", help = "Address the telemetry HTTP server binds to")]
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
            tracing::error!(target: "minter", error = %e, "failed to install metrics sink");
            std::process::exit(1);
        }
    };
    if relay_telemetry::sinks::SINK.set(sink).is_err() {
        tracing::warn!(target: "minter", "metrics sink already installed");
    }
    tokio::spawn(relay_telemetry::http::run_server(opts.metrics_addr));

    let config = match RelayerConfig::load(&opts.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(target: "minter", error = %e, "failed to load config");
            std::process::exit(1);
        }
    };

    let private_key = match wallet::load_private_key(&PathBuf::from(&config.wallet), &config.relayer) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!(target: "minter", error = %e, "failed to load wallet");
            std::process::exit(1);
        }
    };
    let signer = match EvmSigner::from_bytes(&private_key) {
        Ok(signer) => signer,
        Err(e) => {
            tracing::error!(target: "minter", error = %e, "invalid side-chain signing key");
            std::process::exit(1);
        }
    };

    let main = Arc::new(MainChainPool::new(config.main_seeds.clone()));
    let side = Arc::new(SideChainPool::new(config.side_seeds.clone()));

    let source = MinterSource::new(Arc::clone(&main), config.bridge_contract);
    let factory = match EvmTxBuilder::new(Arc::clone(&side), signer, config.bridge_contract).await {
        Ok(factory) => factory,
        Err(e) => {
            tracing::error!(target: "minter", error = %e, "failed to initialize side-chain transaction factory");
            std::process::exit(1);
        }
    };
    let destination = MinterDestination::new(side, factory);

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
        target: "minter",
        event = "startup",
        start = config.start,
        end = config.end,
        "starting main-chain to side-chain relayer",
    );

    if let Err(e) = pipeline.run().await {
        relay_telemetry::metrics().inc_fatal_errors(e.kind_tag());
        tracing::error!(target: "minter", error = %e, "relayer stopped with a fatal error");
        std::process::exit(1);
    }
}

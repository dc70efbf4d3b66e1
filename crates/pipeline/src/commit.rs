// Path: crates/pipeline/src/commit.rs
//! The commit protocol: broadcast, then poll for
//! inclusion up to a bounded number of rounds, each separated by one block
//! time. Shared by both destination wirings, parametrised only by how each
//! chain reports inclusion.

use crate::error::{CommitError, FatalErrorKind};
use relay_api::common::InclusionStatus;
use relay_api::RpcError;
use relay_types::constants::{COMMIT_ROUNDS, COMMIT_ROUND_SLEEP_SECONDS};
use std::future::Future;
use std::time::Duration;

/// Polls `check` for up to [`COMMIT_ROUNDS`] rounds, sleeping
/// [`COMMIT_ROUND_SLEEP_SECONDS`] before each attempt. Returns once `check`
/// reports [`InclusionStatus::Accepted`]; an [`RpcError`] from `check`
/// propagates immediately, since it already reflects the endpoint pool's own
/// exhausted retry budget rather than a transient condition this
/// loop should ride out.
pub async fn wait_for_inclusion<F, Fut>(mut check: F) -> Result<(), FatalErrorKind>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<InclusionStatus, RpcError>>,
{
    for _round in 0..COMMIT_ROUNDS {
        tokio::time::sleep(Duration::from_secs(COMMIT_ROUND_SLEEP_SECONDS)).await;
        if let InclusionStatus::Accepted = check().await? {
            relay_telemetry::metrics().inc_commits_succeeded();
            return Ok(());
        }
        relay_telemetry::metrics().inc_commit_retries();
    }
    Err(FatalErrorKind::Commit(CommitError { rounds: COMMIT_ROUNDS }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn returns_as_soon_as_accepted_is_observed() {
        let rounds = AtomicU32::new(0);
        wait_for_inclusion(|| {
            let n = rounds.fetch_add(1, Ordering::SeqCst);
            async move { Ok(if n < 2 { InclusionStatus::Pending } else { InclusionStatus::Accepted }) }
        })
        .await
        .expect("eventually accepted");
        assert_eq!(rounds.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausting_all_rounds_without_acceptance_is_fatal() {
        let err = wait_for_inclusion(|| async { Ok(InclusionStatus::Pending) }).await.unwrap_err();
        assert!(matches!(err, FatalErrorKind::Commit(CommitError { rounds }) if rounds == COMMIT_ROUNDS));
    }

    #[tokio::test(start_paused = true)]
    async fn a_transport_error_propagates_immediately_without_retrying() {
        let calls = AtomicU32::new(0);
        let err = wait_for_inclusion(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(RpcError::Transport("boom".into())) }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, FatalErrorKind::Rpc(RpcError::Transport(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

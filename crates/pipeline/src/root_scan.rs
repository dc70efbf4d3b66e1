// Path: crates/pipeline/src/root_scan.rs
//! `get_verified_state_root`: the verified-root lookup shared by both
//! source wirings, parametrised only by the per-height fetch call.

use crate::error::{FatalErrorKind, ScanError};
use relay_api::RpcError;
use relay_types::constants::{BLOCK_TIME_SECONDS, MAX_STATE_ROOT_GET_RANGE};
use relay_types::StateRoot;
use std::future::Future;
use std::time::Duration;

/// Scans `[max(want, verified_root_start), .. + MAX_STATE_ROOT_GET_RANGE)`
/// for the first verified root, advancing past unverified roots and
/// retrying missing ones one block later while `caught_up`. A missing root
/// (or an RPC error) while backfilling is fatal: the root for a height not
/// yet produced will not appear on retry during backfill the way it does
/// once the loop is idle and waiting on real time to pass.
pub async fn scan<F, Fut>(
    mut fetch: F,
    want: u32,
    verified_root_start: u32,
    caught_up: bool,
) -> Result<StateRoot, FatalErrorKind>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<StateRoot>, RpcError>>,
{
    let start = want.max(verified_root_start);
    let end = start.saturating_add(MAX_STATE_ROOT_GET_RANGE);
    let mut index = start;

    while index < end {
        match fetch(index).await {
            Ok(Some(root)) if root.is_verified() => return Ok(root),
            Ok(Some(_unverified)) => index = index.saturating_add(1),
            Ok(None) => {
                if caught_up {
                    tokio::time::sleep(Duration::from_secs(BLOCK_TIME_SECONDS)).await;
                } else {
                    return Err(FatalErrorKind::Scan(ScanError { start, end }));
                }
            }
            Err(e) => {
                if caught_up {
                    tokio::time::sleep(Duration::from_secs(BLOCK_TIME_SECONDS)).await;
                } else {
                    return Err(FatalErrorKind::Rpc(e));
                }
            }
        }
    }

    Err(FatalErrorKind::Scan(ScanError { start, end }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn verified(index: u32) -> StateRoot {
        StateRoot { version: 0, index, root_hash: [index as u8; 32], witnesses: vec![vec![1]] }
    }

    fn unverified(index: u32) -> StateRoot {
        StateRoot { version: 0, index, root_hash: [index as u8; 32], witnesses: vec![] }
    }

    #[tokio::test]
    async fn returns_immediately_when_want_is_already_verified() {
        let root = scan(|i| async move { Ok(Some(verified(i))) }, 10, 0, false).await.expect("scan succeeds");
        assert_eq!(root.index, 10);
    }

    #[tokio::test]
    async fn advances_past_unverified_roots_to_the_first_verified_one() {
        let root = scan(
            |i| async move { Ok(if i < 13 { Some(unverified(i)) } else { Some(verified(i)) }) },
            10,
            0,
            false,
        )
        .await
        .expect("scan succeeds");
        assert_eq!(root.index, 13);
    }

    #[tokio::test]
    async fn clamps_the_start_to_verified_root_start() {
        let seen = AtomicU32::new(u32::MAX);
        let root = scan(
            |i| {
                seen.fetch_min(i, Ordering::SeqCst);
                async move { Ok(Some(verified(i))) }
            },
            0,
            50,
            false,
        )
        .await
        .expect("scan succeeds");
        assert_eq!(root.index, 50);
        assert_eq!(seen.load(Ordering::SeqCst), 50);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_root_while_caught_up_retries_the_same_height() {
        let attempts = AtomicU32::new(0);
        let root = scan(
            |i| {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                async move { Ok(if n < 2 { None } else { Some(verified(i)) }) }
            },
            7,
            0,
            true,
        )
        .await
        .expect("scan succeeds");
        assert_eq!(root.index, 7);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn missing_root_while_backfilling_is_fatal() {
        let err = scan(|_i| async { Ok(None) }, 7, 0, false).await.unwrap_err();
        assert!(matches!(err, FatalErrorKind::Scan(ScanError { start: 7, .. })));
    }

    #[tokio::test]
    async fn transport_error_while_backfilling_is_fatal() {
        let err = scan(|_i| async { Err(RpcError::Transport("boom".into())) }, 7, 0, false).await.unwrap_err();
        assert!(matches!(err, FatalErrorKind::Rpc(RpcError::Transport(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn transport_error_while_caught_up_retries() {
        let attempts = AtomicU32::new(0);
        let root = scan(
            |i| {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(RpcError::Transport("boom".into()))
                    } else {
                        Ok(Some(verified(i)))
                    }
                }
            },
            7,
            0,
            true,
        )
        .await
        .expect("scan succeeds");
        assert_eq!(root.index, 7);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn exhausting_the_scan_range_is_fatal() {
        let err = scan(|i| async move { Ok(Some(unverified(i))) }, 0, 0, false).await.unwrap_err();
        assert!(matches!(err, FatalErrorKind::Scan(ScanError { start: 0, end }) if end == MAX_STATE_ROOT_GET_RANGE));
    }
}

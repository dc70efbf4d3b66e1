// Path: crates/endpoint/src/pool.rs
//! The seed-rotating pool.
//!
//! The pool holds a seed list and a current index. A transport failure
//! rotates to the next seed and retries; an application error is surfaced
//! to the caller verbatim without rotating. Retry budget per request is the
//! seed list length; wrapping back to the start signals total failure.

use relay_api::RpcError;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A pool of per-seed clients of type `T`.
pub struct Pool<T> {
    seeds: Vec<T>,
    current: AtomicUsize,
}

impl<T> Pool<T> {
    /// Builds a pool over an already-constructed seed list. Never empty in
    /// practice: [`relay_types::RelayerConfig::validate`] rejects empty seed lists.
    pub fn new(seeds: Vec<T>) -> Self {
        Self { seeds, current: AtomicUsize::new(0) }
    }

    /// The number of seeds in the pool.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// Whether the pool has no seeds.
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Walks the seed list once via `probe`, succeeding as soon as one seed
    /// answers. Fails only if every seed is unreachable.
    pub async fn connect<F, Fut>(&self, probe: F) -> Result<(), RpcError>
    where
        F: Fn(&T) -> Fut,
        Fut: Future<Output = Result<(), RpcError>>,
    {
        if self.seeds.is_empty() {
            return Err(RpcError::Transport("seed list is empty".into()));
        }
        let mut last_err = None;
        for seed in &self.seeds {
            match probe(seed).await {
                Ok(()) => return Ok(()),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| RpcError::Transport("seed list is empty".into())))
    }

    /// Invokes `op` against the current seed. On a transport error, rotates
    /// to the next seed and retries; on an application error, surfaces it
    /// immediately without rotating. Exhausting the seed list without
    /// success yields the last transport error observed.
    pub async fn call<F, Fut, R>(&self, op: F) -> Result<R, RpcError>
    where
        F: Fn(&T) -> Fut,
        Fut: Future<Output = Result<R, RpcError>>,
    {
        let len = self.seeds.len();
        if len == 0 {
            return Err(RpcError::Transport("seed list is empty".into()));
        }
        let start = self.current.load(Ordering::Relaxed) % len;
        let mut last_err: Option<RpcError> = None;
        for step in 0..len {
            let idx = (start + step) % len;
            // Safe: idx is always < len (the modular construction above).
            let seed = match self.seeds.get(idx) {
                Some(s) => s,
                None => continue,
            };
            match op(seed).await {
                Ok(value) => {
                    self.current.store(idx, Ordering::Relaxed);
                    return Ok(value);
                }
                Err(e) if e.is_transport() => {
                    self.current.store((idx + 1) % len, Ordering::Relaxed);
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or_else(|| RpcError::Transport("seed list is empty".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[tokio::test]
    async fn rotates_past_a_failing_seed() {
        let pool = Pool::new(vec![0u32, 1u32]);
        let calls = AtomicU32::new(0);
        let result = pool
            .call(|seed| {
                calls.fetch_add(1, Ordering::Relaxed);
                let seed = *seed;
                async move {
                    if seed == 0 {
                        Err(RpcError::Transport("down".into()))
                    } else {
                        Ok(seed)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn wraps_around_and_fails_when_all_seeds_down() {
        let pool = Pool::new(vec![0u32, 1u32]);
        let result = pool
            .call(|_| async { Err::<u32, _>(RpcError::Transport("down".into())) })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn application_error_does_not_rotate() {
        let pool = Pool::new(vec![0u32, 1u32]);
        let calls = AtomicU32::new(0);
        let result = pool
            .call(|_| {
                calls.fetch_add(1, Ordering::Relaxed);
                async { Err::<u32, _>(RpcError::Application { code: 1, message: "bad".into() }) }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn sticks_to_last_successful_seed() {
        let pool = Pool::new(vec![0u32, 1u32]);
        // First call fails on seed 0, succeeds on seed 1.
        let _ = pool
            .call(|seed| {
                let seed = *seed;
                async move {
                    if seed == 0 {
                        Err(RpcError::Transport("down".into()))
                    } else {
                        Ok(seed)
                    }
                }
            })
            .await
            .unwrap();
        // Second call should start at seed 1 directly.
        let first_seed_tried = std::cell::Cell::new(None);
        let _ = pool
            .call(|seed| {
                if first_seed_tried.get().is_none() {
                    first_seed_tried.set(Some(*seed));
                }
                async move { Ok::<u32, RpcError>(*seed) }
            })
            .await
            .unwrap();
        assert_eq!(first_seed_tried.get(), Some(1));
    }
}

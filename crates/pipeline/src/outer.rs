// Path: crates/pipeline/src/outer.rs
//! The outer loop: block-by-block ingestion, `sync` invocation, and
//! the caught-up flag that throttles polling to block time once idle.

use crate::destination::DestinationChain;
use crate::engine::sync;
use crate::error::FatalError;
use crate::source::SourceChain;
use relay_types::constants::BLOCK_TIME_SECONDS;
use relay_types::BlockHeader;
use std::time::Duration;

/// Drives one relayer direction: fetch, decode, `sync`, repeat.
pub struct Pipeline<S, D> {
    source: S,
    destination: D,
    main_bridge: [u8; 20],
    side_bridge: [u8; 20],
    verified_root_start: u32,
    start: u32,
    end: u32,
}

impl<S: SourceChain, D: DestinationChain> Pipeline<S, D> {
    /// Builds a pipeline over `[start, end)` (`end == 0` means unbounded),
    /// bound to the two bridge contract addresses `route` routes tasks
    /// against.
    pub fn new(
        source: S,
        destination: D,
        main_bridge: [u8; 20],
        side_bridge: [u8; 20],
        verified_root_start: u32,
        start: u32,
        end: u32,
    ) -> Self {
        Self { source, destination, main_bridge, side_bridge, verified_root_start, start, end }
    }

    /// Runs the outer loop to completion (only returns on reaching a
    /// non-zero `end`) or fatal error.
    pub async fn run(&self) -> Result<(), FatalError> {
        let mut index = self.start;
        let mut prev_header: Option<BlockHeader> = None;
        let mut caught_up = false;

        loop {
            if self.end != 0 && index >= self.end {
                return Ok(());
            }

            if caught_up {
                tokio::time::sleep(Duration::from_secs(BLOCK_TIME_SECONDS)).await;
            }

            let batch = match self.source.fetch_batch(index, prev_header.as_ref()).await {
                Ok(Some(batch)) => batch,
                Ok(None) => {
                    if !caught_up {
                        let head = self.source.head().await.map_err(|e| FatalError::at(index, e))?;
                        if index >= head {
                            caught_up = true;
                        }
                    }
                    continue;
                }
                Err(kind) => return Err(FatalError::at(index, kind)),
            };

            sync(
                &batch,
                &self.source,
                &self.destination,
                self.main_bridge,
                self.side_bridge,
                self.verified_root_start,
                caught_up,
            )
            .await
            .map_err(|kind| FatalError::at(index, kind))?;

            if !batch.tasks.is_empty() || batch.is_joint {
                caught_up = false;
            }

            relay_telemetry::metrics().inc_blocks_processed();
            relay_telemetry::metrics().set_last_block_index(index);

            tracing::info!(
                target: "relay_pipeline",
                event = "block_processed",
                block_index = index,
                is_joint = batch.is_joint,
                task_count = batch.tasks.len(),
                caught_up,
                "processed source block",
            );

            prev_header = Some(batch.header.clone());
            index = index.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_api::RpcError;
    use relay_proof::NodeHash;
    use relay_types::block::Witness;
    use relay_types::{StateRoot, Task, TaskBatch};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    const MAIN: [u8; 20] = [1u8; 20];
    const SIDE: [u8; 20] = [2u8; 20];

    fn header(index: u32, is_joint: bool) -> BlockHeader {
        BlockHeader {
            version: 0,
            prev_hash: [0; 32],
            merkle_root: [0; 32],
            timestamp: 0,
            nonce: 0,
            index,
            primary_index: 0,
            next_consensus: if is_joint { Some([index as u8; 20]) } else { None },
            witness: Witness::default(),
        }
    }

    /// A source whose `fetch_batch` is scripted per call via `script`: `None`
    /// means "not produced yet", `Some(n)` produces a batch at `index` with
    /// `n` deposit tasks.
    struct ScriptedSource {
        head: u32,
        script: Mutex<Vec<Option<u32>>>,
        head_calls: AtomicU32,
    }

    #[async_trait]
    impl SourceChain for ScriptedSource {
        async fn head(&self) -> Result<u32, RpcError> {
            self.head_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.head)
        }

        async fn fetch_batch(
            &self,
            index: u32,
            _prev_header: Option<&BlockHeader>,
        ) -> Result<Option<TaskBatch>, FatalErrorKind> {
            let step = self.script.lock().expect("not poisoned").remove(0);
            Ok(step.map(|n_tasks| {
                let tx_ids: Vec<[u8; 32]> = (0..n_tasks).map(|i| [i as u8 + 1; 32]).collect();
                let tasks = tx_ids.iter().map(|tx| Task::Deposit { source_tx_id: *tx, request_id: 7 }).collect();
                TaskBatch { block_index: index, header: header(index, false), is_joint: false, tasks, tx_ids }
            }))
        }

        async fn verified_state_root(&self, _: u32, _: u32, _: bool) -> Result<StateRoot, FatalErrorKind> {
            Ok(StateRoot { version: 0, index: 0, root_hash: [0; 32], witnesses: vec![vec![1]] })
        }

        async fn state_proof(&self, _: [u8; 32], _: [u8; 20], _: &[u8]) -> Result<Vec<u8>, RpcError> {
            Ok(vec![])
        }

        fn node_hash(&self) -> NodeHash {
            NodeHash::MainChain
        }

        fn needs_header_sync(&self, batch: &TaskBatch) -> bool {
            batch.needs_header_sync_joint_or_tasks()
        }
    }

    struct NoopDestination {
        commits: AtomicU32,
    }

    #[async_trait]
    impl DestinationChain for NoopDestination {
        async fn commit_header(&self, _: &BlockHeader) -> Result<(), FatalErrorKind> {
            Ok(())
        }

        async fn commit_state_root(&self, _: &StateRoot) -> Result<(), FatalErrorKind> {
            Ok(())
        }

        async fn commit_task(
            &self,
            _: &relay_txfactory::TaskRoute,
            _: u32,
            _: [u8; 32],
            _: &[u8],
            _: u32,
            _: &[u8],
        ) -> Result<(), FatalErrorKind> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn stops_at_the_configured_end_without_consulting_head() {
        let source = ScriptedSource {
            head: 99,
            script: Mutex::new(vec![Some(1), Some(0)]),
            head_calls: AtomicU32::new(0),
        };
        let destination = NoopDestination { commits: AtomicU32::new(0) };
        let pipeline = Pipeline::new(source, destination, MAIN, SIDE, 0, 0, 2);

        pipeline.run().await.expect("bounded run succeeds");

        assert_eq!(pipeline.destination.commits.load(Ordering::SeqCst), 1);
        assert_eq!(pipeline.source.head_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn a_not_yet_produced_block_below_head_is_retried_without_advancing() {
        let source = ScriptedSource {
            head: 5,
            script: Mutex::new(vec![None, Some(0)]),
            head_calls: AtomicU32::new(0),
        };
        let destination = NoopDestination { commits: AtomicU32::new(0) };
        let pipeline = Pipeline::new(source, destination, MAIN, SIDE, 0, 0, 1);

        pipeline.run().await.expect("bounded run succeeds");

        assert_eq!(pipeline.source.head_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reaching_head_marks_caught_up_and_resumes_after_a_sleep() {
        let source = ScriptedSource {
            head: 0,
            script: Mutex::new(vec![None, Some(0)]),
            head_calls: AtomicU32::new(0),
        };
        let destination = NoopDestination { commits: AtomicU32::new(0) };
        let pipeline = Pipeline::new(source, destination, MAIN, SIDE, 0, 0, 1);

        pipeline.run().await.expect("bounded run succeeds");

        assert_eq!(pipeline.source.head_calls.load(Ordering::SeqCst), 1);
    }
}

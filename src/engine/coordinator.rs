// Coordinator - シャットダウン調停機能
// 全Workerの終了を待ってから出力キューを閉じる

use super::state::{transition, PipelineStateTracker};
use crate::core::{Batch, PipelineError, PipelineResult, PipelineState, ProgressReporter, WorkerStats};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Coordinator: Worker完了バリア
///
/// 全Workerのハンドルを待機した後に限り`result_tx`を破棄して出力キューを閉じる。
/// Workerが失敗した場合も必ず閉じてから、最初のエラーを返す。
pub fn spawn_shutdown_coordinator<R>(
    worker_handles: Vec<tokio::task::JoinHandle<PipelineResult<WorkerStats>>>,
    result_tx: mpsc::Sender<Batch>,
    state: Arc<PipelineStateTracker>,
    reporter: Arc<R>,
) -> tokio::task::JoinHandle<PipelineResult<Vec<WorkerStats>>>
where
    R: ProgressReporter + 'static,
{
    tokio::spawn(async move {
        let expected = worker_handles.len();
        let mut stats = Vec::with_capacity(expected);
        let mut first_error: Option<PipelineError> = None;

        for handle in worker_handles {
            match handle.await {
                Ok(Ok(worker_stats)) => stats.push(worker_stats),
                Ok(Err(error)) => {
                    tracing::error!(%error, "worker failed");
                    first_error.get_or_insert(error);
                }
                Err(join_error) => {
                    tracing::error!(error = %join_error, "worker task panicked or was cancelled");
                    first_error.get_or_insert(PipelineError::task(join_error));
                }
            }
        }

        tracing::debug!(workers = expected, "all workers exited");

        // 出力キューのクローズは全Worker終了後
        transition(&state, reporter.as_ref(), PipelineState::Finalizing).await;
        drop(result_tx);

        match first_error {
            Some(error) => Err(error),
            None => Ok(stats),
        }
    })
}

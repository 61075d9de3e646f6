// Producer - バッチ配信機能

use super::{
    batcher::Batcher,
    state::{transition, PipelineStateTracker},
};
use crate::core::{
    Batch, PipelineResult, PipelineState, ProducerStats, ProgressReporter, ValueSource,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Producer: 全バッチを入力キューへ送信し、最後に入力キューを閉じる
pub fn spawn_producer<S, R>(
    batcher: Batcher<S>,
    work_tx: mpsc::Sender<Batch>,
    state: Arc<PipelineStateTracker>,
    reporter: Arc<R>,
) -> tokio::task::JoinHandle<PipelineResult<ProducerStats>>
where
    S: ValueSource + 'static,
    R: ProgressReporter + 'static,
{
    tokio::spawn(async move {
        transition(&state, reporter.as_ref(), PipelineState::Running).await;

        let mut stats = ProducerStats::default();
        for batch in batcher {
            let len = batch.len();
            let index = batch.index();
            // キューが満杯の間はここで待機する
            if work_tx.send(batch).await.is_err() {
                // 受信側が全て終了している場合は送信を打ち切る
                tracing::warn!(batch = index, "input queue closed before all batches were sent");
                break;
            }
            stats.batches_sent += 1;
            stats.values_sent += len;
        }

        tracing::debug!(
            batches = stats.batches_sent,
            values = stats.values_sent,
            "producer finished"
        );

        // 入力キューのクローズは状態遷移の後
        transition(&state, reporter.as_ref(), PipelineState::Draining).await;
        drop(work_tx);

        Ok(stats)
    })
}

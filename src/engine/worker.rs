// Worker - 並列変換ワーカー機能

use crate::core::{Batch, BatchTransform, PipelineResult, WorkerStats};
use std::sync::Arc;
use tokio::sync::mpsc;

/// 複数Workerで共有する入力キューの受信側
pub type SharedReceiver = Arc<tokio::sync::Mutex<mpsc::Receiver<Batch>>>;

/// 単一Worker
///
/// 入力キューが空かつ閉鎖されるまでバッチを取り出し、変換結果を出力キューへ送る。
pub fn spawn_single_worker<T>(
    worker_id: usize,
    transform: Arc<T>,
    work_rx: SharedReceiver,
    result_tx: mpsc::Sender<Batch>,
) -> tokio::task::JoinHandle<PipelineResult<WorkerStats>>
where
    T: BatchTransform + 'static,
{
    tokio::spawn(async move {
        let mut stats = WorkerStats {
            worker_id,
            ..WorkerStats::default()
        };

        loop {
            // ロックは受信の間だけ保持する
            let batch = {
                let mut rx = work_rx.lock().await;
                match rx.recv().await {
                    Some(batch) => batch,
                    None => break, // 入力キュー終了
                }
            };

            let transformed = transform.apply(&batch)?;
            tracing::trace!(worker_id, batch = batch.index(), "batch transformed");

            stats.batches_processed += 1;
            stats.values_processed += transformed.len();

            if result_tx.send(transformed).await.is_err() {
                // 出力キューが閉じられた場合は終了
                tracing::warn!(worker_id, "output queue closed while worker was running");
                break;
            }
        }

        tracing::debug!(
            worker_id,
            batches = stats.batches_processed,
            "worker exited"
        );
        Ok(stats)
    })
}

/// Worker Pool: 固定数のWorkerを起動
///
/// バッチは手の空いたWorkerが先着順に取得する
pub fn spawn_workers<T>(
    transform: Arc<T>,
    work_rx: mpsc::Receiver<Batch>,
    result_tx: &mpsc::Sender<Batch>,
    worker_count: usize,
) -> Vec<tokio::task::JoinHandle<PipelineResult<WorkerStats>>>
where
    T: BatchTransform + 'static,
{
    let work_rx = Arc::new(tokio::sync::Mutex::new(work_rx));

    (0..worker_count)
        .map(|worker_id| {
            spawn_single_worker(
                worker_id,
                Arc::clone(&transform),
                Arc::clone(&work_rx),
                result_tx.clone(),
            )
        })
        .collect()
}

// Pipeline - fan-out/fan-in パイプライン
// Producer → 入力キュー → Worker Pool → 出力キュー → Aggregator

use super::{
    aggregator::spawn_aggregator, batcher::Batcher, coordinator::spawn_shutdown_coordinator,
    producer::spawn_producer, state::PipelineStateTracker, worker::spawn_workers,
};
use crate::{
    core::{
        Batch, BatchTransform, PipelineConfig, PipelineError, PipelineResult, PipelineSummary,
        ProgressReporter, ValueSource,
    },
    services::timing::Stopwatch,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// ソースと変換を束ねたパイプライン
pub struct FanOutPipeline<S, T> {
    source: Arc<S>,
    transform: Arc<T>,
}

impl<S, T> FanOutPipeline<S, T>
where
    S: ValueSource + 'static,
    T: BatchTransform + 'static,
{
    pub fn new(source: Arc<S>, transform: Arc<T>) -> Self {
        Self { source, transform }
    }

    /// パイプラインを最後まで実行する
    ///
    /// 途中キャンセルの手段はない
    pub async fn execute<C, R>(&self, config: &C, reporter: Arc<R>) -> PipelineResult<PipelineSummary>
    where
        C: PipelineConfig + ?Sized,
        R: ProgressReporter + 'static,
    {
        // 0や上限超過の容量ではキュー作成やバッチ分割ができない
        let params = config.params();
        params.validate()?;

        let stopwatch = Stopwatch::start();
        reporter.report_started(&params).await;

        // 有界キュー
        let (work_tx, work_rx) = mpsc::channel::<Batch>(params.channel_buffer_size);
        let (result_tx, result_rx) = mpsc::channel::<Batch>(params.channel_buffer_size);

        let state = Arc::new(PipelineStateTracker::new());
        let batcher = Batcher::new(
            Arc::clone(&self.source),
            params.num_values,
            params.batching.batch_size(),
        );
        let expected_batches = batcher.batch_count();

        // Aggregatorは最初から並行して待機させる
        let aggregator_handle = spawn_aggregator(
            result_rx,
            params.num_values,
            Arc::clone(&state),
            Arc::clone(&reporter),
            config.enable_progress_reporting(),
        );

        let worker_handles = spawn_workers(
            Arc::clone(&self.transform),
            work_rx,
            &result_tx,
            params.worker_count,
        );

        // 出力キューの元の送信側はCoordinatorだけが持つ
        let coordinator_handle = spawn_shutdown_coordinator(
            worker_handles,
            result_tx,
            Arc::clone(&state),
            Arc::clone(&reporter),
        );

        let producer_handle = spawn_producer(
            batcher,
            work_tx,
            Arc::clone(&state),
            Arc::clone(&reporter),
        );

        // 全タスクの完了を待ってからエラーを判定する
        let producer_result = producer_handle.await;
        let coordinator_result = coordinator_handle.await;
        let aggregator_result = aggregator_handle.await;

        let producer_stats = producer_result??;
        let worker_stats = coordinator_result??;
        let aggregate = aggregator_result??;

        check_invariant("values_produced", params.num_values, producer_stats.values_sent)?;
        check_invariant("batches_produced", expected_batches, producer_stats.batches_sent)?;
        check_invariant("values_reduced", params.num_values, aggregate.values_reduced)?;
        check_invariant(
            "batches_reduced",
            producer_stats.batches_sent,
            aggregate.batches_reduced,
        )?;

        let summary = PipelineSummary {
            params,
            final_sum: aggregate.sum,
            batches_produced: producer_stats.batches_sent,
            values_produced: producer_stats.values_sent,
            batches_reduced: aggregate.batches_reduced,
            values_reduced: aggregate.values_reduced,
            worker_stats,
            elapsed: stopwatch.elapsed(),
        };

        tracing::info!(
            sum = summary.final_sum,
            elapsed_ms = summary.total_processing_time_ms(),
            "pipeline completed"
        );
        reporter.report_completed(&summary).await;

        Ok(summary)
    }
}

fn check_invariant(name: &str, expected: usize, actual: usize) -> PipelineResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(PipelineError::invariant(name, expected, actual))
    }
}

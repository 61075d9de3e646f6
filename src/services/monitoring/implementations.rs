// 進捗監視の具象実装

use crate::core::{PipelineParams, PipelineState, PipelineSummary, ProgressReporter};
use async_trait::async_trait;

/// tracingによる進捗報告実装
///
/// 出力先はsubscriber次第。標準出力の結果行とは混ざらない。
#[derive(Debug, Default, Clone)]
pub struct TracingProgressReporter;

impl TracingProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for TracingProgressReporter {
    async fn report_started(&self, params: &PipelineParams) {
        tracing::info!(
            num_values = params.num_values,
            workers = params.worker_count,
            batch_size = params.batching.batch_size(),
            batched = params.batching.is_batched(),
            buffer = params.channel_buffer_size,
            "🚀 pipeline started"
        );
    }

    async fn report_state_change(&self, from: PipelineState, to: PipelineState) {
        tracing::debug!(%from, %to, "state transition");
    }

    async fn report_progress(&self, values_reduced: usize, total_values: usize) {
        let percentage = if total_values == 0 {
            100.0
        } else {
            (values_reduced as f64 / total_values as f64) * 100.0
        };
        tracing::info!("📊 Progress: {values_reduced}/{total_values} ({percentage:.1}%)");
    }

    async fn report_completed(&self, summary: &PipelineSummary) {
        tracing::info!(
            sum = summary.final_sum,
            batches = summary.batches_reduced,
            elapsed_ms = summary.total_processing_time_ms(),
            "✅ pipeline completed"
        );
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _params: &PipelineParams) {
        // 何もしない
    }

    async fn report_state_change(&self, _from: PipelineState, _to: PipelineState) {
        // 何もしない
    }

    async fn report_progress(&self, _values_reduced: usize, _total_values: usize) {
        // 何もしない
    }

    async fn report_completed(&self, _summary: &PipelineSummary) {
        // 何もしない
    }
}

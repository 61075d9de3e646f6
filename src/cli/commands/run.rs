use crate::core::{PipelineConfig, PipelineParams, PipelineSummary};
use crate::engine::PipelineEngine;
use crate::services::{measure_async, DefaultPipelineConfig, SquareTransform, TracingProgressReporter};
use crate::source::CyclicSource;
use anyhow::Result;

/// 検証済みの実行設定
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub config: DefaultPipelineConfig,
    pub source: CyclicSource,
    pub verbose: u8,
}

/// 開始行
pub fn start_line(params: &PipelineParams) -> String {
    if params.batching.is_batched() {
        format!(
            "Producing {} values in batches of {} to {} consumers...",
            params.num_values,
            params.batching.batch_size(),
            params.worker_count
        )
    } else {
        format!(
            "Producing {} values to {} consumers...",
            params.num_values, params.worker_count
        )
    }
}

/// 結果行
pub fn final_sum_line(summary: &PipelineSummary) -> String {
    format!("Final Sum: {}", summary.final_sum)
}

/// 完了行
pub const COMPLETION_LINE: &str = "Finished main thread.";

/// パイプラインを実行し、結果行を標準出力へ書く
pub async fn execute_run(settings: RunSettings) -> Result<PipelineSummary> {
    // 進捗の出力有無は設定側の`enable_progress_reporting`だけで決まる
    let reporter = TracingProgressReporter::new();

    tracing::debug!(source = ?settings.source.values(), "source list prepared");
    println!("{}", start_line(&settings.config.params()));

    let engine = PipelineEngine::new(
        settings.source,
        SquareTransform::new(),
        settings.config,
        reporter,
    );
    let (result, wall_time) = measure_async(engine.run()).await;
    let summary = result?;
    tracing::info!(
        wall_time_ms = wall_time.as_millis() as u64,
        pipeline_ms = summary.total_processing_time_ms(),
        "⏱️ 実行完了"
    );

    println!("{}", final_sum_line(&summary));
    println!("{COMPLETION_LINE}");

    Ok(summary)
}

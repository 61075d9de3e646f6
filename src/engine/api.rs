// 高レベル公開API
// PipelineEngineを簡単に使用するための便利な関数

use super::PipelineEngine;
use crate::{
    core::{PipelineResult, PipelineSummary},
    services::{DefaultPipelineConfig, NoOpProgressReporter, SquareTransform, TracingProgressReporter},
    source::CyclicSource,
};

/// 標準構成のエンジン（進捗はtracingへ出力）
pub fn create_default_pipeline_engine(
    source: CyclicSource,
    config: DefaultPipelineConfig,
) -> PipelineEngine<CyclicSource, SquareTransform, DefaultPipelineConfig, TracingProgressReporter>
{
    PipelineEngine::new(source, SquareTransform::new(), config, TracingProgressReporter::new())
}

/// 静音版のエンジン（テスト・ベンチマーク用）
pub fn create_quiet_pipeline_engine(
    source: CyclicSource,
    config: DefaultPipelineConfig,
) -> PipelineEngine<CyclicSource, SquareTransform, DefaultPipelineConfig, NoOpProgressReporter> {
    PipelineEngine::new(source, SquareTransform::new(), config, NoOpProgressReporter::new())
}

/// シード付きソースで二乗和を計算する
///
/// `batch_size`が`None`の場合は1値ずつ流す
pub async fn run_seeded_pipeline(
    seed: u64,
    num_values: usize,
    worker_count: usize,
    batch_size: Option<usize>,
) -> PipelineResult<PipelineSummary> {
    let mut config = DefaultPipelineConfig::new(num_values, worker_count);
    if let Some(size) = batch_size {
        config = config.with_batch_size(size);
    }

    create_quiet_pipeline_engine(CyclicSource::from_seed(seed), config)
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_seeded_pipeline_is_reproducible() {
        let first = run_seeded_pipeline(99, 250, 3, Some(9)).await.unwrap();
        let second = run_seeded_pipeline(99, 250, 8, None).await.unwrap();

        assert_eq!(first.final_sum, second.final_sum);
        assert_eq!(
            first.final_sum,
            CyclicSource::from_seed(99).expected_sum_of_squares(250)
        );
    }

    #[tokio::test]
    async fn test_default_engine_runs() {
        let source = CyclicSource::from_values([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap();
        let engine =
            create_default_pipeline_engine(source, DefaultPipelineConfig::new(10, 2).with_batch_size(3));

        assert_eq!(engine.run().await.unwrap().final_sum, 385);
    }
}

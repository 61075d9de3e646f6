// テストユーティリティ
// 各統合テストで共有するソースとヘルパー

#![allow(dead_code)]

use fanout_pipeline::{CyclicSource, DefaultPipelineConfig, PipelineEngine, PipelineResult, PipelineSummary};
use fanout_pipeline::{NoOpProgressReporter, SquareTransform};

/// 1〜10の固定ソース
pub const ONE_TO_TEN: [u64; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

pub fn one_to_ten() -> CyclicSource {
    CyclicSource::from_values(ONE_TO_TEN).expect("1..=10 is a valid source list")
}

/// 静音エンジンで実行
pub async fn run_quiet(
    source: CyclicSource,
    config: DefaultPipelineConfig,
) -> PipelineResult<PipelineSummary> {
    PipelineEngine::new(source, SquareTransform::new(), config, NoOpProgressReporter::new())
        .run()
        .await
}

/// 逐次計算による期待値
pub fn naive_sum_of_squares(source: &[u64; 10], num_values: usize) -> u64 {
    (0..num_values).map(|i| source[i % 10].pow(2)).sum()
}

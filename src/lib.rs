// fan-out/fan-in 並行パイプライン
//
// Producer → 入力キュー → Worker Pool → 出力キュー → Aggregator
// の順に一方向でデータが流れ、クローズは逆方向に伝わる。

pub mod cli;
pub mod core;
pub mod engine;
pub mod logging;
pub mod services;
pub mod source;

pub use crate::core::{
    Batch, BatchingMode, PipelineConfig, PipelineError, PipelineResult, PipelineState,
    PipelineSummary,
};
pub use engine::{run_seeded_pipeline, FanOutPipeline, PipelineEngine};
pub use services::{DefaultPipelineConfig, NoOpProgressReporter, SquareTransform};
pub use source::CyclicSource;

// エンジン層 - 並行処理とオーケストレーション
// サービス層を組み合わせてパイプライン全体を構成する

pub mod aggregator;
pub mod api;
pub mod batcher;
pub mod coordinator;
mod pipeline;
pub mod pipeline_engine;
pub mod producer;
pub mod state;
pub mod worker;

// 公開API - 主要エンジンクラス
pub use api::{create_default_pipeline_engine, create_quiet_pipeline_engine, run_seeded_pipeline};
pub use batcher::Batcher;
pub use pipeline::FanOutPipeline;
pub use pipeline_engine::PipelineEngine;
pub use state::PipelineStateTracker;

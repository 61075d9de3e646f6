// サービス層 - 機能別の具象実装
// 各サービスはコア層のトレイトを実装し、エンジン層から注入される

pub mod config;
pub mod monitoring;
pub mod processing;
pub mod timing;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::DefaultPipelineConfig;
pub use monitoring::{NoOpProgressReporter, TracingProgressReporter};
pub use processing::SquareTransform;
pub use timing::{measure_async, Stopwatch};

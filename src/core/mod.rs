// コアレイヤー - 基盤となるトレイト、型、エラー定義
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod error;
pub mod traits;
pub mod types;

// 公開API - 明示的にエクスポートして曖昧性を回避
pub use error::{PipelineError, PipelineResult, ValidationError, ValidationResult};
pub use traits::{BatchTransform, PipelineConfig, ProgressReporter, ValueSource};
pub use types::{
    AggregateReport, Batch, BatchingMode, PipelineParams, PipelineState, PipelineSummary,
    ProducerStats, Value, WorkerStats, MAX_CHANNEL_BUFFER_SIZE,
};

// 設定管理機能
// パイプライン設定のビルダーと検証

pub mod implementations;

// 公開API
pub use implementations::{DefaultPipelineConfig, DEFAULT_CHANNEL_BUFFER_SIZE, DEFAULT_NUM_VALUES};

// 進捗監視機能
// 開始・状態遷移・進捗・完了の通知

pub mod implementations;

// 公開API
pub use implementations::{NoOpProgressReporter, TracingProgressReporter};

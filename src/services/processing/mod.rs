// 変換処理機能
// Workerが各バッチに適用する要素単位の変換

pub mod square;

// 公開API
pub use square::SquareTransform;

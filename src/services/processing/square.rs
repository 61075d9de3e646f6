// Square - 要素単位の二乗変換

use crate::core::{BatchTransform, PipelineError, PipelineResult, Value};

/// 各要素を二乗する変換
///
/// 純粋関数なので、どのWorkerがどのバッチを処理しても合計は変わらない
#[derive(Debug, Default, Clone, Copy)]
pub struct SquareTransform;

impl SquareTransform {
    pub fn new() -> Self {
        Self
    }
}

impl BatchTransform for SquareTransform {
    fn name(&self) -> &'static str {
        "square"
    }

    fn apply_value(&self, value: Value) -> PipelineResult<Value> {
        value
            .checked_mul(value)
            .ok_or_else(|| PipelineError::overflow("square", value))
    }
}

// パイプライン専用のカスタムエラー型定義

use thiserror::Error;

/// パイプライン固有のエラー型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("バリデーションエラー: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("演算オーバーフロー: {operation} (値: {operand})")]
    ArithmeticOverflow { operation: String, operand: u64 },

    #[error("不変条件違反: {invariant} (期待値: {expected}, 実際: {actual})")]
    InvariantViolation {
        invariant: String,
        expected: usize,
        actual: usize,
    },
}

impl PipelineError {
    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// オーバーフローエラーの作成
    pub fn overflow(operation: impl Into<String>, operand: u64) -> Self {
        Self::ArithmeticOverflow {
            operation: operation.into(),
            operand,
        }
    }

    /// 不変条件違反の作成
    pub fn invariant(invariant: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvariantViolation {
            invariant: invariant.into(),
            expected,
            actual,
        }
    }
}

/// パイプラインの結果型
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// 検証結果 - バリデーション専用の結果型
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// バリデーション専用エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("バリデーションエラー: {field} - {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    /// 新しいバリデーションエラーを作成
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for PipelineError {
    fn from(error: ValidationError) -> Self {
        PipelineError::ValidationError {
            field: error.field,
            reason: error.reason,
        }
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(error: tokio::task::JoinError) -> Self {
        PipelineError::TaskError { source: error }
    }
}

// パイプラインのトレイト定義
// 差し替え可能な境界を全てここで定義する

use super::error::PipelineResult;
use super::types::{Batch, BatchingMode, PipelineParams, PipelineState, PipelineSummary, Value};
use async_trait::async_trait;
use mockall::automock;

/// パイプライン設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// 生成する値の総数
    fn num_values(&self) -> usize;

    /// 並列Worker数
    fn worker_count(&self) -> usize;

    /// バッチ化モード
    fn batching(&self) -> BatchingMode;

    /// 入力・出力キューの容量
    fn channel_buffer_size(&self) -> usize;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;

    /// 開始パラメータとしてまとめる
    fn params(&self) -> PipelineParams {
        PipelineParams {
            num_values: self.num_values(),
            worker_count: self.worker_count(),
            batching: self.batching(),
            channel_buffer_size: self.channel_buffer_size(),
        }
    }
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告
    async fn report_started(&self, params: &PipelineParams);

    /// 状態遷移の報告
    async fn report_state_change(&self, from: PipelineState, to: PipelineState);

    /// 集計進捗の報告
    async fn report_progress(&self, values_reduced: usize, total_values: usize);

    /// 処理完了時の報告
    async fn report_completed(&self, summary: &PipelineSummary);
}

/// 入力値の供給元
///
/// インデックスから値への写像は純粋関数でなければならない
#[automock]
pub trait ValueSource: Send + Sync {
    /// `index`番目の値
    fn value_at(&self, index: usize) -> Value;

    /// 値が一巡する周期
    fn period(&self) -> usize;
}

/// バッチ単位の要素変換
///
/// 入力バッチは読み取り専用で、結果は新しいバッチとして返す
#[automock]
pub trait BatchTransform: Send + Sync {
    /// 変換名
    fn name(&self) -> &'static str;

    /// 単一値の変換
    fn apply_value(&self, value: Value) -> PipelineResult<Value>;

    /// バッチ全体の変換
    fn apply(&self, batch: &Batch) -> PipelineResult<Batch> {
        let values = batch
            .values()
            .iter()
            .map(|&value| self.apply_value(value))
            .collect::<PipelineResult<Vec<_>>>()?;
        Ok(Batch::new(batch.index(), values))
    }
}

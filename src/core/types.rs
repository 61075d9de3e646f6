// パイプラインで流れるデータ型定義

use super::error::{ValidationError, ValidationResult};
use std::fmt;
use std::time::Duration;

/// パイプラインで扱う数値
pub type Value = u64;

/// 出力キューへ流れる1単位
///
/// `index`はProducerが振った連番。出力キュー上での順序は保証されないため、
/// 集計側での確認用にのみ使用する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    index: usize,
    values: Vec<Value>,
}

impl Batch {
    pub fn new(index: usize, values: Vec<Value>) -> Self {
        Self { index, values }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// バッチ化モード
///
/// `-b`なしは1値ずつ流す非バッチ版、ありはバッチ版
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchingMode {
    #[default]
    PerValue,
    Batched(usize),
}

impl BatchingMode {
    /// 実際に使用するバッチサイズ
    pub const fn batch_size(&self) -> usize {
        match self {
            Self::PerValue => 1,
            Self::Batched(size) => *size,
        }
    }

    pub const fn is_batched(&self) -> bool {
        matches!(self, Self::Batched(_))
    }
}

/// パイプライン全体の状態
///
/// 前方向にのみ遷移する。遷移はキューのクローズと完了バリアのみで駆動される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PipelineState {
    /// タスク起動済み、データ未流通
    Starting = 0,
    /// Producer・Worker・Aggregatorが並行動作中
    Running = 1,
    /// 入力キュー閉鎖済み、Workerが残りを処理中
    Draining = 2,
    /// 全Worker終了、出力キュー閉鎖済み、Aggregatorが残りを集計中
    Finalizing = 3,
    /// Aggregator終了、結果報告済み
    Done = 4,
}

impl PipelineState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
        }
    }

    pub(crate) const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Running,
            2 => Self::Draining,
            3 => Self::Finalizing,
            _ => Self::Done,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 実行開始時のパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineParams {
    pub num_values: usize,
    pub worker_count: usize,
    pub batching: BatchingMode,
    pub channel_buffer_size: usize,
}

/// キュー容量の上限（tokioの有界チャンネルが受け付ける最大値）
pub const MAX_CHANNEL_BUFFER_SIZE: usize = tokio::sync::Semaphore::MAX_PERMITS;

impl PipelineParams {
    /// 全項目が1以上、キュー容量が上限以下であることを検証
    pub fn validate(&self) -> ValidationResult<()> {
        let checks = [
            ("-n", self.num_values),
            ("-w", self.worker_count),
            ("-b", self.batching.batch_size()),
            ("buffer_size", self.channel_buffer_size),
        ];

        for (field, value) in checks {
            if value == 0 {
                return Err(ValidationError::new(field, "1以上である必要があります"));
            }
        }

        if self.channel_buffer_size > MAX_CHANNEL_BUFFER_SIZE {
            return Err(ValidationError::new(
                "buffer_size",
                format!(
                    "{MAX_CHANNEL_BUFFER_SIZE}以下である必要があります: {}",
                    self.channel_buffer_size
                ),
            ));
        }
        Ok(())
    }
}

/// Producerの送信実績
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProducerStats {
    pub batches_sent: usize,
    pub values_sent: usize,
}

/// Worker単位の処理実績
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub worker_id: usize,
    pub batches_processed: usize,
    pub values_processed: usize,
}

/// Aggregatorの最終結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateReport {
    pub sum: u64,
    pub batches_reduced: usize,
    pub values_reduced: usize,
}

/// パイプライン実行全体のサマリー
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub params: PipelineParams,
    pub final_sum: u64,
    pub batches_produced: usize,
    pub values_produced: usize,
    pub batches_reduced: usize,
    pub values_reduced: usize,
    pub worker_stats: Vec<WorkerStats>,
    pub elapsed: Duration,
}

impl PipelineSummary {
    pub fn total_processing_time_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

// 設定管理の具象実装

use crate::core::{BatchingMode, PipelineConfig, ValidationResult};

/// 入力・出力キューの既定容量
pub const DEFAULT_CHANNEL_BUFFER_SIZE: usize = 1_000;

/// 既定の値の総数
pub const DEFAULT_NUM_VALUES: usize = 1_000;

/// デフォルト設定実装
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPipelineConfig {
    num_values: usize,
    worker_count: usize,
    batching: BatchingMode,
    buffer_size: usize,
    enable_progress: bool,
}

impl DefaultPipelineConfig {
    /// 値の総数とWorker数を指定して作成（非バッチ版）
    pub fn new(num_values: usize, worker_count: usize) -> Self {
        Self {
            num_values,
            worker_count,
            batching: BatchingMode::PerValue,
            buffer_size: DEFAULT_CHANNEL_BUFFER_SIZE,
            enable_progress: true,
        }
    }

    pub fn with_num_values(mut self, num_values: usize) -> Self {
        self.num_values = num_values;
        self
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// バッチ版に切り替える
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batching = BatchingMode::Batched(batch_size);
        self
    }

    pub fn with_batching(mut self, batching: BatchingMode) -> Self {
        self.batching = batching;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }

    /// 全項目が1以上、キュー容量が上限以下であることを検証
    pub fn validate(&self) -> ValidationResult<()> {
        self.params().validate()
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_VALUES, num_cpus::get().max(1))
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn num_values(&self) -> usize {
        self.num_values
    }

    fn worker_count(&self) -> usize {
        self.worker_count
    }

    fn batching(&self) -> BatchingMode {
        self.batching
    }

    fn channel_buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

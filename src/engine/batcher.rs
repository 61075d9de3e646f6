// Batcher - 入力値をバッチへまとめる
// 純粋なイテレータとして実装し、送信はProducerに任せる

use crate::core::{Batch, ValueSource};
use std::sync::Arc;

/// `num_values`個の値を`batch_size`単位に分割するイテレータ
///
/// 最後のバッチのみ`num_values % batch_size`個になり得る。
/// 生成したバッチはキューへ所有権ごと渡すため、構築中のバッファに同期は不要。
pub struct Batcher<S> {
    source: Arc<S>,
    num_values: usize,
    batch_size: usize,
    next_index: usize,
    next_batch: usize,
}

impl<S> Batcher<S>
where
    S: ValueSource,
{
    /// `batch_size`は1以上であること
    pub fn new(source: Arc<S>, num_values: usize, batch_size: usize) -> Self {
        debug_assert!(batch_size > 0, "batch_size must be positive");
        Self {
            source,
            num_values,
            batch_size: batch_size.max(1),
            next_index: 0,
            next_batch: 0,
        }
    }

    /// 生成されるバッチの総数
    pub fn batch_count(&self) -> usize {
        self.num_values.div_ceil(self.batch_size)
    }

    pub fn num_values(&self) -> usize {
        self.num_values
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl<S> Iterator for Batcher<S>
where
    S: ValueSource,
{
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.num_values {
            return None;
        }

        let end = (self.next_index + self.batch_size).min(self.num_values);
        let values = (self.next_index..end)
            .map(|i| self.source.value_at(i))
            .collect();
        let batch = Batch::new(self.next_batch, values);

        self.next_index = end;
        self.next_batch += 1;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.batch_count() - self.next_batch;
        (remaining, Some(remaining))
    }
}

impl<S> ExactSizeIterator for Batcher<S> where S: ValueSource {}

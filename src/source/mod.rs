// 入力ソース - 10要素の巡回リスト
// 乱数生成器はシードを明示的に受け取れる形で注入する

use crate::core::{ValidationError, ValidationResult, Value, ValueSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// ソースリストの要素数
pub const SOURCE_LEN: usize = 10;

/// ソース値の下限
pub const MIN_SOURCE_VALUE: Value = 1;

/// ソース値の上限
pub const MAX_SOURCE_VALUE: Value = 10;

/// 10要素の巡回ソース
///
/// `index`番目の値は`values[index % 10]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclicSource {
    values: [Value; SOURCE_LEN],
}

impl CyclicSource {
    /// シード付き乱数からリストを生成（再現可能）
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    /// OSエントロピーからリストを生成（実行毎に異なる）
    pub fn from_entropy() -> Self {
        Self::from_rng(&mut StdRng::from_entropy())
    }

    /// 任意の乱数生成器からリストを生成
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut values = [0; SOURCE_LEN];
        for value in values.iter_mut() {
            *value = rng.gen_range(MIN_SOURCE_VALUE..=MAX_SOURCE_VALUE);
        }
        Self { values }
    }

    /// 明示的な値でリストを作成
    pub fn from_values(values: [Value; SOURCE_LEN]) -> ValidationResult<Self> {
        if let Some(bad) = values
            .iter()
            .find(|v| !(MIN_SOURCE_VALUE..=MAX_SOURCE_VALUE).contains(*v))
        {
            return Err(ValidationError::new(
                "source",
                format!("値は{MIN_SOURCE_VALUE}〜{MAX_SOURCE_VALUE}の範囲である必要があります: {bad}"),
            ));
        }
        Ok(Self { values })
    }

    /// スライスから作成（要素数も検証）
    pub fn from_slice(values: &[Value]) -> ValidationResult<Self> {
        let array: [Value; SOURCE_LEN] = values.try_into().map_err(|_| {
            ValidationError::new(
                "source",
                format!(
                    "要素数は{SOURCE_LEN}である必要があります: {}",
                    values.len()
                ),
            )
        })?;
        Self::from_values(array)
    }

    pub fn values(&self) -> &[Value; SOURCE_LEN] {
        &self.values
    }

    /// 先頭`num_values`個の二乗和
    ///
    /// パイプラインの結果検証用。一巡分をまとめて計算する。
    pub fn expected_sum_of_squares(&self, num_values: usize) -> u64 {
        let cycle: u64 = self.values.iter().map(|v| v * v).sum();
        let full_cycles = (num_values / SOURCE_LEN) as u64;
        let remainder: u64 = self.values[..num_values % SOURCE_LEN]
            .iter()
            .map(|v| v * v)
            .sum();
        cycle * full_cycles + remainder
    }
}

impl ValueSource for CyclicSource {
    fn value_at(&self, index: usize) -> Value {
        self.values[index % SOURCE_LEN]
    }

    fn period(&self) -> usize {
        SOURCE_LEN
    }
}

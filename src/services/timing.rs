// 時間計測ユーティリティ

use std::future::Future;
use std::time::{Duration, Instant};

/// 経過時間を測るストップウォッチ
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started_at: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }
}

/// 非同期処理の実行時間を計測
pub async fn measure_async<T, Fut>(future: Fut) -> (T, Duration)
where
    Fut: Future<Output = T>,
{
    let stopwatch = Stopwatch::start();
    let value = future.await;
    (value, stopwatch.elapsed())
}

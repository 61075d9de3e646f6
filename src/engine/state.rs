// State - パイプライン状態機械
// 複数タスクから共有される前進専用の状態

use crate::core::{PipelineState, ProgressReporter};
use std::sync::atomic::{AtomicU8, Ordering};

/// 前進専用の状態トラッカー
///
/// 遷移はProducer・Coordinator・Aggregatorがそれぞれ1回ずつ行う。
/// 後退する遷移は無視される。
#[derive(Debug)]
pub struct PipelineStateTracker {
    state: AtomicU8,
}

impl PipelineStateTracker {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(PipelineState::Starting as u8),
        }
    }

    /// 現在の状態
    pub fn current(&self) -> PipelineState {
        PipelineState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// `next`へ進める
    ///
    /// 実際に前進した場合のみ遷移前の状態を返す
    pub fn advance(&self, next: PipelineState) -> Option<PipelineState> {
        let previous = PipelineState::from_u8(self.state.fetch_max(next as u8, Ordering::AcqRel));
        (previous < next).then_some(previous)
    }
}

impl Default for PipelineStateTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// 状態を進め、実際に遷移した場合のみ報告する
pub(crate) async fn transition<R>(state: &PipelineStateTracker, reporter: &R, next: PipelineState)
where
    R: ProgressReporter + ?Sized,
{
    if let Some(previous) = state.advance(next) {
        tracing::info!(from = %previous, to = %next, "pipeline state changed");
        reporter.report_state_change(previous, next).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockProgressReporter;
    use mockall::predicate::eq;
    use std::sync::Arc;

    #[test]
    fn test_initial_state_is_starting() {
        let tracker = PipelineStateTracker::new();
        assert_eq!(tracker.current(), PipelineState::Starting);
    }

    #[test]
    fn test_advance_moves_forward() {
        let tracker = PipelineStateTracker::new();

        assert_eq!(
            tracker.advance(PipelineState::Running),
            Some(PipelineState::Starting)
        );
        assert_eq!(
            tracker.advance(PipelineState::Draining),
            Some(PipelineState::Running)
        );
        assert_eq!(tracker.current(), PipelineState::Draining);
    }

    #[test]
    fn test_advance_ignores_backward_and_repeated() {
        let tracker = PipelineStateTracker::new();
        tracker.advance(PipelineState::Finalizing);

        assert_eq!(tracker.advance(PipelineState::Running), None);
        assert_eq!(tracker.advance(PipelineState::Finalizing), None);
        assert_eq!(tracker.current(), PipelineState::Finalizing);
    }

    #[tokio::test]
    async fn test_transition_reports_only_real_changes() {
        let tracker = PipelineStateTracker::new();
        let mut reporter = MockProgressReporter::new();
        reporter
            .expect_report_state_change()
            .with(eq(PipelineState::Starting), eq(PipelineState::Running))
            .times(1)
            .return_const(());

        transition(&tracker, &reporter, PipelineState::Running).await;
        // 同じ状態への遷移は報告されない
        transition(&tracker, &reporter, PipelineState::Running).await;
    }

    #[test]
    fn test_concurrent_advance_single_winner() {
        let tracker = Arc::new(PipelineStateTracker::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || tracker.advance(PipelineState::Done).is_some())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(tracker.current(), PipelineState::Done);
    }
}

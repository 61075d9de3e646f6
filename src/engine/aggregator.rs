// Aggregator - 結果集計機能（fan-in）

use super::state::{transition, PipelineStateTracker};
use crate::core::{AggregateReport, Batch, PipelineError, PipelineResult, PipelineState, ProgressReporter};
use std::sync::Arc;
use tokio::sync::mpsc;

/// 進捗報告の間隔（集計済みバッチ数）
const PROGRESS_INTERVAL: usize = 100;

/// Aggregator: 出力キューが閉鎖かつ空になるまで合計を取る
///
/// 合計値はこのタスクだけが所有するため同期は不要
pub fn spawn_aggregator<R>(
    mut result_rx: mpsc::Receiver<Batch>,
    total_values: usize,
    state: Arc<PipelineStateTracker>,
    reporter: Arc<R>,
    enable_progress: bool,
) -> tokio::task::JoinHandle<PipelineResult<AggregateReport>>
where
    R: ProgressReporter + 'static,
{
    tokio::spawn(async move {
        let mut report = AggregateReport::default();

        while let Some(batch) = result_rx.recv().await {
            for &square in batch.values() {
                report.sum = report
                    .sum
                    .checked_add(square)
                    .ok_or_else(|| PipelineError::overflow("sum", square))?;
            }
            report.batches_reduced += 1;
            report.values_reduced += batch.len();

            if enable_progress
                && (report.batches_reduced % PROGRESS_INTERVAL == 0
                    || report.values_reduced == total_values)
            {
                reporter
                    .report_progress(report.values_reduced, total_values)
                    .await;
            }
        }

        tracing::debug!(
            sum = report.sum,
            batches = report.batches_reduced,
            "aggregator drained output queue"
        );
        transition(&state, reporter.as_ref(), PipelineState::Done).await;

        Ok(report)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockProgressReporter;
    use crate::services::NoOpProgressReporter;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_aggregator_sums_until_closed() {
        let (result_tx, result_rx) = mpsc::channel::<Batch>(10);
        let state = Arc::new(PipelineStateTracker::new());

        let handle = spawn_aggregator(
            result_rx,
            4,
            Arc::clone(&state),
            Arc::new(NoOpProgressReporter::new()),
            false,
        );

        // 出力キュー上の順序は問わない
        result_tx.send(Batch::new(1, vec![16])).await.unwrap();
        result_tx.send(Batch::new(0, vec![1, 4, 9])).await.unwrap();
        drop(result_tx);

        let report = handle.await.unwrap().unwrap();

        assert_eq!(report.sum, 30);
        assert_eq!(report.batches_reduced, 2);
        assert_eq!(report.values_reduced, 4);
        assert_eq!(state.current(), PipelineState::Done);
    }

    #[tokio::test]
    async fn test_aggregator_empty_queue() {
        let (result_tx, result_rx) = mpsc::channel::<Batch>(1);
        drop(result_tx);

        let report = spawn_aggregator(
            result_rx,
            0,
            Arc::new(PipelineStateTracker::new()),
            Arc::new(NoOpProgressReporter::new()),
            true,
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(report, AggregateReport::default());
    }

    #[tokio::test]
    async fn test_aggregator_detects_overflow() {
        let (result_tx, result_rx) = mpsc::channel::<Batch>(2);

        let handle = spawn_aggregator(
            result_rx,
            2,
            Arc::new(PipelineStateTracker::new()),
            Arc::new(NoOpProgressReporter::new()),
            false,
        );

        result_tx.send(Batch::new(0, vec![u64::MAX, 1])).await.unwrap();
        drop(result_tx);

        let result = handle.await.unwrap();
        assert!(matches!(
            result,
            Err(PipelineError::ArithmeticOverflow { .. })
        ));
    }

    #[tokio::test]
    async fn test_aggregator_reports_final_progress() {
        let mut reporter = MockProgressReporter::new();
        reporter
            .expect_report_progress()
            .with(eq(3), eq(3))
            .times(1)
            .return_const(());
        reporter.expect_report_state_change().return_const(());

        let (result_tx, result_rx) = mpsc::channel::<Batch>(2);
        let handle = spawn_aggregator(
            result_rx,
            3,
            Arc::new(PipelineStateTracker::new()),
            Arc::new(reporter),
            true,
        );

        result_tx.send(Batch::new(0, vec![1, 4])).await.unwrap();
        result_tx.send(Batch::new(1, vec![9])).await.unwrap();
        drop(result_tx);

        assert_eq!(handle.await.unwrap().unwrap().sum, 14);
    }

    #[tokio::test]
    async fn test_aggregator_skips_progress_when_disabled() {
        let mut reporter = MockProgressReporter::new();
        reporter.expect_report_progress().times(0);
        reporter.expect_report_state_change().return_const(());

        let (result_tx, result_rx) = mpsc::channel::<Batch>(2);
        let handle = spawn_aggregator(
            result_rx,
            2,
            Arc::new(PipelineStateTracker::new()),
            Arc::new(reporter),
            false,
        );

        result_tx.send(Batch::new(0, vec![1, 4])).await.unwrap();
        drop(result_tx);

        assert_eq!(handle.await.unwrap().unwrap().sum, 5);
    }
}

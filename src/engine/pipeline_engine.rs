// PipelineEngine - 依存性注入によるパイプライン実行エンジン
// ソース・変換・設定・報告の全てをコンストラクタで受け取る

use super::pipeline::FanOutPipeline;
use crate::core::{
    BatchTransform, PipelineConfig, PipelineResult, PipelineSummary, ProgressReporter, ValueSource,
};
use std::sync::Arc;

/// 依存性注入によるパイプライン実行エンジン
///
/// タスク間で共有される依存関係は初期からArcで管理する
pub struct PipelineEngine<S, T, C, R> {
    source: Arc<S>,
    transform: Arc<T>,
    config: Arc<C>,
    reporter: Arc<R>,
}

impl<S, T, C, R> PipelineEngine<S, T, C, R>
where
    S: ValueSource + 'static,
    T: BatchTransform + 'static,
    C: PipelineConfig,
    R: ProgressReporter + 'static,
{
    /// 新しいエンジンを作成（Constructor Injection）
    pub fn new(source: S, transform: T, config: C, reporter: R) -> Self {
        Self {
            source: Arc::new(source),
            transform: Arc::new(transform),
            config: Arc::new(config),
            reporter: Arc::new(reporter),
        }
    }

    /// パイプラインを実行（設定の検証は実行開始時に行われる）
    pub async fn run(&self) -> PipelineResult<PipelineSummary> {
        tracing::debug!(
            transform = self.transform.name(),
            period = self.source.period(),
            "starting pipeline engine"
        );

        FanOutPipeline::new(Arc::clone(&self.source), Arc::clone(&self.transform))
            .execute(self.config.as_ref(), Arc::clone(&self.reporter))
            .await
    }

    /// 設定への参照を取得
    pub fn config(&self) -> &C {
        &self.config
    }

    /// ソースへの参照を取得
    pub fn source(&self) -> &S {
        &self.source
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}

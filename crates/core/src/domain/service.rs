use super::batch::TranscribeBatchResult;
use super::error::Result;
use super::job::TranscribeJobRequest;
use super::settings::ServiceConfig;
use super::update::TranscribeJobsUpdate;

/// 進捗コールバック。`transcribe` が戻るまでに0回以上、同期的に呼ばれる。
pub type OnUpdate<'a> = &'a mut dyn FnMut(TranscribeJobsUpdate);

/// 書き起こしサービスのコアトレイト。全実装（テストダブル含む）がこれを満たす。
///
/// 実装は [`ServiceRegistry`](crate::usecase::registry::ServiceRegistry) に
/// ファクトリとして登録し、モジュールパスで解決される。
pub trait TranscriptionService: Send + Sync {
    /// 一度だけ呼ばれる初期化（認証情報の設定など）。
    fn init_service(&mut self, config: &ServiceConfig) -> Result<()>;

    /// リクエスト列を書き起こし、最終的なバッチ結果を返す。
    ///
    /// `batch_id` は空でもよい。途中経過は `on_update` に通知する。
    fn transcribe(
        &self,
        requests: &[TranscribeJobRequest],
        batch_id: &str,
        on_update: Option<OnUpdate<'_>>,
    ) -> Result<TranscribeBatchResult>;
}

//! 書き起こしサブシステム共通の契約ライブラリ。
//!
//! - [`domain`]: ジョブ/バッチのデータモデル、サービス trait、エラー型
//! - [`usecase`]: サービス実装の登録と解決

pub mod domain;
pub mod usecase;

pub use domain::batch::{
    transcribe_jobs_to_result, JobUpdate, StatusSelection, TranscribeBatchResult,
    TranscribeBatchResultSummary,
};
pub use domain::error::{ErrorCode, Result, TranscribeError};
pub use domain::job::{next_job_id, requests_to_job_batch, JobInfo, TranscribeJob, TranscribeJobRequest};
pub use domain::service::{OnUpdate, TranscriptionService};
pub use domain::settings::{ServiceConfig, DEFAULT_LANGUAGE_CODE, TRANSCRIBE_MODULE_PATH_ENV};
pub use domain::status::TranscribeJobStatus;
pub use domain::update::TranscribeJobsUpdate;
pub use usecase::registry::{ModuleInit, ServiceFactory, ServiceRegistry};

use serde::Serialize;

use super::settings::TRANSCRIBE_MODULE_PATH_ENV;

/// エラーコード（ログ・フィクスチャ出力用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "E_CONFIGURATION")]
    Configuration,
    #[serde(rename = "E_MODULE_NOT_FOUND")]
    ModuleNotFound,
    #[serde(rename = "E_REGISTRATION")]
    Registration,
    #[serde(rename = "E_UNKNOWN_JOB")]
    UnknownJob,
    #[serde(rename = "E_INVALID_STATUS")]
    InvalidStatus,
    #[serde(rename = "E_SERVICE")]
    Service,
    #[serde(rename = "E_SERIALIZATION")]
    Serialization,
    #[serde(rename = "E_IO")]
    Io,
}

/// transcribe-core 共通エラー
///
/// サービス解決の3種類（設定不足・モジュール未検出・ファクトリ未登録）は
/// 呼び出し側で区別できるよう別バリアントにしている。
#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error(
        "missing required env '{}' which should point to a TransciptionService implementation.",
        TRANSCRIBE_MODULE_PATH_ENV
    )]
    MissingModulePath,

    #[error("No module named '{path}'")]
    ModuleNotFound { path: String },

    #[error(
        "Module found for path {path} but no registered TranscriptionService factory. \
         Perhaps the module is not calling register_transcription_service_factory from __init__.py?"
    )]
    FactoryNotRegistered { path: String },

    #[error("update for untracked transcribe job id '{id}' (known ids={})", format_ids(.known_ids))]
    UnknownJob { id: String, known_ids: Vec<String> },

    #[error("invalid transcribe job status: {0}")]
    InvalidStatus(String),

    #[error("Transcription service error: {0}")]
    Service(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// JSON 以外の形式（YAML フィクスチャなど）の読み込み失敗
    #[error("invalid {format} document: {message}")]
    Format { format: &'static str, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TranscribeError>;

impl TranscribeError {
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingModulePath => ErrorCode::Configuration,
            Self::ModuleNotFound { .. } => ErrorCode::ModuleNotFound,
            Self::FactoryNotRegistered { .. } => ErrorCode::Registration,
            Self::UnknownJob { .. } => ErrorCode::UnknownJob,
            Self::InvalidStatus(_) => ErrorCode::InvalidStatus,
            Self::Service(_) => ErrorCode::Service,
            Self::Serialization(_) | Self::Format { .. } => ErrorCode::Serialization,
            Self::Io(_) => ErrorCode::Io,
        }
    }

    /// サービス解決の失敗かどうか
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::MissingModulePath | Self::ModuleNotFound { .. } | Self::FactoryNotRegistered { .. }
        )
    }
}

/// `['a', 'b']` 形式で id 一覧を表示する
fn format_ids(ids: &[String]) -> String {
    let quoted: Vec<String> = ids.iter().map(|id| format!("'{id}'")).collect();
    format!("[{}]", quoted.join(", "))
}

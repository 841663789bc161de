use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::settings::DEFAULT_LANGUAGE_CODE;
use super::status::TranscribeJobStatus;

/// ジョブ付帯情報（プロバイダ固有のキー/値）
pub type JobInfo = BTreeMap<String, String>;

fn default_language_code() -> String {
    DEFAULT_LANGUAGE_CODE.to_string()
}

/// `null` を空文字として読む
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// ソースファイル名から一意なジョブIDを生成する。
///
/// `"/path/to/myfile3.mp3"` → `"myfile3-<32桁hex>"`
pub fn next_job_id(source_file: &str) -> String {
    let stem = Path::new(source_file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}-{}", uuid::Uuid::new_v4().simple())
}

// ─── TranscribeJob ───────────────────────────────────────────────

/// 書き起こしジョブ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeJob {
    #[serde(default)]
    pub batch_id: String,
    pub job_id: String,
    pub source_file: String,
    #[serde(default)]
    pub media_format: String,
    #[serde(default = "default_language_code")]
    pub language_code: String,
    #[serde(default)]
    pub status: TranscribeJobStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transcript: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub error: String,
    #[serde(default)]
    pub info: JobInfo,
}

impl TranscribeJob {
    pub fn new(
        batch_id: impl Into<String>,
        job_id: impl Into<String>,
        source_file: impl Into<String>,
        media_format: impl Into<String>,
    ) -> Self {
        Self {
            batch_id: batch_id.into(),
            job_id: job_id.into(),
            source_file: source_file.into(),
            media_format: media_format.into(),
            language_code: default_language_code(),
            status: TranscribeJobStatus::None,
            transcript: String::new(),
            error: String::new(),
            info: JobInfo::new(),
        }
    }

    pub fn with_status(mut self, status: TranscribeJobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = transcript.into();
        self
    }

    /// バッチ横断の完全修飾ID。`batch_id` が空なら `job_id` のみ。
    pub fn get_fq_id(&self) -> String {
        if self.batch_id.is_empty() {
            self.job_id.clone()
        } else {
            format!("{}-{}", self.batch_id, self.job_id)
        }
    }

    /// SUCCEEDED / FAILED に到達済みか
    pub fn is_resolved(&self) -> bool {
        self.status.is_terminal()
    }
}

// ─── TranscribeJobRequest ────────────────────────────────────────

/// 書き起こしリクエスト（サービス呼び出し前に利用者が組み立てる）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "JobRequestFields")]
pub struct TranscribeJobRequest {
    pub job_id: String,
    pub source_file: String,
    /// 空の場合は拡張子から推定
    pub media_format: String,
    pub language_code: String,
}

/// デシリアライズ用。jobId 省略時は生成する。
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobRequestFields {
    #[serde(default)]
    job_id: Option<String>,
    source_file: String,
    #[serde(default)]
    media_format: String,
    #[serde(default = "default_language_code")]
    language_code: String,
}

impl From<JobRequestFields> for TranscribeJobRequest {
    fn from(fields: JobRequestFields) -> Self {
        Self::with_job_id(fields.job_id.unwrap_or_default(), fields.source_file)
            .media_format(fields.media_format)
            .language_code(fields.language_code)
    }
}

impl TranscribeJobRequest {
    /// jobId を自動生成してリクエストを作る
    pub fn new(source_file: impl Into<String>) -> Self {
        Self::with_job_id_generator(source_file, next_job_id)
    }

    /// jobId を指定して作る。空文字なら自動生成にフォールバック。
    pub fn with_job_id(job_id: impl Into<String>, source_file: impl Into<String>) -> Self {
        let job_id = job_id.into();
        if job_id.is_empty() {
            return Self::new(source_file);
        }
        Self {
            job_id,
            source_file: source_file.into(),
            media_format: String::new(),
            language_code: default_language_code(),
        }
    }

    /// ID生成関数を差し替えて作る（テストでの固定ID用）
    pub fn with_job_id_generator(
        source_file: impl Into<String>,
        generate: impl FnOnce(&str) -> String,
    ) -> Self {
        let source_file = source_file.into();
        Self {
            job_id: generate(&source_file),
            source_file,
            media_format: String::new(),
            language_code: default_language_code(),
        }
    }

    pub fn media_format(mut self, media_format: impl Into<String>) -> Self {
        self.media_format = media_format.into();
        self
    }

    pub fn language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    pub fn get_language_code(&self, default_language_code: &str) -> String {
        if self.language_code.is_empty() {
            default_language_code.to_string()
        } else {
            self.language_code.clone()
        }
    }

    /// 明示指定がなければ拡張子（先頭の `.` なし、大小文字はそのまま）
    pub fn get_media_format(&self) -> String {
        if !self.media_format.is_empty() {
            return self.media_format.clone();
        }
        Path::new(&self.source_file)
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn to_job(&self, batch_id: &str, status: TranscribeJobStatus) -> TranscribeJob {
        TranscribeJob {
            batch_id: batch_id.to_string(),
            job_id: self.job_id.clone(),
            source_file: self.source_file.clone(),
            media_format: self.get_media_format(),
            language_code: self.get_language_code(DEFAULT_LANGUAGE_CODE),
            status,
            transcript: String::new(),
            error: String::new(),
            info: JobInfo::new(),
        }
    }
}

/// リクエスト列を同一バッチのジョブ列に変換する
pub fn requests_to_job_batch<'a, I>(batch_id: &str, requests: I) -> Vec<TranscribeJob>
where
    I: IntoIterator<Item = &'a TranscribeJobRequest>,
{
    requests
        .into_iter()
        .map(|r| r.to_job(batch_id, TranscribeJobStatus::None))
        .collect()
}

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use transcribe_core::{
    Result, TranscribeBatchResult, TranscribeError, TranscribeJobRequest, TranscribeJobsUpdate,
};

/// 1回の `transcribe` 呼び出しを再生するためのフィクスチャ
///
/// ファイル形式は YAML（`mock-transcribe-call.yaml`）か JSON。どちらも
/// `result`（`transcribeJobsById`）・`requests`・`updates` の3キーを持つ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockTranscribeCallFixture {
    pub result: TranscribeBatchResult,
    #[serde(default)]
    pub requests: Vec<TranscribeJobRequest>,
    #[serde(default)]
    pub updates: Vec<TranscribeJobsUpdate>,
}

impl MockTranscribeCallFixture {
    pub fn new(result: TranscribeBatchResult) -> Self {
        Self {
            result,
            ..Default::default()
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading mock transcribe call fixture: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// テスト用ディレクトリの `mock-transcribe-call.yaml` などを読み込む
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading mock transcribe call fixture: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| TranscribeError::Format {
            format: "yaml",
            message: e.to_string(),
        })
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

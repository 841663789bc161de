use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::batch::TranscribeBatchResult;
use super::error::Result;

/// 進捗通知（差分）。`ids_updated` は発行順で、重複を含みうる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeJobsUpdate {
    #[serde(default)]
    pub result: TranscribeBatchResult,
    #[serde(default)]
    pub ids_updated: Vec<String>,
}

impl TranscribeJobsUpdate {
    pub fn new(result: TranscribeBatchResult, ids_updated: Vec<String>) -> Self {
        Self { result, ids_updated }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

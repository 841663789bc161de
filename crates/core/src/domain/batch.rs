use std::borrow::Borrow;
use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{Result, TranscribeError};
use super::job::{JobInfo, TranscribeJob};
use super::status::TranscribeJobStatus;

// ─── JobUpdate ───────────────────────────────────────────────────

/// `update_job` に渡す更新内容。transcript/error/info は既存値と
/// マージされず、そのまま置き換わる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobUpdate {
    pub status: TranscribeJobStatus,
    pub info: JobInfo,
    pub transcript: String,
    pub error: String,
}

impl JobUpdate {
    pub fn new(status: TranscribeJobStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn info(mut self, info: JobInfo) -> Self {
        self.info = info;
        self
    }

    pub fn transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = transcript.into();
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }
}

// ─── TranscribeBatchResult ───────────────────────────────────────

/// バッチ結果（fq-id → ジョブ）
///
/// 挿入順を保つ。`first()` の結果を決定的にするため HashMap は使わない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscribeBatchResult {
    #[serde(rename = "transcribeJobsById", default)]
    jobs_by_id: IndexMap<String, TranscribeJob>,
}

impl TranscribeBatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// ジョブを追加する。キーは呼び出し側が決める（通常は `get_fq_id()`）。
    /// 既存キーは位置を保ったまま置き換える。
    pub fn insert(&mut self, id: impl Into<String>, job: TranscribeJob) -> Option<TranscribeJob> {
        self.jobs_by_id.insert(id.into(), job)
    }

    pub fn get(&self, id: &str) -> Option<&TranscribeJob> {
        self.jobs_by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.jobs_by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.jobs_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs_by_id.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.jobs_by_id.keys().map(String::as_str)
    }

    /// 挿入順のジョブ列。呼ぶたびに先頭から列挙し直せる。
    pub fn jobs(&self) -> impl Iterator<Item = &TranscribeJob> + '_ {
        self.jobs_by_id.values()
    }

    /// 挿入順のジョブ列（変更可）。キーは変わらない。
    pub fn jobs_mut(&mut self) -> impl Iterator<Item = &mut TranscribeJob> + '_ {
        self.jobs_by_id.values_mut()
    }

    /// 単一ジョブのリクエスト向けの便宜メソッド
    pub fn first(&self) -> Option<&TranscribeJob> {
        self.jobs().next()
    }

    pub fn has_any_unresolved(&self) -> bool {
        self.jobs().any(|j| !j.is_resolved())
    }

    /// 保存済みの状態が終端かどうかを返す。未知の id は false。
    ///
    /// `_status` は判定に使われない（既存の呼び出し側との互換のため引数だけ残す）。
    pub fn job_completed(&self, id: &str, _status: TranscribeJobStatus) -> bool {
        self.get(id).is_some_and(TranscribeJob::is_resolved)
    }

    pub fn summary(&self) -> TranscribeBatchResultSummary {
        let mut summary = TranscribeBatchResultSummary::default();
        for job in self.jobs() {
            summary.increment(job.status);
        }
        summary
    }

    /// ジョブ状態を更新する。
    ///
    /// - 未知の id → `UnknownJob`（バッチは変更しない）
    /// - 状態が同じ → `Ok(false)`（何もしない）
    /// - それ以外 → 新しいジョブで置き換えて `Ok(true)`
    pub fn update_job(&mut self, id: &str, update: JobUpdate) -> Result<bool> {
        let Some(current) = self.jobs_by_id.get_mut(id) else {
            let mut known_ids: Vec<String> = self.ids().map(str::to_string).collect();
            known_ids.sort();
            return Err(TranscribeError::UnknownJob {
                id: id.to_string(),
                known_ids,
            });
        };

        if current.status == update.status {
            return Ok(false);
        }
        if current.is_resolved() {
            log::warn!(
                "transcribe job {} already {} but updated to {}",
                id,
                current.status,
                update.status
            );
        }

        current.status = update.status;
        current.transcript = update.transcript;
        current.error = update.error;
        current.info = update.info;
        log::debug!("transcribe job {} -> {}", id, current.status);
        Ok(true)
    }

    /// プレーンデータ表現（`{"transcribeJobsById": {...}}`）
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// プレーンデータ表現から組み立てる。ジョブのフィールドは既定値で補完される。
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl FromIterator<(String, TranscribeJob)> for TranscribeBatchResult {
    fn from_iter<I: IntoIterator<Item = (String, TranscribeJob)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (id, job) in iter {
            result.insert(id, job);
        }
        result
    }
}

/// 各ジョブの fq-id をキーにしてバッチ結果を作る
pub fn transcribe_jobs_to_result<I>(jobs: I) -> TranscribeBatchResult
where
    I: IntoIterator<Item = TranscribeJob>,
{
    jobs.into_iter().map(|j| (j.get_fq_id(), j)).collect()
}

// ─── Summary ─────────────────────────────────────────────────────

/// 状態ごとのジョブ数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeBatchResultSummary {
    pub job_counts_by_status: BTreeMap<TranscribeJobStatus, usize>,
}

/// `get_count` の引数。単一の状態、または状態を列挙できるもの
/// （配列・スライス・`Vec`・集合・イテレータ）。
pub trait StatusSelection {
    fn count_in(self, summary: &TranscribeBatchResultSummary) -> usize;
}

impl StatusSelection for TranscribeJobStatus {
    fn count_in(self, summary: &TranscribeBatchResultSummary) -> usize {
        summary.job_counts_by_status.get(&self).copied().unwrap_or(0)
    }
}

impl<I> StatusSelection for I
where
    I: IntoIterator,
    I::Item: Borrow<TranscribeJobStatus>,
{
    fn count_in(self, summary: &TranscribeBatchResultSummary) -> usize {
        self.into_iter()
            .map(|item| {
                let status: &TranscribeJobStatus = item.borrow();
                <TranscribeJobStatus as StatusSelection>::count_in(*status, summary)
            })
            .sum()
    }
}

impl TranscribeBatchResultSummary {
    pub fn get_count(&self, statuses: impl StatusSelection) -> usize {
        statuses.count_in(self)
    }

    /// SUCCEEDED + FAILED
    pub fn get_count_completed(&self) -> usize {
        self.get_count(TranscribeJobStatus::TERMINAL)
    }

    pub fn get_count_total(&self) -> usize {
        self.job_counts_by_status.values().sum()
    }

    pub fn increment(&mut self, status: TranscribeJobStatus) -> usize {
        let n = self.job_counts_by_status.entry(status).or_insert(0);
        *n += 1;
        *n
    }
}

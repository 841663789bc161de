use transcribe_core::{
    JobInfo, JobUpdate, Result, TranscribeBatchResult, TranscribeJobRequest, TranscribeJobStatus,
};

/// 固定結果を返すジョブの定義。状態のデフォルトは SUCCEEDED。
#[derive(Debug, Clone)]
pub struct MockTranscribeJob {
    pub batch_id: String,
    pub request: TranscribeJobRequest,
    pub error: String,
    pub info: JobInfo,
    pub status: TranscribeJobStatus,
    pub transcript: String,
}

impl MockTranscribeJob {
    pub fn new(batch_id: impl Into<String>, request: TranscribeJobRequest) -> Self {
        Self {
            batch_id: batch_id.into(),
            request,
            error: String::new(),
            info: JobInfo::new(),
            status: TranscribeJobStatus::Succeeded,
            transcript: String::new(),
        }
    }

    pub fn transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = transcript.into();
        self
    }

    pub fn status(mut self, status: TranscribeJobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    pub fn info(mut self, info: JobInfo) -> Self {
        self.info = info;
        self
    }

    /// リクエストからジョブを作って結果に追加し、定義した状態まで進める
    pub fn add_result<'a>(&self, result: &'a mut TranscribeBatchResult) -> Result<&'a mut TranscribeBatchResult> {
        let job = self.request.to_job(&self.batch_id, TranscribeJobStatus::None);
        let fq_id = job.get_fq_id();
        result.insert(fq_id.clone(), job);
        result.update_job(
            &fq_id,
            JobUpdate::new(self.status)
                .info(self.info.clone())
                .transcript(self.transcript.clone())
                .error(self.error.clone()),
        )?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_result_defaults_to_succeeded() {
        let mut result = TranscribeBatchResult::new();
        MockTranscribeJob::new("b1", TranscribeJobRequest::with_job_id("j1", "/fake/audio1.mp3"))
            .transcript("hello")
            .add_result(&mut result)
            .unwrap();

        let job = result.get("b1-j1").unwrap();
        assert_eq!(job.status, TranscribeJobStatus::Succeeded);
        assert_eq!(job.transcript, "hello");
        assert_eq!(job.media_format, "mp3");
    }

    #[test]
    fn test_add_result_with_failure() {
        let mut result = TranscribeBatchResult::new();
        MockTranscribeJob::new("b1", TranscribeJobRequest::with_job_id("j2", "clip.wav"))
            .status(TranscribeJobStatus::Failed)
            .error("unsupported codec")
            .add_result(&mut result)
            .unwrap();

        let job = result.get("b1-j2").unwrap();
        assert_eq!(job.status, TranscribeJobStatus::Failed);
        assert_eq!(job.error, "unsupported codec");
        assert_eq!(result.summary().get_count_completed(), 1);
    }
}

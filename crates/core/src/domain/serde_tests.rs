#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::batch::{transcribe_jobs_to_result, TranscribeBatchResult};
    use crate::domain::error::{ErrorCode, TranscribeError};
    use crate::domain::job::{JobInfo, TranscribeJob, TranscribeJobRequest};
    use crate::domain::status::TranscribeJobStatus;
    use crate::domain::update::TranscribeJobsUpdate;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TranscribeJobStatus::None).unwrap(),
            "\"NONE\""
        );
        assert_eq!(
            serde_json::to_string(&TranscribeJobStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::from_str::<TranscribeJobStatus>("\"SUCCEEDED\"").unwrap(),
            TranscribeJobStatus::Succeeded
        );
        assert!(serde_json::from_str::<TranscribeJobStatus>("\"succeeded\"").is_err());
    }

    #[test]
    fn test_job_uses_camel_case_fields() {
        let job = TranscribeJob::new("b1", "j1", "/fake/audio1.mp3", "mp3");
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(
            value,
            json!({
                "batchId": "b1",
                "jobId": "j1",
                "sourceFile": "/fake/audio1.mp3",
                "mediaFormat": "mp3",
                "languageCode": "en-US",
                "status": "NONE",
                "transcript": "",
                "error": "",
                "info": {}
            })
        );
    }

    #[test]
    fn test_job_deserialization_fills_defaults() {
        let job: TranscribeJob = serde_json::from_value(json!({
            "batchId": "b1",
            "jobId": "j1",
            "sourceFile": "a.wav",
            "mediaFormat": "wav",
            "status": "FAILED",
            "transcript": null
        }))
        .unwrap();
        assert_eq!(job.language_code, "en-US");
        assert_eq!(job.status, TranscribeJobStatus::Failed);
        assert_eq!(job.transcript, "");
        assert!(job.info.is_empty());
    }

    #[test]
    fn test_request_deserialization_generates_job_id() {
        let req: TranscribeJobRequest =
            serde_json::from_value(json!({"sourceFile": "/path/to/myfile3.mp3"})).unwrap();
        assert!(req.job_id.starts_with("myfile3-"));
        assert_eq!(req.language_code, "en-US");
        assert_eq!(req.get_media_format(), "mp3");

        let req: TranscribeJobRequest =
            serde_json::from_value(json!({"jobId": "j9", "sourceFile": "x.ogg", "mediaFormat": "opus"}))
                .unwrap();
        assert_eq!(req.job_id, "j9");
        assert_eq!(req.get_media_format(), "opus");
    }

    #[test]
    fn test_batch_roundtrip_with_every_status() {
        let jobs = TranscribeJobStatus::ALL.into_iter().enumerate().map(|(i, status)| {
            let mut info = JobInfo::new();
            info.insert("ordinal".to_string(), status.ordinal().to_string());
            TranscribeJob {
                info,
                transcript: format!("text {i}"),
                ..TranscribeJob::new("b1", format!("j{i}"), format!("/audio/{i}.mp3"), "mp3")
                    .with_status(status)
            }
        });
        let batch = transcribe_jobs_to_result(jobs.collect::<Vec<_>>());

        let value = batch.to_value().unwrap();
        let rebuilt = TranscribeBatchResult::from_value(value.clone()).unwrap();
        assert_eq!(rebuilt, batch);
        assert_eq!(rebuilt.to_value().unwrap(), value);
    }

    #[test]
    fn test_batch_serialization_preserves_insertion_order() {
        let mut batch = TranscribeBatchResult::new();
        batch.insert("z", TranscribeJob::new("", "z", "z.mp3", "mp3"));
        batch.insert("a", TranscribeJob::new("", "a", "a.mp3", "mp3"));

        let json = serde_json::to_string(&batch).unwrap();
        assert!(json.find("\"z\"").unwrap() < json.find("\"a\"").unwrap());

        let back: TranscribeBatchResult = serde_json::from_str(&json).unwrap();
        let ids: Vec<&str> = back.ids().collect();
        assert_eq!(ids, vec!["z", "a"]);
    }

    #[test]
    fn test_batch_from_plain_fields() {
        let batch = TranscribeBatchResult::from_value(json!({
            "transcribeJobsById": {
                "b1-j1": {
                    "batchId": "b1",
                    "jobId": "j1",
                    "sourceFile": "/fake/audio1.mp3",
                    "mediaFormat": "mp3",
                    "status": "SUCCEEDED",
                    "transcript": "hello"
                }
            }
        }))
        .unwrap();
        let job = batch.get("b1-j1").unwrap();
        assert_eq!(job.status, TranscribeJobStatus::Succeeded);
        assert_eq!(job.transcript, "hello");

        assert!(TranscribeBatchResult::from_value(json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_jobs_update_roundtrip() {
        let batch = transcribe_jobs_to_result(vec![
            TranscribeJob::new("b1", "j1", "a.mp3", "mp3").with_status(TranscribeJobStatus::Queued),
        ]);
        let update = TranscribeJobsUpdate::new(batch, vec!["b1-j1".into(), "b1-j1".into()]);

        let value = update.to_value().unwrap();
        assert_eq!(value["idsUpdated"], json!(["b1-j1", "b1-j1"]));
        assert_eq!(TranscribeJobsUpdate::from_value(value).unwrap(), update);

        let empty = TranscribeJobsUpdate::from_value(json!({})).unwrap();
        assert!(empty.result.is_empty());
        assert!(empty.ids_updated.is_empty());
    }

    #[test]
    fn test_summary_serialization() {
        let batch = transcribe_jobs_to_result(vec![
            TranscribeJob::new("b", "1", "a.mp3", "mp3").with_status(TranscribeJobStatus::Succeeded),
            TranscribeJob::new("b", "2", "a.mp3", "mp3").with_status(TranscribeJobStatus::Succeeded),
        ]);
        let json = serde_json::to_value(batch.summary()).unwrap();
        assert_eq!(json, json!({"jobCountsByStatus": {"SUCCEEDED": 2}}));
    }

    #[test]
    fn test_error_code_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::Configuration).unwrap(),
            "\"E_CONFIGURATION\""
        );
        assert_eq!(
            serde_json::to_string(&TranscribeError::ModuleNotFound { path: "x".into() }.code()).unwrap(),
            "\"E_MODULE_NOT_FOUND\""
        );
    }
}

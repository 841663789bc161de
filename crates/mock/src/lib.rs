//! transcribe-core のテスト用ヘルパー。
//!
//! オンラインAPIである書き起こしサービスを差し替え、固定の結果と
//! 進捗コールバックを再生する。
//!
//! ```ignore
//! let mut mocks = MockTranscriptions::new(".");
//! mocks.mock_transcribe_result(&[MockTranscribeJob::new("b1", request).transcript("hello")])?;
//! mocks.register(&registry, "pkg.fake");
//! ```

pub mod fixture;
pub mod mock_job;
pub mod transcriptions;

pub use fixture::MockTranscribeCallFixture;
pub use mock_job::MockTranscribeJob;
pub use transcriptions::{MockTranscriptionService, MockTranscriptions, OnUpdateSpy, TranscribeCall};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use transcribe_core::{
    OnUpdate, Result, ServiceConfig, ServiceRegistry, TranscribeBatchResult, TranscribeError,
    TranscribeJobRequest, TranscribeJobsUpdate, TranscriptionService,
};

use crate::fixture::MockTranscribeCallFixture;
use crate::mock_job::MockTranscribeJob;

// ─── OnUpdateSpy ─────────────────────────────────────────────────

/// `on_update` に渡された更新を記録する
#[derive(Debug, Clone, Default)]
pub struct OnUpdateSpy {
    calls: Arc<Mutex<Vec<TranscribeJobsUpdate>>>,
}

impl OnUpdateSpy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, update: TranscribeJobsUpdate) {
        self.calls.lock().push(update);
    }

    pub fn calls(&self) -> Vec<TranscribeJobsUpdate> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// `transcribe` の `on_update` にそのまま渡せるコールバック
    pub fn callback(&self) -> impl FnMut(TranscribeJobsUpdate) + Send + 'static {
        let spy = self.clone();
        move |update| spy.record(update)
    }

    /// `expected` が記録の中に連続した並びとして現れるか
    pub fn has_calls(&self, expected: &[TranscribeJobsUpdate]) -> bool {
        if expected.is_empty() {
            return true;
        }
        self.calls
            .lock()
            .windows(expected.len())
            .any(|window| window == expected)
    }
}

// ─── MockTranscriptionService ────────────────────────────────────

/// `transcribe` 呼び出しの記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscribeCall {
    pub requests: Vec<TranscribeJobRequest>,
    pub batch_id: String,
    pub with_on_update: bool,
}

#[derive(Default)]
struct MockServiceState {
    script: Mutex<Option<MockTranscribeCallFixture>>,
    init_calls: Mutex<Vec<ServiceConfig>>,
    transcribe_calls: Mutex<Vec<TranscribeCall>>,
}

/// スクリプトされた結果と更新を再生するサービス
///
/// 同じ [`MockTranscriptions`] から作られたインスタンスは状態を共有する。
#[derive(Clone)]
pub struct MockTranscriptionService {
    state: Arc<MockServiceState>,
}

impl TranscriptionService for MockTranscriptionService {
    fn init_service(&mut self, config: &ServiceConfig) -> Result<()> {
        self.state.init_calls.lock().push(config.clone());
        Ok(())
    }

    fn transcribe(
        &self,
        requests: &[TranscribeJobRequest],
        batch_id: &str,
        on_update: Option<OnUpdate<'_>>,
    ) -> Result<TranscribeBatchResult> {
        self.state.transcribe_calls.lock().push(TranscribeCall {
            requests: requests.to_vec(),
            batch_id: batch_id.to_string(),
            with_on_update: on_update.is_some(),
        });

        let script = self
            .state
            .script
            .lock()
            .clone()
            .ok_or_else(|| TranscribeError::service("no mock transcribe result configured"))?;

        if let Some(on_update) = on_update {
            for update in script.updates {
                on_update(update);
            }
        }
        Ok(script.result)
    }
}

// ─── MockTranscriptions ──────────────────────────────────────────

/// 書き起こしサービスのモック化ヘルパー
///
/// テスト用ディレクトリに置いたフィクスチャ（JSON）か
/// [`MockTranscribeJob`] の列から結果を組み立て、レジストリ経由で
/// 解決されるサービスに再生させる。ソースファイルのパスは
/// `source_file_root_path` からの相対として解決される。
pub struct MockTranscriptions {
    source_file_root_path: PathBuf,
    state: Arc<MockServiceState>,
    on_update_expected_calls: Vec<TranscribeJobsUpdate>,
    on_update_spy: OnUpdateSpy,
}

impl MockTranscriptions {
    pub fn new(source_file_root_path: impl Into<PathBuf>) -> Self {
        Self {
            source_file_root_path: source_file_root_path.into(),
            state: Arc::new(MockServiceState::default()),
            on_update_expected_calls: Vec::new(),
            on_update_spy: OnUpdateSpy::new(),
        }
    }

    /// モックサービスのファクトリをレジストリに登録する
    pub fn register(&self, registry: &ServiceRegistry, module_path: &str) {
        let service = self.service();
        registry.register_transcription_service_factory(module_path, move || {
            Box::new(service.clone()) as Box<dyn TranscriptionService>
        });
    }

    /// 状態を共有するサービスを直接取得する
    pub fn service(&self) -> MockTranscriptionService {
        MockTranscriptionService {
            state: self.state.clone(),
        }
    }

    pub fn on_update_spy(&self) -> &OnUpdateSpy {
        &self.on_update_spy
    }

    /// スパイに記録するコールバック
    pub fn mock_on_update(&self) -> impl FnMut(TranscribeJobsUpdate) + Send + 'static {
        self.on_update_spy.callback()
    }

    /// フィクスチャの更新が、その順でコールバックに届いたことを確認する
    ///
    /// # Panics
    /// 期待した呼び出し列が記録に見つからない場合
    pub fn expect_on_update_called_once_per_fixture_update(&self) {
        if self.on_update_expected_calls.is_empty() {
            return;
        }
        assert!(
            self.on_update_spy.has_calls(&self.on_update_expected_calls),
            "on_update calls did not match fixture updates\nexpected: {:#?}\nactual: {:#?}",
            self.on_update_expected_calls,
            self.on_update_spy.calls()
        );
    }

    pub fn init_calls(&self) -> Vec<ServiceConfig> {
        self.state.init_calls.lock().clone()
    }

    pub fn transcribe_calls(&self) -> Vec<TranscribeCall> {
        self.state.transcribe_calls.lock().clone()
    }

    /// ジョブ定義から結果を組み立ててスクリプトする（更新なし）
    pub fn mock_transcribe_result(&mut self, mock_jobs: &[MockTranscribeJob]) -> Result<()> {
        let mut result = TranscribeBatchResult::new();
        for job in mock_jobs {
            job.add_result(&mut result)?;
        }
        self.mock_transcribe_result_and_callbacks(&MockTranscribeCallFixture::new(result));
        Ok(())
    }

    /// フィクスチャの結果と更新列をスクリプトする
    pub fn mock_transcribe_result_and_callbacks(&mut self, fixture: &MockTranscribeCallFixture) {
        let mut fixture = fixture.clone();
        self.adjust_source_file_paths(&mut fixture.result);
        for update in &mut fixture.updates {
            self.adjust_source_file_paths(&mut update.result);
        }
        self.on_update_expected_calls
            .extend(fixture.updates.iter().cloned());

        log::debug!(
            "mocking transcribe: {} jobs, {} updates",
            fixture.result.len(),
            fixture.updates.len()
        );
        *self.state.script.lock() = Some(fixture);
    }

    fn adjust_source_file_paths(&self, result: &mut TranscribeBatchResult) {
        for job in result.jobs_mut() {
            job.source_file = join_root(&self.source_file_root_path, &job.source_file);
        }
    }
}

/// 絶対パスはそのまま、相対パスは root に連結する
fn join_root(root: &Path, source_file: &str) -> String {
    root.join(source_file).to_string_lossy().into_owned()
}

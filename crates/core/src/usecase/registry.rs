use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, Once, RwLock};

use crate::domain::error::{Result, TranscribeError};
use crate::domain::service::TranscriptionService;
use crate::domain::settings::{module_path_from_env, ServiceConfig};

/// サービス実装を生成するファクトリ
pub type ServiceFactory = Arc<dyn Fn() -> Box<dyn TranscriptionService> + Send + Sync>;

/// モジュールの読み込み処理。ファクトリ登録が期待される副作用。
pub type ModuleInit = Arc<dyn Fn(&ServiceRegistry) + Send + Sync>;

/// サービスレジストリ: モジュールパス → ファクトリ
///
/// プロセス起動時に一つ作り、解決を行う箇所に参照で渡す。
/// ロックはモジュール初期化・ファクトリ実行の間は保持しない。
pub struct ServiceRegistry {
    factories: RwLock<HashMap<String, ServiceFactory>>,
    modules: RwLock<HashMap<String, ModuleInit>>,
    loads: Mutex<HashMap<String, Arc<Once>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
            modules: RwLock::new(HashMap::new()),
            loads: Mutex::new(HashMap::new()),
        }
    }

    /// ファクトリを登録する。同じパスへの再登録は上書き（後勝ち）。
    pub fn register_transcription_service_factory<F>(&self, module_path: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn TranscriptionService> + Send + Sync + 'static,
    {
        let module_path = module_path.into();
        log::debug!("registering transcription service factory: {}", module_path);
        self.factories.write().insert(module_path, Arc::new(factory));
    }

    /// 読み込み可能なモジュールを宣言する。
    ///
    /// `init` は初回の読み込み時に一度だけ実行され、通常は
    /// `register_transcription_service_factory` を呼ぶ。
    pub fn register_module<F>(&self, module_path: impl Into<String>, init: F)
    where
        F: Fn(&ServiceRegistry) + Send + Sync + 'static,
    {
        self.modules.write().insert(module_path.into(), Arc::new(init));
    }

    pub fn has_factory(&self, module_path: &str) -> bool {
        self.factories.read().contains_key(module_path)
    }

    /// 登録済みファクトリのパス（ソート済み）
    pub fn registered_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.factories.read().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// 使うモジュールパスを決める: 引数 > 環境変数 > 唯一の登録 > エラー
    pub fn resolve_module_path(&self, module_path: &str) -> Result<String> {
        if !module_path.is_empty() {
            return Ok(module_path.to_string());
        }
        if let Some(path) = module_path_from_env() {
            return Ok(path);
        }
        let factories = self.factories.read();
        if factories.len() == 1 {
            if let Some(path) = factories.keys().next() {
                log::debug!("using sole registered transcription service: {}", path);
                return Ok(path.clone());
            }
        }
        Err(TranscribeError::MissingModulePath)
    }

    /// モジュールを読み込む。読み込み済み、またはファクトリ登録済みなら何もしない。
    ///
    /// 同じパスを複数スレッドが同時に読み込んでも `init` は一度だけ実行され、
    /// 他のスレッドはその完了を待つ。
    pub fn load_module(&self, module_path: &str) -> Result<()> {
        if self.has_factory(module_path) {
            return Ok(());
        }

        let init = self
            .modules
            .read()
            .get(module_path)
            .cloned()
            .ok_or_else(|| TranscribeError::ModuleNotFound {
                path: module_path.to_string(),
            })?;

        let once = self
            .loads
            .lock()
            .entry(module_path.to_string())
            .or_insert_with(|| Arc::new(Once::new()))
            .clone();
        once.call_once(|| {
            log::info!("loading transcription service module: {}", module_path);
            init(self);
        });
        Ok(())
    }

    /// モジュールパスからサービスを解決し、`init_service(config)` 済みで返す。
    pub fn init_transcription_service(
        &self,
        module_path: &str,
        config: &ServiceConfig,
    ) -> Result<Box<dyn TranscriptionService>> {
        let module_path = self.resolve_module_path(module_path)?;
        self.load_module(&module_path)?;

        let factory = self
            .factories
            .read()
            .get(&module_path)
            .cloned()
            .ok_or_else(|| TranscribeError::FactoryNotRegistered {
                path: module_path.clone(),
            })?;

        let mut service = factory();
        service.init_service(config)?;
        log::info!("transcription service initialized: {}", module_path);
        Ok(service)
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

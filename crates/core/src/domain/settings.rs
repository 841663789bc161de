use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// サービス実装のモジュールパスを指定する環境変数
pub const TRANSCRIBE_MODULE_PATH_ENV: &str = "TRANSCRIBE_MODULE_PATH";

/// デフォルト言語コード
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// `TRANSCRIBE_MODULE_PATH` を読む。未設定・空文字は None。
pub fn module_path_from_env() -> Option<String> {
    std::env::var(TRANSCRIBE_MODULE_PATH_ENV)
        .ok()
        .filter(|v| !v.is_empty())
}

/// `init_service` にそのまま渡される設定。スキーマは実装側が決める。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceConfig(Map<String, Value>);

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// builder 形式で値を追加する
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ServiceConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

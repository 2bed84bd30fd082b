//! 언어 설정 영구 저장 — %APPDATA%/clip-lru/preferences.json
//!
//! 키는 `preferred_language` 하나로 고정. 파일의 다른 키는 저장 시 보존합니다.

use crate::error::StoreError;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const STORAGE_KEY: &str = "preferred_language";

pub trait PreferenceStore: Send + Sync {
    /// 저장된 언어 코드 (없거나 읽을 수 없으면 None)
    fn load(&self) -> Option<String>;

    fn save(&self, language: &str) -> Result<(), StoreError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, language: &str) -> Result<(), StoreError> {
        (**self).save(language)
    }
}

/// JSON 파일 저장소
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 기본 경로 (Windows: %APPDATA%, 그 외: ~/.config)
    pub fn default_path() -> anyhow::Result<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var("APPDATA")?;
            Ok(PathBuf::from(appdata).join("clip-lru").join("preferences.json"))
        }
        #[cfg(not(target_os = "windows"))]
        {
            let home = std::env::var("HOME")?;
            Ok(PathBuf::from(home).join(".config").join("clip-lru").join("preferences.json"))
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Option<Map<String, Value>> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> Option<String> {
        self.read_map()?
            .get(STORAGE_KEY)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    }

    fn save(&self, language: &str) -> Result<(), StoreError> {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(STORAGE_KEY.to_string(), Value::String(language.to_string()));

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// 프로세스 메모리 저장소
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn with_value(language: &str) -> Self {
        Self {
            value: Mutex::new(Some(language.to_string())),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, language: &str) -> Result<(), StoreError> {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = Some(language.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("preferences.json"));
        assert_eq!(store.load(), None);

        store.save("zh-CN").unwrap();
        assert_eq!(store.load().as_deref(), Some("zh-CN"));

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["preferred_language"], "zh-CN");
    }

    #[test]
    fn test_json_store_preserves_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"theme": "dark", "preferred_language": "en"}"#).unwrap();

        let store = JsonFileStore::new(&path);
        store.save("zh-CN").unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["preferred_language"], "zh-CN");
    }

    #[test]
    fn test_json_store_corrupt_file_is_no_preference() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert_eq!(store.load(), None);

        // 손상된 파일은 덮어씀
        store.save("en").unwrap();
        assert_eq!(store.load().as_deref(), Some("en"));
    }

    #[test]
    fn test_memory_store_shared_through_arc() {
        let store = Arc::new(MemoryStore::default());
        let handle: Box<dyn PreferenceStore> = Box::new(store.clone());
        handle.save("en").unwrap();
        assert_eq!(store.load().as_deref(), Some("en"));
    }
}

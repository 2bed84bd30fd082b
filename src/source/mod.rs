//! 번역 리소스 소스 — HTTP (`{base}/{lang}.json`), 로컬 디렉토리, 메모리

use crate::config::I18nConfig;
use crate::error::LoadError;
use crate::i18n::{LanguageCode, TranslationTree};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// 언어 코드 하나로 번역 트리를 가져오는 읽기 전용 소스
pub trait TranslationSource: Send + Sync {
    fn fetch(
        &self,
        language: &LanguageCode,
    ) -> impl Future<Output = Result<TranslationTree, LoadError>> + Send;
}

fn ensure_well_formed(language: &LanguageCode) -> Result<(), LoadError> {
    if language.is_well_formed() {
        Ok(())
    } else {
        Err(LoadError::InvalidLanguage(language.to_string()))
    }
}

/// HTTP 소스 (예: http://127.0.0.1:8080/static/locales)
pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("clip-i18n/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, language: &LanguageCode) -> String {
        format!("{}/{}.json", self.base_url, language)
    }
}

impl TranslationSource for HttpSource {
    async fn fetch(&self, language: &LanguageCode) -> Result<TranslationTree, LoadError> {
        ensure_well_formed(language)?;
        let url = self.url_for(language);
        tracing::debug!("Fetching translations from {}", url);

        let http_err = |source| LoadError::Http {
            language: language.to_string(),
            source,
        };
        let response = self.http.get(&url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                language: language.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await.map_err(http_err)?;
        TranslationTree::from_json_str(language.as_str(), &body)
    }
}

/// 로컬 디렉토리 소스 — `{dir}/{lang}.json`
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TranslationSource for DirSource {
    async fn fetch(&self, language: &LanguageCode) -> Result<TranslationTree, LoadError> {
        ensure_well_formed(language)?;
        let path = self.dir.join(format!("{}.json", language));
        let content = tokio::fs::read_to_string(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(language.to_string())
            } else {
                LoadError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;
        TranslationTree::from_json_str(language.as_str(), &content)
    }
}

/// 설정에 따라 선택되는 소스 — `locales_base_url`이 있으면 HTTP, 없으면 디렉토리
pub enum ConfiguredSource {
    Http(HttpSource),
    Dir(DirSource),
}

impl ConfiguredSource {
    pub fn from_config(config: &I18nConfig) -> reqwest::Result<Self> {
        Ok(match &config.locales_base_url {
            Some(url) => Self::Http(HttpSource::new(
                url,
                Duration::from_secs(config.fetch_timeout_secs),
            )?),
            None => Self::Dir(DirSource::new(&config.locales_dir)),
        })
    }
}

impl TranslationSource for ConfiguredSource {
    async fn fetch(&self, language: &LanguageCode) -> Result<TranslationTree, LoadError> {
        match self {
            Self::Http(source) => source.fetch(language).await,
            Self::Dir(source) => source.fetch(language).await,
        }
    }
}

/// 메모리에 미리 넣어둔 트리 — 내장 번역이나 테스트용
#[derive(Default)]
pub struct MemorySource {
    trees: HashMap<LanguageCode, TranslationTree>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 객체가 아닌 JSON 값은 무시
    pub fn with_tree(mut self, language: &str, value: Value) -> Self {
        match TranslationTree::from_value(value) {
            Some(tree) => {
                self.trees.insert(LanguageCode::new(language), tree);
            }
            None => tracing::warn!("Ignoring non-object translations for {}", language),
        }
        self
    }

    /// 지금까지의 fetch 호출 횟수 (성공/실패 모두)
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl TranslationSource for MemorySource {
    async fn fetch(&self, language: &LanguageCode) -> Result<TranslationTree, LoadError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.trees
            .get(language)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(language.to_string()))
    }
}

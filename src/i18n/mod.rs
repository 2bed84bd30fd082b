//! 번역 리졸버 — 언어별 트리 로드/캐시 + 도트 키 조회 + 폴백 + 템플릿 치환
//!
//! 사용법:
//! ```no_run
//! # async fn demo() {
//! use clip_i18n::config::I18nConfig;
//! use clip_i18n::preference::MemoryStore;
//! use clip_i18n::source::DirSource;
//! use clip_i18n::Translator;
//!
//! let config = I18nConfig::default();
//! let i18n = Translator::new(&config, DirSource::new("locales"), MemoryStore::default());
//! i18n.init().await;
//! let msg = i18n.t("messages.error_occurred");
//! let msg = i18n.t_with("clips.time_ago.days", &[("count", "3")]);
//! # }
//! ```
//!
//! 공개 API는 에러를 돌려주지 않습니다. 로드 실패는 폴백 언어 → 빈 트리,
//! 조회 실패는 폴백 언어 → 키 문자열 그대로 순으로 강등됩니다.

pub mod format;
mod interpolate;
mod tree;

pub use interpolate::interpolate;
pub use tree::TranslationTree;

use crate::config::{I18nConfig, LanguageSettings};
use crate::error::{LoadError, LookupMiss};
use crate::locale;
use crate::preference::PreferenceStore;
use crate::source::TranslationSource;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;

/// 언어 코드 (예: "en", "zh-CN")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 지역을 제외한 언어 부분 ("zh-CN" → "zh")
    pub fn primary_subtag(&self) -> &str {
        self.0.split('-').next().unwrap_or("")
    }

    /// 파일명/URL에 넣어도 안전한 코드인지 (영숫자, '-', '_')
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self.0.len() <= 35
            && self.0.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// 언어 변경 알림 — 구독자 모두가 같은 이벤트를 받음
#[derive(Debug, Clone)]
pub struct LanguageChanged {
    pub language: LanguageCode,
    pub tree: Arc<TranslationTree>,
}

/// 조회 성공 시 어느 트리에서 찾았는지
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Active(String),
    Fallback(String),
}

impl Resolution {
    pub fn text(&self) -> &str {
        match self {
            Self::Active(s) | Self::Fallback(s) => s,
        }
    }
}

struct State {
    current: LanguageCode,
    cache: HashMap<LanguageCode, Arc<TranslationTree>>,
}

pub struct Translator<S> {
    languages: LanguageSettings,
    source: S,
    store: Box<dyn PreferenceStore>,
    ambient: Option<String>,
    state: RwLock<State>,
    /// set_language 요청 순번 — 늦게 끝난 이전 요청이 최신 요청을 덮어쓰지 않도록
    generation: AtomicU64,
    events: broadcast::Sender<LanguageChanged>,
}

impl<S> Translator<S> {
    pub fn new(config: &I18nConfig, source: S, store: impl PreferenceStore + 'static) -> Self {
        Self::with_settings(config.language_settings(), source, store)
    }

    pub fn with_settings(
        languages: LanguageSettings,
        source: S,
        store: impl PreferenceStore + 'static,
    ) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            state: RwLock::new(State {
                current: languages.fallback.clone(),
                cache: HashMap::new(),
            }),
            languages,
            source,
            store: Box::new(store),
            ambient: locale::ambient_locale(),
            generation: AtomicU64::new(0),
            events,
        }
    }

    /// 환경 변수 대신 주어진 로케일 문자열을 사용
    pub fn with_ambient_locale(mut self, ambient: Option<&str>) -> Self {
        self.ambient = ambient.map(str::to_string);
        self
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn current_language(&self) -> LanguageCode {
        self.read_state().current.clone()
    }

    pub fn supported_languages(&self) -> &[LanguageCode] {
        &self.languages.supported
    }

    /// 캐시된 트리 (로드된 적 없으면 None)
    pub fn cached_tree(&self, language: &LanguageCode) -> Option<Arc<TranslationTree>> {
        self.read_state().cache.get(language).cloned()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.events.subscribe()
    }

    /// 선호 언어 감지: 저장된 설정 → 로케일 정확히 일치 → 언어 부분 일치 → 중국어 → 폴백
    pub fn detect_preferred_language(&self) -> LanguageCode {
        let stored = self.store.load();
        locale::detect_language(&self.languages, stored.as_deref(), self.ambient.as_deref())
    }

    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    pub fn t_with(&self, key: &str, values: &[(&str, &str)]) -> String {
        match self.try_resolve(key) {
            Ok(resolution) => interpolate(resolution.text(), values),
            Err(miss) => {
                tracing::warn!("Missing translation for key: {} ({})", key, miss);
                key.to_string()
            }
        }
    }

    /// 현재 언어 트리에서 조회하고, 경로가 끊기면 폴백 트리에서 처음부터 다시 조회
    ///
    /// 현재 트리에서 문자열이 아닌 값을 찾은 경우는 폴백하지 않습니다.
    pub fn try_resolve(&self, key: &str) -> Result<Resolution, LookupMiss> {
        let state = self.read_state();
        let miss = match lookup(state.cache.get(&state.current), key) {
            Ok(text) => return Ok(Resolution::Active(text.to_string())),
            Err(miss @ LookupMiss::NotAString) => return Err(miss),
            Err(miss) => miss,
        };
        if state.current == self.languages.fallback {
            return Err(miss);
        }
        lookup(state.cache.get(&self.languages.fallback), key)
            .map(|text| Resolution::Fallback(text.to_string()))
    }

    pub fn is_rtl(&self) -> bool {
        self.languages.is_rtl(&self.read_state().current)
    }

    pub fn format_time_ago(&self, timestamp: DateTime<Utc>) -> String {
        self.format_time_ago_at(timestamp, Utc::now())
    }

    pub fn format_time_ago_at(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let (key, count) = format::time_ago_bucket(now - timestamp);
        self.t_with(key, &[("count", &count.to_string())])
    }

    /// 로컬 시간대로 표시
    pub fn format_date(&self, timestamp: DateTime<Utc>) -> String {
        self.format_date_in(&timestamp.with_timezone(&Local))
    }

    pub fn format_date_in<Tz>(&self, timestamp: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format::format_date(&self.read_state().current, timestamp)
    }

    pub fn format_number(&self, value: f64) -> String {
        format::format_number(&self.read_state().current, value)
    }

    pub fn format_file_size(&self, bytes: u64) -> String {
        format::format_file_size(&self.read_state().current, bytes)
    }
}

impl<S: TranslationSource> Translator<S> {
    /// 시작 시 1회: 선호 언어를 감지해 적용
    pub async fn init(&self) -> LanguageCode {
        let language = self.detect_preferred_language();
        tracing::info!("Detected preferred language: {}", language);
        self.set_language(language.as_str()).await
    }

    /// 번역 트리 로드 — 실패 시 폴백 언어, 그것도 실패하면 빈 트리
    ///
    /// 성공한 로드만 캐시되며, 실패한 언어는 다음 호출에서 다시 가져옵니다.
    pub async fn load_translations(&self, language: &LanguageCode) -> Arc<TranslationTree> {
        match self.fetch_and_cache(language).await {
            Ok(tree) => return tree,
            Err(e) => {
                tracing::warn!("Failed to load translations for {}: {}", language, e);
            }
        }

        let fallback = &self.languages.fallback;
        if language != fallback {
            match self.fetch_and_cache(fallback).await {
                Ok(tree) => return tree,
                Err(e) => {
                    tracing::warn!("Failed to load translations for {}: {}", fallback, e);
                }
            }
        }

        Arc::new(TranslationTree::default())
    }

    async fn fetch_and_cache(&self, language: &LanguageCode) -> Result<Arc<TranslationTree>, LoadError> {
        let tree = Arc::new(self.source.fetch(language).await?);
        self.write_state().cache.insert(language.clone(), tree.clone());
        tracing::debug!("Cached translations for {}", language);
        Ok(tree)
    }

    /// 언어 변경 — 미지원 언어는 폴백으로, 캐시에 없을 때만 로드, 저장 후 알림
    pub async fn set_language(&self, requested: &str) -> LanguageCode {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let language = self.languages.coerce(requested);
        if language != requested {
            tracing::warn!("Unsupported language: {}, fallback to {}", requested, language);
        }

        let tree = match self.cached_tree(&language) {
            Some(tree) => tree,
            None => self.load_translations(&language).await,
        };

        // 폴백 트리는 조회 실패 시의 최종 대상이므로 항상 확보
        let fallback = &self.languages.fallback;
        if language != *fallback && self.cached_tree(fallback).is_none() {
            self.load_translations(fallback).await;
        }

        // 상태 변경, 저장, 알림은 같은 쓰기 잠금 안에서 처리해 요청 순서를 유지
        let mut state = self.write_state();
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!("Language change to {} superseded by a newer request", language);
            return state.current.clone();
        }
        state.current = language.clone();

        if let Err(e) = self.store.save(language.as_str()) {
            tracing::warn!("Failed to persist preferred language {}: {}", language, e);
        }

        tracing::info!("Language set to {}", language);
        // 구독자가 없으면 send가 실패하지만 무시
        let _ = self.events.send(LanguageChanged {
            language: language.clone(),
            tree,
        });
        language
    }
}

fn lookup<'a>(tree: Option<&'a Arc<TranslationTree>>, key: &str) -> Result<&'a str, LookupMiss> {
    match tree {
        Some(tree) => tree.lookup(key),
        None => Err(LookupMiss::Missing {
            segment: key.split('.').next().unwrap_or(key).to_string(),
            depth: 0,
        }),
    }
}

//! 리졸버 설정 — config/i18n.toml (또는 CLIP_I18N_CONFIG 경로)
//!
//! 파일이 없거나 파싱에 실패하면 기본값(en + zh-CN, 폴백 en)으로 동작합니다.

use crate::i18n::LanguageCode;
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "config/i18n.toml";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct I18nConfig {
    pub supported_languages: Vec<String>,
    pub fallback_language: String,
    /// 로케일 문자열에 "zh"가 포함될 때 선택할 중국어 변형
    pub chinese_variant: Option<String>,
    /// 주 서브태그 기준 RTL 언어 목록
    pub rtl_languages: Vec<String>,
    pub locales_dir: PathBuf,
    /// 설정되면 HTTP로 번역 파일을 가져옴 (`{base}/{lang}.json`)
    pub locales_base_url: Option<String>,
    pub fetch_timeout_secs: u64,
    /// 언어 설정 저장 파일 (None이면 사용자 설정 디렉토리)
    pub preference_path: Option<PathBuf>,
    pub listen_addr: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            supported_languages: vec!["en".to_string(), "zh-CN".to_string()],
            fallback_language: "en".to_string(),
            chinese_variant: Some("zh-CN".to_string()),
            rtl_languages: vec!["ar".to_string(), "he".to_string(), "fa".to_string()],
            locales_dir: PathBuf::from("locales"),
            locales_base_url: None,
            fetch_timeout_secs: 10,
            preference_path: None,
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl I18nConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CLIP_I18N_CONFIG")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Ok(Self::load_from_str(&std::fs::read_to_string(&path).unwrap_or_default()))
    }

    pub fn load_from_str(s: &str) -> Self {
        let cfg: Self = toml::from_str(s).unwrap_or_else(|e| {
            tracing::warn!("Invalid i18n config, using defaults: {}", e);
            Self::default()
        });
        cfg.validate()
    }

    /// 폴백 언어가 지원 목록에 없으면 추가하고, 빈 값/중복을 정리
    pub fn validate(mut self) -> Self {
        if self.fallback_language.trim().is_empty() {
            self.fallback_language = Self::default().fallback_language;
        }
        self.supported_languages.retain(|l| !l.trim().is_empty());
        let mut seen = std::collections::HashSet::new();
        self.supported_languages.retain(|l| seen.insert(l.clone()));
        if !self.supported_languages.contains(&self.fallback_language) {
            tracing::warn!(
                "Fallback language '{}' not in supported list, adding it",
                self.fallback_language
            );
            self.supported_languages.insert(0, self.fallback_language.clone());
        }
        self
    }

    pub fn language_settings(&self) -> LanguageSettings {
        LanguageSettings {
            supported: self.supported_languages.iter().map(LanguageCode::new).collect(),
            fallback: LanguageCode::new(&self.fallback_language),
            chinese_variant: self.chinese_variant.as_deref().map(LanguageCode::new),
            rtl: self.rtl_languages.clone(),
        }
    }
}

/// 지원 언어 집합과 폴백 규칙
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSettings {
    pub supported: Vec<LanguageCode>,
    pub fallback: LanguageCode,
    pub chinese_variant: Option<LanguageCode>,
    pub rtl: Vec<String>,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        I18nConfig::default().language_settings()
    }
}

impl LanguageSettings {
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.iter().any(|l| l.as_str() == code)
    }

    /// 지원되지 않는 언어는 폴백 언어로 강제 변환
    pub fn coerce(&self, code: &str) -> LanguageCode {
        if self.is_supported(code) {
            LanguageCode::new(code)
        } else {
            self.fallback.clone()
        }
    }

    pub fn is_rtl(&self, code: &LanguageCode) -> bool {
        let primary = code.primary_subtag();
        self.rtl.iter().any(|l| l.eq_ignore_ascii_case(primary))
    }
}

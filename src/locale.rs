//! 시스템 로케일 읽기와 선호 언어 감지 규칙

use crate::config::LanguageSettings;
use crate::i18n::LanguageCode;

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// 환경 변수에서 로케일 읽기 (LC_ALL → LC_MESSAGES → LANG)
pub fn ambient_locale() -> Option<String> {
    LOCALE_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.trim().is_empty())
        .and_then(|v| normalize_locale(&v))
}

/// POSIX 로케일을 태그 형태로 정규화 ("zh_CN.UTF-8" → "zh-CN")
pub fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw.trim().split(['.', '@']).next().unwrap_or("");
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// 우선순위: 저장된 설정 → 정확히 일치 → 언어 부분 일치 → 중국어 계열 → 폴백
pub fn detect_language(
    settings: &LanguageSettings,
    stored: Option<&str>,
    ambient: Option<&str>,
) -> LanguageCode {
    if let Some(stored) = stored.filter(|s| settings.is_supported(s)) {
        return LanguageCode::new(stored);
    }

    let Some(ambient) = ambient.map(str::trim).filter(|s| !s.is_empty()) else {
        return settings.fallback.clone();
    };

    if settings.is_supported(ambient) {
        return LanguageCode::new(ambient);
    }

    let primary = ambient.split('-').next().unwrap_or(ambient);
    if let Some(matched) = settings
        .supported
        .iter()
        .find(|code| code.as_str().starts_with(primary))
    {
        return matched.clone();
    }

    if ambient.to_lowercase().contains("zh") {
        if let Some(variant) = settings
            .chinese_variant
            .as_ref()
            .filter(|v| settings.is_supported(v.as_str()))
        {
            return variant.clone();
        }
    }

    settings.fallback.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_preference_wins() {
        let settings = LanguageSettings::default();
        assert_eq!(detect_language(&settings, Some("zh-CN"), Some("en-US")), "zh-CN");
        // 지원하지 않는 저장값은 무시
        assert_eq!(detect_language(&settings, Some("fr"), Some("zh-CN")), "zh-CN");
    }

    #[test]
    fn test_ambient_matching() {
        let settings = LanguageSettings::default();
        assert_eq!(detect_language(&settings, None, Some("en")), "en");
        assert_eq!(detect_language(&settings, None, Some("en-GB")), "en");
        assert_eq!(detect_language(&settings, None, Some("zh-TW")), "zh-CN");
        assert_eq!(detect_language(&settings, None, Some("de-DE")), "en");
    }

    #[test]
    fn test_chinese_contains_check() {
        let settings = LanguageSettings::default();
        // 대문자 "ZH"는 접두사 일치에 실패하지만 포함 검사로 잡힘
        assert_eq!(detect_language(&settings, None, Some("ZH-hant")), "zh-CN");
        assert_eq!(detect_language(&settings, None, Some("x-zh")), "zh-CN");

        let mut no_chinese = LanguageSettings::default();
        no_chinese.supported.retain(|c| c.as_str() == "en");
        assert_eq!(detect_language(&no_chinese, None, Some("ZH-hant")), "en");
    }

    #[test]
    fn test_missing_ambient_uses_fallback() {
        let settings = LanguageSettings::default();
        assert_eq!(detect_language(&settings, None, None), "en");
        assert_eq!(detect_language(&settings, None, Some("  ")), "en");
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("zh_CN.UTF-8").as_deref(), Some("zh-CN"));
        assert_eq!(normalize_locale("de_DE@euro").as_deref(), Some("de-DE"));
        assert_eq!(normalize_locale("en").as_deref(), Some("en"));
        assert_eq!(normalize_locale("C"), None);
        assert_eq!(normalize_locale("POSIX"), None);
        assert_eq!(normalize_locale(""), None);
    }
}

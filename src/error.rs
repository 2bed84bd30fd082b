//! 리졸버 내부 에러 타입 — 로깅/테스트에서만 구분하고,
//! 공개 API(`t`, `format_*`, `set_language`)에서는 항상 표시 가능한 문자열로 접힙니다.

/// 번역 리소스 로드 실패 사유
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Invalid language code '{0}'")]
    InvalidLanguage(String),

    #[error("No translation resource for '{0}'")]
    NotFound(String),

    #[error("Request for '{language}' translations failed: {source}")]
    Http {
        language: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Translation resource for '{language}' returned HTTP {status}")]
    Status { language: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid translation JSON for '{language}': {source}")]
    Parse {
        language: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// 머신 리더블 에러 코드
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLanguage(_) => "INVALID_LANGUAGE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Status { .. } => "BAD_STATUS",
            Self::Io { .. } => "IO_ERROR",
            Self::Parse { .. } => "PARSE_ERROR",
        }
    }
}

/// 점 표기법 키 조회 실패 사유
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupMiss {
    /// `depth`번째 세그먼트에서 경로가 끊김
    #[error("segment '{segment}' not found at depth {depth}")]
    Missing { segment: String, depth: usize },

    /// 경로는 끝까지 찾았지만 값이 문자열이 아님 (하위 트리 등)
    #[error("resolved value is not a string")]
    NotAString,
}

/// 언어 설정 저장소 에러
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference file encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_codes() {
        assert_eq!(LoadError::NotFound("fr".into()).error_code(), "NOT_FOUND");
        assert_eq!(
            LoadError::Status { language: "en".into(), status: 404 }.error_code(),
            "BAD_STATUS"
        );
    }

    #[test]
    fn test_lookup_miss_display() {
        let miss = LookupMiss::Missing { segment: "b".into(), depth: 1 };
        assert_eq!(miss.to_string(), "segment 'b' not found at depth 1");
        assert_eq!(LookupMiss::NotAString.to_string(), "resolved value is not a string");
    }
}

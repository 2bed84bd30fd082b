//! 언어별 번역 트리 — 문자열 리프 또는 중첩 네임스페이스로 구성된 JSON 객체

use crate::error::{LoadError, LookupMiss};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTree(Map<String, Value>);

impl TranslationTree {
    /// JSON 값이 객체일 때만 트리로 변환
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn from_json_str(language: &str, s: &str) -> Result<Self, LoadError> {
        serde_json::from_str(s).map_err(|source| LoadError::Parse {
            language: language.to_string(),
            source,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 도트 표기법 키로 리프 문자열 조회 (예: "clips.time_ago.days")
    pub fn lookup(&self, key: &str) -> Result<&str, LookupMiss> {
        let mut node: Option<&Value> = None;
        for (depth, segment) in key.split('.').enumerate() {
            let map = match node {
                None => &self.0,
                Some(Value::Object(map)) => map,
                Some(_) => return Err(missing(segment, depth)),
            };
            node = Some(map.get(segment).ok_or_else(|| missing(segment, depth))?);
        }
        match node {
            Some(Value::String(s)) => Ok(s.as_str()),
            _ => Err(LookupMiss::NotAString),
        }
    }
}

fn missing(segment: &str, depth: usize) -> LookupMiss {
    LookupMiss::Missing {
        segment: segment.to_string(),
        depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> TranslationTree {
        TranslationTree::from_value(value).unwrap()
    }

    #[test]
    fn test_lookup_nested() {
        let t = tree(json!({ "a": { "b": { "c": "X" } }, "welcome": "Hello" }));
        assert_eq!(t.lookup("a.b.c"), Ok("X"));
        assert_eq!(t.lookup("welcome"), Ok("Hello"));
    }

    #[test]
    fn test_lookup_subtree_is_not_a_string() {
        let t = tree(json!({ "a": { "b": { "c": "X" } } }));
        assert_eq!(t.lookup("a.b"), Err(LookupMiss::NotAString));
        assert_eq!(t.lookup("a"), Err(LookupMiss::NotAString));
    }

    #[test]
    fn test_lookup_missing_reports_depth() {
        let t = tree(json!({ "status": { "on": "Running" } }));
        assert_eq!(
            t.lookup("status.off"),
            Err(LookupMiss::Missing { segment: "off".into(), depth: 1 })
        );
        assert_eq!(
            t.lookup("nonexistent.key"),
            Err(LookupMiss::Missing { segment: "nonexistent".into(), depth: 0 })
        );
        // 리프 아래로 더 내려가려는 경우
        assert_eq!(
            t.lookup("status.on.extra"),
            Err(LookupMiss::Missing { segment: "extra".into(), depth: 2 })
        );
    }

    #[test]
    fn test_lookup_empty_tree() {
        let t = TranslationTree::default();
        assert!(t.is_empty());
        assert!(matches!(t.lookup("anything"), Err(LookupMiss::Missing { depth: 0, .. })));
    }

    #[test]
    fn test_non_string_leaves_are_misses() {
        let t = tree(json!({ "count": 3, "flag": true, "list": ["a"] }));
        assert_eq!(t.lookup("count"), Err(LookupMiss::NotAString));
        assert_eq!(t.lookup("flag"), Err(LookupMiss::NotAString));
        assert!(t.lookup("list.0").is_err());
    }

    #[test]
    fn test_from_json_str_rejects_non_object() {
        assert!(TranslationTree::from_json_str("en", r#"{"a": "b"}"#).is_ok());
        let err = TranslationTree::from_json_str("en", r#"["a"]"#).unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert!(TranslationTree::from_json_str("en", "{ not json").is_err());
    }
}

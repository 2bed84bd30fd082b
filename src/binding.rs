//! 화면 바인딩 규칙 — `data-i18n` (텍스트/값) 및 `data-i18n-attr` (속성 → 키 JSON)
//!
//! DOM 없이 "어느 대상에 어떤 문자열을 넣을지"만 계산합니다.
//! 실제 요소 갱신은 UI 쪽 책임입니다.

use crate::i18n::Translator;
use serde_json::{Map, Value};

/// 요소 종류 — 입력 요소는 placeholder/value를 갱신
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Input { has_placeholder: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// `data-i18n="key"`
    Key(String),
    /// `data-i18n-attr='{"title": "key"}'` 원문
    Attributes(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Text,
    Value,
    Attribute(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub target: Target,
    pub text: String,
}

/// 속성 매핑 JSON 파싱 — 객체가 아니거나 값이 문자열이 아니면 None
pub fn parse_attribute_map(raw: &str) -> Option<Vec<(String, String)>> {
    let map: Map<String, Value> = serde_json::from_str(raw).ok()?;
    map.into_iter()
        .map(|(attr, key)| match key {
            Value::String(key) => Some((attr, key)),
            _ => None,
        })
        .collect()
}

pub fn resolve<S>(translator: &Translator<S>, binding: &Binding, kind: ElementKind) -> Vec<Update> {
    match binding {
        Binding::Key(key) => {
            let target = match kind {
                ElementKind::Input { has_placeholder: true } => Target::Attribute("placeholder".to_string()),
                ElementKind::Input { has_placeholder: false } => Target::Value,
                ElementKind::Text => Target::Text,
            };
            vec![Update {
                target,
                text: translator.t(key),
            }]
        }
        Binding::Attributes(raw) => match parse_attribute_map(raw) {
            Some(entries) => entries
                .into_iter()
                .map(|(attr, key)| Update {
                    target: Target::Attribute(attr),
                    text: translator.t(&key),
                })
                .collect(),
            None => {
                tracing::warn!("Invalid data-i18n-attr format: {}", raw);
                Vec::new()
            }
        },
    }
}

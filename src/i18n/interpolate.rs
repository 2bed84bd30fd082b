use regex::{Captures, Regex};
use std::sync::OnceLock;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid")
    })
}

/// 템플릿 변수 치환 ({{name}} → value)
///
/// 값이 없는 자리표시자는 그대로 남깁니다. 치환된 값은 다시 스캔하지 않습니다.
pub fn interpolate(template: &str, values: &[(&str, &str)]) -> String {
    if values.is_empty() {
        return template.to_string();
    }
    placeholder()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            match values.iter().find(|(k, _)| *k == name) {
                Some((_, value)) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_placeholder_is_preserved() {
        assert_eq!(interpolate("Hello {{name}}!", &[]), "Hello {{name}}!");
        assert_eq!(interpolate("Hello {{name}}!", &[("other", "x")]), "Hello {{name}}!");
    }

    #[test]
    fn test_known_placeholder_is_replaced() {
        assert_eq!(interpolate("Hello {{name}}!", &[("name", "A")]), "Hello A!");
        assert_eq!(
            interpolate("{{count}} clips, {{count}} shown", &[("count", "3")]),
            "3 clips, 3 shown"
        );
    }

    #[test]
    fn test_no_recursive_substitution() {
        assert_eq!(
            interpolate("{{a}} {{b}}", &[("a", "{{b}}"), ("b", "B")]),
            "{{b}} B"
        );
    }

    #[test]
    fn test_non_word_names_are_not_placeholders() {
        let values = [("a-b", "x"), ("a", "y")];
        assert_eq!(interpolate("{{a-b}} {{ a }} {{}}", &values), "{{a-b}} {{ a }} {{}}");
        assert_eq!(interpolate("{{{a}}}", &values), "{y}");
    }
}

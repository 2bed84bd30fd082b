//! 로케일별 포맷 헬퍼 — 날짜, 숫자, 파일 크기, 상대 시간
//!
//! 모두 순수 함수이며 `Translator`가 현재 언어를 넘겨 호출합니다.

use super::LanguageCode;
use chrono::{DateTime, Duration, TimeZone};
use std::fmt::Display;

pub const TIME_AGO_DAYS: &str = "clips.time_ago.days";
pub const TIME_AGO_HOURS: &str = "clips.time_ago.hours";
pub const TIME_AGO_MINUTES: &str = "clips.time_ago.minutes";

const DEFAULT_SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
const ZH_SIZE_UNITS: [&str; 4] = ["字节", "KB", "MB", "GB"];

/// 경과 시간을 (번역 키, count)로 변환
///
/// 내림 처리하며 가장 큰 단위를 고릅니다. 분 단위는 최소 1 (미래 시각 포함).
pub fn time_ago_bucket(elapsed: Duration) -> (&'static str, i64) {
    let millis = elapsed.num_milliseconds();
    let minutes = millis.div_euclid(60 * 1000);
    let hours = millis.div_euclid(60 * 60 * 1000);
    let days = millis.div_euclid(24 * 60 * 60 * 1000);

    if days > 0 {
        (TIME_AGO_DAYS, days)
    } else if hours > 0 {
        (TIME_AGO_HOURS, hours)
    } else {
        (TIME_AGO_MINUTES, minutes.max(1))
    }
}

/// 날짜 패턴: numeric year, short month, numeric day, 2-digit hour/minute
fn date_pattern(language: &LanguageCode) -> &'static str {
    match language.primary_subtag() {
        "en" => "%b %-d, %Y, %I:%M %p",
        "zh" => "%Y年%-m月%-d日 %H:%M",
        "ja" => "%Y年%-m月%-d日 %H:%M",
        "ko" => "%Y년 %-m월 %-d일 %p %I:%M",
        "de" => "%-d.%m.%Y, %H:%M",
        _ => "%Y-%m-%d %H:%M",
    }
}

pub fn format_date<Tz>(language: &LanguageCode, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format(date_pattern(language)).to_string()
}

struct NumberSymbols {
    group: &'static str,
    decimal: &'static str,
}

fn number_symbols(language: &LanguageCode) -> NumberSymbols {
    match language.primary_subtag() {
        "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" => NumberSymbols { group: ".", decimal: "," },
        "fr" => NumberSymbols { group: "\u{202f}", decimal: "," },
        "ru" | "uk" | "pl" | "cs" | "sv" | "fi" | "nb" => NumberSymbols { group: "\u{a0}", decimal: "," },
        _ => NumberSymbols { group: ",", decimal: "." },
    }
}

/// 천 단위 구분 + 최대 소수점 3자리 (끝의 0 제거)
pub fn format_number(language: &LanguageCode, value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let symbols = number_symbols(language);
    let rendered = format!("{:.3}", round_half_away(value.abs(), 3));
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rendered.len() + rendered.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, symbols.group));
    if !frac.is_empty() {
        out.push_str(symbols.decimal);
        out.push_str(frac);
    }
    out
}

/// 소수점 `digits`자리에서 반올림 (0.5는 0에서 먼 쪽으로)
///
/// `format!`의 정밀도 지정은 정확한 0.5를 짝수 쪽으로 보내므로 먼저 반올림해 둡니다.
fn round_half_away(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

fn size_units(language: &LanguageCode) -> &'static [&'static str] {
    match language.primary_subtag() {
        "zh" => &ZH_SIZE_UNITS,
        _ => &DEFAULT_SIZE_UNITS,
    }
}

/// 1024 단위 파일 크기 표시 — 바이트는 정수, 그 이상은 소수점 1자리
pub fn format_file_size(language: &LanguageCode, bytes: u64) -> String {
    let units = size_units(language);
    let mut size = bytes as f64;
    let mut index = 0;

    while size >= 1024.0 && index < units.len() - 1 {
        size /= 1024.0;
        index += 1;
    }

    if index == 0 {
        format!("{} {}", bytes, units[0])
    } else {
        format!("{:.1} {}", round_half_away(size, 1), units[index])
    }
}

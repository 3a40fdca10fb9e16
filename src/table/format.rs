//! Value formatting helpers for table cells

use chrono::{DateTime, Utc};
use serde_json::Value;
use crate::metadata::{AttributeDefinition, DataType};

/// Strings longer than this are cut and offered for copying
pub const LONG_STRING_LIMIT: usize = 100;

const HASH_EDGE: usize = 6;

/// Plain text of a raw value
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Shorten a hash/address to its first and last six characters
pub fn truncate_hash(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= HASH_EDGE * 2 {
        return value.to_string();
    }
    let head: String = chars[..HASH_EDGE].iter().collect();
    let tail: String = chars[chars.len() - HASH_EDGE..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Two hex colours for an address identicon
///
/// Bytes come from characters 3..6 and the last three characters; each byte
/// `b` becomes `trunc((b - 48) * 255 / 74)` wrapped into 0..=255.
pub fn identicon_colors(address: &str) -> (String, String) {
    let chars: Vec<char> = address.chars().collect();
    let middle: String = chars.iter().skip(3).take(3).collect();
    let tail: String = chars[chars.len().saturating_sub(3)..].iter().collect();

    let hex: String = format!("{}{}", middle, tail)
        .bytes()
        .map(|b| {
            let scaled = ((b as i64 - 48) * 255) as f64 / 74.0;
            (scaled.trunc() as i64).rem_euclid(256) as u8
        })
        .map(|b| format!("{:02x}", b))
        .collect();

    let first: String = hex.chars().take(6).collect();
    let last: String = hex.chars().skip(hex.len().saturating_sub(6)).collect();
    (format!("#{}", first), format!("#{}", last))
}

/// `a_b_c` → `A B C`
pub fn title_case(value: &str) -> String {
    value
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `true` → `True`
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Numeric value of a JSON number or numeric string
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Format a number according to the attribute's type and declared scale
///
/// Decimal and currency values are stored scaled by `10^scale`. With
/// `truncate` set, trailing fraction zeros are dropped.
pub fn format_number(value: f64, attribute: &AttributeDefinition, truncate: bool) -> String {
    if attribute.data_type == DataType::Int {
        if attribute.is_display_enumerable() {
            return format_plain(value);
        }
        return group_thousands(&format!("{:.0}", value));
    }

    let scale = attribute.scale.unwrap_or(0);
    let scaled = value / 10f64.powi(scale as i32);
    let mut text = format!("{:.*}", scale as usize, scaled);
    if truncate && text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    let number = group_thousands(&text);

    if attribute.data_type != DataType::Currency {
        return number;
    }
    match (&attribute.currency_symbol, &attribute.currency_symbol_code) {
        (Some(symbol), _) if !symbol.is_empty() => format!("{}{}", symbol, number),
        (_, Some(code)) if !code.is_empty() => format!("{} {}", number, code),
        _ => number,
    }
}

fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Insert `,` every three digits of the integer part
pub fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Formats datetime values for display
pub trait DateFormatter {
    /// Render `value` (epoch millis or RFC 3339 text) using a moment-style pattern
    fn format(&self, value: &Value, pattern: &str) -> String;
}

/// UTC formatter translating moment tokens (`YYYY-MM-DD HH:mm:ss`) to chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcDateFormatter;

impl DateFormatter for UtcDateFormatter {
    fn format(&self, value: &Value, pattern: &str) -> String {
        match parse_timestamp(value) {
            Some(ts) => ts.format(&moment_to_strftime(pattern)).to_string(),
            None => value_text(value),
        }
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(s) => match s.parse::<i64>() {
            Ok(millis) => DateTime::from_timestamp_millis(millis),
            Err(_) => DateTime::parse_from_rfc3339(s).ok().map(|d| d.with_timezone(&Utc)),
        },
        _ => None,
    }
}

const MOMENT_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("MMMM", "%B"),
    ("dddd", "%A"),
    ("MMM", "%b"),
    ("ddd", "%a"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("ZZ", "%z"),
    ("M", "%-m"),
    ("D", "%-d"),
    ("H", "%-H"),
    ("h", "%-I"),
    ("A", "%p"),
    ("a", "%P"),
    ("Z", "%:z"),
];

/// Translate a moment.js display pattern into a chrono format string
pub fn moment_to_strftime(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'outer: while let Some(c) = rest.chars().next() {
        // [literal]
        if c == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end].replace('%', "%%"));
                rest = &rest[end + 1..];
                continue;
            }
        }
        for (token, spec) in MOMENT_TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = after;
                continue 'outer;
            }
        }
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

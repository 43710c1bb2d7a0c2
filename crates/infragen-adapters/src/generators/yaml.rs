//! Plain-scalar safety for hand-written YAML.

use std::borrow::Cow;
use std::fmt::Write as _;

/// Words a YAML 1.1 reader resolves to booleans or null.
const RESERVED: [&str; 12] = [
    "true", "false", "yes", "no", "on", "off", "y", "n", "null", "~", ".inf", ".nan",
];

/// Characters that change meaning at the start of a plain scalar.
const INDICATORS: [char; 19] = [
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
    '`',
];

/// `value` as a YAML scalar: unchanged when it reads back as the same
/// string, double-quoted otherwise.
pub fn quote_if_needed(value: &str) -> Cow<'_, str> {
    if needs_quotes(value) {
        Cow::Owned(double_quoted(value))
    } else {
        Cow::Borrowed(value)
    }
}

fn needs_quotes(value: &str) -> bool {
    if value.is_empty() || value.trim() != value {
        return true;
    }
    if value.starts_with(INDICATORS) {
        return true;
    }
    if value.contains(": ") || value.contains(" #") || value.ends_with(':') {
        return true;
    }
    if value.chars().any(char::is_control) {
        return true;
    }
    let lower = value.to_ascii_lowercase();
    RESERVED.contains(&lower.as_str()) || looks_numeric(value)
}

fn looks_numeric(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    value.parse::<f64>().is_ok()
        || (digits.starts_with("0x") && digits.len() > 2)
        || (digits.starts_with("0o") && digits.len() > 2)
}

fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

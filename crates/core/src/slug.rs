//! PostScript-safe slugs and compact timestamp tokens.

use chrono::Utc;

/// Characters PostScript forbids in names, besides space and non-printables.
const FORBIDDEN_CHARS: &[char] = &['[', ']', '(', ')', '{', '}', '<', '%', '>', '/'];

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Reduce `text` to a PostScript-compatible identifier.
///
/// Keeps printable ASCII (33–126) minus `[](){}<%>/`. Everything else,
/// including spaces and all non-ASCII characters, is dropped.
pub fn make_slug(text: &str) -> String {
    text.chars().filter(|&c| ('!'..='~').contains(&c) && !FORBIDDEN_CHARS.contains(&c)).collect()
}

/// Current Unix time in seconds, as lowercase base-36.
pub fn make_timestamp() -> String {
    let seconds = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
    to_base36(seconds)
}

/// Render `value` in base 36 with digits `0-9a-z`.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

//! Utilities for parsing quoted strings and tokens in DBC records.
//!
//! These helpers support escaped quotes (`\"`) and multi-line quoted strings,
//! which are common in `CM_` comments or attribute values.

use crate::types::attributes::RawValue;

/// Counts unescaped double quotes in a string.
///
/// A quote is considered escaped if immediately preceded by an **odd** number
/// of backslashes. This matches how DBC escapes quoted content.
pub(crate) fn count_unescaped_quotes(s: &str) -> usize {
    let mut count = 0usize;
    let mut backslashes = 0usize;
    for ch in s.chars() {
        if ch == '\\' {
            backslashes += 1;
            continue;
        }
        if ch == '"' && backslashes.is_multiple_of(2) {
            count += 1;
        }
        backslashes = 0;
    }
    count
}

/// Returns `true` if the string contains at least two unescaped quotes.
pub(crate) fn has_complete_quoted_segment(s: &str) -> bool {
    count_unescaped_quotes(s) >= 2
}

/// Splits the first whitespace-delimited token off `s`.
///
/// Returns `(token, rest)` with `rest` untouched, so quoted text further on keeps
/// its inner spacing.
pub(crate) fn take_token(s: &str) -> Option<(&str, &str)> {
    let s: &str = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}

/// Reads a leading `"..."` segment. Returns `(content, rest after closing quote)`.
///
/// Escaped quotes inside the segment do not terminate it.
pub(crate) fn take_quoted(s: &str) -> Option<(&str, &str)> {
    let s: &str = s.trim_start();
    let inner: &str = s.strip_prefix('"')?;
    let mut backslashes = 0usize;
    for (idx, ch) in inner.char_indices() {
        if ch == '\\' {
            backslashes += 1;
            continue;
        }
        if ch == '"' && backslashes.is_multiple_of(2) {
            return Some((&inner[..idx], &inner[idx + 1..]));
        }
        backslashes = 0;
    }
    None
}

/// Content between the first and the last double quote of a record.
pub(crate) fn outer_quoted(s: &str) -> Option<&str> {
    let first: usize = s.find('"')?;
    let last: usize = s.rfind('"')?;
    if last > first {
        Some(&s[first + 1..last])
    } else {
        None
    }
}

/// Reads the value part of a `BA_` record (what is left after the object reference).
///
/// `"text";` → `Quoted("text")`, `42 ;` → `Bare("42")`. The terminating `;` is optional.
pub(crate) fn read_attr_value(rest: &str) -> Option<RawValue<'_>> {
    let rest: &str = rest.trim();
    if rest.starts_with('"') {
        let (content, tail) = take_quoted(rest)?;
        let tail: &str = tail.trim();
        if tail.is_empty() || tail == ";" {
            return Some(RawValue::Quoted(content));
        }
        return None;
    }
    let bare: &str = rest.trim_end_matches(';').trim_end();
    if bare.is_empty() {
        None
    } else {
        Some(RawValue::Bare(bare))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_unescaped_quotes() {
        assert_eq!(count_unescaped_quotes(r#"CM_ SG_ 1 S "a";"#), 2);
        assert_eq!(count_unescaped_quotes(r#"CM_ SG_ 1 S "a \" b"#), 1);
        assert_eq!(count_unescaped_quotes(r#""a \\" b""#), 3);
        assert!(has_complete_quoted_segment(r#""x""#));
        assert!(!has_complete_quoted_segment(r#"CM_ BO_ 1 "open"#));
    }

    #[test]
    fn test_take_token_keeps_rest() {
        assert_eq!(
            take_token(r#"  BA_ "BusType" "CAN  FD";"#),
            Some(("BA_", r#" "BusType" "CAN  FD";"#))
        );
        assert_eq!(take_token("single"), Some(("single", "")));
        assert_eq!(take_token("   "), None);
    }

    #[test]
    fn test_take_quoted() {
        assert_eq!(take_quoted(r#" "km/h" Gateway"#), Some(("km/h", " Gateway")));
        assert_eq!(take_quoted(r#""" A"#), Some(("", " A")));
        assert_eq!(take_quoted(r#""say \"hi\"" rest"#), Some((r#"say \"hi\""#, " rest")));
        assert_eq!(take_quoted(r#""open"#), None);
        assert_eq!(take_quoted("bare"), None);
    }

    #[test]
    fn test_outer_quoted() {
        assert_eq!(outer_quoted(r#"CM_ BO_ 1 "a "b" c";"#), Some(r#"a "b" c"#));
        assert_eq!(outer_quoted(r#"CM_ BO_ 1 "x"#), None);
    }

    #[test]
    fn test_read_attr_value() {
        assert_eq!(read_attr_value(r#" "CAN FD";"#), Some(RawValue::Quoted("CAN FD")));
        assert_eq!(read_attr_value(" 100;"), Some(RawValue::Bare("100")));
        assert_eq!(read_attr_value(" -5 ; "), Some(RawValue::Bare("-5")));
        assert_eq!(read_attr_value(" 100"), Some(RawValue::Bare("100")));
        assert_eq!(read_attr_value(r#" "a" junk;"#), None);
        assert_eq!(read_attr_value(" ;"), None);
        assert_eq!(read_attr_value(r#" "open;"#), None);
    }
}

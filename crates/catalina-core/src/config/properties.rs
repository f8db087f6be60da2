//! Line-oriented property file parsing
//!
//! Accepts the classic `.properties` dialect:
//!
//! - `key=value`, `key:value` or `key value`
//! - `#` and `!` full-line comments, blank lines ignored
//! - a trailing unescaped backslash continues the logical line
//! - escapes `\t`, `\n`, `\r`, `\f`, `\uXXXX`; any other escaped char stands
//!   for itself
//!
//! Later duplicate keys override earlier ones.

use std::collections::BTreeMap;

use crate::{Error, Result};

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parse property file content into an ordered key/value map.
pub fn parse(input: &str) -> Result<BTreeMap<String, String>> {
    let mut entries = BTreeMap::new();
    for (line, logical) in logical_lines(input) {
        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, line)?;
        let value = unescape(raw_value, line)?;
        entries.insert(key, value);
    }
    Ok(entries)
}

/// Join continuation lines and drop comments and blank lines.
///
/// Returns each logical line with the 1-based number of the natural line it
/// started on.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, natural) in input.lines().enumerate() {
        let trimmed = natural.trim_start_matches(WHITESPACE);

        let (start, mut logical) = match pending.take() {
            Some((start, mut acc)) => {
                acc.push_str(trimmed);
                (start, acc)
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (idx + 1, trimmed.to_string())
            }
        };

        if continues(&logical) {
            logical.pop();
            pending = Some((start, logical));
        } else {
            lines.push((start, logical));
        }
    }

    if let Some(last) = pending {
        lines.push(last);
    }
    lines
}

/// A line continues when it ends in an odd number of backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped `=`, `:` or whitespace.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut split = None;

    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                split = Some((idx, idx + c.len_utf8(), true));
                break;
            }
            c if WHITESPACE.contains(&c) => {
                split = Some((idx, idx + c.len_utf8(), false));
                break;
            }
            _ => {}
        }
    }

    let Some((key_end, value_start, explicit_separator)) = split else {
        return (line, "");
    };

    let mut value = line[value_start..].trim_start_matches(WHITESPACE);
    if !explicit_separator {
        if let Some(rest) = value.strip_prefix(['=', ':']) {
            value = rest.trim_start_matches(WHITESPACE);
        }
    }
    (&line[..key_end], value)
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                out.push(decode_unicode_escape(&digits, line)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn decode_unicode_escape(digits: &str, line: usize) -> Result<char> {
    let malformed = || Error::PropertyParse {
        line,
        message: format!("malformed \\uXXXX escape: \\u{digits}"),
    };
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed());
    }
    let code = u32::from_str_radix(digits, 16).map_err(|_| malformed())?;
    char::from_u32(code).ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(input: &str) -> Vec<(String, String)> {
        parse(input).unwrap().into_iter().collect()
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn parses_all_separator_styles() {
        let input = "a=1\nb:2\nc 3\nd = 4\ne\t:\t5\n";
        assert_eq!(
            pairs(input),
            vec![
                pair("a", "1"),
                pair("b", "2"),
                pair("c", "3"),
                pair("d", "4"),
                pair("e", "5"),
            ]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let input = "# comment\n   ! bang comment\n\n   \nkey=value\n";
        assert_eq!(pairs(input), vec![pair("key", "value")]);
    }

    #[test]
    fn key_without_value_maps_to_empty_string() {
        assert_eq!(pairs("server.loader=\nshared.loader"), vec![
            pair("server.loader", ""),
            pair("shared.loader", ""),
        ]);
    }

    #[test]
    fn joins_continuation_lines() {
        let input = "common.loader=/a,\\\n    /b,\\\n    /c\nnext=1\n";
        assert_eq!(
            pairs(input),
            vec![pair("common.loader", "/a,/b,/c"), pair("next", "1")]
        );
    }

    #[test]
    fn escaped_backslash_does_not_continue() {
        let input = "path=C:\\\\\nother=x\n";
        assert_eq!(pairs(input), vec![pair("other", "x"), pair("path", "C:\\")]);
    }

    #[test]
    fn continuation_at_end_of_input_is_kept() {
        assert_eq!(pairs("k=v\\"), vec![pair("k", "v")]);
    }

    #[test]
    fn decodes_escapes_in_keys_and_values() {
        let input = "key\\ with\\=sep=tab\\there\nuni=caf\\u00e9\n";
        assert_eq!(
            pairs(input),
            vec![pair("key with=sep", "tab\there"), pair("uni", "café")]
        );
    }

    #[test]
    fn later_duplicates_win() {
        assert_eq!(pairs("k=1\nk=2\n"), vec![pair("k", "2")]);
    }

    #[test]
    fn value_keeps_trailing_whitespace() {
        assert_eq!(pairs("k = v  \n"), vec![pair("k", "v  ")]);
    }

    #[test]
    fn malformed_unicode_escape_reports_line() {
        let err = parse("ok=1\nbad=\\u12zz\n").unwrap_err();
        match err {
            Error::PropertyParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn handles_crlf_line_endings() {
        assert_eq!(pairs("a=1\r\nb=2\r\n"), vec![pair("a", "1"), pair("b", "2")]);
    }
}

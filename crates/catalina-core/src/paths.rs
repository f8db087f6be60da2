//! Quote-aware splitting of repository lists

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// Either a double-quoted run (which may contain commas) or a run of
/// non-comma characters.
static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(".*?")|([^,]*)"#).unwrap());

const QUOTE: char = '"';

/// Split a comma-separated repository list into paths.
///
/// Each span is trimmed and empty spans are dropped. A span wrapped in
/// double quotes loses exactly one quote on each side and is trimmed again.
/// Any other span containing a quote is rejected with
/// [`Error::MalformedPathList`]. Order and duplicates are preserved.
///
/// ```
/// let paths = catalina_core::parse_paths(r#"/a/b,"/c, d",/e*.jar"#).unwrap();
/// assert_eq!(paths, vec!["/a/b", "/c, d", "/e*.jar"]);
/// ```
pub fn parse_paths(value: &str) -> Result<Vec<String>> {
    let mut paths = Vec::new();

    for span in PATH_PATTERN.find_iter(value) {
        let mut path = span.as_str().trim();
        if path.is_empty() {
            continue;
        }

        if path.len() > 1 && path.starts_with(QUOTE) && path.ends_with(QUOTE) {
            path = path[1..path.len() - 1].trim();
            if path.is_empty() {
                continue;
            }
        } else if path.contains(QUOTE) {
            return Err(Error::MalformedPathList {
                value: value.to_string(),
            });
        }

        paths.push(path.to_string());
    }
    Ok(paths)
}

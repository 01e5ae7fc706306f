//! Suite extraction from the test-runner configuration
//!
//! The runner config is JavaScript, so it is not parsed as a whole. The
//! `suites = { ... }` object literal is cut out of the text and only that
//! block is parsed. Accepted syntax is a flat object:
//!
//! ```js
//! var suites = {
//!   accessibility: ['protractor_desktop/accessibility.js'],
//!   fooBar: ['protractor/fooBar.js'],
//! };
//! ```
//!
//! Nested objects inside the block are rejected. Braces inside string
//! literals and comments do not count.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use crate::common::{Error, Result};

static SUITES_START_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bsuites\s*=\s*\{").ok());

static SUITE_KEY_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b([a-zA-Z_-]*):").ok());

/// Sorted suite names declared in the runner config's `suites` object
///
/// A key declared twice is returned twice, whichever way the block is read.
pub fn suites_from_runner_config(content: &str) -> Result<Vec<String>> {
    let block = suites_block(content)?;

    let object = json5::from_str::<SuiteKeys>(&format!("{{{}}}", block.raw));
    let mut suites = match object {
        Ok(SuiteKeys(keys)) => keys,
        Err(e) => {
            tracing::debug!("suites block is not a plain object literal ({e}), scanning keys");
            scan_keys(&block.code)
        }
    };
    suites.sort();
    Ok(suites)
}

/// Object keys in declaration order, duplicates kept
struct SuiteKeys(Vec<String>);

impl<'de> Deserialize<'de> for SuiteKeys {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeysVisitor;

        impl<'de> Visitor<'de> for KeysVisitor {
            type Value = SuiteKeys;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of suite names")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<SuiteKeys, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut keys = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    map.next_value::<IgnoredAny>()?;
                    keys.push(key);
                }
                Ok(SuiteKeys(keys))
            }
        }

        deserializer.deserialize_map(KeysVisitor)
    }
}

/// The body of `suites = { ... }`
struct SuitesBlock<'a> {
    /// Text between the braces, as written
    raw: &'a str,
    /// The same text with comments removed and string contents blanked
    code: String,
}

/// Cut out the `suites` object, tracking string literals and comments so
/// only structural braces end the block
fn suites_block(content: &str) -> Result<SuitesBlock<'_>> {
    let start = SUITES_START_REGEX
        .as_ref()
        .and_then(|re| re.find(content))
        .ok_or(Error::SuitesBlockNotFound)?
        .end();
    let body = &content[start..];

    let mut code = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        match c {
            '}' => {
                return Ok(SuitesBlock {
                    raw: &body[..index],
                    code,
                })
            }
            '{' => return Err(Error::NestedSuitesBlock),
            '\'' | '"' | '`' => {
                code.push(c);
                while let Some((_, next)) = chars.next() {
                    if next == '\\' {
                        chars.next();
                    } else if next == c {
                        code.push(c);
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                for (_, next) in chars.by_ref() {
                    if next == '\n' {
                        code.push('\n');
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                let mut prev = ' ';
                for (_, next) in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
                code.push(' ');
            }
            _ => code.push(c),
        }
    }

    Err(Error::SuitesBlockNotFound)
}

fn scan_keys(code: &str) -> Vec<String> {
    let Some(re) = SUITE_KEY_REGEX.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(code)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

/*!
 * Language values and the zero-width language handoff.
 *
 * A [`Language`] is a validated lowercase ISO 639 code with a display name
 * and an optional glyph. The handoff helpers let an integration layer
 * smuggle the resolved destination language through a content field behind
 * a zero-width delimiter, to be split off again right before dispatch.
 */

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delimiter between content and an appended language code. Zero-width, so
/// the message renders unchanged even if it is never stripped.
pub const LANG_DELIM: char = '\u{200b}';

// Shape check before the ISO lookup: two or three letters, optionally a
// region subtag ("zh-cn").
static CODE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(-[a-z]{2,4})?$").expect("Invalid language code regex"));

/// A destination or source language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    code: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    glyph: Option<String>,
}

impl Language {
    /// Build a language from an ISO 639-1 or 639-3 code, optionally
    /// region-qualified. The code is trimmed and lowercased; the primary
    /// subtag must name a known language.
    pub fn from_code(code: &str) -> Result<Self> {
        let normalized = code.trim().to_lowercase();
        if !CODE_SHAPE.is_match(&normalized) {
            return Err(anyhow!("Invalid language code: {}", code));
        }
        if lookup_primary(&normalized).is_none() {
            return Err(anyhow!("Unknown language code: {}", code));
        }
        Ok(Self {
            code: normalized,
            glyph: None,
        })
    }

    /// English, the conventional source language.
    pub fn english() -> Self {
        Self {
            code: "en".to_string(),
            glyph: None,
        }
    }

    /// Attach a display glyph (a flag emoji, typically).
    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = Some(glyph.into());
        self
    }

    /// The stable lowercase code used for cache keys and backend calls.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// English display name of the language.
    pub fn name(&self) -> &'static str {
        lookup_primary(&self.code).map_or("unknown", |lang| lang.to_name())
    }

    /// Display glyph, when one was attached.
    pub fn glyph(&self) -> Option<&str> {
        self.glyph.as_deref()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

fn lookup_primary(code: &str) -> Option<isolang::Language> {
    let primary = code.split('-').next().unwrap_or(code);
    match primary.len() {
        2 => isolang::Language::from_639_1(primary),
        3 => isolang::Language::from_639_3(primary),
        _ => None,
    }
}

/// Append the destination language to a content string behind the
/// zero-width delimiter.
pub fn encode_lang_suffix(content: &str, lang: &Language) -> String {
    format!("{}{}{}", content, LANG_DELIM, lang.code())
}

/// Split a language suffix back off a content string.
///
/// The suffix is honored only when the trailing segment is a valid
/// language code; otherwise the input comes back untouched with no
/// language.
pub fn split_lang_suffix(content: &str) -> (String, Option<Language>) {
    match content.rsplit_once(LANG_DELIM) {
        Some((head, tail)) => match Language::from_code(tail) {
            Ok(lang) => (head.to_string(), Some(lang)),
            Err(_) => (content.to_string(), None),
        },
        None => (content.to_string(), None),
    }
}

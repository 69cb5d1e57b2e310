//! Embedded-JSON extraction from the profile page HTML
//!
//! The platform inlines its hydration state in one of a few known forms.
//! The patterns below are tried in order and the first match wins; parsing
//! gets one repair pass for pages that ship the payload JS-escaped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::core::config::limits;
use crate::core::error::{ScrapeError, ScrapeResult};
use crate::core::utils::truncate_chars;

/// Known embedding conventions, in priority order: the state script tag,
/// the global-variable assignment, and the rehydration script tag newer
/// pages use.
#[allow(clippy::unwrap_used)]
static EMBED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r#"(?s)<script[^>]*id="SIGI_STATE"[^>]*>(.*?)</script>"#).unwrap(),
        Regex::new(r#"(?s)window\[['"]SIGI_STATE['"]\]\s*=\s*(\{.*?\})\s*;"#).unwrap(),
        Regex::new(r#"(?s)<script[^>]*id="__UNIVERSAL_DATA_FOR_REHYDRATION__"[^>]*>(.*?)</script>"#)
            .unwrap(),
    ]
});

/// Find the embedded JSON text in the page, if any pattern matches.
/// The first pattern to match wins; its capture is returned trimmed.
pub fn find_json_candidate(html: &str) -> Option<String> {
    for pattern in EMBED_PATTERNS.iter() {
        if let Some(m) = pattern.captures(html).and_then(|caps| caps.get(1)) {
            return Some(m.as_str().trim().to_string());
        }
    }
    None
}

/// Repair pass for payloads that arrive JS-escaped: drop raw newlines,
/// decode the two known `<` escape forms, and re-escape closing script
/// tags so the result is plain JSON again.
///
/// Only `\x3C` and `<` are handled; upstream may use other escape
/// forms, and a page that does fails into the parse error path rather than
/// being guessed at here.
pub fn repair_json_text(raw: &str) -> String {
    raw.replace('\n', "")
        .replace('\r', "")
        .replace("\\x3C", "<")
        .replace("\\u003C", "<")
        .replace("</script", "<\\/script")
}

/// Extract and parse the embedded state blob from the page HTML.
///
/// No matching pattern is an expected outcome (the platform changed its
/// page format) and maps to a 422; a candidate that fails both the direct
/// and the repaired parse maps to a 500.
pub fn extract_embedded_json(html: &str) -> ScrapeResult<Value> {
    let candidate = find_json_candidate(html).ok_or_else(|| ScrapeError::NoEmbeddedJson {
        snippet: truncate_chars(html, limits::HTML_SNIPPET_CHARS),
    })?;

    match serde_json::from_str(&candidate) {
        Ok(value) => Ok(value),
        Err(_) => {
            let repaired = repair_json_text(&candidate);
            serde_json::from_str(&repaired).map_err(|e| ScrapeError::Parse {
                message: truncate_chars(&e.to_string(), limits::PARSE_ERROR_CHARS),
            })
        }
    }
}

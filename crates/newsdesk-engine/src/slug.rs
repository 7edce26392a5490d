use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// URL slug for an article title.
///
/// Lowercases, strips diacritics, drops everything but ASCII word characters, whitespace
/// and hyphens, then joins words with single hyphens.
pub fn generate_slug(title: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    static HYPHENS: OnceLock<Regex> = OnceLock::new();
    let disallowed =
        DISALLOWED.get_or_init(|| Regex::new(r"[^a-z0-9_\s-]").expect("Invalid slug regex"));
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("Invalid slug regex"));
    let hyphens = HYPHENS.get_or_init(|| Regex::new(r"-+").expect("Invalid slug regex"));

    let folded: String = title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let slug = disallowed.replace_all(&folded, "");
    let slug = whitespace.replace_all(slug.trim(), "-");
    let slug = hyphens.replace_all(&slug, "-");
    slug.trim_matches('-').to_string()
}

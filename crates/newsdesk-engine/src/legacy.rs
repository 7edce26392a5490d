//! Choice between the structured block sequence and the older plain-text body.

use crate::models::{Article, Block};

/// What an article's body renders from
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedContent<'a> {
    /// Authoritative block sequence, unchanged
    Blocks(&'a [Block]),
    /// One implicit paragraph per legacy line; never written back
    Legacy(Vec<&'a str>),
}

/// A non-empty block sequence wins; otherwise every non-blank legacy line becomes a paragraph.
pub fn resolve_content(article: &Article) -> ResolvedContent<'_> {
    if !article.blocks.is_empty() {
        return ResolvedContent::Blocks(&article.blocks);
    }

    let lines = article
        .legacy_content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    ResolvedContent::Legacy(lines)
}

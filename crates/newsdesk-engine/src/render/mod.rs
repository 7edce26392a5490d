//! Rendering of an article into a display tree.
//!
//! The same tree backs the author's live preview and the public article page, so every
//! front end (HTML, terminal) draws from [`render`] and never from blocks directly.

pub mod html;
pub mod video;

use crate::legacy::{ResolvedContent, resolve_content};
use crate::models::{Article, Block, BlockContent, BlockId, HeadingLevel, HighlightVariant};

/// Everything needed to draw one article
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayTree {
    /// Present only for a non-empty title
    pub title: Option<String>,
    pub cover_image: Option<String>,
    pub body: Vec<DisplayNode>,
}

/// One rendered block, keyed by the id of the block it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    pub block_id: BlockId,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Heading {
        level: HeadingLevel,
        text: String,
    },
    Subtitle {
        text: String,
    },
    /// Formatted paragraph payload, passed through untouched
    RichText {
        markup: String,
    },
    /// Plain text paragraph synthesized from legacy content
    Text {
        text: String,
    },
    /// Emitted even when `src` is empty so the author sees a placeholder
    Image {
        src: String,
        caption: Option<String>,
        credit: Option<String>,
    },
    VideoEmbed {
        src: String,
    },
    List {
        ordered: bool,
        items: Vec<ListEntry>,
    },
    ChartImage {
        src: String,
    },
    Callout {
        variant: HighlightVariant,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub text: String,
    pub href: Option<String>,
}

/// Render an article: title, cover image, then the resolved body
pub fn render(article: &Article) -> DisplayTree {
    let body = match resolve_content(article) {
        ResolvedContent::Blocks(blocks) => render_blocks(blocks),
        ResolvedContent::Legacy(lines) => lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| DisplayNode {
                block_id: BlockId::from(format!("legacy-{index}")),
                kind: NodeKind::Text {
                    text: line.to_string(),
                },
            })
            .collect(),
    };

    DisplayTree {
        title: non_empty(&article.title),
        cover_image: article.cover_image_url.as_deref().and_then(non_empty),
        body,
    }
}

/// Render a block sequence in order, dropping blocks that show nothing
pub fn render_blocks(blocks: &[Block]) -> Vec<DisplayNode> {
    blocks.iter().filter_map(render_block).collect()
}

pub fn render_block(block: &Block) -> Option<DisplayNode> {
    let kind = match &block.content {
        BlockContent::Heading { level, text } => NodeKind::Heading {
            level: *level,
            text: text.clone(),
        },
        BlockContent::Subtitle { text } => NodeKind::Subtitle { text: text.clone() },
        BlockContent::Paragraph { text } => NodeKind::RichText {
            markup: text.as_str().to_string(),
        },
        BlockContent::Image {
            url,
            caption,
            credit,
        } => NodeKind::Image {
            src: url.clone(),
            caption: caption.as_deref().and_then(non_empty),
            credit: credit.as_deref().and_then(non_empty),
        },
        BlockContent::Video { url, embed_type } => NodeKind::VideoEmbed {
            src: video::youtube_embed(url, *embed_type)?,
        },
        BlockContent::List { ordered, items } => NodeKind::List {
            ordered: *ordered,
            items: items
                .iter()
                .map(|item| ListEntry {
                    text: item.text.clone(),
                    href: item.href().map(str::to_string),
                })
                .collect(),
        },
        BlockContent::Chart { image_url, .. } => NodeKind::ChartImage {
            src: image_url.as_deref().and_then(non_empty)?,
        },
        BlockContent::Highlight { text, variant } => NodeKind::Callout {
            variant: *variant,
            text: text.clone(),
        },
        BlockContent::Unknown { type_tag, .. } => {
            log::warn!("skipping block {} with unknown type `{type_tag}`", block.id);
            return None;
        }
    };

    Some(DisplayNode {
        block_id: block.id.clone(),
        kind,
    })
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

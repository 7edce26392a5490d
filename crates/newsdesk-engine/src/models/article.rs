use serde::Serialize;

use crate::models::Block;

/// An article's title, cover image, ordered block sequence and legacy text body.
///
/// Serializes to the persisted record shape: the block sequence is stored as
/// `content_blocks` next to the legacy plain-text `content` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Article {
    pub title: String,
    pub slug: String,
    pub cover_image_url: Option<String>,
    pub is_featured: bool,
    /// Older unstructured body, one paragraph per line
    #[serde(rename = "content")]
    pub legacy_content: String,
    /// Render order is sequence order
    #[serde(rename = "content_blocks")]
    pub blocks: Vec<Block>,
}

impl Article {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn with_legacy_content(mut self, content: impl Into<String>) -> Self {
        self.legacy_content = content.into();
        self
    }

    pub fn with_cover_image(mut self, url: impl Into<String>) -> Self {
        self.cover_image_url = Some(url.into());
        self
    }
}

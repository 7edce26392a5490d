use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::wire::{self, DecodeMode, WireError};

/// Identifier of a block, unique within one article and stable across edits.
///
/// Stored records may carry any non-empty string (older articles used timestamps),
/// so this wraps a `String` rather than a `Uuid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Fresh random identifier (UUID v4)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BlockId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The closed set of block type tags an authoring surface may construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Heading,
    Subtitle,
    Paragraph,
    Image,
    Video,
    List,
    Chart,
    Highlight,
}

impl BlockType {
    pub const ALL: [BlockType; 8] = [
        BlockType::Heading,
        BlockType::Subtitle,
        BlockType::Paragraph,
        BlockType::Image,
        BlockType::Video,
        BlockType::List,
        BlockType::Chart,
        BlockType::Highlight,
    ];

    /// Tag used in the persisted `type` field
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Subtitle => "subtitle",
            BlockType::Paragraph => "paragraph",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::List => "list",
            BlockType::Chart => "chart",
            BlockType::Highlight => "highlight",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown block type `{0}`")]
pub struct UnknownBlockType(pub String);

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownBlockType(s.to_string()))
    }
}

/// Heading level, stored as `"h1"`..`"h3"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    #[default]
    #[serde(rename = "h1")]
    H1,
    #[serde(rename = "h2")]
    H2,
    #[serde(rename = "h3")]
    H3,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Parse the persisted tag (`"h2"`)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(HeadingLevel::H1),
            "h2" => Some(HeadingLevel::H2),
            "h3" => Some(HeadingLevel::H3),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("heading level {0} is outside 1..=3")]
pub struct InvalidHeadingLevel(pub u64);

impl TryFrom<u64> for HeadingLevel {
    type Error = InvalidHeadingLevel;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            other => Err(InvalidHeadingLevel(other)),
        }
    }
}

/// Where a video is hosted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedSource {
    #[default]
    Youtube,
    Vimeo,
    Upload,
}

impl EmbedSource {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "youtube" => Some(EmbedSource::Youtube),
            "vimeo" => Some(EmbedSource::Vimeo),
            "upload" => Some(EmbedSource::Upload),
            _ => None,
        }
    }
}

/// Visual treatment of a highlight block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightVariant {
    #[default]
    Alert,
    Quote,
}

impl HighlightVariant {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "alert" => Some(HighlightVariant::Alert),
            "quote" => Some(HighlightVariant::Quote),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HighlightVariant::Alert => "alert",
            HighlightVariant::Quote => "quote",
        }
    }
}

/// Opaque formatted-text payload produced by the rich-text editor.
///
/// The engine never inspects or rewrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(String);

impl RichText {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// The link, if one is set and non-empty
    pub fn href(&self) -> Option<&str> {
        self.link.as_deref().filter(|link| !link.is_empty())
    }
}

/// Variant payload of a block.
///
/// `Unknown` holds blocks loaded from records written by a newer authoring tool; it is
/// never produced by the factory, never rendered and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockContent {
    Heading {
        level: HeadingLevel,
        text: String,
    },
    Subtitle {
        text: String,
    },
    Paragraph {
        text: RichText,
    },
    Image {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        credit: Option<String>,
    },
    Video {
        url: String,
        #[serde(rename = "embedType", skip_serializing_if = "Option::is_none")]
        embed_type: Option<EmbedSource>,
    },
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    Chart {
        #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
    Highlight {
        text: String,
        variant: HighlightVariant,
    },
    #[serde(skip)]
    Unknown {
        type_tag: String,
        fields: serde_json::Map<String, serde_json::Value>,
    },
}

impl BlockContent {
    /// `None` for blocks of an unknown type
    pub fn block_type(&self) -> Option<BlockType> {
        match self {
            BlockContent::Heading { .. } => Some(BlockType::Heading),
            BlockContent::Subtitle { .. } => Some(BlockType::Subtitle),
            BlockContent::Paragraph { .. } => Some(BlockType::Paragraph),
            BlockContent::Image { .. } => Some(BlockType::Image),
            BlockContent::Video { .. } => Some(BlockType::Video),
            BlockContent::List { .. } => Some(BlockType::List),
            BlockContent::Chart { .. } => Some(BlockType::Chart),
            BlockContent::Highlight { .. } => Some(BlockType::Highlight),
            BlockContent::Unknown { .. } => None,
        }
    }

    /// The persisted `type` tag, including unknown ones
    pub fn type_tag(&self) -> &str {
        match self {
            BlockContent::Unknown { type_tag, .. } => type_tag,
            known => known.block_type().map(BlockType::as_str).unwrap_or_default(),
        }
    }
}

/// One typed unit of article content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub content: BlockContent,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, content: BlockContent) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    pub fn block_type(&self) -> Option<BlockType> {
        self.content.block_type()
    }
}

impl TryFrom<serde_json::Value> for Block {
    type Error = WireError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        wire::decode_block(value, DecodeMode::Strict)
    }
}

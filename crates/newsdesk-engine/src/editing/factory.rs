use crate::models::{
    Block, BlockContent, BlockId, BlockType, EmbedSource, HeadingLevel, HighlightVariant,
    ListItem, RichText,
};

/// New block of the given type with a fresh id and the variant defaults
pub fn create(block_type: BlockType) -> Block {
    Block::new(BlockId::generate(), default_content(block_type))
}

/// New heading at a specific level (the toolbar offers H1, H2 and H3)
pub fn create_heading(level: HeadingLevel) -> Block {
    Block::new(
        BlockId::generate(),
        BlockContent::Heading {
            level,
            text: String::new(),
        },
    )
}

/// Zero-valued content for a variant
pub fn default_content(block_type: BlockType) -> BlockContent {
    match block_type {
        BlockType::Heading => BlockContent::Heading {
            level: HeadingLevel::H1,
            text: String::new(),
        },
        BlockType::Subtitle => BlockContent::Subtitle {
            text: String::new(),
        },
        BlockType::Paragraph => BlockContent::Paragraph {
            text: RichText::default(),
        },
        BlockType::Image => BlockContent::Image {
            url: String::new(),
            caption: None,
            credit: None,
        },
        BlockType::Video => BlockContent::Video {
            url: String::new(),
            embed_type: Some(EmbedSource::Youtube),
        },
        BlockType::List => BlockContent::List {
            ordered: false,
            items: vec![ListItem::default()],
        },
        BlockType::Chart => BlockContent::Chart {
            image_url: None,
            data: None,
        },
        BlockType::Highlight => BlockContent::Highlight {
            text: String::new(),
            variant: HighlightVariant::Alert,
        },
    }
}

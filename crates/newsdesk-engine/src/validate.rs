//! Checks run on load for editing and before an article is persisted.

use std::collections::HashSet;

use crate::models::{Article, Block, BlockContent, BlockId, BlockType};

pub const MIN_TITLE_CHARS: usize = 3;
pub const MAX_TITLE_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("block {id} is not a valid {block_type} block: {reason}")]
    InvalidVariant {
        id: BlockId,
        block_type: BlockType,
        reason: String,
    },
    #[error("block {id} has unknown type `{type_tag}`")]
    UnknownType { id: BlockId, type_tag: String },
    #[error("block id must not be empty")]
    EmptyId,
    #[error("duplicate block id {0}")]
    DuplicateId(BlockId),
    #[error("title must have at least 3 characters")]
    TitleTooShort,
    #[error("title must have at most 200 characters")]
    TitleTooLong,
}

/// A single block must have an id and one of the eight known variants.
///
/// Field shapes are already guaranteed by the types; unknown content only exists for
/// blocks loaded from newer records and may not be written back.
pub fn validate_block(block: &Block) -> Result<(), ValidationError> {
    if block.id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if let BlockContent::Unknown { type_tag, .. } = &block.content {
        return Err(ValidationError::UnknownType {
            id: block.id.clone(),
            type_tag: type_tag.clone(),
        });
    }
    Ok(())
}

/// Every block valid and all ids pairwise distinct
pub fn validate_blocks(blocks: &[Block]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(blocks.len());
    for block in blocks {
        validate_block(block)?;
        if !seen.insert(&block.id) {
            return Err(ValidationError::DuplicateId(block.id.clone()));
        }
    }
    Ok(())
}

/// Trimmed title length, counted in characters
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let chars = title.trim().chars().count();
    if chars < MIN_TITLE_CHARS {
        Err(ValidationError::TitleTooShort)
    } else if chars > MAX_TITLE_CHARS {
        Err(ValidationError::TitleTooLong)
    } else {
        Ok(())
    }
}

pub fn validate_article(article: &Article) -> Result<(), ValidationError> {
    validate_title(&article.title)?;
    validate_blocks(&article.blocks)
}

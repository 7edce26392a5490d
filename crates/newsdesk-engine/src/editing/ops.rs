//! Pure transformations of a block sequence.
//!
//! Every operation takes the current sequence by reference and returns a new one; the
//! input is never mutated. Blocks are addressed by id, never by position.

use crate::models::{Block, BlockContent, BlockId, ListItem};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("block {0} no longer exists")]
    NotFound(BlockId),
    #[error("block {0} is not a list")]
    NotAList(BlockId),
    #[error("list {id} has no item {index} (it has {len})")]
    ItemOutOfRange { id: BlockId, index: usize, len: usize },
    #[error("block {0} does not hold an image")]
    NotAnImageBlock(BlockId),
    #[error("block {0} is already in the document")]
    DuplicateId(BlockId),
}

fn position(blocks: &[Block], id: &BlockId) -> Result<usize, EditError> {
    blocks
        .iter()
        .position(|b| &b.id == id)
        .ok_or_else(|| EditError::NotFound(id.clone()))
}

/// Add `block` at the end
pub fn append(blocks: &[Block], block: Block) -> Vec<Block> {
    let mut next = Vec::with_capacity(blocks.len() + 1);
    next.extend_from_slice(blocks);
    next.push(block);
    next
}

/// Replace the block with `id` by `new_block`, in place.
///
/// The stored block keeps `id` whatever id `new_block` carries; the variant may change.
pub fn update(blocks: &[Block], id: &BlockId, new_block: Block) -> Result<Vec<Block>, EditError> {
    let index = position(blocks, id)?;
    let mut next = blocks.to_vec();
    next[index] = Block {
        id: id.clone(),
        content: new_block.content,
    };
    Ok(next)
}

/// Remove the block with `id`; later blocks shift up
pub fn delete(blocks: &[Block], id: &BlockId) -> Result<Vec<Block>, EditError> {
    let index = position(blocks, id)?;
    let mut next = blocks.to_vec();
    next.remove(index);
    Ok(next)
}

/// Move the block with `id` to sit immediately before `before_id`.
///
/// The relative order of all other blocks is kept. When `before_id` is not in the sequence
/// or equals `id`, the sequence comes back unchanged.
pub fn move_block(
    blocks: &[Block],
    id: &BlockId,
    before_id: &BlockId,
) -> Result<Vec<Block>, EditError> {
    let from = position(blocks, id)?;
    if id == before_id || !blocks.iter().any(|b| &b.id == before_id) {
        return Ok(blocks.to_vec());
    }

    let mut next = blocks.to_vec();
    let moving = next.remove(from);
    let to = next
        .iter()
        .position(|b| &b.id == before_id)
        .ok_or_else(|| EditError::NotFound(before_id.clone()))?;
    next.insert(to, moving);
    Ok(next)
}

/// Replace the content of the list block `id` with the result of `edit` on its items
fn edit_list_items(
    blocks: &[Block],
    id: &BlockId,
    edit: impl FnOnce(&mut Vec<ListItem>) -> Result<(), EditError>,
) -> Result<Vec<Block>, EditError> {
    let index = position(blocks, id)?;
    let BlockContent::List { ordered, items } = &blocks[index].content else {
        return Err(EditError::NotAList(id.clone()));
    };

    let mut items = items.clone();
    edit(&mut items)?;
    let content = BlockContent::List {
        ordered: *ordered,
        items,
    };
    update(blocks, id, Block::new(id.clone(), content))
}

/// Append an empty item to the list block `id`
pub fn add_list_item(blocks: &[Block], id: &BlockId) -> Result<Vec<Block>, EditError> {
    edit_list_items(blocks, id, |items| {
        items.push(ListItem::default());
        Ok(())
    })
}

/// Replace item `index` of the list block `id`.
///
/// Indices are only meaningful against the sequence they were read from.
pub fn update_list_item(
    blocks: &[Block],
    id: &BlockId,
    index: usize,
    item: ListItem,
) -> Result<Vec<Block>, EditError> {
    edit_list_items(blocks, id, |items| {
        let len = items.len();
        let slot = items.get_mut(index).ok_or(EditError::ItemOutOfRange {
            id: id.clone(),
            index,
            len,
        })?;
        *slot = item;
        Ok(())
    })
}

/// Store an uploaded image URL: `url` on image blocks, `imageUrl` on chart blocks
pub fn set_image_url(
    blocks: &[Block],
    id: &BlockId,
    url: impl Into<String>,
) -> Result<Vec<Block>, EditError> {
    let index = position(blocks, id)?;
    let url = url.into();
    let content = match blocks[index].content.clone() {
        BlockContent::Image {
            caption, credit, ..
        } => BlockContent::Image {
            url,
            caption,
            credit,
        },
        BlockContent::Chart { data, .. } => BlockContent::Chart {
            image_url: Some(url),
            data,
        },
        _ => return Err(EditError::NotAnImageBlock(id.clone())),
    };
    update(blocks, id, Block::new(id.clone(), content))
}

/// Whether the block `id` can receive an uploaded image
pub fn accepts_image(blocks: &[Block], id: &BlockId) -> Result<(), EditError> {
    let index = position(blocks, id)?;
    match blocks[index].content {
        BlockContent::Image { .. } | BlockContent::Chart { .. } => Ok(()),
        _ => Err(EditError::NotAnImageBlock(id.clone())),
    }
}

use crate::editing::ops::{self, EditError};
use crate::models::{Block, BlockId, ListItem};

/// An edit to the block sequence of a draft
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    Append { block: Block },
    Update { id: BlockId, block: Block },
    Delete { id: BlockId },
    Move { id: BlockId, before: BlockId },
    AddListItem { id: BlockId },
    UpdateListItem { id: BlockId, index: usize, item: ListItem },
    SetImageUrl { id: BlockId, url: String },
}

impl Cmd {
    /// Id of the block the command touches
    pub fn target(&self) -> &BlockId {
        match self {
            Cmd::Append { block } => &block.id,
            Cmd::Update { id, .. }
            | Cmd::Delete { id }
            | Cmd::Move { id, .. }
            | Cmd::AddListItem { id }
            | Cmd::UpdateListItem { id, .. }
            | Cmd::SetImageUrl { id, .. } => id,
        }
    }
}

/// Run `cmd` against `blocks`, producing the next sequence
pub fn compile_command(blocks: &[Block], cmd: &Cmd) -> Result<Vec<Block>, EditError> {
    match cmd {
        Cmd::Append { block } => Ok(ops::append(blocks, block.clone())),
        Cmd::Update { id, block } => ops::update(blocks, id, block.clone()),
        Cmd::Delete { id } => ops::delete(blocks, id),
        Cmd::Move { id, before } => ops::move_block(blocks, id, before),
        Cmd::AddListItem { id } => ops::add_list_item(blocks, id),
        Cmd::UpdateListItem { id, index, item } => {
            ops::update_list_item(blocks, id, *index, item.clone())
        }
        Cmd::SetImageUrl { id, url } => ops::set_image_url(blocks, id, url.as_str()),
    }
}

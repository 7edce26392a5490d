use crate::models::BlockId;

/// Result of applying a command to a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub changed: BlockId,
    pub version: u64,
}

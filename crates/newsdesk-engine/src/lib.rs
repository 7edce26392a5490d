pub mod editing;
pub mod io;
pub mod legacy;
pub mod models;
pub mod render;
pub mod slug;
pub mod validate;
pub mod wire;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{Cmd, Draft, EditError, Patch};
pub use io::*;
pub use models::*;
pub use render::{DisplayNode, DisplayTree, ListEntry, NodeKind, render};
pub use validate::ValidationError;
pub use wire::{DecodeMode, WireError};

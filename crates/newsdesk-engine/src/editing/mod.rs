/*!
 * # Editing
 *
 * Blocks are created by the [`factory`], then changed only through the pure functions in
 * [`ops`]: each takes the current sequence and returns the next one, addressing blocks by id.
 *
 * A [`Draft`] is the editing session built on top: it owns one article, turns each [`Cmd`]
 * into the matching operation, bumps a version counter and hands back a [`Patch`] naming the
 * block that changed.
 *
 * ```rust
 * use newsdesk_engine::editing::{Cmd, Draft};
 * use newsdesk_engine::models::BlockType;
 *
 * let mut draft = Draft::new("Orçamento aprovado");
 * let list = draft.add_block(BlockType::List).changed;
 * let patch = draft.apply(Cmd::AddListItem { id: list }).unwrap();
 * assert_eq!(patch.version, 2);
 *
 * let tree = draft.preview();
 * assert_eq!(tree.body.len(), 1);
 * ```
 */

pub mod commands;
pub mod draft;
pub mod factory;
pub mod ops;
pub mod patch;

pub use commands::{Cmd, compile_command};
pub use draft::Draft;
pub use factory::{create, create_heading};
pub use ops::EditError;
pub use patch::Patch;

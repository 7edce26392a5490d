use crate::editing::commands::{Cmd, compile_command};
use crate::editing::factory;
use crate::editing::ops::EditError;
use crate::editing::patch::Patch;
use crate::models::{Article, Block, BlockType, HeadingLevel};
use crate::render::{DisplayTree, render};
use crate::slug::generate_slug;
use crate::validate::{ValidationError, validate_article};

/// One editing session over an article.
///
/// Owns an in-memory copy of the article; every [`Cmd`] replaces the block sequence with
/// the result of the matching pure operation. A failed command leaves the draft as it was.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    article: Article,
    /// Bumped on every successful command
    version: u64,
}

impl Draft {
    /// Empty draft for a new article
    pub fn new(title: impl Into<String>) -> Self {
        let mut draft = Self::default();
        draft.set_title(title);
        draft
    }

    /// Draft over a freshly loaded copy of a stored article
    pub fn from_article(article: Article) -> Self {
        Self {
            article,
            version: 0,
        }
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn blocks(&self) -> &[Block] {
        &self.article.blocks
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Run one command; an `Append` must bring an id the draft does not hold yet
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        if let Cmd::Append { block } = &cmd
            && self.article.blocks.iter().any(|b| b.id == block.id)
        {
            return Err(EditError::DuplicateId(block.id.clone()));
        }
        let blocks = compile_command(&self.article.blocks, &cmd)?;
        self.article.blocks = blocks;
        self.version += 1;
        log::debug!("applied {cmd:?} at version {}", self.version);

        Ok(Patch {
            changed: cmd.target().clone(),
            version: self.version,
        })
    }

    /// Append a new block of the given type with its defaults
    pub fn add_block(&mut self, block_type: BlockType) -> Patch {
        self.push(factory::create(block_type))
    }

    pub fn add_heading(&mut self, level: HeadingLevel) -> Patch {
        self.push(factory::create_heading(level))
    }

    fn push(&mut self, block: Block) -> Patch {
        let id = block.id.clone();
        self.article.blocks.push(block);
        self.version += 1;
        log::debug!("appended block {id} at version {}", self.version);
        Patch {
            changed: id,
            version: self.version,
        }
    }

    /// Change the title; a slug that was empty or derived from the old title follows it
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.article.slug.is_empty() || self.article.slug == generate_slug(&self.article.title)
        {
            self.article.slug = generate_slug(&title);
        }
        self.article.title = title;
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.article.slug = slug.into();
    }

    pub fn set_cover_image(&mut self, url: Option<String>) {
        self.article.cover_image_url = url.filter(|u| !u.is_empty());
    }

    pub fn set_featured(&mut self, featured: bool) {
        self.article.is_featured = featured;
    }

    /// What the published page will show
    pub fn preview(&self) -> DisplayTree {
        render(&self.article)
    }

    /// Validated article ready to persist
    pub fn finish(&self) -> Result<Article, ValidationError> {
        validate_article(&self.article)?;
        let mut article = self.article.clone();
        if article.slug.is_empty() {
            article.slug = generate_slug(&article.title);
        }
        Ok(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockContent, BlockId, ListItem};
    use crate::render::NodeKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_draft_is_empty_with_slug() {
        let draft = Draft::new("Nova matéria");

        assert!(draft.blocks().is_empty());
        assert_eq!(draft.version(), 0);
        assert_eq!(draft.article().slug, "nova-materia");
    }

    #[test]
    fn test_apply_bumps_version_and_names_target() {
        let mut draft = Draft::new("Título");
        let added = draft.add_block(BlockType::List);

        let patch = draft
            .apply(Cmd::AddListItem {
                id: added.changed.clone(),
            })
            .unwrap();

        assert_eq!(added.version, 1);
        assert_eq!(patch.version, 2);
        assert_eq!(patch.changed, added.changed);
        assert!(matches!(
            &draft.blocks()[0].content,
            BlockContent::List { items, .. } if items.len() == 2
        ));
    }

    #[test]
    fn test_failed_command_leaves_draft_untouched() {
        let mut draft = Draft::new("Título");
        draft.add_block(BlockType::Paragraph);
        let before = draft.article().clone();

        let err = draft.apply(Cmd::UpdateListItem {
            id: draft.blocks()[0].id.clone(),
            index: 0,
            item: ListItem::new("x"),
        });

        assert!(matches!(err, Err(EditError::NotAList(_))));
        assert_eq!(draft.article(), &before);
        assert_eq!(draft.version(), 1);
    }

    #[test]
    fn test_slug_follows_title_until_set_by_hand() {
        let mut draft = Draft::new("Primeiro título");
        draft.set_title("Segundo título");
        assert_eq!(draft.article().slug, "segundo-titulo");

        draft.set_slug("fixo");
        draft.set_title("Terceiro");
        assert_eq!(draft.article().slug, "fixo");
    }

    #[test]
    fn test_preview_uses_current_state() {
        let mut draft = Draft::new("Título");
        draft.set_cover_image(Some(String::new()));
        let heading = draft.add_heading(HeadingLevel::H2).changed;
        draft
            .apply(Cmd::Update {
                id: heading.clone(),
                block: Block::new(
                    heading.clone(),
                    BlockContent::Heading {
                        level: HeadingLevel::H2,
                        text: "Resumo".to_string(),
                    },
                ),
            })
            .unwrap();

        let tree = draft.preview();

        assert_eq!(tree.title.as_deref(), Some("Título"));
        assert_eq!(tree.cover_image, None);
        assert_eq!(
            tree.body[0].kind,
            NodeKind::Heading {
                level: HeadingLevel::H2,
                text: "Resumo".to_string()
            }
        );
    }

    #[test]
    fn test_finish_validates() {
        let short = Draft::new("ab");
        assert_eq!(short.finish(), Err(ValidationError::TitleTooShort));

        let mut draft = Draft::from_article(Article::new("Título válido"));
        draft.add_block(BlockType::Highlight);
        let article = draft.finish().unwrap();
        assert_eq!(article.slug, "titulo-valido");
        assert_eq!(article.blocks.len(), 1);

        let block = Block::new(BlockId::from("same"), BlockContent::Subtitle { text: String::new() });
        let dup = Draft::from_article(
            Article::new("Título válido").with_blocks(vec![block.clone(), block]),
        );
        assert_eq!(
            dup.finish(),
            Err(ValidationError::DuplicateId(BlockId::from("same")))
        );
    }

    #[test]
    fn test_append_rejects_id_already_present() {
        let mut draft = Draft::new("Título");
        let block = Block::new(BlockId::from("same"), BlockContent::Subtitle { text: String::new() });
        draft.apply(Cmd::Append { block: block.clone() }).unwrap();
        let before = draft.article().clone();

        let err = draft.apply(Cmd::Append { block });

        assert_eq!(err, Err(EditError::DuplicateId(BlockId::from("same"))));
        assert_eq!(draft.article(), &before);
        assert_eq!(draft.version(), 1);

        draft
            .apply(Cmd::Delete {
                id: BlockId::from("same"),
            })
            .unwrap();
        assert!(draft.blocks().is_empty());
    }
}

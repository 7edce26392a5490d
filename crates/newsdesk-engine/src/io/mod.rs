//! File-backed stores for article records and uploaded images.

mod images;

pub use images::*;

use std::fs;
use std::path::{Path, PathBuf};

use relative_path::{Component, RelativePath, RelativePathBuf};

use crate::models::{Article, ArticleIndex};
use crate::slug::generate_slug;
use crate::wire::{self, DecodeMode, WireError};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid articles directory: {0}")]
    InvalidArticlesDir(String),
    #[error("article record {path} is malformed: {source}")]
    Malformed {
        path: RelativePathBuf,
        #[source]
        source: WireError,
    },
    #[error("article cannot be stored: {0}")]
    Rejected(#[source] WireError),
    #[error("article has no slug to name its record after")]
    MissingSlug,
    #[error("slug `{0}` cannot name a record")]
    InvalidSlug(String),
    #[error("record path {0} is outside the articles directory")]
    InvalidRecordPath(RelativePathBuf),
}

/// Article records stored as `<slug>.json` files in one directory
#[derive(Debug, Clone)]
pub struct FsArticleStore {
    root: PathBuf,
}

impl FsArticleStore {
    /// Store over an existing directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, IoError> {
        let root = root.into();
        validate_articles_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sorted index of the `.json` records in the directory
    pub fn scan(&self) -> Result<ArticleIndex, IoError> {
        let mut index = ArticleIndex::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => index.add_entry(RelativePathBuf::from(name)),
                None => log::warn!("skipping non UTF-8 file name {}", path.display()),
            }
        }
        Ok(index)
    }

    /// Records live directly in the root; anything else is refused
    fn record_path(&self, relative_path: &RelativePath) -> Result<PathBuf, IoError> {
        let mut components = relative_path.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if !name.contains('\\') => {
                Ok(relative_path.to_path(&self.root))
            }
            _ => Err(IoError::InvalidRecordPath(
                relative_path.to_relative_path_buf(),
            )),
        }
    }

    pub fn read_raw(&self, relative_path: &RelativePath) -> Result<String, IoError> {
        let absolute_path = self.record_path(relative_path)?;
        if !absolute_path.exists() {
            return Err(IoError::NotFound(absolute_path));
        }
        Ok(fs::read_to_string(&absolute_path)?)
    }

    /// Strict for loading into an editor, lenient for display
    pub fn load(&self, relative_path: &RelativePath, mode: DecodeMode) -> Result<Article, IoError> {
        let json = self.read_raw(relative_path)?;
        wire::decode_article(&json, mode).map_err(|source| IoError::Malformed {
            path: relative_path.to_relative_path_buf(),
            source,
        })
    }

    /// Validate and write `article` to `<slug>.json`, returning the record's path
    pub fn save(&self, article: &Article) -> Result<RelativePathBuf, IoError> {
        if article.slug.is_empty() {
            return Err(IoError::MissingSlug);
        }
        if article.slug != generate_slug(&article.slug) {
            return Err(IoError::InvalidSlug(article.slug.clone()));
        }
        let json = wire::encode_article(article).map_err(IoError::Rejected)?;
        let relative_path = RelativePathBuf::from(format!("{}.json", article.slug));
        fs::write(relative_path.to_path(&self.root), json)?;
        log::debug!("saved article {relative_path}");
        Ok(relative_path)
    }

    pub fn delete(&self, relative_path: &RelativePath) -> Result<(), IoError> {
        let absolute_path = self.record_path(relative_path)?;
        if !absolute_path.exists() {
            return Err(IoError::NotFound(absolute_path));
        }
        Ok(fs::remove_file(absolute_path)?)
    }
}

pub fn validate_articles_dir(path: &Path) -> Result<(), IoError> {
    if !path.is_dir() {
        return Err(IoError::InvalidArticlesDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::editing::{Cmd, Draft, EditError, Patch, ops};
use crate::models::BlockId;

/// 5 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// A file picked by the author for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name; only its extension is kept
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("only images can be uploaded, got `{0}`")]
    NotAnImage(String),
    #[error("image is {size} bytes, the limit is {max}")]
    TooLarge { size: u64, max: u64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Takes binary image data and returns a stable public URL, or fails
pub trait ImageStore {
    fn upload(&self, upload: &ImageUpload) -> Result<String, UploadError>;
}

/// Writes uploads under a local directory served at `base_url`
#[derive(Debug, Clone)]
pub struct FsImageStore {
    dir: PathBuf,
    base_url: String,
    max_bytes: u64,
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn check(&self, upload: &ImageUpload) -> Result<(), UploadError> {
        if !upload.content_type.starts_with("image/") {
            return Err(UploadError::NotAnImage(upload.content_type.clone()));
        }
        let size = upload.bytes.len() as u64;
        if size > self.max_bytes {
            return Err(UploadError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }
        Ok(())
    }
}

impl ImageStore for FsImageStore {
    fn upload(&self, upload: &ImageUpload) -> Result<String, UploadError> {
        self.check(upload)?;

        let name = stored_file_name(&upload.file_name);
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(&name), &upload.bytes)?;
        log::debug!("stored upload {} as {name}", upload.file_name);

        Ok(format!("{}/{name}", self.base_url.trim_end_matches('/')))
    }
}

/// Random file name carrying the original extension
fn stored_file_name(original: &str) -> String {
    let stem = Uuid::new_v4().simple().to_string();
    match Path::new(original).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Upload an image and store its URL on the image or chart block `id`.
///
/// The target is checked before anything is uploaded; on any failure the draft is unchanged.
pub fn attach_image(
    store: &impl ImageStore,
    draft: &mut Draft,
    id: &BlockId,
    upload: &ImageUpload,
) -> Result<Patch, AttachError> {
    ops::accepts_image(draft.blocks(), id)?;
    let url = store.upload(upload)?;
    Ok(draft.apply(Cmd::SetImageUrl {
        id: id.clone(),
        url,
    })?)
}

/// Upload an image and make it the draft's cover
pub fn attach_cover(
    store: &impl ImageStore,
    draft: &mut Draft,
    upload: &ImageUpload,
) -> Result<String, UploadError> {
    let url = store.upload(upload)?;
    draft.set_cover_image(Some(url.clone()));
    Ok(url)
}

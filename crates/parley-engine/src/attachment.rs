//! Media attachments staged in the composer.
//!
//! Selecting a file goes through a [`MediaResolver`], which hands out a
//! [`MediaUrl`] for the file and must later be told when that URL is no
//! longer needed. [`BlobRegistry`] is the in-memory resolver used by the
//! app; it tracks every live handle so leaks and double releases are
//! observable.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::message::{Media, MediaKind, MediaUrl};

/// Errors that can occur while resolving or releasing media.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("unsupported file type: {0} (expected an image or video)")]
    Unsupported(String),

    #[error("media handle is not live: {0}")]
    UnknownMedia(MediaUrl),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A file picked by the user, with its declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content_type: String,
    path: Option<PathBuf>,
}

impl SelectedFile {
    /// Describe a file by name and content type only.
    pub fn new(name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            path: None,
        }
    }

    /// Select a file from disk.
    ///
    /// The content type is guessed from the extension. Only images and
    /// videos are accepted, matching the composer's file filter.
    pub fn from_path(path: &Path) -> Result<Self, AttachmentError> {
        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AttachmentError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(AttachmentError::Io(e)),
        };
        if !metadata.is_file() {
            return Err(AttachmentError::NotAFile(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let content_type =
            guess_content_type(path).ok_or_else(|| AttachmentError::Unsupported(name.clone()))?;

        Ok(Self {
            name,
            content_type: content_type.to_string(),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_content_type(&self.content_type)
    }

    /// Whether the declared type passes the `image/*,video/*` filter.
    pub fn is_media(&self) -> bool {
        let ct = self.content_type.to_ascii_lowercase();
        ct.starts_with("image/") || ct.starts_with("video/")
    }
}

/// Guess a media content type from a file extension.
pub fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let ct = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "heic" => "image/heic",
        "avif" => "image/avif",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "ogv" => "video/ogg",
        _ => return None,
    };
    Some(ct)
}

/// Hands out locally resolvable URLs for selected files.
///
/// Every successful `resolve` must be paired with at most one `release`.
pub trait MediaResolver {
    /// Create a URL for the file's bytes.
    fn resolve(&mut self, file: &SelectedFile) -> Result<MediaUrl, AttachmentError>;

    /// Free the resource behind a URL.
    fn release(&mut self, url: &MediaUrl) -> Result<(), AttachmentError>;
}

/// In-memory resolver issuing `blob:<n>` URLs.
#[derive(Debug, Default)]
pub struct BlobRegistry {
    next: u64,
    live: HashMap<MediaUrl, SelectedFile>,
    released: Vec<MediaUrl>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of URLs currently live.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, url: &MediaUrl) -> bool {
        self.live.contains_key(url)
    }

    /// File behind a live URL.
    pub fn lookup(&self, url: &MediaUrl) -> Option<&SelectedFile> {
        self.live.get(url)
    }

    /// URLs released so far, in release order.
    pub fn released(&self) -> &[MediaUrl] {
        &self.released
    }
}

impl MediaResolver for BlobRegistry {
    fn resolve(&mut self, file: &SelectedFile) -> Result<MediaUrl, AttachmentError> {
        self.next += 1;
        let url = MediaUrl::new(format!("blob:{}", self.next));
        self.live.insert(url.clone(), file.clone());
        Ok(url)
    }

    fn release(&mut self, url: &MediaUrl) -> Result<(), AttachmentError> {
        if self.live.remove(url).is_none() {
            return Err(AttachmentError::UnknownMedia(url.clone()));
        }
        self.released.push(url.clone());
        Ok(())
    }
}

/// The single attachment staged in the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftAttachment {
    url: MediaUrl,
    kind: MediaKind,
    source: SelectedFile,
}

impl DraftAttachment {
    pub(crate) fn new(url: MediaUrl, source: SelectedFile) -> Self {
        Self {
            url,
            kind: source.kind(),
            source,
        }
    }

    pub fn url(&self) -> &MediaUrl {
        &self.url
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn source(&self) -> &SelectedFile {
        &self.source
    }

    /// Media reference carried into a sent message.
    pub fn to_media(&self) -> Media {
        Media::new(self.url.clone(), self.kind)
    }
}

//! Post entities and the draft shape produced by the post form.

use std::{fmt, path::PathBuf, str::FromStr};

use thiserror::Error;
use time::OffsetDateTime;

pub use postboard_api_types::Post;

/// Which input supplies the post's hero image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// A remote `imageUrl`, typically picked at random from picsum.photos.
    Picsum,
    /// A local file attached as `image`.
    Upload,
}

impl ImageSource {
    pub const ALL: [ImageSource; 2] = [ImageSource::Picsum, ImageSource::Upload];

    pub fn as_str(self) -> &'static str {
        match self {
            ImageSource::Picsum => "picsum",
            ImageSource::Upload => "upload",
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown image source `{0}`")]
pub struct UnknownImageSource(pub String);

impl FromStr for ImageSource {
    type Err = UnknownImageSource;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "picsum" => Ok(ImageSource::Picsum),
            "upload" => Ok(ImageSource::Upload),
            other => Err(UnknownImageSource(other.to_string())),
        }
    }
}

/// A file picked for upload. `path` is absent when the host only knows the
/// file's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
    pub path: Option<PathBuf>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Validated form contents handed to the save collaborator.
///
/// Only the image field selected by `image_source` is carried; the inactive
/// branch is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    pub description: String,
    pub image_source: ImageSource,
    pub image_url: Option<String>,
    pub image: Option<UploadFile>,
}

/// Convert an epoch-milliseconds wire timestamp.
pub fn timestamp(millis: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
}

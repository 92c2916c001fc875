use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

/// Media kind of a queued asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Derive the kind from a declared MIME type.
    ///
    /// Anything that does not mention `image` (including an empty type) is
    /// treated as video.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.contains("image") {
            MediaKind::Image
        } else {
            MediaKind::Video
        }
    }

    /// Noun used in generated titles ("Photo" / "Video")
    pub fn title_noun(&self) -> &'static str {
        match self {
            MediaKind::Image => "Photo",
            MediaKind::Video => "Video",
        }
    }

    /// Noun used in generated descriptions ("image" / "video")
    pub fn description_noun(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" | "photo" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            _ => Err(anyhow::anyhow!("Invalid media kind: {}", s)),
        }
    }
}

/// Processing status of a queued file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Error,
}

impl Display for FileStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FileStatus::Pending => write!(f, "pending"),
            FileStatus::Processing => write!(f, "processing"),
            FileStatus::Completed => write!(f, "completed"),
            FileStatus::Error => write!(f, "error"),
        }
    }
}

/// Opaque file handle offered for intake. Only name, size and declared
/// content type are ever inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    pub byte_size: u64,
    pub content_type: String,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, byte_size: u64, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            byte_size,
            content_type: content_type.into(),
        }
    }
}

/// Preview resource derived from a queued file.
///
/// `Object` handles are minted by the queue and must be revoked when the file
/// leaves it; `Placeholder` previews are static and own nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PreviewHandle {
    Object { id: Uuid, url: String },
    Placeholder { url: String },
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        match self {
            PreviewHandle::Object { url, .. } => url,
            PreviewHandle::Placeholder { url } => url,
        }
    }
}

/// Entry of the intake queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedFile {
    pub id: Uuid,
    pub display_name: String,
    pub media_kind: MediaKind,
    pub byte_size: u64,
    pub content_type: String,
    pub status: FileStatus,
    pub selected: bool,
    pub preview: Option<PreviewHandle>,
    pub added_at: DateTime<Utc>,
}

impl QueuedFile {
    /// Build a freshly queued entry: pending and selected.
    pub fn from_handle(handle: FileHandle) -> Self {
        Self {
            id: Uuid::new_v4(),
            media_kind: MediaKind::from_content_type(&handle.content_type),
            display_name: handle.name,
            byte_size: handle.byte_size,
            content_type: handle.content_type,
            status: FileStatus::Pending,
            selected: true,
            preview: None,
            added_at: Utc::now(),
        }
    }
}

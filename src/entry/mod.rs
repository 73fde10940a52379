mod id;

use std::time::SystemTime;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use id::{generate_id, generate_id_with};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    Text,
    File,
    Directory,
}

/// What an entry carries. Text and file entries hold their bytes inline; a
/// directory entry only references the copied tree in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Payload {
    Text { data: Vec<u8> },
    File { data: Vec<u8> },
    Directory { path: Utf8PathBuf },
}

impl Payload {
    pub fn kind(&self) -> EntryKind {
        match self {
            Payload::Text { .. } => EntryKind::Text,
            Payload::File { .. } => EntryKind::File,
            Payload::Directory { .. } => EntryKind::Directory,
        }
    }
}

/// One clipboard item, as written to its `.clip_entry` sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub display_name: String,
    pub timestamp: SystemTime,
    pub payload: Payload,
}

impl Entry {
    pub fn text() -> Self {
        Self::new(Payload::Text { data: Vec::new() }, String::new())
    }

    pub fn file(display_name: impl Into<String>) -> Self {
        Self::new(Payload::File { data: Vec::new() }, display_name.into())
    }

    pub fn directory(display_name: impl Into<String>) -> Self {
        Self::new(
            Payload::Directory {
                path: Utf8PathBuf::new(),
            },
            display_name.into(),
        )
    }

    fn new(payload: Payload, display_name: String) -> Self {
        Self {
            display_name,
            timestamp: SystemTime::now(),
            payload,
        }
    }

    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn kind(&self) -> EntryKind {
        self.payload.kind()
    }

    /// Inline bytes for text and file entries.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Text { data } | Payload::File { data } => Some(data.as_slice()),
            Payload::Directory { .. } => None,
        }
    }

    /// Location of the copied tree for directory entries.
    pub fn directory_path(&self) -> Option<&Utf8Path> {
        match &self.payload {
            Payload::Directory { path } => Some(path.as_path()),
            _ => None,
        }
    }
}

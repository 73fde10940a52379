mod copy_dir;

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info, warn};

use crate::entry::{self, Entry, EntryKind, Payload};
use crate::error::{NclipError, Result};
use crate::fs;

pub use copy_dir::{copy_tree, staging_path};

pub const SIDECAR_EXT: &str = "clip_entry";

/// Raw input for [`EntryStore::save`].
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// Literal text content.
    Bytes(&'a [u8]),
    /// File or directory to capture.
    Path(&'a Utf8Path),
}

#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub id: String,
    pub sidecar: Utf8PathBuf,
    pub entry: Entry,
}

/// The per-user cache holding one `<id>.clip_entry` sidecar per entry, plus
/// an `<id>` directory for directory entries.
#[derive(Debug, Clone)]
pub struct EntryStore {
    root: Utf8PathBuf,
}

impl EntryStore {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn sidecar_path(&self, id: &str) -> Utf8PathBuf {
        self.root.join(format!("{id}.{SIDECAR_EXT}"))
    }

    /// Materializes `entry` from `source` and writes its sidecar.
    ///
    /// Payload and sidecar are written separately; a crash in between leaves
    /// a payload that [`EntryStore::list`] never sees.
    pub fn save(&self, mut entry: Entry, source: Source<'_>) -> Result<StoredEntry> {
        let kind = entry.kind();
        if kind != EntryKind::Text && entry.display_name.is_empty() {
            return Err(NclipError::Validation(format!(
                "{kind} entries require a display name"
            )));
        }

        let id = entry::generate_id(kind);

        match (&mut entry.payload, source) {
            (Payload::Text { data }, Source::Bytes(bytes)) => {
                *data = bytes.to_vec();
            }
            (Payload::File { data }, Source::Path(path)) => {
                *data = fs::read(path)?;
            }
            (Payload::Directory { path: destination }, Source::Path(path)) => {
                if !path.exists() {
                    return Err(NclipError::Validation(format!(
                        "directory '{path}' does not exist"
                    )));
                }
                if !path.is_dir() {
                    return Err(NclipError::Validation(format!(
                        "'{path}' is not a directory"
                    )));
                }
                *destination = copy_tree(path, &self.root.join(&id))?;
            }
            (payload, _) => {
                return Err(NclipError::Validation(format!(
                    "{} entries cannot be saved from this input",
                    payload.kind()
                )));
            }
        }

        let sidecar = self.sidecar_path(&id);
        let json = serde_json::to_vec_pretty(&entry)?;
        fs::write(&sidecar, &json)?;
        info!(id = %id, kind = %kind, "saved entry");

        Ok(StoredEntry { id, sidecar, entry })
    }

    /// Reads every readable sidecar, newest first. Unreadable or malformed
    /// sidecars are skipped.
    pub fn list(&self) -> Result<Vec<Entry>> {
        let reader = match fs::read_dir(&self.root) {
            Ok(reader) => reader,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.root, "cache directory missing");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut entries = Vec::new();
        for dir_entry in reader {
            let dir_entry = match dir_entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "failed to read cache entry, skipping");
                    continue;
                }
            };

            let path = match Utf8PathBuf::from_path_buf(dir_entry.path()) {
                Ok(p) => p,
                Err(p) => {
                    warn!(path = %p.to_string_lossy(), "skipping non-utf8 path");
                    continue;
                }
            };

            if path.extension() != Some(SIDECAR_EXT) {
                continue;
            }

            match read_sidecar(&path) {
                Ok(entry) => entries.push(entry),
                Err(err) => warn!(path = %path, error = %err, "skipping unreadable sidecar"),
            }
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}

fn read_sidecar(path: &Utf8Path) -> Result<Entry> {
    let raw = fs::read(path)?;
    let entry = serde_json::from_slice(&raw)?;
    Ok(entry)
}

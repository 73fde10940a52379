use std::fs;
use std::io;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{NclipError, Result};

fn with_path(path: &Utf8Path, err: io::Error) -> NclipError {
    NclipError::Io(io::Error::new(err.kind(), format!("{}: {}", path, err)))
}

pub fn read(path: &Utf8Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| with_path(path, e))
}

pub fn write(path: &Utf8Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    fs::write(path, data).map_err(|e| with_path(path, e))
}

pub fn create_dir_all(path: &Utf8Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| with_path(path, e))
}

pub fn rename(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    fs::rename(from, to).map_err(|e| with_path(to, e))
}

pub fn remove_dir_all(path: &Utf8Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| with_path(path, e))
}

pub fn canonicalize(path: &Utf8Path) -> Result<Utf8PathBuf> {
    path.canonicalize_utf8().map_err(|e| with_path(path, e))
}

pub fn read_dir(path: &Utf8Path) -> io::Result<fs::ReadDir> {
    fs::read_dir(path)
}

pub fn to_utf8(path: &Path) -> Result<&Utf8Path> {
    Utf8Path::from_path(path).ok_or_else(|| NclipError::InvalidUtfPath(path.display().to_string()))
}

pub fn to_utf8_path_buf(path: std::path::PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|p| NclipError::InvalidUtfPath(p.to_string_lossy().into_owned()))
}

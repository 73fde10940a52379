use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::error::{NclipError, Result};
use crate::fs;
use crate::utils;

/// Copies `source` to `destination`, which only appears once complete.
///
/// The tree is built under a hidden staging name next to `destination` and
/// renamed into place as the last step. On failure the staging tree is
/// removed when possible; `destination` is never created.
///
/// Source and staging are walked in canonical form so a source that contains
/// the cache never descends into its own staging tree.
pub fn copy_tree(source: &Utf8Path, destination: &Utf8Path) -> Result<Utf8PathBuf> {
    let source = fs::canonicalize(source)?;
    let staging = resolved_staging(destination)?;

    if let Err(err) = copy_into(&source, &staging) {
        if staging.exists()
            && let Err(cleanup) = fs::remove_dir_all(&staging)
        {
            warn!(path = %staging, error = %cleanup, "failed to remove staging tree");
        }
        return Err(err);
    }

    fs::rename(&staging, destination)?;
    debug!(source = %source, destination = %destination, "directory committed");
    Ok(destination.to_owned())
}

/// `<parent>/.<name>.partial`; never matches a generated entry id.
pub fn staging_path(destination: &Utf8Path) -> Utf8PathBuf {
    let name = destination.file_name().unwrap_or("entry");
    let staging = format!(".{name}.partial");
    match destination.parent() {
        Some(parent) => parent.join(staging),
        None => Utf8PathBuf::from(staging),
    }
}

fn resolved_staging(destination: &Utf8Path) -> Result<Utf8PathBuf> {
    let staging = staging_path(destination);
    let (Some(parent), Some(name)) = (staging.parent(), staging.file_name()) else {
        return Ok(staging);
    };
    if parent.as_str().is_empty() {
        return Ok(staging);
    }

    fs::create_dir_all(parent)?;
    Ok(fs::canonicalize(parent)?.join(name))
}

fn copy_into(source: &Utf8Path, staging: &Utf8Path) -> Result<()> {
    let skip = staging.as_std_path().to_path_buf();
    let walker = WalkBuilder::new(source)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| !entry.path().starts_with(&skip))
        .build();

    for result in walker {
        let dir_entry = result.map_err(walk_error)?;
        let path = fs::to_utf8(dir_entry.path())?;
        let relative = utils::relative_to(path, source);
        let target = if relative.as_str().is_empty() {
            staging.to_owned()
        } else {
            staging.join(&relative)
        };

        let file_type = dir_entry.file_type();
        if file_type.is_some_and(|kind| kind.is_dir()) {
            fs::create_dir_all(&target)?;
        } else if file_type.is_some_and(|kind| kind.is_symlink()) && path.is_dir() {
            warn!(path = %path, "skipping symlinked directory");
        } else {
            let bytes = fs::read(path)?;
            fs::write(&target, &bytes)?;
        }
    }

    Ok(())
}

fn walk_error(err: ignore::Error) -> NclipError {
    let message = err.to_string();
    NclipError::Io(err.into_io_error().unwrap_or_else(|| io::Error::other(message)))
}

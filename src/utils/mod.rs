use std::env::VarError;

use camino::{Utf8Path, Utf8PathBuf};
use shellexpand::LookupError;

pub fn relative_to(path: &Utf8Path, base: &Utf8Path) -> Utf8PathBuf {
    path.strip_prefix(base)
        .map(Utf8PathBuf::from)
        .unwrap_or_else(|_| path.to_owned())
}

/// Expands `~` and environment variables in a user-supplied path.
///
/// Callers decide which error an unset variable becomes.
pub fn expand_path(raw: &str) -> Result<Utf8PathBuf, LookupError<VarError>> {
    shellexpand::full(raw).map(|expanded| Utf8PathBuf::from(expanded.as_ref()))
}

/// Cuts `text` to at most `max_chars` characters, appending `...` when shortened.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

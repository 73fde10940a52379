use crate::entry::{Entry, EntryKind};
use crate::utils;

pub const DEFAULT_PREVIEW_CHARS: usize = 32;

/// Text entries show a preview of their content; file and directory entries
/// show the stored name.
pub fn entry_label(entry: &Entry, preview_chars: usize) -> String {
    match (entry.kind(), entry.data()) {
        (EntryKind::Text, Some(data)) => {
            utils::truncate(&String::from_utf8_lossy(data), preview_chars)
        }
        _ => entry.display_name.clone(),
    }
}

/// One `<index> - (<kind>) <label>` line per entry, in the given order.
pub fn render_listing(entries: &[Entry], preview_chars: usize) -> String {
    let mut buffer = String::new();
    for (index, entry) in entries.iter().enumerate() {
        buffer.push_str(&format!(
            "{index} - ({}) {}\n",
            entry.kind(),
            entry_label(entry, preview_chars)
        ));
    }
    buffer
}

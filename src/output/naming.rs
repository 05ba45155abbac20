//! Destination file naming.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Character substituted for path separators in context names.
pub const SEPARATOR_PLACEHOLDER: char = '_';

/// File name for a context: separators become `_` so the file never nests.
pub fn file_name_for(context_name: &str) -> String {
    context_name.replace(['/', MAIN_SEPARATOR], &SEPARATOR_PLACEHOLDER.to_string())
}

/// Full destination path for a context inside `dir`.
pub fn destination_for(dir: &Path, context_name: &str) -> PathBuf {
    dir.join(file_name_for(context_name))
}

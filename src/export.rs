use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::model::Highlight;

const UNSAFE_FILENAME_CHARS: [char; 3] = [':', '/', '\\'];

/// Strip characters that cannot appear in a file name.
pub fn sanitize_title(title: &str) -> String {
    title.replace(UNSAFE_FILENAME_CHARS, "")
}

pub fn export_path(export_dir: &Path, title: &str) -> PathBuf {
    export_dir.join(format!("{}.md", sanitize_title(title)))
}

/// One Markdown bullet per highlight, content verbatim.
pub fn render_markdown<'a, I>(highlights: I) -> String
where
    I: IntoIterator<Item = &'a Highlight>,
{
    highlights
        .into_iter()
        .map(|h| format!("- {}\n", h.content))
        .collect()
}

/// Write a book's highlights to `<export_dir>/<title>.md`, replacing any
/// existing file, and return the path written.
pub fn export_book(
    export_dir: &Path,
    title: &str,
    highlights: &[Highlight],
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(export_dir).map_err(|source| ExportError::CreateDir {
        path: export_dir.to_path_buf(),
        source,
    })?;

    let path = export_path(export_dir, title);
    fs::write(&path, render_markdown(highlights)).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), highlights = highlights.len(), "exported book");
    Ok(path)
}

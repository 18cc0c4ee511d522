use super::metadata::parse_metadata;
use crate::model::Highlight;

const BOM: char = '\u{feff}';

/// Turn one clipping record into a [`Highlight`].
///
/// A record is laid out as
///
/// ```text
/// <title>
/// <metadata>
///
/// <content, possibly over several lines>
/// ```
///
/// Returns `None` for anything that is not a highlight with text: the empty
/// tail after the last delimiter, truncated records and bookmarks (which have
/// no content).
pub fn parse_clipping(record: &str) -> Option<Highlight> {
    let record = record.trim_start_matches(|c: char| c == BOM || c == '\r' || c == '\n');
    let mut lines = record.lines();

    let book = lines.next()?.trim_start_matches(BOM).trim();
    let metadata = lines.next()?;

    let mut content_lines = lines.skip_while(|l| l.trim().is_empty()).peekable();
    content_lines.peek()?;
    let content = content_lines.collect::<Vec<_>>().join("\n");
    let content = content.trim();

    if book.is_empty() || content.is_empty() {
        return None;
    }

    Some(Highlight {
        book: book.to_string(),
        metadata: parse_metadata(metadata),
        content: content.to_string(),
    })
}

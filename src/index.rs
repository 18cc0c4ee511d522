use std::collections::HashMap;
use std::path::Path;

use crate::clippings::{parse_clipping, read_clippings, split_records};
use crate::error::ClippingsError;
use crate::model::Highlight;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub records: usize,
    pub skipped: usize,
    pub replaced: usize,
}

/// Highlights grouped by book, in the order books first appear in the
/// clippings file.
#[derive(Debug, Default)]
pub struct BookIndex {
    books: Vec<Book>,
    positions: HashMap<String, usize>,
    stats: LoadStats,
}

/// The one highlight overlap is checked against: whichever was accepted last,
/// whatever book it belongs to. It is always the tail of its book's list.
#[derive(Debug, Default)]
struct Cursor {
    previous: Option<usize>,
}

impl BookIndex {
    pub fn load(path: &Path) -> Result<Self, ClippingsError> {
        let text = read_clippings(path)?;
        let index = Self::from_text(&text);

        tracing::info!(
            path = %path.display(),
            records = index.stats.records,
            skipped = index.stats.skipped,
            replaced = index.stats.replaced,
            books = index.len(),
            highlights = index.highlight_count(),
            "loaded clippings"
        );

        Ok(index)
    }

    pub fn from_text(text: &str) -> Self {
        Self::build(split_records(text))
    }

    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = BookIndex::default();
        let mut cursor = Cursor::default();

        for record in records {
            index.stats.records += 1;

            let Some(highlight) = parse_clipping(record) else {
                tracing::debug!(record = index.stats.records, "skipping clipping without highlight");
                index.stats.skipped += 1;
                continue;
            };

            index.accept(highlight, &mut cursor);
        }

        index
    }

    fn accept(&mut self, highlight: Highlight, cursor: &mut Cursor) {
        if let Some(prev_slot) = cursor.previous {
            let prev_book = &mut self.books[prev_slot].highlights;
            if prev_book.last().is_some_and(|prev| highlight.is_related(prev)) {
                prev_book.pop();
                self.stats.replaced += 1;
            }
        }

        let slot = match self.positions.get(&highlight.book) {
            Some(&slot) => slot,
            None => {
                self.books.push(Book {
                    title: highlight.book.clone(),
                    highlights: Vec::new(),
                });
                self.positions.insert(highlight.book.clone(), self.books.len() - 1);
                self.books.len() - 1
            }
        };

        self.books[slot].highlights.push(highlight);
        cursor.previous = Some(slot);
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.books.iter().map(|b| b.title.as_str())
    }

    pub fn get(&self, title: &str) -> Option<&Book> {
        self.positions.get(title).map(|&slot| &self.books[slot])
    }

    /// Book by its 1-based position in listing order.
    pub fn by_position(&self, position: usize) -> Option<&Book> {
        position.checked_sub(1).and_then(|slot| self.books.get(slot))
    }

    /// Resolve a user supplied book reference: a number is a 1-based position,
    /// anything else must match a title exactly.
    pub fn resolve(&self, book_ref: &str) -> Option<&Book> {
        if !book_ref.is_empty() && book_ref.chars().all(|c| c.is_ascii_digit()) {
            return book_ref.parse().ok().and_then(|position| self.by_position(position));
        }
        self.get(book_ref)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn highlight_count(&self) -> usize {
        self.books.iter().map(|b| b.highlights.len()).sum()
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

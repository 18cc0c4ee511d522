use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClippingKind {
    Highlight,
    Note,
    Bookmark,
    Other,
}

impl ClippingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClippingKind::Highlight => "highlight",
            ClippingKind::Note => "note",
            ClippingKind::Bookmark => "bookmark",
            ClippingKind::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "highlight" => Some(ClippingKind::Highlight),
            "note" => Some(ClippingKind::Note),
            "bookmark" => Some(ClippingKind::Bookmark),
            "" => None,
            _ => Some(ClippingKind::Other),
        }
    }
}

/// Positional details from the second line of a clipping.
///
/// Everything here is informational. Acceptance and overlap detection only
/// look at the book title and the content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// The metadata line as it appeared in the file, trimmed.
    pub raw: String,
    pub kind: Option<ClippingKind>,
    pub page: Option<String>,
    pub location: Option<String>,
    pub added: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub book: String,
    pub metadata: Metadata,
    pub content: String,
}

impl Highlight {
    /// True when `previous` belongs to the same book and one content
    /// contains the other. Kindle writes a fresh clipping every time a
    /// selection is extended or shrunk, so either direction counts.
    pub fn is_related(&self, previous: &Highlight) -> bool {
        self.book == previous.book
            && (self.content.contains(&previous.content) || previous.content.contains(&self.content))
    }
}

use serde::Serialize;

use crate::model::Highlight;

/// Discord rejects embed field values longer than this.
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const TITLE_LIMIT: usize = 256;
pub const FIELD_MARKER: &str = "- ";

// Field names are mandatory but we have nothing to put there.
const BLANK_FIELD_NAME: &str = "\u{200b}";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Message {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// First `limit` characters of `s`, counted in chars rather than bytes.
pub fn truncate(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

pub fn highlight_field(highlight: &Highlight) -> EmbedField {
    EmbedField {
        name: BLANK_FIELD_NAME.to_string(),
        value: truncate(&format!("{}{}", FIELD_MARKER, highlight.content), FIELD_VALUE_LIMIT),
        inline: false,
    }
}

pub fn build_message(title: &str, highlights: &[&Highlight]) -> Message {
    Message {
        embeds: vec![Embed {
            title: truncate(title, TITLE_LIMIT),
            fields: highlights.iter().map(|h| highlight_field(h)).collect(),
        }],
    }
}

use chrono::NaiveDateTime;

use crate::model::{ClippingKind, Metadata};

const ADDED_PREFIX: &str = "added on ";

// Kindle writes the date in the locale of the device.
const DATE_FORMATS: [&str; 2] = ["%A, %d %B %Y %H:%M:%S", "%A, %B %d, %Y %I:%M:%S %p"];

/// Parse a metadata line such as
/// `- Your Highlight on page 12 | Location 180-182 | Added on Monday, 1 January 2024 10:00:00`.
///
/// Never fails. Anything that does not match the usual layout is left as `None`
/// and the raw line is kept.
pub fn parse_metadata(line: &str) -> Metadata {
    let raw = line.trim();
    let mut metadata = Metadata {
        raw: raw.to_string(),
        ..Default::default()
    };

    for (i, segment) in raw.split('|').map(str::trim).enumerate() {
        if i == 0 {
            metadata.kind = parse_kind(segment);
        }

        let lowered = segment.to_ascii_lowercase();
        if let Some(rest) = lowered.strip_prefix(ADDED_PREFIX) {
            let date = &segment[segment.len() - rest.len()..];
            metadata.added = parse_added(date);
            continue;
        }

        if metadata.page.is_none() {
            metadata.page = value_after(segment, &lowered, "page ");
        }
        if metadata.location.is_none() {
            metadata.location = value_after(segment, &lowered, "location ");
        }
    }

    metadata
}

fn parse_kind(segment: &str) -> Option<ClippingKind> {
    let segment = segment.trim_start_matches('-').trim_start();
    let segment = segment.strip_prefix("Your ").unwrap_or(segment);
    segment
        .split_whitespace()
        .next()
        .and_then(ClippingKind::from_str)
}

/// Token following `keyword` in `segment`. `lowered` must be the ASCII
/// lowercase form of `segment` so byte offsets line up.
fn value_after(segment: &str, lowered: &str, keyword: &str) -> Option<String> {
    let start = lowered.find(keyword)? + keyword.len();
    segment[start..]
        .split_whitespace()
        .next()
        .map(|v| v.to_string())
}

fn parse_added(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
}

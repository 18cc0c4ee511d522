//! Clippings Module
//!
//! Reads the `My Clippings.txt` file a Kindle keeps in its root folder. Every
//! highlight, note and bookmark made on the device is appended to that file as
//! a record, and records are separated by a line of ten `=` characters.
//!
//! # Usage
//!
//! ```rust,ignore
//! use readunwise::clippings;
//!
//! let text = clippings::read_clippings(path)?;
//! for record in clippings::split_records(&text) {
//!     if let Some(highlight) = clippings::parse_clipping(record) {
//!         // ...
//!     }
//! }
//! ```

mod metadata;
mod parser;

use std::fs;
use std::path::Path;

pub use metadata::parse_metadata;
pub use parser::parse_clipping;

use crate::CLIPPING_DELIMITER;
use crate::error::ClippingsError;

/// Read the whole clippings file into memory.
pub fn read_clippings(path: &Path) -> Result<String, ClippingsError> {
    fs::read_to_string(path).map_err(|source| ClippingsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Split raw file contents into records. The record after the final delimiter
/// is usually empty and is left for the parser to discard.
pub fn split_records(text: &str) -> impl Iterator<Item = &str> {
    text.split(CLIPPING_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_records() {
        let text = "Book A\nLoc 1\n\nHello\n==========\nBook B\nLoc 2\n\nWorld\n==========\n";
        let records: Vec<&str> = split_records(text).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2], "\n");
        assert_eq!(
            records.iter().filter_map(|r| parse_clipping(r)).count(),
            2
        );
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_clippings(Path::new("/definitely/not/here/My Clippings.txt")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here/My Clippings.txt"));
    }
}

use std::error::Error;

pub mod clippings;
pub mod config;
pub mod discord;
pub mod error;
pub mod export;
pub mod handler;
pub mod index;
pub mod model;
pub mod selection;

/// Separates records in a Kindle clippings file.
pub const CLIPPING_DELIMITER: &str = "==========";

pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}

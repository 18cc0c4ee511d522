//! Discord Delivery Module
//!
//! Posts a small sample of highlights from one book to a Discord channel, so a
//! channel can serve as a daily reminder of what was read.
//!
//! # Architecture
//!
//! - The rest of the crate only sees the [`Channel`] trait
//! - [`embed`] builds the message body: one embed per message, titled with the
//!   book, one field per highlight
//! - [`DiscordClient`] sends it with a single blocking REST call; there is no
//!   gateway connection and no retry
//!
//! # Usage
//!
//! ```rust,ignore
//! use readunwise::discord::{Channel, DiscordClient};
//!
//! let client = DiscordClient::new(token, channel_id);
//! client.deliver(&book.title, &highlights)?;
//! ```

mod client;
pub mod embed;

pub use client::{DEFAULT_API_BASE, DiscordClient};

use crate::error::DeliveryError;
use crate::model::Highlight;

pub trait Channel {
    fn deliver(&self, title: &str, highlights: &[&Highlight]) -> Result<(), DeliveryError>;
}

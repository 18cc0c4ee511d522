use std::time::Duration;

use super::Channel;
use super::embed::build_message;
use crate::error::DeliveryError;
use crate::model::Highlight;

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct DiscordClient {
    token: String,
    channel_id: u64,
    api_base: String,
    agent: ureq::Agent,
}

impl DiscordClient {
    pub fn new(token: impl Into<String>, channel_id: u64) -> Self {
        Self::with_api_base(token, channel_id, DEFAULT_API_BASE)
    }

    pub fn with_api_base(token: impl Into<String>, channel_id: u64, api_base: &str) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            token: token.into(),
            channel_id,
            api_base: api_base.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn messages_url(&self) -> String {
        format!("{}/channels/{}/messages", self.api_base, self.channel_id)
    }
}

impl Channel for DiscordClient {
    fn deliver(&self, title: &str, highlights: &[&Highlight]) -> Result<(), DeliveryError> {
        if highlights.is_empty() {
            return Err(DeliveryError::EmptyMessage);
        }

        let message = build_message(title, highlights);
        let url = self.messages_url();

        tracing::info!(channel = self.channel_id, book = title, fields = highlights.len(), "posting highlights");
        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bot {}", self.token))
            .send_json(&message)?;

        tracing::debug!(status = response.status(), "discord accepted message");
        Ok(())
    }
}

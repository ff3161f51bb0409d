use serde::Deserialize;

use crate::config::types::SlackConfig;
use crate::error::ReportError;

use super::Relay;

/// Posts reports to a Slack channel through `chat.postMessage`.
pub struct SlackRelay {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
    channel: Option<String>,
}

#[derive(Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackRelay {
    /// Missing credentials are reported when sending, after the report has
    /// already been written locally.
    pub fn new(config: &SlackConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            channel: config.channel.clone().filter(|c| !c.is_empty()),
        }
    }
}

impl Relay for SlackRelay {
    async fn send(&self, text: &str) -> Result<(), ReportError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ReportError::relay("no Slack token configured (slack.token or --slack-token)"))?;
        let channel = self.channel.as_deref().ok_or_else(|| {
            ReportError::relay("no Slack channel configured (slack.channel or --slack-channel)")
        })?;

        let url = format!("{}/chat.postMessage", self.api_url);
        let payload = serde_json::json!({ "channel": channel, "text": text });
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ReportError::relay(format!("posting to {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::relay(format!("Slack responded with {status}")));
        }

        let body: PostMessageResponse = response
            .json()
            .await
            .map_err(|e| ReportError::relay(format!("decoding Slack response: {e}")))?;
        if !body.ok {
            return Err(ReportError::relay(
                body.error.unwrap_or_else(|| "unknown Slack error".to_owned()),
            ));
        }
        Ok(())
    }
}

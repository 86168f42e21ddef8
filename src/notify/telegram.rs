//! Telegram Bot API notifier

use crate::config::{NotificationTarget, NotifierConfig, SlotRange};
use crate::model::MatchRecord;
use crate::notify::render::{change_text, error_text, match_keyboard, InlineKeyboardMarkup};
use crate::notify::traits::{Notifier, NotifyError, NotifyResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `sendMessage` request body
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends notifications through a Telegram bot
///
/// Change notifications go to the user or the channel depending on the
/// configured target. Error reports always go to the user.
pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
    user_id: String,
    channel_id: String,
    target: NotificationTarget,
    slots: SlotRange,
}

impl TelegramNotifier {
    /// Creates a notifier
    ///
    /// # Arguments
    ///
    /// * `config` - The notifier configuration
    /// * `slots` - Slot range used to link each match to its ticket page
    pub fn new(config: &NotifierConfig, slots: SlotRange) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                config.api_base_url.trim_end_matches('/'),
                config.api_token
            ),
            user_id: config.user_id.clone(),
            channel_id: config.channel_id.clone(),
            target: config.target,
            slots,
        })
    }

    fn change_recipient(&self) -> &str {
        match self.target {
            NotificationTarget::Direct => &self.user_id,
            NotificationTarget::Broadcast => &self.channel_id,
        }
    }

    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> NotifyResult<()> {
        let body = SendMessage {
            chat_id,
            text,
            parse_mode: "MarkdownV2",
            reply_markup: keyboard,
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        let raw = response.text().await?;

        let parsed: Option<ApiResponse> = serde_json::from_str(&raw).ok();
        let ok = parsed.as_ref().map(|r| r.ok).unwrap_or(false);

        if !status.is_success() || !ok {
            let description = parsed
                .and_then(|r| r.description)
                .unwrap_or(raw);
            return Err(NotifyError::Api {
                status: status.as_u16(),
                description,
            });
        }

        tracing::debug!("Delivered message to chat {}", chat_id);
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify_change(&self, record: &MatchRecord) -> NotifyResult<()> {
        let keyboard = match_keyboard(record, &self.slots);
        self.send_message(
            self.change_recipient(),
            &change_text(record),
            Some(&keyboard),
        )
        .await
    }

    async fn notify_error(&self, message: &str) -> NotifyResult<()> {
        self.send_message(&self.user_id, &error_text(message), None)
            .await
    }
}

//! Telegram notification delivery
//!
//! Renders wallet summaries into HTML messages and delivers them through
//! the Bot API. Delivery failures surface as `BotError::Delivery`; they
//! never panic or abort the run.

pub mod format;

use crate::error::{BotError, Result};
use crate::types::{RunStats, ScanMode, WalletSummary};
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Telegram notifier for recap delivery
#[derive(Clone)]
pub struct Notifier {
    http: Client,
    bot_token: String,
    chat_id: String,
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest {
    chat_id: String,
    text: String,
    parse_mode: String,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl Notifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            http: Client::new(),
            bot_token,
            chat_id,
            enabled: true,
        }
    }

    /// No-op notifier for console-only commands
    pub fn disabled() -> Self {
        Self {
            http: Client::new(),
            bot_token: String::new(),
            chat_id: String::new(),
            enabled: false,
        }
    }

    /// Deliver raw HTML-formatted text to the configured chat
    pub async fn send(&self, text: &str) -> Result<()> {
        if !self.enabled {
            debug!("notifier disabled, dropping message");
            return Ok(());
        }

        let url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.bot_token
        );
        let request = SendMessageRequest {
            chat_id: self.chat_id.clone(),
            text: text.to_string(),
            parse_mode: "HTML".to_string(),
            disable_web_page_preview: true,
        };

        let resp: SendMessageResponse = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if !resp.ok {
            return Err(BotError::Delivery(resp.description.unwrap_or_else(|| {
                "sendMessage returned ok=false".to_string()
            })));
        }

        info!("Telegram message sent");
        Ok(())
    }

    /// Send the recap for a single wallet
    pub async fn wallet_recap(&self, summary: &WalletSummary) -> Result<()> {
        self.send(&format::recap_message(summary, Utc::now())).await
    }

    /// Send the aggregated bot-traders summary
    pub async fn bot_summary(&self, bots: &[WalletSummary]) -> Result<()> {
        if bots.is_empty() {
            return Ok(());
        }
        self.send(&format::bot_summary_message(bots, Utc::now()))
            .await
    }

    pub async fn startup(&self, mode: ScanMode, wallet_count: usize) -> Result<()> {
        self.send(&format::startup_message(mode, wallet_count, Utc::now()))
            .await
    }

    pub async fn completion(&self, stats: &RunStats) -> Result<()> {
        self.send(&format::completion_message(stats)).await
    }

    pub async fn error(&self, context: &str, detail: &str) -> Result<()> {
        self.send(&format::error_message(context, detail)).await
    }
}

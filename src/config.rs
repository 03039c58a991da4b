//! Configuration loading and validation
//!
//! Settings come from a TOML file layered under `RECAP_`-prefixed
//! environment variables (e.g. `RECAP_TELEGRAM__BOT_TOKEN`).

use crate::error::{BotError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Top-level bot configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub telegram: Option<TelegramConfig>,
    #[serde(default)]
    pub hyperliquid: HyperliquidConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub state: StateConfig,
}

/// Telegram delivery credentials
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

/// Hyperliquid info API settings
#[derive(Debug, Clone, Deserialize)]
pub struct HyperliquidConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for HyperliquidConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

/// Wallet list and filtering thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub wallets: Vec<String>,
    /// Trailing window for the default scan and the incremental fallback
    #[serde(default = "default_window_hours")]
    pub window_hours: i64,
    #[serde(default = "default_true")]
    pub filter_bots: bool,
    /// Wallets with more trades than this go to the bot summary
    #[serde(default = "default_bot_trade_threshold")]
    pub bot_trade_threshold: usize,
    /// Wallets with fewer trades than this are dropped entirely
    #[serde(default = "default_min_trades")]
    pub min_trades: usize,
    pub position_threshold: Option<Decimal>,
    pub size_change_threshold: Option<Decimal>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            wallets: Vec::new(),
            window_hours: default_window_hours(),
            filter_bots: true,
            bot_trade_threshold: default_bot_trade_threshold(),
            min_trades: default_min_trades(),
            position_threshold: None,
            size_change_threshold: None,
        }
    }
}

/// Checkpoint file location
#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.hyperliquid.xyz".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_window_hours() -> i64 {
    24
}

fn default_true() -> bool {
    true
}

fn default_bot_trade_threshold() -> usize {
    500
}

fn default_min_trades() -> usize {
    1
}

fn default_state_path() -> String {
    "data/state.json".to_string()
}

impl Config {
    /// Load configuration from a TOML file plus environment overrides
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("RECAP").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Check required settings, collecting every problem into one error
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        match &self.telegram {
            Some(tg) => {
                if tg.bot_token.trim().is_empty() {
                    errors.push("telegram.bot_token is not set".to_string());
                }
                if tg.chat_id.trim().is_empty() {
                    errors.push("telegram.chat_id is not set".to_string());
                }
            }
            None => errors.push("telegram section is missing".to_string()),
        }

        if self.tracker.wallets.is_empty() {
            errors.push("no wallet addresses configured".to_string());
        }
        if self.tracker.window_hours <= 0 {
            errors.push("tracker.window_hours must be positive".to_string());
        }
        if self.tracker.min_trades > self.tracker.bot_trade_threshold {
            errors.push(
                "tracker.min_trades cannot exceed tracker.bot_trade_threshold".to_string(),
            );
        }
        if let Some(t) = self.tracker.position_threshold {
            if t < Decimal::ZERO {
                errors.push("tracker.position_threshold cannot be negative".to_string());
            }
        }
        if let Some(t) = self.tracker.size_change_threshold {
            if t < Decimal::ZERO {
                errors.push("tracker.size_change_threshold cannot be negative".to_string());
            }
        }
        if self.hyperliquid.timeout_secs == 0 {
            errors.push("hyperliquid.timeout_secs must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(BotError::InvalidConfig(errors.join("; ")))
        }
    }

    /// Render the configuration with secrets masked, for the startup log
    pub fn summary(&self) -> String {
        let (token, chat_id) = match &self.telegram {
            Some(tg) => (mask_secret(&tg.bot_token), tg.chat_id.clone()),
            None => ("NOT SET".to_string(), "NOT SET".to_string()),
        };

        format!(
            "telegram token: {} | chat: {} | api: {} | wallets: {} | \
             window: {}h | bot filter: {} (>{} trades) | min trades: {} | \
             retries: {} @ {}s",
            token,
            chat_id,
            self.hyperliquid.api_url,
            self.tracker.wallets.len(),
            self.tracker.window_hours,
            if self.tracker.filter_bots { "on" } else { "off" },
            self.tracker.bot_trade_threshold,
            self.tracker.min_trades,
            self.hyperliquid.max_retries,
            self.hyperliquid.retry_delay_secs,
        )
    }
}

fn mask_secret(secret: &str) -> String {
    if secret.len() > 4 {
        format!("{}{}", "*".repeat(20), &secret[secret.len() - 4..])
    } else if secret.is_empty() {
        "NOT SET".to_string()
    } else {
        "*".repeat(secret.len())
    }
}

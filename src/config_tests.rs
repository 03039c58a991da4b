//! Tests for configuration

#[cfg(test)]
mod tests {
    use super::super::config::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_hyperliquid_config_defaults() {
        let config: HyperliquidConfig = toml::from_str("").unwrap();
        assert_eq!(config.api_url, "https://api.hyperliquid.xyz");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_secs, 5);
    }

    #[test]
    fn test_tracker_config_defaults() {
        let config: TrackerConfig = toml::from_str("").unwrap();
        assert!(config.wallets.is_empty());
        assert_eq!(config.window_hours, 24);
        assert!(config.filter_bots);
        assert_eq!(config.bot_trade_threshold, 500);
        assert_eq!(config.min_trades, 1);
        assert!(config.position_threshold.is_none());
        assert!(config.size_change_threshold.is_none());
    }

    #[test]
    fn test_state_config_default_path() {
        let config: StateConfig = toml::from_str("").unwrap();
        assert_eq!(config.path, "data/state.json");
    }

    #[test]
    fn test_telegram_config() {
        let toml_str = r#"
bot_token = "123:abc"
chat_id = "-100123"
"#;
        let config: TelegramConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.chat_id, "-100123");
    }

    #[test]
    fn test_tracker_config_with_thresholds() {
        let toml_str = r#"
wallets = ["0xaaa"]
position_threshold = 50000.0
size_change_threshold = 25000.0
"#;
        let config: TrackerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.position_threshold, Some(dec!(50000.0)));
        assert_eq!(config.size_change_threshold, Some(dec!(25000.0)));
    }

    #[test]
    fn test_full_config_parse_and_validate() {
        let toml_str = r#"
[telegram]
bot_token = "123:abc"
chat_id = "42"

[hyperliquid]
max_retries = 5

[tracker]
wallets = ["0xaaa", "0xbbb"]
bot_trade_threshold = 300
filter_bots = false

[state]
path = "/tmp/recap-state.json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();

        assert_eq!(config.hyperliquid.max_retries, 5);
        assert_eq!(config.tracker.wallets.len(), 2);
        assert_eq!(config.tracker.bot_trade_threshold, 300);
        assert!(!config.tracker.filter_bots);
        assert_eq!(config.state.path, "/tmp/recap-state.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_telegram() {
        let config: Config = toml::from_str(
            r#"
[tracker]
wallets = ["0xaaa"]
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("telegram"));
    }

    #[test]
    fn test_validate_empty_wallets() {
        let config: Config = toml::from_str(
            r#"
[telegram]
bot_token = "123:abc"
chat_id = "42"
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("wallet"));
    }

    #[test]
    fn test_validate_collects_multiple_errors() {
        let config: Config = toml::from_str("").unwrap();
        let err = config.validate().unwrap_err().to_string();

        assert!(err.contains("telegram"));
        assert!(err.contains("wallet"));
    }

    #[test]
    fn test_validate_blank_credentials() {
        let config: Config = toml::from_str(
            r#"
[telegram]
bot_token = ""
chat_id = " "

[tracker]
wallets = ["0xaaa"]
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("bot_token"));
        assert!(err.contains("chat_id"));
    }

    #[test]
    fn test_validate_min_trades_vs_bot_threshold() {
        let config: Config = toml::from_str(
            r#"
[telegram]
bot_token = "123:abc"
chat_id = "42"

[tracker]
wallets = ["0xaaa"]
min_trades = 600
bot_trade_threshold = 500
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("min_trades"));
    }

    #[test]
    fn test_validate_negative_threshold() {
        let config: Config = toml::from_str(
            r#"
[telegram]
bot_token = "123:abc"
chat_id = "42"

[tracker]
wallets = ["0xaaa"]
position_threshold = -1.0
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("position_threshold"));
    }

    #[test]
    fn test_summary_masks_token() {
        let config: Config = toml::from_str(
            r#"
[telegram]
bot_token = "123456:secret-token-cdef"
chat_id = "42"

[tracker]
wallets = ["0xaaa"]
"#,
        )
        .unwrap();

        let summary = config.summary();
        assert!(!summary.contains("secret-token"));
        assert!(summary.contains("cdef"));
        assert!(summary.contains("wallets: 1"));
    }
}

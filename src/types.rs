//! Core domain types shared across the bot

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of an open position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
    Short,
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSide::Long => write!(f, "LONG"),
            PositionSide::Short => write!(f, "SHORT"),
        }
    }
}

/// A wallet's open exposure in one instrument
///
/// Re-derived fresh on every fetch; never persisted. Size is always the
/// positive magnitude (zero-size entries are dropped at normalization).
#[derive(Debug, Clone)]
pub struct Position {
    pub wallet: String,
    pub asset: String,
    pub side: PositionSide,
    pub size: Decimal,
    /// Absolute notional value of the position
    pub notional: Decimal,
    pub entry_price: Decimal,
    /// Approximated as |notional / signed size|, not a true mark-price feed
    pub mark_price: Decimal,
    pub liquidation_price: Option<Decimal>,
    pub unrealized_pnl: Decimal,
    pub pnl_pct: Decimal,
    pub margin_used: Decimal,
}

/// One executed trade as reported by the venue
#[derive(Debug, Clone)]
pub struct Fill {
    pub wallet: String,
    /// May be an "@<index>" id that needs metadata resolution
    pub coin: String,
    /// Raw direction label, e.g. "Open Long", "Close Short"
    pub dir: String,
    pub price: Decimal,
    /// Signed size as reported
    pub size: Decimal,
    /// "B" for buy, "A" for ask/sell
    pub side: String,
    /// Realized P&L attributed to this fill
    pub closed_pnl: Decimal,
    /// Execution time, unix milliseconds
    pub time: i64,
    /// Position size immediately before the fill
    pub start_position: Decimal,
}

/// How a fill changed the position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Open,
    Increase,
    Reduce,
    Close,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Open => write!(f, "OPEN"),
            TradeAction::Increase => write!(f, "INCREASE"),
            TradeAction::Reduce => write!(f, "REDUCE"),
            TradeAction::Close => write!(f, "CLOSE"),
        }
    }
}

/// A fill enriched with its classification, ready for display
#[derive(Debug, Clone)]
pub struct Trade {
    pub asset: String,
    pub action: TradeAction,
    /// Raw direction label kept for display
    pub direction: String,
    pub side: String,
    pub price: Decimal,
    /// Display magnitude
    pub size: Decimal,
    /// price * |size|
    pub value: Decimal,
    pub pnl: Decimal,
    /// Unix milliseconds
    pub time: i64,
}

impl Trade {
    pub fn time_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.time).unwrap_or_default()
    }
}

/// Per-wallet output of one recap run
///
/// `overall_pnl` reflects current open exposure; `window_pnl` reflects
/// realized events inside the scan window. The two are independent sums.
#[derive(Debug, Clone)]
pub struct WalletSummary {
    pub wallet: String,
    /// Shortened form for display; the full address is kept for linking
    pub wallet_short: String,
    pub overall_pnl: Decimal,
    pub window_pnl: Decimal,
    pub trade_count: usize,
    pub position_count: usize,
    /// Sorted by timestamp, most recent first
    pub trades: Vec<Trade>,
    pub has_activity: bool,
    pub mode: ScanMode,
}

/// Time-window selection for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanMode {
    /// Trailing window of `window_hours` (default 24h)
    #[serde(rename = "24h")]
    Day,
    /// Trailing hour
    #[serde(rename = "1h")]
    Hour,
    /// Since the stored checkpoint
    #[serde(rename = "incremental")]
    Incremental,
}

impl ScanMode {
    /// Short label used in message headers
    pub fn label(&self) -> &'static str {
        match self {
            ScanMode::Day => "24H",
            ScanMode::Hour => "1H",
            ScanMode::Incremental => "Window",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::Day => write!(f, "24h"),
            ScanMode::Hour => write!(f, "1h"),
            ScanMode::Incremental => write!(f, "incremental"),
        }
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "24h" | "day" => Ok(ScanMode::Day),
            "1h" | "hour" => Ok(ScanMode::Hour),
            "incremental" | "incr" => Ok(ScanMode::Incremental),
            other => Err(format!(
                "unknown scan mode '{}' (expected 24h, 1h or incremental)",
                other
            )),
        }
    }
}

/// Persisted marker of the last completed run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Unix milliseconds of the run's start
    pub last_run_timestamp: i64,
    pub last_scan_type: ScanMode,
}

/// Aggregate counters for one run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    pub successful: usize,
    pub failed: usize,
    pub filtered: usize,
    pub bot_wallets: usize,
    pub total_trades: usize,
}

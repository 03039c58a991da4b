//! Message formatting for Telegram delivery
//!
//! All formatters are pure; the `Notifier` supplies timestamps and does
//! the actual sending.

use crate::types::{RunStats, ScanMode, Trade, TradeAction, WalletSummary};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Most recent trades shown per wallet before truncation
pub const MAX_TRADES_SHOWN: usize = 20;

const TRADER_URL: &str = "https://hyperdash.info/trader";

fn wallet_link(wallet: &str, wallet_short: &str) -> String {
    format!("<a href='{}/{}'>{}</a>", TRADER_URL, wallet, wallet_short)
}

fn fmt_usd(value: Decimal) -> String {
    if value < Decimal::ZERO {
        format!("-${:.2}", value.abs())
    } else {
        format!("+${:.2}", value)
    }
}

fn fmt_usd_whole(value: Decimal) -> String {
    if value < Decimal::ZERO {
        format!("-${:.0}", value.abs())
    } else {
        format!("+${:.0}", value)
    }
}

/// Per-wallet recap message
pub fn recap_message(summary: &WalletSummary, now: DateTime<Utc>) -> String {
    let link = wallet_link(&summary.wallet, &summary.wallet_short);
    let label = summary.mode.label();

    let overall_emoji = if summary.overall_pnl >= Decimal::ZERO {
        "🟢"
    } else {
        "🔴"
    };
    let window_emoji = if summary.window_pnl >= Decimal::ZERO {
        "📈"
    } else {
        "📉"
    };

    let mut lines = vec![
        format!("<b>📊 {} Recap: {}</b>", label, link),
        format!("<i>{}</i>", now.format("%b %d, %H:%M UTC")),
        String::new(),
        format!(
            "{} <b>Overall P&L:</b> {}",
            overall_emoji,
            fmt_usd(summary.overall_pnl)
        ),
        format!(
            "{} <b>{} P&L:</b> {}",
            window_emoji,
            label,
            fmt_usd(summary.window_pnl)
        ),
        format!(
            "📝 <b>Trades:</b> {} | <b>Positions:</b> {}",
            summary.trade_count, summary.position_count
        ),
    ];

    if summary.trades.is_empty() {
        lines.push(String::new());
        lines.push("💤 <i>No trades in this window</i>".to_string());
        return lines.join("\n");
    }

    lines.push(String::new());
    if summary.trades.len() > MAX_TRADES_SHOWN {
        lines.push(format!("<b>━━━ LATEST {} TRADES ━━━</b>", MAX_TRADES_SHOWN));
        lines.push(format!(
            "<i>Showing {} of {} total</i>",
            MAX_TRADES_SHOWN, summary.trade_count
        ));
    } else {
        lines.push("<b>━━━ TRADES ━━━</b>".to_string());
    }
    lines.push(String::new());

    for trade in summary.trades.iter().take(MAX_TRADES_SHOWN) {
        lines.push(trade_line(trade));
    }

    if summary.trades.len() > MAX_TRADES_SHOWN {
        let remaining = summary.trades.len() - MAX_TRADES_SHOWN;
        lines.push(String::new());
        lines.push(format!("<i>... and {} more trades</i>", remaining));
    }

    lines.join("\n")
}

/// One trade as a compact multi-line entry
pub fn trade_line(trade: &Trade) -> String {
    let is_long = trade.direction.to_lowercase().contains("long");

    let (emoji, action) = match (trade.action, is_long) {
        (TradeAction::Open, true) => ("🟢", "OPEN LONG"),
        (TradeAction::Open, false) => ("🔴", "OPEN SHORT"),
        (TradeAction::Close, true) => ("✅", "CLOSE LONG"),
        (TradeAction::Close, false) => ("❌", "CLOSE SHORT"),
        (TradeAction::Increase, true) => ("📈", "ADD LONG"),
        (TradeAction::Increase, false) => ("📉", "ADD SHORT"),
        (TradeAction::Reduce, true) => ("📊", "REDUCE LONG"),
        (TradeAction::Reduce, false) => ("📊", "REDUCE SHORT"),
    };

    let pnl_str = if trade.pnl.is_zero() {
        String::new()
    } else {
        format!(" | P&L: {}", fmt_usd(trade.pnl))
    };

    format!(
        "{} <b>{}</b> {}\n   ${:.0} @ ${:.2}{}\n   <i>{}</i>",
        emoji,
        trade.asset,
        action,
        trade.value,
        trade.price,
        pnl_str,
        trade.time_utc().format("%H:%M UTC"),
    )
}

/// Aggregate message for wallets routed to the bot bucket
pub fn bot_summary_message(bots: &[WalletSummary], now: DateTime<Utc>) -> String {
    let total_trades: usize = bots.iter().map(|b| b.trade_count).sum();
    let total_window: Decimal = bots.iter().map(|b| b.window_pnl).sum();
    let total_overall: Decimal = bots.iter().map(|b| b.overall_pnl).sum();

    let overall_emoji = if total_overall >= Decimal::ZERO {
        "🟢"
    } else {
        "🔴"
    };
    let window_emoji = if total_window >= Decimal::ZERO {
        "📈"
    } else {
        "📉"
    };

    let mut lines = vec![
        "<b>🤖 Bot Traders Summary</b>".to_string(),
        format!("<i>{}</i>", now.format("%b %d, %H:%M UTC")),
        String::new(),
        format!("<b>{} automated trading wallets</b>", bots.len()),
        String::new(),
        format!(
            "{} <b>Combined Overall P&L:</b> {}",
            overall_emoji,
            fmt_usd_whole(total_overall)
        ),
        format!(
            "{} <b>Combined Window P&L:</b> {}",
            window_emoji,
            fmt_usd_whole(total_window)
        ),
        format!("📊 <b>Total Trades:</b> {}", total_trades),
        String::new(),
        "<b>━━━ INDIVIDUAL BOTS ━━━</b>".to_string(),
        String::new(),
    ];

    // Best to worst by window P&L
    let mut sorted: Vec<&WalletSummary> = bots.iter().collect();
    sorted.sort_by(|a, b| b.window_pnl.cmp(&a.window_pnl));

    for bot in sorted {
        let link = wallet_link(&bot.wallet, &bot.wallet_short);
        let emoji = if bot.window_pnl >= Decimal::ZERO {
            "💚"
        } else {
            "💔"
        };
        lines.push(format!(
            "{} {}\n   Trades: {} | P&L: {}",
            emoji,
            link,
            bot.trade_count,
            fmt_usd_whole(bot.window_pnl)
        ));
    }

    lines.join("\n")
}

/// Startup notice, sent once per run before the wallet loop
pub fn startup_message(mode: ScanMode, wallet_count: usize, now: DateTime<Utc>) -> String {
    format!(
        "🚀 <b>Hyperliquid Recap Started</b>\n<i>{}</i>\n\nGenerating {} recaps for {} tracked wallets...",
        now.format("%b %d, %Y %H:%M UTC"),
        mode.label(),
        wallet_count
    )
}

/// Completion notice with run statistics
pub fn completion_message(stats: &RunStats) -> String {
    format!(
        "✅ <b>Recap Complete</b>\n\nSent: {} | Failed: {} | Filtered: {}\nBot wallets: {}\nTotal trades: {}",
        stats.successful, stats.failed, stats.filtered, stats.bot_wallets, stats.total_trades
    )
}

/// Operational error notice
pub fn error_message(context: &str, detail: &str) -> String {
    format!("⚠️ <b>{}</b>\n\n{}", context, detail)
}

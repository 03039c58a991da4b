//! Recap builder
//!
//! Pure transformation from a wallet's positions and window fills into a
//! `WalletSummary`. All I/O (fetching, symbol metadata) happens in the
//! adapter; this module only derives numbers and classifications.


use crate::client::AssetNames;
use crate::types::{Fill, Position, ScanMode, Trade, TradeAction, WalletSummary};
use rust_decimal::Decimal;
use tracing::debug;

/// Build the summary for one wallet over one scan window
pub fn build_summary(
    wallet: &str,
    positions: &[Position],
    fills: &[Fill],
    assets: &AssetNames,
    mode: ScanMode,
) -> WalletSummary {
    let overall_pnl: Decimal = positions.iter().map(|p| p.unrealized_pnl).sum();
    let window_pnl: Decimal = fills.iter().map(|f| f.closed_pnl).sum();
    let trades = build_trades(fills, assets);
    let trade_count = fills.len();

    debug!(
        "built summary for {}: {} trades, {:.2} window P&L",
        wallet, trade_count, window_pnl
    );

    WalletSummary {
        wallet: wallet.to_string(),
        wallet_short: shorten_address(wallet),
        overall_pnl,
        window_pnl,
        trade_count,
        position_count: positions.len(),
        trades,
        has_activity: trade_count > 0,
        mode,
    }
}

fn build_trades(fills: &[Fill], assets: &AssetNames) -> Vec<Trade> {
    let mut trades: Vec<Trade> = fills.iter().map(|f| to_trade(f, assets)).collect();
    // Most recent first
    trades.sort_by(|a, b| b.time.cmp(&a.time));
    trades
}

fn to_trade(fill: &Fill, assets: &AssetNames) -> Trade {
    let asset = assets.resolve(&fill.coin).to_string();
    let action = classify(&fill.dir, fill.start_position, fill.size);
    let size = fill.size.abs();

    Trade {
        asset,
        action,
        direction: fill.dir.clone(),
        side: fill.side.clone(),
        price: fill.price,
        size,
        value: fill.price * size,
        pnl: fill.closed_pnl,
        time: fill.time,
    }
}

/// Classify a fill from its direction label and position-size delta.
///
/// A textual "open"/"close" in the label always wins; the delta inference
/// is the fallback for ambiguous labels only.
pub fn classify(direction: &str, start_position: Decimal, size: Decimal) -> TradeAction {
    let direction = direction.to_lowercase();

    if direction.contains("open") {
        return TradeAction::Open;
    }
    if direction.contains("close") {
        return TradeAction::Close;
    }

    let after = start_position + size;
    if start_position.is_zero() {
        TradeAction::Open
    } else if after.abs() < start_position.abs() {
        TradeAction::Reduce
    } else if after.abs() > start_position.abs() {
        TradeAction::Increase
    } else {
        TradeAction::Close
    }
}

/// Shorten a wallet address for display (0x1a2b...3c4d)
pub fn shorten_address(address: &str) -> String {
    if address.len() > 10 {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}

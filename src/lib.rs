//! Hyperliquid Wallet Recap Bot
//!
//! A scheduled batch job that polls the Hyperliquid info API for a fixed
//! set of wallet addresses, computes per-wallet P&L and trade-activity
//! summaries over a time window, and delivers them to a Telegram chat.
//! Each invocation runs once, processes all wallets, and exits.
//!
//! ## Architecture
//!
//! ```text
//! InfoClient (fetch + normalize) → Recap Builder (pure) → Notifier (Telegram)
//!             ↑                            ↑                    ↑
//!         RetryPolicy                 RecapRunner (routing, stats)
//!                                          ↓
//!                                     StateStore (checkpoint)
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod notify;
pub mod recap;
pub mod state;
pub mod tracker;
pub mod types;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod types_tests;

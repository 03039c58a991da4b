//! Run orchestration
//!
//! Drives one recap run: window resolution, the sequential per-wallet
//! loop, human/bot/inactive routing, run statistics and the checkpoint
//! update. Wallets are processed one at a time in configured order; the
//! upstream API and Telegram are rate-sensitive.


use crate::client::{AssetNames, InfoClient};
use crate::config::{Config, TrackerConfig};
use crate::error::Result;
use crate::notify::Notifier;
use crate::recap;
use crate::state::StateStore;
use crate::types::{RunState, RunStats, ScanMode, WalletSummary};
use chrono::Utc;
use tracing::{error, info, warn};

const HOUR_MS: i64 = 3_600_000;

/// Resolved scan window in unix milliseconds, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub start_ms: i64,
    pub end_ms: i64,
    /// True when an incremental run had no checkpoint to start from
    pub fell_back: bool,
}

/// Where a wallet's summary is routed after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Sent as an individual recap
    Individual,
    /// Collected into the bot-traders summary
    Bot,
    /// Dropped entirely
    Inactive,
}

/// Classify a wallet by its in-window trade count
pub fn route_summary(trade_count: usize, filters: &TrackerConfig) -> Route {
    if !filters.filter_bots {
        return Route::Individual;
    }
    if trade_count > filters.bot_trade_threshold {
        return Route::Bot;
    }
    if trade_count < filters.min_trades {
        return Route::Inactive;
    }
    Route::Individual
}

/// Compute the fill window for this run.
///
/// An incremental run without a checkpoint falls back to the trailing
/// window for this run only; a fresh checkpoint is still written at the
/// end so subsequent runs are properly incremental.
pub fn resolve_window(
    mode: ScanMode,
    checkpoint: Option<&RunState>,
    now_ms: i64,
    window_hours: i64,
) -> ScanWindow {
    match mode {
        ScanMode::Day => ScanWindow {
            start_ms: now_ms - window_hours * HOUR_MS,
            end_ms: now_ms,
            fell_back: false,
        },
        ScanMode::Hour => ScanWindow {
            start_ms: now_ms - HOUR_MS,
            end_ms: now_ms,
            fell_back: false,
        },
        ScanMode::Incremental => match checkpoint {
            Some(state) => ScanWindow {
                start_ms: state.last_run_timestamp,
                end_ms: now_ms,
                fell_back: false,
            },
            None => ScanWindow {
                start_ms: now_ms - window_hours * HOUR_MS,
                end_ms: now_ms,
                fell_back: true,
            },
        },
    }
}

/// Drives one recap run across all configured wallets
pub struct RecapRunner {
    config: Config,
    client: InfoClient,
    notifier: Notifier,
    state: StateStore,
}

impl RecapRunner {
    pub fn new(config: Config, client: InfoClient, notifier: Notifier, state: StateStore) -> Self {
        Self {
            config,
            client,
            notifier,
            state,
        }
    }

    /// Process every wallet once, send summaries and update the checkpoint
    pub async fn run(&self, mode: ScanMode) -> Result<RunStats> {
        let run_started_ms = Utc::now().timestamp_millis();

        let checkpoint = if mode == ScanMode::Incremental {
            self.state.load()
        } else {
            None
        };
        let window = resolve_window(
            mode,
            checkpoint.as_ref(),
            run_started_ms,
            self.config.tracker.window_hours,
        );
        if window.fell_back {
            warn!(
                "no checkpoint found, falling back to trailing {}h window for this run",
                self.config.tracker.window_hours
            );
        }

        info!("{}", self.config.summary());
        info!(
            "processing {} wallets ({} scan, window [{}, {}))",
            self.config.tracker.wallets.len(),
            mode,
            window.start_ms,
            window.end_ms
        );

        if let Err(e) = self
            .notifier
            .startup(mode, self.config.tracker.wallets.len())
            .await
        {
            warn!("failed to send startup notification: {}", e);
        }

        // Populate the asset-name cache once for the whole run
        let assets = self.client.asset_names().await;

        let mut stats = RunStats::default();
        let mut bot_traders: Vec<WalletSummary> = Vec::new();

        for wallet in &self.config.tracker.wallets {
            let summary = match self
                .build_wallet_summary(wallet, &window, &assets, mode)
                .await
            {
                Ok(summary) => summary,
                Err(e) => {
                    error!("failed to process {}: {}", wallet, e);
                    stats.failed += 1;
                    continue;
                }
            };

            match route_summary(summary.trade_count, &self.config.tracker) {
                Route::Bot => {
                    info!(
                        "🤖 bot trader: {} ({} trades)",
                        summary.wallet_short, summary.trade_count
                    );
                    bot_traders.push(summary);
                    stats.filtered += 1;
                }
                Route::Inactive => {
                    info!(
                        "filtered {} (inactive: {} trades)",
                        summary.wallet_short, summary.trade_count
                    );
                    stats.filtered += 1;
                }
                Route::Individual => match self.notifier.wallet_recap(&summary).await {
                    Ok(()) => {
                        info!("recap sent for {}", summary.wallet_short);
                        stats.successful += 1;
                        stats.total_trades += summary.trade_count;
                    }
                    Err(e) => {
                        warn!("failed to send recap for {}: {}", summary.wallet_short, e);
                        stats.failed += 1;
                    }
                },
            }
        }

        stats.bot_wallets = bot_traders.len();
        if !bot_traders.is_empty() {
            info!("sending bot traders summary ({} wallets)", bot_traders.len());
            if let Err(e) = self.notifier.bot_summary(&bot_traders).await {
                warn!("failed to send bot summary: {}", e);
            }
        }

        // Checkpoint the run's start time so the next incremental window
        // has neither a gap nor double-counting
        if let Err(e) = self.state.save(run_started_ms, mode) {
            error!(
                "failed to save checkpoint (next incremental run will fall back): {}",
                e
            );
        }

        if let Err(e) = self.notifier.completion(&stats).await {
            warn!("failed to send completion notification: {}", e);
        }

        info!(
            "recap complete: {} sent, {} failed, {} filtered ({} bots), {} trades",
            stats.successful, stats.failed, stats.filtered, stats.bot_wallets, stats.total_trades
        );

        Ok(stats)
    }

    async fn build_wallet_summary(
        &self,
        wallet: &str,
        window: &ScanWindow,
        assets: &AssetNames,
        mode: ScanMode,
    ) -> Result<WalletSummary> {
        info!("generating recap for {}", recap::shorten_address(wallet));

        let positions = self.client.positions(wallet).await?;
        let fills = self
            .client
            .fills_in_window(wallet, window.start_ms, window.end_ms)
            .await?;

        Ok(recap::build_summary(wallet, &positions, &fills, assets, mode))
    }
}

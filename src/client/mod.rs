//! Hyperliquid info API client
//!
//! Read-only adapter for account state, trade fills and asset metadata.
//! All calls POST a typed JSON body to `{base_url}/info` and go through
//! the retry policy; raw records are normalized here so the rest of the
//! bot only sees well-formed positions and fills.

mod retry;

pub use retry::RetryPolicy;

use crate::config::HyperliquidConfig;
use crate::error::{BotError, Result};
use crate::recap::shorten_address;
use crate::types::{Fill, Position, PositionSide};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Mapping from "@<index>" asset ids to ticker names
#[derive(Debug, Clone, Default)]
pub struct AssetNames {
    map: HashMap<String, String>,
}

impl AssetNames {
    pub fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    /// Resolve an "@<index>" id to its ticker; anything else passes through
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        if !raw.starts_with('@') {
            return raw;
        }
        self.map.get(raw).map(String::as_str).unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Read-only client for the Hyperliquid info endpoint
#[derive(Clone)]
pub struct InfoClient {
    http: Client,
    base_url: String,
    retry: RetryPolicy,
    asset_names: Arc<RwLock<Option<HashMap<String, String>>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUserState {
    #[serde(default)]
    asset_positions: Vec<RawAssetPosition>,
    margin_summary: Option<RawMarginSummary>,
}

#[derive(Debug, Deserialize)]
struct RawAssetPosition {
    position: RawPosition,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPosition {
    coin: String,
    szi: String,
    #[serde(default)]
    entry_px: Option<String>,
    #[serde(default)]
    position_value: Option<String>,
    #[serde(default)]
    unrealized_pnl: Option<String>,
    #[serde(default)]
    liquidation_px: Option<String>,
    #[serde(default)]
    margin_used: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMarginSummary {
    account_value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFill {
    coin: String,
    px: String,
    sz: String,
    #[serde(default)]
    side: String,
    time: i64,
    #[serde(default)]
    start_position: Option<String>,
    #[serde(default)]
    dir: String,
    #[serde(default)]
    closed_pnl: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMeta {
    universe: Vec<RawAsset>,
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    name: String,
}

impl InfoClient {
    /// Create a new info client
    pub fn new(config: &HyperliquidConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::new(
                config.max_retries,
                Duration::from_secs(config.retry_delay_secs),
            ),
            asset_names: Arc::new(RwLock::new(None)),
        })
    }

    async fn post_info<T: DeserializeOwned>(
        &self,
        what: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        self.retry.run(what, || self.post_info_once(body)).await
    }

    async fn post_info_once<T: DeserializeOwned>(&self, body: &serde_json::Value) -> Result<T> {
        let url = format!("{}/info", self.base_url);
        let resp = self.http.post(&url).json(body).send().await?;

        if !resp.status().is_success() {
            return Err(BotError::Api(format!(
                "info request returned {}",
                resp.status()
            )));
        }

        Ok(resp.json().await?)
    }

    async fn user_state(&self, wallet: &str) -> Result<RawUserState> {
        debug!("fetching user state for {}", wallet);
        let body = json!({ "type": "clearinghouseState", "user": wallet });
        self.post_info("user state", &body).await
    }

    /// Fetch and normalize open positions for a wallet
    pub async fn positions(&self, wallet: &str) -> Result<Vec<Position>> {
        let state = self.user_state(wallet).await?;
        let positions = parse_positions(&state, wallet);
        info!(
            "fetched {} positions for {}",
            positions.len(),
            shorten_address(wallet)
        );
        Ok(positions)
    }

    /// Fetch fills whose timestamp falls in `[start_ms, end_ms)`
    pub async fn fills_in_window(
        &self,
        wallet: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Fill>> {
        debug!("fetching fills for {} in [{}, {})", wallet, start_ms, end_ms);
        let body = json!({
            "type": "userFillsByTime",
            "user": wallet,
            "startTime": start_ms,
            "endTime": end_ms,
            "aggregateByTime": true,
        });

        let raw: Vec<RawFill> = self.post_info("fills", &body).await?;
        let fills: Vec<Fill> = raw
            .iter()
            .filter_map(|f| match parse_fill(f, wallet) {
                Ok(fill) => Some(fill),
                Err(e) => {
                    warn!("skipping fill for {}: {}", wallet, e);
                    None
                }
            })
            .collect();

        info!(
            "fetched {} fills for {}",
            fills.len(),
            shorten_address(wallet)
        );
        Ok(fills)
    }

    /// Asset-id mapping, fetched once per process lifetime and cached.
    ///
    /// A fetch failure is logged and yields an empty mapping (ids then
    /// pass through unresolved); only a successful fetch is cached.
    pub async fn asset_names(&self) -> AssetNames {
        if let Some(map) = self.asset_names.read().await.as_ref() {
            return AssetNames::new(map.clone());
        }

        match self.fetch_meta().await {
            Ok(meta) => {
                let map: HashMap<String, String> = meta
                    .universe
                    .iter()
                    .enumerate()
                    .map(|(i, asset)| (format!("@{}", i), asset.name.clone()))
                    .collect();
                info!("cached {} asset name mappings", map.len());
                *self.asset_names.write().await = Some(map.clone());
                AssetNames::new(map)
            }
            Err(e) => {
                warn!("failed to fetch asset metadata: {}", e);
                AssetNames::default()
            }
        }
    }

    async fn fetch_meta(&self) -> Result<RawMeta> {
        debug!("fetching meta info");
        self.post_info("meta", &json!({ "type": "meta" })).await
    }

    /// Total account equity for a wallet
    pub async fn account_value(&self, wallet: &str) -> Result<Decimal> {
        let state = self.user_state(wallet).await?;
        let summary = state
            .margin_summary
            .ok_or_else(|| BotError::Api("missing margin summary".into()))?;

        decimal_field(&summary.account_value, "accountValue")
    }
}

fn decimal_field(raw: &str, field: &str) -> Result<Decimal> {
    raw.parse()
        .map_err(|_| BotError::MalformedRecord(format!("bad {}: {:?}", field, raw)))
}

fn decimal_or_zero(raw: &Option<String>, field: &str) -> Result<Decimal> {
    match raw {
        Some(s) => decimal_field(s, field),
        None => Ok(Decimal::ZERO),
    }
}

fn parse_fill(raw: &RawFill, wallet: &str) -> Result<Fill> {
    Ok(Fill {
        wallet: wallet.to_string(),
        coin: raw.coin.clone(),
        dir: raw.dir.clone(),
        price: decimal_field(&raw.px, "px")?,
        size: decimal_field(&raw.sz, "sz")?,
        side: raw.side.clone(),
        closed_pnl: decimal_or_zero(&raw.closed_pnl, "closedPnl")?,
        time: raw.time,
        start_position: decimal_or_zero(&raw.start_position, "startPosition")?,
    })
}

fn parse_positions(state: &RawUserState, wallet: &str) -> Vec<Position> {
    let mut positions = Vec::new();

    for entry in &state.asset_positions {
        match parse_position(&entry.position, wallet) {
            Ok(Some(position)) => {
                debug!(
                    "parsed position: {} {} ${:.2}",
                    position.asset, position.side, position.notional
                );
                positions.push(position);
            }
            // Zero-size entries are dropped at normalization
            Ok(None) => {}
            Err(e) => warn!("skipping position for {}: {}", wallet, e),
        }
    }

    positions
}

fn parse_position(raw: &RawPosition, wallet: &str) -> Result<Option<Position>> {
    let szi = decimal_field(&raw.szi, "szi")?;
    if szi.is_zero() {
        return Ok(None);
    }

    let entry_price = decimal_or_zero(&raw.entry_px, "entryPx")?;
    let position_value = decimal_or_zero(&raw.position_value, "positionValue")?;
    let unrealized_pnl = decimal_or_zero(&raw.unrealized_pnl, "unrealizedPnl")?;
    let margin_used = decimal_or_zero(&raw.margin_used, "marginUsed")?;
    let liquidation_price = match &raw.liquidation_px {
        Some(s) => Some(decimal_field(s, "liquidationPx")?),
        None => None,
    };

    let side = if szi > Decimal::ZERO {
        PositionSide::Long
    } else {
        PositionSide::Short
    };

    // Mark price is approximated from notional and size, not a true feed
    let mark_price = if szi.is_zero() {
        entry_price
    } else {
        (position_value / szi).abs()
    };

    let notional = position_value.abs();
    let pnl_pct = if notional.is_zero() {
        Decimal::ZERO
    } else {
        unrealized_pnl / notional * Decimal::ONE_HUNDRED
    };

    Ok(Some(Position {
        wallet: wallet.to_string(),
        asset: raw.coin.clone(),
        side,
        size: szi.abs(),
        notional,
        entry_price,
        mark_price,
        liquidation_price,
        unrealized_pnl,
        pnl_pct,
        margin_used,
    }))
}

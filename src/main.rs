//! Hyperliquid wallet recap bot
//!
//! Generates per-wallet trading recaps and sends them to Telegram.
//! Runs once per invocation, then exits.

use clap::{Parser, Subcommand};
use hyperliquid_recap::{
    client::InfoClient, config::Config, notify::Notifier, state::StateStore,
    tracker::RecapRunner, types::ScanMode,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hyperliquid-recap")]
#[command(about = "Per-wallet trading recaps for Hyperliquid, delivered to Telegram")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and send recaps for all tracked wallets
    Run {
        /// Scan window: 24h, 1h or incremental
        #[arg(long, default_value = "24h")]
        scan: String,
    },
    /// Show open positions for one wallet
    Positions {
        /// Wallet address to query
        wallet: String,
    },
    /// Test Telegram notification
    TestNotify,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Run { scan } => run_recap(config, &scan).await,
        Commands::Positions { wallet } => show_positions(config, &wallet).await,
        Commands::TestNotify => test_notify(config).await,
    }
}

async fn run_recap(config: Config, scan: &str) -> anyhow::Result<()> {
    let mode: ScanMode = scan.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    // Fatal before any network activity
    config.validate()?;

    let tg = config
        .telegram
        .clone()
        .ok_or_else(|| anyhow::anyhow!("telegram section is missing"))?;

    let client = InfoClient::new(&config.hyperliquid)?;
    let notifier = Notifier::new(tg.bot_token, tg.chat_id);
    let state = StateStore::new(&config.state.path);

    let runner = RecapRunner::new(config, client, notifier, state);
    let stats = runner.run(mode).await?;

    println!("\n✅ Recap complete");
    println!(
        "Sent: {} | Failed: {} | Filtered: {}",
        stats.successful, stats.failed, stats.filtered
    );
    println!(
        "Bot wallets: {} | Total trades: {}",
        stats.bot_wallets, stats.total_trades
    );

    Ok(())
}

async fn show_positions(config: Config, wallet: &str) -> anyhow::Result<()> {
    let client = InfoClient::new(&config.hyperliquid)?;

    let positions = client.positions(wallet).await?;
    let assets = client.asset_names().await;

    println!("\n📊 Open positions for {}\n", wallet);

    if positions.is_empty() {
        println!("No open positions");
    } else {
        println!(
            "{:<10} {:<6} {:>12} {:>14} {:>12} {:>12}",
            "Asset", "Side", "Size", "Notional", "Entry", "uPnL"
        );
        println!("{}", "-".repeat(72));

        for pos in &positions {
            println!(
                "{:<10} {:<6} {:>12} {:>14.2} {:>12.2} {:>12.2}",
                assets.resolve(&pos.asset),
                pos.side.to_string(),
                pos.size,
                pos.notional,
                pos.entry_price,
                pos.unrealized_pnl,
            );
        }
    }

    if let Ok(value) = client.account_value(wallet).await {
        println!("\nAccount value: ${:.2}", value);
    }

    Ok(())
}

async fn test_notify(config: Config) -> anyhow::Result<()> {
    let tg = config
        .telegram
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("telegram not configured in config.toml"))?;

    let notifier = Notifier::new(tg.bot_token.clone(), tg.chat_id.clone());

    notifier
        .send("🧪 <b>Test Notification</b>\n\nIf you see this, Telegram integration is working!")
        .await?;

    println!("✅ Test notification sent!");
    Ok(())
}

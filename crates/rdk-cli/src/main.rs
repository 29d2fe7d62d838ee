//! rdk CLI — offline risk checks against the same file store the daemon
//! uses.
//!
//! Undo is an interactive affordance and lives in the long-running daemon;
//! here `remove` and `clear` are immediate and permanent (each invocation is
//! its own process, so no undo slot survives to a second command).

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use rdk_engine::{classify, RiskPolicy};
use rdk_ledger::{HistoryStore, LedgerConfig, RecentChecksLedger};
use rdk_schemas::{
    format_amount_micros, parse_amount_micros, validate_facts, ClassifiedTransaction, RiskTier,
    TransactionFacts,
};
use rdk_store::JsonFileStore;

/// Store key shared with the daemon.
const HISTORY_KEY: &str = "recent_checks";

#[derive(Parser)]
#[command(name = "rdk")]
#[command(about = "Transaction risk desk CLI", long_about = None)]
struct Cli {
    /// Data directory holding the persisted recent-checks sequence.
    #[arg(long, default_value = "./data")]
    data_dir: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one transaction and record it in the recent checks.
    Check {
        /// Decimal amount in the transaction currency (e.g. "2500" or "12.50")
        #[arg(long)]
        amount: String,

        #[arg(long, default_value = "USD")]
        currency: String,

        #[arg(long)]
        merchant: String,

        /// Upstream opinion (LOW | MEDIUM | HIGH) standing in for a live
        /// risk service.
        #[arg(long)]
        opinion: Option<String>,

        /// Identity descriptor recorded with the check.
        #[arg(long)]
        user: Option<String>,
    },

    /// Print the recent checks, most-recent-first.
    History,

    /// Permanently remove the check at the given index (0 = newest).
    Remove { index: usize },

    /// Permanently remove all recent checks.
    Clear,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store = JsonFileStore::new(&cli.data_dir)
        .with_context(|| format!("open history store in {}", cli.data_dir))?;
    let mut ledger = RecentChecksLedger::new(
        LedgerConfig::sane_defaults(),
        wall_clock_ms as fn() -> i64,
        store.clone(),
        HISTORY_KEY,
    );
    if let Some(entries) = store.read(HISTORY_KEY).context("read history")? {
        ledger.hydrate(entries);
    }

    match cli.cmd {
        Commands::Check {
            amount,
            currency,
            merchant,
            opinion,
            user,
        } => {
            let Some(amount_micros) = parse_amount_micros(&amount) else {
                bail!("amount {amount:?} is not a decimal with at most 6 fractional digits");
            };
            let facts = TransactionFacts {
                amount_micros,
                currency,
                merchant,
            };
            validate_facts(&facts)?;

            let server_opinion = match opinion {
                Some(label) => Some(
                    label
                        .parse::<RiskTier>()
                        .with_context(|| format!("--opinion {label:?}"))?,
                ),
                None => None,
            };

            let policy = RiskPolicy::sane_defaults();
            let tier = classify(&policy, &facts, server_opinion);
            let entry = ClassifiedTransaction::new(facts, tier, server_opinion).with_user(user);

            println!(
                "{} {} at {} → {}",
                format_amount_micros(entry.amount_micros),
                entry.currency,
                entry.merchant,
                entry.risk_tier
            );
            ledger.push(entry);
        }

        Commands::History => {
            if ledger.is_empty() {
                println!("no recent checks");
            }
            for (i, entry) in ledger.entries().iter().enumerate() {
                print_entry(i, entry);
            }
        }

        Commands::Remove { index } => match ledger.remove_at(index) {
            Some(entry) => println!("removed [{index}] {}", entry.merchant),
            None => println!("nothing removed: index {index} is out of range"),
        },

        Commands::Clear => {
            let cleared = ledger.clear_all();
            println!("cleared {cleared} checks");
        }
    }

    Ok(())
}

fn wall_clock_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn print_entry(index: usize, entry: &ClassifiedTransaction) {
    let server = entry
        .server_risk_tier
        .map(|t| format!(", server {t}"))
        .unwrap_or_default();
    println!(
        "[{index}] {} {} at {} → {}{server} ({})",
        format_amount_micros(entry.amount_micros),
        entry.currency,
        entry.merchant,
        entry.risk_tier,
        entry.checked_at_utc.format("%Y-%m-%d %H:%M:%S UTC"),
    );
}

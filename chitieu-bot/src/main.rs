use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use chitieu_bot::config::{self, Config, init_config, ledger_path, load_config};
use chitieu_bot::store::CsvStore;
use chitieu_bot::telegram::TelegramClient;
use chitieu_core::{Messenger, RowStore, process_message};

#[derive(Parser, Debug)]
#[command(name = "chitieu", version, about = "Vietnamese expense-ledger Telegram bot")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll Telegram for messages and process them against the ledger
    Run,

    /// Interpret one message locally and print the reply (no Telegram)
    Process {
        /// The message text, e.g. "Coffee 50k" or "Report tháng 5 năm 2025"
        text: String,
    },

    /// Inspect the ledger file: row count and the first few rows
    Check,

    /// Manage the Telegram webhook (the run loop uses long polling instead)
    Webhook {
        #[command(subcommand)]
        command: WebhookCommand,
    },

    /// Write a default config.toml under ~/.chitieu
    InitConfig,
}

#[derive(Subcommand, Debug)]
enum WebhookCommand {
    /// Register a webhook URL with the Bot API
    Set {
        #[arg(long)]
        url: String,
    },

    /// Remove the registered webhook
    Delete,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Run => {
            let cfg = load_config()?;
            run_bot(cfg).await?;
        }

        Command::Process { text } => {
            let cfg = load_config()?;
            let mut store = CsvStore::open(ledger_path(&cfg)?)?;
            let mut messenger = StdoutMessenger;
            process_message(&mut store, &mut messenger, &text, Local::now().naive_local())?;
        }

        Command::Check => {
            let cfg = load_config()?;
            check_ledger(&cfg)?;
        }

        Command::Webhook { command } => {
            let cfg = load_config()?;
            require_token(&cfg)?;
            let client = TelegramClient::new(&cfg.telegram.token, cfg.telegram.chat_id);
            match command {
                WebhookCommand::Set { url } => {
                    let ok = client.set_webhook(&url).await?;
                    println!("setWebhook: {ok}");
                }
                WebhookCommand::Delete => {
                    let ok = client.delete_webhook().await?;
                    println!("deleteWebhook: {ok}");
                }
            }
        }

        Command::InitConfig => {
            init_config()?;
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

fn require_token(cfg: &Config) -> Result<()> {
    if cfg.telegram.token.is_empty() {
        bail!(
            "telegram.token is empty; run `chitieu init-config` and edit {}",
            config::config_path()?.display()
        );
    }
    Ok(())
}

/// Long-poll loop: one update at a time, in order, against the one ledger.
async fn run_bot(cfg: Config) -> Result<()> {
    require_token(&cfg)?;

    let client = TelegramClient::new(&cfg.telegram.token, cfg.telegram.chat_id);
    let mut store = CsvStore::open(ledger_path(&cfg)?)?;
    let mut messenger = TelegramMessenger {
        client: client.clone(),
    };

    info!(ledger = %store.path().display(), chat_id = cfg.telegram.chat_id, "polling for updates");

    let mut offset = 0i64;
    loop {
        let updates = match client
            .get_updates(offset, cfg.telegram.poll_timeout_secs)
            .await
        {
            Ok(u) => u,
            Err(e) => {
                warn!("getUpdates failed: {e:#}");
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            let Some(message) = update.message else {
                continue;
            };
            if message.chat.id != cfg.telegram.chat_id {
                continue;
            }
            let Some(text) = message.text else {
                continue;
            };

            let now = Local::now().naive_local();
            if let Err(e) = process_message(&mut store, &mut messenger, &text, now) {
                warn!("processing {text:?} failed: {e:#}");
            }
        }
    }
}

/// Sends engine replies through the Bot API.
struct TelegramMessenger {
    client: TelegramClient,
}

impl Messenger for TelegramMessenger {
    fn send_reply(&mut self, text: &str) -> Result<()> {
        // The engine is synchronous but the transport is async, and the bot
        // runs under #[tokio::main] so a nested block_on would panic.
        // block_in_place + Handle::block_on covers the in-runtime case; a
        // fresh runtime covers the rest.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| handle.block_on(self.client.send_message(text)))
        } else {
            let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
            rt.block_on(self.client.send_message(text))
        }
    }
}

/// Prints engine replies to stdout; used by `chitieu process`.
struct StdoutMessenger;

impl Messenger for StdoutMessenger {
    fn send_reply(&mut self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}

fn check_ledger(cfg: &Config) -> Result<()> {
    let store = CsvStore::open(ledger_path(cfg)?)?;
    let rows = store.read_all_rows()?;

    println!("Ledger: {}", store.path().display());
    println!("Data rows (header excluded): {}", rows.len());
    for (i, row) in rows.iter().take(5).enumerate() {
        println!(
            "Row {}: date={:?} label={:?} expense={:?} income={:?}",
            i + 1,
            row.date,
            row.label,
            row.expense,
            row.income
        );
    }
    Ok(())
}

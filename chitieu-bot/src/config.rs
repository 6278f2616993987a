use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub telegram: TelegramSection,
    pub ledger: LedgerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSection {
    /// Bot API token from @BotFather.
    pub token: String,
    /// The single chat the bot listens to and replies into.
    pub chat_id: i64,
    /// Long-poll timeout in seconds for getUpdates.
    pub poll_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSection {
    /// Ledger CSV path. Defaults to `<home>/ledger.csv` when unset.
    pub csv_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram: TelegramSection {
                token: String::new(),
                chat_id: 0,
                poll_timeout_secs: 30,
            },
            ledger: LedgerSection { csv_path: None },
        }
    }
}

pub fn chitieu_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".chitieu"))
}

pub fn ensure_chitieu_home() -> Result<PathBuf> {
    let dir = chitieu_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_chitieu_home()?.join("config.toml"))
}

pub fn ledger_path(cfg: &Config) -> Result<PathBuf> {
    match &cfg.ledger.csv_path {
        Some(p) => Ok(p.clone()),
        None => Ok(ensure_chitieu_home()?.join("ledger.csv")),
    }
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {} (fill in telegram.token and telegram.chat_id)", p.display());
    Ok(())
}

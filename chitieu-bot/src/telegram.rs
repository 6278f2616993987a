//! Thin Telegram Bot API client.
//!
//! Only the four methods the bot needs: sendMessage, getUpdates,
//! setWebhook, deleteWebhook. Requests use the API's GET-with-query-params
//! form; every response arrives in the `{ok, result, description}` envelope.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TelegramClient {
    base_url: String,
    chat_id: i64,
    http: reqwest::Client,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub text: Option<String>,
    pub chat: Chat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

impl TelegramClient {
    pub fn new(token: &str, chat_id: i64) -> Self {
        Self {
            base_url: format!("https://api.telegram.org/bot{token}"),
            chat_id,
            http: reqwest::Client::new(),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{method}", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("telegram {method} request"))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("telegram {method} failed: {status} {txt}");
        }

        let out: Envelope<T> = resp
            .json()
            .await
            .with_context(|| format!("parse telegram {method} response"))?;
        if !out.ok {
            bail!(
                "telegram {method} rejected: {}",
                out.description.unwrap_or_default()
            );
        }
        out.result
            .with_context(|| format!("telegram {method}: empty result"))
    }

    /// Send a text reply to the configured chat. Fire-and-forget: the
    /// returned message object is discarded.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        debug!(len = text.len(), "sendMessage");
        let _: serde_json::Value = self
            .call(
                "sendMessage",
                &[
                    ("chat_id", self.chat_id.to_string()),
                    ("text", text.to_string()),
                ],
            )
            .await?;
        Ok(())
    }

    /// Long-poll for updates past `offset`.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &[
                ("offset", offset.to_string()),
                ("timeout", timeout_secs.to_string()),
            ],
        )
        .await
    }

    /// Point the bot's webhook at `url`. The run loop uses long polling
    /// instead; this exists for deployments behind a public endpoint.
    pub async fn set_webhook(&self, url: &str) -> Result<bool> {
        self.call("setWebhook", &[("url", url.to_string())]).await
    }

    pub async fn delete_webhook(&self) -> Result<bool> {
        self.call("deleteWebhook", &[]).await
    }
}

use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use entropy_core::config::Config;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

mod types;

#[allow(unused_imports)]
pub use types::{CallbackQuery, Chat, Message, Update, User};

pub struct TelegramSettings {
    pub bot_token: String,
}

impl TelegramSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config
            .telegram
            .bot_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .or_else(|| {
                std::env::var("ENTROPY_TELEGRAM_BOT_TOKEN")
                    .ok()
                    .map(|token| token.trim().to_string())
                    .filter(|token| !token.is_empty())
            })
            .unwrap_or_default();
        if token.is_empty() {
            bail!("telegram.bot_token or ENTROPY_TELEGRAM_BOT_TOKEN is required");
        }

        Ok(Self { bot_token: token })
    }
}

#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://api.telegram.org".to_string(),
            token,
        }
    }

    pub async fn get_updates(&self, offset: Option<i64>, timeout: Duration) -> Result<Vec<Update>> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: Some(vec!["message", "callback_query"]),
        };
        self.post("getUpdates", &request).await
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<Value>,
    ) -> Result<()> {
        let request = SendMessageRequest {
            chat_id,
            text,
            reply_markup,
        };
        let _: Message = self.post("sendMessage", &request).await?;
        Ok(())
    }

    /// Uploads image bytes inline via multipart sendPhoto.
    pub async fn send_photo(&self, chat_id: i64, bytes: Vec<u8>, caption: &str) -> Result<()> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("qr.png")
            .mime_str("image/png")
            .map_err(|_| anyhow!("Invalid photo mime type"))?;
        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("photo", part);

        let url = format!("{}/bot{}/sendPhoto", self.base_url, self.token);
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|_| anyhow!("Telegram photo upload failed"))?;

        let payload: TelegramResponse<Message> = response
            .json()
            .await
            .map_err(|_| anyhow!("Failed to decode Telegram response"))?;
        if !payload.ok {
            let description = payload
                .description
                .unwrap_or_else(|| "Telegram API error".to_string());
            bail!("{}", description);
        }
        Ok(())
    }

    /// Acknowledges a button press so the client stops its spinner.
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<()> {
        let request = AnswerCallbackQueryRequest { callback_query_id };
        let _: bool = self.post("answerCallbackQuery", &request).await?;
        Ok(())
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, method: &str, body: &B) -> Result<T> {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|_| anyhow!("Telegram request failed"))?;

        let payload: TelegramResponse<T> = response
            .json()
            .await
            .map_err(|_| anyhow!("Failed to decode Telegram response"))?;

        if !payload.ok {
            let description = payload
                .description
                .unwrap_or_else(|| "Telegram API error".to_string());
            bail!("{}", description);
        }

        Ok(payload.result)
    }
}

#[derive(Debug, Deserialize)]
struct TelegramResponse<T> {
    ok: bool,
    result: T,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_updates: Option<Vec<&'static str>>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<Value>,
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQueryRequest<'a> {
    callback_query_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Token resolution: config value wins, whitespace trimmed.
    #[test]
    fn test_settings_from_config_token() {
        let mut config = Config::default();
        config.telegram.bot_token = Some("  123:abc  ".to_string());

        let settings = TelegramSettings::from_config(&config).unwrap();
        assert_eq!(settings.bot_token, "123:abc");
    }

    /// Token resolution: empty config token is an error (assuming the
    /// env fallback is unset in the test environment).
    #[test]
    fn test_settings_missing_token_fails() {
        let mut config = Config::default();
        config.telegram.bot_token = Some("   ".to_string());

        if std::env::var("ENTROPY_TELEGRAM_BOT_TOKEN").is_err() {
            assert!(TelegramSettings::from_config(&config).is_err());
        }
    }
}

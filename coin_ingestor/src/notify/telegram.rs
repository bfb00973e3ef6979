use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use shared_utils::env::{MissingEnvVarError, get_env_var, get_optional_env_var};
use thiserror::Error;

use crate::notify::{Notifier, NotifyError};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum TelegramInitError {
    /// A bot token is configured but the destination chat is not.
    #[error(transparent)]
    MissingEnvVar(#[from] MissingEnvVarError),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

/// Sends alert messages to one Telegram chat through the Bot API.
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    bot_token: SecretString,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        bot_token: SecretString,
        chat_id: impl Into<String>,
    ) -> Result<Self, TelegramInitError> {
        Self::with_api_url(DEFAULT_API_URL, bot_token, chat_id)
    }

    pub fn with_api_url(
        api_url: impl Into<String>,
        bot_token: SecretString,
        chat_id: impl Into<String>,
    ) -> Result<Self, TelegramInitError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            bot_token,
            chat_id: chat_id.into(),
        })
    }

    /// Builds a notifier from `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
    ///
    /// Returns `Ok(None)` when no token is configured, which simply disables
    /// notifications. A token without a chat id is a configuration error.
    pub fn from_env() -> Result<Option<Self>, TelegramInitError> {
        let Some(token) = get_optional_env_var(TOKEN_ENV) else {
            return Ok(None);
        };
        let chat_id = get_env_var(CHAT_ID_ENV)?;
        Self::new(SecretString::new(token.into()), chat_id).map(Some)
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.trim_end_matches('/'),
            self.bot_token.expose_secret()
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            // reqwest errors carry the URL, and the URL carries the token.
            .map_err(|e| NotifyError::Request(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_from_env_disabled_without_token() {
        unsafe {
            std::env::remove_var(TOKEN_ENV);
            std::env::remove_var(CHAT_ID_ENV);
        }
        assert!(TelegramNotifier::from_env().unwrap().is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_token_without_chat_is_an_error() {
        unsafe {
            std::env::set_var(TOKEN_ENV, "123:abc");
            std::env::remove_var(CHAT_ID_ENV);
        }
        let err = TelegramNotifier::from_env().err().unwrap();
        assert!(matches!(err, TelegramInitError::MissingEnvVar(_)));
        assert!(err.to_string().contains(CHAT_ID_ENV));
        unsafe { std::env::remove_var(TOKEN_ENV) };
    }

    #[test]
    #[serial]
    fn test_from_env_fully_configured() {
        unsafe {
            std::env::set_var(TOKEN_ENV, "123:abc");
            std::env::set_var(CHAT_ID_ENV, "-100200300");
        }
        let n = TelegramNotifier::from_env().unwrap().unwrap();
        assert_eq!(n.chat_id, "-100200300");
        assert_eq!(
            n.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
        unsafe {
            std::env::remove_var(TOKEN_ENV);
            std::env::remove_var(CHAT_ID_ENV);
        }
    }
}

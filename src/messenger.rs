// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{Result, SalesclipError};

const TELEGRAM_API: &str = "https://api.telegram.org";

pub trait MessageSender {
    fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()>;

    /// One inline button per row; each pair is `(label, callback data)`.
    fn send_menu(&self, chat_id: i64, text: &str, buttons: &[(&str, &str)]) -> Result<()>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Bot API client: long polling plus outgoing messages.
pub struct TelegramClient {
    client: reqwest::blocking::Client,
    token: String,
}

impl TelegramClient {
    pub fn new(client: reqwest::blocking::Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }

    fn call<T: DeserializeOwned>(&self, method: &str, body: &serde_json::Value) -> Result<T> {
        let url = format!("{}/bot{}/{}", TELEGRAM_API, self.token, method);
        let resp: ApiResponse<T> = self.client.post(url).json(body).send()?.json()?;
        match (resp.ok, resp.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(SalesclipError::Telegram(format!(
                "{}: {}",
                method,
                resp.description.unwrap_or_else(|| "request rejected".into())
            ))),
        }
    }

    /// Wait up to `timeout_secs` for updates with id >= `offset`.
    pub fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
    }

    pub fn answer_callback_query(&self, callback_id: &str) -> Result<()> {
        self.call::<bool>("answerCallbackQuery", &json!({ "callback_query_id": callback_id }))?;
        Ok(())
    }

    fn send(&self, chat_id: i64, body: serde_json::Value) -> Result<()> {
        self.call::<serde_json::Value>("sendMessage", &body)?;
        tracing::info!(chat_id, "message delivered");
        Ok(())
    }
}

impl MessageSender for TelegramClient {
    fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.send(chat_id, json!({ "chat_id": chat_id, "text": text }))
    }

    fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()> {
        self.send(
            chat_id,
            json!({ "chat_id": chat_id, "text": text, "parse_mode": "Markdown" }),
        )
    }

    fn send_menu(&self, chat_id: i64, text: &str, buttons: &[(&str, &str)]) -> Result<()> {
        let keyboard: Vec<_> = buttons
            .iter()
            .map(|(label, data)| json!([{ "text": label, "callback_data": data }]))
            .collect();
        self.send(
            chat_id,
            json!({
                "chat_id": chat_id,
                "text": text,
                "reply_markup": { "inline_keyboard": keyboard },
            }),
        )
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Telegram front end: `/start` opens a menu, the buttons pick a period,
//! `/myid` tells a user the id to put on the whitelist.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::access::{AccessDenied, AccessList};
use crate::commands::report::{build_report, guard, send_report};
use crate::config::{Config, ReportConfig};
use crate::messenger::{CallbackQuery, Message, MessageSender, TelegramClient, Update};
use crate::period::Period;
use crate::source::RowSource;
use crate::utils::http_client;

// Must stay below the HTTP client timeout.
const POLL_TIMEOUT_SECS: u64 = 10;
const RETRY_DELAY: Duration = Duration::from_secs(5);

pub const PERIODS_CALLBACK: &str = "periods";
const REPORT_TYPE_PROMPT: &str = "Оберіть тип звіту:";
const PERIOD_PROMPT: &str = "Оберіть період звіту:";

fn period_label(period: Period) -> &'static str {
    match period {
        Period::Week => "🗓 Звіт за тиждень",
        Period::Month => "🗓 Звіт за місяць",
        Period::All => "📆 Звіт з початку продажів",
    }
}

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let tg = super::telegram_config(cfg)?;
    let client = TelegramClient::new(http_client()?, tg.token.clone());
    let access = AccessList::new(tg.whitelist.iter().copied());
    let source = super::open_source(cfg, m)?;
    let bot = Bot {
        sender: &client,
        access: &access,
        source: source.as_ref(),
        report: &cfg.report,
    };

    tracing::info!(whitelist = tg.whitelist.len(), "bot polling started");
    let mut offset = 0;
    loop {
        let updates = match client.get_updates(offset, POLL_TIMEOUT_SECS) {
            Ok(updates) => updates,
            Err(err) => {
                tracing::error!(error = %err, "polling failed");
                thread::sleep(RETRY_DELAY);
                continue;
            }
        };
        for update in updates {
            offset = offset.max(update.update_id + 1);
            if let Err(err) = bot.handle_update(&update, Local::now().date_naive()) {
                tracing::error!(update_id = update.update_id, error = %err, "update failed");
            }
            if let Some(cb) = &update.callback_query {
                if let Err(err) = client.answer_callback_query(&cb.id) {
                    tracing::debug!(error = %err, "could not answer callback");
                }
            }
        }
    }
}

pub struct Bot<'a, S: MessageSender + ?Sized> {
    pub sender: &'a S,
    pub access: &'a AccessList,
    pub source: &'a dyn RowSource,
    pub report: &'a ReportConfig,
}

impl<S: MessageSender + ?Sized> Bot<'_, S> {
    pub fn handle_update(&self, update: &Update, today: NaiveDate) -> Result<()> {
        if let Some(msg) = &update.message {
            return self.on_message(msg);
        }
        if let Some(cb) = &update.callback_query {
            return self.on_callback(cb, today);
        }
        Ok(())
    }

    fn on_message(&self, msg: &Message) -> Result<()> {
        let (Some(text), Some(from)) = (msg.text.as_deref(), msg.from.as_ref()) else {
            return Ok(());
        };
        match command_name(text) {
            Some("start") => {
                if self.allowed(msg.chat.id, from.id)? {
                    self.sender.send_menu(
                        msg.chat.id,
                        REPORT_TYPE_PROMPT,
                        &[(self.report.title.as_str(), PERIODS_CALLBACK)],
                    )?;
                }
            }
            Some("myid") => {
                let text = format!("🆔 Ваш Telegram ID: `{}`", from.id);
                self.sender.send_markdown(msg.chat.id, &text)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn on_callback(&self, cb: &CallbackQuery, today: NaiveDate) -> Result<()> {
        let (Some(data), Some(msg)) = (cb.data.as_deref(), cb.message.as_ref()) else {
            return Ok(());
        };
        let chat_id = msg.chat.id;

        if data.starts_with(PERIODS_CALLBACK) {
            if self.allowed(chat_id, cb.from.id)? {
                let periods = [Period::Week, Period::Month, Period::All];
                let callbacks: Vec<String> = periods.iter().map(|p| p.callback_data()).collect();
                let buttons: Vec<(&str, &str)> = periods
                    .iter()
                    .zip(&callbacks)
                    .map(|(p, d)| (period_label(*p), d.as_str()))
                    .collect();
                self.sender.send_menu(chat_id, PERIOD_PROMPT, &buttons)?;
            }
        } else if let Some(period) = Period::from_callback(data) {
            let sent = send_report(self.sender, self.access, chat_id, cb.from.id, || {
                Ok(build_report(self.source, period, today, self.report))
            });
            match sent {
                Ok(outcome) => {
                    tracing::info!(chat_id, period = %outcome.period, "report sent");
                }
                Err(err) if err.is::<AccessDenied>() => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn allowed(&self, chat_id: i64, user_id: i64) -> Result<bool> {
        match guard(self.sender, self.access, chat_id, user_id) {
            Ok(()) => Ok(true),
            Err(err) if err.is::<AccessDenied>() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// `/start@my_bot now` -> `start`.
fn command_name(text: &str) -> Option<&str> {
    let word = text.split_whitespace().next()?.strip_prefix('/')?;
    Some(word.split_once('@').map_or(word, |(cmd, _)| cmd))
}

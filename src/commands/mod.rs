// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod bot;
pub mod doctor;
pub mod report;

use anyhow::{Context, Result};

use crate::config::{Config, TelegramConfig};
use crate::source::{CsvSource, RowSource, SheetsSource};
use crate::utils::http_client;

/// `--csv PATH` when given, otherwise the configured spreadsheet.
pub fn open_source(cfg: &Config, m: &clap::ArgMatches) -> Result<Box<dyn RowSource>> {
    if let Some(path) = m.get_one::<String>("csv") {
        return Ok(Box::new(CsvSource::new(path.trim())));
    }
    let sheets = cfg
        .sheets
        .as_ref()
        .context("No data source: pass --csv PATH or add a [sheets] section to the config")?;
    Ok(Box::new(SheetsSource::new(http_client()?, sheets)?))
}

pub fn telegram_config(cfg: &Config) -> Result<&TelegramConfig> {
    cfg.telegram
        .as_ref()
        .filter(|t| !t.token.is_empty())
        .context("The bot needs a [telegram] token in the config or SALESCLIP_TELEGRAM_TOKEN")
}

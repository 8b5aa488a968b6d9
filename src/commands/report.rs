// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::access::{ACCESS_DENIED_MESSAGE, AccessList};
use crate::config::{Config, ReportConfig};
use crate::messenger::MessageSender;
use crate::models::ReportSummary;
use crate::period::Period;
use crate::records::{ParsedRows, parse_rows};
use crate::report::{aggregate_with, filter_by_date, format_report_titled};
use crate::source::RowSource;
use crate::utils::{maybe_print_json, parse_date};

#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    pub period: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub summary: ReportSummary,
    pub skipped_rows: usize,
    #[serde(skip)]
    pub text: String,
}

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let outcome = query_report(cfg, m)?;
    if !maybe_print_json(m.get_flag("json"), &outcome)? {
        print!("{}", outcome.text);
    }
    Ok(())
}

pub fn query_report(cfg: &Config, m: &clap::ArgMatches) -> Result<ReportOutcome> {
    let period = match m.get_one::<String>("period") {
        Some(raw) => raw.parse::<Period>()?,
        None => Period::Week,
    };
    let today = match m.get_one::<String>("today") {
        Some(raw) => parse_date(raw.trim())?,
        None => Local::now().date_naive(),
    };
    let source = super::open_source(cfg, m)?;
    Ok(build_report(source.as_ref(), period, today, &cfg.report))
}

/// Fetch and parse rows, dropping the header. A failed fetch is logged and
/// yields no records so the report still renders with zero totals.
pub fn load_records(source: &dyn RowSource) -> ParsedRows {
    let rows = match source.fetch_rows() {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch sales rows");
            return ParsedRows::default();
        }
    };
    let data = rows.get(1..).unwrap_or_default();
    let parsed = parse_rows(data);
    tracing::debug!(
        rows = data.len(),
        records = parsed.records.len(),
        "parsed sales rows"
    );
    if !parsed.skipped.is_empty() {
        tracing::warn!(count = parsed.skipped.len(), "skipped unusable rows");
        for s in &parsed.skipped {
            tracing::debug!(row = s.index + 2, reason = %s.reason, "skipped row");
        }
    }
    parsed
}

pub fn build_report(
    source: &dyn RowSource,
    period: Period,
    today: NaiveDate,
    report_cfg: &ReportConfig,
) -> ReportOutcome {
    let parsed = load_records(source);
    let (start, end) = period.resolve(today, &parsed.records);
    let in_range = filter_by_date(&parsed.records, Some(start), Some(end));
    let summary = aggregate_with(&in_range, &report_cfg.channel_labels());
    ReportOutcome {
        period: period.to_string(),
        start,
        end,
        summary,
        skipped_rows: parsed.skipped.len(),
        text: format_report_titled(&report_cfg.title, start, end, &summary),
    }
}

/// Allow-list check for a chat request. Denied users get a fixed reply in
/// the chat and the call fails with `AccessDenied`.
pub fn guard<S: MessageSender + ?Sized>(
    sender: &S,
    access: &AccessList,
    chat_id: i64,
    user_id: i64,
) -> Result<()> {
    if let Err(denied) = access.check(user_id) {
        tracing::warn!(user_id, chat_id, "access denied");
        sender.send_message(chat_id, ACCESS_DENIED_MESSAGE)?;
        return Err(denied.into());
    }
    Ok(())
}

/// Guarded delivery: the user is checked before the report is built.
pub fn send_report<S: MessageSender + ?Sized>(
    sender: &S,
    access: &AccessList,
    chat_id: i64,
    user_id: i64,
    build: impl FnOnce() -> Result<ReportOutcome>,
) -> Result<ReportOutcome> {
    guard(sender, access, chat_id, user_id)?;
    let outcome = build()?;
    sender.send_message(chat_id, &outcome.text)?;
    Ok(outcome)
}

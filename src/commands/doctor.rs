// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::models::{ChannelLabels, Row};
use crate::records::{SkipReason, parse_row_checked};
use crate::utils::pretty_table;

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// 1-based sheet row, header included.
    pub row: usize,
    pub kind: &'static str,
    pub detail: String,
}

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let source = super::open_source(cfg, m)?;
    let rows = source.fetch_rows().context("Fetch sales rows")?;
    let issues = diagnose(&rows, &cfg.report.channel_labels());

    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let data = issues
            .into_iter()
            .map(|i| vec![i.row.to_string(), i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Row", "Issue", "Detail"], data));
    }
    Ok(())
}

/// Rows the report drops, plus rows whose channel only counts towards the
/// overall totals. `rows` includes the header.
pub fn diagnose(rows: &[Row], labels: &ChannelLabels) -> Vec<Issue> {
    let data = rows.get(1..).unwrap_or_default();
    let mut issues = Vec::new();
    for (index, row) in data.iter().enumerate() {
        let row_no = index + 2;
        match parse_row_checked(row) {
            Err(reason) => issues.push(Issue {
                row: row_no,
                kind: match reason {
                    SkipReason::TooFewCells { .. } => "too_few_cells",
                    SkipReason::BadDate { .. } => "bad_date",
                },
                detail: reason.to_string(),
            }),
            Ok(rec) if rec.channel != labels.online && rec.channel != labels.partner => {
                issues.push(Issue {
                    row: row_no,
                    kind: "unknown_channel",
                    detail: format!("'{}' counts only towards overall totals", rec.channel),
                })
            }
            Ok(_) => {}
        }
    }
    issues
}

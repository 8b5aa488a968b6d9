// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{Days, NaiveDate};

use crate::models::SalesRecord;

/// Report window presets, all ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    All,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::All => "all",
        }
    }

    /// Period for a `report_*` menu button. Unrecognised suffixes mean `All`.
    pub fn from_callback(data: &str) -> Option<Self> {
        let rest = data.strip_prefix("report_")?;
        Some(match rest {
            "week" => Period::Week,
            "month" => Period::Month,
            _ => Period::All,
        })
    }

    pub fn callback_data(self) -> String {
        format!("report_{}", self.as_str())
    }

    /// Inclusive `(start, end)` window. `All` starts at the earliest record
    /// date, or today when there are no records.
    pub fn resolve(self, today: NaiveDate, records: &[SalesRecord]) -> (NaiveDate, NaiveDate) {
        let start = match self {
            Period::Week => days_before(today, 7),
            Period::Month => days_before(today, 30),
            Period::All => records.iter().map(|r| r.date).min().unwrap_or(today),
        };
        (start, today)
    }
}

fn days_before(d: NaiveDate, n: u64) -> NaiveDate {
    d.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "all" => Ok(Period::All),
            other => Err(anyhow!("Unknown period '{}' (use week|month|all)", other)),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

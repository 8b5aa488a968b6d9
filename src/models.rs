// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single raw cell as delivered by a row source.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Blank,
}

pub type Row = Vec<CellValue>;

impl CellValue {
    /// Verbatim text of the cell; numbers use the report's float rendering.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => crate::utils::fmt_float(*n),
            CellValue::Blank => String::new(),
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Number(n) => n.as_f64().map_or(CellValue::Blank, CellValue::Number),
            serde_json::Value::String(s) => CellValue::Text(s),
            _ => CellValue::Blank,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub units: f64,
    pub sales_amount: f64,
    pub channel: String,
    pub expense: f64,
    pub margin: f64, // percentage points, 10% => 10.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_units: f64,
    pub total_sales: f64,
    pub total_online_sales: f64,
    pub total_partner_sales: f64,
    pub total_expense: f64,
    pub avg_margin: f64,
    pub avg_online_margin: f64,
    pub avg_partner_margin: f64,
}

/// Channel values that get their own totals. Matched by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelLabels {
    pub online: String,
    pub partner: String,
}

impl Default for ChannelLabels {
    fn default() -> Self {
        Self {
            online: "Online".to_string(),
            partner: "Partner".to_string(),
        }
    }
}

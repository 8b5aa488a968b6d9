// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::CellValue;

const UA: &str = concat!(
    "salesclip/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/salesclip)"
);

/// Date layout used by the sales sheet, e.g. `05.03.2024`.
pub const SHEET_DATE_FORMAT: &str = "%d.%m.%Y";

// chrono alone accepts padding, signs and short years; the sheet never has them.
static SHEET_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,2}\.[0-9]{1,2}\.[0-9]{4}$").expect("valid date pattern"));

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_sheet_date(s: &str) -> Option<NaiveDate> {
    if !SHEET_DATE_RE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, SHEET_DATE_FORMAT).ok()
}

pub fn fmt_sheet_date(d: NaiveDate) -> String {
    d.format(SHEET_DATE_FORMAT).to_string()
}

/// Convert a raw cell into a number. Anything that does not parse becomes 0.0.
pub fn normalize_number(value: &CellValue) -> f64 {
    match value {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => normalize_str(s),
        CellValue::Blank => 0.0,
    }
}

/// Parse a locale-formatted number such as `1 234,50` or `12,5%`.
///
/// No-break spaces are dropped wherever they appear (sheets use them as
/// thousands separators), a trailing percent sign is removed without scaling
/// (`10%` is `10.0`), commas are read as decimal points and `_` digit
/// grouping (`1_000`) is accepted.
pub fn normalize_str(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\u{00A0}' | '\u{202F}'))
        .collect();
    let mut s = cleaned.trim();
    if s.ends_with('%') {
        s = s.trim_end_matches('%').trim();
    }
    let dotted = s.replace(',', ".");
    strip_digit_groups(&dotted)
        .and_then(|n| n.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Drop `_` separators, which are only valid between two digits.
fn strip_digit_groups(s: &str) -> Option<String> {
    if !s.contains('_') {
        return Some(s.to_string());
    }
    let chars: Vec<char> = s.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if *c != '_' {
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j));
        let after = chars.get(i + 1);
        if !before.is_some_and(char::is_ascii_digit) || !after.is_some_and(char::is_ascii_digit) {
            return None;
        }
    }
    Some(chars.into_iter().filter(|c| *c != '_').collect())
}

/// Render a float the way report consumers expect: shortest round-trip
/// digits, always with a fractional part, and exponent form outside
/// `[1e-4, 1e16)`.
pub fn fmt_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let abs = v.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{:e}", v);
        if let Some((mantissa, exp)) = sci.split_once('e') {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            return format!("{}e{}{:02}", mantissa, sign, exp.abs());
        }
        return sci;
    }
    let s = format!("{}", v);
    if s.contains('.') { s } else { format!("{}.0", s) }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}

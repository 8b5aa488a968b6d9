// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turning raw sheet rows into [`SalesRecord`]s.
//!
//! Column order: date, units, sales amount, channel, expense, margin.
//! Only the date is mandatory; bad numeric cells read as 0.0.

use thiserror::Error;

use crate::models::{CellValue, Row, SalesRecord};
use crate::utils::{normalize_number, parse_sheet_date};

pub const MIN_CELLS: usize = 6;

/// Why a row was left out of the record set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("row has {found} cells, expected at least {min}")]
    TooFewCells { found: usize, min: usize },
    #[error("date '{raw}' is not DD.MM.YYYY")]
    BadDate { raw: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// Zero-based position in the slice handed to [`parse_rows`].
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRows {
    pub records: Vec<SalesRecord>,
    pub skipped: Vec<SkippedRow>,
}

pub fn parse_row(cells: &[CellValue]) -> Option<SalesRecord> {
    parse_row_checked(cells).ok()
}

pub fn parse_row_checked(cells: &[CellValue]) -> Result<SalesRecord, SkipReason> {
    if cells.len() < MIN_CELLS {
        return Err(SkipReason::TooFewCells {
            found: cells.len(),
            min: MIN_CELLS,
        });
    }
    let date = match &cells[0] {
        CellValue::Text(raw) => {
            parse_sheet_date(raw).ok_or_else(|| SkipReason::BadDate { raw: raw.clone() })?
        }
        other => {
            return Err(SkipReason::BadDate {
                raw: other.to_text(),
            });
        }
    };
    Ok(SalesRecord {
        date,
        units: normalize_number(&cells[1]),
        sales_amount: normalize_number(&cells[2]),
        channel: cells[3].to_text(),
        expense: normalize_number(&cells[4]),
        margin: normalize_number(&cells[5]),
    })
}

/// Parse data rows (header already removed), keeping a note of every drop.
pub fn parse_rows(rows: &[Row]) -> ParsedRows {
    let mut out = ParsedRows::default();
    for (index, row) in rows.iter().enumerate() {
        match parse_row_checked(row) {
            Ok(rec) => out.records.push(rec),
            Err(reason) => out.skipped.push(SkippedRow { index, reason }),
        }
    }
    out
}

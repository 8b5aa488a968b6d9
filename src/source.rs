// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Where raw sales rows come from. Every source returns the header row too;
//! callers drop it before parsing.

use std::path::PathBuf;

use csv::ReaderBuilder;
use reqwest::Url;
use serde::Deserialize;

use crate::auth::{ServiceAccountAuth, ServiceAccountKey};
use crate::config::SheetsConfig;
use crate::error::{Result, SalesclipError};
use crate::models::{CellValue, Row};

const SHEETS_API: &str = "https://sheets.googleapis.com";

pub trait RowSource {
    fn fetch_rows(&self) -> Result<Vec<Row>>;
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

enum SheetsAuth {
    ServiceAccount(ServiceAccountAuth),
    ApiKey(String),
    Anonymous,
}

/// Reads a range of a Google spreadsheet via the Sheets v4 values API.
///
/// A service-account key file is preferred; an API key only reaches sheets
/// shared publicly.
pub struct SheetsSource {
    client: reqwest::blocking::Client,
    spreadsheet_id: String,
    range: String,
    auth: SheetsAuth,
}

impl SheetsSource {
    pub fn new(client: reqwest::blocking::Client, cfg: &SheetsConfig) -> Result<Self> {
        let auth = match (&cfg.credentials_file, &cfg.api_key) {
            (Some(path), _) => {
                let key = ServiceAccountKey::from_file(path)?;
                SheetsAuth::ServiceAccount(ServiceAccountAuth::new(client.clone(), key))
            }
            (None, Some(key)) => SheetsAuth::ApiKey(key.clone()),
            (None, None) => SheetsAuth::Anonymous,
        };
        Ok(Self {
            client,
            spreadsheet_id: cfg.spreadsheet_id.clone(),
            range: cfg.range.clone(),
            auth,
        })
    }

    pub fn auth_mode(&self) -> &'static str {
        match self.auth {
            SheetsAuth::ServiceAccount(_) => "service_account",
            SheetsAuth::ApiKey(_) => "api_key",
            SheetsAuth::Anonymous => "anonymous",
        }
    }

    pub fn values_url(&self) -> Result<Url> {
        let mut url = Url::parse(SHEETS_API)
            .map_err(|e| SalesclipError::Config(format!("Invalid Sheets API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SalesclipError::Config("Sheets API URL cannot be a base".into()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                self.range.as_str(),
            ]);
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("valueRenderOption", "FORMATTED_VALUE");
            q.append_pair("dateTimeRenderOption", "FORMATTED_STRING");
            if let SheetsAuth::ApiKey(key) = &self.auth {
                q.append_pair("key", key);
            }
        }
        Ok(url)
    }
}

impl RowSource for SheetsSource {
    fn fetch_rows(&self) -> Result<Vec<Row>> {
        let url = self.values_url()?;
        tracing::debug!(
            spreadsheet = %self.spreadsheet_id,
            range = %self.range,
            auth = self.auth_mode(),
            "fetching sheet values"
        );
        let mut req = self.client.get(url);
        if let SheetsAuth::ServiceAccount(sa) = &self.auth {
            req = req.bearer_auth(sa.access_token()?);
        }
        let body = req.send()?.error_for_status()?.text()?;
        let vr: ValueRange = serde_json::from_str(&body)?;
        Ok(vr
            .values
            .into_iter()
            .map(|row| row.into_iter().map(CellValue::from).collect())
            .collect())
    }
}

/// A CSV export of the sales sheet. Every field is read as text.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for CsvSource {
    fn fetch_rows(&self) -> Result<Vec<Row>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;
        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            rows.push(rec.iter().map(CellValue::from).collect());
        }
        Ok(rows)
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::io::Write;

use chrono::NaiveDate;
use salesclip::access::{ACCESS_DENIED_MESSAGE, AccessDenied, AccessList};
use salesclip::cli;
use salesclip::commands::{doctor, report};
use salesclip::config::{Config, ReportConfig};
use salesclip::error::{Result as SalesResult, SalesclipError};
use salesclip::messenger::MessageSender;
use salesclip::models::{CellValue, ChannelLabels, ReportSummary, Row};
use salesclip::period::Period;
use salesclip::source::RowSource;
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn row(cells: &[&str]) -> Row {
    cells.iter().map(|c| CellValue::from(*c)).collect()
}

struct FixedRows(Vec<Row>);

impl RowSource for FixedRows {
    fn fetch_rows(&self) -> SalesResult<Vec<Row>> {
        Ok(self.0.clone())
    }
}

struct Unreachable;

impl RowSource for Unreachable {
    fn fetch_rows(&self) -> SalesResult<Vec<Row>> {
        Err(SalesclipError::Config("sheet unreachable".into()))
    }
}

#[derive(Default)]
struct RecordingSender {
    sent: RefCell<Vec<(i64, String)>>,
}

impl MessageSender for RecordingSender {
    fn send_message(&self, chat_id: i64, text: &str) -> SalesResult<()> {
        self.sent.borrow_mut().push((chat_id, text.to_string()));
        Ok(())
    }

    fn send_markdown(&self, chat_id: i64, text: &str) -> SalesResult<()> {
        self.send_message(chat_id, text)
    }

    fn send_menu(&self, chat_id: i64, text: &str, _buttons: &[(&str, &str)]) -> SalesResult<()> {
        self.send_message(chat_id, text)
    }
}

fn two_week_sheet() -> Vec<Row> {
    vec![
        row(&["Дата", "Батони", "Продажі", "Тип", "Витрати", "Маржа"]),
        row(&["10.03.2024", "10", "1\u{00A0}500,50", "Online", "100", "12%"]),
        row(&["14.03.2024", "4", "800", "Partner", "50,5", "20%"]),
        row(&["01.03.2024", "7", "900", "Online", "60", "10%"]),
        row(&["31.02.2024", "3", "300", "Online", "10", "5%"]),
    ]
}

#[test]
fn week_report_drops_bad_rows_and_old_rows() {
    let source = FixedRows(two_week_sheet());
    let out = report::build_report(
        &source,
        Period::Week,
        d(2024, 3, 15),
        &ReportConfig::default(),
    );
    assert_eq!(out.start, d(2024, 3, 8));
    assert_eq!(out.end, d(2024, 3, 15));
    assert_eq!(out.skipped_rows, 1);
    let s = out.summary;
    assert_eq!(s.total_units, 14.0);
    assert_eq!(s.total_sales, 1500.5 + 800.0);
    assert_eq!(s.total_online_sales, 1500.5);
    assert_eq!(s.total_partner_sales, 800.0);
    assert_eq!(s.total_expense, 150.5);
    assert_eq!(s.avg_margin, 16.0);
    assert_eq!(s.avg_online_margin, 12.0);
    assert_eq!(s.avg_partner_margin, 20.0);
    assert!(out.text.starts_with("📊 Звіт Чіназес за 08.03.2024–15.03.2024\n\n"));
    assert!(out.text.contains("🔹 Сума продажів: 2300.5\n"));
}

#[test]
fn all_period_starts_at_first_sale() {
    let source = FixedRows(two_week_sheet());
    let out = report::build_report(
        &source,
        Period::All,
        d(2024, 3, 15),
        &ReportConfig::default(),
    );
    assert_eq!(out.start, d(2024, 3, 1));
    assert_eq!(out.summary.total_units, 21.0);
}

#[test]
fn fetch_failure_yields_zero_report() {
    let out = report::build_report(
        &Unreachable,
        Period::All,
        d(2024, 3, 15),
        &ReportConfig::default(),
    );
    assert_eq!(out.start, d(2024, 3, 15));
    assert_eq!(out.end, d(2024, 3, 15));
    assert_eq!(out.summary, ReportSummary::default());
    assert!(out.text.contains("📈 Середня маржа: 0.00%\n"));
}

#[test]
fn header_only_sheet_has_no_records() {
    let header = row(&["Дата", "a", "b", "c", "d", "e"]);
    let parsed = report::load_records(&FixedRows(vec![header]));
    assert!(parsed.records.is_empty());
    assert!(parsed.skipped.is_empty());
    assert!(report::load_records(&FixedRows(Vec::new())).records.is_empty());
}

#[test]
fn period_presets() {
    let today = d(2024, 3, 31);
    assert_eq!(Period::Week.resolve(today, &[]), (d(2024, 3, 24), today));
    assert_eq!(Period::Month.resolve(today, &[]), (d(2024, 3, 1), today));
    assert_eq!(Period::All.resolve(today, &[]), (today, today));
    assert_eq!("MONTH".parse::<Period>().unwrap(), Period::Month);
    assert!("year".parse::<Period>().is_err());
}

#[test]
fn cli_report_reads_csv_export() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,units,sales,channel,expense,margin\n\
         10.03.2024,10,\"1\u{00A0}500,50\",Online,100,12%\n\
         14.03.2024,4,800,Partner,\"50,5\",20%\n\
         01.03.2024,7,900,Online,60,10%\n\
         31.02.2024,3,300,Online,10,5%"
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let matches = cli::build_cli().get_matches_from([
        "salesclip", "report", "--csv", &path, "--today", "2024-03-15",
    ]);
    let Some(("report", sub)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    let out = report::query_report(&Config::default(), sub).unwrap();
    assert_eq!(out.period, "week");
    assert_eq!(out.skipped_rows, 1);
    assert_eq!(out.summary.total_sales, 2300.5);
    assert_eq!(out.summary.total_expense, 150.5);
}

#[test]
fn cli_report_without_source_fails() {
    let matches = cli::build_cli().get_matches_from(["salesclip", "report", "--period", "all"]);
    let Some(("report", sub)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    assert!(report::query_report(&Config::default(), sub).is_err());
}

#[test]
fn report_no_longer_takes_chat_or_user() {
    let cli = || cli::build_cli();
    assert!(cli().try_get_matches_from(["salesclip", "report", "--chat", "42"]).is_err());
    assert!(cli().try_get_matches_from(["salesclip", "report", "--user", "42"]).is_err());
}

#[test]
fn bot_subcommand_accepts_csv() {
    let matches = cli::build_cli().get_matches_from(["salesclip", "bot", "--csv", "sales.csv"]);
    let Some(("bot", sub)) = matches.subcommand() else {
        panic!("no bot subcommand");
    };
    assert_eq!(sub.get_one::<String>("csv").map(String::as_str), Some("sales.csv"));
}

#[test]
fn allowed_user_receives_report() {
    let sender = RecordingSender::default();
    let access = AccessList::new([7, 42]);
    let out = report::send_report(&sender, &access, 100, 42, || {
        Ok(report::build_report(
            &FixedRows(two_week_sheet()),
            Period::Week,
            d(2024, 3, 15),
            &ReportConfig::default(),
        ))
    })
    .unwrap();
    let sent = sender.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, 100);
    assert_eq!(sent[0].1, out.text);
}

#[test]
fn denied_user_gets_refusal_and_no_report() {
    let sender = RecordingSender::default();
    let access = AccessList::new([7]);
    let mut built = false;
    let err = report::send_report(&sender, &access, 100, 13, || {
        built = true;
        Ok(report::build_report(
            &Unreachable,
            Period::Week,
            d(2024, 3, 15),
            &ReportConfig::default(),
        ))
    })
    .unwrap_err();
    assert!(!built);
    assert_eq!(err.downcast_ref::<AccessDenied>(), Some(&AccessDenied(13)));
    assert_eq!(
        *sender.sent.borrow(),
        vec![(100, ACCESS_DENIED_MESSAGE.to_string())]
    );
}

#[test]
fn doctor_lists_dropped_rows_and_unknown_channels() {
    let mut rows = two_week_sheet();
    rows.push(row(&["15.03.2024", "1", "10", "Wholesale", "0", "1%"]));
    rows.push(row(&["16.03.2024", "1"]));
    let issues = doctor::diagnose(&rows, &ChannelLabels::default());
    let summary: Vec<(usize, &str)> = issues.iter().map(|i| (i.row, i.kind)).collect();
    assert_eq!(
        summary,
        vec![(5, "bad_date"), (6, "unknown_channel"), (7, "too_few_cells")]
    );
    assert!(issues[2].detail.contains("2 cells"));
}

#[test]
fn config_from_toml() {
    let cfg = Config::from_toml_str(
        r#"
        [sheets]
        spreadsheet_id = "abc123"

        [telegram]
        token = "t0k"
        whitelist = [1, 2, 3]

        [report]
        online_label = "Онлайн"
        partner_label = "ФОП"
        "#,
    )
    .unwrap();
    let sheets = cfg.sheets.unwrap();
    assert_eq!(sheets.spreadsheet_id, "abc123");
    assert_eq!(sheets.range, "Sheet1!A:F");
    assert!(sheets.api_key.is_none());
    assert_eq!(cfg.telegram.unwrap().whitelist, vec![1, 2, 3]);
    assert_eq!(cfg.report.title, "Чіназес");
    assert_eq!(
        cfg.report.channel_labels(),
        ChannelLabels {
            online: "Онлайн".into(),
            partner: "ФОП".into()
        }
    );
}

#[test]
fn empty_config_uses_defaults() {
    let cfg = Config::from_toml_str("").unwrap();
    assert!(cfg.sheets.is_none());
    assert!(cfg.telegram.is_none());
    assert_eq!(cfg.report.channel_labels(), ChannelLabels::default());
    assert!(Config::from_toml_str("[sheets]\nrange = 5").is_err());
}

#[test]
fn logging_file_and_credentials_from_toml() {
    let cfg = Config::from_toml_str(
        r#"
        [sheets]
        spreadsheet_id = "abc123"
        credentials_file = "/etc/salesclip/sa.json"

        [logging]
        file = "logs/bot.log"
        "#,
    )
    .unwrap();
    assert_eq!(
        cfg.logging.file.as_deref(),
        Some(std::path::Path::new("logs/bot.log"))
    );
    let sheets = cfg.sheets.unwrap();
    assert_eq!(
        sheets.credentials_file.as_deref(),
        Some(std::path::Path::new("/etc/salesclip/sa.json"))
    );
    assert!(Config::from_toml_str("").unwrap().logging.file.is_none());
}

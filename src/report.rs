// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;

use crate::models::{ChannelLabels, ReportSummary, SalesRecord};
use crate::utils::{fmt_float, fmt_sheet_date};

pub const DEFAULT_TITLE: &str = "Чіназес";

/// Keep records dated within `[start, end]`. A missing bound is open.
pub fn filter_by_date(
    records: &[SalesRecord],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<SalesRecord> {
    records
        .iter()
        .filter(|r| start.is_none_or(|s| r.date >= s) && end.is_none_or(|e| r.date <= e))
        .cloned()
        .collect()
}

#[derive(Debug, Default, Clone, Copy)]
struct MarginMean {
    sum: f64,
    count: usize,
}

impl MarginMean {
    fn push(&mut self, margin: f64) {
        self.sum += margin;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

pub fn aggregate(records: &[SalesRecord]) -> ReportSummary {
    aggregate_with(records, &ChannelLabels::default())
}

/// Totals over every record plus online/partner subsets. Labels other than
/// the two configured ones count towards the overall figures only.
pub fn aggregate_with(records: &[SalesRecord], labels: &ChannelLabels) -> ReportSummary {
    let mut s = ReportSummary::default();
    let mut all = MarginMean::default();
    let mut online = MarginMean::default();
    let mut partner = MarginMean::default();

    for r in records {
        s.total_units += r.units;
        s.total_sales += r.sales_amount;
        s.total_expense += r.expense;
        all.push(r.margin);
        if r.channel == labels.online {
            s.total_online_sales += r.sales_amount;
            online.push(r.margin);
        } else if r.channel == labels.partner {
            s.total_partner_sales += r.sales_amount;
            partner.push(r.margin);
        }
    }

    s.avg_margin = all.mean();
    s.avg_online_margin = online.mean();
    s.avg_partner_margin = partner.mean();
    s
}

pub fn format_report(start: NaiveDate, end: NaiveDate, summary: &ReportSummary) -> String {
    format_report_titled(DEFAULT_TITLE, start, end, summary)
}

pub fn format_report_titled(
    title: &str,
    start: NaiveDate,
    end: NaiveDate,
    summary: &ReportSummary,
) -> String {
    let header = format!(
        "📊 Звіт {} за {}–{}\n\n",
        title,
        fmt_sheet_date(start),
        fmt_sheet_date(end)
    );
    // Margins are fixed at two decimals; every other figure uses fmt_float.
    let body = format!(
        "🔹 Батонів продано: {}\n\
         🔹 Сума продажів: {}\n\n\
         💳 ФОП-онлайн: {}\n\
         🤝 ФОП-ФОП: {}\n\n\
         💸 Витрати: {}\n\n\
         📈 Середня маржа: {:.2}%\n\
         - Онлайн: {:.2}%\n\
         - ФОП: {:.2}%\n",
        fmt_float(summary.total_units),
        fmt_float(summary.total_sales),
        fmt_float(summary.total_online_sales),
        fmt_float(summary.total_partner_sales),
        fmt_float(summary.total_expense),
        summary.avg_margin,
        summary.avg_online_margin,
        summary.avg_partner_margin,
    );
    header + &body
}

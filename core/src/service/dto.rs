use crate::model::summary::{MonthlySummary, PartUsage, YearlySummary};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Display-ready summary of one period. Rounding happens here and nowhere upstream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub period: String, // "2023" or "Feb 2023"
    pub total: String,
    pub change: String,
    pub top_parts: Vec<String>,
    pub record_count: usize,
}

impl SummaryCard {
    pub fn from_year(summary: &YearlySummary, top: usize) -> Self {
        Self {
            period: summary.year.to_string(),
            total: format_cost(summary.total_cost),
            change: format_change(summary.yoy_change_percent),
            top_parts: summary.top(top).iter().map(format_part).collect(),
            record_count: summary.record_count,
        }
    }

    pub fn from_month(year: i32, summary: &MonthlySummary, top: usize) -> Self {
        let period = NaiveDate::from_ymd_opt(year, summary.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{:04}-{:02}", year, summary.month));
        Self {
            period,
            total: format_cost(summary.total_cost),
            change: format_change(summary.mom_change_percent),
            top_parts: summary.top(top).iter().map(format_part).collect(),
            record_count: summary.record_count,
        }
    }
}

pub fn format_cost(cost: Decimal) -> String {
    format!("{:.2}", cost.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// `+12.3%`, `-4.0%`, or `n/a` when there is no baseline.
pub fn format_change(change: Option<Decimal>) -> String {
    match change {
        None => "n/a".to_string(),
        Some(pct) => {
            let rounded = pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            if rounded.is_zero() {
                "0.0%".to_string()
            } else if rounded > Decimal::ZERO {
                format!("+{:.1}%", rounded)
            } else {
                format!("{:.1}%", rounded)
            }
        }
    }
}

pub fn format_part(part: &PartUsage) -> String {
    format!("{} ×{}", part.part_name, part.count)
}

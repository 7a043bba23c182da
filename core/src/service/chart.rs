use crate::model::summary::YearlySummary;
use crate::service::aggregator::Aggregation;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    /// `None` marks a period without records; charts draw a gap, not a zero bar.
    pub value: Option<Decimal>,
}

impl ChartPoint {
    /// Integer bar height in `scale` steps per currency unit. Saturates at `u64::MAX`.
    pub fn bar_height(&self, scale: u64) -> u64 {
        let Some(value) = self.value else {
            return 0;
        };
        if value <= Decimal::ZERO {
            return 0;
        }
        value
            .checked_mul(Decimal::from(scale))
            .and_then(|v| v.trunc().to_u64())
            .unwrap_or(u64::MAX)
    }
}

/// Twelve points, January to December, for one year.
pub fn monthly_series(year: &YearlySummary) -> Vec<ChartPoint> {
    (1..=12)
        .map(|month| ChartPoint {
            label: month_label(year.year, month),
            value: year.month(month).map(|m| m.total_cost),
        })
        .collect()
}

/// One point per year present in the aggregation.
pub fn yearly_series(aggregation: &Aggregation) -> Vec<ChartPoint> {
    aggregation
        .iter()
        .map(|(year, summary)| ChartPoint {
            label: year.to_string(),
            value: Some(summary.total_cost),
        })
        .collect()
}

pub fn peak(points: &[ChartPoint]) -> Option<Decimal> {
    points.iter().filter_map(|p| p.value).max()
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b").to_string())
        .unwrap_or_else(|| format!("{:02}", month))
}

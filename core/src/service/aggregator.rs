use crate::error::{SkipReason, SkippedRecord};
use crate::model::maintenance::{Cost, MaintenanceRecord};
use crate::model::summary::{MonthlySummary, YearlySummary};
use crate::service::ranking::PartTally;
use crate::time::parse_record_date;
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Year -> month summary of a set of maintenance records.
///
/// Only periods with at least one valid record are present. Records that
/// could not be placed are listed in `skipped` instead of failing the run.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub years: BTreeMap<i32, YearlySummary>,
    pub skipped: Vec<SkippedRecord>,
}

impl Aggregation {
    /// Years in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &YearlySummary)> {
        self.years.iter().map(|(year, summary)| (*year, summary))
    }

    pub fn year(&self, year: i32) -> Option<&YearlySummary> {
        self.years.get(&year)
    }

    pub fn latest_year(&self) -> Option<&YearlySummary> {
        self.years.values().next_back()
    }

    pub fn grand_total(&self) -> Decimal {
        self.years
            .values()
            .fold(Decimal::ZERO, |acc, y| acc.saturating_add(y.total_cost))
    }

    pub fn record_count(&self) -> usize {
        self.years.values().map(|y| y.record_count).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[derive(Default)]
struct MonthBucket {
    total: Decimal,
    count: usize,
    parts: PartTally,
}

/// Builds the yearly/monthly summary for `records`.
///
/// Pure: the input is only read and a fresh structure is returned. Dates
/// that do not parse, costs that are not amounts or are negative, and costs
/// that would overflow their year's total are skipped and reported.
pub fn aggregate(records: &[MaintenanceRecord]) -> Aggregation {
    let mut skipped = Vec::new();
    // Input order is preserved inside each year so part ties resolve by encounter.
    let mut by_year: BTreeMap<i32, Vec<Entry>> = BTreeMap::new();
    // Month and part sums never exceed their year's running total.
    let mut year_totals: HashMap<i32, Decimal> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let checked = validate(record).and_then(|(year, month, cost)| {
            let total = year_totals.entry(year).or_insert(Decimal::ZERO);
            *total = total.checked_add(cost).ok_or(SkipReason::CostOverflow(cost))?;
            Ok((year, month, cost))
        });
        match checked {
            Ok((year, month, cost)) => by_year.entry(year).or_default().push(Entry {
                month,
                cost,
                part_name: &record.part_name,
            }),
            Err(reason) => {
                tracing::debug!(index, record_id = %record.id, %reason, "skipping maintenance record");
                skipped.push(SkippedRecord {
                    index,
                    record_id: record.id,
                    reason,
                });
            }
        }
    }

    let mut years: BTreeMap<i32, YearlySummary> = BTreeMap::new();
    for (year, entries) in by_year {
        years.insert(year, summarize_year(year, &entries));
    }

    // YoY needs every yearly total first.
    let totals: BTreeMap<i32, Decimal> = years.iter().map(|(y, s)| (*y, s.total_cost)).collect();
    for (year, summary) in years.iter_mut() {
        let previous = totals.get(&(year - 1)).copied();
        summary.yoy_change_percent = change_percent(summary.total_cost, previous);
    }

    Aggregation { years, skipped }
}

/// A record that passed validation, placed in its month.
struct Entry<'a> {
    month: u32,
    cost: Decimal,
    part_name: &'a str,
}

fn validate(record: &MaintenanceRecord) -> Result<(i32, u32, Decimal), SkipReason> {
    let date = parse_record_date(&record.date)
        .map_err(|_| SkipReason::UnparsableDate(record.date.clone()))?;
    let cost = match &record.cost {
        Cost::Amount(amount) => *amount,
        Cost::Invalid(raw) => return Err(SkipReason::InvalidCost(raw.to_string())),
    };
    if cost < Decimal::ZERO {
        return Err(SkipReason::NegativeCost(cost));
    }
    Ok((date.year(), date.month(), cost))
}

fn summarize_year(year: i32, entries: &[Entry]) -> YearlySummary {
    let mut buckets: BTreeMap<u32, MonthBucket> = BTreeMap::new();
    let mut year_parts = PartTally::new();

    for entry in entries {
        let bucket = buckets.entry(entry.month).or_default();
        bucket.total = bucket.total.saturating_add(entry.cost);
        bucket.count += 1;
        bucket.parts.add(entry.part_name, entry.cost);
        year_parts.add(entry.part_name, entry.cost);
    }

    let month_totals: BTreeMap<u32, Decimal> = buckets.iter().map(|(m, b)| (*m, b.total)).collect();
    let mut months = BTreeMap::new();
    let mut total_cost = Decimal::ZERO;
    let mut record_count = 0;

    for (month, bucket) in buckets {
        // Within the same year only: January never looks back at December.
        let previous = month_totals.get(&(month - 1)).copied();
        total_cost = total_cost.saturating_add(bucket.total);
        record_count += bucket.count;
        months.insert(
            month,
            MonthlySummary {
                month,
                total_cost: bucket.total,
                mom_change_percent: change_percent(bucket.total, previous),
                top_parts: bucket.parts.into_ranked(),
                record_count: bucket.count,
            },
        );
    }

    YearlySummary {
        year,
        total_cost,
        yoy_change_percent: None,
        top_parts: year_parts.into_ranked(),
        months,
        record_count,
    }
}

/// `((current - previous) / previous) * 100`, or `None` without a non-zero baseline.
pub fn change_percent(current: Decimal, previous: Option<Decimal>) -> Option<Decimal> {
    let previous = previous?;
    if previous.is_zero() {
        return None;
    }
    current
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn record(date: &str, cost: i64, part: &str) -> MaintenanceRecord {
        MaintenanceRecord::new(Uuid::nil(), date, Decimal::new(cost, 0), part)
    }

    #[test]
    fn test_oil_filter_brake_pads_scenario() {
        let records = vec![
            record("2023-01-10", 70, "Oil Filter"),
            record("2023-02-15", 170, "Brake Pads"),
            record("2023-02-20", 70, "Oil Filter"),
        ];
        let agg = aggregate(&records);

        assert_eq!(agg.years.len(), 1);
        let y = agg.year(2023).unwrap();
        assert_eq!(y.total_cost, Decimal::new(310, 0));
        assert_eq!(y.yoy_change_percent, None);

        let jan = y.month(1).unwrap();
        assert_eq!(jan.total_cost, Decimal::new(70, 0));
        assert_eq!(jan.mom_change_percent, None);

        let feb = y.month(2).unwrap();
        assert_eq!(feb.total_cost, Decimal::new(240, 0));
        let mom = feb.mom_change_percent.unwrap();
        assert_eq!(mom.round_dp(1), Decimal::new(2429, 1));

        assert_eq!(y.top_parts[0].part_name, "Oil Filter");
        assert_eq!(y.top_parts[0].count, 2);
        assert_eq!(y.top_parts[0].rank, 1);
        assert_eq!(y.top_parts[1].part_name, "Brake Pads");
        assert_eq!(y.top_parts[1].rank, 2);

        // February alone is a count tie, so cost decides.
        assert_eq!(feb.top_parts[0].part_name, "Brake Pads");
    }

    #[test]
    fn test_months_sum_to_year() {
        let records = vec![
            record("2022-03-01", 12, "Bulb"),
            record("2022-03-09", 300, "Battery"),
            record("2022-07-21", 45, "Wiper"),
            record("2022-11-30", 999, "Clutch"),
            record("2023-05-05", 1, "Bulb"),
        ];
        let agg = aggregate(&records);
        for (_, year) in agg.iter() {
            let sum: Decimal = year.months.values().map(|m| m.total_cost).sum();
            assert_eq!(sum, year.total_cost);
            let count: usize = year.months.values().map(|m| m.record_count).sum();
            assert_eq!(count, year.record_count);
        }
        assert_eq!(agg.grand_total(), Decimal::new(1357, 0));
        assert_eq!(agg.record_count(), 5);
    }

    #[test]
    fn test_exact_decimal_sum() {
        let records = vec![
            MaintenanceRecord::new(Uuid::nil(), "2023-04-01", Decimal::new(10, 2), "Fuse"),
            MaintenanceRecord::new(Uuid::nil(), "2023-04-02", Decimal::new(20, 2), "Fuse"),
        ];
        let agg = aggregate(&records);
        assert_eq!(agg.year(2023).unwrap().total_cost, Decimal::new(30, 2));
    }

    #[test]
    fn test_sparse_periods() {
        let records = vec![record("2021-01-15", 10, "A"), record("2023-06-15", 10, "A")];
        let agg = aggregate(&records);

        let years: Vec<i32> = agg.iter().map(|(y, _)| y).collect();
        assert_eq!(years, vec![2021, 2023]);
        assert!(agg.year(2022).is_none());

        let y2023 = agg.year(2023).unwrap();
        assert_eq!(y2023.months.keys().copied().collect::<Vec<_>>(), vec![6]);
        // 2022 is absent, so there is no baseline.
        assert_eq!(y2023.yoy_change_percent, None);
    }

    #[test]
    fn test_yoy_only_for_years_with_predecessor() {
        let records = vec![
            record("2021-02-01", 100, "A"),
            record("2022-02-01", 150, "A"),
            record("2024-02-01", 10, "A"),
        ];
        let agg = aggregate(&records);

        assert_eq!(agg.year(2021).unwrap().yoy_change_percent, None);
        assert_eq!(agg.year(2022).unwrap().yoy_change_percent, Some(Decimal::new(50, 0)));
        assert_eq!(agg.year(2024).unwrap().yoy_change_percent, None);
    }

    #[test]
    fn test_zero_baseline_is_none() {
        let records = vec![
            record("2023-01-05", 0, "Inspection"),
            record("2023-02-05", 50, "Inspection"),
            record("2024-03-05", 50, "Inspection"),
        ];
        let agg = aggregate(&records);
        let y2023 = agg.year(2023).unwrap();
        assert_eq!(y2023.month(1).unwrap().total_cost, Decimal::ZERO);
        assert_eq!(y2023.month(2).unwrap().mom_change_percent, None);
        // Year 2023 totals 50, so 2024 has a baseline.
        assert_eq!(agg.year(2024).unwrap().yoy_change_percent, Some(Decimal::ZERO));
    }

    #[test]
    fn test_mom_does_not_cross_year_boundary() {
        let records = vec![record("2022-12-20", 100, "A"), record("2023-01-03", 200, "A")];
        let agg = aggregate(&records);
        assert_eq!(agg.year(2023).unwrap().month(1).unwrap().mom_change_percent, None);
    }

    #[test]
    fn test_mom_needs_adjacent_month() {
        let records = vec![record("2023-01-10", 100, "A"), record("2023-03-10", 50, "A")];
        let agg = aggregate(&records);
        assert_eq!(agg.year(2023).unwrap().month(3).unwrap().mom_change_percent, None);
    }

    #[test]
    fn test_negative_change() {
        let records = vec![record("2023-05-10", 200, "A"), record("2023-06-10", 50, "A")];
        let agg = aggregate(&records);
        assert_eq!(
            agg.year(2023).unwrap().month(6).unwrap().mom_change_percent,
            Some(Decimal::new(-75, 0))
        );
    }

    #[test]
    fn test_malformed_records_are_skipped_and_counted() {
        let records = vec![
            record("2023-01-10", 70, "Oil Filter"),
            record("not a date", 10, "Oil Filter"),
            record("2023-01-11", -5, "Refund"),
            record("2023-01-12", 30, "Wiper"),
        ];
        let agg = aggregate(&records);

        assert_eq!(agg.skipped_count(), 2);
        assert_eq!(agg.skipped[0].index, 1);
        assert_eq!(agg.skipped[0].reason, SkipReason::UnparsableDate("not a date".to_string()));
        assert_eq!(agg.skipped[1].index, 2);
        assert_eq!(agg.skipped[1].reason, SkipReason::NegativeCost(Decimal::new(-5, 0)));

        let jan = agg.year(2023).unwrap().month(1).unwrap();
        assert_eq!(jan.total_cost, Decimal::new(100, 0));
        assert_eq!(jan.record_count, 2);
    }

    #[test]
    fn test_empty_input() {
        let agg = aggregate(&[]);
        assert!(agg.is_empty());
        assert_eq!(agg.skipped_count(), 0);
        assert!(agg.latest_year().is_none());
        assert_eq!(agg.grand_total(), Decimal::ZERO);
    }

    #[test]
    fn test_input_untouched_and_repeatable() {
        let records = vec![record("2023-01-10", 70, "Oil Filter"), record("bad", 1, "X")];
        let before = records.clone();
        let first = aggregate(&records);
        let second = aggregate(&records);
        assert_eq!(records, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_yearly_parts_are_tallied_over_the_year() {
        // Each month has its own leader, but Tyre wins over the whole year.
        let records = vec![
            record("2023-01-01", 500, "Battery"),
            record("2023-02-01", 80, "Tyre"),
            record("2023-03-01", 80, "Tyre"),
            record("2023-03-02", 900, "Gearbox"),
            record("2023-04-01", 80, "Tyre"),
        ];
        let agg = aggregate(&records);
        let y = agg.year(2023).unwrap();
        assert_eq!(y.top_parts[0].part_name, "Tyre");
        assert_eq!(y.top_parts[0].count, 3);
        assert_eq!(y.month(3).unwrap().top_parts[0].part_name, "Gearbox");

        let ranks: Vec<u32> = y.top_parts.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, (1..=y.top_parts.len() as u32).collect::<Vec<_>>());
        assert_eq!(y.top(2).len(), 2);
        assert_eq!(y.top(10).len(), 3);
    }

    #[test]
    fn test_latest_year() {
        let records = vec![record("2020-01-01", 1, "A"), record("2022-01-01", 1, "A")];
        assert_eq!(aggregate(&records).latest_year().unwrap().year, 2022);
    }

    #[test]
    fn test_zero_cost_previous_year_has_no_yoy() {
        let records = vec![
            record("2023-04-02", 0, "Inspection"),
            record("2023-10-02", 0, "Inspection"),
            record("2024-04-02", 120, "Brake Pads"),
        ];
        let agg = aggregate(&records);
        assert_eq!(agg.year(2023).unwrap().total_cost, Decimal::ZERO);
        assert_eq!(agg.year(2023).unwrap().record_count, 2);
        assert_eq!(agg.year(2024).unwrap().yoy_change_percent, None);
    }

    #[test]
    fn test_non_numeric_cost_is_skipped() {
        let records = vec![
            record("2023-01-10", 70, "Oil Filter"),
            MaintenanceRecord::new(
                Uuid::nil(),
                "2023-01-11",
                Cost::Invalid(serde_json::Value::String("n/a".to_string())),
                "Wiper",
            ),
        ];
        let agg = aggregate(&records);

        assert_eq!(agg.skipped_count(), 1);
        assert_eq!(agg.skipped[0].index, 1);
        assert_eq!(agg.skipped[0].reason, SkipReason::InvalidCost("\"n/a\"".to_string()));
        let jan = agg.year(2023).unwrap().month(1).unwrap();
        assert_eq!(jan.total_cost, Decimal::new(70, 0));
        assert_eq!(jan.record_count, 1);
    }

    #[test]
    fn test_overflowing_cost_is_skipped() {
        let records = vec![
            MaintenanceRecord::new(Uuid::nil(), "2023-01-10", Decimal::MAX, "Engine"),
            MaintenanceRecord::new(Uuid::nil(), "2023-02-10", Decimal::MAX, "Engine"),
            record("2023-03-10", 5, "Bulb"),
        ];
        let agg = aggregate(&records);

        assert_eq!(agg.skipped_count(), 2);
        assert_eq!(agg.skipped[0].index, 1);
        assert_eq!(agg.skipped[0].reason, SkipReason::CostOverflow(Decimal::MAX));
        assert_eq!(agg.skipped[1].reason, SkipReason::CostOverflow(Decimal::new(5, 0)));
        let y = agg.year(2023).unwrap();
        assert_eq!(y.total_cost, Decimal::MAX);
        assert_eq!(y.record_count, 1);
    }

    #[test]
    fn test_grand_total_saturates_across_years() {
        let records = vec![
            MaintenanceRecord::new(Uuid::nil(), "2022-06-01", Decimal::MAX, "Engine"),
            MaintenanceRecord::new(Uuid::nil(), "2023-06-01", Decimal::MAX, "Engine"),
        ];
        let agg = aggregate(&records);
        assert_eq!(agg.skipped_count(), 0);
        assert_eq!(agg.grand_total(), Decimal::MAX);
        assert_eq!(agg.year(2023).unwrap().yoy_change_percent, Some(Decimal::ZERO));
    }
}

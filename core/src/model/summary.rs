use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PartUsage {
    pub part_name: String,
    pub count: u32,
    pub total_cost: Decimal,
    pub rank: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub month: u32,
    pub total_cost: Decimal,
    /// `None` when the previous month of the same year has no records.
    pub mom_change_percent: Option<Decimal>,
    pub top_parts: Vec<PartUsage>,
    pub record_count: usize,
}

impl MonthlySummary {
    pub fn top(&self, n: usize) -> &[PartUsage] {
        &self.top_parts[..n.min(self.top_parts.len())]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct YearlySummary {
    pub year: i32,
    pub total_cost: Decimal,
    /// `None` when the previous calendar year has no records.
    pub yoy_change_percent: Option<Decimal>,
    pub top_parts: Vec<PartUsage>,
    pub months: BTreeMap<u32, MonthlySummary>, // Key: 1..=12, sparse
    pub record_count: usize,
}

impl YearlySummary {
    pub fn month(&self, month: u32) -> Option<&MonthlySummary> {
        self.months.get(&month)
    }

    pub fn top(&self, n: usize) -> &[PartUsage] {
        &self.top_parts[..n.min(self.top_parts.len())]
    }
}

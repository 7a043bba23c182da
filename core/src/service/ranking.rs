use crate::model::summary::PartUsage;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Running per-part tally for one period, kept in first-encounter order.
#[derive(Debug, Default)]
pub struct PartTally {
    index: HashMap<String, usize>,
    parts: Vec<PartUsage>,
}

impl PartTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank part names are ignored; they still count toward period totals upstream.
    pub fn add(&mut self, part_name: &str, cost: Decimal) {
        let name = part_name.trim();
        if name.is_empty() {
            return;
        }
        match self.index.get(name) {
            Some(&i) => {
                let entry = &mut self.parts[i];
                entry.count += 1;
                entry.total_cost = entry.total_cost.saturating_add(cost);
            }
            None => {
                self.index.insert(name.to_string(), self.parts.len());
                self.parts.push(PartUsage {
                    part_name: name.to_string(),
                    count: 1,
                    total_cost: cost,
                    rank: 0,
                });
            }
        }
    }

    /// Ranks by count desc, then cost desc. `sort_by` is stable, so the
    /// remaining ties keep encounter order.
    pub fn into_ranked(self) -> Vec<PartUsage> {
        let mut parts = self.parts;
        parts.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.total_cost.cmp(&a.total_cost))
        });
        for (i, part) in parts.iter_mut().enumerate() {
            part.rank = i as u32 + 1;
        }
        parts
    }
}

pub fn rank_parts<'a, I>(items: I) -> Vec<PartUsage>
where
    I: IntoIterator<Item = (&'a str, Decimal)>,
{
    let mut tally = PartTally::new();
    for (name, cost) in items {
        tally.add(name, cost);
    }
    tally.into_ranked()
}

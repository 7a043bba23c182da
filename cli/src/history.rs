use fleetdash_core::service::dto::{format_cost, SummaryCard};
use fleetdash_core::{Aggregation, YearlySummary};
use tabled::{Table, Tabled};

use crate::tables::print_table;

#[derive(Tabled)]
struct YearRow {
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "YoY")]
    change: String,
    #[tabled(rename = "Records")]
    records: usize,
    #[tabled(rename = "Top parts")]
    parts: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "MoM")]
    change: String,
    #[tabled(rename = "Records")]
    records: usize,
    #[tabled(rename = "Top parts")]
    parts: String,
}

pub fn show_history(title: &str, aggregation: &Aggregation, only_year: Option<i32>, top: usize) {
    println!("\x1b[1;36m{}\x1b[0m (Total: {})", title, format_cost(aggregation.grand_total()));

    if aggregation.skipped_count() > 0 {
        println!(
            "\x1b[33mWarning: {} record(s) skipped\x1b[0m",
            aggregation.skipped_count()
        );
        for skipped in &aggregation.skipped {
            println!("  #{} {}: {}", skipped.index, skipped.record_id, skipped.reason);
        }
    }

    if aggregation.is_empty() {
        println!("No maintenance history found.");
        return;
    }

    let years: Vec<&YearlySummary> = match only_year {
        Some(y) => aggregation.year(y).into_iter().collect(),
        None => aggregation.years.values().collect(),
    };
    if years.is_empty() {
        println!("No records in {}.", only_year.map(|y| y.to_string()).unwrap_or_default());
        return;
    }

    let year_rows: Vec<YearRow> = years.iter().map(|y| {
        let card = SummaryCard::from_year(y, top);
        YearRow {
            year: card.period,
            total: card.total,
            change: card.change,
            records: card.record_count,
            parts: card.top_parts.join("\n"),
        }
    }).collect();
    print_table(Table::new(year_rows));

    for year in years {
        println!("\n\x1b[1;36m{}\x1b[0m", year.year);
        let month_rows: Vec<MonthRow> = year.months.values().map(|m| {
            let card = SummaryCard::from_month(year.year, m, top);
            MonthRow {
                month: card.period,
                total: card.total,
                change: card.change,
                records: card.record_count,
                parts: card.top_parts.join("\n"),
            }
        }).collect();
        print_table(Table::new(month_rows));
    }
}

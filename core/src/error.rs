use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Why a maintenance record was left out of an aggregation.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum SkipReason {
    #[error("unparsable date '{0}'")]
    UnparsableDate(String),

    #[error("negative cost {0}")]
    NegativeCost(Decimal),

    #[error("invalid cost {0}")]
    InvalidCost(String),

    #[error("cost {0} overflows the yearly total")]
    CostOverflow(Decimal),
}

/// A record excluded from aggregation. `index` is its position in the input slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub index: usize,
    pub record_id: Uuid,
    pub reason: SkipReason,
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cost as sent by the backend. Anything that is not a decimal amount is
/// kept verbatim so the record can be skipped later instead of failing the load.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Cost {
    Amount(Decimal),
    Invalid(serde_json::Value),
}

impl Cost {
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Cost::Amount(amount) => Some(*amount),
            Cost::Invalid(_) => None,
        }
    }
}

impl Default for Cost {
    fn default() -> Self {
        Cost::Invalid(serde_json::Value::Null)
    }
}

impl From<Decimal> for Cost {
    fn from(amount: Decimal) -> Self {
        Cost::Amount(amount)
    }
}

/// One maintenance event as the backend reports it.
///
/// `date` and `cost` are kept loosely typed so a single bad value can be
/// skipped during aggregation instead of failing the whole list on load.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub cost: Cost,
    #[serde(default)]
    pub part_name: String,
}

impl MaintenanceRecord {
    pub fn new(vehicle_id: Uuid, date: impl Into<String>, cost: impl Into<Cost>, part_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            date: date.into(),
            cost: cost.into(),
            part_name: part_name.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub plate: String,
}

impl Vehicle {
    pub fn new(name: impl Into<String>, plate: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            plate: plate.into(),
        }
    }

    /// Matches a full id, an id prefix, the plate or the name (case-insensitive).
    pub fn matches_key(&self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        let id = self.id.to_string();
        id == key
            || id.starts_with(&key.to_lowercase())
            || self.plate.eq_ignore_ascii_case(key)
            || self.name.to_lowercase() == key.to_lowercase()
    }
}

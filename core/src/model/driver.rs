use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A driver as held by the session store.
///
/// `status` stays a plain string: the backend owns the set of values
/// (`ACTIVE`, `ON_LEAVE`, ...) and the filter only compares for equality.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DriverRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
}

impl DriverRecord {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: String::new(),
            phone: String::new(),
            status: status.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

use crate::model::driver::DriverRecord;
use crate::model::maintenance::{MaintenanceRecord, Vehicle};
use anyhow::Result;
use uuid::Uuid;

/// Source of maintenance records, usually backed by the REST API.
pub trait MaintenanceRepository {
    fn list_for_vehicle(&self, vehicle_id: &Uuid) -> Result<Vec<MaintenanceRecord>>;
    fn list_all(&self) -> Result<Vec<MaintenanceRecord>>;
}

/// Current driver list, injected instead of read from a global store.
pub trait DriverRepository {
    fn list(&self) -> Result<Vec<DriverRecord>>;
}

pub trait VehicleRepository {
    fn list(&self) -> Result<Vec<Vehicle>>;

    /// Resolves a vehicle by id, id prefix, plate or name.
    fn find(&self, key: &str) -> Result<Option<Vehicle>> {
        Ok(VehicleRepository::list(self)?.into_iter().find(|v| v.matches_key(key)))
    }
}

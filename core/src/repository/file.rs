use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::model::driver::DriverRecord;
use crate::model::maintenance::{MaintenanceRecord, Vehicle};
use crate::repository::traits::{DriverRepository, MaintenanceRepository, VehicleRepository};

const VEHICLES_FILE_NAME: &str = "vehicles.json";
const DRIVERS_FILE_NAME: &str = "drivers.json";
const MAINTENANCE_FILE_NAME: &str = "maintenance.json";

/// Read-only adapter over a directory of JSON exports.
///
/// Each file holds a JSON array. A missing file reads as an empty list.
#[derive(Clone, Debug)]
pub struct FileFleetRepository {
    data_dir: PathBuf,
}

impl FileFleetRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn read_list<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.data_dir.join(file_name);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "data file missing, treating as empty");
            return Ok(Vec::new());
        }
        let file = File::open(&path).with_context(|| format!("Could not open {}", path.display()))?;
        let reader = BufReader::new(file);
        let items: Vec<T> = serde_json::from_reader(reader)
            .with_context(|| format!("Malformed JSON in {}", path.display()))?;
        tracing::debug!(path = %path.display(), count = items.len(), "loaded data file");
        Ok(items)
    }
}

impl MaintenanceRepository for FileFleetRepository {
    fn list_for_vehicle(&self, vehicle_id: &Uuid) -> Result<Vec<MaintenanceRecord>> {
        let records: Vec<MaintenanceRecord> = self.read_list(MAINTENANCE_FILE_NAME)?;
        Ok(records.into_iter().filter(|r| r.vehicle_id == *vehicle_id).collect())
    }

    fn list_all(&self) -> Result<Vec<MaintenanceRecord>> {
        self.read_list(MAINTENANCE_FILE_NAME)
    }
}

impl DriverRepository for FileFleetRepository {
    fn list(&self) -> Result<Vec<DriverRecord>> {
        self.read_list(DRIVERS_FILE_NAME)
    }
}

impl VehicleRepository for FileFleetRepository {
    fn list(&self) -> Result<Vec<Vehicle>> {
        self.read_list(VEHICLES_FILE_NAME)
    }
}

pub mod file;
pub mod traits;

pub use file::FileFleetRepository;
pub use traits::{DriverRepository, MaintenanceRepository, VehicleRepository};

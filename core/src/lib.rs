pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::FleetConfig;
pub use error::{SkipReason, SkippedRecord};
pub use input::{expand_key, parse_args, parse_driver_query, ParsedInput};
pub use model::driver::DriverRecord;
pub use model::maintenance::{Cost, MaintenanceRecord, Vehicle};
pub use model::summary::{MonthlySummary, PartUsage, YearlySummary};
pub use repository::{DriverRepository, FileFleetRepository, MaintenanceRepository, VehicleRepository};
pub use service::aggregator::{aggregate, Aggregation};
pub use service::driver_filter::{filter_drivers, DriverQuery, StatusFilter};
pub use time::parse_record_date;

pub mod driver_directory;
pub mod maintenance_history;

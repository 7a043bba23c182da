pub mod driver;
pub mod maintenance;
pub mod summary;

pub mod aggregator;
pub mod chart;
pub mod driver_filter;
pub mod dto;
pub mod ranking;

use crate::repository::MaintenanceRepository;
use crate::service::aggregator::{aggregate, Aggregation};
use anyhow::Result;
use uuid::Uuid;

pub struct MaintenanceHistoryUseCase<'a, R: MaintenanceRepository> {
    repo: &'a R,
}

impl<'a, R: MaintenanceRepository> MaintenanceHistoryUseCase<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn history_for_vehicle(&self, vehicle_id: &Uuid) -> Result<Aggregation> {
        let records = self.repo.list_for_vehicle(vehicle_id)?;
        let aggregation = aggregate(&records);
        report_skipped(&aggregation, records.len());
        Ok(aggregation)
    }

    /// Every vehicle's records in one summary.
    pub fn fleet_history(&self) -> Result<Aggregation> {
        let records = self.repo.list_all()?;
        let aggregation = aggregate(&records);
        report_skipped(&aggregation, records.len());
        Ok(aggregation)
    }
}

fn report_skipped(aggregation: &Aggregation, total: usize) {
    if aggregation.skipped_count() > 0 {
        tracing::warn!(
            skipped = aggregation.skipped_count(),
            total,
            "some maintenance records were left out of the summary"
        );
    }
}

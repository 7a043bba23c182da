use crate::model::driver::DriverRecord;
use crate::repository::DriverRepository;
use crate::service::driver_filter::DriverQuery;
use anyhow::Result;

pub struct DriverDirectoryUseCase<'a, R: DriverRepository> {
    repo: &'a R,
}

impl<'a, R: DriverRepository> DriverDirectoryUseCase<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn search(&self, query: &DriverQuery) -> Result<Vec<DriverRecord>> {
        let drivers = self.repo.list()?;
        Ok(query.apply(&drivers))
    }

    /// Distinct statuses in the order they first appear.
    pub fn statuses(&self) -> Result<Vec<String>> {
        Ok(distinct_statuses(&self.repo.list()?))
    }
}

pub fn distinct_statuses(drivers: &[DriverRecord]) -> Vec<String> {
    let mut statuses: Vec<String> = Vec::new();
    for driver in drivers {
        if !statuses.contains(&driver.status) {
            statuses.push(driver.status.clone());
        }
    }
    statuses
}

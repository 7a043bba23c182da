use crate::model::driver::DriverRecord;

pub const ALL_STATUSES: &str = "ALL";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    /// `"ALL"` matches every status; anything else is compared verbatim.
    pub fn parse(value: &str) -> Self {
        if value == ALL_STATUSES {
            StatusFilter::All
        } else {
            StatusFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatusFilter::All => ALL_STATUSES,
            StatusFilter::Only(wanted) => wanted,
        }
    }
}

/// Search text plus status filter, as typed into the driver list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DriverQuery {
    pub search: String,
    pub status: StatusFilter,
}

impl DriverQuery {
    pub fn new(search: impl Into<String>, status: &str) -> Self {
        Self {
            search: search.into(),
            status: StatusFilter::parse(status),
        }
    }

    pub fn matches(&self, driver: &DriverRecord) -> bool {
        self.status.matches(&driver.status) && self.matches_search(driver)
    }

    fn matches_search(&self, driver: &DriverRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        driver.full_name().to_lowercase().contains(&needle)
            || driver.email.to_lowercase().contains(&needle)
            || driver.phone.to_lowercase().contains(&needle)
    }

    /// Matching drivers in their original order.
    pub fn apply(&self, drivers: &[DriverRecord]) -> Vec<DriverRecord> {
        drivers.iter().filter(|d| self.matches(d)).cloned().collect()
    }
}

pub fn filter_drivers(drivers: &[DriverRecord], search_text: &str, status_filter: &str) -> Vec<DriverRecord> {
    DriverQuery::new(search_text, status_filter).apply(drivers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(first: &str, last: &str, email: &str, phone: &str, status: &str) -> DriverRecord {
        let mut d = DriverRecord::new(first, last, status);
        d.email = email.to_string();
        d.phone = phone.to_string();
        d
    }

    fn sample() -> Vec<DriverRecord> {
        vec![
            driver("James", "Doe", "james@fleet.io", "555-0101", "ACTIVE"),
            driver("Jane", "Roe", "jroe@fleet.io", "555-0199", "ON_LEAVE"),
            driver("Ana", "Silva", "ana.silva@depot.net", "+44 20 7946 0018", "ACTIVE"),
        ]
    }

    fn first_names(drivers: &[DriverRecord]) -> Vec<&str> {
        drivers.iter().map(|d| d.first_name.as_str()).collect()
    }

    #[test]
    fn test_default_filters_are_identity() {
        let drivers = sample();
        assert_eq!(filter_drivers(&drivers, "", "ALL"), drivers);
    }

    #[test]
    fn test_search_by_last_name() {
        let drivers = sample();
        let result = filter_drivers(&drivers, "doe", "ALL");
        assert_eq!(first_names(&result), vec!["James"]);
    }

    #[test]
    fn test_search_spans_first_and_last_name() {
        let drivers = sample();
        assert_eq!(first_names(&filter_drivers(&drivers, "ES D", "ALL")), vec!["James"]);
        // "james" does not contain "jan".
        assert_eq!(first_names(&filter_drivers(&drivers, "jan", "ALL")), vec!["Jane"]);
    }

    #[test]
    fn test_search_email_and_phone() {
        let drivers = sample();
        assert_eq!(first_names(&filter_drivers(&drivers, "DEPOT", "ALL")), vec!["Ana"]);
        assert_eq!(first_names(&filter_drivers(&drivers, "0199", "ALL")), vec!["Jane"]);
        assert_eq!(first_names(&filter_drivers(&drivers, "fleet.io", "ALL")), vec!["James", "Jane"]);
    }

    #[test]
    fn test_status_filter() {
        let drivers = sample();
        assert_eq!(first_names(&filter_drivers(&drivers, "", "ACTIVE")), vec!["James", "Ana"]);
        assert_eq!(first_names(&filter_drivers(&drivers, "a", "ON_LEAVE")), vec!["Jane"]);
        // Exact comparison, not case-folded.
        assert!(filter_drivers(&drivers, "", "active").is_empty());
        assert!(filter_drivers(&drivers, "", "RETIRED").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let drivers = sample();
        let once = filter_drivers(&drivers, "a", "ACTIVE");
        let twice = filter_drivers(&once, "a", "ACTIVE");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::parse("ALL"), StatusFilter::All);
        assert_eq!(StatusFilter::parse("all"), StatusFilter::Only("all".to_string()));
        assert_eq!(StatusFilter::parse("ON_LEAVE").label(), "ON_LEAVE");
        assert_eq!(StatusFilter::default().label(), "ALL");
    }
}

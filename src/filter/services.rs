//! Service filtering
//!
//! The service directory filters professionals by role, location and
//! availability. There are no sort modes; results keep their input order.

use crate::catalog::{Availability, Service, ServiceRole};

/// Filter criteria for the service directory.
#[derive(Debug, Clone, Default)]
pub struct ServiceQuery {
    /// Free-text term, matched case-insensitively against the
    /// professional's name and location.
    pub term: Option<String>,

    /// Role facet.
    pub role: Option<ServiceRole>,

    /// Location facet, matched exactly.
    pub location: Option<String>,

    /// Availability facet.
    pub status: Option<Availability>,
}

impl ServiceQuery {
    /// Check whether a service professional satisfies every criterion.
    #[must_use]
    pub fn matches(&self, service: &Service) -> bool {
        if let Some(term) = self.term.as_deref()
            && !term.is_empty()
        {
            let needle = term.to_lowercase();
            let in_name = service.name.to_lowercase().contains(&needle);
            let in_location = service.location.to_lowercase().contains(&needle);

            if !in_name && !in_location {
                return false;
            }
        }

        if let Some(role) = self.role
            && service.role != role
        {
            return false;
        }

        if let Some(location) = self.location.as_deref()
            && service.location != location
        {
            return false;
        }

        if let Some(status) = self.status
            && service.status != status
        {
            return false;
        }

        true
    }
}

/// Filter service professionals by the query, keeping input order.
pub fn filter<'a, I>(services: I, query: &ServiceQuery) -> Vec<&'a Service>
where
    I: IntoIterator<Item = &'a Service>,
{
    services
        .into_iter()
        .filter(|service| query.matches(service))
        .collect()
}

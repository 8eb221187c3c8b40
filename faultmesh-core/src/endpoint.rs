//! Endpoint record (C2): a totally-ordered value type.
//!
//! Ordering and equality are defined purely by `value`; `health_check_ids`
//! rides along without participating in either. Plain and health-checked
//! endpoints flow through the same pipelines.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A service endpoint: opaque record data plus zero or more health checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Opaque DNS record data. Acts as identity and sort key.
    pub value: Vec<u8>,
    /// Ordered, possibly empty health-check identifiers.
    pub health_check_ids: Vec<String>,
}

impl Endpoint {
    /// Build an endpoint from record data and its health checks.
    #[must_use]
    pub fn new(value: impl Into<Vec<u8>>, health_check_ids: Vec<String>) -> Self {
        Self {
            value: value.into(),
            health_check_ids,
        }
    }

    /// Whether this endpoint carries at least one health check.
    #[must_use]
    pub fn is_health_checked(&self) -> bool {
        !self.health_check_ids.is_empty()
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Endpoint {}

impl PartialOrd for Endpoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Endpoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

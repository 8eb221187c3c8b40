//! DNS record entry (R): the output value type at the system boundary.
//!
//! `health_check_id` is modeled at the entry level rather than nested
//! inside the values payload: the alias-chain algorithm in
//! [`crate::answer_set`] attaches a health check to alias entries too,
//! which only makes sense if a record can carry both an alias target and
//! a health check simultaneously (the real-world weighted/alias DNS
//! record sets this plan targets support exactly that combination).

use serde::{Deserialize, Serialize};

/// An alias-target payload: points at another name instead of carrying
/// record values directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTarget {
    pub dns_name: String,
    pub zone_id: String,
    pub evaluate_target_health: bool,
}

/// The mutually exclusive record payload: either literal values, or an
/// alias to another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordTarget {
    Values { values: Vec<String>, ttl: u32 },
    Alias(AliasTarget),
}

/// One DNS record entry in a provisioning plan.
///
/// `weight` is `0` or `1`: `0` means "only use if no weight-1 sibling in
/// the same `(name, type)` group is healthy".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub weight: u8,
    pub set_identifier: String,
    pub health_check_id: Option<String>,
    pub target: RecordTarget,
}

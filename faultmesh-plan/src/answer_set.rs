//! Answer set (C4): an ordered, deduplicated endpoint set that lowers to
//! a leaf record plus an alias chain expressing logical-AND over health
//! checks.

use std::collections::BTreeSet;

use faultmesh_core::endpoint::Endpoint;
use faultmesh_core::hash::checksum_base36;

use crate::error::PlanError;
use crate::record::{AliasTarget, DnsRecordEntry, RecordTarget};

/// An ordered, unique-by-value collection of endpoints.
///
/// Backed by a `BTreeSet<Endpoint>`: `Endpoint`'s `Ord` impl compares
/// `value` only, so insertion order is irrelevant and duplicate `value`
/// insertion is a no-op for free.
#[derive(Debug, Clone, Default)]
pub struct AnswerSet {
    members: BTreeSet<Endpoint>,
}

impl AnswerSet {
    /// An empty answer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an answer set from an endpoint sequence, dropping duplicates
    /// by `value`.
    #[must_use]
    pub fn from_endpoints(endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        let mut set = Self::new();
        for e in endpoints {
            set.insert(e);
        }
        set
    }

    /// Insert an endpoint. Returns `false` if its `value` was already present.
    pub fn insert(&mut self, endpoint: Endpoint) -> bool {
        self.members.insert(endpoint)
    }

    /// Number of distinct-by-value members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in ascending `value` order.
    pub fn members(&self) -> impl Iterator<Item = &Endpoint> {
        self.members.iter()
    }

    /// Lower this answer set to an ordered list of DNS record entries.
    ///
    /// `H`, the deduplicated set of health-check ids carried by members,
    /// is collected in **alphabetical** order rather than in ascending
    /// member-`value` order, so the leaf gets the alphabetically first
    /// health-check id rather than the one belonging to the
    /// smallest-`value` member. Do not "fix" this: it is load-bearing
    /// for byte-identical output against previously provisioned zones.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::EmptyAnswerSet`] if the set has no members, or
    /// [`PlanError::NonUtf8RecordValue`] if a member's `value` is not
    /// valid UTF-8 (required to render it as DNS record data).
    pub fn to_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: &str,
        ttl: u32,
    ) -> Result<Vec<DnsRecordEntry>, PlanError> {
        if self.members.is_empty() {
            return Err(PlanError::EmptyAnswerSet);
        }

        let health_check_ids: Vec<String> = self
            .members
            .iter()
            .flat_map(|m| m.health_check_ids.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut record_values = Vec::with_capacity(self.members.len());
        for m in &self.members {
            let rendered = String::from_utf8(m.value.clone())
                .map_err(|_| PlanError::NonUtf8RecordValue)?;
            record_values.push(rendered);
        }

        let leaf = DnsRecordEntry {
            name: name.to_string(),
            record_type: record_type.to_string(),
            weight: 1,
            set_identifier: "leafnode".to_string(),
            health_check_id: health_check_ids.first().cloned(),
            target: RecordTarget::Values {
                values: record_values,
                ttl,
            },
        };

        if health_check_ids.len() <= 1 {
            return Ok(vec![leaf]);
        }

        let mut out = vec![leaf];

        for h in &health_check_ids[1..] {
            let previous_name = out.last().unwrap().name.clone();
            let checksum = checksum_for_entry(out.last().expect("out is never empty"));
            let renamed_previous_name = format!("{checksum}.{previous_name}");
            out.last_mut().unwrap().name.clone_from(&renamed_previous_name);

            let previous = out.last().unwrap();
            let alias = DnsRecordEntry {
                name: previous_name,
                record_type: previous.record_type.clone(),
                weight: previous.weight,
                set_identifier: format!("Alias to {checksum}"),
                health_check_id: Some(h.clone()),
                target: RecordTarget::Alias(AliasTarget {
                    dns_name: renamed_previous_name,
                    zone_id: zone_id.to_string(),
                    evaluate_target_health: true,
                }),
            };

            out.push(alias);
        }

        // Each alias inherits the name its predecessor had before that
        // predecessor was renamed, so by induction the final entry always
        // carries the originally requested name back.
        debug_assert_eq!(out.last().unwrap().name, name);

        Ok(out)
    }
}

/// Checksum of an entry's data-bearing fields, per the alias-chain
/// checksum contract: type, then either the alias target's zone/name/
/// evaluate-health ASCII form, or the rendered record-values sequence
/// plus decimal TTL. `name` never participates.
fn checksum_for_entry(entry: &DnsRecordEntry) -> String {
    let mut buf = Vec::new();
    buf.extend_from_slice(entry.record_type.as_bytes());
    match &entry.target {
        RecordTarget::Alias(target) => {
            buf.extend_from_slice(target.zone_id.as_bytes());
            buf.extend_from_slice(target.dns_name.as_bytes());
            buf.extend_from_slice(if target.evaluate_target_health {
                b"true"
            } else {
                b"false"
            });
        }
        RecordTarget::Values { values, ttl } => {
            buf.extend_from_slice(values.join(",").as_bytes());
            buf.extend_from_slice(ttl.to_string().as_bytes());
        }
    }
    checksum_base36(&buf)
}

//! RubberTree vulcanizer (C7): composes a lattice into the full ordered
//! DNS provisioning plan.

use faultmesh_core::endpoint::Endpoint;
use faultmesh_core::lattice::Lattice;
use faultmesh_core::sublist::sublists;

use crate::answer_set::AnswerSet;
use crate::error::PlanError;
use crate::record::{AliasTarget, DnsRecordEntry, RecordTarget};

/// Per-call tunables for vulcanization.
///
/// `k` is the records-per-entry cap; the downstream DNS product hard-caps
/// this at 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VulcanizeConfig {
    pub k: u8,
}

impl VulcanizeConfig {
    /// Validate this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::RecordsPerEntryCapExceeded`] if `k` is `0` or
    /// greater than `8`.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.k == 0 || self.k > 8 {
            return Err(PlanError::RecordsPerEntryCapExceeded { k: self.k });
        }
        Ok(())
    }
}

impl Default for VulcanizeConfig {
    fn default() -> Self {
        Self { k: 8 }
    }
}

/// Compose `lattice` into the full ordered DNS provisioning plan.
///
/// # Errors
///
/// Returns [`PlanError::RecordsPerEntryCapExceeded`] if `k` is outside
/// `[1, 8]`, or any error a lattice or answer-set operation along the
/// way can raise.
pub fn vulcanize(
    lattice: &Lattice,
    zone_id: &str,
    name: &str,
    record_type: &str,
    ttl: u32,
    k: u8,
) -> Result<Vec<DnsRecordEntry>, PlanError> {
    VulcanizeConfig { k }.validate()?;

    let coords = lattice.get_all_coordinates();
    if coords.len() <= 1 {
        let endpoints = lattice.get_all_endpoints();
        return flat_procedure(&endpoints, zone_id, name, record_type, ttl, k);
    }

    vulcanize_multi_cell(lattice, zone_id, name, record_type, ttl, k)
}

fn vulcanize_multi_cell(
    lattice: &Lattice,
    zone_id: &str,
    name: &str,
    record_type: &str,
    ttl: u32,
    k: u8,
) -> Result<Vec<DnsRecordEntry>, PlanError> {
    let interleaved = interleave(lattice);
    let mut out = flat_procedure(&interleaved, zone_id, name, record_type, ttl, k)?;

    // Secondary promotion: the weight-0 fallbacks become the secondary
    // tree's primaries.
    let secondary_name = format!("secondary.{name}");
    for entry in &mut out {
        if entry.weight == 0 {
            entry.name.clone_from(&secondary_name);
            entry.weight = 1;
        }
    }

    for dim in lattice.get_dimension_names() {
        let values = lattice.get_dimension_values(dim)?.clone();
        for value in &values {
            let prefix = format!("{}-{}", truncate30(dim), truncate30(value));
            let sub_name = format!("{prefix}.{secondary_name}");

            let restricted = lattice.simulate_failure(dim, value)?;
            let sub_endpoints = restricted.get_all_endpoints();
            let sub_records = flat_procedure(&sub_endpoints, zone_id, &sub_name, record_type, ttl, k)?;
            out.extend(sub_records);

            out.push(DnsRecordEntry {
                name: secondary_name.clone(),
                record_type: record_type.to_string(),
                weight: 0,
                set_identifier: prefix,
                health_check_id: None,
                target: RecordTarget::Alias(AliasTarget {
                    dns_name: sub_name,
                    zone_id: zone_id.to_string(),
                    evaluate_target_health: true,
                }),
            });
        }
    }

    out.push(DnsRecordEntry {
        name: name.to_string(),
        record_type: record_type.to_string(),
        weight: 0,
        set_identifier: format!("secondary for {name}"),
        health_check_id: None,
        target: RecordTarget::Alias(AliasTarget {
            dns_name: secondary_name,
            zone_id: zone_id.to_string(),
            evaluate_target_health: true,
        }),
    });

    Ok(out)
}

/// Splice every coordinate's endpoints into a single ordered list at
/// evenly spaced positions, so overlapping downstream slices naturally
/// mix cells.
///
/// Preserves the reference's integer-truncation rounding in
/// `step = (|P| + q) / q` verbatim. For some lattice shapes this can
/// leave the final inserted element short of the list's end; that is
/// intentional and downstream weight-0 fallbacks cover the resulting
/// interleaving. Do not "fix" the rounding.
fn interleave(lattice: &Lattice) -> Vec<Endpoint> {
    let mut p: Vec<Endpoint> = Vec::new();
    for coord in lattice.get_all_coordinates() {
        let endpoints = lattice
            .get_endpoints_for_sector(&coord)
            .expect("coordinate arity matches lattice by construction")
            .unwrap_or(&[])
            .to_vec();
        let q = endpoints.len();
        if q == 0 {
            continue;
        }
        let step = (p.len() + q) / q;
        for (i, endpoint) in endpoints.into_iter().enumerate() {
            let pos = (i * step).min(p.len());
            p.insert(pos, endpoint);
        }
    }
    p
}

fn truncate30(s: &str) -> String {
    s.chars().take(30).collect()
}

/// Flat vulcanization procedure (§4.7): given an ordered endpoint list
/// and a target name, emit the windowed primary tree or the leaf-plus-
/// fallback tree depending on whether `E` exceeds the cap `K`.
fn flat_procedure(
    endpoints: &[Endpoint],
    zone_id: &str,
    name: &str,
    record_type: &str,
    ttl: u32,
    k: u8,
) -> Result<Vec<DnsRecordEntry>, PlanError> {
    if endpoints.is_empty() {
        return Ok(Vec::new());
    }

    let k_usize = usize::from(k);
    let mut out = Vec::new();

    if endpoints.len() > k_usize {
        let mut ring: Vec<Endpoint> = endpoints.to_vec();
        ring.extend(endpoints.iter().take(k_usize - 1).cloned());
        for i in 0..endpoints.len() {
            let window = &ring[i..i + k_usize];
            let answer_set = AnswerSet::from_endpoints(window.iter().cloned());
            out.extend(answer_set.to_records(zone_id, name, record_type, ttl)?);
        }
    } else {
        let primary = AnswerSet::from_endpoints(endpoints.iter().cloned());
        out.extend(primary.to_records(zone_id, name, record_type, ttl)?);

        let fallback_size = k_usize - 1;
        if fallback_size > 0 {
            for sublist in sublists(endpoints, fallback_size)? {
                let fallback = AnswerSet::from_endpoints(sublist.into_iter().cloned());
                let mut records = fallback.to_records(zone_id, name, record_type, ttl)?;
                if let Some(last) = records.last_mut() {
                    last.weight = 0;
                }
                out.extend(records);
            }
        }
    }

    Ok(out)
}

//! Stateful searching sharder (C6): randomized backtracking shard search
//! constrained by an external overlap ledger.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use faultmesh_core::endpoint::Endpoint;
use faultmesh_core::lattice::Lattice;
use faultmesh_core::sublist::sublists;

use crate::error::ShardError;
use crate::ledger::{canonicalize_fragment, FragmentLedger};

/// Randomized backtracking shard search bounded by a pairwise-overlap
/// ledger.
///
/// The search itself is single-threaded and synchronous; the ledger is
/// the only I/O-shaped boundary, consulted and committed serially within
/// one `shuffle_shard` call. Concurrent callers sharing one ledger must
/// externally serialize calls, or use a ledger with compare-and-set
/// semantics over the canonical fragment key: this type does not provide
/// that itself.
pub struct StatefulSearchingSharder<L: FragmentLedger> {
    k: usize,
    m: usize,
    ledger: L,
}

impl<L: FragmentLedger> StatefulSearchingSharder<L> {
    /// Build a sharder that selects `k` endpoints per cell while bounding
    /// pairwise overlap across shards at `m`, backed by `ledger`.
    #[must_use]
    pub fn new(k: usize, m: usize, ledger: L) -> Self {
        Self { k, m, ledger }
    }

    /// Access the underlying ledger, e.g. for inspection in tests.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Search for a shard of `lattice` and, on success, commit its
    /// size-`(m+1)` fragments to the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`ShardError::NoShardsAvailable`] if the backtracking
    /// search exhausts every coordinate without finding a placement that
    /// respects the overlap bound.
    pub fn shuffle_shard(&mut self, lattice: &Lattice) -> Result<Lattice, ShardError> {
        let mut rng = rand::thread_rng();
        let shard = self.search(lattice, &mut rng)?;

        if shard.is_empty() {
            tracing::warn!(k = self.k, m = self.m, "backtracking search exhausted");
            return Err(ShardError::NoShardsAvailable);
        }

        let endpoints: Vec<Endpoint> = dedup_by_value(shard.get_all_endpoints());
        for subset in sublists(&endpoints, self.m + 1)? {
            let key = canonicalize_fragment(subset.iter().map(|e| e.value.as_slice()));
            self.ledger.save(&key);
        }

        Ok(shard)
    }

    fn search(&self, lattice: &Lattice, rng: &mut impl Rng) -> Result<Lattice, ShardError> {
        let mut coords = lattice.get_all_coordinates();
        coords.shuffle(rng);

        for coord in coords {
            let cell = lattice
                .get_endpoints_for_sector(&coord)?
                .unwrap_or(&[])
                .to_vec();
            if cell.len() < self.k {
                continue;
            }

            let mut recursion_target = lattice.clone();
            for (dim, value) in lattice.get_dimension_names().iter().zip(coord.iter()) {
                recursion_target = recursion_target.simulate_failure(dim, value)?;
            }

            let mut shuffled_cell = cell.clone();
            shuffled_cell.shuffle(rng);

            for fragment_tuple in sublists(&shuffled_cell, self.k)? {
                let fragment: Vec<Endpoint> = fragment_tuple.into_iter().cloned().collect();

                if fragment.len() > self.m && self.any_subfragment_recorded(&fragment)? {
                    tracing::debug!(?coord, "candidate fragment conflicts with ledger");
                    continue;
                }

                let partial = self.search(&recursion_target, rng)?;

                let combined = dedup_by_value(
                    fragment
                        .iter()
                        .cloned()
                        .chain(partial.get_all_endpoints())
                        .collect(),
                );

                if combined.len() > self.m && self.any_subfragment_recorded(&combined)? {
                    tracing::debug!(?coord, "combined fragment conflicts with ledger");
                    continue;
                }

                let mut result = partial;
                result.add_endpoints_for_sector(coord.clone(), fragment)?;
                return Ok(result);
            }
        }

        Ok(Lattice::new(lattice.get_dimension_names().to_vec())?)
    }

    fn any_subfragment_recorded(&self, fragment: &[Endpoint]) -> Result<bool, ShardError> {
        for subset in sublists(fragment, self.m + 1)? {
            let key = canonicalize_fragment(subset.iter().map(|e| e.value.as_slice()));
            if self.ledger.contains(&key) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn dedup_by_value(endpoints: Vec<Endpoint>) -> Vec<Endpoint> {
    endpoints.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

//! Simple-signature sharder (C5): deterministic, keyed-hash shard selection.

use faultmesh_core::endpoint::Endpoint;
use faultmesh_core::hash::digest_mod;
use faultmesh_core::lattice::Lattice;

use crate::error::ShardError;

/// Deterministic shard selection keyed by a fixed 64-bit seed.
///
/// For the same `(seed, id, lattice)` the selected shard is bit-identical.
#[derive(Debug, Clone, Copy)]
pub struct SimpleSignatureSharder {
    seed: u64,
}

impl SimpleSignatureSharder {
    /// Build a sharder keyed by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Select `k` endpoints per occupied coordinate of `lattice`, keyed
    /// deterministically by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ShardError::InsufficientCell`] if any coordinate has
    /// fewer than `k` endpoints.
    pub fn shuffle_shard(
        &self,
        lattice: &Lattice,
        id: &[u8],
        k: usize,
    ) -> Result<Lattice, ShardError> {
        let mut message = Vec::with_capacity(8 + id.len());
        message.extend_from_slice(&self.seed.to_be_bytes());
        message.extend_from_slice(id);

        let mut shard = Lattice::new(lattice.get_dimension_names().to_vec())?;

        for coord in lattice.get_all_coordinates() {
            let cell = lattice
                .get_endpoints_for_sector(&coord)?
                .unwrap_or(&[]);
            if cell.len() < k {
                return Err(ShardError::InsufficientCell {
                    coordinate: coord,
                    cell_size: cell.len(),
                    k,
                });
            }

            let coord_bytes = canonical_coordinate_bytes(&coord);
            let selected = select_k_indices(cell.len(), k, &coord_bytes, &message)
                .into_iter()
                .map(|i| cell[i].clone())
                .collect::<Vec<Endpoint>>();

            shard.add_endpoints_for_sector(coord, selected)?;
        }

        Ok(shard)
    }
}

/// Salted selection: hash `salt || coord_bytes || message` with MD5 and
/// reduce modulo the cell size, advancing the salt until `k` distinct
/// indices have been picked.
fn select_k_indices(cell_size: usize, k: usize, coord_bytes: &[u8], message: &[u8]) -> Vec<usize> {
    let mut picked = Vec::with_capacity(k);
    let mut salt: u64 = 0;
    while picked.len() < k {
        let mut keyed = Vec::with_capacity(8 + coord_bytes.len() + message.len());
        keyed.extend_from_slice(&salt.to_be_bytes());
        keyed.extend_from_slice(coord_bytes);
        keyed.extend_from_slice(message);

        let index = digest_mod(&keyed, cell_size as u64) as usize;
        if !picked.contains(&index) {
            picked.push(index);
        }
        salt += 1;
    }
    picked
}

fn canonical_coordinate_bytes(coord: &[String]) -> Vec<u8> {
    coord.join("\u{0}").into_bytes()
}

//! Typed shard-crate errors.

use faultmesh_core::lattice::LatticeError;
use faultmesh_core::sublist::SublistError;

/// Typed failure for shuffle-shard assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShardError {
    /// A coordinate in the simple-signature sharder held fewer endpoints
    /// than the requested endpoints-per-cell `k`.
    InsufficientCell {
        coordinate: Vec<String>,
        cell_size: usize,
        k: usize,
    },
    /// The stateful searching sharder exhausted the backtracking search
    /// without finding a shard that respects the overlap bound.
    NoShardsAvailable,
    /// A lattice operation failed.
    Lattice(LatticeError),
    /// A sublist-enumeration precondition was violated.
    Sublist(SublistError),
}

impl std::fmt::Display for ShardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientCell {
                coordinate,
                cell_size,
                k,
            } => write!(
                f,
                "coordinate {coordinate:?} has {cell_size} endpoints, fewer than k={k}"
            ),
            Self::NoShardsAvailable => {
                write!(f, "search exhausted without finding a valid shard")
            }
            Self::Lattice(e) => write!(f, "lattice error: {e}"),
            Self::Sublist(e) => write!(f, "sublist error: {e}"),
        }
    }
}

impl std::error::Error for ShardError {}

impl From<LatticeError> for ShardError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}

impl From<SublistError> for ShardError {
    fn from(e: SublistError) -> Self {
        Self::Sublist(e)
    }
}

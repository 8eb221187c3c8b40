//! Typed plan-crate errors.

use faultmesh_core::lattice::LatticeError;
use faultmesh_core::sublist::SublistError;

/// Typed failure for answer-set emission and vulcanization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// `to_records` was called on an empty answer set.
    EmptyAnswerSet,
    /// An endpoint's record-data bytes were not valid UTF-8 and cannot be
    /// rendered as a DNS record-data string.
    NonUtf8RecordValue,
    /// The vulcanizer's records-per-entry cap `K` was zero or exceeded 8,
    /// the downstream DNS product's hard limit.
    RecordsPerEntryCapExceeded { k: u8 },
    /// A lattice operation failed.
    Lattice(LatticeError),
    /// A sublist-enumeration precondition was violated.
    Sublist(SublistError),
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAnswerSet => write!(f, "to_records called on an empty answer set"),
            Self::NonUtf8RecordValue => {
                write!(f, "endpoint record-data is not valid UTF-8")
            }
            Self::RecordsPerEntryCapExceeded { k } => {
                write!(f, "records-per-entry cap {k} is outside [1, 8]")
            }
            Self::Lattice(e) => write!(f, "lattice error: {e}"),
            Self::Sublist(e) => write!(f, "sublist error: {e}"),
        }
    }
}

impl std::error::Error for PlanError {}

impl From<LatticeError> for PlanError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}

impl From<SublistError> for PlanError {
    fn from(e: SublistError) -> Self {
        Self::Sublist(e)
    }
}

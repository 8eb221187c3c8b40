//! Faultmesh shard: shuffle-shard assignment over a lattice.
//!
//! # API Surface
//!
//! - [`simple::SimpleSignatureSharder`] -- deterministic, hash-keyed
//!   shard selection (C5).
//! - [`searching::StatefulSearchingSharder`] -- randomized backtracking
//!   shard search bounded by an external overlap ledger (C6).
//! - [`ledger::FragmentLedger`] -- the overlap-ledger collaborator trait,
//!   with [`ledger::InMemoryFragmentLedger`] as a reference implementation.
//!
//! # Module Dependency Direction
//!
//! `ledger` ← `simple`; `ledger` ← `searching`. Both sharders depend on
//! `faultmesh_core::lattice` directly; neither depends on `faultmesh-plan`.
//!
//! Unlike the other two crates in this workspace, this one is not pure:
//! C6 draws from a pseudo-random source and calls out to a caller-supplied
//! ledger. It is the one place in the workspace that takes a `tracing`
//! dependency, for diagnosing long backtracking searches and ledger
//! conflicts.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ledger;
pub mod searching;
pub mod simple;

pub use error::ShardError;
pub use ledger::{FragmentLedger, InMemoryFragmentLedger};
pub use searching::StatefulSearchingSharder;
pub use simple::SimpleSignatureSharder;

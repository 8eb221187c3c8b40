//! Faultmesh plan: answer-set emission and full DNS provisioning plans.
//!
//! # API Surface
//!
//! - [`answer_set::AnswerSet`] -- ordered, deduplicated endpoint set that
//!   lowers to a leaf plus alias chain.
//! - [`vulcanize::vulcanize`] -- composes a lattice into the full ordered
//!   DNS provisioning plan.
//! - [`record::DnsRecordEntry`] -- the output value type at the system
//!   boundary.
//!
//! # Module Dependency Direction
//!
//! `record` ← `answer_set` ← `vulcanize`. `vulcanize` additionally
//! depends on `faultmesh_core::lattice`.
//!
//! This crate, like `faultmesh-core`, is pure computation: no I/O, no
//! randomization, no logging. Determinism end-to-end is the contract.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod answer_set;
pub mod error;
pub mod record;
pub mod vulcanize;

pub use answer_set::AnswerSet;
pub use error::PlanError;
pub use record::{AliasTarget, DnsRecordEntry, RecordTarget};
pub use vulcanize::{vulcanize, VulcanizeConfig};

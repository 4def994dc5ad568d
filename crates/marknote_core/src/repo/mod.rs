//! Repository layer over the persisted collections.
//!
//! # Responsibility
//! - Define the collection access contract used by services.
//! - Keep snapshot/persistence details out of use-case orchestration.
//!
//! # Invariants
//! - One writer owns a whole collection at a time; readers receive
//!   immutable snapshots.
//! - Every completed mutation is mirrored to its persisted snapshot.

pub mod notebook_repo;

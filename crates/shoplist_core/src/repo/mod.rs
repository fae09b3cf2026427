//! Repository layer over local key-value storage.
//!
//! # Responsibility
//! - Define list-level data access on top of raw string entries.
//! - Isolate JSON encoding details from the controller.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidData`) in addition to
//!   storage transport errors.

pub mod item_repo;

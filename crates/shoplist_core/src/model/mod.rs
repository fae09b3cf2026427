//! Domain model for list entries.
//!
//! # Responsibility
//! - Define the canonical item shape used by storage and rendering.
//!
//! # Invariants
//! - Items carry no identity beyond their text.
//! - Uniqueness is a list-level rule, enforced by the controller.

pub mod item;

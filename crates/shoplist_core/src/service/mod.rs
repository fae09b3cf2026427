//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and view-model updates into intent-level APIs.
//! - Keep CLI/FFI layers decoupled from storage details.

pub mod list_controller;

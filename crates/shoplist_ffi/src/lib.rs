//! Flutter-facing bindings for the Shoplist core.

pub mod api;

//! FFI crate exposing the relationship-graph engine to the Flutter host.

pub mod api;

//! Use-case services over the simulation state.
//!
//! # Responsibility
//! - Own the single mutable `SimulationState` and its lifecycle.
//! - Translate user gestures into state mutations and artifact requests.

pub mod graph_service;

//! Domain model for the relationship-graph engine.
//!
//! # Responsibility
//! - Define the canonical data structures shared by seeding, physics and
//!   the interaction protocol.
//! - Keep one owned `SimulationState` shape so rendering and physics never
//!   diverge.
//!
//! # Invariants
//! - Every node is identified by the stable `NoteId` of its source note.
//! - Edge identity is canonical per unordered note pair.

pub mod artifact;
pub mod graph;
pub mod note;

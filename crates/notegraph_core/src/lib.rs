//! Relationship-graph engine for NoteGraph.
//! This crate is the single source of truth for layout and confirmation
//! invariants; the host UI is a thin render adapter over its snapshots.

pub mod logging;
pub mod model;
pub mod service;
pub mod sim;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::artifact::ArtifactDraft;
pub use model::graph::{Edge, EdgeId, EdgeIdParseError, Node, SimulationState, Viewport};
pub use model::note::{derive_excerpt, NoteId, NoteSnapshot};
pub use service::graph_service::{
    ArtifactSink, EdgeHover, EdgeView, GraphService, GraphSnapshot, LifecyclePhase, NodeView,
    SolidifyError,
};
pub use sim::seed::{seed, SeedError, HYPOTHESIS_EDGE_PROBABILITY};
pub use sim::stepper::{
    step, CENTER_GRAVITY, CONFIRMED_ATTRACTION, HYPOTHESIS_ATTRACTION, MIN_DISTANCE,
    REPULSION_STRENGTH, VELOCITY_DAMPING,
};
pub use sim::VIEWPORT_MARGIN;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

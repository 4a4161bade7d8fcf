//! Graph lifecycle, interaction and confirmation protocol.
//!
//! # Responsibility
//! - Own the one `SimulationState` both the stepper and interaction
//!   handlers mutate, so rendering never diverges from physics.
//! - Drive the Idle/Running frame lifecycle and the reseed policy.
//! - Turn edge confirmations into exactly one artifact request each.
//!
//! # Invariants
//! - `tick` advances only while Running; a torn-down view must stop its
//!   frame registration once `tick` reports it is no longer running.
//! - All mutations happen synchronously between frames; the service is
//!   single-threaded by contract.
//! - A confirmed edge never reverts, and never emits a second artifact.

use crate::model::artifact::ArtifactDraft;
use crate::model::graph::{EdgeId, SimulationState, Viewport};
use crate::model::note::{NoteId, NoteSnapshot};
use crate::sim::seed::{seed, SeedError};
use crate::sim::stepper;
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Receiver for artifact-creation requests.
///
/// Fire-and-forget with respect to the frame loop: implementations must
/// hand the draft off without blocking (queue it, log it, send it), and
/// must swallow their own delivery failures.
pub trait ArtifactSink {
    fn submit(&mut self, draft: ArtifactDraft);
}

/// Frame-loop lifecycle of the mounted visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Not mounted; ticks are no-ops.
    Idle,
    /// Mounted and stepping once per host frame.
    Running,
}

/// Confirmation-protocol failure. None of these mutate state.
#[derive(Debug)]
pub enum SolidifyError {
    /// A required form field is empty; the form stays open host-side.
    EmptyField(&'static str),
    /// The edge id does not exist in the current graph.
    UnknownEdge(EdgeId),
    /// The edge was already solidified; no duplicate artifact is emitted.
    AlreadyConfirmed(EdgeId),
}

impl Display for SolidifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "required field `{field}` is empty"),
            Self::UnknownEdge(id) => write!(f, "edge not found: {id}"),
            Self::AlreadyConfirmed(id) => write!(f, "edge already confirmed: {id}"),
        }
    }
}

impl Error for SolidifyError {}

/// Per-frame render view of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NoteId,
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub excerpt: Option<String>,
}

/// Per-frame render view of one edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeView {
    pub id: EdgeId,
    pub source: NoteId,
    pub target: NoteId,
    pub confirmed: bool,
}

/// Read-only frame handed to the drawing surface, in stable id order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

/// Hover feedback for an edge under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeHover {
    pub id: EdgeId,
    pub confirmed: bool,
    /// The solidify affordance is only offered on unconfirmed edges.
    pub can_solidify: bool,
}

/// Facade owning simulation state, lifecycle and the artifact sink.
pub struct GraphService<S: ArtifactSink> {
    state: SimulationState,
    viewport: Viewport,
    phase: LifecyclePhase,
    hovered: Option<EdgeId>,
    sink: S,
}

impl<S: ArtifactSink> GraphService<S> {
    /// Creates an idle service; `mount` provides the real viewport.
    pub fn new(sink: S) -> Self {
        Self {
            state: SimulationState::default(),
            viewport: Viewport::new(0.0, 0.0),
            phase: LifecyclePhase::Idle,
            hovered: None,
            sink,
        }
    }

    /// Enters the Running phase for the given viewport.
    ///
    /// Mounting an already-running service just adopts the new viewport
    /// (host window resize).
    pub fn mount(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.phase = LifecyclePhase::Running;
        info!(
            "event=graph_mounted module=service status=ok width={} height={}",
            viewport.width, viewport.height
        );
    }

    /// Leaves the Running phase.
    ///
    /// The host must also cancel its frame registration; a tick that keeps
    /// firing against an unmounted service is a harmless no-op, but the
    /// registration itself would leak per-frame cost indefinitely.
    pub fn unmount(&mut self) {
        self.phase = LifecyclePhase::Idle;
        self.hovered = None;
        info!("event=graph_unmounted module=service status=ok");
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Advances one frame while Running; reports whether it ran.
    ///
    /// The return value is the host's cancellation signal: once it turns
    /// false the frame registration should be dropped.
    pub fn tick(&mut self) -> bool {
        if self.phase != LifecyclePhase::Running {
            return false;
        }
        stepper::step(&mut self.state, self.viewport);
        true
    }

    /// Adopts the current note set, reseeding only on membership change.
    ///
    /// Returns `Ok(true)` when a reseed happened. In-place edits keep the
    /// existing layout untouched; additions and removals rebuild nodes and
    /// edges wholesale, confirmed flags included (reseed is destructive
    /// by design).
    pub fn sync_notes<R: Rng>(
        &mut self,
        notes: &[NoteSnapshot],
        rng: &mut R,
    ) -> Result<bool, SeedError> {
        let incoming: BTreeSet<NoteId> = notes
            .iter()
            .map(|note| note.id)
            .filter(|id| !id.is_nil())
            .collect();
        let current: BTreeSet<NoteId> = self.state.nodes.keys().copied().collect();
        if incoming == current {
            return Ok(false);
        }

        self.state = seed(notes, self.viewport, rng)?;
        self.hovered = None;
        Ok(true)
    }

    /// Read-only render frame in stable id order.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self
                .state
                .nodes
                .values()
                .map(|node| NodeView {
                    id: node.id,
                    x: node.x,
                    y: node.y,
                    label: node.label.clone(),
                    excerpt: node.excerpt.clone(),
                })
                .collect(),
            edges: self
                .state
                .edges
                .values()
                .map(|edge| EdgeView {
                    id: edge.id,
                    source: edge.source,
                    target: edge.target,
                    confirmed: edge.confirmed,
                })
                .collect(),
        }
    }

    /// Updates the hovered edge from a pointer gesture.
    ///
    /// Returns hover feedback for a known edge; `None` clears the state
    /// (pointer left, or the id went stale across a reseed).
    pub fn hover_edge(&mut self, id: Option<EdgeId>) -> Option<EdgeHover> {
        let Some(id) = id else {
            self.hovered = None;
            return None;
        };
        match self.state.edges.get(&id) {
            Some(edge) => {
                self.hovered = Some(id);
                Some(EdgeHover {
                    id,
                    confirmed: edge.confirmed,
                    can_solidify: !edge.confirmed,
                })
            }
            None => {
                warn!("event=hover_stale_edge module=service id={id}");
                self.hovered = None;
                None
            }
        }
    }

    pub fn hovered_edge(&self) -> Option<EdgeId> {
        self.hovered
    }

    /// Confirms a relationship and emits exactly one artifact request.
    ///
    /// # Contract
    /// - Blank `front`/`back` are rejected before any mutation.
    /// - A repeated submission on a confirmed edge is rejected and never
    ///   reaches the sink.
    /// - On success the edge pulls at confirmed strength from the next
    ///   frame on.
    pub fn solidify_edge(
        &mut self,
        id: EdgeId,
        front: &str,
        back: &str,
    ) -> Result<ArtifactDraft, SolidifyError> {
        let front = front.trim();
        let back = back.trim();
        if front.is_empty() {
            return Err(SolidifyError::EmptyField("front"));
        }
        if back.is_empty() {
            return Err(SolidifyError::EmptyField("back"));
        }

        let edge = self
            .state
            .edges
            .get_mut(&id)
            .ok_or(SolidifyError::UnknownEdge(id))?;
        if edge.confirmed {
            return Err(SolidifyError::AlreadyConfirmed(id));
        }
        edge.confirmed = true;

        let draft = ArtifactDraft::new(front, back);
        self.sink.submit(draft.clone());
        info!(
            "event=edge_solidified module=service status=ok edge={id} artifact={}",
            draft.id
        );
        Ok(draft)
    }

    /// Node-click delegation: returns the note id for the host's detail
    /// view, or `None` for a stale id.
    pub fn activate_node(&self, id: NoteId) -> Option<NoteId> {
        if self.state.nodes.contains_key(&id) {
            Some(id)
        } else {
            warn!("event=activate_stale_node module=service id={id}");
            None
        }
    }

    /// Direct state access for diagnostics and tests.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

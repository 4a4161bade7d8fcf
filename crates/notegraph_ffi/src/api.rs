//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the graph engine to Dart via FRB: lifecycle, per-frame ticks,
//!   pointer gestures and the artifact drain.
//! - Hold the one process-global engine instance.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The host drives `graph_tick` from its frame clock and must stop once
//!   `running` turns false after `graph_unmount` (cancellation contract).
//! - Artifact requests queue in Rust and are drained by the host; the
//!   frame loop never blocks on delivery.

use notegraph_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ArtifactDraft, ArtifactSink, EdgeId, GraphService, NoteSnapshot, Viewport,
};
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

static ENGINE: OnceLock<Mutex<GraphService<QueueSink>>> = OnceLock::new();

/// Queueing sink: solidified artifacts wait here until the host drains
/// them, so confirmation never blocks a frame.
#[derive(Default)]
struct QueueSink {
    pending: Vec<ArtifactDraft>,
}

impl ArtifactSink for QueueSink {
    fn submit(&mut self, draft: ArtifactDraft) {
        self.pending.push(draft);
    }
}

fn with_engine<T>(f: impl FnOnce(&mut GraphService<QueueSink>) -> T) -> T {
    let engine = ENGINE.get_or_init(|| Mutex::new(GraphService::new(QueueSink::default())));
    // A poisoned lock only means a panic elsewhere; the state itself is
    // still usable and must stay reachable across the FFI boundary.
    let mut guard = engine.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard)
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking, never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking, never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`; conflicts return an error
///   message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Note payload handed in from the host when the graph (re)seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNoteInput {
    /// Stable note ID in string form.
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Node view for one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNodeView {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub excerpt: Option<String>,
}

/// Edge view for one rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdgeView {
    pub id: String,
    pub source: String,
    pub target: String,
    pub confirmed: bool,
}

/// One frame for the drawing surface, in stable id order.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFrame {
    /// Whether the simulation advanced for this call; once false the host
    /// must cancel its frame registration.
    pub running: bool,
    pub nodes: Vec<GraphNodeView>,
    pub edges: Vec<GraphEdgeView>,
}

/// Generic action response envelope for graph commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Optional subject ID (note or artifact, depending on the call).
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl GraphActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Hover feedback for the edge under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphHoverResponse {
    /// Whether a known edge is now hovered.
    pub hovering: bool,
    pub confirmed: bool,
    /// Whether the solidify affordance should be shown.
    pub can_solidify: bool,
}

/// Queued artifact-creation request for the host's flashcard store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphArtifactView {
    pub id: String,
    pub front: String,
    pub back: String,
    pub level: u32,
    pub next_review_epoch_ms: i64,
}

/// Mounts the visualization and starts the frame lifecycle.
///
/// # FFI contract
/// - Sync call; remounting adopts the new viewport (window resize).
#[flutter_rust_bridge::frb(sync)]
pub fn graph_mount(width: f64, height: f64) {
    with_engine(|engine| engine.mount(Viewport::new(width, height)));
}

/// Stops the frame lifecycle on view teardown.
///
/// # FFI contract
/// - Sync call. The host must also cancel its frame-clock registration;
///   any tick that still fires afterwards is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn graph_unmount() {
    with_engine(|engine| engine.unmount());
}

/// Adopts the current note set, reseeding only on membership change.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Unparseable note IDs are skipped (graph degrades to fewer nodes).
#[flutter_rust_bridge::frb(sync)]
pub fn graph_sync_notes(notes: Vec<GraphNoteInput>) -> GraphActionResponse {
    let mut snapshots = Vec::with_capacity(notes.len());
    let mut skipped = 0usize;
    for note in notes {
        match Uuid::parse_str(&note.id) {
            Ok(id) => {
                let mut snapshot = NoteSnapshot::new(id, note.title, note.content);
                snapshot.tags = note.tags;
                snapshots.push(snapshot);
            }
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("event=ffi_notes_skipped module=ffi count={skipped}");
    }

    let mut rng = rand::thread_rng();
    match with_engine(|engine| engine.sync_notes(&snapshots, &mut rng)) {
        Ok(reseeded) => GraphActionResponse::success(
            format!("Synced {} note(s), reseeded={reseeded}, skipped={skipped}.", snapshots.len()),
            None,
        ),
        Err(err) => GraphActionResponse::failure(format!("graph_sync_notes failed: {err}")),
    }
}

/// Advances one frame (while running) and returns the frame to draw.
///
/// # FFI contract
/// - Sync call, called from the host's frame clock.
/// - `running=false` is the teardown signal: stop scheduling ticks.
#[flutter_rust_bridge::frb(sync)]
pub fn graph_tick() -> GraphFrame {
    with_engine(|engine| {
        let running = engine.tick();
        to_frame(running, engine)
    })
}

/// Returns the current frame without advancing the simulation.
#[flutter_rust_bridge::frb(sync)]
pub fn graph_snapshot() -> GraphFrame {
    with_engine(|engine| {
        let running = engine.phase() == notegraph_core::LifecyclePhase::Running;
        to_frame(running, engine)
    })
}

/// Reports pointer hover entering (`Some` id) or leaving (`None`) an edge.
///
/// # FFI contract
/// - Sync call, never panics; malformed or stale ids clear the hover.
#[flutter_rust_bridge::frb(sync)]
pub fn graph_hover_edge(edge_id: Option<String>) -> GraphHoverResponse {
    let parsed = match edge_id {
        Some(raw) => match raw.parse::<EdgeId>() {
            Ok(id) => Some(id),
            Err(_) => {
                // Treat a malformed id like leaving the edge.
                None
            }
        },
        None => None,
    };

    match with_engine(|engine| engine.hover_edge(parsed)) {
        Some(hover) => GraphHoverResponse {
            hovering: true,
            confirmed: hover.confirmed,
            can_solidify: hover.can_solidify,
        },
        None => GraphHoverResponse {
            hovering: false,
            confirmed: false,
            can_solidify: false,
        },
    }
}

/// Node-click delegation; returns the note id for the host detail view.
///
/// # FFI contract
/// - Sync call, never panics; stale ids return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn graph_activate_node(node_id: String) -> GraphActionResponse {
    let id = match Uuid::parse_str(&node_id) {
        Ok(id) => id,
        Err(err) => return GraphActionResponse::failure(format!("invalid node id: {err}")),
    };
    match with_engine(|engine| engine.activate_node(id)) {
        Some(note_id) => GraphActionResponse::success("Open note detail.", Some(note_id.to_string())),
        None => GraphActionResponse::failure(format!("node not found: {id}")),
    }
}

/// Confirms a relationship with the submitted front/back fields.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Validation failures return `ok=false` and mutate nothing; the host
///   keeps the form open with the message.
/// - On success exactly one artifact request is queued for draining.
#[flutter_rust_bridge::frb(sync)]
pub fn graph_solidify_edge(edge_id: String, front: String, back: String) -> GraphActionResponse {
    let id = match edge_id.parse::<EdgeId>() {
        Ok(id) => id,
        Err(err) => return GraphActionResponse::failure(format!("invalid edge id: {err}")),
    };
    match with_engine(|engine| engine.solidify_edge(id, &front, &back)) {
        Ok(draft) => GraphActionResponse::success("Relationship solidified.", Some(draft.id.to_string())),
        Err(err) => GraphActionResponse::failure(format!("graph_solidify_edge failed: {err}")),
    }
}

/// Drains queued artifact-creation requests for the host flashcard store.
///
/// # FFI contract
/// - Sync call; every draft is handed out exactly once.
#[flutter_rust_bridge::frb(sync)]
pub fn graph_drain_artifacts() -> Vec<GraphArtifactView> {
    with_engine(|engine| {
        engine
            .sink_mut()
            .pending
            .drain(..)
            .map(|draft| GraphArtifactView {
                id: draft.id.to_string(),
                front: draft.front,
                back: draft.back,
                level: draft.level,
                next_review_epoch_ms: draft.next_review_epoch_ms,
            })
            .collect()
    })
}

fn to_frame(running: bool, engine: &GraphService<QueueSink>) -> GraphFrame {
    let snapshot = engine.snapshot();
    GraphFrame {
        running,
        nodes: snapshot
            .nodes
            .into_iter()
            .map(|node| GraphNodeView {
                id: node.id.to_string(),
                x: node.x,
                y: node.y,
                label: node.label,
                excerpt: node.excerpt,
            })
            .collect(),
        edges: snapshot
            .edges
            .into_iter()
            .map(|edge| GraphEdgeView {
                id: edge.id.to_string(),
                source: edge.source.to_string(),
                target: edge.target.to_string(),
                confirmed: edge.confirmed,
            })
            .collect(),
    }
}

//! One-shot randomized seeding and edge-hypothesis generation.
//!
//! # Responsibility
//! - Place one node per visible note at a random in-bounds position.
//! - Generate candidate edges once per seed: shared tags always link a
//!   pair, otherwise a 10% serendipity draw decides.
//!
//! # Invariants
//! - Malformed notes (nil id) and duplicate ids are skipped, never fatal;
//!   the graph degrades to fewer nodes.
//! - Every generated edge references two seeded nodes and starts
//!   unconfirmed.
//! - Hypothesis generation never re-runs mid-simulation.

use crate::model::graph::{Edge, EdgeId, Node, SimulationState, Viewport};
use crate::model::note::{derive_excerpt, NoteSnapshot};
use crate::sim::VIEWPORT_MARGIN;
use log::{info, warn};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Chance that an unrelated note pair still gets a candidate edge.
///
/// Serendipity fallback for sparse tag data: without it, untagged
/// collections would never surface any relationship to confirm.
pub const HYPOTHESIS_EDGE_PROBABILITY: f64 = 0.10;

/// Seed-time failure. Anything note-shaped that is merely malformed is
/// skipped instead of reported here.
#[derive(Debug)]
pub enum SeedError {
    /// Viewport cannot contain the placement margin band.
    ViewportTooSmall { width: f64, height: f64 },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ViewportTooSmall { width, height } => write!(
                f,
                "viewport {width}x{height} is too small for the {VIEWPORT_MARGIN}px layout margin"
            ),
        }
    }
}

impl Error for SeedError {}

/// Builds fresh simulation state from the current note set.
///
/// Positions are uniform within the margin band, velocities zero. The
/// caller owns the generator, so tests can seed deterministically while
/// production uses a thread RNG.
pub fn seed<R: Rng>(
    notes: &[NoteSnapshot],
    viewport: Viewport,
    rng: &mut R,
) -> Result<SimulationState, SeedError> {
    let max_x = viewport.width - VIEWPORT_MARGIN;
    let max_y = viewport.height - VIEWPORT_MARGIN;
    // Non-finite host dimensions must fail here, not panic inside the
    // uniform sampler.
    if !max_x.is_finite()
        || !max_y.is_finite()
        || max_x <= VIEWPORT_MARGIN
        || max_y <= VIEWPORT_MARGIN
    {
        return Err(SeedError::ViewportTooSmall {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let mut state = SimulationState::default();
    let mut accepted: Vec<&NoteSnapshot> = Vec::with_capacity(notes.len());
    let mut skipped = 0usize;

    for note in notes {
        if note.id.is_nil() || state.nodes.contains_key(&note.id) {
            skipped += 1;
            warn!(
                "event=seed_note_skipped module=sim reason=nil_or_duplicate_id id={}",
                note.id
            );
            continue;
        }
        state.nodes.insert(
            note.id,
            Node {
                id: note.id,
                label: note.title.clone(),
                excerpt: derive_excerpt(&note.content),
                x: rng.gen_range(VIEWPORT_MARGIN..max_x),
                y: rng.gen_range(VIEWPORT_MARGIN..max_y),
                vx: 0.0,
                vy: 0.0,
            },
        );
        accepted.push(note);
    }

    for (index, first) in accepted.iter().enumerate() {
        for second in accepted.iter().skip(index + 1) {
            // Tag-based links are certain; the random draw only decides
            // otherwise-unrelated pairs.
            let related =
                first.shares_tag_with(second) || rng.gen_bool(HYPOTHESIS_EDGE_PROBABILITY);
            if !related {
                continue;
            }
            let id = EdgeId::new(first.id, second.id);
            state
                .edges
                .entry(id)
                .or_insert_with(|| Edge::hypothesis(first.id, second.id));
        }
    }

    info!(
        "event=graph_seeded module=sim status=ok nodes={} edges={} skipped={}",
        state.nodes.len(),
        state.edges.len(),
        skipped
    );
    Ok(state)
}

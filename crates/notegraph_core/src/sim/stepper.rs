//! Per-frame force integration for the note layout.
//!
//! # Responsibility
//! - Advance every node one fixed Euler step: pairwise repulsion, edge
//!   attraction, center gravity, damping, boundary reflection.
//!
//! # Invariants
//! - Positions and velocities stay finite; the distance floor absorbs
//!   coincident nodes before any division happens.
//! - A dangling edge is skipped for the frame, never fatal.
//! - No clock and no randomness: one step is a pure function of state.

use crate::model::graph::{SimulationState, Viewport};
use crate::model::note::NoteId;
use crate::sim::VIEWPORT_MARGIN;
use std::collections::BTreeMap;

/// Pairwise repulsion scale (`k_rep / dist^2` falloff).
pub const REPULSION_STRENGTH: f64 = 2000.0;
/// Spring factor for unconfirmed candidate edges.
pub const HYPOTHESIS_ATTRACTION: f64 = 0.01;
/// Spring factor for confirmed edges; visibly tighter than a hypothesis.
pub const CONFIRMED_ATTRACTION: f64 = 0.05;
/// Pull toward the viewport center, against long-term drift.
pub const CENTER_GRAVITY: f64 = 0.005;
/// Velocity retained per frame after force application.
pub const VELOCITY_DAMPING: f64 = 0.9;
/// Distance floor that avoids the division singularity.
pub const MIN_DISTANCE: f64 = 1.0;

/// Advances the simulation by exactly one frame.
///
/// Fixed per-step integration, deliberately not scaled by wall-clock
/// delta: the layout is decorative, not a physical simulation.
pub fn step(state: &mut SimulationState, viewport: Viewport) {
    if state.nodes.is_empty() {
        return;
    }

    let positions: Vec<(NoteId, f64, f64)> = state
        .nodes
        .values()
        .map(|node| (node.id, node.x, node.y))
        .collect();
    let mut forces: BTreeMap<NoteId, (f64, f64)> = positions
        .iter()
        .map(|(id, _, _)| (*id, (0.0, 0.0)))
        .collect();

    // Pairwise repulsion, applied symmetrically per pair.
    for (index, &(first, x1, y1)) in positions.iter().enumerate() {
        for &(second, x2, y2) in positions.iter().skip(index + 1) {
            let dx = x1 - x2;
            let dy = y1 - y2;
            let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let magnitude = REPULSION_STRENGTH / (dist * dist);
            let fx = dx / dist * magnitude;
            let fy = dy / dist * magnitude;
            if let Some(force) = forces.get_mut(&first) {
                force.0 += fx;
                force.1 += fy;
            }
            if let Some(force) = forces.get_mut(&second) {
                force.0 -= fx;
                force.1 -= fy;
            }
        }
    }

    // Edge attraction; each endpoint is pulled toward the other.
    for edge in state.edges.values() {
        let (Some(source), Some(target)) = (
            state.nodes.get(&edge.source),
            state.nodes.get(&edge.target),
        ) else {
            // Dangling endpoint from a stale id: skip for this frame.
            continue;
        };
        let strength = if edge.confirmed {
            CONFIRMED_ATTRACTION
        } else {
            HYPOTHESIS_ATTRACTION
        };
        let fx = (target.x - source.x) * strength;
        let fy = (target.y - source.y) * strength;
        if let Some(force) = forces.get_mut(&edge.source) {
            force.0 += fx;
            force.1 += fy;
        }
        if let Some(force) = forces.get_mut(&edge.target) {
            force.0 -= fx;
            force.1 -= fy;
        }
    }

    let (center_x, center_y) = viewport.center();
    let max_x = viewport.width - VIEWPORT_MARGIN;
    let max_y = viewport.height - VIEWPORT_MARGIN;

    for node in state.nodes.values_mut() {
        let (mut fx, mut fy) = forces.get(&node.id).copied().unwrap_or((0.0, 0.0));
        fx += (center_x - node.x) * CENTER_GRAVITY;
        fy += (center_y - node.y) * CENTER_GRAVITY;

        node.vx = (node.vx + fx) * VELOCITY_DAMPING;
        node.vy = (node.vy + fy) * VELOCITY_DAMPING;
        node.x += node.vx;
        node.y += node.vy;

        // Elastic bounce: invert velocity at the margin band instead of
        // clamping position, so momentum is preserved.
        if node.x < VIEWPORT_MARGIN || node.x > max_x {
            node.vx = -node.vx;
        }
        if node.y < VIEWPORT_MARGIN || node.y > max_y {
            node.vy = -node.vy;
        }
    }
}

//! Layout simulation: randomized seeding and the per-frame force stepper.
//!
//! # Responsibility
//! - Turn a note snapshot into randomized initial layout state.
//! - Advance that state one frame at a time with a fixed force model.
//!
//! # Invariants
//! - Randomness only enters at seed time, through an injected generator;
//!   the stepper is a deterministic function of the current state.
//! - Nodes stay inside the margin band `[50, w-50] x [50, h-50]`.

pub mod seed;
pub mod stepper;

/// Placement margin; nodes seed and bounce inside this band.
pub const VIEWPORT_MARGIN: f64 = 50.0;

//! Simulation graph model: nodes, edges and the owned aggregate state.
//!
//! # Responsibility
//! - Define per-note position/velocity state and candidate relationships.
//! - Keep edge identity canonical per unordered note pair.
//!
//! # Invariants
//! - `EdgeId` stores its endpoints sorted, so `{a,b}` and `{b,a}` produce
//!   the same identity and at most one edge can exist per pair.
//! - `Edge::confirmed` is monotonic; the interaction protocol only ever
//!   promotes it, never clears it (short of a full reseed).
//! - Ordered maps give the stepper deterministic iteration and rendering a
//!   stable snapshot order.

use crate::model::note::NoteId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Canonical identity of the unordered note pair an edge connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId {
    lo: NoteId,
    hi: NoteId,
}

impl EdgeId {
    /// Builds the canonical id for a note pair, in either endpoint order.
    pub fn new(a: NoteId, b: NoteId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Returns the sorted endpoint pair `(lo, hi)`.
    pub fn endpoints(&self) -> (NoteId, NoteId) {
        (self.lo, self.hi)
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.lo, self.hi)
    }
}

/// Parse failure for the `"<lo>:<hi>"` edge-id wire form.
#[derive(Debug)]
pub struct EdgeIdParseError(String);

impl Display for EdgeIdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid edge id: {}", self.0)
    }
}

impl Error for EdgeIdParseError {}

impl FromStr for EdgeId {
    type Err = EdgeIdParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (first, second) = raw
            .split_once(':')
            .ok_or_else(|| EdgeIdParseError(format!("missing `:` separator in `{raw}`")))?;
        let first = Uuid::parse_str(first)
            .map_err(|err| EdgeIdParseError(format!("bad first endpoint in `{raw}`: {err}")))?;
        let second = Uuid::parse_str(second)
            .map_err(|err| EdgeIdParseError(format!("bad second endpoint in `{raw}`: {err}")))?;
        Ok(Self::new(first, second))
    }
}

// Serialized as the string wire form so edge-keyed maps stay JSON-safe.
impl Serialize for EdgeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EdgeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Simulated position/velocity state for one note in the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identity of the source note this node represents.
    pub id: NoteId,
    /// Note title, retained for rendering only.
    pub label: String,
    /// Sanitized content excerpt, retained for rendering only.
    pub excerpt: Option<String>,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

/// Candidate (or user-confirmed) relationship between two notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    /// Lower endpoint of the canonical pair.
    pub source: NoteId,
    /// Higher endpoint of the canonical pair.
    pub target: NoteId,
    /// Promoted to `true` once the user solidifies the relationship.
    pub confirmed: bool,
}

impl Edge {
    /// Creates an unconfirmed hypothesis edge for a note pair.
    pub fn hypothesis(a: NoteId, b: NoteId) -> Self {
        let id = EdgeId::new(a, b);
        let (source, target) = id.endpoints();
        Self {
            id,
            source,
            target,
            confirmed: false,
        }
    }

    /// Returns the opposite endpoint, or `None` when `id` is not an endpoint.
    pub fn other_endpoint(&self, id: NoteId) -> Option<NoteId> {
        if id == self.source {
            Some(self.target)
        } else if id == self.target {
            Some(self.source)
        } else {
            None
        }
    }
}

/// Viewport dimensions the layout runs inside, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center point the gravity force pulls toward.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// The aggregate simulation state owned by the graph service.
///
/// Both the stepper and the interaction protocol mutate this one object;
/// it is rebuilt wholesale on reseed, never incrementally diffed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationState {
    pub nodes: BTreeMap<NoteId, Node>,
    pub edges: BTreeMap<EdgeId, Edge>,
}

impl SimulationState {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

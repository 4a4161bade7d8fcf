//! Read-only note projection consumed at seed time.
//!
//! # Responsibility
//! - Define the note snapshot shape handed in by the host at seed time.
//! - Derive the plain-text excerpt that is the only note content the
//!   engine retains for rendering.
//!
//! # Invariants
//! - The engine never mutates note content; snapshots are read-only input.
//! - Tag comparison is case-insensitive and whitespace-trimmed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stable identifier of a note in the host application.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

const EXCERPT_MAX_CHARS: usize = 80;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Read-only view of one note, taken from the host when the graph seeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSnapshot {
    /// Stable note ID; becomes the node ID in the simulation.
    pub id: NoteId,
    /// Note title used as the node label.
    pub title: String,
    /// Markdown body; only consumed for excerpt derivation.
    pub content: String,
    /// Raw tag values as stored by the host (not yet normalized).
    pub tags: Vec<String>,
}

impl NoteSnapshot {
    /// Creates a snapshot without tags.
    pub fn new(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    /// Returns trimmed, lowercased, deduplicated tags.
    ///
    /// Hypothesis generation compares these sets, so `"Work"` and `"work"`
    /// count as the same tag.
    pub fn normalized_tags(&self) -> BTreeSet<String> {
        self.tags
            .iter()
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Returns whether two notes share at least one normalized tag.
    pub fn shares_tag_with(&self, other: &NoteSnapshot) -> bool {
        !self.normalized_tags().is_disjoint(&other.normalized_tags())
    }
}

/// Derives a sanitized plain-text excerpt from markdown content.
///
/// Images are dropped entirely, links keep their text, markdown syntax
/// characters are stripped and whitespace collapsed. Returns `None` when
/// nothing readable remains.
pub fn derive_excerpt(content: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let link_text_only = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let plain = MARKDOWN_SYMBOL_RE.replace_all(&link_text_only, " ");
    let collapsed = WHITESPACE_RE.replace_all(&plain, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut excerpt: String = trimmed.chars().take(EXCERPT_MAX_CHARS).collect();
    if trimmed.chars().count() > EXCERPT_MAX_CHARS {
        excerpt.push_str("...");
    }
    Some(excerpt)
}

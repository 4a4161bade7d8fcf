//! Derived recall-artifact request model.
//!
//! # Responsibility
//! - Define the artifact-creation request emitted when an edge is
//!   solidified.
//!
//! # Invariants
//! - A draft is built exactly once per successful confirmation.
//! - New drafts always start at `level = 0` with `next_review` = now.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Creation request for one front/back recall artifact, handed to the
/// external flashcard store when a relationship is solidified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDraft {
    /// Fresh stable ID for the artifact being created.
    pub id: Uuid,
    /// Question side, as entered in the confirmation form.
    pub front: String,
    /// Answer side, as entered in the confirmation form.
    pub back: String,
    /// Spaced-repetition level; new artifacts start at zero.
    pub level: u32,
    /// First review due time, Unix epoch milliseconds.
    pub next_review_epoch_ms: i64,
}

impl ArtifactDraft {
    /// Builds a new draft due for review immediately.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            front: front.into(),
            back: back.into(),
            level: 0,
            next_review_epoch_ms: now_epoch_ms(),
        }
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::ArtifactDraft;

    #[test]
    fn new_draft_starts_at_level_zero_due_now() {
        let draft = ArtifactDraft::new("Q", "A");
        assert_eq!(draft.level, 0);
        assert!(draft.next_review_epoch_ms > 0);
        assert_eq!(draft.front, "Q");
        assert_eq!(draft.back, "A");
    }

    #[test]
    fn drafts_get_distinct_ids() {
        assert_ne!(ArtifactDraft::new("Q", "A").id, ArtifactDraft::new("Q", "A").id);
    }
}

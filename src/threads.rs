//! Thread reconstruction: map a comment to its owning submission by walking
//! parent links through the retained record set.
//!
//! Input chronology guarantees a retained comment's ancestors are already
//! indexed, so one forward pass suffices. Walks are cycle-checked: the
//! visited set bounds every walk by the number of indexed comments, so even
//! corrupted input terminates, surfacing as a [`ChronologyViolation`]
//! instead of looping. Legitimate reply chains of any depth resolve.

use ahash::{AHashMap, AHashSet};
use std::fmt;

use crate::records::{COMMENT_PREFIX, SUBMISSION_PREFIX};

/// Outcome of resolving a comment's owning submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The full `t3_` id of the owning submission.
    Submission(String),
    /// A link in the chain points outside the retained set.
    Unresolved,
}

/// A parent walk revisited an id, which the chronological-input
/// precondition rules out.
#[derive(Clone, Debug)]
pub struct ChronologyViolation {
    pub start: String,
    /// Links followed before the revisit.
    pub depth: usize,
}

impl fmt::Display for ChronologyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parent cycle while resolving {} (after {} links)", self.start, self.depth)
    }
}

impl std::error::Error for ChronologyViolation {}

/// Accumulating index of retained submissions and comment parent links,
/// built during the single forward pass.
#[derive(Default)]
pub struct ThreadIndex {
    submissions: AHashSet<String>,
    parents: AHashMap<String, String>, // comment full id -> parent full id
}

impl ThreadIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a retained submission by full `t3_` id.
    pub fn insert_submission(&mut self, full_id: &str) {
        self.submissions.insert(full_id.to_string());
    }

    /// Register a retained comment's parent link by full `t1_` id.
    pub fn insert_comment(&mut self, full_id: &str, parent_id: &str) {
        self.parents.insert(full_id.to_string(), parent_id.to_string());
    }

    /// True iff `parent_id` names a retained submission or a retained
    /// comment — the thread-membership retention test.
    pub fn contains(&self, parent_id: &str) -> bool {
        if parent_id.starts_with(SUBMISSION_PREFIX) {
            self.submissions.contains(parent_id)
        } else if parent_id.starts_with(COMMENT_PREFIX) {
            self.parents.contains_key(parent_id)
        } else {
            false
        }
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.len()
    }
    pub fn comment_count(&self) -> usize {
        self.parents.len()
    }

    /// Walk parent links from `parent_id` until a submission id is reached
    /// or a link leaves the retained set. A submission id is terminal even
    /// if that submission was never retained (callers gate on retention
    /// separately). Every step visits a new id or errors, so the walk is
    /// bounded by the index size.
    pub fn resolve(&self, parent_id: &str) -> Result<Resolution, ChronologyViolation> {
        let mut current = parent_id;
        let mut visited: AHashSet<&str> = AHashSet::new();
        loop {
            if current.starts_with(SUBMISSION_PREFIX) {
                return Ok(Resolution::Submission(current.to_string()));
            }
            if !visited.insert(current) {
                return Err(ChronologyViolation {
                    start: parent_id.to_string(),
                    depth: visited.len(),
                });
            }
            match self.parents.get(current) {
                Some(next) => current = next,
                None => return Ok(Resolution::Unresolved),
            }
        }
    }
}

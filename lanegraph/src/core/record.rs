use chrono::{DateTime, Utc};
use smallvec::SmallVec;

/// Ordered parent ids; inline capacity covers everything short of an
/// octopus merge.
pub type ParentIds = SmallVec<[String; 2]>;

/// A commit as delivered by the feed.
///
/// The feed is expected in reverse-topological order (children before
/// parents). `parent_ids` may name commits outside the feed when history
/// is truncated.
#[derive(Debug, Clone)]
pub struct CommitRecord {
    /// Unique commit ID (SHA)
    pub id: String,
    /// Parent commit IDs; the first entry is the primary parent
    pub parent_ids: ParentIds,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Author name
    pub author: String,
    /// Commit message (short)
    pub message: String,
}

impl CommitRecord {
    pub fn new(
        id: String,
        parent_ids: ParentIds,
        timestamp: DateTime<Utc>,
        author: String,
        message: String,
    ) -> Self {
        Self {
            id,
            parent_ids,
            timestamp,
            author,
            message,
        }
    }

    /// Check if this is a root commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parent_ids.is_empty()
    }

    /// Check if this is a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parent_ids.len() > 1
    }

    /// The branch the commit was made on, if it has any parent at all
    pub fn primary_parent(&self) -> Option<&str> {
        self.parent_ids.first().map(String::as_str)
    }
}

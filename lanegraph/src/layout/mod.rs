pub mod edges;
pub mod lanes;

pub use edges::build_edges;
pub use lanes::{assign_lanes, LaneAllocator, LaneIdx};

use std::collections::HashMap;

use serde::Serialize;

use crate::core::{CommitRecord, Edge};

/// Output of one full pass over the commit feed.
///
/// A refresh of the underlying history rebuilds the whole layout; when
/// passes overlap, the consumer keeps whichever result finished last.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    /// Commit id -> lane index
    pub lanes: HashMap<String, LaneIdx>,
    /// Edges in feed order
    pub edges: Vec<Edge>,
    /// Slots opened by the allocator, dangling reservations included
    pub lane_count: usize,
}

/// Run the lane allocator and the edge builder over one feed pass.
///
/// `commits` must be in reverse-topological order (children before
/// parents). Out-of-order input yields a structurally valid but visually
/// suboptimal layout rather than an error.
pub fn layout(commits: &[CommitRecord]) -> Layout {
    let mut allocator = LaneAllocator::new();
    for commit in commits {
        allocator.assign_lane(commit);
    }

    let lane_count = allocator.lane_count();
    let lanes = allocator.into_assignments();
    let edges = build_edges(commits, &lanes);
    tracing::debug!(
        commits = commits.len(),
        edges = edges.len(),
        lane_count,
        "layout pass complete"
    );

    Layout {
        lanes,
        edges,
        lane_count,
    }
}

impl Layout {
    /// Lane assigned to `id`, if the commit was in the feed.
    pub fn lane_of(&self, id: &str) -> Option<LaneIdx> {
        self.lanes.get(id).copied()
    }

    /// Highest lane actually assigned to a commit.
    pub fn max_lane(&self) -> Option<LaneIdx> {
        self.lanes.values().copied().max()
    }

    /// Summarize the layout against the feed it was built from.
    pub fn stats(&self, commits: &[CommitRecord]) -> LayoutStats {
        LayoutStats {
            total_commits: commits.len(),
            total_edges: self.edges.len(),
            merge_edges: self.edges.iter().filter(|e| e.is_merge).count(),
            merge_commits: commits.iter().filter(|c| c.is_merge()).count(),
            root_commits: commits.iter().filter(|c| c.is_root()).count(),
            lane_count: self.lane_count,
            max_lane: self.max_lane().unwrap_or(0),
        }
    }
}

/// Summary counts for a computed layout.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutStats {
    pub total_commits: usize,
    pub total_edges: usize,
    pub merge_edges: usize,
    pub merge_commits: usize,
    pub root_commits: usize,
    pub lane_count: usize,
    pub max_lane: usize,
}

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::core::CommitRecord;

/// A lane is a horizontal track index in the rendered graph; lower indices
/// render closer to the edge.
pub type LaneIdx = usize;

/// Single-pass lane allocator over a reverse-topologically ordered feed.
/// Strategy:
/// - a commit takes the lane an earlier child reserved for it; else the
///   first empty slot; else a freshly appended slot
/// - the commit's slot is freed and re-reserved for its primary parent, so
///   the primary lineage continues straight down
/// - each merge parent holds the leftmost empty slot of its own
/// - when two children claim the same parent, the first one processed wins
///
/// The pool only grows within a pass; its size is bounded by the widest set
/// of concurrently open lineages. Order violations in the feed degrade to a
/// suboptimal layout, never a panic.
pub struct LaneAllocator {
    /// Slot pool; `Some(id)` holds the lane for a pending parent.
    slots: SmallVec<[Option<String>; 16]>,
    /// Pending reservations: parent id -> lane held for it.
    pending: HashMap<String, LaneIdx>,
    /// Lanes already handed out, keyed by commit id.
    assigned: HashMap<String, LaneIdx>,
}

impl LaneAllocator {
    pub fn new() -> Self {
        Self {
            slots: SmallVec::new(),
            pending: HashMap::new(),
            assigned: HashMap::new(),
        }
    }

    /// Assign a lane to `commit` and reserve lanes for its parents.
    pub fn assign_lane(&mut self, commit: &CommitRecord) -> LaneIdx {
        let lane = match self.pending.remove(commit.id.as_str()) {
            Some(lane) => {
                self.slots[lane] = None;
                lane
            }
            // A branch tip or root becoming visible
            None => self.first_free_slot(),
        };
        self.assigned.insert(commit.id.clone(), lane);

        let mut parents = commit.parent_ids.iter();

        // Primary parent inherits the lane the commit just freed
        if let Some(primary) = parents.next() {
            if !self.is_claimed(primary) {
                self.slots[lane] = Some(primary.clone());
                self.pending.insert(primary.clone(), lane);
            }
        }

        // Merge parents each hold a lane of their own
        for parent in parents {
            if !self.is_claimed(parent) {
                let slot = self.first_free_slot();
                self.slots[slot] = Some(parent.clone());
                self.pending.insert(parent.clone(), slot);
            }
        }

        lane
    }

    /// First empty slot, extending the pool when every slot is held.
    fn first_free_slot(&mut self) -> LaneIdx {
        match self.slots.iter().position(|slot| slot.is_none()) {
            Some(idx) => idx,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        }
    }

    /// Claimed ids keep their lane; covers pending reservations and commits
    /// already laid out, so an out-of-order feed cannot leak held slots.
    fn is_claimed(&self, id: &str) -> bool {
        self.pending.contains_key(id) || self.assigned.contains_key(id)
    }

    /// Slots opened during the pass, dangling reservations included.
    pub fn lane_count(&self) -> usize {
        self.slots.len()
    }

    /// Consume the allocator, yielding the commit -> lane mapping.
    pub fn into_assignments(self) -> HashMap<String, LaneIdx> {
        self.assigned
    }
}

impl Default for LaneAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Assign lanes for a full feed in one pass.
pub fn assign_lanes(commits: &[CommitRecord]) -> HashMap<String, LaneIdx> {
    let mut allocator = LaneAllocator::new();
    for commit in commits {
        allocator.assign_lane(commit);
    }
    allocator.into_assignments()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn commit(id: &str, parents: &[&str]) -> CommitRecord {
        CommitRecord::new(
            id.to_string(),
            parents.iter().map(|p| (*p).to_string()).collect(),
            Utc::now(),
            "Author".to_string(),
            format!("commit {id}"),
        )
    }

    #[test]
    fn linear_history_reuses_lane() {
        let feed = [commit("C", &["B"]), commit("B", &["A"]), commit("A", &[])];
        let lanes = assign_lanes(&feed);
        assert_eq!(lanes["C"], 0);
        assert_eq!(lanes["B"], 0);
        assert_eq!(lanes["A"], 0);
    }

    #[test]
    fn merge_parents_split_lanes() {
        let mut allocator = LaneAllocator::new();
        // Merge M with primary parent B and merge parent C
        let lane_m = allocator.assign_lane(&commit("M", &["B", "C"]));
        assert_eq!(lane_m, 0);
        assert_eq!(allocator.assign_lane(&commit("C", &["A"])), 1);
        assert_eq!(allocator.assign_lane(&commit("B", &["A"])), 0);
    }

    #[test]
    fn first_child_processed_fixes_parent_lane() {
        let feed = [commit("X", &["A"]), commit("Y", &["A"]), commit("A", &[])];
        let lanes = assign_lanes(&feed);
        // X reserved A first, so A stays on X's lane
        assert_eq!(lanes["X"], 0);
        assert_eq!(lanes["Y"], 1);
        assert_eq!(lanes["A"], 0);
    }

    #[test]
    fn root_frees_lane_for_next_tip() {
        let feed = [commit("B", &["A"]), commit("A", &[]), commit("T", &[])];
        let lanes = assign_lanes(&feed);
        assert_eq!(lanes["A"], 0);
        // A reserved nothing, so the next tip reuses lane 0
        assert_eq!(lanes["T"], 0);
    }

    #[test]
    fn independent_tips_occupy_distinct_lanes() {
        let feed = [
            commit("T1", &["P1"]),
            commit("T2", &["P2"]),
            commit("P1", &[]),
            commit("P2", &[]),
        ];
        let lanes = assign_lanes(&feed);
        assert_eq!(lanes["T1"], 0);
        assert_eq!(lanes["T2"], 1);
        assert_eq!(lanes["P1"], 0);
        assert_eq!(lanes["P2"], 1);
    }

    #[test]
    fn dangling_parent_reservation_is_unused() {
        let mut allocator = LaneAllocator::new();
        allocator.assign_lane(&commit("A", &["ghost"]));
        // The reservation holds a slot but no commit ever consumes it
        assert_eq!(allocator.lane_count(), 1);
        let lanes = allocator.into_assignments();
        assert_eq!(lanes.len(), 1);
        assert_eq!(lanes["A"], 0);
    }

    #[test]
    fn pool_never_exceeds_concurrent_branch_width() {
        // Two lineages at most are open at any point
        let feed = [
            commit("M", &["B", "C"]),
            commit("C", &["A"]),
            commit("B", &["A"]),
            commit("A", &[]),
        ];
        let mut allocator = LaneAllocator::new();
        for c in &feed {
            allocator.assign_lane(c);
        }
        assert_eq!(allocator.lane_count(), 2);
    }

    #[test]
    fn identical_feeds_produce_identical_lanes() {
        let feed = [
            commit("M", &["B", "C"]),
            commit("C", &["A"]),
            commit("B", &["A"]),
            commit("A", &[]),
        ];
        assert_eq!(assign_lanes(&feed), assign_lanes(&feed));
    }
}

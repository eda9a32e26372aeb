use std::collections::HashMap;

use crate::core::{CommitRecord, Edge};

use super::LaneIdx;

/// Emit one edge per (commit, parent) pair whose parent has a lane.
///
/// Feed order fixes the output order. Parents outside the mapping
/// (truncated history) are skipped; duplicated parent entries are kept,
/// one edge each.
pub fn build_edges(commits: &[CommitRecord], lanes: &HashMap<String, LaneIdx>) -> Vec<Edge> {
    let mut edges = Vec::new();

    for commit in commits {
        let from_lane = match lanes.get(commit.id.as_str()) {
            Some(lane) => *lane,
            None => continue,
        };

        for (idx, parent_id) in commit.parent_ids.iter().enumerate() {
            let to_lane = match lanes.get(parent_id.as_str()) {
                Some(lane) => *lane,
                None => continue,
            };

            let edge = if idx > 0 {
                Edge::merge(commit.id.clone(), parent_id.clone(), from_lane, to_lane)
            } else {
                Edge::parent(commit.id.clone(), parent_id.clone(), from_lane, to_lane)
            };
            edges.push(edge);
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EdgeStyle;
    use chrono::Utc;

    fn commit(id: &str, parents: &[&str]) -> CommitRecord {
        CommitRecord::new(
            id.to_string(),
            parents.iter().map(|p| (*p).to_string()).collect(),
            Utc::now(),
            "Author".to_string(),
            String::new(),
        )
    }

    fn lane_map(entries: &[(&str, LaneIdx)]) -> HashMap<String, LaneIdx> {
        entries.iter().map(|(id, l)| ((*id).to_string(), *l)).collect()
    }

    #[test]
    fn same_lane_parent_is_straight() {
        let feed = [commit("B", &["A"]), commit("A", &[])];
        let lanes = lane_map(&[("B", 0), ("A", 0)]);
        let edges = build_edges(&feed, &lanes);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from_id, "B");
        assert_eq!(edges[0].to_id, "A");
        assert!(!edges[0].is_merge);
        assert_eq!(edges[0].style, EdgeStyle::Straight);
    }

    #[test]
    fn merge_parent_is_flagged_and_curved() {
        let feed = [commit("M", &["B", "C"])];
        let lanes = lane_map(&[("M", 0), ("B", 0), ("C", 1)]);
        let edges = build_edges(&feed, &lanes);

        assert_eq!(edges.len(), 2);
        assert!(!edges[0].is_merge);
        assert_eq!(edges[0].style, EdgeStyle::Straight);
        assert!(edges[1].is_merge);
        assert_eq!(edges[1].style, EdgeStyle::Curved);
    }

    #[test]
    fn color_follows_child_for_primary_and_parent_for_merge() {
        let feed = [commit("M", &["B", "C"])];
        let lanes = lane_map(&[("M", 0), ("B", 2), ("C", 1)]);
        let edges = build_edges(&feed, &lanes);

        // Primary edge colored by the child's lane even across lanes
        assert_eq!(edges[0].color_lane(), 0);
        // Merge edge colored by the parent's lane
        assert_eq!(edges[1].color_lane(), 1);
    }

    #[test]
    fn missing_parent_emits_nothing() {
        let feed = [commit("B", &["gone", "A"]), commit("A", &[])];
        let lanes = lane_map(&[("B", 0), ("A", 0)]);
        let edges = build_edges(&feed, &lanes);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].to_id, "A");
        // The surviving pair keeps its merge position
        assert!(edges[0].is_merge);
    }

    #[test]
    fn duplicated_parent_entries_are_not_deduplicated() {
        let feed = [commit("B", &["A", "A"]), commit("A", &[])];
        let lanes = lane_map(&[("B", 0), ("A", 0)]);
        let edges = build_edges(&feed, &lanes);

        assert_eq!(edges.len(), 2);
        assert!(!edges[0].is_merge);
        assert!(edges[1].is_merge);
    }
}

use serde::Serialize;

use crate::layout::LaneIdx;

/// An edge connecting a commit to one of its parents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Child commit ID
    pub from_id: String,
    /// Parent commit ID
    pub to_id: String,
    /// Lane of the child commit
    pub from_lane: LaneIdx,
    /// Lane of the parent commit
    pub to_lane: LaneIdx,
    /// True when the parent is not the primary parent
    pub is_merge: bool,
    /// Rendering hint derived from the lane endpoints
    pub style: EdgeStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Both endpoints share a lane
    Straight,
    /// Lane-changing connection
    Curved,
}

impl Edge {
    /// Edge to the primary parent.
    pub fn parent(from_id: String, to_id: String, from_lane: LaneIdx, to_lane: LaneIdx) -> Self {
        Self::build(from_id, to_id, from_lane, to_lane, false)
    }

    /// Edge to a merge parent.
    pub fn merge(from_id: String, to_id: String, from_lane: LaneIdx, to_lane: LaneIdx) -> Self {
        Self::build(from_id, to_id, from_lane, to_lane, true)
    }

    fn build(
        from_id: String,
        to_id: String,
        from_lane: LaneIdx,
        to_lane: LaneIdx,
        is_merge: bool,
    ) -> Self {
        let style = if from_lane == to_lane {
            EdgeStyle::Straight
        } else {
            EdgeStyle::Curved
        };
        Self {
            from_id,
            to_id,
            from_lane,
            to_lane,
            is_merge,
            style,
        }
    }

    /// Lane that fixes the edge's color: primary-parent edges take the
    /// child's lane, merge edges the parent's lane.
    pub fn color_lane(&self) -> LaneIdx {
        if self.is_merge {
            self.to_lane
        } else {
            self.from_lane
        }
    }
}

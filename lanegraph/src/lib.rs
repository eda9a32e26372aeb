pub mod core;
pub mod git_backend;
pub mod layout;

pub use core::{CommitRecord, Edge, EdgeStyle, ParentIds};
pub use git_backend::HistoryWalker;
pub use layout::{assign_lanes, build_edges, layout, LaneAllocator, LaneIdx, Layout, LayoutStats};

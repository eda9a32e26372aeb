pub mod edge;
pub mod record;

pub use edge::{Edge, EdgeStyle};
pub use record::{CommitRecord, ParentIds};

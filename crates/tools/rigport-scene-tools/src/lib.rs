//! rigport-scene-tools
//!
//! Small authoring utilities that sit directly on the scene host: batch
//! renaming, JSON scene snapshots, and a depth-first hierarchy printout.

pub mod hierarchy;
pub mod renamer;
pub mod snapshot;

pub use hierarchy::describe_hierarchy;
pub use renamer::{add_prefix, add_suffix, find_matches, find_replace};
pub use snapshot::{apply_snapshot, capture_snapshot, read_snapshot, write_snapshot, SceneSnapshot};

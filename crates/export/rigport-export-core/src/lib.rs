//! rigport-export-core
//!
//! The export-configuration core: marker tags, the export-node registry,
//! origin resolution, animation-layer snapshots, and the batch orchestrator
//! that drives a scene host through skeleton duplication, rebasing, and file
//! export. Everything degrades to skip-and-continue; a partially configured
//! scene produces partial output plus structured warnings, never an aborted
//! batch.

pub mod diagnostics;
pub mod layers;
pub mod origin;
pub mod orchestrator;
pub mod registry;
pub mod skeleton;
pub mod tags;

pub use diagnostics::{ExportReport, Warning};
pub use layers::{LayerSetting, LayerSnapshot, SnapshotParseError};
pub use orchestrator::{find_meshes_with_blendshapes, Exporter};
pub use origin::resolve_origin;
pub use registry::{ExportNode, ExportNodeId, ExportNodeRegistry};
pub use skeleton::{copy_and_connect_skeleton, transform_to_origin, DuplicateRig};
pub use tags::{EXPORT_MESHES_FLAG, GARBAGE_FLAG, ORIGIN_FLAG};

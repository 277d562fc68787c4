//! rigport-scene-core: scene host contract (engine-agnostic)
//!
//! This crate defines the narrow capability surface the export tooling needs
//! from a host 3D application: typed attributes, hierarchy, message-style
//! connections, selection, animation layers, and an opaque file export. The
//! host is an external collaborator; everything here is expressed through the
//! `SceneHost` trait so callers handle absence explicitly instead of probing
//! for object existence before every call.
//!
//! `MemoryScene` is the reference host: an explicit node table keyed by
//! stable ids, used by every test and by standalone batch runs.

pub mod error;
pub mod host;
pub mod ids;
pub mod memory;
pub mod value;

// Re-exports for consumers (export core, tools, fixtures)
pub use error::SceneError;
pub use host::{ExportOptions, LayerMode, LayerState, NodeKind, SceneHost};
pub use ids::{NodeId, NodeIdAllocator};
pub use memory::{BakeRecord, ExportRecord, KeyRecord, MemoryScene};
pub use value::{AttrKind, AttrValue};

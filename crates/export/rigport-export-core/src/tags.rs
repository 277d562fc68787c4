//! Marker flags attached to host objects.
//!
//! The host has no native concept of "export node" or "garbage", so the
//! tooling marks objects with boolean attributes. Setting a flag on a
//! missing object is a silent no-op; scene traversal must never surface
//! spurious errors for objects that have gone away.

use rigport_scene_core::{AttrKind, AttrValue, NodeId, SceneHost};

/// Marks the root joint of a character rig.
pub const ORIGIN_FLAG: &str = "origin";
/// Marks a mesh as export-eligible.
pub const EXPORT_MESHES_FLAG: &str = "exportMeshes";
/// Marks scratch objects for the garbage sweep.
pub const GARBAGE_FLAG: &str = "deleteMe";

/// Idempotently set a boolean marker: create the attribute when absent,
/// then set it true. No-op when the node does not exist.
pub fn set_flag(scene: &mut dyn SceneHost, node: NodeId, flag: &str) {
    if !scene.exists(node) {
        return;
    }
    if !scene.has_attr(node, flag) {
        let _ = scene.add_attr(node, flag, AttrKind::Bool);
    }
    let _ = scene.set_attr(node, flag, AttrValue::Bool(true));
}

pub fn has_flag(scene: &dyn SceneHost, node: NodeId, flag: &str) -> bool {
    scene
        .get_attr(node, flag)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Remove the marker attribute entirely. No-op when absent.
pub fn clear_flag(scene: &mut dyn SceneHost, node: NodeId, flag: &str) {
    let _ = scene.remove_attr(node, flag);
}

/// Delete every object carrying the flag; returns how many went. An object
/// may already be gone by the time we reach it (its tagged ancestor was
/// deleted first), which counts as swept.
pub fn sweep(scene: &mut dyn SceneHost, flag: &str) -> usize {
    let tagged: Vec<NodeId> = scene
        .all_nodes()
        .into_iter()
        .filter(|n| has_flag(scene, *n, flag))
        .collect();
    let mut swept = 0;
    for node in tagged {
        if scene.exists(node) {
            let _ = scene.delete(node);
        }
        swept += 1;
    }
    swept
}

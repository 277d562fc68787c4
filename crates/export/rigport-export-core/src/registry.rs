//! The export-node registry.
//!
//! Export configuration lives in explicit tables keyed by stable ids instead
//! of being scattered over marker attributes: the node records themselves,
//! the origin link (one origin, many nodes), and the ordered mesh set per
//! node. Meshes and origins stay host-owned; the registry only references
//! them. Mutating a missing record is a reported no-op, never an error that
//! would abort a batch.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use rigport_scene_core::{NodeId, SceneHost};

use crate::layers::LayerSnapshot;
use crate::tags::{self, EXPORT_MESHES_FLAG};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ExportNodeId(pub u32);

/// One export unit: a subset of frames, a mesh set, an output path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub name: String,
    pub export: bool,
    pub move_to_origin: bool,
    pub zero_origin: bool,
    pub use_sub_range: bool,
    pub start_frame: f32,
    pub end_frame: f32,
    pub export_name: String,
    pub layer_snapshot: LayerSnapshot,
}

impl ExportNode {
    fn new(name: String) -> Self {
        Self {
            name,
            // fresh nodes are export-enabled; everything else starts zeroed
            export: true,
            move_to_origin: false,
            zero_origin: false,
            use_sub_range: false,
            start_frame: 0.0,
            end_frame: 0.0,
            export_name: String::new(),
            layer_snapshot: LayerSnapshot::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ExportNodeRegistry {
    next: u32,
    nodes: IndexMap<ExportNodeId, ExportNode>,
    origins: HashMap<ExportNodeId, NodeId>,
    meshes: HashMap<ExportNodeId, IndexSet<NodeId>>,
}

impl ExportNodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh record named after its owning character.
    pub fn create(&mut self, owner_name: &str) -> ExportNodeId {
        let id = ExportNodeId(self.next);
        self.next = self.next.wrapping_add(1);
        let name = format!("{owner_name}FBXExportNode{}", id.0 + 1);
        self.nodes.insert(id, ExportNode::new(name));
        id
    }

    pub fn node(&self, id: ExportNodeId) -> Option<&ExportNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: ExportNodeId) -> Option<&mut ExportNode> {
        self.nodes.get_mut(&id)
    }

    /// All record ids, in creation order.
    pub fn ids(&self) -> Vec<ExportNodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Remove the record and its relations. Meshes and origin are
    /// host-owned and untouched. No-op on a missing id.
    pub fn delete(&mut self, id: ExportNodeId) -> bool {
        let existed = self.nodes.shift_remove(&id).is_some();
        self.origins.remove(&id);
        self.meshes.remove(&id);
        existed
    }

    // ---- origin link ----

    pub fn link_origin(&mut self, id: ExportNodeId, origin: NodeId) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        self.origins.insert(id, origin);
        true
    }

    pub fn origin_of(&self, id: ExportNodeId) -> Option<NodeId> {
        self.origins.get(&id).copied()
    }

    /// Export nodes linked to the given origin, in creation order.
    pub fn nodes_for_origin(&self, origin: NodeId) -> Vec<ExportNodeId> {
        self.nodes
            .keys()
            .filter(|id| self.origins.get(id) == Some(&origin))
            .copied()
            .collect()
    }

    // ---- mesh set ----

    /// Add meshes to the node's set, tagging each existing mesh as
    /// export-eligible. Missing meshes are skipped.
    pub fn connect_meshes(
        &mut self,
        scene: &mut dyn SceneHost,
        id: ExportNodeId,
        meshes: &[NodeId],
    ) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        let set = self.meshes.entry(id).or_default();
        for mesh in meshes {
            if scene.exists(*mesh) {
                tags::set_flag(scene, *mesh, EXPORT_MESHES_FLAG);
                set.insert(*mesh);
            }
        }
        true
    }

    /// Remove meshes from the node's set and clear their eligibility tag.
    pub fn disconnect_meshes(
        &mut self,
        scene: &mut dyn SceneHost,
        id: ExportNodeId,
        meshes: &[NodeId],
    ) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        if let Some(set) = self.meshes.get_mut(&id) {
            for mesh in meshes {
                if set.shift_remove(mesh) {
                    tags::clear_flag(scene, *mesh, EXPORT_MESHES_FLAG);
                }
            }
        }
        true
    }

    /// Connected meshes in connection order.
    pub fn connected_meshes(&self, id: ExportNodeId) -> Vec<NodeId> {
        self.meshes
            .get(&id)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigport_scene_core::MemoryScene;

    #[test]
    fn create_defaults() {
        let mut reg = ExportNodeRegistry::new();
        let id = reg.create("Hero");
        let node = reg.node(id).unwrap();
        assert!(node.export);
        assert!(!node.move_to_origin);
        assert!(!node.zero_origin);
        assert!(!node.use_sub_range);
        assert_eq!(node.start_frame, 0.0);
        assert_eq!(node.end_frame, 0.0);
        assert!(node.export_name.is_empty());
        assert!(node.layer_snapshot.is_empty());
        assert_eq!(node.name, "HeroFBXExportNode1");
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut reg = ExportNodeRegistry::new();
        let id = reg.create("Hero");
        assert!(reg.delete(id));
        assert!(!reg.delete(id));
        assert!(reg.node(id).is_none());
    }

    #[test]
    fn origin_link_one_to_many() {
        let mut scene = MemoryScene::new();
        let origin = scene.add_joint("root", None, None);
        let mut reg = ExportNodeRegistry::new();
        let idle = reg.create("Hero");
        let run = reg.create("Hero");
        assert!(reg.link_origin(idle, origin));
        assert!(reg.link_origin(run, origin));
        assert_eq!(reg.nodes_for_origin(origin), vec![idle, run]);
        assert_eq!(reg.origin_of(run), Some(origin));
        reg.delete(idle);
        assert_eq!(reg.nodes_for_origin(origin), vec![run]);
    }

    #[test]
    fn connect_meshes_tags_and_orders() {
        let mut scene = MemoryScene::new();
        let body = scene.add_mesh("body", None, None);
        let head = scene.add_mesh("head", None, None);
        let gone = scene.add_mesh("gone", None, None);
        scene.delete(gone).unwrap();

        let mut reg = ExportNodeRegistry::new();
        let id = reg.create("Hero");
        assert!(reg.connect_meshes(&mut scene, id, &[body, gone, head]));
        assert_eq!(reg.connected_meshes(id), vec![body, head]);
        assert!(tags::has_flag(&scene, body, EXPORT_MESHES_FLAG));
        assert!(tags::has_flag(&scene, head, EXPORT_MESHES_FLAG));

        assert!(reg.disconnect_meshes(&mut scene, id, &[body]));
        assert_eq!(reg.connected_meshes(id), vec![head]);
        assert!(!tags::has_flag(&scene, body, EXPORT_MESHES_FLAG));
    }

    #[test]
    fn mutating_missing_record_reports_not_found() {
        let mut scene = MemoryScene::new();
        let mesh = scene.add_mesh("body", None, None);
        let mut reg = ExportNodeRegistry::new();
        let ghost = ExportNodeId(42);
        assert!(!reg.connect_meshes(&mut scene, ghost, &[mesh]));
        assert!(!reg.disconnect_meshes(&mut scene, ghost, &[mesh]));
        assert!(!reg.link_origin(ghost, mesh));
        assert!(reg.connected_meshes(ghost).is_empty());
    }

    #[test]
    fn records_survive_json() {
        let mut reg = ExportNodeRegistry::new();
        let id = reg.create("Hero");
        let node = reg.node_mut(id).unwrap();
        node.export_name = "clips/hero_idle.fbx".into();
        node.use_sub_range = true;
        node.start_frame = 10.0;
        node.end_frame = 20.0;
        let s = serde_json::to_string(reg.node(id).unwrap()).unwrap();
        let parsed: ExportNode = serde_json::from_str(&s).unwrap();
        assert_eq!(&parsed, reg.node(id).unwrap());
    }
}

//! Canned scenes and hosts shared by integration tests.

use rigport_export::tags::{self, ORIGIN_FLAG};
use rigport_scene_core::{
    AttrKind, AttrValue, ExportOptions, LayerMode, LayerState, MemoryScene, NodeId, NodeKind,
    SceneError, SceneHost,
};

/// A character rig in the given namespace: origin-tagged root joint with a
/// spine/head chain, a blend-shape driven face mesh, and a hand prop mesh.
/// Returns the origin joint.
pub fn rigged_character(scene: &mut MemoryScene, ns: &str) -> NodeId {
    let root = scene.add_joint("root", Some(ns), None);
    let spine = scene.add_joint("spine", Some(ns), Some(root));
    scene.add_joint("head", Some(ns), Some(spine));
    tags::set_flag(scene, root, ORIGIN_FLAG);

    let face = scene.add_transform("face", Some(ns), None);
    let face_shape = scene.add_mesh("faceShape", Some(ns), Some(face));
    let deformer = scene.add_blend_shape("faceBlends", Some(ns));
    scene
        .connect(deformer, "outputGeometry", face_shape, "inMesh")
        .expect("deformer wiring");

    let prop = scene.add_transform("sword", Some(ns), None);
    scene.add_mesh("swordShape", Some(ns), Some(prop));

    root
}

/// Two referenced characters plus one reference without a tagged origin.
pub fn referenced_scene() -> (MemoryScene, NodeId, NodeId) {
    let mut scene = MemoryScene::new();
    let hero = rigged_character(&mut scene, "hero");
    let villain = rigged_character(&mut scene, "villain");
    scene.add_reference("hero");
    scene.add_reference("villain");
    scene.add_joint("prop_root", Some("props"), None);
    scene.add_reference("props");
    (scene, hero, villain)
}

/// A handful of loose prop transforms for renamer and snapshot tests.
pub fn prop_scene() -> (MemoryScene, Vec<NodeId>) {
    let mut scene = MemoryScene::new();
    let table = scene.add_transform("table", None, None);
    let chair = scene.add_transform("chair", None, Some(table));
    let lamp = scene.add_transform("lamp", None, None);
    scene
        .set_translation(table, [1.0, 0.0, 0.0])
        .expect("table exists");
    scene
        .set_translation(chair, [0.0, 0.5, 0.0])
        .expect("chair exists");
    (scene, vec![table, chair, lamp])
}

/// A host that works like `MemoryScene` but refuses selected calls, for
/// exercising skip-and-continue paths.
#[derive(Debug, Default)]
pub struct FailingHost {
    pub inner: MemoryScene,
    pub fail_bake: bool,
    pub fail_export: bool,
}

impl FailingHost {
    pub fn new(inner: MemoryScene) -> Self {
        Self {
            inner,
            fail_bake: false,
            fail_export: false,
        }
    }
}

impl SceneHost for FailingHost {
    fn exists(&self, node: NodeId) -> bool {
        self.inner.exists(node)
    }

    fn node_name(&self, node: NodeId) -> Option<String> {
        self.inner.node_name(node)
    }

    fn node_kind(&self, node: NodeId) -> Option<NodeKind> {
        self.inner.node_kind(node)
    }

    fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.inner.find_by_name(name)
    }

    fn nodes_of_kind(&self, kind: NodeKind, namespace: Option<&str>) -> Vec<NodeId> {
        self.inner.nodes_of_kind(kind, namespace)
    }

    fn all_nodes(&self) -> Vec<NodeId> {
        self.inner.all_nodes()
    }

    fn has_attr(&self, node: NodeId, attr: &str) -> bool {
        self.inner.has_attr(node, attr)
    }

    fn add_attr(&mut self, node: NodeId, attr: &str, kind: AttrKind) -> Result<(), SceneError> {
        self.inner.add_attr(node, attr, kind)
    }

    fn remove_attr(&mut self, node: NodeId, attr: &str) -> Result<(), SceneError> {
        self.inner.remove_attr(node, attr)
    }

    fn get_attr(&self, node: NodeId, attr: &str) -> Option<AttrValue> {
        self.inner.get_attr(node, attr)
    }

    fn set_attr(&mut self, node: NodeId, attr: &str, value: AttrValue) -> Result<(), SceneError> {
        self.inner.set_attr(node, attr, value)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.parent(node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner.children(node)
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.inner.descendants(node)
    }

    fn descendants_of_kind(&self, node: NodeId, kind: NodeKind) -> Vec<NodeId> {
        self.inner.descendants_of_kind(node, kind)
    }

    fn reparent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> Result<(), SceneError> {
        self.inner.reparent(node, new_parent)
    }

    fn duplicate(&mut self, node: NodeId) -> Result<NodeId, SceneError> {
        self.inner.duplicate(node)
    }

    fn delete(&mut self, node: NodeId) -> Result<(), SceneError> {
        self.inner.delete(node)
    }

    fn rename(&mut self, node: NodeId, new_name: &str) -> Result<(), SceneError> {
        self.inner.rename(node, new_name)
    }

    fn connect(
        &mut self,
        src: NodeId,
        src_attr: &str,
        dst: NodeId,
        dst_attr: &str,
    ) -> Result<(), SceneError> {
        self.inner.connect(src, src_attr, dst, dst_attr)
    }

    fn disconnect(
        &mut self,
        src: NodeId,
        src_attr: &str,
        dst: NodeId,
        dst_attr: &str,
    ) -> Result<(), SceneError> {
        self.inner.disconnect(src, src_attr, dst, dst_attr)
    }

    fn connections_from(&self, node: NodeId, attr: &str) -> Vec<NodeId> {
        self.inner.connections_from(node, attr)
    }

    fn selection(&self) -> Vec<NodeId> {
        self.inner.selection()
    }

    fn select(&mut self, nodes: &[NodeId]) {
        self.inner.select(nodes)
    }

    fn clear_selection(&mut self) {
        self.inner.clear_selection()
    }

    fn anim_layers(&self) -> Vec<String> {
        self.inner.anim_layers()
    }

    fn layer_state(&self, layer: &str) -> Option<LayerState> {
        self.inner.layer_state(layer)
    }

    fn layer_mode(&self, layer: &str) -> Option<LayerMode> {
        self.inner.layer_mode(layer)
    }

    fn set_layer_state(&mut self, layer: &str, state: LayerState) -> Result<(), SceneError> {
        self.inner.set_layer_state(layer, state)
    }

    fn set_layer_weight(&mut self, layer: &str, weight: f32) -> Result<(), SceneError> {
        self.inner.set_layer_weight(layer, weight)
    }

    fn create_anim_layer(&mut self, mode: LayerMode) -> NodeId {
        self.inner.create_anim_layer(mode)
    }

    fn key_attr(&mut self, node: NodeId, attr: &str) -> Result<(), SceneError> {
        self.inner.key_attr(node, attr)
    }

    fn key_transform_on_layer(
        &mut self,
        node: NodeId,
        layer: &str,
        frame: f32,
    ) -> Result<(), SceneError> {
        self.inner.key_transform_on_layer(node, layer, frame)
    }

    fn bake_channels(
        &mut self,
        node: NodeId,
        channels: &[&str],
        start_frame: f32,
        end_frame: f32,
    ) -> Result<(), SceneError> {
        if self.fail_bake {
            return Err(SceneError::NodeMissing(node));
        }
        self.inner.bake_channels(node, channels, start_frame, end_frame)
    }

    fn set_translation(&mut self, node: NodeId, t: [f32; 3]) -> Result<(), SceneError> {
        self.inner.set_translation(node, t)
    }

    fn set_rotation(&mut self, node: NodeId, r: [f32; 3]) -> Result<(), SceneError> {
        self.inner.set_rotation(node, r)
    }

    fn world_translation(&self, node: NodeId) -> Option<[f32; 3]> {
        self.inner.world_translation(node)
    }

    fn set_channel_locked(
        &mut self,
        node: NodeId,
        channel: &str,
        locked: bool,
    ) -> Result<(), SceneError> {
        self.inner.set_channel_locked(node, channel, locked)
    }

    fn is_channel_locked(&self, node: NodeId, channel: &str) -> bool {
        self.inner.is_channel_locked(node, channel)
    }

    fn playback_range(&self) -> (f32, f32) {
        self.inner.playback_range()
    }

    fn reference_namespaces(&self) -> Vec<String> {
        self.inner.reference_namespaces()
    }

    fn export_to_file(
        &mut self,
        selection: &[NodeId],
        path: &str,
        options: &ExportOptions,
    ) -> Result<(), SceneError> {
        if self.fail_export {
            return Err(SceneError::ExportRejected("host refused the write".into()));
        }
        self.inner.export_to_file(selection, path, options)
    }
}

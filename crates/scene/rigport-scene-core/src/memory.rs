//! `MemoryScene`: the in-memory reference implementation of `SceneHost`.
//!
//! Nodes live in an explicit table keyed by stable ids; host enumeration
//! order is insertion order. Animation keys, bakes, and file exports are
//! journaled instead of evaluated (the math of the host is out of scope), so
//! tests can assert on exactly what the tooling asked the host to do.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::SceneError;
use crate::host::{ExportOptions, LayerMode, LayerState, NodeKind, SceneHost};
use crate::ids::{NodeId, NodeIdAllocator};
use crate::value::{AttrKind, AttrValue};

#[derive(Clone, Debug)]
struct Attr {
    kind: AttrKind,
    value: Option<AttrValue>,
}

#[derive(Clone, Debug)]
struct LayerData {
    state: LayerState,
    weight: f32,
    mode: LayerMode,
}

#[derive(Clone, Debug)]
struct Node {
    name: String,
    namespace: Option<String>,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: IndexMap<String, Attr>,
    locked: HashSet<String>,
    translation: [f32; 3],
    rotation: [f32; 3],
    layer: Option<LayerData>,
}

impl Node {
    fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Connection {
    src: NodeId,
    src_attr: String,
    dst: NodeId,
    dst_attr: String,
}

/// Journal entry for a bake request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BakeRecord {
    pub node: NodeId,
    pub channels: Vec<String>,
    pub start_frame: f32,
    pub end_frame: f32,
}

/// Journal entry for a keyframe request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KeyRecord {
    pub node: NodeId,
    pub attr: Option<String>,
    pub layer: Option<String>,
    pub frame: Option<f32>,
}

/// Journal entry for a file export.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportRecord {
    pub path: String,
    pub options: ExportOptions,
    /// Full names of the selection at export time.
    pub selection: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MemoryScene {
    alloc: NodeIdAllocator,
    nodes: IndexMap<NodeId, Node>,
    connections: Vec<Connection>,
    selection: Vec<NodeId>,
    playback: Option<(f32, f32)>,
    references: Vec<String>,
    layer_seq: u32,
    /// Bake journal, in request order.
    pub baked: Vec<BakeRecord>,
    /// Keyframe journal, in request order.
    pub keys: Vec<KeyRecord>,
    /// Export journal, in request order.
    pub exports: Vec<ExportRecord>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- scene construction ----

    pub fn add_joint(
        &mut self,
        name: &str,
        namespace: Option<&str>,
        parent: Option<NodeId>,
    ) -> NodeId {
        self.add_node(NodeKind::Joint, name, namespace, parent)
    }

    pub fn add_transform(
        &mut self,
        name: &str,
        namespace: Option<&str>,
        parent: Option<NodeId>,
    ) -> NodeId {
        self.add_node(NodeKind::Transform, name, namespace, parent)
    }

    pub fn add_mesh(
        &mut self,
        name: &str,
        namespace: Option<&str>,
        parent: Option<NodeId>,
    ) -> NodeId {
        self.add_node(NodeKind::Mesh, name, namespace, parent)
    }

    pub fn add_blend_shape(&mut self, name: &str, namespace: Option<&str>) -> NodeId {
        self.add_node(NodeKind::BlendShape, name, namespace, None)
    }

    /// Add a named animation layer with the given initial state.
    pub fn add_anim_layer(&mut self, name: &str, mute: bool, solo: bool) -> NodeId {
        let id = self.add_node(NodeKind::AnimLayer, name, None, None);
        self.nodes[&id].layer = Some(LayerData {
            state: LayerState { mute, solo },
            weight: 1.0,
            mode: LayerMode::Additive,
        });
        id
    }

    /// Register a loaded file reference by its namespace.
    pub fn add_reference(&mut self, namespace: &str) {
        self.references.push(namespace.to_string());
    }

    pub fn set_playback_range(&mut self, start_frame: f32, end_frame: f32) {
        self.playback = Some((start_frame, end_frame));
    }

    /// Local translation of a node (test hook; world space goes through the
    /// trait).
    pub fn local_translation(&self, node: NodeId) -> Option<[f32; 3]> {
        self.nodes.get(&node).map(|n| n.translation)
    }

    pub fn local_rotation(&self, node: NodeId) -> Option<[f32; 3]> {
        self.nodes.get(&node).map(|n| n.rotation)
    }

    fn add_node(
        &mut self,
        kind: NodeKind,
        name: &str,
        namespace: Option<&str>,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = self.alloc.alloc();
        let name = self.unique_name(name, namespace);
        let node = Node {
            name,
            namespace: namespace.map(str::to_string),
            kind,
            parent,
            children: Vec::new(),
            attrs: IndexMap::new(),
            locked: HashSet::new(),
            translation: [0.0; 3],
            rotation: [0.0; 3],
            layer: None,
        };
        self.nodes.insert(id, node);
        if let Some(p) = parent {
            if let Some(pn) = self.nodes.get_mut(&p) {
                pn.children.push(id);
            }
        }
        id
    }

    /// Uniquify a short name against existing full names by appending a
    /// counter, the way hosts do on duplicate/name clash.
    fn unique_name(&self, base: &str, namespace: Option<&str>) -> String {
        let full = |short: &str| match namespace {
            Some(ns) => format!("{ns}:{short}"),
            None => short.to_string(),
        };
        if self.find_full_name(&full(base)).is_none() {
            return base.to_string();
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}{n}");
            if self.find_full_name(&full(&candidate)).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    fn find_full_name(&self, full: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.full_name() == full)
            .map(|(id, _)| *id)
    }

    fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes.get(&id).ok_or(SceneError::NodeMissing(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(&id).ok_or(SceneError::NodeMissing(id))
    }

    fn layer_id(&self, layer: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.kind == NodeKind::AnimLayer && n.full_name() == layer)
            .map(|(id, _)| *id)
    }

    fn collect_subtree(&self, root: NodeId, out: &mut Vec<NodeId>) {
        out.push(root);
        if let Some(n) = self.nodes.get(&root) {
            for c in n.children.clone() {
                self.collect_subtree(c, out);
            }
        }
    }

    fn duplicate_subtree(&mut self, src: NodeId, parent: Option<NodeId>) -> NodeId {
        let (name, namespace, kind, attrs, locked, translation, rotation, layer, children) = {
            let n = &self.nodes[&src];
            (
                n.name.clone(),
                n.namespace.clone(),
                n.kind,
                n.attrs.clone(),
                n.locked.clone(),
                n.translation,
                n.rotation,
                n.layer.clone(),
                n.children.clone(),
            )
        };
        let id = self.add_node(kind, &name, namespace.as_deref(), parent);
        if let Some(n) = self.nodes.get_mut(&id) {
            n.attrs = attrs;
            n.locked = locked;
            n.translation = translation;
            n.rotation = rotation;
            n.layer = layer;
        }
        for c in children {
            self.duplicate_subtree(c, Some(id));
        }
        id
    }
}

impl SceneHost for MemoryScene {
    fn exists(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn node_name(&self, node: NodeId) -> Option<String> {
        self.nodes.get(&node).map(Node::full_name)
    }

    fn node_kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(&node).map(|n| n.kind)
    }

    fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.find_full_name(name)
    }

    fn nodes_of_kind(&self, kind: NodeKind, namespace: Option<&str>) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.kind == kind)
            .filter(|(_, n)| match namespace {
                Some(ns) => n.namespace.as_deref() == Some(ns),
                None => true,
            })
            .map(|(id, _)| *id)
            .collect()
    }

    fn all_nodes(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    fn has_attr(&self, node: NodeId, attr: &str) -> bool {
        self.nodes
            .get(&node)
            .map(|n| n.attrs.contains_key(attr))
            .unwrap_or(false)
    }

    fn add_attr(&mut self, node: NodeId, attr: &str, kind: AttrKind) -> Result<(), SceneError> {
        let n = self.node_mut(node)?;
        if n.attrs.contains_key(attr) {
            return Err(SceneError::AttrExists {
                node,
                attr: attr.to_string(),
            });
        }
        n.attrs.insert(attr.to_string(), Attr { kind, value: None });
        Ok(())
    }

    fn remove_attr(&mut self, node: NodeId, attr: &str) -> Result<(), SceneError> {
        let n = self.node_mut(node)?;
        n.attrs
            .shift_remove(attr)
            .map(|_| ())
            .ok_or_else(|| SceneError::AttrMissing {
                node,
                attr: attr.to_string(),
            })
    }

    fn get_attr(&self, node: NodeId, attr: &str) -> Option<AttrValue> {
        let a = self.nodes.get(&node)?.attrs.get(attr)?;
        match &a.value {
            Some(v) => Some(v.clone()),
            // Unset attributes read as their kind's zero value.
            None => match a.kind {
                AttrKind::Bool => Some(AttrValue::Bool(false)),
                AttrKind::Float => Some(AttrValue::Float(0.0)),
                AttrKind::Text => Some(AttrValue::Text(String::new())),
                AttrKind::Message => None,
            },
        }
    }

    fn set_attr(&mut self, node: NodeId, attr: &str, value: AttrValue) -> Result<(), SceneError> {
        let n = self.node_mut(node)?;
        let a = n
            .attrs
            .get_mut(attr)
            .ok_or_else(|| SceneError::AttrMissing {
                node,
                attr: attr.to_string(),
            })?;
        if a.kind != value.kind() {
            return Err(SceneError::AttrKindMismatch {
                node,
                attr: attr.to_string(),
                found: value.kind(),
                expected: a.kind,
            });
        }
        a.value = Some(value);
        Ok(())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for c in self.children(node) {
            self.collect_subtree(c, &mut out);
        }
        out
    }

    fn descendants_of_kind(&self, node: NodeId, kind: NodeKind) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|id| self.node_kind(*id) == Some(kind))
            .collect()
    }

    fn reparent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> Result<(), SceneError> {
        if !self.exists(node) {
            return Err(SceneError::NodeMissing(node));
        }
        if let Some(p) = new_parent {
            if !self.exists(p) {
                return Err(SceneError::NodeMissing(p));
            }
        }
        let old_parent = self.nodes[&node].parent;
        if let Some(op) = old_parent {
            if let Some(pn) = self.nodes.get_mut(&op) {
                pn.children.retain(|c| *c != node);
            }
        }
        self.nodes[&node].parent = new_parent;
        if let Some(p) = new_parent {
            self.nodes[&p].children.push(node);
        }
        Ok(())
    }

    fn duplicate(&mut self, node: NodeId) -> Result<NodeId, SceneError> {
        if !self.exists(node) {
            return Err(SceneError::NodeMissing(node));
        }
        let parent = self.nodes[&node].parent;
        Ok(self.duplicate_subtree(node, parent))
    }

    fn delete(&mut self, node: NodeId) -> Result<(), SceneError> {
        if !self.exists(node) {
            return Err(SceneError::NodeMissing(node));
        }
        let mut doomed = Vec::new();
        self.collect_subtree(node, &mut doomed);
        if let Some(p) = self.nodes[&node].parent {
            if let Some(pn) = self.nodes.get_mut(&p) {
                pn.children.retain(|c| *c != node);
            }
        }
        for id in &doomed {
            self.nodes.shift_remove(id);
        }
        self.connections
            .retain(|c| !doomed.contains(&c.src) && !doomed.contains(&c.dst));
        self.selection.retain(|s| !doomed.contains(s));
        Ok(())
    }

    fn rename(&mut self, node: NodeId, new_name: &str) -> Result<(), SceneError> {
        let namespace = self.node(node)?.namespace.clone();
        let full = match &namespace {
            Some(ns) => format!("{ns}:{new_name}"),
            None => new_name.to_string(),
        };
        if let Some(other) = self.find_full_name(&full) {
            if other != node {
                return Err(SceneError::NameTaken(full));
            }
        }
        self.node_mut(node)?.name = new_name.to_string();
        Ok(())
    }

    fn connect(
        &mut self,
        src: NodeId,
        src_attr: &str,
        dst: NodeId,
        dst_attr: &str,
    ) -> Result<(), SceneError> {
        if !self.exists(src) {
            return Err(SceneError::NodeMissing(src));
        }
        if !self.exists(dst) {
            return Err(SceneError::NodeMissing(dst));
        }
        let conn = Connection {
            src,
            src_attr: src_attr.to_string(),
            dst,
            dst_attr: dst_attr.to_string(),
        };
        // force semantics: connecting an already-connected pair is a no-op
        if !self.connections.contains(&conn) {
            self.connections.push(conn);
        }
        Ok(())
    }

    fn disconnect(
        &mut self,
        src: NodeId,
        src_attr: &str,
        dst: NodeId,
        dst_attr: &str,
    ) -> Result<(), SceneError> {
        let before = self.connections.len();
        self.connections.retain(|c| {
            !(c.src == src && c.src_attr == src_attr && c.dst == dst && c.dst_attr == dst_attr)
        });
        if self.connections.len() == before {
            return Err(SceneError::ConnectionMissing);
        }
        Ok(())
    }

    fn connections_from(&self, node: NodeId, attr: &str) -> Vec<NodeId> {
        self.connections
            .iter()
            .filter(|c| c.src == node && c.src_attr == attr)
            .map(|c| c.dst)
            .collect()
    }

    fn selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn select(&mut self, nodes: &[NodeId]) {
        for id in nodes {
            if self.exists(*id) && !self.selection.contains(id) {
                self.selection.push(*id);
            }
        }
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn anim_layers(&self) -> Vec<String> {
        self.nodes
            .values()
            .filter(|n| n.kind == NodeKind::AnimLayer)
            .map(Node::full_name)
            .collect()
    }

    fn layer_state(&self, layer: &str) -> Option<LayerState> {
        let id = self.layer_id(layer)?;
        self.nodes[&id].layer.as_ref().map(|l| l.state)
    }

    fn layer_mode(&self, layer: &str) -> Option<LayerMode> {
        let id = self.layer_id(layer)?;
        self.nodes[&id].layer.as_ref().map(|l| l.mode)
    }

    fn set_layer_state(&mut self, layer: &str, state: LayerState) -> Result<(), SceneError> {
        let id = self
            .layer_id(layer)
            .ok_or_else(|| SceneError::LayerMissing(layer.to_string()))?;
        if let Some(l) = self.nodes[&id].layer.as_mut() {
            l.state = state;
        }
        Ok(())
    }

    fn set_layer_weight(&mut self, layer: &str, weight: f32) -> Result<(), SceneError> {
        let id = self
            .layer_id(layer)
            .ok_or_else(|| SceneError::LayerMissing(layer.to_string()))?;
        if let Some(l) = self.nodes[&id].layer.as_mut() {
            l.weight = weight;
        }
        Ok(())
    }

    fn create_anim_layer(&mut self, mode: LayerMode) -> NodeId {
        self.layer_seq += 1;
        let name = format!("AnimLayer{}", self.layer_seq);
        let id = self.add_node(NodeKind::AnimLayer, &name, None, None);
        self.nodes[&id].layer = Some(LayerData {
            state: LayerState::default(),
            weight: 1.0,
            mode,
        });
        id
    }

    fn key_attr(&mut self, node: NodeId, attr: &str) -> Result<(), SceneError> {
        if !self.exists(node) {
            return Err(SceneError::NodeMissing(node));
        }
        self.keys.push(KeyRecord {
            node,
            attr: Some(attr.to_string()),
            layer: None,
            frame: None,
        });
        Ok(())
    }

    fn key_transform_on_layer(
        &mut self,
        node: NodeId,
        layer: &str,
        frame: f32,
    ) -> Result<(), SceneError> {
        if !self.exists(node) {
            return Err(SceneError::NodeMissing(node));
        }
        if self.layer_id(layer).is_none() {
            return Err(SceneError::LayerMissing(layer.to_string()));
        }
        self.keys.push(KeyRecord {
            node,
            attr: None,
            layer: Some(layer.to_string()),
            frame: Some(frame),
        });
        Ok(())
    }

    fn bake_channels(
        &mut self,
        node: NodeId,
        channels: &[&str],
        start_frame: f32,
        end_frame: f32,
    ) -> Result<(), SceneError> {
        if !self.exists(node) {
            return Err(SceneError::NodeMissing(node));
        }
        self.baked.push(BakeRecord {
            node,
            channels: channels.iter().map(|c| c.to_string()).collect(),
            start_frame,
            end_frame,
        });
        Ok(())
    }

    fn set_translation(&mut self, node: NodeId, t: [f32; 3]) -> Result<(), SceneError> {
        self.node_mut(node)?.translation = t;
        Ok(())
    }

    fn set_rotation(&mut self, node: NodeId, r: [f32; 3]) -> Result<(), SceneError> {
        self.node_mut(node)?.rotation = r;
        Ok(())
    }

    fn world_translation(&self, node: NodeId) -> Option<[f32; 3]> {
        let mut cur = self.nodes.get(&node)?;
        let mut acc = cur.translation;
        while let Some(p) = cur.parent {
            cur = self.nodes.get(&p)?;
            acc[0] += cur.translation[0];
            acc[1] += cur.translation[1];
            acc[2] += cur.translation[2];
        }
        Some(acc)
    }

    fn set_channel_locked(
        &mut self,
        node: NodeId,
        channel: &str,
        locked: bool,
    ) -> Result<(), SceneError> {
        let n = self.node_mut(node)?;
        if locked {
            n.locked.insert(channel.to_string());
        } else {
            n.locked.remove(channel);
        }
        Ok(())
    }

    fn is_channel_locked(&self, node: NodeId, channel: &str) -> bool {
        self.nodes
            .get(&node)
            .map(|n| n.locked.contains(channel))
            .unwrap_or(false)
    }

    fn playback_range(&self) -> (f32, f32) {
        self.playback.unwrap_or((1.0, 24.0))
    }

    fn reference_namespaces(&self) -> Vec<String> {
        self.references.clone()
    }

    fn export_to_file(
        &mut self,
        selection: &[NodeId],
        path: &str,
        options: &ExportOptions,
    ) -> Result<(), SceneError> {
        if selection.is_empty() {
            return Err(SceneError::ExportRejected("nothing selected".to_string()));
        }
        let names: Vec<String> = selection
            .iter()
            .filter_map(|id| self.node_name(*id))
            .collect();
        log::debug!("export {} node(s) to {path}", names.len());
        self.exports.push(ExportRecord {
            path: path.to_string(),
            options: options.clone(),
            selection: names,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_rig(scene: &mut MemoryScene) -> (NodeId, NodeId, NodeId) {
        let root = scene.add_joint("root", Some("hero"), None);
        let spine = scene.add_joint("spine", Some("hero"), Some(root));
        let hand = scene.add_joint("hand", Some("hero"), Some(spine));
        (root, spine, hand)
    }

    #[test]
    fn names_and_lookup() {
        let mut scene = MemoryScene::new();
        let (root, _, _) = small_rig(&mut scene);
        assert_eq!(scene.node_name(root).as_deref(), Some("hero:root"));
        assert_eq!(scene.find_by_name("hero:root"), Some(root));
        assert_eq!(scene.find_by_name("hero:pelvis"), None);
    }

    #[test]
    fn kind_and_namespace_filtering() {
        let mut scene = MemoryScene::new();
        small_rig(&mut scene);
        scene.add_joint("root", Some("villain"), None);
        scene.add_transform("prop", None, None);
        assert_eq!(scene.nodes_of_kind(NodeKind::Joint, Some("hero")).len(), 3);
        assert_eq!(
            scene.nodes_of_kind(NodeKind::Joint, Some("villain")).len(),
            1
        );
        assert_eq!(scene.nodes_of_kind(NodeKind::Joint, None).len(), 4);
    }

    #[test]
    fn attr_lifecycle_and_zero_defaults() {
        let mut scene = MemoryScene::new();
        let (root, _, _) = small_rig(&mut scene);
        scene.add_attr(root, "origin", AttrKind::Bool).unwrap();
        // unset bool reads as false
        assert_eq!(scene.get_attr(root, "origin"), Some(AttrValue::Bool(false)));
        scene
            .set_attr(root, "origin", AttrValue::Bool(true))
            .unwrap();
        assert_eq!(scene.get_attr(root, "origin"), Some(AttrValue::Bool(true)));
        // kind mismatch is rejected
        assert!(matches!(
            scene.set_attr(root, "origin", AttrValue::Float(1.0)),
            Err(SceneError::AttrKindMismatch { .. })
        ));
        scene.remove_attr(root, "origin").unwrap();
        assert_eq!(scene.get_attr(root, "origin"), None);
    }

    #[test]
    fn duplicate_copies_subtree_and_uniquifies() {
        let mut scene = MemoryScene::new();
        let (root, _, _) = small_rig(&mut scene);
        let dup = scene.duplicate(root).unwrap();
        assert_ne!(dup, root);
        assert_eq!(scene.descendants(dup).len(), 2);
        // original subtree untouched
        assert_eq!(scene.descendants(root).len(), 2);
        let dup_name = scene.node_name(dup).unwrap();
        assert_ne!(dup_name, "hero:root");
        assert!(dup_name.starts_with("hero:root"));
    }

    #[test]
    fn delete_cascades_and_cleans_edges() {
        let mut scene = MemoryScene::new();
        let (root, spine, hand) = small_rig(&mut scene);
        let other = scene.add_transform("prop", None, None);
        scene.connect(hand, "translateX", other, "translateX").unwrap();
        scene.select(&[hand, other]);
        scene.delete(spine).unwrap();
        assert!(scene.exists(root));
        assert!(!scene.exists(spine));
        assert!(!scene.exists(hand));
        assert!(scene.connections_from(hand, "translateX").is_empty());
        assert_eq!(scene.selection(), vec![other]);
    }

    #[test]
    fn reparent_to_world() {
        let mut scene = MemoryScene::new();
        let (root, spine, _) = small_rig(&mut scene);
        scene.reparent(spine, None).unwrap();
        assert_eq!(scene.parent(spine), None);
        assert_eq!(scene.children(root), Vec::<NodeId>::new());
    }

    #[test]
    fn layer_state_roundtrip_and_missing_layer() {
        let mut scene = MemoryScene::new();
        scene.add_anim_layer("BaseAnimation", false, false);
        scene.add_anim_layer("Additive", true, false);
        assert_eq!(scene.anim_layers(), vec!["BaseAnimation", "Additive"]);
        scene
            .set_layer_state(
                "Additive",
                LayerState {
                    mute: false,
                    solo: true,
                },
            )
            .unwrap();
        assert_eq!(
            scene.layer_state("Additive"),
            Some(LayerState {
                mute: false,
                solo: true
            })
        );
        assert!(matches!(
            scene.set_layer_state("Gone", LayerState::default()),
            Err(SceneError::LayerMissing(_))
        ));
        assert_eq!(scene.layer_mode("Additive"), Some(LayerMode::Additive));
        assert_eq!(scene.layer_mode("Gone"), None);
    }

    #[test]
    fn export_requires_selection() {
        let mut scene = MemoryScene::new();
        let (root, _, _) = small_rig(&mut scene);
        assert!(matches!(
            scene.export_to_file(&[], "out.fbx", &ExportOptions::Model),
            Err(SceneError::ExportRejected(_))
        ));
        scene
            .export_to_file(&[root], "out.fbx", &ExportOptions::Model)
            .unwrap();
        assert_eq!(scene.exports.len(), 1);
        assert_eq!(scene.exports[0].selection, vec!["hero:root"]);
    }

    #[test]
    fn world_translation_accumulates_parents() {
        let mut scene = MemoryScene::new();
        let (root, spine, hand) = small_rig(&mut scene);
        scene.set_translation(root, [1.0, 0.0, 0.0]).unwrap();
        scene.set_translation(spine, [0.0, 2.0, 0.0]).unwrap();
        scene.set_translation(hand, [0.0, 0.0, 3.0]).unwrap();
        assert_eq!(scene.world_translation(hand), Some([1.0, 2.0, 3.0]));
    }
}

//! The `SceneHost` capability trait.
//!
//! Every accessor returns explicit absence (`Option` / `Result`) rather than
//! relying on the caller to probe object existence first. Enumeration order
//! of nodes and layers is the host's default order and is part of the
//! contract: callers that depend on "first match wins" get whatever the host
//! yields first.

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::ids::NodeId;
use crate::value::{AttrKind, AttrValue};

/// What a scene object is, as far as the export tooling cares.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Joint,
    Transform,
    Mesh,
    BlendShape,
    AnimLayer,
}

/// Mute/solo state of one animation layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerState {
    pub mute: bool,
    pub solo: bool,
}

/// Accumulation mode for a newly created animation layer.
///
/// Override replaces the motion underneath it; Additive stacks on top of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerMode {
    Override,
    Additive,
}

/// Options forwarded to the host's opaque file export. The interchange
/// format itself is out of scope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ExportOptions {
    Animation { start_frame: f32, end_frame: f32 },
    Model,
}

pub trait SceneHost {
    // ---- objects and attributes ----

    fn exists(&self, node: NodeId) -> bool;
    /// Full name including namespace prefix (`ns:name`) when present.
    fn node_name(&self, node: NodeId) -> Option<String>;
    fn node_kind(&self, node: NodeId) -> Option<NodeKind>;
    /// First node whose full name matches, in host order.
    fn find_by_name(&self, name: &str) -> Option<NodeId>;
    /// All nodes of the given kind, optionally restricted to a namespace.
    fn nodes_of_kind(&self, kind: NodeKind, namespace: Option<&str>) -> Vec<NodeId>;
    /// Every node in the scene, in host order.
    fn all_nodes(&self) -> Vec<NodeId>;

    fn has_attr(&self, node: NodeId, attr: &str) -> bool;
    fn add_attr(&mut self, node: NodeId, attr: &str, kind: AttrKind) -> Result<(), SceneError>;
    fn remove_attr(&mut self, node: NodeId, attr: &str) -> Result<(), SceneError>;
    fn get_attr(&self, node: NodeId, attr: &str) -> Option<AttrValue>;
    fn set_attr(&mut self, node: NodeId, attr: &str, value: AttrValue) -> Result<(), SceneError>;

    // ---- hierarchy ----

    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    /// All descendants, depth first.
    fn descendants(&self, node: NodeId) -> Vec<NodeId>;
    fn descendants_of_kind(&self, node: NodeId, kind: NodeKind) -> Vec<NodeId>;
    /// Move under a new parent; `None` reparents to the world root.
    fn reparent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> Result<(), SceneError>;
    /// Deep-copy the node and its subtree; returns the new root.
    fn duplicate(&mut self, node: NodeId) -> Result<NodeId, SceneError>;
    /// Delete the node and everything below it.
    fn delete(&mut self, node: NodeId) -> Result<(), SceneError>;
    fn rename(&mut self, node: NodeId, new_name: &str) -> Result<(), SceneError>;

    // ---- connections ----

    fn connect(
        &mut self,
        src: NodeId,
        src_attr: &str,
        dst: NodeId,
        dst_attr: &str,
    ) -> Result<(), SceneError>;
    fn disconnect(
        &mut self,
        src: NodeId,
        src_attr: &str,
        dst: NodeId,
        dst_attr: &str,
    ) -> Result<(), SceneError>;
    /// Destination nodes wired from `node.attr`, in connection order.
    fn connections_from(&self, node: NodeId, attr: &str) -> Vec<NodeId>;

    // ---- selection ----

    fn selection(&self) -> Vec<NodeId>;
    /// Append to the current selection, skipping ids already selected.
    fn select(&mut self, nodes: &[NodeId]);
    fn clear_selection(&mut self);

    // ---- animation ----

    fn anim_layers(&self) -> Vec<String>;
    fn layer_state(&self, layer: &str) -> Option<LayerState>;
    fn layer_mode(&self, layer: &str) -> Option<LayerMode>;
    fn set_layer_state(&mut self, layer: &str, state: LayerState) -> Result<(), SceneError>;
    fn set_layer_weight(&mut self, layer: &str, weight: f32) -> Result<(), SceneError>;
    /// Create a fresh layer with host-chosen unique name; returns its node.
    fn create_anim_layer(&mut self, mode: LayerMode) -> NodeId;

    /// Key a single attribute at the current state (used for layer weight).
    fn key_attr(&mut self, node: NodeId, attr: &str) -> Result<(), SceneError>;
    /// Key the node's transform channels on the given layer at a frame.
    fn key_transform_on_layer(
        &mut self,
        node: NodeId,
        layer: &str,
        frame: f32,
    ) -> Result<(), SceneError>;
    /// Bake the listed channels to keys over the frame range.
    fn bake_channels(
        &mut self,
        node: NodeId,
        channels: &[&str],
        start_frame: f32,
        end_frame: f32,
    ) -> Result<(), SceneError>;

    // ---- transforms ----

    fn set_translation(&mut self, node: NodeId, t: [f32; 3]) -> Result<(), SceneError>;
    fn set_rotation(&mut self, node: NodeId, r: [f32; 3]) -> Result<(), SceneError>;
    /// Local translation accumulated up the parent chain.
    fn world_translation(&self, node: NodeId) -> Option<[f32; 3]>;
    fn set_channel_locked(
        &mut self,
        node: NodeId,
        channel: &str,
        locked: bool,
    ) -> Result<(), SceneError>;
    fn is_channel_locked(&self, node: NodeId, channel: &str) -> bool;

    // ---- playback, references, export ----

    fn playback_range(&self) -> (f32, f32);
    /// Namespaces of loaded file references, in host order.
    fn reference_namespaces(&self) -> Vec<String>;
    /// Opaque export of the given selection to a file path.
    fn export_to_file(
        &mut self,
        selection: &[NodeId],
        path: &str,
        options: &ExportOptions,
    ) -> Result<(), SceneError>;
}

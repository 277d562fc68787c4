//! Export-skeleton preparation: joints-only duplicate of the bind skeleton,
//! driven by the original, plus the rebase-to-world-origin bake.

use rigport_scene_core::{LayerMode, NodeId, NodeKind, SceneError, SceneHost};

use crate::tags::{self, GARBAGE_FLAG};

pub const TRANSFORM_CHANNELS: [&str; 9] = [
    "translateX",
    "translateY",
    "translateZ",
    "rotateX",
    "rotateY",
    "rotateZ",
    "scaleX",
    "scaleY",
    "scaleZ",
];

/// The duplicated export rig: its world-parented root and every joint in it
/// (root included), paired index-for-index with the source hierarchy.
#[derive(Debug, Clone)]
pub struct DuplicateRig {
    pub root: NodeId,
    pub joints: Vec<NodeId>,
}

/// Unlock every transform channel on the node and its descendants.
pub fn unlock_transform_channels(scene: &mut dyn SceneHost, root: NodeId) {
    let mut nodes = scene.descendants(root);
    nodes.push(root);
    for node in nodes {
        for channel in TRANSFORM_CHANNELS {
            let _ = scene.set_channel_locked(node, channel, false);
        }
    }
}

fn connect_axes(
    scene: &mut dyn SceneHost,
    src: NodeId,
    dst: NodeId,
    base: &str,
) -> Result<(), SceneError> {
    for axis in ["X", "Y", "Z"] {
        let channel = format!("{base}{axis}");
        scene.connect(src, &channel, dst, &channel)?;
    }
    Ok(())
}

/// Duplicate the bind skeleton below `origin`, strip everything that is not
/// a joint, unlock the copy, wire each duplicate joint's translate, rotate,
/// and scale as driven copies of the corresponding original joint, reparent
/// the copy to world, and tag it for the garbage sweep.
///
/// Assumes joints are only parented to other joints, so the source and
/// duplicate joint lists pair up by index after the strip.
pub fn copy_and_connect_skeleton(
    scene: &mut dyn SceneHost,
    origin: NodeId,
) -> Result<Option<DuplicateRig>, SceneError> {
    if !scene.exists(origin) {
        return Ok(None);
    }
    let dup_root = scene.duplicate(origin)?;

    for node in scene.descendants(dup_root) {
        // an earlier delete may have taken this node down with its parent
        if scene.exists(node) && scene.node_kind(node) != Some(NodeKind::Joint) {
            scene.delete(node)?;
        }
    }

    unlock_transform_channels(scene, dup_root);

    let mut orig_joints = scene.descendants_of_kind(origin, NodeKind::Joint);
    let mut new_joints = scene.descendants_of_kind(dup_root, NodeKind::Joint);
    orig_joints.push(origin);
    new_joints.push(dup_root);

    for (src, dst) in orig_joints.iter().zip(new_joints.iter()) {
        connect_axes(scene, *src, *dst, "translate")?;
        connect_axes(scene, *src, *dst, "rotate")?;
        connect_axes(scene, *src, *dst, "scale")?;
    }

    scene.reparent(dup_root, None)?;
    tags::set_flag(scene, dup_root, GARBAGE_FLAG);

    Ok(Some(DuplicateRig {
        root: dup_root,
        joints: new_joints,
    }))
}

/// Rebase the export skeleton to the world origin over a frame range.
///
/// Bakes the root's transform channels into keys, lays the result onto a
/// fresh animation layer (override kills the original motion, additive
/// preserves and stacks it), forces translate/rotate to zero keyed at the
/// start frame under that layer, and tags the layer for the garbage sweep.
pub fn transform_to_origin(
    scene: &mut dyn SceneHost,
    root: NodeId,
    start_frame: f32,
    end_frame: f32,
    zero_origin: bool,
) -> Result<(), SceneError> {
    scene.bake_channels(root, &TRANSFORM_CHANNELS, start_frame, end_frame)?;

    scene.clear_selection();
    scene.select(&[root]);

    let mode = if zero_origin {
        LayerMode::Override
    } else {
        LayerMode::Additive
    };
    let layer = scene.create_anim_layer(mode);
    tags::set_flag(scene, layer, GARBAGE_FLAG);

    let layer_name = scene
        .node_name(layer)
        .ok_or(SceneError::NodeMissing(layer))?;
    scene.set_layer_weight(&layer_name, 1.0)?;
    scene.key_attr(layer, "weight")?;

    scene.set_translation(root, [0.0; 3])?;
    scene.set_rotation(root, [0.0; 3])?;
    scene.key_transform_on_layer(root, &layer_name, start_frame)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigport_scene_core::{LayerState, MemoryScene};

    #[test]
    fn zero_origin_lays_bake_on_an_override_layer() {
        let mut scene = MemoryScene::new();
        let root = scene.add_joint("root", None, None);
        transform_to_origin(&mut scene, root, 1.0, 24.0, true).unwrap();
        let layers = scene.anim_layers();
        assert_eq!(scene.layer_mode(&layers[0]), Some(LayerMode::Override));
    }

    #[test]
    fn kept_motion_lays_bake_on_an_additive_layer() {
        let mut scene = MemoryScene::new();
        let root = scene.add_joint("root", None, None);
        transform_to_origin(&mut scene, root, 1.0, 24.0, false).unwrap();
        let layers = scene.anim_layers();
        assert_eq!(scene.layer_mode(&layers[0]), Some(LayerMode::Additive));
    }

    fn rig_with_extras(scene: &mut MemoryScene) -> NodeId {
        let root = scene.add_joint("root", Some("hero"), None);
        let spine = scene.add_joint("spine", Some("hero"), Some(root));
        scene.add_joint("hand", Some("hero"), Some(spine));
        // non-joint clutter that the strip must remove from the copy
        scene.add_transform("twist_helper", Some("hero"), Some(spine));
        root
    }

    #[test]
    fn copy_strips_non_joints_and_goes_to_world() {
        let mut scene = MemoryScene::new();
        let root = rig_with_extras(&mut scene);
        let rig = copy_and_connect_skeleton(&mut scene, root)
            .unwrap()
            .expect("origin exists");
        assert_eq!(scene.parent(rig.root), None);
        assert_eq!(rig.joints.len(), 3);
        for j in &rig.joints {
            assert_eq!(scene.node_kind(*j), Some(NodeKind::Joint));
        }
        // the source keeps its helper transform
        assert_eq!(
            scene.descendants_of_kind(root, NodeKind::Transform).len(),
            1
        );
        assert!(tags::has_flag(&scene, rig.root, GARBAGE_FLAG));
    }

    #[test]
    fn copy_wires_driven_channels() {
        let mut scene = MemoryScene::new();
        let root = rig_with_extras(&mut scene);
        let rig = copy_and_connect_skeleton(&mut scene, root)
            .unwrap()
            .unwrap();
        // the original root drives the duplicate root
        assert_eq!(scene.connections_from(root, "translateX"), vec![rig.root]);
        assert_eq!(scene.connections_from(root, "scaleZ"), vec![rig.root]);
    }

    #[test]
    fn copy_of_missing_origin_is_none() {
        let mut scene = MemoryScene::new();
        let root = scene.add_joint("root", None, None);
        scene.delete(root).unwrap();
        assert!(copy_and_connect_skeleton(&mut scene, root)
            .unwrap()
            .is_none());
    }

    #[test]
    fn rebase_bakes_and_zeroes_under_garbage_layer() {
        let mut scene = MemoryScene::new();
        let root = scene.add_joint("root", None, None);
        scene.set_translation(root, [5.0, 0.0, 2.0]).unwrap();
        transform_to_origin(&mut scene, root, 10.0, 20.0, true).unwrap();

        assert_eq!(scene.baked.len(), 1);
        assert_eq!(scene.baked[0].start_frame, 10.0);
        assert_eq!(scene.baked[0].end_frame, 20.0);
        assert_eq!(scene.baked[0].channels.len(), 9);

        assert_eq!(scene.local_translation(root), Some([0.0; 3]));
        let layers = scene.anim_layers();
        assert_eq!(layers.len(), 1);
        assert_eq!(scene.layer_state(&layers[0]), Some(LayerState::default()));

        // zero key landed on the new layer at the start frame
        assert!(scene
            .keys
            .iter()
            .any(|k| k.layer.as_deref() == Some(layers[0].as_str()) && k.frame == Some(10.0)));

        // sweeping garbage removes the layer again
        tags::sweep(&mut scene, GARBAGE_FLAG);
        assert!(scene.anim_layers().is_empty());
    }
}

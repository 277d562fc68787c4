//! Origin resolution: find the marked root joint of a rig scope.

use rigport_scene_core::{NodeId, NodeKind, SceneHost};

use crate::tags::{self, ORIGIN_FLAG};

/// Find the joint carrying the origin marker.
///
/// With a scope, only joints inside that namespace are considered; without
/// one, every joint in the scene. Returns `None` when nothing is marked;
/// callers must branch on absence before using the result. When more than
/// one joint in scope is marked, the first in host enumeration order wins;
/// that ordering is host-defined and should not be relied on.
pub fn resolve_origin(scene: &dyn SceneHost, scope: Option<&str>) -> Option<NodeId> {
    scene
        .nodes_of_kind(NodeKind::Joint, scope)
        .into_iter()
        .find(|j| tags::has_flag(scene, *j, ORIGIN_FLAG))
}

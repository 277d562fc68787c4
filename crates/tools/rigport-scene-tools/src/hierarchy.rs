//! Depth-first hierarchy printout.

use rigport_scene_core::{NodeId, SceneHost};

fn full_path(scene: &dyn SceneHost, node: NodeId) -> String {
    let mut parts = Vec::new();
    let mut cur = Some(node);
    while let Some(id) = cur {
        if let Some(name) = scene.node_name(id) {
            parts.push(name);
        }
        cur = scene.parent(id);
    }
    parts.reverse();
    format!("|{}", parts.join("|"))
}

fn describe_node(scene: &dyn SceneHost, node: NodeId, depth: usize, out: &mut Vec<String>) {
    let name = scene.node_name(node).unwrap_or_default();
    let kind = scene
        .node_kind(node)
        .map(|k| format!("{k:?}"))
        .unwrap_or_default();
    let mut line = "----->".repeat(depth);
    line.push_str(&format!(
        "name: {name}, Type: {kind}, Path: {}",
        full_path(scene, node)
    ));
    out.push(line);
    for child in scene.children(node) {
        describe_node(scene, child, depth + 1, out);
    }
}

/// One line per node, depth first from the scene roots, with a depth marker
/// prefix per level.
pub fn describe_hierarchy(scene: &dyn SceneHost) -> Vec<String> {
    let mut out = Vec::new();
    for node in scene.all_nodes() {
        if scene.parent(node).is_none() {
            describe_node(scene, node, 0, &mut out);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigport_scene_core::MemoryScene;

    #[test]
    fn lines_follow_depth_first_order() {
        let mut scene = MemoryScene::new();
        let root = scene.add_joint("root", None, None);
        let spine = scene.add_joint("spine", None, Some(root));
        scene.add_joint("head", None, Some(spine));
        scene.add_transform("prop", None, None);

        let lines = describe_hierarchy(&scene);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "name: root, Type: Joint, Path: |root");
        assert_eq!(
            lines[1],
            "----->name: spine, Type: Joint, Path: |root|spine"
        );
        assert_eq!(
            lines[2],
            "----->----->name: head, Type: Joint, Path: |root|spine|head"
        );
        assert!(lines[3].starts_with("name: prop, Type: Transform"));
    }
}

//! Batch renaming over transforms in the scene.
//!
//! Renames that would collide with an existing name are skipped and logged;
//! the rest of the batch proceeds.

use rigport_scene_core::{NodeId, NodeKind, SceneHost};

fn short_name(full: &str) -> &str {
    full.rsplit(':').next().unwrap_or(full)
}

/// Select every transform whose name contains the needle; returns the
/// matches. The previous selection is replaced (cleared when nothing
/// matches).
pub fn find_matches(scene: &mut dyn SceneHost, needle: &str) -> Vec<NodeId> {
    let matches: Vec<NodeId> = scene
        .nodes_of_kind(NodeKind::Transform, None)
        .into_iter()
        .filter(|id| {
            scene
                .node_name(*id)
                .map(|n| n.contains(needle))
                .unwrap_or(false)
        })
        .collect();
    scene.clear_selection();
    scene.select(&matches);
    matches
}

fn rename_selection(scene: &mut dyn SceneHost, f: impl Fn(&str) -> String) -> usize {
    let mut renamed = 0;
    for id in scene.selection() {
        let Some(full) = scene.node_name(id) else {
            continue;
        };
        let new_name = f(short_name(&full));
        log::debug!("renaming {full} > {new_name}");
        match scene.rename(id, &new_name) {
            Ok(()) => renamed += 1,
            Err(e) => log::warn!("skipping rename of {full}: {e}"),
        }
    }
    renamed
}

/// Prepend a prefix to every selected node's name; returns how many renamed.
pub fn add_prefix(scene: &mut dyn SceneHost, prefix: &str) -> usize {
    rename_selection(scene, |name| format!("{prefix}{name}"))
}

/// Append a suffix to every selected node's name; returns how many renamed.
pub fn add_suffix(scene: &mut dyn SceneHost, suffix: &str) -> usize {
    rename_selection(scene, |name| format!("{name}{suffix}"))
}

/// Substring replace across every transform whose name contains `find`.
pub fn find_replace(scene: &mut dyn SceneHost, find: &str, replace: &str) -> usize {
    find_matches(scene, find);
    rename_selection(scene, |name| name.replace(find, replace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigport_scene_core::MemoryScene;

    fn props(scene: &mut MemoryScene) -> (NodeId, NodeId, NodeId) {
        let a = scene.add_transform("crate_small", None, None);
        let b = scene.add_transform("crate_big", None, None);
        let c = scene.add_transform("barrel", None, None);
        (a, b, c)
    }

    #[test]
    fn find_matches_selects_only_hits() {
        let mut scene = MemoryScene::new();
        let (a, b, c) = props(&mut scene);
        scene.select(&[c]);
        let m = find_matches(&mut scene, "crate");
        assert_eq!(m, vec![a, b]);
        assert_eq!(scene.selection(), vec![a, b]);
        // no hits clears the selection
        assert!(find_matches(&mut scene, "zzz").is_empty());
        assert!(scene.selection().is_empty());
    }

    #[test]
    fn prefix_and_suffix_rename_selection() {
        let mut scene = MemoryScene::new();
        let (a, _, c) = props(&mut scene);
        scene.clear_selection();
        scene.select(&[a, c]);
        assert_eq!(add_prefix(&mut scene, "env_"), 2);
        assert_eq!(scene.node_name(a).as_deref(), Some("env_crate_small"));
        assert_eq!(add_suffix(&mut scene, "_geo"), 2);
        assert_eq!(scene.node_name(c).as_deref(), Some("env_barrel_geo"));
    }

    #[test]
    fn find_replace_rewrites_matches() {
        let mut scene = MemoryScene::new();
        let (a, b, c) = props(&mut scene);
        assert_eq!(find_replace(&mut scene, "crate", "box"), 2);
        assert_eq!(scene.node_name(a).as_deref(), Some("box_small"));
        assert_eq!(scene.node_name(b).as_deref(), Some("box_big"));
        assert_eq!(scene.node_name(c).as_deref(), Some("barrel"));
    }

    #[test]
    fn colliding_rename_is_skipped() {
        let mut scene = MemoryScene::new();
        let a = scene.add_transform("prop", None, None);
        scene.add_transform("env_prop", None, None);
        scene.select(&[a]);
        assert_eq!(add_prefix(&mut scene, "env_"), 0);
        assert_eq!(scene.node_name(a).as_deref(), Some("prop"));
    }
}

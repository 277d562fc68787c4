//! JSON scene snapshots: transform names and world translations.
//!
//! Capture writes one record per transform; apply sets translations back
//! onto nodes found by name, skipping records whose object has gone away.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rigport_scene_core::{NodeKind, SceneHost};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub name: String,
    pub translate: [f32; 3],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub objects: Vec<ObjectRecord>,
}

/// Record every transform's full name and world translation, in host order.
pub fn capture_snapshot(scene: &dyn SceneHost) -> SceneSnapshot {
    let mut objects = Vec::new();
    for id in scene.nodes_of_kind(NodeKind::Transform, None) {
        let (Some(name), Some(translate)) = (scene.node_name(id), scene.world_translation(id))
        else {
            continue;
        };
        objects.push(ObjectRecord { name, translate });
    }
    SceneSnapshot { objects }
}

pub fn write_snapshot(snapshot: &SceneSnapshot, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, text).with_context(|| format!("failed to write snapshot to {}", path.display()))
}

pub fn read_snapshot(path: &Path) -> Result<SceneSnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse snapshot {}", path.display()))
}

/// Push recorded translations back onto the scene. Returns the names of
/// records whose object no longer exists (skipped, others applied).
pub fn apply_snapshot(scene: &mut dyn SceneHost, snapshot: &SceneSnapshot) -> Vec<String> {
    let mut skipped = Vec::new();
    for record in &snapshot.objects {
        match scene.find_by_name(&record.name) {
            Some(id) => {
                let _ = scene.set_translation(id, record.translate);
            }
            None => {
                log::warn!("snapshot object '{}' not found; skipping", record.name);
                skipped.push(record.name.clone());
            }
        }
    }
    skipped
}

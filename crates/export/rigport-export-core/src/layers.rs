//! Animation-layer snapshots.
//!
//! A snapshot is an ordered list of (layer, mute, solo) records. Typed serde
//! records are the authoritative schema; the legacy three-level delimiter
//! grammar (`name, mute=<Bool>, solo=<Bool>;` per record) is kept as a
//! `Display`/`FromStr` codec so strings written by the old tooling still
//! round-trip.
//!
//! Restore is per-record best effort: a record naming a layer that no longer
//! exists is skipped and reported; the rest are still applied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rigport_scene_core::{LayerState, SceneHost};

use crate::diagnostics::Warning;
use crate::registry::{ExportNodeId, ExportNodeRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSetting {
    pub layer: String,
    pub mute: bool,
    pub solo: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSnapshot(pub Vec<LayerSetting>);

impl LayerSnapshot {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerSetting> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotParseError {
    #[error("snapshot record '{0}' does not have layer, mute, and solo fields")]
    MalformedRecord(String),

    #[error("snapshot field '{0}' is not a key=value pair")]
    MalformedField(String),
}

fn py_bool(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

/// Field order is fixed: layer, mute, solo. The value is whatever follows
/// `=`; the literal `True` means true, anything else false.
fn parse_bool_field(field: &str) -> Result<bool, SnapshotParseError> {
    let mut parts = field.splitn(2, '=');
    let _key = parts.next();
    let value = parts
        .next()
        .ok_or_else(|| SnapshotParseError::MalformedField(field.to_string()))?;
    Ok(value.trim() == "True")
}

impl fmt::Display for LayerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.0 {
            write!(
                f,
                "{}, mute={}, solo={};",
                s.layer,
                py_bool(s.mute),
                py_bool(s.solo)
            )?;
        }
        Ok(())
    }
}

impl FromStr for LayerSnapshot {
    type Err = SnapshotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut settings = Vec::new();
        for record in s.split(';') {
            // the grammar leaves a trailing empty fragment
            if record.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = record.split(',').collect();
            if fields.len() != 3 {
                return Err(SnapshotParseError::MalformedRecord(record.to_string()));
            }
            settings.push(LayerSetting {
                layer: fields[0].trim().to_string(),
                mute: parse_bool_field(fields[1])?,
                solo: parse_bool_field(fields[2])?,
            });
        }
        Ok(LayerSnapshot(settings))
    }
}

/// Capture mute/solo of every layer in the scene, in host order.
pub fn snapshot_layers(scene: &dyn SceneHost) -> LayerSnapshot {
    let mut settings = Vec::new();
    for layer in scene.anim_layers() {
        if let Some(state) = scene.layer_state(&layer) {
            settings.push(LayerSetting {
                layer,
                mute: state.mute,
                solo: state.solo,
            });
        }
    }
    LayerSnapshot(settings)
}

/// Apply a snapshot back onto the scene's layers. An empty snapshot is a
/// no-op. Records naming missing layers are skipped and reported.
pub fn apply_snapshot(scene: &mut dyn SceneHost, snapshot: &LayerSnapshot) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if snapshot.is_empty() {
        return warnings;
    }
    for s in snapshot.iter() {
        let state = LayerState {
            mute: s.mute,
            solo: s.solo,
        };
        if scene.set_layer_state(&s.layer, state).is_err() {
            warnings.push(Warning::LayerMissing {
                layer: s.layer.clone(),
            });
        }
    }
    warnings
}

/// Snapshot the scene's layers into the export node, overwriting any prior
/// snapshot. Returns false when the node does not exist.
pub fn record_layer_settings(
    scene: &dyn SceneHost,
    registry: &mut ExportNodeRegistry,
    id: ExportNodeId,
) -> bool {
    let snapshot = snapshot_layers(scene);
    match registry.node_mut(id) {
        Some(node) => {
            node.layer_snapshot = snapshot;
            true
        }
        None => false,
    }
}

/// Restore the export node's stored snapshot onto the scene.
pub fn restore_layer_settings(
    scene: &mut dyn SceneHost,
    registry: &ExportNodeRegistry,
    id: ExportNodeId,
) -> Vec<Warning> {
    match registry.node(id) {
        Some(node) => apply_snapshot(scene, &node.layer_snapshot),
        None => vec![Warning::NodeNotFound { id }],
    }
}

/// Reset the export node's snapshot to empty. Returns false when the node
/// does not exist.
pub fn clear_layer_settings(registry: &mut ExportNodeRegistry, id: ExportNodeId) -> bool {
    match registry.node_mut(id) {
        Some(node) => {
            node.layer_snapshot = LayerSnapshot::default();
            true
        }
        None => false,
    }
}

//! The batch export orchestrator.
//!
//! Drives a scene host through the per-character, per-export-node sequence:
//! garbage sweep, origin resolution, mesh gathering, skeleton duplication,
//! optional rebase to world origin, layer-snapshot restore, file export,
//! and a final sweep. Best-effort batch semantics throughout: a bad item is
//! skipped with a structured warning and the rest of the batch proceeds.

use std::path::PathBuf;

use anyhow::Result;

use rigport_scene_core::{ExportOptions, NodeId, NodeKind, SceneError, SceneHost};

use crate::diagnostics::{ExportReport, Warning};
use crate::layers;
use crate::origin::resolve_origin;
use crate::registry::{ExportNodeId, ExportNodeRegistry};
use crate::skeleton::{copy_and_connect_skeleton, transform_to_origin};
use crate::tags::{self, GARBAGE_FLAG};

/// Meshes driven by blend-shape deformers inside a namespace, discovered by
/// walking deformer -> downstream mesh shape -> parent transform.
pub fn find_meshes_with_blendshapes(scene: &dyn SceneHost, namespace: &str) -> Vec<NodeId> {
    let mut meshes = Vec::new();
    for deformer in scene.nodes_of_kind(NodeKind::BlendShape, Some(namespace)) {
        for downstream in scene.connections_from(deformer, "outputGeometry") {
            if scene.node_kind(downstream) == Some(NodeKind::Mesh) {
                if let Some(transform) = scene.parent(downstream) {
                    meshes.push(transform);
                }
            }
        }
    }
    meshes
}

#[derive(Debug)]
pub struct Exporter {
    pub registry: ExportNodeRegistry,
    /// Export filenames are resolved relative to this directory.
    pub workspace_root: PathBuf,
}

impl Exporter {
    pub fn new() -> Self {
        Self {
            registry: ExportNodeRegistry::new(),
            workspace_root: PathBuf::from("."),
        }
    }

    pub fn with_workspace_root(root: impl Into<PathBuf>) -> Self {
        Self {
            registry: ExportNodeRegistry::new(),
            workspace_root: root.into(),
        }
    }

    fn output_path(&self, export_name: &str) -> String {
        self.workspace_root
            .join(export_name)
            .to_string_lossy()
            .into_owned()
    }

    /// Export animation takes for one character, or for every referenced
    /// namespace when `character` is `None`. A specific export node can be
    /// forced with `node`; otherwise every node linked to the character's
    /// origin is considered.
    pub fn export_animation(
        &mut self,
        scene: &mut dyn SceneHost,
        character: Option<&str>,
        node: Option<ExportNodeId>,
    ) -> Result<ExportReport> {
        let mut report = ExportReport::new();

        tags::sweep(scene, GARBAGE_FLAG);

        let characters: Vec<String> = match character {
            Some(c) => vec![c.to_string()],
            None => scene.reference_namespaces(),
        };

        for character in &characters {
            let meshes = find_meshes_with_blendshapes(scene, character);

            let Some(origin) = resolve_origin(scene, Some(character)) else {
                report.warn(Warning::OriginNotFound {
                    scope: character.clone(),
                });
                continue;
            };

            let node_ids = match node {
                Some(id) => vec![id],
                None => self.registry.nodes_for_origin(origin),
            };

            for id in node_ids {
                let Some(record) = self.registry.node(id).cloned() else {
                    report.warn(Warning::NodeNotFound { id });
                    continue;
                };

                if record.export {
                    // a host refusal skips this take only, never the batch
                    let outcome =
                        self.export_one_take(scene, origin, &meshes, id, &record, &mut report);
                    if let Err(e) = outcome {
                        report.warn(Warning::HostError {
                            node: record.name.clone(),
                            reason: e.to_string(),
                        });
                    }
                }

                // post-condition cleanliness, success or not
                tags::sweep(scene, GARBAGE_FLAG);
            }
        }

        Ok(report)
    }

    fn export_one_take(
        &mut self,
        scene: &mut dyn SceneHost,
        origin: NodeId,
        meshes: &[NodeId],
        id: ExportNodeId,
        record: &crate::registry::ExportNode,
        report: &mut ExportReport,
    ) -> Result<(), SceneError> {
        let Some(rig) = copy_and_connect_skeleton(scene, origin)? else {
            // origin disappeared between resolution and duplication
            report.warn(Warning::OriginNotFound {
                scope: scene.node_name(origin).unwrap_or_default(),
            });
            return Ok(());
        };

        let (mut start_frame, mut end_frame) = scene.playback_range();
        if record.use_sub_range {
            start_frame = record.start_frame;
            end_frame = record.end_frame;
        }

        if record.move_to_origin {
            transform_to_origin(scene, rig.root, start_frame, end_frame, record.zero_origin)?;
        }

        scene.clear_selection();
        scene.select(&rig.joints);
        scene.select(meshes);
        scene.select(&self.registry.connected_meshes(id));

        for w in layers::restore_layer_settings(scene, &self.registry, id) {
            report.warn(w);
        }

        if record.export_name.is_empty() {
            report.warn(Warning::Misconfigured {
                node: record.name.clone(),
            });
            return Ok(());
        }

        let path = self.output_path(&record.export_name);
        let options = ExportOptions::Animation {
            start_frame,
            end_frame,
        };
        let selection = scene.selection();
        match scene.export_to_file(&selection, &path, &options) {
            Ok(()) => report.exported.push(path),
            Err(e) => report.warn(Warning::ExportFailed {
                path,
                reason: e.to_string(),
            }),
        }
        Ok(())
    }

    /// Export the character model(s): the scene-wide origin skeleton plus
    /// each export node's connected meshes, with the origin temporarily
    /// unparented to world when it sits under another transform.
    pub fn export_model(
        &mut self,
        scene: &mut dyn SceneHost,
        node: Option<ExportNodeId>,
    ) -> Result<ExportReport> {
        let mut report = ExportReport::new();

        let Some(origin) = resolve_origin(scene, None) else {
            report.warn(Warning::OriginNotFound {
                scope: String::new(),
            });
            return Ok(report);
        };

        let node_ids = match node {
            Some(id) => vec![id],
            None => self.registry.nodes_for_origin(origin),
        };

        let old_parent = scene.parent(origin);
        if old_parent.is_some() {
            if let Err(e) = scene.reparent(origin, None) {
                report.warn(Warning::HostError {
                    node: scene.node_name(origin).unwrap_or_default(),
                    reason: e.to_string(),
                });
                return Ok(report);
            }
        }

        for id in node_ids {
            let Some(record) = self.registry.node(id).cloned() else {
                report.warn(Warning::NodeNotFound { id });
                continue;
            };
            if !record.export {
                continue;
            }

            scene.clear_selection();
            scene.select(&[origin]);
            let meshes = self.registry.connected_meshes(id);
            scene.select(&meshes);

            if record.export_name.is_empty() {
                report.warn(Warning::Misconfigured {
                    node: record.name.clone(),
                });
                continue;
            }

            let path = self.output_path(&record.export_name);
            let selection = scene.selection();
            match scene.export_to_file(&selection, &path, &ExportOptions::Model) {
                Ok(()) => report.exported.push(path),
                Err(e) => report.warn(Warning::ExportFailed {
                    path,
                    reason: e.to_string(),
                }),
            }
        }

        if let Some(parent) = old_parent {
            if let Err(e) = scene.reparent(origin, Some(parent)) {
                report.warn(Warning::HostError {
                    node: scene.node_name(origin).unwrap_or_default(),
                    reason: e.to_string(),
                });
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigport_scene_core::MemoryScene;
    use crate::tags::ORIGIN_FLAG;

    #[test]
    fn blendshape_walk_finds_parent_transforms() {
        let mut scene = MemoryScene::new();
        let face_xform = scene.add_transform("face", Some("hero"), None);
        let face_shape = scene.add_mesh("faceShape", Some("hero"), Some(face_xform));
        let deformer = scene.add_blend_shape("faceBlends", Some("hero"));
        scene
            .connect(deformer, "outputGeometry", face_shape, "inMesh")
            .unwrap();
        // deformer in another namespace is out of scope
        let other = scene.add_blend_shape("blends", Some("villain"));
        scene
            .connect(other, "outputGeometry", face_shape, "inMesh")
            .unwrap();

        assert_eq!(
            find_meshes_with_blendshapes(&scene, "hero"),
            vec![face_xform]
        );
    }

    #[test]
    fn model_export_unparents_origin_and_restores() {
        let mut scene = MemoryScene::new();
        let group = scene.add_transform("rig_grp", None, None);
        let origin = scene.add_joint("root", None, Some(group));
        tags::set_flag(&mut scene, origin, ORIGIN_FLAG);
        let body = scene.add_mesh("body", None, None);

        let mut exporter = Exporter::new();
        let id = exporter.registry.create("Hero");
        exporter.registry.link_origin(id, origin);
        exporter.registry.connect_meshes(&mut scene, id, &[body]);
        exporter.registry.node_mut(id).unwrap().export_name = "hero_model.fbx".into();

        let report = exporter.export_model(&mut scene, None).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.exported.len(), 1);
        assert_eq!(scene.exports.len(), 1);
        assert_eq!(scene.exports[0].options, ExportOptions::Model);
        assert!(scene.exports[0].selection.contains(&"root".to_string()));
        assert!(scene.exports[0].selection.contains(&"body".to_string()));
        // origin went back under its group
        assert_eq!(scene.parent(origin), Some(group));
    }

    #[test]
    fn model_export_without_origin_reports() {
        let mut scene = MemoryScene::new();
        scene.add_joint("root", None, None);
        let mut exporter = Exporter::new();
        let report = exporter.export_model(&mut scene, None).unwrap();
        assert_eq!(report.exported.len(), 0);
        assert!(matches!(
            report.warnings[0],
            Warning::OriginNotFound { .. }
        ));
    }
}

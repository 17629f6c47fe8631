//! Snapshot and restore of a [`Scene`]
//!
//! Hinge ids are regenerated whenever markers are rebuilt, so restored hinge
//! state is matched to live markers by position: a stored hinge applies to
//! the nearest marker closer than `EditorConfig::hinge_match_tolerance`.

use crate::core::config::EditorConfig;
use crate::core::types::{CubeId, Vec3};
use crate::render::RenderBackend;
use crate::scene::Scene;
use super::document::{CubeRecord, HingeRecord, SceneDocument};

/// What a restore applied and what it had to skip
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub cubes: usize,
    pub skipped_cubes: usize,
    pub selected_cubes: usize,
    pub hinges: usize,
    pub unmatched_hinges: usize,
}

/// Capture cubes, cube selection and selected hinges
pub fn snapshot(scene: &Scene) -> SceneDocument {
    let registry = scene.registry();
    let record = |id: &CubeId| {
        registry.get_by_id(*id).map(|cube| CubeRecord {
            position: cube.position().into(),
            uuid: cube.id(),
        })
    };

    SceneDocument {
        cubes: registry.all().iter().map(|c| CubeRecord { position: c.position().into(), uuid: c.id() }).collect(),
        selected_cubes: scene.selection().ids().iter().filter_map(record).collect(),
        hinge_points: scene
            .hinges()
            .selected()
            .map(|m| HingeRecord {
                position: m.position().into(),
                uuid: m.id(),
                status: m.is_selected(),
                connected_cubes: m.connected_cube_ids().to_vec(),
            })
            .collect(),
        hinges: Vec::new(),
    }
}

/// Replace the live scene with the document's content
pub fn restore(
    scene: &mut Scene,
    render: &mut dyn RenderBackend,
    config: &EditorConfig,
    doc: &SceneDocument,
) -> RestoreReport {
    let mut report = RestoreReport::default();
    scene.clear(render);

    for record in &doc.cubes {
        match scene.restore_cube(render, record.uuid, record.position.into()) {
            Ok(_) => report.cubes += 1,
            Err(err) => {
                log::warn!("Skipping stored cube {}: {}", record.uuid, err);
                report.skipped_cubes += 1;
            }
        }
    }

    let selected: Vec<CubeId> = doc
        .selected_cubes
        .iter()
        .map(|r| r.uuid)
        .filter(|id| scene.registry().get_by_id(*id).is_some())
        .collect();
    if let [a, b] = selected[..] {
        scene.select_cube(render, a);
        scene.select_cube(render, b);
        scene.ensure_hinges(render, a, b);
        report.selected_cubes = 2;
    }

    for record in &doc.hinge_points {
        if restore_hinge(scene, render, config, record) {
            report.hinges += 1;
        } else {
            report.unmatched_hinges += 1;
        }
    }

    log::info!(
        "Restored scene: {} cubes ({} skipped), {} selected, {} hinges ({} unmatched)",
        report.cubes, report.skipped_cubes, report.selected_cubes, report.hinges, report.unmatched_hinges
    );
    report
}

fn restore_hinge(
    scene: &mut Scene,
    render: &mut dyn RenderBackend,
    config: &EditorConfig,
    record: &HingeRecord,
) -> bool {
    // markers of the recorded pair may not exist yet when it isn't the selected pair
    if let [a, b] = record.connected_cubes[..] {
        scene.ensure_hinges(render, a, b);
    }

    let position = Vec3::from(record.position);
    let Some(id) = scene.hinges.find_near(position, config.hinge_match_tolerance) else {
        log::warn!("No hinge marker near stored hinge at {}", position);
        return false;
    };
    match scene.hinges.set_selected(render, id, record.status) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Stored hinge at {} dropped: {}", position, err);
            false
        }
    }
}

mod common;

use approx::assert_relative_eq;
use cadrebuild_algo::{
    reconstruct_wireframe, ReconstructConfig, ReconstructError, SweepConvention,
    ViewAssignmentError,
};
use cadrebuild_core::geom::Vec3;
use cadrebuild_core::model::Drawing2D;
use cadrebuild_core::scene::{RecordingScene, SceneError, SceneSink};
use common::{
    cube_sheet, quarter_cylinder_sheet, rect, right_arc_sheet, right_circle_sheet,
    standing_cylinder_sheet, top_arc_sheet,
};
use std::collections::HashSet;

fn grid(p: Vec3) -> (i64, i64, i64) {
    (
        (p.x * 10.0).round() as i64,
        (p.y * 10.0).round() as i64,
        (p.z * 10.0).round() as i64,
    )
}

fn undirected(a: Vec3, b: Vec3) -> ((i64, i64, i64), (i64, i64, i64)) {
    let (a, b) = (grid(a), grid(b));
    (a.min(b), a.max(b))
}

#[test]
fn cube_rebuilds_twelve_edges() {
    let mut scene = RecordingScene::new();
    let report =
        reconstruct_wireframe(&cube_sheet(), &ReconstructConfig::default(), &mut scene).unwrap();

    assert_eq!(3, report.stats.clusters);
    assert_eq!(8, report.stats.reconstructed_points);
    assert_eq!(12, report.stats.confirmed_edges);
    assert_eq!(12, report.stats.lines_emitted);
    assert_eq!(0, report.stats.arcs_emitted);
    assert!(report.warnings.is_empty());

    let lines: Vec<_> = scene.lines().collect();
    assert_eq!(12, lines.len());
    for l in &lines {
        assert_eq!(1, l.color_index);
        let (a, b) = (grid(l.start), grid(l.end));
        let differing = [a.0 != b.0, a.1 != b.1, a.2 != b.2]
            .iter()
            .filter(|d| **d)
            .count();
        assert_eq!(1, differing, "cube edges are axis-aligned: {l:?}");
    }
}

#[test]
fn no_edge_is_emitted_twice() {
    let mut scene = RecordingScene::new();
    reconstruct_wireframe(&cube_sheet(), &ReconstructConfig::default(), &mut scene).unwrap();

    let mut seen = HashSet::new();
    for l in scene.lines() {
        assert!(seen.insert(undirected(l.start, l.end)), "duplicate edge {l:?}");
    }
}

#[test]
fn front_arc_becomes_arc_not_line() {
    let mut scene = RecordingScene::new();
    let report = reconstruct_wireframe(
        &quarter_cylinder_sheet(),
        &ReconstructConfig::default(),
        &mut scene,
    )
    .unwrap();

    assert_eq!(6, report.stats.reconstructed_points);
    assert_eq!(7, report.stats.lines_emitted);
    assert_eq!(2, report.stats.arcs_emitted);

    let chord = undirected(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 10.0, 0.0));
    assert!(scene.lines().all(|l| undirected(l.start, l.end) != chord));

    let mut depths: Vec<i64> = scene
        .arcs()
        .map(|a| {
            assert_eq!(Vec3::new(0.0, 0.0, 1.0), a.normal);
            assert_relative_eq!(0.0, a.center.x);
            assert_relative_eq!(0.0, a.center.y);
            assert_relative_eq!(a.start.z, a.center.z);
            assert_relative_eq!(10.0, a.start.x);
            assert_relative_eq!(0.0, a.start.y);
            assert_relative_eq!(450.0, a.sweep_deg);
            grid(a.center).2
        })
        .collect();
    depths.sort();
    assert_eq!(vec![0, 100], depths);
}

#[test]
fn right_handed_sweep_drops_the_legacy_offset() {
    let config = ReconstructConfig {
        sweep_convention: SweepConvention::RightHanded,
        ..ReconstructConfig::default()
    };
    let mut scene = RecordingScene::new();
    reconstruct_wireframe(&quarter_cylinder_sheet(), &config, &mut scene).unwrap();

    assert_eq!(2, scene.arcs().count());
    for a in scene.arcs() {
        assert_relative_eq!(90.0, a.sweep_deg);
    }
}

#[test]
fn top_view_circle_becomes_two_circles() {
    let mut scene = RecordingScene::new();
    let report = reconstruct_wireframe(
        &standing_cylinder_sheet(),
        &ReconstructConfig::default(),
        &mut scene,
    )
    .unwrap();

    assert_eq!(0, report.stats.lines_emitted);
    assert_eq!(2, report.stats.circles_emitted);

    let mut centers: Vec<_> = scene
        .circles()
        .map(|c| {
            assert_eq!(Vec3::new(0.0, 1.0, 0.0), c.normal);
            assert_relative_eq!(5.0, c.radius);
            grid(c.center)
        })
        .collect();
    centers.sort();
    assert_eq!(vec![(50, 0, 50), (50, 100, 50)], centers);
}

#[test]
fn top_view_arc_uses_the_y_normal() {
    let mut scene = RecordingScene::new();
    let report =
        reconstruct_wireframe(&top_arc_sheet(), &ReconstructConfig::default(), &mut scene)
            .unwrap();
    assert_eq!(2, report.stats.arcs_emitted);

    let mut centers: Vec<_> = scene
        .arcs()
        .map(|a| {
            assert_eq!(Vec3::new(0.0, 1.0, 0.0), a.normal);
            assert_relative_eq!(10.0, a.start.x);
            assert_relative_eq!(0.0, a.start.z);
            assert_relative_eq!(a.center.y, a.start.y);
            assert_relative_eq!(-450.0, a.sweep_deg);
            grid(a.center)
        })
        .collect();
    centers.sort();
    assert_eq!(vec![(0, 0, 0), (0, 100, 0)], centers);
}

#[test]
fn right_view_arc_uses_the_x_normal() {
    let mut scene = RecordingScene::new();
    let report =
        reconstruct_wireframe(&right_arc_sheet(), &ReconstructConfig::default(), &mut scene)
            .unwrap();
    assert_eq!(2, report.stats.arcs_emitted);

    let mut centers: Vec<_> = scene
        .arcs()
        .map(|a| {
            assert_eq!(Vec3::new(1.0, 0.0, 0.0), a.normal);
            assert_relative_eq!(0.0, a.start.y);
            assert_relative_eq!(10.0, a.start.z);
            assert_relative_eq!(a.center.x, a.start.x);
            assert_relative_eq!(-450.0, a.sweep_deg);
            grid(a.center)
        })
        .collect();
    centers.sort();
    assert_eq!(vec![(0, 0, 0), (100, 0, 0)], centers);
}

#[test]
fn right_view_circle_becomes_two_circles() {
    let mut scene = RecordingScene::new();
    let report = reconstruct_wireframe(
        &right_circle_sheet(),
        &ReconstructConfig::default(),
        &mut scene,
    )
    .unwrap();
    assert_eq!(2, report.stats.circles_emitted);

    let mut centers: Vec<_> = scene
        .circles()
        .map(|c| {
            assert_eq!(Vec3::new(1.0, 0.0, 0.0), c.normal);
            assert_relative_eq!(5.0, c.radius);
            grid(c.center)
        })
        .collect();
    centers.sort();
    assert_eq!(vec![(0, 50, 50), (100, 50, 50)], centers);
}

#[test]
fn failed_view_assignment_leaves_scene_untouched() {
    let mut records = rect(0.0, 0.0, 10.0, 10.0);
    records.extend(rect(0.0, 20.0, 10.0, 30.0));
    let mut scene = RecordingScene::new();

    let err = reconstruct_wireframe(
        &Drawing2D::new(records),
        &ReconstructConfig::default(),
        &mut scene,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ReconstructError::ViewAssignment(ViewAssignmentError::TooFewClusters { found: 2 })
    ));
    assert!(scene.primitives.is_empty());
}

#[test]
fn negative_expand_distance_is_rejected() {
    let config = ReconstructConfig {
        expand_distance: -1.0,
        ..ReconstructConfig::default()
    };
    let mut scene = RecordingScene::new();
    let err = reconstruct_wireframe(&cube_sheet(), &config, &mut scene).unwrap_err();
    assert!(matches!(err, ReconstructError::InvalidConfig(_)));
}

/// Accepts lines, rejects every arc.
#[derive(Default)]
struct NoArcs {
    inner: RecordingScene,
    rejected: usize,
}

impl SceneSink for NoArcs {
    fn create_line(&mut self, start: Vec3, end: Vec3, color_index: i16) -> Result<(), SceneError> {
        self.inner.create_line(start, end, color_index)
    }

    fn create_arc(&mut self, _: Vec3, _: Vec3, _: Vec3, _: f64) -> Result<(), SceneError> {
        self.rejected += 1;
        Err(SceneError::Rejected {
            primitive: "arc",
            reason: "arcs disabled".to_string(),
        })
    }

    fn create_circle(&mut self, normal: Vec3, center: Vec3, radius: f64) -> Result<(), SceneError> {
        self.inner.create_circle(normal, center, radius)
    }
}

#[test]
fn rejected_primitives_do_not_stop_emission() {
    let mut scene = NoArcs::default();
    let report = reconstruct_wireframe(
        &quarter_cylinder_sheet(),
        &ReconstructConfig::default(),
        &mut scene,
    )
    .unwrap();

    assert_eq!(2, scene.rejected);
    assert_eq!(2, report.stats.emission_failures);
    assert_eq!(0, report.stats.arcs_emitted);
    assert_eq!(7, report.stats.lines_emitted);
    assert_eq!(7, scene.inner.lines().count());
    assert_eq!(
        2,
        report
            .warnings
            .iter()
            .filter(|w| w.code == "emission_failed")
            .count()
    );
}

#[test]
fn works_through_a_trait_object() {
    let mut scene = RecordingScene::new();
    let sink: &mut dyn SceneSink = &mut scene;
    reconstruct_wireframe(&cube_sheet(), &ReconstructConfig::default(), sink).unwrap();
    assert_eq!(12, scene.primitives.len());
}

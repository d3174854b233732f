use cadrebuild_core::model::Drawing2D;
use cadrebuild_core::normalize::{normalize, NormalizedDrawing};
use cadrebuild_core::report::{ReconstructionReport, StatsReport, Warning};
use cadrebuild_core::scene::SceneSink;

pub mod cluster;
pub mod config;
pub mod emit;
pub mod error;
pub mod fixed;
pub mod flat;
pub mod reconstruction;
pub mod structs;
pub mod view_separation;

pub use config::{ReconstructConfig, SweepConvention};
pub use error::{ReconstructError, Result, ViewAssignmentError};
pub use flat::lift_flat;

/// Rebuilds a 3D wireframe from a three-view sheet and streams it into `scene`.
///
/// Fails before touching the scene when the config is invalid or the views
/// cannot be assigned. Once emission starts it is best-effort: rejected
/// primitives show up as warnings in the returned report.
pub fn reconstruct_wireframe<S: SceneSink + ?Sized>(
    drawing: &Drawing2D,
    config: &ReconstructConfig,
    scene: &mut S,
) -> Result<ReconstructionReport> {
    config.validate()?;

    // 1. Flatten curves and split the sheet into views
    let normalized = normalize(drawing);
    let clusters = cluster::cluster_segments(&normalized.segments, config.expand_distance);
    let assignment = view_separation::classify_views(&clusters)?;

    // 2. Cross-view correspondence
    let views = reconstruction::build_projections(&clusters, &assignment);
    let points = reconstruction::reconstruct_points(&views[0], &views[1]);
    let edges = reconstruction::confirm_edges(&points, &views);

    // 3. Emit primitives
    let mut report = base_report(&normalized, &clusters);
    report.view_assignment = Some(assignment.report());
    let emitted = emit::emit_edges(
        &edges,
        &normalized.natives,
        &views,
        config.sweep_convention,
        scene,
        &mut report.warnings,
    );

    let stats = &mut report.stats;
    stats.front_points = views[0].points.len();
    stats.top_points = views[1].points.len();
    stats.right_points = views[2].points.len();
    stats.reconstructed_points = points.len();
    stats.confirmed_edges = edges.len();
    stats.lines_emitted = emitted.lines;
    stats.arcs_emitted = emitted.arcs;
    stats.circles_emitted = emitted.circles;
    stats.dropped_arc_edges = emitted.dropped_arc_edges;
    stats.emission_failures = emitted.failures;
    Ok(report)
}

/// Clustering and view assignment only; nothing is emitted.
///
/// A failed assignment is reported as a warning instead of an error so the
/// cluster layout can still be inspected.
pub fn analyze_views(drawing: &Drawing2D, config: &ReconstructConfig) -> Result<ReconstructionReport> {
    config.validate()?;

    let normalized = normalize(drawing);
    let clusters = cluster::cluster_segments(&normalized.segments, config.expand_distance);
    let mut report = base_report(&normalized, &clusters);

    match view_separation::classify_views(&clusters) {
        Ok(assignment) => report.view_assignment = Some(assignment.report()),
        Err(err) => {
            log::warn!("view assignment failed: {err}");
            report.warnings.push(Warning {
                code: "view_assignment_failed".to_string(),
                message: err.to_string(),
            });
        }
    }
    Ok(report)
}

fn base_report(normalized: &NormalizedDrawing, clusters: &[cluster::Cluster]) -> ReconstructionReport {
    ReconstructionReport {
        stats: StatsReport {
            records_total: normalized.stats.records_total,
            records_skipped: normalized.stats.unsupported_records
                + normalized.stats.degenerate_records,
            segments: normalized.segments.len(),
            clusters: clusters.len(),
            ..StatsReport::default()
        },
        view_clusters: clusters.iter().enumerate().map(|(id, c)| c.report(id)).collect(),
        view_assignment: None,
        warnings: normalized.warnings.clone(),
    }
}

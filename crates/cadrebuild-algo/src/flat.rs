use crate::config::SweepConvention;
use crate::emit::{sweep_degrees, LINE_COLOR};
use crate::structs::ViewSlot;
use cadrebuild_core::geom::{Vec2, Vec3};
use cadrebuild_core::model::{Drawing2D, NativeCurve};
use cadrebuild_core::normalize::normalize;
use cadrebuild_core::report::{ReconstructionReport, StatsReport, Warning};
use cadrebuild_core::scene::{Arc3D, Circle3D, Line3D, Primitive3D, SceneSink};

fn on_plane(p: Vec2) -> Vec3 {
    Vec3::new(p.x, p.y, 0.0)
}

/// Places every curve of the sheet on the z = 0 plane, unchanged.
pub fn lift_flat<S: SceneSink + ?Sized>(drawing: &Drawing2D, scene: &mut S) -> ReconstructionReport {
    let normalized = normalize(drawing);
    let mut warnings = normalized.warnings.clone();
    let mut stats = StatsReport {
        records_total: normalized.stats.records_total,
        records_skipped: normalized.stats.unsupported_records + normalized.stats.degenerate_records,
        segments: normalized.segments.len(),
        ..StatsReport::default()
    };

    for seg in &normalized.segments {
        let primitive = match normalized.native(seg.source_id) {
            Some(NativeCurve::Arc(arc)) => Primitive3D::Arc(Arc3D {
                normal: Vec3::new(0.0, 0.0, 1.0),
                center: on_plane(arc.center),
                start: on_plane(arc.start_point()),
                sweep_deg: sweep_degrees(ViewSlot::Front, arc.angle_delta_deg(), SweepConvention::Legacy),
            }),
            Some(NativeCurve::Circle(circle)) => Primitive3D::Circle(Circle3D {
                normal: Vec3::new(0.0, 0.0, 1.0),
                center: on_plane(circle.center),
                radius: circle.radius,
            }),
            _ => Primitive3D::Line(Line3D {
                start: on_plane(seg.p1),
                end: on_plane(seg.p2),
                color_index: LINE_COLOR,
            }),
        };

        match primitive.emit_into(scene) {
            Ok(()) => match primitive {
                Primitive3D::Line(_) => stats.lines_emitted += 1,
                Primitive3D::Arc(_) => stats.arcs_emitted += 1,
                Primitive3D::Circle(_) => stats.circles_emitted += 1,
            },
            Err(err) => {
                log::warn!("{err}");
                stats.emission_failures += 1;
                warnings.push(Warning {
                    code: "emission_failed".to_string(),
                    message: format!("Failed to create {}: {err}", primitive.kind_name()),
                });
            }
        }
    }

    log::info!(
        "Placed {} lines, {} arcs, {} circles on the z=0 plane",
        stats.lines_emitted,
        stats.arcs_emitted,
        stats.circles_emitted
    );
    ReconstructionReport {
        stats,
        view_clusters: Vec::new(),
        view_assignment: None,
        warnings,
    }
}

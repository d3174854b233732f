//! Turns confirmed edges into scene primitives.
//!
//! Each edge carries one membership per view. The strongest curve kind wins
//! (circle, then arc, then straight), with front before top before right on
//! ties. Arcs and circles are rebuilt in model space from the native 2D
//! parameters of the winning view.

use crate::config::SweepConvention;
use crate::fixed::{tenths, GridPoint3};
use crate::structs::{ConfirmedEdge, Membership, ViewProjection, ViewSlot};
use cadrebuild_core::geom::Vec3;
use cadrebuild_core::model::{Arc2D, Circle2D, NativeCurve, SegmentKind};
use cadrebuild_core::report::Warning;
use cadrebuild_core::scene::{Arc3D, Circle3D, Line3D, Primitive3D, SceneSink};
use nalgebra::Vector3;
use std::collections::HashSet;

pub const LINE_COLOR: i16 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub lines: usize,
    pub arcs: usize,
    pub circles: usize,
    pub dropped_arc_edges: usize,
    pub failures: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeClass {
    Emit {
        slot: ViewSlot,
        primitive: Primitive3D,
    },
    /// Arc membership whose endpoints are not the edge endpoints.
    UnorientedArc { source_id: usize },
    /// Membership points at a source with different native data.
    MissingNative { source_id: usize },
}

/// View axes in model space: (normal, local u, local v).
fn view_axes(slot: ViewSlot) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
    match slot {
        ViewSlot::Front => (Vector3::z(), Vector3::x(), Vector3::y()),
        ViewSlot::Top => (Vector3::y(), Vector3::x(), Vector3::z()),
        ViewSlot::Right => (Vector3::x(), Vector3::z(), Vector3::y()),
    }
}

/// +1 when the view's local frame turns counter-clockwise about its normal.
fn handedness(slot: ViewSlot) -> f64 {
    let (n, u, v) = view_axes(slot);
    n.dot(&u.cross(&v)).signum()
}

fn normal_of(slot: ViewSlot) -> Vec3 {
    let (n, _, _) = view_axes(slot);
    Vec3::new(n.x, n.y, n.z)
}

/// Signed sweep for an arc spanning `delta_deg` in its own view.
pub fn sweep_degrees(slot: ViewSlot, delta_deg: f64, convention: SweepConvention) -> f64 {
    let sign = handedness(slot);
    match convention {
        SweepConvention::Legacy => sign * (delta_deg + 360.0),
        SweepConvention::RightHanded => {
            let wrapped = delta_deg.rem_euclid(360.0);
            sign * if wrapped == 0.0 { 360.0 } else { wrapped }
        }
    }
}

fn rank(kind: SegmentKind) -> u8 {
    match kind {
        SegmentKind::Circle => 2,
        SegmentKind::Arc => 1,
        SegmentKind::Line | SegmentKind::Spline => 0,
    }
}

/// The view whose evidence decides the primitive type.
pub fn winning_view(edge: &ConfirmedEdge) -> (ViewSlot, Membership) {
    let mut best = (ViewSlot::Front, edge.evidence(ViewSlot::Front));
    for slot in [ViewSlot::Top, ViewSlot::Right] {
        let m = edge.evidence(slot);
        if rank(m.kind) > rank(best.1.kind) {
            best = (slot, m);
        }
    }
    best
}

pub fn classify_edge(
    edge: &ConfirmedEdge,
    natives: &[NativeCurve],
    views: &[ViewProjection; 3],
    convention: SweepConvention,
) -> EdgeClass {
    let (slot, evidence) = winning_view(edge);
    let view = &views[slot.index()];
    let source_id = evidence.source_id;

    let primitive = match (evidence.kind, natives.get(source_id)) {
        (SegmentKind::Line | SegmentKind::Spline, _) => Primitive3D::Line(Line3D {
            start: edge.start.to_vec3(),
            end: edge.end.to_vec3(),
            color_index: LINE_COLOR,
        }),
        (SegmentKind::Arc, Some(NativeCurve::Arc(arc))) => {
            match arc_primitive(edge, arc, view, convention) {
                Some(p) => p,
                None => return EdgeClass::UnorientedArc { source_id },
            }
        }
        (SegmentKind::Circle, Some(NativeCurve::Circle(circle))) => {
            circle_primitive(edge, circle, view)
        }
        _ => return EdgeClass::MissingNative { source_id },
    };
    EdgeClass::Emit { slot, primitive }
}

fn arc_primitive(
    edge: &ConfirmedEdge,
    arc: &Arc2D,
    view: &ViewProjection,
    convention: SweepConvention,
) -> Option<Primitive3D> {
    let slot = view.frame.slot;
    let arc_start = view.frame.to_grid(arc.start_point());
    let arc_end = view.frame.to_grid(arc.end_point());
    let (a, b) = (slot.project(edge.start), slot.project(edge.end));

    let start = if (a, b) == (arc_start, arc_end) {
        edge.start
    } else if (b, a) == (arc_start, arc_end) {
        edge.end
    } else {
        return None;
    };

    let start = start.to_vec3();
    let center = slot.lift(view.frame.to_local(arc.center), start);
    Some(Primitive3D::Arc(Arc3D {
        normal: normal_of(slot),
        center,
        start,
        sweep_deg: sweep_degrees(slot, arc.angle_delta_deg(), convention),
    }))
}

fn circle_primitive(edge: &ConfirmedEdge, circle: &Circle2D, view: &ViewProjection) -> Primitive3D {
    let slot = view.frame.slot;
    let center = slot.lift(view.frame.to_local(circle.center), edge.start.to_vec3());
    Primitive3D::Circle(Circle3D {
        normal: normal_of(slot),
        center,
        radius: circle.radius,
    })
}

fn circle_key(slot: ViewSlot, circle: &Circle3D) -> (ViewSlot, GridPoint3, i64) {
    let c = circle.center;
    (
        slot,
        GridPoint3::new(tenths(c.x), tenths(c.y), tenths(c.z)),
        tenths(circle.radius),
    )
}

/// Classifies and emits every edge, one scene call per primitive.
///
/// A rejected call is logged, recorded as a warning and skipped; emission
/// carries on with the next edge.
pub fn emit_edges<S: SceneSink + ?Sized>(
    edges: &[ConfirmedEdge],
    natives: &[NativeCurve],
    views: &[ViewProjection; 3],
    convention: SweepConvention,
    scene: &mut S,
    warnings: &mut Vec<Warning>,
) -> EmitStats {
    let mut stats = EmitStats::default();
    let mut circles_seen = HashSet::new();

    for edge in edges {
        let (slot, primitive) = match classify_edge(edge, natives, views, convention) {
            EdgeClass::Emit { slot, primitive } => (slot, primitive),
            EdgeClass::UnorientedArc { source_id } => {
                log::debug!(
                    "dropping arc edge {:?} -> {:?}: endpoints do not match arc {source_id}",
                    edge.start,
                    edge.end
                );
                stats.dropped_arc_edges += 1;
                continue;
            }
            EdgeClass::MissingNative { source_id } => {
                log::warn!("no native curve data for source {source_id}, skipping edge");
                warnings.push(Warning {
                    code: "missing_native".to_string(),
                    message: format!("Source {source_id} has no matching native curve."),
                });
                continue;
            }
        };

        if let Primitive3D::Circle(circle) = &primitive {
            if !circles_seen.insert(circle_key(slot, circle)) {
                continue;
            }
        }

        match primitive.emit_into(scene) {
            Ok(()) => match primitive {
                Primitive3D::Line(_) => stats.lines += 1,
                Primitive3D::Arc(_) => stats.arcs += 1,
                Primitive3D::Circle(_) => stats.circles += 1,
            },
            Err(err) => {
                log::warn!("{err}");
                stats.failures += 1;
                warnings.push(Warning {
                    code: "emission_failed".to_string(),
                    message: format!("Failed to create {}: {err}", primitive.kind_name()),
                });
            }
        }
    }

    log::info!(
        "Emitted {} lines, {} arcs, {} circles ({} failed, {} arc edges dropped)",
        stats.lines,
        stats.arcs,
        stats.circles,
        stats.failures,
        stats.dropped_arc_edges
    );
    stats
}

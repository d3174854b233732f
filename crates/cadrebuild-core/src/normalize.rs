use crate::geom::Vec2;
use crate::model::{CurveRecord, Drawing2D, NativeCurve, Segment, SegmentKind};
use crate::report::Warning;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub records_total: usize,
    pub unsupported_records: usize,
    pub degenerate_records: usize,
}

/// Uniform segments plus the native-parameter side table they index into.
#[derive(Debug, Clone, Default)]
pub struct NormalizedDrawing {
    pub segments: Vec<Segment>,
    pub natives: Vec<NativeCurve>,
    pub warnings: Vec<Warning>,
    pub stats: NormalizeStats,
}

impl NormalizedDrawing {
    pub fn native(&self, source_id: usize) -> Option<&NativeCurve> {
        self.natives.get(source_id)
    }
}

pub fn normalize(drawing: &Drawing2D) -> NormalizedDrawing {
    let mut out = NormalizedDrawing::default();
    out.stats.records_total = drawing.records.len();

    for (index, record) in drawing.records.iter().enumerate() {
        let Some((p1, p2, kind, native)) = flatten(record) else {
            if let CurveRecord::Unsupported { entity_type } = record {
                out.stats.unsupported_records += 1;
                log::warn!("skipping unsupported entity type {entity_type} (record {index})");
                out.warnings.push(Warning {
                    code: "unsupported_record".to_string(),
                    message: format!("Unsupported entity type {entity_type} at record {index}."),
                });
            } else {
                out.stats.degenerate_records += 1;
                log::warn!("skipping degenerate {} (record {index})", record.type_name());
                out.warnings.push(Warning {
                    code: "degenerate_record".to_string(),
                    message: format!(
                        "Degenerate {} at record {index} (non-finite geometry, bad radius or no points).",
                        record.type_name()
                    ),
                });
            }
            continue;
        };

        let source_id = out.natives.len();
        out.natives.push(native);
        out.segments.push(Segment {
            p1,
            p2,
            kind,
            source_id,
        });
    }

    log::debug!(
        "normalized {} records into {} segments",
        out.stats.records_total,
        out.segments.len()
    );
    out
}

fn flatten(record: &CurveRecord) -> Option<(Vec2, Vec2, SegmentKind, NativeCurve)> {
    match record {
        CurveRecord::Line(line) => {
            finite_points(&[line.a, line.b])?;
            Some((line.a, line.b, SegmentKind::Line, NativeCurve::Line))
        }
        CurveRecord::Arc(arc) => {
            if !valid_radius(arc.radius)
                || !arc.center.is_finite()
                || !arc.start_angle.is_finite()
                || !arc.end_angle.is_finite()
            {
                return None;
            }
            Some((
                arc.start_point(),
                arc.end_point(),
                SegmentKind::Arc,
                NativeCurve::Arc(arc.clone()),
            ))
        }
        CurveRecord::Circle(circle) => {
            if !valid_radius(circle.radius) || !circle.center.is_finite() {
                return None;
            }
            let r = circle.radius;
            let c = circle.center;
            Some((
                Vec2::new(c.x - r, c.y - r),
                Vec2::new(c.x + r, c.y + r),
                SegmentKind::Circle,
                NativeCurve::Circle(circle.clone()),
            ))
        }
        CurveRecord::Spline(spline) => {
            let first = *spline.control_points.first()?;
            let last = *spline.control_points.last()?;
            finite_points(&[first, last])?;
            Some((first, last, SegmentKind::Spline, NativeCurve::Spline))
        }
        CurveRecord::Unsupported { .. } => None,
    }
}

fn finite_points(points: &[Vec2]) -> Option<()> {
    points.iter().all(Vec2::is_finite).then_some(())
}

fn valid_radius(r: f64) -> bool {
    r.is_finite() && r > 0.0
}

use crate::geom::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeg2D {
    pub a: Vec2,
    pub b: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle2D {
    pub center: Vec2,
    pub radius: f64,
}

/// Counter-clockwise arc from `start_angle` to `end_angle`, both in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc2D {
    pub center: Vec2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc2D {
    pub fn point_at(&self, angle: f64) -> Vec2 {
        Vec2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Vec2 {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Vec2 {
        self.point_at(self.end_angle)
    }

    /// Raw `end - start` in degrees, not wrapped.
    pub fn angle_delta_deg(&self) -> f64 {
        (self.end_angle - self.start_angle).to_degrees()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spline2D {
    pub control_points: Vec<Vec2>,
}

/// One curve as handed over by a drawing decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurveRecord {
    Line(LineSeg2D),
    Arc(Arc2D),
    Circle(Circle2D),
    Spline(Spline2D),
    /// Anything the decoder saw but cannot express as a curve (text, hatch, ...).
    Unsupported { entity_type: String },
}

impl CurveRecord {
    pub fn type_name(&self) -> &str {
        match self {
            CurveRecord::Line(_) => "LINE",
            CurveRecord::Arc(_) => "ARC",
            CurveRecord::Circle(_) => "CIRCLE",
            CurveRecord::Spline(_) => "SPLINE",
            CurveRecord::Unsupported { entity_type } => entity_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing2D {
    pub records: Vec<CurveRecord>,
}

impl Drawing2D {
    pub fn new(records: Vec<CurveRecord>) -> Self {
        Self { records }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Line,
    Arc,
    Circle,
    Spline,
}

impl SegmentKind {
    /// Lines and spline chords; arcs and circles carry extra native data.
    pub fn is_straight(self) -> bool {
        matches!(self, SegmentKind::Line | SegmentKind::Spline)
    }
}

/// A curve flattened to its two defining points.
///
/// `source_id` indexes [`crate::normalize::NormalizedDrawing::natives`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Vec2,
    pub p2: Vec2,
    pub kind: SegmentKind,
    pub source_id: usize,
}

/// Native parameters kept for each segment, indexed by `source_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NativeCurve {
    Line,
    Arc(Arc2D),
    Circle(Circle2D),
    Spline,
}

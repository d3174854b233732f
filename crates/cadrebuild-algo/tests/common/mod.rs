#![allow(dead_code)]

use cadrebuild_core::geom::Vec2;
use cadrebuild_core::model::{Arc2D, Circle2D, CurveRecord, Drawing2D, LineSeg2D};

pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> CurveRecord {
    CurveRecord::Line(LineSeg2D {
        a: Vec2::new(x1, y1),
        b: Vec2::new(x2, y2),
    })
}

pub fn arc(cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) -> CurveRecord {
    CurveRecord::Arc(Arc2D {
        center: Vec2::new(cx, cy),
        radius,
        start_angle,
        end_angle,
    })
}

pub fn circle(cx: f64, cy: f64, radius: f64) -> CurveRecord {
    CurveRecord::Circle(Circle2D {
        center: Vec2::new(cx, cy),
        radius,
    })
}

/// Four lines around `(x0, y0)..(x1, y1)`.
pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<CurveRecord> {
    vec![
        line(x0, y0, x1, y0),
        line(x1, y0, x1, y1),
        line(x1, y1, x0, y1),
        line(x0, y1, x0, y0),
    ]
}

/// 10 x 10 x 10 cube: front at the origin, top above, right to the side.
pub fn cube_sheet() -> Drawing2D {
    let mut records = rect(0.0, 0.0, 10.0, 10.0);
    records.extend(rect(0.0, 20.0, 10.0, 30.0));
    records.extend(rect(20.0, 0.0, 30.0, 10.0));
    Drawing2D::new(records)
}

/// Quarter cylinder lying along Z: the front view shows the quarter arc.
pub fn quarter_cylinder_sheet() -> Drawing2D {
    let mut records = vec![
        arc(0.0, 0.0, 10.0, 0.0, std::f64::consts::FRAC_PI_2),
        line(0.0, 0.0, 10.0, 0.0),
        line(0.0, 0.0, 0.0, 10.0),
    ];
    records.extend(rect(0.0, 20.0, 10.0, 30.0));
    records.extend(rect(20.0, 0.0, 30.0, 10.0));
    Drawing2D::new(records)
}

/// Cylinder standing along Y: a circle in the top view.
pub fn standing_cylinder_sheet() -> Drawing2D {
    let mut records = rect(0.0, 0.0, 10.0, 10.0);
    records.push(circle(5.0, 25.0, 5.0));
    records.extend(rect(20.0, 0.0, 30.0, 10.0));
    Drawing2D::new(records)
}

/// Quarter cylinder standing along Y: the top view shows the quarter arc.
pub fn top_arc_sheet() -> Drawing2D {
    let mut records = rect(0.0, 0.0, 10.0, 10.0);
    records.extend([
        arc(0.0, 20.0, 10.0, 0.0, std::f64::consts::FRAC_PI_2),
        line(0.0, 20.0, 10.0, 20.0),
        line(0.0, 20.0, 0.0, 30.0),
    ]);
    records.extend(rect(20.0, 0.0, 30.0, 10.0));
    Drawing2D::new(records)
}

/// Quarter cylinder lying along X: the right view shows the quarter arc.
pub fn right_arc_sheet() -> Drawing2D {
    let mut records = rect(0.0, 0.0, 10.0, 10.0);
    records.extend(rect(0.0, 20.0, 10.0, 30.0));
    records.extend([
        arc(20.0, 0.0, 10.0, 0.0, std::f64::consts::FRAC_PI_2),
        line(20.0, 0.0, 30.0, 0.0),
        line(20.0, 0.0, 20.0, 10.0),
    ]);
    Drawing2D::new(records)
}

/// Cylinder lying along X: a circle in the right view.
pub fn right_circle_sheet() -> Drawing2D {
    let mut records = rect(0.0, 0.0, 10.0, 10.0);
    records.extend(rect(0.0, 20.0, 10.0, 30.0));
    records.push(circle(25.0, 5.0, 5.0));
    Drawing2D::new(records)
}

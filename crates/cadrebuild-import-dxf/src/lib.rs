use anyhow::{Context, Result};
use cadrebuild_core::geom::Vec2;
use cadrebuild_core::model::{Arc2D, Circle2D, CurveRecord, Drawing2D, LineSeg2D, Spline2D};
use dxf::entities::{Entity, EntityType, LwPolyline};
use std::collections::HashMap;
use std::path::Path;

const MAX_INSERT_DEPTH: usize = 8;

pub fn import_dxf(path: &Path) -> Result<Drawing2D> {
    let drawing = dxf::Drawing::load_file(path).with_context(|| format!("load DXF: {path:?}"))?;
    Ok(import_drawing(&drawing))
}

pub fn import_dxf_str(text: &str) -> Result<Drawing2D> {
    let drawing = dxf::Drawing::load(&mut text.as_bytes()).context("parse DXF text")?;
    Ok(import_drawing(&drawing))
}

/// Converts model-space entities to curve records, expanding block inserts.
///
/// Entities without a curve equivalent become [`CurveRecord::Unsupported`]
/// so the caller can report them.
pub fn import_drawing(drawing: &dxf::Drawing) -> Drawing2D {
    let mut importer = DxfImporter::new(drawing);
    importer.import_all();
    log::debug!("imported {} curve records", importer.records.len());
    Drawing2D::new(importer.records)
}

struct DxfImporter<'a> {
    drawing: &'a dxf::Drawing,
    blocks: HashMap<String, &'a dxf::Block>,
    records: Vec<CurveRecord>,
}

impl<'a> DxfImporter<'a> {
    fn new(drawing: &'a dxf::Drawing) -> Self {
        let mut blocks = HashMap::new();
        for block in drawing.blocks() {
            blocks.insert(block.name.to_ascii_lowercase(), block);
        }
        Self {
            drawing,
            blocks,
            records: Vec::new(),
        }
    }

    fn import_all(&mut self) {
        let tx = Transform2D::identity();
        let mut stack = Vec::new();
        for ent in self.drawing.entities() {
            self.import_entity(ent, &tx, &mut stack, 0);
        }
    }

    fn import_entity(
        &mut self,
        ent: &Entity,
        tx: &Transform2D,
        stack: &mut Vec<String>,
        depth: usize,
    ) {
        match &ent.specific {
            EntityType::Insert(insert) => {
                self.import_insert(insert, tx, stack, depth + 1);
            }
            EntityType::Line(line) => {
                let a = tx.apply_point(Vec2::new(line.p1.x, line.p1.y));
                let b = tx.apply_point(Vec2::new(line.p2.x, line.p2.y));
                self.records.push(CurveRecord::Line(LineSeg2D { a, b }));
            }
            EntityType::Circle(circle) => {
                let Some((scale, _)) = tx.uniform_scale_rotation() else {
                    self.unsupported_transform("CIRCLE");
                    return;
                };
                let center = tx.apply_point(Vec2::new(circle.center.x, circle.center.y));
                self.records.push(CurveRecord::Circle(Circle2D {
                    center,
                    radius: circle.radius * scale,
                }));
            }
            EntityType::Arc(arc) => {
                let Some((scale, rot)) = tx.uniform_scale_rotation() else {
                    self.unsupported_transform("ARC");
                    return;
                };
                let center = tx.apply_point(Vec2::new(arc.center.x, arc.center.y));
                self.records.push(CurveRecord::Arc(Arc2D {
                    center,
                    radius: arc.radius * scale,
                    start_angle: arc.start_angle.to_radians() + rot,
                    end_angle: arc.end_angle.to_radians() + rot,
                }));
            }
            EntityType::LwPolyline(poly) => {
                self.import_lwpolyline(poly, tx);
            }
            EntityType::Spline(spline) => {
                let points = if !spline.control_points.is_empty() {
                    &spline.control_points
                } else {
                    &spline.fit_points
                };
                let control_points = points
                    .iter()
                    .map(|p| tx.apply_point(Vec2::new(p.x, p.y)))
                    .collect();
                self.records
                    .push(CurveRecord::Spline(Spline2D { control_points }));
            }
            other => {
                self.records.push(CurveRecord::Unsupported {
                    entity_type: entity_type_name(other),
                });
            }
        }
    }

    fn import_insert(
        &mut self,
        insert: &dxf::entities::Insert,
        parent_tx: &Transform2D,
        stack: &mut Vec<String>,
        depth: usize,
    ) {
        if depth > MAX_INSERT_DEPTH {
            log::warn!("block nesting deeper than {MAX_INSERT_DEPTH} at {:?}", insert.name);
            return;
        }
        let name = insert.name.to_ascii_lowercase();
        if stack.iter().any(|n| n == &name) {
            log::warn!("recursive block reference {:?}", insert.name);
            return;
        }
        let Some(block) = self.blocks.get(&name).copied() else {
            log::warn!("insert references unknown block {:?}", insert.name);
            return;
        };
        stack.push(name);
        let base = Vec2::new(block.base_point.x, block.base_point.y);
        let loc = Vec2::new(insert.location.x, insert.location.y);
        let scale = Vec2::new(insert.x_scale_factor, insert.y_scale_factor);
        let col_count = insert.column_count.max(1) as i32;
        let row_count = insert.row_count.max(1) as i32;

        for row in 0..row_count {
            for col in 0..col_count {
                let offset = Vec2::new(
                    col as f64 * insert.column_spacing,
                    row as f64 * insert.row_spacing,
                );
                let local_tx = Transform2D::from_insert(base, loc, scale, insert.rotation, offset);
                let combined = parent_tx.compose(&local_tx);
                for ent in &block.entities {
                    self.import_entity(ent, &combined, stack, depth);
                }
            }
        }

        stack.pop();
    }

    /// Straight spans become lines, bulged spans become arcs.
    fn import_lwpolyline(&mut self, poly: &LwPolyline, tx: &Transform2D) {
        let n = poly.vertices.len();
        let spans = if poly.is_closed() { n } else { n.saturating_sub(1) };
        let uniform = tx.uniform_scale_rotation().is_some();

        for i in 0..spans {
            let v0 = &poly.vertices[i];
            let v1 = &poly.vertices[(i + 1) % n];
            let p0 = tx.apply_point(Vec2::new(v0.x, v0.y));
            let p1 = tx.apply_point(Vec2::new(v1.x, v1.y));
            if p0 == p1 {
                continue;
            }
            // Bulges only survive transforms that keep arcs circular.
            let record = match bulge_arc(p0, p1, v0.bulge) {
                Some(arc) if uniform => CurveRecord::Arc(arc),
                _ => CurveRecord::Line(LineSeg2D { a: p0, b: p1 }),
            };
            self.records.push(record);
        }
    }

    fn unsupported_transform(&mut self, entity_type: &str) {
        log::warn!("{entity_type} inside a non-uniformly scaled block insert");
        self.records.push(CurveRecord::Unsupported {
            entity_type: entity_type.to_string(),
        });
    }
}

/// Upper-case DXF-style name of an entity variant, e.g. `TEXT` or `MTEXT`.
fn entity_type_name(specific: &EntityType) -> String {
    let debug = format!("{specific:?}");
    let name = debug.split(['(', ' ', '{']).next().unwrap_or_default();
    name.to_ascii_uppercase()
}

/// Counter-clockwise arc for a bulged polyline span from `p0` to `p1`.
///
/// Bulge is `tan(sweep / 4)`, positive for a counter-clockwise span.
fn bulge_arc(p0: Vec2, p1: Vec2, bulge: f64) -> Option<Arc2D> {
    if !bulge.is_finite() || bulge.abs() < 1e-12 {
        return None;
    }
    let chord = Vec2::new(p1.x - p0.x, p1.y - p0.y);
    let c = (chord.x * chord.x + chord.y * chord.y).sqrt();
    if !c.is_finite() || c < 1e-12 {
        return None;
    }

    let theta = 4.0 * bulge.atan();
    let radius = c * (1.0 + bulge * bulge) / (4.0 * bulge.abs());
    let mid = Vec2::new((p0.x + p1.x) * 0.5, (p0.y + p1.y) * 0.5);
    let perp = Vec2::new(-chord.y / c, chord.x / c);
    let d = radius * (theta * 0.5).cos() * bulge.signum();
    let center = Vec2::new(mid.x + perp.x * d, mid.y + perp.y * d);

    // Clockwise spans are stored reversed so the arc always runs CCW.
    let (from, sweep) = if theta > 0.0 { (p0, theta) } else { (p1, -theta) };
    let start_angle = (from.y - center.y).atan2(from.x - center.x);
    Some(Arc2D {
        center,
        radius,
        start_angle,
        end_angle: start_angle + sweep,
    })
}

#[derive(Debug, Clone, Copy)]
struct Transform2D {
    m11: f64,
    m12: f64,
    m21: f64,
    m22: f64,
    tx: f64,
    ty: f64,
}

impl Transform2D {
    fn identity() -> Self {
        Self {
            m11: 1.0,
            m12: 0.0,
            m21: 0.0,
            m22: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    fn from_insert(base: Vec2, location: Vec2, scale: Vec2, rotation_deg: f64, offset: Vec2) -> Self {
        let r = rotation_deg.to_radians();
        let (sin, cos) = r.sin_cos();
        let m11 = cos * scale.x;
        let m12 = -sin * scale.y;
        let m21 = sin * scale.x;
        let m22 = cos * scale.y;

        let off_x = m11 * offset.x + m12 * offset.y;
        let off_y = m21 * offset.x + m22 * offset.y;
        Self {
            m11,
            m12,
            m21,
            m22,
            tx: location.x + off_x - (m11 * base.x + m12 * base.y),
            ty: location.y + off_y - (m21 * base.x + m22 * base.y),
        }
    }

    fn compose(&self, other: &Transform2D) -> Self {
        Self {
            m11: self.m11 * other.m11 + self.m12 * other.m21,
            m12: self.m11 * other.m12 + self.m12 * other.m22,
            m21: self.m21 * other.m11 + self.m22 * other.m21,
            m22: self.m21 * other.m12 + self.m22 * other.m22,
            tx: self.m11 * other.tx + self.m12 * other.ty + self.tx,
            ty: self.m21 * other.tx + self.m22 * other.ty + self.ty,
        }
    }

    fn apply_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.m11 * p.x + self.m12 * p.y + self.tx,
            self.m21 * p.x + self.m22 * p.y + self.ty,
        )
    }

    /// `(scale, rotation in radians)` when the transform keeps circles round
    /// and does not mirror.
    fn uniform_scale_rotation(&self) -> Option<(f64, f64)> {
        const EPS: f64 = 1e-6;
        let sx = (self.m11 * self.m11 + self.m21 * self.m21).sqrt();
        let sy = (self.m12 * self.m12 + self.m22 * self.m22).sqrt();
        if !sx.is_finite() || !sy.is_finite() || (sx - sy).abs() > EPS {
            return None;
        }
        let dot = self.m11 * self.m12 + self.m21 * self.m22;
        if dot.abs() > EPS {
            return None;
        }
        let det = self.m11 * self.m22 - self.m12 * self.m21;
        if det < 0.0 {
            return None;
        }
        Some((sx, self.m21.atan2(self.m11)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn positive_bulge_runs_counter_clockwise() {
        let arc = bulge_arc(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0), 1.0).unwrap();
        assert_relative_eq!(0.0, arc.center.x, epsilon = 1e-12);
        assert_relative_eq!(0.0, arc.center.y, epsilon = 1e-12);
        assert_relative_eq!(1.0, arc.radius);
        assert_relative_eq!(0.0, arc.start_angle);
        assert_relative_eq!(std::f64::consts::PI, arc.end_angle);
    }

    #[test]
    fn negative_bulge_is_stored_reversed() {
        // Quarter circle clockwise from (0, 1) to (1, 0) about the origin.
        let bulge = -(std::f64::consts::FRAC_PI_8).tan();
        let arc = bulge_arc(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), bulge).unwrap();
        assert_relative_eq!(0.0, arc.center.x, epsilon = 1e-9);
        assert_relative_eq!(0.0, arc.center.y, epsilon = 1e-9);
        assert_relative_eq!(1.0, arc.radius, epsilon = 1e-9);
        assert_relative_eq!(0.0, arc.start_angle, epsilon = 1e-9);
        assert_relative_eq!(std::f64::consts::FRAC_PI_2, arc.end_angle, epsilon = 1e-9);
    }

    #[test]
    fn mirrored_insert_is_not_uniform() {
        let tx = Transform2D::from_insert(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(-1.0, 1.0),
            0.0,
            Vec2::new(0.0, 0.0),
        );
        assert!(tx.uniform_scale_rotation().is_none());
    }
}

//! Fixed-point grid used for every equality test across views.
//!
//! Coordinates are rounded to one decimal and stored as integer tenths, so
//! matching and hashing never compare raw floats.

use cadrebuild_core::geom::{Vec2, Vec3};

pub const GRID_SCALE: f64 = 10.0;

pub fn tenths(v: f64) -> i64 {
    (v * GRID_SCALE).round() as i64
}

pub fn from_tenths(v: i64) -> f64 {
    v as f64 / GRID_SCALE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint2 {
    pub x: i64,
    pub y: i64,
}

impl GridPoint2 {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn from_vec(p: Vec2) -> Self {
        Self::new(tenths(p.x), tenths(p.y))
    }
}

/// A point on a straight grid segment: exact collinearity plus range check.
///
/// Coordinates too large for the exact products never match.
pub fn on_segment(p: GridPoint2, a: GridPoint2, b: GridPoint2) -> bool {
    if a == b {
        return p == a;
    }
    on_segment_exact(p, a, b).unwrap_or(false)
}

fn on_segment_exact(p: GridPoint2, a: GridPoint2, b: GridPoint2) -> Option<bool> {
    let (px, py) = (p.x as i128, p.y as i128);
    let (x1, y1) = (a.x as i128, a.y as i128);
    let (x2, y2) = (b.x as i128, b.y as i128);
    let (dx, dy) = (x2 - x1, y2 - y1);
    let (ex, ey) = (px - x1, py - y1);

    let cross = ey.checked_mul(dx)?.checked_sub(ex.checked_mul(dy)?)?;
    if cross != 0 {
        return Some(false);
    }
    let dot = ex.checked_mul(dx)?.checked_add(ey.checked_mul(dy)?)?;
    let len2 = dx.checked_mul(dx)?.checked_add(dy.checked_mul(dy)?)?;
    Some((0..=len2).contains(&dot))
}

/// Model-space point: X and Y from the front view, Z from the top view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint3 {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl GridPoint3 {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(from_tenths(self.x), from_tenths(self.y), from_tenths(self.z))
    }
}

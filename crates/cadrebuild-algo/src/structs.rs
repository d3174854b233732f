use crate::fixed::{GridPoint2, GridPoint3};
use cadrebuild_core::geom::{Vec2, Vec3};
use cadrebuild_core::model::SegmentKind;
use cadrebuild_core::view::ViewRole;
use std::collections::HashMap;

/// The three views that take part in reconstruction, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewSlot {
    Front, // model X, Y
    Top,   // model X, Z
    Right, // model Z, Y
}

impl ViewSlot {
    pub fn index(self) -> usize {
        match self {
            ViewSlot::Front => 0,
            ViewSlot::Top => 1,
            ViewSlot::Right => 2,
        }
    }

    pub fn role(self) -> ViewRole {
        match self {
            ViewSlot::Front => ViewRole::Front,
            ViewSlot::Top => ViewRole::Top,
            ViewSlot::Right => ViewRole::Right,
        }
    }

    /// Drops the model axis this view looks along.
    pub fn project(self, p: GridPoint3) -> GridPoint2 {
        match self {
            ViewSlot::Front => GridPoint2::new(p.x, p.y),
            ViewSlot::Top => GridPoint2::new(p.x, p.z),
            ViewSlot::Right => GridPoint2::new(p.z, p.y),
        }
    }

    /// Places a view-local 2D point into model space, taking the missing
    /// depth coordinate from `on`.
    pub fn lift(self, local: Vec2, on: Vec3) -> Vec3 {
        match self {
            ViewSlot::Front => Vec3::new(local.x, local.y, on.z),
            ViewSlot::Top => Vec3::new(local.x, on.y, local.y),
            ViewSlot::Right => Vec3::new(on.x, local.y, local.x),
        }
    }
}

/// Translation from sheet coordinates into one view's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFrame {
    pub slot: ViewSlot,
    pub offset: Vec2,
}

impl ViewFrame {
    pub fn front() -> Self {
        Self {
            slot: ViewSlot::Front,
            offset: Vec2::new(0.0, 0.0),
        }
    }

    /// Top view is shifted down so its own min-y becomes zero depth.
    pub fn top(cluster_min_y: f64) -> Self {
        Self {
            slot: ViewSlot::Top,
            offset: Vec2::new(0.0, -cluster_min_y),
        }
    }

    /// Right view is shifted left so its own min-x becomes zero depth.
    pub fn right(cluster_min_x: f64) -> Self {
        Self {
            slot: ViewSlot::Right,
            offset: Vec2::new(-cluster_min_x, 0.0),
        }
    }

    pub fn to_local(&self, p: Vec2) -> Vec2 {
        p.offset(self.offset)
    }

    pub fn to_grid(&self, p: Vec2) -> GridPoint2 {
        GridPoint2::from_vec(self.to_local(p))
    }
}

/// Which source curve proved that a point pair lies along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Membership {
    pub source_id: usize,
    pub kind: SegmentKind,
}

/// Per-view point set and membership lookup.
#[derive(Debug, Clone)]
pub struct ViewProjection {
    pub frame: ViewFrame,
    /// Deduplicated local-frame points, first-seen order.
    pub points: Vec<GridPoint2>,
    pub membership: HashMap<(GridPoint2, GridPoint2), Membership>,
}

impl ViewProjection {
    pub fn lookup(&self, a: GridPoint2, b: GridPoint2) -> Option<Membership> {
        self.membership.get(&(a, b)).copied()
    }
}

/// A 3D edge confirmed in all three views, with each view's evidence.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedEdge {
    pub start: GridPoint3,
    pub end: GridPoint3,
    /// Indexed by [`ViewSlot::index`].
    pub matches: [Membership; 3],
}

impl ConfirmedEdge {
    pub fn evidence(&self, slot: ViewSlot) -> Membership {
        self.matches[slot.index()]
    }
}

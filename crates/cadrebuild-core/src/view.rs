use crate::geom::Vec2;
use serde::{Deserialize, Serialize};

/// Role of a cluster on a third-angle sheet, relative to the anchor (front) view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewRole {
    Front,
    Top,
    Right,
    /// Recognized next to the front view but not used for reconstruction.
    Left,
    /// Recognized below the front view but not used for reconstruction.
    Bottom,
}

impl ViewRole {
    pub fn label(self) -> &'static str {
        match self {
            ViewRole::Front => "front",
            ViewRole::Top => "top",
            ViewRole::Right => "right",
            ViewRole::Left => "left",
            ViewRole::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewRoleAssignment {
    pub cluster_id: usize,
    pub role: ViewRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewAssignmentReport {
    /// Minimum corner shared by the front view and its neighbours.
    pub anchor: Vec2,
    pub roles: Vec<ViewRoleAssignment>,
}

impl ViewAssignmentReport {
    pub fn cluster_for(&self, role: ViewRole) -> Option<usize> {
        self.roles
            .iter()
            .find(|r| r.role == role)
            .map(|r| r.cluster_id)
    }
}

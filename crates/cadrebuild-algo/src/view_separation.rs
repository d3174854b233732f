use crate::cluster::Cluster;
use crate::error::ViewAssignmentError;
use crate::fixed::{from_tenths, GridPoint2};
use cadrebuild_core::geom::Vec2;
use cadrebuild_core::view::{ViewAssignmentReport, ViewRole, ViewRoleAssignment};
use std::collections::HashMap;

/// Indices into the cluster list for each recognized role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewAssignment {
    pub anchor: GridPoint2,
    pub front: usize,
    pub top: usize,
    pub right: usize,
    pub left: Option<usize>,
    pub bottom: Option<usize>,
}

impl ViewAssignment {
    pub fn report(&self) -> ViewAssignmentReport {
        let mut roles = vec![
            ViewRoleAssignment {
                cluster_id: self.front,
                role: ViewRole::Front,
            },
            ViewRoleAssignment {
                cluster_id: self.top,
                role: ViewRole::Top,
            },
            ViewRoleAssignment {
                cluster_id: self.right,
                role: ViewRole::Right,
            },
        ];
        if let Some(id) = self.left {
            roles.push(ViewRoleAssignment {
                cluster_id: id,
                role: ViewRole::Left,
            });
        }
        if let Some(id) = self.bottom {
            roles.push(ViewRoleAssignment {
                cluster_id: id,
                role: ViewRole::Bottom,
            });
        }
        ViewAssignmentReport {
            anchor: Vec2::new(from_tenths(self.anchor.x), from_tenths(self.anchor.y)),
            roles,
        }
    }
}

/// Binds clusters to view roles by their minimum corners.
///
/// The anchor (front view) is the cluster sitting on both the most common
/// min-x and the most common min-y. Top shares its min-x and lies above;
/// right shares its min-y and lies to the right. Corners are compared on the
/// one-decimal grid.
pub fn classify_views(clusters: &[Cluster]) -> Result<ViewAssignment, ViewAssignmentError> {
    if clusters.len() < 3 {
        return Err(ViewAssignmentError::TooFewClusters {
            found: clusters.len(),
        });
    }

    let corners: Vec<GridPoint2> = clusters
        .iter()
        .map(|c| GridPoint2::from_vec(c.bounds().min))
        .collect();

    let modal_x = most_frequent(corners.iter().map(|c| c.x)).ok_or(ViewAssignmentError::NoAnchor)?;
    let modal_y = most_frequent(corners.iter().map(|c| c.y)).ok_or(ViewAssignmentError::NoAnchor)?;

    let front = corners
        .iter()
        .position(|c| c.x == modal_x && c.y == modal_y)
        .ok_or(ViewAssignmentError::NoAnchor)?;
    let anchor = corners[front];

    let find = |pred: &dyn Fn(&GridPoint2) -> bool| {
        corners
            .iter()
            .enumerate()
            .find(|(i, c)| *i != front && pred(c))
            .map(|(i, _)| i)
    };

    let top = find(&|c| c.x == anchor.x && c.y > anchor.y).ok_or(ViewAssignmentError::MissingTop)?;
    let right =
        find(&|c| c.y == anchor.y && c.x > anchor.x).ok_or(ViewAssignmentError::MissingRight)?;
    let left = find(&|c| c.y == anchor.y && c.x < anchor.x);
    let bottom = find(&|c| c.x == anchor.x && c.y < anchor.y);

    log::info!(
        "Assigned views: front (cluster {front}), top (cluster {top}), right (cluster {right})"
    );
    if left.is_some() || bottom.is_some() {
        log::info!("Ignoring extra views: left {left:?}, bottom {bottom:?}");
    }

    Ok(ViewAssignment {
        anchor,
        front,
        top,
        right,
        left,
        bottom,
    })
}

/// Most frequent value; ties go to the value that reached the top count first.
fn most_frequent(values: impl Iterator<Item = i64>) -> Option<i64> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    let mut best: Option<(i64, usize)> = None;
    for v in values {
        let n = counts.entry(v).or_default();
        *n += 1;
        if best.map_or(true, |(_, count)| *n > count) {
            best = Some((v, *n));
        }
    }
    best.map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::most_frequent;

    #[test]
    fn mode_ties_go_to_first_to_reach_the_count() {
        assert_eq!(Some(3), most_frequent([3, 3, 5, 5].into_iter()));
        assert_eq!(Some(5), most_frequent([3, 5, 5, 3].into_iter()));
        assert_eq!(None, most_frequent(std::iter::empty()));
    }
}

use crate::cluster::Cluster;
use crate::fixed::{on_segment, GridPoint2, GridPoint3};
use crate::structs::{ConfirmedEdge, Membership, ViewFrame, ViewProjection, ViewSlot};
use crate::view_separation::ViewAssignment;
use cadrebuild_core::model::Segment;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// Builds the front/top/right projections from the assigned clusters.
pub fn build_projections(clusters: &[Cluster], assignment: &ViewAssignment) -> [ViewProjection; 3] {
    let front = &clusters[assignment.front];
    let top = &clusters[assignment.top];
    let right = &clusters[assignment.right];

    let views = [
        build_projection(ViewFrame::front(), front.segments()),
        build_projection(ViewFrame::top(top.bounds().min.y), top.segments()),
        build_projection(ViewFrame::right(right.bounds().min.x), right.segments()),
    ];
    log::info!(
        "View points: front {}, top {}, right {}",
        views[0].points.len(),
        views[1].points.len(),
        views[2].points.len()
    );
    views
}

/// Point set and membership map of one view.
///
/// Every pair of view points lying on the same segment maps to that segment,
/// in both directions. Straight segments also map each of their points onto
/// itself so that edges seen end-on still resolve. Later segments overwrite
/// earlier ones.
pub fn build_projection(frame: ViewFrame, segments: &[Segment]) -> ViewProjection {
    let grid_segments: Vec<(GridPoint2, GridPoint2, &Segment)> = segments
        .iter()
        .map(|s| (frame.to_grid(s.p1), frame.to_grid(s.p2), s))
        .collect();

    let mut seen = HashSet::new();
    let mut points = Vec::new();
    for &(a, b, _) in &grid_segments {
        for p in [a, b] {
            if seen.insert(p) {
                points.push(p);
            }
        }
    }

    let mut membership = HashMap::new();
    for &(a, b, seg) in &grid_segments {
        let entry = Membership {
            source_id: seg.source_id,
            kind: seg.kind,
        };
        let on_line: Vec<GridPoint2> = points
            .iter()
            .copied()
            .filter(|&p| on_segment(p, a, b))
            .collect();

        if seg.kind.is_straight() {
            for &p in &on_line {
                membership.insert((p, p), entry);
            }
        }
        for (p, q) in on_line.iter().copied().tuple_combinations() {
            membership.insert((p, q), entry);
            membership.insert((q, p), entry);
        }
    }

    log::debug!(
        "{} view: {} points, {} membership pairs",
        frame.slot.role().label(),
        points.len(),
        membership.len()
    );
    ViewProjection {
        frame,
        points,
        membership,
    }
}

/// Pairs front and top points sharing model X into `(x, front y, top y)`.
pub fn reconstruct_points(front: &ViewProjection, top: &ViewProjection) -> Vec<GridPoint3> {
    let mut by_x: HashMap<i64, Vec<i64>> = HashMap::new();
    for t in &top.points {
        by_x.entry(t.x).or_default().push(t.y);
    }

    let mut seen = HashSet::new();
    let mut points = Vec::new();
    for f in &front.points {
        let Some(depths) = by_x.get(&f.x) else {
            continue;
        };
        for &z in depths {
            let p = GridPoint3::new(f.x, f.y, z);
            if seen.insert(p) {
                points.push(p);
            }
        }
    }

    log::info!("Reconstructed {} candidate points", points.len());
    points
}

/// Keeps the point pairs whose three projections all lie on drawn curves.
///
/// Each undirected edge is returned once, oriented as first found.
pub fn confirm_edges(points: &[GridPoint3], views: &[ViewProjection; 3]) -> Vec<ConfirmedEdge> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for (i, &start) in points.iter().enumerate() {
        for (j, &end) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let Some(matches) = resolve(start, end, views) else {
                continue;
            };
            if seen.insert((start.min(end), start.max(end))) {
                edges.push(ConfirmedEdge {
                    start,
                    end,
                    matches,
                });
            }
        }
    }

    log::info!("Confirmed {} edges", edges.len());
    edges
}

fn resolve(
    start: GridPoint3,
    end: GridPoint3,
    views: &[ViewProjection; 3],
) -> Option<[Membership; 3]> {
    let lookup = |slot: ViewSlot| {
        let view = &views[slot.index()];
        view.lookup(slot.project(start), slot.project(end))
    };
    Some([
        lookup(ViewSlot::Front)?,
        lookup(ViewSlot::Top)?,
        lookup(ViewSlot::Right)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadrebuild_core::geom::Vec2;
    use cadrebuild_core::model::SegmentKind;

    fn seg(a: (f64, f64), b: (f64, f64), kind: SegmentKind, source_id: usize) -> Segment {
        Segment {
            p1: Vec2::new(a.0, a.1),
            p2: Vec2::new(b.0, b.1),
            kind,
            source_id,
        }
    }

    #[test]
    fn interior_points_pair_along_a_line() {
        let segments = [
            seg((0.0, 0.0), (10.0, 0.0), SegmentKind::Line, 0),
            seg((5.0, 0.0), (5.0, 5.0), SegmentKind::Line, 1),
        ];
        let view = build_projection(ViewFrame::front(), &segments);

        let a = GridPoint2::new(0, 0);
        let mid = GridPoint2::new(50, 0);
        let b = GridPoint2::new(100, 0);
        assert_eq!(Some(0), view.lookup(a, mid).map(|m| m.source_id));
        assert_eq!(Some(0), view.lookup(b, a).map(|m| m.source_id));
        assert_eq!(Some(1), view.lookup(mid, mid).map(|m| m.source_id));
        assert!(view.lookup(a, GridPoint2::new(50, 50)).is_none());
    }

    #[test]
    fn arcs_have_no_self_pairs() {
        let segments = [seg((10.0, 0.0), (0.0, 10.0), SegmentKind::Arc, 0)];
        let view = build_projection(ViewFrame::front(), &segments);
        let p = GridPoint2::new(100, 0);
        assert!(view.lookup(p, p).is_none());
        assert_eq!(
            Some(SegmentKind::Arc),
            view.lookup(p, GridPoint2::new(0, 100)).map(|m| m.kind)
        );
    }

    #[test]
    fn top_frame_shifts_depth_to_zero() {
        let segments = [seg((0.0, 20.0), (10.0, 20.0), SegmentKind::Line, 0)];
        let view = build_projection(ViewFrame::top(20.0), &segments);
        assert_eq!(vec![GridPoint2::new(0, 0), GridPoint2::new(100, 0)], view.points);
    }
}

//! Grouping of loose segments into per-view regions.
//!
//! A cluster is seeded with the first unassigned segment and grows by
//! repeatedly reaching `expand_distance` past its bounds. A finished cluster
//! swallows any earlier cluster whose bounds it fully covers.

use cadrebuild_core::geom::BBox2;
use cadrebuild_core::model::Segment;
use cadrebuild_core::report::ViewClusterReport;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Cluster {
    segments: Vec<Segment>,
    bounds: BBox2,
}

impl Cluster {
    fn seeded(seed: Segment) -> Self {
        let mut cluster = Self {
            segments: vec![seed],
            bounds: BBox2::empty(),
        };
        cluster.update_bounds();
        cluster
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Tight box around every segment endpoint.
    pub fn bounds(&self) -> BBox2 {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn update_bounds(&mut self) {
        let mut bounds = BBox2::empty();
        for seg in &self.segments {
            bounds.include_point(seg.p1);
            bounds.include_point(seg.p2);
        }
        self.bounds = bounds;
    }

    fn absorb(&mut self, other: Cluster) {
        self.segments.extend(other.segments);
        self.update_bounds();
    }

    pub fn report(&self, id: usize) -> ViewClusterReport {
        ViewClusterReport {
            id,
            segment_count: self.segments.len(),
            bbox: self.bounds,
            source_id_sample: self.segments.iter().take(20).map(|s| s.source_id).collect(),
        }
    }
}

pub fn cluster_segments(segments: &[Segment], expand_distance: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut remaining: VecDeque<Segment> = segments.iter().copied().collect();

    while let Some(seed) = remaining.pop_front() {
        let mut current = Cluster::seeded(seed);

        loop {
            let reach = current.bounds.expand(expand_distance);
            let (touching, rest): (VecDeque<Segment>, VecDeque<Segment>) = remaining
                .into_iter()
                .partition(|s| reach.contains_point(s.p1) || reach.contains_point(s.p2));
            remaining = rest;
            if touching.is_empty() {
                break;
            }
            current.segments.extend(touching);
            current.update_bounds();
        }

        let (nested, kept): (Vec<Cluster>, Vec<Cluster>) = clusters
            .into_iter()
            .partition(|c| current.bounds.contains(&c.bounds));
        for inner in nested {
            log::debug!(
                "merging nested cluster of {} segments into cluster of {}",
                inner.len(),
                current.len()
            );
            current.absorb(inner);
        }
        clusters = kept;
        clusters.push(current);
    }

    log::debug!(
        "clustered {} segments into {} clusters (expand distance {expand_distance})",
        segments.len(),
        clusters.len()
    );
    clusters
}

use crate::geom::BBox2;
use crate::view::ViewAssignmentReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewClusterReport {
    pub id: usize,
    pub segment_count: usize,
    pub bbox: BBox2,
    pub source_id_sample: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    pub records_total: usize,
    pub records_skipped: usize,
    pub segments: usize,
    pub clusters: usize,
    pub front_points: usize,
    pub top_points: usize,
    pub right_points: usize,
    pub reconstructed_points: usize,
    pub confirmed_edges: usize,
    pub lines_emitted: usize,
    pub arcs_emitted: usize,
    pub circles_emitted: usize,
    pub dropped_arc_edges: usize,
    pub emission_failures: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructionReport {
    pub stats: StatsReport,
    pub view_clusters: Vec<ViewClusterReport>,
    pub view_assignment: Option<ViewAssignmentReport>,
    pub warnings: Vec<Warning>,
}

//! Breakpoint-parameterized results: the matrix and its rollups.

pub mod pivot;
pub mod rollups;

pub use pivot::{
    describe_issue, discover_test_types, issue_list, pivot, summarize_issue_details, MatrixRow,
    MatrixStatus,
};
pub use rollups::{
    observations, test_type_label, BreakpointSummaryRow, DeviceSplitRow, HeatmapCell,
    HeatmapRow, Observation, ResponsiveRollups, SeverityBand, TrendRow,
};

use super::summary::MapSummary;
use super::timing::TimingBreakdown;
use crate::types::MapBundle;
use serde::Serialize;

/// Result produced by
/// [`process_with_diagnostics`](crate::MapExtractor::process_with_diagnostics).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsReport {
    pub bundle: MapBundle,
    pub trace: MapsTrace,
}

/// Geometry and timing of one extraction.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsTrace {
    pub input: InputDescriptor,
    pub max_pad: usize,
    pub padded_w: usize,
    pub padded_h: usize,
    pub blocks_w: usize,
    pub blocks_h: usize,
    pub summary: MapSummary,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub depth: u32,
    pub binarize: bool,
}

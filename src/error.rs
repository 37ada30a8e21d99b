//! Error types shared by the pipeline and its stages.
//!
//! Stages report a [`StageError`]; the orchestrator wraps it, untouched, into
//! the [`MapsError`] variant naming the stage that failed.
use std::collections::TryReserveError;
use thiserror::Error;

/// Status reported by an individual stage.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StageError {
    /// A configuration value is outside the range the stage supports.
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// The image is empty or smaller than the stage can analyse.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// The working image margin is narrower than the stage geometry needs.
    #[error("insufficient padding: need {required}, have {available}")]
    InsufficientPadding { required: usize, available: usize },

    /// Two inputs that must agree in shape do not.
    #[error("dimension mismatch: expected {expected_w}x{expected_h}, got {actual_w}x{actual_h}")]
    DimensionMismatch {
        expected_w: usize,
        expected_h: usize,
        actual_w: usize,
        actual_h: usize,
    },

    /// Backing storage could not be reserved.
    #[error("out of memory reserving {0} bytes")]
    OutOfMemory(usize),

    /// Any other stage-specific failure.
    #[error("{0}")]
    Failed(String),
}

impl StageError {
    pub fn invalid_parameter(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

/// Errors returned by the map extraction entry points.
#[derive(Debug, Error)]
pub enum MapsError {
    /// The input image is not 8-bit grayscale.
    #[error("input image pixel depth = {depth} != 8")]
    InvalidDepth { depth: u32 },

    /// The unpadded working copy of the input could not be allocated.
    #[error("failed to allocate working image {width}x{height}")]
    Allocation {
        width: usize,
        height: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("angle table: {0}")]
    AngleTable(StageError),

    #[error("DFT wave table: {0}")]
    WaveTable(StageError),

    #[error("DFT grid offsets: {0}")]
    GridOffsets(StageError),

    #[error("image padding: {0}")]
    Padding(StageError),

    #[error("block map generation: {0}")]
    BlockMaps(StageError),

    #[error("binarization grid offsets: {0}")]
    BinarizationGrid(StageError),

    #[error("binarization: {0}")]
    Binarization(StageError),

    #[error("quality map: {0}")]
    QualityMap(StageError),
}

impl MapsError {
    /// Status of the failing stage, if the error came from one.
    pub fn stage_status(&self) -> Option<&StageError> {
        match self {
            MapsError::InvalidDepth { .. } | MapsError::Allocation { .. } => None,
            MapsError::AngleTable(s)
            | MapsError::WaveTable(s)
            | MapsError::GridOffsets(s)
            | MapsError::Padding(s)
            | MapsError::BlockMaps(s)
            | MapsError::BinarizationGrid(s)
            | MapsError::Binarization(s)
            | MapsError::QualityMap(s) => Some(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_status_is_passed_through() {
        let status = StageError::invalid_parameter("num_directions", 0);
        let err = MapsError::AngleTable(status.clone());
        assert_eq!(err.stage_status(), Some(&status));
        assert_eq!(
            err.to_string(),
            "angle table: invalid parameter num_directions = 0"
        );
    }

    #[test]
    fn validation_errors_carry_no_stage_status() {
        let err = MapsError::InvalidDepth { depth: 1 };
        assert!(err.stage_status().is_none());
        assert_eq!(err.to_string(), "input image pixel depth = 1 != 8");
    }
}

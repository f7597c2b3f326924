//! Shared test utilities for display-backed unit tests.
//!
//! Consolidated here to avoid identical copies of the scratch session and
//! ramp image builders across the display, demo and sinusoid test modules.

use std::path::Path;

use ndarray::Array2;

use crate::display::{DisplayConfig, DisplaySession};

/// Session writing small figures into a scratch directory.
pub(crate) fn scratch_session(dir: &Path) -> DisplaySession {
    DisplaySession::new(DisplayConfig {
        output_dir: dir.to_path_buf(),
        cell_size: (64, 48),
        save: true,
    })
}

/// Diagonal intensity ramp.
pub(crate) fn ramp(shape: (usize, usize)) -> Array2<f64> {
    Array2::from_shape_fn(shape, |(i, j)| (i + j) as f64)
}

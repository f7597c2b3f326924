//! Pad/crop/shift windowing for 2D arrays.
//!
//! [`resize_window`] normalizes an arbitrary pad/crop request into a single
//! deterministic operation with centered default placement: when an odd number
//! of rows or columns must be added or removed, less happens above/left and
//! more below/right. Each axis is handled independently, which lets the mixed
//! grow-one-axis/shrink-the-other case run as two sequential single-axis
//! operations.

use ndarray::{s, Array2};

use crate::numeric::ScalarOrPair;

// ── Error type ─────────────────────────────────────────────────────────────

/// Errors raised by the window utilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// Source array is empty but not the permitted `(0, 0)` special case.
    EmptySource { rows: usize, cols: usize },
    /// Target shape equals the source shape but a nonzero offset was given.
    NonzeroOffsetAtEqualShape { offset: (i64, i64) },
    /// The requested window does not fit inside/around the source.
    OutOfBounds {
        axis: usize,
        start: i64,
        target: usize,
        source: usize,
    },
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySource { rows, cols } => {
                write!(f, "source array is empty with shape ({rows}, {cols})")
            }
            Self::NonzeroOffsetAtEqualShape { offset } => write!(
                f,
                "offset ({}, {}) is not allowed when target shape equals source shape",
                offset.0, offset.1
            ),
            Self::OutOfBounds {
                axis,
                start,
                target,
                source,
            } => write!(
                f,
                "window [{start}, {}) on axis {axis} falls outside source extent {source}",
                start + *target as i64
            ),
        }
    }
}

impl std::error::Error for WindowError {}

// ── Parameters ─────────────────────────────────────────────────────────────

/// Placement parameters for [`resize_window`].
#[derive(Debug, Clone, Copy)]
pub struct WindowParams<T> {
    /// Signed pixel displacement of the window from the source center,
    /// `(down, right)` positive.
    pub offset: ScalarOrPair<i64>,
    /// Value for cells created by padding.
    pub fill: T,
    /// Relative placement in `[-1, 1]` per axis; `(-1, -1)` is top left,
    /// `(1, 1)` bottom right. Values are clamped, converted to an absolute
    /// pixel offset proportional to the slack between source and target
    /// shapes, and override `offset`.
    pub rel_offset: Option<ScalarOrPair<f64>>,
}

impl<T: Default> Default for WindowParams<T> {
    fn default() -> Self {
        Self {
            offset: ScalarOrPair::Scalar(0),
            fill: T::default(),
            rel_offset: None,
        }
    }
}

impl<T> WindowParams<T> {
    pub fn with_fill(fill: T) -> Self {
        Self {
            offset: ScalarOrPair::Scalar(0),
            fill,
            rel_offset: None,
        }
    }
}

// ── Resize ─────────────────────────────────────────────────────────────────

/// Pad and/or crop `src` to `target` shape, keeping it centered up to the
/// requested offset.
pub fn resize_window<T: Copy>(
    src: &Array2<T>,
    target: impl Into<ScalarOrPair<usize>>,
    params: &WindowParams<T>,
) -> Result<Array2<T>, WindowError> {
    let (rows, cols) = src.dim();
    // A true (0, 0) array short-circuits; any other empty shape is rejected.
    if rows == 0 && cols == 0 {
        return Ok(src.clone());
    }
    if src.is_empty() {
        return Err(WindowError::EmptySource { rows, cols });
    }

    let (tr, tc) = target.into().resolve();
    let offset = match params.rel_offset {
        Some(rel) => relative_to_absolute(rel, (rows, cols), (tr, tc)),
        None => params.offset.resolve(),
    };

    if (tr, tc) == (rows, cols) {
        if offset != (0, 0) {
            return Err(WindowError::NonzeroOffsetAtEqualShape { offset });
        }
        return Ok(src.clone());
    }

    if tr <= rows && tc <= cols {
        crop(src, (tr, tc), offset)
    } else if tr >= rows && tc >= cols {
        pad(src, (tr, tc), offset, params.fill)
    } else {
        // One axis grows while the other shrinks; the per-axis operations are
        // independent, so run them back to back.
        let part = resize_window(src, (tr, cols), params)?;
        resize_window(&part, (part.dim().0, tc), params)
    }
}

fn relative_to_absolute(
    rel: ScalarOrPair<f64>,
    (rows, cols): (usize, usize),
    (tr, tc): (usize, usize),
) -> (i64, i64) {
    let (rr, rc) = rel.resolve();
    let axis = |r: f64, src: usize, tgt: usize| -> i64 {
        let slack = (src as i64 - tgt as i64).unsigned_abs() as f64;
        (r.clamp(-1.0, 1.0) * slack / 2.0).floor() as i64
    };
    (axis(rr, rows, tr), axis(rc, cols, tc))
}

fn crop<T: Copy>(
    src: &Array2<T>,
    (tr, tc): (usize, usize),
    (dr, dc): (i64, i64),
) -> Result<Array2<T>, WindowError> {
    let (rows, cols) = src.dim();
    let start_r = ((rows - tr) / 2) as i64 + dr;
    let start_c = ((cols - tc) / 2) as i64 + dc;
    check_bounds(0, start_r, tr, rows)?;
    check_bounds(1, start_c, tc, cols)?;
    let (sr, sc) = (start_r as usize, start_c as usize);
    Ok(src.slice(s![sr..sr + tr, sc..sc + tc]).to_owned())
}

fn pad<T: Copy>(
    src: &Array2<T>,
    (tr, tc): (usize, usize),
    (dr, dc): (i64, i64),
    fill: T,
) -> Result<Array2<T>, WindowError> {
    let (rows, cols) = src.dim();
    let before_r = ((tr - rows) / 2) as i64 + dr;
    let before_c = ((tc - cols) / 2) as i64 + dc;
    check_bounds(0, before_r, rows, tr)?;
    check_bounds(1, before_c, cols, tc)?;
    let (br, bc) = (before_r as usize, before_c as usize);
    let mut out = Array2::from_elem((tr, tc), fill);
    out.slice_mut(s![br..br + rows, bc..bc + cols]).assign(src);
    Ok(out)
}

fn check_bounds(axis: usize, start: i64, target: usize, source: usize) -> Result<(), WindowError> {
    if start < 0 || start + target as i64 > source as i64 {
        return Err(WindowError::OutOfBounds {
            axis,
            start,
            target,
            source,
        });
    }
    Ok(())
}

// ── Lateral shift and circular roll ────────────────────────────────────────

/// Shift a 2D array laterally without wrapping.
///
/// `pixels` is `(down, right)`; negative values shift the opposite way.
/// Pixels shifted outside the array extent are lost and vacated cells take
/// `fill`. The output shape equals the input shape.
pub fn shift<T: Copy>(src: &Array2<T>, pixels: (i64, i64), fill: T) -> Array2<T> {
    let (rows, cols) = src.dim();
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        let si = i as i64 - pixels.0;
        let sj = j as i64 - pixels.1;
        if si >= 0 && si < rows as i64 && sj >= 0 && sj < cols as i64 {
            src[(si as usize, sj as usize)]
        } else {
            fill
        }
    })
}

/// Circularly roll a 2D array along both axes.
///
/// Unlike [`shift`], pixels rolled past one end reappear at the other.
pub fn roll_2d<T: Copy>(src: &Array2<T>, amount: impl Into<ScalarOrPair<i64>>) -> Array2<T> {
    let (rows, cols) = src.dim();
    if src.is_empty() {
        return src.clone();
    }
    let (dr, dc) = amount.into().resolve();
    let mut out = src.clone();
    for ((i, j), &v) in src.indexed_iter() {
        let ni = (i as i64 + dr).rem_euclid(rows as i64) as usize;
        let nj = (j as i64 + dc).rem_euclid(cols as i64) as usize;
        out[(ni, nj)] = v;
    }
    out
}

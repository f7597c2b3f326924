//! Hard-edged frequency-domain filter construction.
//!
//! Two filter families cover the spatial-filtering demos: circular apertures
//! (low-/high-pass by radius) and oriented rectangular bands (pass/reject by
//! orientation). Filters are real-valued 0/1 arrays sized to match a centered
//! Fourier spectrum.

use image::{ImageBuffer, Luma};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use ndarray::Array2;

use crate::mask::disc;
use crate::numeric::ScalarOrPair;
use crate::window::{resize_window, WindowError, WindowParams};

/// Build a disc-shaped aperture filter.
///
/// `diameter_frac` is a proportion of the smaller shape axis. `inside` is the
/// value within the disc (1 for low-pass, 0 for high-pass); the remainder of
/// the filter takes `1 - inside`. A non-positive diameter yields a filter
/// with a single sentinel pixel at `[0, 0]` set to `inside` so the filter
/// stays bi-valued for display.
pub fn disc_filter(shape: (usize, usize), diameter_frac: f64, inside: f64) -> Array2<f64> {
    let outside = 1.0 - inside;
    let mut f = Array2::from_elem(shape, outside);
    let diameter_px = shape.0.min(shape.1) as f64 * diameter_frac;
    if diameter_px > 0.0 {
        let m = disc(
            diameter_px as i64,
            Some(ScalarOrPair::Pair(shape.0, shape.1)),
            None,
        );
        for ((i, j), &inside_disc) in m.indexed_iter() {
            if inside_disc {
                f[(i, j)] = inside;
            }
        }
    } else if !f.is_empty() {
        f[(0, 0)] = inside;
    }
    f
}

/// Build an oriented rectangular band filter.
///
/// A horizontal band of `thickness` rows is drawn on an oversized canvas
/// (diagonal-length in each axis), rotated counter-clockwise by
/// `angle_degrees` about the canvas center, and cropped back to `shape`.
/// The lowest spatial frequencies are then fixed up with a small central
/// disc: removed from a pass band (`inside == 1`), restored into a reject
/// band (`inside == 0`).
pub fn oriented_band(
    shape: (usize, usize),
    angle_degrees: f64,
    inside: f64,
    thickness: usize,
) -> Result<Array2<f64>, WindowError> {
    let outside = 1.0 - inside;
    let canvas_rows = (shape.0 as f64 * std::f64::consts::SQRT_2).ceil() as usize;
    let canvas_cols = (shape.1 as f64 * std::f64::consts::SQRT_2).ceil() as usize;
    let mut f = Array2::from_elem((canvas_rows, canvas_cols), outside);

    let half_height = canvas_rows / 2;
    let above = thickness / 2;
    let below = thickness - above;
    let band_start = half_height.saturating_sub(above);
    let band_end = (half_height + below).min(canvas_rows);
    for i in band_start..band_end {
        for j in 0..canvas_cols {
            f[(i, j)] = inside;
        }
    }

    let rotated = rotate_array(&f, angle_degrees);
    let cropped = resize_window(&rotated, (shape.0, shape.1), &WindowParams::with_fill(0.0))?;

    // Fix up the lowest spatial frequencies near the spectrum center.
    let as_f64 = |b: bool| if b { 1.0 } else { 0.0 };
    let out = if inside != 0.0 {
        let low_block = disc_filter(shape, 0.05, 0.0);
        Array2::from_shape_fn(shape, |idx| {
            as_f64(cropped[idx] != 0.0 && low_block[idx] != 0.0)
        })
    } else {
        let low_pass = disc_filter(shape, 0.2, 1.0);
        Array2::from_shape_fn(shape, |idx| {
            as_f64(cropped[idx] != 0.0 || low_pass[idx] != 0.0)
        })
    };
    Ok(out)
}

/// Rotate a real-valued array counter-clockwise about its center with
/// bilinear interpolation, filling uncovered cells with zero.
fn rotate_array(a: &Array2<f64>, angle_degrees: f64) -> Array2<f64> {
    let (rows, cols) = a.dim();
    if a.is_empty() {
        return a.clone();
    }
    let mut img = ImageBuffer::<Luma<f32>, Vec<f32>>::new(cols as u32, rows as u32);
    for ((i, j), &v) in a.indexed_iter() {
        img.put_pixel(j as u32, i as u32, Luma([v as f32]));
    }
    // imageproc rotates clockwise for positive theta.
    let theta = -(angle_degrees.to_radians()) as f32;
    let rotated = rotate_about_center(&img, theta, Interpolation::Bilinear, Luma([0.0f32]));
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        rotated.get_pixel(j as u32, i as u32)[0] as f64
    })
}

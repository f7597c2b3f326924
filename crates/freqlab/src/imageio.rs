//! Image file I/O with intensity rescaling.
//!
//! Arrays cross this boundary as grayscale `f64` grids in `[0, 1]`: reads
//! stretch whatever range the file holds to fill `[0, 1]`, writes rescale
//! only when values fall outside `[0, 1]` and then quantize to 8-bit depth.

use std::path::Path;

use image::{GrayImage, Luma};
use ndarray::Array2;

// ── Error type ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ImageIoError {
    /// Decode/encode failure from the underlying image library.
    Image(image::ImageError),
    /// The array to be written is empty.
    EmptyArray,
}

impl std::fmt::Display for ImageIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image(e) => write!(f, "image codec error: {e}"),
            Self::EmptyArray => write!(f, "cannot write an empty array"),
        }
    }
}

impl std::error::Error for ImageIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(e) => Some(e),
            Self::EmptyArray => None,
        }
    }
}

impl From<image::ImageError> for ImageIoError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

// ── Intensity rescaling ────────────────────────────────────────────────────

/// Stretch intensities to fill `[0, 1]` using the array's own min/max.
///
/// A constant array cannot be stretched and is returned unchanged.
pub fn rescale_intensity(a: &Array2<f64>) -> Array2<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in a.iter() {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() || min == max {
        return a.clone();
    }
    let span = max - min;
    a.mapv(|v| (v - min) / span)
}

// ── File I/O ───────────────────────────────────────────────────────────────

/// Read any raster format the image library decodes, convert to grayscale
/// floating point, and stretch to `[0, 1]`.
pub fn read_scaled(path: &Path) -> Result<Array2<f64>, ImageIoError> {
    let img = image::open(path)?.to_luma32f();
    let (w, h) = img.dimensions();
    let a = Array2::from_shape_fn((h as usize, w as usize), |(i, j)| {
        img.get_pixel(j as u32, i as u32)[0] as f64
    });
    Ok(rescale_intensity(&a))
}

/// Write a real-valued image at 8-bit depth.
///
/// Rescales to `[0, 1]` only when any value lies outside that range, then
/// quantizes with round-to-nearest. The format is chosen by file extension.
pub fn write_scaled(path: &Path, a: &Array2<f64>) -> Result<(), ImageIoError> {
    if a.is_empty() {
        return Err(ImageIoError::EmptyArray);
    }
    let a = if a.iter().any(|&v| !(0.0..=1.0).contains(&v)) {
        rescale_intensity(a)
    } else {
        a.clone()
    };
    let (rows, cols) = a.dim();
    let mut img = GrayImage::new(cols as u32, rows as u32);
    for ((i, j), &v) in a.indexed_iter() {
        img.put_pixel(j as u32, i as u32, Luma([(v * 255.0).round() as u8]));
    }
    img.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn rescale_stretches_to_unit_range() {
        let a = array![[100.0, 120.0], [110.0, 115.0]];
        let r = rescale_intensity(&a);
        assert_abs_diff_eq!(r[(0, 0)], 0.0);
        assert_abs_diff_eq!(r[(0, 1)], 1.0);
        assert_abs_diff_eq!(r[(1, 0)], 0.5);
        assert_abs_diff_eq!(r[(1, 1)], 0.75);
    }

    #[test]
    fn rescale_keeps_constant_arrays() {
        let a = array![[0.3, 0.3], [0.3, 0.3]];
        assert_eq!(rescale_intensity(&a), a);
    }

    #[test]
    fn write_then_read_round_trips_coarsely() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        let a = Array2::from_shape_fn((4, 8), |(_, j)| j as f64 / 7.0);
        write_scaled(&path, &a).unwrap();
        let back = read_scaled(&path).unwrap();
        assert_eq!(back.dim(), (4, 8));
        assert_abs_diff_eq!(back[(0, 0)], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(back[(0, 7)], 1.0, epsilon = 1e-6);
        for j in 0..8 {
            assert_abs_diff_eq!(back[(0, j)], a[(0, j)], epsilon = 0.01);
        }
    }

    #[test]
    fn out_of_range_values_are_stretched_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        let a = array![[-1.0, 0.0], [1.0, 3.0]];
        write_scaled(&path, &a).unwrap();
        let back = read_scaled(&path).unwrap();
        assert_abs_diff_eq!(back[(0, 0)], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(back[(1, 1)], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn empty_array_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let a = Array2::<f64>::zeros((0, 0));
        assert!(matches!(
            write_scaled(&path, &a),
            Err(ImageIoError::EmptyArray)
        ));
    }
}

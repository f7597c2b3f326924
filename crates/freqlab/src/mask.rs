//! Geometric boolean masks.
//!
//! The disc mask is the building block for circular frequency-domain filters.
//! By convention discs have odd diameter so that a single well-defined center
//! pixel exists; for an even-shaped mask with a default center, the center is
//! the bottom-right pixel of the central four (a `(2, 2)` mask centers at
//! `[1, 1]`).

use ndarray::Array2;

use crate::numeric::ScalarOrPair;

/// Build a boolean disc mask.
///
/// Cells whose Euclidean distance from `center` is at most
/// `radius = (diameter - 1) / 2` are `true`. A non-positive `diameter` yields
/// an all-`false` mask of the requested shape. `shape` defaults to
/// `(diameter, diameter)` and `center` to `shape / 2` per axis.
pub fn disc(
    diameter: i64,
    shape: Option<ScalarOrPair<usize>>,
    center: Option<(i64, i64)>,
) -> Array2<bool> {
    let diameter = diameter.max(0);
    let radius = if diameter == 0 { 0 } else { (diameter - 1) / 2 };

    let (rows, cols) = match shape {
        Some(s) => s.resolve(),
        None => (diameter as usize, diameter as usize),
    };

    // Diameter zero is distinct from radius zero: diameters 1 and 2 both give
    // radius 0 but still contain the center pixel.
    if diameter == 0 {
        return Array2::from_elem((rows, cols), false);
    }

    let (cy, cx) = center.unwrap_or(((rows / 2) as i64, (cols / 2) as i64));
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        let dy = i as i64 - cy;
        let dx = j as i64 - cx;
        dy * dy + dx * dx <= radius * radius
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diameter_one_is_a_single_center_pixel() {
        let m = disc(1, Some(ScalarOrPair::Pair(5, 5)), None);
        assert_eq!(m.iter().filter(|&&v| v).count(), 1);
        assert!(m[(2, 2)]);
    }

    #[test]
    fn diameter_zero_is_all_false() {
        let m = disc(0, Some(ScalarOrPair::Scalar(4)), None);
        assert_eq!(m.dim(), (4, 4));
        assert!(m.iter().all(|&v| !v));
    }

    #[test]
    fn negative_diameter_behaves_like_zero() {
        let m = disc(-3, Some(ScalarOrPair::Scalar(3)), None);
        assert!(m.iter().all(|&v| !v));
    }

    #[test]
    fn even_shape_centers_bottom_right_of_middle_four() {
        let m = disc(1, Some(ScalarOrPair::Pair(2, 2)), None);
        assert!(m[(1, 1)]);
        assert_eq!(m.iter().filter(|&&v| v).count(), 1);
    }

    #[test]
    fn default_shape_comes_from_diameter() {
        let m = disc(5, None, None);
        assert_eq!(m.dim(), (5, 5));
        // Radius 2 disc: 13 cells inside (|dy|² + |dx|² <= 4).
        assert_eq!(m.iter().filter(|&&v| v).count(), 13);
        assert!(m[(2, 2)] && m[(0, 2)] && m[(2, 0)]);
        assert!(!m[(0, 0)]);
    }

    #[test]
    fn explicit_center_moves_the_disc() {
        let m = disc(3, Some(ScalarOrPair::Scalar(5)), Some((0, 0)));
        assert!(m[(0, 0)] && m[(0, 1)] && m[(1, 0)]);
        assert!(!m[(4, 4)]);
    }

    #[test]
    fn even_diameters_share_radius_with_previous_odd() {
        let odd = disc(3, Some(ScalarOrPair::Scalar(7)), None);
        let even = disc(4, Some(ScalarOrPair::Scalar(7)), None);
        assert_eq!(odd, even);
    }
}

//! Thin 1D/2D FFT helpers over `rustfft`.
//!
//! The forward transforms are unnormalized; the inverse transforms scale by
//! `1/N` so that `ifft(fft(x)) == x`. Shift helpers move the zero-frequency
//! bin to the array center and back, handling odd extents.

use ndarray::{Array2, Axis};
use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::window::roll_2d;

/// Forward 1D FFT.
pub fn fft(data: &[Complex64]) -> Vec<Complex64> {
    let mut buf = data.to_vec();
    if !buf.is_empty() {
        FftPlanner::new()
            .plan_fft_forward(buf.len())
            .process(&mut buf);
    }
    buf
}

/// Inverse 1D FFT, scaled by `1/N`.
pub fn ifft(data: &[Complex64]) -> Vec<Complex64> {
    let mut buf = data.to_vec();
    if buf.is_empty() {
        return buf;
    }
    FftPlanner::new()
        .plan_fft_inverse(buf.len())
        .process(&mut buf);
    let scale = 1.0 / buf.len() as f64;
    for v in &mut buf {
        *v *= scale;
    }
    buf
}

/// Forward 2D FFT: rows first, then columns.
pub fn fft2(a: &Array2<Complex64>) -> Array2<Complex64> {
    transform_2d(a, true)
}

/// Inverse 2D FFT, scaled by `1/(rows * cols)`.
pub fn ifft2(a: &Array2<Complex64>) -> Array2<Complex64> {
    let mut out = transform_2d(a, false);
    let scale = 1.0 / (a.nrows() * a.ncols()) as f64;
    out.mapv_inplace(|v| v * scale);
    out
}

fn transform_2d(a: &Array2<Complex64>, forward: bool) -> Array2<Complex64> {
    let (rows, cols) = a.dim();
    let mut out = a.clone();
    if rows == 0 || cols == 0 {
        return out;
    }
    let mut planner = FftPlanner::new();
    let row_fft = if forward {
        planner.plan_fft_forward(cols)
    } else {
        planner.plan_fft_inverse(cols)
    };
    let col_fft = if forward {
        planner.plan_fft_forward(rows)
    } else {
        planner.plan_fft_inverse(rows)
    };

    // Copy each lane through a contiguous scratch buffer; this sidesteps the
    // column stride without transposing the whole array.
    let mut buf = vec![Complex64::new(0.0, 0.0); cols.max(rows)];
    for mut row in out.axis_iter_mut(Axis(0)) {
        for (b, v) in buf[..cols].iter_mut().zip(row.iter()) {
            *b = *v;
        }
        row_fft.process(&mut buf[..cols]);
        for (v, b) in row.iter_mut().zip(buf[..cols].iter()) {
            *v = *b;
        }
    }
    for mut col in out.axis_iter_mut(Axis(1)) {
        for (b, v) in buf[..rows].iter_mut().zip(col.iter()) {
            *b = *v;
        }
        col_fft.process(&mut buf[..rows]);
        for (v, b) in col.iter_mut().zip(buf[..rows].iter()) {
            *v = *b;
        }
    }
    out
}

/// Move the zero-frequency bin of a 1D spectrum to the center.
pub fn fftshift(data: &mut [Complex64]) {
    let n = data.len();
    if n > 1 {
        data.rotate_right(n / 2);
    }
}

/// Undo [`fftshift`] on a 1D spectrum.
pub fn ifftshift(data: &mut [Complex64]) {
    let n = data.len();
    if n > 1 {
        data.rotate_left(n / 2);
    }
}

/// Move the zero-frequency bin of a 2D spectrum to the array center.
pub fn fftshift2<T: Copy>(a: &Array2<T>) -> Array2<T> {
    let (rows, cols) = a.dim();
    roll_2d(a, ((rows / 2) as i64, (cols / 2) as i64))
}

/// Undo [`fftshift2`].
pub fn ifftshift2<T: Copy>(a: &Array2<T>) -> Array2<T> {
    let (rows, cols) = a.dim();
    roll_2d(a, (-((rows / 2) as i64), -((cols / 2) as i64)))
}

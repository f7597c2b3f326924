//! Hard-edged spatial frequency filtering of grayscale images.
//!
//! The driver runs the whole pipeline: forward transform, centered spectrum,
//! filter multiply, inverse transform, magnitude, rescale. Along the way it
//! can show the intermediate stages on a display session (original, clipped
//! spectrum, filter, filtered spectrum, result) and write the filtered image
//! to disk under a parameter-stamped filename.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::display::{Colorbar, DisplayError, DisplaySession, ShowOptions, SubplotRequest};
use crate::fft::{fft2, fftshift2, ifft2, ifftshift2};
use crate::filter::{disc_filter, oriented_band};
use crate::imageio::{read_scaled, rescale_intensity, write_scaled, ImageIoError};
use crate::window::WindowError;

// ── Error type ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum DemoError {
    Window(WindowError),
    Display(DisplayError),
    Image(ImageIoError),
}

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Window(e) => write!(f, "{e}"),
            Self::Display(e) => write!(f, "{e}"),
            Self::Image(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Window(e) => Some(e),
            Self::Display(e) => Some(e),
            Self::Image(e) => Some(e),
        }
    }
}

impl From<WindowError> for DemoError {
    fn from(e: WindowError) -> Self {
        Self::Window(e)
    }
}

impl From<DisplayError> for DemoError {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

impl From<ImageIoError> for DemoError {
    fn from(e: ImageIoError) -> Self {
        Self::Image(e)
    }
}

// ── Configuration ──────────────────────────────────────────────────────────

/// Filter family and its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterKind {
    /// Circular aperture; `radius_frac` is a proportion of the smaller image
    /// axis, legal in `[0, 0.5]`. Out-of-range values reset to 0.1.
    Frequency { radius_frac: f64 },
    /// Oriented band at the given angle in degrees.
    Orientation { angle_degrees: f64 },
}

impl Default for FilterKind {
    fn default() -> Self {
        Self::Frequency { radius_frac: 0.1 }
    }
}

impl FilterKind {
    fn sanitized(self) -> Self {
        match self {
            Self::Frequency { radius_frac } if !(0.0..=0.5).contains(&radius_frac) => {
                tracing::debug!(radius_frac, "radius outside [0, 0.5], using 0.1");
                Self::Frequency { radius_frac: 0.1 }
            }
            other => other,
        }
    }

    fn parameter(&self) -> f64 {
        match self {
            Self::Frequency { radius_frac } => *radius_frac,
            Self::Orientation { angle_degrees } => *angle_degrees,
        }
    }
}

/// Value inside the filter aperture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPolarity {
    /// Aperture value 0: frequencies inside are removed.
    #[default]
    HighPass,
    /// Aperture value 1: frequencies inside are retained.
    LowPass,
}

impl FilterPolarity {
    fn inside(self) -> f64 {
        match self {
            Self::HighPass => 0.0,
            Self::LowPass => 1.0,
        }
    }
}

/// Which stages to show on the display session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowPolicy {
    #[default]
    All,
    FinalOnly,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    pub filter: FilterKind,
    pub polarity: FilterPolarity,
    pub show: ShowPolicy,
    /// Subplot grid holding all displayed stages.
    pub subplot: (usize, usize),
    pub colorbars: bool,
    /// Height of the orientation band aperture before rotation.
    pub band_thickness: usize,
    /// Output image path; the filter parameters are stamped into the
    /// filename. An empty path becomes `untitled`, a missing extension
    /// becomes `.png`.
    pub output: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            filter: FilterKind::default(),
            polarity: FilterPolarity::default(),
            show: ShowPolicy::default(),
            subplot: (2, 3),
            colorbars: false,
            band_thickness: 16,
            output: None,
        }
    }
}

/// Image input: a file to read or an in-memory grayscale `[0, 1]` array.
pub enum DemoInput<'a> {
    Path(&'a Path),
    Array(&'a Array2<f64>),
}

// ── Driver ─────────────────────────────────────────────────────────────────

/// Spatial filter an image with a hard-edged filter.
///
/// Returns the real-valued filtered image amplitude, rescaled to `[0, 1]`.
pub fn spatial_filtering_demo(
    input: DemoInput<'_>,
    cfg: &DemoConfig,
    session: &mut DisplaySession,
) -> Result<Array2<f64>, DemoError> {
    let filter = cfg.filter.sanitized();
    let a = match input {
        DemoInput::Path(path) => read_scaled(path)?,
        DemoInput::Array(arr) => arr.clone(),
    };

    let colorbar = if cfg.colorbars {
        Colorbar::Standard
    } else {
        Colorbar::None
    };
    let show_all = cfg.show == ShowPolicy::All;
    if show_all {
        session.show_image(
            Some(&a),
            &ShowOptions {
                title: Some("Original image".into()),
                cmap: Some("grey".into()),
                colorbar,
                subplot: SubplotRequest::Grid {
                    rows: cfg.subplot.0,
                    cols: cfg.subplot.1,
                },
                new_subplot_fig: true,
                ..ShowOptions::default()
            },
        )?;
    }

    let spectrum = fftshift2(&fft2(&a.mapv(|v| Complex64::new(v, 0.0))));
    let ampl = spectrum.mapv(|v| v.norm());
    // Clip the spectrum so its detail survives a low dynamic range display.
    let clip_val = ampl.iter().fold(0.0f64, |m, &v| m.max(v)) * 0.001;
    if show_all {
        session.show_image(
            Some(&ampl),
            &ShowOptions {
                title: Some("Amplitude of Fourier spectrum".into()),
                cmap: Some("grey".into()),
                display_range: Some((0.0, clip_val)),
                ..ShowOptions::default()
            },
        )?;
        // Skip the next subplot location.
        session.show_image(None, &ShowOptions::default())?;
    }

    let shape = a.dim();
    let inside = cfg.polarity.inside();
    let h = match filter {
        FilterKind::Frequency { radius_frac } => disc_filter(shape, radius_frac, inside),
        FilterKind::Orientation { angle_degrees } => {
            oriented_band(shape, angle_degrees, inside, cfg.band_thickness)?
        }
    };
    let param_str = parameter_string(&filter, cfg.polarity);
    if show_all {
        session.show_image(
            Some(&h),
            &ShowOptions {
                title: Some(format!("Spatial filter ({param_str})")),
                cmap: Some("grey".into()),
                colorbar,
                ..ShowOptions::default()
            },
        )?;
    }

    let filtered = &spectrum * &h.mapv(|v| Complex64::new(v, 0.0));
    if show_all {
        session.show_image(
            Some(&filtered.mapv(|v| v.norm())),
            &ShowOptions {
                title: Some(format!("Spectrum ({param_str})")),
                cmap: Some("grey".into()),
                display_range: Some((0.0, clip_val)),
                ..ShowOptions::default()
            },
        )?;
    }

    let result = rescale_intensity(&ifft2(&ifftshift2(&filtered)).mapv(|v| v.norm()));
    if cfg.show != ShowPolicy::None {
        session.show_image(
            Some(&result),
            &ShowOptions {
                title: Some(format!("Image amplitude, ({param_str})")),
                cmap: Some("grey".into()),
                ..ShowOptions::default()
            },
        )?;
    }

    if let Some(output) = &cfg.output {
        let path = stamped_output_path(output, &param_str);
        write_scaled(&path, &result)?;
        tracing::info!(path = %path.display(), "filtered image written");
    }
    Ok(result)
}

fn parameter_string(filter: &FilterKind, polarity: FilterPolarity) -> String {
    format!("p={}, f={}", filter.parameter(), polarity.inside() as i64)
}

/// Stamp the filter parameters into the output filename.
fn stamped_output_path(output: &Path, param_str: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "untitled".to_string());
    let ext = output
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    let tag = param_str.replace(", ", ",");
    let name = format!("{stem}[{tag}].{ext}");
    match output.parent() {
        Some(parent) if parent != Path::new("") => parent.join(name),
        _ => PathBuf::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn quiet_session(dir: &Path) -> DisplaySession {
        crate::test_utils::scratch_session(dir)
    }

    fn silent_cfg(filter: FilterKind, polarity: FilterPolarity) -> DemoConfig {
        DemoConfig {
            filter,
            polarity,
            show: ShowPolicy::None,
            ..DemoConfig::default()
        }
    }

    #[test]
    fn low_pass_keeps_a_constant_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = quiet_session(dir.path());
        let a = Array2::from_elem((16, 16), 0.5);
        let cfg = silent_cfg(
            FilterKind::Frequency { radius_frac: 0.2 },
            FilterPolarity::LowPass,
        );
        let out = spatial_filtering_demo(DemoInput::Array(&a), &cfg, &mut s).unwrap();
        // Only the DC term survives, so the result is flat.
        for &v in out.iter() {
            assert_abs_diff_eq!(v, 0.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn high_pass_removes_a_constant_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = quiet_session(dir.path());
        let a = Array2::from_elem((16, 16), 0.5);
        let cfg = silent_cfg(
            FilterKind::Frequency { radius_frac: 0.2 },
            FilterPolarity::HighPass,
        );
        let out = spatial_filtering_demo(DemoInput::Array(&a), &cfg, &mut s).unwrap();
        for &v in out.iter() {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn result_stays_in_unit_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = quiet_session(dir.path());
        let a = Array2::from_shape_fn((32, 24), |(i, j)| ((i * j) % 7) as f64 / 6.0);
        let cfg = silent_cfg(
            FilterKind::Orientation {
                angle_degrees: 45.0,
            },
            FilterPolarity::LowPass,
        );
        let out = spatial_filtering_demo(DemoInput::Array(&a), &cfg, &mut s).unwrap();
        assert_eq!(out.dim(), (32, 24));
        assert!(out.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn show_all_fills_the_subplot_grid() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = quiet_session(dir.path());
        let a = Array2::from_shape_fn((16, 16), |(i, _)| i as f64 / 15.0);
        let cfg = DemoConfig {
            show: ShowPolicy::All,
            ..silent_cfg(
                FilterKind::Frequency { radius_frac: 0.2 },
                FilterPolarity::LowPass,
            )
        };
        spatial_filtering_demo(DemoInput::Array(&a), &cfg, &mut s).unwrap();
        // Six stages in the 2x3 grid: all slots consumed.
        assert_eq!(s.next_slot(), 7);
        assert!(dir.path().join("graph.png").exists());
    }

    #[test]
    fn out_of_range_radius_resets_to_default() {
        assert_eq!(
            FilterKind::Frequency { radius_frac: 0.9 }.sanitized(),
            FilterKind::Frequency { radius_frac: 0.1 }
        );
        assert_eq!(
            FilterKind::Frequency { radius_frac: 0.4 }.sanitized(),
            FilterKind::Frequency { radius_frac: 0.4 }
        );
    }

    #[test]
    fn output_path_is_parameter_stamped() {
        let p = stamped_output_path(Path::new("out/pic.bmp"), "p=0.2, f=1");
        assert_eq!(p, PathBuf::from("out/pic[p=0.2,f=1].bmp"));
        let p = stamped_output_path(Path::new("pic"), "p=0.1, f=0");
        assert_eq!(p, PathBuf::from("pic[p=0.1,f=0].png"));
        let p = stamped_output_path(Path::new(""), "p=0.1, f=0");
        assert_eq!(p, PathBuf::from("untitled[p=0.1,f=0].png"));
    }

    #[test]
    fn output_file_lands_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = quiet_session(dir.path());
        let a = Array2::from_shape_fn((8, 8), |(i, j)| (i + j) as f64 / 14.0);
        let cfg = DemoConfig {
            output: Some(dir.path().join("filtered.png")),
            ..silent_cfg(
                FilterKind::Frequency { radius_frac: 0.3 },
                FilterPolarity::LowPass,
            )
        };
        spatial_filtering_demo(DemoInput::Array(&a), &cfg, &mut s).unwrap();
        assert!(dir.path().join("filtered[p=0.3,f=1].png").exists());
    }
}

//! Sinusoid synthesis demos: impulse pairs in the Fourier domain and the
//! sinusoids they transform into.
//!
//! The 1D entry points place impulse pairs symmetrically about the spectrum
//! center and plot the real/imaginary/amplitude/phase views of the inverse
//! transform. The 2D entry points build sinusoidal images, insert impulse
//! pairs into 2D spectra, reconstruct single Fourier-domain pixels, and
//! accumulate randomly-ordered pixels into an animated reconstruction.

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use ndarray::{Array2, Zip};
use num_complex::Complex64;
use rand::seq::SliceRandom;

use crate::display::{
    Colorbar, DisplayError, DisplaySession, LineOptions, ShowOptions, SubplotRequest, YLimits,
};
use crate::fft::{fft2, fftshift2, ifft, ifft2, ifftshift, ifftshift2};
use crate::gif::{GifEncoder, GifError};
use crate::imageio::{read_scaled, write_scaled, ImageIoError};

// ── Error type ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum SinusoidError {
    /// A component's requested sinusoid amplitude was zero.
    ZeroAmplitude { index: usize },
    /// An impulse offset fell outside the array.
    ImpulseOutOfRange { offset: (i64, i64) },
    /// The array is too short to hold a centered impulse pair.
    ArrayTooShort { len: usize },
    /// An animation needs at least two frames.
    TooFewFrames { requested: usize },
    Display(DisplayError),
    Image(ImageIoError),
    Gif(GifError),
    Io(std::io::Error),
}

impl std::fmt::Display for SinusoidError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroAmplitude { index } => {
                write!(f, "component {index} has zero amplitude")
            }
            Self::ImpulseOutOfRange { offset } => {
                write!(f, "impulse offset {offset:?} falls outside the array")
            }
            Self::ArrayTooShort { len } => {
                write!(f, "array of length {len} cannot hold an impulse pair")
            }
            Self::TooFewFrames { requested } => {
                write!(f, "animation needs at least 2 frames, got {requested}")
            }
            Self::Display(e) => write!(f, "{e}"),
            Self::Image(e) => write!(f, "{e}"),
            Self::Gif(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for SinusoidError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Display(e) => Some(e),
            Self::Image(e) => Some(e),
            Self::Gif(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DisplayError> for SinusoidError {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

impl From<ImageIoError> for SinusoidError {
    fn from(e: ImageIoError) -> Self {
        Self::Image(e)
    }
}

impl From<GifError> for SinusoidError {
    fn from(e: GifError) -> Self {
        Self::Gif(e)
    }
}

impl From<std::io::Error> for SinusoidError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ── 1D sinusoids ───────────────────────────────────────────────────────────

/// One impulse pair placed symmetrically about the spectrum center.
#[derive(Debug, Clone, Copy)]
pub struct SinusoidComponent {
    /// Off-center distance in pixels; also the number of periods in the
    /// resulting sinusoid.
    pub ocd: usize,
    /// Desired amplitude of the resulting sinusoid.
    pub amplitude: f64,
    /// Unit impulse values left and right of the center, before scaling.
    pub impulses: [Complex64; 2],
}

impl Default for SinusoidComponent {
    fn default() -> Self {
        Self {
            ocd: 1,
            amplitude: 1.0,
            impulses: [Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0)],
        }
    }
}

/// Which figures [`plot_sinusoid`] renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureFlags {
    /// Impulse plots plus every final figure.
    pub all: bool,
    /// All four final figures.
    pub finals: bool,
    pub real: bool,
    pub imag: bool,
    pub amplitude: bool,
    pub phase: bool,
}

impl Default for FigureFlags {
    fn default() -> Self {
        Self::all()
    }
}

impl FigureFlags {
    pub fn all() -> Self {
        Self {
            all: true,
            finals: false,
            real: false,
            imag: false,
            amplitude: false,
            phase: false,
        }
    }

    pub fn none() -> Self {
        Self {
            all: false,
            finals: false,
            real: false,
            imag: false,
            amplitude: false,
            phase: false,
        }
    }

    /// Parse a compact flag string: 'a' all, 'f' finals, 'r' real,
    /// 'i' imaginary, 'm' amplitude, 'p' phase. Unknown characters are
    /// ignored; an empty string selects nothing.
    pub fn parse(flags: &str) -> Self {
        let mut out = Self::none();
        for ch in flags.chars() {
            match ch {
                'a' => out.all = true,
                'f' => out.finals = true,
                'r' => out.real = true,
                'i' => out.imag = true,
                'm' => out.amplitude = true,
                'p' => out.phase = true,
                _ => {}
            }
        }
        out
    }

    fn final_real(&self) -> bool {
        self.all || self.finals || self.real
    }

    fn final_imag(&self) -> bool {
        self.all || self.finals || self.imag
    }

    fn final_amplitude(&self) -> bool {
        self.all || self.finals || self.amplitude
    }

    fn final_phase(&self) -> bool {
        self.all || self.finals || self.phase
    }
}

/// Overwrite a symmetric impulse pair into `a` and plot the spectrum and the
/// real/imaginary parts of its inverse transform.
///
/// A stripped-down companion to [`plot_sinusoid`] showing how little is
/// needed to synthesize a sinusoid. Figures are written with suffixes
/// `0`, `1` and `2`.
pub fn add_impulse(
    session: &DisplaySession,
    a: &mut [Complex64],
    freq: usize,
    ampl: Complex64,
) -> Result<Vec<PathBuf>, SinusoidError> {
    let origin = a.len() / 2;
    if freq > origin || origin + freq >= a.len() {
        return Err(SinusoidError::ArrayTooShort { len: a.len() });
    }
    a[origin - freq] = ampl;
    a[origin + freq] = ampl;

    let x = centered_axis(a.len());
    let real_a: Vec<f64> = a.iter().map(|v| v.re).collect();
    let mut paths = Vec::new();
    paths.push(session.plot_line(&x, &real_a, &line_opts("0", YLimits::Auto))?);

    let mut spectrum = a.to_vec();
    ifftshift(&mut spectrum);
    let s = ifft(&spectrum);
    let re: Vec<f64> = s.iter().map(|v| v.re).collect();
    let im: Vec<f64> = s.iter().map(|v| v.im).collect();
    paths.push(session.plot_line(&x, &re, &line_opts("1", YLimits::Auto))?);
    paths.push(session.plot_line(&x, &im, &line_opts("2", YLimits::Auto))?);
    Ok(paths)
}

/// Create and plot the sum of arbitrary sinusoids.
///
/// Each component contributes a pair of impulses positioned `ocd` pixels
/// either side of the spectrum center, scaled so the resulting sinusoid has
/// the requested amplitude. Returns the paths of the written figures.
pub fn plot_sinusoid(
    session: &DisplaySession,
    components: &[SinusoidComponent],
    m: usize,
    figs: FigureFlags,
) -> Result<Vec<PathBuf>, SinusoidError> {
    let origin = m / 2;
    let mut a = vec![Complex64::new(0.0, 0.0); m];
    for (index, comp) in components.iter().enumerate() {
        if comp.amplitude == 0.0 {
            return Err(SinusoidError::ZeroAmplitude { index });
        }
        if comp.ocd > origin || origin + comp.ocd >= m {
            return Err(SinusoidError::ImpulseOutOfRange {
                offset: (0, comp.ocd as i64),
            });
        }
        // With a 1/N-scaled inverse transform the sinusoid amplitude comes
        // out as sum(|d|) / M, so divide that through the impulse values.
        let ascaling =
            (comp.impulses[0].norm() + comp.impulses[1].norm()) / m as f64 / comp.amplitude;
        a[origin - comp.ocd] += comp.impulses[0] / ascaling;
        a[origin + comp.ocd] += comp.impulses[1] / ascaling;
    }

    let mut paths = Vec::new();
    let x = centered_axis(m);
    if figs.all {
        let views: [(Vec<f64>, YLimits); 4] = [
            (a.iter().map(|v| v.re).collect(), YLimits::Auto),
            (a.iter().map(|v| v.im).collect(), YLimits::Auto),
            (a.iter().map(|v| v.norm()).collect(), YLimits::Lower(0.0)),
            (a.iter().map(|v| v.arg()).collect(), YLimits::Range(-PI, PI)),
        ];
        for (n, (y, ylims)) in views.iter().enumerate() {
            paths.push(session.plot_line(&x, y, &line_opts(&n.to_string(), *ylims))?);
        }
    }

    let mut spectrum = a;
    ifftshift(&mut spectrum);
    let s = ifft(&spectrum);

    // Horizontal axis in multiples of pi radians, one period each side.
    let x: Vec<f64> = (0..m)
        .map(|i| {
            if m > 1 {
                -1.0 + 2.0 * i as f64 / (m - 1) as f64
            } else {
                -1.0
            }
        })
        .collect();
    if figs.final_real() {
        let y: Vec<f64> = s.iter().map(|v| v.re).collect();
        paths.push(session.plot_line(&x, &y, &line_opts("4", YLimits::Auto))?);
    }
    if figs.final_imag() {
        let y: Vec<f64> = s.iter().map(|v| v.im).collect();
        paths.push(session.plot_line(&x, &y, &line_opts("5", YLimits::Auto))?);
    }
    if figs.final_amplitude() {
        let y: Vec<f64> = s.iter().map(|v| v.norm()).collect();
        paths.push(session.plot_line(&x, &y, &line_opts("6", YLimits::Lower(0.0)))?);
    }
    if figs.final_phase() {
        let y: Vec<f64> = s.iter().map(|v| v.arg()).collect();
        paths.push(session.plot_line(&x, &y, &line_opts("7", YLimits::Range(-PI, PI)))?);
        let y: Vec<f64> = s.iter().map(|v| quantize_phase(v.arg())).collect();
        paths.push(session.plot_line(
            &x,
            &y,
            &line_opts("8", YLimits::Range(0.0, 2.0 * PI)),
        )?);
    }
    Ok(paths)
}

fn line_opts(suffix: &str, ylims: YLimits) -> LineOptions {
    LineOptions {
        ylims,
        markers: true,
        save_suffix: Some(suffix.to_string()),
        ..LineOptions::default()
    }
}

/// Plot axis centered on zero: `-floor(M/2) .. ceil(M/2)`.
fn centered_axis(m: usize) -> Vec<f64> {
    let half = (m / 2) as i64;
    (-half..(m as i64 - half)).map(|i| i as f64).collect()
}

/// Map a phase angle into `[0, 2*pi)` and quantize to 1000 levels so that
/// rounding error cannot make both 0 and 2*pi appear in the same plot.
fn quantize_phase(angle: f64) -> f64 {
    const LEVELS: f64 = 1000.0;
    let two_pi = 2.0 * PI;
    let wrapped = angle.rem_euclid(two_pi);
    let q = two_pi / LEVELS;
    ((wrapped / q).round() * q).rem_euclid(two_pi)
}

// ── 2D sinusoids ───────────────────────────────────────────────────────────

/// Display a 2D sinusoid with vertical and horizontal spatial frequency
/// parameters `u` and `v` alongside the amplitude of its Fourier transform.
///
/// Returns the sinusoid image.
pub fn image_sinusoid(
    session: &mut DisplaySession,
    u: f64,
    v: f64,
    shape: (usize, usize),
    amplitude: f64,
) -> Result<Array2<f64>, SinusoidError> {
    let f = Array2::from_shape_fn(shape, |(r, c)| {
        amplitude * (u * r as f64 + v * c as f64).sin()
    });
    session.show_image(
        Some(&f),
        &ShowOptions {
            title: Some("Sinusoid".into()),
            cmap: Some("grey".into()),
            subplot: SubplotRequest::Grid { rows: 1, cols: 2 },
            new_subplot_fig: true,
            normalize: false,
            ..ShowOptions::default()
        },
    )?;
    let spectrum = fftshift2(&fft2(&f.mapv(|v| Complex64::new(v, 0.0))));
    let ampl = spectrum.mapv(|v| v.norm());
    session.show_image(
        Some(&ampl),
        &ShowOptions {
            title: Some("Amplitude of FT of sinusoid".into()),
            cmap: Some("grey".into()),
            normalize: false,
            ..ShowOptions::default()
        },
    )?;
    Ok(f)
}

/// Insert impulse pairs symmetrically about the center of a 2D spectrum and
/// display the impulses beside the real part of their inverse transform.
///
/// Each `(dy, dx)` offset implies a second impulse mirrored through the
/// center. Returns the space-domain reconstruction.
pub fn image_impulses(
    session: &mut DisplaySession,
    offsets: &[(i64, i64)],
    shape: (usize, usize),
    amplitude: Complex64,
) -> Result<Array2<Complex64>, SinusoidError> {
    let (rows, cols) = shape;
    let origin = ((rows / 2) as i64, ((cols / 2) as i64));
    let mut a = Array2::from_elem(shape, Complex64::new(0.0, 0.0));
    for &(dy, dx) in offsets {
        let r = origin.0 + dy;
        let c = origin.1 + dx;
        if r < 0 || c < 0 || r >= rows as i64 || c >= cols as i64 {
            return Err(SinusoidError::ImpulseOutOfRange { offset: (dy, dx) });
        }
        a[(r as usize, c as usize)] = amplitude;
    }
    // Mirror every impulse through the center (a 180-degree rotation).
    let mirrored = Array2::from_shape_fn(shape, |(i, j)| a[(rows - 1 - i, cols - 1 - j)]);
    Zip::from(&mut a).and(&mirrored).for_each(|v, &m| *v += m);

    session.show_image(
        Some(&a.mapv(|v| v.norm())),
        &ShowOptions {
            title: Some("Amplitude of impulses".into()),
            cmap: Some("grey".into()),
            subplot: SubplotRequest::Grid { rows: 1, cols: 2 },
            new_subplot_fig: true,
            normalize: false,
            ..ShowOptions::default()
        },
    )?;
    let s = ifft2(&ifftshift2(&a));
    session.show_image(
        Some(&s.mapv(|v| v.re)),
        &ShowOptions {
            title: Some("Real of FT of impulses".into()),
            cmap: Some("grey".into()),
            normalize: false,
            colorbar: Colorbar::Standard,
            ..ShowOptions::default()
        },
    )?;
    Ok(s)
}

/// Reconstruct the space domain of selected pixels of a centered spectrum.
///
/// With a session, shows the masked spectrum amplitude and the real and
/// imaginary parts of the reconstruction in a 1x3 grid. Returns the
/// space-domain array.
pub fn single_pixel(
    session: Option<&mut DisplaySession>,
    spectrum: &Array2<Complex64>,
    coords: &[(usize, usize)],
) -> Result<Array2<Complex64>, SinusoidError> {
    let (rows, cols) = spectrum.dim();
    let mut masked = Array2::from_elem(spectrum.dim(), Complex64::new(0.0, 0.0));
    for &(r, c) in coords {
        if r >= rows || c >= cols {
            return Err(SinusoidError::ImpulseOutOfRange {
                offset: (r as i64, c as i64),
            });
        }
        masked[(r, c)] = spectrum[(r, c)];
    }
    let s = ifft2(&ifftshift2(&masked));
    if let Some(session) = session {
        let title = if coords.len() <= 3 {
            format!("Amplitude pixels at {coords:?}")
        } else {
            format!("Amplitude pixels ({} of)", coords.len())
        };
        session.show_image(
            Some(&masked.mapv(|v| v.norm())),
            &ShowOptions {
                title: Some(title),
                cmap: Some("grey".into()),
                subplot: SubplotRequest::Grid { rows: 1, cols: 3 },
                new_subplot_fig: true,
                ..ShowOptions::default()
            },
        )?;
        session.show_image(
            Some(&s.mapv(|v| v.re)),
            &ShowOptions {
                title: Some("Real part of inverse FT".into()),
                cmap: Some("grey".into()),
                ..ShowOptions::default()
            },
        )?;
        session.show_image(
            Some(&s.mapv(|v| v.im)),
            &ShowOptions {
                title: Some("Imag part of inverse FT".into()),
                cmap: Some("grey".into()),
                ..ShowOptions::default()
            },
        )?;
    }
    Ok(s)
}

/// View of a complex-valued accumulator rendered as a real image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccumulatorView {
    #[default]
    Amplitude,
    Phase,
    Real,
    Imag,
}

impl AccumulatorView {
    /// Accepts the usual spellings; anything unrecognized falls back to the
    /// amplitude view.
    pub fn parse(name: &str) -> Self {
        match name {
            "ampl" | "abs" => Self::Amplitude,
            "phase" | "phas" | "angle" => Self::Phase,
            "real" => Self::Real,
            "imag" => Self::Imag,
            _ => Self::Amplitude,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Amplitude => "ampl",
            Self::Phase => "phase",
            Self::Real => "real",
            Self::Imag => "imag",
        }
    }

    fn render(self, acc: &Array2<Complex64>) -> Array2<f64> {
        match self {
            Self::Amplitude => acc.mapv(|v| v.norm()),
            Self::Phase => acc.mapv(|v| v.arg()),
            Self::Real => acc.mapv(|v| v.re),
            Self::Imag => acc.mapv(|v| v.im),
        }
    }
}

/// Accumulate the space domain of growing random subsets of Fourier-domain
/// pixels into an animated GIF.
///
/// Frames are written under a `temp_files` directory beside the input image;
/// the animation lands beside the input as `<stem>_anim_<view>.gif`. The
/// first frame holds zero pixels and the last holds the full reconstruction.
/// Returns the animation path.
pub fn all_pixels(
    input: &Path,
    num_frames: usize,
    view: AccumulatorView,
    encoder: &dyn GifEncoder,
) -> Result<PathBuf, SinusoidError> {
    if num_frames < 2 {
        return Err(SinusoidError::TooFewFrames {
            requested: num_frames,
        });
    }
    let a = read_scaled(input)?;
    let spectrum = fftshift2(&fft2(&a.mapv(|v| Complex64::new(v, 0.0))));
    let (rows, cols) = spectrum.dim();

    let mut indices: Vec<(usize, usize)> = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .collect();
    indices.shuffle(&mut rand::thread_rng());

    // Cumulative pixel counts per frame, last frame holding every pixel.
    let total = indices.len();
    let step = total.div_ceil(num_frames - 1).max(1);
    let mut counts: Vec<usize> = (0..total).step_by(step).collect();
    counts.push(total);

    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let temp_dir = parent.join("temp_files");
    std::fs::create_dir_all(&temp_dir)?;
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());

    let mut acc = Array2::from_elem(spectrum.dim(), Complex64::new(0.0, 0.0));
    let mut frames = Vec::with_capacity(counts.len());
    let mut start = 0usize;
    for &count in &counts {
        let added = single_pixel(None, &spectrum, &indices[start..count])?;
        Zip::from(&mut acc).and(&added).for_each(|v, &x| *v += x);
        start = count;
        let frame_path = temp_dir.join(format!("{stem}_{count}.png"));
        write_scaled(&frame_path, &view.render(&acc))?;
        frames.push(frame_path);
    }

    let anim = parent.join(format!("{stem}_anim_{}.gif", view.suffix()));
    tracing::info!(frames = frames.len(), out = %anim.display(), "assembling animation");
    let written = encoder.encode(&frames, 200, &anim)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gif::InProcessGifEncoder;
    use approx::assert_abs_diff_eq;

    fn session(dir: &Path) -> DisplaySession {
        crate::test_utils::scratch_session(dir)
    }

    #[test]
    fn quantized_phase_never_reaches_two_pi() {
        assert_abs_diff_eq!(quantize_phase(0.0), 0.0);
        assert_abs_diff_eq!(quantize_phase(2.0 * PI - 1e-9), 0.0);
        assert_abs_diff_eq!(quantize_phase(-1e-9), 0.0);
        assert_abs_diff_eq!(quantize_phase(PI), PI, epsilon = 1e-9);
    }

    #[test]
    fn centered_axis_spans_negative_to_positive() {
        assert_eq!(centered_axis(4), vec![-2.0, -1.0, 0.0, 1.0]);
        assert_eq!(centered_axis(5), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn figure_flags_parse_characters() {
        let f = FigureFlags::parse("rp");
        assert!(f.final_real() && f.final_phase());
        assert!(!f.final_imag() && !f.final_amplitude() && !f.all);
        assert!(FigureFlags::parse("a").all);
        assert_eq!(FigureFlags::parse(""), FigureFlags::none());
    }

    #[test]
    fn plot_sinusoid_writes_selected_figures() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(dir.path());
        let paths = plot_sinusoid(
            &s,
            &[SinusoidComponent::default()],
            64,
            FigureFlags::parse("r"),
        )
        .unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].exists());

        let paths = plot_sinusoid(&s, &[SinusoidComponent::default()], 64, FigureFlags::all())
            .unwrap();
        // Four impulse views, real, imag, amplitude and two phase figures.
        assert_eq!(paths.len(), 9);
    }

    #[test]
    fn zero_amplitude_component_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(dir.path());
        let bad = SinusoidComponent {
            amplitude: 0.0,
            ..SinusoidComponent::default()
        };
        assert!(matches!(
            plot_sinusoid(&s, &[bad], 64, FigureFlags::none()),
            Err(SinusoidError::ZeroAmplitude { index: 0 })
        ));
    }

    #[test]
    fn add_impulse_overwrites_symmetric_pair() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(dir.path());
        let mut a = vec![Complex64::new(0.0, 0.0); 32];
        let paths = add_impulse(&s, &mut a, 3, Complex64::new(16.0, 0.0)).unwrap();
        assert_eq!(a[13], Complex64::new(16.0, 0.0));
        assert_eq!(a[19], Complex64::new(16.0, 0.0));
        assert_eq!(paths.len(), 3);
        assert!(dir.path().join("graph2.png").exists());
    }

    #[test]
    fn image_sinusoid_evaluates_the_grid() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        let u = 0.5;
        let v = 0.25;
        let f = image_sinusoid(&mut s, u, v, (8, 8), 2.0).unwrap();
        assert_abs_diff_eq!(f[(0, 0)], 0.0);
        assert_abs_diff_eq!(f[(3, 5)], 2.0 * (u * 3.0 + v * 5.0).sin(), epsilon = 1e-12);
    }

    #[test]
    fn image_impulses_reconstructs_a_cosine() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        let m = 33usize;
        let freq = 2i64;
        let ampl = Complex64::new((m * m) as f64 / 2.0, 0.0);
        let rec = image_impulses(&mut s, &[(0, freq)], (m, m), ampl).unwrap();
        // A symmetric horizontal pair gives a horizontal cosine.
        for c in 0..m {
            let expect = (2.0 * PI * freq as f64 * c as f64 / m as f64).cos();
            assert_abs_diff_eq!(rec[(0, c)].re, expect, epsilon = 1e-9);
            assert_abs_diff_eq!(rec[(0, c)].im, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn single_center_pixel_gives_the_mean() {
        let a = Array2::from_elem((8, 8), Complex64::new(1.0, 0.0));
        let spectrum = fftshift2(&fft2(&a));
        let s = single_pixel(None, &spectrum, &[(4, 4)]).unwrap();
        for v in s.iter() {
            assert_abs_diff_eq!(v.re, 1.0, epsilon = 1e-9);
            assert_abs_diff_eq!(v.im, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn single_pixel_rejects_out_of_range_coordinates() {
        let spectrum = Array2::from_elem((4, 4), Complex64::new(1.0, 0.0));
        assert!(matches!(
            single_pixel(None, &spectrum, &[(4, 0)]),
            Err(SinusoidError::ImpulseOutOfRange { .. })
        ));
    }

    #[test]
    fn all_pixels_writes_frames_and_animation() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blob.png");
        let img = Array2::from_shape_fn((8, 8), |(i, j)| ((i + j) % 3) as f64 / 2.0);
        write_scaled(&input, &img).unwrap();

        let anim = all_pixels(&input, 3, AccumulatorView::Real, &InProcessGifEncoder).unwrap();
        assert_eq!(anim, dir.path().join("blob_anim_real.gif"));
        assert!(anim.exists());
        // First frame is empty, last holds every pixel.
        let temp = dir.path().join("temp_files");
        assert!(temp.join("blob_0.png").exists());
        assert!(temp.join("blob_64.png").exists());
    }

    #[test]
    fn animation_needs_two_frames() {
        let err = all_pixels(
            Path::new("missing.png"),
            1,
            AccumulatorView::Amplitude,
            &InProcessGifEncoder,
        );
        assert!(matches!(err, Err(SinusoidError::TooFewFrames { .. })));
    }

    #[test]
    fn view_names_fall_back_to_amplitude() {
        assert_eq!(AccumulatorView::parse("phas"), AccumulatorView::Phase);
        assert_eq!(AccumulatorView::parse("abs"), AccumulatorView::Amplitude);
        assert_eq!(AccumulatorView::parse("bogus"), AccumulatorView::Amplitude);
    }
}

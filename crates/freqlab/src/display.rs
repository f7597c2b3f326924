//! Display session management: line plots and incremental subplot grids.
//!
//! A [`DisplaySession`] owns the state that notebook-style plotting keeps in
//! process globals: whether subplot mode is engaged, the grid shape, and the
//! next slot to fill. Successive [`DisplaySession::show_image`] calls either
//! open fresh figures or populate slots of a shared grid in row-major order.
//! Every call re-renders the current figure and persists it as
//! `graph<suffix>.png`, overwriting any prior file of that name.
//!
//! Exceeding the grid capacity without requesting a new grid demotes the
//! session to single-figure mode; the demotion is reported through
//! [`SlotStatus`] rather than swallowed.

use std::path::{Path, PathBuf};

use image::{imageops, Rgb, RgbImage};
use ndarray::Array2;
use plotters::prelude::*;

use crate::imageio::rescale_intensity;

// ── Error type ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum DisplayError {
    /// `x` and `y` series lengths differ.
    LengthMismatch { x: usize, y: usize },
    /// Nothing to plot.
    EmptyData,
    /// A subplot grid dimension was zero.
    EmptyGrid { rows: usize, cols: usize },
    /// Failure in the underlying rendering backend.
    Render(String),
    /// Failure writing the figure file.
    Save(image::ImageError),
}

impl std::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch { x, y } => {
                write!(f, "series length mismatch: x has {x} points, y has {y}")
            }
            Self::EmptyData => write!(f, "no data points to plot"),
            Self::EmptyGrid { rows, cols } => {
                write!(f, "subplot grid ({rows}, {cols}) has no cells")
            }
            Self::Render(msg) => write!(f, "render failure: {msg}"),
            Self::Save(e) => write!(f, "figure save failure: {e}"),
        }
    }
}

impl std::error::Error for DisplayError {}

// ── Options ────────────────────────────────────────────────────────────────

/// Subplot behavior requested by a [`DisplaySession::show_image`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubplotRequest {
    /// Engage (or re-shape) subplot mode with the given grid.
    Grid { rows: usize, cols: usize },
    /// Leave subplot mode before the grid has filled.
    End,
    /// Keep whatever mode the session is currently in.
    #[default]
    Inherit,
}

/// Colorbar placement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Colorbar {
    #[default]
    None,
    /// Standard colorbar at the default fraction of the cell width.
    Standard,
    /// Inset colorbar occupying the given fraction of the cell width.
    Fraction(f64),
    /// Side axis sized to the given proportion of the image width.
    Side(f64),
}

/// Options for [`DisplaySession::show_image`].
#[derive(Debug, Clone)]
pub struct ShowOptions {
    /// Title metadata; figures are rendered without rasterized text so the
    /// bitmap backend carries no font dependencies.
    pub title: Option<String>,
    /// Colormap name; "gray"/"grey" in any case resolve to grayscale, and
    /// unrecognized names silently fall back to grayscale.
    pub cmap: Option<String>,
    pub colorbar: Colorbar,
    pub subplot: SubplotRequest,
    /// With a grid request, allocate a fresh figure and restart at slot 1.
    pub new_subplot_fig: bool,
    /// Rescale pixel intensities into `[0, 1]` before display.
    pub normalize: bool,
    /// Explicit display range; values outside are clamped. Without one the
    /// display autoscales to the data range whether or not `normalize` is
    /// set.
    pub display_range: Option<(f64, f64)>,
    /// Suffix for the persisted `graph<suffix>.png` file.
    pub save_suffix: Option<String>,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            title: None,
            cmap: None,
            colorbar: Colorbar::None,
            subplot: SubplotRequest::Inherit,
            new_subplot_fig: false,
            normalize: true,
            display_range: None,
            save_suffix: None,
        }
    }
}

/// What a [`DisplaySession::show_image`] call did with its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Rendered to a plain single figure.
    SingleFigure,
    /// Occupied the given 1-based slot of the active grid.
    Slot(usize),
    /// The grid was full and no new shape was requested; the session fell
    /// back to single-figure mode.
    CapacityExhausted,
    /// The requested slot fell outside the grid; the cell was left
    /// unpopulated and the session continued.
    SlotOutOfRange,
}

/// Axis scaling for line plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    SemiLogY,
    SemiLogX,
}

/// Vertical axis limit policy for line plots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum YLimits {
    /// Tight limits, widened to `(-1, 1)` when the data range is below 0.5
    /// so a signal of pure rounding error does not fill the frame.
    #[default]
    Auto,
    /// Fix the lower limit only.
    Lower(f64),
    /// Fix both limits.
    Range(f64, f64),
}

/// Options for [`DisplaySession::plot_line`].
#[derive(Debug, Clone)]
pub struct LineOptions {
    /// Title metadata; not rasterized.
    pub title: Option<String>,
    pub scale: AxisScale,
    pub ylims: YLimits,
    /// Draw a circle marker at each sample.
    pub markers: bool,
    pub color: (u8, u8, u8),
    pub save_suffix: Option<String>,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            title: None,
            scale: AxisScale::Linear,
            ylims: YLimits::Auto,
            markers: false,
            color: (0, 0, 255),
            save_suffix: None,
        }
    }
}

impl LineOptions {
    /// Interpret a compact format string such as `"b-"`, `"o-"` or `"rd-"`:
    /// one optional color letter (b/r/g/k) and an optional marker letter
    /// (o/d).
    pub fn from_format(format: &str) -> Self {
        let mut opts = Self::default();
        for ch in format.chars() {
            match ch {
                'b' => opts.color = (0, 0, 255),
                'r' => opts.color = (255, 0, 0),
                'g' => opts.color = (0, 128, 0),
                'k' => opts.color = (0, 0, 0),
                'o' | 'd' => opts.markers = true,
                _ => {}
            }
        }
        opts
    }
}

// ── Colormap ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Colormap {
    Gray,
}

impl Colormap {
    /// Case-insensitive resolution with "grey" aliasing; unknown names fall
    /// back to grayscale rather than failing the call.
    fn resolve(name: Option<&str>) -> Self {
        match name.map(|n| n.to_ascii_lowercase()).as_deref() {
            None | Some("gray" | "grey") => Self::Gray,
            Some(other) => {
                tracing::debug!(cmap = other, "unknown colormap, using grayscale");
                Self::Gray
            }
        }
    }

    fn map(self, v: f64) -> Rgb<u8> {
        let g = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb([g, g, g])
    }
}

// ── Session ────────────────────────────────────────────────────────────────

/// Configuration for a rendering session.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Directory receiving `graph<suffix>.png` files.
    pub output_dir: PathBuf,
    /// Pixel size of one subplot cell, `(width, height)`.
    pub cell_size: (u32, u32),
    /// Persist the figure after every call.
    pub save: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            cell_size: (320, 240),
            save: true,
        }
    }
}

struct Figure {
    rows: usize,
    cols: usize,
    cells: Vec<Option<RgbImage>>,
}

impl Figure {
    fn single() -> Self {
        Self::grid(1, 1)
    }

    fn grid(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Re-shape the grid in place, keeping already-drawn cells in slot order.
    fn relayout(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.cells.resize(rows * cols, None);
    }
}

/// Stateful display manager; one per rendering context.
pub struct DisplaySession {
    cfg: DisplayConfig,
    subplot_active: bool,
    grid_rows: usize,
    grid_cols: usize,
    next_slot: usize,
    figure: Figure,
}

impl DisplaySession {
    pub fn new(cfg: DisplayConfig) -> Self {
        Self {
            cfg,
            subplot_active: false,
            grid_rows: 0,
            grid_cols: 0,
            next_slot: 0,
            figure: Figure::single(),
        }
    }

    pub fn is_subplot_active(&self) -> bool {
        self.subplot_active
    }

    pub fn next_slot(&self) -> usize {
        self.next_slot
    }

    /// Discard the current figure and leave subplot mode.
    pub fn close(&mut self) {
        self.subplot_active = false;
        self.grid_rows = 0;
        self.grid_cols = 0;
        self.next_slot = 0;
        self.figure = Figure::single();
    }

    /// Render a 2D image into the session.
    ///
    /// `None` renders a blank placeholder slot, used to skip a subplot cell
    /// intentionally.
    pub fn show_image(
        &mut self,
        image: Option<&Array2<f64>>,
        opts: &ShowOptions,
    ) -> Result<SlotStatus, DisplayError> {
        let mut capacity_exhausted = false;
        match opts.subplot {
            SubplotRequest::Grid { rows, cols } => {
                if rows == 0 || cols == 0 {
                    return Err(DisplayError::EmptyGrid { rows, cols });
                }
                if opts.new_subplot_fig {
                    self.figure = Figure::grid(rows, cols);
                    self.next_slot = 1;
                } else {
                    if self.subplot_active {
                        // A layout change mid-figure may require smaller
                        // subplots than before; leave space so previous
                        // cells are not overwritten.
                        if self.grid_rows < rows {
                            self.next_slot += cols;
                        } else if self.grid_cols < cols {
                            self.next_slot += 1;
                        }
                    } else {
                        self.next_slot = 1;
                    }
                    self.figure.relayout(rows, cols);
                }
                self.grid_rows = rows;
                self.grid_cols = cols;
                self.subplot_active = true;
            }
            SubplotRequest::End => {
                self.subplot_active = false;
                self.figure = Figure::single();
            }
            SubplotRequest::Inherit => {
                if !self.subplot_active {
                    self.figure = Figure::single();
                } else if self.next_slot > self.grid_rows * self.grid_cols {
                    // Grid already filled and no new shape given: end
                    // subplot mode for this and subsequent calls.
                    self.subplot_active = false;
                    self.figure = Figure::single();
                    capacity_exhausted = true;
                } else if opts.new_subplot_fig {
                    self.figure = Figure::grid(self.grid_rows, self.grid_cols);
                    self.next_slot = 1;
                }
            }
        }

        let cell = match image {
            Some(im) => self.render_cell(im, opts),
            None => self.blank_cell(),
        };

        let status = if self.subplot_active {
            let capacity = self.grid_rows * self.grid_cols;
            if self.next_slot == 0 || self.next_slot > capacity {
                tracing::warn!(
                    slot = self.next_slot,
                    capacity,
                    "subplot slot out of range; leaving cell unpopulated"
                );
                SlotStatus::SlotOutOfRange
            } else {
                self.figure.cells[self.next_slot - 1] = Some(cell);
                let occupied = self.next_slot;
                self.next_slot += 1;
                SlotStatus::Slot(occupied)
            }
        } else {
            self.figure.cells[0] = Some(cell);
            if capacity_exhausted {
                SlotStatus::CapacityExhausted
            } else {
                SlotStatus::SingleFigure
            }
        };

        if self.cfg.save {
            self.save_figure(opts.save_suffix.as_deref())?;
        }
        Ok(status)
    }

    /// Render `y` against `x` as a standalone line plot figure and persist it
    /// as `graph<suffix>.png`. Line plots do not participate in subplot mode.
    pub fn plot_line(
        &self,
        x: &[f64],
        y: &[f64],
        opts: &LineOptions,
    ) -> Result<PathBuf, DisplayError> {
        if x.len() != y.len() {
            return Err(DisplayError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(DisplayError::EmptyData);
        }
        let path = self.graph_path(opts.save_suffix.as_deref());
        draw_line_chart(&path, x, y, opts)?;
        Ok(path)
    }

    fn graph_path(&self, suffix: Option<&str>) -> PathBuf {
        self.cfg
            .output_dir
            .join(format!("graph{}.png", suffix.unwrap_or("")))
    }

    fn blank_cell(&self) -> RgbImage {
        let (w, h) = self.cfg.cell_size;
        RgbImage::from_pixel(w, h, Rgb([255, 255, 255]))
    }

    fn render_cell(&self, im: &Array2<f64>, opts: &ShowOptions) -> RgbImage {
        let cmap = Colormap::resolve(opts.cmap.as_deref());
        let base = if opts.normalize {
            rescale_intensity(im)
        } else {
            im.clone()
        };
        let data = match opts.display_range {
            Some((lo, hi)) => {
                let span = if hi > lo { hi - lo } else { 1.0 };
                base.mapv(|v| ((v - lo) / span).clamp(0.0, 1.0))
            }
            None => rescale_intensity(&base),
        };

        let (cell_w, cell_h) = self.cfg.cell_size;
        let mut canvas = self.blank_cell();
        if data.is_empty() || cell_w == 0 || cell_h == 0 {
            return canvas;
        }

        // Reserve horizontal space for the colorbar before fitting the image.
        let bar_w = match opts.colorbar {
            Colorbar::None => 0,
            Colorbar::Standard => (cell_w as f64 * 0.15) as u32,
            Colorbar::Fraction(frac) => (cell_w as f64 * frac.clamp(0.0, 0.9)) as u32,
            Colorbar::Side(prop) => (cell_w as f64 * prop.clamp(0.0, 0.9)) as u32,
        };
        let area_w = cell_w.saturating_sub(bar_w).max(1);

        let (rows, cols) = data.dim();
        let mut pixel = RgbImage::new(cols as u32, rows as u32);
        for ((i, j), &v) in data.indexed_iter() {
            pixel.put_pixel(j as u32, i as u32, cmap.map(v));
        }

        // Fit preserving aspect ratio, nearest-neighbour so hard filter
        // edges stay hard.
        let scale = (area_w as f64 / cols as f64).min(cell_h as f64 / rows as f64);
        let fit_w = ((cols as f64 * scale) as u32).max(1);
        let fit_h = ((rows as f64 * scale) as u32).max(1);
        let resized = imageops::resize(&pixel, fit_w, fit_h, imageops::FilterType::Nearest);
        let off_x = (area_w - fit_w.min(area_w)) / 2;
        let off_y = (cell_h - fit_h.min(cell_h)) / 2;
        imageops::overlay(&mut canvas, &resized, off_x as i64, off_y as i64);

        if bar_w > 0 {
            draw_colorbar(&mut canvas, cmap, cell_w - bar_w, bar_w, cell_h);
        }
        canvas
    }

    fn save_figure(&self, suffix: Option<&str>) -> Result<(), DisplayError> {
        let (cell_w, cell_h) = self.cfg.cell_size;
        let width = (self.figure.cols as u32 * cell_w).max(1);
        let height = (self.figure.rows as u32 * cell_h).max(1);
        let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        for (idx, cell) in self.figure.cells.iter().enumerate() {
            if let Some(cell) = cell {
                let x = (idx % self.figure.cols) as u32 * cell_w;
                let y = (idx / self.figure.cols) as u32 * cell_h;
                imageops::overlay(&mut canvas, cell, x as i64, y as i64);
            }
        }
        canvas
            .save(self.graph_path(suffix))
            .map_err(DisplayError::Save)
    }
}

/// Vertical gradient strip: colormap maximum at the top.
fn draw_colorbar(canvas: &mut RgbImage, cmap: Colormap, x0: u32, width: u32, height: u32) {
    let inset = width / 4;
    for y in 0..height {
        let v = 1.0 - y as f64 / (height.max(1)) as f64;
        let px = cmap.map(v);
        for x in (x0 + inset)..(x0 + width.saturating_sub(inset / 2)).min(canvas.width()) {
            canvas.put_pixel(x, y, px);
        }
    }
}

// ── Line chart rendering ───────────────────────────────────────────────────

fn draw_line_chart(
    path: &Path,
    x: &[f64],
    y: &[f64],
    opts: &LineOptions,
) -> Result<(), DisplayError> {
    let (x_min, x_max) = padded_range(series_range(x), 0.0);
    let y_range = match opts.ylims {
        YLimits::Range(lo, hi) => (lo, hi),
        YLimits::Lower(lo) => (lo, series_range(y).1.max(lo + f64::EPSILON)),
        YLimits::Auto => {
            let (lo, hi) = series_range(y);
            if hi - lo < 0.5 {
                (-1.0, 1.0)
            } else {
                (lo, hi)
            }
        }
    };
    let (y_min, y_max) = padded_range(y_range, 0.0);

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let color = RGBColor(opts.color.0, opts.color.1, opts.color.2);
    let points = || x.iter().copied().zip(y.iter().copied());

    // Grid and axis labels are skipped to keep the bitmap backend free of
    // font dependencies.
    match opts.scale {
        AxisScale::Linear => {
            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .x_label_area_size(30)
                .y_label_area_size(40)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)
                .map_err(render_err)?;
            chart
                .draw_series(LineSeries::new(points(), color.stroke_width(2)))
                .map_err(render_err)?;
            if opts.markers {
                chart
                    .draw_series(points().map(|p| Circle::new(p, 3, color.filled())))
                    .map_err(render_err)?;
            }
        }
        AxisScale::SemiLogY => {
            let y_lo = positive_floor(y, y_min);
            let y_hi = y_max.max(y_lo * 10.0);
            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .x_label_area_size(30)
                .y_label_area_size(40)
                .build_cartesian_2d(x_min..x_max, (y_lo..y_hi).log_scale())
                .map_err(render_err)?;
            chart
                .draw_series(LineSeries::new(points(), color.stroke_width(2)))
                .map_err(render_err)?;
            if opts.markers {
                chart
                    .draw_series(points().map(|p| Circle::new(p, 3, color.filled())))
                    .map_err(render_err)?;
            }
        }
        AxisScale::SemiLogX => {
            let x_lo = positive_floor(x, x_min);
            let x_hi = x_max.max(x_lo * 10.0);
            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .x_label_area_size(30)
                .y_label_area_size(40)
                .build_cartesian_2d((x_lo..x_hi).log_scale(), y_min..y_max)
                .map_err(render_err)?;
            chart
                .draw_series(LineSeries::new(points(), color.stroke_width(2)))
                .map_err(render_err)?;
            if opts.markers {
                chart
                    .draw_series(points().map(|p| Circle::new(p, 3, color.filled())))
                    .map_err(render_err)?;
            }
        }
    }
    root.present().map_err(render_err)?;
    Ok(())
}

fn series_range(v: &[f64]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &x in v {
        if x.is_finite() {
            lo = lo.min(x);
            hi = hi.max(x);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        (0.0, 1.0)
    } else {
        (lo, hi)
    }
}

fn padded_range((lo, hi): (f64, f64), pad: f64) -> (f64, f64) {
    if hi > lo {
        (lo - pad, hi + pad)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

fn positive_floor(v: &[f64], fallback: f64) -> f64 {
    let smallest = v
        .iter()
        .copied()
        .filter(|x| *x > 0.0)
        .fold(f64::INFINITY, f64::min);
    if smallest.is_finite() {
        smallest
    } else {
        fallback.max(1e-12)
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> DisplayError {
    DisplayError::Render(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn session(dir: &Path) -> DisplaySession {
        crate::test_utils::scratch_session(dir)
    }

    fn ramp() -> Array2<f64> {
        crate::test_utils::ramp((8, 8))
    }

    fn grid22() -> ShowOptions {
        ShowOptions {
            subplot: SubplotRequest::Grid { rows: 2, cols: 2 },
            ..ShowOptions::default()
        }
    }

    #[test]
    fn grid_fills_in_slot_order_then_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        let im = ramp();

        let first = ShowOptions {
            new_subplot_fig: true,
            ..grid22()
        };
        assert_eq!(s.show_image(Some(&im), &first).unwrap(), SlotStatus::Slot(1));
        assert_eq!(
            s.show_image(Some(&im), &grid22()).unwrap(),
            SlotStatus::Slot(2)
        );
        assert_eq!(
            s.show_image(Some(&im), &grid22()).unwrap(),
            SlotStatus::Slot(3)
        );
        // Fourth call inherits the active grid.
        assert_eq!(
            s.show_image(Some(&im), &ShowOptions::default()).unwrap(),
            SlotStatus::Slot(4)
        );
        // Fifth call finds the grid full and demotes to single-figure mode.
        assert_eq!(
            s.show_image(Some(&im), &ShowOptions::default()).unwrap(),
            SlotStatus::CapacityExhausted
        );
        assert!(!s.is_subplot_active());
        assert_eq!(
            s.show_image(Some(&im), &ShowOptions::default()).unwrap(),
            SlotStatus::SingleFigure
        );
        assert!(dir.path().join("graph.png").exists());
    }

    #[test]
    fn inactive_session_renders_single_figures() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        let status = s.show_image(Some(&ramp()), &ShowOptions::default()).unwrap();
        assert_eq!(status, SlotStatus::SingleFigure);
        assert!(!s.is_subplot_active());
    }

    #[test]
    fn end_request_leaves_subplot_mode_early() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        let im = ramp();
        s.show_image(
            Some(&im),
            &ShowOptions {
                new_subplot_fig: true,
                ..grid22()
            },
        )
        .unwrap();
        assert!(s.is_subplot_active());
        let status = s
            .show_image(
                Some(&im),
                &ShowOptions {
                    subplot: SubplotRequest::End,
                    ..ShowOptions::default()
                },
            )
            .unwrap();
        assert_eq!(status, SlotStatus::SingleFigure);
        assert!(!s.is_subplot_active());
    }

    #[test]
    fn growing_grid_rows_skips_a_row_defensively() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        let im = ramp();
        s.show_image(
            Some(&im),
            &ShowOptions {
                subplot: SubplotRequest::Grid { rows: 1, cols: 3 },
                new_subplot_fig: true,
                ..ShowOptions::default()
            },
        )
        .unwrap();
        // Requesting more rows mid-figure skips a whole row of slots.
        let status = s
            .show_image(
                Some(&im),
                &ShowOptions {
                    subplot: SubplotRequest::Grid { rows: 2, cols: 3 },
                    ..ShowOptions::default()
                },
            )
            .unwrap();
        assert_eq!(status, SlotStatus::Slot(5));
    }

    #[test]
    fn out_of_range_slot_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        let im = ramp();
        s.show_image(
            Some(&im),
            &ShowOptions {
                subplot: SubplotRequest::Grid { rows: 1, cols: 1 },
                new_subplot_fig: true,
                ..ShowOptions::default()
            },
        )
        .unwrap();
        // Re-engaging a 1x2 grid after filling slot 1 advances past capacity.
        let status = s
            .show_image(
                Some(&im),
                &ShowOptions {
                    subplot: SubplotRequest::Grid { rows: 1, cols: 2 },
                    ..ShowOptions::default()
                },
            )
            .unwrap();
        assert_eq!(status, SlotStatus::SlotOutOfRange);
    }

    #[test]
    fn blank_placeholder_occupies_a_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        s.show_image(
            Some(&ramp()),
            &ShowOptions {
                new_subplot_fig: true,
                ..grid22()
            },
        )
        .unwrap();
        assert_eq!(
            s.show_image(None, &ShowOptions::default()).unwrap(),
            SlotStatus::Slot(2)
        );
        assert_eq!(
            s.show_image(Some(&ramp()), &ShowOptions::default()).unwrap(),
            SlotStatus::Slot(3)
        );
    }

    #[test]
    fn zero_grid_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        let result = s.show_image(
            Some(&ramp()),
            &ShowOptions {
                subplot: SubplotRequest::Grid { rows: 0, cols: 2 },
                ..ShowOptions::default()
            },
        );
        assert!(matches!(result, Err(DisplayError::EmptyGrid { .. })));
    }

    #[test]
    fn save_suffix_names_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        s.show_image(
            Some(&ramp()),
            &ShowOptions {
                save_suffix: Some("42".into()),
                ..ShowOptions::default()
            },
        )
        .unwrap();
        assert!(dir.path().join("graph42.png").exists());
    }

    #[test]
    fn plot_line_writes_figure_and_validates_lengths() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(dir.path());
        let x: Vec<f64> = (0..32).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| (v / 4.0).sin()).collect();
        let path = s
            .plot_line(&x, &y, &LineOptions::from_format("ro-"))
            .unwrap();
        assert!(path.exists());

        let err = s.plot_line(&x, &y[..10], &LineOptions::default());
        assert!(matches!(
            err,
            Err(DisplayError::LengthMismatch { x: 32, y: 10 })
        ));
    }

    #[test]
    fn close_resets_session_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        s.show_image(
            Some(&ramp()),
            &ShowOptions {
                new_subplot_fig: true,
                ..grid22()
            },
        )
        .unwrap();
        s.close();
        assert!(!s.is_subplot_active());
        assert_eq!(s.next_slot(), 0);
    }
}

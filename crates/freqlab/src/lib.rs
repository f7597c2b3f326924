//! freqlab — array windowing, Fourier filtering and display tooling for
//! signal/image-processing demos.
//!
//! The building blocks compose into two demo pipelines:
//!
//! 1. **Window** – centered crop/pad/shift of 2D arrays with a floor-division
//!    centering convention.
//! 2. **Mask / Filter** – boolean disc masks and hard-edged circular or
//!    oriented-band frequency filters.
//! 3. **FFT** – 1D/2D transforms and center-shift helpers.
//! 4. **Display** – a stateful session that fills subplot grids
//!    incrementally and renders line plots, persisting `graph<suffix>.png`
//!    figures.
//! 5. **Demo** – the spatial-filtering driver: transform, filter multiply,
//!    inverse transform, show and save.
//! 6. **Sinusoid** – impulse-pair synthesis demos, single-pixel
//!    reconstruction, and the animated all-pixels reconstruction assembled
//!    through a GIF encoder.
//!
//! # Public API
//! Entry points are re-exported at the crate root: [`resize_window`],
//! [`disc`], [`disc_filter`], [`DisplaySession`], [`spatial_filtering_demo`]
//! and the sinusoid demos.

pub mod demo;
pub mod display;
pub mod fft;
pub mod filter;
pub mod gif;
pub mod imageio;
pub mod mask;
pub mod numeric;
pub mod sinusoid;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod window;

pub use demo::{
    spatial_filtering_demo, DemoConfig, DemoError, DemoInput, FilterKind, FilterPolarity,
    ShowPolicy,
};
pub use display::{
    AxisScale, Colorbar, DisplayConfig, DisplayError, DisplaySession, LineOptions, ShowOptions,
    SlotStatus, SubplotRequest, YLimits,
};
pub use fft::{fft, fft2, fftshift, fftshift2, ifft, ifft2, ifftshift, ifftshift2};
pub use filter::{disc_filter, oriented_band};
pub use gif::{GifEncoder, GifError, InProcessGifEncoder, MagickGifEncoder};
pub use imageio::{read_scaled, rescale_intensity, write_scaled, ImageIoError};
pub use mask::disc;
pub use numeric::ScalarOrPair;
pub use sinusoid::{
    add_impulse, all_pixels, image_impulses, image_sinusoid, plot_sinusoid, single_pixel,
    AccumulatorView, FigureFlags, SinusoidComponent, SinusoidError,
};
pub use window::{resize_window, roll_2d, shift, WindowError, WindowParams};

//! GIF assembly from rendered animation frames.
//!
//! Two encoders sit behind one trait: [`MagickGifEncoder`] shells out to the
//! ImageMagick `convert` tool, [`InProcessGifEncoder`] encodes with the image
//! library and needs no external binary. Callers pick one and hand it an
//! ordered frame list.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::codecs::gif::{GifEncoder as ImageGifEncoder, Repeat};
use image::{Delay, Frame};

// ── Error type ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum GifError {
    /// The frame list was empty.
    NoFrames,
    /// The external tool is not installed or not on the search path.
    ToolNotFound { tool: String },
    /// The external tool ran but exited unsuccessfully.
    ToolFailed { tool: String, code: Option<i32> },
    /// Spawn or file I/O failure.
    Io(std::io::Error),
    /// Frame decode or GIF encode failure.
    Image(image::ImageError),
}

impl std::fmt::Display for GifError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFrames => write!(f, "no frames to assemble"),
            Self::ToolNotFound { tool } => write!(f, "`{tool}` not found on this system"),
            Self::ToolFailed { tool, code } => match code {
                Some(code) => write!(f, "`{tool}` exited with status {code}"),
                None => write!(f, "`{tool}` terminated by signal"),
            },
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Image(e) => write!(f, "image codec error: {e}"),
        }
    }
}

impl std::error::Error for GifError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GifError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for GifError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

// ── Encoders ───────────────────────────────────────────────────────────────

/// Capability for assembling still frames into an animated GIF.
pub trait GifEncoder {
    /// Assemble `frames` (in order, uniform delay) into `out`. Returns the
    /// path of the written file.
    fn encode(&self, frames: &[PathBuf], delay_ms: u64, out: &Path) -> Result<PathBuf, GifError>;
}

/// Encoder backed by the ImageMagick `convert` command-line tool.
#[derive(Debug, Default)]
pub struct MagickGifEncoder;

/// GIF frame delays are expressed in centiseconds; round up so a requested
/// delay is never shortened.
fn delay_centiseconds(delay_ms: u64) -> u64 {
    (delay_ms + 9) / 10
}

impl GifEncoder for MagickGifEncoder {
    fn encode(&self, frames: &[PathBuf], delay_ms: u64, out: &Path) -> Result<PathBuf, GifError> {
        if frames.is_empty() {
            return Err(GifError::NoFrames);
        }
        let tool = "convert";
        let status = Command::new(tool)
            .arg("-delay")
            .arg(delay_centiseconds(delay_ms).to_string())
            .args(frames)
            .arg(out)
            .status()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    tracing::warn!("ImageMagick `{tool}` is not installed; no GIF written");
                    GifError::ToolNotFound { tool: tool.into() }
                } else {
                    GifError::Io(e)
                }
            })?;
        if !status.success() {
            tracing::warn!(code = ?status.code(), "`{tool}` failed to assemble {}", out.display());
            return Err(GifError::ToolFailed {
                tool: tool.into(),
                code: status.code(),
            });
        }
        Ok(out.to_path_buf())
    }
}

/// Encoder using the image library's GIF codec; no external tool needed.
#[derive(Debug, Default)]
pub struct InProcessGifEncoder;

impl GifEncoder for InProcessGifEncoder {
    fn encode(&self, frames: &[PathBuf], delay_ms: u64, out: &Path) -> Result<PathBuf, GifError> {
        if frames.is_empty() {
            return Err(GifError::NoFrames);
        }
        let writer = BufWriter::new(File::create(out)?);
        let mut encoder = ImageGifEncoder::new(writer);
        encoder.set_repeat(Repeat::Infinite)?;
        let delay = Delay::from_numer_denom_ms(delay_centiseconds(delay_ms) as u32 * 10, 1);
        for path in frames {
            let rgba = image::open(path)?.into_rgba8();
            encoder.encode_frame(Frame::from_parts(rgba, 0, 0, delay))?;
        }
        Ok(out.to_path_buf())
    }
}

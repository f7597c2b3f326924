//! freqlab CLI — command-line driver for the spatial filtering and sinusoid
//! demos.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use num_complex::Complex64;
use serde::Serialize;

use freqlab::{
    all_pixels, image_impulses, plot_sinusoid, spatial_filtering_demo, AccumulatorView,
    DemoConfig, DemoInput, DisplayConfig, DisplaySession, FigureFlags, FilterKind, FilterPolarity,
    InProcessGifEncoder, MagickGifEncoder, ShowPolicy, SinusoidComponent,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "freqlab")]
#[command(about = "Hard-edged spatial frequency filtering and sinusoid synthesis demos")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spatially filter an image with a circular or oriented-band filter.
    Filter(CliFilterArgs),

    /// Plot the sum of sinusoids synthesized from impulse pairs.
    Sinusoid(CliSinusoidArgs),

    /// Place impulse pairs in a 2D spectrum and show the reconstruction.
    Impulses(CliImpulsesArgs),

    /// Animate the pixel-by-pixel reconstruction of an image from its
    /// Fourier spectrum.
    Reconstruct(CliReconstructArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFilterFamily {
    /// Remove or retain Fourier components by frequency (circular aperture).
    Freq,
    /// Remove or retain Fourier components by orientation (rotated band).
    Orient,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPolarity {
    /// High-pass: aperture value 0.
    Hp,
    /// Low-pass: aperture value 1.
    Lp,
}

impl From<CliPolarity> for FilterPolarity {
    fn from(p: CliPolarity) -> Self {
        match p {
            CliPolarity::Hp => FilterPolarity::HighPass,
            CliPolarity::Lp => FilterPolarity::LowPass,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliShow {
    All,
    Final,
    None,
}

impl From<CliShow> for ShowPolicy {
    fn from(s: CliShow) -> Self {
        match s {
            CliShow::All => ShowPolicy::All,
            CliShow::Final => ShowPolicy::FinalOnly,
            CliShow::None => ShowPolicy::None,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct CliFilterArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Filter family.
    #[arg(long, value_enum, default_value = "freq")]
    demo: CliFilterFamily,

    /// Aperture radius as a proportion of the smaller image axis (freq) or
    /// band angle in degrees (orient).
    #[arg(long, default_value = "0.2")]
    param: f64,

    /// Filter polarity.
    #[arg(long, value_enum, default_value = "hp")]
    polarity: CliPolarity,

    /// Which pipeline stages to render.
    #[arg(long, value_enum, default_value = "all")]
    show: CliShow,

    /// Attach colorbars to the original and filter figures.
    #[arg(long)]
    colorbars: bool,

    /// Directory receiving the rendered figures.
    #[arg(long, default_value = ".")]
    figure_dir: PathBuf,

    /// Path to write the filtered image (parameters are stamped into the
    /// filename).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Path to write a JSON report of the run.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct CliSinusoidArgs {
    /// Off-center distances (periods); repeat for multiple components.
    #[arg(long, default_values_t = [1usize])]
    ocd: Vec<usize>,

    /// Sinusoid amplitudes, one per component (defaults to 1 each).
    #[arg(long)]
    amplitude: Vec<f64>,

    /// Array length.
    #[arg(long, default_value = "1024")]
    length: usize,

    /// Figure flags: 'a' all, 'f' finals, 'r' real, 'i' imaginary,
    /// 'm' amplitude, 'p' phase.
    #[arg(long, default_value = "a")]
    figs: String,

    /// Directory receiving the rendered figures.
    #[arg(long, default_value = ".")]
    figure_dir: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct CliImpulsesArgs {
    /// Impulse offsets from the spectrum center as `dy,dx`; repeatable.
    /// Each offset implies a mirrored partner.
    #[arg(long, value_parser = parse_offset, required = true)]
    offset: Vec<(i64, i64)>,

    /// Image height.
    #[arg(long, default_value = "1023")]
    rows: usize,

    /// Image width.
    #[arg(long, default_value = "1023")]
    cols: usize,

    /// Impulse value.
    #[arg(long, default_value = "1.0")]
    amplitude: f64,

    /// Directory receiving the rendered figures.
    #[arg(long, default_value = ".")]
    figure_dir: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct CliReconstructArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Number of animation frames (at least 2).
    #[arg(long, default_value = "4")]
    frames: usize,

    /// View of the complex accumulator: ampl, phase, real or imag.
    #[arg(long, default_value = "ampl")]
    view: String,

    /// Assemble the GIF in process instead of shelling out to ImageMagick.
    #[arg(long)]
    in_process: bool,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filter(args) => run_filter(&args),
        Commands::Sinusoid(args) => run_sinusoid(&args),
        Commands::Impulses(args) => run_impulses(&args),
        Commands::Reconstruct(args) => run_reconstruct(&args),
    }
}

fn session_in(dir: &std::path::Path) -> DisplaySession {
    DisplaySession::new(DisplayConfig {
        output_dir: dir.to_path_buf(),
        ..DisplayConfig::default()
    })
}

// ── filter ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FilterReport {
    config: DemoConfig,
    shape: (usize, usize),
    min: f64,
    max: f64,
}

fn run_filter(args: &CliFilterArgs) -> CliResult<()> {
    let filter = match args.demo {
        CliFilterFamily::Freq => FilterKind::Frequency {
            radius_frac: args.param,
        },
        CliFilterFamily::Orient => FilterKind::Orientation {
            angle_degrees: args.param,
        },
    };
    let cfg = DemoConfig {
        filter,
        polarity: args.polarity.into(),
        show: args.show.into(),
        colorbars: args.colorbars,
        output: args.out.clone(),
        ..DemoConfig::default()
    };
    let mut session = session_in(&args.figure_dir);
    let result = spatial_filtering_demo(DemoInput::Path(&args.image), &cfg, &mut session)?;

    if let Some(report_path) = &args.report {
        let (min, max) = result
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let report = FilterReport {
            config: cfg,
            shape: result.dim(),
            min,
            max,
        };
        std::fs::write(report_path, serde_json::to_string_pretty(&report)?)?;
        println!("Report written to {}", report_path.display());
    }
    Ok(())
}

// ── sinusoid ───────────────────────────────────────────────────────────

fn run_sinusoid(args: &CliSinusoidArgs) -> CliResult<()> {
    let components: Vec<SinusoidComponent> = args
        .ocd
        .iter()
        .enumerate()
        .map(|(i, &ocd)| SinusoidComponent {
            ocd,
            amplitude: args.amplitude.get(i).copied().unwrap_or(1.0),
            ..SinusoidComponent::default()
        })
        .collect();
    let session = session_in(&args.figure_dir);
    let paths = plot_sinusoid(
        &session,
        &components,
        args.length,
        FigureFlags::parse(&args.figs),
    )?;
    for path in paths {
        println!("Figure written to {}", path.display());
    }
    Ok(())
}

// ── impulses ───────────────────────────────────────────────────────────

fn parse_offset(s: &str) -> Result<(i64, i64), String> {
    let (dy, dx) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `dy,dx`, got `{s}`"))?;
    let dy = dy.trim().parse().map_err(|e| format!("bad dy: {e}"))?;
    let dx = dx.trim().parse().map_err(|e| format!("bad dx: {e}"))?;
    Ok((dy, dx))
}

fn run_impulses(args: &CliImpulsesArgs) -> CliResult<()> {
    let mut session = session_in(&args.figure_dir);
    image_impulses(
        &mut session,
        &args.offset,
        (args.rows, args.cols),
        Complex64::new(args.amplitude, 0.0),
    )?;
    println!(
        "Figure written to {}",
        args.figure_dir.join("graph.png").display()
    );
    Ok(())
}

// ── reconstruct ────────────────────────────────────────────────────────

fn run_reconstruct(args: &CliReconstructArgs) -> CliResult<()> {
    let view = AccumulatorView::parse(&args.view);
    let anim = if args.in_process {
        all_pixels(&args.image, args.frames, view, &InProcessGifEncoder)
    } else {
        let magick = MagickGifEncoder;
        match all_pixels(&args.image, args.frames, view, &magick) {
            Err(freqlab::SinusoidError::Gif(freqlab::GifError::ToolNotFound { .. })) => {
                tracing::warn!("falling back to the in-process GIF encoder");
                all_pixels(&args.image, args.frames, view, &InProcessGifEncoder)
            }
            other => other,
        }
    }?;
    println!("Animation written to {}", anim.display());
    Ok(())
}

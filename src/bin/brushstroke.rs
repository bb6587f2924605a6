use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use brushstroke::RenderBackend as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "brushstroke", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a drawing record as a PNG.
    Render(RenderArgs),
    /// Replay a recorded pointer-event log into a drawing record.
    Capture(CaptureArgs),
    /// Print taper regions and holds for every stroke as JSON.
    Analyze(AnalyzeArgs),
    /// Render a progressive replay of a drawing as numbered PNG frames.
    Playback(PlaybackArgs),
}

#[derive(Parser, Debug)]
struct CanvasArgs {
    #[arg(long, default_value_t = 1024)]
    width: u32,

    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Leave the background transparent instead of white.
    #[arg(long)]
    transparent: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input drawing record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Overrides the color mode from the config.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Brush config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// Input JSON array of pointer events.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output drawing record JSON.
    #[arg(long)]
    out: PathBuf,

    /// Reference drawing record to snap to (trace mode).
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Brush config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Input drawing record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Brush config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlaybackArgs {
    /// Input drawing record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory receiving `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Render frames on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker count for `--parallel`; defaults to the number of CPUs.
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Brush config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Solid,
    Heatmap,
    SpeedAlpha,
}

impl From<ModeChoice> for brushstroke::ColorMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Solid => Self::Solid,
            ModeChoice::Heatmap => Self::Heatmap,
            ModeChoice::SpeedAlpha => Self::SpeedAlpha,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Capture(args) => cmd_capture(args),
        Command::Analyze(args) => cmd_analyze(args),
        Command::Playback(args) => cmd_playback(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(
    path: Option<&Path>,
    mode: Option<ModeChoice>,
) -> anyhow::Result<brushstroke::BrushConfig> {
    let mut config = match path {
        Some(p) => brushstroke::BrushConfig::from_json_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => brushstroke::BrushConfig::default(),
    };
    if let Some(mode) = mode {
        config.paint.mode = mode.into();
    }
    Ok(config)
}

fn read_drawing(path: &Path) -> anyhow::Result<brushstroke::Drawing> {
    brushstroke::Drawing::from_json_path(path)
        .with_context(|| format!("read drawing '{}'", path.display()))
}

fn make_canvas(
    args: &CanvasArgs,
) -> anyhow::Result<(brushstroke::Canvas, brushstroke::RenderSettings)> {
    let canvas = brushstroke::Canvas::new(args.width, args.height)?;
    let settings = brushstroke::RenderSettings {
        clear_rgba: (!args.transparent).then_some([255, 255, 255, 255]),
    };
    Ok((canvas, settings))
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(path: &Path, frame: &brushstroke::FrameRGBA) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref(), args.mode)?;
    let drawing = read_drawing(&args.in_path)?;
    let (canvas, settings) = make_canvas(&args.canvas)?;

    let engine = brushstroke::StrokeEngine::from_config(&config);
    let list = engine.compile_drawing(&drawing, canvas);
    let mut backend = brushstroke::create_backend(brushstroke::BackendKind::Cpu, &settings)?;
    let frame = backend.render(&list)?;

    create_parent_dir(&args.out)?;
    write_png(&args.out, &frame)?;
    eprintln!(
        "wrote {} ({} segments, {} tapers, {} dots)",
        args.out.display(),
        list.segment_count(),
        list.polygon_count(),
        list.disc_count()
    );
    Ok(())
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref(), None)?;
    let f = File::open(&args.in_path)
        .with_context(|| format!("open events '{}'", args.in_path.display()))?;
    let events: Vec<brushstroke::PointerEvent> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse pointer events JSON")?;

    let created_at = events.first().map_or(0.0, |e| e.sample.timestamp);
    let mut controller = brushstroke::CaptureController::headless(config.width, created_at);
    if let Some(reference) = &args.reference {
        let reference = read_drawing(reference)?;
        controller =
            controller.with_snap(brushstroke::SnapCorrector::new(&reference, config.snap));
    }

    let mut ignored = 0usize;
    for event in &events {
        if controller.handle(event) == brushstroke::CaptureOutcome::Ignored {
            ignored += 1;
        }
    }
    if controller.is_active() {
        tracing::warn!("event log ended mid-stroke; discarding the unfinished stroke");
    }
    let drawing = controller.into_drawing();

    create_parent_dir(&args.out)?;
    std::fs::write(&args.out, drawing.to_json_string()?)
        .with_context(|| format!("write drawing '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({} strokes, {} points, {} events ignored)",
        args.out.display(),
        drawing.strokes().len(),
        drawing.point_count(),
        ignored
    );
    Ok(())
}

fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref(), None)?;
    let drawing = read_drawing(&args.in_path)?;
    let engine = brushstroke::StrokeEngine::from_config(&config);
    let analyses: Vec<_> = drawing.strokes().iter().map(|s| engine.analyze(s)).collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&analyses).with_context(|| "serialize analysis")?
    );
    Ok(())
}

fn cmd_playback(args: PlaybackArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref(), args.mode)?;
    let drawing = read_drawing(&args.in_path)?;
    let (canvas, settings) = make_canvas(&args.canvas)?;

    let engine = brushstroke::StrokeEngine::from_config(&config);
    let mut backend = brushstroke::create_backend(brushstroke::BackendKind::Cpu, &settings)?;
    let opts = brushstroke::PlaybackOpts {
        fps: args.fps,
        canvas,
        threading: brushstroke::RenderThreading {
            parallel: args.parallel,
            threads: args.threads,
            ..brushstroke::RenderThreading::default()
        },
    };

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let stats = brushstroke::render_playback(
        &drawing,
        &engine,
        backend.as_mut(),
        &opts,
        |idx, frame| {
            write_png(&args.out_dir.join(format!("frame_{idx:05}.png")), frame)
                .map_err(brushstroke::BrushError::Other)
        },
    )?;
    eprintln!(
        "wrote {} frames to {} ({} rendered, {} reused)",
        stats.frames_total,
        args.out_dir.display(),
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}

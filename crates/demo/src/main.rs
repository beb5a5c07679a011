// File: crates/demo/src/main.rs
// Summary: Demo generates a converging sequence, renders the number line and diagram to PNGs,
// applies simulated probe clicks and optionally writes the progressive-reveal frames.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use converge_core::sequence::generate_seeded;
use converge_core::{
    build_animation, generate, sequence_chart, CanvasPlacement, ChartConfig, ChartSurface, Playback, PointerEvent,
    Probe, RenderOptions, Sequence, Theme, ViewKind,
};

#[derive(Parser, Debug)]
#[command(name = "converge-demo", version, about = "Render a converging sequence and its probe overlay")]
struct Cli {
    /// JSON config; defaults are used for anything missing.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = "target/out")]
    out_dir: PathBuf,

    /// RNG seed (overrides config).
    #[arg(long)]
    seed: Option<u64>,

    /// Sequence length (overrides config).
    #[arg(long)]
    length: Option<usize>,

    /// Number of animation frames to write (0 disables).
    #[arg(long, default_value_t = 0)]
    frames: usize,

    /// Simulated click in screen coordinates, "X,Y". Repeatable; applied in order.
    #[arg(long = "click", value_parser = parse_click)]
    clicks: Vec<(f64, f64)>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = match &cli.config {
        Some(p) => ChartConfig::from_path(p).with_context(|| format!("failed to load config '{}'", p.display()))?,
        None => ChartConfig::default(),
    };
    if let Some(seed) = cli.seed { cfg.seed = Some(seed); }
    if let Some(len) = cli.length { cfg.sequence.sequence_length = len; }
    cfg.validate();

    let seq = match cfg.seed {
        Some(seed) => generate_seeded(&cfg.sequence, seed),
        None => generate(&cfg.sequence),
    };
    tracing::info!(len = seq.len(), target = cfg.sequence.target, "sequence ready");

    let mut opts = RenderOptions::default();
    opts.width = cfg.width;
    opts.height = cfg.height;
    opts.theme = Theme::from_name(cfg.theme);

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create '{}'", cli.out_dir.display()))?;

    // 1) Number line
    let line = sequence_chart(&seq, &cfg.sequence, ViewKind::NumberLine);
    let out_line = cli.out_dir.join("number_line.png");
    line.render_to_png(&opts, &out_line)?;
    tracing::info!("Wrote {}", out_line.display());

    // 2) Diagram with probe
    let mut diagram = sequence_chart(&seq, &cfg.sequence, ViewKind::Diagram);
    let mut probe = Probe::with_value(cfg.probe.default_value).with_policy(cfg.probe.policy);
    for &(x, y) in &cli.clicks {
        let surface = ChartSurface::new(&diagram, &opts, CanvasPlacement::at_origin(&opts));
        match probe.on_pointer_event(&PointerEvent::at(x, y), &surface) {
            Some(v) => tracing::info!(x, y, value = v, "probe click"),
            None => tracing::info!(x, y, "probe click ignored"),
        }
    }
    diagram.set_overlay(probe.overlay(seq.len()));
    let out_diagram = cli.out_dir.join("diagram.png");
    diagram.render_to_png(&opts, &out_diagram)?;
    tracing::info!("Wrote {}", out_diagram.display());

    // 3) Progressive reveal frames
    if cfg.animation.enabled && cli.frames > 0 {
        let written = write_frames(&diagram, &seq, &opts, cfg.animation.total_duration_ms, cli.frames, &cli.out_dir)?;
        tracing::info!(frames = written, "Wrote reveal frames to {}", cli.out_dir.join("frames").display());
    }

    Ok(())
}

fn write_frames(
    chart: &converge_core::Chart,
    seq: &Sequence,
    opts: &RenderOptions,
    total_ms: f64,
    frames: usize,
    out_dir: &Path,
) -> Result<usize> {
    let dir = out_dir.join("frames");
    std::fs::create_dir_all(&dir).with_context(|| format!("failed to create '{}'", dir.display()))?;

    let targets = chart.pixel_targets(0, opts);
    let mut playback = Playback::new(build_animation(seq.len(), total_ms), 0, targets, chart.y_scale(opts));
    let step = if frames > 1 { total_ms / (frames - 1) as f64 } else { total_ms };
    for f in 0..frames {
        let t = step * f as f64;
        let frame = playback.advance_to(t);
        let bytes = chart.render_frame_png_bytes(opts, Some(frame))?;
        let path = dir.join(format!("diagram_{f:04}.png"));
        std::fs::write(&path, bytes).with_context(|| format!("failed to write '{}'", path.display()))?;
        tracing::debug!(t_ms = t, visible = playback.frame().visible_count(), "frame {}", path.display());
    }
    Ok(frames)
}

fn parse_click(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad X in '{s}': {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad Y in '{s}': {e}"))?;
    Ok((x, y))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}

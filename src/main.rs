//! AlarmSim: main entry point.
//!
//! Hexagonal layout: the binary only picks adapters and hands them to the
//! frame loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  TerminalSurface / HeadlessSurface    AlarmTone              │
//! │  (Input + Presentation)               (Tone: cpal / silent)  │
//! │  MonotonicClock (Clock)               LogEventSink (Events)  │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              AppService (pure logic)                   │  │
//! │  │  classify · blink · map_outputs                        │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │  Simulator (60 Hz frame loop)                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use alarmsim::adapters::headless::{HeadlessSurface, ScriptStep, parse_channel_values};
use alarmsim::adapters::log_sink::LogEventSink;
use alarmsim::adapters::terminal::TerminalSurface;
use alarmsim::adapters::time::MonotonicClock;
use alarmsim::adapters::tone::AlarmTone;
use alarmsim::config::SimConfig;
use alarmsim::diagnostics;
use alarmsim::runtime::{RunSummary, Simulator};
use alarmsim::severity::CHANNEL_COUNT;

#[derive(Parser, Debug)]
#[command(
    name = "alarmsim",
    version,
    about = "Fire/gas alarm circuit simulator: drag the CO, CO2 and CH4 sliders and watch the controller react"
)]
struct Cli {
    /// Run without a terminal UI, printing a JSON line whenever the outputs change
    #[arg(long)]
    headless: bool,

    /// Channel values as CO,CO2,CH4 in [0, 1]; repeat for a headless script
    #[arg(long = "values", value_name = "CO,CO2,CH4", value_parser = parse_channel_values)]
    values: Vec<[f32; CHANNEL_COUNT]>,

    /// Frames each headless script step is held for
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Disable the alarm tone (headless runs are always silent)
    #[arg(long)]
    mute: bool,

    /// JSON configuration file (defaults are used when absent or invalid)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal UI otherwise discards them)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.headless)?;
    diagnostics::install_panic_handler();

    info!("AlarmSim v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = cli
        .config
        .as_deref()
        .map(SimConfig::load_from_file)
        .unwrap_or_default();
    if cli.mute {
        config.audio_enabled = false;
    }
    config.validate().context("invalid configuration")?;

    // Audio before the terminal so a device error prints on a sane screen.
    let mut tone =
        AlarmTone::open(&config, cli.headless).context("failed to open alarm tone output")?;
    let clock = MonotonicClock::new();
    let mut sink = LogEventSink::new();

    let mut sim = Simulator::new(&config);
    if let Some(max) = cli.max_frames {
        sim = sim.with_frame_budget(max);
    }

    let summary: RunSummary = if cli.headless {
        let script = if cli.values.is_empty() {
            vec![ScriptStep::new([0.0; CHANNEL_COUNT], cli.frames)]
        } else {
            cli.values
                .iter()
                .map(|v| ScriptStep::new(*v, cli.frames))
                .collect()
        };
        let mut surface = HeadlessSurface::new(script, io::stdout().lock());
        sim.run(&mut surface, &mut tone, &clock, &mut sink)
            .context("headless run failed")?
    } else {
        let initial = cli.values.first().copied().unwrap_or([0.0; CHANNEL_COUNT]);
        let mut surface =
            TerminalSurface::new(&config, initial).context("failed to set up the terminal")?;
        let result = sim.run(&mut surface, &mut tone, &clock, &mut sink);
        surface.restore();
        result.context("terminal run failed")?
    };

    info!(
        "Exited after {} frames ({:?})",
        summary.frames, summary.reason
    );
    Ok(())
}

/// Route `log` records through a `tracing-subscriber` fmt layer.
///
/// Terminal mode owns the screen, so logs go to `--log-file` or nowhere.
/// Headless mode keeps stdout for frames and logs to stderr.
fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match (log_file, headless) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, true) => builder.with_writer(io::stderr).try_init(),
        (None, false) => return Ok(()),
    };
    installed.map_err(|e| anyhow!("logging init failed: {e}"))
}

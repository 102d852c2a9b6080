// src/main.rs - Command line front end for profile generation
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use trapezoid_motion::config::{self, Config, OutputFormat};
use trapezoid_motion::motion::{
    Clock, ManualClock, MotionPlayer, MotionPoint, Phase, ProfilePlan, ProfileShape, chart_series,
    generate_bounded,
};
use trapezoid_motion::ParameterEditor;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Trapezoidal motion profile generator
#[derive(Parser, Debug)]
#[command(name = "motion-profile", about = "Generate trapezoidal velocity profiles for straight-line moves.")]
struct Cli {
    /// Path to a TOML config file (overrides defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parameter override (e.g. --set end.z=25 --set max_velocity=8)
    #[arg(long = "set", value_parser = parse_key_val)]
    set: Vec<(String, String)>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Emit the sampled motion points (default)
    Generate,
    /// Emit time/velocity/distance/acceleration rows for plotting
    Chart,
    /// Print the profile shape and phase timings
    Summary,
    /// Only check the parameters
    Validate,
    /// Step the motion player at a fixed frame rate and emit positions
    Play {
        /// Frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
    },
}

#[derive(Debug, Serialize)]
struct Summary {
    shape: ProfileShape,
    distance: f64,
    peak_velocity: f64,
    accel_time: f64,
    constant_time: f64,
    decel_time: f64,
    total_time: f64,
    samples: usize,
}

/// Flat CSV row for a motion point.
#[derive(Debug, Serialize)]
struct PointRow {
    time: f64,
    x: f64,
    y: f64,
    z: f64,
    velocity: f64,
    phase: Phase,
}

impl From<&MotionPoint> for PointRow {
    fn from(point: &MotionPoint) -> Self {
        Self {
            time: point.time,
            x: point.position.x,
            y: point.position.y,
            z: point.position.z,
            velocity: point.velocity,
            phase: point.phase,
        }
    }
}

#[derive(Debug, Serialize)]
struct Frame {
    frame: usize,
    time: f64,
    x: f64,
    y: f64,
    z: f64,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.find('=') {
        Some(pos) => Ok((s[..pos].to_string(), s[pos + 1..].to_string())),
        None => Err(format!("Invalid KEY=VAL: no `=` found in '{}'.", s)),
    }
}

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let path = path.to_str().ok_or("config path is not valid UTF-8")?;
            tracing::info!("Loading configuration from: {}", path);
            config::load_config(path)?
        }
        None => Config::default(),
    };

    let mut editor = ParameterEditor::new(config.motion.clone());
    for (key, val) in &cli.set {
        editor.apply(key, val).map_err(|e| {
            tracing::error!("Rejected override {}={}: {}", key, val, e);
            e
        })?;
    }
    config.motion = editor.publish();
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout().lock()),
    };

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Generate => {
            let points = generate_bounded(&config.motion, config.generator.max_samples)?;
            tracing::info!("Generated {} motion points", points.len());
            match config.output.format {
                OutputFormat::Json => write_json(out.as_mut(), &points)?,
                OutputFormat::Csv => {
                    let rows: Vec<PointRow> = points.iter().map(PointRow::from).collect();
                    write_rows(out.as_mut(), OutputFormat::Csv, &rows)?;
                }
            }
        }
        Commands::Chart => {
            let points = generate_bounded(&config.motion, config.generator.max_samples)?;
            let chart = chart_series(&points, &config.motion);
            write_rows(out.as_mut(), config.output.format, &chart)?;
        }
        Commands::Summary => {
            let plan = ProfilePlan::new(&config.motion)?;
            let summary = Summary {
                shape: plan.shape(),
                distance: plan.distance(),
                peak_velocity: plan.peak_velocity(),
                accel_time: plan.accel_time(),
                constant_time: plan.constant_time(),
                decel_time: plan.decel_time(),
                total_time: plan.total_time(),
                samples: plan.sample_count(),
            };
            write_rows(out.as_mut(), config.output.format, std::slice::from_ref(&summary))?;
        }
        Commands::Validate => {
            tracing::info!("Parameters are valid");
        }
        Commands::Play { fps } => {
            if !(fps.is_finite() && fps > 0.0) {
                return Err(format!("--fps must be greater than 0, got {}", fps).into());
            }
            let points = generate_bounded(&config.motion, config.generator.max_samples)?;
            let clock = ManualClock::new(0.0);
            let mut player = MotionPlayer::new(&clock);
            let first = player.start(points)?;
            let mut frames = vec![Frame { frame: 0, time: 0.0, x: first.x, y: first.y, z: first.z }];
            while player.is_animating() {
                let frame = frames.len();
                clock.set(frame as f64 / fps);
                if let Some(position) = player.update() {
                    frames.push(Frame {
                        frame,
                        time: clock.now(),
                        x: position.x,
                        y: position.y,
                        z: position.z,
                    });
                }
            }
            tracing::info!("Played back {} frames at {} fps", frames.len(), fps);
            write_rows(out.as_mut(), config.output.format, &frames)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<(), BoxError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_rows<T: Serialize>(out: &mut dyn Write, format: OutputFormat, rows: &[T]) -> Result<(), BoxError> {
    match format {
        OutputFormat::Json => write_json(out, rows),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}

#![deny(unsafe_code)]
//! CLI binary for driftfield.
//!
//! Subcommands:
//! - `render <preset>`: seed a field, run N ticks against a fixed cursor, write PNG
//! - `replay <scene.json>`: re-render a saved scene
//! - `list`: print available presets and palettes
//! - `schema <preset>`: print the parameter schema as JSON

mod error;

use clap::{ArgAction, Parser, Subcommand};
use driftfield_core::{Palette, Scene, Srgb};
use driftfield_raster::snapshot::write_png;
use driftfield_raster::snapshot_simulation;
use driftfield_sim::{ParticleField, Preset};
use error::CliError;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "driftfield", about = "Cursor-reactive particle field renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a preset for N ticks and write a PNG snapshot.
    Render {
        /// Preset name (indigo, violet).
        preset: String,

        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of ticks to simulate before the snapshot.
        #[arg(short, long, default_value_t = 0)]
        ticks: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Cursor position as `x,y`; defaults to the viewport center.
        #[arg(long, value_parser = parse_cursor, allow_hyphen_values = true)]
        cursor: Option<[f64; 2]>,

        /// Config overrides as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Background color as hex.
        #[arg(short, long, default_value = "#000000")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Also write the scene description to this JSON file.
        #[arg(long)]
        save_scene: Option<PathBuf>,
    },
    /// Re-render a scene file written by `render --save-scene`.
    Replay {
        /// Scene JSON file.
        scene: PathBuf,

        /// Background color as hex.
        #[arg(short, long, default_value = "#000000")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// List available presets and palettes.
    List,
    /// Print a preset's parameter schema as JSON.
    Schema {
        /// Preset name.
        preset: String,
    },
}

/// Parses `x,y` into a finite cursor position.
fn parse_cursor(s: &str) -> Result<[f64; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{v}' is not a finite number"))
    };
    Ok([parse(x)?, parse(y)?])
}

fn parse_background(hex: &str) -> Result<Srgb, CliError> {
    Srgb::from_hex(hex).map_err(|e| CliError::Input(format!("invalid --background: {e}")))
}

/// What a finished render reports back.
#[derive(Debug)]
struct RenderSummary {
    particles: usize,
    kinetic_energy: f64,
    max_displacement: f64,
}

/// Builds the field a scene describes, runs its ticks, and writes the frame.
fn render_scene(scene: &Scene, background: Srgb, output: &Path) -> Result<RenderSummary, CliError> {
    scene.validate()?;
    if !scene.params.is_object() {
        return Err(CliError::Input("params must be a JSON object".into()));
    }
    let preset = Preset::from_name(&scene.preset)?;
    let mut field = ParticleField::from_json(scene.bounds(), scene.seed, preset, &scene.params)
        .inspect_err(|e| warn!(preset = %scene.preset, error = %e, "rejected scene config"))?;
    debug!(particles = field.len(), "field seeded");

    let cursor = scene.cursor();
    for _ in 0..scene.ticks {
        field.tick(cursor);
    }

    let raster = snapshot_simulation(&field, background)?;
    write_png(&raster, output)?;
    info!(
        preset = %scene.preset,
        ticks = scene.ticks,
        output = %output.display(),
        "frame written"
    );

    Ok(RenderSummary {
        particles: field.len(),
        kinetic_energy: field.kinetic_energy(),
        max_displacement: field.max_displacement(),
    })
}

fn report(
    json_mode: bool,
    scene: &Scene,
    summary: &RenderSummary,
    output: &Path,
) -> Result<(), CliError> {
    if json_mode {
        let info = json!({
            "preset": scene.preset,
            "width": scene.width,
            "height": scene.height,
            "ticks": scene.ticks,
            "seed": scene.seed,
            "cursor": scene.cursor,
            "particles": summary.particles,
            "kinetic_energy": summary.kinetic_energy,
            "max_displacement": summary.max_displacement,
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {} ({}x{}, {} ticks, seed {}, {} particles) -> {}",
            scene.preset,
            scene.width,
            scene.height,
            scene.ticks,
            scene.seed,
            summary.particles,
            output.display()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let presets = Preset::list_names();
            let palettes = Palette::list_names();
            if cli.json {
                let info = json!({
                    "presets": presets,
                    "palettes": palettes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                for name in presets {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Schema { preset } => {
            let schema = Preset::from_name(&preset)?.config().schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Render {
            preset,
            width,
            height,
            ticks,
            seed,
            cursor,
            params,
            background,
            output,
            save_scene,
        } => {
            let params: Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let background = parse_background(&background)?;

            let mut scene = Scene::new(&preset, width as f64, height as f64, seed);
            scene.params = params;
            scene.ticks = ticks;
            if let Some(cursor) = cursor {
                scene.cursor = cursor;
            }

            let summary = render_scene(&scene, background, &output)?;

            if let Some(path) = save_scene {
                std::fs::write(&path, serde_json::to_string_pretty(&scene)?)?;
                debug!(path = %path.display(), "scene saved");
            }
            report(cli.json, &scene, &summary, &output)?;
        }
        Command::Replay {
            scene,
            background,
            output,
        } => {
            let text = std::fs::read_to_string(&scene)?;
            let scene: Scene = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid scene file: {e}")))?;
            let background = parse_background(&background)?;
            let summary = render_scene(&scene, background, &output)?;
            report(cli.json, &scene, &summary, &output)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

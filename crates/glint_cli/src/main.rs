//! Glint CLI
//!
//! Run Glint effects headless: simulate the particle overlay, print its
//! configuration, or preview the intro animations in the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glint_particles::ParticleConfig;
use glint_platform::Viewport;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod intro;
mod simulate;

use simulate::{PointerPath, ResizeAt, SimulateOptions};

#[derive(Parser)]
#[command(name = "glint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Glint ambient effects runner", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the particle overlay on a headless host
    Simulate {
        /// Display refreshes to run
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// Pointer movement
        #[arg(short, long, value_enum, default_value_t = PointerPath::Circle)]
        path: PointerPath,

        /// Particle config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Viewport width
        #[arg(long, default_value_t = 800.0)]
        width: f32,

        /// Viewport height
        #[arg(long, default_value_t = 600.0)]
        height: f32,

        /// Device pixel ratio
        #[arg(long, default_value_t = 1.0)]
        scale: f64,

        /// Resize the viewport mid-run, e.g. 1600x1200@30
        #[arg(long)]
        resize: Option<ResizeAt>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default particle config as TOML
    Config {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Preview the typewriter headline and skill counters
    Intro {
        /// Headline text
        #[arg(short, long, default_value = "Hi, I design for the web.")]
        text: String,

        /// Preview length in milliseconds
        #[arg(long, default_value_t = 3_000)]
        ms: u64,

        /// Snapshot interval in milliseconds
        #[arg(long, default_value_t = 250)]
        step: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            frames,
            path,
            config,
            seed,
            width,
            height,
            scale,
            resize,
            json,
        } => {
            let viewport = Viewport::try_new(width, height, scale).context("invalid viewport")?;
            let options = SimulateOptions {
                frames,
                path,
                config: load_config(config.as_deref())?,
                seed,
                viewport,
                resize,
            };
            cmd_simulate(&options, json)
        }

        Commands::Config { output } => cmd_config(output.as_deref()),

        Commands::Intro { text, ms, step } => intro::run(&text, ms, step).map(|_| ()),
    }
}

fn load_config(path: Option<&Path>) -> Result<ParticleConfig> {
    match path {
        Some(path) => ParticleConfig::load(path)
            .with_context(|| format!("Failed to load particle config {}", path.display())),
        None => Ok(ParticleConfig::default()),
    }
}

fn cmd_simulate(options: &SimulateOptions, json: bool) -> Result<()> {
    let summary = simulate::run(options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    info!(
        "Done: {} of {} frames simulated",
        summary.frames_executed, summary.frames_delivered
    );
    info!(
        "  spawned {}, expired {}, evicted {}",
        summary.spawned, summary.expired, summary.evicted
    );
    info!(
        "  peak {} live, {} at exit",
        summary.peak_live, summary.final_live
    );
    info!(
        "  surface {}x{} px",
        summary.surface_pixels.0, summary.surface_pixels.1
    );
    Ok(())
}

fn cmd_config(output: Option<&Path>) -> Result<()> {
    let text = ParticleConfig::default().to_toml()?;
    match output {
        Some(path) => {
            if path.exists() {
                anyhow::bail!("'{}' already exists", path.display());
            }
            fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote default config to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

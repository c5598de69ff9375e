//! trento CLI
//!
//! Generate minimum-bias nuclear collision events and print one line per
//! event.
//!
//! # Example
//!
//! ```bash
//! # 1000 Pb+Pb events with binary-collision and trial counts, fixed seed
//! trento Pb Pb 1000 --ncoll --trials --random-seed 42
//!
//! # p+Pb restricted to b in [2, 4] fm, written to a file
//! trento p Pb 500 --b-min 2 --b-max 4 -o events.dat
//!
//! # Start from a YAML file and override the event count
//! trento --config-file run.yaml --number-events 50
//! ```

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trento::core::random;
use trento::{Collider, NucleusSpec, NullOutput, Output, ParticipantProfile, RunConfig, TextOutput};

/// Event-by-event nuclear collision sampler.
///
/// Output columns: event index, impact parameter, participants, binary
/// collisions (--ncoll), trials to first collision (--trials), ε2..ε5.
#[derive(Parser, Debug)]
#[command(name = "trento")]
#[command(version, about, long_about = None)]
struct Args {
    /// Projectile species: p, Cu, Xe, Au, Pb, U or hs:<A>:<R>
    projectile: Option<NucleusSpec>,

    /// Target species, same forms as the projectile
    target: Option<NucleusSpec>,

    /// Number of events
    events: Option<i64>,

    /// Number of events; takes precedence over the positional count and the
    /// config file
    #[arg(short = 'n', long)]
    number_events: Option<i64>,

    /// YAML configuration file; command-line values take precedence
    #[arg(short = 'c', long)]
    config_file: Option<PathBuf>,

    /// Minimum impact parameter [fm]
    #[arg(long)]
    b_min: Option<f64>,

    /// Maximum impact parameter [fm]; negative derives it from the nuclei
    #[arg(long, allow_hyphen_values = true)]
    b_max: Option<f64>,

    /// Nucleon-nucleon inelastic cross section [fm^2]
    #[arg(short = 'x', long)]
    cross_section: Option<f64>,

    /// Minimum distance between nucleons [fm]
    #[arg(short = 'd', long)]
    nucleon_min_dist: Option<f64>,

    /// Count binary collisions
    #[arg(long)]
    ncoll: bool,

    /// Count impact-parameter trials until the first collision
    #[arg(long)]
    trials: bool,

    /// Random seed; omit or give a value <= 0 for a non-deterministic run
    #[arg(long, allow_hyphen_values = true)]
    random_seed: Option<i64>,

    /// Write events to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Do not write events
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Args {
    fn into_config(self) -> Result<RunConfig> {
        let projectiles = match (self.projectile, self.target) {
            (Some(a), Some(b)) => Some([a, b]),
            (None, None) => None,
            _ => bail!("expected exactly two projectiles"),
        };

        let mut config = match (&self.config_file, projectiles) {
            (Some(path), projectiles) => {
                let mut config = RunConfig::from_yaml_file(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?;
                if let Some(projectiles) = projectiles {
                    config.projectiles = projectiles;
                }
                config
            }
            (None, Some([a, b])) => RunConfig::new(a, b),
            (None, None) => bail!("two projectiles are required without --config-file"),
        };

        if let Some(n) = self.number_events.or(self.events) {
            config.number_events = n;
        }
        if let Some(b) = self.b_min {
            config.b_min = b;
        }
        if let Some(b) = self.b_max {
            config.b_max = b;
        }
        if let Some(x) = self.cross_section {
            config.cross_section = x;
        }
        if let Some(d) = self.nucleon_min_dist {
            config.nucleon_min_dist = d;
        }
        config.ncoll |= self.ncoll;
        config.trials |= self.trials;
        if let Some(seed) = self.random_seed {
            config.random_seed = random::seed_from_signed(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries event records.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,trento=info")),
        )
        .init();

    let args = Args::parse();
    let quiet = args.quiet;
    let output_path = args.output.clone();
    let config = args.into_config()?;

    info!(
        projectile_a = %config.projectiles[0],
        projectile_b = %config.projectiles[1],
        number_events = config.number_events,
        "starting run"
    );

    let mut collider = Collider::from_config(&config)?;
    let mut profile = ParticipantProfile::new();

    let mut output: Box<dyn Output> = if quiet {
        Box::new(NullOutput)
    } else if let Some(path) = output_path {
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        Box::new(TextOutput::new(BufWriter::new(file), config.ncoll, config.trials))
    } else {
        Box::new(TextOutput::new(
            BufWriter::new(io::stdout().lock()),
            config.ncoll,
            config.trials,
        ))
    };

    collider.run_events(&mut profile, output.as_mut())?;
    Ok(())
}

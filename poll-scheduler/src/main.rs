/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

use poll_scheduler::config::SimulationConfig;
use poll_scheduler::scheduler::{PollScheduler, Schedule, Window};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Poll-group scheduler simulation.
///
/// Example:
///   poll-scheduler -c sim.yaml -n 3 --seed 42
#[derive(Debug, Parser)]
#[command(
    name = "poll-scheduler",
    about = "Quantized next-poll scheduling for polling groups",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML simulation configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Quantization window (overrides the config file).
    #[arg(short = 'w', long = "window")]
    window: Option<i64>,

    /// Number of scheduling passes to run (overrides the config file).
    #[arg(short = 'n', long = "passes")]
    passes: Option<usize>,

    /// Number of generated groups, keys 0..N (overrides the config file).
    #[arg(short = 'g', long = "groups")]
    group_count: Option<u32>,

    /// Random identifiers per generated group (overrides the config file).
    #[arg(short = 'i', long = "identifiers")]
    identifiers_per_group: Option<usize>,

    /// Seed for the identifier RNG; omit for fresh entropy.
    #[arg(long = "seed")]
    seed: Option<u64>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr so stdout carries only the schedules.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!(
        config  = ?cli.config,
        window  = ?cli.window,
        passes  = ?cli.passes,
        groups  = ?cli.group_count,
        seed    = ?cli.seed,
        "poll-scheduler starting"
    );

    match run(&cli) {
        Ok(schedules) => print!("{}", render(&schedules)),
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<Schedule>> {
    let config = resolve_config(cli)?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut registry = config.build_registry(&mut rng)?;
    if registry.is_empty() {
        warn!("Registry is empty, every schedule will be empty");
    }

    PollScheduler::new(config.window)
        .run(&mut registry, config.passes)
        .context("Scheduling failed")
}

/// Load the config file (or defaults) and apply command-line overrides.
fn resolve_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load_from_file(path)?,
        None => {
            info!("No configuration file provided, using default settings");
            SimulationConfig::default()
        }
    };

    if let Some(w) = cli.window {
        config.window = Window::new(w).context("Invalid --window")?;
    }
    if let Some(n) = cli.passes {
        if n == 0 {
            bail!("--passes must be at least 1");
        }
        config.passes = n;
    }
    if let Some(g) = cli.group_count {
        config.group_count = g;
    }
    if let Some(i) = cli.identifiers_per_group {
        config.identifiers_per_group = i;
    }

    Ok(config)
}

/// One `<tick> [<rates>]` line per bucket; multi-pass output gets a
/// `# pass N` header before each schedule.
fn render(schedules: &[Schedule]) -> String {
    if let [only] = schedules {
        return only.to_string();
    }

    let mut out = String::new();
    for (i, schedule) in schedules.iter().enumerate() {
        out.push_str(&format!("# pass {}\n", i + 1));
        out.push_str(&schedule.to_string());
    }
    out
}

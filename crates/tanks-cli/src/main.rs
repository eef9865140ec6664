//! Tanks CLI.
//!
//! - `tanks run` - headless arena simulation
//! - `tanks describe <index>` - print a behaviour tree
//! - `tanks list` - list the configurable behaviours

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use tank_ai::{build_behaviour, Arena, ArenaConfig, BehaviourKind, Simulation, SimulationReport};
use tank_tools::TraceLog;

#[derive(Parser)]
#[command(name = "tanks")]
#[command(about = "Tank behaviour tree runner", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate an arena and print a summary
    Run {
        /// Arena config (YAML); built-in two tank duel if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the simulated duration in seconds
        #[arg(long)]
        duration: Option<f64>,

        /// Override the seed for randomized effectors
        #[arg(long)]
        seed: Option<u64>,

        /// Behaviour index per tank, in spawn order
        #[arg(short, long = "behaviour", allow_negative_numbers = true)]
        behaviours: Vec<i32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Write every tank's decision trace as JSON
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Print the tree built for a behaviour index
    Describe {
        #[arg(allow_negative_numbers = true)]
        index: i32,

        #[arg(long)]
        json: bool,
    },

    /// List behaviour indices
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            config,
            duration,
            seed,
            behaviours,
            json,
            trace,
        } => {
            let config = load_config(config.as_deref(), duration, seed, &behaviours)?;
            run(&config, json, trace.as_deref())
        }
        Commands::Describe { index, json } => describe(index, json),
        Commands::List => {
            list();
            Ok(())
        }
    }
}

fn load_config(
    path: Option<&Path>,
    duration: Option<f64>,
    seed: Option<u64>,
    behaviours: &[i32],
) -> Result<ArenaConfig> {
    let mut config = match path {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };

    if let Some(duration) = duration {
        config.duration_seconds = duration;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if behaviours.len() > config.tanks.len() {
        bail!(
            "{} behaviours given but the arena has {} tanks",
            behaviours.len(),
            config.tanks.len()
        );
    }
    for (spawn, behaviour) in config.tanks.iter_mut().zip(behaviours) {
        spawn.behaviour = *behaviour;
    }

    config.validate()?;
    Ok(config)
}

fn run(config: &ArenaConfig, json: bool, trace_path: Option<&Path>) -> Result<()> {
    let mut sim = Simulation::from_config(config)?;
    if trace_path.is_some() {
        sim = sim.with_trace();
    }

    let report = sim.run();

    if let Some(path) = trace_path {
        write_traces(&sim, &report, path)?;
        tracing::info!(path = %path.display(), "trace written");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

#[derive(Serialize)]
struct TankTrace<'a> {
    behaviour: &'a str,
    #[serde(flatten)]
    log: &'a TraceLog,
}

fn write_traces(sim: &Simulation, report: &SimulationReport, path: &Path) -> Result<()> {
    let traces: BTreeMap<&str, TankTrace<'_>> = report
        .tanks
        .iter()
        .filter_map(|tank| {
            let log = sim.trace(tank.id)?;
            Some((
                tank.name.as_str(),
                TankTrace {
                    behaviour: &tank.behaviour,
                    log,
                },
            ))
        })
        .collect();

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &traces)?;
    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!(
        "{} ticks, {:.2}s simulated",
        report.ticks, report.elapsed_seconds
    );
    println!();
    for tank in &report.tanks {
        println!("  {} ({})", tank.name, tank.behaviour);
        println!(
            "    position  [{:.2}, {:.2}, {:.2}]  yaw {:.1}",
            tank.position[0], tank.position[1], tank.position[2], tank.yaw_degrees
        );
        println!(
            "    shells    {}  travelled {:.2}",
            tank.shells_fired, tank.distance_travelled
        );
    }
}

fn describe(index: i32, json: bool) -> Result<()> {
    let shape = build_behaviour::<Arena>(index).shape();
    if json {
        println!("{}", serde_json::to_string_pretty(&shape)?);
        return Ok(());
    }

    match BehaviourKind::from_index(index) {
        Some(kind) => println!("{} ({}): {}", kind.name(), index, kind.description()),
        None => println!("Idle ({index}): unknown index, turns slowly in place"),
    }
    println!();
    print!("{shape}");
    Ok(())
}

fn list() {
    println!("Behaviours:");
    for kind in BehaviourKind::ALL {
        println!("  {}  {:<14} {}", kind.index(), kind.name(), kind.description());
    }
    println!();
    println!("Any other index gets the idle tree.");
}

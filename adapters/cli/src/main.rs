#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs an automated worms skirmish.

mod skirmish;
mod terrain_file;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use worms_core::{Command, CommandError, Event, PhysicsConfig, TeamId, WorldError};
use worms_terrain::TerrainMap;
use worms_world::{self as world, query, World};

use skirmish::Skirmish;

/// Cells per meter used for the generated landscape.
const CELLS_PER_METER: f64 = 2.0;
/// Names handed out to teams in registration order.
const TEAM_NAMES: [&str; 10] = [
    "Red", "Blue", "Green", "Yellow", "Purple", "Orange", "Cyan", "Pink", "Brown", "Grey",
];

/// Runs an automated skirmish between worms on a terrain bitmap.
#[derive(Debug, Parser)]
#[command(name = "worms", version, about)]
struct Args {
    /// ASCII terrain bitmap: `#` impassable, `.` passable, first line on top.
    #[arg(long)]
    map: Option<PathBuf>,
    /// World width in meters.
    #[arg(long, default_value_t = 40.0)]
    width: f64,
    /// World height in meters.
    #[arg(long, default_value_t = 20.0)]
    height: f64,
    /// Number of worms placed at random resting positions.
    #[arg(long, default_value_t = 4)]
    worms: u32,
    /// Number of teams the worms are dealt into; zero leaves them teamless.
    #[arg(long, default_value_t = 2)]
    teams: usize,
    /// Number of food items placed before the game starts.
    #[arg(long, default_value_t = 2)]
    food: u32,
    /// Seed for the placement generator.
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// TOML file overriding the physical configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Upper bound on the number of turns played.
    #[arg(long, default_value_t = 40)]
    turns: u32,
}

/// Entry point for the worms command-line interface.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("worms=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let terrain = load_terrain(&args)?;
    info!(
        columns = terrain.columns(),
        rows = terrain.rows(),
        width = terrain.width(),
        height = terrain.height(),
        "terrain ready"
    );

    let mut world = World::new(terrain, config, ChaCha8Rng::seed_from_u64(args.seed))
        .context("physical configuration is invalid")?;
    populate(&mut world, &args)?;

    let report = Skirmish::new(world).run(args.turns)?;
    println!(
        "{} turns played, {} events, {}",
        report.turns,
        report.events,
        if report.finished {
            "game finished"
        } else {
            "game unfinished"
        }
    );
    for leader in &report.leaders {
        println!(
            "{} leads with {} hit points at ({:.2}, {:.2})",
            leader.name.as_str(),
            leader.hit_points.get(),
            leader.position.x(),
            leader.position.y()
        );
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<PhysicsConfig> {
    let Some(path) = path else {
        return Ok(PhysicsConfig::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    toml::from_str(&source)
        .with_context(|| format!("failed to parse configuration {}", path.display()))
}

fn load_terrain(args: &Args) -> Result<TerrainMap> {
    match &args.map {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read terrain {}", path.display()))?;
            terrain_file::parse(&source, args.width, args.height)
                .with_context(|| format!("failed to load terrain {}", path.display()))
        }
        None => {
            let columns = (args.width * CELLS_PER_METER).round().max(0.0) as usize;
            let rows = (args.height * CELLS_PER_METER).round().max(0.0) as usize;
            TerrainMap::new(
                args.width,
                args.height,
                terrain_file::default_landscape(columns, rows),
            )
            .context("failed to build the default landscape")
        }
    }
}

/// Registers teams, worms and food, then starts the game.
fn populate(world: &mut World, args: &Args) -> Result<()> {
    let mut events = Vec::new();
    let mut teams: Vec<TeamId> = Vec::new();
    for name in TEAM_NAMES.iter().take(args.teams) {
        let _ = world::apply(
            world,
            Command::AddTeam {
                name: (*name).to_owned(),
            },
            &mut events,
        )
        .with_context(|| format!("failed to add team {name}"))?;
    }
    teams.extend(events.iter().filter_map(|event| match event {
        Event::TeamAdded { team, .. } => Some(*team),
        _ => None,
    }));

    for index in 0..args.worms {
        let team = (!teams.is_empty()).then(|| teams[index as usize % teams.len()]);
        place(world, Command::AddWorm { team }, &mut events)?;
    }
    for _ in 0..args.food {
        place(world, Command::AddFood, &mut events)?;
    }

    let _ = world::apply(world, Command::StartGame, &mut events)
        .context("failed to start the game")?;
    info!(
        worms = query::worms(world).len(),
        teams = query::teams(world).len(),
        food = query::food(world).len(),
        "roster complete"
    );
    Ok(())
}

/// Applies a random placement command, skipping it when no spot is found.
fn place(world: &mut World, command: Command, events: &mut Vec<Event>) -> Result<()> {
    match world::apply(world, command, events) {
        Ok(_) => Ok(()),
        Err(WorldError::Command(error @ CommandError::NoAdjacentPosition { .. })) => {
            warn!(%error, "placement skipped");
            Ok(())
        }
        Err(error) => Err(error).context("failed to populate the world"),
    }
}

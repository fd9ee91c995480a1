mod cli;
mod logging;

use std::time::{Duration, Instant};

use clap::Parser;
use colored::Colorize;
use eyre::Result;
use log::{debug, info, warn};

use cli::{Args, Command};
use logging::Logger;
use pilot::{
    Pilot, PilotConfig,
    algorithms::pathfinding::{Path, find_path},
    maze::{Coordinate, MapModel, TileBelief, TileKind},
    sim::{GridWorld, Vehicle},
};

const DEMO_MAP: &str = include_str!("../maps/demo.txt");

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    Logger::init(args.verbosity);

    let world = match &args.map {
        Some(path) => {
            info!("loading map: {}", path.display());
            GridWorld::from_file(path)?
        }
        None => {
            debug!("loading demo map");
            DEMO_MAP.parse()?
        }
    }
    .with_heading(args.heading.into());

    info!(
        "maze is {}x{}, starting at {}",
        world.width(),
        world.height(),
        world.start()
    );

    match args.command {
        Command::Run { ticks, dt } => run(world, args.config(), ticks, dt, args.delay).await,
        Command::Plan => plan(&world),
    }
}

async fn run(
    mut world: GridWorld,
    config: PilotConfig,
    ticks: usize,
    dt: f32,
    delay: u64,
) -> Result<()> {
    if dt <= 0.0 {
        eyre::bail!("tick length must be positive, got {}", dt);
    }

    let mut pilot = Pilot::new(config);
    let delay = Duration::from_millis(delay);
    let started = Instant::now();
    let mut exiting_since = None;

    for tick in 0..ticks {
        pilot.update(dt, &mut world);
        world.step(dt);

        if exiting_since.is_none() && pilot.is_exiting() {
            info!("switched to exiting after {} ticks", tick);
            exiting_since = Some(tick);
        }

        if world.on_exit() {
            render(pilot.map(), Some(world.position()), None);
            info!(
                "reached the exit in {} ticks ({:.1}s simulated, {:?} real)",
                tick + 1,
                (tick + 1) as f32 * dt,
                started.elapsed()
            );
            debug!("{} tiles mapped, {} collisions", pilot.map().len(), world.collisions());
            return Ok(());
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    render(pilot.map(), Some(world.position()), None);
    if !pilot.map().exit_found() {
        warn!("exit never came into view");
    }
    eyre::bail!("gave up after {} ticks at {}", ticks, world.position())
}

fn plan(world: &GridWorld) -> Result<()> {
    let Some(exit) = world.exit() else {
        eyre::bail!("map has no exit");
    };

    let mut map = MapModel::new();
    map.update(world.tiles());

    let started = Instant::now();
    let path = find_path(world.start(), exit, &map)
        .ok_or_else(|| eyre::eyre!("no path from {} to {}", world.start(), exit))?;

    info!("planned {} steps in {:?}", path.steps(), started.elapsed());
    debug!("route: {}", path);
    render(&map, Some(world.start()), Some(&path));
    Ok(())
}

/// draws the believed maze, north up
fn render(map: &MapModel, car: Option<Coordinate>, path: Option<&Path>) {
    let Some((min, max)) = map.bounds() else {
        return;
    };

    for y in (min.y..=max.y).rev() {
        let row: String = (min.x..=max.x)
            .map(|x| {
                let pos = Coordinate::new(x, y);
                if car == Some(pos) {
                    return "@".cyan().bold().to_string();
                }
                if path.is_some_and(|p| p.contains(pos)) {
                    return "*".blue().to_string();
                }
                match map.belief(pos) {
                    TileBelief::Unknown => " ".to_string(),
                    TileBelief::Known(TileKind::Wall) => "#".dimmed().to_string(),
                    TileBelief::Known(TileKind::Free) => ".".to_string(),
                    TileBelief::Known(TileKind::Trap) => "~".yellow().to_string(),
                    TileBelief::Known(TileKind::Exit) => "E".green().bold().to_string(),
                }
            })
            .collect();
        println!("{}", row);
    }
}

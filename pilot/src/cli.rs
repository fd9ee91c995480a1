use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use pilot::{PilotConfig, maze::Orientation};

#[derive(Parser, Debug)]
#[command(name = "pilot")]
#[command(about = "Drives a car out of a maze it has never seen")]
pub struct Args {
    /// Sets the logger's verbosity level
    #[arg(short, long, value_name = "VERBOSITY", default_value_t = LevelFilter::Info)]
    pub verbosity: LevelFilter,

    /// Maze file to load (the bundled demo maze if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// Heading the car starts with
    #[arg(long, value_enum, default_value_t = Heading::North)]
    pub heading: Heading,

    /// Delay between ticks in milliseconds (0 = no delay)
    #[arg(short, long, default_value_t = 0)]
    pub delay: u64,

    /// Cap on every speed target, in tiles per second
    #[arg(long, default_value_t = 2.0)]
    pub max_speed: f32,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn config(&self) -> PilotConfig {
        let mut config = PilotConfig::default();
        config.motion.max_speed = self.max_speed;
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drive through the maze knowing only what the car can see
    Run {
        /// Give up after this many ticks
        #[arg(short, long, default_value_t = 20_000)]
        ticks: usize,

        /// Simulated seconds per tick
        #[arg(long, default_value_t = 0.02)]
        dt: f32,
    },

    /// Plan a route with the whole maze known up front
    Plan,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl From<Heading> for Orientation {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::North => Self::North,
            Heading::East => Self::East,
            Heading::South => Self::South,
            Heading::West => Self::West,
        }
    }
}

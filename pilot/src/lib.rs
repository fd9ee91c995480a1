pub mod algorithms;
pub mod config;
pub mod diagnostics;
pub mod maze;
pub mod motion;
pub mod pilot;
pub mod sim;

pub use config::PilotConfig;
pub use pilot::{ControlStrategy, Pilot};

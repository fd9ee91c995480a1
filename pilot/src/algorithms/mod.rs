pub mod exploration;
pub mod following;
mod intent;
pub mod pathfinding;

pub use intent::{Intent, Observation};

mod vehicle;
mod world;

pub use vehicle::Vehicle;
pub use world::{GridWorld, VIEW_RADIUS};

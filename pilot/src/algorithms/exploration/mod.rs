mod state;
mod wall_follower;

pub use state::ExplorerState;
pub use wall_follower::WallFollower;

mod path_follower;

pub use path_follower::PathFollower;

use crate::maze::{Coordinate, Orientation, RelativeDirection};

/// high-level driving request from a decision controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Turn(RelativeDirection),
    UTurn(RelativeDirection),
    /// slow u-turn, close to turning on the spot
    Spin(RelativeDirection),
    ThreePointTurn(RelativeDirection),
    ToggleReverse,
    SetSpeedTarget(f32),
    ResetSpeedTarget,
}

/// what a decision controller gets to see each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub position: Coordinate,
    /// direction of travel, flipped while reversing
    pub orientation: Orientation,
    pub reversing: bool,
}

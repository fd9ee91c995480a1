use crate::maze::Coordinate;

/// where the wall follower is in its decision cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerState {
    /// looking for a wall to follow
    Normal,
    WallFollowing,
    /// turned left round the end of a wall, waiting to leave `since`
    JustTurnedLeft { since: Coordinate },
    PassingTrap,
}

impl ExplorerState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::WallFollowing => "wall following",
            Self::JustTurnedLeft { .. } => "just turned left",
            Self::PassingTrap => "passing trap",
        }
    }
}

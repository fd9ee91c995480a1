/// tile classification as reported by the simulation's sensor feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservedTile {
    Road,
    Wall,
    Trap,
    Start,
    Finish,
}

impl ObservedTile {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | ' ' => Some(Self::Road),
            '#' => Some(Self::Wall),
            '~' => Some(Self::Trap),
            'S' => Some(Self::Start),
            'E' => Some(Self::Finish),
            _ => None,
        }
    }

    pub fn is_exit(self) -> bool {
        matches!(self, Self::Finish)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Free,
    Wall,
    Trap,
    Exit,
}

impl From<ObservedTile> for TileKind {
    fn from(tile: ObservedTile) -> Self {
        match tile {
            ObservedTile::Trap => Self::Trap,
            ObservedTile::Finish => Self::Exit,
            ObservedTile::Wall => Self::Wall,
            ObservedTile::Road | ObservedTile::Start => Self::Free,
        }
    }
}

/// what the car believes about a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileBelief {
    #[default]
    Unknown,
    Known(TileKind),
}

impl TileBelief {
    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Unknown tiles are assumed blocking until seen.
    pub fn is_blocking(self) -> bool {
        !matches!(self, Self::Known(TileKind::Free | TileKind::Exit))
    }

    pub fn is_trap(self) -> bool {
        matches!(self, Self::Known(TileKind::Trap))
    }

    pub fn is_exit(self) -> bool {
        matches!(self, Self::Known(TileKind::Exit))
    }
}

impl From<ObservedTile> for TileBelief {
    fn from(tile: ObservedTile) -> Self {
        Self::Known(tile.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_is_conservative() {
        let tile = TileBelief::Unknown;
        assert!(!tile.is_known());
        assert!(tile.is_blocking());
        assert!(!tile.is_trap());
        assert!(!tile.is_exit());
    }

    #[test]
    fn only_free_and_exit_are_passable() {
        let passable: Vec<_> = [
            ObservedTile::Road,
            ObservedTile::Wall,
            ObservedTile::Trap,
            ObservedTile::Start,
            ObservedTile::Finish,
        ]
        .into_iter()
        .map(TileBelief::from)
        .filter(|t| !t.is_blocking())
        .collect();

        assert_eq!(
            passable,
            vec![
                TileBelief::Known(TileKind::Free),
                TileBelief::Known(TileKind::Free),
                TileBelief::Known(TileKind::Exit),
            ]
        );
    }

    #[test]
    fn trap_is_blocking_trap() {
        let trap = TileBelief::from(ObservedTile::Trap);
        assert!(trap.is_trap());
        assert!(trap.is_blocking());
        assert!(!trap.is_exit());
    }
}

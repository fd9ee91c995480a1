use std::fmt;

use super::Coordinate;

/// absolute heading on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

/// a single 90 degree rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeDirection {
    Left,
    Right,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [Self::North, Self::East, Self::South, Self::West];

    pub fn left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    pub fn right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// unit step one tile forward
    pub fn unit(self) -> Coordinate {
        match self {
            Self::North => Coordinate::new(0, 1),
            Self::East => Coordinate::new(1, 0),
            Self::South => Coordinate::new(0, -1),
            Self::West => Coordinate::new(-1, 0),
        }
    }

    /// Rotates an offset expressed relative to a north-facing car into
    /// absolute grid space. Relative `+y` is straight ahead and relative
    /// `-x` is to the left, whatever the heading.
    pub fn rotate(self, offset: Coordinate) -> Coordinate {
        let Coordinate { x, y } = offset;
        match self {
            Self::North => Coordinate::new(x, y),
            Self::East => Coordinate::new(y, -x),
            Self::South => Coordinate::new(-x, -y),
            Self::West => Coordinate::new(-y, x),
        }
    }

    /// heading of a unit step from `a` to `b`, None for anything else
    pub fn between(a: Coordinate, b: Coordinate) -> Option<Self> {
        let delta = b - a;
        Self::ALL.into_iter().find(|o| o.unit() == delta)
    }

    /// the single 90 degree rotation that takes `self` to `target`
    pub fn turn_towards(self, target: Self) -> Option<RelativeDirection> {
        if self.left() == target {
            Some(RelativeDirection::Left)
        } else if target.left() == self {
            Some(RelativeDirection::Right)
        } else {
            None
        }
    }

    /// cardinal angle in degrees, east is zero and angles grow anticlockwise
    pub fn degrees(self) -> f32 {
        match self {
            Self::East => 0.0,
            Self::North => 90.0,
            Self::West => 180.0,
            Self::South => 270.0,
        }
    }

    /// nearest cardinal heading for an angle in degrees
    pub fn from_degrees(angle: f32) -> Self {
        let quadrant = (angle.rem_euclid(360.0) / 90.0).round() as i32 % 4;
        match quadrant {
            0 => Self::East,
            1 => Self::North,
            2 => Self::West,
            _ => Self::South,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(name)
    }
}

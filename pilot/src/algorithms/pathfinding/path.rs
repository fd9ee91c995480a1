use std::fmt;

use crate::maze::Coordinate;

/// waypoints from start to end, both inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Coordinate>);

impl Path {
    pub fn new(waypoints: Vec<Coordinate>) -> Self {
        Self(waypoints)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.0.get(index).copied()
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.0.first().copied()
    }

    pub fn end(&self) -> Option<Coordinate> {
        self.0.last().copied()
    }

    /// number of moves, one less than the number of waypoints
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// every consecutive pair is a unit axis-aligned step
    pub fn is_contiguous(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0].is_adjacent(pair[1]))
    }

    pub fn contains(&self, pos: Coordinate) -> bool {
        self.0.contains(&pos)
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.0
    }
}

impl From<Vec<Coordinate>> for Path {
    fn from(waypoints: Vec<Coordinate>) -> Self {
        Self(waypoints)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut waypoints = self.0.iter();
        if let Some(first) = waypoints.next() {
            write!(f, "{first}")?;
        }
        for pos in waypoints {
            write!(f, " -> {pos}")?;
        }
        Ok(())
    }
}

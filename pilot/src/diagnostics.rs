use std::fmt;

use crate::maze::{Coordinate, Orientation};

/// Invariant violations that must not stop the controller but should never
/// happen with a correct path finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// consecutive waypoints that are not a unit step apart
    MalformedPath { from: Coordinate, to: Coordinate },
    /// the car was somewhere else when path following started
    OffPathStart {
        expected: Coordinate,
        actual: Coordinate,
    },
    /// no single 90 degree turn gets from one heading to the other
    UnreachableTurn { from: Orientation, to: Orientation },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPath { from, to } => {
                write!(f, "no direction between {} and {}", from, to)
            }
            Self::OffPathStart { expected, actual } => {
                write!(f, "car not starting on path: at {}, path starts at {}", actual, expected)
            }
            Self::UnreachableTurn { from, to } => write!(f, "can't turn from {} to {}", from, to),
        }
    }
}

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// reports through the log facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::error!("{}", diagnostic);
    }
}

/// keeps every report, for inspection in tests
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.push(diagnostic);
    }
}

use std::collections::HashMap;

use crate::maze::{Coordinate, ObservedTile, Orientation};

/// The car as the simulation exposes it: telemetry, the bounded sensor view
/// and rate-limited actuation. Physics stays on the other side of this trait.
pub trait Vehicle {
    /// tile the car is currently on
    fn position(&self) -> Coordinate;

    /// heading in degrees, east is 0 and north is 90
    fn angle(&self) -> f32;

    /// speed, never negative
    fn velocity(&self) -> f32;

    /// cardinal the car is travelling along, the nearest one to its angle
    /// unless the simulation knows better
    fn orientation(&self) -> Orientation {
        Orientation::from_degrees(self.angle())
    }

    /// tiles currently in sensor range
    fn view(&self) -> HashMap<Coordinate, ObservedTile>;

    fn apply_forward_acceleration(&mut self);

    fn apply_reverse_acceleration(&mut self);

    fn apply_brake(&mut self);

    fn turn_left(&mut self, delta: f32);

    fn turn_right(&mut self, delta: f32);
}

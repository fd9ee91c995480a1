use std::{collections::HashMap, path::Path, str::FromStr};

use eyre::WrapErr;

use crate::maze::{Coordinate, ObservedTile, Orientation};

use super::Vehicle;

/// tiles visible in every direction around the car
pub const VIEW_RADIUS: i32 = 3;

/// tiles per second squared
const ACCELERATION: f32 = 1.5;
const DECELERATION: f32 = 3.0;
/// degrees per second of steering input while crawling or at rest
const TURN_RATE: f32 = 90.0;
/// degrees of steering per tile travelled, about a half tile turning radius
const ARC_RATE: f32 = 112.5;
/// top speed of the car itself, independent of any controller cap
const TOP_SPEED: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Throttle {
    Forward,
    Reverse,
    Brake,
}

/// Small kinematic simulator over an ASCII maze.
///
/// The car is a point mass that drives along a lane through the centres of
/// the tiles. Once steering brings the heading closer to another cardinal,
/// the car snaps onto that lane through its current tile, but only if there
/// is road on the side it is moving towards. Running into a wall stops it
/// dead. Traps are just road here.
#[derive(Debug, Clone)]
pub struct GridWorld {
    tiles: HashMap<Coordinate, ObservedTile>,
    width: i32,
    height: i32,
    start: Coordinate,
    exit: Option<Coordinate>,

    x: f32,
    y: f32,
    angle: f32,
    /// direction of the lane the car is on, the cardinal it reports
    lane: Orientation,
    /// signed, negative while rolling backwards
    speed: f32,
    throttle: Option<Throttle>,
    collisions: usize,
}

impl GridWorld {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read map {}", path.display()))?;
        text.parse()
    }

    /// starts facing `heading` instead of north
    pub fn with_heading(mut self, heading: Orientation) -> Self {
        self.angle = heading.degrees();
        self.lane = heading;
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn exit(&self) -> Option<Coordinate> {
        self.exit
    }

    pub fn tile(&self, pos: Coordinate) -> Option<ObservedTile> {
        self.tiles.get(&pos).copied()
    }

    /// every tile of the maze, for planning with full knowledge
    pub fn tiles(&self) -> &HashMap<Coordinate, ObservedTile> {
        &self.tiles
    }

    pub fn on_exit(&self) -> bool {
        self.tile(self.position()).is_some_and(|tile| tile.is_exit())
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    fn is_blocked(&self, pos: Coordinate) -> bool {
        self.tile(pos).is_none_or(|tile| tile == ObservedTile::Wall)
    }

    /// integrates the inputs received since the last step
    pub fn step(&mut self, delta: f32) {
        match self.throttle.take() {
            Some(Throttle::Forward) => self.push_speed(ACCELERATION * delta),
            Some(Throttle::Reverse) => self.push_speed(-ACCELERATION * delta),
            Some(Throttle::Brake) => {
                let slowed = (self.speed.abs() - DECELERATION * delta).max(0.0);
                self.speed = slowed.copysign(self.speed);
            }
            None => {}
        }

        let here = self.position();
        self.change_lane(here);

        if self.speed == 0.0 {
            return;
        }

        let unit = self.lane.unit();
        let (mut x, mut y) = (self.x, self.y);

        // stay centred on the cross axis
        if unit.x == 0 {
            x = here.x as f32;
        } else {
            y = here.y as f32;
        }
        x += unit.x as f32 * self.speed * delta;
        y += unit.y as f32 * self.speed * delta;

        let next = Coordinate::new(x.round() as i32, y.round() as i32);
        if self.is_blocked(next) {
            log::debug!("collided with {} at speed {:.2}", next, self.speed.abs());
            self.collisions += 1;
            self.speed = 0.0;
            return;
        }

        self.x = x;
        self.y = y;
    }

    fn change_lane(&mut self, here: Coordinate) {
        let heading = Orientation::from_degrees(self.angle);
        if heading == self.lane {
            return;
        }

        let towards = if self.speed < 0.0 { heading.opposite() } else { heading };
        if self.is_blocked(here + towards.unit()) {
            return;
        }

        log::trace!("lane {} -> {} at {}", self.lane, heading, here);
        self.lane = heading;
        self.x = here.x as f32;
        self.y = here.y as f32;
    }

    /// tighter at speed, as if steering along a fixed arc
    fn turn_rate(&self) -> f32 {
        (self.speed.abs() * ARC_RATE).max(TURN_RATE)
    }

    /// pushing against the direction of travel stops at exactly zero first
    fn push_speed(&mut self, change: f32) {
        let speed = self.speed + change;
        self.speed = if self.speed != 0.0 && speed.signum() != self.speed.signum() {
            0.0
        } else {
            speed.clamp(-TOP_SPEED, TOP_SPEED)
        };
    }
}

impl FromStr for GridWorld {
    type Err = eyre::Report;

    /// Rows run north to south. Rows may be ragged; anything past the end
    /// of a row is outside the maze.
    fn from_str(text: &str) -> eyre::Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end())
            .skip_while(|line| line.is_empty())
            .collect();
        let rows = match rows.iter().rposition(|line| !line.is_empty()) {
            Some(last) => &rows[..=last],
            None => eyre::bail!("map is empty"),
        };

        let height = rows.len() as i32;
        let mut width = 0;
        let mut tiles = HashMap::new();
        let mut start = None;
        let mut exit = None;

        for (row, line) in rows.iter().enumerate() {
            let y = height - 1 - row as i32;
            for (col, c) in line.chars().enumerate() {
                let Some(tile) = ObservedTile::from_char(c) else {
                    eyre::bail!("unknown tile {:?} at row {}, column {}", c, row, col);
                };
                let pos = Coordinate::new(col as i32, y);

                match tile {
                    ObservedTile::Start if start.is_some() => {
                        eyre::bail!("second start tile at row {}, column {}", row, col)
                    }
                    ObservedTile::Start => start = Some(pos),
                    ObservedTile::Finish if exit.is_none() => exit = Some(pos),
                    _ => {}
                }

                tiles.insert(pos, tile);
                width = width.max(col as i32 + 1);
            }
        }

        let Some(start) = start else {
            eyre::bail!("map has no start tile");
        };

        Ok(Self {
            tiles,
            width,
            height,
            start,
            exit,
            x: start.x as f32,
            y: start.y as f32,
            angle: Orientation::North.degrees(),
            lane: Orientation::North,
            speed: 0.0,
            throttle: None,
            collisions: 0,
        })
    }
}

impl Vehicle for GridWorld {
    fn position(&self) -> Coordinate {
        Coordinate::new(self.x.round() as i32, self.y.round() as i32)
    }

    fn angle(&self) -> f32 {
        self.angle
    }

    fn velocity(&self) -> f32 {
        self.speed.abs()
    }

    fn orientation(&self) -> Orientation {
        self.lane
    }

    fn view(&self) -> HashMap<Coordinate, ObservedTile> {
        let car = self.position();
        let mut view = HashMap::new();

        for dx in -VIEW_RADIUS..=VIEW_RADIUS {
            for dy in -VIEW_RADIUS..=VIEW_RADIUS {
                let pos = car + Coordinate::new(dx, dy);
                if let Some(tile) = self.tile(pos) {
                    view.insert(pos, tile);
                }
            }
        }
        view
    }

    fn apply_forward_acceleration(&mut self) {
        self.throttle = Some(Throttle::Forward);
    }

    fn apply_reverse_acceleration(&mut self) {
        self.throttle = Some(Throttle::Reverse);
    }

    fn apply_brake(&mut self) {
        self.throttle = Some(Throttle::Brake);
    }

    fn turn_left(&mut self, delta: f32) {
        self.angle = (self.angle + self.turn_rate() * delta).rem_euclid(360.0);
    }

    fn turn_right(&mut self, delta: f32) {
        self.angle = (self.angle - self.turn_rate() * delta).rem_euclid(360.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "\
#E#
#.#
#.#
#S#
###
";

    #[test]
    fn parses_rows_north_to_south() {
        let world: GridWorld = CORRIDOR.parse().unwrap();

        assert_eq!(world.width(), 3);
        assert_eq!(world.height(), 5);
        assert_eq!(world.start(), Coordinate::new(1, 1));
        assert_eq!(world.exit(), Some(Coordinate::new(1, 4)));
        assert_eq!(world.tile(Coordinate::new(0, 0)), Some(ObservedTile::Wall));
        assert_eq!(world.position(), world.start());
        assert_eq!(world.orientation(), Orientation::North);
    }

    #[test]
    fn rejects_bad_maps() {
        assert!("".parse::<GridWorld>().is_err());
        assert!("#.#\n#E#\n".parse::<GridWorld>().is_err());
        assert!("#S#\n#S#\n".parse::<GridWorld>().is_err());
        assert!("#S?\n".parse::<GridWorld>().is_err());
    }

    #[test]
    fn view_is_clipped_to_the_maze() {
        let world: GridWorld = CORRIDOR.parse().unwrap();
        let view = world.view();

        // the whole 3x5 maze fits in the window around (1, 1)
        assert_eq!(view.len(), 15);
        assert_eq!(view.get(&Coordinate::new(1, 4)), Some(&ObservedTile::Finish));
    }

    #[test]
    fn drives_forward_and_stops_at_walls() {
        let mut world: GridWorld = CORRIDOR.parse().unwrap();

        for _ in 0..200 {
            world.apply_forward_acceleration();
            world.step(0.05);
        }

        assert_eq!(world.position(), Coordinate::new(1, 4));
        assert!(world.on_exit());
        assert!(world.collisions() > 0);
    }

    #[test]
    fn reverse_thrust_stops_at_exactly_zero() {
        let mut world: GridWorld = CORRIDOR.parse().unwrap();
        world.apply_forward_acceleration();
        world.step(0.1);
        assert!(world.velocity() > 0.0);

        world.apply_reverse_acceleration();
        world.step(0.5);
        assert_eq!(world.velocity(), 0.0);
        assert_eq!(world.position(), Coordinate::new(1, 1));
    }

    #[test]
    fn steering_wraps_around() {
        let mut world: GridWorld = CORRIDOR.parse::<GridWorld>().unwrap().with_heading(Orientation::East);
        world.turn_right(0.5);
        assert_eq!(world.angle(), 315.0);
        world.turn_right(0.5);
        assert_eq!(world.angle(), 270.0);
    }

    #[test]
    fn changes_lane_only_onto_open_road() {
        // facing the corridor wall, then steering round to face up the corridor
        let mut world: GridWorld = CORRIDOR.parse::<GridWorld>().unwrap().with_heading(Orientation::East);
        assert_eq!(world.orientation(), Orientation::East);

        world.turn_left(0.6);
        assert_eq!(world.orientation(), Orientation::East);
        world.step(0.02);
        assert_eq!(world.orientation(), Orientation::North);

        // the corridor walls keep it in its lane
        world.turn_right(0.6);
        world.step(0.02);
        assert_eq!(Orientation::from_degrees(world.angle()), Orientation::East);
        assert_eq!(world.orientation(), Orientation::North);
    }

    #[test]
    fn turns_the_corner_inside_the_tile() {
        let mut world: GridWorld = "#####\n#S..#\n#.###\n#####\n".parse().unwrap();
        let start = world.start();

        for _ in 0..20 {
            world.apply_forward_acceleration();
            world.step(0.02);
        }
        assert_eq!(world.position(), start);
        assert_eq!(world.orientation(), Orientation::North);

        // blocked ahead, road to the right
        while world.orientation() == Orientation::North {
            world.turn_right(0.02);
            world.step(0.02);
            assert_eq!(world.collisions(), 0);
        }
        assert_eq!(world.orientation(), Orientation::East);
        assert_eq!(world.position(), start);
    }

    #[test]
    fn steers_harder_at_speed() {
        let mut world: GridWorld = CORRIDOR.parse().unwrap();
        world.turn_left(0.1);
        let at_rest = world.angle() - 90.0;

        for _ in 0..20 {
            world.apply_forward_acceleration();
            world.step(0.05);
        }
        let before = world.angle();
        world.turn_left(0.1);
        assert!(world.angle() - before > at_rest);
    }
}

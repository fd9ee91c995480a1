use std::collections::HashMap;

use super::{Coordinate, ObservedTile, Orientation, RelativeDirection, TileBelief};

/// Accumulated belief about the maze, grown from the car's bounded view.
///
/// Entries are never removed and a known tile is never re-derived. Reads
/// through [`MapModel::tile_at`] materialize an `Unknown` entry for unseen
/// coordinates; [`MapModel::lookup`] and [`MapModel::belief`] do not.
#[derive(Debug, Clone, Default)]
pub struct MapModel {
    tiles: HashMap<Coordinate, TileBelief>,
    exit: Option<Coordinate>,
}

impl MapModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrates one sensor snapshot. Known tiles are left alone, but an
    /// `Unknown` entry left behind by [`MapModel::tile_at`] is filled in once
    /// the tile comes into view.
    pub fn update<'a, I>(&mut self, view: I)
    where
        I: IntoIterator<Item = (&'a Coordinate, &'a ObservedTile)>,
    {
        for (&pos, &observed) in view {
            if self.tiles.get(&pos).is_some_and(|t| t.is_known()) {
                continue;
            }

            let tile = TileBelief::from(observed);
            self.tiles.insert(pos, tile);

            if tile.is_exit() && self.exit.is_none() {
                log::info!("exit spotted at {}", pos);
                self.exit = Some(pos);
            }
        }
    }

    pub fn lookup(&self, pos: Coordinate) -> Option<TileBelief> {
        self.tiles.get(&pos).copied()
    }

    /// returns Unknown if not yet explored, without recording the read
    pub fn belief(&self, pos: Coordinate) -> TileBelief {
        self.lookup(pos).unwrap_or_default()
    }

    /// records an Unknown entry for an unseen coordinate
    pub fn touch(&mut self, pos: Coordinate) -> TileBelief {
        *self.tiles.entry(pos).or_default()
    }

    pub fn tile_at(&mut self, pos: Coordinate) -> TileBelief {
        self.touch(pos)
    }

    /// Tile at an offset from the car, where `+y` is ahead and `-x` is left.
    pub fn tile_at_relative(
        &mut self,
        car: Coordinate,
        orientation: Orientation,
        rel_x: i32,
        rel_y: i32,
    ) -> TileBelief {
        let offset = orientation.rotate(Coordinate::new(rel_x, rel_y));
        self.tile_at(car + offset)
    }

    pub fn known_coordinates(&self) -> Vec<Coordinate> {
        self.tiles
            .iter()
            .filter(|(_, tile)| tile.is_known())
            .map(|(&pos, _)| pos)
            .collect()
    }

    /// Number of clear tiles one row ahead, scanning sideways from the car.
    pub fn space_in_direction(
        &mut self,
        car: Coordinate,
        orientation: Orientation,
        side: RelativeDirection,
    ) -> u32 {
        let step = match side {
            RelativeDirection::Left => -1,
            RelativeDirection::Right => 1,
        };

        let mut space = 0;
        while !self
            .tile_at_relative(car, orientation, (space as i32 + 1) * step, 1)
            .is_blocking()
        {
            space += 1;
        }

        space
    }

    /// Assumes the car is following a wall on its left: something blocks
    /// within two tiles ahead and there is little room to either side.
    pub fn dead_end_ahead(&mut self, car: Coordinate, orientation: Orientation) -> bool {
        let one_ahead = self.tile_at_relative(car, orientation, 0, 1);
        let two_ahead = self.tile_at_relative(car, orientation, 0, 2);

        if !one_ahead.is_blocking() && !two_ahead.is_blocking() {
            return false;
        }

        let left = self.space_in_direction(car, orientation, RelativeDirection::Left);
        let right = self.space_in_direction(car, orientation, RelativeDirection::Right);

        left <= 2 && right < 2
    }

    pub fn traps_ahead(&mut self, car: Coordinate, orientation: Orientation) -> bool {
        self.tile_at_relative(car, orientation, 0, 1).is_trap()
            || self.tile_at_relative(car, orientation, 0, 2).is_trap()
    }

    /// A lone trap one or two tiles ahead with something other than a trap
    /// behind it.
    pub fn traps_traversable(&mut self, car: Coordinate, orientation: Orientation) -> bool {
        let first = self.tile_at_relative(car, orientation, 0, 1).is_trap();
        let second = self.tile_at_relative(car, orientation, 0, 2).is_trap();
        let third = self.tile_at_relative(car, orientation, 0, 3).is_trap();

        (first && !second) || (!first && second && !third)
    }

    pub fn exit_found(&self) -> bool {
        self.exit.is_some()
    }

    pub fn exit(&self) -> Option<Coordinate> {
        self.exit
    }

    /// number of materialized entries, known or not
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// (min, max) corners of the known region
    pub fn bounds(&self) -> Option<(Coordinate, Coordinate)> {
        let mut known = self.known_coordinates().into_iter();
        let first = known.next()?;

        Some(known.fold((first, first), |(min, max), pos| {
            (
                Coordinate::new(min.x.min(pos.x), min.y.min(pos.y)),
                Coordinate::new(max.x.max(pos.x), max.y.max(pos.y)),
            )
        }))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::maze::TileKind;

    /// Builds a map from rows of maze text, first row northernmost, with the
    /// bottom-left character at (0, 0).
    pub(crate) fn map_from_rows(rows: &[&str]) -> MapModel {
        let mut map = MapModel::new();
        let height = rows.len() as i32;
        let mut view = HashMap::new();

        for (row, line) in rows.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                if let Some(tile) = ObservedTile::from_char(c) {
                    view.insert(Coordinate::new(col as i32, height - 1 - row as i32), tile);
                }
            }
        }

        map.update(&view);
        map
    }

    fn view(entries: &[((i32, i32), ObservedTile)]) -> HashMap<Coordinate, ObservedTile> {
        entries
            .iter()
            .map(|&(pos, tile)| (Coordinate::from(pos), tile))
            .collect()
    }

    #[test]
    fn known_tiles_never_change() {
        let mut map = MapModel::new();
        map.update(&view(&[((0, 0), ObservedTile::Road), ((1, 0), ObservedTile::Wall)]));
        map.update(&view(&[((0, 0), ObservedTile::Wall), ((1, 0), ObservedTile::Road)]));
        map.update(&view(&[((0, 0), ObservedTile::Trap), ((1, 0), ObservedTile::Finish)]));

        assert_eq!(map.belief((0, 0).into()), TileBelief::Known(TileKind::Free));
        assert_eq!(map.belief((1, 0).into()), TileBelief::Known(TileKind::Wall));
        assert!(!map.exit_found());
    }

    #[test]
    fn first_exit_wins() {
        let mut map = MapModel::new();
        map.update(&view(&[((3, 4), ObservedTile::Finish)]));
        map.update(&view(&[((9, 9), ObservedTile::Finish)]));

        assert!(map.exit_found());
        assert_eq!(map.exit(), Some(Coordinate::new(3, 4)));
        assert!(map.belief((9, 9).into()).is_exit());
    }

    #[test]
    fn exit_invariant_holds() {
        let mut map = map_from_rows(&["#E#", "#.#"]);
        let exit = map.exit().unwrap();
        assert!(map.tile_at(exit).is_exit());
    }

    #[test]
    fn touched_tile_can_still_become_known() {
        let mut map = MapModel::new();
        assert_eq!(map.tile_at((5, 5).into()), TileBelief::Unknown);

        map.update(&view(&[((5, 5), ObservedTile::Trap)]));
        assert!(map.belief((5, 5).into()).is_trap());
    }

    #[test]
    fn lookup_has_no_side_effect_but_tile_at_does() {
        let mut map = MapModel::new();
        assert_eq!(map.lookup((1, 1).into()), None);
        assert_eq!(map.belief((1, 1).into()), TileBelief::Unknown);
        assert!(map.is_empty());

        assert_eq!(map.tile_at((1, 1).into()), TileBelief::Unknown);
        assert_eq!(map.lookup((1, 1).into()), Some(TileBelief::Unknown));
        assert_eq!(map.len(), 1);
        assert!(map.known_coordinates().is_empty());
    }

    #[test]
    fn relative_lookup_follows_rotation_table() {
        let car = Coordinate::new(10, 10);
        let cases = [
            (Orientation::North, (0, 1), (10, 11)),
            (Orientation::North, (-1, 0), (9, 10)),
            (Orientation::North, (2, 3), (12, 13)),
            (Orientation::East, (0, 1), (11, 10)),
            (Orientation::East, (-1, 0), (10, 11)),
            (Orientation::East, (2, 3), (13, 8)),
            (Orientation::South, (0, 1), (10, 9)),
            (Orientation::South, (-1, 0), (11, 10)),
            (Orientation::South, (2, 3), (8, 7)),
            (Orientation::West, (0, 1), (9, 10)),
            (Orientation::West, (-1, 0), (10, 9)),
            (Orientation::West, (2, 3), (7, 12)),
        ];

        for (orientation, (rx, ry), (ax, ay)) in cases {
            let mut map = MapModel::new();
            map.update(&view(&[((ax, ay), ObservedTile::Trap)]));
            assert!(
                map.tile_at_relative(car, orientation, rx, ry).is_trap(),
                "{orientation} ({rx}, {ry}) should land on ({ax}, {ay})"
            );
        }
    }

    #[test]
    fn space_counts_clear_tiles_to_the_side() {
        // car at (5, 0) facing north, open row at y = 1
        let mut map = map_from_rows(&["###########", "...........", "#####.#####"]);
        let car = Coordinate::new(5, 0);

        assert_eq!(map.space_in_direction(car, Orientation::North, RelativeDirection::Left), 5);
        assert_eq!(map.space_in_direction(car, Orientation::North, RelativeDirection::Right), 5);
    }

    #[test]
    fn space_is_zero_when_immediately_blocked() {
        let mut map = map_from_rows(&["###", "#.#", "#.#"]);
        let car = Coordinate::new(1, 0);

        assert_eq!(map.space_in_direction(car, Orientation::North, RelativeDirection::Left), 0);
        assert_eq!(map.space_in_direction(car, Orientation::North, RelativeDirection::Right), 0);
    }

    #[test]
    fn space_stops_at_unknown() {
        let mut map = map_from_rows(&["..", ".."]);
        let car = Coordinate::new(0, 0);
        assert_eq!(map.space_in_direction(car, Orientation::North, RelativeDirection::Right), 1);
    }

    #[test]
    fn dead_end_with_tight_sides() {
        // car at (2, 0) facing north: walls 1 and 2 ahead, 2 clear on the left, 1 on the right
        let mut map = map_from_rows(&["#####", "..#.#", "##.##"]);
        let car = Coordinate::new(2, 0);

        assert!(map.tile_at_relative(car, Orientation::North, 0, 1).is_blocking());
        assert!(map.tile_at_relative(car, Orientation::North, 0, 2).is_blocking());
        assert_eq!(map.space_in_direction(car, Orientation::North, RelativeDirection::Left), 2);
        assert_eq!(map.space_in_direction(car, Orientation::North, RelativeDirection::Right), 1);
        assert!(map.dead_end_ahead(car, Orientation::North));
    }

    #[test]
    fn no_dead_end_when_ahead_is_open() {
        let mut map = map_from_rows(&["#.#", "#.#", "#.#"]);
        assert!(!map.dead_end_ahead(Coordinate::new(1, 0), Orientation::North));
    }

    #[test]
    fn no_dead_end_with_room_on_the_right() {
        let mut map = map_from_rows(&["######", "..#..#", "##.###"]);
        let car = Coordinate::new(2, 0);
        assert_eq!(map.space_in_direction(car, Orientation::North, RelativeDirection::Right), 2);
        assert!(!map.dead_end_ahead(car, Orientation::North));
    }

    #[test]
    fn dead_end_seen_from_other_headings() {
        // the same pocket, entered heading east from (0, 2)
        let mut map = map_from_rows(&["#.#", "#.#", ".##", "##"]);
        let car = Coordinate::new(0, 1);
        assert!(map.dead_end_ahead(car, Orientation::East));
    }

    #[test]
    fn trap_lookahead() {
        // facing north from (0, 0)
        let cases = [
            (".~..", true, true),
            ("..~.", true, true),
            ("..~~", true, false),
            (".~~.", true, false),
            ("....", false, false),
        ];

        for (column, ahead, traversable) in cases {
            let rows: Vec<String> = column.chars().rev().map(String::from).collect();
            let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
            let mut map = map_from_rows(&rows);
            let car = Coordinate::new(0, 0);

            assert_eq!(map.traps_ahead(car, Orientation::North), ahead, "{column}");
            assert_eq!(
                map.traps_ahead(car, Orientation::North)
                    && map.traps_traversable(car, Orientation::North),
                traversable,
                "{column}"
            );
        }
    }

    #[test]
    fn bounds_cover_known_region() {
        let mut map = map_from_rows(&["#.", ".#"]);
        map.touch((50, 50).into());
        assert_eq!(
            map.bounds(),
            Some((Coordinate::new(0, 0), Coordinate::new(1, 1)))
        );
        assert_eq!(MapModel::new().bounds(), None);
    }
}

use std::collections::{HashMap, HashSet, VecDeque};

use crate::maze::{Coordinate, MapModel};

use super::Path;

/// whether trap tiles may be driven over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapPolicy {
    Avoid,
    Permit,
}

/// Route to the exit over what has been seen so far. Tries to stay off
/// traps first and only drives over them if there is no other way.
pub fn find_path(start: Coordinate, end: Coordinate, map: &MapModel) -> Option<Path> {
    breadth_first(start, end, map, TrapPolicy::Avoid).or_else(|| {
        log::debug!("no trap-free route to {}, allowing traps", end);
        breadth_first(start, end, map, TrapPolicy::Permit)
    })
}

/// Unweighted shortest path over known tiles only. The end tile is accepted
/// as soon as it is dequeued; every other tile must be passable to be
/// expanded, including the start.
pub fn breadth_first(
    start: Coordinate,
    end: Coordinate,
    map: &MapModel,
    policy: TrapPolicy,
) -> Option<Path> {
    let known: HashSet<Coordinate> = map.known_coordinates().into_iter().collect();

    let mut queue = VecDeque::new();
    let mut searched = HashSet::new();
    let mut came_from: HashMap<Coordinate, Coordinate> = HashMap::new();

    queue.push_back(start);
    searched.insert(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            return Some(reconstruct_path(&came_from, start, end));
        }

        let tile = map.belief(current);
        let trap_allowed = policy == TrapPolicy::Permit && tile.is_trap();
        if tile.is_blocking() && !trap_allowed {
            continue;
        }

        for neighbor in current.neighbors() {
            if known.contains(&neighbor) && searched.insert(neighbor) {
                came_from.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    None
}

fn reconstruct_path(
    came_from: &HashMap<Coordinate, Coordinate>,
    start: Coordinate,
    end: Coordinate,
) -> Path {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        if let Some(&prev) = came_from.get(&current) {
            path.push(prev);
            current = prev;
        } else {
            break;
        }
    }

    path.reverse();
    Path::new(path)
}

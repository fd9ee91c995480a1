use crate::{
    algorithms::{Intent, Observation},
    config::ExplorerConfig,
    maze::{Coordinate, MapModel, Orientation, RelativeDirection},
};

use super::ExplorerState;

/// Wall follower using the left-hand rule, with dead end and trap handling.
///
/// Never decides that exploring is over; the owner swaps it out once a
/// route to the exit exists.
#[derive(Debug, Clone)]
pub struct WallFollower {
    config: ExplorerConfig,
    state: ExplorerState,
    just_reversed: bool,
}

impl WallFollower {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            config,
            state: ExplorerState::Normal,
            just_reversed: false,
        }
    }

    pub fn state(&self) -> ExplorerState {
        self.state
    }

    pub fn update(&mut self, map: &mut MapModel, obs: &Observation) -> Vec<Intent> {
        log::trace!("explorer {} at {}", self.state.name(), obs.position);

        let mut intents = Vec::new();
        match self.state {
            ExplorerState::Normal => self.update_normal(map, obs, &mut intents),
            ExplorerState::WallFollowing => self.update_wall_following(map, obs, &mut intents),
            ExplorerState::JustTurnedLeft { since } => {
                self.update_just_turned_left(map, obs, since)
            }
            ExplorerState::PassingTrap => self.update_passing_trap(map, obs, &mut intents),
        }
        intents
    }

    fn set_state(&mut self, state: ExplorerState) {
        if self.state.name() != state.name() {
            log::debug!("explorer: {} -> {}", self.state.name(), state.name());
        }
        self.state = state;
    }

    /// anything blocking within the wall threshold straight along `direction`
    fn check_in_direction(&self, map: &mut MapModel, car: Coordinate, direction: Orientation) -> bool {
        (1..=self.config.wall_threshold)
            .any(|i| map.tile_at_relative(car, direction, 0, i).is_blocking())
    }

    fn check_following_wall(
        &self,
        map: &mut MapModel,
        car: Coordinate,
        orientation: Orientation,
    ) -> bool {
        // a trap on the left with open road behind it is a gap, not a wall
        if map.tile_at_relative(car, orientation, -1, 0).is_trap()
            && !map.tile_at_relative(car, orientation, -2, 0).is_blocking()
        {
            return false;
        }

        (1..=self.config.wall_threshold)
            .any(|i| map.tile_at_relative(car, orientation, -i, 0).is_blocking())
    }

    fn update_normal(&mut self, map: &mut MapModel, obs: &Observation, intents: &mut Vec<Intent>) {
        if self.check_in_direction(map, obs.position, Orientation::North) {
            if obs.orientation != Orientation::East {
                intents.push(Intent::Turn(RelativeDirection::Right));
            } else {
                self.set_state(ExplorerState::WallFollowing);
            }
        } else if obs.orientation != Orientation::North {
            intents.push(Intent::Turn(RelativeDirection::Left));
        }
    }

    fn update_wall_following(
        &mut self,
        map: &mut MapModel,
        obs: &Observation,
        intents: &mut Vec<Intent>,
    ) {
        let (pos, orientation) = (obs.position, obs.orientation);

        if self.check_following_wall(map, pos, orientation) {
            if map.traps_ahead(pos, orientation) && map.traps_traversable(pos, orientation) {
                intents.push(Intent::SetSpeedTarget(self.config.trap_speed));
                self.set_state(ExplorerState::PassingTrap);
            } else if map.dead_end_ahead(pos, orientation) {
                self.deal_with_dead_end(map, obs, intents);
            } else if self.check_in_direction(map, pos, orientation) {
                intents.push(Intent::Turn(RelativeDirection::Right));
            }
        } else if self.just_reversed {
            // reversed away from a lone obstacle, turn around properly
            intents.push(Intent::Spin(RelativeDirection::Left));
            intents.push(Intent::ToggleReverse);
            self.just_reversed = false;
        } else {
            intents.push(Intent::Turn(RelativeDirection::Left));
            self.set_state(ExplorerState::JustTurnedLeft { since: pos });
        }
    }

    /// u-turn, three point turn or reverse out, depending on the room
    fn deal_with_dead_end(&mut self, map: &mut MapModel, obs: &Observation, intents: &mut Vec<Intent>) {
        let (pos, orientation) = (obs.position, obs.orientation);
        let right = map.space_in_direction(pos, orientation, RelativeDirection::Right);
        let left = map.space_in_direction(pos, orientation, RelativeDirection::Left);

        log::debug!("dead end at {}: {} left, {} right", pos, left, right);

        if right > 1 {
            intents.push(Intent::UTurn(RelativeDirection::Right));
            self.set_state(ExplorerState::JustTurnedLeft { since: pos });
        } else if left >= 1 {
            intents.push(Intent::ThreePointTurn(RelativeDirection::Right));
            self.set_state(ExplorerState::JustTurnedLeft { since: pos });
        } else {
            self.just_reversed = true;
            intents.push(Intent::ToggleReverse);
        }
    }

    fn update_just_turned_left(&mut self, map: &mut MapModel, obs: &Observation, since: Coordinate) {
        if obs.position != since && self.check_following_wall(map, obs.position, obs.orientation) {
            self.set_state(ExplorerState::WallFollowing);
        }
    }

    fn update_passing_trap(
        &mut self,
        map: &mut MapModel,
        obs: &Observation,
        intents: &mut Vec<Intent>,
    ) {
        if !map.traps_ahead(obs.position, obs.orientation) && !map.tile_at(obs.position).is_trap() {
            intents.push(Intent::ResetSpeedTarget);
            self.set_state(ExplorerState::WallFollowing);
        }
    }
}

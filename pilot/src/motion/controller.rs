use crate::{
    algorithms::Intent,
    config::MotionConfig,
    maze::{Orientation, RelativeDirection},
    sim::Vehicle,
};

use super::action::{Action, ActionState};

/// headings the car straightens up towards, 360 included so angles just
/// under a full turn snap back to east
const CARDINALS: [f32; 5] = [0.0, 90.0, 180.0, 270.0, 360.0];

/// Expands intents into multi-tick sequences of primitive actuation calls.
#[derive(Debug, Clone)]
pub struct MotionController {
    config: MotionConfig,
    actions: ActionState,
    reversing: bool,
    speed_target: f32,
    previous_speed_target: f32,
    /// orientation when the current turn started
    turn_from: Option<Orientation>,
    direction: RelativeDirection,
}

impl MotionController {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            actions: ActionState::new(Action::Go),
            reversing: false,
            speed_target: config.max_speed,
            previous_speed_target: config.max_speed,
            turn_from: None,
            direction: RelativeDirection::Left,
        }
    }

    pub fn action(&self) -> Action {
        self.actions.current()
    }

    pub fn stage(&self) -> u8 {
        self.actions.stage()
    }

    pub fn actions(&self) -> &ActionState {
        &self.actions
    }

    /// true when decision logic may issue new intents
    pub fn is_idle(&self) -> bool {
        self.actions.is_idle()
    }

    pub fn reverse_mode(&self) -> bool {
        self.reversing
    }

    pub fn speed_target(&self) -> f32 {
        self.speed_target
    }

    /// heading in the direction of travel, flipped while reversing
    pub fn orientation(&self, vehicle: &impl Vehicle) -> Orientation {
        let heading = vehicle.orientation();
        if self.reversing { heading.opposite() } else { heading }
    }

    pub fn apply(&mut self, intent: Intent, vehicle: &impl Vehicle) {
        log::debug!("intent {:?}", intent);
        match intent {
            Intent::Turn(direction) => self.perform_turn(direction, vehicle),
            Intent::UTurn(direction) => self.perform_u_turn(direction, vehicle),
            Intent::Spin(direction) => self.perform_spin(direction, vehicle),
            Intent::ThreePointTurn(direction) => self.perform_three_point_turn(direction, vehicle),
            Intent::ToggleReverse => self.toggle_reverse_mode(),
            Intent::SetSpeedTarget(speed) => self.set_speed_target(speed),
            Intent::ResetSpeedTarget => self.reset_speed_target(),
        }
    }

    pub fn perform_turn(&mut self, direction: RelativeDirection, vehicle: &impl Vehicle) {
        self.turn_from = Some(self.orientation(vehicle));
        self.direction = direction;
        self.actions.push(Action::Turn);
    }

    pub fn perform_u_turn(&mut self, direction: RelativeDirection, vehicle: &impl Vehicle) {
        self.turn_from = Some(self.orientation(vehicle));
        self.direction = direction;
        self.actions.push(Action::UTurn);
        self.set_speed_target(self.config.u_turn_speed);
    }

    /// a u-turn taken slowly enough to pivot on the spot
    pub fn perform_spin(&mut self, direction: RelativeDirection, vehicle: &impl Vehicle) {
        self.turn_from = Some(self.orientation(vehicle));
        self.direction = direction;
        self.actions.push(Action::UTurn);
        self.set_speed_target(self.config.spin_speed);
    }

    pub fn perform_three_point_turn(&mut self, direction: RelativeDirection, vehicle: &impl Vehicle) {
        self.turn_from = Some(self.orientation(vehicle));
        self.direction = direction;
        self.actions.push(Action::ThreePointTurn);
        self.set_speed_target(self.config.three_point_speed);
        self.toggle_reverse_mode();
    }

    pub fn toggle_reverse_mode(&mut self) {
        self.reversing = !self.reversing;
        log::debug!("reverse mode {}", if self.reversing { "on" } else { "off" });
    }

    /// the new target is capped at max speed, the old one is kept for
    /// [`Self::reset_speed_target`]
    pub fn set_speed_target(&mut self, speed: f32) {
        self.previous_speed_target = self.speed_target;
        self.speed_target = speed.min(self.config.max_speed);
    }

    pub fn reset_speed_target(&mut self) {
        self.speed_target = self.previous_speed_target;
    }

    /// runs one tick of the current action
    pub fn update(&mut self, delta: f32, vehicle: &mut impl Vehicle) {
        match self.actions.current() {
            Action::Stop => self.update_stop(delta, vehicle),
            Action::Go => self.update_go(delta, vehicle),
            Action::Turn => self.update_turn(delta, vehicle),
            Action::UTurn => self.update_u_turn(vehicle),
            Action::ThreePointTurn => self.update_three_point_turn(vehicle),
        }
    }

    fn update_stop(&mut self, delta: f32, vehicle: &mut impl Vehicle) {
        self.readjust(delta, vehicle);
        if vehicle.velocity() > 0.0 {
            vehicle.apply_brake();
        }
    }

    fn update_go(&mut self, delta: f32, vehicle: &mut impl Vehicle) {
        self.readjust(delta, vehicle);
        if vehicle.velocity() < self.speed_target {
            self.accelerate(vehicle);
        } else {
            vehicle.apply_brake();
        }
    }

    fn update_turn(&mut self, delta: f32, vehicle: &mut impl Vehicle) {
        if vehicle.velocity() < self.speed_target {
            self.accelerate(vehicle);
        }
        if self.turn_from != Some(self.orientation(&*vehicle)) {
            self.actions.finish();
        }
        self.steer(self.direction, delta, vehicle);
    }

    fn update_u_turn(&mut self, vehicle: &mut impl Vehicle) {
        match self.actions.stage() {
            0 => {
                if vehicle.velocity() > self.speed_target {
                    vehicle.apply_brake();
                } else {
                    self.actions.advance();
                }
            }
            1 | 2 => {
                self.actions.advance();
                self.perform_turn(self.direction, &*vehicle);
            }
            3 => {
                self.reset_speed_target();
                self.actions.finish();
            }
            _ => {}
        }
    }

    fn update_three_point_turn(&mut self, vehicle: &mut impl Vehicle) {
        let velocity = vehicle.velocity();
        let target = self.speed_target;

        match self.actions.stage() {
            // still rolling forward, reverse thrust brings it to a halt
            0 => {
                if velocity == 0.0 {
                    self.actions.advance();
                }
                self.accelerate(vehicle);
            }
            // reverse until close to the target, speed stands in for distance
            1 => {
                if velocity > target - self.config.speed_buffer {
                    self.actions.advance();
                }
                self.accelerate(vehicle);
            }
            2 => {
                if velocity > target {
                    vehicle.apply_brake();
                } else if velocity < target * self.config.speed_multiple {
                    self.accelerate(vehicle);
                } else {
                    self.actions.advance();
                    self.perform_turn(self.direction, &*vehicle);
                }
            }
            3 => {
                if velocity > 0.0 {
                    vehicle.apply_brake();
                } else {
                    self.actions.advance();
                    self.toggle_reverse_mode();
                }
            }
            4 => {
                if velocity < target {
                    self.accelerate(vehicle);
                } else {
                    self.actions.advance();
                }
            }
            5 => {
                self.actions.advance();
                self.perform_turn(self.direction, &*vehicle);
            }
            6 => {
                self.reset_speed_target();
                self.actions.finish();
            }
            _ => {}
        }
    }

    /// nudges the heading back onto the nearest cardinal
    fn readjust(&self, delta: f32, vehicle: &mut impl Vehicle) {
        let misaligned = degrees_misaligned(vehicle.angle());
        if misaligned > self.config.misaligned_threshold {
            vehicle.turn_left(delta);
        } else if misaligned < -self.config.misaligned_threshold {
            vehicle.turn_right(delta);
        }
    }

    fn steer(&self, direction: RelativeDirection, delta: f32, vehicle: &mut impl Vehicle) {
        match direction {
            RelativeDirection::Left => vehicle.turn_left(delta),
            RelativeDirection::Right => vehicle.turn_right(delta),
        }
    }

    fn accelerate(&self, vehicle: &mut impl Vehicle) {
        if self.reversing {
            vehicle.apply_reverse_acceleration();
        } else {
            vehicle.apply_forward_acceleration();
        }
    }
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

/// signed degrees to the nearest cardinal, positive means turn left
fn degrees_misaligned(angle: f32) -> f32 {
    let angle = angle.rem_euclid(360.0);
    CARDINALS
        .iter()
        .map(|cardinal| cardinal - angle)
        .fold(f32::INFINITY, |best, offset| {
            if offset.abs() < best.abs() { offset } else { best }
        })
}

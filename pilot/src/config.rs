/// Tunables for every part of the pilot. The defaults are tuned for the
/// simulator's tile size and physics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PilotConfig {
    pub motion: MotionConfig,
    pub explorer: ExplorerConfig,
    pub follower: FollowerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    /// hard cap on any speed target
    pub max_speed: f32,
    /// fraction of the target that counts as up to speed before a turn
    pub speed_multiple: f32,
    /// how close to the target reversing speed the first leg of a
    /// three point turn has to get
    pub speed_buffer: f32,
    pub u_turn_speed: f32,
    pub spin_speed: f32,
    pub three_point_speed: f32,
    /// degrees off a cardinal heading before the car straightens up
    pub misaligned_threshold: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_speed: 2.0,
            speed_multiple: 0.8,
            speed_buffer: 0.3,
            u_turn_speed: 0.8,
            spin_speed: 0.1,
            three_point_speed: 0.4,
            misaligned_threshold: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorerConfig {
    /// tiles between car and wall before a wall counts
    pub wall_threshold: i32,
    /// requested while crossing a trap, still capped by max speed
    pub trap_speed: f32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            wall_threshold: 2,
            trap_speed: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerConfig {
    pub forward_speed: f32,
    pub reverse_speed: f32,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            forward_speed: 0.8,
            reverse_speed: 0.5,
        }
    }
}

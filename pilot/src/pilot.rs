use crate::{
    algorithms::{
        Intent, Observation,
        exploration::WallFollower,
        following::PathFollower,
        pathfinding::find_path,
    },
    config::PilotConfig,
    diagnostics::{DiagnosticSink, LogSink},
    maze::MapModel,
    motion::MotionController,
    sim::Vehicle,
};

/// What the pilot is currently trying to do. Exiting is final.
#[derive(Debug, Clone)]
pub enum ControlStrategy {
    Exploring(WallFollower),
    Exiting(PathFollower),
}

impl ControlStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exploring(_) => "exploring",
            Self::Exiting(_) => "exiting",
        }
    }

    fn decide<S: DiagnosticSink>(
        &mut self,
        map: &mut MapModel,
        obs: &Observation,
        sink: &mut S,
    ) -> Vec<Intent> {
        match self {
            Self::Exploring(explorer) => explorer.update(map, obs),
            Self::Exiting(follower) => follower.update(obs, sink),
        }
    }
}

/// Owns the map, the active strategy and the motion controller, and drives
/// them once per simulation tick.
#[derive(Debug)]
pub struct Pilot<S: DiagnosticSink = LogSink> {
    config: PilotConfig,
    map: MapModel,
    strategy: ControlStrategy,
    motion: MotionController,
    sink: S,
}

impl Pilot {
    pub fn new(config: PilotConfig) -> Self {
        Self::with_sink(config, LogSink)
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new(PilotConfig::default())
    }
}

impl<S: DiagnosticSink> Pilot<S> {
    pub fn with_sink(config: PilotConfig, sink: S) -> Self {
        Self {
            config,
            map: MapModel::new(),
            strategy: ControlStrategy::Exploring(WallFollower::new(config.explorer)),
            motion: MotionController::new(config.motion),
            sink,
        }
    }

    pub fn map(&self) -> &MapModel {
        &self.map
    }

    pub fn strategy(&self) -> &ControlStrategy {
        &self.strategy
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_exiting(&self) -> bool {
        matches!(self.strategy, ControlStrategy::Exiting(_))
    }

    /// true once the path to the exit has been driven to its end
    pub fn is_finished(&self) -> bool {
        matches!(&self.strategy, ControlStrategy::Exiting(follower) if follower.is_done())
    }

    /// one simulation tick
    pub fn update(&mut self, delta: f32, vehicle: &mut impl Vehicle) {
        self.map.update(&vehicle.view());

        // decisions wait until compound actions have played out
        if self.motion.is_idle() {
            let obs = Observation {
                position: vehicle.position(),
                orientation: self.motion.orientation(&*vehicle),
                reversing: self.motion.reverse_mode(),
            };

            for intent in self.strategy.decide(&mut self.map, &obs, &mut self.sink) {
                self.motion.apply(intent, &*vehicle);
            }

            self.try_exit(&obs);
        }

        self.motion.update(delta, vehicle);
    }

    fn try_exit(&mut self, obs: &Observation) {
        if self.is_exiting() {
            return;
        }
        let Some(exit) = self.map.exit() else {
            return;
        };

        match find_path(obs.position, exit, &self.map) {
            Some(path) => {
                log::info!("route to exit found, {} steps from {}", path.steps(), obs.position);
                log::debug!("route: {}", path);
                self.strategy = ControlStrategy::Exiting(PathFollower::new(path, self.config.follower));
            }
            None => log::trace!("exit at {} not reachable yet", exit),
        }
    }
}

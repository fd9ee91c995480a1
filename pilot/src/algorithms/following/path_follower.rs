use crate::{
    algorithms::{Intent, Observation, pathfinding::Path},
    config::FollowerConfig,
    diagnostics::{Diagnostic, DiagnosticSink},
    maze::{Coordinate, Orientation},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// not seen the car yet
    Pending,
    /// reversing one tile to get room to turn onto the path
    BackingUp { target: Coordinate },
    Following,
    Done,
}

/// Drives a precomputed path tile by tile, turning at each waypoint where
/// the heading has to change.
#[derive(Debug, Clone)]
pub struct PathFollower {
    config: FollowerConfig,
    path: Path,
    phase: Phase,
    position: Option<Coordinate>,
    /// index of the waypoint the car is heading for
    next: usize,
}

impl PathFollower {
    pub fn new(path: Path, config: FollowerConfig) -> Self {
        Self {
            config,
            path,
            phase: Phase::Pending,
            position: None,
            next: 1,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn is_backing_up(&self) -> bool {
        matches!(self.phase, Phase::BackingUp { .. })
    }

    pub fn next_waypoint(&self) -> Option<Coordinate> {
        self.path.get(self.next)
    }

    pub fn update(&mut self, obs: &Observation, sink: &mut impl DiagnosticSink) -> Vec<Intent> {
        let mut intents = Vec::new();

        let phase = self.phase;
        match phase {
            Phase::Pending => self.initialise(obs, sink, &mut intents),
            Phase::Done => {}
            _ if !self.position_changed(obs.position) => {}
            Phase::BackingUp { target } => {
                if obs.position == target {
                    log::debug!("backed up to {}, heading back onto the path", target);
                    intents.push(Intent::ToggleReverse);
                    intents.push(self.regulated_speed(!obs.reversing));
                    self.phase = Phase::Following;
                    self.next = 0;
                }
            }
            Phase::Following => self.follow(obs, sink, &mut intents),
        }

        intents
    }

    fn position_changed(&mut self, position: Coordinate) -> bool {
        if self.position == Some(position) {
            return false;
        }
        self.position = Some(position);
        true
    }

    fn regulated_speed(&self, reversing: bool) -> Intent {
        if reversing {
            Intent::SetSpeedTarget(self.config.reverse_speed)
        } else {
            Intent::SetSpeedTarget(self.config.forward_speed)
        }
    }

    fn finish(&mut self, intents: &mut Vec<Intent>) {
        log::info!("reached end of path after {} steps", self.path.steps());
        intents.push(Intent::SetSpeedTarget(0.0));
        self.phase = Phase::Done;
    }

    fn initialise(
        &mut self,
        obs: &Observation,
        sink: &mut impl DiagnosticSink,
        intents: &mut Vec<Intent>,
    ) {
        self.position = Some(obs.position);
        self.phase = Phase::Following;

        if let Some(start) = self.path.start()
            && start != obs.position
        {
            sink.report(Diagnostic::OffPathStart {
                expected: start,
                actual: obs.position,
            });
        }

        let (Some(first), Some(second)) = (self.path.get(0), self.path.get(1)) else {
            self.finish(intents);
            return;
        };

        let mut reversing = obs.reversing;
        match Orientation::between(first, second) {
            Some(start_dir) if start_dir != obs.orientation => {
                // back up a tile to make room for the turn, unless the tile
                // behind is already the next one on the path
                let behind = obs.position - obs.orientation.unit();
                intents.push(Intent::ToggleReverse);
                reversing = !reversing;

                if behind != second {
                    log::debug!("facing {}, backing up to {} first", obs.orientation, behind);
                    self.phase = Phase::BackingUp { target: behind };
                } else {
                    log::debug!("path starts behind the car, driving it in reverse");
                }
            }
            Some(_) => {}
            None => sink.report(Diagnostic::MalformedPath {
                from: first,
                to: second,
            }),
        }

        intents.push(self.regulated_speed(reversing));
    }

    fn follow(&mut self, obs: &Observation, sink: &mut impl DiagnosticSink, intents: &mut Vec<Intent>) {
        if self.path.end() == Some(obs.position) {
            self.finish(intents);
            return;
        }

        let (Some(reached), Some(upcoming)) = (self.path.get(self.next), self.path.get(self.next + 1))
        else {
            return;
        };

        if reached != obs.position {
            log::trace!("off waypoint at {}, expecting {}", obs.position, reached);
            return;
        }
        self.next += 1;

        let Some(required) = Orientation::between(reached, upcoming) else {
            sink.report(Diagnostic::MalformedPath {
                from: reached,
                to: upcoming,
            });
            return;
        };

        if obs.orientation == required {
            return;
        }

        match obs.orientation.turn_towards(required) {
            Some(direction) => intents.push(Intent::Turn(direction)),
            None => sink.report(Diagnostic::UnreachableTurn {
                from: obs.orientation,
                to: required,
            }),
        }
    }
}

/// primitive actions the motion controller can be carrying out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Stop,
    Go,
    Turn,
    UTurn,
    ThreePointTurn,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Go => "go",
            Self::Turn => "turn",
            Self::UTurn => "u-turn",
            Self::ThreePointTurn => "three point turn",
        }
    }
}

/// an action together with how far through its stages it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionFrame {
    pub action: Action,
    pub stage: u8,
}

impl ActionFrame {
    fn new(action: Action) -> Self {
        Self { action, stage: 0 }
    }
}

/// Current action plus the actions it interrupted. Compound actions span
/// many ticks, so resumption is an explicit stack rather than recursion.
#[derive(Debug, Clone)]
pub struct ActionState {
    current: ActionFrame,
    suspended: Vec<ActionFrame>,
}

impl ActionState {
    pub fn new(initial: Action) -> Self {
        Self {
            current: ActionFrame::new(initial),
            suspended: Vec::new(),
        }
    }

    pub fn current(&self) -> Action {
        self.current.action
    }

    pub fn stage(&self) -> u8 {
        self.current.stage
    }

    pub fn advance(&mut self) {
        self.current.stage += 1;
    }

    /// only Stop and Go leave room for new decisions
    pub fn is_idle(&self) -> bool {
        matches!(self.current.action, Action::Stop | Action::Go)
    }

    pub fn depth(&self) -> usize {
        self.suspended.len()
    }

    pub fn suspended(&self) -> impl Iterator<Item = Action> + '_ {
        self.suspended.iter().rev().map(|frame| frame.action)
    }

    /// suspends the current action and starts `action` from its first stage
    pub fn push(&mut self, action: Action) {
        log::trace!("action {} -> {}", self.current.action.name(), action.name());
        self.suspended.push(self.current);
        self.current = ActionFrame::new(action);
    }

    /// resumes whatever was interrupted, or stops if nothing was
    pub fn finish(&mut self) {
        let resumed = self
            .suspended
            .pop()
            .unwrap_or_else(|| ActionFrame::new(Action::Stop));
        log::trace!("action {} done, resuming {}", self.current.action.name(), resumed.action.name());
        self.current = resumed;
    }
}

impl Default for ActionState {
    fn default() -> Self {
        Self::new(Action::Go)
    }
}

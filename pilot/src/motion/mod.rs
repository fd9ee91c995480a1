mod action;
mod controller;

pub use action::{Action, ActionFrame, ActionState};
pub use controller::MotionController;

#[cfg(test)]
pub(crate) use controller::tests::FakeCar;

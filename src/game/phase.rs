// Menu / Playing / GameOver transitions driven by input
//
// Playing -> GameOver is decided by the simulation step itself; this module
// only covers the two transitions a key press can cause.

use super::input::{Action, InputSnapshot};
use super::state::Phase;

/// A transition requested by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Menu -> Playing
    Start,
    /// GameOver -> Menu, with everything back at initial values
    Reset,
}

/// Which transition, if any, the held keys ask for in `phase`
pub fn trigger_for(phase: Phase, input: &InputSnapshot) -> Option<Trigger> {
    match phase {
        Phase::Menu if input.is_active(Action::Start) => Some(Trigger::Start),
        Phase::GameOver if input.is_active(Action::Restart) => Some(Trigger::Reset),
        _ => None,
    }
}

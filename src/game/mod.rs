pub mod input;
pub mod keyboard;
pub mod phase;
pub mod physics;
pub mod state;
pub mod store;

pub use input::{Action, InputSampler, KeyMap};
pub use keyboard::TerminalKeys;
pub use phase::{trigger_for, Trigger};
pub use physics::{step, Effect};
pub use state::{GameState, Phase, Side};
pub use store::GameStore;

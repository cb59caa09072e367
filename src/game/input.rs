use std::collections::HashMap;

use crossterm::event::KeyCode;
use tracing::warn;

use crate::config::KeyBindings;

/// Logical actions the game reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Start,
    Restart,
    Quit,
}

impl Action {
    pub const COUNT: usize = 5;

    pub const ALL: [Action; Action::COUNT] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::Start,
        Action::Restart,
        Action::Quit,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Physical keys bound to one action are told apart by slot (0..8),
/// so releasing one of them doesn't cancel the other.
pub type BindingSlot = u8;

/// Slot taken by keys the game binds itself (Ctrl+C for quit)
pub const RESERVED_SLOT: BindingSlot = 7;

const MAX_SLOTS: usize = RESERVED_SLOT as usize;

/// Pressed-state of every action at one instant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    active: [bool; Action::COUNT],
}

impl InputSnapshot {
    pub fn is_active(&self, action: Action) -> bool {
        self.active[action.index()]
    }

    /// Snapshot with the given actions held
    pub fn with(actions: &[Action]) -> Self {
        let mut snapshot = Self::default();
        for action in actions {
            snapshot.active[action.index()] = true;
        }
        snapshot
    }
}

/// Held keys per action, one bit per binding slot.
/// The latest down/up event for a slot always wins.
#[derive(Debug, Default)]
pub struct InputSampler {
    held: [u8; Action::COUNT],
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, action: Action, slot: BindingSlot) {
        self.held[action.index()] |= 1 << slot;
    }

    pub fn key_up(&mut self, action: Action, slot: BindingSlot) {
        self.held[action.index()] &= !(1 << slot);
    }

    /// Forget every held key (used when the view loses track of releases)
    pub fn release_all(&mut self) {
        self.held = [0; Action::COUNT];
    }

    pub fn snapshot(&self) -> InputSnapshot {
        let mut active = [false; Action::COUNT];
        for (flag, mask) in active.iter_mut().zip(self.held.iter()) {
            *flag = *mask != 0;
        }
        InputSnapshot { active }
    }
}

/// Translates terminal key codes into `(Action, slot)` pairs
#[derive(Debug, Clone)]
pub struct KeyMap {
    keys: HashMap<KeyCode, (Action, BindingSlot)>,
}

impl KeyMap {
    pub fn from_bindings(bindings: &KeyBindings) -> Self {
        let mut keys = HashMap::new();

        for action in Action::ALL {
            let names = bindings.keys_for(action);
            if names.len() > MAX_SLOTS {
                warn!(
                    "{:?} has {} bindings, only the first {} are used",
                    action,
                    names.len(),
                    MAX_SLOTS
                );
            }

            for (slot, name) in names.iter().take(MAX_SLOTS).enumerate() {
                let Some(codes) = parse_key(name) else {
                    warn!("Ignoring unknown key name {:?} for {:?}", name, action);
                    continue;
                };
                for code in codes {
                    if let Some((other, _)) = keys.insert(code, (action, slot as BindingSlot)) {
                        if other != action {
                            warn!("Key {:?} rebound from {:?} to {:?}", name, other, action);
                        }
                    }
                }
            }
        }

        Self { keys }
    }

    pub fn lookup(&self, code: KeyCode) -> Option<(Action, BindingSlot)> {
        self.keys.get(&code).copied()
    }
}

/// Parse a key name from the config file.
/// Letters match both cases, so "W" and "w" are the same binding.
pub fn parse_key(name: &str) -> Option<Vec<KeyCode>> {
    let code = match name {
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Enter" => KeyCode::Enter,
        "Esc" => KeyCode::Esc,
        "Space" => KeyCode::Char(' '),
        "Tab" => KeyCode::Tab,
        _ => {
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            let lower = c.to_ascii_lowercase();
            let upper = c.to_ascii_uppercase();
            return Some(if lower == upper {
                vec![KeyCode::Char(c)]
            } else {
                vec![KeyCode::Char(lower), KeyCode::Char(upper)]
            });
        }
    };

    Some(vec![code])
}

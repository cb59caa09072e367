// Terminal key events -> InputSampler
//
// Terminals that speak the keyboard enhancement protocol report real key
// releases. Everywhere else only presses (and auto-repeat presses) arrive,
// so a press counts as held until `hold` passes without another press.

use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use super::input::{Action, BindingSlot, InputSampler, KeyMap, RESERVED_SLOT};

/// How key releases are learned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    /// The terminal sends `KeyEventKind::Release`
    Reported,
    /// Releases are synthesized after `hold` without a press
    Synthetic { hold: Duration },
}

pub struct TerminalKeys {
    key_map: KeyMap,
    mode: ReleaseMode,
    // Synthetic mode: when each held key lets go
    release_at: HashMap<(Action, BindingSlot), Instant>,
}

impl TerminalKeys {
    pub fn new(key_map: KeyMap, mode: ReleaseMode) -> Self {
        Self {
            key_map,
            mode,
            release_at: HashMap::new(),
        }
    }

    pub fn mode(&self) -> ReleaseMode {
        self.mode
    }

    /// Drain every pending terminal event into the sampler without blocking
    pub fn pump(&mut self, sampler: &mut InputSampler) -> io::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(&event, Instant::now(), sampler);
        }
        self.expire(Instant::now(), sampler);
        Ok(())
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant, sampler: &mut InputSampler) {
        match event {
            Event::Key(key) => self.handle_key(key, now, sampler),
            Event::FocusLost => {
                // Releases that happen while unfocused never reach us
                self.release_at.clear();
                sampler.release_all();
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant, sampler: &mut InputSampler) {
        let binding = if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            Some((Action::Quit, RESERVED_SLOT))
        } else {
            self.key_map.lookup(key.code)
        };

        let Some((action, slot)) = binding else {
            return;
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                trace!("Key down {:?} -> {:?}", key.code, action);
                sampler.key_down(action, slot);
                if let ReleaseMode::Synthetic { hold } = self.mode {
                    self.release_at.insert((action, slot), now + hold);
                }
            }
            KeyEventKind::Release => {
                trace!("Key up {:?} -> {:?}", key.code, action);
                sampler.key_up(action, slot);
                self.release_at.remove(&(action, slot));
            }
        }
    }

    /// Let go of synthetic holds that ran out
    pub fn expire(&mut self, now: Instant, sampler: &mut InputSampler) {
        self.release_at.retain(|&(action, slot), deadline| {
            if *deadline <= now {
                sampler.key_up(action, slot);
                false
            } else {
                true
            }
        });
    }
}

//! Frame driver
//!
//! Owns the store, the input sampler and the collaborators. Each frame it
//! samples input, applies phase triggers, runs one simulation step, commits
//! the result and dispatches the requested side effects. Rendering reads the
//! store afterwards.

use std::io;
use std::time::{Duration, Instant};

use rand::Rng;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::audio::CueSink;
use crate::config::Config;
use crate::game::{
    step, trigger_for, Action, Effect, GameState, GameStore, InputSampler, Phase, Side,
    TerminalKeys, Trigger,
};
use crate::ui::{self, View};

/// End-of-match acknowledgement shown while the match is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchNotice {
    pub winner: Side,
}

impl MatchNotice {
    pub fn message(&self) -> &'static str {
        match self.winner {
            Side::Player => "I'll be back!",
            Side::Opponent => "Hasta la vista, Baby!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Quit,
}

pub struct FrameDriver<R: Rng> {
    store: GameStore,
    sampler: InputSampler,
    audio: Box<dyn CueSink>,
    rng: R,
    notice: Option<MatchNotice>,
}

impl<R: Rng> FrameDriver<R> {
    pub fn new(audio: Box<dyn CueSink>, rng: R) -> Self {
        Self {
            store: GameStore::new(),
            sampler: InputSampler::new(),
            audio,
            rng,
            notice: None,
        }
    }

    pub fn sampler_mut(&mut self) -> &mut InputSampler {
        &mut self.sampler
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn notice(&self) -> Option<&MatchNotice> {
        self.notice.as_ref()
    }

    /// Run one simulation tick
    pub fn tick(&mut self) -> FrameStatus {
        let input = self.sampler.snapshot();
        if input.is_active(Action::Quit) {
            return FrameStatus::Quit;
        }

        match trigger_for(self.store.state().phase, &input) {
            Some(Trigger::Start) => self.store.set_phase(Phase::Playing),
            Some(Trigger::Reset) => {
                self.store.reset();
                self.notice = None;
            }
            None => {}
        }

        let before = self.store.snapshot();
        let outcome = step(&before, &input, &mut self.rng);
        if let Some(side) = outcome.scored(&before) {
            debug!("Point for {:?}, serving again", side);
        }
        self.store.commit(&outcome.state);

        for effect in outcome.effects {
            self.dispatch(effect);
        }

        FrameStatus::Continue
    }

    fn dispatch(&mut self, effect: Effect) {
        match effect {
            Effect::Cue(cue) => self.audio.play(cue),
            Effect::MatchEnded { winner } => {
                let notice = MatchNotice { winner };
                info!("Match over: {}", notice.message());
                self.notice = Some(notice);
            }
        }
    }
}

/// Run the game until the quit action; one tick and one draw per frame
pub fn run<B: ratatui::backend::Backend, R: Rng>(
    terminal: &mut Terminal<B>,
    config: &Config,
    keys: &mut TerminalKeys,
    driver: &mut FrameDriver<R>,
) -> Result<(), io::Error> {
    let frame_duration = Duration::from_millis(1000 / config.display.target_fps.max(1));
    info!(
        "Frame loop started at {} fps, key releases {:?}",
        config.display.target_fps,
        keys.mode()
    );

    loop {
        let frame_start = Instant::now();

        keys.pump(driver.sampler_mut())?;

        if driver.tick() == FrameStatus::Quit {
            info!("Quit requested, leaving frame loop");
            return Ok(());
        }

        let view = View {
            display: &config.display,
            keys: &config.keybindings,
            notice: driver.notice(),
        };
        terminal.draw(|f| ui::render(f, driver.state(), &view))?;

        limit_frame_rate(frame_start, frame_duration);
    }
}

/// Sleep away whatever is left of this frame's budget
pub fn limit_frame_rate(frame_start: Instant, frame_duration: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame_duration {
        std::thread::sleep(frame_duration - elapsed);
    }
}

// Owner of the single GameState record
//
// Every mutation takes `&mut self`, so a reader holding a snapshot can never
// observe a half-written record. Paddle offsets are clamped here, not by
// callers.

use tracing::{debug, info};

use super::state::{clamp_paddle_y, GameState, Phase, Side};

#[derive(Debug, Default)]
pub struct GameStore {
    state: GameState,
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            state: GameState::initial(),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> GameState {
        self.state
    }

    /// Borrow the current state without copying (used by the renderer)
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Set a paddle offset, clamped into the field
    pub fn set_paddle_y(&mut self, side: Side, y: f32) {
        let y = clamp_paddle_y(y);
        match side {
            Side::Player => self.state.player_paddle_y = y,
            Side::Opponent => self.state.opponent_paddle_y = y,
        }
    }

    pub fn set_ball_position(&mut self, x: f32, y: f32) {
        self.state.ball.x = x;
        self.state.ball.y = y;
    }

    pub fn set_ball_velocity(&mut self, vx: f32, vy: f32) {
        self.state.ball.vx = vx;
        self.state.ball.vy = vy;
    }

    pub fn increment_score(&mut self, side: Side) {
        match side {
            Side::Player => self.state.player_score += 1,
            Side::Opponent => self.state.opponent_score += 1,
        }
        info!(
            player = self.state.player_score,
            opponent = self.state.opponent_score,
            "{:?} scored",
            side
        );
    }

    pub fn set_phase(&mut self, phase: Phase) {
        if self.state.phase != phase {
            info!("Phase {:?} -> {:?}", self.state.phase, phase);
        }
        self.state.phase = phase;
    }

    /// Replace everything with the initial values
    pub fn reset(&mut self) {
        debug!("Resetting game state");
        self.state = GameState::initial();
    }

    /// Write the result of a simulation step through the narrow mutations.
    /// Scores move by at most one point per side per commit.
    pub fn commit(&mut self, next: &GameState) {
        self.set_paddle_y(Side::Player, next.player_paddle_y);
        self.set_paddle_y(Side::Opponent, next.opponent_paddle_y);
        self.set_ball_position(next.ball.x, next.ball.y);
        self.set_ball_velocity(next.ball.vx, next.ball.vy);

        for side in [Side::Player, Side::Opponent] {
            let current = self.state.score(side);
            debug_assert!(
                next.score(side) == current || next.score(side) == current + 1,
                "score for {:?} jumped from {} to {}",
                side,
                current,
                next.score(side)
            );
            if next.score(side) > current {
                self.increment_score(side);
            }
        }

        self.set_phase(next.phase);
    }
}

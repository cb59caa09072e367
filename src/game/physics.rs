use rand::Rng;

use super::input::{Action, InputSnapshot};
use super::state::{
    clamp_paddle_y, Ball, GameState, Phase, Side, BALL_SIZE, FIELD_HEIGHT, FIELD_WIDTH,
    INITIAL_BALL_SPEED, PADDLE_HEIGHT, PADDLE_SPEED, PADDLE_WIDTH, WINNING_SCORE,
};
use crate::ai;
use crate::audio::AudioCue;

/// Ball speed multiplier on each paddle hit (compounds over a rally)
pub const SPEED_UP: f32 = 1.05;

// Stand-in for a velocity component that a collision left at exactly zero
const MIN_AXIS_SPEED: f32 = 0.1;

/// Side effects requested by a step, dispatched by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Cue(AudioCue),
    MatchEnded { winner: Side },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub state: GameState,
    pub effects: Vec<Effect>,
}

impl StepOutcome {
    pub fn scored(&self, before: &GameState) -> Option<Side> {
        if self.state.player_score > before.player_score {
            Some(Side::Player)
        } else if self.state.opponent_score > before.opponent_score {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}

/// Advance one frame. Outside `Playing` the state comes back unchanged.
pub fn step<R: Rng + ?Sized>(state: &GameState, input: &InputSnapshot, rng: &mut R) -> StepOutcome {
    let mut next = *state;
    let mut effects = Vec::new();

    if state.phase != Phase::Playing {
        return StepOutcome { state: next, effects };
    }

    next.player_paddle_y = move_player_paddle(state.player_paddle_y, input);
    next.opponent_paddle_y = ai::track_ball(state.opponent_paddle_y, &state.ball);

    // Tentative position, simple Euler step
    let mut ball = next.ball;
    ball.x += ball.vx;
    ball.y += ball.vy;

    bounce_off_walls(&mut ball);

    // Collisions see the paddles where they stood when the frame began
    if hits_player_paddle(&ball, state.player_paddle_y) {
        ball.vx = -ball.vx;
        ball.x = PADDLE_WIDTH;
        return_with_spin(&mut ball, state.player_paddle_y);
        effects.push(Effect::Cue(AudioCue::PaddleHit));
    }

    if hits_opponent_paddle(&ball, state.opponent_paddle_y) {
        ball.vx = -ball.vx;
        ball.x = FIELD_WIDTH - PADDLE_WIDTH - BALL_SIZE;
        return_with_spin(&mut ball, state.opponent_paddle_y);
        effects.push(Effect::Cue(AudioCue::PaddleHit));
    }

    if ball.x < 0.0 {
        next.opponent_score += 1;
        ball = serve(Side::Opponent, rng);
    } else if ball.x > FIELD_WIDTH {
        next.player_score += 1;
        ball = serve(Side::Player, rng);
    }

    next.ball = ball;

    if next.player_score >= WINNING_SCORE {
        next.phase = Phase::GameOver;
        effects.push(Effect::Cue(AudioCue::RoundWin));
        effects.push(Effect::MatchEnded {
            winner: Side::Player,
        });
    } else if next.opponent_score >= WINNING_SCORE {
        next.phase = Phase::GameOver;
        effects.push(Effect::Cue(AudioCue::RoundLoss));
        effects.push(Effect::MatchEnded {
            winner: Side::Opponent,
        });
    }

    StepOutcome {
        state: next,
        effects,
    }
}

/// Up is applied first, then down, each clamped on its own. Holding both
/// cancels out except against an edge, where the clamp lets the paddle
/// creep away from it.
pub fn move_player_paddle(y: f32, input: &InputSnapshot) -> f32 {
    let mut y = y;
    if input.is_active(Action::MoveUp) {
        y = clamp_paddle_y(y - PADDLE_SPEED);
    }
    if input.is_active(Action::MoveDown) {
        y = clamp_paddle_y(y + PADDLE_SPEED);
    }
    y
}

fn bounce_off_walls(ball: &mut Ball) {
    let floor = FIELD_HEIGHT - BALL_SIZE;
    if ball.y <= 0.0 || ball.y >= floor {
        ball.vy = nonzero(-ball.vy);
        ball.y = if ball.y <= 0.0 { 0.0 } else { floor };
    }
}

fn overlaps_paddle(ball: &Ball, paddle_y: f32) -> bool {
    ball.y + BALL_SIZE >= paddle_y && ball.y <= paddle_y + PADDLE_HEIGHT
}

fn hits_player_paddle(ball: &Ball, paddle_y: f32) -> bool {
    ball.x >= 0.0 && ball.x <= PADDLE_WIDTH && overlaps_paddle(ball, paddle_y)
}

fn hits_opponent_paddle(ball: &Ball, paddle_y: f32) -> bool {
    let right_edge = ball.x + BALL_SIZE;
    right_edge >= FIELD_WIDTH - PADDLE_WIDTH
        && right_edge <= FIELD_WIDTH
        && overlaps_paddle(ball, paddle_y)
}

/// Where the ball struck the paddle: 0.0 = top, 1.0 = bottom
pub fn relative_hit_position(ball: &Ball, paddle_y: f32) -> f32 {
    (ball.center_y() - paddle_y) / PADDLE_HEIGHT
}

fn return_with_spin(ball: &mut Ball, paddle_y: f32) {
    let hit_pos = relative_hit_position(ball, paddle_y);
    ball.vy += (hit_pos - 0.5) * 2.0;

    ball.vx = nonzero(ball.vx * SPEED_UP);
    ball.vy = nonzero(ball.vy * SPEED_UP);
}

/// Fresh ball from the center, heading toward the side that just scored
fn serve<R: Rng + ?Sized>(scorer: Side, rng: &mut R) -> Ball {
    let vx_sign = match scorer {
        Side::Player => -1.0,
        Side::Opponent => 1.0,
    };
    let vy_sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

    let ball = Ball::centered(vx_sign, vy_sign);
    debug_assert_eq!(ball.vx.abs(), INITIAL_BALL_SPEED);
    ball
}

fn nonzero(v: f32) -> f32 {
    if v == 0.0 {
        MIN_AXIS_SPEED
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::PADDLE_MAX_Y;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn playing() -> GameState {
        GameState {
            phase: Phase::Playing,
            ..GameState::initial()
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    #[test]
    fn test_ball_bounces_off_player_paddle() {
        let mut state = playing();
        state.player_paddle_y = 180.0;
        state.ball = Ball {
            x: 5.0,
            y: 200.0,
            vx: -4.0,
            vy: 0.0,
        };

        let outcome = step(&state, &idle(), &mut rng());
        let ball = outcome.state.ball;

        assert!((ball.vx - 4.2).abs() < 1e-4);
        assert_eq!(ball.x, PADDLE_WIDTH);
        // Hit above the paddle center sends the ball upward
        let expected_vy = (0.3125 - 0.5) * 2.0 * SPEED_UP;
        assert!((ball.vy - expected_vy).abs() < 1e-4);
        assert_eq!(outcome.effects, vec![Effect::Cue(AudioCue::PaddleHit)]);
    }

    #[test]
    fn test_ball_bounces_off_bottom_wall() {
        let mut state = playing();
        state.ball = Ball {
            x: 300.0,
            y: 392.0,
            vx: 4.0,
            vy: 3.0,
        };

        let outcome = step(&state, &idle(), &mut rng());
        let ball = outcome.state.ball;

        assert_eq!(ball.vy, -3.0);
        assert_eq!(ball.y, 390.0);
        assert_eq!(ball.x, 304.0);
        assert!(outcome.effects.is_empty());
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let mut state = playing();
        state.ball = Ball {
            x: 300.0,
            y: 2.0,
            vx: -4.0,
            vy: -4.0,
        };

        let ball = step(&state, &idle(), &mut rng()).state.ball;
        assert_eq!(ball.vy, 4.0);
        assert_eq!(ball.y, 0.0);
    }

    #[test]
    fn test_player_scores_past_right_edge() {
        let mut state = playing();
        state.opponent_paddle_y = 0.0;
        state.ball = Ball {
            x: 798.0,
            y: 300.0,
            vx: 4.0,
            vy: 0.5,
        };

        let outcome = step(&state, &idle(), &mut rng());
        let next = outcome.state;

        assert_eq!(next.player_score, 1);
        assert_eq!(next.opponent_score, 0);
        assert_eq!((next.ball.x, next.ball.y), (400.0, 200.0));
        assert_eq!(next.ball.vx, -4.0);
        assert_eq!(next.ball.vy.abs(), 4.0);
        assert_eq!(outcome.scored(&state), Some(Side::Player));
    }

    #[test]
    fn test_opponent_scores_past_left_edge() {
        let mut state = playing();
        state.player_paddle_y = PADDLE_MAX_Y;
        state.ball = Ball {
            x: 2.0,
            y: 50.0,
            vx: -4.0,
            vy: 0.0,
        };

        let next = step(&state, &idle(), &mut rng()).state;

        assert_eq!(next.opponent_score, 1);
        assert_eq!(next.ball.vx, 4.0);
        assert_eq!((next.ball.x, next.ball.y), (400.0, 200.0));
    }

    #[test]
    fn test_serve_picks_both_vertical_directions() {
        let mut rng = rng();
        let mut seen_up = false;
        let mut seen_down = false;

        for _ in 0..64 {
            let ball = serve(Side::Player, &mut rng);
            if ball.vy > 0.0 {
                seen_down = true;
            } else {
                seen_up = true;
            }
        }

        assert!(seen_up && seen_down);
    }

    #[test]
    fn test_winning_point_ends_match_once() {
        let mut state = playing();
        state.player_score = 9;
        state.opponent_score = 4;
        state.opponent_paddle_y = 0.0;
        state.ball = Ball {
            x: 799.0,
            y: 300.0,
            vx: 4.0,
            vy: 0.0,
        };

        let outcome = step(&state, &idle(), &mut rng());
        assert_eq!(outcome.state.player_score, 10);
        assert_eq!(outcome.state.phase, Phase::GameOver);

        let wins = outcome
            .effects
            .iter()
            .filter(|e| **e == Effect::Cue(AudioCue::RoundWin))
            .count();
        assert_eq!(wins, 1);
        assert!(outcome.effects.contains(&Effect::MatchEnded {
            winner: Side::Player
        }));

        // Nothing advances after the match is over
        let after = step(&outcome.state, &idle(), &mut rng());
        assert_eq!(after.state, outcome.state);
        assert!(after.effects.is_empty());
    }

    #[test]
    fn test_opponent_win_requests_loss_cue() {
        let mut state = playing();
        state.opponent_score = 9;
        state.player_paddle_y = PADDLE_MAX_Y;
        state.ball = Ball {
            x: 1.0,
            y: 20.0,
            vx: -4.0,
            vy: 0.0,
        };

        let outcome = step(&state, &idle(), &mut rng());
        assert_eq!(outcome.state.phase, Phase::GameOver);
        assert_eq!(
            outcome.effects,
            vec![
                Effect::Cue(AudioCue::RoundLoss),
                Effect::MatchEnded {
                    winner: Side::Opponent
                }
            ]
        );
    }

    #[test]
    fn test_menu_and_game_over_do_not_advance() {
        for phase in [Phase::Menu, Phase::GameOver] {
            let state = GameState {
                phase,
                ..GameState::initial()
            };
            let input = InputSnapshot::with(&[Action::MoveUp]);

            let outcome = step(&state, &input, &mut rng());
            assert_eq!(outcome.state, state);
            assert!(outcome.effects.is_empty());
        }
    }

    #[test]
    fn test_player_paddle_moves_and_clamps() {
        let up = InputSnapshot::with(&[Action::MoveUp]);
        let down = InputSnapshot::with(&[Action::MoveDown]);

        assert_eq!(move_player_paddle(100.0, &up), 94.0);
        assert_eq!(move_player_paddle(100.0, &down), 106.0);
        assert_eq!(move_player_paddle(3.0, &up), 0.0);
        assert_eq!(move_player_paddle(PADDLE_MAX_Y - 2.0, &down), PADDLE_MAX_Y);
        assert_eq!(move_player_paddle(100.0, &idle()), 100.0);
    }

    #[test]
    fn test_both_keys_cancel_away_from_edges() {
        let both = InputSnapshot::with(&[Action::MoveUp, Action::MoveDown]);

        assert_eq!(move_player_paddle(100.0, &both), 100.0);
        // Against the top edge the up move is clamped, the down move is not
        assert_eq!(move_player_paddle(0.0, &both), PADDLE_SPEED);
        assert_eq!(move_player_paddle(3.0, &both), PADDLE_SPEED);
        // The bottom edge holds the paddle in place
        assert_eq!(move_player_paddle(PADDLE_MAX_Y, &both), PADDLE_MAX_Y);
    }

    #[test]
    fn test_paddle_moving_into_ball_does_not_extend_reach() {
        let mut state = playing();
        // Paddle spans 100..180 at the start of the frame
        state.player_paddle_y = 100.0;
        state.ball = Ball {
            x: 12.0,
            y: 184.0,
            vx: -4.0,
            vy: 0.0,
        };
        let down = InputSnapshot::with(&[Action::MoveDown]);

        let outcome = step(&state, &down, &mut rng());
        let next = outcome.state;

        assert_eq!(next.player_paddle_y, 106.0);
        assert_eq!(next.ball.x, 8.0);
        assert_eq!(next.ball.vx, -4.0);
        assert!(outcome.effects.is_empty());
    }

    #[test]
    fn test_ball_bounces_off_opponent_paddle() {
        let mut state = playing();
        state.opponent_paddle_y = 160.0;
        // Ball center lines up with the paddle center
        state.ball = Ball {
            x: 778.0,
            y: 195.0,
            vx: 4.0,
            vy: 0.0,
        };

        let outcome = step(&state, &idle(), &mut rng());
        let ball = outcome.state.ball;

        assert_eq!(ball.x, FIELD_WIDTH - PADDLE_WIDTH - BALL_SIZE);
        assert_eq!(ball.y, 195.0);
        assert!((ball.vx + 4.2).abs() < 1e-4);
        assert_eq!(ball.vy, MIN_AXIS_SPEED);
        assert_eq!(outcome.effects, vec![Effect::Cue(AudioCue::PaddleHit)]);
    }

    #[test]
    fn test_corner_hit_bounces_off_wall_before_paddle() {
        let mut state = playing();
        state.player_paddle_y = 0.0;
        state.ball = Ball {
            x: 8.0,
            y: 2.0,
            vx: -4.0,
            vy: -4.0,
        };

        let outcome = step(&state, &idle(), &mut rng());
        let ball = outcome.state.ball;

        // Wall first: y clamped to 0 and vy flipped to +4
        assert_eq!(ball.y, 0.0);
        assert_eq!(ball.x, PADDLE_WIDTH);
        assert!((ball.vx - 4.2).abs() < 1e-4);
        // Then the paddle adds spin from a hit near its top
        let expected_vy = (4.0 + (5.0 / PADDLE_HEIGHT - 0.5) * 2.0) * SPEED_UP;
        assert!((ball.vy - expected_vy).abs() < 1e-4);
        assert_eq!(outcome.effects, vec![Effect::Cue(AudioCue::PaddleHit)]);
    }

    #[test]
    fn test_invariants_hold_over_long_run() {
        let mut rng = rng();
        let mut state = playing();
        let inputs = [
            InputSnapshot::with(&[Action::MoveUp]),
            InputSnapshot::with(&[Action::MoveDown]),
            InputSnapshot::with(&[Action::MoveUp, Action::MoveDown]),
            InputSnapshot::default(),
        ];

        for frame in 0..20_000 {
            if state.phase != Phase::Playing {
                break;
            }
            let input = inputs[(frame / 37) % inputs.len()];
            let before = state;
            let outcome = step(&state, &input, &mut rng);
            state = outcome.state;

            assert!((0.0..=PADDLE_MAX_Y).contains(&state.player_paddle_y));
            assert!((0.0..=PADDLE_MAX_Y).contains(&state.opponent_paddle_y));
            assert!(state.ball.vx != 0.0 || state.ball.vy != 0.0);

            let total_before = before.player_score + before.opponent_score;
            let total_after = state.player_score + state.opponent_score;
            assert!(total_after == total_before || total_after == total_before + 1);
        }
    }

    #[test]
    fn test_center_hit_keeps_vertical_motion() {
        let mut state = playing();
        state.player_paddle_y = 160.0;
        // Ball center lines up with the paddle center
        state.ball = Ball {
            x: 4.0,
            y: 195.0,
            vx: -4.0,
            vy: 0.0,
        };

        let ball = step(&state, &idle(), &mut rng()).state.ball;
        assert!(ball.vy != 0.0);
        assert!(ball.vx > 0.0);
    }
}

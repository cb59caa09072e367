// Game state record and the fixed rules of the field
//
// All coordinates are in field units (800×400). Positions are top-left
// offsets; velocities are units per frame.

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 400.0;
pub const PADDLE_WIDTH: f32 = 10.0;
pub const PADDLE_HEIGHT: f32 = 80.0;
pub const BALL_SIZE: f32 = 10.0;
pub const PADDLE_SPEED: f32 = 6.0; // Units per frame
pub const INITIAL_BALL_SPEED: f32 = 4.0; // Per axis
pub const WINNING_SCORE: u32 = 10;

/// Lowest paddle offset that keeps the paddle inside the field
pub const PADDLE_MAX_Y: f32 = FIELD_HEIGHT - PADDLE_HEIGHT;

/// Discrete mode of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

/// Which side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left paddle, driven by the keyboard
    Player,
    /// Right paddle, driven by the reactive opponent
    Opponent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Ball {
    /// Ball at the field center moving at the initial speed
    pub fn centered(vx_sign: f32, vy_sign: f32) -> Self {
        Self {
            x: FIELD_WIDTH / 2.0,
            y: FIELD_HEIGHT / 2.0,
            vx: INITIAL_BALL_SPEED * vx_sign,
            vy: INITIAL_BALL_SPEED * vy_sign,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + BALL_SIZE / 2.0
    }
}

/// The whole simulation record. Cheap to copy, so readers take snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    pub phase: Phase,
    pub player_paddle_y: f32,
    pub opponent_paddle_y: f32,
    pub ball: Ball,
    pub player_score: u32,
    pub opponent_score: u32,
}

impl GameState {
    /// State at mount and after every reset: centered paddles and ball,
    /// first serve toward the opponent and downward, scores zero, in the menu.
    pub fn initial() -> Self {
        let center_y = FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0;

        Self {
            phase: Phase::Menu,
            player_paddle_y: center_y,
            opponent_paddle_y: center_y,
            ball: Ball::centered(1.0, 1.0),
            player_score: 0,
            opponent_score: 0,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Opponent => self.opponent_score,
        }
    }

    /// Side that reached the winning score, if any
    pub fn winner(&self) -> Option<Side> {
        if self.player_score >= WINNING_SCORE {
            Some(Side::Player)
        } else if self.opponent_score >= WINNING_SCORE {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Clamp a paddle offset into `[0, FIELD_HEIGHT - PADDLE_HEIGHT]`
pub fn clamp_paddle_y(y: f32) -> f32 {
    y.clamp(0.0, PADDLE_MAX_Y)
}

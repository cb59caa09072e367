// Reactive tracker - follows the ball's height with a dead zone

use crate::game::state::{clamp_paddle_y, Ball, PADDLE_HEIGHT, PADDLE_SPEED};

/// Half-height of the band around the paddle center where the tracker rests
pub const DEAD_ZONE: f32 = 5.0;

/// Tracker speed, slower than the player so it can be beaten
pub const TRACKING_SPEED: f32 = PADDLE_SPEED * 0.8;

/// Next paddle offset for the opponent.
///
/// The paddle moves toward the ball's center at `TRACKING_SPEED` and stays
/// put while the ball is within `DEAD_ZONE` of its center, so it doesn't
/// jitter once aligned.
pub fn track_ball(paddle_y: f32, ball: &Ball) -> f32 {
    let paddle_center_y = paddle_y + PADDLE_HEIGHT / 2.0;
    let diff = ball.center_y() - paddle_center_y;

    if diff.abs() <= DEAD_ZONE {
        paddle_y
    } else if diff > 0.0 {
        clamp_paddle_y(paddle_y + TRACKING_SPEED) // Ball below, move down
    } else {
        clamp_paddle_y(paddle_y - TRACKING_SPEED) // Ball above, move up
    }
}

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use super::braille::BrailleCanvas;
use super::overlay::{render_overlay, OverlayMessage};
use crate::config::{DisplayConfig, KeyBindings};
use crate::driver::MatchNotice;
use crate::game::state::{
    BALL_SIZE, FIELD_HEIGHT, FIELD_WIDTH, PADDLE_HEIGHT, PADDLE_WIDTH, WINNING_SCORE,
};
use crate::game::{GameState, Phase, Side};

// Layout: score line, hint line, then the field down to the last row
const UI_HEADER_ROWS: u16 = 2;

/// Smallest terminal the field is drawn in
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;

// Center divider dash length in field units
const DASH_LENGTH: f32 = 10.0;

/// Everything besides the game state the renderer needs
pub struct View<'a> {
    pub display: &'a DisplayConfig,
    pub keys: &'a KeyBindings,
    pub notice: Option<&'a MatchNotice>,
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

pub fn render(frame: &mut Frame, state: &GameState, view: &View) {
    let area = frame.area();

    // Draw background (true black RGB, not terminal default)
    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        draw_too_small(frame, area);
        return;
    }

    draw_score(frame, state, view, area);
    draw_hint(frame, state, view, area);

    let field_area = Rect {
        x: area.x,
        y: area.y + UI_HEADER_ROWS,
        width: area.width,
        height: area.height - UI_HEADER_ROWS,
    };
    draw_field(frame, state, view.display, field_area);

    match state.phase {
        Phase::Menu => render_overlay(frame, &menu_message(view.keys), field_area),
        Phase::GameOver => {
            render_overlay(frame, &game_over_message(state, view), field_area)
        }
        Phase::Playing => {}
    }
}

fn draw_field(frame: &mut Frame, state: &GameState, display: &DisplayConfig, area: Rect) {
    let mut canvas = BrailleCanvas::new(area.width as usize, area.height as usize);

    // Scale from field units to Braille pixels
    let scale_x = canvas.pixel_width() as f32 / FIELD_WIDTH;
    let scale_y = canvas.pixel_height() as f32 / FIELD_HEIGHT;
    let to_px = |v: f32, scale: f32| (v * scale).max(0.0) as usize;
    let span_px = |v: f32, scale: f32| ((v * scale).round() as usize).max(1);

    let center_x = to_px(FIELD_WIDTH / 2.0, scale_x);
    let dash = span_px(DASH_LENGTH, scale_y);
    canvas.dashed_vertical_line(center_x, dash, rgb(display.center_line_color));

    let paddle_w = span_px(PADDLE_WIDTH, scale_x);
    let paddle_h = span_px(PADDLE_HEIGHT, scale_y);
    let paddle_color = rgb(display.paddle_color);
    canvas.fill_rect(
        0,
        to_px(state.player_paddle_y, scale_y),
        paddle_w,
        paddle_h,
        paddle_color,
    );
    canvas.fill_rect(
        canvas.pixel_width().saturating_sub(paddle_w),
        to_px(state.opponent_paddle_y, scale_y),
        paddle_w,
        paddle_h,
        paddle_color,
    );

    canvas.fill_rect(
        to_px(state.ball.x, scale_x),
        to_px(state.ball.y, scale_y),
        span_px(BALL_SIZE, scale_x),
        span_px(BALL_SIZE, scale_y),
        rgb(display.ball_color),
    );

    frame.render_widget(Paragraph::new(canvas.to_lines()), area);
}

fn draw_score(frame: &mut Frame, state: &GameState, view: &View, area: Rect) {
    let score = Paragraph::new(format!(
        "Player: {} | AI: {}",
        state.score(Side::Player),
        state.score(Side::Opponent)
    ))
    .style(Style::default().fg(rgb(view.display.score_color)))
    .alignment(Alignment::Center);

    let score_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };

    frame.render_widget(score, score_area);
}

fn draw_hint(frame: &mut Frame, state: &GameState, view: &View, area: Rect) {
    let text = match state.phase {
        Phase::Menu => format!("{} to start", key_list(&view.keys.start)),
        Phase::Playing => format!(
            "{}/{} to move | First to {} wins!",
            key_list(&view.keys.move_up),
            key_list(&view.keys.move_down),
            WINNING_SCORE
        ),
        Phase::GameOver => format!("{} to restart", key_list(&view.keys.restart)),
    };

    let hint = Paragraph::new(format!("{}  |  {}: Quit", text, key_list(&view.keys.quit)))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    let hint_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: 1,
    };

    frame.render_widget(hint, hint_area);
}

fn draw_too_small(frame: &mut Frame, area: Rect) {
    let text = "Terminal too small";
    if area.width < text.len() as u16 || area.height == 0 {
        return;
    }

    let msg = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);

    let msg_area = Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1,
    };

    frame.render_widget(msg, msg_area);
}

fn menu_message(keys: &KeyBindings) -> OverlayMessage {
    OverlayMessage::info(vec![
        format!("Press {} to start", key_list(&keys.start).to_uppercase()),
        format!(
            "Use {} / {} to move paddle",
            key_list(&keys.move_up),
            key_list(&keys.move_down)
        ),
    ])
    .with_title("PONG")
}

fn game_over_message(state: &GameState, view: &View) -> OverlayMessage {
    let restart = format!("Press {} to restart", key_list(&view.keys.restart));

    // The notice is set on the frame the match ends; fall back to the scores
    let winner = view
        .notice
        .map(|notice| notice.winner)
        .or_else(|| state.winner());

    match winner {
        Some(Side::Player) => OverlayMessage::success(vec![
            view.notice
                .map(|n| n.message().to_string())
                .unwrap_or_else(|| "YOU WIN".to_string()),
            String::new(),
            restart,
        ])
        .with_title("YOU WIN"),
        Some(Side::Opponent) => OverlayMessage::error(vec![
            view.notice
                .map(|n| n.message().to_string())
                .unwrap_or_else(|| "AI WINS".to_string()),
            String::new(),
            restart,
        ])
        .with_title("AI WINS"),
        None => OverlayMessage::info(vec!["GAME OVER".to_string(), String::new(), restart]),
    }
}

/// "W/Up" style list of key names
fn key_list(keys: &[String]) -> String {
    keys.join("/")
}

// Overlay message system for displaying centered text on screen

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A message to display as an overlay in the center of the field
#[derive(Debug, Clone)]
pub struct OverlayMessage {
    /// Lines of text to display
    pub lines: Vec<String>,
    /// Optional title for the overlay box
    pub title: Option<String>,
    /// Style preset for the overlay
    pub style: OverlayStyle,
}

/// Predefined styles for overlay messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayStyle {
    /// Instructions (white/cyan)
    Info,
    /// Player won (green)
    Success,
    /// Opponent won (red)
    Error,
}

impl OverlayMessage {
    /// Create an info-style message
    pub fn info(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Info,
        }
    }

    /// Create a success-style message
    pub fn success(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Success,
        }
    }

    /// Create an error-style message
    pub fn error(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Error,
        }
    }

    /// Set the title for this message
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn border_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::Cyan,
            OverlayStyle::Success => Color::Green,
            OverlayStyle::Error => Color::Red,
        }
    }

    fn text_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::White,
            OverlayStyle::Success => Color::LightGreen,
            OverlayStyle::Error => Color::LightRed,
        }
    }
}

/// Render an overlay message centered in `area`.
/// Does nothing when `area` can't hold a bordered box.
pub fn render_overlay(frame: &mut Frame, message: &OverlayMessage, area: Rect) {
    if area.width < 8 || area.height < 5 {
        return;
    }

    let max_line_length = message
        .lines
        .iter()
        .map(|line| line.chars().count())
        .chain(message.title.iter().map(|title| title.chars().count() + 2))
        .max()
        .unwrap_or(0);

    // Add padding for borders and spacing
    let overlay_width = (max_line_length as u16 + 6).min(area.width);
    let overlay_height = (message.lines.len() as u16 + 2).min(area.height);

    let overlay_area = Rect {
        x: area.x + (area.width.saturating_sub(overlay_width)) / 2,
        y: area.y + (area.height.saturating_sub(overlay_height)) / 2,
        width: overlay_width,
        height: overlay_height,
    };

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(message.border_color()))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));

    if let Some(ref title) = message.title {
        block = block.title(format!(" {} ", title));
    }

    frame.render_widget(block, overlay_area);

    let inner_area = overlay_area.inner(ratatui::layout::Margin::new(2, 1));

    let text_lines: Vec<Line> = message
        .lines
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(message.text_color()),
            ))
        })
        .collect();

    let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);

    frame.render_widget(paragraph, inner_area);
}

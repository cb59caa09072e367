/// Braille canvas for high-resolution terminal rendering
/// Each terminal cell contains a 2×4 grid of Braille dots
/// This gives us 2× horizontal and 4× vertical resolution
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

pub struct BrailleCanvas {
    width: usize,  // Width in terminal cells
    height: usize, // Height in terminal cells
    dots: Vec<Vec<u8>>, // 2D array of dot patterns (0-255)
    ink: Vec<Vec<Color>>, // Color of the last dot drawn in each cell
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![vec![0; width]; height],
            ink: vec![vec![Color::Reset; width]; height],
        }
    }

    /// Set a dot at pixel coordinates
    /// pixel_x: 0 to (width * 2 - 1)
    /// pixel_y: 0 to (height * 4 - 1)
    pub fn set_pixel(&mut self, pixel_x: usize, pixel_y: usize, color: Color) {
        let cell_x = pixel_x / 2;
        let cell_y = pixel_y / 4;

        if cell_x >= self.width || cell_y >= self.height {
            return;
        }

        let dot_x = pixel_x % 2; // 0 or 1 (left or right column)
        let dot_y = pixel_y % 4; // 0, 1, 2, or 3 (row within cell)

        // Braille dot numbering:
        // 1 4
        // 2 5
        // 3 6
        // 7 8
        let dot_index = match (dot_x, dot_y) {
            (0, 0) => 0, // dot 1
            (0, 1) => 1, // dot 2
            (0, 2) => 2, // dot 3
            (0, 3) => 6, // dot 7
            (1, 0) => 3, // dot 4
            (1, 1) => 4, // dot 5
            (1, 2) => 5, // dot 6
            (1, 3) => 7, // dot 8
            _ => unreachable!(),
        };

        self.dots[cell_y][cell_x] |= 1 << dot_index;
        self.ink[cell_y][cell_x] = color;
    }

    /// Fill a rectangle with pixels
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: Color) {
        for py in y..(y + height) {
            for px in x..(x + width) {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Vertical line made of `dash`-pixel strokes separated by `dash`-pixel gaps
    pub fn dashed_vertical_line(&mut self, x: usize, dash: usize, color: Color) {
        let dash = dash.max(1);
        for y in 0..self.pixel_height() {
            if (y / dash) % 2 == 0 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Convert dot pattern to Braille character
    /// Braille Unicode: U+2800 + dot pattern
    pub fn to_char(&self, cell_x: usize, cell_y: usize) -> char {
        if cell_x >= self.width || cell_y >= self.height {
            return ' ';
        }

        let pattern = self.dots[cell_y][cell_x];
        char::from_u32(0x2800 + pattern as u32).unwrap_or(' ')
    }

    /// Rows of styled text, one span per run of same-colored cells
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        (0..self.height)
            .map(|y| {
                let mut spans = Vec::new();
                let mut run = String::new();
                let mut run_color = Color::Reset;

                for x in 0..self.width {
                    let color = self.ink[y][x];
                    if color != run_color && !run.is_empty() {
                        spans.push(Span::styled(
                            std::mem::take(&mut run),
                            Style::default().fg(run_color),
                        ));
                    }
                    run_color = color;
                    run.push(self.to_char(x, y));
                }
                if !run.is_empty() {
                    spans.push(Span::styled(run, Style::default().fg(run_color)));
                }

                Line::from(spans)
            })
            .collect()
    }

    /// Get width in pixels (2 per cell)
    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    /// Get height in pixels (4 per cell)
    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braille_canvas() {
        let mut canvas = BrailleCanvas::new(2, 2);

        // Set a single pixel
        canvas.set_pixel(0, 0, Color::White);
        assert_eq!(canvas.to_char(0, 0), '⠁'); // dot 1

        // A full cell lights all eight dots
        let mut canvas = BrailleCanvas::new(2, 2);
        canvas.fill_rect(0, 0, 2, 4, Color::White);
        assert_eq!(canvas.to_char(0, 0), '⣿');
        assert_eq!(canvas.to_char(1, 0), '\u{2800}');
    }

    #[test]
    fn test_out_of_bounds_pixels_are_dropped() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.fill_rect(0, 0, 10, 10, Color::Green);

        assert_eq!(canvas.to_char(0, 0), '⣿');
        assert_eq!(canvas.to_char(5, 5), ' ');
    }

    #[test]
    fn test_dashed_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        canvas.dashed_vertical_line(0, 4, Color::Green);

        // First cell fully dashed on the left column, second cell empty
        assert_eq!(canvas.to_char(0, 0), '⡇');
        assert_eq!(canvas.to_char(0, 1), '\u{2800}');
    }

    #[test]
    fn test_lines_split_by_color() {
        let mut canvas = BrailleCanvas::new(3, 1);
        canvas.set_pixel(0, 0, Color::Green);
        canvas.set_pixel(4, 0, Color::White);

        let lines = canvas.to_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 3);
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Green));
        assert_eq!(lines[0].spans[2].style.fg, Some(Color::White));
    }
}

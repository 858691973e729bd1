//! Recording canvas for tests

use heapless::{String, Vec};
use wio_display::{Canvas, Color, DisplayError, Font};

/// One recorded drawing operation (pixels are only counted)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    FillScreen(Color),
    FillRect { x: u16, y: u16, w: u16, h: u16, color: Color },
    VLine { x: u16 },
    FillCircle { cx: u16, color: Color },
    Circle { cx: u16 },
    Text { text: String<72>, x: u16, y: u16, color: Color },
    Image { x: u16 },
}

/// Canvas that records operations; text is 8 px per char (16 in titles)
pub struct MockCanvas {
    pub ops: Vec<Op, 256>,
    pub pixels: usize,
    pub images_available: bool,
    font: Font,
    color: Color,
}

impl MockCanvas {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            pixels: 0,
            images_available: false,
            font: Font::Small,
            color: Color::WHITE,
        }
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
        self.pixels = 0;
    }

    fn record(&mut self, op: Op) {
        // Tests keep well under capacity; drop the rest silently
        let _ = self.ops.push(op);
    }

    /// Text drawn at `(x, y)`, most recent first
    pub fn text_at(&self, x: u16, y: u16) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            Op::Text { text, x: tx, y: ty, .. } if *tx == x && *ty == y => Some(text.as_str()),
            _ => None,
        })
    }

    /// All texts in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Black rectangles starting at `(x, y)`
    pub fn clears_at(&self, x: u16, y: u16) -> impl Iterator<Item = u16> + '_ {
        self.ops.iter().filter_map(move |op| match op {
            Op::FillRect { x: rx, y: ry, w, color, .. } if *rx == x && *ry == y && *color == Color::BLACK => Some(*w),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Canvas for MockCanvas {
    fn fill_screen(&mut self, color: Color) -> Result<(), DisplayError> {
        self.record(Op::FillScreen(color));
        Ok(())
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Color) -> Result<(), DisplayError> {
        self.record(Op::FillRect { x, y, w, h, color });
        Ok(())
    }

    fn draw_vline(&mut self, x: u16, _y: u16, _h: u16, _color: Color) -> Result<(), DisplayError> {
        self.record(Op::VLine { x });
        Ok(())
    }

    fn draw_pixel(&mut self, _x: u16, _y: u16, _color: Color) -> Result<(), DisplayError> {
        self.pixels += 1;
        Ok(())
    }

    fn fill_circle(&mut self, cx: u16, _cy: u16, _r: u16, color: Color) -> Result<(), DisplayError> {
        self.record(Op::FillCircle { cx, color });
        Ok(())
    }

    fn draw_circle(&mut self, cx: u16, _cy: u16, _r: u16, _color: Color) -> Result<(), DisplayError> {
        self.record(Op::Circle { cx });
        Ok(())
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_text_color(&mut self, foreground: Color, _background: Option<Color>) {
        self.color = foreground;
    }

    fn draw_text(&mut self, text: &str, x: u16, y: u16) -> Result<(), DisplayError> {
        let mut owned = String::new();
        let _ = owned.push_str(text);
        let color = self.color;
        self.record(Op::Text { text: owned, x, y, color });
        Ok(())
    }

    fn text_width(&mut self, text: &str) -> u16 {
        let per_char = match self.font {
            Font::Small => 8,
            Font::Title => 16,
        };
        text.chars().count() as u16 * per_char
    }

    fn draw_image(&mut self, _path: &str, x: u16, _y: u16) -> Result<(), DisplayError> {
        if self.images_available {
            self.record(Op::Image { x });
            Ok(())
        } else {
            Err(DisplayError::ImageUnavailable)
        }
    }
}

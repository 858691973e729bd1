//! Canvas trait
//!
//! Defines the drawing primitives the renderer needs from the panel.

/// Panel width in pixels (landscape)
pub const SCREEN_WIDTH: u16 = 320;

/// Panel height in pixels (landscape)
pub const SCREEN_HEIGHT: u16 = 240;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Image file missing or unreadable
    ImageUnavailable,
}

/// RGB565 color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const DARK_GREEN: Color = Color(0x03E0);
    pub const YELLOW: Color = Color(0xFFE0);
    pub const ORANGE: Color = Color(0xFDA0);
    pub const LIGHT_GREY: Color = Color(0xD69A);

    /// Pack 8-bit channels into RGB565
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color((((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3))
    }
}

/// Fonts available on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Free Sans 9pt, used for line names, values and the boot log
    Small,
    /// Free Sans 18pt, used for page titles
    Title,
}

impl Font {
    /// Nominal glyph height in pixels
    pub const fn height(self) -> u16 {
        match self {
            Font::Small => 18,
            Font::Title => 30,
        }
    }
}

/// Pixel canvas
///
/// Provides a hardware-agnostic interface to the TFT. Text is drawn with the
/// font and colors most recently selected; coordinates are the top-left
/// corner of the text box.
pub trait Canvas {
    /// Fill the whole panel
    fn fill_screen(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Color)
        -> Result<(), DisplayError>;

    /// Draw a vertical line of `h` pixels
    fn draw_vline(&mut self, x: u16, y: u16, h: u16, color: Color) -> Result<(), DisplayError>;

    /// Set a single pixel
    fn draw_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), DisplayError>;

    /// Fill a circle centered at (`cx`, `cy`)
    fn fill_circle(&mut self, cx: u16, cy: u16, r: u16, color: Color) -> Result<(), DisplayError>;

    /// Draw a circle outline centered at (`cx`, `cy`)
    fn draw_circle(&mut self, cx: u16, cy: u16, r: u16, color: Color) -> Result<(), DisplayError>;

    /// Select the font for following text operations
    fn set_font(&mut self, font: Font);

    /// Select text colors
    ///
    /// With `background` set, glyph cells are painted opaque.
    fn set_text_color(&mut self, foreground: Color, background: Option<Color>);

    /// Draw text at (`x`, `y`)
    fn draw_text(&mut self, text: &str, x: u16, y: u16) -> Result<(), DisplayError>;

    /// Width in pixels `text` would occupy in the current font
    fn text_width(&mut self, text: &str) -> u16;

    /// Draw a bitmap file from removable storage at (`x`, `y`)
    fn draw_image(&mut self, _path: &str, _x: u16, _y: u16) -> Result<(), DisplayError> {
        Err(DisplayError::ImageUnavailable)
    }

    /// Get pixel dimensions
    fn dimensions(&self) -> (u16, u16) {
        (SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

//! Incremental page renderer
//!
//! Draws the page header, six lines and the status icons onto a
//! [`Canvas`]. After the first full draw, value updates only touch the
//! pixels that change: a region is cleared only when its new text is
//! narrower than what was there before.
//!
//! The renderer never caches line contents. Every call reads the page it is
//! given.

mod cache;
pub mod format;
pub mod icons;
pub mod layout;

pub use cache::{Region, RenderCache};
pub use icons::{FrequencyBand, SignalBand};

use wio_display::{Canvas, Color, DisplayError, Font};

use crate::net::ConnectionState;
use crate::page::{Line, LineKind, Page, LINES_PER_PAGE};

use icons::{Glyph, IconCache, MqttIndicator};
use layout::*;

/// What part of a line to repaint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawMode {
    /// Name and value
    FullLine,
    /// Value only
    OnlyValue,
}

/// Render errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Line index outside 0..6
    InvalidIndex(usize),
    /// Panel reported an error
    Display(DisplayError),
}

impl From<DisplayError> for RenderError {
    fn from(e: DisplayError) -> Self {
        RenderError::Display(e)
    }
}

/// Icon-relevant peripheral state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconInputs {
    pub connection: ConnectionState,
    /// Storage card inserted
    pub storage: bool,
}

impl IconInputs {
    pub fn new(connection: ConnectionState, storage: bool) -> Self {
        Self {
            connection,
            storage,
        }
    }
}

/// Page renderer state
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    cache: RenderCache,
    icons: IconCache,
}

impl Renderer {
    pub const fn new() -> Self {
        Self {
            cache: RenderCache::new(),
            icons: IconCache::new(),
        }
    }

    /// Width cache of the page on screen
    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Clear the panel and draw header, icons and all lines
    pub fn draw_full_page<C: Canvas>(
        &mut self,
        canvas: &mut C,
        page: &Page,
        inputs: &IconInputs,
    ) -> Result<(), RenderError> {
        canvas.fill_screen(Color::BLACK)?;
        self.cache.reset();
        self.draw_header(canvas, page.title(), inputs)?;
        for (index, line) in page.lines().enumerate() {
            self.draw_line(canvas, line, index, DrawMode::FullLine)?;
        }
        Ok(())
    }

    /// Repaint the values of all lines
    pub fn update_content<C: Canvas>(&mut self, canvas: &mut C, page: &Page) -> Result<(), RenderError> {
        for (index, line) in page.lines().enumerate() {
            self.draw_line(canvas, line, index, DrawMode::OnlyValue)?;
        }
        Ok(())
    }

    /// Repaint one line
    pub fn update_line<C: Canvas>(
        &mut self,
        canvas: &mut C,
        page: &Page,
        index: usize,
        mode: DrawMode,
    ) -> Result<(), RenderError> {
        let line = page.line(index).map_err(|_| RenderError::InvalidIndex(index))?;
        self.draw_line(canvas, line, index, mode)
    }

    /// Repaint the lines whose bit is set in `mask`
    pub fn update_lines<C: Canvas>(
        &mut self,
        canvas: &mut C,
        page: &Page,
        mask: u8,
        mode: DrawMode,
    ) -> Result<(), RenderError> {
        for index in (0..LINES_PER_PAGE).filter(|i| mask & (1 << i) != 0) {
            self.update_line(canvas, page, index, mode)?;
        }
        Ok(())
    }

    /// Repaint header icons whose input changed
    ///
    /// With `forced` every icon is repainted.
    pub fn refresh_interface_icons<C: Canvas>(
        &mut self,
        canvas: &mut C,
        inputs: &IconInputs,
        forced: bool,
    ) -> Result<(), RenderError> {
        let storage = inputs.storage;
        let conn = &inputs.connection;

        if forced || self.icons.storage != Some(storage) {
            draw_storage_icon(canvas, storage)?;
            self.icons.storage = Some(storage);
        }

        let mqtt = MqttIndicator::from_state(conn);
        if forced || self.icons.mqtt != Some(mqtt) {
            draw_mqtt_icon(canvas, mqtt, storage)?;
            self.icons.mqtt = Some(mqtt);
        }

        let signal = SignalBand::from_rssi(conn.wifi_strength_dbm);
        let mut band_forced = forced;
        if forced || self.icons.signal != Some(signal) {
            draw_signal_icon(canvas, signal, storage)?;
            self.icons.signal = Some(signal);
            // Card bitmaps cover the band label
            band_forced |= storage;
        }

        let band = FrequencyBand::from_channel(conn.wifi_channel);
        if band_forced || self.icons.band != Some(band) {
            draw_band_label(canvas, band)?;
            self.icons.band = Some(band);
        }
        Ok(())
    }

    fn draw_header<C: Canvas>(&mut self, canvas: &mut C, title: &str, inputs: &IconInputs) -> Result<(), RenderError> {
        let (width, _) = canvas.dimensions();
        canvas.fill_rect(0, 0, width, HEADER_HEIGHT, Color::WHITE)?;
        canvas.draw_vline(HEADER_DIVIDER_X, 0, HEADER_HEIGHT, Color::BLACK)?;

        canvas.set_font(Font::Title);
        canvas.set_text_color(Color::BLACK, None);
        canvas.draw_text(title, TITLE_X, TITLE_Y)?;

        // Activity arrows start blank on a fresh header
        let mut quiet = *inputs;
        quiet.connection.mqtt_published_recently = false;
        quiet.connection.mqtt_subscribed_recently = false;
        self.refresh_interface_icons(canvas, &quiet, true)
    }

    fn draw_line<C: Canvas>(
        &mut self,
        canvas: &mut C,
        line: &Line,
        index: usize,
        mode: DrawMode,
    ) -> Result<(), RenderError> {
        if index >= LINES_PER_PAGE {
            return Err(RenderError::InvalidIndex(index));
        }
        let y = line_y(index);

        canvas.set_font(Font::Small);
        canvas.set_text_color(Color::WHITE, Some(Color::BLACK));

        if mode == DrawMode::FullLine {
            let width = canvas.text_width(line.name());
            if let Some(old) = self.cache.clear_width(Region::Name, index, width) {
                canvas.fill_rect(LINE_START_X, y, old, LINE_CLEAR_HEIGHT, Color::BLACK)?;
            }
            canvas.draw_text(line.name(), LINE_START_X, y)?;
            self.cache.store(Region::Name, index, width);
        }

        match line.kind() {
            LineKind::Bar => self.draw_bar(canvas, line, index, y),
            _ => match format::value_text(line) {
                Some(text) => self.draw_value_text(canvas, &text, index, y),
                None => self.draw_overflow(canvas, index, y),
            },
        }
    }

    fn draw_value_text<C: Canvas>(
        &mut self,
        canvas: &mut C,
        text: &str,
        index: usize,
        y: u16,
    ) -> Result<(), RenderError> {
        let width = canvas.text_width(text);
        if width > MAX_VALUE_WIDTH {
            return self.draw_overflow(canvas, index, y);
        }

        if self.cache.is_overflowed(index) {
            canvas.fill_rect(LINE_VALUE_X, y, VALUE_REGION_WIDTH, LINE_CLEAR_HEIGHT, Color::BLACK)?;
        } else if let Some(old) = self.cache.clear_width(Region::Value, index, width) {
            canvas.fill_rect(LINE_VALUE_X, y, old, LINE_CLEAR_HEIGHT, Color::BLACK)?;
        }
        canvas.draw_text(text, LINE_VALUE_X, y)?;
        self.cache.store(Region::Value, index, width);
        Ok(())
    }

    fn draw_overflow<C: Canvas>(&mut self, canvas: &mut C, index: usize, y: u16) -> Result<(), RenderError> {
        canvas.fill_rect(LINE_VALUE_X, y, VALUE_REGION_WIDTH, LINE_CLEAR_HEIGHT, Color::BLACK)?;
        canvas.set_text_color(Color::RED, Some(Color::BLACK));
        canvas.draw_text(format::OVERFLOW_TEXT, LINE_VALUE_X, y)?;
        canvas.set_text_color(Color::WHITE, Some(Color::BLACK));
        self.cache.store_overflow(index);
        Ok(())
    }

    fn draw_bar<C: Canvas>(&mut self, canvas: &mut C, line: &Line, index: usize, y: u16) -> Result<(), RenderError> {
        let frame_y = y.saturating_sub(BAR_FRAME_RAISE);
        if self.cache.is_overflowed(index) {
            canvas.fill_rect(LINE_VALUE_X, y, VALUE_REGION_WIDTH, LINE_CLEAR_HEIGHT, Color::BLACK)?;
        } else if let Some(old) = self.cache.clear_width(Region::Value, index, BAR_FRAME_WIDTH) {
            canvas.fill_rect(LINE_VALUE_X, y, old, LINE_CLEAR_HEIGHT, Color::BLACK)?;
        }

        canvas.fill_rect(LINE_VALUE_X, frame_y, BAR_FRAME_WIDTH, BAR_FRAME_HEIGHT, Color::WHITE)?;
        let fill = format::bar_fill(line.value());
        if fill > 0 {
            canvas.fill_rect(LINE_VALUE_X + BAR_FILL_INSET, y, fill, BAR_FILL_HEIGHT, Color::GREEN)?;
        }

        if line.option().bar_shows_value() {
            canvas.set_text_color(Color::BLACK, None);
            canvas.draw_text(&format::bar_label(line.value()), LINE_VALUE_X + BAR_LABEL_OFFSET_X, y)?;
            canvas.set_text_color(Color::WHITE, Some(Color::BLACK));
        }
        self.cache.store(Region::Value, index, BAR_FRAME_WIDTH);
        Ok(())
    }
}

fn draw_storage_icon<C: Canvas>(canvas: &mut C, present: bool) -> Result<(), DisplayError> {
    if present && canvas.draw_image(icons::STORAGE_IMAGE, STORAGE_ICON_X, 0).is_ok() {
        return Ok(());
    }
    // No card: white tile with a struck-through card outline
    canvas.fill_rect(STORAGE_ICON_X, 0, ICON_SIZE, HEADER_HEIGHT, Color::WHITE)?;
    let cx = STORAGE_ICON_X + ICON_SIZE / 2;
    canvas.fill_circle(cx, ICON_SIZE / 2, ICON_RADIUS, Color::LIGHT_GREY)?;
    canvas.draw_circle(cx, ICON_SIZE / 2, ICON_RADIUS, Color::BLACK)?;
    for d in 0..(2 * ICON_RADIUS) {
        canvas.draw_pixel(cx - ICON_RADIUS + d, ICON_SIZE / 2 - ICON_RADIUS + d, Color::RED)?;
    }
    Ok(())
}

fn draw_mqtt_icon<C: Canvas>(canvas: &mut C, mqtt: MqttIndicator, storage: bool) -> Result<(), DisplayError> {
    canvas.fill_rect(ACTIVITY_X, 0, ACTIVITY_CLEAR_SIZE, ACTIVITY_CLEAR_SIZE, Color::WHITE)?;

    let (image, color) = if mqtt.status.is_connected() {
        (icons::MQTT_ON_IMAGE, Color::GREEN)
    } else {
        (icons::MQTT_OFF_IMAGE, Color::RED)
    };
    if !(storage && canvas.draw_image(image, MQTT_ICON_X, 0).is_ok()) {
        draw_status_circle(canvas, MQTT_ICON_X, color)?;
    }

    if mqtt.published {
        draw_glyph(canvas, &icons::ARROW_PUBLISH, PUBLISH_ARROW_X, 1)?;
    }
    if mqtt.received {
        draw_glyph(canvas, &icons::ARROW_RECEIVE, RECEIVE_ARROW_X, 1)?;
    }
    Ok(())
}

fn draw_signal_icon<C: Canvas>(canvas: &mut C, signal: SignalBand, storage: bool) -> Result<(), DisplayError> {
    if storage && canvas.draw_image(signal.image(), WIFI_ICON_X, 0).is_ok() {
        return Ok(());
    }
    draw_status_circle(canvas, WIFI_ICON_X, signal.color())
}

fn draw_band_label<C: Canvas>(canvas: &mut C, band: FrequencyBand) -> Result<(), DisplayError> {
    canvas.fill_rect(WIFI_ICON_X, 0, BAND_CLEAR_WIDTH, BAND_CLEAR_HEIGHT, Color::WHITE)?;
    for (glyph, offset) in band.glyphs() {
        draw_glyph(canvas, glyph, BAND_LABEL_X + offset, 1)?;
    }
    Ok(())
}

fn draw_status_circle<C: Canvas>(canvas: &mut C, icon_x: u16, color: Color) -> Result<(), DisplayError> {
    let cx = icon_x + ICON_SIZE / 2;
    let cy = HEADER_HEIGHT / 2;
    canvas.fill_circle(cx, cy, ICON_RADIUS, color)?;
    canvas.draw_circle(cx, cy, ICON_RADIUS, Color::BLACK)
}

fn draw_glyph<C: Canvas>(canvas: &mut C, glyph: &Glyph, x: u16, y: u16) -> Result<(), DisplayError> {
    for (dx, dy) in glyph.pixels() {
        canvas.draw_pixel(x + dx, y + dy, Color::BLACK)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing;

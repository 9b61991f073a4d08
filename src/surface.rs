//! Drawing contract between the screens and whatever shows the pixels.

use anyhow::Result;
use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_5X8},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

use crate::raster::MonoRaster;

/// Height of one text line band in pixels.
pub const LINE_HEIGHT: u32 = 8;

/// Font for every text line; 8px tall so one glyph row fills one band.
pub const FONT: &MonoFont<'static> = &FONT_5X8;

/// A row of text plus its highlight flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    pub text: String,
    pub selected: bool,
}

impl ScreenLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selected: false,
        }
    }

    pub fn selected(mut self, on: bool) -> Self {
        self.selected = on;
        self
    }
}

/// Fixed-size monochrome target with line-oriented text.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Blank the whole surface.
    fn clear(&mut self);

    /// Fill (or erase) a rectangle in pixel coordinates.
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool);

    /// Draw `text` in the band for `line`. Highlighted lines are drawn
    /// inverted on a filled bar.
    fn draw_text(&mut self, line: u8, text: &str, highlighted: bool);

    /// Push the finished frame to the viewer.
    fn present(&mut self) -> Result<()>;

    /// Characters that fit on one line.
    fn columns(&self) -> usize {
        (self.width() / FONT.character_size.width) as usize
    }

    /// Draw `text` padded to sit in the middle of the line.
    fn draw_centered(&mut self, line: u8, text: &str) {
        let pad = self.columns().saturating_sub(text.chars().count()) / 2;
        self.draw_text(line, &format!("{}{}", " ".repeat(pad), text), false);
    }

    fn draw_line(&mut self, line: u8, row: &ScreenLine) {
        self.draw_text(line, &row.text, row.selected);
    }
}

impl RenderSurface for MonoRaster {
    fn width(&self) -> u32 {
        self.size().width
    }

    fn height(&self) -> u32 {
        self.size().height
    }

    fn clear(&mut self) {
        self.fill(false);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool) {
        let color = if on { BinaryColor::On } else { BinaryColor::Off };
        let _ = Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self);
    }

    fn draw_text(&mut self, line: u8, text: &str, highlighted: bool) {
        let top = line as i32 * LINE_HEIGHT as i32;
        let ink = if highlighted {
            let width = self.width();
            self.fill_rect(0, top, width, LINE_HEIGHT, true);
            BinaryColor::Off
        } else {
            BinaryColor::On
        };
        let style = MonoTextStyle::new(FONT, ink);
        let _ = Text::with_baseline(text, Point::new(0, top), style, Baseline::Top).draw(self);
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

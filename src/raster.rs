//! 1-bit frame buffer the screens draw into.

use core::convert::Infallible;
use embedded_graphics::{Pixel, pixelcolor::BinaryColor, prelude::*};

/// Monochrome raster with the panel's dimensions. Pixels outside the panel
/// are clipped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoRaster {
    size: Size,
    pixels: Vec<bool>,
}

impl MonoRaster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![false; (width * height) as usize],
        }
    }

    /// Set every pixel to `on`.
    pub fn fill(&mut self, on: bool) {
        self.pixels.fill(on);
    }

    /// Pixel state; out-of-range coordinates read as off.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.size.width || y >= self.size.height {
            return false;
        }
        self.pixels[(y * self.size.width + x) as usize]
    }

    /// Number of lit pixels.
    #[cfg(test)]
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    /// Lit pixels inside rows `[y0, y1)`.
    #[cfg(test)]
    pub fn lit_in_rows(&self, y0: u32, y1: u32) -> usize {
        (y0..y1.min(self.size.height))
            .flat_map(|y| (0..self.size.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixel(x, y))
            .count()
    }
}

impl OriginDimensions for MonoRaster {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for MonoRaster {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x >= self.size.width || y >= self.size.height {
                continue;
            }
            self.pixels[(y * self.size.width + x) as usize] = color.is_on();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn drawing_is_clipped_to_panel() {
        let mut raster = MonoRaster::new(128, 32);
        Rectangle::new(Point::new(120, 28), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut raster)
            .unwrap();
        assert_eq!(raster.lit(), 8 * 4);
        assert!(raster.pixel(127, 31));
        assert!(!raster.pixel(128, 31));
    }

    #[test]
    fn fill_sets_every_pixel() {
        let mut raster = MonoRaster::new(16, 8);
        raster.fill(true);
        assert_eq!(raster.lit(), 128);
        raster.fill(false);
        assert_eq!(raster.lit(), 0);
    }
}

//! Production [`Panel`] over an SSD1306 128×32 OLED on a Linux I2C bus.
//!
//! The driver runs in buffered-graphics mode: draw calls write to an
//! in-memory framebuffer and [`Panel::flush`] pushes the whole buffer over
//! I2C.  Text uses the 6×10 px monospace font, which fits 21 columns across
//! the 128-px panel and three rows on a 10-px pitch.

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use linux_embedded_hal::I2cdev;
use ssd1306::{
    mode::BufferedGraphicsMode, mode::DisplayConfig as _, prelude::*, I2CDisplayInterface, Ssd1306,
};

use crate::config::DisplayConfig;
use crate::display::panel::{Panel, PanelError, Rect};

type Driver = Ssd1306<
    I2CInterface<I2cdev>,
    DisplaySize128x32,
    BufferedGraphicsMode<DisplaySize128x32>,
>;

/// SSD1306 panel wired to a Linux I2C character device.
pub struct OledPanel {
    driver: Driver,
}

impl OledPanel {
    /// Acquire the I2C bus named in `config` and initialise the panel.
    ///
    /// # Errors
    ///
    /// - [`PanelError::Bus`]  — the I2C device could not be opened.
    /// - [`PanelError::Init`] — the panel rejected the init sequence.
    pub fn open(config: &DisplayConfig) -> Result<Self, PanelError> {
        let bus = I2cdev::new(&config.i2c_bus)
            .map_err(|e| PanelError::Bus(format!("{}: {e}", config.i2c_bus)))?;

        let rotation = if config.rotate_180 {
            DisplayRotation::Rotate180
        } else {
            DisplayRotation::Rotate0
        };

        let interface = I2CDisplayInterface::new(bus);
        let mut driver = Ssd1306::new(interface, DisplaySize128x32, rotation)
            .into_buffered_graphics_mode();

        driver
            .init()
            .map_err(|e| PanelError::Init(format!("{e:?}")))?;

        Ok(Self { driver })
    }
}

impl std::fmt::Debug for OledPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OledPanel").finish_non_exhaustive()
    }
}

impl Panel for OledPanel {
    fn clear(&mut self) -> Result<(), PanelError> {
        self.driver
            .clear(BinaryColor::Off)
            .map_err(|e| PanelError::Draw(format!("{e:?}")))
    }

    fn fill_region(&mut self, region: Rect, on: bool) -> Result<(), PanelError> {
        let color = if on { BinaryColor::On } else { BinaryColor::Off };
        Rectangle::new(
            Point::new(region.x, region.y),
            Size::new(region.width, region.height),
        )
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(&mut self.driver)
        .map_err(|e| PanelError::Draw(format!("{e:?}")))
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), PanelError> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.driver)
            .map(|_| ())
            .map_err(|e| PanelError::Draw(format!("{e:?}")))
    }

    fn flush(&mut self) -> Result<(), PanelError> {
        self.driver
            .flush()
            .map_err(|e| PanelError::Flush(format!("{e:?}")))
    }
}

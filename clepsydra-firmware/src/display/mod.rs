//! Time display on the OLED
//!
//! [`OledDisplay`] puts the controller's `MM:SS` value on the SSD1306 panel.

pub mod ssd1306;

use defmt::*;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use clepsydra_core::format::format_mmss;
use clepsydra_core::traits::TimeDisplay;

pub use ssd1306::Ssd1306;

/// Panel center, where the time is drawn
const CENTER: Point = Point::new((ssd1306::WIDTH / 2) as i32, (ssd1306::HEIGHT / 2) as i32);

/// [`TimeDisplay`] on an SSD1306 panel
pub struct OledDisplay<I2C> {
    panel: Ssd1306<I2C>,
}

impl<I2C> OledDisplay<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Initialize the panel and blank it
    ///
    /// A panel that fails to initialize is still returned: every later
    /// operation reports its own error and the timer keeps running.
    pub async fn new(i2c: I2C, address: u8) -> Self {
        let mut panel = Ssd1306::new(i2c, address);
        match panel.init().await {
            Ok(()) => info!("OLED initialized"),
            Err(e) => error!("Failed to initialize display: {:?}", Debug2Format(&e)),
        }
        panel.fill(false);
        panel.flush().await.ok();
        Self { panel }
    }

    fn log<T>(result: Result<T, I2C::Error>, what: &str) -> Result<T, I2C::Error> {
        if let Err(e) = &result {
            warn!("Display {} failed: {:?}", what, Debug2Format(e));
        }
        result
    }
}

impl<I2C> TimeDisplay for OledDisplay<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    type Error = I2C::Error;

    async fn render(&mut self, seconds: u16) -> Result<(), Self::Error> {
        let text = format_mmss(seconds);
        let character_style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        self.panel.fill(false);
        // Drawing into the frame buffer cannot fail
        let _ = Text::with_text_style(&text, CENTER, character_style, text_style).draw(&mut self.panel);
        Self::log(self.panel.flush().await, "render")
    }

    async fn clear(&mut self, on: bool) -> Result<(), Self::Error> {
        self.panel.fill(on);
        Self::log(self.panel.flush().await, "clear")
    }

    async fn invert(&mut self, on: bool) -> Result<(), Self::Error> {
        Self::log(self.panel.set_inverted(on).await, "invert")
    }

    async fn power(&mut self, on: bool) -> Result<(), Self::Error> {
        Self::log(self.panel.set_display_on(on).await, "power")
    }
}

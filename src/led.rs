// Breathalyzer - Status LED Patterns
//
// The single WS2812 pixel is either off, solid, or flashing.  The pattern is
// recomputed from the device mode every iteration; the flash phase itself is
// owned by the mode controller so it can keep its own deadline.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::config::LED_INTENSITY;
use crate::events::ResultBand;

pub const LED_OFF: Rgb888 = Rgb888::BLACK;
pub const LED_RED: Rgb888 = Rgb888::new(LED_INTENSITY, 0, 0);
pub const LED_GREEN: Rgb888 = Rgb888::new(0, LED_INTENSITY, 0);
pub const LED_YELLOW: Rgb888 = Rgb888::new(LED_INTENSITY, LED_INTENSITY, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedPattern {
    Off,
    Solid(Rgb888),
    Flashing { color: Rgb888, period_ms: u64 },
}

impl LedPattern {
    /// Toggle period, if this pattern flashes.
    pub fn flash_period(&self) -> Option<u64> {
        match self {
            Self::Flashing { period_ms, .. } => Some(*period_ms),
            _ => None,
        }
    }

    /// Pixel color for the current flash phase.
    pub fn color(&self, flash_on: bool) -> Rgb888 {
        match *self {
            Self::Off => LED_OFF,
            Self::Solid(color) => color,
            Self::Flashing { color, .. } if flash_on => color,
            Self::Flashing { .. } => LED_OFF,
        }
    }
}

pub fn band_color(band: ResultBand) -> Rgb888 {
    match band {
        ResultBand::Low    => LED_GREEN,
        ResultBand::Medium => LED_YELLOW,
        ResultBand::High   => LED_RED,
    }
}

// Breathalyzer - Hardware Capabilities
//
// The mode controller only talks to hardware through these traits.  The
// ESP-IDF drivers in `drivers/` implement them on the device; `sim` provides
// host doubles for tests and the desktop simulation.

use embedded_graphics::pixelcolor::Rgb888;

use crate::events::Level;

/// Analog gas sensor (MQ-3 on an ADC channel).
pub trait GasSensor {
    /// Raw ADC counts in `[0, full_scale]`.
    fn read_raw(&mut self) -> anyhow::Result<u16>;
}

/// Digital push-button input.
pub trait ButtonInput {
    fn level(&mut self) -> Level;
}

/// 16x2 character display with an RGB backlight.
pub trait CharDisplay {
    fn clear(&mut self) -> anyhow::Result<()>;
    fn set_cursor(&mut self, col: u8, row: u8) -> anyhow::Result<()>;
    fn print(&mut self, text: &str) -> anyhow::Result<()>;
    fn set_backlight(&mut self, color: Rgb888) -> anyhow::Result<()>;
}

/// Addressable RGB LED strip. Colors are latched by `show`.
pub trait PixelStrip {
    fn set_pixel(&mut self, index: usize, color: Rgb888);
    fn show(&mut self) -> anyhow::Result<()>;
}

/// Everything the main loop drives, bundled so one `&mut` reaches it all.
pub struct Board<S, B, D, L> {
    pub sensor: S,
    pub button: B,
    pub display: D,
    pub strip: L,
}

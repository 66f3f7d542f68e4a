// Breathalyzer - Host Doubles
//
// In-memory implementations of the hardware capabilities plus a manually
// advanced clock.  Used by the unit/scenario tests and by the desktop
// simulation in `main.rs` so the firmware loop runs without a device.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::bail;
use embedded_graphics::pixelcolor::Rgb888;

use crate::clock::Clock;
use crate::config::{LCD_COLUMNS, LCD_ROWS, PIXEL_COUNT};
use crate::events::Level;
use crate::hal::{Board, ButtonInput, CharDisplay, GasSensor, PixelStrip};
use crate::led::LED_OFF;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Virtual clock. Clones share the same time so a test can keep a handle
/// after moving one into the controller.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// Gas sensor
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SimSensor {
    raw: u16,
    reads: u32,
    failing: bool,
}

impl SimSensor {
    pub fn new(raw: u16) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    pub fn set_raw(&mut self, raw: u16) {
        self.raw = raw;
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Successful reads so far.
    pub fn reads(&self) -> u32 {
        self.reads
    }
}

impl GasSensor for SimSensor {
    fn read_raw(&mut self) -> anyhow::Result<u16> {
        if self.failing {
            bail!("simulated ADC failure");
        }
        self.reads += 1;
        Ok(self.raw)
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct SimButton {
    level: Level,
}

impl SimButton {
    pub fn new() -> Self {
        Self { level: Level::Low }
    }

    pub fn press(&mut self) {
        self.level = Level::High;
    }

    pub fn release(&mut self) {
        self.level = Level::Low;
    }
}

impl Default for SimButton {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonInput for SimButton {
    fn level(&mut self) -> Level {
        self.level
    }
}

// ---------------------------------------------------------------------------
// Character display
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct SimDisplay {
    grid: [[char; LCD_COLUMNS]; LCD_ROWS],
    cursor: (usize, usize),
    backlight: Option<Rgb888>,
    prints: u32,
    failing: bool,
}

impl SimDisplay {
    pub fn new() -> Self {
        Self {
            grid: [[' '; LCD_COLUMNS]; LCD_ROWS],
            cursor: (0, 0),
            backlight: None,
            prints: 0,
            failing: false,
        }
    }

    pub fn row(&self, row: usize) -> String {
        self.grid[row].iter().collect()
    }

    pub fn backlight(&self) -> Option<Rgb888> {
        self.backlight
    }

    /// Number of `print` calls that reached the grid.
    pub fn prints(&self) -> u32 {
        self.prints
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing {
            bail!("simulated I2C NACK");
        }
        Ok(())
    }
}

impl Default for SimDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl CharDisplay for SimDisplay {
    fn clear(&mut self) -> anyhow::Result<()> {
        self.check()?;
        self.grid = [[' '; LCD_COLUMNS]; LCD_ROWS];
        self.cursor = (0, 0);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> anyhow::Result<()> {
        self.check()?;
        self.cursor = (col as usize, row as usize % LCD_ROWS);
        Ok(())
    }

    fn print(&mut self, text: &str) -> anyhow::Result<()> {
        self.check()?;
        let (mut col, row) = self.cursor;
        for ch in text.chars() {
            // The controller's DDRAM wraps off-screen; drop what doesn't fit.
            if col < LCD_COLUMNS {
                self.grid[row][col] = ch;
            }
            col += 1;
        }
        self.cursor = (col, row);
        self.prints += 1;
        Ok(())
    }

    fn set_backlight(&mut self, color: Rgb888) -> anyhow::Result<()> {
        self.check()?;
        self.backlight = Some(color);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LED strip
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct SimStrip {
    pending: [Rgb888; PIXEL_COUNT],
    shown: [Rgb888; PIXEL_COUNT],
    frames: u32,
}

impl SimStrip {
    pub fn new() -> Self {
        Self {
            pending: [LED_OFF; PIXEL_COUNT],
            shown: [LED_OFF; PIXEL_COUNT],
            frames: 0,
        }
    }

    /// Color latched by the last `show`.
    pub fn shown(&self, index: usize) -> Rgb888 {
        self.shown[index]
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl Default for SimStrip {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelStrip for SimStrip {
    fn set_pixel(&mut self, index: usize, color: Rgb888) {
        if let Some(pixel) = self.pending.get_mut(index) {
            *pixel = color;
        }
    }

    fn show(&mut self) -> anyhow::Result<()> {
        self.shown = self.pending;
        self.frames += 1;
        Ok(())
    }
}

pub type SimBoard = Board<SimSensor, SimButton, SimDisplay, SimStrip>;

/// Board with every double in its idle state and the sensor reading `raw`.
pub fn board(raw: u16) -> SimBoard {
    Board {
        sensor: SimSensor::new(raw),
        button: SimButton::new(),
        display: SimDisplay::new(),
        strip: SimStrip::new(),
    }
}

// Breathalyzer - LCD Screen Composition
//
// A `Screen` is the full 16x2 text content for one iteration.  `ScreenCache`
// pushes it to the display only when it differs from the last frame written,
// which keeps the HD44780 from flickering at the 100 Hz loop rate.

use core::fmt;

use embedded_graphics::pixelcolor::Rgb888;

use crate::config::{LCD_COLUMNS, LCD_ROWS};
use crate::hal::CharDisplay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [String; LCD_ROWS],
}

impl Screen {
    /// Build a screen, clipping or space-padding each line to the grid width.
    pub fn new(top: impl fmt::Display, bottom: impl fmt::Display) -> Self {
        Self {
            lines: [fit(top), fit(bottom)],
        }
    }

    /// Text of `row`, or `None` past the last row.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn draw<D: CharDisplay>(&self, display: &mut D) -> anyhow::Result<()> {
        for (row, line) in self.lines.iter().enumerate() {
            display.set_cursor(0, row as u8)?;
            display.print(line)?;
        }
        Ok(())
    }
}

fn fit(text: impl fmt::Display) -> String {
    let mut line: String = text.to_string().chars().take(LCD_COLUMNS).collect();
    while line.chars().count() < LCD_COLUMNS {
        line.push(' ');
    }
    line
}

#[derive(Debug, Default)]
pub struct ScreenCache {
    shown: Option<Screen>,
    backlight: Option<Rgb888>,
}

impl ScreenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `screen` if it changed. Returns whether anything was written.
    pub fn update<D: CharDisplay>(&mut self, display: &mut D, screen: Screen) -> anyhow::Result<bool> {
        if self.shown.as_ref() == Some(&screen) {
            return Ok(false);
        }
        // Forget the old frame first so a failed write is retried next time.
        self.shown = None;
        screen.draw(display)?;
        self.shown = Some(screen);
        Ok(true)
    }

    pub fn update_backlight<D: CharDisplay>(&mut self, display: &mut D, color: Rgb888) -> anyhow::Result<bool> {
        if self.backlight == Some(color) {
            return Ok(false);
        }
        self.backlight = None;
        display.set_backlight(color)?;
        self.backlight = Some(color);
        Ok(true)
    }

    pub fn shown(&self) -> Option<&Screen> {
        self.shown.as_ref()
    }
}

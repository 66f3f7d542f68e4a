// Breathalyzer - Grove 16x2 RGB LCD Driver
//
// Register-level driver for the Grove "LCD RGB Backlight" module: an
// AiP31068 (HD44780 command set) character controller plus a PCA9633 PWM
// chip for the backlight, both on the same I2C bus.

use std::thread;
use std::time::Duration;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use esp_idf_hal::i2c::I2cDriver;

use breathalyzer::config::*;
use breathalyzer::hal::CharDisplay;

// Control bytes (Co = 0: the rest of the transfer is one kind)
const CTRL_COMMAND: u8 = 0x80;
const CTRL_DATA: u8 = 0x40;

// HD44780 commands
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_LEFT: u8 = 0x06;      // entry mode set: increment, no shift
const CMD_DISPLAY_ON: u8 = 0x0C;      // display on, cursor off, blink off
const CMD_FUNCTION_2LINE: u8 = 0x28;  // 4-bit bus, 2 lines, 5x8 dots
const CMD_DDRAM_ROW0: u8 = 0x80;
const CMD_DDRAM_ROW1: u8 = 0xC0;

// PCA9633 registers
const REG_MODE1: u8 = 0x00;
const REG_MODE2: u8 = 0x01;
const REG_BLUE: u8 = 0x02;
const REG_GREEN: u8 = 0x03;
const REG_RED: u8 = 0x04;
const REG_LEDOUT: u8 = 0x08;

pub struct GroveLcd<'d> {
    i2c: I2cDriver<'d>,
}

impl<'d> GroveLcd<'d> {
    pub fn new(i2c: I2cDriver<'d>) -> Self {
        Self { i2c }
    }

    /// Verify the character controller acknowledges its address.
    pub fn is_connected(&mut self) -> bool {
        self.i2c
            .write(I2C_ADDR_LCD, &[CTRL_COMMAND, CMD_DISPLAY_ON], I2C_TIMEOUT_TICKS)
            .is_ok()
    }

    /// Power-on sequence from the AiP31068 datasheet, then backlight setup.
    pub fn init(&mut self) -> anyhow::Result<()> {
        thread::sleep(Duration::from_millis(50));

        // Function set is sent three times while the controller settles.
        for delay_us in [4500, 150, 150] {
            self.command(CMD_FUNCTION_2LINE)?;
            thread::sleep(Duration::from_micros(delay_us));
        }
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_LEFT)?;

        self.backlight_reg(REG_MODE1, 0x00)?;
        self.backlight_reg(REG_LEDOUT, 0xFF)?; // all channels under PWM control
        self.backlight_reg(REG_MODE2, 0x20)?;  // group blinking -> dimming

        log::info!("Grove LCD initialised ({}x{})", LCD_COLUMNS, LCD_ROWS);
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> anyhow::Result<()> {
        self.i2c
            .write(I2C_ADDR_LCD, &[CTRL_COMMAND, cmd], I2C_TIMEOUT_TICKS)?;
        Ok(())
    }

    fn backlight_reg(&mut self, reg: u8, value: u8) -> anyhow::Result<()> {
        self.i2c
            .write(I2C_ADDR_BACKLIGHT, &[reg, value], I2C_TIMEOUT_TICKS)?;
        Ok(())
    }
}

impl CharDisplay for GroveLcd<'_> {
    fn clear(&mut self) -> anyhow::Result<()> {
        self.command(CMD_CLEAR)?;
        thread::sleep(Duration::from_millis(2));
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> anyhow::Result<()> {
        let base = if row == 0 { CMD_DDRAM_ROW0 } else { CMD_DDRAM_ROW1 };
        self.command(base | (col & 0x3F))
    }

    fn print(&mut self, text: &str) -> anyhow::Result<()> {
        let mut buf = Vec::with_capacity(text.len() + 1);
        buf.push(CTRL_DATA);
        // The character ROM is ASCII-compatible only in the printable range.
        buf.extend(text.chars().map(|c| if c.is_ascii_graphic() || c == ' ' { c as u8 } else { b'?' }));
        self.i2c.write(I2C_ADDR_LCD, &buf, I2C_TIMEOUT_TICKS)?;
        Ok(())
    }

    fn set_backlight(&mut self, color: Rgb888) -> anyhow::Result<()> {
        self.backlight_reg(REG_RED, color.r())?;
        self.backlight_reg(REG_GREEN, color.g())?;
        self.backlight_reg(REG_BLUE, color.b())?;
        Ok(())
    }
}

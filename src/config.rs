// Breathalyzer - Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V)

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_GAS_SENSOR_ADC: u32 = 2; // D0/A0 - MQ-3 analog output (ADC1 channel 2)
pub const PIN_BUTTON: i32 = 3;         // D1/A1 - Test button (INPUT_PULLDOWN, active HIGH)
pub const PIN_PIXEL: i32 = 4;          // D2/A2 - WS2812 data line
pub const PIN_I2C_SDA: i32 = 6;        // D4    - I2C data line
pub const PIN_I2C_SCL: i32 = 7;        // D5    - I2C clock line

// ---------------------------------------------------------------------------
// I2C Bus (Grove 16x2 RGB backlit LCD)
// ---------------------------------------------------------------------------
pub const I2C_ADDR_LCD: u8 = 0x3E;
pub const I2C_ADDR_BACKLIGHT: u8 = 0x62;
pub const I2C_BAUDRATE_KHZ: u32 = 100;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Display (HD44780-compatible character grid)
// ---------------------------------------------------------------------------
pub const LCD_COLUMNS: usize = 16;
pub const LCD_ROWS: usize = 2;

// ---------------------------------------------------------------------------
// LED strip
// ---------------------------------------------------------------------------
pub const PIXEL_COUNT: usize = 1;
pub const LED_INTENSITY: u8 = 100;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const LOOP_YIELD_MS: u64 = 10;                   // End-of-iteration yield
pub const DIAGNOSTIC_READ_INTERVAL_MS: u64 = 2000;    // Ambient read outside Reading
pub const READING_SAMPLE_INTERVAL_MS: u64 = 20;       // 50 Hz while Reading
pub const WARMING_UP_MODE_MS: u64 = 20_000;
pub const READING_MODE_MS: u64 = 10_000;
pub const WARMING_UP_FLASH_MS: u64 = 1000;
pub const READING_FLASH_MS: u64 = 500;
pub const COOLDOWN_TICKS: u32 = 20;
pub const COOLDOWN_TICK_MS: u64 = 1000;
pub const DEBOUNCE_MS: u64 = 50;
pub const DOUBLE_CLICK_WINDOW_MS: u64 = 500;

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------
pub const SHORT_WINDOW_SAMPLES: u32 = 10;

// MQ-3 conversion. `ADC_FULL_SCALE` is the 10-bit board revision; the
// ESP32-C3 driver reads 12-bit counts and converts with `ADC_FULL_SCALE_12BIT`.
pub const SUPPLY_VOLTS: f32 = 5.0;
pub const ADC_FULL_SCALE: f32 = 1024.0;
pub const ADC_FULL_SCALE_12BIT: f32 = 4095.0;
pub const SENSOR_VOLTS_PER_KPPM: f32 = 1.1;

// ---------------------------------------------------------------------------
// Result bands (full-window average, PPM)
// ---------------------------------------------------------------------------
pub const PPM_MEDIUM_THRESHOLD: f32 = 10_000.0;
pub const PPM_HIGH_THRESHOLD: f32 = 15_000.0;

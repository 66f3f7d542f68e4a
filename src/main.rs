// Breathalyzer - Firmware Entry Point
//
// Boot sequence:
//   1. Bring up logging and take the peripherals.
//   2. Initialise the LCD, status pixel, MQ-3 ADC channel, and test button.
//   3. Run the cooperative main loop: one `ModeController::tick` per
//      iteration followed by a short fixed yield.
//
// On a non-ESP host the same loop runs against simulated hardware and a
// virtual clock, scripted through one complete breath test.

#[cfg(target_os = "espidf")]
mod drivers;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;

    use breathalyzer::clock::MonotonicClock;
    use breathalyzer::config::*;
    use breathalyzer::controller::ModeController;
    use breathalyzer::hal::Board;
    use breathalyzer::sampler::Conversion;

    use crate::drivers::button::TestButton;
    use crate::drivers::gas_sensor::Mq3Sensor;
    use crate::drivers::lcd::GroveLcd;
    use crate::drivers::pixel::NeoPixel;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("Breathalyzer firmware starting");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;
    log::info!(
        "Pins: button GPIO{}, pixel GPIO{}, I2C SDA GPIO{} SCL GPIO{}",
        PIN_BUTTON,
        PIN_PIXEL,
        PIN_I2C_SDA,
        PIN_I2C_SCL
    );

    let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &i2c_config,
    )?;

    let mut display = GroveLcd::new(i2c);
    if !display.is_connected() {
        // Keep going so the serial log still shows readings.
        log::error!("LCD not responding at 0x{:02X}", I2C_ADDR_LCD);
    } else {
        display.init()?;
    }

    let strip = NeoPixel::new(peripherals.rmt.channel0, peripherals.pins.gpio4)?;
    let sensor = Mq3Sensor::new()?;
    let button = TestButton::new(peripherals.pins.gpio3)?;

    let mut board = Board {
        sensor,
        button,
        display,
        strip,
    };

    // ---- Main loop --------------------------------------------------------
    // The oneshot driver returns 12-bit counts.
    let mut controller =
        ModeController::with_conversion(MonotonicClock::new(), Conversion::twelve_bit());
    let yield_time = Duration::from_millis(LOOP_YIELD_MS);

    loop {
        controller.tick(&mut board);
        thread::sleep(yield_time);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    use breathalyzer::clock::Clock;
    use breathalyzer::config::*;
    use breathalyzer::controller::ModeController;
    use breathalyzer::events::DeviceMode;
    use breathalyzer::sampler::Conversion;
    use breathalyzer::sim::{self, ManualClock};

    // 12-bit counts: clean air around 60, a breath peaking near 3000.
    const AMBIENT_RAW: u16 = 60;
    const BREATH_PEAK_RAW: f32 = 3000.0;
    const PRESS_AT_MS: u64 = WARMING_UP_MODE_MS + 1_000;
    const PRESS_LEN_MS: u64 = 150;
    const SIM_LIMIT_MS: u64 = 120_000;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Breathalyzer desktop simulation");

    let clock = ManualClock::new(0);
    let mut board = sim::board(AMBIENT_RAW);
    let mut controller = ModeController::with_conversion(clock.clone(), Conversion::twelve_bit());
    let mut reading_started = None;

    while clock.now_ms() < SIM_LIMIT_MS {
        let now = clock.now_ms();

        if (PRESS_AT_MS..PRESS_AT_MS + PRESS_LEN_MS).contains(&now) {
            board.button.press();
        } else {
            board.button.release();
        }

        // Breath profile: rise over 2 s, hold, decay after 6 s.
        let raw = match reading_started {
            Some(start) => {
                let t = now.saturating_sub(start) as f32 / 1000.0;
                let envelope = if t < 2.0 {
                    t / 2.0
                } else if t < 6.0 {
                    1.0
                } else {
                    (1.0 - (t - 6.0) / 6.0).max(0.0)
                };
                AMBIENT_RAW + (BREATH_PEAK_RAW * envelope) as u16
            }
            None => AMBIENT_RAW,
        };
        board.sensor.set_raw(raw);

        let before = controller.mode();
        let after = controller.tick(&mut board);
        if before != after {
            log::info!(
                "[{:>6} ms] LCD |{}|{}|",
                now,
                board.display.row(0),
                board.display.row(1)
            );
            match after {
                DeviceMode::Reading => reading_started = Some(now),
                DeviceMode::Idle if reading_started.is_some() => break,
                _ => {}
            }
        }

        clock.advance(LOOP_YIELD_MS);
    }

    if let Some(result) = controller.state().result {
        log::info!(
            "Simulated test finished: {} ({:.0} ppm average, {:.0} ppm peak)",
            result.band.label(),
            result.avg_ppm,
            result.max_ppm
        );
    }
    Ok(())
}

// Breathalyzer - WS2812 Status Pixel
//
// Drives the addressable LED through the RMT peripheral.  Colors are kept in
// RGB order and shifted out as GRB, MSB first.

use core::time::Duration;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::rmt::config::TransmitConfig;
use esp_idf_hal::rmt::{FixedLengthSignal, PinState, Pulse, RmtChannel, TxRmtDriver};

use breathalyzer::config::PIXEL_COUNT;
use breathalyzer::hal::PixelStrip;
use breathalyzer::led::LED_OFF;

const BITS_PER_PIXEL: usize = 24;
const SIGNAL_BITS: usize = PIXEL_COUNT * BITS_PER_PIXEL;

pub struct NeoPixel<'d> {
    tx: TxRmtDriver<'d>,
    pixels: [Rgb888; PIXEL_COUNT],
    zero: (Pulse, Pulse),
    one: (Pulse, Pulse),
}

impl<'d> NeoPixel<'d> {
    pub fn new<C: RmtChannel>(
        channel: impl Peripheral<P = C> + 'd,
        pin: impl Peripheral<P = impl OutputPin> + 'd,
    ) -> anyhow::Result<Self> {
        let config = TransmitConfig::new().clock_divider(1);
        let tx = TxRmtDriver::new(channel, pin, &config)?;

        // WS2812 bit timings
        let ticks_hz = tx.counter_clock()?;
        let pulse = |state, ns| Pulse::new_with_duration(ticks_hz, state, &Duration::from_nanos(ns));
        let zero = (pulse(PinState::High, 350)?, pulse(PinState::Low, 800)?);
        let one = (pulse(PinState::High, 700)?, pulse(PinState::Low, 600)?);

        Ok(Self {
            tx,
            pixels: [LED_OFF; PIXEL_COUNT],
            zero,
            one,
        })
    }
}

impl PixelStrip for NeoPixel<'_> {
    fn set_pixel(&mut self, index: usize, color: Rgb888) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn show(&mut self) -> anyhow::Result<()> {
        let mut signal = FixedLengthSignal::<SIGNAL_BITS>::new();
        for (p, color) in self.pixels.iter().enumerate() {
            let grb = (color.g() as u32) << 16 | (color.r() as u32) << 8 | color.b() as u32;
            for bit in 0..BITS_PER_PIXEL {
                let set = grb & (1 << (BITS_PER_PIXEL - 1 - bit)) != 0;
                let pulses = if set { &self.one } else { &self.zero };
                signal.set(p * BITS_PER_PIXEL + bit, pulses)?;
            }
        }
        self.tx.start_blocking(&signal)?;
        Ok(())
    }
}

// Breathalyzer - Gas Sampler
//
// Accumulates raw MQ-3 readings into short windows of 10 samples.  Every
// completed short window is averaged (integer) and folded into the
// full-window statistics that the result band is computed from.

use crate::config::*;

// ---------------------------------------------------------------------------
// Raw -> PPM conversion
// ---------------------------------------------------------------------------

/// Linear raw-to-PPM approximation. Not a calibrated sensor model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub supply_volts: f32,
    pub full_scale: f32,
    pub volts_per_kppm: f32,
}

impl Conversion {
    /// Default sensor model over a 12-bit ADC (0-4095).
    pub fn twelve_bit() -> Self {
        Self {
            full_scale: ADC_FULL_SCALE_12BIT,
            ..Self::default()
        }
    }

    pub fn volts(&self, raw: u32) -> f32 {
        raw as f32 * self.supply_volts / self.full_scale
    }

    pub fn ppm(&self, raw: u32) -> f32 {
        self.volts(raw) / self.volts_per_kppm * 1000.0
    }
}

impl Default for Conversion {
    fn default() -> Self {
        Self {
            supply_volts: SUPPLY_VOLTS,
            full_scale: ADC_FULL_SCALE,
            volts_per_kppm: SENSOR_VOLTS_PER_KPPM,
        }
    }
}

/// Convert a raw reading with the default conversion.
pub fn concentration(raw: u32) -> f32 {
    Conversion::default().ppm(raw)
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Sampler {
    conversion: Conversion,

    // Short window
    short_sum: u32,
    short_count: u32,
    latest_short_avg: Option<u32>,

    // Full window (one reading cycle)
    full_sum: u64,
    full_count: u32,
    max_short_avg: u32,
}

impl Sampler {
    pub fn new(conversion: Conversion) -> Self {
        Self {
            conversion,
            ..Self::default()
        }
    }

    /// Start a fresh reading cycle.
    pub fn reset(&mut self) {
        *self = Self::new(self.conversion);
    }

    /// Add one raw reading. Returns the short-window average when this sample
    /// completed a window.
    pub fn record_sample(&mut self, raw: u16) -> Option<u32> {
        self.short_sum += raw as u32;
        self.short_count += 1;

        if self.short_count < SHORT_WINDOW_SAMPLES {
            return None;
        }

        let short_avg = self.short_sum / SHORT_WINDOW_SAMPLES;
        self.full_sum += short_avg as u64;
        self.full_count += 1;
        if short_avg > self.max_short_avg {
            self.max_short_avg = short_avg;
        }
        self.latest_short_avg = Some(short_avg);

        self.short_sum = 0;
        self.short_count = 0;

        log::debug!(
            "Short window #{}: avg raw {} ({:.0} ppm)",
            self.full_count,
            short_avg,
            self.conversion.ppm(short_avg)
        );
        Some(short_avg)
    }

    pub fn concentration(&self, raw: u32) -> f32 {
        self.conversion.ppm(raw)
    }

    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    pub fn short_count(&self) -> u32 {
        self.short_count
    }

    pub fn short_sum(&self) -> u32 {
        self.short_sum
    }

    pub fn full_count(&self) -> u32 {
        self.full_count
    }

    pub fn full_sum(&self) -> u64 {
        self.full_sum
    }

    /// Highest short-window average this cycle (raw units).
    pub fn max_short_avg(&self) -> u32 {
        self.max_short_avg
    }

    pub fn latest_short_avg(&self) -> Option<u32> {
        self.latest_short_avg
    }

    /// Concentration of the latest short-window average.
    pub fn latest_ppm(&self) -> Option<f32> {
        self.latest_short_avg.map(|raw| self.concentration(raw))
    }

    /// Mean of all short-window averages this cycle (raw units).
    pub fn full_avg(&self) -> Option<u32> {
        if self.full_count == 0 {
            return None;
        }
        Some((self.full_sum / self.full_count as u64) as u32)
    }

    /// Concentration of the full-window average. Zero if no window completed.
    pub fn full_avg_ppm(&self) -> f32 {
        self.full_avg()
            .map(|raw| self.concentration(raw))
            .unwrap_or(0.0)
    }

    pub fn max_ppm(&self) -> f32 {
        self.concentration(self.max_short_avg)
    }
}

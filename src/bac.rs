// Breathalyzer - Blood-Alcohol Estimate
//
// NOT IMPLEMENTED.  There is no validated PPM -> BAC model for this sensor
// yet, so `blood_alcohol` always returns the sentinel `BAC_NOT_IMPLEMENTED`.
// The display marks the value as unavailable instead of presenting it as a
// measurement.
//
// A real model needs a per-device clean-air baseline (R0) and the sensor's
// Rs/R0 curve; both are out of reach of a single raw ADC value.

/// Sentinel returned while no BAC model exists (g/dL).
pub const BAC_NOT_IMPLEMENTED: f32 = 0.0;

/// Result of a BAC conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacEstimate {
    /// Grams per decilitre. Always `BAC_NOT_IMPLEMENTED` for now.
    pub grams_per_dl: f32,
    /// False until a real conversion exists.
    pub implemented: bool,
}

/// Convert a concentration estimate to blood alcohol.
///
/// Stub: ignores `ppm` and returns the sentinel with `implemented == false`.
pub fn blood_alcohol(ppm: f32) -> BacEstimate {
    log::trace!("BAC requested for {:.0} ppm: not implemented", ppm);
    BacEstimate {
        grams_per_dl: BAC_NOT_IMPLEMENTED,
        implemented: false,
    }
}

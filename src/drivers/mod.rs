// Breathalyzer - ESP-IDF Drivers
//
// Implementations of the `hal` capability traits for the device.

pub mod button;
pub mod gas_sensor;
pub mod lcd;
pub mod pixel;

// Breathalyzer - Device Modes & Input Types

use crate::config::*;

// ---------------------------------------------------------------------------
// Device Mode
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceMode {
    /// Sensor heater stabilising after power-on.
    #[default]
    WarmingUp,
    /// Ready for a breath sample.
    Idle,
    /// Sampling a breath.
    Reading,
    /// Showing the result while the sensor clears.
    Cooldown,
}

impl DeviceMode {
    /// Short label for logs and the top LCD row.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WarmingUp => "Warming up",
            Self::Idle      => "Ready",
            Self::Reading   => "Blow now",
            Self::Cooldown  => "Result",
        }
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }
}

/// Classified button gesture for one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Nothing new this iteration.
    Unpressed,
    /// Debounced press (reported once per press).
    Pressed,
    /// Still down past the double-click window (reported every iteration).
    Held,
    /// Second press inside the double-click window.
    DoubleClick,
}

// ---------------------------------------------------------------------------
// Reading Result
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultBand {
    Low,
    Medium,
    High,
}

impl ResultBand {
    /// Band a full-window average concentration.
    pub fn classify(ppm: f32) -> Self {
        if ppm >= PPM_HIGH_THRESHOLD {
            Self::High
        } else if ppm >= PPM_MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low    => "LOW",
            Self::Medium => "MEDIUM",
            Self::High   => "HIGH",
        }
    }
}

/// Unit shown while a reading is in progress. Toggled by a double-click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayUnit {
    #[default]
    Ppm,
    Bac,
}

impl DisplayUnit {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ppm => Self::Bac,
            Self::Bac => Self::Ppm,
        }
    }
}

// Breathalyzer - Button Gesture Classifier
//
// Debounced push-button classifier with press, hold, and double-click
// detection.  Polled once per main-loop iteration with the raw pin level and
// the iteration's timestamp; owns no pin and no clock so it can be driven from
// tests.

use crate::config::*;
use crate::events::{Gesture, Level};

#[derive(Debug, Clone)]
pub struct ButtonClassifier {
    // Watch state for the press currently being classified
    watching: bool,
    hold_begin_ms: u64,
    debounce_end_ms: u64,
    press_reported: bool,
    released: bool,

    // Edges before this instant are contact bounce from a double-click
    lockout_until_ms: Option<u64>,

    last_level: Level,
}

impl ButtonClassifier {
    pub fn new() -> Self {
        Self {
            watching: false,
            hold_begin_ms: 0,
            debounce_end_ms: 0,
            press_reported: false,
            released: false,
            lockout_until_ms: None,
            last_level: Level::Low, // pull-down -> idle LOW
        }
    }

    /// True while a press is being debounced or classified.
    pub fn is_watching(&self) -> bool {
        self.watching
    }

    /// Call once per loop iteration.
    pub fn classify(&mut self, level: Level, now_ms: u64) -> Gesture {
        let rising = self.last_level == Level::Low && level == Level::High;

        if !self.watching {
            self.last_level = level;
            // An edge inside the lockout is dropped, not deferred.
            let unlocked = self.lockout_until_ms.map_or(true, |until| now_ms > until);
            if rising && unlocked {
                self.lockout_until_ms = None;
                self.begin_watch(now_ms);
            }
            return Gesture::Unpressed;
        }

        // ---- debounce window: edge not trusted yet ----
        if now_ms <= self.debounce_end_ms {
            return Gesture::Unpressed;
        }

        self.last_level = level;
        let elapsed = now_ms.saturating_sub(self.hold_begin_ms);

        // ---- double-click window expired ----
        if elapsed > DOUBLE_CLICK_WINDOW_MS {
            if level == Level::High && !self.released {
                return Gesture::Held;
            }
            self.watching = false;
            if rising {
                self.begin_watch(now_ms);
            }
            return Gesture::Unpressed;
        }

        // ---- inside the double-click window ----
        if rising {
            self.watching = false;
            self.lockout_until_ms = Some(now_ms + DEBOUNCE_MS);
            log::debug!("Button: double click ({} ms)", elapsed);
            return Gesture::DoubleClick;
        }

        match level {
            Level::High if !self.press_reported => {
                self.press_reported = true;
                log::debug!("Button: press");
                Gesture::Pressed
            }
            Level::High => Gesture::Unpressed,
            Level::Low if !self.press_reported => {
                // Released before the debounce window closed: noise.
                self.watching = false;
                Gesture::Unpressed
            }
            Level::Low => {
                self.released = true;
                Gesture::Unpressed
            }
        }
    }

    fn begin_watch(&mut self, now_ms: u64) {
        self.watching = true;
        self.hold_begin_ms = now_ms;
        self.debounce_end_ms = now_ms + DEBOUNCE_MS;
        self.press_reported = false;
        self.released = false;
    }
}

impl Default for ButtonClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed `level` every 10 ms over `[from, to)` and collect the gestures.
    fn drive(
        button: &mut ButtonClassifier,
        level: Level,
        from: u64,
        to: u64,
        out: &mut Vec<Gesture>,
    ) {
        let mut t = from;
        while t < to {
            out.push(button.classify(level, t));
            t += 10;
        }
    }

    fn count(gestures: &[Gesture], wanted: Gesture) -> usize {
        gestures.iter().filter(|g| **g == wanted).count()
    }

    #[test]
    fn idle_low_reports_nothing() {
        let mut button = ButtonClassifier::new();
        let mut out = Vec::new();
        drive(&mut button, Level::Low, 0, 1000, &mut out);
        assert!(out.iter().all(|g| *g == Gesture::Unpressed));
        assert!(!button.is_watching());
    }

    #[test]
    fn short_click_reports_one_press() {
        let mut button = ButtonClassifier::new();
        let mut out = Vec::new();
        drive(&mut button, Level::Low, 0, 100, &mut out);
        drive(&mut button, Level::High, 100, 250, &mut out);
        drive(&mut button, Level::Low, 250, 1500, &mut out);

        assert_eq!(count(&out, Gesture::Pressed), 1);
        assert_eq!(count(&out, Gesture::Held), 0);
        assert_eq!(count(&out, Gesture::DoubleClick), 0);
        assert_eq!(*out.last().unwrap(), Gesture::Unpressed);
        assert!(!button.is_watching());
    }

    #[test]
    fn press_is_deferred_until_debounce_elapses() {
        let mut button = ButtonClassifier::new();
        assert_eq!(button.classify(Level::High, 1000), Gesture::Unpressed);
        assert_eq!(button.classify(Level::High, 1030), Gesture::Unpressed);
        // Exactly on the debounce deadline is still inside the window.
        assert_eq!(button.classify(Level::High, 1050), Gesture::Unpressed);
        assert_eq!(button.classify(Level::High, 1051), Gesture::Pressed);
        assert_eq!(button.classify(Level::High, 1060), Gesture::Unpressed);
    }

    #[test]
    fn bounce_inside_debounce_window_is_ignored() {
        let mut button = ButtonClassifier::new();
        let mut out = Vec::new();
        out.push(button.classify(Level::High, 0));
        out.push(button.classify(Level::Low, 10));
        out.push(button.classify(Level::High, 20));
        out.push(button.classify(Level::Low, 30));
        out.push(button.classify(Level::High, 40));
        drive(&mut button, Level::High, 60, 200, &mut out);
        drive(&mut button, Level::Low, 200, 800, &mut out);

        assert_eq!(count(&out, Gesture::Pressed), 1);
        assert_eq!(count(&out, Gesture::DoubleClick), 0);
    }

    #[test]
    fn glitch_shorter_than_debounce_is_discarded() {
        let mut button = ButtonClassifier::new();
        let mut out = Vec::new();
        out.push(button.classify(Level::High, 0));
        drive(&mut button, Level::Low, 10, 1000, &mut out);

        assert!(out.iter().all(|g| *g == Gesture::Unpressed));
        assert!(!button.is_watching());
    }

    #[test]
    fn hold_reports_held_until_release() {
        let mut button = ButtonClassifier::new();
        let mut out = Vec::new();
        drive(&mut button, Level::High, 0, 2000, &mut out);

        // Everything after the window is Held.
        let after_window: Vec<Gesture> = out[51..].to_vec();
        assert!(after_window.iter().all(|g| *g == Gesture::Held));
        assert_eq!(count(&out, Gesture::Pressed), 1);

        assert_eq!(button.classify(Level::Low, 2000), Gesture::Unpressed);
        assert!(!button.is_watching());
        assert_eq!(button.classify(Level::Low, 2010), Gesture::Unpressed);
    }

    #[test]
    fn two_clicks_inside_window_report_one_double_click() {
        let mut button = ButtonClassifier::new();
        let mut out = Vec::new();
        drive(&mut button, Level::High, 0, 120, &mut out);
        drive(&mut button, Level::Low, 120, 240, &mut out);
        drive(&mut button, Level::High, 240, 400, &mut out);
        drive(&mut button, Level::Low, 400, 1500, &mut out);

        assert_eq!(count(&out, Gesture::DoubleClick), 1);
        assert_eq!(count(&out, Gesture::Pressed), 1);
        assert_eq!(count(&out, Gesture::Held), 0);
    }

    #[test]
    fn holding_after_double_click_is_not_a_new_press() {
        let mut button = ButtonClassifier::new();
        let mut out = Vec::new();
        drive(&mut button, Level::High, 0, 120, &mut out);
        drive(&mut button, Level::Low, 120, 240, &mut out);
        drive(&mut button, Level::High, 240, 3000, &mut out);

        assert_eq!(count(&out, Gesture::DoubleClick), 1);
        assert_eq!(count(&out, Gesture::Pressed), 1);
        assert_eq!(count(&out, Gesture::Held), 0);
    }

    #[test]
    fn second_click_after_window_is_a_new_press() {
        let mut button = ButtonClassifier::new();
        let mut out = Vec::new();
        drive(&mut button, Level::High, 0, 100, &mut out);
        drive(&mut button, Level::Low, 100, 800, &mut out);
        drive(&mut button, Level::High, 800, 900, &mut out);
        drive(&mut button, Level::Low, 900, 2000, &mut out);

        assert_eq!(count(&out, Gesture::Pressed), 2);
        assert_eq!(count(&out, Gesture::DoubleClick), 0);
    }

    #[test]
    fn second_press_landing_as_window_expires_starts_new_watch() {
        let mut button = ButtonClassifier::new();
        assert_eq!(button.classify(Level::High, 0), Gesture::Unpressed);
        assert_eq!(button.classify(Level::High, 60), Gesture::Pressed);
        assert_eq!(button.classify(Level::Low, 100), Gesture::Unpressed);
        // First poll past the window sees the new press.
        assert_eq!(button.classify(Level::High, 510), Gesture::Unpressed);
        assert!(button.is_watching());
        assert_eq!(button.classify(Level::High, 570), Gesture::Pressed);
    }

    #[test]
    fn press_at_boot_is_classified() {
        let mut button = ButtonClassifier::new();
        assert_eq!(button.classify(Level::High, 0), Gesture::Unpressed);
        assert!(button.is_watching());
        assert_eq!(button.classify(Level::High, 51), Gesture::Pressed);
    }

    #[test]
    fn bounce_after_double_click_is_locked_out() {
        let mut button = ButtonClassifier::new();
        let mut out = Vec::new();
        drive(&mut button, Level::High, 1000, 1120, &mut out);
        drive(&mut button, Level::Low, 1120, 1240, &mut out);
        out.push(button.classify(Level::High, 1240));
        assert_eq!(count(&out, Gesture::DoubleClick), 1);

        // Release and re-press inside the 50 ms lockout: dropped.
        assert_eq!(button.classify(Level::Low, 1260), Gesture::Unpressed);
        assert_eq!(button.classify(Level::High, 1280), Gesture::Unpressed);
        assert!(!button.is_watching());

        // Same edge once the lockout has passed starts a new watch.
        assert_eq!(button.classify(Level::Low, 1300), Gesture::Unpressed);
        assert_eq!(button.classify(Level::High, 1310), Gesture::Unpressed);
        assert!(button.is_watching());
        assert_eq!(button.classify(Level::High, 1370), Gesture::Pressed);
    }
}

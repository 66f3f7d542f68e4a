// Breathalyzer - Mode Controller
//
// One call to `tick` is one iteration of the firmware loop:
//   1. read the clock once,
//   2. classify the button,
//   3. run the handler for the active mode (may sample and change mode),
//   4. refresh the LCD and commit the LED frame.
//
// Periodic deadlines advance by a fixed step (`deadline += period`) instead of
// being re-armed from `now`.  After a stall every overdue deadline fires once
// per iteration until it has caught up; nothing is skipped.  Mode deadlines
// compare with a strict `now > deadline`.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::bac;
use crate::clock::Clock;
use crate::config::*;
use crate::events::{DeviceMode, DisplayUnit, Gesture, ResultBand};
use crate::hal::{Board, ButtonInput, CharDisplay, GasSensor, PixelStrip};
use crate::input::ButtonClassifier;
use crate::led::{self, LedPattern};
use crate::sampler::{Conversion, Sampler};
use crate::screen::{Screen, ScreenCache};

// ---------------------------------------------------------------------------
// Device state
// ---------------------------------------------------------------------------

/// Outcome of the last reading cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingResult {
    pub band: ResultBand,
    pub avg_ppm: f32,
    pub max_ppm: f32,
    pub windows: u32,
}

/// Everything the firmware remembers between iterations.
#[derive(Debug)]
pub struct DeviceState {
    pub mode: DeviceMode,
    pub unit: DisplayUnit,
    pub sampler: Sampler,
    pub button: ButtonClassifier,

    // Deadlines (ms since boot)
    pub mode_deadline_ms: u64,
    pub next_sample_ms: u64,
    pub next_flash_ms: u64,
    pub next_countdown_ms: u64,
    pub next_diagnostic_ms: u64,

    pub flash_on: bool,
    pub countdown: u32,
    pub ambient_ppm: Option<f32>,
    pub result: Option<ReadingResult>,
    pub transitions: u32,
}

impl DeviceState {
    fn new(boot_ms: u64, conversion: Conversion) -> Self {
        Self {
            mode: DeviceMode::default(),
            unit: DisplayUnit::default(),
            sampler: Sampler::new(conversion),
            button: ButtonClassifier::new(),
            mode_deadline_ms: boot_ms + WARMING_UP_MODE_MS,
            next_sample_ms: boot_ms,
            next_flash_ms: boot_ms,
            next_countdown_ms: boot_ms,
            next_diagnostic_ms: boot_ms,
            flash_on: false,
            countdown: 0,
            ambient_ppm: None,
            result: None,
            transitions: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct ModeController<C: Clock> {
    clock: C,
    state: DeviceState,
    screen: ScreenCache,
}

impl<C: Clock> ModeController<C> {
    pub fn new(clock: C) -> Self {
        Self::with_conversion(clock, Conversion::default())
    }

    pub fn with_conversion(clock: C, conversion: Conversion) -> Self {
        let boot_ms = clock.now_ms();
        log::info!(
            "Warming up sensor for {} s",
            WARMING_UP_MODE_MS / 1000
        );
        Self {
            clock,
            state: DeviceState::new(boot_ms, conversion),
            screen: ScreenCache::new(),
        }
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn mode(&self) -> DeviceMode {
        self.state.mode
    }

    /// Pattern for the active mode.
    pub fn led_pattern(&self) -> LedPattern {
        match self.state.mode {
            DeviceMode::WarmingUp => LedPattern::Flashing {
                color: led::LED_RED,
                period_ms: WARMING_UP_FLASH_MS,
            },
            DeviceMode::Idle => LedPattern::Off,
            DeviceMode::Reading => LedPattern::Flashing {
                color: led::LED_YELLOW,
                period_ms: READING_FLASH_MS,
            },
            DeviceMode::Cooldown => match self.state.result {
                Some(result) => LedPattern::Solid(led::band_color(result.band)),
                None => LedPattern::Solid(led::LED_GREEN),
            },
        }
    }

    /// Run one loop iteration. Returns the mode active afterwards.
    pub fn tick<S, B, D, L>(&mut self, board: &mut Board<S, B, D, L>) -> DeviceMode
    where
        S: GasSensor,
        B: ButtonInput,
        D: CharDisplay,
        L: PixelStrip,
    {
        let now = self.clock.now_ms();
        let gesture = self.state.button.classify(board.button.level(), now);

        if gesture == Gesture::DoubleClick && self.state.mode != DeviceMode::WarmingUp {
            self.state.unit = self.state.unit.toggled();
            log::info!("Display unit: {:?}", self.state.unit);
        }

        match self.state.mode {
            DeviceMode::WarmingUp => self.warming_up(now),
            DeviceMode::Idle => self.idle(now, gesture),
            DeviceMode::Reading => self.reading(now, &mut board.sensor),
            DeviceMode::Cooldown => self.cooldown(now),
        }

        if self.state.mode != DeviceMode::Reading {
            self.diagnostic_read(now, &mut board.sensor);
        }

        self.refresh_display(now, &mut board.display);
        self.commit_led(now, &mut board.strip);

        self.state.mode
    }

    // ---- mode handlers ----------------------------------------------------

    fn warming_up(&mut self, now: u64) {
        if now > self.state.mode_deadline_ms {
            self.enter(DeviceMode::Idle, now);
        }
    }

    fn idle(&mut self, now: u64, gesture: Gesture) {
        if matches!(gesture, Gesture::Pressed | Gesture::Held) {
            self.enter(DeviceMode::Reading, now);
        }
    }

    fn reading<S: GasSensor>(&mut self, now: u64, sensor: &mut S) {
        if now > self.state.mode_deadline_ms {
            self.enter(DeviceMode::Cooldown, now);
            return;
        }

        if now > self.state.next_sample_ms {
            self.state.next_sample_ms += READING_SAMPLE_INTERVAL_MS;
            match sensor.read_raw() {
                Ok(raw) => {
                    self.state.sampler.record_sample(raw);
                }
                Err(e) => log::warn!("Gas sensor read failed: {}", e),
            }
        }
    }

    fn cooldown(&mut self, now: u64) {
        if now > self.state.next_countdown_ms {
            self.state.next_countdown_ms += COOLDOWN_TICK_MS;
            self.state.countdown = self.state.countdown.saturating_sub(1);
            if self.state.countdown == 0 {
                self.enter(DeviceMode::Idle, now);
            }
        }
    }

    fn enter(&mut self, mode: DeviceMode, now: u64) {
        log::info!("Mode {:?} -> {:?} at {} ms", self.state.mode, mode, now);
        self.state.mode = mode;
        self.state.transitions += 1;

        match mode {
            DeviceMode::WarmingUp => {
                self.state.mode_deadline_ms = now + WARMING_UP_MODE_MS;
            }
            DeviceMode::Idle => {}
            DeviceMode::Reading => {
                self.state.mode_deadline_ms = now + READING_MODE_MS;
                self.state.next_sample_ms = now;
                self.state.sampler.reset();
                // Restart the flash so the first yellow phase is a full one.
                self.state.flash_on = true;
                self.state.next_flash_ms = now + READING_FLASH_MS;
            }
            DeviceMode::Cooldown => {
                let sampler = &self.state.sampler;
                let avg_ppm = sampler.full_avg_ppm();
                let result = ReadingResult {
                    band: ResultBand::classify(avg_ppm),
                    avg_ppm,
                    max_ppm: sampler.max_ppm(),
                    windows: sampler.full_count(),
                };
                log::info!(
                    "Result: {} (avg {:.0} ppm, max {:.0} ppm, {} windows)",
                    result.band.label(),
                    result.avg_ppm,
                    result.max_ppm,
                    result.windows
                );
                self.state.result = Some(result);
                self.state.countdown = COOLDOWN_TICKS;
                self.state.next_countdown_ms = now + COOLDOWN_TICK_MS;
            }
        }
    }

    // ---- background work --------------------------------------------------

    /// Ambient read for the serial log; never feeds the accumulator.
    fn diagnostic_read<S: GasSensor>(&mut self, now: u64, sensor: &mut S) {
        if now <= self.state.next_diagnostic_ms {
            return;
        }
        self.state.next_diagnostic_ms += DIAGNOSTIC_READ_INTERVAL_MS;

        match sensor.read_raw() {
            Ok(raw) => {
                let conversion = self.state.sampler.conversion();
                let ppm = conversion.ppm(raw as u32);
                log::info!(
                    "Raw: {}  Voltage: {:.2} V  PPM: {:.1} ppm",
                    raw,
                    conversion.volts(raw as u32),
                    ppm
                );
                self.state.ambient_ppm = Some(ppm);
            }
            Err(e) => log::warn!("Gas sensor read failed: {}", e),
        }
    }

    // ---- outputs ------------------------------------------------------------

    fn compose_screen(&self, now: u64) -> Screen {
        let state = &self.state;
        let title = state.mode.display_name();
        match state.mode {
            DeviceMode::WarmingUp => {
                let secs = seconds_left(state.mode_deadline_ms, now);
                Screen::new(title, format_args!("Ready in {}s", secs))
            }
            DeviceMode::Idle => match state.ambient_ppm {
                Some(ppm) => Screen::new("Ready - press", format_args!("Air {:.0} ppm", ppm)),
                None => Screen::new("Ready - press", "to start a test"),
            },
            DeviceMode::Reading => {
                let secs = seconds_left(state.mode_deadline_ms, now);
                let top = format!("{} {:>2}s", title, secs);
                let latest = state.sampler.latest_ppm();
                match (state.unit, latest) {
                    (_, None) => Screen::new(top, "Sampling..."),
                    (DisplayUnit::Ppm, Some(ppm)) => Screen::new(top, format_args!("{:.0} ppm", ppm)),
                    (DisplayUnit::Bac, Some(ppm)) => {
                        let bac = bac::blood_alcohol(ppm);
                        if bac.implemented {
                            Screen::new(top, format_args!("BAC {:.3}", bac.grams_per_dl))
                        } else {
                            Screen::new(top, format_args!("BAC {:.3} n/a", bac.grams_per_dl))
                        }
                    }
                }
            }
            DeviceMode::Cooldown => {
                let top = match state.result {
                    Some(result) => format!("{} {:.0} ppm", result.band.label(), result.avg_ppm),
                    None => title.to_string(),
                };
                Screen::new(top, format_args!("Next test in {}", state.countdown))
            }
        }
    }

    fn backlight_color(&self) -> Rgb888 {
        match self.state.mode {
            DeviceMode::WarmingUp => Rgb888::new(255, 0, 0),
            DeviceMode::Idle => Rgb888::WHITE,
            DeviceMode::Reading => Rgb888::new(255, 255, 0),
            DeviceMode::Cooldown => match self.state.result.map(|r| r.band) {
                Some(ResultBand::High) => Rgb888::new(255, 0, 0),
                Some(ResultBand::Medium) => Rgb888::new(255, 255, 0),
                _ => Rgb888::new(0, 255, 0),
            },
        }
    }

    fn refresh_display<D: CharDisplay>(&mut self, now: u64, display: &mut D) {
        let screen = self.compose_screen(now);
        if let Err(e) = self.screen.update(display, screen) {
            log::warn!("LCD update failed: {}", e);
        }
        let color = self.backlight_color();
        if let Err(e) = self.screen.update_backlight(display, color) {
            log::warn!("Backlight update failed: {}", e);
        }
    }

    fn commit_led<L: PixelStrip>(&mut self, now: u64, strip: &mut L) {
        let pattern = self.led_pattern();
        if let Some(period) = pattern.flash_period() {
            if now > self.state.next_flash_ms {
                self.state.flash_on = !self.state.flash_on;
                self.state.next_flash_ms += period;
            }
        }

        strip.set_pixel(0, pattern.color(self.state.flash_on));
        if let Err(e) = strip.show() {
            log::warn!("LED update failed: {}", e);
        }
    }
}

/// Whole seconds until `deadline`, rounded up.
fn seconds_left(deadline_ms: u64, now_ms: u64) -> u64 {
    (deadline_ms.saturating_sub(now_ms) + 999) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led::{LED_OFF, LED_RED, LED_YELLOW};
    use crate::sim::{self, ManualClock, SimBoard};

    fn controller(start_ms: u64) -> (ManualClock, ModeController<ManualClock>) {
        let clock = ManualClock::new(start_ms);
        let controller = ModeController::new(clock.clone());
        (clock, controller)
    }

    /// Tick every 10 ms until (and including) `until_ms`.
    fn run_until(
        clock: &ManualClock,
        controller: &mut ModeController<ManualClock>,
        board: &mut SimBoard,
        until_ms: u64,
    ) {
        while clock.now_ms() < until_ms {
            clock.advance(LOOP_YIELD_MS.min(until_ms - clock.now_ms()));
            controller.tick(board);
        }
    }

    fn to_idle(clock: &ManualClock, controller: &mut ModeController<ManualClock>, board: &mut SimBoard) {
        run_until(clock, controller, board, WARMING_UP_MODE_MS + 10);
        assert_eq!(controller.mode(), DeviceMode::Idle);
    }

    #[test]
    fn starts_warming_up_with_deadline_from_boot() {
        let (_clock, controller) = controller(500);
        assert_eq!(controller.mode(), DeviceMode::WarmingUp);
        assert_eq!(controller.state().mode_deadline_ms, 500 + WARMING_UP_MODE_MS);
    }

    #[test]
    fn warm_up_ends_strictly_after_deadline_exactly_once() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(100);

        clock.set(WARMING_UP_MODE_MS);
        assert_eq!(controller.tick(&mut board), DeviceMode::WarmingUp);

        clock.advance(1);
        assert_eq!(controller.tick(&mut board), DeviceMode::Idle);
        assert_eq!(controller.state().transitions, 1);

        for _ in 0..100 {
            clock.advance(10);
            controller.tick(&mut board);
        }
        assert_eq!(controller.mode(), DeviceMode::Idle);
        assert_eq!(controller.state().transitions, 1);
    }

    #[test]
    fn button_ignored_while_warming_up() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(100);
        board.button.press();
        run_until(&clock, &mut controller, &mut board, 300);
        board.button.release();
        run_until(&clock, &mut controller, &mut board, 5_000);
        assert_eq!(controller.mode(), DeviceMode::WarmingUp);
    }

    #[test]
    fn warming_up_flashes_red_each_second() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(100);

        let mut colors = Vec::new();
        for _ in 0..4 {
            clock.advance(1000);
            controller.tick(&mut board);
            colors.push(board.strip.shown(0));
        }
        assert_eq!(colors, vec![LED_RED, LED_OFF, LED_RED, LED_OFF]);
    }

    #[test]
    fn press_in_idle_starts_reading_with_ten_second_deadline() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(300);
        to_idle(&clock, &mut controller, &mut board);

        board.button.press();
        let mut pressed_at = None;
        for _ in 0..20 {
            clock.advance(10);
            if controller.tick(&mut board) == DeviceMode::Reading {
                pressed_at = Some(clock.now_ms());
                break;
            }
        }
        let pressed_at = pressed_at.expect("press should start a reading");
        assert_eq!(controller.state().mode_deadline_ms, pressed_at + READING_MODE_MS);
        // Same-iteration LED feedback.
        assert_eq!(board.strip.shown(0), LED_YELLOW);
    }

    #[test]
    fn idle_led_is_off_and_no_samples_accumulate() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(300);
        to_idle(&clock, &mut controller, &mut board);
        run_until(&clock, &mut controller, &mut board, 25_000);

        assert_eq!(board.strip.shown(0), LED_OFF);
        assert_eq!(controller.state().sampler.full_count(), 0);
        assert_eq!(controller.state().sampler.full_count(), windows);
    }

    #[test]
    fn reading_samples_every_twenty_milliseconds() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(512);
        to_idle(&clock, &mut controller, &mut board);

        board.button.press();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 200);
        board.button.release();
        assert_eq!(controller.mode(), DeviceMode::Reading);

        let reads_before = board.sensor.reads();
        let start = clock.now_ms();
        run_until(&clock, &mut controller, &mut board, start + 1000);
        assert_eq!(board.sensor.reads() - reads_before, 50);
    }

    #[test]
    fn double_click_toggles_reading_display_to_bac() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(512);
        to_idle(&clock, &mut controller, &mut board);

        board.button.press();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 100);
        board.button.release();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 100);
        board.button.press();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 100);
        board.button.release();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 1000);

        assert_eq!(controller.mode(), DeviceMode::Reading);
        assert_eq!(controller.state().unit, DisplayUnit::Bac);
        assert_eq!(board.display.row(1).trim_end(), "BAC 0.000 n/a");
    }

    #[test]
    fn reading_shows_latest_short_window_ppm() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(1024);
        to_idle(&clock, &mut controller, &mut board);

        board.button.press();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 500);
        board.button.release();

        assert_eq!(board.display.row(0).trim_end(), "Blow now 10s");
        assert_eq!(board.display.row(1).trim_end(), "4545 ppm");
    }

    #[test]
    fn cooldown_counts_down_twenty_seconds_then_idles() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(100);
        to_idle(&clock, &mut controller, &mut board);

        board.button.press();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 100);
        board.button.release();
        let deadline = controller.state().mode_deadline_ms;

        run_until(&clock, &mut controller, &mut board, deadline);
        assert_eq!(controller.mode(), DeviceMode::Reading);
        run_until(&clock, &mut controller, &mut board, deadline + 10);
        assert_eq!(controller.mode(), DeviceMode::Cooldown);
        assert_eq!(controller.state().countdown, COOLDOWN_TICKS);

        let entered = clock.now_ms();
        run_until(&clock, &mut controller, &mut board, entered + 5_010);
        assert_eq!(controller.state().countdown, COOLDOWN_TICKS - 5);
        assert_eq!(board.display.row(1).trim_end(), "Next test in 15");

        run_until(&clock, &mut controller, &mut board, entered + 20_000);
        assert_eq!(controller.mode(), DeviceMode::Cooldown);
        run_until(&clock, &mut controller, &mut board, entered + 20_010);
        assert_eq!(controller.mode(), DeviceMode::Idle);
    }

    #[test]
    fn no_cancellation_while_reading() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(100);
        to_idle(&clock, &mut controller, &mut board);

        board.button.press();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 100);
        board.button.release();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 2_000);
        board.button.press();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 3_000);
        board.button.release();

        assert_eq!(controller.mode(), DeviceMode::Reading);
    }

    #[test]
    fn cooldown_led_and_backlight_follow_band() {
        let conversion = Conversion {
            supply_volts: 5.0,
            full_scale: 1024.0,
            volts_per_kppm: 0.1, // 1024 counts -> 50 000 ppm
        };
        let clock = ManualClock::new(0);
        let mut controller = ModeController::with_conversion(clock.clone(), conversion);
        let mut board = sim::board(1024);
        to_idle(&clock, &mut controller, &mut board);

        board.button.press();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 100);
        board.button.release();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + READING_MODE_MS + 100);

        assert_eq!(controller.mode(), DeviceMode::Cooldown);
        let result = controller.state().result.expect("result after reading");
        assert_eq!(result.band, ResultBand::High);
        assert_eq!(controller.led_pattern(), LedPattern::Solid(LED_RED));
        assert_eq!(board.strip.shown(0), LED_RED);
        assert_eq!(board.display.backlight(), Some(Rgb888::new(255, 0, 0)));
        assert!(board.display.row(0).starts_with("HIGH"));
    }

    #[test]
    fn overdue_diagnostic_reads_fire_every_iteration_until_caught_up() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(100);

        clock.set(10_000);
        controller.tick(&mut board);
        assert_eq!(board.sensor.reads(), 1);
        assert_eq!(controller.state().next_diagnostic_ms, DIAGNOSTIC_READ_INTERVAL_MS);

        // Deadlines 2000..=8000 are still behind `now`: one read per tick.
        for expected in 2..=5 {
            clock.advance(10);
            controller.tick(&mut board);
            assert_eq!(board.sensor.reads(), expected);
        }
        clock.advance(10);
        controller.tick(&mut board);
        assert_eq!(board.sensor.reads(), 6);
        assert_eq!(controller.state().next_diagnostic_ms, 6 * DIAGNOSTIC_READ_INTERVAL_MS);

        clock.advance(10);
        controller.tick(&mut board);
        assert_eq!(board.sensor.reads(), 6);
    }

    #[test]
    fn sensor_failure_does_not_stop_the_loop() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(100);
        board.sensor.set_failing(true);
        board.display.set_failing(true);

        run_until(&clock, &mut controller, &mut board, WARMING_UP_MODE_MS + 10);
        assert_eq!(controller.mode(), DeviceMode::Idle);
        assert_eq!(controller.state().ambient_ppm, None);

        board.display.set_failing(false);
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 10);
        assert_eq!(board.display.row(0).trim_end(), "Ready - press");
    }

    #[test]
    fn flash_phase_carries_over_warm_up_exit() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(100);

        run_until(&clock, &mut controller, &mut board, WARMING_UP_MODE_MS);
        let phase = controller.state().flash_on;
        let next_flash = controller.state().next_flash_ms;
        assert_eq!(next_flash % WARMING_UP_FLASH_MS, 0);

        clock.advance(1);
        assert_eq!(controller.tick(&mut board), DeviceMode::Idle);
        assert_eq!(controller.state().flash_on, phase);
        assert_eq!(controller.state().next_flash_ms, next_flash);

        // Only entering Reading re-arms the phase.
        board.button.press();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 100);
        assert_eq!(controller.mode(), DeviceMode::Reading);
        assert_ne!(controller.state().next_flash_ms, next_flash);
    }

    #[test]
    fn button_held_from_boot_starts_reading_once_idle() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(100);
        board.button.press();
        controller.tick(&mut board);
        assert!(controller.state().button.is_watching());

        run_until(&clock, &mut controller, &mut board, WARMING_UP_MODE_MS + 10);
        assert_eq!(controller.mode(), DeviceMode::Idle);
        run_until(&clock, &mut controller, &mut board, WARMING_UP_MODE_MS + 20);
        assert_eq!(controller.mode(), DeviceMode::Reading);
    }

    #[test]
    fn gestures_during_cooldown_do_not_restart_or_cut_short() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(100);
        to_idle(&clock, &mut controller, &mut board);

        board.button.press();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + 100);
        board.button.release();
        run_until(&clock, &mut controller, &mut board, clock.now_ms() + READING_MODE_MS);
        assert_eq!(controller.mode(), DeviceMode::Cooldown);
        let result = controller.state().result;
        let windows = controller.state().sampler.full_count();
        let entered = clock.now_ms();

        // Click, then hold for two seconds.
        board.button.press();
        run_until(&clock, &mut controller, &mut board, entered + 100);
        board.button.release();
        run_until(&clock, &mut controller, &mut board, entered + 700);
        board.button.press();
        run_until(&clock, &mut controller, &mut board, entered + 2_700);
        board.button.release();
        run_until(&clock, &mut controller, &mut board, entered + 5_010);

        assert_eq!(controller.mode(), DeviceMode::Cooldown);
        assert!(controller.state().countdown <= COOLDOWN_TICKS - 5);
        assert!(controller.state().countdown >= COOLDOWN_TICKS - 6);
        assert_eq!(controller.state().result, result);
        assert_eq!(controller.state().sampler.full_count(), windows);
    }

    #[test]
    fn led_frame_committed_every_iteration() {
        let (clock, mut controller) = controller(0);
        let mut board = sim::board(100);
        run_until(&clock, &mut controller, &mut board, 1_000);
        assert_eq!(board.strip.frames(), 100);
    }

    #[test]
    fn seconds_left_rounds_up() {
        assert_eq!(seconds_left(10_000, 0), 10);
        assert_eq!(seconds_left(10_000, 1), 10);
        assert_eq!(seconds_left(10_000, 9_001), 1);
        assert_eq!(seconds_left(10_000, 10_000), 0);
        assert_eq!(seconds_left(10_000, 12_000), 0);
    }
}

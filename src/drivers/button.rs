// Breathalyzer - Test Button
//
// Active-HIGH push-button with the internal pull-down enabled.

use esp_idf_hal::gpio::{Input, InputPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;

use breathalyzer::events::Level;
use breathalyzer::hal::ButtonInput;

pub struct TestButton<'d, P: InputPin + OutputPin> {
    pin: PinDriver<'d, P, Input>,
}

impl<'d, P: InputPin + OutputPin> TestButton<'d, P> {
    pub fn new(pin: impl Peripheral<P = P> + 'd) -> anyhow::Result<Self> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Down)?;
        Ok(Self { pin })
    }
}

impl<'d, P: InputPin + OutputPin> ButtonInput for TestButton<'d, P> {
    fn level(&mut self) -> Level {
        Level::from(self.pin.is_high())
    }
}

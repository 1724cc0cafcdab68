//! GPIO Abstractions
//!
//! The status indicator is a common-cathode RGB LED on three plain GPIO
//! outputs. Each channel is either on or off, so colours are thresholded.

use embassy_stm32::gpio::Output;

use crate::types::IndicatorColor;
use crate::ui::StatusIndicator;

/// Channel level at or above which the LED segment is lit
const CHANNEL_THRESHOLD: u8 = 0x80;

/// Status LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LedState {
    /// LED is off
    #[default]
    Off,
    /// LED is on
    On,
}

impl LedState {
    /// State for one colour channel
    #[must_use]
    pub const fn from_channel(level: u8) -> Self {
        if level >= CHANNEL_THRESHOLD {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl defmt::Format for LedState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}

/// RGB status LED
pub struct RgbLed<'d> {
    red: Output<'d>,
    green: Output<'d>,
    blue: Output<'d>,
    color: IndicatorColor,
}

impl<'d> RgbLed<'d> {
    /// Create the LED (initially off)
    #[must_use]
    pub fn new(red: Output<'d>, green: Output<'d>, blue: Output<'d>) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            color: IndicatorColor::OFF,
        };
        led.apply(IndicatorColor::OFF);
        led
    }

    /// Last colour shown
    #[must_use]
    pub const fn color(&self) -> IndicatorColor {
        self.color
    }

    fn apply(&mut self, color: IndicatorColor) {
        Self::drive(&mut self.red, LedState::from_channel(color.r));
        Self::drive(&mut self.green, LedState::from_channel(color.g));
        Self::drive(&mut self.blue, LedState::from_channel(color.b));
        self.color = color;
    }

    fn drive(pin: &mut Output<'d>, state: LedState) {
        match state {
            LedState::On => pin.set_high(),
            LedState::Off => pin.set_low(),
        }
    }
}

impl StatusIndicator for RgbLed<'_> {
    fn set_color(&mut self, color: IndicatorColor) {
        self.apply(color);
    }
}

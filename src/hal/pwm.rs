//! PWM Outputs
//!
//! Display backlight brightness and the piezo that plays the UI cues.
//! Both run on general purpose timers through embassy's `SimplePwm`.

use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_stm32::timer::GeneralInstance4Channel;
use embassy_time::Timer;

use crate::config::{BEEP_CUE_HZ, BEEP_CUE_MS, TAB_CUE_HZ, TAB_CUE_MS};
use crate::error::Result;
use crate::types::Clip;
use crate::ui::CuePlayer;

/// PWM duty cycle (0-65535)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DutyCycle(u16);

impl DutyCycle {
    /// 0% duty cycle
    pub const ZERO: Self = Self(0);

    /// Create from percentage (0-100)
    #[must_use]
    pub fn from_percent(percent: u8) -> Self {
        let value = (u32::from(percent.min(100)) * 65535) / 100;
        Self(value as u16)
    }

    /// Get as percentage
    #[must_use]
    pub fn as_percent(self) -> u8 {
        ((u32::from(self.0) * 100) / 65535) as u8
    }

    /// Compare value for a timer whose full scale is `max`
    #[must_use]
    pub fn scaled_to(self, max: u16) -> u16 {
        ((u32::from(self.0) * u32::from(max)) / 65535) as u16
    }
}

impl Default for DutyCycle {
    fn default() -> Self {
        Self::ZERO
    }
}

impl defmt::Format for DutyCycle {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}%", self.as_percent());
    }
}

/// Display backlight on channel 1 of a PWM timer
pub struct Backlight<'d, T: GeneralInstance4Channel> {
    pwm: SimplePwm<'d, T>,
    level: DutyCycle,
}

impl<'d, T: GeneralInstance4Channel> Backlight<'d, T> {
    /// Take the timer and start dark
    #[must_use]
    pub fn new(pwm: SimplePwm<'d, T>) -> Self {
        let mut backlight = Self {
            pwm,
            level: DutyCycle::ZERO,
        };
        backlight.pwm.ch1().enable();
        backlight.set(DutyCycle::ZERO);
        backlight
    }

    /// Set brightness
    pub fn set(&mut self, level: DutyCycle) {
        let mut ch = self.pwm.ch1();
        let max = ch.max_duty_cycle();
        ch.set_duty_cycle(level.scaled_to(max));
        self.level = level;
    }

    /// Current brightness
    #[must_use]
    pub const fn level(&self) -> DutyCycle {
        self.level
    }
}

/// One tone burst
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tone {
    /// Pitch
    pub hz: u32,
    /// Length
    pub ms: u64,
}

impl Tone {
    /// Tone for a UI cue
    #[must_use]
    pub const fn for_clip(clip: Clip) -> Self {
        match clip {
            Clip::TabSwitch => Self {
                hz: TAB_CUE_HZ,
                ms: TAB_CUE_MS,
            },
            Clip::Beep => Self {
                hz: BEEP_CUE_HZ,
                ms: BEEP_CUE_MS,
            },
        }
    }
}

/// Piezo buzzer on channel 1 of a PWM timer
pub struct Piezo<'d, T: GeneralInstance4Channel> {
    pwm: SimplePwm<'d, T>,
}

impl<'d, T: GeneralInstance4Channel> Piezo<'d, T> {
    /// Take the timer, silent
    #[must_use]
    pub fn new(mut pwm: SimplePwm<'d, T>) -> Self {
        pwm.ch1().disable();
        Self { pwm }
    }

    /// Play a tone and wait for it to finish
    pub async fn tone(&mut self, tone: Tone) {
        self.pwm.set_frequency(Hertz(tone.hz));
        let mut ch = self.pwm.ch1();
        ch.set_duty_cycle_percent(50);
        ch.enable();
        Timer::after_millis(tone.ms).await;
        self.pwm.ch1().disable();
    }
}

impl<T: GeneralInstance4Channel> CuePlayer for Piezo<'_, T> {
    async fn play(&mut self, clip: Clip) -> Result<()> {
        self.tone(Tone::for_clip(clip)).await;
        Ok(())
    }
}

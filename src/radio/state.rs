//! Radio State Machine
//!
//! Manages the state of the FM receiver.
//! Implements immutable state transitions for predictable behavior.

use crate::config::default_frequency;
use crate::types::Frequency;

/// FM receiver state (immutable)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadioState {
    /// Tuned frequency
    frequency: Frequency,
    /// RF front end disabled
    standby: bool,
}

impl RadioState {
    /// Create a new radio state (starts in standby)
    #[must_use]
    pub const fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            standby: true,
        }
    }

    /// Get current frequency
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Check if the receiver is in standby
    #[must_use]
    pub const fn is_standby(&self) -> bool {
        self.standby
    }

    /// Check if the receiver is playing
    #[must_use]
    pub const fn is_on(&self) -> bool {
        !self.standby
    }

    /// Set frequency (returns new state)
    #[must_use]
    pub const fn with_frequency(self, frequency: Frequency) -> Self {
        Self { frequency, ..self }
    }

    /// Set standby (returns new state)
    #[must_use]
    pub const fn with_standby(self, standby: bool) -> Self {
        Self { standby, ..self }
    }
}

impl Default for RadioState {
    fn default() -> Self {
        Self::new(default_frequency())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Radio({}, {})",
            self.frequency,
            if self.standby { "STANDBY" } else { "ON" }
        );
    }
}

/// FM band limits supported by the tuner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FmBand {
    /// US/Europe band (87.5 - 108 MHz)
    #[default]
    UsEurope,
    /// Japanese band (76 - 91 MHz)
    Japan,
}

impl FmBand {
    /// Lower band edge
    #[must_use]
    pub const fn start(self) -> Frequency {
        match self {
            Self::UsEurope => Frequency::from_khz(87_500),
            Self::Japan => Frequency::from_khz(76_000),
        }
    }

    /// Upper band edge
    #[must_use]
    pub const fn end(self) -> Frequency {
        match self {
            Self::UsEurope => Frequency::from_khz(108_000),
            Self::Japan => Frequency::from_khz(91_000),
        }
    }

    /// Check if a frequency is inside the band
    #[must_use]
    pub const fn contains(self, freq: Frequency) -> bool {
        freq.as_khz() >= self.start().as_khz() && freq.as_khz() <= self.end().as_khz()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FmBand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::UsEurope => defmt::write!(f, "US/EU"),
            Self::Japan => defmt::write!(f, "JP"),
        }
    }
}

/// Receiver options applied at power-on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TunerSettings {
    /// Band limits
    pub band: FmBand,
    /// Stereo decoding enabled
    pub stereo: bool,
    /// Soft mute on weak signals
    pub soft_mute: bool,
    /// Stereo noise cancelling
    pub noise_cancel: bool,
    /// High cut control
    pub high_cut: bool,
}

impl Default for TunerSettings {
    fn default() -> Self {
        Self {
            band: FmBand::UsEurope,
            stereo: true,
            soft_mute: true,
            noise_cancel: true,
            high_cut: true,
        }
    }
}

/// Radio event (command) that triggers state transitions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioEvent {
    /// Enter (`true`) or leave (`false`) standby
    SetStandby(bool),
    /// Shift frequency by a signed number of kHz
    Tune(i32),
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::SetStandby(on) => defmt::write!(f, "SetStandby({})", on),
            Self::Tune(khz) => defmt::write!(f, "Tune({} kHz)", khz),
        }
    }
}

/// Apply an event to the radio state, returning new state
///
/// Returns `None` when a tune offset cannot be represented. Band limits
/// are not checked here.
#[must_use]
pub fn apply_event(state: RadioState, event: RadioEvent) -> Option<RadioState> {
    match event {
        RadioEvent::SetStandby(standby) => Some(state.with_standby(standby)),
        RadioEvent::Tune(delta_khz) => state
            .frequency
            .offset(delta_khz)
            .map(|freq| state.with_frequency(freq)),
    }
}

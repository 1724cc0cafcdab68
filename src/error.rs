//! Error taxonomy
//!
//! Every fault the core can observe. None of them is recovered from
//! locally: a failed tick ends the UI loop.

use core::fmt;

/// Which sensor failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorKind {
    /// LTR390 UV/ambient light
    Light,
    /// GPS receiver
    Gps,
    /// Real-time clock
    Clock,
    /// LIDAR ranging
    Range,
}

impl SensorKind {
    /// Short name for logs and messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Gps => "gps",
            Self::Clock => "clock",
            Self::Range => "range",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SensorKind {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.name());
    }
}

/// Firmware error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A sensor read failed or returned malformed data
    SensorRead(SensorKind),
    /// The tuner refused a standby or frequency command
    RadioCommandRejected,
    /// A view id outside 1..=4
    InvalidViewId(u8),
    /// The display could not be updated
    Display,
    /// The touch panel could not be read
    Touch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorRead(kind) => write!(f, "{} sensor read failed", kind.name()),
            Self::RadioCommandRejected => f.write_str("radio command rejected"),
            Self::InvalidViewId(id) => write!(f, "invalid view id {id}"),
            Self::Display => f.write_str("display update failed"),
            Self::Touch => f.write_str("touch read failed"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::SensorRead(kind) => defmt::write!(f, "SensorRead({})", kind),
            Self::RadioCommandRejected => defmt::write!(f, "RadioCommandRejected"),
            Self::InvalidViewId(id) => defmt::write!(f, "InvalidViewId({})", id),
            Self::Display => defmt::write!(f, "Display"),
            Self::Touch => defmt::write!(f, "Touch"),
        }
    }
}

/// Firmware result
pub type Result<T> = core::result::Result<T, Error>;

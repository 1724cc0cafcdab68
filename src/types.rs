//! Shared types used across the tricorder firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::error::{Error, Result};

/// FM frequency in kilohertz
///
/// Stored as an integer so that tuning steps are exact: tuning up and then
/// down by the same step always lands on the starting frequency. The value
/// is not range checked here; the tuner driver rejects frequencies outside
/// its band.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Create a frequency from kHz
    #[must_use]
    pub const fn from_khz(khz: u32) -> Self {
        Self(khz)
    }

    /// Create a frequency from MHz, rounded to the nearest kHz
    ///
    /// Returns `None` for negative or non-finite input.
    #[must_use]
    pub fn from_mhz(mhz: f32) -> Option<Self> {
        #[cfg(feature = "embedded")]
        use micromath::F32Ext;

        if !mhz.is_finite() || mhz < 0.0 {
            return None;
        }
        Some(Self((mhz * 1000.0).round() as u32))
    }

    /// Get the frequency in kHz
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0
    }

    /// Get the frequency in MHz as floating point
    #[must_use]
    pub fn as_mhz_f32(self) -> f32 {
        self.0 as f32 / 1000.0
    }

    /// Whole MHz and the tenths digit, for display
    #[must_use]
    pub const fn mhz_tenths(self) -> (u32, u32) {
        let tenths = (self.0 + 50) / 100;
        (tenths / 10, tenths % 10)
    }

    /// Apply a signed offset in kHz
    ///
    /// Returns `None` if the result would not fit in the representation.
    #[must_use]
    pub const fn offset(self, delta_khz: i32) -> Option<Self> {
        match self.0.checked_add_signed(delta_khz) {
            Some(khz) => Some(Self(khz)),
            None => None,
        }
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} kHz)", self.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mhz, tenths) = self.mhz_tenths();
        write!(f, "{mhz}.{tenths} MHz")
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        let (mhz, tenths) = self.mhz_tenths();
        defmt::write!(f, "{}.{} MHz", mhz, tenths);
    }
}

/// One of the four mutually exclusive screens
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ViewId {
    /// Date, time and GPS position
    #[default]
    Location,
    /// LIDAR target distance
    Target,
    /// UV index and ambient light
    DataView,
    /// FM radio controls
    Fm,
}

impl ViewId {
    /// All views in id order
    pub const ALL: [Self; 4] = [Self::Location, Self::Target, Self::DataView, Self::Fm];

    /// Look up a view by its numeric id (1-4)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidViewId`] for any id outside 1..=4.
    pub const fn from_id(id: u8) -> Result<Self> {
        match id {
            1 => Ok(Self::Location),
            2 => Ok(Self::Target),
            3 => Ok(Self::DataView),
            4 => Ok(Self::Fm),
            other => Err(Error::InvalidViewId(other)),
        }
    }

    /// Numeric id (1-4)
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Location => 1,
            Self::Target => 2,
            Self::DataView => 3,
            Self::Fm => 4,
        }
    }

    /// Zero-based index into per-view tables
    #[must_use]
    pub const fn index(self) -> usize {
        self.id() as usize - 1
    }

    /// Title shown at the top of the view
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::Target => "Target",
            Self::DataView => "Data View",
            Self::Fm => "FM Radio",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ViewId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "View{}", self.id());
    }
}

/// Logical button identifier (index into the button registry)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ButtonId(pub u8);

impl ButtonId {
    /// Registry index
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ButtonId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "button{}", self.0);
    }
}

/// Axis-aligned rectangle in screen pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl Rect {
    /// Create a rectangle
    #[must_use]
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Check whether a point lies inside (right and bottom edges exclusive)
    #[must_use]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && py >= self.y
            && (px as i64) < self.x as i64 + self.w as i64
            && (py as i64) < self.y as i64 + self.h as i64
    }
}

/// One touch sample
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TouchEvent {
    /// X coordinate in screen pixels
    pub x: i32,
    /// Y coordinate in screen pixels
    pub y: i32,
    /// Whether the panel is currently touched
    pub pressed: bool,
}

impl TouchEvent {
    /// A touch at the given point
    #[must_use]
    pub const fn pressed(x: i32, y: i32) -> Self {
        Self { x, y, pressed: true }
    }

    /// No touch
    #[must_use]
    pub const fn released() -> Self {
        Self {
            x: 0,
            y: 0,
            pressed: false,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TouchEvent {
    fn format(&self, f: defmt::Formatter) {
        if self.pressed {
            defmt::write!(f, "Touch({}, {})", self.x, self.y);
        } else {
            defmt::write!(f, "NoTouch");
        }
    }
}

/// RGB colour of the status indicator LED
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndicatorColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl IndicatorColor {
    /// LED off
    pub const OFF: Self = Self::new(0, 0, 0);
    /// Full red
    pub const RED: Self = Self::new(255, 0, 0);
    /// Full green
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Full blue
    pub const BLUE: Self = Self::new(0, 0, 255);
    /// Green plus blue
    pub const CYAN: Self = Self::new(0, 255, 255);

    /// Create a colour
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for IndicatorColor {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b);
    }
}

/// Day of the week as kept by the RTC
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Weekday {
    /// Monday
    #[default]
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    /// Weekday from a zero-based index (0 = Monday), wrapping past Sunday
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index % 7 {
            0 => Self::Monday,
            1 => Self::Tuesday,
            2 => Self::Wednesday,
            3 => Self::Thursday,
            4 => Self::Friday,
            5 => Self::Saturday,
            _ => Self::Sunday,
        }
    }

    /// Zero-based index (0 = Monday)
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Short name printed on the Location view
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tues",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thurs",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }
}

/// Calendar date and wall-clock time from the RTC
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DateTime {
    /// Day of the week
    pub weekday: Weekday,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Full year
    pub year: u16,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
}

#[cfg(feature = "embedded")]
impl defmt::Format for DateTime {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        );
    }
}

/// UV index and ambient light from the LTR390
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LightReading {
    /// UV index
    pub uv_index: f32,
    /// Ambient light in lux
    pub lux: f32,
}

/// Distance to target measured by the ranging sensor
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Distance(u16);

impl Distance {
    /// Create from centimetres
    #[must_use]
    pub const fn from_cm(cm: u16) -> Self {
        Self(cm)
    }

    /// Distance in centimetres
    #[must_use]
    pub const fn as_cm(self) -> u16 {
        self.0
    }

    /// Distance in metres
    #[must_use]
    pub fn as_meters(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Distance {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} cm", self.0);
    }
}

/// Audible cue played on a button press
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clip {
    /// Short click when switching tabs
    TabSwitch,
    /// Confirmation beep for radio commands
    Beep,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Clip {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::TabSwitch => defmt::write!(f, "tab"),
            Self::Beep => defmt::write!(f, "beep"),
        }
    }
}

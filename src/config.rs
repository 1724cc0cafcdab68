//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the tricorder hardware.
//! Screen geometry, button layout, I2C addresses, timing and pin mappings
//! are centralized here.

use crate::types::{Frequency, IndicatorColor, ViewId};

/// I2C bus frequency shared by all sensors and the tuner
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// SPI clock for the ILI9341 panel
pub const DISPLAY_SPI_HZ: u32 = 24_000_000;

/// LTR390 UV/ambient light sensor I2C address
pub const LTR390_I2C_ADDR: u8 = 0x53;

/// PA1010D GPS receiver I2C address
pub const GPS_I2C_ADDR: u8 = 0x10;

/// DS3231 real-time clock I2C address
pub const DS3231_I2C_ADDR: u8 = 0x68;

/// LIDAR-Lite v3 ranging sensor I2C address
pub const LIDAR_I2C_ADDR: u8 = 0x62;

/// TEA5767 FM tuner I2C address
pub const TEA5767_I2C_ADDR: u8 = 0x60;

/// FT6x36 capacitive touch controller I2C address
pub const TOUCH_I2C_ADDR: u8 = 0x38;

/// Screen width in pixels (landscape)
pub const SCREEN_WIDTH: u32 = 320;

/// Screen height in pixels (landscape)
pub const SCREEN_HEIGHT: u32 = 240;

/// Height of the navigation tab row
pub const TABS_HEIGHT: u32 = 40;

/// Width of one navigation tab (four across the top)
pub const TABS_WIDTH: u32 = SCREEN_WIDTH / 4;

/// Top edge of the navigation tab row
pub const TABS_Y: i32 = 0;

/// Left margin of view text labels
pub const LABEL_X: i32 = 5;

/// Top edge of the view title label
pub const LABEL_Y: i32 = 44;

/// Top edge of the view data text
pub const DATA_Y: i32 = 70;

/// Top edge of the FM status text, below the radio buttons
pub const FM_STATUS_Y: i32 = 200;

/// Power-on FM frequency (94.5 MHz)
pub const DEFAULT_FREQUENCY_KHZ: u32 = 94_500;

/// Coarse tuning step (1 MHz)
pub const TUNE_COARSE_KHZ: i32 = 1_000;

/// Fine tuning step (0.1 MHz)
pub const TUNE_FINE_KHZ: i32 = 100;

/// View shown at power-on
pub const INITIAL_VIEW: ViewId = ViewId::Location;

/// Touch release polling interval in milliseconds
pub const TOUCH_RELEASE_POLL_MS: u32 = 10;

/// Pause before a newly shown view is drawn
pub const VIEW_SHOW_SETTLE_MS: u64 = 100;

/// Maximum number of GPS bytes read per tick
pub const GPS_READ_CHUNK: usize = 32;

/// Characters per line when wrapping the GPS sentence
pub const GPS_WRAP_CHARS: usize = 20;

/// GPS fix update interval sent with `PMTK220`
pub const GPS_UPDATE_INTERVAL_MS: u32 = 20_000;

/// Display backlight level in percent
pub const BACKLIGHT_PERCENT: u8 = 50;

/// Tab switch cue tone frequency
pub const TAB_CUE_HZ: u32 = 2_400;

/// Tab switch cue duration
pub const TAB_CUE_MS: u64 = 15;

/// Action confirm beep frequency
pub const BEEP_CUE_HZ: u32 = 1_000;

/// Action confirm beep duration
pub const BEEP_CUE_MS: u64 = 120;

/// Maximum length of a label text field
pub const LABEL_CAPACITY: usize = 160;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// I2C1 SCL (sensors, tuner, touch)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (sensors, tuner, touch)
    pub const I2C1_SDA: &str = "PB9";

    /// SPI1 SCK (display)
    pub const DISPLAY_SCK: &str = "PA5";

    /// SPI1 MOSI (display)
    pub const DISPLAY_MOSI: &str = "PA7";

    /// Display chip select
    pub const DISPLAY_CS: &str = "PB6";

    /// Display data/command select
    pub const DISPLAY_DC: &str = "PB7";

    /// Display reset
    pub const DISPLAY_RST: &str = "PB0";

    /// Display backlight PWM (TIM3 CH1)
    pub const BACKLIGHT: &str = "PA6";

    /// Piezo buzzer PWM (TIM2 CH1)
    pub const BUZZER: &str = "PA0";

    /// Status LED red channel
    pub const LED_RED: &str = "PC0";

    /// Status LED green channel
    pub const LED_GREEN: &str = "PC1";

    /// Status LED blue channel
    pub const LED_BLUE: &str = "PC2";
}

/// Status indicator colour shown while a view is active
#[must_use]
pub const fn indicator_for(view: ViewId) -> IndicatorColor {
    match view {
        ViewId::Location => IndicatorColor::GREEN,
        ViewId::Target => IndicatorColor::RED,
        ViewId::DataView => IndicatorColor::BLUE,
        ViewId::Fm => IndicatorColor::CYAN,
    }
}

/// Build the default startup frequency
#[must_use]
pub const fn default_frequency() -> Frequency {
    Frequency::from_khz(DEFAULT_FREQUENCY_KHZ)
}

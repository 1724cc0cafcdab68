//! Configuration Tests
//!
//! Sanity checks on the compile-time layout, timing and address constants.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test config_tests

use tricorder_firmware::config::*;
use tricorder_firmware::types::{Frequency, IndicatorColor, ViewId};

// =============================================================================
// Screen Layout
// =============================================================================

#[test]
fn test_screen_is_landscape() {
    assert_eq!(SCREEN_WIDTH, 320);
    assert_eq!(SCREEN_HEIGHT, 240);
}

#[test]
fn test_four_tabs_span_the_width() {
    assert_eq!(TABS_WIDTH * 4, SCREEN_WIDTH);
    assert_eq!(TABS_Y, 0);
}

#[test]
fn test_labels_below_tabs() {
    assert!(LABEL_Y >= TABS_HEIGHT as i32);
    assert!(DATA_Y > LABEL_Y);
    assert!(FM_STATUS_Y < SCREEN_HEIGHT as i32);
}

// =============================================================================
// I2C Addresses
// =============================================================================

#[test]
fn test_i2c_addresses_are_7bit() {
    for addr in [
        LTR390_I2C_ADDR,
        GPS_I2C_ADDR,
        DS3231_I2C_ADDR,
        LIDAR_I2C_ADDR,
        TEA5767_I2C_ADDR,
        TOUCH_I2C_ADDR,
    ] {
        assert!(addr < 0x80, "address {addr:#x} is not 7-bit");
    }
}

#[test]
fn test_i2c_addresses_unique() {
    let mut addrs = [
        LTR390_I2C_ADDR,
        GPS_I2C_ADDR,
        DS3231_I2C_ADDR,
        LIDAR_I2C_ADDR,
        TEA5767_I2C_ADDR,
        TOUCH_I2C_ADDR,
    ];
    addrs.sort_unstable();
    for pair in addrs.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

// =============================================================================
// Radio and Timing
// =============================================================================

#[test]
fn test_default_frequency() {
    assert_eq!(default_frequency(), Frequency::from_khz(94_500));
    assert_eq!(default_frequency().to_string(), "94.5 MHz");
}

#[test]
fn test_tuning_steps() {
    assert_eq!(TUNE_COARSE_KHZ, 1_000);
    assert_eq!(TUNE_FINE_KHZ, 100);
}

#[test]
fn test_timing_constants() {
    assert_eq!(TOUCH_RELEASE_POLL_MS, 10);
    assert_eq!(VIEW_SHOW_SETTLE_MS, 100);
    assert_eq!(GPS_UPDATE_INTERVAL_MS, 20_000);
    assert!(TAB_CUE_MS < BEEP_CUE_MS);
}

#[test]
fn test_initial_view() {
    assert_eq!(INITIAL_VIEW, ViewId::Location);
}

#[test]
fn test_label_capacity_fits_location_text() {
    // date line, heading and three wrapped GPS lines
    assert!(LABEL_CAPACITY >= 30 + 16 + 3 * (GPS_WRAP_CHARS + 1));
}

// =============================================================================
// Indicator Colours
// =============================================================================

#[test]
fn test_indicator_per_view() {
    assert_eq!(indicator_for(ViewId::Location), IndicatorColor::GREEN);
    assert_eq!(indicator_for(ViewId::Target), IndicatorColor::RED);
    assert_eq!(indicator_for(ViewId::DataView), IndicatorColor::BLUE);
    assert_eq!(indicator_for(ViewId::Fm), IndicatorColor::CYAN);
}

#[test]
fn test_pins_assigned() {
    assert_eq!(pins::I2C1_SCL, "PB8");
    assert_eq!(pins::I2C1_SDA, "PB9");
    assert_eq!(pins::BUZZER, "PA0");
}

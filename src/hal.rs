//! Hardware Abstraction Layer
//!
//! Safe wrappers over the STM32G474 peripherals the tricorder uses: the
//! shared sensor I2C bus, the RGB status LED and the PWM outputs for the
//! backlight and piezo.

#[cfg(feature = "embedded")]
pub mod gpio;
pub mod i2c;
#[cfg(feature = "embedded")]
pub mod pwm;

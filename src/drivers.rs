//! Peripheral Drivers
//!
//! Async drivers for the ICs on the sensor I2C bus and the touchscreen
//! renderer. Each driver implements one of the core's collaborator traits
//! and maps its bus errors into [`Error`](crate::error::Error).

pub mod ds3231;
pub mod ft6x36;
pub mod lidar_lite;
pub mod ltr390;
pub mod pa1010d;
pub mod tea5767;

#[cfg(feature = "embedded")]
pub mod display;

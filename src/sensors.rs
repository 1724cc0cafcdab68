//! Sensor Access
//!
//! Traits for the four I2C sensors and the hub that polls them.
//! Drivers map their bus errors to [`Error::SensorRead`](crate::error::Error::SensorRead).

pub mod hub;

use crate::error::Result;
use crate::types::DateTime;

pub use hub::{Readings, SensorHub};

/// UV and ambient light sensor
pub trait LightSensor {
    /// Current UV index
    async fn read_uv_index(&mut self) -> Result<f32>;

    /// Current ambient light in lux
    async fn read_lux(&mut self) -> Result<f32>;
}

/// GPS receiver with a byte-stream interface
pub trait GpsReceiver {
    /// Read up to `buf.len()` sentence bytes
    ///
    /// Returns `Ok(None)` when the receiver has nothing queued.
    async fn read_sentence(&mut self, buf: &mut [u8]) -> Result<Option<usize>>;
}

/// Battery-backed real-time clock
pub trait RealTimeClock {
    /// Current date and time
    async fn read_datetime(&mut self) -> Result<DateTime>;
}

/// Distance sensor
pub trait RangeFinder {
    /// Distance to target in centimetres
    async fn read_distance_cm(&mut self) -> Result<u16>;
}

/// Source of one tick's worth of readings
pub trait SensorSource {
    /// Read every sensor once
    async fn read_all(&mut self) -> Result<Readings>;
}

//! Sensor Hub
//!
//! Polls all four sensors once per UI tick. Faults are not retried; the
//! first failing sensor ends the tick.

use heapless::String;

use super::{GpsReceiver, LightSensor, RangeFinder, RealTimeClock, SensorSource};
use crate::config::GPS_READ_CHUNK;
use crate::error::{Error, Result, SensorKind};
use crate::protocol::sanitize;
use crate::types::{DateTime, Distance, LightReading};

/// GPS text read in one tick
pub type GpsText = String<GPS_READ_CHUNK>;

/// Everything read from the sensors in one tick
#[derive(Clone, Debug, PartialEq)]
pub struct Readings {
    /// UV index and lux
    pub light: LightReading,
    /// New GPS text, `None` when the receiver had nothing queued
    pub gps: Option<GpsText>,
    /// RTC date and time
    pub clock: DateTime,
    /// LIDAR distance
    pub range: Distance,
}

/// Owner of the four sensor drivers
pub struct SensorHub<L, G, C, R> {
    light: L,
    gps: G,
    clock: C,
    range: R,
}

impl<L, G, C, R> SensorHub<L, G, C, R>
where
    L: LightSensor,
    G: GpsReceiver,
    C: RealTimeClock,
    R: RangeFinder,
{
    /// Create a hub from the four drivers
    #[must_use]
    pub const fn new(light: L, gps: G, clock: C, range: R) -> Self {
        Self {
            light,
            gps,
            clock,
            range,
        }
    }

    /// Read UV index and lux
    ///
    /// # Errors
    ///
    /// Propagates the light sensor's fault.
    pub async fn read_light(&mut self) -> Result<LightReading> {
        let uv_index = self.light.read_uv_index().await?;
        let lux = self.light.read_lux().await?;
        Ok(LightReading { uv_index, lux })
    }

    /// Read the next chunk of GPS sentence text
    ///
    /// Returns `Ok(None)` when nothing printable was queued.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SensorRead`] for bus faults and for data that is
    /// not valid UTF-8.
    pub async fn read_gps(&mut self) -> Result<Option<GpsText>> {
        let mut buf = [0u8; GPS_READ_CHUNK];
        let Some(len) = self.gps.read_sentence(&mut buf).await? else {
            return Ok(None);
        };
        let len = sanitize(&mut buf[..len.min(GPS_READ_CHUNK)]);
        if len == 0 {
            return Ok(None);
        }

        let text =
            core::str::from_utf8(&buf[..len]).map_err(|_| Error::SensorRead(SensorKind::Gps))?;
        let mut out = GpsText::new();
        out.push_str(text)
            .map_err(|()| Error::SensorRead(SensorKind::Gps))?;
        log_debug!("gps: {}", text);
        Ok(Some(out))
    }

    /// Read the RTC
    ///
    /// # Errors
    ///
    /// Propagates the clock's fault.
    pub async fn read_clock(&mut self) -> Result<DateTime> {
        self.clock.read_datetime().await
    }

    /// Read the LIDAR distance
    ///
    /// # Errors
    ///
    /// Propagates the range finder's fault.
    pub async fn read_range(&mut self) -> Result<Distance> {
        self.range.read_distance_cm().await.map(Distance::from_cm)
    }

    /// Read all four sensors in a fixed order: GPS, clock, range, light
    ///
    /// # Errors
    ///
    /// Stops at the first failing sensor.
    pub async fn read_all(&mut self) -> Result<Readings> {
        let gps = self.read_gps().await?;
        let clock = self.read_clock().await?;
        let range = self.read_range().await?;
        let light = self.read_light().await?;
        Ok(Readings {
            light,
            gps,
            clock,
            range,
        })
    }
}

impl<L, G, C, R> SensorSource for SensorHub<L, G, C, R>
where
    L: LightSensor,
    G: GpsReceiver,
    C: RealTimeClock,
    R: RangeFinder,
{
    async fn read_all(&mut self) -> Result<Readings> {
        Self::read_all(self).await
    }
}

//! PA1010D GPS Receiver Driver (I2C)
//!
//! The MTK module streams NMEA text over I2C. Reads return raw bytes; when
//! no sentence is queued the module pads the buffer with `'\n'`. Commands
//! are PMTK sentences written as plain bytes.

use embedded_hal_async::i2c::I2c;

use crate::config::GPS_UPDATE_INTERVAL_MS;
use crate::error::{Error, Result, SensorKind};
use crate::hal::i2c::I2cDevice;
use crate::protocol::{pmtk_command, pmtk_update_interval, PMTK_SET_OUTPUT_RMC_GGA};
use crate::sensors::GpsReceiver;

/// Padding byte sent when the output queue is empty
const PAD: u8 = b'\n';

/// PA1010D driver
pub struct Pa1010d<'a, B> {
    dev: I2cDevice<'a, B>,
}

impl<'a, B: I2c> Pa1010d<'a, B> {
    /// Create the driver
    #[must_use]
    pub const fn new(dev: I2cDevice<'a, B>) -> Self {
        Self { dev }
    }

    /// Select RMC and GGA output and the update interval
    ///
    /// # Errors
    ///
    /// Returns [`Error::SensorRead`] on a bus fault.
    pub async fn init(&mut self) -> Result<()> {
        self.send_command(PMTK_SET_OUTPUT_RMC_GGA).await?;
        let interval =
            pmtk_update_interval(GPS_UPDATE_INTERVAL_MS).ok_or(Error::SensorRead(SensorKind::Gps))?;
        self.send_raw(interval.as_bytes()).await?;
        log_info!("gps configured, update every {} ms", GPS_UPDATE_INTERVAL_MS);
        Ok(())
    }

    /// Frame and send a PMTK command body
    ///
    /// # Errors
    ///
    /// Returns [`Error::SensorRead`] on a bus fault or an oversized body.
    pub async fn send_command(&mut self, body: &str) -> Result<()> {
        let cmd = pmtk_command(body).ok_or(Error::SensorRead(SensorKind::Gps))?;
        self.send_raw(cmd.as_bytes()).await
    }

    async fn send_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.dev
            .write(bytes)
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Gps))
    }
}

impl<B: I2c> GpsReceiver for Pa1010d<'_, B> {
    async fn read_sentence(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        self.dev
            .read(buf)
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Gps))?;
        if buf.iter().all(|&b| b == PAD) {
            return Ok(None);
        }
        Ok(Some(buf.len()))
    }
}

//! DS3231 Real-Time Clock Driver
//!
//! Time keeping registers 0x00-0x06 hold BCD seconds, minutes, hours,
//! weekday (1-7, Monday first), date, month and two-digit year. The clock
//! runs in 24 hour mode; years are taken as 2000-2099.

use embedded_hal_async::i2c::I2c;

use crate::error::{Error, Result, SensorKind};
use crate::hal::i2c::I2cDevice;
use crate::sensors::RealTimeClock;
use crate::types::{DateTime, Weekday};

/// DS3231 register addresses
mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const STATUS: u8 = 0x0F;
}

/// Hour register flag for 12 hour mode
const HOUR_12H: u8 = 1 << 6;

/// Status register oscillator-stopped flag
const OSC_STOPPED: u8 = 1 << 7;

/// BCD byte to binary
#[must_use]
pub const fn from_bcd(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

/// Binary (0-99) to BCD byte
#[must_use]
pub const fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decode the seven time keeping registers
#[must_use]
pub fn decode(raw: &[u8; 7]) -> DateTime {
    let hour = if raw[2] & HOUR_12H != 0 {
        let h12 = from_bcd(raw[2] & 0x1F) % 12;
        let pm = raw[2] & (1 << 5) != 0;
        if pm {
            h12 + 12
        } else {
            h12
        }
    } else {
        from_bcd(raw[2] & 0x3F)
    };

    DateTime {
        weekday: Weekday::from_index((raw[3] & 0x07).saturating_sub(1)),
        month: from_bcd(raw[5] & 0x1F),
        day: from_bcd(raw[4] & 0x3F),
        year: 2000 + u16::from(from_bcd(raw[6])),
        hour,
        minute: from_bcd(raw[1] & 0x7F),
        second: from_bcd(raw[0] & 0x7F),
    }
}

/// Encode a date and time into the seven time keeping registers
#[must_use]
pub fn encode(dt: &DateTime) -> [u8; 7] {
    let year = (dt.year.saturating_sub(2000) % 100) as u8;
    [
        to_bcd(dt.second % 60),
        to_bcd(dt.minute % 60),
        to_bcd(dt.hour % 24),
        dt.weekday.index() + 1,
        to_bcd(dt.day),
        to_bcd(dt.month),
        to_bcd(year),
    ]
}

/// DS3231 driver
pub struct Ds3231<'a, B> {
    dev: I2cDevice<'a, B>,
}

impl<'a, B: I2c> Ds3231<'a, B> {
    /// Create the driver
    #[must_use]
    pub const fn new(dev: I2cDevice<'a, B>) -> Self {
        Self { dev }
    }

    /// Set the clock
    ///
    /// Also clears the oscillator-stopped flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SensorRead`] on a bus fault.
    pub async fn set_datetime(&mut self, dt: &DateTime) -> Result<()> {
        self.dev
            .write_regs(reg::SECONDS, &encode(dt))
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Clock))?;
        let status = self
            .dev
            .read_reg(reg::STATUS)
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Clock))?;
        self.dev
            .write_reg(reg::STATUS, status & !OSC_STOPPED)
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Clock))?;
        log_info!("rtc set to {}", dt);
        Ok(())
    }

    /// Check whether the oscillator stopped since the clock was last set
    ///
    /// # Errors
    ///
    /// Returns [`Error::SensorRead`] on a bus fault.
    pub async fn lost_power(&mut self) -> Result<bool> {
        let status = self
            .dev
            .read_reg(reg::STATUS)
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Clock))?;
        Ok(status & OSC_STOPPED != 0)
    }
}

impl<B: I2c> RealTimeClock for Ds3231<'_, B> {
    async fn read_datetime(&mut self) -> Result<DateTime> {
        let mut raw = [0u8; 7];
        self.dev
            .read_regs(reg::SECONDS, &mut raw)
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Clock))?;
        Ok(decode(&raw))
    }
}

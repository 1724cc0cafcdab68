//! LIDAR-Lite v3 Range Finder Driver
//!
//! A measurement is started by writing the acquire command, then the
//! status register is polled until the busy bit clears and the two byte
//! distance (centimetres, big endian) is read back.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::error::{Error, Result, SensorKind};
use crate::hal::i2c::I2cDevice;
use crate::sensors::RangeFinder;

/// LIDAR-Lite register addresses
mod reg {
    pub const ACQ_COMMAND: u8 = 0x00;
    pub const STATUS: u8 = 0x01;
    pub const SIG_COUNT_VAL: u8 = 0x02;
    pub const ACQ_CONFIG: u8 = 0x04;
    pub const THRESHOLD_BYPASS: u8 = 0x1C;
    /// FULL_DELAY_HIGH with the auto-increment bit set
    pub const FULL_DELAY: u8 = 0x8F;
}

/// Acquire command with receiver bias correction
const MEASURE_WITH_BIAS: u8 = 0x04;

/// Reset all registers to defaults
const RESET: u8 = 0x00;

/// Status busy flag
const STATUS_BUSY: u8 = 0x01;

/// Delay between busy polls
const BUSY_POLL_MS: u32 = 1;

/// Busy polls before a measurement counts as failed
const MAX_BUSY_POLLS: u32 = 100;

/// Acquisition profile, written as (`SIG_COUNT_VAL`, `ACQ_CONFIG`, `THRESHOLD_BYPASS`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Profile {
    /// Balanced range and speed
    #[default]
    Default,
    /// Short range, high speed
    ShortFast,
    /// Maximum range
    MaxRange,
}

impl Profile {
    const fn registers(self) -> [u8; 3] {
        match self {
            Self::Default => [0x80, 0x08, 0x00],
            Self::ShortFast => [0x1D, 0x08, 0x00],
            Self::MaxRange => [0xFF, 0x08, 0x00],
        }
    }
}

/// Combine the distance bytes
#[must_use]
pub const fn distance_from_bytes(raw: [u8; 2]) -> u16 {
    u16::from_be_bytes(raw)
}

/// LIDAR-Lite v3 driver
pub struct LidarLite<'a, B, D> {
    dev: I2cDevice<'a, B>,
    delay: D,
}

impl<'a, B: I2c, D: DelayNs> LidarLite<'a, B, D> {
    /// Create the driver
    #[must_use]
    pub const fn new(dev: I2cDevice<'a, B>, delay: D) -> Self {
        Self { dev, delay }
    }

    /// Reset and load an acquisition profile
    ///
    /// # Errors
    ///
    /// Returns [`Error::SensorRead`] on a bus fault.
    pub async fn configure(&mut self, profile: Profile) -> Result<()> {
        let [count, config, threshold] = profile.registers();
        self.write(reg::ACQ_COMMAND, RESET).await?;
        self.delay.delay_ms(20).await;
        self.write(reg::SIG_COUNT_VAL, count).await?;
        self.write(reg::ACQ_CONFIG, config).await?;
        self.write(reg::THRESHOLD_BYPASS, threshold).await
    }

    async fn write(&mut self, reg: u8, value: u8) -> Result<()> {
        self.dev
            .write_reg(reg, value)
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Range))
    }

    async fn wait_ready(&mut self) -> Result<()> {
        for _ in 0..MAX_BUSY_POLLS {
            let status = self
                .dev
                .read_reg(reg::STATUS)
                .await
                .map_err(|_| Error::SensorRead(SensorKind::Range))?;
            if status & STATUS_BUSY == 0 {
                return Ok(());
            }
            self.delay.delay_ms(BUSY_POLL_MS).await;
        }
        log_warn!("lidar stuck busy");
        Err(Error::SensorRead(SensorKind::Range))
    }
}

impl<B: I2c, D: DelayNs> RangeFinder for LidarLite<'_, B, D> {
    async fn read_distance_cm(&mut self) -> Result<u16> {
        self.write(reg::ACQ_COMMAND, MEASURE_WITH_BIAS).await?;
        self.wait_ready().await?;

        let mut raw = [0u8; 2];
        self.dev
            .read_regs(reg::FULL_DELAY, &mut raw)
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Range))?;
        Ok(distance_from_bytes(raw))
    }
}

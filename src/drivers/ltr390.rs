//! LTR390 UV and Ambient Light Sensor Driver
//!
//! The sensor measures either UV (UVS mode) or visible light (ALS mode),
//! never both at once. Each read switches mode if needed, waits for the
//! data-ready flag and reads the 20-bit little endian count.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::error::{Error, Result, SensorKind};
use crate::hal::i2c::I2cDevice;
use crate::sensors::LightSensor;

/// LTR390 register addresses
mod reg {
    pub const MAIN_CTRL: u8 = 0x00;
    pub const MEAS_RATE: u8 = 0x04;
    pub const GAIN: u8 = 0x05;
    pub const PART_ID: u8 = 0x06;
    pub const MAIN_STATUS: u8 = 0x07;
    pub const ALS_DATA: u8 = 0x0D;
    pub const UVS_DATA: u8 = 0x10;
}

/// `MAIN_CTRL` enable bit
const CTRL_ENABLE: u8 = 1 << 1;

/// `MAIN_CTRL` UVS mode bit
const CTRL_UVS: u8 = 1 << 3;

/// `MAIN_STATUS` data ready bit
const STATUS_DATA_READY: u8 = 1 << 3;

/// Expected upper nibble of `PART_ID`
const PART_ID: u8 = 0xB0;

/// UV sensitivity at 18x gain and 20-bit resolution
const UV_SENSITIVITY: f32 = 2300.0;

/// Delay between data-ready polls
const READY_POLL_MS: u32 = 10;

/// Data-ready polls before a read counts as failed
const MAX_READY_POLLS: u32 = 60;

/// Measurement mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Ambient light
    Als,
    /// Ultraviolet
    Uvs,
}

/// Analog gain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Gain {
    /// 1x
    X1,
    /// 3x
    #[default]
    X3,
    /// 6x
    X6,
    /// 9x
    X9,
    /// 18x
    X18,
}

impl Gain {
    const fn register(self) -> u8 {
        self as u8
    }

    /// Gain multiplier
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::X1 => 1.0,
            Self::X3 => 3.0,
            Self::X6 => 6.0,
            Self::X9 => 9.0,
            Self::X18 => 18.0,
        }
    }
}

/// ADC resolution (and integration time)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Resolution {
    /// 20 bit, 400 ms
    Bits20,
    /// 19 bit, 200 ms
    Bits19,
    /// 18 bit, 100 ms
    #[default]
    Bits18,
    /// 17 bit, 50 ms
    Bits17,
    /// 16 bit, 25 ms
    Bits16,
    /// 13 bit, 12.5 ms
    Bits13,
}

impl Resolution {
    const fn register(self) -> u8 {
        self as u8
    }

    /// Integration time relative to 100 ms
    #[must_use]
    pub const fn integration_factor(self) -> f32 {
        match self {
            Self::Bits20 => 4.0,
            Self::Bits19 => 2.0,
            Self::Bits18 => 1.0,
            Self::Bits17 => 0.5,
            Self::Bits16 => 0.25,
            Self::Bits13 => 0.125,
        }
    }

    /// Integration time in ms, rounded up
    #[must_use]
    pub const fn integration_ms(self) -> u32 {
        match self {
            Self::Bits20 => 400,
            Self::Bits19 => 200,
            Self::Bits18 => 100,
            Self::Bits17 => 50,
            Self::Bits16 => 25,
            Self::Bits13 => 13,
        }
    }
}

/// UV index from a raw UVS count
#[must_use]
pub fn uv_index(raw: u32, gain: Gain, resolution: Resolution) -> f32 {
    let scale = (gain.factor() / 18.0) * (resolution.integration_factor() / 4.0) * UV_SENSITIVITY;
    raw as f32 / scale
}

/// Lux from a raw ALS count
#[must_use]
pub fn lux(raw: u32, gain: Gain, resolution: Resolution) -> f32 {
    0.6 * raw as f32 / (gain.factor() * resolution.integration_factor())
}

/// LTR390 driver
pub struct Ltr390<'a, B, D> {
    dev: I2cDevice<'a, B>,
    delay: D,
    gain: Gain,
    resolution: Resolution,
    mode: Option<Mode>,
}

impl<'a, B: I2c, D: DelayNs> Ltr390<'a, B, D> {
    /// Create the driver with default gain and resolution
    #[must_use]
    pub fn new(dev: I2cDevice<'a, B>, delay: D) -> Self {
        Self {
            dev,
            delay,
            gain: Gain::default(),
            resolution: Resolution::default(),
            mode: None,
        }
    }

    /// Check the part id and load gain and resolution
    ///
    /// # Errors
    ///
    /// Returns [`Error::SensorRead`] on a bus fault or an unknown part.
    pub async fn init(&mut self) -> Result<()> {
        let id = self.read(reg::PART_ID).await?;
        if id & 0xF0 != PART_ID {
            log_error!("ltr390 part id {=u8:#x}", id);
            return Err(Error::SensorRead(SensorKind::Light));
        }
        self.write(reg::GAIN, self.gain.register()).await?;
        self.write(reg::MEAS_RATE, (self.resolution.register() << 4) | 0x02)
            .await
    }

    /// Current gain
    #[must_use]
    pub const fn gain(&self) -> Gain {
        self.gain
    }

    /// Current resolution
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }

    async fn read(&mut self, reg: u8) -> Result<u8> {
        self.dev
            .read_reg(reg)
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Light))
    }

    async fn write(&mut self, reg: u8, value: u8) -> Result<()> {
        self.dev
            .write_reg(reg, value)
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Light))
    }

    async fn set_mode(&mut self, mode: Mode) -> Result<()> {
        if self.mode == Some(mode) {
            return Ok(());
        }
        let ctrl = match mode {
            Mode::Als => CTRL_ENABLE,
            Mode::Uvs => CTRL_ENABLE | CTRL_UVS,
        };
        self.write(reg::MAIN_CTRL, ctrl).await?;
        self.mode = Some(mode);
        // the first conversion after a switch still holds the old mode's data
        self.delay.delay_ms(self.resolution.integration_ms()).await;
        Ok(())
    }

    async fn read_count(&mut self, mode: Mode) -> Result<u32> {
        self.set_mode(mode).await?;

        let mut ready = false;
        for _ in 0..MAX_READY_POLLS {
            if self.read(reg::MAIN_STATUS).await? & STATUS_DATA_READY != 0 {
                ready = true;
                break;
            }
            self.delay.delay_ms(READY_POLL_MS).await;
        }
        if !ready {
            return Err(Error::SensorRead(SensorKind::Light));
        }

        let base = match mode {
            Mode::Als => reg::ALS_DATA,
            Mode::Uvs => reg::UVS_DATA,
        };
        let mut raw = [0u8; 3];
        self.dev
            .read_regs(base, &mut raw)
            .await
            .map_err(|_| Error::SensorRead(SensorKind::Light))?;
        Ok(u32::from_le_bytes([raw[0], raw[1], raw[2] & 0x0F, 0]))
    }
}

impl<B: I2c, D: DelayNs> LightSensor for Ltr390<'_, B, D> {
    async fn read_uv_index(&mut self) -> Result<f32> {
        let raw = self.read_count(Mode::Uvs).await?;
        Ok(uv_index(raw, self.gain, self.resolution))
    }

    async fn read_lux(&mut self) -> Result<f32> {
        let raw = self.read_count(Mode::Als).await?;
        Ok(lux(raw, self.gain, self.resolution))
    }
}

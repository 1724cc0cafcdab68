//! I2C Bus Abstractions
//!
//! All sensors, the FM tuner and the touch controller sit on I2C1. The bus
//! lives in an embassy `Mutex` owned by `main`, and each driver holds an
//! [`I2cDevice`] handle bound to its own address. Locking is per
//! transaction, so handles can be used in any order from the UI task.

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::i2c::I2c;

use crate::config;

/// Bus shared by every device handle
pub type SharedI2c<B> = Mutex<NoopRawMutex, B>;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// LTR390 UV/ambient light sensor
    pub const LTR390: Self = Self(config::LTR390_I2C_ADDR);

    /// PA1010D GPS receiver
    pub const GPS: Self = Self(config::GPS_I2C_ADDR);

    /// DS3231 real-time clock
    pub const DS3231: Self = Self(config::DS3231_I2C_ADDR);

    /// LIDAR-Lite v3 range finder
    pub const LIDAR: Self = Self(config::LIDAR_I2C_ADDR);

    /// TEA5767 FM tuner
    pub const TEA5767: Self = Self(config::TEA5767_I2C_ADDR);

    /// FT6x36 touch controller
    pub const TOUCH: Self = Self(config::TOUCH_I2C_ADDR);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// One device on the shared bus
pub struct I2cDevice<'a, B> {
    bus: &'a SharedI2c<B>,
    addr: I2cAddress,
}

impl<'a, B: I2c> I2cDevice<'a, B> {
    /// Bind a handle to `addr`
    #[must_use]
    pub const fn new(bus: &'a SharedI2c<B>, addr: I2cAddress) -> Self {
        Self { bus, addr }
    }

    /// Device address
    #[must_use]
    pub const fn address(&self) -> I2cAddress {
        self.addr
    }

    /// Write bytes to the device
    pub async fn write(&mut self, data: &[u8]) -> Result<(), B::Error> {
        self.bus.lock().await.write(self.addr.addr(), data).await
    }

    /// Read bytes from the device
    pub async fn read(&mut self, buffer: &mut [u8]) -> Result<(), B::Error> {
        self.bus.lock().await.read(self.addr.addr(), buffer).await
    }

    /// Write then read (combined transaction)
    pub async fn write_read(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), B::Error> {
        self.bus
            .lock()
            .await
            .write_read(self.addr.addr(), write, read)
            .await
    }

    /// Write a single register
    pub async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), B::Error> {
        self.write(&[reg, value]).await
    }

    /// Read a single register
    pub async fn read_reg(&mut self, reg: u8) -> Result<u8, B::Error> {
        let mut buf = [0u8];
        self.write_read(&[reg], &mut buf).await?;
        Ok(buf[0])
    }

    /// Write up to 16 registers starting at `base_reg`
    pub async fn write_regs(&mut self, base_reg: u8, values: &[u8]) -> Result<(), B::Error> {
        let n = values.len().min(16);
        let mut buf = [0u8; 17];
        buf[0] = base_reg;
        buf[1..=n].copy_from_slice(&values[..n]);
        self.write(&buf[..=n]).await
    }

    /// Read consecutive registers starting at `base_reg`
    pub async fn read_regs(&mut self, base_reg: u8, buffer: &mut [u8]) -> Result<(), B::Error> {
        self.write_read(&[base_reg], buffer).await
    }
}

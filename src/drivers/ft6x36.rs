//! FT6x36 Capacitive Touch Driver
//!
//! Reads the first touch point from the controller and maps it from panel
//! coordinates (portrait, 240x320) into screen coordinates.

use embedded_hal_async::i2c::I2c;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::{Error, Result};
use crate::hal::i2c::I2cDevice;
use crate::types::TouchEvent;
use crate::ui::TouchInput;

/// FT6x36 register addresses
mod reg {
    pub const TD_STATUS: u8 = 0x02;
    pub const CHIP_ID: u8 = 0xA3;
}

/// Known chip ids (FT6206, FT6236, FT6336)
const CHIP_IDS: [u8; 3] = [0x06, 0x36, 0x64];

/// Event flag value for a lifted finger
const EVENT_UP: u8 = 0b01;

/// Panel to screen mapping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchTransform {
    /// Swap the panel axes
    pub swap_xy: bool,
    /// Mirror the screen x axis
    pub invert_x: bool,
    /// Mirror the screen y axis
    pub invert_y: bool,
}

impl TouchTransform {
    /// Portrait panel mounted for a landscape screen
    pub const LANDSCAPE: Self = Self {
        swap_xy: true,
        invert_x: false,
        invert_y: true,
    };

    /// Map a raw panel point to screen coordinates
    #[must_use]
    pub fn apply(self, raw_x: u16, raw_y: u16) -> (i32, i32) {
        let (mut x, mut y) = if self.swap_xy {
            (i32::from(raw_y), i32::from(raw_x))
        } else {
            (i32::from(raw_x), i32::from(raw_y))
        };
        if self.invert_x {
            x = SCREEN_WIDTH as i32 - 1 - x;
        }
        if self.invert_y {
            y = SCREEN_HEIGHT as i32 - 1 - y;
        }
        (x, y)
    }
}

impl Default for TouchTransform {
    fn default() -> Self {
        Self::LANDSCAPE
    }
}

/// Decode `TD_STATUS` and the first point's four registers
///
/// Returns the raw panel point when a finger is down.
#[must_use]
pub const fn decode_point(raw: [u8; 5]) -> Option<(u16, u16)> {
    let count = raw[0] & 0x0F;
    if count == 0 || count > 2 {
        return None;
    }
    if raw[1] >> 6 == EVENT_UP {
        return None;
    }
    let x = (((raw[1] & 0x0F) as u16) << 8) | raw[2] as u16;
    let y = (((raw[3] & 0x0F) as u16) << 8) | raw[4] as u16;
    Some((x, y))
}

/// FT6x36 driver
pub struct Ft6x36<'a, B> {
    dev: I2cDevice<'a, B>,
    transform: TouchTransform,
}

impl<'a, B: I2c> Ft6x36<'a, B> {
    /// Create the driver
    #[must_use]
    pub const fn new(dev: I2cDevice<'a, B>, transform: TouchTransform) -> Self {
        Self { dev, transform }
    }

    /// Check the chip id
    ///
    /// # Errors
    ///
    /// Returns [`Error::Touch`] on a bus fault or an unknown chip.
    pub async fn init(&mut self) -> Result<()> {
        let id = self
            .dev
            .read_reg(reg::CHIP_ID)
            .await
            .map_err(|_| Error::Touch)?;
        if !CHIP_IDS.contains(&id) {
            log_error!("touch chip id {=u8:#x}", id);
            return Err(Error::Touch);
        }
        Ok(())
    }
}

impl<B: I2c> TouchInput for Ft6x36<'_, B> {
    async fn touch_point(&mut self) -> Result<TouchEvent> {
        let mut raw = [0u8; 5];
        self.dev
            .read_regs(reg::TD_STATUS, &mut raw)
            .await
            .map_err(|_| Error::Touch)?;
        Ok(match decode_point(raw) {
            Some((rx, ry)) => {
                let (x, y) = self.transform.apply(rx, ry);
                TouchEvent::pressed(x, y)
            }
            None => TouchEvent::released(),
        })
    }
}

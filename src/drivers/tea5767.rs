//! TEA5767 FM Tuner Driver
//!
//! The TEA5767 has no register address: every write sends the full five
//! byte control word and every read returns five status bytes. The driver
//! keeps a shadow of the settings so standby and tuning commands can each
//! rewrite the whole word.
//!
//! The PLL runs from the 32.768 kHz crystal with high side injection:
//! `N = 4 * (f_rf + 225 kHz) / 32.768 kHz`.

use embedded_hal_async::i2c::I2c;

use crate::error::{Error, Result};
use crate::hal::i2c::I2cDevice;
use crate::radio::controller::TunerDriver;
use crate::radio::state::{FmBand, TunerSettings};
use crate::types::Frequency;

/// Intermediate frequency offset for high side injection
const IF_KHZ: u32 = 225;

/// Reference crystal in Hz
const XTAL_HZ: u32 = 32_768;

/// Control bits, by byte
mod bits {
    // byte 0
    pub const MUTE: u8 = 1 << 7;
    // byte 2
    pub const HLSI: u8 = 1 << 4;
    pub const MONO: u8 = 1 << 3;
    // byte 3
    pub const STANDBY: u8 = 1 << 6;
    pub const JAPAN_BAND: u8 = 1 << 5;
    pub const XTAL: u8 = 1 << 4;
    pub const SOFT_MUTE: u8 = 1 << 3;
    pub const HIGH_CUT: u8 = 1 << 2;
    pub const NOISE_CANCEL: u8 = 1 << 1;
    // byte 4
    pub const DE_EMPHASIS_75US: u8 = 1 << 6;
    // status
    pub const READY: u8 = 1 << 7;
    pub const BAND_LIMIT: u8 = 1 << 6;
    pub const STEREO: u8 = 1 << 7;
}

/// PLL word for a frequency
#[must_use]
pub fn pll_word(freq: Frequency) -> u16 {
    let n = (4 * (freq.as_khz() + IF_KHZ) * 1000 + XTAL_HZ / 2) / XTAL_HZ;
    (n & 0x3FFF) as u16
}

/// Five byte control word
#[must_use]
pub fn control_word(settings: &TunerSettings, freq: Frequency, standby: bool, mute: bool) -> [u8; 5] {
    let pll = pll_word(freq);
    let [pll_hi, pll_lo] = pll.to_be_bytes();

    let mut word = [0u8; 5];
    word[0] = pll_hi & 0x3F;
    if mute {
        word[0] |= bits::MUTE;
    }
    word[1] = pll_lo;

    word[2] = bits::HLSI;
    if !settings.stereo {
        word[2] |= bits::MONO;
    }

    word[3] = bits::XTAL;
    if standby {
        word[3] |= bits::STANDBY;
    }
    if settings.band == FmBand::Japan {
        word[3] |= bits::JAPAN_BAND;
    }
    if settings.soft_mute {
        word[3] |= bits::SOFT_MUTE;
    }
    if settings.high_cut {
        word[3] |= bits::HIGH_CUT;
    }
    if settings.noise_cancel {
        word[3] |= bits::NOISE_CANCEL;
    }

    if settings.band == FmBand::UsEurope {
        word[4] = bits::DE_EMPHASIS_75US;
    }
    word
}

/// Receiver status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TunerStatus {
    /// PLL locked on a station or search finished
    pub ready: bool,
    /// Band edge reached
    pub band_limit: bool,
    /// Stereo pilot detected
    pub stereo: bool,
    /// Signal level (0-15)
    pub level: u8,
}

impl TunerStatus {
    /// Decode the five status bytes
    #[must_use]
    pub const fn from_bytes(raw: [u8; 5]) -> Self {
        Self {
            ready: raw[0] & bits::READY != 0,
            band_limit: raw[0] & bits::BAND_LIMIT != 0,
            stereo: raw[2] & bits::STEREO != 0,
            level: raw[3] >> 4,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TunerStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "ready={} stereo={} level={}",
            self.ready,
            self.stereo,
            self.level
        );
    }
}

/// TEA5767 driver
pub struct Tea5767<'a, B> {
    dev: I2cDevice<'a, B>,
    settings: TunerSettings,
    frequency: Frequency,
    standby: bool,
}

impl<'a, B: I2c> Tea5767<'a, B> {
    /// Create the driver; nothing is sent until the first command
    #[must_use]
    pub const fn new(dev: I2cDevice<'a, B>, settings: TunerSettings, frequency: Frequency) -> Self {
        Self {
            dev,
            settings,
            frequency,
            standby: true,
        }
    }

    /// Receiver options
    #[must_use]
    pub const fn settings(&self) -> TunerSettings {
        self.settings
    }

    /// Last committed frequency
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Last committed standby flag
    #[must_use]
    pub const fn is_standby(&self) -> bool {
        self.standby
    }

    /// Read the status bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::RadioCommandRejected`] on a bus fault.
    pub async fn status(&mut self) -> Result<TunerStatus> {
        let mut raw = [0u8; 5];
        self.dev
            .read(&mut raw)
            .await
            .map_err(|_| Error::RadioCommandRejected)?;
        Ok(TunerStatus::from_bytes(raw))
    }

    async fn commit(&mut self, frequency: Frequency, standby: bool) -> Result<()> {
        let word = control_word(&self.settings, frequency, standby, false);
        self.dev
            .write(&word)
            .await
            .map_err(|_| Error::RadioCommandRejected)?;
        self.frequency = frequency;
        self.standby = standby;
        Ok(())
    }
}

impl<B: I2c> TunerDriver for Tea5767<'_, B> {
    async fn set_standby(&mut self, standby: bool) -> Result<()> {
        self.commit(self.frequency, standby).await
    }

    async fn set_frequency(&mut self, frequency: Frequency) -> Result<()> {
        if !self.settings.band.contains(frequency) {
            log_warn!("{} outside {}", frequency, self.settings.band);
            return Err(Error::RadioCommandRejected);
        }
        self.commit(frequency, self.standby).await
    }
}

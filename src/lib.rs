//! Tricorder Firmware Library
//!
//! This library provides the core functionality for an STM32G474-based
//! handheld sensor tricorder. The device polls four I2C sensors (UV/light,
//! GPS, real-time clock, LIDAR ranging), drives a TEA5767 FM receiver and
//! renders a 320x240 touchscreen UI with four switchable views.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  UI Loop  │  View Manager  │  Button Dispatcher  │  Radio    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  COLLABORATOR TRAITS                         │
//! │  Sensors  │  Tuner  │  View Surface  │  Cues  │  Touch       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  I2C  │  SPI display  │  PWM  │  GPIO                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single owner**: the UI loop owns every collaborator, no globals
//! - **Type-driven design**: view ids, frequencies and actions are typed
//! - **No unsafe in application code**
//! - **Functional core, imperative shell**: pure logic separated from I/O
//! - **Explicit error handling**: all fallible operations return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(async_fn_in_trait)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

#[macro_use]
mod log;

/// Hardware Abstraction Layer
///
/// Shared I2C bus, status LED and PWM outputs on the STM32G474.
pub mod hal;

/// Peripheral Drivers
///
/// Async I2C drivers for the sensors, tuner and touch panel, plus the
/// touchscreen renderer.
pub mod drivers;

/// Radio Control Logic
///
/// FM receiver state and the tuning command sequence.
pub mod radio;

/// Sensor Access
///
/// Sensor traits and the hub that polls them once per tick.
pub mod sensors;

/// User Interface
///
/// Views, buttons, debounce and the main UI loop.
pub mod ui;

/// Communication Protocols
///
/// PMTK command framing and NMEA sentence cleanup for the GPS receiver.
pub mod protocol;

/// Error taxonomy shared by every layer
pub mod error;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::error::{Error, Result};
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::digital::OutputPin;
    pub use embedded_hal_async::i2c::I2c;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}

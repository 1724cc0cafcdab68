//! Shared test doubles for the collaborator traits
//!
//! Every mock records what the core asked of it so tests can assert on
//! call order as well as final state.

#![allow(dead_code)]

use std::collections::VecDeque;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, Operation};

use tricorder_firmware::error::{Error, Result};
use tricorder_firmware::radio::controller::TunerDriver;
use tricorder_firmware::radio::state::FmBand;
use tricorder_firmware::sensors::hub::{GpsText, Readings};
use tricorder_firmware::sensors::SensorSource;
use tricorder_firmware::types::{
    ButtonId, Clip, DateTime, Distance, Frequency, IndicatorColor, LightReading, TouchEvent,
    ViewId, Weekday,
};
use tricorder_firmware::ui::button::ButtonDispatcher;
use tricorder_firmware::ui::view::{TextField, ViewSurface};
use tricorder_firmware::ui::{CuePlayer, StatusIndicator, TouchInput};

pub use embassy_futures::block_on;

// ============================================================================
// Display
// ============================================================================

/// One call made on the display
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCall {
    Show(ViewId),
    Hide(ViewId),
    Text(ViewId, TextField, String),
    Selected(ButtonId, bool),
}

/// Display that records every call
///
/// The layout handed over at start is kept apart from `calls`.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub layout: Option<ButtonDispatcher>,
    pub fail: bool,
}

impl RecordingSurface {
    pub fn shows(&self) -> Vec<ViewId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Show(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn last_text(&self, view: ViewId, field: TextField) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::Text(v, f, s) if *v == view && *f == field => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn selections(&self, button: ButtonId) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Selected(b, s) if *b == button => Some(*s),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, call: SurfaceCall) -> Result<()> {
        if self.fail {
            return Err(Error::Display);
        }
        self.calls.push(call);
        Ok(())
    }
}

impl ViewSurface for RecordingSurface {
    async fn set_layout(&mut self, buttons: &ButtonDispatcher) -> Result<()> {
        if self.fail {
            return Err(Error::Display);
        }
        self.layout = Some(buttons.clone());
        Ok(())
    }

    async fn show(&mut self, view: ViewId) -> Result<()> {
        self.record(SurfaceCall::Show(view))
    }

    async fn hide(&mut self, view: ViewId) -> Result<()> {
        self.record(SurfaceCall::Hide(view))
    }

    async fn set_text(&mut self, view: ViewId, field: TextField, text: &str) -> Result<()> {
        self.record(SurfaceCall::Text(view, field, text.to_owned()))
    }

    async fn set_button_selected(&mut self, button: ButtonId, selected: bool) -> Result<()> {
        self.record(SurfaceCall::Selected(button, selected))
    }
}

// ============================================================================
// Touch, cues, indicator, delay
// ============================================================================

/// Touch panel replaying a fixed list of samples, then reporting no touch
#[derive(Default)]
pub struct ScriptedTouch {
    pub samples: VecDeque<TouchEvent>,
    pub reads: usize,
    pub fail: bool,
}

impl ScriptedTouch {
    pub fn new(samples: impl IntoIterator<Item = TouchEvent>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            reads: 0,
            fail: false,
        }
    }

    /// A press at (x, y) sampled once by the tick and then held for
    /// `held` release polls
    pub fn press(x: i32, y: i32, held: usize) -> Self {
        Self::new(std::iter::repeat(TouchEvent::pressed(x, y)).take(held + 1))
    }

    pub fn push(&mut self, event: TouchEvent) {
        self.samples.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl TouchInput for ScriptedTouch {
    async fn touch_point(&mut self) -> Result<TouchEvent> {
        if self.fail {
            return Err(Error::Touch);
        }
        self.reads += 1;
        Ok(self.samples.pop_front().unwrap_or_else(TouchEvent::released))
    }
}

#[derive(Default)]
pub struct RecordingCues {
    pub played: Vec<Clip>,
}

impl CuePlayer for RecordingCues {
    async fn play(&mut self, clip: Clip) -> Result<()> {
        self.played.push(clip);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingIndicator {
    pub colors: Vec<IndicatorColor>,
}

impl RecordingIndicator {
    pub fn current(&self) -> Option<IndicatorColor> {
        self.colors.last().copied()
    }
}

impl StatusIndicator for RecordingIndicator {
    fn set_color(&mut self, color: IndicatorColor) {
        self.colors.push(color);
    }
}

/// Delay that returns immediately and counts calls
#[derive(Default)]
pub struct CountingDelay {
    pub calls: u32,
    pub total_ms: u64,
}

impl DelayNs for CountingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ms += u64::from(ns) / 1_000_000;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ms += u64::from(ms);
    }
}

// ============================================================================
// Tuner and sensors
// ============================================================================

/// Tuner that enforces band limits like the real chip
pub struct MockTuner {
    pub band: FmBand,
    pub standby: Vec<bool>,
    pub frequencies: Vec<Frequency>,
    pub fail: bool,
}

impl Default for MockTuner {
    fn default() -> Self {
        Self {
            band: FmBand::UsEurope,
            standby: Vec::new(),
            frequencies: Vec::new(),
            fail: false,
        }
    }
}

impl TunerDriver for MockTuner {
    async fn set_standby(&mut self, standby: bool) -> Result<()> {
        if self.fail {
            return Err(Error::RadioCommandRejected);
        }
        self.standby.push(standby);
        Ok(())
    }

    async fn set_frequency(&mut self, frequency: Frequency) -> Result<()> {
        if self.fail || !self.band.contains(frequency) {
            return Err(Error::RadioCommandRejected);
        }
        self.frequencies.push(frequency);
        Ok(())
    }
}

pub fn sample_clock() -> DateTime {
    DateTime {
        weekday: Weekday::Thursday,
        month: 5,
        day: 26,
        year: 2022,
        hour: 9,
        minute: 5,
        second: 7,
    }
}

pub fn sample_readings() -> Readings {
    Readings {
        light: LightReading {
            uv_index: 1.25,
            lux: 310.5,
        },
        gps: None,
        clock: sample_clock(),
        range: Distance::from_cm(257),
    }
}

pub fn gps_text(s: &str) -> GpsText {
    let mut text = GpsText::new();
    text.push_str(s).unwrap();
    text
}

/// Sensor source returning canned readings
pub struct CannedSensors {
    pub base: Readings,
    pub gps: VecDeque<Option<GpsText>>,
    pub fail_on_read: Option<(usize, Error)>,
    pub reads: usize,
}

impl CannedSensors {
    pub fn new() -> Self {
        Self {
            base: sample_readings(),
            gps: VecDeque::new(),
            fail_on_read: None,
            reads: 0,
        }
    }
}

impl SensorSource for CannedSensors {
    async fn read_all(&mut self) -> Result<Readings> {
        self.reads += 1;
        if let Some((n, err)) = self.fail_on_read {
            if self.reads == n {
                return Err(err);
            }
        }
        let mut r = self.base.clone();
        r.gps = self.gps.pop_front().flatten();
        Ok(r)
    }
}

// ============================================================================
// I2C bus
// ============================================================================

/// I2C bus that records writes and answers reads from a queue
#[derive(Default)]
pub struct MockI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub responses: VecDeque<Vec<u8>>,
    pub fail: bool,
}

impl MockI2c {
    pub fn with_responses(responses: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> core::result::Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => self.writes.push((address, bytes.to_vec())),
                Operation::Read(buf) => {
                    let data = self.responses.pop_front().unwrap_or_default();
                    for (dst, src) in buf.iter_mut().zip(data.iter().chain(std::iter::repeat(&0))) {
                        *dst = *src;
                    }
                }
            }
        }
        Ok(())
    }
}

pub type MockBus = Mutex<NoopRawMutex, MockI2c>;

pub fn mock_bus(responses: impl IntoIterator<Item = Vec<u8>>) -> MockBus {
    Mutex::new(MockI2c::with_responses(responses))
}

/// Bus with nothing queued to read
pub fn idle_bus() -> MockBus {
    Mutex::new(MockI2c::default())
}

/// Snapshot of the writes seen so far
pub fn writes(bus: &MockBus) -> Vec<(u8, Vec<u8>)> {
    bus.try_lock().unwrap().writes.clone()
}

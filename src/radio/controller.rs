//! Radio Controller
//!
//! Owns the [`RadioState`] and commits every transition to the tuner.
//! The controller never clamps frequencies; the tuner driver is the one
//! that rejects out-of-band values.

use super::state::{apply_event, RadioEvent, RadioState};
use crate::error::{Error, Result};
use crate::types::Frequency;

/// Low-level FM tuner
pub trait TunerDriver {
    /// Enable (`true`) or disable (`false`) standby
    async fn set_standby(&mut self, standby: bool) -> Result<()>;

    /// Tune to an absolute frequency
    ///
    /// Implementations return [`Error::RadioCommandRejected`] for
    /// frequencies outside their band.
    async fn set_frequency(&mut self, frequency: Frequency) -> Result<()>;
}

/// FM radio controller
pub struct RadioController<T> {
    tuner: T,
    state: RadioState,
}

impl<T: TunerDriver> RadioController<T> {
    /// Create a controller with the power-on state
    #[must_use]
    pub fn new(tuner: T) -> Self {
        Self::with_state(tuner, RadioState::default())
    }

    /// Create a controller with an explicit starting state
    #[must_use]
    pub const fn with_state(tuner: T, state: RadioState) -> Self {
        Self { tuner, state }
    }

    /// Commit the current state to the tuner
    ///
    /// # Errors
    ///
    /// Propagates the tuner's rejection.
    pub async fn init(&mut self) -> Result<()> {
        self.tuner.set_frequency(self.state.frequency()).await?;
        self.tuner.set_standby(self.state.is_standby()).await?;
        log_info!("radio ready at {}", self.state.frequency());
        Ok(())
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> RadioState {
        self.state
    }

    /// Current frequency
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.state.frequency()
    }

    /// Enter (`true`) or leave (`false`) standby
    ///
    /// # Errors
    ///
    /// Propagates the tuner's rejection; the state is unchanged on error.
    pub async fn standby(&mut self, on: bool) -> Result<()> {
        self.apply(RadioEvent::SetStandby(on)).await
    }

    /// Shift the frequency by `delta_khz` and commit it
    ///
    /// # Errors
    ///
    /// Returns [`Error::RadioCommandRejected`] if the tuner refuses the
    /// new frequency; the state is unchanged on error.
    pub async fn tune(&mut self, delta_khz: i32) -> Result<()> {
        self.apply(RadioEvent::Tune(delta_khz)).await
    }

    /// Apply an event, committing it to the tuner before storing it
    ///
    /// # Errors
    ///
    /// Returns [`Error::RadioCommandRejected`] for unrepresentable offsets
    /// or when the tuner refuses the command.
    pub async fn apply(&mut self, event: RadioEvent) -> Result<()> {
        let next = apply_event(self.state, event).ok_or(Error::RadioCommandRejected)?;

        match event {
            RadioEvent::SetStandby(standby) => self.tuner.set_standby(standby).await?,
            RadioEvent::Tune(_) => {
                self.tuner.set_frequency(next.frequency()).await?;
            }
        }

        log_debug!("radio {} -> {}", event, next);
        self.state = next;
        Ok(())
    }

    /// Borrow the tuner
    #[must_use]
    pub const fn tuner(&self) -> &T {
        &self.tuner
    }
}

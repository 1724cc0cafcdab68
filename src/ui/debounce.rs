//! Touch Release Debounce
//!
//! After a button fires, the loop polls the panel until the finger lifts so
//! one physical press triggers one action.

use embedded_hal_async::delay::DelayNs;

use super::TouchInput;
use crate::config::TOUCH_RELEASE_POLL_MS;
use crate::error::Result;

/// How a release wait ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The panel reported no touch after `polls` delays
    Released {
        /// Delays spent waiting
        polls: u32,
    },
    /// The poll limit ran out with the panel still pressed
    GaveUp {
        /// Delays spent waiting
        polls: u32,
    },
}

impl ReleaseOutcome {
    /// Check whether the finger lifted
    #[must_use]
    pub const fn is_released(self) -> bool {
        matches!(self, Self::Released { .. })
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ReleaseOutcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Released { polls } => defmt::write!(f, "Released after {} polls", polls),
            Self::GaveUp { polls } => defmt::write!(f, "GaveUp after {} polls", polls),
        }
    }
}

/// Release wait policy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleaseWait {
    interval_ms: u32,
    max_polls: Option<u32>,
}

impl ReleaseWait {
    /// Wait as long as it takes
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            interval_ms: TOUCH_RELEASE_POLL_MS,
            max_polls: None,
        }
    }

    /// Give up after `max_polls` delays
    #[must_use]
    pub const fn bounded(max_polls: u32) -> Self {
        Self {
            interval_ms: TOUCH_RELEASE_POLL_MS,
            max_polls: Some(max_polls),
        }
    }

    /// Override the poll interval
    #[must_use]
    pub const fn with_interval_ms(self, interval_ms: u32) -> Self {
        Self {
            interval_ms,
            ..self
        }
    }

    /// Poll interval
    #[must_use]
    pub const fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Poll limit, `None` when unbounded
    #[must_use]
    pub const fn max_polls(&self) -> Option<u32> {
        self.max_polls
    }

    /// Poll `touch` until it reports released
    ///
    /// # Errors
    ///
    /// Propagates touch panel faults.
    pub async fn wait<T, D>(&self, touch: &mut T, delay: &mut D) -> Result<ReleaseOutcome>
    where
        T: TouchInput,
        D: DelayNs,
    {
        let mut polls = 0u32;
        loop {
            if !touch.touch_point().await?.pressed {
                return Ok(ReleaseOutcome::Released { polls });
            }
            if self.max_polls.is_some_and(|max| polls >= max) {
                return Ok(ReleaseOutcome::GaveUp { polls });
            }
            delay.delay_ms(self.interval_ms).await;
            polls = polls.saturating_add(1);
        }
    }
}

impl Default for ReleaseWait {
    fn default() -> Self {
        Self::unbounded()
    }
}

//! User Interface
//!
//! Four mutually exclusive views, the touch button registry and the loop
//! that ties sensors, radio and display together.

pub mod button;
pub mod debounce;
pub mod labels;
pub mod ui_loop;
pub mod view;

use crate::error::Result;
use crate::types::{Clip, IndicatorColor, TouchEvent};

/// Touch panel
pub trait TouchInput {
    /// Take one non-blocking touch sample
    async fn touch_point(&mut self) -> Result<TouchEvent>;
}

/// Audible feedback
pub trait CuePlayer {
    /// Play a cue to completion
    async fn play(&mut self, clip: Clip) -> Result<()>;
}

/// RGB status indicator
pub trait StatusIndicator {
    /// Show a colour
    fn set_color(&mut self, color: IndicatorColor);
}

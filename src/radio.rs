//! Radio Control Logic
//!
//! FM receiver state and the tuning command sequence.
//! `state` is the functional core, `controller` commits it to the tuner.

pub mod controller;
pub mod state;

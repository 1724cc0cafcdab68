//! Touch Buttons
//!
//! Fixed registry of rectangular buttons. Hit testing walks the buttons in
//! registration order and the first one containing the touch point wins.

use heapless::Vec;

use crate::config::{TABS_HEIGHT, TABS_WIDTH, TABS_Y, TUNE_COARSE_KHZ, TUNE_FINE_KHZ};
use crate::types::{ButtonId, Rect, TouchEvent, ViewId};

/// Maximum number of registered buttons
pub const MAX_BUTTONS: usize = 16;

/// What a button does when pressed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Make a view the visible one
    SwitchView(ViewId),
    /// Tuner on (`false`) or standby (`true`)
    RadioStandby(bool),
    /// Shift the tuner frequency in kHz
    RadioTune(i32),
}

impl Action {
    /// Check whether this action drives the tuner
    #[must_use]
    pub const fn is_radio(self) -> bool {
        matches!(self, Self::RadioStandby(_) | Self::RadioTune(_))
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Action {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::SwitchView(v) => defmt::write!(f, "SwitchView({})", v),
            Self::RadioStandby(s) => defmt::write!(f, "RadioStandby({})", s),
            Self::RadioTune(d) => defmt::write!(f, "RadioTune({})", d),
        }
    }
}

/// A touch button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Button {
    /// Registry id
    pub id: ButtonId,
    /// Caption
    pub label: &'static str,
    /// Hit area
    pub bounds: Rect,
    /// Press action
    pub action: Action,
    /// View the button is drawn on, `None` for the navigation strip
    pub owner: Option<ViewId>,
    /// Drawn in the selected style
    pub selected: bool,
}

/// Button registry and hit tester
#[derive(Clone, Debug, Default)]
pub struct ButtonDispatcher {
    buttons: Vec<Button, MAX_BUTTONS>,
}

impl ButtonDispatcher {
    /// Create an empty registry
    #[must_use]
    pub const fn new() -> Self {
        Self { buttons: Vec::new() }
    }

    /// Registry holding the navigation strip and the six FM controls
    ///
    /// Buttons 0-3 switch to views 1-4. Buttons 4-9 are ON, OFF,
    /// UP 1, DOWN 1, UP 0.1 and DOWN 0.1 on the FM view.
    #[must_use]
    pub fn standard() -> Self {
        let mut reg = Self::new();
        let tab_w = TABS_WIDTH as i32;

        let tabs = ["LOC", "TARGET", "UV", "FM"];
        for (view, label) in ViewId::ALL.into_iter().zip(tabs) {
            let x = tab_w * i32::from(view.id() - 1);
            reg.register(
                label,
                Rect::new(x, TABS_Y, TABS_WIDTH, TABS_HEIGHT),
                Action::SwitchView(view),
                None,
            );
        }

        let fm = Some(ViewId::Fm);
        let controls = [
            ("ON", Rect::new(25, 60, 50, 30), Action::RadioStandby(false)),
            ("OFF", Rect::new(120, 60, 50, 30), Action::RadioStandby(true)),
            ("UP 1", Rect::new(25, 110, 80, 30), Action::RadioTune(TUNE_COARSE_KHZ)),
            ("DOWN 1", Rect::new(25, 160, 80, 30), Action::RadioTune(-TUNE_COARSE_KHZ)),
            ("UP 0.1", Rect::new(130, 110, 90, 30), Action::RadioTune(TUNE_FINE_KHZ)),
            ("DOWN 0.1", Rect::new(130, 160, 90, 30), Action::RadioTune(-TUNE_FINE_KHZ)),
        ];
        for (label, bounds, action) in controls {
            reg.register(label, bounds, action, fm);
        }

        reg.mark_current_view(crate::config::INITIAL_VIEW);
        reg
    }

    /// Add a button
    ///
    /// Returns `None` when the registry is full.
    pub fn register(
        &mut self,
        label: &'static str,
        bounds: Rect,
        action: Action,
        owner: Option<ViewId>,
    ) -> Option<ButtonId> {
        let id = ButtonId(u8::try_from(self.buttons.len()).ok()?);
        self.buttons
            .push(Button {
                id,
                label,
                bounds,
                action,
                owner,
                selected: false,
            })
            .ok()?;
        Some(id)
    }

    /// Number of buttons
    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Check for an empty registry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// All buttons in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter()
    }

    /// Look up a button
    #[must_use]
    pub fn button(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.get(id.index())
    }

    /// Find the button under a touch
    ///
    /// Released touches never hit anything.
    #[must_use]
    pub fn resolve(&self, touch: TouchEvent) -> Option<ButtonId> {
        if !touch.pressed {
            return None;
        }
        self.buttons
            .iter()
            .find(|b| b.bounds.contains(touch.x, touch.y))
            .map(|b| b.id)
    }

    /// Set the selected flag of one button
    ///
    /// Returns `false` for unknown ids.
    pub fn set_selected(&mut self, id: ButtonId, selected: bool) -> bool {
        match self.buttons.get_mut(id.index()) {
            Some(b) => {
                b.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Update navigation highlight for a newly visible view
    ///
    /// The tab of the visible view is drawn normal, the other tabs
    /// selected.
    pub fn mark_current_view(&mut self, view: ViewId) {
        for b in &mut self.buttons {
            if let Action::SwitchView(target) = b.action {
                b.selected = target != view;
            }
        }
    }

    /// Navigation buttons in registration order
    pub fn nav_buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons
            .iter()
            .filter(|b| matches!(b.action, Action::SwitchView(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registered_wins_on_overlap() {
        let mut reg = ButtonDispatcher::new();
        let a = reg.register("a", Rect::new(0, 0, 50, 50), Action::RadioTune(1), None);
        let _b = reg.register("b", Rect::new(25, 25, 50, 50), Action::RadioTune(2), None);
        assert_eq!(reg.resolve(TouchEvent::pressed(30, 30)), a);
    }

    #[test]
    fn registry_full() {
        let mut reg = ButtonDispatcher::new();
        for _ in 0..MAX_BUTTONS {
            assert!(reg
                .register("x", Rect::new(0, 0, 1, 1), Action::RadioTune(0), None)
                .is_some());
        }
        assert!(reg
            .register("x", Rect::new(0, 0, 1, 1), Action::RadioTune(0), None)
            .is_none());
    }
}

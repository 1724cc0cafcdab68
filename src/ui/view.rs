//! View Manager
//!
//! Tracks which of the four screens is visible. Exactly one view is
//! visible at any time; a switch hides every other view before showing
//! the target so two views are never on the display together.

use super::button::ButtonDispatcher;
use crate::error::Result;
use crate::types::{ButtonId, ViewId};

/// Text field of a view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    /// Heading line
    Title,
    /// Sensor data block
    Body,
}

/// Display layer the views are rendered on
pub trait ViewSurface {
    /// Take the button layout to draw
    ///
    /// Called once before any view is shown. Buttons are later addressed
    /// by their id in this layout.
    async fn set_layout(&mut self, buttons: &ButtonDispatcher) -> Result<()>;

    /// Make a view visible
    ///
    /// Implementations may pause briefly before drawing.
    async fn show(&mut self, view: ViewId) -> Result<()>;

    /// Hide a view
    async fn hide(&mut self, view: ViewId) -> Result<()>;

    /// Replace the text of a field
    async fn set_text(&mut self, view: ViewId, field: TextField, text: &str) -> Result<()>;

    /// Redraw a button in its selected or normal style
    async fn set_button_selected(&mut self, button: ButtonId, selected: bool) -> Result<()>;
}

/// One screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct View {
    /// Which screen
    pub id: ViewId,
    /// Whether it is on the display
    pub is_visible: bool,
}

/// Owner of the four views
#[derive(Clone, Debug)]
pub struct ViewManager {
    views: [View; 4],
    current: ViewId,
}

impl ViewManager {
    /// Create the four views with `initial` visible
    #[must_use]
    pub fn new(initial: ViewId) -> Self {
        let views = ViewId::ALL.map(|id| View {
            id,
            is_visible: id == initial,
        });
        Self {
            views,
            current: initial,
        }
    }

    /// Visible view
    #[must_use]
    pub const fn current(&self) -> ViewId {
        self.current
    }

    /// All four views in id order
    #[must_use]
    pub const fn views(&self) -> &[View; 4] {
        &self.views
    }

    /// Check whether a view is visible
    #[must_use]
    pub const fn is_visible(&self, view: ViewId) -> bool {
        self.views[view.index()].is_visible
    }

    /// Number of visible views (always one)
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.views.iter().filter(|v| v.is_visible).count()
    }

    /// Push the boot state to the display
    ///
    /// # Errors
    ///
    /// Propagates display failures.
    pub async fn init<S: ViewSurface>(&mut self, surface: &mut S) -> Result<()> {
        surface.show(self.current).await?;
        for view in ViewId::ALL.into_iter().filter(|&v| v != self.current) {
            surface.hide(view).await?;
        }
        Ok(())
    }

    /// Make `target` the only visible view
    ///
    /// Returns `false` without touching the display when `target` is
    /// already visible.
    ///
    /// # Errors
    ///
    /// Propagates display failures. The tracked state only changes once
    /// the display has accepted every call.
    pub async fn switch_to<S: ViewSurface>(&mut self, target: ViewId, surface: &mut S) -> Result<bool> {
        if target == self.current {
            return Ok(false);
        }

        for view in ViewId::ALL.into_iter().filter(|&v| v != target) {
            surface.hide(view).await?;
        }
        surface.show(target).await?;

        for view in &mut self.views {
            view.is_visible = view.id == target;
        }
        self.current = target;
        log_info!("{} on", target);
        Ok(true)
    }

    /// Switch by numeric id (1-4)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidViewId`](crate::error::Error::InvalidViewId)
    /// for ids outside 1..=4, otherwise as [`Self::switch_to`].
    pub async fn switch_to_id<S: ViewSurface>(&mut self, id: u8, surface: &mut S) -> Result<bool> {
        let target = ViewId::from_id(id)?;
        self.switch_to(target, surface).await
    }
}

impl Default for ViewManager {
    fn default() -> Self {
        Self::new(ViewId::default())
    }
}

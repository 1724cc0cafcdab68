//! UI Loop
//!
//! One tick samples the touch panel, reads every sensor, refreshes the
//! visible view and then dispatches at most one button press. Any error
//! is fatal to the loop and handed back to the caller.

use embedded_hal_async::delay::DelayNs;

use super::button::{Action, Button, ButtonDispatcher};
use super::debounce::{ReleaseOutcome, ReleaseWait};
use super::labels::{data_text, fm_text, location_text, target_text};
use super::view::{TextField, ViewManager, ViewSurface};
use super::{CuePlayer, StatusIndicator, TouchInput};
use crate::config::{indicator_for, INITIAL_VIEW};
use crate::error::{Error, Result};
use crate::radio::controller::{RadioController, TunerDriver};
use crate::radio::state::RadioEvent;
use crate::sensors::hub::{GpsText, Readings};
use crate::sensors::SensorSource;
use crate::types::{ButtonId, Clip, ViewId};

/// Hardware the loop drives besides sensors and tuner
pub struct Frontend<S, A, I, P, D> {
    /// Display
    pub surface: S,
    /// Speaker
    pub cues: A,
    /// RGB LED
    pub indicator: I,
    /// Touch panel
    pub touch: P,
    /// Delay used while waiting for release
    pub delay: D,
}

/// Main UI loop
pub struct UiLoop<Sn, T, S, A, I, P, D> {
    sensors: Sn,
    radio: RadioController<T>,
    views: ViewManager,
    buttons: ButtonDispatcher,
    io: Frontend<S, A, I, P, D>,
    release: ReleaseWait,
    gps_text: GpsText,
}

impl<Sn, T, S, A, I, P, D> UiLoop<Sn, T, S, A, I, P, D>
where
    Sn: SensorSource,
    T: TunerDriver,
    S: ViewSurface,
    A: CuePlayer,
    I: StatusIndicator,
    P: TouchInput,
    D: DelayNs,
{
    /// Create a loop with the standard button layout
    #[must_use]
    pub fn new(sensors: Sn, radio: RadioController<T>, io: Frontend<S, A, I, P, D>) -> Self {
        Self {
            sensors,
            radio,
            views: ViewManager::new(INITIAL_VIEW),
            buttons: ButtonDispatcher::standard(),
            io,
            release: ReleaseWait::unbounded(),
            gps_text: GpsText::new(),
        }
    }

    /// Replace the release wait policy
    #[must_use]
    pub fn with_release_wait(mut self, release: ReleaseWait) -> Self {
        self.release = release;
        self
    }

    /// Bring up tuner, display and indicator
    ///
    /// # Errors
    ///
    /// Propagates tuner or display faults.
    pub async fn start(&mut self) -> Result<()> {
        self.radio.init().await?;
        self.io.surface.set_layout(&self.buttons).await?;
        self.views.init(&mut self.io.surface).await?;
        for view in ViewId::ALL {
            self.io
                .surface
                .set_text(view, TextField::Title, view.title())
                .await?;
        }
        self.push_button_states().await?;
        self.io.indicator.set_color(indicator_for(self.views.current()));
        log_info!("ui started on {}", self.views.current());
        Ok(())
    }

    /// Run ticks until one fails
    ///
    /// Never returns while the hardware keeps working.
    pub async fn run(&mut self) -> Error {
        loop {
            if let Err(e) = self.tick().await {
                log_error!("ui loop stopped: {}", e);
                return e;
            }
        }
    }

    /// Run one iteration
    ///
    /// Returns the button that was acted on, if any.
    ///
    /// # Errors
    ///
    /// Propagates the first sensor, tuner, touch or display fault.
    pub async fn tick(&mut self) -> Result<Option<ButtonId>> {
        let touch = self.io.touch.touch_point().await?;

        let readings = self.sensors.read_all().await?;
        self.refresh(&readings).await?;

        let Some(id) = self.buttons.resolve(touch) else {
            return Ok(None);
        };
        let Some(&button) = self.buttons.button(id) else {
            return Ok(None);
        };
        self.dispatch(button).await
    }

    async fn refresh(&mut self, readings: &Readings) -> Result<()> {
        if let Some(gps) = &readings.gps {
            self.gps_text.clone_from(gps);
        }

        let view = self.views.current();
        let text = match view {
            ViewId::Location => location_text(&readings.clock, &self.gps_text),
            ViewId::Target => target_text(readings.range),
            ViewId::DataView => data_text(readings.light),
            ViewId::Fm => fm_text(self.radio.state()),
        };
        self.io.surface.set_text(view, TextField::Body, &text).await
    }

    async fn dispatch(&mut self, button: Button) -> Result<Option<ButtonId>> {
        match button.action {
            Action::SwitchView(target) => {
                if target == self.views.current() {
                    return Ok(None);
                }
                log_info!("{} pressed", button.label);
                self.io.cues.play(Clip::TabSwitch).await?;
                self.switch_view(target).await?;
                self.await_release().await?;
            }
            Action::RadioStandby(standby) => {
                self.radio_command(button, RadioEvent::SetStandby(standby))
                    .await?;
            }
            Action::RadioTune(delta) => {
                self.radio_command(button, RadioEvent::Tune(delta)).await?;
            }
        }
        Ok(Some(button.id))
    }

    async fn radio_command(&mut self, button: Button, event: RadioEvent) -> Result<()> {
        log_info!("{} pressed", button.label);
        self.io.cues.play(Clip::Beep).await?;
        self.radio.apply(event).await?;

        self.set_selected(button.id, true).await?;
        self.await_release().await?;
        self.set_selected(button.id, false).await?;

        let text = fm_text(self.radio.state());
        self.io
            .surface
            .set_text(ViewId::Fm, TextField::Body, &text)
            .await
    }

    async fn switch_view(&mut self, target: ViewId) -> Result<()> {
        self.views.switch_to(target, &mut self.io.surface).await?;
        self.buttons.mark_current_view(target);
        self.push_button_states().await?;
        self.io.indicator.set_color(indicator_for(target));
        Ok(())
    }

    async fn set_selected(&mut self, id: ButtonId, selected: bool) -> Result<()> {
        self.buttons.set_selected(id, selected);
        self.io.surface.set_button_selected(id, selected).await
    }

    async fn push_button_states(&mut self) -> Result<()> {
        for b in self.buttons.nav_buttons() {
            self.io.surface.set_button_selected(b.id, b.selected).await?;
        }
        Ok(())
    }

    async fn await_release(&mut self) -> Result<()> {
        let outcome = self
            .release
            .wait(&mut self.io.touch, &mut self.io.delay)
            .await?;
        if let ReleaseOutcome::GaveUp { polls } = outcome {
            log_warn!("touch still held after {} polls", polls);
        }
        Ok(())
    }

    /// View manager
    #[must_use]
    pub const fn views(&self) -> &ViewManager {
        &self.views
    }

    /// Button registry
    #[must_use]
    pub const fn buttons(&self) -> &ButtonDispatcher {
        &self.buttons
    }

    /// Radio controller
    #[must_use]
    pub const fn radio(&self) -> &RadioController<T> {
        &self.radio
    }

    /// Hardware front end
    #[must_use]
    pub const fn frontend(&self) -> &Frontend<S, A, I, P, D> {
        &self.io
    }

    /// Last GPS text shown on the Location view
    #[must_use]
    pub fn gps_text(&self) -> &str {
        &self.gps_text
    }
}

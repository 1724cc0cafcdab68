//! Touchscreen Renderer
//!
//! Draws the navigation strip, the visible view's title and data text and
//! the FM control buttons on any RGB565 `DrawTarget` (the ILI9341 panel
//! through mipidsi on the device). Text and selection state for hidden
//! views is kept so a view is complete as soon as it is shown again.

use embassy_time::Timer;
use embedded_graphics::mono_font::ascii::{FONT_9X15, FONT_9X15_BOLD};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    CornerRadii, PrimitiveStyleBuilder, Rectangle, RoundedRectangle,
};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::config::{
    DATA_Y, FM_STATUS_Y, LABEL_X, LABEL_Y, SCREEN_HEIGHT, SCREEN_WIDTH, TABS_HEIGHT,
    VIEW_SHOW_SETTLE_MS,
};
use crate::error::{Error, Result};
use crate::types::{ButtonId, Rect, ViewId};
use crate::ui::button::{Button, ButtonDispatcher};
use crate::ui::labels::Label;
use crate::ui::view::{TextField, ViewSurface};

/// Colour scheme
mod palette {
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::RgbColor;

    pub const BACKGROUND: Rgb565 = Rgb565::BLACK;
    pub const TEXT: Rgb565 = Rgb565::WHITE;
    pub const BUTTON_FILL: Rgb565 = Rgb565::new(11, 22, 11);
    pub const BUTTON_OUTLINE: Rgb565 = Rgb565::WHITE;
    pub const SELECTED_FILL: Rgb565 = Rgb565::WHITE;
    pub const SELECTED_TEXT: Rgb565 = Rgb565::BLACK;
}

/// Convert a layout rectangle
fn to_rectangle(r: Rect) -> Rectangle {
    Rectangle::new(Point::new(r.x, r.y), Size::new(r.w, r.h))
}

/// Screen renderer implementing [`ViewSurface`]
pub struct Renderer<DT> {
    target: DT,
    buttons: ButtonDispatcher,
    visible: Option<ViewId>,
    titles: [Label; 4],
    bodies: [Label; 4],
}

impl<DT> Renderer<DT>
where
    DT: DrawTarget<Color = Rgb565>,
{
    /// Create a renderer with no buttons until a layout is set
    #[must_use]
    pub fn new(target: DT) -> Self {
        Self {
            target,
            buttons: ButtonDispatcher::new(),
            visible: None,
            titles: Default::default(),
            bodies: Default::default(),
        }
    }

    /// Clear the whole panel
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if the panel rejects the write.
    pub fn clear(&mut self) -> Result<()> {
        self.target
            .clear(palette::BACKGROUND)
            .map_err(|_| Error::Display)
    }

    /// View currently on screen
    #[must_use]
    pub const fn visible(&self) -> Option<ViewId> {
        self.visible
    }

    /// Release the draw target
    pub fn into_inner(self) -> DT {
        self.target
    }

    fn fill(&mut self, area: Rectangle) -> Result<()> {
        self.target
            .fill_solid(&area, palette::BACKGROUND)
            .map_err(|_| Error::Display)
    }

    fn content_area() -> Rectangle {
        Rectangle::new(
            Point::new(0, TABS_HEIGHT as i32),
            Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - TABS_HEIGHT),
        )
    }

    fn body_origin(view: ViewId) -> Point {
        match view {
            ViewId::Fm => Point::new(LABEL_X, FM_STATUS_Y),
            _ => Point::new(LABEL_X, DATA_Y),
        }
    }

    fn field_area(view: ViewId, field: TextField) -> Rectangle {
        let top = match field {
            TextField::Title => LABEL_Y,
            TextField::Body => Self::body_origin(view).y,
        };
        let bottom = match (view, field) {
            (ViewId::Fm, TextField::Title) => 60,
            (_, TextField::Title) => DATA_Y,
            (_, TextField::Body) => SCREEN_HEIGHT as i32,
        };
        Rectangle::new(
            Point::new(0, top),
            Size::new(SCREEN_WIDTH, (bottom - top).unsigned_abs()),
        )
    }

    fn draw_field(&mut self, view: ViewId, field: TextField) -> Result<()> {
        self.fill(Self::field_area(view, field))?;
        let (text, origin, font) = match field {
            TextField::Title => (
                &self.titles[view.index()],
                Point::new(LABEL_X, LABEL_Y),
                &FONT_9X15_BOLD,
            ),
            TextField::Body => (&self.bodies[view.index()], Self::body_origin(view), &FONT_9X15),
        };
        let style = MonoTextStyle::new(font, palette::TEXT);
        Text::with_baseline(text, origin, style, Baseline::Top)
            .draw(&mut self.target)
            .map_err(|_| Error::Display)?;
        Ok(())
    }

    fn draw_button(&mut self, button: &Button) -> Result<()> {
        let (fill, text) = if button.selected {
            (palette::SELECTED_FILL, palette::SELECTED_TEXT)
        } else {
            (palette::BUTTON_FILL, palette::TEXT)
        };
        let shape = to_rectangle(button.bounds);
        let style = PrimitiveStyleBuilder::new()
            .fill_color(fill)
            .stroke_color(palette::BUTTON_OUTLINE)
            .stroke_width(1)
            .build();
        RoundedRectangle::new(shape, CornerRadii::new(Size::new(6, 6)))
            .into_styled(style)
            .draw(&mut self.target)
            .map_err(|_| Error::Display)?;

        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(
            button.label,
            shape.center(),
            MonoTextStyle::new(&FONT_9X15, text),
            text_style,
        )
        .draw(&mut self.target)
        .map_err(|_| Error::Display)?;
        Ok(())
    }

    fn is_drawn(&self, button: &Button) -> bool {
        match button.owner {
            None => true,
            Some(owner) => self.visible == Some(owner),
        }
    }

    fn draw_view(&mut self, view: ViewId) -> Result<()> {
        self.fill(Self::content_area())?;
        self.draw_field(view, TextField::Title)?;
        self.draw_field(view, TextField::Body)?;

        let layout = self.buttons.clone();
        for b in layout.iter().filter(|b| b.owner == Some(view)) {
            self.draw_button(b)?;
        }
        Ok(())
    }
}

impl<DT> ViewSurface for Renderer<DT>
where
    DT: DrawTarget<Color = Rgb565>,
{
    async fn set_layout(&mut self, buttons: &ButtonDispatcher) -> Result<()> {
        self.buttons.clone_from(buttons);
        Ok(())
    }

    async fn show(&mut self, view: ViewId) -> Result<()> {
        Timer::after_millis(VIEW_SHOW_SETTLE_MS).await;
        self.visible = Some(view);
        self.draw_view(view)
    }

    async fn hide(&mut self, view: ViewId) -> Result<()> {
        if self.visible == Some(view) {
            self.visible = None;
            self.fill(Self::content_area())?;
        }
        Ok(())
    }

    async fn set_text(&mut self, view: ViewId, field: TextField, text: &str) -> Result<()> {
        let slot = match field {
            TextField::Title => &mut self.titles[view.index()],
            TextField::Body => &mut self.bodies[view.index()],
        };
        if slot.as_str() == text {
            return Ok(());
        }
        slot.clear();
        for ch in text.chars() {
            if slot.push(ch).is_err() {
                break;
            }
        }

        if self.visible == Some(view) {
            self.draw_field(view, field)?;
        }
        Ok(())
    }

    async fn set_button_selected(&mut self, button: ButtonId, selected: bool) -> Result<()> {
        if !self.buttons.set_selected(button, selected) {
            return Ok(());
        }
        let Some(&b) = self.buttons.button(button) else {
            return Ok(());
        };
        if self.is_drawn(&b) {
            self.draw_button(&b)?;
        }
        Ok(())
    }
}

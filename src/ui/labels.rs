//! View Text
//!
//! Formats sensor readings into the text blocks drawn on each view.
//! Output is truncated at [`LABEL_CAPACITY`] bytes rather than failing.

use core::fmt::Write;

use heapless::String;

use crate::config::{GPS_WRAP_CHARS, LABEL_CAPACITY};
use crate::radio::state::RadioState;
use crate::types::{DateTime, Distance, LightReading};

/// Text block of one view
pub type Label = String<LABEL_CAPACITY>;

/// Indent that pushes a value towards the right of the screen
const VALUE_INDENT: &str = "                   ";

/// Word-wrap `text` into lines of at most `width` characters
///
/// Runs of whitespace (newlines included) collapse to a single break
/// point. Words longer than `width` are split across lines.
#[must_use]
pub fn wrap_words(text: &str, width: usize) -> Label {
    let width = width.max(1);
    let mut out = Label::new();
    let mut col = 0usize;

    for word in text.split_whitespace() {
        let mut rest = word;
        while !rest.is_empty() {
            let len = rest.chars().count();
            if col > 0 && col + 1 + len <= width {
                out.push(' ').ok();
                out.push_str(rest).ok();
                col += 1 + len;
                break;
            }
            if col > 0 {
                out.push('\n').ok();
                col = 0;
            }
            if len <= width {
                out.push_str(rest).ok();
                col = len;
                break;
            }
            let split = rest.char_indices().nth(width).map_or(rest.len(), |(i, _)| i);
            let (head, tail) = rest.split_at(split);
            out.push_str(head).ok();
            col = width;
            rest = tail;
        }
    }
    out
}

/// Location view: date, time and the wrapped GPS text
#[must_use]
pub fn location_text(clock: &DateTime, gps: &str) -> Label {
    let mut s = Label::new();
    core::fmt::write(
        &mut s,
        format_args!(
            "{} {}/{}/{}  {}:{:02}:{:02}\nGlobal Position\n",
            clock.weekday.short_name(),
            clock.month,
            clock.day,
            clock.year,
            clock.hour,
            clock.minute,
            clock.second
        ),
    )
    .ok();
    s.push_str(&wrap_words(gps, GPS_WRAP_CHARS)).ok();
    s
}

/// Target view: distance in metres with centimetre resolution
#[must_use]
pub fn target_text(range: Distance) -> Label {
    let cm = range.as_cm();
    let mut s = Label::new();
    core::fmt::write(
        &mut s,
        format_args!("OBJ DISTANCE\n\n{VALUE_INDENT}{}.{:02}m", cm / 100, cm % 100),
    )
    .ok();
    s
}

/// `DataView`: UV index and ambient lux
#[must_use]
pub fn data_text(light: LightReading) -> Label {
    let mut s = Label::new();
    core::fmt::write(
        &mut s,
        format_args!(
            "UV INDEX\n{:.2}\n{VALUE_INDENT}UV LUX\n{VALUE_INDENT}{:.1}",
            light.uv_index, light.lux
        ),
    )
    .ok();
    s
}

/// FM view: frequency and power state
#[must_use]
pub fn fm_text(radio: RadioState) -> Label {
    let (whole, tenths) = radio.frequency().mhz_tenths();
    let power = if radio.is_standby() { "STANDBY" } else { "ON" };
    let mut s = Label::new();
    core::fmt::write(&mut s, format_args!("FM {whole}.{tenths} MHz\n{power}")).ok();
    s
}

//! UI Loop Tests
//!
//! End-to-end tests of boot, tab switching, radio controls and fault
//! handling, driven through mock sensors, tuner, display and touch panel.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test ui_loop_tests

mod common;

use common::{
    block_on, gps_text, sample_clock, CannedSensors, CountingDelay, MockTuner, RecordingCues,
    RecordingIndicator, RecordingSurface, ScriptedTouch, SurfaceCall,
};
use tricorder_firmware::error::{Error, SensorKind};
use tricorder_firmware::radio::controller::RadioController;
use tricorder_firmware::radio::state::RadioState;
use tricorder_firmware::types::{ButtonId, Clip, Frequency, IndicatorColor, TouchEvent, ViewId};
use tricorder_firmware::ui::debounce::ReleaseWait;
use tricorder_firmware::ui::labels::location_text;
use tricorder_firmware::ui::ui_loop::{Frontend, UiLoop};
use tricorder_firmware::ui::view::TextField;

type TestLoop = UiLoop<
    CannedSensors,
    MockTuner,
    RecordingSurface,
    RecordingCues,
    RecordingIndicator,
    ScriptedTouch,
    CountingDelay,
>;

const LOC_TAB: (i32, i32) = (10, 10);
const TARGET_TAB: (i32, i32) = (120, 20);
const FM_TAB: (i32, i32) = (280, 20);
const ON: (i32, i32) = (50, 75);
const OFF: (i32, i32) = (145, 75);
const UP_1: (i32, i32) = (65, 125);

fn frontend(touch: ScriptedTouch) -> Frontend<RecordingSurface, RecordingCues, RecordingIndicator, ScriptedTouch, CountingDelay> {
    Frontend {
        surface: RecordingSurface::default(),
        cues: RecordingCues::default(),
        indicator: RecordingIndicator::default(),
        touch,
        delay: CountingDelay::default(),
    }
}

fn started_with(sensors: CannedSensors, radio: RadioController<MockTuner>, touch: ScriptedTouch) -> TestLoop {
    let mut ui = UiLoop::new(sensors, radio, frontend(touch));
    block_on(ui.start()).unwrap();
    ui
}

fn started(touch: ScriptedTouch) -> TestLoop {
    started_with(
        CannedSensors::new(),
        RadioController::new(MockTuner::default()),
        touch,
    )
}

/// Touch script: each press is sampled once by a tick, then held for
/// `held` release polls, then lifted
fn presses(script: &[((i32, i32), usize)]) -> ScriptedTouch {
    let mut touch = ScriptedTouch::default();
    for &((x, y), held) in script {
        for _ in 0..=held {
            touch.push(TouchEvent::pressed(x, y));
        }
        touch.push(TouchEvent::released());
    }
    touch
}

fn body_views(surface: &RecordingSurface) -> Vec<ViewId> {
    surface
        .calls
        .iter()
        .filter_map(|c| match c {
            SurfaceCall::Text(v, TextField::Body, _) => Some(*v),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Boot
// =============================================================================

#[test]
fn test_boot_sequence() {
    let ui = started(ScriptedTouch::default());
    let io = ui.frontend();

    assert_eq!(
        io.surface.calls[..4],
        [
            SurfaceCall::Show(ViewId::Location),
            SurfaceCall::Hide(ViewId::Target),
            SurfaceCall::Hide(ViewId::DataView),
            SurfaceCall::Hide(ViewId::Fm),
        ]
    );
    for view in ViewId::ALL {
        assert_eq!(io.surface.last_text(view, TextField::Title), Some(view.title()));
    }
    assert_eq!(io.surface.selections(ButtonId(0)), [false]);
    for tab in 1..4 {
        assert_eq!(io.surface.selections(ButtonId(tab)), [true]);
    }

    assert_eq!(io.indicator.current(), Some(IndicatorColor::GREEN));
    assert!(io.cues.played.is_empty());
    assert_eq!(ui.views().current(), ViewId::Location);
    assert_eq!(ui.radio().tuner().frequencies, [Frequency::from_khz(94_500)]);
    assert_eq!(ui.radio().tuner().standby, [true]);
}

#[test]
fn test_start_hands_button_layout_to_display() {
    let ui = started(ScriptedTouch::default());
    let layout = ui.frontend().surface.layout.as_ref().unwrap();
    let drawn: Vec<_> = layout.iter().map(|b| (b.id, b.label, b.bounds)).collect();
    let owned: Vec<_> = ui.buttons().iter().map(|b| (b.id, b.label, b.bounds)).collect();
    assert_eq!(drawn.len(), 10);
    assert_eq!(drawn, owned);
}

#[test]
fn test_idle_tick_refreshes_location() {
    let mut ui = started(ScriptedTouch::default());
    assert_eq!(block_on(ui.tick()), Ok(None));

    let surface = &ui.frontend().surface;
    let expected = location_text(&sample_clock(), "");
    assert_eq!(
        surface.last_text(ViewId::Location, TextField::Body),
        Some(expected.as_str())
    );
    assert_eq!(body_views(surface), [ViewId::Location]);
}

#[test]
fn test_only_visible_view_refreshed() {
    let mut ui = started(presses(&[(TARGET_TAB, 0)]));
    for _ in 0..3 {
        block_on(ui.tick()).unwrap();
    }
    let views = body_views(&ui.frontend().surface);
    assert_eq!(views, [ViewId::Location, ViewId::Target, ViewId::Target]);
    let target = ui
        .frontend()
        .surface
        .last_text(ViewId::Target, TextField::Body)
        .unwrap();
    assert!(target.ends_with(" 2.57m"));
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn test_tab_switch_to_target() {
    let mut ui = started(ScriptedTouch::press(TARGET_TAB.0, TARGET_TAB.1, 2));
    assert_eq!(block_on(ui.tick()), Ok(Some(ButtonId(1))));

    let io = ui.frontend();
    assert_eq!(ui.views().current(), ViewId::Target);
    assert_eq!(ui.views().visible_count(), 1);
    assert_eq!(io.cues.played, [Clip::TabSwitch]);
    assert_eq!(io.indicator.current(), Some(IndicatorColor::RED));
    assert_eq!(io.surface.shows().last(), Some(&ViewId::Target));

    // held for two polls, then released
    assert_eq!(io.delay.calls, 2);
    assert_eq!(io.touch.remaining(), 0);

    assert_eq!(io.surface.selections(ButtonId(0)).last(), Some(&true));
    assert_eq!(io.surface.selections(ButtonId(1)).last(), Some(&false));
    assert!(!ui.buttons().button(ButtonId(1)).unwrap().selected);
}

#[test]
fn test_switch_hides_before_show() {
    let mut ui = started(presses(&[(FM_TAB, 0)]));
    let boot_calls = ui.frontend().surface.calls.len();
    block_on(ui.tick()).unwrap();

    let switch: Vec<_> = ui.frontend().surface.calls[boot_calls..]
        .iter()
        .filter(|c| matches!(c, SurfaceCall::Show(_) | SurfaceCall::Hide(_)))
        .cloned()
        .collect();
    assert_eq!(
        switch,
        [
            SurfaceCall::Hide(ViewId::Location),
            SurfaceCall::Hide(ViewId::Target),
            SurfaceCall::Hide(ViewId::DataView),
            SurfaceCall::Show(ViewId::Fm),
        ]
    );
    assert_eq!(ui.frontend().indicator.current(), Some(IndicatorColor::CYAN));
}

#[test]
fn test_press_on_current_tab_ignored() {
    let mut ui = started(ScriptedTouch::press(LOC_TAB.0, LOC_TAB.1, 3));
    let boot_calls = ui.frontend().surface.calls.len();
    assert_eq!(block_on(ui.tick()), Ok(None));

    let io = ui.frontend();
    assert!(io.cues.played.is_empty());
    assert_eq!(io.delay.calls, 0);
    assert_eq!(io.touch.reads, 1);
    assert!(io.surface.calls[boot_calls..]
        .iter()
        .all(|c| !matches!(c, SurfaceCall::Show(_) | SurfaceCall::Hide(_))));
    assert_eq!(ui.views().current(), ViewId::Location);
}

#[test]
fn test_visit_every_view() {
    let mut ui = started(presses(&[
        (TARGET_TAB, 0),
        ((200, 10), 0),
        (FM_TAB, 0),
        (LOC_TAB, 0),
    ]));
    let expected = [
        (ViewId::Target, IndicatorColor::RED),
        (ViewId::DataView, IndicatorColor::BLUE),
        (ViewId::Fm, IndicatorColor::CYAN),
        (ViewId::Location, IndicatorColor::GREEN),
    ];
    for (view, color) in expected {
        block_on(ui.tick()).unwrap();
        assert_eq!(ui.views().current(), view);
        assert_eq!(ui.views().visible_count(), 1);
        assert_eq!(ui.frontend().indicator.current(), Some(color));
    }
    assert_eq!(ui.frontend().cues.played, [Clip::TabSwitch; 4]);
}

// =============================================================================
// Radio Controls
// =============================================================================

#[test]
fn test_radio_buttons_act_from_any_view() {
    let mut ui = started(presses(&[(ON, 0), (UP_1, 0)]));
    assert_eq!(block_on(ui.tick()), Ok(Some(ButtonId(4))));
    assert_eq!(block_on(ui.tick()), Ok(Some(ButtonId(6))));

    assert_eq!(ui.views().current(), ViewId::Location);
    assert_eq!(ui.radio().tuner().standby, [true, false]);
    assert_eq!(
        ui.radio().tuner().frequencies,
        [Frequency::from_khz(94_500), Frequency::from_khz(95_500)]
    );

    let io = ui.frontend();
    assert_eq!(io.cues.played, [Clip::Beep, Clip::Beep]);
    assert_eq!(io.indicator.current(), Some(IndicatorColor::GREEN));
    assert_eq!(
        io.surface.last_text(ViewId::Fm, TextField::Body),
        Some("FM 95.5 MHz\nON")
    );
}

#[test]
fn test_tune_up_held_fires_once() {
    let mut ui = started(presses(&[(FM_TAB, 0), (UP_1, 3)]));
    block_on(ui.tick()).unwrap();
    assert_eq!(block_on(ui.tick()), Ok(Some(ButtonId(6))));

    let tuner = ui.radio().tuner();
    assert_eq!(
        tuner.frequencies,
        [Frequency::from_khz(94_500), Frequency::from_khz(95_500)]
    );
    assert_eq!(ui.radio().frequency(), Frequency::from_khz(95_500));

    let io = ui.frontend();
    assert_eq!(io.cues.played, [Clip::TabSwitch, Clip::Beep]);
    assert_eq!(io.surface.selections(ButtonId(6)), [true, false]);
    assert_eq!(io.delay.calls, 3);
    assert_eq!(
        io.surface.last_text(ViewId::Fm, TextField::Body),
        Some("FM 95.5 MHz\nSTANDBY")
    );
}

#[test]
fn test_on_then_off() {
    let mut ui = started(presses(&[(FM_TAB, 0), (ON, 0), (OFF, 0)]));
    block_on(ui.tick()).unwrap();

    assert_eq!(block_on(ui.tick()), Ok(Some(ButtonId(4))));
    assert!(ui.radio().state().is_on());
    assert_eq!(
        ui.frontend().surface.last_text(ViewId::Fm, TextField::Body),
        Some("FM 94.5 MHz\nON")
    );

    assert_eq!(block_on(ui.tick()), Ok(Some(ButtonId(5))));
    assert!(ui.radio().state().is_standby());
    assert_eq!(ui.radio().tuner().standby, [true, false, true]);
}

#[test]
fn test_rejected_tune_propagates() {
    let radio = RadioController::with_state(
        MockTuner::default(),
        RadioState::new(Frequency::from_khz(107_500)),
    );
    let mut ui = started_with(CannedSensors::new(), radio, presses(&[(FM_TAB, 0), (UP_1, 0)]));
    block_on(ui.tick()).unwrap();

    assert_eq!(block_on(ui.tick()), Err(Error::RadioCommandRejected));
    assert_eq!(ui.radio().frequency(), Frequency::from_khz(107_500));
    assert!(ui.frontend().surface.selections(ButtonId(6)).is_empty());
}

#[test]
fn test_bounded_release_gives_up() {
    let mut ui = UiLoop::new(
        CannedSensors::new(),
        RadioController::new(MockTuner::default()),
        frontend(ScriptedTouch::press(TARGET_TAB.0, TARGET_TAB.1, 50)),
    )
    .with_release_wait(ReleaseWait::bounded(2));
    block_on(ui.start()).unwrap();

    assert_eq!(block_on(ui.tick()), Ok(Some(ButtonId(1))));
    assert_eq!(ui.frontend().delay.calls, 2);
    assert_eq!(ui.views().current(), ViewId::Target);
}

// =============================================================================
// Sensors and Faults
// =============================================================================

#[test]
fn test_gps_none_keeps_previous_text() {
    let mut sensors = CannedSensors::new();
    sensors.gps.push_back(Some(gps_text("$GPRMC,1")));
    sensors.gps.push_back(None);
    let mut ui = started_with(
        sensors,
        RadioController::new(MockTuner::default()),
        ScriptedTouch::default(),
    );

    block_on(ui.tick()).unwrap();
    assert_eq!(ui.gps_text(), "$GPRMC,1");
    block_on(ui.tick()).unwrap();
    assert_eq!(ui.gps_text(), "$GPRMC,1");

    let body = ui
        .frontend()
        .surface
        .last_text(ViewId::Location, TextField::Body)
        .unwrap();
    assert!(body.ends_with("Global Position\n$GPRMC,1"));
}

#[test]
fn test_sensor_fault_ends_run() {
    let mut sensors = CannedSensors::new();
    sensors.fail_on_read = Some((3, Error::SensorRead(SensorKind::Range)));
    let mut ui = started_with(
        sensors,
        RadioController::new(MockTuner::default()),
        ScriptedTouch::default(),
    );

    assert_eq!(block_on(ui.run()), Error::SensorRead(SensorKind::Range));
    assert_eq!(ui.frontend().touch.reads, 3);
}

#[test]
fn test_touch_fault_ends_tick() {
    let touch = ScriptedTouch {
        fail: true,
        ..ScriptedTouch::default()
    };
    let mut ui = started(touch);
    assert_eq!(block_on(ui.tick()), Err(Error::Touch));
}

#[test]
fn test_display_fault_ends_start() {
    let mut io = frontend(ScriptedTouch::default());
    io.surface.fail = true;
    let mut ui = UiLoop::new(
        CannedSensors::new(),
        RadioController::new(MockTuner::default()),
        io,
    );
    assert_eq!(block_on(ui.start()), Err(Error::Display));
}

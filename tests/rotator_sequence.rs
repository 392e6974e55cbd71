//! Button and preset sequences through the full controller

mod common;

use common::{NullDisplay, RelayLog, Sink};
use embedded_hal_mock::serial::{Mock as SerialMock, Transaction};
use rotorctl::hal::{KEY_CCW, KEY_CW, KEY_PRESET_CW, KEY_STOP};
use rotorctl::{Controller, KeyState, MagCalibration, PresetCommand, State, Vector3};

type TestController = Controller<RelayLog, NullDisplay, Sink>;

fn controller() -> TestController {
    Controller::new(RelayLog::default(), NullDisplay, Sink::default())
}

fn controller_with_relay_log() -> (TestController, RelayLog) {
    let relays = RelayLog::default();
    let log = relays.clone();
    (
        Controller::new(relays, NullDisplay, Sink::default()),
        log,
    )
}

fn tick_held(ctl: &mut TestController, held: u8, ticks: usize) {
    for _ in 0..ticks {
        ctl.on_tick(KeyState::new(held));
    }
}

fn feed_heading_3(ctl: &mut TestController) {
    // device flat, field 3 degrees east of north under a symmetric calibration
    for _ in 0..12 {
        let expectations = [
            Transaction::read_many(b"$ACRAW,0,0,1000,52,-999,0*00\n".to_vec()),
            Transaction::read_error(nb::Error::WouldBlock),
        ];
        let mut serial = SerialMock::new(&expectations);
        ctl.feed_serial(&mut serial);
        serial.done();
    }
}

#[test]
fn holding_cw_turns_the_rotator() {
    let mut ctl = controller();
    tick_held(&mut ctl, KEY_CW, 30);
    assert_eq!(ctl.rotator_state(), State::TurningCw);
}

#[test]
fn releasing_cw_stops_the_rotator() {
    let mut ctl = controller();
    tick_held(&mut ctl, KEY_CW, 30);
    assert_eq!(ctl.rotator_state(), State::TurningCw);

    tick_held(&mut ctl, 0, 40);
    assert_eq!(ctl.rotator_state(), State::Idle);
}

#[test]
fn stop_key_overrides_a_turn_key() {
    let (mut ctl, log) = controller_with_relay_log();
    tick_held(&mut ctl, KEY_CW | KEY_STOP, 30);
    assert_eq!(ctl.rotator_state(), State::Idle);
    assert!(log.ops.borrow().is_empty());
}

#[test]
fn stop_key_fast_stops_a_running_turn() {
    let (mut ctl, log) = controller_with_relay_log();
    tick_held(&mut ctl, KEY_CCW, 30);
    assert_eq!(ctl.rotator_state(), State::TurningCcw);
    log.ops.borrow_mut().clear();

    tick_held(&mut ctl, KEY_STOP, 1);
    assert_eq!(ctl.rotator_state(), State::Idle);
    assert_eq!(
        *log.ops.borrow(),
        ["rotate_off", "brake_lock", "power_off"]
    );
}

#[test]
fn stop_key_cancels_the_preset_target() {
    let mut ctl = controller();
    // dial in a target away from the current heading
    tick_held(&mut ctl, KEY_PRESET_CW, 1);
    assert_eq!(ctl.preset_target(), 1);

    tick_held(&mut ctl, KEY_STOP, 1);
    assert_eq!(ctl.preset_target(), ctl.heading());
    assert_eq!(ctl.preset_command(), PresetCommand::None);
}

#[test]
fn preset_release_seeks_and_stops_on_target() {
    let mut ctl = controller();
    ctl.set_calibration(
        MagCalibration::new(
            Vector3::new(-1000.0, -1000.0, -1000.0),
            Vector3::new(1000.0, 1000.0, 1000.0),
        )
        .unwrap(),
    );

    // heading 0; dial the target one degree clockwise
    tick_held(&mut ctl, KEY_PRESET_CW, 1);
    assert_eq!(ctl.preset_target(), 1);

    // release: the controller engages and starts a clockwise turn
    tick_held(&mut ctl, 0, 2);
    assert_eq!(ctl.preset_command(), PresetCommand::Execute);
    tick_held(&mut ctl, 0, 30);
    assert_eq!(ctl.rotator_state(), State::TurningCw);

    // the antenna arrives: heading now reads 3, past the target at 1,
    // so the seek direction flips and the controller shuts down
    feed_heading_3(&mut ctl);
    assert_eq!(ctl.heading(), 3);
    tick_held(&mut ctl, 0, 1);
    assert_eq!(ctl.preset_command(), PresetCommand::None);
    tick_held(&mut ctl, 0, 40);
    assert_eq!(ctl.rotator_state(), State::Idle);
}

#[test]
fn preset_on_target_never_engages() {
    let mut ctl = controller();
    // heading and target both 0 after dialing one degree up and back:
    // the release must not start the rotator
    tick_held(&mut ctl, KEY_PRESET_CW, 1);
    assert_eq!(ctl.preset_target(), 1);
    tick_held(&mut ctl, rotorctl::hal::KEY_PRESET_CCW, 35);
    assert_eq!(ctl.preset_target(), 0);

    tick_held(&mut ctl, 0, 50);
    assert_eq!(ctl.rotator_state(), State::Idle);
    assert_eq!(ctl.preset_command(), PresetCommand::None);
}

#[test]
fn state_changes_are_reported_once() {
    let mut ctl = controller();
    ctl.poll_status();
    tick_held(&mut ctl, KEY_CW, 1);
    ctl.poll_status();
    ctl.poll_status();
    tick_held(&mut ctl, KEY_CW, 29);
    ctl.poll_status();
    assert_eq!(
        ctl.console().writer().0,
        "ROT BRAKE-REL\r\nROT TURN-CW\r\n"
    );
}

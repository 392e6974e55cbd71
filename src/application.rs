//! Application layer: ties the heading pipeline, the rotator engine and
//! the operator surfaces together
//!
//! Execution is split the way the firmware runs it. The periodic tick
//! (`on_tick`) is the only mutator of rotator/preset state; the
//! foreground loop (`feed_serial`, `update_display`, `poll_status`)
//! parses the sensor stream and talks to the slow buses. Commands written
//! by the foreground side take effect on the next tick; of several writes
//! within one tick interval the last one wins.

use embedded_hal::serial::Read;
use ufmt::uWrite;

use crate::compass::{HeadingAverager, HeadingEstimator, MagCalibration};
use crate::config::HEADING_WINDOW;
use crate::drivers::{Console, DisplayUpdater};
use crate::hal::{
    HeadingDisplay, KeyState, RelayBank, KEY_CCW, KEY_CW, KEY_PRESET_CCW, KEY_PRESET_CW,
    KEY_STOP,
};
use crate::math::Vector3;
use crate::protocol::{Sentence, SentenceDecoder};
use crate::rotator::{direction_to, Command, Preset, PresetCommand, Rotator, State};

pub struct Controller<R, D, W>
where
    R: RelayBank,
    D: HeadingDisplay,
    W: uWrite,
{
    rotator: Rotator<R>,
    preset: Preset,
    decoder: SentenceDecoder,
    estimator: HeadingEstimator,
    averager: HeadingAverager,
    calibration: MagCalibration,
    display: DisplayUpdater<D>,
    console: Console<W>,
    heading: u16,
    /// Manual turn command the button layer believes is active; keeps
    /// button releases from stopping a preset-driven turn.
    manual_turn: Command,
    sensor_faults: u16,
    sensor_healthy: bool,
    reported_state: State,
}

impl<R, D, W> Controller<R, D, W>
where
    R: RelayBank,
    D: HeadingDisplay,
    W: uWrite,
{
    pub fn new(relays: R, display: D, console: W) -> Self {
        Self {
            rotator: Rotator::new(relays),
            preset: Preset::new(0),
            decoder: SentenceDecoder::new(),
            estimator: HeadingEstimator::new(),
            averager: HeadingAverager::new(HEADING_WINDOW),
            calibration: MagCalibration::default(),
            display: DisplayUpdater::new(display),
            console: Console::new(console),
            heading: 0,
            manual_turn: Command::None,
            sensor_faults: 0,
            sensor_healthy: true,
            reported_state: State::Idle,
        }
    }

    /// Replace the magnetometer calibration (e.g. after a sweep) and
    /// restart smoothing so stale samples don't bleed through.
    pub fn set_calibration(&mut self, calibration: MagCalibration) {
        self.calibration = calibration;
        self.averager.reset();
    }

    /// Smoothed current heading in degrees [0, 360)
    pub fn heading(&self) -> u16 {
        self.heading
    }

    pub fn preset_target(&self) -> u16 {
        self.preset.target()
    }

    pub fn preset_command(&self) -> PresetCommand {
        self.preset.command()
    }

    pub fn rotator_state(&self) -> State {
        self.rotator.state()
    }

    pub fn sensor_faults(&self) -> u16 {
        self.sensor_faults
    }

    pub fn console(&self) -> &Console<W> {
        &self.console
    }

    /// Advance one control tick with the current debounced key sample
    pub fn on_tick(&mut self, keys: KeyState) {
        self.handle_keys(keys);

        if self.rotator.tick() {
            // emergency stop: drop the preset target along with everything else
            self.preset.cancel(self.heading);
        }

        self.preset.tick();
        self.drive_preset();
        self.display.tick();
    }

    /// Map the five-button panel onto rotator and preset commands
    fn handle_keys(&mut self, keys: KeyState) {
        let stop_held = keys.is_held(KEY_STOP);

        if keys.is_held(KEY_CCW) && !stop_held && !self.rotator.is_busy() {
            self.rotator.set_command(Command::TurnCcw);
            self.manual_turn = Command::TurnCcw;
        }
        if self.manual_turn == Command::TurnCcw && !keys.is_held(KEY_CCW) {
            self.rotator.set_command(Command::Stop);
            self.manual_turn = Command::None;
        }

        if keys.is_held(KEY_CW) && !stop_held && !self.rotator.is_busy() {
            self.rotator.set_command(Command::TurnCw);
            self.manual_turn = Command::TurnCw;
        }
        if self.manual_turn == Command::TurnCw && !keys.is_held(KEY_CW) {
            self.rotator.set_command(Command::Stop);
            self.manual_turn = Command::None;
        }

        if stop_held {
            self.rotator.set_command(Command::FastStop);
            self.manual_turn = Command::None;
        }

        if keys.is_held(KEY_PRESET_CCW) {
            self.preset.set_command(PresetCommand::TurnCcw);
        }
        if self.preset.command() == PresetCommand::TurnCcw && !keys.is_held(KEY_PRESET_CCW) {
            self.preset.set_command(PresetCommand::Stop);
        }

        if keys.is_held(KEY_PRESET_CW) {
            self.preset.set_command(PresetCommand::TurnCw);
        }
        if self.preset.command() == PresetCommand::TurnCw && !keys.is_held(KEY_PRESET_CW) {
            self.preset.set_command(PresetCommand::Stop);
        }
    }

    /// Turn the rotator toward an engaged preset target
    fn drive_preset(&mut self) {
        match self.preset.command() {
            PresetCommand::Stop => {
                // nudging has ended; seek the target if it is elsewhere
                match direction_to(self.heading, self.preset.target()) {
                    Command::None => self.preset.set_command(PresetCommand::None),
                    direction => self.preset.engage(direction),
                }
            }
            PresetCommand::Execute => {
                let direction = direction_to(self.heading, self.preset.target());
                if direction != self.preset.seek_direction() {
                    // on target, or overshot past it: bring the rotator
                    // to a halt and disengage
                    self.rotator.set_command(Command::Stop);
                    self.preset.set_command(PresetCommand::None);
                } else if !self.rotator.is_busy() {
                    self.rotator.set_command(direction);
                }
            }
            _ => {}
        }
    }

    /// Drain the sensor byte stream and run completed sentences through
    /// the heading pipeline. `WouldBlock` means the stream is empty for
    /// this pass; a receive error abandons the sentence in progress.
    pub fn feed_serial<S: Read<u8>>(&mut self, serial: &mut S) {
        loop {
            match serial.read() {
                Ok(byte) => {
                    if let Some(sentence) = self.decoder.feed(byte) {
                        self.handle_sentence(sentence);
                    }
                }
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(_)) => self.decoder.reset(),
            }
        }
    }

    fn handle_sentence(&mut self, sentence: Sentence) {
        match sentence {
            Sentence::Ok => {
                if !self.sensor_healthy {
                    self.sensor_healthy = true;
                    self.console.sensor_recovered();
                }
            }
            Sentence::Err => {
                self.sensor_healthy = false;
                self.sensor_faults = self.sensor_faults.saturating_add(1);
                self.console.sensor_fault(self.sensor_faults);
            }
            Sentence::Raw(sample) => {
                let acc = Vector3::from(sample.acc);
                let mag = self.calibration.apply(Vector3::from(sample.mag));
                if let Some(heading) = self.estimator.estimate(acc, mag) {
                    self.heading = self.averager.push(heading);
                }
            }
        }
    }

    /// Push heading and preset target to the display (writes only on change)
    pub fn update_display(&mut self) {
        self.display.update(self.heading, self.preset.target());
    }

    /// Report rotator state transitions on the operator console
    pub fn poll_status(&mut self) {
        let state = self.rotator.state();
        if state != self.reported_state {
            self.reported_state = state;
            self.console.state_change(state);
        }
    }
}

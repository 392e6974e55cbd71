//! The rotator control state machine
//!
//! A turn is not a single relay action: power must come up before the
//! brake releases, the brake must be off before a direction contactor
//! closes, and the teardown runs the same steps in reverse. Each relay
//! switch arms a settle countdown during which the machine holds still,
//! so a command arriving mid-sequence is picked up at the next quiet
//! tick. The effective transition is
//! `(command, state) -> (state', relay action, settle delay)`.
//!
//! Transition diagram for `TurnCw` (CCW is symmetric):
//!
//! ```text
//! Idle -> ReleaseBrake -> RotorRampup -> TurningCw
//!          power_on        brake_release   rotate_cw
//! ```
//!
//! and for `Stop` out of any point of that sequence:
//!
//! ```text
//! {ReleaseBrake, TurningCw, TurningCcw} -> LockBrake      rotate_off
//! {RotorRampup, LockBrake}             -> RotorRampdown   brake_lock
//! RotorRampdown                        -> Idle            power_off
//! ```

use crate::config::{SETTLE_LONG_TICKS, SETTLE_SHORT_TICKS};
use crate::hal::RelayBank;

use super::{Command, State};

pub struct Rotator<R: RelayBank> {
    relays: R,
    state: State,
    command: Command,
    busy: bool,
    busy_counter: u8,
}

impl<R: RelayBank> Rotator<R> {
    pub fn new(relays: R) -> Self {
        Self {
            relays,
            state: State::Idle,
            command: Command::None,
            busy: false,
            busy_counter: 0,
        }
    }

    /// Replace the pending command (last write wins, no queue)
    pub fn set_command(&mut self, command: Command) {
        self.command = command;
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// True from the first tick of a sequence until the rotator has come
    /// to a complete stop. The button layer must not start a new turn
    /// while this holds.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Advance one control tick.
    ///
    /// Returns true when an emergency stop was executed this tick; the
    /// owner must then discard any pending preset target.
    pub fn tick(&mut self) -> bool {
        // An emergency stop bypasses the settle countdown: relays are cut
        // directly instead of sequenced.
        if self.command == Command::FastStop {
            return self.fast_stop();
        }

        if self.busy_counter > 0 {
            self.busy_counter -= 1;
            return false;
        }

        match self.command {
            Command::Stop => self.exec_stop(),
            Command::TurnCw => self.exec_turn(Command::TurnCw),
            Command::TurnCcw => self.exec_turn(Command::TurnCcw),
            Command::None | Command::FastStop => {}
        }
        false
    }

    fn fast_stop(&mut self) -> bool {
        self.command = Command::None;
        self.busy = false;
        self.busy_counter = 0;

        // From Idle everything is already off; skip the relay writes so
        // repeated stops stay silent on the bus.
        if self.state != State::Idle {
            self.relays.rotate_off();
            self.relays.brake_lock();
            self.relays.power_off();
            self.state = State::Idle;
        }
        true
    }

    fn exec_stop(&mut self) {
        self.busy = true;

        match self.state {
            State::ReleaseBrake | State::TurningCw | State::TurningCcw => {
                self.relays.rotate_off();
                self.busy_counter = SETTLE_SHORT_TICKS;
                self.state = State::LockBrake;
            }
            State::RotorRampup | State::LockBrake => {
                self.relays.brake_lock();
                self.busy_counter = SETTLE_SHORT_TICKS;
                self.state = State::RotorRampdown;
            }
            State::RotorRampdown => {
                self.relays.power_off();
                self.busy_counter = SETTLE_LONG_TICKS;
                self.state = State::Idle;
            }
            State::Idle => {
                self.command = Command::None;
                self.busy = false;
            }
        }
    }

    fn exec_turn(&mut self, direction: Command) {
        self.busy = true;

        let turning = if direction == Command::TurnCw {
            State::TurningCw
        } else {
            State::TurningCcw
        };

        match self.state {
            State::Idle => {
                self.relays.power_on();
                self.busy_counter = SETTLE_LONG_TICKS;
                self.state = State::ReleaseBrake;
            }
            State::ReleaseBrake => {
                self.relays.brake_release();
                self.busy_counter = SETTLE_SHORT_TICKS;
                self.state = State::RotorRampup;
            }
            State::RotorRampup => {
                if direction == Command::TurnCw {
                    self.relays.rotate_cw();
                } else {
                    self.relays.rotate_ccw();
                }
                self.busy_counter = SETTLE_SHORT_TICKS;
                self.state = turning;
            }
            s if s == turning => {
                // steady state reached, nothing left to switch
                self.command = Command::None;
            }
            _ => {}
        }
    }
}

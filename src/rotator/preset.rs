//! Preset target steering
//!
//! The operator dials a target heading with the two preset buttons; the
//! longer a button is held, the faster the target advances. Once the
//! button is released the controller turns the rotator toward the target
//! through the same command mailbox the manual buttons use.

use crate::config::{
    LIMIT_ANGLE, MAX_ANGLE, MIN_ANGLE, PRESET_ACCEL_TICKS, PRESET_INTERVAL_MAX,
    PRESET_INTERVAL_MIN,
};

use super::Command;

/// Commands to the preset controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetCommand {
    None,
    /// Nudge the target clockwise, one degree per step interval
    TurnCw,
    /// Nudge the target counter-clockwise
    TurnCcw,
    /// Button released: reset the step timing
    Stop,
    /// Actively steering the rotator toward the target
    Execute,
}

/*
struct PresetProfile {
    // per-site overrides, once these stop being compile-time constants
    interval_max: u8,
    interval_min: u8,
    accel_ticks: u16,
}
*/

pub struct Preset {
    command: PresetCommand,
    target: u16,
    /// Current step interval in ticks; shrinks while a button stays held
    interval: u8,
    countdown: u8,
    duration: u16,
    /// Direction the rotator was sent in when `Execute` began
    seek: Command,
}

impl Preset {
    pub fn new(target: u16) -> Self {
        Self {
            command: PresetCommand::None,
            target: target % 360,
            interval: PRESET_INTERVAL_MAX,
            countdown: 0,
            duration: 0,
            seek: Command::None,
        }
    }

    pub fn set_command(&mut self, command: PresetCommand) {
        self.command = command;
    }

    pub fn command(&self) -> PresetCommand {
        self.command
    }

    pub fn target(&self) -> u16 {
        self.target
    }

    /// Step interval currently in effect (exposed for the display layer)
    pub fn interval(&self) -> u8 {
        self.interval
    }

    /// Begin steering the rotator in `direction`
    pub fn engage(&mut self, direction: Command) {
        self.command = PresetCommand::Execute;
        self.seek = direction;
    }

    pub fn seek_direction(&self) -> Command {
        self.seek
    }

    /// Drop the target (emergency stop): snap it to the current heading
    /// so the rotator has nowhere left to go.
    pub fn cancel(&mut self, current: u16) {
        self.target = current % 360;
        self.countdown = 0;
        self.command = PresetCommand::None;
        self.seek = Command::None;
    }

    /// Advance one control tick
    pub fn tick(&mut self) {
        match self.command {
            PresetCommand::None | PresetCommand::Execute => return,
            PresetCommand::Stop => {
                self.countdown = 0;
                self.duration = 0;
                self.interval = PRESET_INTERVAL_MAX;
                return;
            }
            PresetCommand::TurnCw | PresetCommand::TurnCcw => {}
        }

        // the longer the button is held, the faster the target moves
        if self.duration > PRESET_ACCEL_TICKS {
            self.duration = 0;
            if self.interval > PRESET_INTERVAL_MIN {
                self.interval /= 2;
            }
        }
        self.duration += 1;

        if self.countdown > 0 {
            self.countdown -= 1;
            return;
        }

        match self.command {
            PresetCommand::TurnCw => {
                self.target = if self.target >= MAX_ANGLE {
                    MIN_ANGLE
                } else {
                    self.target + 1
                };
            }
            PresetCommand::TurnCcw => {
                self.target = if self.target <= MIN_ANGLE {
                    MAX_ANGLE
                } else {
                    self.target - 1
                };
            }
            _ => {}
        }

        self.countdown = self.interval;
    }
}

/// Which way to turn from `current` to reach `target` without crossing
/// the mechanical stop at `LIMIT_ANGLE`.
///
/// Both headings are rotated so the stop sits at 0 degrees; in that frame
/// the stop cannot lie between them, so a plain comparison picks the
/// direction. Returns `Command::None` when already on target.
///
/// Only valid for rotators with a total range of at most 360 degrees.
pub fn direction_to(current: u16, target: u16) -> Command {
    let rotation = (360 - LIMIT_ANGLE) % 360;
    let current = (current + rotation) % 360;
    let target = (target + rotation) % 360;

    if target < current {
        Command::TurnCcw
    } else if target > current {
        Command::TurnCw
    } else {
        Command::None
    }
}

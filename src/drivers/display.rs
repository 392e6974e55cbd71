//! Heading/preset display updates
//!
//! The display sits on a shared bus, so writes are rationed: a value is
//! only transmitted when it changed. A failed transaction marks the bus
//! for re-initialization, which happens right before the next write; the
//! value itself is retried then. Once heading and preset agree, the
//! preset half blanks after a short countdown so the operator is not
//! left staring at two copies of the same number.

use crate::config::PRESET_BLANK_TICKS;
use crate::hal::HeadingDisplay;

pub struct DisplayUpdater<D: HeadingDisplay> {
    bus: D,
    last_heading: Option<i16>,
    last_target: Option<i16>,
    needs_reinit: bool,
    blank_countdown: u16,
    right_blanked: bool,
}

impl<D: HeadingDisplay> DisplayUpdater<D> {
    pub fn new(bus: D) -> Self {
        Self {
            bus,
            last_heading: None,
            last_target: None,
            needs_reinit: false,
            blank_countdown: 0,
            right_blanked: false,
        }
    }

    /// Show a raw 6-digit pattern (startup banner)
    pub fn show_banner(&mut self, pattern: &[u8; 6]) {
        let ok = self.bus.write_raw(pattern).is_ok();
        self.needs_reinit = !ok;
    }

    /// Advance the blanking countdown; called once per control tick
    pub fn tick(&mut self) {
        if self.blank_countdown > 0 {
            self.blank_countdown -= 1;
        }
    }

    /// Push current heading and preset target to the display, writing
    /// only what changed since the last call.
    pub fn update(&mut self, heading: u16, target: u16) {
        let heading = heading as i16;
        let target = target as i16;

        if self.last_heading != Some(heading) {
            self.write(|bus| bus.write_left(heading));
            self.last_heading = Some(heading);
        }

        if self.last_target != Some(target) {
            self.write(|bus| bus.write_right(target));
            self.last_target = Some(target);
            self.right_blanked = false;
            if heading == target {
                self.blank_countdown = PRESET_BLANK_TICKS;
            }
        }

        if heading == target && self.blank_countdown == 0 && !self.right_blanked {
            self.write(|bus| bus.blank_right());
            self.right_blanked = true;
        }
    }

    fn write<F>(&mut self, op: F)
    where
        F: FnOnce(&mut D) -> Result<(), D::Error>,
    {
        if self.needs_reinit && self.bus.reinit().is_ok() {
            self.needs_reinit = false;
        }
        if op(&mut self.bus).is_err() {
            self.needs_reinit = true;
        }
    }
}

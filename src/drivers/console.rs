//! Operator console output
//!
//! Short status records over the command/debug UART. A lost line must
//! never disturb control, so write errors are swallowed.

use ufmt::{uwrite, uWrite};

use crate::rotator::State;

pub struct Console<W: uWrite> {
    out: W,
}

impl<W: uWrite> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn state_change(&mut self, state: State) {
        self.out.write_str("ROT ").ok();
        self.out.write_str(state.name()).ok();
        self.out.write_str("\r\n").ok();
    }

    pub fn sensor_fault(&mut self, count: u16) {
        uwrite!(self.out, "SNS ERR {}\r\n", count).ok();
    }

    pub fn sensor_recovered(&mut self) {
        self.out.write_str("SNS OK\r\n").ok();
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

//! Shared test doubles for the controller-level suites

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rotorctl::{HeadingDisplay, RelayBank};

/// Records every relay operation in order; clone the handle before
/// handing the bank to the controller to inspect it afterwards.
#[derive(Default, Clone)]
pub struct RelayLog {
    pub ops: Rc<RefCell<Vec<&'static str>>>,
}

impl RelayLog {
    fn log(&mut self, op: &'static str) {
        self.ops.borrow_mut().push(op);
    }
}

impl RelayBank for RelayLog {
    fn power_on(&mut self) {
        self.log("power_on");
    }
    fn power_off(&mut self) {
        self.log("power_off");
    }
    fn brake_lock(&mut self) {
        self.log("brake_lock");
    }
    fn brake_release(&mut self) {
        self.log("brake_release");
    }
    fn rotate_cw(&mut self) {
        self.log("rotate_cw");
    }
    fn rotate_ccw(&mut self) {
        self.log("rotate_ccw");
    }
    fn rotate_off(&mut self) {
        self.log("rotate_off");
    }
}

/// Display that accepts everything
#[derive(Default)]
pub struct NullDisplay;

impl HeadingDisplay for NullDisplay {
    type Error = ();

    fn write_left(&mut self, _value: i16) -> Result<(), ()> {
        Ok(())
    }
    fn write_right(&mut self, _value: i16) -> Result<(), ()> {
        Ok(())
    }
    fn write_raw(&mut self, _digits: &[u8; 6]) -> Result<(), ()> {
        Ok(())
    }
    fn blank_right(&mut self) -> Result<(), ()> {
        Ok(())
    }
    fn reinit(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

/// Console sink capturing output as a string
#[derive(Default)]
pub struct Sink(pub String);

impl ufmt::uWrite for Sink {
    type Error = core::convert::Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.push_str(s);
        Ok(())
    }
}

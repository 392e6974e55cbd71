//! Capability traits at the hardware boundary
//!
//! The controller core never touches registers. Relays, the segmented
//! display and the debounced keypad are reached through the traits and
//! types below; the serial byte stream comes in through
//! `embedded_hal::serial::Read<u8>`.

/// Emergency stop button
pub const KEY_STOP: u8 = 1 << 0;
/// Manual clockwise button
pub const KEY_CW: u8 = 1 << 1;
/// Manual counter-clockwise button
pub const KEY_CCW: u8 = 1 << 2;
/// Preset target clockwise button
pub const KEY_PRESET_CW: u8 = 1 << 3;
/// Preset target counter-clockwise button
pub const KEY_PRESET_CCW: u8 = 1 << 4;

/// Debounced keypad sample, one bit per button, captured once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    held: u8,
}

impl KeyState {
    pub const fn new(held: u8) -> Self {
        Self { held }
    }

    pub const fn is_held(&self, mask: u8) -> bool {
        self.held & mask != 0
    }
}

/// The four-relay actuation bank: rotor power, brake, and the two
/// direction contactors. All operations are idempotent.
pub trait RelayBank {
    fn power_on(&mut self);
    fn power_off(&mut self);
    fn brake_lock(&mut self);
    fn brake_release(&mut self);
    fn rotate_cw(&mut self);
    fn rotate_ccw(&mut self);
    fn rotate_off(&mut self);
}

/// Six-digit segmented display, split into a left (current heading) and a
/// right (preset target) half. `reinit` re-initializes the underlying bus
/// after a failed transaction.
pub trait HeadingDisplay {
    type Error;

    fn write_left(&mut self, value: i16) -> Result<(), Self::Error>;
    fn write_right(&mut self, value: i16) -> Result<(), Self::Error>;
    fn write_raw(&mut self, digits: &[u8; 6]) -> Result<(), Self::Error>;
    fn blank_right(&mut self) -> Result<(), Self::Error>;
    fn reinit(&mut self) -> Result<(), Self::Error>;
}

//! Configuration constants for the rotator controller

/// Control tick period in milliseconds
pub const TICK_MS: u16 = 10;

/// Sensor link baud rate
pub const SENSOR_BAUD: u32 = 9600;

/// Smallest representable heading in degrees
pub const MIN_ANGLE: u16 = 0;

/// Largest representable heading in degrees
pub const MAX_ANGLE: u16 = 359;

/// Azimuth of the mechanical stop the rotator cannot cross
pub const LIMIT_ANGLE: u16 = 270;

/// Settle delay in ticks after a relay switch
pub const SETTLE_SHORT_TICKS: u8 = 5;

/// Settle delay in ticks around rotor power switching
pub const SETTLE_LONG_TICKS: u8 = 10;

/// Slowest preset step interval in ticks (one degree per interval)
pub const PRESET_INTERVAL_MAX: u8 = 32;

/// Fastest preset step interval in ticks
pub const PRESET_INTERVAL_MIN: u8 = 4;

/// Ticks of sustained preset hold between interval halvings
pub const PRESET_ACCEL_TICKS: u16 = 200;

/// Default heading averager window size (samples)
pub const HEADING_WINDOW: usize = 10;

/// Ticks before the preset display blanks once target and heading agree (~5 s)
pub const PRESET_BLANK_TICKS: u16 = 500;

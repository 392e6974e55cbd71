//! Tilt-compensated compass heading
//!
//! The sensor head is not mounted level, so the magnetic vector alone is
//! not enough: the gravity vector from the accelerometer defines "down",
//! and the heading is taken in the plane perpendicular to it.

use core::f32::consts::PI;

use libm::{atan2f, roundf};

use crate::math::Vector3;

/// Mounting orientation of the sensor head: X to the right, Y backward,
/// Z down.
const FACING: Vector3 = Vector3::new(0.0, -1.0, 0.0);

/// Produces headings in degrees [0, 360) from calibrated gravity and
/// magnetic vectors, holding the last good value across degenerate
/// samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingEstimator {
    last: u16,
}

impl HeadingEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the heading for one sample.
    ///
    /// East is the cross product of the magnetic vector (north plus
    /// inclination) with down; north is down crossed with east, parallel
    /// to the ground. The heading is the angle of the facing vector
    /// within that east/north frame.
    ///
    /// Returns `None` when `a` and `m` are (near-)parallel and no frame
    /// exists; the previous heading stays current.
    pub fn estimate(&mut self, a: Vector3, m: Vector3) -> Option<u16> {
        let east = m.cross(&a).normalized().ok()?;
        let north = a.cross(&east).normalized().ok()?;

        let mut heading =
            roundf(atan2f(east.dot(&FACING), north.dot(&FACING)) * 180.0 / PI) as i16;
        if heading < 0 {
            heading += 360;
        }

        self.last = heading as u16;
        Some(self.last)
    }

    /// Most recent successfully computed heading
    pub fn last(&self) -> u16 {
        self.last
    }
}

//! 3D vector primitives for the heading computation

use libm::sqrtf;

/// Magnitudes below this are treated as zero when normalizing
const MIN_MAGNITUDE: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    ZeroMagnitude,
}

/// Floating-point 3D vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Raw sensor sample with signed 16-bit components, as carried on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IVector {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn dot(&self, other: &Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn magnitude(&self) -> f32 {
        sqrtf(self.dot(self))
    }

    /// Scale to unit length. A (near-)zero vector has no direction and is
    /// rejected instead of dividing by zero.
    pub fn normalized(&self) -> Result<Vector3, MathError> {
        let mag = self.magnitude();
        if mag < MIN_MAGNITUDE {
            return Err(MathError::ZeroMagnitude);
        }
        Ok(Vector3 {
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        })
    }
}

impl IVector {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

impl From<IVector> for Vector3 {
    fn from(v: IVector) -> Self {
        Vector3 {
            x: v.x as f32,
            y: v.y as f32,
            z: v.z as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_product_is_orthogonal() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 1.0, 0.0);
        let c = a.cross(&b);
        assert_eq!(c, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(c.dot(&a), 0.0);
        assert_eq!(c.dot(&b), 0.0);
    }

    #[test]
    fn cross_product_anticommutes() {
        let a = Vector3::new(0.3, -1.2, 4.5);
        let b = Vector3::new(-2.0, 0.7, 1.1);
        let ab = a.cross(&b);
        let ba = b.cross(&a);
        assert_eq!(ab.x, -ba.x);
        assert_eq!(ab.y, -ba.y);
        assert_eq!(ab.z, -ba.z);
    }

    #[test]
    fn dot_product() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, -5.0, 6.0);
        assert_eq!(a.dot(&b), 12.0);
    }

    #[test]
    fn normalized_has_unit_length() {
        let v = Vector3::new(3.0, 4.0, 0.0).normalized().unwrap();
        assert!((v.magnitude() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
        assert!((v.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn normalizing_zero_vector_fails() {
        let v = Vector3::default();
        assert_eq!(v.normalized(), Err(MathError::ZeroMagnitude));
    }

    #[test]
    fn ivector_converts_to_float() {
        let v = Vector3::from(IVector::new(768, -704, -16208));
        assert_eq!(v, Vector3::new(768.0, -704.0, -16208.0));
    }
}

//! CIE XYZ Color Space
//!
//! XYZ is one of the two Profile Connection Spaces. Values are relative to a
//! D50 white with Y = 1.0 for the perfect diffuser.

/// D50 white point of the ICC PCS
pub const D50: Xyz = Xyz::new(0.9642, 1.0, 0.8249);

/// Largest XYZ component the 16-bit PCS encoding can hold (1 + 32767/32768)
pub const MAX_ENCODEABLE_XYZ: f64 = 1.0 + 32767.0 / 32768.0;

/// CIE 1931 XYZ color coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xyz {
    /// X tristimulus value
    pub x: f64,
    /// Y tristimulus value (luminance)
    pub y: f64,
    /// Z tristimulus value
    pub z: f64,
}

impl Xyz {
    /// Create a new XYZ color
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create XYZ from an array
    #[inline]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    /// Convert to array
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Clamp every component into the encodeable PCS range
    pub fn clamp_encodeable(&self) -> Self {
        Self {
            x: self.x.clamp(0.0, MAX_ENCODEABLE_XYZ),
            y: self.y.clamp(0.0, MAX_ENCODEABLE_XYZ),
            z: self.z.clamp(0.0, MAX_ENCODEABLE_XYZ),
        }
    }

    /// Check if approximately equal to another XYZ color
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_encodeable() {
        let c = Xyz::new(-0.5, 3.0, 0.5).clamp_encodeable();
        assert_eq!(c.x, 0.0);
        assert_eq!(c.y, MAX_ENCODEABLE_XYZ);
        assert_eq!(c.z, 0.5);
    }

    #[test]
    fn test_array_roundtrip() {
        let xyz = Xyz::from_array([0.1, 0.2, 0.3]);
        assert_eq!(xyz.to_array(), [0.1, 0.2, 0.3]);
    }
}

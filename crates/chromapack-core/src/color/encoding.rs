//! 16-bit PCS encodings
//!
//! - Lab V4: `L * 655.35`, `(a + 128) * 257`
//! - Lab V2 (legacy): `L * 652.8`, `(a + 128) * 256`
//! - XYZ: `v * 32768` (1.15 fixed point)
//!
//! Encoders clamp into the representable range before rounding.

use crate::color::lab::Lab;
use crate::color::xyz::Xyz;
use crate::math::quick_saturate_word;

const MAX_L_V2: f64 = 0xFFFF as f64 * 100.0 / 0xFF00 as f64;
const MAX_AB_V2: f64 = 0xFFFF as f64 / 256.0 - 128.0;

/// Encode a float Lab as ICC v4 16-bit words
pub fn float_to_lab_encoded(lab: Lab) -> [u16; 3] {
    let l = lab.l.clamp(0.0, 100.0);
    let a = lab.a.clamp(-128.0, 127.0);
    let b = lab.b.clamp(-128.0, 127.0);
    [
        quick_saturate_word(l * 655.35),
        quick_saturate_word((a + 128.0) * 257.0),
        quick_saturate_word((b + 128.0) * 257.0),
    ]
}

/// Decode ICC v4 16-bit Lab words
pub fn lab_encoded_to_float(w: [u16; 3]) -> Lab {
    Lab::new(
        w[0] as f64 / 655.35,
        w[1] as f64 / 257.0 - 128.0,
        w[2] as f64 / 257.0 - 128.0,
    )
}

/// Encode a float Lab as legacy v2 16-bit words
pub fn float_to_lab_encoded_v2(lab: Lab) -> [u16; 3] {
    let l = lab.l.clamp(0.0, MAX_L_V2);
    let a = lab.a.clamp(-128.0, MAX_AB_V2);
    let b = lab.b.clamp(-128.0, MAX_AB_V2);
    [
        quick_saturate_word(l * 652.8),
        quick_saturate_word((a + 128.0) * 256.0),
        quick_saturate_word((b + 128.0) * 256.0),
    ]
}

/// Decode legacy v2 16-bit Lab words
pub fn lab_encoded_v2_to_float(w: [u16; 3]) -> Lab {
    Lab::new(
        w[0] as f64 / 652.8,
        w[1] as f64 / 256.0 - 128.0,
        w[2] as f64 / 256.0 - 128.0,
    )
}

/// Encode a float XYZ as 1.15 fixed-point words. Non-positive Y encodes black.
pub fn float_to_xyz_encoded(xyz: Xyz) -> [u16; 3] {
    if xyz.y <= 0.0 {
        return [0; 3];
    }
    let c = xyz.clamp_encodeable();
    [
        quick_saturate_word(c.x * 32768.0),
        quick_saturate_word(c.y * 32768.0),
        quick_saturate_word(c.z * 32768.0),
    ]
}

/// Decode 1.15 fixed-point XYZ words
pub fn xyz_encoded_to_float(w: [u16; 3]) -> Xyz {
    Xyz::new(
        w[0] as f64 / 32768.0,
        w[1] as f64 / 32768.0,
        w[2] as f64 / 32768.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::xyz::MAX_ENCODEABLE_XYZ;

    #[test]
    fn test_lab_v4_endpoints() {
        assert_eq!(
            float_to_lab_encoded(Lab::new(100.0, 0.0, 0.0)),
            [0xFFFF, 0x8080, 0x8080]
        );
        assert_eq!(float_to_lab_encoded(Lab::new(0.0, -128.0, 127.0)), [0, 0, 0xFFFF]);
    }

    #[test]
    fn test_lab_v4_clamps() {
        assert_eq!(
            float_to_lab_encoded(Lab::new(150.0, 300.0, -300.0)),
            [0xFFFF, 0xFFFF, 0]
        );
    }

    #[test]
    fn test_lab_v4_decode() {
        let lab = lab_encoded_to_float([0xFFFF, 0x8080, 0x8080]);
        assert!((lab.l - 100.0).abs() < 1e-9);
        assert!(lab.a.abs() < 1e-9);
        assert!(lab.b.abs() < 1e-9);
    }

    #[test]
    fn test_lab_v2_white() {
        let w = float_to_lab_encoded_v2(Lab::new(100.0, 0.0, 0.0));
        assert_eq!(w, [0xFF00, 0x8000, 0x8000]);
        let lab = lab_encoded_v2_to_float(w);
        assert!((lab.l - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_xyz_encoding() {
        assert_eq!(float_to_xyz_encoded(Xyz::new(1.0, 1.0, 1.0)), [0x8000; 3]);
        assert_eq!(float_to_xyz_encoded(Xyz::new(0.5, 0.0, 0.5)), [0; 3]);
        assert_eq!(float_to_xyz_encoded(Xyz::new(5.0, 5.0, -1.0)), [0xFFFF, 0xFFFF, 0]);
        let xyz = xyz_encoded_to_float([0x8000, 0x4000, 0xFFFF]);
        assert_eq!(xyz.x, 1.0);
        assert_eq!(xyz.y, 0.5);
        assert!((xyz.z - MAX_ENCODEABLE_XYZ).abs() < 1e-12);
    }
}

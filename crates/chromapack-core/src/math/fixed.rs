//! Fixed-point helpers shared by the pixel codecs
//!
//! These conversions are bit-exact with the ICC reference arithmetic: 8-bit
//! values widen by `x * 257`, 16-bit values narrow with rounding, and the
//! 16.16 fixed domain maps `0xFFFF` to exactly `0x10000`.

/// Widen an 8-bit sample to 16 bits (`0xFF` becomes `0xFFFF`)
#[inline]
pub const fn from_8_to_16(b: u8) -> u16 {
    ((b as u16) << 8) | b as u16
}

/// Narrow a 16-bit sample to 8 bits, rounding to nearest
#[inline]
pub const fn from_16_to_8(v: u16) -> u8 {
    (((v as u32) * 65281 + 8_388_608) >> 24) as u8
}

/// Swap the two bytes of a 16-bit word
#[inline]
pub const fn change_endian(v: u16) -> u16 {
    v.swap_bytes()
}

#[inline]
pub const fn reverse_flavor_8(v: u8) -> u8 {
    0xFF - v
}

#[inline]
pub const fn reverse_flavor_16(v: u16) -> u16 {
    0xFFFF - v
}

/// Map a 16-bit value into the 16.16 domain where `0xFFFF` is `1.0`
#[inline]
pub const fn to_fixed_domain(a: u32) -> u32 {
    a + ((a + 0x7FFF) / 0xFFFF)
}

/// Round and clamp a double to the 16-bit range
#[inline]
pub fn quick_saturate_word(d: f64) -> u16 {
    let d = d + 0.5;
    if d <= 0.0 {
        0
    } else if d >= 65535.0 {
        0xFFFF
    } else {
        d as u16
    }
}

/// Legacy V2 Lab word (`0xFF00` = max) to V4 (`0xFFFF` = max)
#[inline]
pub const fn labv2_to_labv4(x: u16) -> u16 {
    let a = (((x as u32) << 8) | x as u32) >> 8;
    if a > 0xFFFF { 0xFFFF } else { a as u16 }
}

/// V4 Lab word back to the legacy V2 range
#[inline]
pub const fn labv4_to_labv2(x: u16) -> u16 {
    let a = (((x as u32) << 8) + 0x80) / 257;
    if a > 0xFFFF { 0xFFFF } else { a as u16 }
}

/// Divide a straight 16-bit value by a fixed-domain alpha, clamping to `0xFFFF`.
/// Zero alpha passes the value through.
#[inline]
pub const fn unpremultiply_16(v: u16, alpha_factor: u32) -> u16 {
    if alpha_factor == 0 {
        return v;
    }
    let r = ((v as u32) << 16) / alpha_factor;
    if r > 0xFFFF { 0xFFFF } else { r as u16 }
}

/// Multiply a 16-bit value by a fixed-domain alpha with rounding
#[inline]
pub const fn premultiply_16(v: u16, alpha_factor: u32) -> u16 {
    (((v as u64) * (alpha_factor as u64) + 0x8000) >> 16) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_8_16_roundtrip_exact() {
        for b in 0..=255u8 {
            assert_eq!(from_16_to_8(from_8_to_16(b)), b);
        }
        assert_eq!(from_8_to_16(0xFF), 0xFFFF);
    }

    #[test]
    fn test_16_8_16_within_one_step() {
        for v in 0..=u16::MAX {
            let back = from_8_to_16(from_16_to_8(v));
            let diff = (back as i32 - v as i32).abs();
            assert!(diff <= 257, "v={v} back={back}");
        }
    }

    #[test]
    fn test_16_to_8_rounds() {
        assert_eq!(from_16_to_8(0x7F80), 0x7F);
        assert_eq!(from_16_to_8(0x8080), 0x80);
        assert_eq!(from_16_to_8(0x0080), 0x00);
        assert_eq!(from_16_to_8(0x0081), 0x01);
    }

    #[test]
    fn test_labv2_v4_roundtrip() {
        for x in 0..=0xFF00u16 {
            let back = labv4_to_labv2(labv2_to_labv4(x));
            assert!((back as i32 - x as i32).abs() <= 1, "x={x} back={back}");
        }
        // Values past the V2 range clamp instead of wrapping
        assert_eq!(labv2_to_labv4(0xFFFF), 0xFFFF);
        assert_eq!(labv4_to_labv2(0xFFFF), 0xFF00);
        assert_eq!(labv2_to_labv4(0xFF00), 0xFFFF);
    }

    #[test]
    fn test_fixed_domain_endpoints() {
        assert_eq!(to_fixed_domain(0), 0);
        assert_eq!(to_fixed_domain(0xFFFF), 0x10000);
    }

    #[test]
    fn test_premultiply_full_alpha_is_identity() {
        let af = to_fixed_domain(0xFFFF);
        for v in [0u16, 1, 0x1234, 0x8000, 0xFFFF] {
            assert_eq!(premultiply_16(v, af), v);
            assert_eq!(unpremultiply_16(v, af), v);
        }
    }

    #[test]
    fn test_unpremultiply_zero_alpha_passes_through() {
        assert_eq!(unpremultiply_16(0x4321, 0), 0x4321);
    }

    #[test]
    fn test_quick_saturate_word() {
        assert_eq!(quick_saturate_word(-3.0), 0);
        assert_eq!(quick_saturate_word(0.49), 0);
        assert_eq!(quick_saturate_word(0.5), 1);
        assert_eq!(quick_saturate_word(70000.0), 0xFFFF);
        assert_eq!(quick_saturate_word(f64::NAN), 0);
    }
}

//! Interpolation functions for table evaluation
//!
//! This module provides:
//! - 16-bit table lookup with 16.16 fixed-point interpolation
//! - Float table lookup over the unit interval

use super::fixed::to_fixed_domain;

/// Evaluate an evenly spaced 16-bit table at a 16-bit input
///
/// The input domain `0..=0xFFFF` spans the whole table; the last entry is
/// returned for `0xFFFF` and for single-entry tables.
pub fn lin_interp_16(table: &[u16], value: u16) -> u16 {
    let Some(&last) = table.last() else {
        return 0;
    };
    let domain = (table.len() - 1) as u32;
    if value == 0xFFFF || domain == 0 {
        return last;
    }

    let val3 = to_fixed_domain(domain * value as u32);
    let cell0 = (val3 >> 16) as usize;
    let rest = (val3 & 0xFFFF) as i64;

    let y0 = table[cell0] as i64;
    let y1 = table[cell0 + 1] as i64;

    let dif = (y1 - y0) * rest + 0x8000;
    (y0 + (dif >> 16)) as u16
}

/// Evaluate an evenly spaced float table over `[0, 1]`
///
/// NaN maps to zero, inputs are clamped to the unit interval.
pub fn lin_interp_f32(table: &[f32], value: f32) -> f32 {
    let Some(&last) = table.last() else {
        return 0.0;
    };
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    if v >= 1.0 || table.len() == 1 {
        return last;
    }

    let pos = v * (table.len() - 1) as f32;
    let cell0 = pos.floor() as usize;
    let rest = pos - cell0 as f32;
    let y0 = table[cell0];
    let y1 = table[(cell0 + 1).min(table.len() - 1)];
    y0 + (y1 - y0) * rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lin_interp_16_identity() {
        let table: Vec<u16> = (0..=256u32).map(|i| (i * 65535 / 256) as u16).collect();
        for v in [0u16, 1, 255, 0x8000, 0xFFFE, 0xFFFF] {
            let out = lin_interp_16(&table, v);
            assert!((out as i32 - v as i32).abs() <= 1, "v={v} out={out}");
        }
    }

    #[test]
    fn test_lin_interp_16_two_points() {
        let table = [1000u16, 2000];
        assert_eq!(lin_interp_16(&table, 0), 1000);
        assert_eq!(lin_interp_16(&table, 0xFFFF), 2000);
        let mid = lin_interp_16(&table, 0x8000);
        assert!((mid as i32 - 1500).abs() <= 1);
    }

    #[test]
    fn test_lin_interp_f32_clamps() {
        let table = [0.0f32, 0.5, 1.0];
        assert_eq!(lin_interp_f32(&table, -1.0), 0.0);
        assert_eq!(lin_interp_f32(&table, 2.0), 1.0);
        assert_eq!(lin_interp_f32(&table, f32::NAN), 0.0);
        assert!((lin_interp_f32(&table, 0.25) - 0.25).abs() < 1e-6);
    }
}

//! Batch conversions between canonical vectors and unit doubles
//!
//! Transforms work on blocks of pixels: the unpacked canonical channels of a
//! block are widened to `f64` in one pass, evaluated, and narrowed back.
//! Every kernel processes `min(src.len(), dst.len())` values.

use multiversion::multiversion;

const WORD_SCALE: f64 = 65535.0;

/// 16-bit canonical words to `[0, 1]`
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn words_to_unit_batch(src: &[u16], dst: &mut [f64]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = s as f64 / WORD_SCALE;
    }
}

/// `[0, 1]` to 16-bit canonical words, rounding and saturating
///
/// NaN maps to 0.
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn unit_to_words_batch(src: &[f64], dst: &mut [u16]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        let v = s * WORD_SCALE + 0.5;
        *d = if v.is_nan() || v <= 0.0 {
            0
        } else if v >= WORD_SCALE {
            0xFFFF
        } else {
            v as u16
        };
    }
}

/// Float canonical values to doubles
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn floats_to_unit_batch(src: &[f32], dst: &mut [f64]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = s as f64;
    }
}

/// Doubles to float canonical values, unclamped
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn unit_to_floats_batch(src: &[f64], dst: &mut [f32]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = s as f32;
    }
}

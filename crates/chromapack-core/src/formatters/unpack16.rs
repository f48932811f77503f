//! Unpackers into the 16-bit canonical vector
//!
//! The generic routines (`unroll_chunky_bytes`, `unroll_any_words`, ...)
//! handle every combination of swap, swap-first, extra channels, flavor,
//! endianness, planar layout and premultiplied alpha. The fixed-layout
//! routines cover the common 1-4 channel cases and must agree with the
//! generic ones bit for bit.

use super::cursor::ReadCursor;
use super::{FloatSample, Layout, WordVec, read_triplet, triplet_step};
use crate::color::{Lab, Xyz, float_to_lab_encoded, float_to_xyz_encoded};
use crate::error::Result;
use crate::format::PixelFormat;
use crate::math::fixed::unpremultiply_16;
use crate::math::{
    change_endian, from_8_to_16, labv2_to_labv4, quick_saturate_word, reverse_flavor_16,
    to_fixed_domain,
};

/// Read `lead` skipped bytes, then one byte per entry of `slots`, then `trail` skipped bytes.
#[inline]
fn unroll_fixed_bytes(
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    lead: usize,
    slots: &[usize],
    trail: usize,
    reverse: bool,
) -> Result<()> {
    let px = cur.take(lead + slots.len() + trail)?;
    for (k, &slot) in slots.iter().enumerate() {
        let v = from_8_to_16(px[lead + k]);
        w[slot] = if reverse { reverse_flavor_16(v) } else { v };
    }
    Ok(())
}

/// Word counterpart of [`unroll_fixed_bytes`]; offsets are in samples.
#[inline]
fn unroll_fixed_words(
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    lead: usize,
    slots: &[usize],
    trail: usize,
    reverse: bool,
) -> Result<()> {
    let px = cur.take(2 * (lead + slots.len() + trail))?;
    for (k, &slot) in slots.iter().enumerate() {
        let at = 2 * (lead + k);
        let v = u16::from_ne_bytes([px[at], px[at + 1]]);
        w[slot] = if reverse { reverse_flavor_16(v) } else { v };
    }
    Ok(())
}

// Generic layouts

fn unroll_bytes(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    let l = Layout::of(format);
    let alpha = if l.premul {
        to_fixed_domain(from_8_to_16(cur.read::<u8>(l.alpha_offset(stride))?) as u32)
    } else {
        0
    };

    for i in 0..l.channels {
        let mut v = from_8_to_16(cur.read::<u8>(l.color_offset(i, stride))?);
        if l.reversed {
            v = reverse_flavor_16(v);
        }
        if l.premul {
            v = unpremultiply_16(v, alpha);
        }
        w[l.slot(i)] = v;
    }

    cur.advance(l.step());
    Ok(())
}

/// Any 8-bit chunky layout
pub fn unroll_chunky_bytes(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_bytes(format, w, cur, stride)
}

/// Any 8-bit planar layout; the cursor advances one byte per pixel
pub fn unroll_planar_bytes(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_bytes(format, w, cur, stride)
}

fn unroll_words(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    let l = Layout::of(format);
    let alpha = if l.premul {
        let a = cur.read::<u16>(l.alpha_offset(stride))?;
        to_fixed_domain(if l.endian { change_endian(a) } else { a } as u32)
    } else {
        0
    };

    for i in 0..l.channels {
        let mut v = cur.read::<u16>(l.color_offset(i, stride))?;
        if l.endian {
            v = change_endian(v);
        }
        if l.reversed {
            v = reverse_flavor_16(v);
        }
        if l.premul {
            v = unpremultiply_16(v, alpha);
        }
        w[l.slot(i)] = v;
    }

    cur.advance(l.step());
    Ok(())
}

/// Any 16-bit chunky layout, premultiplied alpha included
pub fn unroll_any_words(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_words(format, w, cur, stride)
}

/// Any 16-bit planar layout, premultiplied alpha included
pub fn unroll_planar_words(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_words(format, w, cur, stride)
}

// Floating point sources

/// Float samples scaled into 16 bits. Ink spaces are percentages.
pub(crate) fn unroll_samples_to_16<T: FloatSample>(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    let l = Layout::of(format);
    let maximum = if format.is_ink_space() { 655.35 } else { 65535.0 };

    for i in 0..l.channels {
        let v = cur.read::<T>(l.color_offset(i, stride))?.to_f64();
        let mut v = quick_saturate_word(v * maximum);
        if l.reversed {
            v = reverse_flavor_16(v);
        }
        w[l.slot(i)] = v;
    }

    cur.advance(l.step());
    Ok(())
}

pub fn unroll_double_to_16(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_samples_to_16::<f64>(format, w, cur, stride)
}

pub fn unroll_float_to_16(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_samples_to_16::<f32>(format, w, cur, stride)
}

/// Single gray double, replicated into the first three slots
pub fn unroll_double_1_chan(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    let v = quick_saturate_word(cur.read::<f64>(0)? * 65535.0);
    w[..3].fill(v);
    cur.advance(size_of::<f64>());
    Ok(())
}

fn unroll_lab_to_16<T: FloatSample>(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    let lab = Lab::from_array(read_triplet::<T>(format, cur, stride)?);
    w[..3].copy_from_slice(&float_to_lab_encoded(lab));
    cur.advance(triplet_step::<T>(format));
    Ok(())
}

fn unroll_xyz_to_16<T: FloatSample>(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    let xyz = Xyz::from_array(read_triplet::<T>(format, cur, stride)?);
    w[..3].copy_from_slice(&float_to_xyz_encoded(xyz));
    cur.advance(triplet_step::<T>(format));
    Ok(())
}

pub fn unroll_lab_double_to_16(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_lab_to_16::<f64>(format, w, cur, stride)
}

pub fn unroll_lab_float_to_16(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_lab_to_16::<f32>(format, w, cur, stride)
}

pub fn unroll_xyz_double_to_16(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_xyz_to_16::<f64>(format, w, cur, stride)
}

pub fn unroll_xyz_float_to_16(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_xyz_to_16::<f32>(format, w, cur, stride)
}

// Legacy V2 Lab

pub fn unroll_labv2_8(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    let px = cur.take(3)?;
    for (slot, &b) in w.iter_mut().zip(px) {
        *slot = labv2_to_labv4(from_8_to_16(b));
    }
    Ok(())
}

/// V2 Lab with a leading alpha byte
pub fn unroll_alabv2_8(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    let px = cur.take(4)?;
    for (slot, &b) in w.iter_mut().zip(&px[1..]) {
        *slot = labv2_to_labv4(from_8_to_16(b));
    }
    Ok(())
}

pub fn unroll_labv2_16(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    let px = cur.take(6)?;
    for (slot, pair) in w.iter_mut().zip(px.chunks_exact(2)) {
        *slot = labv2_to_labv4(u16::from_ne_bytes([pair[0], pair[1]]));
    }
    Ok(())
}

// Fixed 8-bit layouts

pub fn unroll_1_byte(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[0], 0, false)?;
    w[1] = w[0];
    w[2] = w[0];
    Ok(())
}

pub fn unroll_1_byte_skip1(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[0], 1, false)?;
    w[1] = w[0];
    w[2] = w[0];
    Ok(())
}

pub fn unroll_1_byte_skip2(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[0], 2, false)?;
    w[1] = w[0];
    w[2] = w[0];
    Ok(())
}

pub fn unroll_1_byte_reversed(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[0], 0, true)?;
    w[1] = w[0];
    w[2] = w[0];
    Ok(())
}

pub fn unroll_2_bytes(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[0, 1], 0, false)
}

pub fn unroll_3_bytes(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[0, 1, 2], 0, false)
}

/// BGR
pub fn unroll_3_bytes_swap(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[2, 1, 0], 0, false)
}

/// ABGR
pub fn unroll_3_bytes_skip1_swap(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 1, &[2, 1, 0], 0, false)
}

/// ARGB
pub fn unroll_3_bytes_skip1_swap_first(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 1, &[0, 1, 2], 0, false)
}

/// BGRA
pub fn unroll_3_bytes_skip1_swap_swap_first(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[2, 1, 0], 1, false)
}

pub fn unroll_4_bytes(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[0, 1, 2, 3], 0, false)
}

pub fn unroll_4_bytes_reverse(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[0, 1, 2, 3], 0, true)
}

/// KCMY
pub fn unroll_4_bytes_swap_first(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[3, 0, 1, 2], 0, false)
}

/// KYMC
pub fn unroll_4_bytes_swap(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[3, 2, 1, 0], 0, false)
}

/// YMCK
pub fn unroll_4_bytes_swap_swap_first(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_bytes(w, cur, 0, &[2, 1, 0, 3], 0, false)
}

// Fixed 16-bit layouts

pub fn unroll_1_word(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 0, &[0], 0, false)?;
    w[1] = w[0];
    w[2] = w[0];
    Ok(())
}

pub fn unroll_1_word_reversed(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 0, &[0], 0, true)?;
    w[1] = w[0];
    w[2] = w[0];
    Ok(())
}

pub fn unroll_1_word_skip3(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 0, &[0], 3, false)?;
    w[1] = w[0];
    w[2] = w[0];
    Ok(())
}

pub fn unroll_2_words(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 0, &[0, 1], 0, false)
}

pub fn unroll_3_words(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 0, &[0, 1, 2], 0, false)
}

pub fn unroll_3_words_swap(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 0, &[2, 1, 0], 0, false)
}

pub fn unroll_3_words_skip1_swap(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 1, &[2, 1, 0], 0, false)
}

pub fn unroll_3_words_skip1_swap_first(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 1, &[0, 1, 2], 0, false)
}

pub fn unroll_4_words(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 0, &[0, 1, 2, 3], 0, false)
}

pub fn unroll_4_words_reverse(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 0, &[0, 1, 2, 3], 0, true)
}

pub fn unroll_4_words_swap_first(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 0, &[3, 0, 1, 2], 0, false)
}

pub fn unroll_4_words_swap(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 0, &[3, 2, 1, 0], 0, false)
}

pub fn unroll_4_words_swap_swap_first(
    _format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    _stride: usize,
) -> Result<()> {
    unroll_fixed_words(w, cur, 0, &[2, 1, 0, 3], 0, false)
}

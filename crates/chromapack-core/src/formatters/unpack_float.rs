//! Unpackers into the float canonical vector
//!
//! Float vectors are normalized to 0..1. Ink spaces (CMY, CMYK, MCH5 and up)
//! store percentages in float formats, so their samples are divided by 100.

use super::cursor::ReadCursor;
use super::{FloatSample, FloatVec, Layout, WordVec, read_triplet, triplet_step};
use crate::color::{Lab, MAX_ENCODEABLE_XYZ, lab_encoded_to_float};
use crate::error::Result;
use crate::format::PixelFormat;
use crate::math::change_endian;

/// Normalize a float Lab into the canonical 0..1 range
#[inline]
pub(crate) fn lab_to_unit(lab: Lab) -> [f32; 3] {
    [
        (lab.l / 100.0) as f32,
        ((lab.a + 128.0) / 255.0) as f32,
        ((lab.b + 128.0) / 255.0) as f32,
    ]
}

/// Float samples in any layout. Premultiplied colors are divided by alpha.
pub(crate) fn unroll_samples_to_float<T: FloatSample>(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    let l = Layout::of(format);
    let maximum = if format.is_ink_space() { 100.0 } else { 1.0 };
    let alpha_factor = if l.premul {
        cur.read::<T>(l.alpha_offset(stride))?.to_f64() / maximum
    } else {
        0.0
    };

    for i in 0..l.channels {
        let mut v = cur.read::<T>(l.color_offset(i, stride))?.to_f64();
        if alpha_factor > 0.0 {
            v /= alpha_factor;
        }
        v /= maximum;
        if l.reversed {
            v = 1.0 - v;
        }
        w[l.slot(i)] = v as f32;
    }

    cur.advance(l.step());
    Ok(())
}

pub fn unroll_floats_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_samples_to_float::<f32>(format, w, cur, stride)
}

pub fn unroll_doubles_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_samples_to_float::<f64>(format, w, cur, stride)
}

/// 8-bit integers scaled to 0..1
pub fn unroll_8_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    let l = Layout::of(format);
    for i in 0..l.channels {
        let mut v = cur.read::<u8>(l.color_offset(i, stride))? as f32 / 255.0;
        if l.reversed {
            v = 1.0 - v;
        }
        w[l.slot(i)] = v;
    }
    cur.advance(l.step());
    Ok(())
}

/// 16-bit integers scaled to 0..1
pub fn unroll_16_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    let l = Layout::of(format);
    for i in 0..l.channels {
        let mut raw = cur.read::<u16>(l.color_offset(i, stride))?;
        if l.endian {
            raw = change_endian(raw);
        }
        let mut v = raw as f32 / 65535.0;
        if l.reversed {
            v = 1.0 - v;
        }
        w[l.slot(i)] = v;
    }
    cur.advance(l.step());
    Ok(())
}

fn unroll_lab_to_float<T: FloatSample>(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    let lab = Lab::from_array(read_triplet::<T>(format, cur, stride)?);
    w[..3].copy_from_slice(&lab_to_unit(lab));
    cur.advance(triplet_step::<T>(format));
    Ok(())
}

fn unroll_xyz_to_float<T: FloatSample>(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    let xyz = read_triplet::<T>(format, cur, stride)?;
    for (slot, v) in w.iter_mut().zip(xyz) {
        *slot = (v / MAX_ENCODEABLE_XYZ) as f32;
    }
    cur.advance(triplet_step::<T>(format));
    Ok(())
}

pub fn unroll_lab_double_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_lab_to_float::<f64>(format, w, cur, stride)
}

pub fn unroll_lab_float_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_lab_to_float::<f32>(format, w, cur, stride)
}

pub fn unroll_xyz_double_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_xyz_to_float::<f64>(format, w, cur, stride)
}

pub fn unroll_xyz_float_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unroll_xyz_to_float::<f32>(format, w, cur, stride)
}

/// Run a 16-bit V2 Lab unpacker and normalize its v4 result
fn labv2_via_words(
    unpack: super::Unpack16Fn,
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    let mut words: WordVec = [0; super::MAX_CHANNELS];
    unpack(format, &mut words, cur, stride)?;
    let lab = lab_encoded_to_float([words[0], words[1], words[2]]);
    w[..3].copy_from_slice(&lab_to_unit(lab));
    Ok(())
}

pub fn unroll_labv2_8_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    labv2_via_words(super::unroll_labv2_8, format, w, cur, stride)
}

pub fn unroll_alabv2_8_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    labv2_via_words(super::unroll_alabv2_8, format, w, cur, stride)
}

pub fn unroll_labv2_16_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    labv2_via_words(super::unroll_labv2_16, format, w, cur, stride)
}

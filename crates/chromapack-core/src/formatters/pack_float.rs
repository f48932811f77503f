//! Packers from the float canonical vector

use super::cursor::WriteCursor;
use super::{FloatSample, FloatVec, Layout, triplet_step, write_triplet};
use crate::color::{Lab, MAX_ENCODEABLE_XYZ, float_to_lab_encoded, float_to_lab_encoded_v2};
use crate::error::Result;
use crate::format::PixelFormat;
use crate::math::{from_16_to_8, quick_saturate_word};

/// Expand a canonical 0..1 Lab back to `L`, `a`, `b`
#[inline]
pub(crate) fn unit_to_lab(w: &FloatVec) -> Lab {
    Lab::new(
        w[0] as f64 * 100.0,
        w[1] as f64 * 255.0 - 128.0,
        w[2] as f64 * 255.0 - 128.0,
    )
}

/// Float samples in any layout. Ink spaces are written as percentages.
pub(crate) fn pack_samples_from_float<T: FloatSample>(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    let l = Layout::of(format);
    let maximum = if format.is_ink_space() { 100.0 } else { 1.0 };

    for i in 0..l.channels {
        let mut v = w[l.slot(i)] as f64 * maximum;
        if l.reversed {
            v = maximum - v;
        }
        cur.write(l.color_offset(i, stride), T::from_f64(v))?;
    }

    cur.advance(l.step());
    Ok(())
}

pub fn pack_floats_from_float(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_samples_from_float::<f32>(format, w, cur, stride)
}

pub fn pack_doubles_from_float(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_samples_from_float::<f64>(format, w, cur, stride)
}

/// Saturated 16-bit integers
pub fn pack_words_from_float(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    let l = Layout::of(format);
    for i in 0..l.channels {
        let mut v = w[l.slot(i)] as f64 * 65535.0;
        if l.reversed {
            v = 65535.0 - v;
        }
        cur.write(l.color_offset(i, stride), quick_saturate_word(v))?;
    }
    cur.advance(l.step());
    Ok(())
}

/// Saturated 8-bit integers, rounded through the 16-bit domain
pub fn pack_bytes_from_float(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    let l = Layout::of(format);
    for i in 0..l.channels {
        let mut v = w[l.slot(i)] as f64 * 65535.0;
        if l.reversed {
            v = 65535.0 - v;
        }
        cur.write(l.color_offset(i, stride), from_16_to_8(quick_saturate_word(v)))?;
    }
    cur.advance(l.step());
    Ok(())
}

fn pack_lab_from_float<T: FloatSample>(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    write_triplet::<T>(format, cur, stride, unit_to_lab(w).to_array())?;
    cur.advance(triplet_step::<T>(format));
    Ok(())
}

fn pack_xyz_from_float<T: FloatSample>(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    let xyz = [w[0], w[1], w[2]].map(|v| v as f64 * MAX_ENCODEABLE_XYZ);
    write_triplet::<T>(format, cur, stride, xyz)?;
    cur.advance(triplet_step::<T>(format));
    Ok(())
}

pub fn pack_lab_float_from_float(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_lab_from_float::<f32>(format, w, cur, stride)
}

pub fn pack_lab_double_from_float(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_lab_from_float::<f64>(format, w, cur, stride)
}

pub fn pack_xyz_float_from_float(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_xyz_from_float::<f32>(format, w, cur, stride)
}

pub fn pack_xyz_double_from_float(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_xyz_from_float::<f64>(format, w, cur, stride)
}

/// Offset of PCS component `k` and the pixel step for integer Lab layouts
#[inline]
fn encoded_lab_geometry(format: PixelFormat, stride: usize, size: usize) -> (usize, usize) {
    if format.is_planar() {
        (stride, size)
    } else {
        (size, (3 + format.extra()) * size)
    }
}

/// 8-bit Lab: v4 encoding, high byte of each word
pub fn pack_encoded_bytes_labv2_from_float(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    let encoded = float_to_lab_encoded(unit_to_lab(w));
    let (component, step) = encoded_lab_geometry(format, stride, 1);
    for (k, v) in encoded.into_iter().enumerate() {
        cur.write(k * component, (v >> 8) as u8)?;
    }
    cur.advance(step);
    Ok(())
}

/// 16-bit legacy V2 Lab words
pub fn pack_encoded_words_labv2_from_float(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    let encoded = float_to_lab_encoded_v2(unit_to_lab(w));
    let (component, step) = encoded_lab_geometry(format, stride, 2);
    for (k, v) in encoded.into_iter().enumerate() {
        cur.write(k * component, v)?;
    }
    cur.advance(step);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::{ReadCursor, unroll_floats_to_float, unroll_lab_double_to_float};

    fn unit(values: &[f32]) -> FloatVec {
        let mut w = [0f32; 16];
        w[..values.len()].copy_from_slice(values);
        w
    }

    #[test]
    fn test_floats_roundtrip_cmyk_reversed() {
        let format = PixelFormat::CMYK_FLT.reversed();
        let w = unit(&[0.0, 0.25, 0.5, 1.0]);
        let mut out = [0u8; 16];
        let mut cur = WriteCursor::new(&mut out);
        pack_floats_from_float(format, &w, &mut cur, 0).unwrap();
        let first = f32::from_ne_bytes([out[0], out[1], out[2], out[3]]);
        assert!((first - 100.0).abs() < 1e-4);

        let mut back = [0f32; 16];
        unroll_floats_to_float(format, &mut back, &mut ReadCursor::new(&out), 0).unwrap();
        for k in 0..4 {
            assert!((back[k] - w[k]).abs() < 1e-6, "channel {k}: {}", back[k]);
        }
    }

    #[test]
    fn test_bytes_and_words_saturate() {
        let w = unit(&[1.5, -0.2, 0.5]);
        let mut out = [0u8; 3];
        pack_bytes_from_float(PixelFormat::RGB_8, &w, &mut WriteCursor::new(&mut out), 0).unwrap();
        assert_eq!(out, [0xFF, 0x00, 0x80]);

        let mut out = [0u8; 6];
        pack_words_from_float(PixelFormat::BGR_16, &w, &mut WriteCursor::new(&mut out), 0).unwrap();
        assert_eq!(u16::from_ne_bytes([out[0], out[1]]), 32768);
        assert_eq!(u16::from_ne_bytes([out[4], out[5]]), 0xFFFF);
    }

    #[test]
    fn test_lab_double_roundtrip() {
        let mut out = [0u8; 24];
        let w = unit(&[0.5, 0.25, 0.75]);
        pack_lab_double_from_float(PixelFormat::LAB_DBL, &w, &mut WriteCursor::new(&mut out), 0).unwrap();
        let l = f64::from_ne_bytes(out[..8].try_into().unwrap());
        assert!((l - 50.0).abs() < 1e-9);

        let mut back = [0f32; 16];
        unroll_lab_double_to_float(PixelFormat::LAB_DBL, &mut back, &mut ReadCursor::new(&out), 0).unwrap();
        for k in 0..3 {
            assert!((back[k] - w[k]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_xyz_float_scale() {
        let mut out = [0u8; 12];
        pack_xyz_float_from_float(PixelFormat::XYZ_FLT, &unit(&[1.0, 0.5, 0.0]), &mut WriteCursor::new(&mut out), 0)
            .unwrap();
        let x = f32::from_ne_bytes([out[0], out[1], out[2], out[3]]);
        assert!((x as f64 - MAX_ENCODEABLE_XYZ).abs() < 1e-6);
    }

    #[test]
    fn test_encoded_lab_white() {
        let mut out = [0u8; 3];
        let w = unit(&[1.0, 128.0 / 255.0, 128.0 / 255.0]);
        pack_encoded_bytes_labv2_from_float(PixelFormat::LABV2_8, &w, &mut WriteCursor::new(&mut out), 0).unwrap();
        assert_eq!(out, [0xFF, 0x80, 0x80]);

        let mut out = [0u8; 6];
        pack_encoded_words_labv2_from_float(PixelFormat::LABV2_16, &w, &mut WriteCursor::new(&mut out), 0).unwrap();
        assert_eq!(u16::from_ne_bytes([out[0], out[1]]), 0xFF00);
        assert_eq!(u16::from_ne_bytes([out[2], out[3]]), 0x8000);
    }
}

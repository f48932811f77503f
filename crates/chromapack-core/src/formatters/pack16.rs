//! Packers from the 16-bit canonical vector
//!
//! Packers are the exact inverse of the matching unpackers. Extra channels
//! are never written; whatever the caller left in those bytes survives.
//! Premultiplied layouts read the alpha already present in the output.

use super::cursor::WriteCursor;
use super::{FloatSample, Layout, WordVec, triplet_step, write_triplet};
use crate::color::{lab_encoded_to_float, xyz_encoded_to_float};
use crate::error::Result;
use crate::format::PixelFormat;
use crate::math::fixed::premultiply_16;
use crate::math::{
    change_endian, from_8_to_16, from_16_to_8, labv4_to_labv2, reverse_flavor_8,
    reverse_flavor_16, to_fixed_domain,
};

#[inline]
fn pack_fixed_bytes(
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    lead: usize,
    slots: &[usize],
    trail: usize,
    reverse: bool,
) -> Result<()> {
    let px = cur.take(lead + slots.len() + trail)?;
    for (k, &slot) in slots.iter().enumerate() {
        let v = from_16_to_8(w[slot]);
        px[lead + k] = if reverse { reverse_flavor_8(v) } else { v };
    }
    Ok(())
}

#[inline]
fn pack_fixed_words(
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    lead: usize,
    slots: &[usize],
    trail: usize,
    reverse: bool,
    big_endian: bool,
) -> Result<()> {
    let px = cur.take(2 * (lead + slots.len() + trail))?;
    for (k, &slot) in slots.iter().enumerate() {
        let mut v = w[slot];
        if reverse {
            v = reverse_flavor_16(v);
        }
        if big_endian {
            v = change_endian(v);
        }
        let at = 2 * (lead + k);
        px[at..at + 2].copy_from_slice(&v.to_ne_bytes());
    }
    Ok(())
}

// Generic layouts

fn pack_bytes(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    let l = Layout::of(format);
    let alpha = if l.premul {
        to_fixed_domain(from_8_to_16(cur.read::<u8>(l.alpha_offset(stride))?) as u32)
    } else {
        0
    };

    for i in 0..l.channels {
        let mut v = w[l.slot(i)];
        if l.reversed {
            v = reverse_flavor_16(v);
        }
        if l.premul {
            v = premultiply_16(v, alpha);
        }
        cur.write(l.color_offset(i, stride), from_16_to_8(v))?;
    }

    cur.advance(l.step());
    Ok(())
}

/// Any 8-bit chunky layout
pub fn pack_chunky_bytes(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_bytes(format, w, cur, stride)
}

/// Any 8-bit planar layout
pub fn pack_planar_bytes(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_bytes(format, w, cur, stride)
}

fn pack_words(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
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
        let mut v = w[l.slot(i)];
        if l.reversed {
            v = reverse_flavor_16(v);
        }
        if l.premul {
            v = premultiply_16(v, alpha);
        }
        if l.endian {
            v = change_endian(v);
        }
        cur.write(l.color_offset(i, stride), v)?;
    }

    cur.advance(l.step());
    Ok(())
}

/// Any 16-bit chunky layout
pub fn pack_chunky_words(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_words(format, w, cur, stride)
}

/// Any 16-bit planar layout
pub fn pack_planar_words(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_words(format, w, cur, stride)
}

// Floating point destinations

/// 16-bit values scaled to float samples. Ink spaces become percentages.
pub(crate) fn pack_samples_from_16<T: FloatSample>(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    let l = Layout::of(format);
    let maximum = if format.is_ink_space() { 655.35 } else { 65535.0 };

    for i in 0..l.channels {
        let mut v = w[l.slot(i)];
        if l.reversed {
            v = reverse_flavor_16(v);
        }
        cur.write(l.color_offset(i, stride), T::from_f64(v as f64 / maximum))?;
    }

    cur.advance(l.step());
    Ok(())
}

pub fn pack_double_from_16(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_samples_from_16::<f64>(format, w, cur, stride)
}

pub fn pack_float_from_16(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_samples_from_16::<f32>(format, w, cur, stride)
}

fn pack_lab_from_16<T: FloatSample>(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    let lab = lab_encoded_to_float([w[0], w[1], w[2]]);
    write_triplet::<T>(format, cur, stride, lab.to_array())?;
    cur.advance(triplet_step::<T>(format));
    Ok(())
}

fn pack_xyz_from_16<T: FloatSample>(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    let xyz = xyz_encoded_to_float([w[0], w[1], w[2]]);
    write_triplet::<T>(format, cur, stride, xyz.to_array())?;
    cur.advance(triplet_step::<T>(format));
    Ok(())
}

pub fn pack_lab_double_from_16(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_lab_from_16::<f64>(format, w, cur, stride)
}

pub fn pack_lab_float_from_16(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_lab_from_16::<f32>(format, w, cur, stride)
}

pub fn pack_xyz_double_from_16(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_xyz_from_16::<f64>(format, w, cur, stride)
}

pub fn pack_xyz_float_from_16(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_xyz_from_16::<f32>(format, w, cur, stride)
}

// Legacy V2 Lab

pub fn pack_labv2_8(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    let px = cur.take(3)?;
    for (b, &v) in px.iter_mut().zip(w) {
        *b = from_16_to_8(labv4_to_labv2(v));
    }
    Ok(())
}

/// V2 Lab after a leading alpha byte, which is left alone
pub fn pack_alabv2_8(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    let px = cur.take(4)?;
    for (b, &v) in px[1..].iter_mut().zip(w) {
        *b = from_16_to_8(labv4_to_labv2(v));
    }
    Ok(())
}

pub fn pack_labv2_16(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    let px = cur.take(6)?;
    for (pair, &v) in px.chunks_exact_mut(2).zip(w) {
        pair.copy_from_slice(&labv4_to_labv2(v).to_ne_bytes());
    }
    Ok(())
}

// Fixed 8-bit layouts

pub fn pack_1_byte(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[0], 0, false)
}

pub fn pack_1_byte_skip1(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[0], 1, false)
}

pub fn pack_1_byte_skip1_swap_first(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 1, &[0], 0, false)
}

pub fn pack_1_byte_reversed(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[0], 0, true)
}

pub fn pack_3_bytes(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[0, 1, 2], 0, false)
}

pub fn pack_3_bytes_swap(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[2, 1, 0], 0, false)
}

/// RGBA
pub fn pack_3_bytes_and_skip1(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[0, 1, 2], 1, false)
}

/// ARGB
pub fn pack_3_bytes_and_skip1_swap_first(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 1, &[0, 1, 2], 0, false)
}

/// BGRA
pub fn pack_3_bytes_and_skip1_swap_swap_first(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[2, 1, 0], 1, false)
}

/// ABGR
pub fn pack_3_bytes_and_skip1_swap(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 1, &[2, 1, 0], 0, false)
}

pub fn pack_4_bytes(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[0, 1, 2, 3], 0, false)
}

pub fn pack_4_bytes_reverse(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[0, 1, 2, 3], 0, true)
}

/// KCMY
pub fn pack_4_bytes_swap_first(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[3, 0, 1, 2], 0, false)
}

/// KYMC
pub fn pack_4_bytes_swap(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[3, 2, 1, 0], 0, false)
}

/// YMCK
pub fn pack_4_bytes_swap_swap_first(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[2, 1, 0, 3], 0, false)
}

pub fn pack_6_bytes(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[0, 1, 2, 3, 4, 5], 0, false)
}

pub fn pack_6_bytes_swap(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_bytes(w, cur, 0, &[5, 4, 3, 2, 1, 0], 0, false)
}

// Fixed 16-bit layouts

pub fn pack_1_word(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[0], 0, false, false)
}

pub fn pack_1_word_skip1(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[0], 1, false, false)
}

pub fn pack_1_word_skip1_swap_first(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 1, &[0], 0, false, false)
}

pub fn pack_1_word_reversed(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[0], 0, true, false)
}

pub fn pack_1_word_big_endian(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[0], 0, false, true)
}

pub fn pack_3_words(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[0, 1, 2], 0, false, false)
}

pub fn pack_3_words_swap(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[2, 1, 0], 0, false, false)
}

pub fn pack_3_words_big_endian(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[0, 1, 2], 0, false, true)
}

pub fn pack_3_words_and_skip1(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[0, 1, 2], 1, false, false)
}

pub fn pack_3_words_and_skip1_swap(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 1, &[2, 1, 0], 0, false, false)
}

pub fn pack_3_words_and_skip1_swap_first(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 1, &[0, 1, 2], 0, false, false)
}

pub fn pack_3_words_and_skip1_swap_swap_first(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[2, 1, 0], 1, false, false)
}

pub fn pack_4_words(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[0, 1, 2, 3], 0, false, false)
}

pub fn pack_4_words_reverse(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[0, 1, 2, 3], 0, true, false)
}

pub fn pack_4_words_swap(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[3, 2, 1, 0], 0, false, false)
}

pub fn pack_4_words_big_endian(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[0, 1, 2, 3], 0, false, true)
}

pub fn pack_6_words(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[0, 1, 2, 3, 4, 5], 0, false, false)
}

pub fn pack_6_words_swap(
    _format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    _stride: usize,
) -> Result<()> {
    pack_fixed_words(w, cur, 0, &[5, 4, 3, 2, 1, 0], 0, false, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::pixel_type;
    use crate::formatters::{ReadCursor, unroll_any_words, unroll_chunky_bytes};

    type Pack = super::super::Pack16Fn;

    fn pack(f: Pack, format: PixelFormat, w: &WordVec, out: &mut [u8], stride: usize) -> usize {
        let mut cur = WriteCursor::new(out);
        f(format, w, &mut cur, stride).unwrap();
        cur.position()
    }

    fn wide(values: &[u16]) -> WordVec {
        let mut w = [0u16; 16];
        w[..values.len()].copy_from_slice(values);
        w
    }

    #[test]
    fn test_generic_agrees_with_fixed_layouts() {
        let w = wide(&[0x1111, 0x5555, 0x9999, 0xDDDD]);
        let swap_swap_first = PixelFormat::new(pixel_type::CMYK, 4, 1).swapped().swap_first();
        let cases: [(Pack, PixelFormat); 8] = [
            (pack_4_bytes, PixelFormat::CMYK_8),
            (pack_4_bytes_reverse, PixelFormat::CMYK_8_REV),
            (pack_4_bytes_swap_first, PixelFormat::KCMY_8),
            (pack_4_bytes_swap, PixelFormat::KYMC_8),
            (pack_4_bytes_swap_swap_first, swap_swap_first),
            (pack_3_bytes_and_skip1, PixelFormat::RGBA_8),
            (pack_3_bytes_and_skip1_swap_first, PixelFormat::ARGB_8),
            (pack_3_bytes_and_skip1_swap_swap_first, PixelFormat::BGRA_8),
        ];
        for (fixed, format) in cases {
            let mut a = [0xAAu8; 4];
            let mut b = [0xAAu8; 4];
            let pa = pack(fixed, format, &w, &mut a, 0);
            let pb = pack(pack_chunky_bytes, format, &w, &mut b, 0);
            assert_eq!(a, b, "{format:?}");
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn test_extra_channels_untouched() {
        let mut out = [0x77u8; 4];
        pack(pack_chunky_bytes, PixelFormat::ARGB_8, &wide(&[0xFFFF, 0, 0x8080]), &mut out, 0);
        assert_eq!(out, [0x77, 0xFF, 0x00, 0x80]);
    }

    #[test]
    fn test_pack_inverts_unpack_for_swapped_layouts() {
        let src = [9u8, 80, 160, 250];
        let swap_swap_first = PixelFormat::new(pixel_type::CMYK, 4, 1).swapped().swap_first();
        for format in [PixelFormat::KCMY_8, PixelFormat::KYMC_8, swap_swap_first, PixelFormat::CMYK_8_REV] {
            let mut w = [0u16; 16];
            unroll_chunky_bytes(format, &mut w, &mut ReadCursor::new(&src), 0).unwrap();
            let mut out = [0u8; 4];
            pack(pack_chunky_bytes, format, &w, &mut out, 0);
            assert_eq!(out, src, "{format:?}");
        }
    }

    #[test]
    fn test_words_big_endian() {
        let mut out = [0u8; 2];
        pack(pack_1_word_big_endian, PixelFormat::GRAY_16_SE, &wide(&[0x1234]), &mut out, 0);
        assert_eq!(u16::from_ne_bytes(out), 0x3412);

        let mut generic = [0u8; 2];
        pack(pack_chunky_words, PixelFormat::GRAY_16_SE, &wide(&[0x1234]), &mut generic, 0);
        assert_eq!(out, generic);
    }

    #[test]
    fn test_premultiplied_words_roundtrip_opaque() {
        let src: Vec<u8> = [0x1000u16, 0x8000, 0xF000, 0xFFFF]
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();
        let mut w = [0u16; 16];
        unroll_any_words(PixelFormat::RGBA_16_PREMUL, &mut w, &mut ReadCursor::new(&src), 0).unwrap();
        let mut out = src.clone();
        pack(pack_chunky_words, PixelFormat::RGBA_16_PREMUL, &w, &mut out, 0);
        assert_eq!(out, src);
    }

    #[test]
    fn test_premultiplied_bytes_uses_output_alpha() {
        // Alpha 0 in the destination zeroes the color
        let mut out = [0u8, 0, 0, 0];
        pack(pack_chunky_bytes, PixelFormat::RGBA_8_PREMUL, &wide(&[0xFFFF, 0x8080, 0x4040]), &mut out, 0);
        assert_eq!(out, [0, 0, 0, 0]);

        let mut out = [0u8, 0, 0, 0xFF];
        pack(pack_chunky_bytes, PixelFormat::RGBA_8_PREMUL, &wide(&[0xFFFF, 0x8080, 0x4040]), &mut out, 0);
        assert_eq!(out, [0xFF, 0x80, 0x40, 0xFF]);
    }

    #[test]
    fn test_planar_words() {
        let mut out = [0u8; 12];
        let w = wide(&[1, 2, 3]);
        let pos = pack(pack_planar_words, PixelFormat::RGB_16_PLANAR, &w, &mut out, 4);
        assert_eq!(pos, 2);
        assert_eq!(u16::from_ne_bytes([out[0], out[1]]), 1);
        assert_eq!(u16::from_ne_bytes([out[4], out[5]]), 2);
        assert_eq!(u16::from_ne_bytes([out[8], out[9]]), 3);
    }

    #[test]
    fn test_float_from_16_ink() {
        let mut out = [0u8; 16];
        pack(pack_float_from_16, PixelFormat::CMYK_FLT, &wide(&[0xFFFF, 0, 0, 0]), &mut out, 0);
        let c = f32::from_ne_bytes([out[0], out[1], out[2], out[3]]);
        assert!((c - 100.0).abs() < 1e-3, "{c}");
    }

    #[test]
    fn test_lab_double_from_16() {
        let mut out = [0u8; 24];
        let pos = pack(pack_lab_double_from_16, PixelFormat::LAB_DBL, &wide(&[0xFFFF, 0x8080, 0x8080]), &mut out, 0);
        assert_eq!(pos, 24);
        let l = f64::from_ne_bytes(out[..8].try_into().unwrap());
        let a = f64::from_ne_bytes(out[8..16].try_into().unwrap());
        assert!((l - 100.0).abs() < 1e-9);
        assert!(a.abs() < 1e-9);
    }

    #[test]
    fn test_labv2_8_from_v4() {
        let mut out = [0u8; 3];
        pack(pack_labv2_8, PixelFormat::LABV2_8, &wide(&[0xFF00, 0x8080, 0x8080]), &mut out, 0);
        assert_eq!(out[1], 0x80);
    }

    #[test]
    fn test_output_too_small() {
        let mut out = [0u8; 2];
        let mut cur = WriteCursor::new(&mut out);
        assert!(pack_3_bytes(PixelFormat::RGB_8, &wide(&[1, 2, 3]), &mut cur, 0).is_err());
        assert!(pack_chunky_bytes(PixelFormat::RGB_8, &wide(&[1, 2, 3]), &mut cur, 0).is_err());
    }
}

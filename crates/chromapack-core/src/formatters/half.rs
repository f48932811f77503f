//! IEEE 754 half-precision samples (`half::f16`)
//!
//! Half layouts share the generic float routines; only the storage type
//! differs. Their table entries are kept separate so builds without the
//! `half` feature simply have no codec for `FLOAT | 2 bytes`.

use ::half::f16;

use super::table::{Entry, FLOAT, entry, layout};
use super::*;
use crate::format::mask::{
    ANY_CHANNELS, ANY_EXTRA, ANY_FLAVOR, ANY_PLANAR, ANY_SPACE, ANY_SWAP, ANY_SWAPFIRST,
};

impl FloatSample for f16 {
    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }
    #[inline]
    fn from_f64(v: f64) -> Self {
        f16::from_f64(v)
    }
}

pub fn unroll_half_to_16(
    format: PixelFormat,
    w: &mut WordVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unpack16::unroll_samples_to_16::<f16>(format, w, cur, stride)
}

pub fn unroll_half_to_float(
    format: PixelFormat,
    w: &mut FloatVec,
    cur: &mut ReadCursor<'_>,
    stride: usize,
) -> Result<()> {
    unpack_float::unroll_samples_to_float::<f16>(format, w, cur, stride)
}

pub fn pack_half_from_16(
    format: PixelFormat,
    w: &WordVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack16::pack_samples_from_16::<f16>(format, w, cur, stride)
}

pub fn pack_half_from_float(
    format: PixelFormat,
    w: &FloatVec,
    cur: &mut WriteCursor<'_>,
    stride: usize,
) -> Result<()> {
    pack_float::pack_samples_from_float::<f16>(format, w, cur, stride)
}

const HALF: u32 = FLOAT | layout(0, 2);
const FROM_16: u32 =
    ANY_CHANNELS | ANY_PLANAR | ANY_SWAPFIRST | ANY_FLAVOR | ANY_SWAP | ANY_EXTRA | ANY_SPACE;
const TO_FLOAT: u32 =
    ANY_PLANAR | ANY_SWAPFIRST | ANY_SWAP | ANY_EXTRA | ANY_CHANNELS | ANY_SPACE | ANY_FLAVOR;
const FROM_FLOAT: u32 = ANY_FLAVOR | ANY_SWAPFIRST | ANY_SWAP | ANY_EXTRA | ANY_CHANNELS | ANY_SPACE;

pub(super) static INPUT_16: &[Entry<Unpack16Fn>] = &[entry(HALF, FROM_16, unroll_half_to_16)];
pub(super) static INPUT_FLOAT: &[Entry<UnpackFloatFn>] = &[entry(HALF, TO_FLOAT, unroll_half_to_float)];
pub(super) static OUTPUT_16: &[Entry<Pack16Fn>] = &[entry(HALF, FROM_16, pack_half_from_16)];
pub(super) static OUTPUT_FLOAT: &[Entry<PackFloatFn>] = &[entry(HALF, FROM_FLOAT, pack_half_from_float)];

#[cfg(test)]
mod tests {
    use super::*;

    fn halves(values: &[f32]) -> Vec<u8> {
        values
            .iter()
            .flat_map(|&v| f16::from_f32(v).to_bits().to_ne_bytes())
            .collect()
    }

    #[test]
    fn test_half_to_16() {
        let buf = halves(&[1.0, 0.5, 0.0]);
        let mut w = [0u16; 16];
        let mut cur = ReadCursor::new(&buf);
        unroll_half_to_16(PixelFormat::RGB_HALF_FLT, &mut w, &mut cur, 0).unwrap();
        assert_eq!(&w[..3], &[0xFFFF, 32768, 0]);
        assert_eq!(cur.position(), 6);
    }

    #[test]
    fn test_half_float_roundtrip() {
        let mut w = [0f32; 16];
        w[..4].copy_from_slice(&[0.25, 0.5, 0.75, 1.0]);
        let mut out = [0u8; 8];
        pack_half_from_float(PixelFormat::CMYK_HALF_FLT, &w, &mut WriteCursor::new(&mut out), 0).unwrap();
        // Ink spaces are stored as percentages
        let c = f16::from_bits(u16::from_ne_bytes([out[0], out[1]]));
        assert_eq!(c.to_f32(), 25.0);

        let mut back = [0f32; 16];
        unroll_half_to_float(PixelFormat::CMYK_HALF_FLT, &mut back, &mut ReadCursor::new(&out), 0).unwrap();
        assert_eq!(&back[..4], &w[..4]);
    }

    #[test]
    fn test_half_formats_resolve() {
        for (dir, repr) in [
            (Direction::Input, Representation::Word),
            (Direction::Input, Representation::Float),
            (Direction::Output, Representation::Word),
            (Direction::Output, Representation::Float),
        ] {
            assert!(stock_formatter(PixelFormat::RGBA_HALF_FLT, dir, repr).is_some());
        }
        // Planar half has no float packer
        assert!(
            stock_formatter(PixelFormat::RGB_HALF_FLT.planar(), Direction::Output, Representation::Float)
                .is_none()
        );
    }
}

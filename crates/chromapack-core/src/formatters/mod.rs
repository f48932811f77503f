//! Pixel codecs ("formatters")
//!
//! An unpacker reads one pixel from an external buffer into a canonical
//! channel vector; a packer writes a canonical vector back out. Two canonical
//! representations exist:
//!
//! - [`Representation::Word`]: `[u16; 16]`, 0..65535 fixed point
//! - [`Representation::Float`]: `[f32; 16]`, normalized 0..1 (Lab is
//!   `L/100`, `(a+128)/255`; XYZ is divided by [`MAX_ENCODEABLE_XYZ`])
//!
//! Codecs are plain function pointers selected from ordered stock tables
//! (see [`stock_formatter`]) or supplied by plugin factories through the
//! [`FormatterRegistry`](crate::registry::FormatterRegistry).
//!
//! [`MAX_ENCODEABLE_XYZ`]: crate::color::MAX_ENCODEABLE_XYZ

pub mod cursor;
#[cfg(feature = "half")]
mod half;
mod pack16;
mod pack_float;
mod table;
mod unpack16;
mod unpack_float;

pub use cursor::{ReadCursor, WriteCursor};
pub use pack_float::*;
pub use pack16::*;
pub use unpack_float::*;
pub use unpack16::*;

#[cfg(feature = "half")]
pub use self::half::{pack_half_from_16, pack_half_from_float, unroll_half_to_16, unroll_half_to_float};

use crate::error::Result;
use crate::format::{MAX_CHANNELS, PixelFormat, flags};

/// Canonical 16-bit channel vector
pub type WordVec = [u16; MAX_CHANNELS];

/// Canonical float channel vector
pub type FloatVec = [f32; MAX_CHANNELS];

/// Read one pixel into a 16-bit vector. `stride` is the byte distance between planes.
pub type Unpack16Fn = fn(PixelFormat, &mut WordVec, &mut ReadCursor<'_>, usize) -> Result<()>;

/// Read one pixel into a float vector. `stride` is the byte distance between planes.
pub type UnpackFloatFn = fn(PixelFormat, &mut FloatVec, &mut ReadCursor<'_>, usize) -> Result<()>;

/// Write one pixel from a 16-bit vector. `stride` is the byte distance between planes.
pub type Pack16Fn = fn(PixelFormat, &WordVec, &mut WriteCursor<'_>, usize) -> Result<()>;

/// Write one pixel from a float vector. `stride` is the byte distance between planes.
pub type PackFloatFn = fn(PixelFormat, &FloatVec, &mut WriteCursor<'_>, usize) -> Result<()>;

/// Whether a codec reads external pixels or writes them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

/// Canonical vector type a codec works with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// 16-bit fixed point
    Word,
    /// 32-bit float
    Float,
}

/// A resolved codec
#[derive(Clone, Copy)]
pub enum Formatter {
    Unpack16(Unpack16Fn),
    UnpackFloat(UnpackFloatFn),
    Pack16(Pack16Fn),
    PackFloat(PackFloatFn),
}

impl Formatter {
    pub fn direction(&self) -> Direction {
        match self {
            Self::Unpack16(_) | Self::UnpackFloat(_) => Direction::Input,
            Self::Pack16(_) | Self::PackFloat(_) => Direction::Output,
        }
    }

    pub fn representation(&self) -> Representation {
        match self {
            Self::Unpack16(_) | Self::Pack16(_) => Representation::Word,
            Self::UnpackFloat(_) | Self::PackFloat(_) => Representation::Float,
        }
    }

    pub fn as_unpack_16(&self) -> Option<Unpack16Fn> {
        match *self {
            Self::Unpack16(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_unpack_float(&self) -> Option<UnpackFloatFn> {
        match *self {
            Self::UnpackFloat(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_pack_16(&self) -> Option<Pack16Fn> {
        match *self {
            Self::Pack16(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_pack_float(&self) -> Option<PackFloatFn> {
        match *self {
            Self::PackFloat(f) => Some(f),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Unpack16(_) => "Unpack16",
            Self::UnpackFloat(_) => "UnpackFloat",
            Self::Pack16(_) => "Pack16",
            Self::PackFloat(_) => "PackFloat",
        };
        f.write_str(kind)
    }
}

/// Look up a codec in the built-in tables, ignoring plugins.
///
/// Output lookups clear the optimized hint first. Formats without color
/// channels never match.
pub fn stock_formatter(
    format: PixelFormat,
    direction: Direction,
    representation: Representation,
) -> Option<Formatter> {
    if format.channels() == 0 {
        return None;
    }
    let bits = format.bits();
    match (direction, representation) {
        (Direction::Input, Representation::Word) => {
            table::stock_input_16(bits).map(Formatter::Unpack16)
        }
        (Direction::Input, Representation::Float) => {
            table::stock_input_float(bits).map(Formatter::UnpackFloat)
        }
        (Direction::Output, Representation::Word) => {
            table::stock_output_16(bits & !flags::OPTIMIZED).map(Formatter::Pack16)
        }
        (Direction::Output, Representation::Float) => {
            table::stock_output_float(bits & !flags::OPTIMIZED).map(Formatter::PackFloat)
        }
    }
}

/// Decoded layout flags shared by the generic codecs
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    pub channels: usize,
    pub extra: usize,
    pub do_swap: bool,
    pub extra_first: bool,
    /// Swap-first without extra channels rotates the logical channels
    pub rotate: bool,
    pub reversed: bool,
    pub planar: bool,
    pub endian: bool,
    /// Premultiplied and an alpha channel is actually present
    pub premul: bool,
    pub sample: usize,
}

impl Layout {
    pub fn of(format: PixelFormat) -> Self {
        let channels = format.channels();
        let extra = format.extra();
        Self {
            channels,
            extra,
            do_swap: format.do_swap(),
            extra_first: format.extra_first(),
            rotate: extra == 0 && format.is_swap_first() && channels > 1,
            reversed: format.is_reversed(),
            planar: format.is_planar(),
            endian: format.is_endian_swapped(),
            premul: format.is_premultiplied() && extra > 0,
            sample: format.sample_size(),
        }
    }

    /// Logical channel held by stored color sample `i`
    #[inline]
    pub fn slot(&self, i: usize) -> usize {
        let n = self.channels;
        let raw = if self.do_swap { n - 1 - i } else { i };
        if self.rotate { (raw + n - 1) % n } else { raw }
    }

    /// Byte offset of stored sample `i`, extra channels included
    #[inline]
    pub fn offset(&self, i: usize, stride: usize) -> usize {
        if self.planar { i * stride } else { i * self.sample }
    }

    /// Byte offset of color sample `i`
    #[inline]
    pub fn color_offset(&self, i: usize, stride: usize) -> usize {
        let start = if self.extra_first { self.extra } else { 0 };
        self.offset(i + start, stride)
    }

    /// Byte offset of the alpha (first extra) channel
    #[inline]
    pub fn alpha_offset(&self, stride: usize) -> usize {
        self.offset(if self.extra_first { 0 } else { self.channels }, stride)
    }

    /// Bytes to move the cursor after one pixel
    #[inline]
    pub fn step(&self) -> usize {
        if self.planar {
            self.sample
        } else {
            (self.channels + self.extra) * self.sample
        }
    }
}

/// Floating point storage types (`f64`, `f32`, and `f16` with the `half` feature)
pub(crate) trait FloatSample: bytemuck::Pod {
    fn to_f64(self) -> f64;
    fn from_f64(v: f64) -> Self;
}

impl FloatSample for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl FloatSample for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
}

/// Read the three PCS components of a Lab/XYZ float pixel
pub(crate) fn read_triplet<T: FloatSample>(
    format: PixelFormat,
    cur: &ReadCursor<'_>,
    stride: usize,
) -> Result<[f64; 3]> {
    let step = if format.is_planar() { stride } else { size_of::<T>() };
    Ok([
        cur.read::<T>(0)?.to_f64(),
        cur.read::<T>(step)?.to_f64(),
        cur.read::<T>(2 * step)?.to_f64(),
    ])
}

/// Write the three PCS components of a Lab/XYZ float pixel
pub(crate) fn write_triplet<T: FloatSample>(
    format: PixelFormat,
    cur: &mut WriteCursor<'_>,
    stride: usize,
    values: [f64; 3],
) -> Result<()> {
    let step = if format.is_planar() { stride } else { size_of::<T>() };
    for (k, v) in values.into_iter().enumerate() {
        cur.write(k * step, T::from_f64(v))?;
    }
    Ok(())
}

/// Cursor step after a Lab/XYZ float pixel: three components plus extras
#[inline]
pub(crate) fn triplet_step<T>(format: PixelFormat) -> usize {
    if format.is_planar() {
        size_of::<T>()
    } else {
        (3 + format.extra()) * size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_plain_and_swapped() {
        let l = Layout::of(PixelFormat::RGB_8);
        assert_eq!((0..3).map(|i| l.slot(i)).collect::<Vec<_>>(), [0, 1, 2]);
        let l = Layout::of(PixelFormat::BGR_8);
        assert_eq!((0..3).map(|i| l.slot(i)).collect::<Vec<_>>(), [2, 1, 0]);
    }

    #[test]
    fn test_slot_rotation_for_swap_first_without_extra() {
        // KCMY: stored K lands in slot 3
        let l = Layout::of(PixelFormat::KCMY_8);
        assert_eq!((0..4).map(|i| l.slot(i)).collect::<Vec<_>>(), [3, 0, 1, 2]);
        // Swap + swap first: stored Y M C K
        let l = Layout::of(PixelFormat::new(crate::format::pixel_type::CMYK, 4, 1).swapped().swap_first());
        assert_eq!((0..4).map(|i| l.slot(i)).collect::<Vec<_>>(), [2, 1, 0, 3]);
    }

    #[test]
    fn test_extra_first_offsets() {
        let l = Layout::of(PixelFormat::ARGB_8);
        assert!(l.extra_first);
        assert!(!l.rotate);
        assert_eq!(l.color_offset(0, 0), 1);
        assert_eq!(l.alpha_offset(0), 0);
        assert_eq!(l.step(), 4);
    }

    #[test]
    fn test_planar_offsets_use_stride() {
        let l = Layout::of(PixelFormat::RGBA_16_PLANAR);
        assert_eq!(l.color_offset(2, 100), 200);
        assert_eq!(l.alpha_offset(100), 300);
        assert_eq!(l.step(), 2);
    }

    #[test]
    fn test_stock_rejects_zero_channels() {
        let f = PixelFormat::new(crate::format::pixel_type::RGB, 0, 1);
        assert!(stock_formatter(f, Direction::Input, Representation::Word).is_none());
    }

    #[test]
    fn test_formatter_accessors() {
        let f = stock_formatter(PixelFormat::RGB_8, Direction::Output, Representation::Word).unwrap();
        assert_eq!(f.direction(), Direction::Output);
        assert_eq!(f.representation(), Representation::Word);
        assert!(f.as_pack_16().is_some());
        assert!(f.as_unpack_16().is_none());
        assert_eq!(format!("{f:?}"), "Pack16");
    }
}

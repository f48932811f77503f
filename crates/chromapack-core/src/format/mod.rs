//! Pixel format descriptors
//!
//! A [`PixelFormat`] is a packed 32-bit value describing how one pixel is laid
//! out in memory: channel count, extra (non-color) channels, sample width,
//! channel order, endianness, sign flavor, planar/chunky layout,
//! premultiplied alpha and the color-space family.
//!
//! Bit layout (LSB first):
//!
//! | bits  | field        |
//! |-------|--------------|
//! | 0-2   | bytes per sample (0 = 8-byte double) |
//! | 3-6   | color channels |
//! | 7-12  | extra channels |
//! | 13    | reversed channel order (`do_swap`) |
//! | 14    | byte-swapped 16-bit words |
//! | 15    | planar |
//! | 16    | reversed sign flavor (`max - v`) |
//! | 17    | swap first |
//! | 18-22 | color space pixel type |
//! | 23    | optimized hint |
//! | 24    | floating point |
//! | 25    | premultiplied alpha |

mod predefined;

use crate::types::ColorSpace;

/// Maximum number of color channels a canonical vector holds
pub const MAX_CHANNELS: usize = 16;

/// Upper bound on color plus extra channels in one stored pixel
pub const MAX_STORED_CHANNELS: u32 = 64;

/// Pixel type codes stored in the color space field
pub mod pixel_type {
    pub const ANY: u32 = 0;
    pub const GRAY: u32 = 3;
    pub const RGB: u32 = 4;
    pub const CMY: u32 = 5;
    pub const CMYK: u32 = 6;
    pub const YCBCR: u32 = 7;
    pub const YUV: u32 = 8;
    pub const XYZ: u32 = 9;
    pub const LAB: u32 = 10;
    pub const YUVK: u32 = 11;
    pub const HSV: u32 = 12;
    pub const HLS: u32 = 13;
    pub const YXY: u32 = 14;
    pub const MCH1: u32 = 15;
    pub const MCH2: u32 = 16;
    pub const MCH3: u32 = 17;
    pub const MCH4: u32 = 18;
    pub const MCH5: u32 = 19;
    pub const MCH6: u32 = 20;
    pub const MCH7: u32 = 21;
    pub const MCH8: u32 = 22;
    pub const MCH9: u32 = 23;
    pub const MCH10: u32 = 24;
    pub const MCH11: u32 = 25;
    pub const MCH12: u32 = 26;
    pub const MCH13: u32 = 27;
    pub const MCH14: u32 = 28;
    pub const MCH15: u32 = 29;
    /// Legacy ICC v2 Lab encoding
    pub const LAB_V2: u32 = 30;
}

const BYTES_SHIFT: u32 = 0;
const CHANNELS_SHIFT: u32 = 3;
const EXTRA_SHIFT: u32 = 7;
const COLORSPACE_SHIFT: u32 = 18;

const BYTES_MASK: u32 = 0x7;
const CHANNELS_MASK: u32 = 0xF;
const EXTRA_MASK: u32 = 0x3F;
const COLORSPACE_MASK: u32 = 0x1F;

/// Single-bit flags of a [`PixelFormat`]
pub mod flags {
    pub const DOSWAP: u32 = 1 << 13;
    pub const ENDIAN16: u32 = 1 << 14;
    pub const PLANAR: u32 = 1 << 15;
    pub const FLAVOR: u32 = 1 << 16;
    pub const SWAPFIRST: u32 = 1 << 17;
    pub const OPTIMIZED: u32 = 1 << 23;
    pub const FLOAT: u32 = 1 << 24;
    pub const PREMUL: u32 = 1 << 25;
}

/// Wildcard masks for formatter table entries. Bits set in a mask are not compared.
pub mod mask {
    use super::*;

    pub const ANY_SPACE: u32 = COLORSPACE_MASK << COLORSPACE_SHIFT;
    pub const ANY_CHANNELS: u32 = CHANNELS_MASK << CHANNELS_SHIFT;
    pub const ANY_EXTRA: u32 = EXTRA_MASK << EXTRA_SHIFT;
    pub const ANY_PLANAR: u32 = flags::PLANAR;
    pub const ANY_ENDIAN: u32 = flags::ENDIAN16;
    pub const ANY_SWAP: u32 = flags::DOSWAP;
    pub const ANY_SWAPFIRST: u32 = flags::SWAPFIRST;
    pub const ANY_FLAVOR: u32 = flags::FLAVOR;
    pub const ANY_PREMUL: u32 = flags::PREMUL;
}

/// Check if a pixel type carries ink percentages (0..100) in float formats
pub fn is_ink_space(code: u32) -> bool {
    matches!(
        code,
        pixel_type::CMY | pixel_type::CMYK | pixel_type::MCH5..=pixel_type::MCH15
    )
}

/// Packed pixel layout descriptor
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct PixelFormat(u32);

impl PixelFormat {
    /// Create a format with the given pixel type, color channel count and sample width.
    ///
    /// `bytes` is 0 for 8-byte doubles, otherwise 1, 2 or 4.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in const contexts) when a field does not fit.
    pub const fn new(pixel_type: u32, channels: u32, bytes: u32) -> Self {
        assert!(pixel_type <= COLORSPACE_MASK, "pixel type out of range");
        assert!(channels <= CHANNELS_MASK, "at most 15 color channels");
        assert!(
            matches!(bytes, 0 | 1 | 2 | 4),
            "sample width must be 0, 1, 2 or 4 bytes"
        );
        Self(
            (pixel_type << COLORSPACE_SHIFT)
                | (channels << CHANNELS_SHIFT)
                | (bytes << BYTES_SHIFT),
        )
    }

    /// Wrap raw descriptor bits without validation
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw descriptor bits
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Descriptor for the device side of a color space with the given sample width
    pub fn for_color_space(space: ColorSpace, bytes: u32, float: bool) -> Self {
        let base = Self::new(space.pixel_type(), space.channels() as u32, bytes);
        if float { base.float() } else { base }
    }

    /// Add extra (non-color) channels
    ///
    /// # Panics
    ///
    /// Panics when the extra count does not fit or the stored pixel grows past
    /// [`MAX_STORED_CHANNELS`].
    pub const fn with_extra(self, extra: u32) -> Self {
        assert!(extra <= EXTRA_MASK, "at most 63 extra channels");
        assert!(
            self.channels() as u32 + extra <= MAX_STORED_CHANNELS,
            "too many stored channels"
        );
        Self((self.0 & !(EXTRA_MASK << EXTRA_SHIFT)) | (extra << EXTRA_SHIFT))
    }

    /// Reverse the channel order (RGB stored as BGR)
    pub const fn swapped(self) -> Self {
        Self(self.0 | flags::DOSWAP)
    }

    /// Rotate the first logical channel to the end (or the extra channels to the front)
    pub const fn swap_first(self) -> Self {
        Self(self.0 | flags::SWAPFIRST)
    }

    /// Byte-swap 16-bit samples
    pub const fn endian_swapped(self) -> Self {
        Self(self.0 | flags::ENDIAN16)
    }

    /// Store each channel in its own plane
    pub const fn planar(self) -> Self {
        Self(self.0 | flags::PLANAR)
    }

    /// Store values as `max - v`
    pub const fn reversed(self) -> Self {
        Self(self.0 | flags::FLAVOR)
    }

    /// Samples are floating point (width 0 = double, 2 = half, 4 = float)
    pub const fn float(self) -> Self {
        Self(self.0 | flags::FLOAT)
    }

    /// Color channels are premultiplied by the alpha channel
    pub const fn premultiplied(self) -> Self {
        Self(self.0 | flags::PREMUL)
    }

    /// Mark the format as produced by an optimized pipeline
    pub const fn optimized(self) -> Self {
        Self(self.0 | flags::OPTIMIZED)
    }

    /// Clear the given flag bits
    pub const fn without(self, bits: u32) -> Self {
        Self(self.0 & !bits)
    }

    /// Number of color channels
    #[inline]
    pub const fn channels(self) -> usize {
        ((self.0 >> CHANNELS_SHIFT) & CHANNELS_MASK) as usize
    }

    /// Number of extra (non-color) channels
    #[inline]
    pub const fn extra(self) -> usize {
        ((self.0 >> EXTRA_SHIFT) & EXTRA_MASK) as usize
    }

    /// Bytes field as stored (0 means double)
    #[inline]
    pub const fn bytes(self) -> usize {
        ((self.0 >> BYTES_SHIFT) & BYTES_MASK) as usize
    }

    /// Size of one stored sample in bytes
    #[inline]
    pub const fn sample_size(self) -> usize {
        match self.bytes() {
            0 => 8,
            n => n,
        }
    }

    /// Size of one chunky pixel in bytes, extra channels included
    #[inline]
    pub const fn pixel_size(self) -> usize {
        self.sample_size() * (self.channels() + self.extra())
    }

    /// Pixel type code of the color space field
    #[inline]
    pub const fn pixel_type(self) -> u32 {
        (self.0 >> COLORSPACE_SHIFT) & COLORSPACE_MASK
    }

    /// Color space family, if the field names one
    pub fn color_space(self) -> Option<ColorSpace> {
        ColorSpace::from_pixel_type(self.pixel_type())
    }

    #[inline]
    pub const fn do_swap(self) -> bool {
        self.0 & flags::DOSWAP != 0
    }

    #[inline]
    pub const fn is_swap_first(self) -> bool {
        self.0 & flags::SWAPFIRST != 0
    }

    #[inline]
    pub const fn is_endian_swapped(self) -> bool {
        self.0 & flags::ENDIAN16 != 0
    }

    #[inline]
    pub const fn is_planar(self) -> bool {
        self.0 & flags::PLANAR != 0
    }

    #[inline]
    pub const fn is_reversed(self) -> bool {
        self.0 & flags::FLAVOR != 0
    }

    #[inline]
    pub const fn is_premultiplied(self) -> bool {
        self.0 & flags::PREMUL != 0
    }

    #[inline]
    pub const fn is_optimized(self) -> bool {
        self.0 & flags::OPTIMIZED != 0
    }

    /// Samples are floating point
    #[inline]
    pub const fn is_float(self) -> bool {
        self.0 & flags::FLOAT != 0
    }

    /// Samples are one byte wide
    #[inline]
    pub const fn is_8bit(self) -> bool {
        self.bytes() == 1
    }

    /// Extra channels are stored before the color channels
    #[inline]
    pub const fn extra_first(self) -> bool {
        self.do_swap() ^ self.is_swap_first()
    }

    /// Float samples are percentages (0..100) instead of 0..1
    #[inline]
    pub fn is_ink_space(self) -> bool {
        is_ink_space(self.pixel_type())
    }
}

impl std::fmt::Debug for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelFormat")
            .field("bits", &format_args!("{:#010x}", self.0))
            .field("pixel_type", &self.pixel_type())
            .field("channels", &self.channels())
            .field("extra", &self.extra())
            .field("bytes", &self.bytes())
            .field("float", &self.is_float())
            .field("planar", &self.is_planar())
            .finish()
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl From<u32> for PixelFormat {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<PixelFormat> for u32 {
    fn from(format: PixelFormat) -> Self {
        format.0
    }
}

//! Ordered stock codec tables
//!
//! An entry matches a descriptor when `bits & !mask == ty`: mask bits are
//! "don't care". Tables are scanned in order and the first match wins, so
//! fixed layouts must precede the generic catch-alls.

use super::*;
use crate::format::PixelFormat;
use crate::format::flags::{DOSWAP, ENDIAN16, FLAVOR, PLANAR, PREMUL, SWAPFIRST};
use crate::format::mask::{
    ANY_CHANNELS, ANY_ENDIAN, ANY_EXTRA, ANY_FLAVOR, ANY_PLANAR, ANY_PREMUL, ANY_SPACE, ANY_SWAP,
    ANY_SWAPFIRST,
};
use crate::format::pixel_type as pt;

pub(super) struct Entry<F> {
    pub ty: u32,
    pub mask: u32,
    pub func: F,
}

pub(super) const fn entry<F>(ty: u32, mask: u32, func: F) -> Entry<F> {
    Entry { ty, mask, func }
}

pub(super) fn find<F: Copy>(table: &[Entry<F>], bits: u32) -> Option<F> {
    table
        .iter()
        .find(|e| bits & !e.mask == e.ty)
        .map(|e| e.func)
}

/// Channels + sample width with no color space
pub(super) const fn layout(channels: u32, bytes: u32) -> u32 {
    PixelFormat::new(pt::ANY, channels, bytes).bits()
}

/// Same with extra channels
pub(super) const fn layout_extra(channels: u32, bytes: u32, extra: u32) -> u32 {
    PixelFormat::new(pt::ANY, channels, bytes).with_extra(extra).bits()
}

pub(super) const FLOAT: u32 = crate::format::flags::FLOAT;

const PCS: u32 = ANY_PLANAR | ANY_EXTRA;

const LAB_DBL: u32 = PixelFormat::LAB_DBL.bits();
const LAB_FLT: u32 = PixelFormat::LAB_FLT.bits();
const XYZ_DBL: u32 = PixelFormat::XYZ_DBL.bits();
const XYZ_FLT: u32 = PixelFormat::XYZ_FLT.bits();
const LABV2_8: u32 = PixelFormat::LABV2_8.bits();
const ALABV2_8: u32 = PixelFormat::ALABV2_8.bits();
const LABV2_16: u32 = PixelFormat::LABV2_16.bits();

const FLOAT_TO_16: u32 =
    ANY_CHANNELS | ANY_PLANAR | ANY_SWAPFIRST | ANY_FLAVOR | ANY_SWAP | ANY_EXTRA | ANY_SPACE;
const BYTES_ANY: u32 =
    ANY_FLAVOR | ANY_SWAPFIRST | ANY_PREMUL | ANY_SWAP | ANY_EXTRA | ANY_CHANNELS | ANY_SPACE;
const WORDS: u32 =
    ANY_FLAVOR | ANY_SWAPFIRST | ANY_SWAP | ANY_ENDIAN | ANY_EXTRA | ANY_CHANNELS | ANY_SPACE;

static INPUT_16: &[Entry<Unpack16Fn>] = &[
    entry(LAB_DBL, PCS, unroll_lab_double_to_16),
    entry(XYZ_DBL, PCS, unroll_xyz_double_to_16),
    entry(LAB_FLT, PCS, unroll_lab_float_to_16),
    entry(XYZ_FLT, PCS, unroll_xyz_float_to_16),
    entry(PixelFormat::GRAY_DBL.bits(), 0, unroll_double_1_chan),
    entry(FLOAT | layout(0, 0), FLOAT_TO_16, unroll_double_to_16),
    entry(FLOAT | layout(0, 4), FLOAT_TO_16, unroll_float_to_16),
    entry(layout(1, 1), ANY_SPACE, unroll_1_byte),
    entry(layout_extra(1, 1, 1), ANY_SPACE, unroll_1_byte_skip1),
    entry(layout_extra(1, 1, 2), ANY_SPACE, unroll_1_byte_skip2),
    entry(layout(1, 1) | FLAVOR, ANY_SPACE, unroll_1_byte_reversed),
    entry(PixelFormat::MCH2_8.bits(), 0, unroll_2_bytes),
    entry(LABV2_8, 0, unroll_labv2_8),
    entry(ALABV2_8, 0, unroll_alabv2_8),
    entry(LABV2_16, 0, unroll_labv2_16),
    entry(layout(3, 1), ANY_SPACE, unroll_3_bytes),
    entry(layout(3, 1) | DOSWAP, ANY_SPACE, unroll_3_bytes_swap),
    entry(layout_extra(3, 1, 1) | DOSWAP, ANY_SPACE, unroll_3_bytes_skip1_swap),
    entry(layout_extra(3, 1, 1) | SWAPFIRST, ANY_SPACE, unroll_3_bytes_skip1_swap_first),
    entry(
        layout_extra(3, 1, 1) | DOSWAP | SWAPFIRST,
        ANY_SPACE,
        unroll_3_bytes_skip1_swap_swap_first,
    ),
    entry(layout(4, 1), ANY_SPACE, unroll_4_bytes),
    entry(layout(4, 1) | FLAVOR, ANY_SPACE, unroll_4_bytes_reverse),
    entry(layout(4, 1) | SWAPFIRST, ANY_SPACE, unroll_4_bytes_swap_first),
    entry(layout(4, 1) | DOSWAP, ANY_SPACE, unroll_4_bytes_swap),
    entry(layout(4, 1) | DOSWAP | SWAPFIRST, ANY_SPACE, unroll_4_bytes_swap_swap_first),
    entry(layout(0, 1) | PLANAR, BYTES_ANY, unroll_planar_bytes),
    entry(layout(0, 1), BYTES_ANY, unroll_chunky_bytes),
    entry(layout(1, 2), ANY_SPACE, unroll_1_word),
    entry(layout(1, 2) | FLAVOR, ANY_SPACE, unroll_1_word_reversed),
    entry(layout_extra(1, 2, 3), ANY_SPACE, unroll_1_word_skip3),
    entry(layout(2, 2), ANY_SPACE, unroll_2_words),
    entry(layout(3, 2), ANY_SPACE, unroll_3_words),
    entry(layout(4, 2), ANY_SPACE, unroll_4_words),
    entry(layout(3, 2) | DOSWAP, ANY_SPACE, unroll_3_words_swap),
    entry(layout_extra(3, 2, 1) | SWAPFIRST, ANY_SPACE, unroll_3_words_skip1_swap_first),
    entry(layout_extra(3, 2, 1) | DOSWAP, ANY_SPACE, unroll_3_words_skip1_swap),
    entry(layout(4, 2) | FLAVOR, ANY_SPACE, unroll_4_words_reverse),
    entry(layout(4, 2) | SWAPFIRST, ANY_SPACE, unroll_4_words_swap_first),
    entry(layout(4, 2) | DOSWAP, ANY_SPACE, unroll_4_words_swap),
    entry(layout(4, 2) | DOSWAP | SWAPFIRST, ANY_SPACE, unroll_4_words_swap_swap_first),
    entry(layout(0, 2) | PLANAR, WORDS, unroll_planar_words),
    entry(layout(0, 2), WORDS, unroll_any_words),
    entry(layout(0, 2) | PLANAR | PREMUL, WORDS, unroll_planar_words),
    entry(layout(0, 2) | PREMUL, WORDS, unroll_any_words),
];

const FLOATS_IN: u32 =
    ANY_PLANAR | ANY_SWAPFIRST | ANY_SWAP | ANY_EXTRA | ANY_PREMUL | ANY_CHANNELS | ANY_SPACE | ANY_FLAVOR;
const INTS_TO_FLOAT: u32 =
    ANY_PLANAR | ANY_SWAPFIRST | ANY_SWAP | ANY_EXTRA | ANY_CHANNELS | ANY_SPACE | ANY_FLAVOR;

static INPUT_FLOAT: &[Entry<UnpackFloatFn>] = &[
    entry(LAB_DBL, PCS, unroll_lab_double_to_float),
    entry(LAB_FLT, PCS, unroll_lab_float_to_float),
    entry(XYZ_DBL, PCS, unroll_xyz_double_to_float),
    entry(XYZ_FLT, PCS, unroll_xyz_float_to_float),
    entry(FLOAT | layout(0, 4), FLOATS_IN, unroll_floats_to_float),
    entry(FLOAT | layout(0, 0), FLOATS_IN, unroll_doubles_to_float),
    entry(LABV2_8, 0, unroll_labv2_8_to_float),
    entry(ALABV2_8, 0, unroll_alabv2_8_to_float),
    entry(LABV2_16, 0, unroll_labv2_16_to_float),
    entry(layout(0, 1), INTS_TO_FLOAT, unroll_8_to_float),
    entry(layout(0, 2), INTS_TO_FLOAT | ANY_ENDIAN, unroll_16_to_float),
];

const FROM_16_TO_FLOAT: u32 =
    ANY_FLAVOR | ANY_SWAPFIRST | ANY_SWAP | ANY_CHANNELS | ANY_PLANAR | ANY_EXTRA | ANY_SPACE;
const BYTES_OUT: u32 =
    ANY_FLAVOR | ANY_SWAPFIRST | ANY_SWAP | ANY_EXTRA | ANY_CHANNELS | ANY_SPACE | ANY_PREMUL;
const WORDS_OUT: u32 = BYTES_OUT | ANY_ENDIAN;

static OUTPUT_16: &[Entry<Pack16Fn>] = &[
    entry(LAB_DBL, PCS, pack_lab_double_from_16),
    entry(XYZ_DBL, PCS, pack_xyz_double_from_16),
    entry(LAB_FLT, PCS, pack_lab_float_from_16),
    entry(XYZ_FLT, PCS, pack_xyz_float_from_16),
    entry(FLOAT | layout(0, 0), FROM_16_TO_FLOAT, pack_double_from_16),
    entry(FLOAT | layout(0, 4), FROM_16_TO_FLOAT, pack_float_from_16),
    entry(layout(1, 1), ANY_SPACE, pack_1_byte),
    entry(layout_extra(1, 1, 1), ANY_SPACE, pack_1_byte_skip1),
    entry(layout_extra(1, 1, 1) | SWAPFIRST, ANY_SPACE, pack_1_byte_skip1_swap_first),
    entry(layout(1, 1) | FLAVOR, ANY_SPACE, pack_1_byte_reversed),
    entry(LABV2_8, 0, pack_labv2_8),
    entry(ALABV2_8, 0, pack_alabv2_8),
    entry(LABV2_16, 0, pack_labv2_16),
    entry(layout(3, 1), ANY_SPACE, pack_3_bytes),
    entry(layout_extra(3, 1, 1), ANY_SPACE, pack_3_bytes_and_skip1),
    entry(layout_extra(3, 1, 1) | SWAPFIRST, ANY_SPACE, pack_3_bytes_and_skip1_swap_first),
    entry(
        layout_extra(3, 1, 1) | DOSWAP | SWAPFIRST,
        ANY_SPACE,
        pack_3_bytes_and_skip1_swap_swap_first,
    ),
    entry(layout_extra(3, 1, 1) | DOSWAP, ANY_SPACE, pack_3_bytes_and_skip1_swap),
    entry(layout(3, 1) | DOSWAP, ANY_SPACE, pack_3_bytes_swap),
    entry(layout(4, 1), ANY_SPACE, pack_4_bytes),
    entry(layout(4, 1) | FLAVOR, ANY_SPACE, pack_4_bytes_reverse),
    entry(layout(4, 1) | SWAPFIRST, ANY_SPACE, pack_4_bytes_swap_first),
    entry(layout(4, 1) | DOSWAP, ANY_SPACE, pack_4_bytes_swap),
    entry(layout(4, 1) | DOSWAP | SWAPFIRST, ANY_SPACE, pack_4_bytes_swap_swap_first),
    entry(layout(6, 1), ANY_SPACE, pack_6_bytes),
    entry(layout(6, 1) | DOSWAP, ANY_SPACE, pack_6_bytes_swap),
    entry(layout(0, 1), BYTES_OUT, pack_chunky_bytes),
    entry(layout(0, 1) | PLANAR, BYTES_OUT, pack_planar_bytes),
    entry(layout(1, 2), ANY_SPACE, pack_1_word),
    entry(layout_extra(1, 2, 1), ANY_SPACE, pack_1_word_skip1),
    entry(layout_extra(1, 2, 1) | SWAPFIRST, ANY_SPACE, pack_1_word_skip1_swap_first),
    entry(layout(1, 2) | FLAVOR, ANY_SPACE, pack_1_word_reversed),
    entry(layout(1, 2) | ENDIAN16, ANY_SPACE, pack_1_word_big_endian),
    entry(layout(3, 2), ANY_SPACE, pack_3_words),
    entry(layout(3, 2) | DOSWAP, ANY_SPACE, pack_3_words_swap),
    entry(layout(3, 2) | ENDIAN16, ANY_SPACE, pack_3_words_big_endian),
    entry(layout_extra(3, 2, 1), ANY_SPACE, pack_3_words_and_skip1),
    entry(layout_extra(3, 2, 1) | DOSWAP, ANY_SPACE, pack_3_words_and_skip1_swap),
    entry(layout_extra(3, 2, 1) | SWAPFIRST, ANY_SPACE, pack_3_words_and_skip1_swap_first),
    entry(
        layout_extra(3, 2, 1) | DOSWAP | SWAPFIRST,
        ANY_SPACE,
        pack_3_words_and_skip1_swap_swap_first,
    ),
    entry(layout(4, 2), ANY_SPACE, pack_4_words),
    entry(layout(4, 2) | FLAVOR, ANY_SPACE, pack_4_words_reverse),
    entry(layout(4, 2) | DOSWAP, ANY_SPACE, pack_4_words_swap),
    entry(layout(4, 2) | ENDIAN16, ANY_SPACE, pack_4_words_big_endian),
    entry(layout(6, 2), ANY_SPACE, pack_6_words),
    entry(layout(6, 2) | DOSWAP, ANY_SPACE, pack_6_words_swap),
    entry(layout(0, 2), WORDS_OUT, pack_chunky_words),
    entry(layout(0, 2) | PLANAR, WORDS_OUT, pack_planar_words),
];

const FLOAT_OUT: u32 =
    ANY_PLANAR | ANY_FLAVOR | ANY_SWAPFIRST | ANY_SWAP | ANY_EXTRA | ANY_CHANNELS | ANY_SPACE;

static OUTPUT_FLOAT: &[Entry<PackFloatFn>] = &[
    entry(LAB_FLT, PCS, pack_lab_float_from_float),
    entry(XYZ_FLT, PCS, pack_xyz_float_from_float),
    entry(LAB_DBL, PCS, pack_lab_double_from_float),
    entry(XYZ_DBL, PCS, pack_xyz_double_from_float),
    entry(LABV2_8, PCS, pack_encoded_bytes_labv2_from_float),
    entry(LABV2_16, PCS, pack_encoded_words_labv2_from_float),
    entry(FLOAT | layout(0, 4), FLOAT_OUT, pack_floats_from_float),
    entry(FLOAT | layout(0, 0), FLOAT_OUT, pack_doubles_from_float),
    entry(layout(0, 2), FLOAT_OUT, pack_words_from_float),
    entry(layout(0, 1), FLOAT_OUT, pack_bytes_from_float),
];

pub(super) fn stock_input_16(bits: u32) -> Option<Unpack16Fn> {
    let found = find(INPUT_16, bits);
    #[cfg(feature = "half")]
    let found = found.or_else(|| find(super::half::INPUT_16, bits));
    found
}

pub(super) fn stock_input_float(bits: u32) -> Option<UnpackFloatFn> {
    let found = find(INPUT_FLOAT, bits);
    #[cfg(feature = "half")]
    let found = found.or_else(|| find(super::half::INPUT_FLOAT, bits));
    found
}

pub(super) fn stock_output_16(bits: u32) -> Option<Pack16Fn> {
    let found = find(OUTPUT_16, bits);
    #[cfg(feature = "half")]
    let found = found.or_else(|| find(super::half::OUTPUT_16, bits));
    found
}

pub(super) fn stock_output_float(bits: u32) -> Option<PackFloatFn> {
    let found = find(OUTPUT_FLOAT, bits);
    #[cfg(feature = "half")]
    let found = found.or_else(|| find(super::half::OUTPUT_FLOAT, bits));
    found
}

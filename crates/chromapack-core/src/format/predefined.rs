//! Named pixel formats for common memory layouts

use super::{PixelFormat, pixel_type as pt};

const fn fmt(space: u32, channels: u32, bytes: u32) -> PixelFormat {
    PixelFormat::new(space, channels, bytes)
}

impl PixelFormat {
    // Gray
    pub const GRAY_8: Self = fmt(pt::GRAY, 1, 1);
    pub const GRAY_8_REV: Self = fmt(pt::GRAY, 1, 1).reversed();
    pub const GRAY_16: Self = fmt(pt::GRAY, 1, 2);
    pub const GRAY_16_REV: Self = fmt(pt::GRAY, 1, 2).reversed();
    pub const GRAY_16_SE: Self = fmt(pt::GRAY, 1, 2).endian_swapped();
    pub const GRAYA_8: Self = fmt(pt::GRAY, 1, 1).with_extra(1);
    pub const GRAYA_8_PREMUL: Self = fmt(pt::GRAY, 1, 1).with_extra(1).premultiplied();
    pub const GRAYA_16: Self = fmt(pt::GRAY, 1, 2).with_extra(1);
    pub const AGRAY_8: Self = fmt(pt::GRAY, 1, 1).with_extra(1).swap_first();
    pub const GRAY_FLT: Self = fmt(pt::GRAY, 1, 4).float();
    pub const GRAY_DBL: Self = fmt(pt::GRAY, 1, 0).float();
    pub const GRAY_HALF_FLT: Self = fmt(pt::GRAY, 1, 2).float();

    // RGB
    pub const RGB_8: Self = fmt(pt::RGB, 3, 1);
    pub const RGB_8_PLANAR: Self = fmt(pt::RGB, 3, 1).planar();
    pub const BGR_8: Self = fmt(pt::RGB, 3, 1).swapped();
    pub const RGB_16: Self = fmt(pt::RGB, 3, 2);
    pub const RGB_16_PLANAR: Self = fmt(pt::RGB, 3, 2).planar();
    pub const RGB_16_SE: Self = fmt(pt::RGB, 3, 2).endian_swapped();
    pub const BGR_16: Self = fmt(pt::RGB, 3, 2).swapped();
    pub const RGBA_8: Self = fmt(pt::RGB, 3, 1).with_extra(1);
    pub const RGBA_8_PREMUL: Self = fmt(pt::RGB, 3, 1).with_extra(1).premultiplied();
    pub const RGBA_8_PLANAR: Self = fmt(pt::RGB, 3, 1).with_extra(1).planar();
    pub const RGBA_16: Self = fmt(pt::RGB, 3, 2).with_extra(1);
    pub const RGBA_16_PREMUL: Self = fmt(pt::RGB, 3, 2).with_extra(1).premultiplied();
    pub const RGBA_16_PLANAR: Self = fmt(pt::RGB, 3, 2).with_extra(1).planar();
    pub const RGBA_16_SE: Self = fmt(pt::RGB, 3, 2).with_extra(1).endian_swapped();
    pub const ARGB_8: Self = fmt(pt::RGB, 3, 1).with_extra(1).swap_first();
    pub const ARGB_8_PREMUL: Self = fmt(pt::RGB, 3, 1).with_extra(1).swap_first().premultiplied();
    pub const ARGB_16: Self = fmt(pt::RGB, 3, 2).with_extra(1).swap_first();
    pub const ABGR_8: Self = fmt(pt::RGB, 3, 1).with_extra(1).swapped();
    pub const ABGR_16: Self = fmt(pt::RGB, 3, 2).with_extra(1).swapped();
    pub const BGRA_8: Self = fmt(pt::RGB, 3, 1).with_extra(1).swapped().swap_first();
    pub const BGRA_8_PREMUL: Self = fmt(pt::RGB, 3, 1)
        .with_extra(1)
        .swapped()
        .swap_first()
        .premultiplied();
    pub const BGRA_16: Self = fmt(pt::RGB, 3, 2).with_extra(1).swapped().swap_first();
    pub const RGB_FLT: Self = fmt(pt::RGB, 3, 4).float();
    pub const RGBA_FLT: Self = fmt(pt::RGB, 3, 4).with_extra(1).float();
    pub const RGBA_FLT_PREMUL: Self = fmt(pt::RGB, 3, 4).with_extra(1).float().premultiplied();
    pub const ARGB_FLT: Self = fmt(pt::RGB, 3, 4).with_extra(1).swap_first().float();
    pub const BGR_FLT: Self = fmt(pt::RGB, 3, 4).swapped().float();
    pub const RGB_DBL: Self = fmt(pt::RGB, 3, 0).float();
    pub const RGB_HALF_FLT: Self = fmt(pt::RGB, 3, 2).float();
    pub const RGBA_HALF_FLT: Self = fmt(pt::RGB, 3, 2).with_extra(1).float();

    // CMY / CMYK
    pub const CMY_8: Self = fmt(pt::CMY, 3, 1);
    pub const CMY_16: Self = fmt(pt::CMY, 3, 2);
    pub const CMYK_8: Self = fmt(pt::CMYK, 4, 1);
    pub const CMYKA_8: Self = fmt(pt::CMYK, 4, 1).with_extra(1);
    pub const CMYK_8_REV: Self = fmt(pt::CMYK, 4, 1).reversed();
    pub const CMYK_8_PLANAR: Self = fmt(pt::CMYK, 4, 1).planar();
    pub const CMYK_16: Self = fmt(pt::CMYK, 4, 2);
    pub const CMYK_16_REV: Self = fmt(pt::CMYK, 4, 2).reversed();
    pub const CMYK_16_PLANAR: Self = fmt(pt::CMYK, 4, 2).planar();
    pub const CMYK_16_SE: Self = fmt(pt::CMYK, 4, 2).endian_swapped();
    pub const KYMC_8: Self = fmt(pt::CMYK, 4, 1).swapped();
    pub const KYMC_16: Self = fmt(pt::CMYK, 4, 2).swapped();
    pub const KCMY_8: Self = fmt(pt::CMYK, 4, 1).swap_first();
    pub const KCMY_16: Self = fmt(pt::CMYK, 4, 2).swap_first();
    pub const CMYK_FLT: Self = fmt(pt::CMYK, 4, 4).float();
    pub const CMYK_DBL: Self = fmt(pt::CMYK, 4, 0).float();
    pub const CMYK_HALF_FLT: Self = fmt(pt::CMYK, 4, 2).float();

    // Multi-ink
    pub const CMYK5_8: Self = fmt(pt::MCH5, 5, 1);
    pub const CMYK6_8: Self = fmt(pt::MCH6, 6, 1);
    pub const CMYK6_8_PLANAR: Self = fmt(pt::MCH6, 6, 1).planar();
    pub const CMYK6_16: Self = fmt(pt::MCH6, 6, 2);
    pub const CMYK7_8: Self = fmt(pt::MCH7, 7, 1);
    pub const CMYK8_16: Self = fmt(pt::MCH8, 8, 2);
    pub const CMYK6_8_SWAP: Self = fmt(pt::MCH6, 6, 1).swapped();

    // Lab
    pub const LAB_8: Self = fmt(pt::LAB, 3, 1);
    pub const LABV2_8: Self = fmt(pt::LAB_V2, 3, 1);
    pub const ALAB_8: Self = fmt(pt::LAB, 3, 1).with_extra(1).swap_first();
    pub const ALABV2_8: Self = fmt(pt::LAB_V2, 3, 1).with_extra(1).swap_first();
    pub const LAB_16: Self = fmt(pt::LAB, 3, 2);
    pub const LABV2_16: Self = fmt(pt::LAB_V2, 3, 2);
    pub const LAB_FLT: Self = fmt(pt::LAB, 3, 4).float();
    pub const LABA_FLT: Self = fmt(pt::LAB, 3, 4).with_extra(1).float();
    pub const LAB_DBL: Self = fmt(pt::LAB, 3, 0).float();

    // XYZ
    pub const XYZ_16: Self = fmt(pt::XYZ, 3, 2);
    pub const XYZ_FLT: Self = fmt(pt::XYZ, 3, 4).float();
    pub const XYZ_DBL: Self = fmt(pt::XYZ, 3, 0).float();

    // Two-ink
    pub const MCH2_8: Self = fmt(pt::MCH2, 2, 1);
}

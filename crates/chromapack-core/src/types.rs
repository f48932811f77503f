//! Public API types for chromapack
//!
//! Color space families, profile classes and rendering intents shared by the
//! pixel format layer and the estimation entry points.

/// Color space of profile data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColorSpace {
    /// Grayscale
    Gray,
    /// RGB color space
    Rgb,
    /// CMY (without K)
    Cmy,
    /// CMYK color space
    Cmyk,
    /// YCbCr (video)
    YCbCr,
    /// YUV (video)
    Yuv,
    /// CIEXYZ
    Xyz,
    /// CIELAB
    Lab,
    /// YUV plus black
    Yuvk,
    /// HSV (hue, saturation, value)
    Hsv,
    /// HLS (hue, lightness, saturation)
    Hls,
    /// CIE Yxy
    Yxy,
    /// Generic N-ink space, 1 to 15 channels
    MultiChannel(u8),
}

impl ColorSpace {
    /// Number of channels for this color space
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb
            | Self::Cmy
            | Self::YCbCr
            | Self::Yuv
            | Self::Xyz
            | Self::Lab
            | Self::Hsv
            | Self::Hls
            | Self::Yxy => 3,
            Self::Cmyk | Self::Yuvk => 4,
            Self::MultiChannel(n) => *n as usize,
        }
    }

    /// Pixel type code stored in the color space field of a [`PixelFormat`](crate::PixelFormat)
    pub fn pixel_type(&self) -> u32 {
        use crate::format::pixel_type as pt;
        match self {
            Self::Gray => pt::GRAY,
            Self::Rgb => pt::RGB,
            Self::Cmy => pt::CMY,
            Self::Cmyk => pt::CMYK,
            Self::YCbCr => pt::YCBCR,
            Self::Yuv => pt::YUV,
            Self::Xyz => pt::XYZ,
            Self::Lab => pt::LAB,
            Self::Yuvk => pt::YUVK,
            Self::Hsv => pt::HSV,
            Self::Hls => pt::HLS,
            Self::Yxy => pt::YXY,
            Self::MultiChannel(n) => pt::MCH1 + (*n as u32).saturating_sub(1),
        }
    }

    /// Inverse of [`pixel_type`](Self::pixel_type). Legacy Lab V2 maps to Lab.
    pub fn from_pixel_type(code: u32) -> Option<Self> {
        use crate::format::pixel_type as pt;
        Some(match code {
            pt::GRAY => Self::Gray,
            pt::RGB => Self::Rgb,
            pt::CMY => Self::Cmy,
            pt::CMYK => Self::Cmyk,
            pt::YCBCR => Self::YCbCr,
            pt::YUV => Self::Yuv,
            pt::XYZ => Self::Xyz,
            pt::LAB | pt::LAB_V2 => Self::Lab,
            pt::YUVK => Self::Yuvk,
            pt::HSV => Self::Hsv,
            pt::HLS => Self::Hls,
            pt::YXY => Self::Yxy,
            c if (pt::MCH1..=pt::MCH15).contains(&c) => Self::MultiChannel((c - pt::MCH1 + 1) as u8),
            _ => return None,
        })
    }

    /// Check if this is a profile connection space (Lab or XYZ)
    pub fn is_pcs(&self) -> bool {
        matches!(self, Self::Lab | Self::Xyz)
    }

    /// Check if values in this space are ink percentages
    pub fn is_ink(&self) -> bool {
        crate::format::is_ink_space(self.pixel_type())
    }

    /// Check if this is an RGB-like color space
    pub fn is_rgb(&self) -> bool {
        matches!(self, Self::Rgb)
    }

    /// Check if this is a CMYK color space
    pub fn is_cmyk(&self) -> bool {
        matches!(self, Self::Cmyk)
    }

    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gray => "GRAY",
            Self::Rgb => "RGB",
            Self::Cmy => "CMY",
            Self::Cmyk => "CMYK",
            Self::YCbCr => "YCbCr",
            Self::Yuv => "YUV",
            Self::Xyz => "XYZ",
            Self::Lab => "Lab",
            Self::Yuvk => "YUVK",
            Self::Hsv => "HSV",
            Self::Hls => "HLS",
            Self::Yxy => "Yxy",
            Self::MultiChannel(_) => "MCH",
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MultiChannel(n) => write!(f, "MCH{n}"),
            other => f.write_str(other.name()),
        }
    }
}

/// ICC profile class (device type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ProfileClass {
    /// Input device (scanner, camera)
    Input,
    /// Display device (monitor)
    Display,
    /// Output device (printer)
    Output,
    /// Device link (direct device-to-device)
    DeviceLink,
    /// Color space conversion
    ColorSpace,
    /// Abstract profile
    Abstract,
    /// Named color profile
    NamedColor,
}

/// Rendering intent for color transformations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum RenderingIntent {
    /// Perceptual - compress gamut to fit, preserve relationships
    #[default]
    Perceptual,
    /// Relative colorimetric - map white point, clip out-of-gamut
    RelativeColorimetric,
    /// Saturation - preserve saturation over accuracy
    Saturation,
    /// Absolute colorimetric - no white point mapping
    AbsoluteColorimetric,
}

impl RenderingIntent {
    /// Convert from ICC rendering intent value
    pub fn from_icc(value: u32) -> Self {
        match value {
            1 => Self::RelativeColorimetric,
            2 => Self::Saturation,
            3 => Self::AbsoluteColorimetric,
            _ => Self::Perceptual,
        }
    }

    /// Convert to ICC rendering intent value
    pub fn to_icc(&self) -> u32 {
        match self {
            Self::Perceptual => 0,
            Self::RelativeColorimetric => 1,
            Self::Saturation => 2,
            Self::AbsoluteColorimetric => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_space_channels() {
        assert_eq!(ColorSpace::Rgb.channels(), 3);
        assert_eq!(ColorSpace::Cmyk.channels(), 4);
        assert_eq!(ColorSpace::Gray.channels(), 1);
        assert_eq!(ColorSpace::MultiChannel(7).channels(), 7);
    }

    #[test]
    fn test_pixel_type_roundtrip() {
        let spaces = [
            ColorSpace::Gray,
            ColorSpace::Rgb,
            ColorSpace::Cmyk,
            ColorSpace::Lab,
            ColorSpace::Xyz,
            ColorSpace::MultiChannel(1),
            ColorSpace::MultiChannel(15),
        ];
        for cs in spaces {
            assert_eq!(ColorSpace::from_pixel_type(cs.pixel_type()), Some(cs));
        }
        assert_eq!(ColorSpace::from_pixel_type(0), None);
    }

    #[test]
    fn test_ink_spaces() {
        assert!(ColorSpace::Cmyk.is_ink());
        assert!(ColorSpace::Cmy.is_ink());
        assert!(ColorSpace::MultiChannel(6).is_ink());
        assert!(!ColorSpace::MultiChannel(2).is_ink());
        assert!(!ColorSpace::Rgb.is_ink());
    }

    #[test]
    fn test_render_intent_roundtrip() {
        for i in 0..4 {
            assert_eq!(RenderingIntent::from_icc(i).to_icc(), i);
        }
    }
}

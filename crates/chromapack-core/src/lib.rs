//! # chromapack - pixel codecs and profile estimators
//!
//! The pixel format layer and the profile analysis tools of a color
//! management system.
//!
//! ## Pixel codecs
//!
//! A [`PixelFormat`] packs a whole buffer layout into one `u32`: color
//! space, channel and extra-channel counts, sample width, planar layout,
//! channel order, endianness, sign flavor, premultiplied alpha. Codecs
//! ("formatters") move one pixel between such a buffer and a canonical
//! 16-bit or float channel vector. The stock tables cover every 8- and
//! 16-bit integer layout the descriptor can express; plugin factories
//! registered on a [`Context`] take precedence over them.
//!
//! ## Estimators
//!
//! - [`build_gamut_check`]: per-node out-of-gamut table for proofing
//! - [`detect_tac`]: total ink coverage of an output profile
//! - [`build_k_tone_curve`]: black channel relationship between CMYK chains
//! - [`detect_rgb_profile_gamma`]: apparent gamma of an RGB profile
//!
//! Estimators run on any [`CmsBackend`]. [`ReferenceCms`] evaluates
//! [`DeviceModel`] chains in double precision.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chromapack_core::{Profile, ReferenceCms, detect_tac};
//!
//! let cms = ReferenceCms::default();
//! let coverage = detect_tac(&cms, &Profile::naive_cmyk());
//! println!("TAC: {coverage:.1}%");
//! ```
//!
//! ## Features
//!
//! - `half` (default): half-float codecs
//! - `parallel`: grid sampling through rayon

pub mod clut;
pub mod color;
pub mod context;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod format;
pub mod formatters;
pub mod math;
pub mod profile;
pub mod registry;
pub mod sampling;
pub mod simd;
pub mod tone_curve;
pub mod types;

pub use clut::Clut16;
pub use context::{Context, TransformFlags};
pub use engine::{CmsBackend, ColorTransform, ReferenceCms, ReferenceTransform};
pub use error::{Error, Result};
pub use estimate::{
    TacEstimate, build_gamut_check, build_k_tone_curve, detect_rgb_profile_gamma, detect_tac,
    estimate_tac, gamut_decision,
};
pub use format::PixelFormat;
pub use formatters::{Direction, Formatter, Representation};
pub use profile::{
    ChainLink, DeviceModel, Profile, ProfileChain, formatter_for_color_space_of_profile,
    formatter_for_pcs_of_profile,
};
pub use registry::{FormatterFactory, FormatterRegistry};
pub use tone_curve::ToneCurve;
pub use types::{ColorSpace, ProfileClass, RenderingIntent};

/// Version of chromapack
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Color profiles and profile chains
//!
//! A [`Profile`] is a shared handle to a [`DeviceModel`]: the two
//! directions between a device space and the profile connection space,
//! plus the header facts transform construction needs (color space, PCS,
//! device class). Parsing ICC data is not part of this crate; models are
//! built in code, see [`crate::engine::models`].

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::format::{MAX_CHANNELS, PixelFormat};
use crate::types::{ColorSpace, ProfileClass, RenderingIntent};

/// Longest chain a caller may build
pub const MAX_CHAIN_PROFILES: usize = 255;

/// Conversion between a device space and the PCS
///
/// Device values are unit floats, `0..=1` per channel (ink spaces included).
/// PCS values are real Lab (`L` 0..100) or XYZ (`Y` = 1 for the D50 white),
/// whichever [`pcs`](Self::pcs) names.
pub trait DeviceModel: Send + Sync + fmt::Debug {
    /// Device side color space
    fn color_space(&self) -> ColorSpace;

    /// Connection space, Lab or XYZ. Device links report their output space.
    fn pcs(&self) -> ColorSpace {
        ColorSpace::Lab
    }

    fn class(&self) -> ProfileClass;

    /// Pure matrix/shaper model with an exact inverse
    fn is_matrix_shaper(&self) -> bool {
        false
    }

    /// Whether [`from_pcs`](Self::from_pcs) is implemented
    fn supports_from_pcs(&self) -> bool {
        true
    }

    /// Device to PCS
    fn to_pcs(&self, intent: RenderingIntent, device: &[f64]) -> [f64; 3];

    /// PCS to device, writing `color_space().channels()` values
    fn from_pcs(&self, intent: RenderingIntent, pcs: [f64; 3], device: &mut [f64]);
}

/// Shared handle to a device model
///
/// Cloning is cheap and never copies the model. Chains hold clones, so the
/// caller's handle stays valid after any transform built from it is gone.
#[derive(Clone)]
pub struct Profile {
    model: Arc<dyn DeviceModel>,
}

impl Profile {
    pub fn new<M: DeviceModel + 'static>(model: M) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    pub fn from_arc(model: Arc<dyn DeviceModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Arc<dyn DeviceModel> {
        &self.model
    }

    pub fn color_space(&self) -> ColorSpace {
        self.model.color_space()
    }

    pub fn pcs(&self) -> ColorSpace {
        self.model.pcs()
    }

    pub fn class(&self) -> ProfileClass {
        self.model.class()
    }

    pub fn is_matrix_shaper(&self) -> bool {
        self.model.is_matrix_shaper()
    }

    /// Same underlying model
    pub fn ptr_eq(&self, other: &Profile) -> bool {
        Arc::ptr_eq(&self.model, &other.model)
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("class", &self.class())
            .field("color_space", &self.color_space())
            .field("pcs", &self.pcs())
            .field("model", &self.model)
            .finish()
    }
}

/// One profile in a chain with its per-link options
#[derive(Debug, Clone)]
pub struct ChainLink {
    pub profile: Profile,
    pub intent: RenderingIntent,
    pub black_point_compensation: bool,
    /// Chromatic adaptation strength, 1.0 = full
    pub adaptation_state: f64,
}

impl ChainLink {
    /// Link with no black point compensation and full adaptation
    pub fn new(profile: Profile, intent: RenderingIntent) -> Self {
        Self {
            profile,
            intent,
            black_point_compensation: false,
            adaptation_state: 1.0,
        }
    }

    pub fn with_bpc(mut self, bpc: bool) -> Self {
        self.black_point_compensation = bpc;
        self
    }

    pub fn with_adaptation_state(mut self, state: f64) -> Self {
        self.adaptation_state = state;
        self
    }
}

/// Ordered profile sequence, at most [`MAX_CHAIN_PROFILES`] long
#[derive(Debug, Clone, Default)]
pub struct ProfileChain {
    links: Vec<ChainLink>,
}

impl ProfileChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain of `profiles`, all with the same intent
    pub fn from_profiles(profiles: &[Profile], intent: RenderingIntent) -> Result<Self> {
        let mut chain = Self::new();
        for p in profiles {
            chain.push(ChainLink::new(p.clone(), intent))?;
        }
        Ok(chain)
    }

    pub fn push(&mut self, link: ChainLink) -> Result<()> {
        if self.links.len() >= MAX_CHAIN_PROFILES {
            return Err(Error::Range {
                what: "profile chain length",
                value: self.links.len() + 1,
                min: 1,
                max: MAX_CHAIN_PROFILES,
            });
        }
        self.links.push(link);
        Ok(())
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, profile: Profile, intent: RenderingIntent) -> Result<Self> {
        self.push(ChainLink::new(profile, intent))?;
        Ok(self)
    }

    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn first(&self) -> Option<&Profile> {
        self.links.first().map(|l| &l.profile)
    }

    pub fn last(&self) -> Option<&Profile> {
        self.links.last().map(|l| &l.profile)
    }
}

fn synthesize(space: ColorSpace, n_bytes: u32, is_float: bool) -> Option<PixelFormat> {
    let channels = space.channels();
    if channels == 0 || channels >= MAX_CHANNELS || !matches!(n_bytes, 0 | 1 | 2 | 4) {
        return None;
    }
    Some(PixelFormat::for_color_space(space, n_bytes, is_float))
}

/// Descriptor for the device side of `profile`
///
/// `None` when the color space has no usable channel count or `n_bytes`
/// is not a sample width.
pub fn formatter_for_color_space_of_profile(
    profile: &Profile,
    n_bytes: u32,
    is_float: bool,
) -> Option<PixelFormat> {
    synthesize(profile.color_space(), n_bytes, is_float)
}

/// Descriptor for the PCS side of `profile`
pub fn formatter_for_pcs_of_profile(
    profile: &Profile,
    n_bytes: u32,
    is_float: bool,
) -> Option<PixelFormat> {
    synthesize(profile.pcs(), n_bytes, is_float)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_capacity() {
        let lab = Profile::lab_identity();
        let mut chain = ProfileChain::new();
        for _ in 0..MAX_CHAIN_PROFILES {
            chain.push(ChainLink::new(lab.clone(), RenderingIntent::Perceptual)).unwrap();
        }
        let err = chain
            .push(ChainLink::new(lab.clone(), RenderingIntent::Perceptual))
            .unwrap_err();
        assert!(matches!(err, Error::Range { value: 256, .. }));
        assert_eq!(chain.len(), MAX_CHAIN_PROFILES);
    }

    #[test]
    fn test_chain_shares_profiles() {
        let srgb = Profile::srgb();
        let chain = ProfileChain::new()
            .with(srgb.clone(), RenderingIntent::Perceptual)
            .unwrap()
            .with(Profile::lab_identity(), RenderingIntent::RelativeColorimetric)
            .unwrap();
        assert!(chain.first().unwrap().ptr_eq(&srgb));
        assert_eq!(chain.links()[1].intent, RenderingIntent::RelativeColorimetric);
        assert_eq!(chain.links()[0].adaptation_state, 1.0);
    }

    #[test]
    fn test_formatter_for_profile() {
        let cmyk = Profile::naive_cmyk();
        let f = formatter_for_color_space_of_profile(&cmyk, 4, true).unwrap();
        assert_eq!(f, PixelFormat::CMYK_FLT);

        let f = formatter_for_color_space_of_profile(&cmyk, 2, false).unwrap();
        assert_eq!(f, PixelFormat::CMYK_16);

        let f = formatter_for_pcs_of_profile(&cmyk, 0, true).unwrap();
        assert_eq!(f, PixelFormat::LAB_DBL);

        let f = formatter_for_pcs_of_profile(&Profile::srgb(), 2, false).unwrap();
        assert_eq!(f, PixelFormat::XYZ_16);

        assert!(formatter_for_color_space_of_profile(&cmyk, 3, false).is_none());
    }

    #[test]
    fn test_link_options() {
        let model: Arc<dyn DeviceModel> = Arc::new(crate::engine::models::LabIdentity);
        let shared = Profile::from_arc(model.clone());
        assert!(Arc::ptr_eq(shared.model(), &model));

        let link = ChainLink::new(shared, RenderingIntent::Saturation)
            .with_bpc(true)
            .with_adaptation_state(0.5);
        assert!(link.black_point_compensation);
        assert!((link.adaptation_state - 0.5).abs() < 1e-12);
    }
}

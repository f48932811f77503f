//! Gamut check table
//!
//! Every node of a device grid is converted to Lab through the caller's
//! chain, then pushed twice through the gamut profile's colorimetric round
//! trip. The first round trip measures how far the color moves; the second
//! tells genuine gamut violations apart from distance introduced by the
//! profile's own mapping.

use crate::clut::Clut16;
use crate::color::{Lab, delta_e_76};
use crate::context::TransformFlags;
use crate::engine::{CmsBackend, ColorTransform};
use crate::error::{Error, Result};
use crate::format::{MAX_CHANNELS, PixelFormat, pixel_type};
use crate::math::quick_saturate_word;
use crate::profile::{ChainLink, MAX_CHAIN_PROFILES, Profile};
use crate::sampling::reasonable_grid_points;
use crate::types::RenderingIntent;

use super::chain_to_lab;

/// Round-trip error tolerated on LUT based gamut profiles
pub const ERR_THRESHOLD: f64 = 5.0;

/// Threshold for exact (matrix/shaper) gamut profiles
const MATRIX_SHAPER_THRESHOLD: f64 = 1.0;

/// Table value for one grid node
///
/// `de1` is the distance moved by the first round trip, `de2` by the
/// second. Ambiguous nodes are treated as in gamut (0).
pub fn gamut_decision(de1: f64, de2: f64, threshold: f64) -> u16 {
    if de1 < threshold {
        // dE2 >= T with a small dE1 is mapping noise
        return 0;
    }
    if de2 < threshold {
        return quick_saturate_word(de1 - threshold);
    }

    let ratio = if de2 == 0.0 { de1 } else { de1 / de2 };
    if ratio > threshold {
        quick_saturate_word(ratio - threshold)
    } else {
        0
    }
}

fn words_format(channels: usize) -> PixelFormat {
    PixelFormat::new(pixel_type::ANY, channels as u32, 2)
}

struct GamutProbe<T> {
    input: T,
    forward: T,
    reverse: T,
    gamut_channels: usize,
    threshold: f64,
}

impl<T: ColorTransform> GamutProbe<T> {
    fn round_trip(&self, lab: &[f64; 3]) -> Result<[f64; 3]> {
        let mut proof = [0u16; MAX_CHANNELS];
        let mut back = [0f64; 3];
        self.forward
            .execute_slice(lab, &mut proof[..self.gamut_channels], 1)?;
        self.reverse
            .execute_slice(&proof[..self.gamut_channels], &mut back, 1)?;
        Ok(back)
    }

    fn node(&self, node: &[u16]) -> Result<u16> {
        let mut lab_in1 = [0f64; 3];
        self.input.execute_slice(node, &mut lab_in1, 1)?;

        let lab_out1 = self.round_trip(&lab_in1)?;
        let lab_out2 = self.round_trip(&lab_out1)?;

        let de1 = delta_e_76(Lab::from_array(lab_in1), Lab::from_array(lab_out1));
        let de2 = delta_e_76(Lab::from_array(lab_out1), Lab::from_array(lab_out2));
        Ok(gamut_decision(de1, de2, self.threshold))
    }

    fn sample(&self, node: &[u16], out: &mut [u16]) -> bool {
        match self.node(node) {
            Ok(v) => {
                out[0] = v;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, ?node, "gamut sampling failed");
                false
            }
        }
    }
}

/// Build the gamut check table for `chain`
///
/// The first `position` links of `chain` lead from the device space of the
/// first profile to the PCS; `gamut` is the profile whose gamut is checked.
/// The result has one input per channel of that device space and a single
/// output: 0 in gamut, growing with the distance outside.
///
/// # Errors
///
/// [`Error::Range`] when `position` is outside `1..=255` or beyond the
/// chain; any failure to build one of the three transforms.
pub fn build_gamut_check<C: CmsBackend + ?Sized>(
    cms: &C,
    chain: &[ChainLink],
    position: usize,
    gamut: &Profile,
) -> Result<Clut16> {
    if !(1..=MAX_CHAIN_PROFILES).contains(&position) {
        return Err(Error::Range {
            what: "gamut PCS position",
            value: position,
            min: 1,
            max: MAX_CHAIN_PROFILES,
        });
    }
    if position > chain.len() {
        return Err(Error::Range {
            what: "gamut PCS position",
            value: position,
            min: 1,
            max: chain.len(),
        });
    }

    let threshold = if gamut.is_matrix_shaper() {
        MATRIX_SHAPER_THRESHOLD
    } else {
        ERR_THRESHOLD
    };

    let space = chain[0].profile.color_space();
    let channels = space.channels();
    let gamut_channels = gamut.color_space().channels();
    let high_res = TransformFlags::new().with_high_res_precalc();
    let grid_points = reasonable_grid_points(space, &high_res);
    let no_cache = TransformFlags::new().with_no_cache();
    let intent = RenderingIntent::RelativeColorimetric;

    let probe = GamutProbe {
        input: cms.create_transform(
            &chain_to_lab(&chain[..position]),
            words_format(channels),
            PixelFormat::LAB_DBL,
            no_cache,
        )?,
        forward: cms.create_simple_transform(
            &Profile::lab_identity(),
            PixelFormat::LAB_DBL,
            gamut,
            words_format(gamut_channels),
            intent,
            no_cache,
        )?,
        reverse: cms.create_simple_transform(
            gamut,
            words_format(gamut_channels),
            &Profile::lab_identity(),
            PixelFormat::LAB_DBL,
            intent,
            no_cache,
        )?,
        gamut_channels,
        threshold,
    };

    let mut clut = Clut16::uniform(grid_points, channels, 1)?;

    #[cfg(feature = "parallel")]
    let complete = clut.par_sample(|node, out| probe.sample(node, out));
    #[cfg(not(feature = "parallel"))]
    let complete = clut.sample(|node, out| probe.sample(node, out));

    if !complete {
        return Err(Error::Transform("gamut check sampling aborted".into()));
    }

    tracing::debug!(
        position,
        grid_points,
        inputs = channels,
        threshold,
        "built gamut check table"
    );
    Ok(clut)
}

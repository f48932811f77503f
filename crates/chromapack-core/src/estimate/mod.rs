//! Profile estimators
//!
//! Each estimator builds short-lived transforms through a [`CmsBackend`],
//! samples them over a grid or a ramp, and reduces the samples to a lookup
//! table, a scalar, or a tone curve:
//!
//! - [`build_gamut_check`]: out-of-gamut error table for a proofing chain
//! - [`detect_tac`] / [`estimate_tac`]: total area coverage of an output profile
//! - [`build_k_tone_curve`]: black channel relationship between two CMYK chains
//! - [`detect_rgb_profile_gamma`]: apparent gamma of an RGB profile
//!
//! Every transform and the synthetic Lab terminal are dropped before the
//! estimator returns, whatever the outcome.
//!
//! [`CmsBackend`]: crate::engine::CmsBackend

mod black_curve;
mod gamma;
mod gamut;
mod tac;

pub use black_curve::build_k_tone_curve;
pub use gamma::detect_rgb_profile_gamma;
pub use gamut::{ERR_THRESHOLD, build_gamut_check, gamut_decision};
pub use tac::{TAC_GRID, TacEstimate, detect_tac, estimate_tac};

use crate::profile::{ChainLink, Profile};
use crate::types::RenderingIntent;

/// `links` followed by the Lab identity terminal
///
/// The terminal uses relative colorimetric intent, no black point
/// compensation and full adaptation.
pub(crate) fn chain_to_lab(links: &[ChainLink]) -> Vec<ChainLink> {
    let mut chain = Vec::with_capacity(links.len() + 1);
    chain.extend_from_slice(links);
    chain.push(ChainLink::new(
        Profile::lab_identity(),
        RenderingIntent::RelativeColorimetric,
    ));
    chain
}

//! Total area coverage
//!
//! Samples a Lab grid, coarse on lightness and fine on the chroma axes,
//! through a perceptual round trip into the ink space of an output profile
//! and keeps the largest ink sum. Rows of the grid are independent, so the
//! maximum is reduced without regard to visiting order; ties resolve to the
//! first node in raster order.

use crate::color::{Lab, lab_encoded_to_float};
use crate::context::TransformFlags;
use crate::engine::{CmsBackend, ColorTransform};
use crate::error::Result;
use crate::format::{MAX_CHANNELS, PixelFormat};
use crate::profile::{Profile, formatter_for_color_space_of_profile};
use crate::sampling::grid_node;
use crate::types::{ProfileClass, RenderingIntent};

/// Lab grid: L*, a*, b* divisions
pub const TAC_GRID: [u32; 3] = [6, 74, 74];

const ROW: usize = TAC_GRID[2] as usize;
const ROWS: usize = (TAC_GRID[0] * TAC_GRID[1]) as usize;

/// Result of a coverage estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TacEstimate {
    /// Largest ink sum found, in percent
    pub coverage: f64,
    /// Lab grid node (v4 16-bit encoding) producing it
    pub input: [u16; 3],
}

impl TacEstimate {
    /// [`input`](Self::input) decoded to Lab
    pub fn input_lab(&self) -> Lab {
        lab_encoded_to_float(self.input)
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    coverage: f64,
    index: usize,
}

fn better(a: Option<Candidate>, b: Option<Candidate>) -> Option<Candidate> {
    match (a, b) {
        (Some(x), Some(y)) => {
            if y.coverage > x.coverage || (y.coverage == x.coverage && y.index < x.index) {
                Some(y)
            } else {
                Some(x)
            }
        }
        (x, None) => x,
        (None, y) => y,
    }
}

fn scan_row<T: ColorTransform>(
    round_trip: &T,
    row: usize,
    channels: usize,
) -> Result<Option<Candidate>> {
    let mut lab = [0u16; 3 * ROW];
    for (j, node) in lab.chunks_exact_mut(3).enumerate() {
        grid_node(row * ROW + j, &TAC_GRID, node);
    }

    let mut inks = [0f32; ROW * MAX_CHANNELS];
    let inks = &mut inks[..ROW * channels];
    round_trip.execute_slice(&lab, inks, ROW)?;

    let mut best = None;
    for (j, pixel) in inks.chunks_exact(channels).enumerate() {
        let coverage: f64 = pixel.iter().map(|&v| v as f64).sum();
        // NaN never wins
        if coverage > 0.0 {
            best = better(
                best,
                Some(Candidate {
                    coverage,
                    index: row * ROW + j,
                }),
            );
        }
    }
    Ok(best)
}

/// Largest ink sum of an output profile with the Lab node producing it
///
/// `None` for profiles that are not output class, for ink spaces without a
/// float descriptor, and when the round trip cannot be built or run.
pub fn estimate_tac<C: CmsBackend + ?Sized>(cms: &C, profile: &Profile) -> Option<TacEstimate> {
    if profile.class() != ProfileClass::Output {
        tracing::debug!(class = ?profile.class(), "TAC needs an output profile");
        return None;
    }
    let Some(format) = formatter_for_color_space_of_profile(profile, 4, true) else {
        tracing::warn!(space = %profile.color_space(), "no float format for TAC");
        return None;
    };
    let channels = format.channels();
    if channels >= MAX_CHANNELS {
        return None;
    }

    let round_trip = match cms.create_simple_transform(
        &Profile::lab_identity(),
        PixelFormat::LAB_16,
        profile,
        format,
        RenderingIntent::Perceptual,
        TransformFlags::new().with_no_optimize().with_no_cache(),
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(error = %e, "TAC round trip unavailable");
            return None;
        }
    };

    #[cfg(feature = "parallel")]
    let best = {
        use rayon::prelude::*;
        (0..ROWS)
            .into_par_iter()
            .map(|row| scan_row(&round_trip, row, channels))
            .try_reduce(|| None, |a, b| Ok(better(a, b)))
    };
    #[cfg(not(feature = "parallel"))]
    let best = (0..ROWS).try_fold(None, |acc, row| {
        scan_row(&round_trip, row, channels).map(|b| better(acc, b))
    });

    let best = match best {
        Ok(best) => best,
        Err(e) => {
            tracing::warn!(error = %e, "TAC sampling failed");
            return None;
        }
    };

    let mut input = [0u16; 3];
    let coverage = match best {
        Some(c) => {
            grid_node(c.index, &TAC_GRID, &mut input);
            c.coverage
        }
        None => 0.0,
    };

    tracing::debug!(coverage, ?input, nodes = ROWS * ROW, "estimated TAC");
    Some(TacEstimate { coverage, input })
}

/// Total area coverage of an output profile, in percent
///
/// 0 when the profile does not qualify or the estimate fails.
pub fn detect_tac<C: CmsBackend + ?Sized>(cms: &C, profile: &Profile) -> f64 {
    estimate_tac(cms, profile).map_or(0.0, |e| e.coverage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_better_prefers_lowest_index_on_ties() {
        let a = Some(Candidate {
            coverage: 250.0,
            index: 40,
        });
        let b = Some(Candidate {
            coverage: 250.0,
            index: 7,
        });
        assert_eq!(better(a, b).unwrap().index, 7);
        assert_eq!(better(b, a).unwrap().index, 7);
        assert_eq!(better(None, a).unwrap().index, 40);

        let c = Some(Candidate {
            coverage: 251.0,
            index: 90,
        });
        assert_eq!(better(b, c).unwrap().index, 90);
    }

    #[test]
    fn test_grid_shape() {
        assert_eq!(ROWS * ROW, 6 * 74 * 74);
        let mut node = [0u16; 3];
        grid_node(ROWS * ROW - 1, &TAC_GRID, &mut node);
        assert_eq!(node, [0xFFFF; 3]);
    }
}

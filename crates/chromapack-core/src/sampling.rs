//! Uniform grid sampling
//!
//! Grids are walked in raster order with the last dimension varying
//! fastest. Node coordinates are quantized onto the 16-bit domain so that
//! the first node is 0 and the last is 0xFFFF.

use crate::context::TransformFlags;
use crate::error::{Error, Result};
use crate::math::quick_saturate_word;
use crate::types::ColorSpace;

/// Most grid dimensions a sampler can walk
pub const MAX_INPUT_DIMENSIONS: usize = 15;

/// Node `i` of `n` evenly spaced nodes, on the 16-bit domain
#[inline]
pub fn quantize_val(i: u32, n: u32) -> u16 {
    let x = i as f64 * 65535.0 / (n.max(2) - 1) as f64;
    quick_saturate_word(x)
}

/// Grid size a precalculated table should use for `space`
///
/// An explicit [`TransformFlags::grid_points`] wins. Otherwise larger
/// channel counts get coarser grids, scaled by the resolution hints.
pub fn reasonable_grid_points(space: ColorSpace, flags: &TransformFlags) -> u32 {
    if let Some(n) = flags.grid_points {
        return n;
    }

    let channels = space.channels();
    if flags.high_res_precalc {
        return match channels {
            c if c > 4 => 7,
            4 => 23,
            _ => 49,
        };
    }
    if flags.low_res_precalc {
        return match channels {
            c if c > 4 => 6,
            1 => 33,
            _ => 17,
        };
    }
    match channels {
        c if c > 4 => 7,
        4 => 17,
        _ => 33,
    }
}

/// Number of nodes in a grid, `None` when a dimension has fewer than two
/// points or the count overflows
pub fn cube_size(grid_points: &[u32]) -> Option<usize> {
    if grid_points.is_empty() || grid_points.len() > MAX_INPUT_DIMENSIONS {
        return None;
    }
    grid_points.iter().try_fold(1usize, |acc, &n| {
        if n < 2 {
            None
        } else {
            acc.checked_mul(n as usize)
        }
    })
}

/// Validated node count, as a construction error
pub(crate) fn checked_cube_size(grid_points: &[u32]) -> Result<usize> {
    if grid_points.is_empty() || grid_points.len() > MAX_INPUT_DIMENSIONS {
        return Err(Error::Range {
            what: "grid dimensions",
            value: grid_points.len(),
            min: 1,
            max: MAX_INPUT_DIMENSIONS,
        });
    }
    if let Some(&n) = grid_points.iter().find(|&&n| n < 2) {
        return Err(Error::Range {
            what: "grid points",
            value: n as usize,
            min: 2,
            max: u32::MAX as usize,
        });
    }
    cube_size(grid_points).ok_or(Error::Allocation(usize::MAX))
}

/// Quantized coordinates of raster node `index`
#[inline]
pub(crate) fn grid_node(index: usize, grid_points: &[u32], out: &mut [u16]) {
    let mut rest = index;
    for t in (0..grid_points.len()).rev() {
        let n = grid_points[t] as usize;
        let colorant = rest % n;
        rest /= n;
        out[t] = quantize_val(colorant as u32, n as u32);
    }
}

/// Visit every node of a grid with 16-bit coordinates
///
/// Returns `Ok(false)` when the sampler stopped the walk by returning
/// `false`. An empty or degenerate grid is an error.
pub fn slice_space_16<F>(grid_points: &[u32], mut sampler: F) -> Result<bool>
where
    F: FnMut(&[u16]) -> bool,
{
    let total = checked_cube_size(grid_points)?;
    let mut node = [0u16; MAX_INPUT_DIMENSIONS];
    let node = &mut node[..grid_points.len()];

    for i in 0..total {
        grid_node(i, grid_points, node);
        if !sampler(node) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Same walk with coordinates in `[0, 1]`
pub fn slice_space_float<F>(grid_points: &[u32], mut sampler: F) -> Result<bool>
where
    F: FnMut(&[f32]) -> bool,
{
    let total = checked_cube_size(grid_points)?;
    let mut words = [0u16; MAX_INPUT_DIMENSIONS];
    let mut node = [0f32; MAX_INPUT_DIMENSIONS];
    let dims = grid_points.len();

    for i in 0..total {
        grid_node(i, grid_points, &mut words[..dims]);
        for (f, &w) in node.iter_mut().zip(&words[..dims]) {
            *f = (w as f64 / 65535.0) as f32;
        }
        if !sampler(&node[..dims]) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_endpoints() {
        assert_eq!(quantize_val(0, 17), 0);
        assert_eq!(quantize_val(16, 17), 0xFFFF);
        assert_eq!(quantize_val(1, 3), 32768);
    }

    #[test]
    fn test_reasonable_grid_points() {
        let none = TransformFlags::new();
        assert_eq!(reasonable_grid_points(ColorSpace::Rgb, &none), 33);
        assert_eq!(reasonable_grid_points(ColorSpace::Cmyk, &none), 17);
        assert_eq!(reasonable_grid_points(ColorSpace::MultiChannel(6), &none), 7);

        let high = TransformFlags::new().with_high_res_precalc();
        assert_eq!(reasonable_grid_points(ColorSpace::Lab, &high), 49);
        assert_eq!(reasonable_grid_points(ColorSpace::Cmyk, &high), 23);
        assert_eq!(reasonable_grid_points(ColorSpace::MultiChannel(7), &high), 7);

        let low = TransformFlags::new().with_low_res_precalc();
        assert_eq!(reasonable_grid_points(ColorSpace::Gray, &low), 33);
        assert_eq!(reasonable_grid_points(ColorSpace::Rgb, &low), 17);
        assert_eq!(reasonable_grid_points(ColorSpace::MultiChannel(5), &low), 6);

        let forced = high.with_grid_points(9);
        assert_eq!(reasonable_grid_points(ColorSpace::Rgb, &forced), 9);
    }

    #[test]
    fn test_cube_size() {
        assert_eq!(cube_size(&[6, 74, 74]), Some(6 * 74 * 74));
        assert_eq!(cube_size(&[2, 1]), None);
        assert_eq!(cube_size(&[]), None);
        assert_eq!(cube_size(&[u32::MAX; 4]), None);
    }

    #[test]
    fn test_slice_raster_order() {
        let mut seen = Vec::new();
        let done = slice_space_16(&[2, 3], |node| {
            seen.push([node[0], node[1]]);
            true
        })
        .unwrap();
        assert!(done);
        assert_eq!(
            seen,
            vec![
                [0, 0],
                [0, 32768],
                [0, 0xFFFF],
                [0xFFFF, 0],
                [0xFFFF, 32768],
                [0xFFFF, 0xFFFF],
            ]
        );
    }

    #[test]
    fn test_slice_abort_and_errors() {
        let mut visits = 0;
        let done = slice_space_16(&[4, 4], |_| {
            visits += 1;
            visits < 3
        })
        .unwrap();
        assert!(!done);
        assert_eq!(visits, 3);

        assert!(slice_space_16(&[1, 4], |_| true).is_err());
        assert!(slice_space_float(&[2; 16], |_| true).is_err());
    }

    #[test]
    fn test_slice_float_unit_range() {
        let mut last = Vec::new();
        slice_space_float(&[3, 3, 3], |node| {
            last = node.to_vec();
            true
        })
        .unwrap();
        assert_eq!(last, vec![1.0, 1.0, 1.0]);
    }
}

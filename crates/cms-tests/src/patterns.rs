//! Test pattern generation
//!
//! Interleaved 8-bit buffers with any channel count, plus seeded 16-bit
//! sample streams for the word codecs.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Test pattern types
#[derive(Debug, Clone, Copy)]
pub enum TestPattern {
    /// Every channel ramps 0 to 255 across the buffer
    Ramp,
    /// Corners of the unit cube in the first three channels
    ColorCube,
    /// Random samples with seed
    Random(u64),
    /// One channel at full strength, rotating through the channels
    Primaries,
    /// All zeros
    Black,
    /// All 255
    White,
}

/// Generate `pixels` interleaved pixels of `channels` bytes each
pub fn generate_pattern(pattern: TestPattern, pixels: usize, channels: usize) -> Vec<u8> {
    let mut data = vec![0u8; pixels * channels];

    match pattern {
        TestPattern::Ramp => {
            for (i, px) in data.chunks_exact_mut(channels).enumerate() {
                let v = ((i as f32 / pixels.max(1) as f32) * 255.0) as u8;
                px.fill(v);
            }
        }
        TestPattern::ColorCube => {
            for (i, px) in data.chunks_exact_mut(channels).enumerate() {
                let corner = i % 8;
                for (c, v) in px.iter_mut().enumerate().take(3) {
                    *v = if corner & (1 << c) != 0 { 255 } else { 0 };
                }
            }
        }
        TestPattern::Random(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.fill_bytes(&mut data);
        }
        TestPattern::Primaries => {
            for (i, px) in data.chunks_exact_mut(channels).enumerate() {
                px[i % channels] = 255;
            }
        }
        TestPattern::Black => {
            // Already zeros
        }
        TestPattern::White => {
            data.fill(255);
        }
    }

    data
}

/// Seeded 16-bit samples
pub fn random_words(seed: u64, count: usize) -> Vec<u16> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.r#gen::<u16>()).collect()
}

/// Standard buffer sizes in pixels
pub mod sizes {
    pub const TINY: usize = 8;
    pub const SMALL: usize = 257;
    pub const MEDIUM: usize = 4096;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_black() {
        let data = generate_pattern(TestPattern::Black, 2, 4);
        assert!(data.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_generate_white() {
        let data = generate_pattern(TestPattern::White, 2, 3);
        assert_eq!(data.len(), 6);
        assert!(data.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_primaries_rotate() {
        let data = generate_pattern(TestPattern::Primaries, 3, 3);
        assert_eq!(data, [255, 0, 0, 0, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn test_random_deterministic() {
        let a = generate_pattern(TestPattern::Random(42), 10, 4);
        let b = generate_pattern(TestPattern::Random(42), 10, 4);
        assert_eq!(a, b);
        assert_eq!(random_words(7, 16), random_words(7, 16));
    }
}

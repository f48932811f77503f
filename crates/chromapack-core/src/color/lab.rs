//! CIELAB (L*a*b*) Color Space
//!
//! L*a*b* is a perceptually uniform color space where equal distances
//! correspond to roughly equal perceived color differences.
//!
//! - L*: Lightness (0 = black, 100 = white)
//! - a*: Green-red axis (negative = green, positive = red)
//! - b*: Blue-yellow axis (negative = blue, positive = yellow)

use crate::color::xyz::{D50, Xyz};

/// CIELAB color coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness (0 to 100)
    pub l: f64,
    /// Green-red axis (typically -128 to 127)
    pub a: f64,
    /// Blue-yellow axis (typically -128 to 127)
    pub b: f64,
}

/// Cylindrical form of Lab
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LCh {
    pub l: f64,
    pub c: f64,
    /// Hue in degrees, `[0, 360)`
    pub h: f64,
}

impl Lab {
    /// Create a new Lab color
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Create Lab from an array
    #[inline]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self {
            l: arr[0],
            a: arr[1],
            b: arr[2],
        }
    }

    /// Convert to array
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    /// Convert from XYZ relative to the D50 PCS white
    pub fn from_xyz(xyz: Xyz) -> Self {
        let fx = lab_f(xyz.x / D50.x);
        let fy = lab_f(xyz.y / D50.y);
        let fz = lab_f(xyz.z / D50.z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Convert to XYZ relative to the D50 PCS white
    pub fn to_xyz(&self) -> Xyz {
        let fy = (self.l + 16.0) / 116.0;
        let fx = self.a / 500.0 + fy;
        let fz = fy - self.b / 200.0;

        Xyz::new(
            lab_f_inv(fx) * D50.x,
            lab_f_inv(fy) * D50.y,
            lab_f_inv(fz) * D50.z,
        )
    }

    /// Get chroma (colorfulness)
    #[inline]
    pub fn chroma(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Get hue angle in degrees, `[0, 360)`. Neutral colors report 0.
    pub fn hue_degrees(&self) -> f64 {
        if self.a == 0.0 && self.b == 0.0 {
            return 0.0;
        }
        let mut h = self.b.atan2(self.a).to_degrees();
        while h < 0.0 {
            h += 360.0;
        }
        while h >= 360.0 {
            h -= 360.0;
        }
        h
    }

    /// Convert to the cylindrical LCh form
    pub fn to_lch(&self) -> LCh {
        LCh {
            l: self.l,
            c: self.chroma(),
            h: self.hue_degrees(),
        }
    }

    /// Check if approximately equal to another Lab color
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.l - other.l).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
    }

    /// Clip this color into the gamut prism `L in [0, 100]`,
    /// `a in [amin, amax]`, `b in [bmin, bmax]` keeping its hue.
    ///
    /// Negative lightness collapses the color to black and returns `false`.
    /// Highlights above 100 are discarded. Out-of-prism chroma is pulled
    /// back onto the face the hue points at.
    pub fn desaturate(&mut self, amax: f64, amin: f64, bmax: f64, bmin: f64) -> bool {
        if self.l < 0.0 {
            *self = Lab::new(0.0, 0.0, 0.0);
            return false;
        }
        if self.l > 100.0 {
            self.l = 100.0;
        }

        if self.a >= amin && self.a <= amax && self.b >= bmin && self.b <= bmax {
            return true;
        }

        // Pure yellow/blue axis, the slope is undefined
        if self.a == 0.0 {
            self.b = if self.b < 0.0 { bmin } else { bmax };
            return true;
        }

        let h = self.hue_degrees();
        let slope = self.b / self.a;

        if (0.0..45.0).contains(&h) || (315.0..=360.0).contains(&h) {
            self.a = amax;
            self.b = amax * slope;
        } else if (45.0..135.0).contains(&h) {
            self.b = bmax;
            self.a = bmax / slope;
        } else if (135.0..225.0).contains(&h) {
            self.a = amin;
            self.b = amin * slope;
        } else if (225.0..315.0).contains(&h) {
            self.b = bmin;
            self.a = bmin / slope;
        } else {
            tracing::warn!(hue = h, "invalid hue angle while desaturating");
            return false;
        }
        true
    }
}

impl LCh {
    pub fn to_lab(&self) -> Lab {
        let h = self.h.to_radians();
        Lab::new(self.l, self.c * h.cos(), self.c * h.sin())
    }
}

/// Lab forward function: f(t) for XYZ → Lab conversion
#[inline]
fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    const DELTA_CUBED: f64 = DELTA * DELTA * DELTA;

    if t > DELTA_CUBED {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// Lab inverse function: f⁻¹(t) for Lab → XYZ conversion
#[inline]
fn lab_f_inv(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;

    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

/// Clip `lab` into the `a`/`b` gamut prism, see [`Lab::desaturate`]
pub fn desaturate_lab(lab: &mut Lab, amax: f64, amin: f64, bmax: f64, bmin: f64) -> bool {
    lab.desaturate(amax, amin, bmax, bmin)
}

/// CIE76 color difference: Euclidean distance in Lab
#[inline]
pub fn delta_e_76(lab1: Lab, lab2: Lab) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_white_is_l100() {
        let lab = Lab::from_xyz(D50);
        assert!((lab.l - 100.0).abs() < EPSILON, "L = {}", lab.l);
        assert!(lab.a.abs() < EPSILON);
        assert!(lab.b.abs() < EPSILON);
    }

    #[test]
    fn test_xyz_roundtrip() {
        for lab in [
            Lab::new(50.0, 20.0, -30.0),
            Lab::new(5.0, -2.0, 1.0),
            Lab::new(95.0, 0.0, 80.0),
        ] {
            let back = Lab::from_xyz(lab.to_xyz());
            assert!(back.approx_eq(&lab, 1e-9), "{lab:?} -> {back:?}");
        }
    }

    #[test]
    fn test_delta_e_76() {
        let a = Lab::new(50.0, 0.0, 0.0);
        let b = Lab::new(53.0, 4.0, 0.0);
        assert!((delta_e_76(a, b) - 5.0).abs() < EPSILON);
        assert_eq!(delta_e_76(a, a), 0.0);
    }

    #[test]
    fn test_lch_roundtrip() {
        let lab = Lab::new(60.0, -30.0, 40.0);
        let back = lab.to_lch().to_lab();
        assert!(back.approx_eq(&lab, 1e-9));
        assert!((lab.to_lch().h - 126.869_897_645_844).abs() < 1e-6);
    }

    #[test]
    fn test_desaturate_negative_lightness() {
        let mut lab = Lab::new(-1.0, 10.0, 10.0);
        assert!(!lab.desaturate(127.0, -128.0, 127.0, -128.0));
        assert_eq!(lab, Lab::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_desaturate_clamps_highlights() {
        let mut lab = Lab::new(120.0, 5.0, 5.0);
        assert!(lab.desaturate(127.0, -128.0, 127.0, -128.0));
        assert_eq!(lab, Lab::new(100.0, 5.0, 5.0));
    }

    #[test]
    fn test_desaturate_clips_on_a_face() {
        let mut lab = Lab::new(50.0, 200.0, 100.0);
        assert!(lab.desaturate(127.0, -128.0, 127.0, -128.0));
        assert_eq!(lab.a, 127.0);
        assert!((lab.b - 63.5).abs() < EPSILON);
    }

    #[test]
    fn test_desaturate_clips_on_b_face() {
        let mut lab = Lab::new(50.0, -20.0, -200.0);
        assert!(lab.desaturate(127.0, -128.0, 127.0, -128.0));
        assert_eq!(lab.b, -128.0);
        assert!((lab.a - -12.8).abs() < EPSILON);
    }

    #[test]
    fn test_desaturate_vertical_axis() {
        let mut lab = Lab::new(50.0, 0.0, 300.0);
        assert!(lab.desaturate(127.0, -128.0, 100.0, -100.0));
        assert_eq!(lab.b, 100.0);
    }

    #[test]
    fn test_desaturate_in_gamut_untouched() {
        let mut lab = Lab::new(40.0, 10.0, -10.0);
        assert!(lab.desaturate(127.0, -128.0, 127.0, -128.0));
        assert_eq!(lab, Lab::new(40.0, 10.0, -10.0));
    }
}

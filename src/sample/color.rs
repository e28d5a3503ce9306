//! Color elements in the HSV color model.

use crate::error::SampleError;

// =#========================================================================#=
// COLOR ELEMENT
// =#========================================================================#=
/// A colored building block of a [Sample](crate::sample::Sample).
///
/// Colors are stored as HSV (hue, saturation, value), each in `[0, 1]`,
/// since HSV separates hue from brightness.
///
/// # Distance
/// Hue is compared as binary: 0 if equal, 1 if different. The distance is
/// the Euclidean norm of the hue, saturation and value differences. Hue is
/// left out when either saturation is 0, since hue is meaningless for
/// grays.
///
/// # Example
/// ```
/// use njtree::sample::ColorElement;
///
/// let red = ColorElement::from_rgb(255, 0, 0).unwrap();
/// let dark_red = ColorElement::from_rgb(153, 0, 0).unwrap();
/// let white = ColorElement::from_rgb(255, 255, 255).unwrap();
///
/// assert!((red.distance(&dark_red) - 0.4).abs() < 1e-6);
/// assert!((red.distance(&white) - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorElement {
    h: f64,
    s: f64,
    v: f64,
}

impl ColorElement {
    /// Creates an element from HSV values.
    ///
    /// # Errors
    /// [SampleError::InvalidHsv] unless `0 <= h < 1`, `0 <= s <= 1` and `0 <= v <= 1`.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Result<Self, SampleError> {
        let in_unit = |x: f64| (0.0..=1.0).contains(&x);
        if !(0.0..1.0).contains(&h) || !in_unit(s) || !in_unit(v) {
            return Err(SampleError::InvalidHsv { h, s, v });
        }
        Ok(ColorElement { h, s, v })
    }

    /// Creates an element from RGB channels in `0..=255`, converted to HSV.
    ///
    /// # Errors
    /// [SampleError::InvalidRgb] if a channel lies outside `0..=255`.
    pub fn from_rgb(r: i32, g: i32, b: i32) -> Result<Self, SampleError> {
        if [r, g, b].iter().any(|c| !(0..=255).contains(c)) {
            return Err(SampleError::InvalidRgb { r, g, b });
        }

        let (rf, gf, bf) = (r as f64, g as f64, b as f64);
        let max = rf.max(gf).max(bf);
        let min = rf.min(gf).min(bf);

        let v = max / 255.0;
        let s = if max > 0.0 { (max - min) / max } else { 0.0 };
        let h = if s == 0.0 {
            0.0
        } else {
            let span = max - min;
            let red_c = (max - rf) / span;
            let green_c = (max - gf) / span;
            let blue_c = (max - bf) / span;
            let sector = if rf == max {
                blue_c - green_c
            } else if gf == max {
                2.0 + red_c - blue_c
            } else {
                4.0 + green_c - red_c
            };
            let hue = sector / 6.0;
            if hue < 0.0 { hue + 1.0 } else { hue }
        };

        Ok(ColorElement { h, s, v })
    }

    /// Returns the hue.
    pub fn hue(&self) -> f64 {
        self.h
    }

    /// Returns the saturation.
    pub fn saturation(&self) -> f64 {
        self.s
    }

    /// Returns the value (brightness).
    pub fn value(&self) -> f64 {
        self.v
    }

    /// Returns the color distance between `self` and `other`.
    pub fn distance(&self, other: &ColorElement) -> f64 {
        let ds = other.s - self.s;
        let dv = other.v - self.v;
        if self.s == 0.0 || other.s == 0.0 {
            return (ds * ds + dv * dv).sqrt();
        }

        let dh = if other.h != self.h { 1.0 } else { 0.0 };
        (dh * dh + ds * ds + dv * dv).sqrt()
    }
}

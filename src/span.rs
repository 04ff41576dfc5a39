//! Randomized value generators.
//!
//! A [`Span`] abstracts "pick a number in some distribution". Initializers,
//! behaviours and [`Rate`](crate::initializer::Rate) sample spans so that every
//! particle gets its own variation.
//!
//! | Mode | Constructor | Distribution |
//! |------|-------------|--------------|
//! | Range | [`Span::new`] | uniform in `[a, b]` |
//! | Centered | [`Span::centered`] | uniform in `[a - b, a + b]` |
//! | Array | [`Span::values`] | uniform pick from a fixed set |
//!
//! # Example
//!
//! ```ignore
//! let life = Span::new(1.0, 3.0);              // 1..3 seconds
//! let speed = Span::centered(5.0, 0.5);        // 4.5..5.5
//! let size = Span::values(vec![1.0, 2.0, 4.0]);
//! let forever = Span::fixed(f32::INFINITY);    // unbounded life
//! ```

use crate::math::{self, SimRng};
use glam::Vec3;
use rand::Rng;

/// A random scalar generator.
#[derive(Clone, Debug, PartialEq)]
pub enum Span {
    /// Uniform in `[a, b]`.
    Range { a: f32, b: f32 },
    /// Uniform in `[center - spread, center + spread]`.
    Centered { center: f32, spread: f32 },
    /// Uniform pick from a fixed set of values.
    Array(Vec<f32>),
}

impl Span {
    /// Uniform range `[a, b]`.
    pub fn new(a: f32, b: f32) -> Self {
        Span::Range { a, b }
    }

    /// A span that always yields `value`.
    pub fn fixed(value: f32) -> Self {
        Span::Range { a: value, b: value }
    }

    /// Spread of `spread` around `center`.
    pub fn centered(center: f32, spread: f32) -> Self {
        Span::Centered { center, spread }
    }

    /// Pick from a fixed set of values.
    pub fn values(values: Vec<f32>) -> Self {
        Span::Array(values)
    }

    /// Build from the loose `(a, b?, center?)` argument form used by configs.
    pub fn from_parts(a: f32, b: Option<f32>, center: bool) -> Self {
        match (b, center) {
            (Some(b), true) => Span::centered(a, b),
            (Some(b), false) => Span::new(a, b),
            (None, _) => Span::fixed(a),
        }
    }

    /// The lower bound (or first value) of the span.
    ///
    /// `a == ∞` is the "unbounded" sentinel.
    pub fn a(&self) -> f32 {
        match self {
            Span::Range { a, .. } => *a,
            Span::Centered { center, .. } => *center,
            Span::Array(values) => values.first().copied().unwrap_or(0.0),
        }
    }

    /// The upper bound of a range span; the spread of a centered one.
    pub fn b(&self) -> f32 {
        match self {
            Span::Range { b, .. } => *b,
            Span::Centered { spread, .. } => *spread,
            Span::Array(values) => values.last().copied().unwrap_or(0.0),
        }
    }

    /// Whether this span encodes an unbounded value.
    pub fn is_infinite(&self) -> bool {
        self.a() == f32::INFINITY
    }

    /// Sample a value.
    pub fn value(&self, rng: &mut SimRng) -> f32 {
        self.sample(rng, false)
    }

    /// Sample a value floored to an integer.
    pub fn int_value(&self, rng: &mut SimRng) -> f32 {
        self.sample(rng, true)
    }

    /// Sample, optionally flooring to an integer.
    pub fn sample(&self, rng: &mut SimRng, integer: bool) -> f32 {
        if self.is_infinite() {
            return f32::INFINITY;
        }
        match self {
            Span::Range { a, b } => math::random_a_to_b(rng, *a, *b, integer),
            Span::Centered { center, spread } => {
                math::random_floating(rng, *center, *spread, integer)
            }
            Span::Array(values) => {
                if values.is_empty() {
                    return 0.0;
                }
                let value = values[rng.gen_range(0..values.len())];
                if integer {
                    value.floor()
                } else {
                    value
                }
            }
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::fixed(1.0)
    }
}

impl From<f32> for Span {
    fn from(value: f32) -> Self {
        Span::fixed(value)
    }
}

impl From<(f32, f32)> for Span {
    fn from((a, b): (f32, f32)) -> Self {
        Span::new(a, b)
    }
}

impl From<Vec<f32>> for Span {
    fn from(values: Vec<f32>) -> Self {
        Span::values(values)
    }
}

/// Uniform pick from a fixed set of arbitrary values.
#[derive(Clone, Debug, PartialEq)]
pub struct ArraySpan<T> {
    items: Vec<T>,
}

impl<T> ArraySpan<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pick one item, or `None` when the set is empty.
    pub fn pick(&self, rng: &mut SimRng) -> Option<&T> {
        if self.items.is_empty() {
            return None;
        }
        self.items.get(rng.gen_range(0..self.items.len()))
    }
}

impl<T> From<Vec<T>> for ArraySpan<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

/// Random color generator.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorSpan {
    /// Uniform pick from a palette.
    Palette(ArraySpan<Vec3>),
    /// A fresh random color for every sample.
    Random,
}

impl ColorSpan {
    /// A span that always yields `color`.
    pub fn solid(color: Vec3) -> Self {
        ColorSpan::Palette(ArraySpan::new(vec![color]))
    }

    /// Build from hex strings. The literal `"random"` selects [`ColorSpan::Random`].
    ///
    /// Unparseable entries are skipped; `None` when nothing usable remains.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Option<Self> {
        if colors.iter().any(|c| c.as_ref() == "random") {
            return Some(ColorSpan::Random);
        }
        let palette: Vec<Vec3> = colors
            .iter()
            .filter_map(|c| math::hex_to_rgb(c.as_ref()))
            .collect();
        if palette.is_empty() {
            None
        } else {
            Some(ColorSpan::Palette(ArraySpan::new(palette)))
        }
    }

    /// Sample a color.
    pub fn value(&self, rng: &mut SimRng) -> Vec3 {
        match self {
            ColorSpan::Palette(palette) => palette.pick(rng).copied().unwrap_or(Vec3::ONE),
            ColorSpan::Random => math::random_color(rng),
        }
    }
}

impl From<Vec3> for ColorSpan {
    fn from(color: Vec3) -> Self {
        ColorSpan::solid(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SimRng {
        SimRng::seed_from_u64(42)
    }

    #[test]
    fn test_range_law() {
        let mut rng = rng();
        for (a, b) in [(0.0, 1.0), (-5.0, 5.0), (3.0, 3.0), (10.0, 200.0)] {
            let span = Span::new(a, b);
            for _ in 0..10_000 {
                let v = span.value(&mut rng);
                assert!(v >= a && v <= b, "{v} outside [{a}, {b}]");
            }
        }
    }

    #[test]
    fn test_integer_mode_yields_integers() {
        let mut rng = rng();
        let span = Span::new(1.0, 10.0);
        for _ in 0..10_000 {
            let v = span.int_value(&mut rng);
            assert_eq!(v, v.floor());
            assert!((1.0..=10.0).contains(&v));
        }
    }

    #[test]
    fn test_centered_mode() {
        let mut rng = rng();
        let span = Span::centered(100.0, 10.0);
        for _ in 0..1_000 {
            let v = span.value(&mut rng);
            assert!((90.0..=110.0).contains(&v));
        }
    }

    #[test]
    fn test_infinite_sentinel_short_circuits() {
        let mut rng = rng();
        assert_eq!(Span::fixed(f32::INFINITY).value(&mut rng), f32::INFINITY);
        assert_eq!(Span::new(f32::INFINITY, 0.0).int_value(&mut rng), f32::INFINITY);
    }

    #[test]
    fn test_array_mode_picks_members() {
        let mut rng = rng();
        let values = vec![1.0, 5.0, 9.0];
        let span = Span::values(values.clone());
        for _ in 0..100 {
            assert!(values.contains(&span.value(&mut rng)));
        }
        assert_eq!(Span::values(vec![]).value(&mut rng), 0.0);
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(Span::from_parts(2.0, None, false), Span::fixed(2.0));
        assert_eq!(Span::from_parts(2.0, Some(3.0), false), Span::new(2.0, 3.0));
        assert_eq!(Span::from_parts(2.0, Some(3.0), true), Span::centered(2.0, 3.0));
    }

    #[test]
    fn test_color_span_from_hex() {
        let mut rng = rng();
        let span = ColorSpan::from_hex(&["#ff0000", "not-a-color"]).unwrap();
        assert_eq!(span.value(&mut rng), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ColorSpan::from_hex(&["random"]), Some(ColorSpan::Random));
        assert_eq!(ColorSpan::from_hex(&["nope"]), None);
    }
}

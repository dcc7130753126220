use std::ops::{Add, Div, Mul, Sub};

use crate::foundation::error::{AdvBlendError, AdvBlendResult};

/// Straight or premultiplied RGB triple.
///
/// No range invariant: channels may leave `[0, 1]` while a blend is being evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Color3 {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Color3 {
    /// All channels zero.
    pub const ZERO: Self = Self::splat(0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn splat(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Apply `f` to each channel.
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Apply `f` channel-wise to `self` and `other`.
    pub fn zip_map(self, other: Self, mut f: impl FnMut(f32, f32) -> f32) -> Self {
        Self::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }

    pub fn dot(self, other: Self) -> f32 {
        self.r * other.r + self.g * other.g + self.b * other.b
    }

    pub fn with_alpha(self, a: f32) -> Color4 {
        Color4::new(self.r, self.g, self.b, a)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[f32; 3]> for Color3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Color3> for [f32; 3] {
    fn from(c: Color3) -> Self {
        c.to_array()
    }
}

impl Add for Color3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl Add<f32> for Color3 {
    type Output = Self;
    fn add(self, rhs: f32) -> Self {
        self.map(|a| a + rhs)
    }
}

impl Sub for Color3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl Sub<f32> for Color3 {
    type Output = Self;
    fn sub(self, rhs: f32) -> Self {
        self.map(|a| a - rhs)
    }
}

impl Mul for Color3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a * b)
    }
}

impl Mul<f32> for Color3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.map(|a| a * rhs)
    }
}

impl Div<f32> for Color3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        self.map(|a| a / rhs)
    }
}

/// RGBA quadruple, premultiplied or straight depending on context.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color4 {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color4 {
    /// Fully transparent black, `(0, 0, 0, 0)`.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque white, the clear color of reference images.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// The color channels without alpha.
    pub fn rgb(self) -> Color3 {
        Color3::new(self.r, self.g, self.b)
    }

    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), f(self.a))
    }

    pub fn zip_map(self, other: Self, mut f: impl FnMut(f32, f32) -> f32) -> Self {
        Self::new(
            f(self.r, other.r),
            f(self.g, other.g),
            f(self.b, other.b),
            f(self.a, other.a),
        )
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `"r,g,b,a"` (whitespace around components is ignored).
    pub fn parse_csv(s: &str) -> AdvBlendResult<Self> {
        let parts = s.split(',').map(str::trim).collect::<Vec<_>>();
        if parts.len() != 4 {
            return Err(AdvBlendError::validation(format!(
                "color '{s}' must have exactly 4 comma-separated components"
            )));
        }
        let mut out = [0.0f32; 4];
        for (slot, part) in out.iter_mut().zip(parts) {
            *slot = part.parse::<f32>().map_err(|e| {
                AdvBlendError::validation(format!(
                    "color component '{part}' is not a number: {e}"
                ))
            })?;
        }
        Ok(Self::from(out))
    }
}

impl From<[f32; 4]> for Color4 {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Color4> for [f32; 4] {
    fn from(c: Color4) -> Self {
        c.to_array()
    }
}

impl Add for Color4 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl Sub for Color4 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl std::fmt::Display for Color4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

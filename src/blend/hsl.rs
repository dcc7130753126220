//! HSL helpers for the hue, saturation, color and luminosity blend modes.

use crate::blend::kernels::{max_f, min_f};
use crate::foundation::core::Color3;

/// Luminosity weights for `(r, g, b)`.
pub const LUMINOSITY_WEIGHTS: Color3 = Color3::new(0.3, 0.59, 0.11);

pub fn min_of3(c: Color3) -> f32 {
    min_f(min_f(c.r, c.g), c.b)
}

pub fn max_of3(c: Color3) -> f32 {
    max_f(max_f(c.r, c.g), c.b)
}

pub fn luminosity(c: Color3) -> f32 {
    c.dot(LUMINOSITY_WEIGHTS)
}

pub fn saturation(c: Color3) -> f32 {
    max_of3(c) - min_of3(c)
}

/// Pull out-of-range components back into `[0, 1]` while keeping luminosity.
///
/// Lum/min/max are taken from the incoming color; the max clip runs on the min-clipped
/// result.
pub fn clip_color(color: Color3) -> Color3 {
    let lum = luminosity(color);
    let mincol = min_of3(color);
    let maxcol = max_of3(color);

    let mut color = color;
    if mincol < 0.0 {
        color = ((color - lum) * lum) / (lum - mincol) + lum;
    }
    if maxcol > 1.0 {
        color = ((color - lum) * (1.0 - lum)) / (maxcol - lum) + lum;
    }
    color
}

/// `base` shifted to the luminosity of `lum_source`, then clipped.
pub fn set_lum(base: Color3, lum_source: Color3) -> Color3 {
    let ldiff = luminosity(lum_source) - luminosity(base);
    clip_color(base + ldiff)
}

/// `base` rescaled to the saturation of `sat_source`, then given the luminosity of
/// `lum_source`. A zero-saturation base becomes black before the luminosity shift.
pub fn set_lum_sat(base: Color3, sat_source: Color3, lum_source: Color3) -> Color3 {
    let minbase = min_of3(base);
    let sbase = saturation(base);
    let ssat = saturation(sat_source);

    let color = if sbase > 0.0 {
        ((base - minbase) * ssat) / sbase
    } else {
        Color3::ZERO
    };
    set_lum(color, lum_source)
}

#[cfg(test)]
#[path = "../../tests/unit/blend/hsl.rs"]
mod tests;

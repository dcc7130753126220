use crate::blend::hsl::{set_lum, set_lum_sat};
use crate::blend::kernels;
use crate::blend::ops::AdvancedOp;
use crate::foundation::core::Color3;

/// How much the blended region (`x`), source-only region (`y`) and destination-only
/// region (`z`) contribute. Each term is 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct XyzCoefficients {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl XyzCoefficients {
    const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

pub fn xyz_coefficients(op: AdvancedOp) -> XyzCoefficients {
    use AdvancedOp::*;

    match op {
        Zero => XyzCoefficients::new(0.0, 0.0, 0.0),
        Src | DstAtop => XyzCoefficients::new(1.0, 1.0, 0.0),
        Dst => XyzCoefficients::new(1.0, 0.0, 1.0),
        SrcOver | DstOver | Multiply | Screen | Overlay | Darken | Lighten | ColorDodge
        | ColorBurn | HardLight | SoftLight | Difference | Exclusion | LinearDodge
        | LinearBurn | VividLight | LinearLight | PinLight | HardMix | HslHue
        | HslSaturation | HslColor | HslLuminosity => XyzCoefficients::new(1.0, 1.0, 1.0),
        SrcIn | DstIn => XyzCoefficients::new(1.0, 0.0, 0.0),
        SrcOut => XyzCoefficients::new(0.0, 1.0, 0.0),
        DstOut => XyzCoefficients::new(0.0, 0.0, 1.0),
        Invert | InvertRgb | SrcAtop => XyzCoefficients::new(1.0, 0.0, 1.0),
        Xor => XyzCoefficients::new(0.0, 1.0, 1.0),
    }
}

/// The blend function `f(Cs, Cd)` on base (non-premultiplied) colors.
pub fn blend_function(op: AdvancedOp, src: Color3, dst: Color3) -> Color3 {
    use AdvancedOp::*;

    match op {
        Zero | Xor | SrcOut | DstOut => Color3::ZERO,
        Src | SrcOver | SrcIn | SrcAtop => src,
        Dst | DstOver | DstIn | DstAtop => dst,
        Multiply => src * dst,
        Screen => src + dst - (src * dst),
        Overlay => src.zip_map(dst, kernels::overlay),
        Darken => src.zip_map(dst, kernels::min_f),
        Lighten => src.zip_map(dst, kernels::max_f),
        ColorDodge => src.zip_map(dst, kernels::color_dodge),
        ColorBurn => src.zip_map(dst, kernels::color_burn),
        HardLight => src.zip_map(dst, kernels::hard_light),
        SoftLight => src.zip_map(dst, kernels::soft_light),
        Difference => src.zip_map(dst, |s, d| (d - s).abs()),
        Exclusion => src + dst - ((src * 2.0) * dst),
        Invert => Color3::splat(1.0) - dst,
        InvertRgb => src * (Color3::splat(1.0) - dst),
        LinearDodge => src.zip_map(dst, kernels::linear_dodge),
        LinearBurn => src.zip_map(dst, kernels::linear_burn),
        VividLight => src.zip_map(dst, kernels::vivid_light),
        LinearLight => src.zip_map(dst, kernels::linear_light),
        PinLight => src.zip_map(dst, kernels::pin_light),
        HardMix => src.zip_map(dst, kernels::hard_mix),
        HslHue => set_lum_sat(src, dst, dst),
        HslSaturation => set_lum_sat(dst, src, dst),
        HslColor => set_lum(src, dst),
        HslLuminosity => set_lum(dst, src),
    }
}

/// Coefficients and blend function result for one evaluation.
pub fn select(op: AdvancedOp, src: Color3, dst: Color3) -> (XyzCoefficients, Color3) {
    (xyz_coefficients(op), blend_function(op, src, dst))
}

#[cfg(test)]
#[path = "../../tests/unit/blend/coeffs.rs"]
mod tests;

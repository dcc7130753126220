//! Final color of one blend evaluation.
//!
//! Standard advanced ops work on base colors, so premultiplied inputs are divided through
//! by alpha first and the result comes out premultiplied. Additional RGB ops work on
//! premultiplied colors, so straight inputs are multiplied in first.

use crate::blend::coeffs::select;
use crate::blend::kernels::{max_f, min_f};
use crate::blend::ops::{AdvancedOp, BlendOp, RgbOp};
use crate::blend::weights::{BlendParameters, weighting_factors};
use crate::foundation::core::{Color3, Color4};

/// Blend `source` onto `destination` with `op` under `param`.
///
/// Standard ops return a premultiplied color whose alpha is `X*p0 + Y*p1 + Z*p2`.
/// Additional RGB ops return whatever their formula produces; nothing is clamped unless
/// the op itself clamps.
pub fn calculate_final_color(
    param: &BlendParameters,
    op: BlendOp,
    source: Color4,
    destination: Color4,
) -> Color4 {
    match op {
        BlendOp::Advanced(op) => advanced(param, op, source, destination),
        BlendOp::AdditionalRgb(op) => {
            let src = if param.premultiplied_src_color {
                source
            } else {
                (source.rgb() * source.a).with_alpha(source.a)
            };
            let dst = if param.premultiplied_dst_color {
                destination
            } else {
                (destination.rgb() * destination.a).with_alpha(destination.a)
            };
            additional_rgb(op, src, dst)
        }
    }
}

/// Same as [`calculate_final_color`] for a raw API op code.
///
/// # Panics
///
/// Panics when `raw` is not an advanced or additional RGB op code. Callers holding
/// untrusted codes should decode them with [`BlendOp::from_raw`] instead.
pub fn calculate_final_color_raw(
    param: &BlendParameters,
    raw: u32,
    source: Color4,
    destination: Color4,
) -> Color4 {
    match BlendOp::from_raw(raw) {
        Ok(op) => calculate_final_color(param, op, source, destination),
        Err(e) => panic!("{e}"),
    }
}

fn base_color(color: Color4, premultiplied: bool) -> Color3 {
    if !premultiplied {
        color.rgb()
    } else if color.a != 0.0 {
        color.rgb() / color.a
    } else {
        Color3::ZERO
    }
}

fn advanced(param: &BlendParameters, op: AdvancedOp, source: Color4, destination: Color4) -> Color4 {
    let p = weighting_factors(param, source.a, destination.a);
    let src = base_color(source, param.premultiplied_src_color);
    let dst = base_color(destination, param.premultiplied_dst_color);

    let (xyz, f) = select(op, src, dst);
    let channel = |f: f32, s: f32, d: f32| f * p.both + xyz.y * s * p.src_only + xyz.z * d * p.dst_only;

    Color4::new(
        channel(f.r, src.r, dst.r),
        channel(f.g, src.g, dst.g),
        channel(f.b, src.b, dst.b),
        xyz.x * p.both + xyz.y * p.src_only + xyz.z * p.dst_only,
    )
}

/// Additional RGB op on premultiplied `src` and `dst`.
pub fn additional_rgb(op: RgbOp, src: Color4, dst: Color4) -> Color4 {
    let alpha_sum = min_f(1.0, src.a + dst.a);

    match op {
        RgbOp::Plus => src + dst,
        RgbOp::PlusClamped => src.zip_map(dst, |s, d| min_f(1.0, s + d)),
        RgbOp::PlusClampedAlpha => {
            (src.rgb() + dst.rgb()).map(|c| min_f(alpha_sum, c)).with_alpha(alpha_sum)
        }
        RgbOp::PlusDarker => src
            .rgb()
            .zip_map(dst.rgb(), |s, d| {
                max_f(0.0, alpha_sum - ((src.a - s) + (dst.a - d)))
            })
            .with_alpha(alpha_sum),
        RgbOp::Minus => dst - src,
        RgbOp::MinusClamped => dst.zip_map(src, |d, s| max_f(0.0, d - s)),
        RgbOp::Contrast => {
            let half_dst = dst.a / 2.0;
            let half_src = src.a / 2.0;
            src.rgb()
                .zip_map(dst.rgb(), |s, d| half_dst + 2.0 * (d - half_dst) * (s - half_src))
                .with_alpha(dst.a)
        }
        RgbOp::InvertOvg => dst
            .rgb()
            .map(|d| src.a * (1.0 - d) + (1.0 - src.a) * d)
            .with_alpha(src.a + dst.a - src.a * dst.a),
        RgbOp::Red => Color4 { r: src.r, ..dst },
        RgbOp::Green => Color4 { g: src.g, ..dst },
        RgbOp::Blue => Color4 { b: src.b, ..dst },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/compose.rs"]
mod tests;

//! Reference model for advanced color blending.
//!
//! `advblend` computes the exact color a conforming implementation of the advanced blend
//! operations must produce for one source/destination pair, and builds on that to plan
//! test cases, generate reference images and compare rendered images against them.
//!
//! # Layers
//!
//! 1. **Blend core** ([`calculate_final_color`]): premultiply normalization, overlap
//!    weighting, the `f/X/Y/Z` table and the additional RGB ops. Pure `f32` arithmetic,
//!    deterministic and bit-stable.
//! 2. **Suite** ([`build_plan`], [`reference_for_case`], [`compare_case`]): case
//!    configurations, the canonical color pair table, 32x32 reference images and
//!    threshold comparison.
//!
//! The core never fails: it accepts closed enums only. Raw API codes are decoded at the
//! boundary with [`BlendOp::from_raw`], which is where errors surface.
#![forbid(unsafe_code)]

mod blend;
mod foundation;
mod suite;

pub use blend::coeffs::{XyzCoefficients, blend_function, select, xyz_coefficients};
pub use blend::compose::{additional_rgb, calculate_final_color, calculate_final_color_raw};
pub use blend::hsl::{clip_color, luminosity, saturation, set_lum, set_lum_sat};
pub use blend::kernels::{
    color_burn, color_dodge, hard_light, hard_mix, linear_burn, linear_dodge, linear_light,
    overlay, pin_light, soft_light, vivid_light,
};
pub use blend::ops::{
    ADVANCED_OP_FIRST_RAW, AdvancedOp, BASIC_OP_MAX_RAW, BlendOp, OpFamily, RGB_OP_END_RAW,
    RGB_OP_FIRST_RAW, RgbOp,
};
pub use blend::weights::{BlendParameters, OverlapMode, WeightingFactors, weighting_factors};
pub use foundation::core::{Color3, Color4};
pub use foundation::error::{AdvBlendError, AdvBlendResult};
pub use suite::colors::{A1, A2, A3, COHERENT_PAIR_COUNT, COLOR_PAIR_COUNT, COLOR_PAIRS, ColorPair};
pub use suite::compare::{
    CompareReport, compare_case, comparison_threshold, float_threshold_compare,
};
pub use suite::plan::{
    ATTACHMENT_COUNTS, AdvancedBlendCaps, CaseConfig, ColorFormat, PlanGroup, PlannedCase,
    ROOT_GROUP, TestMode, build_plan, plan_group,
};
pub use suite::reference::{
    CaseReference, REFERENCE_HEIGHT, REFERENCE_WIDTH, ReferenceImage, ReferenceThreading,
    build_references, draw_list, is_ill_formed, pixel_coordinates, reference_for_case,
};

//! Blend operation codes.
//!
//! Codes keep the graphics API ordinals so serialized case ids and raw codes coming from a
//! harness map one-to-one. The two operation families occupy disjoint numeric ranges and
//! classification from a raw code is a range check, never a per-tag lookup.

use std::str::FromStr;

use crate::foundation::error::{AdvBlendError, AdvBlendResult};

/// Last basic (non-advanced) blend op ordinal (`MAX`).
pub const BASIC_OP_MAX_RAW: u32 = 4;
/// Ordinal of the first advanced op (`ZERO`).
pub const ADVANCED_OP_FIRST_RAW: u32 = 1_000_148_000;
/// Ordinal of the first additional RGB op (`PLUS`).
pub const RGB_OP_FIRST_RAW: u32 = 1_000_148_035;
/// One past the ordinal of the last additional RGB op (`BLUE`).
pub const RGB_OP_END_RAW: u32 = 1_000_148_046;

/// Operations evaluated with the overlap-weighted `f/X/Y/Z` equation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum AdvancedOp {
    Zero = 1_000_148_000,
    Src = 1_000_148_001,
    Dst = 1_000_148_002,
    SrcOver = 1_000_148_003,
    DstOver = 1_000_148_004,
    SrcIn = 1_000_148_005,
    DstIn = 1_000_148_006,
    SrcOut = 1_000_148_007,
    DstOut = 1_000_148_008,
    SrcAtop = 1_000_148_009,
    DstAtop = 1_000_148_010,
    Xor = 1_000_148_011,
    Multiply = 1_000_148_012,
    Screen = 1_000_148_013,
    Overlay = 1_000_148_014,
    Darken = 1_000_148_015,
    Lighten = 1_000_148_016,
    ColorDodge = 1_000_148_017,
    ColorBurn = 1_000_148_018,
    HardLight = 1_000_148_019,
    SoftLight = 1_000_148_020,
    Difference = 1_000_148_021,
    Exclusion = 1_000_148_022,
    Invert = 1_000_148_023,
    InvertRgb = 1_000_148_024,
    LinearDodge = 1_000_148_025,
    LinearBurn = 1_000_148_026,
    VividLight = 1_000_148_027,
    LinearLight = 1_000_148_028,
    PinLight = 1_000_148_029,
    HardMix = 1_000_148_030,
    HslHue = 1_000_148_031,
    HslSaturation = 1_000_148_032,
    HslColor = 1_000_148_033,
    HslLuminosity = 1_000_148_034,
}

impl AdvancedOp {
    /// Every advanced op in ordinal order.
    pub const ALL: [AdvancedOp; 35] = [
        Self::Zero,
        Self::Src,
        Self::Dst,
        Self::SrcOver,
        Self::DstOver,
        Self::SrcIn,
        Self::DstIn,
        Self::SrcOut,
        Self::DstOut,
        Self::SrcAtop,
        Self::DstAtop,
        Self::Xor,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
        Self::Difference,
        Self::Exclusion,
        Self::Invert,
        Self::InvertRgb,
        Self::LinearDodge,
        Self::LinearBurn,
        Self::VividLight,
        Self::LinearLight,
        Self::PinLight,
        Self::HardMix,
        Self::HslHue,
        Self::HslSaturation,
        Self::HslColor,
        Self::HslLuminosity,
    ];

    pub fn raw(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Src => "src",
            Self::Dst => "dst",
            Self::SrcOver => "src_over",
            Self::DstOver => "dst_over",
            Self::SrcIn => "src_in",
            Self::DstIn => "dst_in",
            Self::SrcOut => "src_out",
            Self::DstOut => "dst_out",
            Self::SrcAtop => "src_atop",
            Self::DstAtop => "dst_atop",
            Self::Xor => "xor",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "colordodge",
            Self::ColorBurn => "colorburn",
            Self::HardLight => "hardlight",
            Self::SoftLight => "softlight",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Invert => "invert",
            Self::InvertRgb => "invert_rgb",
            Self::LinearDodge => "lineardodge",
            Self::LinearBurn => "linearburn",
            Self::VividLight => "vividlight",
            Self::LinearLight => "linearlight",
            Self::PinLight => "pinlight",
            Self::HardMix => "hardmix",
            Self::HslHue => "hsl_hue",
            Self::HslSaturation => "hsl_saturation",
            Self::HslColor => "hsl_color",
            Self::HslLuminosity => "hsl_luminosity",
        }
    }

    fn from_raw(raw: u32) -> Option<Self> {
        let idx = raw.checked_sub(ADVANCED_OP_FIRST_RAW)? as usize;
        Self::ALL.get(idx).copied()
    }
}

/// Operations combined directly on premultiplied colors, with no overlap weighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum RgbOp {
    Plus = 1_000_148_035,
    PlusClamped = 1_000_148_036,
    PlusClampedAlpha = 1_000_148_037,
    PlusDarker = 1_000_148_038,
    Minus = 1_000_148_039,
    MinusClamped = 1_000_148_040,
    Contrast = 1_000_148_041,
    InvertOvg = 1_000_148_042,
    Red = 1_000_148_043,
    Green = 1_000_148_044,
    Blue = 1_000_148_045,
}

impl RgbOp {
    /// Every additional RGB op in ordinal order.
    pub const ALL: [RgbOp; 11] = [
        Self::Plus,
        Self::PlusClamped,
        Self::PlusClampedAlpha,
        Self::PlusDarker,
        Self::Minus,
        Self::MinusClamped,
        Self::Contrast,
        Self::InvertOvg,
        Self::Red,
        Self::Green,
        Self::Blue,
    ];

    pub fn raw(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::PlusClamped => "plus_clamped",
            Self::PlusClampedAlpha => "plus_clamped_alpha",
            Self::PlusDarker => "plus_darker",
            Self::Minus => "minus",
            Self::MinusClamped => "minus_clamped",
            Self::Contrast => "contrast",
            Self::InvertOvg => "invert_ovg",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }

    fn from_raw(raw: u32) -> Option<Self> {
        let idx = raw.checked_sub(RGB_OP_FIRST_RAW)? as usize;
        Self::ALL.get(idx).copied()
    }
}

/// Which compositing formula an op uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpFamily {
    /// `ZERO..=HSL_LUMINOSITY`: de-premultiplied inputs, overlap weighting.
    Advanced,
    /// `PLUS..=BLUE`: premultiplied inputs, direct alpha-aware combination.
    AdditionalRgb,
}

impl OpFamily {
    /// Classify a raw op code by numeric range. `None` when it falls in neither range.
    pub fn of_raw(raw: u32) -> Option<Self> {
        if raw > BASIC_OP_MAX_RAW && raw < RGB_OP_FIRST_RAW {
            Some(Self::Advanced)
        } else if (RGB_OP_FIRST_RAW..RGB_OP_END_RAW).contains(&raw) {
            Some(Self::AdditionalRgb)
        } else {
            None
        }
    }
}

/// Any advanced blend operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "OpRepr", into = "String")]
pub enum BlendOp {
    Advanced(AdvancedOp),
    AdditionalRgb(RgbOp),
}

impl BlendOp {
    /// All ops, standard advanced first, in the order cases are registered.
    pub const ALL: [BlendOp; 46] = {
        let mut out = [BlendOp::Advanced(AdvancedOp::Zero); 46];
        let mut i = 0;
        while i < AdvancedOp::ALL.len() {
            out[i] = BlendOp::Advanced(AdvancedOp::ALL[i]);
            i += 1;
        }
        let mut j = 0;
        while j < RgbOp::ALL.len() {
            out[AdvancedOp::ALL.len() + j] = BlendOp::AdditionalRgb(RgbOp::ALL[j]);
            j += 1;
        }
        out
    };

    /// Decode a raw op code: family by range first, then the op within the family.
    pub fn from_raw(raw: u32) -> AdvBlendResult<Self> {
        match OpFamily::of_raw(raw) {
            Some(OpFamily::Advanced) => AdvancedOp::from_raw(raw).map(Self::Advanced).ok_or_else(
                || {
                    AdvBlendError::validation(format!(
                        "unsupported f/X/Y/Z advanced blend operation code {raw}"
                    ))
                },
            ),
            Some(OpFamily::AdditionalRgb) => RgbOp::from_raw(raw)
                .map(Self::AdditionalRgb)
                .ok_or_else(|| {
                    AdvBlendError::validation(format!("unsupported blend operation code {raw}"))
                }),
            None => Err(AdvBlendError::validation(format!(
                "blend operation code {raw} is outside the advanced and additional RGB ranges"
            ))),
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Self::Advanced(op) => op.raw(),
            Self::AdditionalRgb(op) => op.raw(),
        }
    }

    /// Family as decided by the raw ordinal range.
    pub fn family(self) -> OpFamily {
        match OpFamily::of_raw(self.raw()) {
            Some(family) => family,
            None => unreachable!("op {} has an ordinal outside both families", self.name()),
        }
    }

    pub fn is_additional_rgb(self) -> bool {
        self.family() == OpFamily::AdditionalRgb
    }

    /// Canonical lower-snake name, e.g. `"src_over"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Advanced(op) => op.name(),
            Self::AdditionalRgb(op) => op.name(),
        }
    }

    /// API spelling, e.g. `"VK_BLEND_OP_SRC_OVER_EXT"`.
    pub fn api_name(self) -> String {
        format!("VK_BLEND_OP_{}_EXT", self.name().to_ascii_uppercase())
    }

    /// Ops a device must support even without the "all operations" capability.
    pub fn is_core_subset(self) -> bool {
        matches!(
            self,
            Self::Advanced(
                AdvancedOp::Multiply
                    | AdvancedOp::Screen
                    | AdvancedOp::Overlay
                    | AdvancedOp::Darken
                    | AdvancedOp::Lighten
                    | AdvancedOp::ColorDodge
                    | AdvancedOp::ColorBurn
                    | AdvancedOp::HardLight
                    | AdvancedOp::SoftLight
                    | AdvancedOp::Difference
                    | AdvancedOp::Exclusion
                    | AdvancedOp::HslHue
                    | AdvancedOp::HslSaturation
                    | AdvancedOp::HslColor
                    | AdvancedOp::HslLuminosity
            )
        )
    }
}

impl From<AdvancedOp> for BlendOp {
    fn from(op: AdvancedOp) -> Self {
        Self::Advanced(op)
    }
}

impl From<RgbOp> for BlendOp {
    fn from(op: RgbOp) -> Self {
        Self::AdditionalRgb(op)
    }
}

impl std::fmt::Display for BlendOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendOp {
    type Err = AdvBlendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key
            .strip_prefix("vk_blend_op_")
            .and_then(|k| k.strip_suffix("_ext"))
            .unwrap_or(key.as_str())
            .replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|op| op.name() == key)
            .ok_or_else(|| AdvBlendError::validation(format!("unknown blend operation '{s}'")))
    }
}

impl From<BlendOp> for String {
    fn from(op: BlendOp) -> Self {
        op.name().to_string()
    }
}

/// Wire form of a [`BlendOp`]: a name or a raw API ordinal.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum OpRepr {
    Raw(u32),
    Name(String),
}

impl TryFrom<OpRepr> for BlendOp {
    type Error = AdvBlendError;

    fn try_from(v: OpRepr) -> Result<Self, Self::Error> {
        match v {
            OpRepr::Raw(raw) => Self::from_raw(raw),
            OpRepr::Name(name) => name.parse(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/ops.rs"]
mod tests;

use std::str::FromStr;

use crate::blend::kernels::{max_f, min_f};
use crate::foundation::error::{AdvBlendError, AdvBlendResult};

/// Assumed correlation between source and destination coverage inside a pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u32)]
pub enum OverlapMode {
    #[default]
    Uncorrelated = 0,
    Disjoint = 1,
    Conjoint = 2,
}

impl OverlapMode {
    /// Modes in ordinal order.
    pub const ALL: [OverlapMode; 3] = [Self::Uncorrelated, Self::Disjoint, Self::Conjoint];

    pub fn from_raw(raw: u32) -> AdvBlendResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| *m as u32 == raw)
            .ok_or_else(|| {
                AdvBlendError::validation(format!("unsupported advanced blend overlap mode {raw}"))
            })
    }

    pub fn raw(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Uncorrelated => "uncorrelated",
            Self::Disjoint => "disjoint",
            Self::Conjoint => "conjoint",
        }
    }

    /// API spelling, e.g. `"VK_BLEND_OVERLAP_CONJOINT_EXT"`.
    pub fn api_name(self) -> String {
        format!("VK_BLEND_OVERLAP_{}_EXT", self.name().to_ascii_uppercase())
    }
}

impl std::fmt::Display for OverlapMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OverlapMode {
    type Err = AdvBlendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key
            .strip_prefix("vk_blend_overlap_")
            .and_then(|k| k.strip_suffix("_ext"))
            .unwrap_or(key.as_str());
        Self::ALL
            .into_iter()
            .find(|m| m.name() == key)
            .ok_or_else(|| AdvBlendError::validation(format!("unknown overlap mode '{s}'")))
    }
}

impl TryFrom<String> for OverlapMode {
    type Error = AdvBlendError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OverlapMode> for String {
    fn from(m: OverlapMode) -> Self {
        m.name().to_string()
    }
}

/// Per-case blend state shared by every evaluation of that case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlendParameters {
    /// Source RGB is premultiplied by source alpha.
    pub premultiplied_src_color: bool,
    /// Destination RGB is premultiplied by destination alpha.
    pub premultiplied_dst_color: bool,
    #[serde(default)]
    pub overlap: OverlapMode,
}

impl Default for BlendParameters {
    fn default() -> Self {
        Self {
            premultiplied_src_color: true,
            premultiplied_dst_color: true,
            overlap: OverlapMode::Uncorrelated,
        }
    }
}

/// Coverage split of a pixel: both covered, source only, destination only.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct WeightingFactors {
    pub both: f32,
    pub src_only: f32,
    pub dst_only: f32,
}

impl WeightingFactors {
    pub fn sum(self) -> f32 {
        self.both + self.src_only + self.dst_only
    }
}

/// Weighting factors `p0, p1, p2` for the given coverage (alpha) values.
pub fn weighting_factors(
    param: &BlendParameters,
    alpha_src: f32,
    alpha_dst: f32,
) -> WeightingFactors {
    match param.overlap {
        OverlapMode::Uncorrelated => WeightingFactors {
            both: alpha_src * alpha_dst,
            src_only: alpha_src * (1.0 - alpha_dst),
            dst_only: alpha_dst * (1.0 - alpha_src),
        },
        OverlapMode::Conjoint => WeightingFactors {
            both: min_f(alpha_src, alpha_dst),
            src_only: max_f(alpha_src - alpha_dst, 0.0),
            dst_only: max_f(alpha_dst - alpha_src, 0.0),
        },
        OverlapMode::Disjoint => WeightingFactors {
            both: max_f(alpha_src + alpha_dst - 1.0, 0.0),
            src_only: min_f(alpha_src, 1.0 - alpha_dst),
            dst_only: min_f(alpha_dst, 1.0 - alpha_src),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/weights.rs"]
mod tests;

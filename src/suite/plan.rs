use std::str::FromStr;

use crate::blend::ops::BlendOp;
use crate::blend::weights::{BlendParameters, OverlapMode};
use crate::foundation::error::{AdvBlendError, AdvBlendResult};
use crate::foundation::math::{SplitMix64, name_seed};

/// Name of the root case group. Also seeds the random op choices.
pub const ROOT_GROUP: &str = "blend_operation_advanced";

/// Attachment counts covered by the `ops` group. `independent` skips the first.
pub const ATTACHMENT_COUNTS: [u32; 5] = [1, 2, 4, 8, 16];

/// Attachment format a case renders to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ColorFormat {
    #[default]
    #[serde(rename = "r16g16b16a16_sfloat", alias = "VK_FORMAT_R16G16B16A16_SFLOAT")]
    R16G16B16A16Sfloat,
    #[serde(rename = "r8g8b8a8_unorm", alias = "VK_FORMAT_R8G8B8A8_UNORM")]
    R8G8B8A8Unorm,
}

impl ColorFormat {
    /// Formats in the order cases are registered.
    pub const ALL: [ColorFormat; 2] = [Self::R16G16B16A16Sfloat, Self::R8G8B8A8Unorm];

    pub fn name(self) -> &'static str {
        match self {
            Self::R16G16B16A16Sfloat => "r16g16b16a16_sfloat",
            Self::R8G8B8A8Unorm => "r8g8b8a8_unorm",
        }
    }

    pub fn is_unorm(self) -> bool {
        matches!(self, Self::R8G8B8A8Unorm)
    }

    /// Suffix appended to case names. The float format is the unsuffixed default.
    pub fn name_suffix(self) -> &'static str {
        match self {
            Self::R16G16B16A16Sfloat => "",
            Self::R8G8B8A8Unorm => "_r8g8b8a8_unorm",
        }
    }
}

/// How a case is drawn and verified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestMode {
    /// One draw per color pair on every attachment.
    #[default]
    Generic,
    /// Two consecutive draws into one attachment, the second reading the first.
    Coherent,
}

/// One test case: blend state, ops per attachment, and target format.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaseConfig {
    #[serde(default)]
    pub mode: TestMode,
    #[serde(default)]
    pub test_number: u32,
    /// One op per attachment in generic mode; the two draw ops in coherent mode.
    pub blend_ops: Vec<BlendOp>,
    #[serde(default)]
    pub coherent_operations: bool,
    #[serde(default)]
    pub independent_blend: bool,
    pub color_attachments: u32,
    #[serde(default)]
    pub blend: BlendParameters,
    #[serde(default)]
    pub format: ColorFormat,
}

impl CaseConfig {
    /// Case name, e.g. `color_attachments_4_blend_overlap_conjoint_ext_nonpremultipliedsrc_12`.
    pub fn name(&self) -> String {
        let mut out = String::new();
        if self.mode == TestMode::Coherent && !self.coherent_operations {
            out.push_str("barrier_");
        }
        out.push_str(&format!(
            "color_attachments_{}_blend_overlap_{}_ext",
            self.color_attachments,
            self.blend.overlap.name()
        ));
        if !self.blend.premultiplied_src_color {
            out.push_str("_nonpremultipliedsrc");
        }
        if !self.blend.premultiplied_dst_color {
            out.push_str("_nonpremultiplieddst");
        }
        out.push_str(&format!("_{}", self.test_number));
        out.push_str(self.format.name_suffix());
        out
    }

    pub fn validate(&self) -> AdvBlendResult<()> {
        if self.color_attachments == 0 {
            return Err(AdvBlendError::validation("color_attachments must be >= 1"));
        }
        if self.blend_ops.is_empty() {
            return Err(AdvBlendError::validation("blend_ops must be non-empty"));
        }

        match self.mode {
            TestMode::Generic => {
                if self.blend_ops.len() != self.color_attachments as usize {
                    return Err(AdvBlendError::validation(format!(
                        "generic case needs one blend op per attachment ({} ops for {} attachments)",
                        self.blend_ops.len(),
                        self.color_attachments
                    )));
                }
                if !self.independent_blend
                    && self.blend_ops.windows(2).any(|w| w[0] != w[1])
                {
                    return Err(AdvBlendError::validation(
                        "attachments may only use different blend ops with independent_blend",
                    ));
                }
            }
            TestMode::Coherent => {
                if self.color_attachments != 1 {
                    return Err(AdvBlendError::validation(
                        "coherent case renders to exactly one attachment",
                    ));
                }
                if self.blend_ops.len() != 2 {
                    return Err(AdvBlendError::validation(
                        "coherent case needs exactly two blend ops",
                    ));
                }
                if self.independent_blend {
                    return Err(AdvBlendError::validation(
                        "coherent case cannot use independent_blend",
                    ));
                }
            }
        }
        Ok(())
    }

    /// `Unsupported` when `caps` lack something this case needs.
    pub fn check_support(&self, caps: &AdvancedBlendCaps) -> AdvBlendResult<()> {
        if !caps.all_operations
            && let Some(op) = self.blend_ops.iter().find(|op| !op.is_core_subset())
        {
            return Err(AdvBlendError::unsupported(format!(
                "blend op {} needs support for all advanced blend operations",
                op.api_name()
            )));
        }
        if self.color_attachments > caps.max_color_attachments {
            return Err(AdvBlendError::unsupported(format!(
                "{} color attachments exceed the advanced blend maximum of {}",
                self.color_attachments, caps.max_color_attachments
            )));
        }
        if self.blend.overlap != OverlapMode::Uncorrelated && !caps.correlated_overlap {
            return Err(AdvBlendError::unsupported("blend correlated overlap"));
        }
        if self.color_attachments > 1 && self.independent_blend && !caps.independent_blend {
            return Err(AdvBlendError::unsupported("independent blend"));
        }
        if !self.blend.premultiplied_src_color && !caps.non_premultiplied_src_color {
            return Err(AdvBlendError::unsupported("non-premultiplied source color"));
        }
        if !self.blend.premultiplied_dst_color && !caps.non_premultiplied_dst_color {
            return Err(AdvBlendError::unsupported(
                "non-premultiplied destination color",
            ));
        }
        if self.coherent_operations && !caps.coherent_operations {
            return Err(AdvBlendError::unsupported("coherent operations"));
        }
        Ok(())
    }
}

/// Advanced blend limits and features reported by a device.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdvancedBlendCaps {
    pub max_color_attachments: u32,
    pub all_operations: bool,
    pub correlated_overlap: bool,
    pub independent_blend: bool,
    pub non_premultiplied_src_color: bool,
    pub non_premultiplied_dst_color: bool,
    pub coherent_operations: bool,
}

impl Default for AdvancedBlendCaps {
    fn default() -> Self {
        Self {
            max_color_attachments: 16,
            all_operations: true,
            correlated_overlap: true,
            independent_blend: true,
            non_premultiplied_src_color: true,
            non_premultiplied_dst_color: true,
            coherent_operations: true,
        }
    }
}

/// Child group of [`ROOT_GROUP`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanGroup {
    /// Each op on every attachment count, overlap and premultiply mode.
    Ops,
    /// A random op per attachment.
    Independent,
    /// Two random ops drawn back to back, with and without coherent operations.
    Coherent,
}

impl PlanGroup {
    pub const ALL: [PlanGroup; 3] = [Self::Ops, Self::Independent, Self::Coherent];

    pub fn name(self) -> &'static str {
        match self {
            Self::Ops => "ops",
            Self::Independent => "independent",
            Self::Coherent => "coherent",
        }
    }
}

impl std::fmt::Display for PlanGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanGroup {
    type Err = AdvBlendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.name() == key)
            .ok_or_else(|| AdvBlendError::validation(format!("unknown case group '{s}'")))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlannedCase {
    pub group: PlanGroup,
    pub config: CaseConfig,
}

impl PlannedCase {
    /// Dotted path, e.g. `blend_operation_advanced.ops.color_attachments_1_..._0`.
    pub fn path(&self) -> String {
        format!("{ROOT_GROUP}.{}.{}", self.group, self.config.name())
    }
}

/// Premultiply modes as `(src premultiplied, dst premultiplied)`, in registration order.
const PREMULTIPLY_MODES: [(bool, bool); 4] = [(false, false), (true, false), (false, true), (true, true)];

/// Every registered case, in registration order.
///
/// Random op choices come from one stream seeded by [`ROOT_GROUP`], consumed by the
/// `independent` group and then the `coherent` group, so the plan is the same on
/// every call.
#[tracing::instrument]
pub fn build_plan() -> Vec<PlannedCase> {
    let mut out = Vec::new();
    push_ops_group(&mut out);

    let mut rng = SplitMix64::new(name_seed(ROOT_GROUP));
    push_independent_group(&mut out, &mut rng);
    push_coherent_group(&mut out, &mut rng);

    tracing::info!(cases = out.len(), "built advanced blend case plan");
    out
}

/// The cases of one group, in registration order.
pub fn plan_group(group: PlanGroup) -> Vec<PlannedCase> {
    build_plan()
        .into_iter()
        .filter(|case| case.group == group)
        .collect()
}

fn push_both_formats(out: &mut Vec<PlannedCase>, group: PlanGroup, config: CaseConfig) {
    for format in ColorFormat::ALL {
        out.push(PlannedCase {
            group,
            config: CaseConfig {
                format,
                ..config.clone()
            },
        });
    }
}

fn random_op(rng: &mut SplitMix64) -> BlendOp {
    BlendOp::ALL[rng.index_inclusive(BlendOp::ALL.len() - 1)]
}

fn push_ops_group(out: &mut Vec<PlannedCase>) {
    for count in ATTACHMENT_COUNTS {
        for overlap in OverlapMode::ALL {
            for (premultiplied_src_color, premultiplied_dst_color) in PREMULTIPLY_MODES {
                let mut test_number = 0u32;
                for op in BlendOp::ALL {
                    // Additional RGB ops ignore the overlap mode.
                    if op.is_additional_rgb() && overlap != OverlapMode::Uncorrelated {
                        continue;
                    }
                    let config = CaseConfig {
                        mode: TestMode::Generic,
                        test_number,
                        blend_ops: vec![op; count as usize],
                        coherent_operations: false,
                        independent_blend: false,
                        color_attachments: count,
                        blend: BlendParameters {
                            premultiplied_src_color,
                            premultiplied_dst_color,
                            overlap,
                        },
                        format: ColorFormat::R16G16B16A16Sfloat,
                    };
                    test_number += 1;
                    push_both_formats(out, PlanGroup::Ops, config);
                }
            }
        }
    }
}

fn push_independent_group(out: &mut Vec<PlannedCase>, rng: &mut SplitMix64) {
    for (test_number, count) in (0u32..).zip(ATTACHMENT_COUNTS.into_iter().skip(1)) {
        let config = CaseConfig {
            mode: TestMode::Generic,
            test_number,
            blend_ops: (0..count).map(|_| random_op(rng)).collect(),
            coherent_operations: false,
            independent_blend: true,
            color_attachments: count,
            blend: BlendParameters::default(),
            format: ColorFormat::R16G16B16A16Sfloat,
        };
        push_both_formats(out, PlanGroup::Independent, config);
    }
}

fn push_coherent_group(out: &mut Vec<PlannedCase>, rng: &mut SplitMix64) {
    for (test_number, coherent_operations) in (0u32..).zip([false, true]) {
        let first = random_op(rng);
        let second = random_op(rng);
        let config = CaseConfig {
            mode: TestMode::Coherent,
            test_number,
            blend_ops: vec![first, second],
            coherent_operations,
            independent_blend: false,
            color_attachments: 1,
            blend: BlendParameters::default(),
            format: ColorFormat::R16G16B16A16Sfloat,
        };
        push_both_formats(out, PlanGroup::Coherent, config);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/suite/plan.rs"]
mod tests;

use std::collections::HashSet;

use super::*;
use crate::blend::ops::{AdvancedOp, RgbOp};

fn generic(ops: Vec<BlendOp>) -> CaseConfig {
    CaseConfig {
        mode: TestMode::Generic,
        test_number: 0,
        color_attachments: ops.len() as u32,
        blend_ops: ops,
        coherent_operations: false,
        independent_blend: false,
        blend: BlendParameters::default(),
        format: ColorFormat::R16G16B16A16Sfloat,
    }
}

#[test]
fn plan_sizes_per_group() {
    let plan = build_plan();
    let count = |g| plan.iter().filter(|c| c.group == g).count();
    // Per attachment count: 4 premultiply modes x (46 uncorrelated + 35 + 35), two formats.
    assert_eq!(count(PlanGroup::Ops), 5 * 4 * (46 + 35 + 35) * 2);
    assert_eq!(count(PlanGroup::Independent), 4 * 2);
    assert_eq!(count(PlanGroup::Coherent), 2 * 2);
}

#[test]
fn plan_is_deterministic() {
    assert_eq!(build_plan(), build_plan());
}

#[test]
fn every_planned_case_validates_with_unique_path() {
    let plan = build_plan();
    let mut seen = HashSet::new();
    for case in &plan {
        case.config.validate().unwrap();
        assert!(seen.insert(case.path()), "duplicate {}", case.path());
    }
}

#[test]
fn first_ops_cases_follow_naming_scheme() {
    let plan = plan_group(PlanGroup::Ops);
    assert_eq!(
        plan[0].path(),
        "blend_operation_advanced.ops.color_attachments_1_blend_overlap_uncorrelated_ext_nonpremultipliedsrc_nonpremultiplieddst_0"
    );
    assert_eq!(
        plan[1].config.name(),
        "color_attachments_1_blend_overlap_uncorrelated_ext_nonpremultipliedsrc_nonpremultiplieddst_0_r8g8b8a8_unorm"
    );
    assert_eq!(plan[0].config.blend_ops, vec![BlendOp::Advanced(AdvancedOp::Zero)]);
    assert_eq!(plan[2].config.test_number, 1);
}

#[test]
fn additional_rgb_ops_only_with_uncorrelated_overlap() {
    for case in plan_group(PlanGroup::Ops) {
        if case.config.blend_ops[0].is_additional_rgb() {
            assert_eq!(case.config.blend.overlap, OverlapMode::Uncorrelated);
        }
    }
}

#[test]
fn coherent_cases_use_barrier_prefix_when_not_coherent() {
    let plan = plan_group(PlanGroup::Coherent);
    assert!(plan[0].config.name().starts_with("barrier_color_attachments_1_"));
    assert!(!plan[2].config.name().starts_with("barrier_"));
    assert!(plan[2].config.coherent_operations);
    for case in &plan {
        assert_eq!(case.config.blend_ops.len(), 2);
    }
}

#[test]
fn independent_cases_have_one_op_per_attachment() {
    let counts: Vec<u32> = plan_group(PlanGroup::Independent)
        .iter()
        .map(|c| c.config.color_attachments)
        .collect();
    assert_eq!(counts, vec![2, 2, 4, 4, 8, 8, 16, 16]);
}

#[test]
fn validate_rejects_inconsistent_configs() {
    let mut c = generic(vec![AdvancedOp::Multiply.into(), AdvancedOp::Screen.into()]);
    assert!(c.validate().is_err());
    c.independent_blend = true;
    c.validate().unwrap();

    c.color_attachments = 3;
    assert!(c.validate().is_err());

    let mut c = generic(vec![AdvancedOp::Multiply.into()]);
    c.mode = TestMode::Coherent;
    assert!(c.validate().is_err());
    c.blend_ops.push(RgbOp::Plus.into());
    c.validate().unwrap();

    c.color_attachments = 0;
    assert!(c.validate().is_err());
}

#[test]
fn support_check_reports_missing_caps() {
    let full = AdvancedBlendCaps::default();
    let c = generic(vec![AdvancedOp::Src.into()]);
    c.check_support(&full).unwrap();

    let caps = AdvancedBlendCaps {
        all_operations: false,
        ..full.clone()
    };
    assert!(c.check_support(&caps).unwrap_err().is_unsupported());
    generic(vec![AdvancedOp::HslHue.into()])
        .check_support(&caps)
        .unwrap();

    let mut c = generic(vec![AdvancedOp::Multiply.into(); 4]);
    let caps = AdvancedBlendCaps {
        max_color_attachments: 2,
        ..full.clone()
    };
    assert!(c.check_support(&caps).unwrap_err().is_unsupported());

    c.blend.overlap = OverlapMode::Disjoint;
    let caps = AdvancedBlendCaps {
        correlated_overlap: false,
        ..full.clone()
    };
    assert!(c.check_support(&caps).unwrap_err().is_unsupported());

    let mut c = generic(vec![AdvancedOp::Multiply.into()]);
    c.blend.premultiplied_dst_color = false;
    let caps = AdvancedBlendCaps {
        non_premultiplied_dst_color: false,
        ..full.clone()
    };
    assert!(c.check_support(&caps).unwrap_err().is_unsupported());
    let caps = AdvancedBlendCaps {
        non_premultiplied_src_color: false,
        ..full
    };
    c.check_support(&caps).unwrap();
}

#[test]
fn case_config_json_accepts_names_and_raw_codes() {
    let c: CaseConfig = serde_json::from_str(
        r#"{
            "blend_ops": ["VK_BLEND_OP_MULTIPLY_EXT", 1000148035],
            "independent_blend": true,
            "color_attachments": 2,
            "blend": { "premultiplied_src_color": true, "premultiplied_dst_color": false, "overlap": "conjoint" },
            "format": "r8g8b8a8_unorm"
        }"#,
    )
    .unwrap();
    assert_eq!(c.mode, TestMode::Generic);
    assert_eq!(
        c.blend_ops,
        vec![AdvancedOp::Multiply.into(), RgbOp::Plus.into()]
    );
    assert!(c.format.is_unorm());
    c.validate().unwrap();
    assert_eq!(
        c.name(),
        "color_attachments_2_blend_overlap_conjoint_ext_nonpremultiplieddst_0_r8g8b8a8_unorm"
    );

    let caps: AdvancedBlendCaps = serde_json::from_str(r#"{ "coherent_operations": false }"#).unwrap();
    assert_eq!(caps.max_color_attachments, 16);
    assert!(!caps.coherent_operations);
}

#[test]
fn group_names_parse() {
    for g in PlanGroup::ALL {
        assert_eq!(g.name().parse::<PlanGroup>().unwrap(), g);
    }
    assert!("all".parse::<PlanGroup>().is_err());
}

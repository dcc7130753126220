use super::*;
use crate::blend::ops::AdvancedOp;
use crate::blend::weights::BlendParameters;

fn multiply_case() -> CaseConfig {
    CaseConfig {
        mode: TestMode::Generic,
        test_number: 0,
        blend_ops: vec![AdvancedOp::Multiply.into(); 2],
        coherent_operations: false,
        independent_blend: false,
        color_attachments: 2,
        blend: BlendParameters::default(),
        format: ColorFormat::R16G16B16A16Sfloat,
    }
}

#[test]
fn thresholds_per_mode_and_format() {
    assert_eq!(
        comparison_threshold(TestMode::Generic, ColorFormat::R16G16B16A16Sfloat),
        Color4::splat(0.01)
    );
    assert_eq!(
        comparison_threshold(TestMode::Generic, ColorFormat::R8G8B8A8Unorm),
        Color4::new(0.15, 0.15, 0.15, 0.13)
    );
    assert_eq!(
        comparison_threshold(TestMode::Coherent, ColorFormat::R8G8B8A8Unorm),
        Color4::splat(0.13)
    );
    assert_eq!(
        comparison_threshold(TestMode::Coherent, ColorFormat::R16G16B16A16Sfloat),
        Color4::splat(0.01)
    );
}

#[test]
fn identical_images_pass() {
    let img = ReferenceImage::cleared(8, 8, Color4::new(0.25, 0.5, 0.75, 1.0));
    let report = float_threshold_compare(&img, &img, Color4::splat(0.0)).unwrap();
    assert!(report.passed());
    assert_eq!(report.first_mismatch, None);
    assert_eq!(report.max_diff, Color4::splat(0.0));
}

#[test]
fn differences_over_threshold_are_counted() {
    let reference = ReferenceImage::cleared(8, 4, Color4::splat(0.5));
    let mut result = reference.clone();
    result.pixels[8 + 3].g = 0.75;
    result.pixels[20].a = 0.5 + 0.0039;

    let report = float_threshold_compare(&reference, &result, Color4::splat(0.01)).unwrap();
    assert!(!report.passed());
    assert_eq!(report.mismatched, 1);
    assert_eq!(report.first_mismatch, Some((3, 1)));
    assert_eq!(report.max_diff.g, 0.25);
}

#[test]
fn nan_never_passes() {
    let reference = ReferenceImage::cleared(2, 2, Color4::WHITE);
    let mut result = reference.clone();
    result.pixels[3].r = f32::NAN;
    let report = float_threshold_compare(&reference, &result, Color4::splat(1.0)).unwrap();
    assert_eq!(report.mismatched, 1);
    assert_eq!(report.first_mismatch, Some((1, 1)));
}

#[test]
fn dimension_mismatch_is_a_validation_error() {
    let a = ReferenceImage::cleared(4, 4, Color4::WHITE);
    let b = ReferenceImage::cleared(4, 2, Color4::WHITE);
    let err = float_threshold_compare(&a, &b, Color4::splat(0.01)).unwrap_err();
    assert!(matches!(err, AdvBlendError::Validation(_)));
}

#[test]
fn case_compare_against_own_reference() {
    let config = multiply_case();
    let reference = reference_for_case(&config).unwrap();

    let reports = compare_case(&config, &reference.attachments).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(CompareReport::passed));

    let mut results = reference.attachments.clone();
    results[1].pixels[40].r += 0.5;
    let reports = compare_case(&config, &results).unwrap();
    assert!(reports[0].passed());
    assert_eq!(reports[1].first_mismatch, Some((8, 1)));

    assert!(compare_case(&config, &results[..1]).is_err());
}

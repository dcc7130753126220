use super::*;
use crate::blend::weights::OverlapMode;

const PREMULTIPLIED: BlendParameters = BlendParameters {
    premultiplied_src_color: true,
    premultiplied_dst_color: true,
    overlap: OverlapMode::Uncorrelated,
};

#[test]
fn zero_op_clears_everything() {
    for overlap in OverlapMode::ALL {
        let param = BlendParameters {
            overlap,
            ..PREMULTIPLIED
        };
        let out = calculate_final_color(
            &param,
            AdvancedOp::Zero.into(),
            Color4::new(1.0, 0.75, 0.5, 1.0),
            Color4::new(0.25, 0.5, 0.75, 0.5),
        );
        assert_eq!(out, Color4::TRANSPARENT, "{overlap}");
    }
}

#[test]
fn src_over_transparent_destination_passes_source_through() {
    let src = Color4::new(1.0, 0.75, 0.5, 1.0);
    let out = calculate_final_color(
        &PREMULTIPLIED,
        AdvancedOp::Src.into(),
        src,
        Color4::TRANSPARENT,
    );
    assert_eq!(out, src);
}

#[test]
fn zero_alpha_premultiplied_source_does_not_divide_by_zero() {
    let out = calculate_final_color(
        &PREMULTIPLIED,
        AdvancedOp::SrcOver.into(),
        Color4::new(0.5, 0.5, 0.5, 0.0),
        Color4::new(0.2, 0.4, 0.6, 1.0),
    );
    assert_eq!(out, Color4::new(0.2, 0.4, 0.6, 1.0));
}

#[test]
fn straight_inputs_skip_the_divide() {
    let param = BlendParameters {
        premultiplied_src_color: false,
        premultiplied_dst_color: false,
        ..PREMULTIPLIED
    };
    let out = calculate_final_color(
        &param,
        AdvancedOp::Multiply.into(),
        Color4::new(0.5, 0.5, 0.5, 1.0),
        Color4::new(0.5, 0.5, 0.5, 1.0),
    );
    assert_eq!(out, Color4::new(0.25, 0.25, 0.25, 1.0));
}

#[test]
fn standard_alpha_stays_in_unit_range() {
    let samples = [0.0_f32, 0.125, 0.375, 0.75, 1.0];
    for op in AdvancedOp::ALL {
        for overlap in OverlapMode::ALL {
            let param = BlendParameters {
                overlap,
                ..PREMULTIPLIED
            };
            for &a_s in &samples {
                for &a_d in &samples {
                    let out = calculate_final_color(
                        &param,
                        op.into(),
                        Color4::new(0.5 * a_s, 0.25 * a_s, a_s, a_s),
                        Color4::new(a_d, 0.5 * a_d, 0.0, a_d),
                    );
                    assert!(
                        (0.0..=1.0 + 1e-6).contains(&out.a),
                        "{op:?} {overlap} {a_s} {a_d} -> {out}"
                    );
                }
            }
        }
    }
}

#[test]
fn plus_clamped_saturates() {
    let c = Color4::splat(0.8);
    let out = calculate_final_color(&PREMULTIPLIED, RgbOp::PlusClamped.into(), c, c);
    assert_eq!(out, Color4::WHITE);

    let out = calculate_final_color(&PREMULTIPLIED, RgbOp::Plus.into(), c, c);
    assert_eq!(out, Color4::splat(1.6));
}

#[test]
fn contrast_of_white_on_white_is_white() {
    let out = calculate_final_color(
        &PREMULTIPLIED,
        RgbOp::Contrast.into(),
        Color4::WHITE,
        Color4::WHITE,
    );
    assert_eq!(out, Color4::WHITE);
}

#[test]
fn additional_rgb_premultiplies_straight_inputs() {
    let param = BlendParameters {
        premultiplied_src_color: false,
        ..PREMULTIPLIED
    };
    let out = calculate_final_color(
        &param,
        RgbOp::Plus.into(),
        Color4::new(1.0, 1.0, 1.0, 0.5),
        Color4::TRANSPARENT,
    );
    assert_eq!(out, Color4::splat(0.5));
}

#[test]
fn channel_select_ops_copy_one_source_channel() {
    let src = Color4::new(0.1, 0.2, 0.3, 0.4);
    let dst = Color4::new(0.5, 0.6, 0.7, 0.8);
    assert_eq!(additional_rgb(RgbOp::Red, src, dst), Color4::new(0.1, 0.6, 0.7, 0.8));
    assert_eq!(additional_rgb(RgbOp::Green, src, dst), Color4::new(0.5, 0.2, 0.7, 0.8));
    assert_eq!(additional_rgb(RgbOp::Blue, src, dst), Color4::new(0.5, 0.6, 0.3, 0.8));
}

#[test]
fn clamped_minus_and_plus_darker() {
    let src = Color4::new(0.75, 0.25, 0.0, 1.0);
    let dst = Color4::new(0.5, 0.5, 0.5, 0.5);
    assert_eq!(
        additional_rgb(RgbOp::MinusClamped, src, dst),
        Color4::new(0.0, 0.25, 0.5, 0.0)
    );
    assert_eq!(
        additional_rgb(RgbOp::PlusDarker, src, dst),
        Color4::new(0.75, 0.25, 0.0, 1.0)
    );
    assert_eq!(
        additional_rgb(RgbOp::InvertOvg, src, dst),
        Color4::new(0.5, 0.5, 0.5, 1.0)
    );
}

#[test]
fn raw_codes_match_typed_ops() {
    let src = Color4::new(0.25, 0.5, 0.75, 0.75);
    let dst = Color4::new(0.5, 0.25, 0.125, 0.5);
    for op in BlendOp::ALL {
        assert_eq!(
            calculate_final_color_raw(&PREMULTIPLIED, op.raw(), src, dst),
            calculate_final_color(&PREMULTIPLIED, op, src, dst),
            "{op}"
        );
    }
}

#[test]
#[should_panic(expected = "outside the advanced and additional RGB ranges")]
fn raw_basic_op_code_panics() {
    calculate_final_color_raw(&PREMULTIPLIED, 2, Color4::WHITE, Color4::WHITE);
}

use super::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn set_lum_with_itself_is_identity_for_grey() {
    let c = Color3::new(0.5, 0.5, 0.5);
    assert_eq!(set_lum(c, c), c);
}

#[test]
fn luminosity_and_saturation() {
    assert!(approx(luminosity(Color3::splat(1.0)), 1.0));
    assert!(approx(luminosity(Color3::new(1.0, 0.0, 0.0)), 0.3));
    assert_eq!(saturation(Color3::new(0.25, 0.5, 1.0)), 0.75);
    assert_eq!(min_of3(Color3::new(0.25, -0.5, 1.0)), -0.5);
    assert_eq!(max_of3(Color3::new(0.25, -0.5, 1.0)), 1.0);
}

#[test]
fn clip_color_lifts_negative_components() {
    let c = Color3::new(-0.5, 0.5, 0.5);
    let clipped = clip_color(c);
    assert!(approx(clipped.r, 0.0));
    assert!(min_of3(clipped) >= -1e-6);
    assert!(approx(luminosity(clipped), luminosity(c)));
}

#[test]
fn clip_color_lowers_components_above_one() {
    let c = Color3::new(1.5, 0.5, 0.5);
    let clipped = clip_color(c);
    assert!(approx(clipped.r, 1.0));
    assert!(approx(clipped.g, 0.8 - 0.3 * 0.2 / 0.7));
    assert!(approx(luminosity(clipped), luminosity(c)));
}

#[test]
fn clip_color_is_noop_in_range() {
    let c = Color3::new(0.25, 0.5, 0.75);
    assert_eq!(clip_color(c), c);
}

#[test]
fn set_lum_sat_guards_zero_saturation() {
    let out = set_lum_sat(
        Color3::splat(0.5),
        Color3::new(0.0, 0.5, 1.0),
        Color3::splat(0.2),
    );
    assert!(out.r.is_finite() && out.g.is_finite() && out.b.is_finite());
    assert!(approx(out.r, 0.2));
    assert_eq!(out.r, out.g);
    assert_eq!(out.g, out.b);
}

#[test]
fn set_lum_sat_transfers_saturation_and_luminosity() {
    let out = set_lum_sat(
        Color3::new(0.2, 0.4, 0.6),
        Color3::new(0.0, 0.0, 0.5),
        Color3::splat(0.25),
    );
    assert!(approx(saturation(out), 0.5));
    assert!(approx(luminosity(out), luminosity(Color3::splat(0.25))));
    assert!(out.r < out.g && out.g < out.b);
}

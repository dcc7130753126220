use super::*;

#[test]
fn table_shape() {
    assert_eq!(COLOR_PAIRS.len(), 52);
    assert_eq!(COHERENT_PAIR_COUNT, 26);
    assert_eq!(COLOR_PAIRS[0].dst, Color4::TRANSPARENT);
    assert_eq!(COLOR_PAIRS[2].dst, Color4::new(-0.125, -0.125, -0.125, 1.0));
    assert_eq!(COLOR_PAIRS[5].dst, Color4::new(1.125, 1.125, 1.125, 1.0));
}

#[test]
fn branch_block_alternates_sources_over_greys() {
    assert_eq!(COLOR_PAIRS[6].src, Color4::new(1.0, 0.75, 0.5, 1.0));
    assert_eq!(COLOR_PAIRS[7].src, Color4::new(0.25, 0.125, 0.0, 1.0));
    assert_eq!(COLOR_PAIRS[8].dst, Color4::new(0.5, 0.5, 0.5, 1.0));
    assert_eq!(COLOR_PAIRS[15].dst, Color4::new(0.0, 0.0, 0.0, 1.0));
}

#[test]
fn scaled_blocks_keep_colors_premultiplied() {
    assert_eq!(
        COLOR_PAIRS[16],
        ColorPair {
            src: Color4::new(0.75, 0.5625, 0.375, 0.75),
            dst: Color4::new(0.75, 0.75, 0.75, 0.75),
        }
    );
    assert_eq!(COLOR_PAIRS[26].src.a, A2);
    assert_eq!(COLOR_PAIRS[45].dst, Color4::new(0.0, 0.0, 0.0, A3));

    for (i, pair) in COLOR_PAIRS.iter().enumerate().skip(16) {
        for c in [pair.src, pair.dst] {
            assert!(c.r <= c.a && c.g <= c.a && c.b <= c.a, "pair {i}: {c}");
        }
    }
}

#[test]
fn mixed_alpha_tail() {
    assert_eq!(COLOR_PAIRS[46].src, Color4::new(0.75, 0.75, 0.5, 0.75));
    assert_eq!(COLOR_PAIRS[51].dst, Color4::new(0.125, 0.125, 0.125, 0.125));
    assert!(
        COLOR_PAIRS[46..]
            .iter()
            .any(|p| p.src.a != p.dst.a)
    );
}

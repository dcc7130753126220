//! Source/destination color pairs exercised by every case.
//!
//! All colors are premultiplied. The table starts with premultiply conversion and
//! clamping pairs, then a block that hits the branches of the blend curves, then the same
//! block scaled by three alpha levels, then a few pairs whose source and destination
//! alphas differ.

use crate::foundation::core::Color4;

/// Alpha between 1 and 0.5.
pub const A1: f32 = 0.750;
/// Alpha between 0.5 and 0.25.
pub const A2: f32 = 0.375;
/// Alpha between 0.25 and 0.
pub const A3: f32 = 0.125;

/// Number of pairs in [`COLOR_PAIRS`].
pub const COLOR_PAIR_COUNT: usize = 52;
/// Pairs drawn per pass in coherent mode; the second pass uses the other half.
pub const COHERENT_PAIR_COUNT: usize = COLOR_PAIR_COUNT / 2;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ColorPair {
    pub src: Color4,
    pub dst: Color4,
}

impl ColorPair {
    const fn new(src: Color4, dst: Color4) -> Self {
        Self { src, dst }
    }

    const fn scaled(self, a: f32) -> Self {
        Self::new(scale(self.src, a), scale(self.dst, a))
    }
}

const fn scale(c: Color4, a: f32) -> Color4 {
    Color4::new(c.r * a, c.g * a, c.b * a, c.a * a)
}

const fn grey(v: f32) -> Color4 {
    Color4::new(v, v, v, 1.0)
}

const BRIGHT: Color4 = Color4::new(1.000, 0.750, 0.500, 1.0);
const DARK: Color4 = Color4::new(0.250, 0.125, 0.000, 1.0);

const BRANCH_GREYS: [f32; 5] = [1.0, 0.5, 0.25, 0.125, 0.0];
const BRANCH_START: usize = 6;
const BRANCH_LEN: usize = 2 * BRANCH_GREYS.len();

const MIXED_ALPHA: [ColorPair; 6] = [
    ColorPair::new(Color4::new(0.750, 0.750, 0.500, 0.750), Color4::new(1.000, 1.000, 1.000, 1.000)),
    ColorPair::new(Color4::new(0.250, 0.500, 0.500, 0.750), Color4::new(0.250, 0.250, 0.250, 0.500)),
    ColorPair::new(Color4::new(0.250, 0.125, 0.000, 0.500), Color4::new(0.500, 0.500, 0.500, 0.750)),
    ColorPair::new(Color4::new(0.250, 0.250, 0.500, 0.500), Color4::new(0.250, 0.250, 0.250, 0.250)),
    ColorPair::new(Color4::new(0.250, 0.125, 0.000, 0.250), Color4::new(0.250, 0.250, 0.250, 0.500)),
    ColorPair::new(Color4::new(0.125, 0.125, 0.125, 0.250), Color4::new(0.125, 0.125, 0.125, 0.125)),
];

/// The full pair table, in draw order. Index `i` lands on pixel `(i % 32, i / 32)`.
pub const COLOR_PAIRS: [ColorPair; COLOR_PAIR_COUNT] = build_pairs();

const fn build_pairs() -> [ColorPair; COLOR_PAIR_COUNT] {
    let mut out = [ColorPair::new(Color4::TRANSPARENT, Color4::TRANSPARENT); COLOR_PAIR_COUNT];

    // (1, 1, 1, 0) is not a valid premultiplied color, so the zero-alpha
    // destination is fully transparent.
    out[0] = ColorPair::new(BRIGHT, Color4::TRANSPARENT);
    out[1] = ColorPair::new(DARK, Color4::TRANSPARENT);

    // Destinations outside [0, 1].
    out[2] = ColorPair::new(BRIGHT, grey(-0.125));
    out[3] = ColorPair::new(DARK, grey(-0.125));
    out[4] = ColorPair::new(BRIGHT, grey(1.125));
    out[5] = ColorPair::new(DARK, grey(1.125));

    let mut k = 0;
    while k < BRANCH_LEN {
        let src = if k % 2 == 0 { BRIGHT } else { DARK };
        out[BRANCH_START + k] = ColorPair::new(src, grey(BRANCH_GREYS[k / 2]));
        k += 1;
    }

    let alphas = [A1, A2, A3];
    let mut b = 0;
    while b < alphas.len() {
        let mut k = 0;
        while k < BRANCH_LEN {
            let base = BRANCH_START + BRANCH_LEN * (b + 1);
            out[base + k] = out[BRANCH_START + k].scaled(alphas[b]);
            k += 1;
        }
        b += 1;
    }

    let mut m = 0;
    while m < MIXED_ALPHA.len() {
        out[COLOR_PAIR_COUNT - MIXED_ALPHA.len() + m] = MIXED_ALPHA[m];
        m += 1;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/suite/colors.rs"]
mod tests;

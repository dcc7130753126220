//! Per-channel blend curves.
//!
//! Every kernel takes the base source and destination channel (normally in `[0, 1]`) and
//! evaluates its branches in a fixed order: reference fixtures sit exactly on the
//! boundaries (0, 0.25, 0.5, 1), so the inclusive/exclusive comparisons below are part of
//! the contract.

/// `a <= b ? a : b`. Unlike `f32::min` a NaN in `b` propagates.
pub(crate) fn min_f(a: f32, b: f32) -> f32 {
    if a <= b { a } else { b }
}

/// `a >= b ? a : b`. Unlike `f32::max` a NaN in `b` propagates.
pub(crate) fn max_f(a: f32, b: f32) -> f32 {
    if a >= b { a } else { b }
}

pub fn overlay(src: f32, dst: f32) -> f32 {
    if dst <= 0.5 {
        2.0 * src * dst
    } else {
        1.0 - (2.0 * (1.0 - src) * (1.0 - dst))
    }
}

pub fn color_dodge(src: f32, dst: f32) -> f32 {
    if dst <= 0.0 {
        0.0
    } else if src < 1.0 {
        min_f(1.0, dst / (1.0 - src))
    } else {
        1.0
    }
}

pub fn color_burn(src: f32, dst: f32) -> f32 {
    if dst >= 1.0 {
        1.0
    } else if src > 0.0 {
        1.0 - min_f(1.0, (1.0 - dst) / src)
    } else {
        0.0
    }
}

pub fn hard_light(src: f32, dst: f32) -> f32 {
    if src <= 0.5 {
        2.0 * src * dst
    } else {
        1.0 - (2.0 * (1.0 - src) * (1.0 - dst))
    }
}

pub fn soft_light(src: f32, dst: f32) -> f32 {
    if src <= 0.5 {
        dst - ((1.0 - (2.0 * src)) * dst * (1.0 - dst))
    } else if dst <= 0.25 {
        dst + (((2.0 * src) - 1.0) * dst * ((((16.0 * dst) - 12.0) * dst) + 3.0))
    } else {
        dst + (((2.0 * src) - 1.0) * (dst.sqrt() - dst))
    }
}

pub fn linear_dodge(src: f32, dst: f32) -> f32 {
    if (src + dst) <= 1.0 { src + dst } else { 1.0 }
}

pub fn linear_burn(src: f32, dst: f32) -> f32 {
    if (src + dst) > 1.0 {
        src + dst - 1.0
    } else {
        0.0
    }
}

pub fn vivid_light(src: f32, dst: f32) -> f32 {
    if src <= 0.0 {
        return 0.0;
    }
    if src < 0.5 {
        return 1.0 - min_f(1.0, (1.0 - dst) / (2.0 * src));
    }
    if src < 1.0 {
        return min_f(1.0, dst / (2.0 * (1.0 - src)));
    }
    1.0
}

pub fn linear_light(src: f32, dst: f32) -> f32 {
    if (2.0 * src + dst) > 2.0 {
        return 1.0;
    }
    if (2.0 * src + dst) <= 1.0 {
        return 0.0;
    }
    (2.0 * src) + dst - 1.0
}

pub fn pin_light(src: f32, dst: f32) -> f32 {
    let edge = 2.0 * src - 1.0;
    if edge > dst && src < 0.5 {
        return 0.0;
    }
    if edge > dst && src >= 0.5 {
        return edge;
    }
    if edge <= dst && src < (0.5 * dst) {
        return 2.0 * src;
    }
    if edge <= dst && src >= (0.5 * dst) {
        return dst;
    }
    // Only reachable with NaN inputs.
    0.0
}

pub fn hard_mix(src: f32, dst: f32) -> f32 {
    if (src + dst) < 1.0 { 0.0 } else { 1.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/kernels.rs"]
mod tests;

use rayon::prelude::*;

use crate::blend::compose::calculate_final_color;
use crate::blend::ops::BlendOp;
use crate::blend::weights::BlendParameters;
use crate::foundation::core::Color4;
use crate::foundation::error::{AdvBlendError, AdvBlendResult};
use crate::foundation::math::quantize_unorm8;
use crate::suite::colors::{COHERENT_PAIR_COUNT, COLOR_PAIRS};
use crate::suite::plan::{CaseConfig, ColorFormat, TestMode};

/// Width of every attachment and reference image.
pub const REFERENCE_WIDTH: u32 = 32;
/// Height of every attachment and reference image.
pub const REFERENCE_HEIGHT: u32 = 32;

/// Row-major RGBA f32 image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReferenceImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color4>,
}

impl ReferenceImage {
    /// `width x height` image filled with `color`.
    pub fn cleared(width: u32, height: u32, color: Color4) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color4> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    fn set(&mut self, x: u32, y: u32, color: Color4) {
        let idx = y as usize * self.width as usize + x as usize;
        if let Some(px) = self.pixels.get_mut(idx) {
            *px = color;
        }
    }

    /// Checks that the pixel buffer matches the dimensions, e.g. after loading from JSON.
    pub fn validate(&self) -> AdvBlendResult<()> {
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() != expected {
            return Err(AdvBlendError::validation(format!(
                "image is {}x{} but holds {} pixels (expected {expected})",
                self.width,
                self.height,
                self.pixels.len()
            )));
        }
        Ok(())
    }
}

/// Pixel of color pair `index`.
pub fn pixel_coordinates(index: usize) -> (u32, u32) {
    let index = index as u32;
    (index % REFERENCE_WIDTH, index / REFERENCE_HEIGHT)
}

/// Expected attachment contents for one case.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaseReference {
    pub case: String,
    pub format: ColorFormat,
    /// One image per color attachment.
    pub attachments: Vec<ReferenceImage>,
    /// Color pair indices the renderer draws.
    pub drawn: Vec<usize>,
    /// Pair indices left at the clear color because their result is undefined.
    pub skipped: Vec<usize>,
}

/// `true` for a zero or negative alpha paired with any non-zero component.
///
/// Un-premultiplying such a color is undefined.
pub fn is_ill_formed(color: Color4) -> bool {
    color.a <= 0.0 && color != Color4::TRANSPARENT
}

/// Converts a composed color to what a non-premultiplied destination stores.
/// `None` when the color has no defined straight form.
fn stored_color(param: &BlendParameters, color: Color4) -> Option<Color4> {
    if param.premultiplied_dst_color {
        return Some(color);
    }
    if color.a > 0.0 {
        Some((color.rgb() / color.a).with_alpha(color.a))
    } else if color == Color4::TRANSPARENT {
        Some(color)
    } else {
        None
    }
}

fn is_comparable(color: Color4) -> bool {
    color
        .to_array()
        .into_iter()
        .all(|v| v == 0.0 || v.is_normal())
}

fn to_format(format: ColorFormat, color: Color4) -> Color4 {
    if format.is_unorm() {
        color.map(quantize_unorm8)
    } else {
        color
    }
}

/// Indices into [`COLOR_PAIRS`] that a renderer draws for `config`.
///
/// With a non-premultiplied destination, pairs whose composed color is ill-formed on any
/// attachment are not drawn. Coherent cases draw the first half of the table and only the
/// first op decides.
pub fn draw_list(config: &CaseConfig) -> Vec<usize> {
    let (count, ops): (usize, &[BlendOp]) = match config.mode {
        TestMode::Generic => (COLOR_PAIRS.len(), &config.blend_ops),
        TestMode::Coherent => (
            COHERENT_PAIR_COUNT,
            &config.blend_ops[..config.blend_ops.len().min(1)],
        ),
    };

    (0..count)
        .filter(|&i| {
            config.blend.premultiplied_dst_color
                || ops.iter().all(|op| {
                    let pair = COLOR_PAIRS[i];
                    !is_ill_formed(calculate_final_color(&config.blend, *op, pair.src, pair.dst))
                })
        })
        .collect()
}

/// Reference images for one case.
#[tracing::instrument(skip(config), fields(case = %config.name()))]
pub fn reference_for_case(config: &CaseConfig) -> AdvBlendResult<CaseReference> {
    config.validate()?;

    let (attachments, skipped) = match config.mode {
        TestMode::Generic => generic_reference(config),
        TestMode::Coherent => coherent_reference(config),
    };
    let drawn = draw_list(config);
    tracing::debug!(drawn = drawn.len(), skipped = skipped.len(), "reference built");

    Ok(CaseReference {
        case: config.name(),
        format: config.format,
        attachments,
        drawn,
        skipped,
    })
}

fn generic_reference(config: &CaseConfig) -> (Vec<ReferenceImage>, Vec<usize>) {
    let mut skipped = Vec::new();
    let mut images = vec![
        ReferenceImage::cleared(REFERENCE_WIDTH, REFERENCE_HEIGHT, Color4::WHITE);
        config.blend_ops.len()
    ];

    for (i, pair) in COLOR_PAIRS.iter().enumerate() {
        let colors = config
            .blend_ops
            .iter()
            .map(|op| {
                let composed = calculate_final_color(&config.blend, *op, pair.src, pair.dst);
                stored_color(&config.blend, composed).filter(|c| is_comparable(*c))
            })
            .collect::<Option<Vec<_>>>();

        let Some(colors) = colors else {
            tracing::debug!(pair = i, "skipping ill-formed color");
            skipped.push(i);
            continue;
        };
        let (x, y) = pixel_coordinates(i);
        for (img, color) in images.iter_mut().zip(colors) {
            img.set(x, y, to_format(config.format, color));
        }
    }
    (images, skipped)
}

fn coherent_reference(config: &CaseConfig) -> (Vec<ReferenceImage>, Vec<usize>) {
    let mut skipped = Vec::new();
    let mut image = ReferenceImage::cleared(REFERENCE_WIDTH, REFERENCE_HEIGHT, Color4::WHITE);
    let (first_op, second_op) = (config.blend_ops[0], config.blend_ops[1]);

    for i in 0..COHERENT_PAIR_COUNT {
        let pair = COLOR_PAIRS[i];
        let second_src = COLOR_PAIRS[i + COHERENT_PAIR_COUNT].src;

        let color = stored_color(
            &config.blend,
            calculate_final_color(&config.blend, first_op, pair.src, pair.dst),
        )
        .and_then(|tmp| {
            stored_color(
                &config.blend,
                calculate_final_color(&config.blend, second_op, second_src, tmp),
            )
        })
        .filter(|c| is_comparable(*c));

        let Some(color) = color else {
            tracing::debug!(pair = i, "skipping ill-formed color");
            skipped.push(i);
            continue;
        };
        let (x, y) = pixel_coordinates(i);
        image.set(x, y, to_format(config.format, color));
    }
    (vec![image], skipped)
}

/// Controls batch reference generation.
#[derive(Clone, Debug, Default)]
pub struct ReferenceThreading {
    pub parallel: bool,
    /// Worker count when `parallel`; `None` uses the rayon default.
    pub threads: Option<usize>,
}

/// References for many cases, in input order. Parallel output equals serial output.
#[tracing::instrument(skip(configs), fields(cases = configs.len()))]
pub fn build_references(
    configs: &[CaseConfig],
    threading: &ReferenceThreading,
) -> AdvBlendResult<Vec<CaseReference>> {
    if !threading.parallel {
        return configs.iter().map(reference_for_case).collect();
    }

    let pool = build_thread_pool(threading.threads)?;
    let built = pool.install(|| {
        configs
            .par_iter()
            .map(reference_for_case)
            .collect::<Vec<_>>()
    });

    let mut out = Vec::with_capacity(built.len());
    for item in built {
        out.push(item?);
    }
    tracing::info!(cases = out.len(), "built references in parallel");
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> AdvBlendResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(AdvBlendError::validation(
            "reference threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AdvBlendError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/suite/reference.rs"]
mod tests;

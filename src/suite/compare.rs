use crate::foundation::core::Color4;
use crate::foundation::error::{AdvBlendError, AdvBlendResult};
use crate::suite::plan::{CaseConfig, ColorFormat, TestMode};
use crate::suite::reference::{ReferenceImage, reference_for_case};

/// Per-channel tolerance for `mode` and `format`.
///
/// The 8-bit values were tuned against real hardware; coherent cases chain two blends, so
/// their alpha tolerance applies to all channels.
pub fn comparison_threshold(mode: TestMode, format: ColorFormat) -> Color4 {
    match (mode, format) {
        (_, ColorFormat::R16G16B16A16Sfloat) => Color4::splat(0.01),
        (TestMode::Generic, ColorFormat::R8G8B8A8Unorm) => Color4::new(0.15, 0.15, 0.15, 0.13),
        (TestMode::Coherent, ColorFormat::R8G8B8A8Unorm) => Color4::splat(0.13),
    }
}

/// Outcome of comparing one rendered image with its reference.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompareReport {
    pub width: u32,
    pub height: u32,
    pub threshold: Color4,
    /// Pixels with at least one channel over the threshold.
    pub mismatched: usize,
    /// First mismatching pixel in row-major order.
    pub first_mismatch: Option<(u32, u32)>,
    /// Largest absolute difference seen per channel.
    pub max_diff: Color4,
}

impl CompareReport {
    pub fn passed(&self) -> bool {
        self.mismatched == 0
    }
}

/// Compares `result` against `reference` channel by channel.
///
/// A pixel passes when every `|reference - result|` is at most the matching `threshold`
/// channel. NaN differences never pass.
pub fn float_threshold_compare(
    reference: &ReferenceImage,
    result: &ReferenceImage,
    threshold: Color4,
) -> AdvBlendResult<CompareReport> {
    reference.validate()?;
    result.validate()?;
    if (reference.width, reference.height) != (result.width, result.height) {
        return Err(AdvBlendError::validation(format!(
            "result image is {}x{} but the reference is {}x{}",
            result.width, result.height, reference.width, reference.height
        )));
    }

    let mut report = CompareReport {
        width: reference.width,
        height: reference.height,
        threshold,
        mismatched: 0,
        first_mismatch: None,
        max_diff: Color4::splat(0.0),
    };

    for (idx, (r, o)) in reference.pixels.iter().zip(&result.pixels).enumerate() {
        let diff = r.zip_map(*o, |a, b| (a - b).abs());
        report.max_diff = report.max_diff.zip_map(diff, |m, d| if d > m { d } else { m });

        let ok = diff
            .to_array()
            .into_iter()
            .zip(threshold.to_array())
            .all(|(d, t)| d <= t);
        if !ok {
            report.mismatched += 1;
            if report.first_mismatch.is_none() {
                let w = reference.width as usize;
                report.first_mismatch = Some(((idx % w) as u32, (idx / w) as u32));
            }
        }
    }
    Ok(report)
}

/// Compares rendered attachments with freshly built references for `config`.
#[tracing::instrument(skip(config, results), fields(case = %config.name()))]
pub fn compare_case(
    config: &CaseConfig,
    results: &[ReferenceImage],
) -> AdvBlendResult<Vec<CompareReport>> {
    let reference = reference_for_case(config)?;
    if results.len() != reference.attachments.len() {
        return Err(AdvBlendError::validation(format!(
            "case has {} attachments but {} result images were given",
            reference.attachments.len(),
            results.len()
        )));
    }

    let threshold = comparison_threshold(config.mode, config.format);
    let reports = reference
        .attachments
        .iter()
        .zip(results)
        .map(|(r, o)| float_threshold_compare(r, o, threshold))
        .collect::<AdvBlendResult<Vec<_>>>()?;

    for (att, report) in reports.iter().enumerate() {
        tracing::info!(
            attachment = att,
            mismatched = report.mismatched,
            passed = report.passed(),
            "image comparison"
        );
    }
    Ok(reports)
}

#[cfg(test)]
#[path = "../../tests/unit/suite/compare.rs"]
mod tests;

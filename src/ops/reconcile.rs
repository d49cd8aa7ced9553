use crate::foundation::core::Fps;
use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::media::info::VideoInfo;

/// Why a set of clip descriptors could not be merged cleanly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MismatchCause {
    /// Widths or heights differ.
    Dimensions,
    /// Pixel formats differ.
    Formats,
    /// Frame rates differ.
    FrameRates,
    /// Frame counts differ (only reported under strict length checking).
    Lengths,
}

impl MismatchCause {
    fn describe(self) -> &'static str {
        match self {
            Self::Dimensions => "dimensions",
            Self::Formats => "formats",
            Self::FrameRates => "frame rates",
            Self::Lengths => "lengths",
        }
    }
}

/// Merged descriptor plus the highest-precedence mismatch, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reconciled {
    /// Merged descriptor. Fields that disagree are set to their "variable" value and the frame
    /// count is the maximum over all inputs.
    pub info: VideoInfo,
    /// `Dimensions` beats `Formats` beats `FrameRates` beats `Lengths`.
    pub mismatch: Option<MismatchCause>,
}

/// Merge `infos` into one descriptor.
///
/// With `ignore_length` a length difference is resolved by taking the maximum and is not
/// reported.
pub fn reconcile(infos: &[VideoInfo], ignore_length: bool) -> ClipweaveResult<Reconciled> {
    let Some((first, rest)) = infos.split_first() else {
        return Err(ClipweaveError::degenerate("no clips to reconcile"));
    };

    let mut out = *first;
    let mut causes = [false; 4];
    for vi in rest {
        if out.width != vi.width || out.height != vi.height {
            out.width = 0;
            out.height = 0;
            causes[0] = true;
        }
        if out.format != vi.format {
            out.format = None;
            causes[1] = true;
        }
        if out.fps != vi.fps {
            out.fps = Fps::VARIABLE;
            causes[2] = true;
        }
        if out.num_frames < vi.num_frames {
            out.num_frames = vi.num_frames;
        }
        if first.num_frames != vi.num_frames && !ignore_length {
            causes[3] = true;
        }
    }

    let mismatch = [
        MismatchCause::Dimensions,
        MismatchCause::Formats,
        MismatchCause::FrameRates,
        MismatchCause::Lengths,
    ]
    .into_iter()
    .zip(causes)
    .find_map(|(cause, hit)| hit.then_some(cause));

    Ok(Reconciled {
        info: out,
        mismatch,
    })
}

/// Apply the mismatch policy of the multi-clip operators.
///
/// A mismatch is fatal unless `tolerate` is set, and always fatal when any input uses a legacy
/// packed format.
pub(crate) fn check_mismatch(
    op: &str,
    mismatch: Option<MismatchCause>,
    tolerate: bool,
    any_compat: bool,
) -> ClipweaveResult<()> {
    match mismatch {
        Some(cause) if !tolerate || any_compat => Err(ClipweaveError::mismatch(format!(
            "{op}: the clips' {} don't match",
            cause.describe()
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/reconcile.rs"]
mod tests;

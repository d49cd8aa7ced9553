use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::Clip;
use crate::graph::protocol::Dep;
use crate::media::info::MediaInfo;
use crate::ops::{Operator, identity};

/// Parameters of `Trim` (frames) and `AudioTrim` (samples).
///
/// `last` and `length` are mutually exclusive. With no field set the operator is the identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrimParams {
    /// First kept index (default 0).
    pub first: Option<i64>,
    /// Last kept index, inclusive.
    pub last: Option<i64>,
    /// Number of kept indices.
    pub length: Option<i64>,
}

/// Validated `[first, first + length)` window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TrimWindow {
    pub(crate) first: u64,
    pub(crate) length: u64,
}

/// Validate `params` against a clip of `total` units. `Ok(None)` means the trim is the identity.
pub(crate) fn trim_window(
    op: &str,
    unit: &str,
    params: &TrimParams,
    total: u64,
) -> ClipweaveResult<Option<TrimWindow>> {
    if params.last.is_some() && params.length.is_some() {
        return Err(ClipweaveError::conflict(format!(
            "{op}: both last {unit} and length specified"
        )));
    }
    let first = params.first.unwrap_or(0);
    if let Some(last) = params.last
        && last < first
    {
        return Err(ClipweaveError::out_of_range(format!(
            "{op}: invalid last {unit} specified (last is less than first)"
        )));
    }
    if let Some(length) = params.length
        && length < 1
    {
        return Err(ClipweaveError::out_of_range(format!(
            "{op}: invalid length specified (less than 1)"
        )));
    }
    let Ok(first) = u64::try_from(first) else {
        return Err(ClipweaveError::out_of_range(format!(
            "{op}: invalid first {unit} specified (less than 0)"
        )));
    };

    // Both are >= first >= 0 or >= 1 here.
    let last = params.last.map(|l| l as u64);
    let length = params.length.map(|l| l as u64);
    let beyond_end = last.is_some_and(|l| l >= total)
        || length.is_some_and(|len| first.checked_add(len).is_none_or(|end| end > total))
        || total <= first;
    if beyond_end {
        return Err(ClipweaveError::out_of_range(format!(
            "{op}: last {unit} beyond clip end"
        )));
    }

    let kept = match (last, length) {
        (Some(last), _) => last - first + 1,
        (None, Some(length)) => length,
        (None, None) => total - first,
    };

    if *params == TrimParams::default() || kept == total {
        return Ok(None);
    }
    Ok(Some(TrimWindow {
        first,
        length: kept,
    }))
}

/// Keeps frames `[first, first + length)`: `n -> n + first`.
#[derive(Debug)]
pub struct Trim {
    clip: Clip,
    first: u32,
}

impl Trim {
    /// Upstream frame of output frame `n`.
    pub fn map(&self, n: u32) -> Dep {
        Dep::new(&self.clip, n.saturating_add(self.first))
    }
}

/// Build a `Trim` node, or return `clip` itself when the window covers the whole clip.
#[tracing::instrument(skip(clip), fields(clip = clip.name()))]
pub fn trim(clip: &Clip, params: TrimParams) -> ClipweaveResult<Clip> {
    let mut vi = clip.expect_video("Trim")?;
    let Some(window) = trim_window("Trim", "frame", &params, u64::from(vi.num_frames))? else {
        return Ok(identity("Trim", clip));
    };

    // The window lies inside a u32-counted clip.
    vi.num_frames = window.length as u32;
    let op = Trim {
        clip: clip.clone(),
        first: window.first as u32,
    };
    Ok(Clip::from_operator(
        "Trim",
        MediaInfo::Video(vi),
        Operator::Trim(op),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/ops/trim.rs"]
mod tests;

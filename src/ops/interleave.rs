use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::Clip;
use crate::graph::protocol::{Dep, Pending};
use crate::media::info::{MediaInfo, VideoInfo};
use crate::ops::reconcile::{check_mismatch, reconcile};
use crate::ops::{Operator, identity};

/// Parameters of `Interleave`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterleaveParams {
    /// Stretch every input to the longest one before interleaving.
    pub extend: bool,
    /// Tolerate differing dimensions, formats or frame rates.
    pub mismatch: bool,
    /// Multiply the frame rate by the clip count and divide frame durations by it.
    pub modify_duration: bool,
}

impl Default for InterleaveParams {
    fn default() -> Self {
        Self {
            extend: false,
            mismatch: false,
            modify_duration: true,
        }
    }
}

/// Alternates frames of `k` clips: `n -> clip[n mod k], frame n / k`.
#[derive(Debug)]
pub struct Interleave {
    clips: Vec<Clip>,
    modify_duration: bool,
}

impl Interleave {
    /// Upstream frame of output frame `n`.
    pub fn map(&self, n: u32) -> Dep {
        let k = self.clips.len() as u32;
        Dep::new(&self.clips[(n % k) as usize], n / k)
    }

    pub(crate) fn plan(&self, n: u32) -> Pending {
        let dep = self.map(n);
        if self.modify_duration {
            Pending::Retime {
                dep,
                mul: 1,
                div: self.clips.len() as i64,
            }
        } else {
            Pending::Forward(dep)
        }
    }
}

/// Build an `Interleave` node. A single clip is returned unchanged.
#[tracing::instrument(skip(clips), fields(clips = clips.len()))]
pub fn interleave(clips: &[Clip], params: InterleaveParams) -> ClipweaveResult<Clip> {
    let infos = clips
        .iter()
        .map(|c| c.expect_video("Interleave"))
        .collect::<ClipweaveResult<Vec<VideoInfo>>>()?;
    match clips {
        [] => return Err(ClipweaveError::degenerate("Interleave: no clips given")),
        [only] => return Ok(identity("Interleave", only)),
        _ => {}
    }

    let merged = reconcile(&infos, true)?;
    let any_compat = infos.iter().any(VideoInfo::is_compat);
    check_mismatch("Interleave", merged.mismatch, params.mismatch, any_compat)?;

    let k = u32::try_from(clips.len())
        .map_err(|_| ClipweaveError::overflow("Interleave: too many clips"))?;
    let mut vi = merged.info;
    vi.num_frames = if params.extend {
        vi.num_frames.checked_mul(k)
    } else {
        interleaved_length(&infos, k)
    }
    .ok_or_else(|| ClipweaveError::overflow("Interleave: resulting clip is too long"))?;

    if params.modify_duration {
        vi.fps = vi.fps.muldiv(i64::from(k), 1)?;
    }

    let op = Interleave {
        clips: clips.to_vec(),
        modify_duration: params.modify_duration,
    };
    Ok(Clip::from_operator(
        "Interleave",
        MediaInfo::Video(vi),
        Operator::Interleave(op),
    ))
}

/// `max_i((len_i - 1) * k + 1)`, counted as if every clip sat in the first slot of a round.
/// When the longest clip is at position `i > 0`, its last frame falls past the end.
fn interleaved_length(infos: &[VideoInfo], k: u32) -> Option<u32> {
    infos.iter().try_fold(0u32, |acc, vi| {
        let end = vi
            .num_frames
            .checked_sub(1)
            .map_or(Some(0), |last| last.checked_mul(k)?.checked_add(1))?;
        Some(acc.max(end))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/ops/interleave.rs"]
mod tests;

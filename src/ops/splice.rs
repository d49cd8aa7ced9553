use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::Clip;
use crate::graph::protocol::Dep;
use crate::media::info::{MediaInfo, VideoInfo};
use crate::ops::reconcile::{MismatchCause, reconcile};
use crate::ops::{Operator, identity};

/// Parameters of `Splice`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpliceParams {
    /// Tolerate clips whose formats or dimensions differ.
    pub mismatch: bool,
}

/// Concatenates video clips in order.
#[derive(Debug)]
pub struct Splice {
    clips: Vec<Clip>,
    lengths: Vec<u32>,
}

impl Splice {
    /// Upstream frame of output frame `n`. Frames past the total fall to the last clip.
    pub fn map(&self, n: u32) -> Dep {
        let mut start = 0u32;
        for (clip, &len) in self.clips.iter().zip(&self.lengths) {
            if n < start + len {
                return Dep::new(clip, n - start);
            }
            start += len;
        }
        let last = self.clips.len() - 1;
        Dep::new(&self.clips[last], n - (start - self.lengths[last]))
    }
}

/// Build a `Splice` node. A single clip is returned unchanged.
#[tracing::instrument(skip(clips), fields(clips = clips.len()))]
pub fn splice(clips: &[Clip], params: SpliceParams) -> ClipweaveResult<Clip> {
    let infos = clips
        .iter()
        .map(|c| c.expect_video("Splice"))
        .collect::<ClipweaveResult<Vec<VideoInfo>>>()?;
    let first = match clips {
        [] => return Err(ClipweaveError::degenerate("Splice: no clips given")),
        [only] => return Ok(identity("Splice", only)),
        [first, ..] => first,
    };

    let merged = reconcile(&infos, true)?;
    let any_compat = infos.iter().any(VideoInfo::is_compat);
    let layout_changed = !merged.info.same_layout(&infos[0]);
    if let Some(cause) = merged.mismatch
        && (!params.mismatch || any_compat)
        && layout_changed
    {
        let what = match cause {
            MismatchCause::Dimensions => "dimensions",
            _ => "format",
        };
        return Err(ClipweaveError::mismatch(format!(
            "Splice: clip property mismatch ({what})"
        )));
    }

    let lengths: Vec<u32> = infos.iter().map(|vi| vi.num_frames).collect();
    let total = lengths
        .iter()
        .try_fold(0u32, |acc, &len| acc.checked_add(len))
        .ok_or_else(|| {
            tracing::debug!(clip = first.name(), "splice length overflow, releasing inputs");
            ClipweaveError::overflow("Splice: the resulting clip is too long")
        })?;

    let mut vi = merged.info;
    vi.num_frames = total;
    let op = Splice {
        clips: clips.to_vec(),
        lengths,
    };
    Ok(Clip::from_operator(
        "Splice",
        MediaInfo::Video(vi),
        Operator::Splice(op),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/ops/splice.rs"]
mod tests;

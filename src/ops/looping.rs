use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::Clip;
use crate::graph::protocol::Dep;
use crate::media::info::MediaInfo;
use crate::ops::{Operator, identity};

/// Parameters of `Loop`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopParams {
    /// Repetition count. Unset, zero or negative loops for the maximum representable length.
    pub times: Option<i64>,
}

/// Repeats the clip: `n -> n mod len`.
#[derive(Debug)]
pub struct Loop {
    clip: Clip,
    num_frames_in: u32,
}

impl Loop {
    /// Upstream frame of output frame `n`.
    pub fn map(&self, n: u32) -> Dep {
        Dep::new(&self.clip, n % self.num_frames_in)
    }
}

/// Build a `Loop` node; `times == 1` returns `clip` itself.
#[tracing::instrument(skip(clip), fields(clip = clip.name()))]
pub fn loop_(clip: &Clip, params: LoopParams) -> ClipweaveResult<Clip> {
    let mut vi = clip.expect_video("Loop")?;
    let times = params.times.unwrap_or(0);
    if times == 1 {
        return Ok(identity("Loop", clip));
    }
    if vi.num_frames == 0 {
        return Err(ClipweaveError::degenerate(
            "Loop: cannot loop a clip of unknown length",
        ));
    }

    let num_frames_in = vi.num_frames;
    vi.num_frames = if times > 1 {
        u32::try_from(times)
            .ok()
            .and_then(|t| num_frames_in.checked_mul(t))
            .ok_or_else(|| ClipweaveError::overflow("Loop: resulting clip is too long"))?
    } else {
        u32::MAX
    };

    let op = Loop {
        clip: clip.clone(),
        num_frames_in,
    };
    Ok(Clip::from_operator("Loop", MediaInfo::Video(vi), Operator::Loop(op)))
}

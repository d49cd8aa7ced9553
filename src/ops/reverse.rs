use crate::foundation::error::ClipweaveResult;
use crate::graph::clip::Clip;
use crate::graph::protocol::Dep;
use crate::media::info::MediaInfo;
use crate::ops::Operator;

/// Plays the clip backwards: `n -> max(len - 1 - n, 0)`.
#[derive(Debug)]
pub struct Reverse {
    clip: Clip,
    num_frames: u32,
}

impl Reverse {
    /// Upstream frame of output frame `n`.
    pub fn map(&self, n: u32) -> Dep {
        let src = self.num_frames.saturating_sub(1).saturating_sub(n);
        Dep::new(&self.clip, src)
    }
}

/// Build a `Reverse` node.
#[tracing::instrument(skip(clip), fields(clip = clip.name()))]
pub fn reverse(clip: &Clip) -> ClipweaveResult<Clip> {
    let vi = clip.expect_video("Reverse")?;
    let op = Reverse {
        clip: clip.clone(),
        num_frames: vi.num_frames,
    };
    Ok(Clip::from_operator(
        "Reverse",
        MediaInfo::Video(vi),
        Operator::Reverse(op),
    ))
}

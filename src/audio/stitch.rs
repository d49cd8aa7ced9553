use smallvec::SmallVec;

use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::Clip;
use crate::graph::protocol::{Dep, ResolvedFrames};
use crate::media::frame::{AudioBuffer, Frame, FrameProps, FrameRef};
use crate::media::info::AudioInfo;

/// `count` samples copied from `dep` starting at sample `offset`.
#[derive(Clone, Debug)]
pub struct StitchPart {
    /// Upstream frame.
    pub dep: Dep,
    /// First copied sample within the upstream frame.
    pub offset: u32,
    /// Number of copied samples.
    pub count: u32,
}

/// Recipe for one reassembled audio frame: parts are laid back to back.
#[derive(Clone, Debug)]
pub struct StitchPlan {
    /// Output length in samples; equals the sum of the part counts.
    pub length: u32,
    /// One or two source parts.
    pub parts: SmallVec<[StitchPart; 2]>,
}

impl StitchPlan {
    /// Allocate the output frame and copy every part into it.
    ///
    /// The output takes the properties of the first part's frame.
    pub fn assemble(&self, frames: &dyn ResolvedFrames) -> ClipweaveResult<FrameRef> {
        let mut out: Option<(AudioBuffer, FrameProps)> = None;
        let mut pos = 0u32;
        for part in &self.parts {
            let src = frames.fetch(&part.dep)?;
            let buf = src.as_audio()?;
            let (dst, _) = out.get_or_insert_with(|| {
                (AudioBuffer::new_like(buf, self.length), src.props.clone())
            });
            dst.copy_samples(pos, buf, part.offset, part.count)?;
            pos += part.count;
        }

        let Some((buffer, props)) = out else {
            return Err(ClipweaveError::protocol("audio stitch without source parts"));
        };
        if pos != self.length {
            return Err(ClipweaveError::protocol(format!(
                "audio stitch filled {pos} of {} samples",
                self.length
            )));
        }
        Ok(Frame::audio(buffer, props))
    }
}

/// Plan `length` samples of `clip` starting at absolute sample `start`.
///
/// Frame sizes come from the descriptor, so the plan is complete before any upstream frame
/// exists. The span may cross at most one frame boundary.
pub(crate) fn plan_span(clip: &Clip, info: &AudioInfo, start: u64, length: u32) -> StitchPlan {
    let spf = u64::from(info.samples_per_frame());
    let n = (start / spf) as u32;
    let offset = (start % spf) as u32;
    let head = info.frame_len(n).saturating_sub(offset).min(length);

    let mut parts = SmallVec::new();
    parts.push(StitchPart {
        dep: Dep::new(clip, n),
        offset,
        count: head,
    });
    if head < length {
        parts.push(StitchPart {
            dep: Dep::new(clip, n + 1),
            offset: 0,
            count: length - head,
        });
    }
    StitchPlan { length, parts }
}

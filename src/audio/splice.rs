use smallvec::smallvec;

use crate::audio::stitch::{StitchPart, StitchPlan, plan_span};
use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::Clip;
use crate::graph::protocol::{Dep, Pending};
use crate::media::info::{AudioInfo, MediaInfo};
use crate::ops::{Operator, identity};

/// Sample-accurate concatenation of two audio clips, re-chunked at `samples_per_frame`.
///
/// When the first clip ends on a frame boundary every output frame is an upstream frame handed
/// through. Otherwise the frames from the seam on are stitched from two upstream frames:
///
/// ```text
///   clip1: |aaaa|aaaa|aa|
///   clip2:             |bbbb|bbbb|b|
///   out:   |aaaa|aaaa|aabb|bbbb|bbb|
/// ```
#[derive(Debug)]
pub struct AudioSplice2 {
    first: Clip,
    second: Clip,
    info1: AudioInfo,
    info2: AudioInfo,
    info_out: AudioInfo,
    aligned: bool,
}

impl AudioSplice2 {
    /// `true` when the first clip ends exactly on a frame boundary.
    pub fn is_aligned(&self) -> bool {
        self.aligned
    }

    /// Offset into each second-clip frame where an output frame past the seam starts reading.
    pub fn seam_offset(&self) -> u32 {
        let spf = u64::from(self.info1.samples_per_frame());
        let r = self.info1.num_samples.saturating_sub(1) % spf;
        (spf - r - 1) as u32
    }

    pub(crate) fn plan(&self, n: u32) -> Pending {
        let nf1 = self.info1.num_frames;
        if self.aligned {
            return Pending::Forward(if n < nf1 {
                Dep::new(&self.first, n)
            } else {
                Dep::new(&self.second, n - nf1)
            });
        }

        let spf = self.info1.samples_per_frame();
        let out_len = self.info_out.frame_len(n);
        if n + 1 < nf1 {
            return Pending::Forward(Dep::new(&self.first, n));
        }
        if n + 1 == nf1 {
            let head = out_len.min(self.info1.frame_len(n));
            let mut parts = smallvec![StitchPart {
                dep: Dep::new(&self.first, n),
                offset: 0,
                count: head,
            }];
            if head < out_len {
                parts.push(StitchPart {
                    dep: Dep::new(&self.second, 0),
                    offset: 0,
                    count: out_len - head,
                });
            }
            return Pending::Stitch(StitchPlan {
                length: out_len,
                parts,
            });
        }

        let j = n - nf1;
        let start = u64::from(j) * u64::from(spf) + u64::from(self.seam_offset());
        Pending::Stitch(plan_span(&self.second, &self.info2, start, out_len))
    }
}

/// Build an `AudioSplice2` node joining `first` and `second`.
#[tracing::instrument(skip(first, second), fields(first = first.name(), second = second.name()))]
pub fn audio_splice2(first: &Clip, second: &Clip) -> ClipweaveResult<Clip> {
    let info1 = first.expect_audio("AudioSplice")?;
    let info2 = second.expect_audio("AudioSplice")?;
    if !info1.same_format(&info2) {
        return Err(ClipweaveError::mismatch(
            "AudioSplice: format mismatch, all clips must have the same format and sample rate",
        ));
    }

    let total = info1
        .num_samples
        .checked_add(info2.num_samples)
        .ok_or_else(|| ClipweaveError::overflow("AudioSplice: the resulting clip is too long"))?;
    let info_out = info1.with_num_samples(total).map_err(|e| match e {
        ClipweaveError::Overflow(_) => {
            ClipweaveError::overflow("AudioSplice: the resulting clip is too long")
        }
        other => other,
    })?;

    let aligned = info1.num_samples % u64::from(info1.samples_per_frame()) == 0;
    tracing::debug!(
        aligned,
        samples1 = info1.num_samples,
        samples2 = info2.num_samples,
        "audio splice mode"
    );
    let op = AudioSplice2 {
        first: first.clone(),
        second: second.clone(),
        info1,
        info2,
        info_out,
        aligned,
    };
    Ok(Clip::from_operator(
        "AudioSplice2",
        MediaInfo::Audio(info_out),
        Operator::AudioSplice2(op),
    ))
}

/// Join any number of audio clips by folding [`audio_splice2`] from the left. A single clip is
/// returned unchanged.
#[tracing::instrument(skip(clips), fields(clips = clips.len()))]
pub fn audio_splice(clips: &[Clip]) -> ClipweaveResult<Clip> {
    let Some((head, rest)) = clips.split_first() else {
        return Err(ClipweaveError::degenerate("AudioSplice: no clips given"));
    };
    if rest.is_empty() {
        return Ok(identity("AudioSplice", head));
    }
    rest.iter()
        .try_fold(head.clone(), |acc, next| audio_splice2(&acc, next))
}

#[cfg(test)]
#[path = "../../tests/unit/audio/splice.rs"]
mod tests;

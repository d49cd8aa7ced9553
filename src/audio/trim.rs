use crate::audio::stitch::plan_span;
use crate::foundation::error::ClipweaveResult;
use crate::graph::clip::Clip;
use crate::graph::protocol::{Dep, Pending};
use crate::media::info::{AudioInfo, MediaInfo};
use crate::ops::trim::{TrimParams, trim_window};
use crate::ops::{Operator, identity};

/// Keeps samples `[first, first + length)` of an audio clip, re-chunked from the new start.
#[derive(Debug)]
pub struct AudioTrim {
    clip: Clip,
    info_in: AudioInfo,
    info_out: AudioInfo,
    first: u64,
}

impl AudioTrim {
    /// `true` when the new start falls on an upstream frame boundary.
    pub fn is_aligned(&self) -> bool {
        self.first % u64::from(self.info_in.samples_per_frame()) == 0
    }

    pub(crate) fn plan(&self, n: u32) -> Pending {
        let spf = self.info_in.samples_per_frame();
        let out_len = self.info_out.frame_len(n);
        let start = self.first + u64::from(n) * u64::from(spf);

        if self.is_aligned() && n + 1 < self.info_out.num_frames {
            let src = (start / u64::from(spf)) as u32;
            if self.info_in.frame_len(src) == out_len {
                return Pending::Forward(Dep::new(&self.clip, src));
            }
        }
        Pending::Stitch(plan_span(&self.clip, &self.info_in, start, out_len))
    }
}

/// Build an `AudioTrim` node counted in samples. Parameters follow [`crate::trim`].
#[tracing::instrument(skip(clip), fields(clip = clip.name()))]
pub fn audio_trim(clip: &Clip, params: TrimParams) -> ClipweaveResult<Clip> {
    let info_in = clip.expect_audio("AudioTrim")?;
    let Some(window) = trim_window("AudioTrim", "sample", &params, info_in.num_samples)? else {
        return Ok(identity("AudioTrim", clip));
    };

    let info_out = info_in.with_num_samples(window.length)?;
    let op = AudioTrim {
        clip: clip.clone(),
        info_in,
        info_out,
        first: window.first,
    };
    tracing::debug!(aligned = op.is_aligned(), first = window.first, "audio trim");
    Ok(Clip::from_operator(
        "AudioTrim",
        MediaInfo::Audio(info_out),
        Operator::AudioTrim(op),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/audio/trim.rs"]
mod tests;

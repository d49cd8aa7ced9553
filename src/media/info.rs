use crate::foundation::core::Fps;
use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::media::format::{AudioFormat, ColorFamily, VideoFormat};

/// Immutable description of a video clip.
///
/// `format == None` and `width == height == 0` describe variable content; `num_frames == 0`
/// means the length is unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoInfo {
    /// Pixel format, or `None` when it varies from frame to frame.
    pub format: Option<VideoFormat>,
    /// Width in pixels (0 = variable).
    pub width: u32,
    /// Height in pixels (0 = variable).
    pub height: u32,
    /// Frame rate.
    pub fps: Fps,
    /// Frame count (0 = unknown).
    pub num_frames: u32,
}

impl VideoInfo {
    /// Constant-format clip description.
    pub fn new(format: VideoFormat, width: u32, height: u32, fps: Fps, num_frames: u32) -> Self {
        Self {
            format: Some(format),
            width,
            height,
            fps,
            num_frames,
        }
    }

    /// Same storage layout: format and dimensions agree.
    pub fn same_layout(&self, other: &Self) -> bool {
        self.format == other.format && self.width == other.width && self.height == other.height
    }

    /// `true` when frames use a legacy packed layout.
    pub fn is_compat(&self) -> bool {
        self.format
            .is_some_and(|f| f.color_family == ColorFamily::Compat)
    }
}

/// Immutable description of an audio clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AudioInfo {
    /// Sample format and chunk size.
    pub format: AudioFormat,
    /// Samples per second.
    pub sample_rate: u32,
    /// Total samples per channel.
    pub num_samples: u64,
    /// `ceil(num_samples / samples_per_frame)`.
    pub num_frames: u32,
}

impl AudioInfo {
    /// Describe a clip of `num_samples` samples; the frame count is derived.
    pub fn new(format: AudioFormat, sample_rate: u32, num_samples: u64) -> ClipweaveResult<Self> {
        if format.samples_per_frame == 0 {
            return Err(ClipweaveError::conflict(
                "audio samples_per_frame must be > 0",
            ));
        }
        if format.num_channels == 0 {
            return Err(ClipweaveError::conflict("audio clip needs at least one channel"));
        }
        let num_frames = frames_for(num_samples, format.samples_per_frame)?;
        Ok(Self {
            format,
            sample_rate,
            num_samples,
            num_frames,
        })
    }

    /// Same format and rate with a new sample count.
    pub fn with_num_samples(self, num_samples: u64) -> ClipweaveResult<Self> {
        Self::new(self.format, self.sample_rate, num_samples)
    }

    /// Chunk capacity shorthand.
    pub fn samples_per_frame(&self) -> u32 {
        self.format.samples_per_frame
    }

    /// Actual sample length of frame `n`.
    pub fn frame_len(&self, n: u32) -> u32 {
        let spf = u64::from(self.format.samples_per_frame);
        let start = u64::from(n) * spf;
        self.num_samples.saturating_sub(start).min(spf) as u32
    }

    /// Same sample format and sample rate.
    pub fn same_format(&self, other: &Self) -> bool {
        self.format == other.format && self.sample_rate == other.sample_rate
    }
}

fn frames_for(num_samples: u64, samples_per_frame: u32) -> ClipweaveResult<u32> {
    let frames = num_samples.div_ceil(u64::from(samples_per_frame));
    u32::try_from(frames).map_err(|_| {
        ClipweaveError::overflow(format!(
            "{num_samples} samples need more than {} frames",
            u32::MAX
        ))
    })
}

/// Descriptor of any clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MediaInfo {
    /// Video clip.
    Video(VideoInfo),
    /// Audio clip.
    Audio(AudioInfo),
}

impl MediaInfo {
    /// Frame count (0 = unknown).
    pub fn num_frames(&self) -> u32 {
        match self {
            Self::Video(vi) => vi.num_frames,
            Self::Audio(ai) => ai.num_frames,
        }
    }

    /// Video descriptor, if this is a video clip.
    pub fn video(&self) -> Option<&VideoInfo> {
        match self {
            Self::Video(vi) => Some(vi),
            Self::Audio(_) => None,
        }
    }

    /// Audio descriptor, if this is an audio clip.
    pub fn audio(&self) -> Option<&AudioInfo> {
        match self {
            Self::Audio(ai) => Some(ai),
            Self::Video(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/info.rs"]
mod tests;

use std::sync::Arc;

use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::{Clip, FrameSource};
use crate::media::format::AudioFormat;
use crate::media::frame::{AudioBuffer, Frame, FrameProps, FrameRef, PropValue};
use crate::media::info::{AudioInfo, MediaInfo};
use crate::source::synthetic::SOURCE_FRAME;

/// In-memory PCM clip chunked into fixed-capacity frames.
#[derive(Clone, Debug)]
pub struct PcmAudio {
    info: AudioInfo,
    channels: Vec<Arc<[u8]>>,
}

impl PcmAudio {
    /// Wrap raw per-channel sample bytes. All channels must hold the same whole number of samples.
    pub fn new(
        format: AudioFormat,
        sample_rate: u32,
        channels: Vec<Vec<u8>>,
    ) -> ClipweaveResult<Self> {
        if channels.len() != usize::from(format.num_channels) {
            return Err(ClipweaveError::conflict(format!(
                "PcmAudio: format has {} channels, got {} buffers",
                format.num_channels,
                channels.len()
            )));
        }
        let bps = usize::from(format.bytes_per_sample.max(1));
        let bytes = channels.first().map_or(0, Vec::len);
        if channels.iter().any(|c| c.len() != bytes) || bytes % bps != 0 {
            return Err(ClipweaveError::conflict(
                "PcmAudio: channel buffers must hold the same whole number of samples",
            ));
        }

        let info = AudioInfo::new(format, sample_rate, (bytes / bps) as u64)?;
        Ok(Self {
            info,
            channels: channels.into_iter().map(Arc::<[u8]>::from).collect(),
        })
    }

    /// Build a 16-bit clip from one sample vector per channel.
    pub fn from_i16(
        samples_per_frame: u32,
        sample_rate: u32,
        channels: &[Vec<i16>],
    ) -> ClipweaveResult<Self> {
        let num_channels = u16::try_from(channels.len())
            .map_err(|_| ClipweaveError::conflict("PcmAudio: too many channels"))?;
        let format = AudioFormat {
            num_channels,
            channel_layout: (1u64 << num_channels.min(63)) - 1,
            ..AudioFormat::stereo_i16().with_samples_per_frame(samples_per_frame)
        };
        let bytes: Vec<Vec<u8>> = channels
            .iter()
            .map(|c| c.iter().flat_map(|s| s.to_le_bytes()).collect::<Vec<u8>>())
            .collect();
        Self::new(format, sample_rate, bytes)
    }

    /// Descriptor of the clip.
    pub fn audio_info(&self) -> AudioInfo {
        self.info
    }

    /// Wrap as a clip.
    pub fn clip(self, name: impl Into<String>) -> Clip {
        Clip::from_source(name, self)
    }
}

impl FrameSource for PcmAudio {
    fn info(&self) -> MediaInfo {
        MediaInfo::Audio(self.info)
    }

    fn frame(&self, n: u32) -> ClipweaveResult<FrameRef> {
        if n >= self.info.num_frames {
            return Err(ClipweaveError::out_of_range(format!(
                "PcmAudio: frame {n} beyond {} frames",
                self.info.num_frames
            )));
        }
        let length = self.info.frame_len(n);
        let mut buf = AudioBuffer::new(self.info.format, self.info.sample_rate, length);
        let start = self
            .info
            .format
            .bytes_for(n as usize * self.info.samples_per_frame() as usize);
        let count = self.info.format.bytes_for(length as usize);
        for (dst, src) in buf.channels.iter_mut().zip(&self.channels) {
            dst.copy_from_slice(&src[start..start + count]);
        }

        let mut props = FrameProps::new();
        props.set(SOURCE_FRAME, PropValue::Int(i64::from(n)));
        Ok(Frame::audio(buf, props))
    }
}

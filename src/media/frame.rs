use std::collections::BTreeMap;
use std::sync::Arc;

use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::foundation::rational;
use crate::media::format::{AudioFormat, VideoFormat};

/// Property key holding the numerator of a frame's duration in seconds.
pub const DURATION_NUM: &str = "_DurationNum";
/// Property key holding the denominator of a frame's duration in seconds.
pub const DURATION_DEN: &str = "_DurationDen";

/// Shared, reference-counted frame handle.
///
/// Pass-through operators hand the upstream handle on unchanged, so [`Arc::ptr_eq`] tells whether
/// an output frame is literally the upstream frame.
pub type FrameRef = Arc<Frame>;

/// One value in a frame's property map.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PropValue {
    /// Integer property.
    Int(i64),
    /// Float property.
    Float(f64),
    /// Opaque string/bytes property.
    Data(String),
}

/// Per-frame metadata tags.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameProps(BTreeMap<String, PropValue>);

impl FrameProps {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a property.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// Read an integer property.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(PropValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Read a data property.
    pub fn get_data(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(PropValue::Data(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Insert or replace a property.
    pub fn set(&mut self, key: impl Into<String>, value: PropValue) {
        self.0.insert(key.into(), value);
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no properties are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Multiply the duration tags by `mul/div`, when both tags are present as integers.
    pub fn rescale_duration(&mut self, mul: i64, div: i64) -> ClipweaveResult<()> {
        let (Some(num), Some(den)) = (self.get_int(DURATION_NUM), self.get_int(DURATION_DEN))
        else {
            return Ok(());
        };
        let (num, den) = rational::muldiv(num, den, mul, div)?;
        self.set(DURATION_NUM, PropValue::Int(num));
        self.set(DURATION_DEN, PropValue::Int(den));
        Ok(())
    }
}

/// Plane data of a video frame. Planes are shared so copying a frame is shallow.
#[derive(Clone, Debug)]
pub struct VideoPlanes {
    /// Pixel format.
    pub format: VideoFormat,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed plane buffers.
    pub planes: Vec<Arc<[u8]>>,
}

impl VideoPlanes {
    /// Allocate zeroed planes for a `width`x`height` frame.
    pub fn blank(format: VideoFormat, width: u32, height: u32) -> Self {
        let planes = (0..usize::from(format.num_planes))
            .map(|p| {
                let (row, rows) = format.plane_dims(p, width, height);
                Arc::<[u8]>::from(vec![0u8; row * rows])
            })
            .collect();
        Self {
            format,
            width,
            height,
            planes,
        }
    }
}

/// Per-channel sample buffer of an audio frame.
#[derive(Clone, Debug)]
pub struct AudioBuffer {
    /// Sample format.
    pub format: AudioFormat,
    /// Samples per second.
    pub sample_rate: u32,
    /// Valid samples per channel (at most `format.samples_per_frame`).
    pub length: u32,
    /// One buffer of `length * bytes_per_sample` bytes per channel.
    pub channels: Vec<Vec<u8>>,
}

impl AudioBuffer {
    /// Allocate a zeroed buffer of `length` samples per channel.
    pub fn new(format: AudioFormat, sample_rate: u32, length: u32) -> Self {
        let bytes = format.bytes_for(length as usize);
        Self {
            format,
            sample_rate,
            length,
            channels: vec![vec![0u8; bytes]; usize::from(format.num_channels)],
        }
    }

    /// Zeroed buffer of `length` samples in the format and rate of `template`.
    pub fn new_like(template: &Self, length: u32) -> Self {
        Self::new(template.format, template.sample_rate, length)
    }

    /// Protocol error unless there is one channel per format channel and each holds exactly
    /// `length` samples.
    pub fn check_shape(&self) -> ClipweaveResult<()> {
        let channels = usize::from(self.format.num_channels);
        if self.channels.len() != channels {
            return Err(ClipweaveError::protocol(format!(
                "audio buffer has {} channels, format has {channels}",
                self.channels.len()
            )));
        }
        let bytes = self.format.bytes_for(self.length as usize);
        if let Some(ch) = self.channels.iter().position(|c| c.len() != bytes) {
            return Err(ClipweaveError::protocol(format!(
                "audio channel {ch} holds {} bytes, expected {bytes} for {} samples",
                self.channels[ch].len(),
                self.length
            )));
        }
        Ok(())
    }

    /// Bytes of `channel`.
    pub fn channel(&self, channel: usize) -> &[u8] {
        &self.channels[channel]
    }

    /// Decode `channel` as little-endian 16-bit samples.
    pub fn samples_i16(&self, channel: usize) -> Vec<i16> {
        self.channels[channel]
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect()
    }

    /// Copy `count` samples starting at `src_offset` from every channel of `src` into this
    /// buffer at `dst_offset`.
    pub fn copy_samples(
        &mut self,
        dst_offset: u32,
        src: &Self,
        src_offset: u32,
        count: u32,
    ) -> ClipweaveResult<()> {
        if src.format != self.format {
            return Err(ClipweaveError::protocol(
                "audio copy between frames of different formats",
            ));
        }
        if src_offset.checked_add(count).is_none_or(|end| end > src.length)
            || dst_offset.checked_add(count).is_none_or(|end| end > self.length)
        {
            return Err(ClipweaveError::protocol(format!(
                "audio copy of {count} samples ({src_offset} -> {dst_offset}) \
                 exceeds frame bounds ({} -> {})",
                src.length, self.length
            )));
        }
        src.check_shape()?;
        self.check_shape()?;

        let bps = usize::from(self.format.bytes_per_sample);
        let (s, d, c) = (
            src_offset as usize * bps,
            dst_offset as usize * bps,
            count as usize * bps,
        );
        for (dst, src) in self.channels.iter_mut().zip(&src.channels) {
            dst[d..d + c].copy_from_slice(&src[s..s + c]);
        }
        Ok(())
    }
}

/// Frame payload.
#[derive(Clone, Debug)]
pub enum FrameBody {
    /// Video planes.
    Video(VideoPlanes),
    /// Audio samples.
    Audio(AudioBuffer),
}

/// One unit of media data plus its properties.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Metadata tags.
    pub props: FrameProps,
    /// Payload.
    pub body: FrameBody,
}

impl Frame {
    /// Wrap a video payload.
    pub fn video(planes: VideoPlanes, props: FrameProps) -> FrameRef {
        Arc::new(Self {
            props,
            body: FrameBody::Video(planes),
        })
    }

    /// Wrap an audio payload.
    pub fn audio(buffer: AudioBuffer, props: FrameProps) -> FrameRef {
        Arc::new(Self {
            props,
            body: FrameBody::Audio(buffer),
        })
    }

    /// Audio payload, or a protocol error for a video frame.
    pub fn as_audio(&self) -> ClipweaveResult<&AudioBuffer> {
        match &self.body {
            FrameBody::Audio(buf) => Ok(buf),
            FrameBody::Video(_) => Err(ClipweaveError::protocol(
                "expected an audio frame, got video",
            )),
        }
    }

    /// Video payload, if any.
    pub fn as_video(&self) -> Option<&VideoPlanes> {
        match &self.body {
            FrameBody::Video(planes) => Some(planes),
            FrameBody::Audio(_) => None,
        }
    }

    /// Sample length of an audio frame; `0` for video.
    pub fn audio_len(&self) -> u32 {
        match &self.body {
            FrameBody::Audio(buf) => buf.length,
            FrameBody::Video(_) => 0,
        }
    }

    /// Copy of this frame whose duration tags are multiplied by `mul/div`.
    pub fn with_rescaled_duration(&self, mul: i64, div: i64) -> ClipweaveResult<FrameRef> {
        let mut out = self.clone();
        out.props.rescale_duration(mul, div)?;
        Ok(Arc::new(out))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/frame.rs"]
mod tests;

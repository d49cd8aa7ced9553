use std::sync::Arc;

use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::foundation::rational;
use crate::graph::clip::{Clip, FrameSource};
use crate::media::frame::{
    DURATION_DEN, DURATION_NUM, Frame, FrameProps, FrameRef, PropValue, VideoPlanes,
};
use crate::media::info::{MediaInfo, VideoInfo};

/// Property naming the source that produced a frame.
pub const SOURCE_LABEL: &str = "_SourceLabel";
/// Property holding the index of a frame within its source.
pub const SOURCE_FRAME: &str = "_SourceFrame";

/// Generator of blank video frames stamped with their origin.
///
/// Every frame carries [`SOURCE_LABEL`], [`SOURCE_FRAME`] and, for constant-rate clips, duration
/// tags of one frame period. The first byte of plane 0 holds the low byte of the frame index.
#[derive(Clone, Debug)]
pub struct SyntheticVideo {
    label: String,
    info: VideoInfo,
}

impl SyntheticVideo {
    /// Generator for `info`, which must describe a constant format and size.
    pub fn new(label: impl Into<String>, info: VideoInfo) -> ClipweaveResult<Self> {
        if info.format.is_none() || info.width == 0 || info.height == 0 {
            return Err(ClipweaveError::conflict(
                "SyntheticVideo needs a constant format and non-zero dimensions",
            ));
        }
        Ok(Self {
            label: label.into(),
            info,
        })
    }

    /// Build the generator and wrap it as a clip named after its label.
    pub fn clip(label: impl Into<String>, info: VideoInfo) -> ClipweaveResult<Clip> {
        let label = label.into();
        let source = Self::new(label.clone(), info)?;
        Ok(Clip::from_source(label, source))
    }
}

impl FrameSource for SyntheticVideo {
    fn info(&self) -> MediaInfo {
        MediaInfo::Video(self.info)
    }

    fn frame(&self, n: u32) -> ClipweaveResult<FrameRef> {
        let Some(format) = self.info.format else {
            return Err(ClipweaveError::source_failed("SyntheticVideo lost its format"));
        };
        let mut planes = VideoPlanes::blank(format, self.info.width, self.info.height);
        if let Some(plane) = planes.planes.first_mut() {
            let mut data = plane.to_vec();
            if let Some(b) = data.first_mut() {
                *b = n as u8;
            }
            *plane = Arc::from(data);
        }

        let mut props = FrameProps::new();
        props.set(SOURCE_LABEL, PropValue::Data(self.label.clone()));
        props.set(SOURCE_FRAME, PropValue::Int(i64::from(n)));
        if !self.info.fps.is_variable() {
            let (num, den) = rational::reduce(self.info.fps.den, self.info.fps.num);
            props.set(DURATION_NUM, PropValue::Int(num));
            props.set(DURATION_DEN, PropValue::Int(den));
        }
        Ok(Frame::video(planes, props))
    }
}

//! Clipweave is a library of stream-reordering operators for lazy, pull-based audio/video graphs.
//!
//! Operators consume one or more upstream [`Clip`]s and expose a new clip whose frames are
//! produced on demand by remapping each requested index onto upstream frames:
//!
//! - Build a graph from leaf clips ([`SyntheticVideo`], [`PcmAudio`], or any [`FrameSource`])
//!   with the operator constructors ([`trim`], [`splice`], [`audio_splice`], ...)
//! - Drive production through the two-phase protocol ([`Operator::begin`] /
//!   [`Operator::finish`]), or let the reference [`Scheduler`] do it
//! - Construct operators by name from JSON parameters through [`registry`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod audio;
mod foundation;
mod graph;
mod media;
mod ops;
mod source;

/// Name-based operator construction.
pub mod registry;

pub use crate::foundation::core::Fps;
pub use crate::foundation::error::{ClipweaveError, ClipweaveResult};
pub use crate::foundation::rational::{muldiv as muldiv_rational, reduce as reduce_rational};

pub use crate::media::format::{AudioFormat, ColorFamily, SampleType, VideoFormat};
pub use crate::media::frame::{
    AudioBuffer, DURATION_DEN, DURATION_NUM, Frame, FrameBody, FrameProps, FrameRef, PropValue,
    VideoPlanes,
};
pub use crate::media::info::{AudioInfo, MediaInfo, VideoInfo};

pub use crate::graph::clip::{Clip, FrameSource};
pub use crate::graph::protocol::{Dep, FrameRequests, Pending, ResolvedFrames, ResolvedSet};
pub use crate::graph::scheduler::{Scheduler, SchedulerOpts};

pub use crate::audio::splice::{AudioSplice2, audio_splice, audio_splice2};
pub use crate::audio::stitch::{StitchPart, StitchPlan};
pub use crate::audio::trim::{AudioTrim, audio_trim};
pub use crate::ops::edit::{
    FramesParams, FreezeParams, delete_frames, duplicate_frames, freeze_frames,
};
pub use crate::ops::interleave::{InterleaveParams, interleave};
pub use crate::ops::looping::{LoopParams, loop_};
pub use crate::ops::reconcile::{MismatchCause, Reconciled, reconcile};
pub use crate::ops::reverse::reverse;
pub use crate::ops::select_every::{SelectEveryParams, select_every};
pub use crate::ops::splice::{SpliceParams, splice};
pub use crate::ops::trim::{TrimParams, trim};
pub use crate::ops::{
    DeleteFrames, DuplicateFrames, FreezeFrames, Interleave, Loop, Operator, Reverse, SelectEvery,
    Splice, Trim,
};

pub use crate::source::pcm::PcmAudio;
pub use crate::source::synthetic::{SOURCE_FRAME, SOURCE_LABEL, SyntheticVideo};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;

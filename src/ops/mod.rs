//! Stream-reordering operators.
//!
//! Every operator is a pure index mapping from an output frame to one or more upstream frames,
//! fixed at construction. Constructors validate parameters against the upstream descriptors and
//! either fail, return the upstream clip unchanged (identity), or build a new [`Clip`].

pub(crate) mod edit;
pub(crate) mod interleave;
pub(crate) mod looping;
pub(crate) mod reconcile;
pub(crate) mod reverse;
pub(crate) mod select_every;
pub(crate) mod splice;
pub(crate) mod trim;

use crate::audio::splice::AudioSplice2;
use crate::audio::trim::AudioTrim;
use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::Clip;
use crate::graph::protocol::Pending;

pub use edit::{DeleteFrames, DuplicateFrames, FreezeFrames};
pub use interleave::Interleave;
pub use looping::Loop;
pub use reverse::Reverse;
pub use select_every::SelectEvery;
pub use splice::Splice;
pub use trim::Trim;

/// Closed set of operators, dispatched through one two-phase interface.
#[derive(Debug)]
pub enum Operator {
    /// Frame-range trim.
    Trim(Trim),
    /// Sample-range trim.
    AudioTrim(AudioTrim),
    /// Reverse order.
    Reverse(Reverse),
    /// Repeat the clip.
    Loop(Loop),
    /// Alternate frames of several clips.
    Interleave(Interleave),
    /// Keep chosen offsets of every cycle.
    SelectEvery(SelectEvery),
    /// Concatenate video clips.
    Splice(Splice),
    /// Concatenate two audio clips sample-accurately.
    AudioSplice2(AudioSplice2),
    /// Repeat selected frames.
    DuplicateFrames(DuplicateFrames),
    /// Drop selected frames.
    DeleteFrames(DeleteFrames),
    /// Replace ranges by a single frame.
    FreezeFrames(FreezeFrames),
}

impl Operator {
    /// Registered operator name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Trim(_) => "Trim",
            Self::AudioTrim(_) => "AudioTrim",
            Self::Reverse(_) => "Reverse",
            Self::Loop(_) => "Loop",
            Self::Interleave(_) => "Interleave",
            Self::SelectEvery(_) => "SelectEvery",
            Self::Splice(_) => "Splice",
            Self::AudioSplice2(_) => "AudioSplice2",
            Self::DuplicateFrames(_) => "DuplicateFrames",
            Self::DeleteFrames(_) => "DeleteFrames",
            Self::FreezeFrames(_) => "FreezeFrames",
        }
    }

    /// Pure mapping of output frame `n` onto its production context.
    pub fn plan(&self, n: u32) -> Pending {
        match self {
            Self::Trim(op) => Pending::Forward(op.map(n)),
            Self::AudioTrim(op) => op.plan(n),
            Self::Reverse(op) => Pending::Forward(op.map(n)),
            Self::Loop(op) => Pending::Forward(op.map(n)),
            Self::Interleave(op) => op.plan(n),
            Self::SelectEvery(op) => op.plan(n),
            Self::Splice(op) => Pending::Forward(op.map(n)),
            Self::AudioSplice2(op) => op.plan(n),
            Self::DuplicateFrames(op) => Pending::Forward(op.map(n)),
            Self::DeleteFrames(op) => Pending::Forward(op.map(n)),
            Self::FreezeFrames(op) => Pending::Forward(op.map(n)),
        }
    }
}

/// Convert and range-check a list of frame numbers against a clip of `len` frames
/// (`len == 0` skips the upper bound).
pub(crate) fn frame_list(op: &str, frames: &[i64], len: u32) -> ClipweaveResult<Vec<u32>> {
    frames
        .iter()
        .map(|&f| {
            let f = u32::try_from(f).ok().filter(|&f| len == 0 || f < len);
            f.ok_or_else(|| {
                ClipweaveError::out_of_range(format!("{op}: out of bounds frame number"))
            })
        })
        .collect()
}

pub(crate) fn identity(op: &str, clip: &Clip) -> Clip {
    tracing::debug!(op, clip = clip.name(), "identity parameters, passing input through");
    clip.clone()
}

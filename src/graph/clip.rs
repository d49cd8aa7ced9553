use std::fmt;
use std::sync::Arc;

use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::media::frame::FrameRef;
use crate::media::info::{AudioInfo, MediaInfo, VideoInfo};
use crate::ops::Operator;

/// A leaf clip that produces frames directly (decoder, generator, in-memory buffer).
///
/// Implementations must be callable from many threads at once.
pub trait FrameSource: Send + Sync + fmt::Debug {
    /// Descriptor of the produced clip.
    fn info(&self) -> MediaInfo;

    /// Produce frame `n`. `n` is below `info().num_frames()` whenever the length is known.
    fn frame(&self, n: u32) -> ClipweaveResult<FrameRef>;
}

pub(crate) enum NodeBody {
    Source(Arc<dyn FrameSource>),
    Filter(Operator),
}

struct ClipNode {
    name: String,
    info: MediaInfo,
    body: NodeBody,
}

/// Cheap, shareable handle to a node of the processing graph.
///
/// Cloning a `Clip` shares the node. Constructors that turn out to be the identity return a
/// clone of their input, which [`Clip::ptr_eq`] detects.
#[derive(Clone)]
pub struct Clip(Arc<ClipNode>);

impl Clip {
    /// Wrap a frame source as a leaf clip.
    pub fn from_source(name: impl Into<String>, source: impl FrameSource + 'static) -> Self {
        let info = source.info();
        Self(Arc::new(ClipNode {
            name: name.into(),
            info,
            body: NodeBody::Source(Arc::new(source)),
        }))
    }

    pub(crate) fn from_operator(name: &str, info: MediaInfo, op: Operator) -> Self {
        Self(Arc::new(ClipNode {
            name: name.to_owned(),
            info,
            body: NodeBody::Filter(op),
        }))
    }

    /// Node name (operator name for filter nodes).
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Merged descriptor of this clip.
    pub fn info(&self) -> &MediaInfo {
        &self.0.info
    }

    /// Frame count (0 = unknown).
    pub fn num_frames(&self) -> u32 {
        self.0.info.num_frames()
    }

    /// Operator behind this node, if it is a filter.
    pub fn operator(&self) -> Option<&Operator> {
        match &self.0.body {
            NodeBody::Filter(op) => Some(op),
            NodeBody::Source(_) => None,
        }
    }

    /// `true` when both handles name the same node.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Number of live handles to this node, including graph edges from downstream nodes.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    pub(crate) fn body(&self) -> &NodeBody {
        &self.0.body
    }

    pub(crate) fn expect_video(&self, op: &str) -> ClipweaveResult<VideoInfo> {
        self.0.info.video().copied().ok_or_else(|| {
            ClipweaveError::mismatch(format!("{op}: expected a video clip, got '{}'", self.name()))
        })
    }

    pub(crate) fn expect_audio(&self, op: &str) -> ClipweaveResult<AudioInfo> {
        self.0.info.audio().copied().ok_or_else(|| {
            ClipweaveError::mismatch(format!("{op}: expected an audio clip, got '{}'", self.name()))
        })
    }
}

impl fmt::Debug for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clip")
            .field("name", &self.0.name)
            .field("num_frames", &self.num_frames())
            .finish_non_exhaustive()
    }
}

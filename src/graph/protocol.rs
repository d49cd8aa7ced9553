//! The two-phase production contract.
//!
//! Producing output frame `n` of an operator happens in exactly two calls:
//!
//! 1. **Requesting**: [`Operator::begin`] maps `n` onto upstream dependencies, declares each one
//!    through [`FrameRequests`], and returns a [`Pending`] context describing how to combine them.
//! 2. **Combining**: once every declared dependency is resolved, the host calls
//!    [`Operator::finish`] with that context and a [`ResolvedFrames`] view.
//!
//! The context is owned by one frame's production only. Operators never block on upstream frames
//! and never mutate their own state, so any number of productions may run concurrently.

use smallvec::SmallVec;

use crate::audio::stitch::StitchPlan;
use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::Clip;
use crate::media::frame::FrameRef;
use crate::ops::Operator;

/// One upstream dependency: frame `n` of `clip`.
#[derive(Clone, Debug)]
pub struct Dep {
    /// Upstream clip.
    pub clip: Clip,
    /// Frame index within `clip`.
    pub n: u32,
}

impl Dep {
    /// Dependency on frame `n` of `clip`.
    pub fn new(clip: &Clip, n: u32) -> Self {
        Self {
            clip: clip.clone(),
            n,
        }
    }

    /// `true` when both name the same frame of the same clip.
    pub fn same_frame(&self, other: &Self) -> bool {
        self.n == other.n && Clip::ptr_eq(&self.clip, &other.clip)
    }
}

/// Production context carried from phase 1 to phase 2 of one output frame.
#[derive(Clone, Debug)]
pub enum Pending {
    /// Hand the upstream frame through unchanged.
    Forward(Dep),
    /// Copy the upstream frame and multiply its duration tags by `mul/div`.
    Retime {
        /// Upstream frame.
        dep: Dep,
        /// Duration multiplier.
        mul: i64,
        /// Duration divisor.
        div: i64,
    },
    /// Assemble a new audio frame from parts of one or two upstream frames.
    Stitch(StitchPlan),
}

impl Pending {
    /// Upstream frames this production needs, in request order.
    pub fn deps(&self) -> SmallVec<[&Dep; 2]> {
        match self {
            Self::Forward(dep) | Self::Retime { dep, .. } => smallvec::smallvec![dep],
            Self::Stitch(plan) => plan.parts.iter().map(|p| &p.dep).collect(),
        }
    }
}

/// Host seam for phase 1: declare an asynchronous upstream dependency.
pub trait FrameRequests {
    /// Request `dep`; it must be resolved before phase 2 runs.
    fn request(&mut self, dep: &Dep);
}

impl FrameRequests for Vec<Dep> {
    fn request(&mut self, dep: &Dep) {
        if !self.iter().any(|d| d.same_frame(dep)) {
            self.push(dep.clone());
        }
    }
}

impl FrameRequests for SmallVec<[Dep; 2]> {
    fn request(&mut self, dep: &Dep) {
        if !self.iter().any(|d| d.same_frame(dep)) {
            self.push(dep.clone());
        }
    }
}

/// Host seam for phase 2: read a dependency that was requested and has resolved.
pub trait ResolvedFrames {
    /// Fetch `dep`. Fetching a frame that was never requested is a protocol error.
    fn fetch(&self, dep: &Dep) -> ClipweaveResult<FrameRef>;
}

/// Resolved dependencies of one production, as handed to phase 2.
#[derive(Clone, Debug, Default)]
pub struct ResolvedSet {
    frames: SmallVec<[(Dep, FrameRef); 2]>,
}

impl ResolvedSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the resolved frame for `dep`.
    pub fn insert(&mut self, dep: Dep, frame: FrameRef) {
        self.frames.push((dep, frame));
    }

    /// Number of resolved frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when nothing has been resolved.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FromIterator<(Dep, FrameRef)> for ResolvedSet {
    fn from_iter<I: IntoIterator<Item = (Dep, FrameRef)>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

impl ResolvedFrames for ResolvedSet {
    fn fetch(&self, dep: &Dep) -> ClipweaveResult<FrameRef> {
        self.frames
            .iter()
            .find(|(d, _)| d.same_frame(dep))
            .map(|(_, f)| f.clone())
            .ok_or_else(|| {
                ClipweaveError::protocol(format!(
                    "frame {} of '{}' was fetched without being requested",
                    dep.n,
                    dep.clip.name()
                ))
            })
    }
}

impl Operator {
    /// Phase 1: map output frame `n`, request its dependencies, return the production context.
    pub fn begin(&self, n: u32, requests: &mut dyn FrameRequests) -> Pending {
        let pending = self.plan(n);
        for dep in pending.deps() {
            requests.request(dep);
        }
        pending
    }

    /// Phase 2: combine the resolved dependencies of `pending` into the output frame.
    ///
    /// `Forward` hands the upstream reference on unchanged.
    pub fn finish(
        &self,
        pending: Pending,
        frames: &dyn ResolvedFrames,
    ) -> ClipweaveResult<FrameRef> {
        match pending {
            Pending::Forward(dep) => frames.fetch(&dep),
            Pending::Retime { dep, mul, div } => {
                frames.fetch(&dep)?.with_rescaled_duration(mul, div)
            }
            Pending::Stitch(plan) => plan.assemble(frames),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/protocol.rs"]
mod tests;

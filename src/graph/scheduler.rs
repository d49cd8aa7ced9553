use std::ops::Range;

use rayon::prelude::*;
use smallvec::SmallVec;

use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::{Clip, NodeBody};
use crate::graph::protocol::{Dep, ResolvedSet};
use crate::media::frame::FrameRef;
use crate::media::info::MediaInfo;

/// Options controlling how the [`Scheduler`] drives frame production.
#[derive(Clone, Debug)]
pub struct SchedulerOpts {
    /// Resolve dependencies and frame ranges on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Batch size used by [`Scheduler::get_frames`].
    pub chunk_size: usize,
}

impl Default for SchedulerOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_size: 64,
        }
    }
}

/// Reference host for the two-phase protocol.
///
/// For each requested frame it runs phase 1, resolves every declared dependency (recursively,
/// concurrently when `parallel` is set), then runs phase 2. The first failing dependency aborts
/// the frame and its error is returned unchanged. Requests made directly through
/// [`Scheduler::get_frame`] must lie inside the clip; dependencies past the end of a
/// known-length upstream clip are clamped to its last frame.
pub struct Scheduler {
    opts: SchedulerOpts,
    pool: Option<rayon::ThreadPool>,
}

impl Scheduler {
    /// Build a scheduler; a thread pool is created only when `opts.parallel` is set.
    pub fn new(opts: SchedulerOpts) -> ClipweaveResult<Self> {
        let pool = if opts.parallel {
            Some(build_thread_pool(opts.threads)?)
        } else {
            None
        };
        Ok(Self { opts, pool })
    }

    /// Options this scheduler was built with.
    pub fn opts(&self) -> &SchedulerOpts {
        &self.opts
    }

    /// Produce frame `n` of `clip`.
    #[tracing::instrument(level = "trace", skip(self, clip), fields(clip = clip.name()))]
    pub fn get_frame(&self, clip: &Clip, n: u32) -> ClipweaveResult<FrameRef> {
        match &self.pool {
            Some(pool) => pool.install(|| self.produce(clip, n)),
            None => self.produce(clip, n),
        }
    }

    /// Produce frames `range` of `clip`, returned in index order.
    #[tracing::instrument(skip(self, clip), fields(clip = clip.name()))]
    pub fn get_frames(&self, clip: &Clip, range: Range<u32>) -> ClipweaveResult<Vec<FrameRef>> {
        if range.is_empty() {
            return Err(ClipweaveError::out_of_range("frame range must be non-empty"));
        }
        let Some(pool) = &self.pool else {
            return range.map(|n| self.produce(clip, n)).collect();
        };

        let chunk = normalized_chunk_size(self.opts.chunk_size);
        let mut out = Vec::with_capacity(range.len().min(4096));
        let mut start = range.start;
        while start < range.end {
            let end = start.saturating_add(chunk).min(range.end);
            let frames = pool.install(|| {
                (start..end)
                    .into_par_iter()
                    .map(|n| self.produce(clip, n))
                    .collect::<ClipweaveResult<Vec<_>>>()
            })?;
            out.extend(frames);
            start = end;
        }
        Ok(out)
    }

    fn produce(&self, clip: &Clip, n: u32) -> ClipweaveResult<FrameRef> {
        let len = clip.num_frames();
        if len != 0 && n >= len {
            return Err(ClipweaveError::out_of_range(format!(
                "frame {n} requested from '{}' which has {len} frames",
                clip.name()
            )));
        }

        match clip.body() {
            NodeBody::Source(source) => {
                let frame = source.frame(n)?;
                check_source_frame(clip, n, &frame)?;
                Ok(frame)
            }
            NodeBody::Filter(op) => {
                let mut requests = SmallVec::<[Dep; 2]>::new();
                let pending = op.begin(n, &mut requests);
                let resolved = self.resolve(&requests)?;
                op.finish(pending, &resolved)
            }
        }
    }

    fn resolve(&self, deps: &[Dep]) -> ClipweaveResult<ResolvedSet> {
        if self.pool.is_some() && deps.len() > 1 {
            return deps
                .par_iter()
                .map(|dep| Ok((dep.clone(), self.produce_dep(dep)?)))
                .collect::<ClipweaveResult<Vec<_>>>()
                .map(ResolvedSet::from_iter);
        }
        deps.iter()
            .map(|dep| Ok((dep.clone(), self.produce_dep(dep)?)))
            .collect()
    }

    /// Upstream requests past the end of a known-length clip resolve to its last frame.
    fn produce_dep(&self, dep: &Dep) -> ClipweaveResult<FrameRef> {
        let n = match dep.clip.num_frames() {
            0 => dep.n,
            len => dep.n.min(len - 1),
        };
        self.produce(&dep.clip, n)
    }
}

fn check_source_frame(clip: &Clip, n: u32, frame: &FrameRef) -> ClipweaveResult<()> {
    let MediaInfo::Audio(ai) = clip.info() else {
        return Ok(());
    };
    let expected = ai.frame_len(n);
    let buf = frame.as_audio()?;
    if buf.length != expected {
        return Err(ClipweaveError::protocol(format!(
            "audio frame {n} of '{}' has {} samples, expected {expected}",
            clip.name(),
            buf.length
        )));
    }
    buf.check_shape()
}

fn normalized_chunk_size(chunk_size: usize) -> u32 {
    u32::try_from(chunk_size.max(1)).unwrap_or(u32::MAX)
}

fn build_thread_pool(threads: Option<usize>) -> ClipweaveResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n.max(1));
    }
    builder
        .build()
        .map_err(|e| ClipweaveError::Other(anyhow::anyhow!("failed to build rayon pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/graph/scheduler.rs"]
mod tests;

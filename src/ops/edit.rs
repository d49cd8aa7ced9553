//! Frame-list edits: duplicate, delete and freeze.

use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::Clip;
use crate::graph::protocol::Dep;
use crate::media::info::MediaInfo;
use crate::ops::{Operator, frame_list, identity};

/// Frame list taken by `DuplicateFrames` and `DeleteFrames`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FramesParams {
    /// Frame numbers, in any order.
    pub frames: Vec<i64>,
}

/// Ranges taken by `FreezeFrames`. The three lists are parallel.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FreezeParams {
    /// First frame of each range.
    pub first: Vec<i64>,
    /// Last frame of each range, inclusive.
    pub last: Vec<i64>,
    /// Frame shown in place of each range.
    pub replacement: Vec<i64>,
}

/// Shows every listed frame twice.
#[derive(Debug)]
pub struct DuplicateFrames {
    clip: Clip,
    dups: Vec<u32>,
}

impl DuplicateFrames {
    /// Upstream frame of output frame `n`.
    pub fn map(&self, mut n: u32) -> Dep {
        for &d in &self.dups {
            if n > d {
                n -= 1;
            } else {
                break;
            }
        }
        Dep::new(&self.clip, n)
    }
}

/// Build a `DuplicateFrames` node. An empty list returns `clip` unchanged.
#[tracing::instrument(skip(clip, params), fields(clip = clip.name(), frames = params.frames.len()))]
pub fn duplicate_frames(clip: &Clip, params: FramesParams) -> ClipweaveResult<Clip> {
    let mut vi = clip.expect_video("DuplicateFrames")?;
    if params.frames.is_empty() {
        return Ok(identity("DuplicateFrames", clip));
    }
    let mut dups = frame_list("DuplicateFrames", &params.frames, vi.num_frames)?;
    dups.sort_unstable();

    if vi.num_frames != 0 {
        vi.num_frames = u32::try_from(dups.len())
            .ok()
            .and_then(|extra| vi.num_frames.checked_add(extra))
            .ok_or_else(|| {
                ClipweaveError::overflow("DuplicateFrames: resulting clip is too long")
            })?;
    }

    let op = DuplicateFrames {
        clip: clip.clone(),
        dups,
    };
    Ok(Clip::from_operator(
        "DuplicateFrames",
        MediaInfo::Video(vi),
        Operator::DuplicateFrames(op),
    ))
}

/// Drops every listed frame.
#[derive(Debug)]
pub struct DeleteFrames {
    clip: Clip,
    del: Vec<u32>,
}

impl DeleteFrames {
    /// Upstream frame of output frame `n`.
    pub fn map(&self, mut n: u32) -> Dep {
        for &d in &self.del {
            if n >= d {
                n = n.saturating_add(1);
            } else {
                break;
            }
        }
        Dep::new(&self.clip, n)
    }
}

/// Build a `DeleteFrames` node. An empty list returns `clip` unchanged.
#[tracing::instrument(skip(clip, params), fields(clip = clip.name(), frames = params.frames.len()))]
pub fn delete_frames(clip: &Clip, params: FramesParams) -> ClipweaveResult<Clip> {
    let mut vi = clip.expect_video("DeleteFrames")?;
    if params.frames.is_empty() {
        return Ok(identity("DeleteFrames", clip));
    }
    let mut del = frame_list("DeleteFrames", &params.frames, vi.num_frames)?;
    del.sort_unstable();
    if del.windows(2).any(|w| w[0] == w[1]) {
        return Err(ClipweaveError::conflict(
            "DeleteFrames: can't delete a frame more than once",
        ));
    }

    // Unknown length stays unknown. Otherwise indices are unique and in range, so at most every
    // frame is deleted.
    if vi.num_frames != 0 {
        vi.num_frames -= del.len() as u32;
        if vi.num_frames == 0 {
            return Err(ClipweaveError::degenerate(
                "DeleteFrames: can't delete all frames",
            ));
        }
    }

    let op = DeleteFrames {
        clip: clip.clone(),
        del,
    };
    Ok(Clip::from_operator(
        "DeleteFrames",
        MediaInfo::Video(vi),
        Operator::DeleteFrames(op),
    ))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FreezeRange {
    first: u32,
    last: u32,
    replacement: u32,
}

/// Replaces each range `[first, last]` by a single frame.
#[derive(Debug)]
pub struct FreezeFrames {
    clip: Clip,
    ranges: Vec<FreezeRange>,
}

impl FreezeFrames {
    /// Upstream frame of output frame `n`.
    pub fn map(&self, n: u32) -> Dep {
        // Ranges are sorted and disjoint.
        let idx = self.ranges.partition_point(|r| r.last < n);
        let src = match self.ranges.get(idx) {
            Some(r) if r.first <= n => r.replacement,
            _ => n,
        };
        Dep::new(&self.clip, src)
    }
}

/// Build a `FreezeFrames` node. Empty lists return `clip` unchanged.
#[tracing::instrument(skip(clip, params), fields(clip = clip.name(), ranges = params.first.len()))]
pub fn freeze_frames(clip: &Clip, params: FreezeParams) -> ClipweaveResult<Clip> {
    let vi = clip.expect_video("FreezeFrames")?;
    if params.first.len() != params.last.len() || params.first.len() != params.replacement.len() {
        return Err(ClipweaveError::conflict(
            "FreezeFrames: 'first', 'last', and 'replacement' must have the same length",
        ));
    }
    if params.first.is_empty() {
        return Ok(identity("FreezeFrames", clip));
    }

    let len = vi.num_frames;
    let firsts = frame_list("FreezeFrames", &params.first, len)?;
    let lasts = frame_list("FreezeFrames", &params.last, len)?;
    let replacements = frame_list("FreezeFrames", &params.replacement, len)?;

    let mut ranges: Vec<FreezeRange> = firsts
        .into_iter()
        .zip(lasts)
        .zip(replacements)
        .map(|((a, b), replacement)| FreezeRange {
            first: a.min(b),
            last: a.max(b),
            replacement,
        })
        .collect();
    ranges.sort_unstable_by_key(|r| r.first);
    if ranges.windows(2).any(|w| w[1].first <= w[0].last) {
        return Err(ClipweaveError::conflict(
            "FreezeFrames: the frame ranges must not overlap",
        ));
    }

    let op = FreezeFrames {
        clip: clip.clone(),
        ranges,
    };
    Ok(Clip::from_operator(
        "FreezeFrames",
        MediaInfo::Video(vi),
        Operator::FreezeFrames(op),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/ops/edit.rs"]
mod tests;

use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::Clip;
use crate::graph::protocol::{Dep, Pending};
use crate::media::info::MediaInfo;
use crate::ops::Operator;

fn default_true() -> bool {
    true
}

/// Parameters of `SelectEvery`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectEveryParams {
    /// Cycle length, at least 2.
    pub cycle: i64,
    /// Kept offsets within each cycle, in output order. Repeats are allowed.
    pub offsets: Vec<i64>,
    /// Scale the frame rate by `offsets.len() / cycle` and durations by the inverse.
    #[serde(default = "default_true")]
    pub modify_duration: bool,
}

impl SelectEveryParams {
    /// Parameters with `modify_duration` enabled.
    pub fn new(cycle: i64, offsets: Vec<i64>) -> Self {
        Self {
            cycle,
            offsets,
            modify_duration: true,
        }
    }
}

/// Keeps offsets of every cycle: `n -> (n / m) * cycle + offsets[n mod m]`.
#[derive(Debug)]
pub struct SelectEvery {
    clip: Clip,
    cycle: u32,
    offsets: Vec<u32>,
    modify_duration: bool,
}

impl SelectEvery {
    /// Upstream frame of output frame `n`.
    pub fn map(&self, n: u32) -> Dep {
        let m = self.offsets.len() as u32;
        let src = (n / m)
            .saturating_mul(self.cycle)
            .saturating_add(self.offsets[(n % m) as usize]);
        Dep::new(&self.clip, src)
    }

    pub(crate) fn plan(&self, n: u32) -> Pending {
        let dep = self.map(n);
        if self.modify_duration {
            Pending::Retime {
                dep,
                mul: i64::from(self.cycle),
                div: self.offsets.len() as i64,
            }
        } else {
            Pending::Forward(dep)
        }
    }
}

/// Build a `SelectEvery` node.
#[tracing::instrument(skip(clip), fields(clip = clip.name()))]
pub fn select_every(clip: &Clip, params: SelectEveryParams) -> ClipweaveResult<Clip> {
    let mut vi = clip.expect_video("SelectEvery")?;
    let cycle = u32::try_from(params.cycle)
        .ok()
        .filter(|&c| c > 1)
        .ok_or_else(|| {
            ClipweaveError::out_of_range("SelectEvery: invalid cycle size (must be greater than 1)")
        })?;
    if params.offsets.is_empty() {
        return Err(ClipweaveError::out_of_range(
            "SelectEvery: no offsets specified",
        ));
    }
    let offsets = params
        .offsets
        .iter()
        .map(|&o| {
            u32::try_from(o).ok().filter(|&o| o < cycle).ok_or_else(|| {
                ClipweaveError::out_of_range("SelectEvery: invalid offset specified")
            })
        })
        .collect::<ClipweaveResult<Vec<u32>>>()?;
    let m = u32::try_from(offsets.len())
        .map_err(|_| ClipweaveError::overflow("SelectEvery: too many offsets"))?;

    let len = vi.num_frames;
    let tail = len % cycle;
    let partial = offsets.iter().filter(|&&o| o < tail).count() as u32;
    vi.num_frames = (len / cycle)
        .checked_mul(m)
        .and_then(|full| full.checked_add(partial))
        .ok_or_else(|| ClipweaveError::overflow("SelectEvery: resulting clip is too long"))?;
    if vi.num_frames == 0 {
        return Err(ClipweaveError::degenerate(
            "SelectEvery: no frames to output, all offsets outside available frames",
        ));
    }

    if params.modify_duration {
        vi.fps = vi.fps.muldiv(i64::from(m), i64::from(cycle))?;
    }

    let op = SelectEvery {
        clip: clip.clone(),
        cycle,
        offsets,
        modify_duration: params.modify_duration,
    };
    Ok(Clip::from_operator(
        "SelectEvery",
        MediaInfo::Video(vi),
        Operator::SelectEvery(op),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/ops/select_every.rs"]
mod tests;

use std::sync::Arc;

use super::*;
use crate::audio::stitch::StitchPart;
use crate::graph::scheduler::{Scheduler, SchedulerOpts};
use crate::media::frame::{DURATION_DEN, DURATION_NUM};
use crate::ops::interleave::{InterleaveParams, interleave};
use crate::ops::reverse::reverse;
use crate::test_support::{ramp, video};

fn sched() -> Scheduler {
    Scheduler::new(SchedulerOpts::default()).unwrap()
}

fn resolve_all(deps: &[Dep]) -> ResolvedSet {
    let s = sched();
    deps.iter()
        .map(|d| (d.clone(), s.get_frame(&d.clip, d.n).unwrap()))
        .collect()
}

#[test]
fn begin_declares_dependencies_then_finish_forwards_the_same_frame() {
    let clip = video("a", 5);
    let out = reverse(&clip).unwrap();
    let op = out.operator().unwrap();

    let mut requests: Vec<Dep> = Vec::new();
    let pending = op.begin(1, &mut requests);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].n, 3);
    assert!(Clip::ptr_eq(&requests[0].clip, &clip));

    let resolved = resolve_all(&requests);
    let upstream = resolved.fetch(&requests[0]).unwrap();
    let frame = op.finish(pending, &resolved).unwrap();
    assert!(Arc::ptr_eq(&frame, &upstream));
}

#[test]
fn requests_are_deduplicated() {
    let clip = video("a", 5);
    let dep = Dep::new(&clip, 2);
    let mut requests: Vec<Dep> = Vec::new();
    requests.request(&dep);
    requests.request(&dep.clone());
    requests.request(&Dep::new(&clip, 3));
    assert_eq!(requests.len(), 2);

    let other = video("a", 5);
    assert!(!dep.same_frame(&Dep::new(&other, 2)));
}

#[test]
fn fetching_an_unrequested_frame_is_a_protocol_error() {
    let clip = video("a", 5);
    let resolved = resolve_all(&[Dep::new(&clip, 0)]);
    let err = resolved.fetch(&Dep::new(&clip, 1)).unwrap_err();
    assert!(matches!(err, ClipweaveError::Protocol(_)));
    assert!(!resolved.is_empty());
    assert!(ResolvedSet::new().is_empty());
}

#[test]
fn retime_copies_frame_and_rescales_duration() {
    let a = video("a", 3);
    let out = interleave(&[a.clone(), video("b", 3)], InterleaveParams::default()).unwrap();
    let op = out.operator().unwrap();

    let mut requests: Vec<Dep> = Vec::new();
    let pending = op.begin(2, &mut requests);
    assert!(matches!(pending, Pending::Retime { mul: 1, div: 2, .. }));
    let resolved = resolve_all(&requests);
    let upstream = resolved.fetch(&requests[0]).unwrap();
    let frame = op.finish(pending, &resolved).unwrap();

    assert!(!Arc::ptr_eq(&frame, &upstream));
    assert_eq!(frame.props.get_int(DURATION_DEN), Some(48));
    assert_eq!(upstream.props.get_int(DURATION_DEN), Some(24));
    assert_eq!(frame.props.get_int(DURATION_NUM), Some(1));
}

#[test]
fn stitch_copies_parts_back_to_back_with_first_part_props() {
    let clip = ramp("a", 4, 0, 8, 1);
    let plan = StitchPlan {
        length: 3,
        parts: smallvec::smallvec![
            StitchPart {
                dep: Dep::new(&clip, 0),
                offset: 3,
                count: 1,
            },
            StitchPart {
                dep: Dep::new(&clip, 1),
                offset: 0,
                count: 2,
            },
        ],
    };
    let pending = Pending::Stitch(plan.clone());
    let deps: Vec<Dep> = pending.deps().into_iter().cloned().collect();
    let resolved = resolve_all(&deps);

    let frame = plan.assemble(&resolved).unwrap();
    let buf = frame.as_audio().unwrap();
    assert_eq!(buf.samples_i16(0), vec![3, 4, 5]);
    let first = resolved.fetch(&deps[0]).unwrap();
    assert_eq!(frame.props, first.props);

    let short = StitchPlan {
        length: 4,
        ..plan
    };
    assert!(matches!(
        short.assemble(&resolved),
        Err(ClipweaveError::Protocol(_))
    ));
}

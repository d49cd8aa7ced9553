use super::*;
use crate::foundation::core::Fps;
use crate::graph::scheduler::{Scheduler, SchedulerOpts};
use crate::media::frame::{DURATION_DEN, DURATION_NUM};
use crate::test_support::{source_frames, video};

#[test]
fn select_every_keeps_chosen_offsets() {
    let clip = video("a", 8);
    let out = select_every(&clip, SelectEveryParams::new(4, vec![0, 2])).unwrap();
    assert_eq!(out.num_frames(), 4);
    assert_eq!(source_frames(&out), vec![0, 2, 4, 6]);
}

#[test]
fn select_every_counts_offsets_in_partial_cycle() {
    let clip = video("a", 10);
    let out = select_every(&clip, SelectEveryParams::new(4, vec![1, 3])).unwrap();
    // Two full cycles give 4 frames; the tail [8, 9] only holds offset 1.
    assert_eq!(out.num_frames(), 5);
    assert_eq!(source_frames(&out), vec![1, 3, 5, 7, 9]);
}

#[test]
fn select_every_allows_repeated_offsets() {
    let clip = video("a", 4);
    let out = select_every(&clip, SelectEveryParams::new(2, vec![1, 1, 0])).unwrap();
    assert_eq!(source_frames(&out), vec![1, 1, 0, 3, 3, 2]);
}

#[test]
fn select_every_rescales_rate_and_durations() {
    let clip = video("a", 8);
    let out = select_every(&clip, SelectEveryParams::new(4, vec![0, 2])).unwrap();
    assert_eq!(out.info().video().unwrap().fps, Fps::new(12, 1).unwrap());

    let sched = Scheduler::new(SchedulerOpts::default()).unwrap();
    let f = sched.get_frame(&out, 0).unwrap();
    assert_eq!(f.props.get_int(DURATION_NUM), Some(1));
    assert_eq!(f.props.get_int(DURATION_DEN), Some(12));

    let params = SelectEveryParams {
        modify_duration: false,
        ..SelectEveryParams::new(4, vec![0, 2])
    };
    let out = select_every(&clip, params).unwrap();
    assert_eq!(out.info().video().unwrap().fps, Fps::new(24, 1).unwrap());
}

#[test]
fn select_every_validates_parameters() {
    let clip = video("a", 8);
    for params in [
        SelectEveryParams::new(1, vec![0]),
        SelectEveryParams::new(4, vec![]),
        SelectEveryParams::new(4, vec![4]),
        SelectEveryParams::new(4, vec![-1]),
    ] {
        assert!(matches!(
            select_every(&clip, params),
            Err(ClipweaveError::OutOfRange(_))
        ));
    }
}

#[test]
fn select_every_without_output_frames_is_degenerate() {
    let clip = video("a", 2);
    assert!(matches!(
        select_every(&clip, SelectEveryParams::new(4, vec![3])),
        Err(ClipweaveError::Degenerate(_))
    ));
    let unknown = video("b", 0);
    assert!(matches!(
        select_every(&unknown, SelectEveryParams::new(2, vec![0])),
        Err(ClipweaveError::Degenerate(_))
    ));
}

#[test]
fn select_every_params_default_modify_duration_on() {
    let params: SelectEveryParams =
        serde_json::from_str(r#"{"cycle": 3, "offsets": [0]}"#).unwrap();
    assert!(params.modify_duration);
}

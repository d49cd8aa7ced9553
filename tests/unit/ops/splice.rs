use super::*;
use crate::foundation::core::Fps;
use crate::media::format::VideoFormat;
use crate::source::synthetic::SyntheticVideo;
use crate::test_support::{origins, video, video_info};

#[test]
fn splice_concatenates_in_order() {
    let out = splice(&[video("a", 3), video("b", 2)], SpliceParams::default()).unwrap();
    assert_eq!(out.num_frames(), 5);
    let got: Vec<(String, i64)> = origins(&out);
    let want: Vec<(String, i64)> = [("a", 0), ("a", 1), ("a", 2), ("b", 0), ("b", 1)]
        .iter()
        .map(|(l, n)| ((*l).to_owned(), *n))
        .collect();
    assert_eq!(got, want);
}

#[test]
fn splice_single_clip_is_identity() {
    let a = video("a", 3);
    let out = splice(std::slice::from_ref(&a), SpliceParams::default()).unwrap();
    assert!(Clip::ptr_eq(&a, &out));
}

#[test]
fn splice_map_falls_back_to_last_clip() {
    let b = video("b", 2);
    let out = splice(&[video("a", 3), b.clone()], SpliceParams::default()).unwrap();
    let Some(Operator::Splice(op)) = out.operator() else {
        panic!("expected a Splice node");
    };
    let dep = op.map(6);
    assert!(Clip::ptr_eq(&dep.clip, &b));
    assert_eq!(dep.n, 3);
}

#[test]
fn splice_frame_rate_difference_is_not_fatal() {
    let mut other = video_info(2);
    other.fps = Fps::new(30, 1).unwrap();
    let b = SyntheticVideo::clip("b", other).unwrap();
    let out = splice(&[video("a", 3), b], SpliceParams::default()).unwrap();
    assert!(out.info().video().unwrap().fps.is_variable());
}

#[test]
fn splice_layout_mismatch_needs_tolerance() {
    let mut other = video_info(2);
    other.width = 16;
    let b = SyntheticVideo::clip("b", other).unwrap();
    let err = splice(&[video("a", 3), b.clone()], SpliceParams::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "mismatch: Splice: clip property mismatch (dimensions)"
    );

    let out = splice(&[video("a", 3), b], SpliceParams { mismatch: true }).unwrap();
    assert_eq!(out.num_frames(), 5);
    assert_eq!(out.info().video().unwrap().width, 0);
}

#[test]
fn splice_compat_format_mismatch_is_always_fatal() {
    let compat = VideoInfo::new(VideoFormat::COMPAT_BGR32, 8, 4, Fps::new(24, 1).unwrap(), 2);
    let b = SyntheticVideo::clip("b", compat).unwrap();
    let err = splice(&[video("a", 3), b], SpliceParams { mismatch: true }).unwrap_err();
    assert_eq!(
        err.to_string(),
        "mismatch: Splice: clip property mismatch (format)"
    );
}

#[test]
fn splice_length_overflow_releases_inputs() {
    let a = video("a", u32::MAX - 1);
    let b = video("b", 2);
    let err = splice(&[a.clone(), b.clone()], SpliceParams::default()).unwrap_err();
    assert!(matches!(err, ClipweaveError::Overflow(_)));
    assert_eq!(a.handle_count(), 1);
    assert_eq!(b.handle_count(), 1);
}

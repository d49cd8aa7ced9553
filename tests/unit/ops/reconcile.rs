use super::*;
use crate::media::format::VideoFormat;

fn vi(width: u32, fps: i64, frames: u32) -> VideoInfo {
    VideoInfo::new(
        VideoFormat::YUV420P8,
        width,
        48,
        Fps::new(fps, 1).unwrap(),
        frames,
    )
}

#[test]
fn identical_clips_have_no_mismatch() {
    let r = reconcile(&[vi(64, 24, 10), vi(64, 24, 10)], false).unwrap();
    assert_eq!(r.mismatch, None);
    assert_eq!(r.info, vi(64, 24, 10));
}

#[test]
fn length_is_maximized_and_optionally_reported() {
    let strict = reconcile(&[vi(64, 24, 10), vi(64, 24, 30)], false).unwrap();
    assert_eq!(strict.mismatch, Some(MismatchCause::Lengths));
    assert_eq!(strict.info.num_frames, 30);

    let lenient = reconcile(&[vi(64, 24, 10), vi(64, 24, 30)], true).unwrap();
    assert_eq!(lenient.mismatch, None);
    assert_eq!(lenient.info.num_frames, 30);
}

#[test]
fn dimension_mismatch_takes_precedence() {
    let r = reconcile(&[vi(64, 24, 10), vi(32, 30, 12)], false).unwrap();
    assert_eq!(r.mismatch, Some(MismatchCause::Dimensions));
    assert_eq!((r.info.width, r.info.height), (0, 0));
    assert_eq!(r.info.fps, Fps::VARIABLE);
    assert_eq!(r.info.num_frames, 12);
}

#[test]
fn format_beats_frame_rate() {
    let mut b = vi(64, 30, 10);
    b.format = Some(VideoFormat::RGB24);
    let r = reconcile(&[vi(64, 24, 10), b], true).unwrap();
    assert_eq!(r.mismatch, Some(MismatchCause::Formats));
    assert_eq!(r.info.format, None);
}

#[test]
fn mismatch_policy() {
    assert!(check_mismatch("Op", None, false, true).is_ok());
    assert!(check_mismatch("Op", Some(MismatchCause::FrameRates), true, false).is_ok());
    let err = check_mismatch("Op", Some(MismatchCause::FrameRates), false, false).unwrap_err();
    assert_eq!(err.to_string(), "mismatch: Op: the clips' frame rates don't match");
    assert!(check_mismatch("Op", Some(MismatchCause::Formats), true, true).is_err());
}

#[test]
fn empty_input_is_rejected() {
    assert!(matches!(
        reconcile(&[], true),
        Err(ClipweaveError::Degenerate(_))
    ));
}

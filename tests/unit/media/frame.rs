use super::*;

fn stereo(spf: u32) -> AudioFormat {
    AudioFormat::stereo_i16().with_samples_per_frame(spf)
}

fn filled(format: AudioFormat, length: u32, base: u8) -> AudioBuffer {
    let mut buf = AudioBuffer::new(format, 48_000, length);
    for (ch, data) in buf.channels.iter_mut().enumerate() {
        for (i, b) in data.iter_mut().enumerate() {
            *b = base.wrapping_add(i as u8).wrapping_add((ch * 100) as u8);
        }
    }
    buf
}

#[test]
fn rescale_duration_updates_both_tags() {
    let mut props = FrameProps::new();
    props.set(DURATION_NUM, PropValue::Int(1));
    props.set(DURATION_DEN, PropValue::Int(24));
    props.rescale_duration(1, 2).unwrap();
    assert_eq!(props.get_int(DURATION_NUM), Some(1));
    assert_eq!(props.get_int(DURATION_DEN), Some(48));

    props.rescale_duration(4, 2).unwrap();
    assert_eq!(props.get_int(DURATION_NUM), Some(1));
    assert_eq!(props.get_int(DURATION_DEN), Some(24));
}

#[test]
fn rescale_duration_ignores_missing_tags() {
    let mut props = FrameProps::new();
    props.set(DURATION_NUM, PropValue::Int(1));
    props.rescale_duration(1, 2).unwrap();
    assert_eq!(props.get_int(DURATION_NUM), Some(1));
    assert_eq!(props.get_int(DURATION_DEN), None);
}

#[test]
fn rescaled_copy_shares_planes() {
    let planes = VideoPlanes::blank(VideoFormat::GRAY8, 4, 2);
    let mut props = FrameProps::new();
    props.set(DURATION_NUM, PropValue::Int(1));
    props.set(DURATION_DEN, PropValue::Int(25));
    let src = Frame::video(planes, props);

    let out = src.with_rescaled_duration(1, 5).unwrap();
    assert!(!Arc::ptr_eq(&src, &out));
    assert_eq!(out.props.get_int(DURATION_DEN), Some(125));
    assert_eq!(src.props.get_int(DURATION_DEN), Some(25));
    let (a, b) = (src.as_video().unwrap(), out.as_video().unwrap());
    assert!(Arc::ptr_eq(&a.planes[0], &b.planes[0]));
    assert_eq!(a.planes[0].len(), 8);
}

#[test]
fn copy_samples_moves_every_channel() {
    let fmt = stereo(4);
    let src = filled(fmt, 4, 10);
    let mut dst = AudioBuffer::new(fmt, 48_000, 3);
    dst.copy_samples(1, &src, 2, 2).unwrap();
    // Sample 2 of the source starts at byte 4 (2 bytes per sample).
    assert_eq!(dst.channel(0), &[0, 0, 14, 15, 16, 17]);
    assert_eq!(dst.channel(1), &[0, 0, 114, 115, 116, 117]);
}

#[test]
fn copy_samples_rejects_out_of_bounds() {
    let fmt = stereo(4);
    let src = filled(fmt, 2, 0);
    let mut dst = AudioBuffer::new(fmt, 48_000, 4);
    assert!(matches!(
        dst.copy_samples(0, &src, 1, 2),
        Err(ClipweaveError::Protocol(_))
    ));
    assert!(matches!(
        dst.copy_samples(3, &src, 0, 2),
        Err(ClipweaveError::Protocol(_))
    ));
}

#[test]
fn copy_samples_rejects_malformed_buffers() {
    let fmt = stereo(4);
    let mut dst = AudioBuffer::new(fmt, 48_000, 4);

    let mut short = filled(fmt, 4, 0);
    short.channels[1].truncate(2);
    assert!(matches!(short.check_shape(), Err(ClipweaveError::Protocol(_))));
    assert!(matches!(
        dst.copy_samples(0, &short, 0, 4),
        Err(ClipweaveError::Protocol(_))
    ));

    let mut mono = filled(fmt, 4, 0);
    mono.channels.pop();
    assert!(matches!(
        dst.copy_samples(0, &mono, 0, 1),
        Err(ClipweaveError::Protocol(_))
    ));

    let float = AudioBuffer::new(AudioFormat::stereo_f32().with_samples_per_frame(4), 48_000, 4);
    assert!(float.check_shape().is_ok());
    assert_eq!(float.channel(0).len(), 16);
    assert!(matches!(
        dst.copy_samples(0, &float, 0, 1),
        Err(ClipweaveError::Protocol(_))
    ));
    assert!(dst.check_shape().is_ok());
}

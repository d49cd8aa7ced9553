use clipweave::{
    Fps, InterleaveParams, PcmAudio, SOURCE_FRAME, SOURCE_LABEL, Scheduler, SchedulerOpts,
    SyntheticVideo, TrimParams, VideoFormat, VideoInfo, audio_splice, audio_trim, interleave,
    registry,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let fps = Fps::new(24, 1)?;
    let a = SyntheticVideo::clip("a", VideoInfo::new(VideoFormat::YUV420P8, 64, 36, fps, 5))?;
    let b = SyntheticVideo::clip("b", VideoInfo::new(VideoFormat::YUV420P8, 64, 36, fps, 5))?;
    let woven = interleave(&[a, b], InterleaveParams::default())?;
    let picked = registry::invoke(
        "SelectEvery",
        std::slice::from_ref(&woven),
        serde_json::json!({"cycle": 3, "offsets": [0, 1]}),
    )?;

    let sched = Scheduler::new(SchedulerOpts {
        parallel: true,
        ..SchedulerOpts::default()
    })?;
    for (n, f) in sched.get_frames(&picked, 0..picked.num_frames())?.iter().enumerate() {
        println!(
            "frame {n}: {}[{}]",
            f.props.get_data(SOURCE_LABEL).unwrap_or("?"),
            f.props.get_int(SOURCE_FRAME).unwrap_or(-1)
        );
    }

    let tone: Vec<i16> = (0..10_000).map(|i| (i % 200) as i16).collect();
    let pcm = PcmAudio::from_i16(3072, 48_000, &[tone.clone(), tone])?.clip("tone");
    let head = audio_trim(
        &pcm,
        TrimParams {
            last: Some(4_999),
            ..TrimParams::default()
        },
    )?;
    let tail = audio_trim(
        &pcm,
        TrimParams {
            first: Some(5_000),
            ..TrimParams::default()
        },
    )?;
    let joined = audio_splice(&[head, tail])?;
    let frames = sched.get_frames(&joined, 0..joined.num_frames())?;
    println!(
        "audio: {} frames, last frame {} samples",
        frames.len(),
        frames.last().map_or(0, |f| f.audio_len())
    );

    Ok(())
}

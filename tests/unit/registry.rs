use super::*;
use serde_json::json;

use crate::ops::Operator;
use crate::test_support::{ramp, samples, source_frames, video};

#[test]
fn every_operator_has_a_signature() {
    for (name, sig) in SIGNATURES {
        assert!(sig.ends_with(';'), "{name}");
        assert_eq!(signature(name), Some(*sig));
    }
    assert_eq!(SIGNATURES.len(), 12);
    assert_eq!(signature("Blur"), None);
}

#[test]
fn invoke_decodes_parameters() {
    let clip = video("a", 10);
    let out = invoke("Trim", std::slice::from_ref(&clip), json!({"first": 2, "last": 5})).unwrap();
    assert_eq!(source_frames(&out), vec![2, 3, 4, 5]);

    let out = invoke(
        "SelectEvery",
        std::slice::from_ref(&clip),
        json!({"cycle": 5, "offsets": [4]}),
    )
    .unwrap();
    assert_eq!(source_frames(&out), vec![4, 9]);

    let out = invoke(
        "FreezeFrames",
        std::slice::from_ref(&clip),
        json!({"first": [0], "last": [1], "replacement": [9]}),
    )
    .unwrap();
    assert_eq!(source_frames(&out)[..3], [9, 9, 2]);
}

#[test]
fn invoke_null_params_means_defaults() {
    let clip = video("a", 4);
    let out = invoke("Trim", std::slice::from_ref(&clip), serde_json::Value::Null).unwrap();
    assert!(Clip::ptr_eq(&clip, &out));

    let out = invoke("Reverse", std::slice::from_ref(&clip), serde_json::Value::Null).unwrap();
    assert_eq!(source_frames(&out), vec![3, 2, 1, 0]);

    let a = ramp("a", 4, 0, 5, 1);
    let b = ramp("b", 4, 0, 5, 1);
    let out = invoke("AudioSplice", &[a, b], json!({})).unwrap();
    assert_eq!(out.info().audio().unwrap().num_samples, 10);
}

#[test]
fn invoke_rejects_bad_requests() {
    let clip = video("a", 4);
    let one = std::slice::from_ref(&clip);
    assert!(matches!(
        invoke("Blur", one, json!({})),
        Err(ClipweaveError::Conflict(_))
    ));
    assert!(matches!(
        invoke("Trim", one, json!({"begin": 1})),
        Err(ClipweaveError::Conflict(_))
    ));
    assert!(matches!(
        invoke("Trim", one, json!({"first": "one"})),
        Err(ClipweaveError::Conflict(_))
    ));
    assert!(matches!(
        invoke("Reverse", &[clip.clone(), clip.clone()], json!({})),
        Err(ClipweaveError::Conflict(_))
    ));
    assert!(matches!(
        invoke("SelectEvery", one, json!({"offsets": [0]})),
        Err(ClipweaveError::Conflict(_))
    ));
}

#[test]
fn invoke_audio_splice2_takes_exactly_two_clips() {
    let a = ramp("a", 4, 0, 5, 1);
    let b = ramp("b", 4, 100, 3, 1);
    let out = invoke("AudioSplice2", &[a.clone(), b.clone()], serde_json::Value::Null).unwrap();
    assert!(matches!(out.operator(), Some(Operator::AudioSplice2(_))));
    let mut want: Vec<i16> = (0..5).collect();
    want.extend(100..103);
    assert_eq!(samples(&out, 0), want);

    for clips in [vec![a.clone()], vec![a.clone(), b.clone(), a.clone()]] {
        assert!(matches!(
            invoke("AudioSplice2", &clips, json!({})),
            Err(ClipweaveError::Conflict(_))
        ));
    }
    assert!(matches!(
        invoke("AudioSplice2", &[a, b], json!({"mismatch": true})),
        Err(ClipweaveError::Conflict(_))
    ));
}

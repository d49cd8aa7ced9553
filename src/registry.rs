//! Name-based construction for hosts that marshal parameters as JSON.
//!
//! Each operator is registered under its name with an argument signature of
//! `name:type[:opt];` entries. Clip arguments are passed separately from the JSON parameters.

use serde::de::DeserializeOwned;

use crate::audio::splice::{audio_splice, audio_splice2};
use crate::audio::trim::audio_trim;
use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::graph::clip::Clip;
use crate::ops::edit::{delete_frames, duplicate_frames, freeze_frames};
use crate::ops::interleave::interleave;
use crate::ops::looping::loop_;
use crate::ops::reverse::reverse;
use crate::ops::select_every::select_every;
use crate::ops::splice::splice;
use crate::ops::trim::trim;

/// Registered operators and their argument signatures.
pub const SIGNATURES: &[(&str, &str)] = &[
    ("Trim", "clip:vnode;first:int:opt;last:int:opt;length:int:opt;"),
    ("AudioTrim", "clip:anode;first:int:opt;last:int:opt;length:int:opt;"),
    ("Reverse", "clip:vnode;"),
    ("Loop", "clip:vnode;times:int:opt;"),
    (
        "Interleave",
        "clips:vnode[];extend:bool:opt;mismatch:bool:opt;modify_duration:bool:opt;",
    ),
    (
        "SelectEvery",
        "clip:vnode;cycle:int;offsets:int[];modify_duration:bool:opt;",
    ),
    ("Splice", "clips:vnode[];mismatch:bool:opt;"),
    ("AudioSplice2", "clip1:anode;clip2:anode;"),
    ("AudioSplice", "clips:anode[];"),
    ("DuplicateFrames", "clip:vnode;frames:int[];"),
    ("DeleteFrames", "clip:vnode;frames:int[];"),
    (
        "FreezeFrames",
        "clip:vnode;first:int[]:opt;last:int[]:opt;replacement:int[]:opt;",
    ),
];

/// Argument signature of operator `name`.
pub fn signature(name: &str) -> Option<&'static str> {
    SIGNATURES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, sig)| *sig)
}

/// Construct operator `name` over `clips` with JSON `params` (`null` means no parameters).
#[tracing::instrument(skip(clips, params), fields(clips = clips.len()))]
pub fn invoke(name: &str, clips: &[Clip], params: serde_json::Value) -> ClipweaveResult<Clip> {
    match name {
        "Trim" => trim(one_clip(name, clips)?, decode(name, params)?),
        "AudioTrim" => audio_trim(one_clip(name, clips)?, decode(name, params)?),
        "Reverse" => {
            decode::<NoParams>(name, params)?;
            reverse(one_clip(name, clips)?)
        }
        "Loop" => loop_(one_clip(name, clips)?, decode(name, params)?),
        "Interleave" => interleave(clips, decode(name, params)?),
        "SelectEvery" => select_every(one_clip(name, clips)?, decode(name, params)?),
        "Splice" => splice(clips, decode(name, params)?),
        "AudioSplice2" => {
            decode::<NoParams>(name, params)?;
            let [first, second] = clips else {
                return Err(ClipweaveError::conflict(format!(
                    "{name}: expected exactly two clips, got {}",
                    clips.len()
                )));
            };
            audio_splice2(first, second)
        }
        "AudioSplice" => {
            decode::<NoParams>(name, params)?;
            audio_splice(clips)
        }
        "DuplicateFrames" => duplicate_frames(one_clip(name, clips)?, decode(name, params)?),
        "DeleteFrames" => delete_frames(one_clip(name, clips)?, decode(name, params)?),
        "FreezeFrames" => freeze_frames(one_clip(name, clips)?, decode(name, params)?),
        _ => Err(ClipweaveError::conflict(format!("unknown operator '{name}'"))),
    }
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct NoParams {}

fn decode<T: DeserializeOwned>(name: &str, params: serde_json::Value) -> ClipweaveResult<T> {
    let params = match params {
        serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
        other => other,
    };
    serde_json::from_value(params)
        .map_err(|e| ClipweaveError::conflict(format!("{name}: invalid parameters: {e}")))
}

fn one_clip<'a>(name: &str, clips: &'a [Clip]) -> ClipweaveResult<&'a Clip> {
    match clips {
        [clip] => Ok(clip),
        _ => Err(ClipweaveError::conflict(format!(
            "{name}: expected exactly one clip, got {}",
            clips.len()
        ))),
    }
}

#[cfg(test)]
#[path = "../tests/unit/registry.rs"]
mod tests;

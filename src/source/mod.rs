//! Leaf clips: generators and in-memory buffers that feed operator graphs.

pub(crate) mod pcm;
pub(crate) mod synthetic;

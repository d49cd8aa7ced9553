//! Sample-accurate audio operators and the frame stitcher they share.

pub(crate) mod splice;
pub(crate) mod stitch;
pub(crate) mod trim;

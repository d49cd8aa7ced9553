//! Clip descriptors, sample/pixel formats and frame buffers.

pub(crate) mod format;
pub(crate) mod frame;
pub(crate) mod info;

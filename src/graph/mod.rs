//! Clip handles, the two-phase production protocol and its reference host.

pub(crate) mod clip;
pub(crate) mod protocol;
pub(crate) mod scheduler;

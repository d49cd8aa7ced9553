//! Shared primitives: frame rates, rational arithmetic and the error taxonomy.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod rational;

//! Internal implementation details.

pub(crate) mod sync;

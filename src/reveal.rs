pub(crate) mod band;
pub(crate) mod geometry;
pub(crate) mod scheduler;
pub(crate) mod target;

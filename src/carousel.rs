pub(crate) mod autoplay;
pub(crate) mod slide;
pub(crate) mod timer;

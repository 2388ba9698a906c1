pub(crate) mod ease;
pub(crate) mod idle;
pub(crate) mod playhead;
pub(crate) mod style;
pub(crate) mod timeline;
pub(crate) mod tween;

//! Folio is a deterministic motion engine for a single-page portfolio.
//!
//! It owns the two pieces of page behavior that carry real state: an autoplay carousel with
//! manual override, and a scroll-triggered reveal scheduler that every section uses to animate
//! content into view. Around them sit the page-load intro timeline, decorative idle motion and
//! the contact form's floating labels.
//!
//! # Model
//!
//! 1. **Describe**: a [`PageConfig`] (JSON) lists the viewport and every section's document
//!    bounds, reveal groups, idle groups, carousel and form.
//! 2. **Drive**: a [`PageSession`] receives host events ([`PageEvent`]) with explicit
//!    [`Time`] stamps. Carousel ticks and animation progress are derived from those stamps,
//!    never from a wall clock.
//! 3. **Render**: [`PageSession::snapshot`] returns a [`PageSnapshot`] with a [`Style`] per
//!    animated element and a [`CarouselSnapshot`] per carousel.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single event context**: all state changes happen inside one session, in time order.
//! - **Replace, don't queue**: a new transition target always replaces the in-flight one.
//! - **Deterministic teardown**: unmounting cancels timers and deregisters reveal targets
//!   before the next event is processed.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod carousel;
mod form;
mod foundation;
mod reveal;
mod scene;
mod session;

pub use animation::ease::Ease;
pub use animation::idle::IdleMotion;
pub use animation::playhead::{Direction, Playhead};
pub use animation::style::{Lerp, Style};
pub use animation::timeline::{Position, Timeline};
pub use animation::tween::Tween;
pub use carousel::autoplay::{
    AutoplayCarousel, CarouselOpts, CarouselSnapshot, CarouselState, CarouselStats,
};
pub use carousel::slide::{ColorTag, Slide};
pub use carousel::timer::{DueTicks, IntervalTimer};
pub use form::field::{ContactForm, FieldBinding, FormOpts};
pub use foundation::core::{ElementId, Fps, FrameIndex, FrameRange, Point, Rect, Time, Vec2};
pub use foundation::error::{FolioError, FolioResult};
pub use reveal::band::{ActivationBand, BandLine, Crossing, ElementEdge, Zone};
pub use reveal::geometry::{DocumentLayout, Geometry, Viewport};
pub use reveal::scheduler::{
    ElementStyle, IdleGroup, RegistrationHandle, RevealGroup, RevealScheduler,
};
pub use reveal::target::{Entrance, RevealEvent, RevealEventKind, RevealPhase, RevealTarget};
pub use scene::page::{
    CarouselConfig, FieldConfig, FormConfig, IdleConfig, IntroEntry, PageConfig, RevealConfig,
    SectionConfig,
};
pub use session::page_session::{PageEvent, PageSession, PageSnapshot};
pub use session::script::{Script, ScriptStep, run_script};

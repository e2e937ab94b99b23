//! battbrrr-effects
//!
//! Host-independent core of the controller's web chrome: the animated
//! particle backdrop (filaments, pulses, sparks) and the firmware footer.
//! Drawing goes through the [`Painter`] trait and frame pacing through
//! [`FrameScheduler`], so everything here runs natively under `cargo test`
//! and in the browser via `battbrrr-ui`.

pub mod backdrop;
pub mod config;
pub mod error;
pub mod footer;
pub mod geometry;
pub mod lifecycle;
pub mod paint;
pub mod particles;

pub use backdrop::{Backdrop, FrameStats};
pub use config::{EffectsConfig, Palette};
pub use error::{EffectsError, FooterError, Result};
pub use footer::{Footer, FooterOutcome, InfoReply, TextSink};
pub use geometry::{Point, Viewport};
pub use lifecycle::{start, Animation, CancellationToken, FrameCallback, FrameScheduler, ManualScheduler};
pub use paint::{DrawCommand, Fill, Painter, Recorder, Stroke};

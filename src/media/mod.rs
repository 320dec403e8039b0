//! Media playback surface: the element abstraction and its clock-driven
//! implementation

mod clock;
mod element;
mod error;

pub use clock::{ClockedElement, CLOCK_TICK};
pub use element::{MediaElement, MediaEvent, SharedMediaElement};
pub use error::MediaError;

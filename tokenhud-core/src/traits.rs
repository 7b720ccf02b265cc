//! Trait definitions for TokenHUD.

use crate::models::{DisplayState, PollStatus};

/// A display surface driven by the poll loop.
///
/// The surface is an opaque sink: it receives the already-mapped
/// [`DisplayState`] on every tick, whether or not the tick loaded new data.
pub trait Renderer {
    /// Error produced when the surface cannot draw.
    type Error: std::fmt::Display;

    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if drawing fails. The poll loop logs it
    /// and keeps ticking.
    fn render(&mut self, state: &DisplayState, status: &PollStatus) -> Result<(), Self::Error>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    type Error = R::Error;

    fn render(&mut self, state: &DisplayState, status: &PollStatus) -> Result<(), Self::Error> {
        (**self).render(state, status)
    }
}

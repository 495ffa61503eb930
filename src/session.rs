//! The synchronous frame loop shared by all interaction controllers.

use std::ops::ControlFlow;

use crate::{
    source::{Frame, Input, LandmarkSource},
    timer::FpsCounter,
};

/// Per-frame logic driven by [`run`].
pub trait FrameHandler {
    /// Result reported when the handler ends the session by itself.
    type Summary;

    /// Updates the handler's state with the hands detected in `frame`.
    ///
    /// Returning [`ControlFlow::Break`] ends the session.
    fn handle_frame(&mut self, frame: &Frame) -> ControlFlow<Self::Summary>;
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<S> {
    /// The user asked to quit.
    Quit,
    /// The [`LandmarkSource`] ran out of frames.
    SourceExhausted,
    /// The [`FrameHandler`] finished, for example because a round was completed.
    Finished(S),
}

/// Runs the frame loop until the user quits, the source runs dry, or `handler` finishes.
pub fn run<S, H>(source: S, handler: &mut H) -> anyhow::Result<Outcome<H::Summary>>
where
    S: LandmarkSource,
    H: FrameHandler,
{
    run_with(source, handler, |_, _| Ok(()))
}

/// Like [`run`], but invokes `render` after every frame has been handled.
///
/// `render` is also invoked for the frame that finishes the session. Errors returned by `render`
/// or by the source abort the loop and are returned.
pub fn run_with<S, H, R>(
    mut source: S,
    handler: &mut H,
    mut render: R,
) -> anyhow::Result<Outcome<H::Summary>>
where
    S: LandmarkSource,
    H: FrameHandler,
    R: FnMut(&H, &Frame) -> anyhow::Result<()>,
{
    let mut fps = FpsCounter::new("frame loop");
    let mut frames = 0usize;
    loop {
        let frame = match source.next_input()? {
            Some(Input::Frame(frame)) => frame,
            Some(Input::Quit) => {
                log::info!("quit requested after {frames} frames");
                return Ok(Outcome::Quit);
            }
            None => {
                log::info!("no more frames after {frames} frames, ending session");
                return Ok(Outcome::SourceExhausted);
            }
        };

        frames += 1;
        let flow = handler.handle_frame(&frame);
        render(handler, &frame)?;
        fps.tick_with(format_args!("{} hands", frame.hands().len()));

        if let ControlFlow::Break(summary) = flow {
            log::debug!("handler finished after {frames} frames");
            return Ok(Outcome::Finished(summary));
        }
    }
}

//! Invocation boundary.
//!
//! Runs one upload-to-videos cycle against a [`Presenter`]. Progress events
//! and videos are forwarded as they happen; any fault ends the cycle with a
//! single user-facing message and never escapes to the caller.

use futures::StreamExt;
use tracing::{error, info, info_span, Instrument};

use i2v_client::InferenceService;
use i2v_models::{FaultKind, PreparedImage, ProgressEvent, SessionId, VideoResult};

use crate::error::GenerationResult;
use crate::generator::Generator;
use crate::progress::{self, ProgressReceiver};

/// Presentation layer for one invocation.
pub trait Presenter {
    /// Show the prepared input image.
    fn show_input(&mut self, image: &PreparedImage);

    /// Update or hide the progress indicator.
    fn show_progress(&mut self, event: &ProgressEvent);

    /// Show one finished video.
    fn show_video(&mut self, video: VideoResult);

    /// Show a user-facing message.
    fn show_message(&mut self, message: &str);
}

/// Summary of a finished invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub session_id: SessionId,
    /// Videos handed to the presenter
    pub videos_delivered: usize,
    /// Fault that ended the invocation, if any
    pub fault: Option<FaultKind>,
}

impl SessionOutcome {
    pub fn is_success(&self) -> bool {
        self.fault.is_none()
    }
}

/// Run one invocation: prepare `raw_image`, generate videos and present them.
pub async fn run<S, P>(generator: &Generator<S>, raw_image: &[u8], presenter: &mut P) -> SessionOutcome
where
    S: InferenceService,
    P: Presenter,
{
    let session_id = SessionId::new();
    let span = info_span!("session", session_id = %session_id);

    async move {
        presenter.show_progress(&ProgressEvent::started());

        let mut delivered = 0;
        let result = deliver(generator, raw_image, presenter, &mut delivered).await;

        let fault = match result {
            Ok(()) => {
                info!(videos = delivered, "Session completed");
                None
            }
            Err(e) => {
                let kind = e.fault_kind();
                error!(
                    error = %e,
                    fault = kind.as_str(),
                    videos = delivered,
                    "Session failed"
                );
                presenter.show_message(kind.user_message());
                Some(kind)
            }
        };

        SessionOutcome {
            session_id,
            videos_delivered: delivered,
            fault,
        }
    }
    .instrument(span)
    .await
}

async fn deliver<S, P>(
    generator: &Generator<S>,
    raw_image: &[u8],
    presenter: &mut P,
    delivered: &mut usize,
) -> GenerationResult<()>
where
    S: InferenceService,
    P: Presenter,
{
    let image = match i2v_media::prepare(raw_image) {
        Ok(image) => image,
        Err(e) => {
            presenter.show_progress(&ProgressEvent::Cleared);
            return Err(e.into());
        }
    };
    presenter.show_input(&image);

    let (sender, mut receiver) = progress::channel();
    let videos = generator.generate(&image, generator.config().num_videos, sender);
    tokio::pin!(videos);

    let mut outcome = Ok(());
    loop {
        tokio::select! {
            biased;

            Some(event) = receiver.recv() => presenter.show_progress(&event),
            item = videos.next() => match item {
                Some(Ok(video)) => {
                    drain(&mut receiver, presenter);
                    *delivered += 1;
                    presenter.show_video(video);
                }
                Some(Err(e)) => {
                    outcome = Err(e);
                    break;
                }
                None => break,
            },
        }
    }

    drain(&mut receiver, presenter);
    outcome
}

/// Forward events sent while the last stream item was produced.
fn drain<P: Presenter>(receiver: &mut ProgressReceiver, presenter: &mut P) {
    while let Some(event) = receiver.try_recv() {
        presenter.show_progress(&event);
    }
}

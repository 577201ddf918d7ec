//! Job fan-out and polling.
//!
//! One prepared image is submitted N times, then outstanding jobs are polled
//! until each one is ready. Videos are yielded in submission order as soon as
//! the next one in line can be retrieved, so the caller sees results
//! incrementally while later jobs are still running.

use futures::future::join_all;
use futures::stream::{self, Stream};
use tracing::{debug, warn};

use i2v_client::{InferenceService, OutputRef};
use i2v_models::{InferenceJob, JobHandle, PreparedImage, VideoResult};

use crate::config::GeneratorConfig;
use crate::error::{GenerationError, GenerationResult};
use crate::logging::JobLogger;
use crate::progress::{ProgressSender, ProgressTracker};

/// Generates videos from images through an inference service.
pub struct Generator<S> {
    service: S,
    config: GeneratorConfig,
}

impl<S: InferenceService> Generator<S> {
    pub fn new(service: S, config: GeneratorConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Submit `count` jobs for `image` and stream their videos in order.
    ///
    /// Progress ticks are sent on `progress` while waiting. The indicator is
    /// cleared once, when the stream ends after the last video. The first
    /// error also ends the stream: progress is cleared before it is yielded
    /// and nothing is polled after. A readiness failure of a later job is
    /// held back until every earlier job that is already ready was yielded.
    pub fn generate<'a>(
        &'a self,
        image: &'a PreparedImage,
        count: usize,
        progress: ProgressSender,
    ) -> impl Stream<Item = GenerationResult<VideoResult>> + 'a {
        let batch = Batch {
            generator: self,
            image,
            count,
            jobs: Vec::with_capacity(count),
            checks: vec![0; count],
            next: 0,
            fault: None,
            submitted: false,
            finished: false,
            tracker: ProgressTracker::new(progress),
        };

        stream::unfold(batch, |mut batch| async move {
            let item = batch.next_video().await?;
            Some((item, batch))
        })
    }
}

/// State of one generation run.
struct Batch<'a, S> {
    generator: &'a Generator<S>,
    image: &'a PreparedImage,
    count: usize,
    jobs: Vec<InferenceJob>,
    /// Readiness checks issued per job
    checks: Vec<u32>,
    /// Index of the next job to deliver
    next: usize,
    /// First readiness failure, surfaced once the jobs before it are delivered
    fault: Option<GenerationError>,
    submitted: bool,
    finished: bool,
    tracker: ProgressTracker,
}

impl<'a, S: InferenceService> Batch<'a, S> {
    async fn next_video(&mut self) -> Option<GenerationResult<VideoResult>> {
        if self.finished {
            return None;
        }

        match self.advance().await {
            Ok(Some(video)) => Some(Ok(video)),
            Ok(None) => {
                self.finish();
                None
            }
            Err(e) => {
                self.fail(&e);
                Some(Err(e))
            }
        }
    }

    async fn advance(&mut self) -> GenerationResult<Option<VideoResult>> {
        if !self.submitted {
            self.submit_all().await?;
        }

        let index = self.next;
        if index >= self.jobs.len() {
            return Ok(None);
        }

        while !self.jobs[index].is_ready() {
            if let Some(error) = self.fault.take() {
                return Err(error);
            }
            self.check_outstanding().await;
            if !self.jobs[index].is_ready() && self.fault.is_none() {
                tokio::time::sleep(self.generator.config.poll_interval).await;
                self.tracker.tick();
            }
        }

        let video = self.retrieve(index).await?;
        self.next += 1;
        Ok(Some(video))
    }

    /// Queue every job before any polling starts.
    async fn submit_all(&mut self) -> GenerationResult<()> {
        debug!(
            count = self.count,
            width = self.image.width(),
            height = self.image.height(),
            "Submitting inference jobs"
        );

        for index in 0..self.count {
            let logger = JobLogger::new(index);
            let handle = match self.generator.service.submit(self.image).await {
                Ok(handle) => handle,
                Err(e) => {
                    logger.log_error(&e.to_string());
                    return Err(e.into());
                }
            };
            logger.log_submitted(&handle);
            self.jobs.push(InferenceJob::new(index, handle));
        }
        self.submitted = true;
        Ok(())
    }

    /// Check every pending job concurrently and mark the ready ones.
    ///
    /// Jobs reported ready in the same round as a failure are still marked,
    /// so they can be delivered before the failure is.
    async fn check_outstanding(&mut self) {
        let pending: Vec<usize> = self
            .jobs
            .iter()
            .filter(|job| job.is_pending())
            .map(|job| job.index)
            .collect();

        let generator = self.generator;
        let results = join_all(
            pending
                .iter()
                .map(|&index| generator.service.is_ready(&self.jobs[index].handle)),
        )
        .await;

        for (index, result) in pending.into_iter().zip(results) {
            self.checks[index] += 1;
            let job = &mut self.jobs[index];
            let logger = JobLogger::for_job(index, &job.handle);
            match result {
                Ok(true) => {
                    job.mark_ready();
                    logger.log_ready(self.checks[index]);
                }
                Ok(false) => {}
                Err(e) => {
                    logger.log_error(&e.to_string());
                    if self.fault.is_none() {
                        self.fault = Some(e.into());
                    }
                }
            }
        }
    }

    async fn retrieve(&mut self, index: usize) -> GenerationResult<VideoResult> {
        let handle = self.jobs[index].handle.clone();
        let logger = JobLogger::for_job(index, &handle);

        let bytes = match self.download(index, &handle).await {
            Ok(bytes) => bytes,
            Err(e) => {
                logger.log_error(&e.to_string());
                return Err(e);
            }
        };

        self.jobs[index].mark_retrieved();
        logger.log_retrieved(bytes.len());
        Ok(VideoResult::new(index, handle.response_id, bytes))
    }

    async fn download(&self, index: usize, handle: &JobHandle) -> GenerationResult<Vec<u8>> {
        let service = &self.generator.service;
        let body = service.fetch_result(handle).await?;
        let output = OutputRef::from_response(&body, &self.generator.config.output_key)?;
        let bytes = service.resolve_output(&output).await?;
        if bytes.is_empty() {
            return Err(GenerationError::EmptyOutput { index });
        }
        Ok(bytes)
    }

    fn finish(&mut self) {
        self.finished = true;
        self.tracker.clear();
    }

    fn fail(&mut self, error: &GenerationError) {
        warn!(
            error = %error,
            delivered = self.next,
            ticks = self.tracker.ticks(),
            "Generation stopped"
        );
        self.finish();
    }
}

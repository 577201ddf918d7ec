//! Shared fixtures for worker integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::time::Instant;

use i2v_client::{InferenceError, InferenceResult, InferenceService, OutputRef};
use i2v_models::{FaultKind, JobHandle, PreparedImage, ProgressEvent, VideoResult};
use i2v_worker::Presenter;

const VIDEO_HOST: &str = "https://videos.test/";

/// Build an error that collapses to `kind`.
pub fn fault(kind: FaultKind) -> InferenceError {
    match kind {
        FaultKind::Client => InferenceError::from_http_status(400, "bad request"),
        FaultKind::Server => InferenceError::from_http_status(503, "unavailable"),
        FaultKind::Unexpected => InferenceError::invalid_response("garbled body"),
    }
}

/// Bytes the stub returns for the video of job `index`.
pub fn video_bytes(index: usize) -> Vec<u8> {
    format!("video-{index}").into_bytes()
}

/// Encode a plain RGB image of the given size as PNG.
pub fn png_image(width: u32, height: u32) -> Vec<u8> {
    let image = image::DynamicImage::new_rgb8(width, height);
    i2v_media::encode_png(&image).unwrap()
}

#[derive(Default)]
struct Script {
    /// Ticks of elapsed time after which each job reports ready
    ready_after: Vec<u32>,
    submit_fault: Option<(usize, FaultKind)>,
    /// (job, check number, kind)
    poll_fault: Option<(usize, u32, FaultKind)>,
    fetch_fault: Option<(usize, FaultKind)>,
    empty_output: Option<usize>,
    submit_attempts: usize,
    checks: Vec<u32>,
    fault_at: Option<Duration>,
    checks_after_fault: u32,
    fetched: Vec<usize>,
}

/// Inference service whose jobs complete after a scripted amount of
/// (tokio) time. Clones share state so tests can inspect it afterwards.
#[derive(Clone)]
pub struct ScriptedService {
    script: Arc<Mutex<Script>>,
    start: Instant,
    interval: Duration,
}

impl ScriptedService {
    /// Job `i` becomes ready once `ready_after[i] * interval` has elapsed.
    pub fn new(ready_after: Vec<u32>, interval: Duration) -> Self {
        let jobs = ready_after.len();
        Self {
            script: Arc::new(Mutex::new(Script {
                ready_after,
                checks: vec![0; jobs],
                ..Default::default()
            })),
            start: Instant::now(),
            interval,
        }
    }

    pub fn fail_submit(self, index: usize, kind: FaultKind) -> Self {
        self.script.lock().unwrap().submit_fault = Some((index, kind));
        self
    }

    pub fn fail_poll(self, index: usize, on_check: u32, kind: FaultKind) -> Self {
        self.script.lock().unwrap().poll_fault = Some((index, on_check, kind));
        self
    }

    pub fn fail_fetch(self, index: usize, kind: FaultKind) -> Self {
        self.script.lock().unwrap().fetch_fault = Some((index, kind));
        self
    }

    pub fn empty_output(self, index: usize) -> Self {
        self.script.lock().unwrap().empty_output = Some(index);
        self
    }

    pub fn submit_attempts(&self) -> usize {
        self.script.lock().unwrap().submit_attempts
    }

    pub fn checks(&self, index: usize) -> u32 {
        self.script.lock().unwrap().checks[index]
    }

    pub fn total_checks(&self) -> u32 {
        self.script.lock().unwrap().checks.iter().sum()
    }

    /// Readiness checks issued strictly after the injected poll fault.
    pub fn checks_after_fault(&self) -> u32 {
        self.script.lock().unwrap().checks_after_fault
    }

    pub fn fetched(&self) -> Vec<usize> {
        self.script.lock().unwrap().fetched.clone()
    }

    fn index_of(handle: &JobHandle) -> usize {
        handle
            .response_id
            .trim_start_matches("job-")
            .parse()
            .unwrap()
    }
}

#[async_trait]
impl InferenceService for ScriptedService {
    async fn submit(&self, _image: &PreparedImage) -> InferenceResult<JobHandle> {
        let mut script = self.script.lock().unwrap();
        let index = script.submit_attempts;
        script.submit_attempts += 1;

        if let Some((at, kind)) = script.submit_fault {
            if at == index {
                return Err(fault(kind));
            }
        }

        Ok(JobHandle::new(
            format!("job-{index}"),
            format!("https://svc.test/poll/job-{index}"),
        ))
    }

    async fn is_ready(&self, handle: &JobHandle) -> InferenceResult<bool> {
        let index = Self::index_of(handle);
        let elapsed = self.start.elapsed();
        let mut script = self.script.lock().unwrap();

        script.checks[index] += 1;
        if matches!(script.fault_at, Some(at) if elapsed > at) {
            script.checks_after_fault += 1;
        }

        if let Some((at, on_check, kind)) = script.poll_fault {
            if at == index && script.checks[index] == on_check {
                script.fault_at = Some(elapsed);
                return Err(fault(kind));
            }
        }

        Ok(elapsed >= self.interval * script.ready_after[index])
    }

    async fn fetch_result(&self, handle: &JobHandle) -> InferenceResult<Value> {
        let index = Self::index_of(handle);
        let mut script = self.script.lock().unwrap();
        script.fetched.push(index);

        if let Some((at, kind)) = script.fetch_fault {
            if at == index {
                return Err(fault(kind));
            }
        }

        Ok(json!({ "output": { "url": format!("{VIDEO_HOST}{index}.mp4") } }))
    }

    async fn resolve_output(&self, output: &OutputRef) -> InferenceResult<Vec<u8>> {
        let OutputRef::Url(url) = output else {
            return Err(InferenceError::invalid_response("expected a URL"));
        };
        let index: usize = url
            .trim_start_matches(VIDEO_HOST)
            .trim_end_matches(".mp4")
            .parse()
            .unwrap();

        if self.script.lock().unwrap().empty_output == Some(index) {
            return Ok(Vec::new());
        }
        Ok(video_bytes(index))
    }
}

/// What a [`RecordingPresenter`] was asked to show.
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Input { width: u32, height: u32 },
    Progress(ProgressEvent),
    Video { index: usize, bytes: Vec<u8>, at: Duration },
    Message(String),
}

/// Presenter that records every call along with the (tokio) time of videos.
pub struct RecordingPresenter {
    pub shown: Vec<Shown>,
    start: Instant,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self {
            shown: Vec::new(),
            start: Instant::now(),
        }
    }

    pub fn progress(&self) -> Vec<ProgressEvent> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Progress(event) => Some(event.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn videos(&self) -> Vec<(usize, Vec<u8>, Duration)> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Video { index, bytes, at } => Some((*index, bytes.clone(), *at)),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Message(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn cleared_count(&self) -> usize {
        self.progress().iter().filter(|e| e.is_cleared()).count()
    }
}

impl Presenter for RecordingPresenter {
    fn show_input(&mut self, image: &PreparedImage) {
        self.shown.push(Shown::Input {
            width: image.width(),
            height: image.height(),
        });
    }

    fn show_progress(&mut self, event: &ProgressEvent) {
        self.shown.push(Shown::Progress(event.clone()));
    }

    fn show_video(&mut self, video: VideoResult) {
        self.shown.push(Shown::Video {
            index: video.index,
            bytes: video.bytes,
            at: self.start.elapsed(),
        });
    }

    fn show_message(&mut self, message: &str) {
        self.shown.push(Shown::Message(message.to_string()));
    }
}

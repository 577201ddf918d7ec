//! File-writing presenter.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use i2v_models::{PreparedImage, ProgressEvent, VideoResult};

use crate::session::Presenter;

/// Name of the file the prepared input is written to.
pub const INPUT_FILE_NAME: &str = "input.png";

/// Writes the prepared input and every video into an output directory.
#[derive(Debug)]
pub struct FilePresenter {
    out_dir: PathBuf,
    written: Vec<PathBuf>,
    messages: Vec<String>,
}

impl FilePresenter {
    /// Create a presenter writing into `out_dir`, creating it if needed.
    pub fn new(out_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let out_dir = out_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&out_dir)?;
        Ok(Self {
            out_dir,
            written: Vec::new(),
            messages: Vec::new(),
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Files written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Messages shown so far.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    fn write(&mut self, name: &str, bytes: &[u8]) {
        let path = self.out_dir.join(name);
        match std::fs::write(&path, bytes) {
            Ok(()) => {
                info!(path = %path.display(), bytes = bytes.len(), "Wrote file");
                self.written.push(path);
            }
            Err(e) => error!(path = %path.display(), error = %e, "Failed to write file"),
        }
    }
}

impl Presenter for FilePresenter {
    fn show_input(&mut self, image: &PreparedImage) {
        match i2v_media::decode_png(image) {
            Ok(png) => self.write(INPUT_FILE_NAME, &png),
            Err(e) => warn!(error = %e, "Prepared image could not be decoded"),
        }
    }

    fn show_progress(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Update { percent, message } => info!(percent, "{}", message),
            ProgressEvent::Cleared => info!("Progress cleared"),
        }
    }

    fn show_video(&mut self, video: VideoResult) {
        self.write(&video.file_name(), &video.bytes);
    }

    fn show_message(&mut self, message: &str) {
        eprintln!("{message}");
        self.messages.push(message.to_string());
    }
}

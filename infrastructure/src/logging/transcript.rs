//! Plain-text transcript file.

use eventcrew_application::{TranscriptError, TranscriptSink};
use eventcrew_domain::ChatMessage;
use eventcrew_domain::conversation::render_transcript;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the whole transcript to one file, replacing what was there.
pub struct TranscriptFileWriter {
    path: PathBuf,
}

impl TranscriptFileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, e: std::io::Error) -> TranscriptError {
        TranscriptError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}

impl TranscriptSink for TranscriptFileWriter {
    fn write_transcript(&self, messages: &[ChatMessage]) -> Result<(), TranscriptError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }

        std::fs::write(&self.path, render_transcript(messages)).map_err(|e| self.error(e))?;
        info!(
            "Wrote {} messages to {}",
            messages.len(),
            self.path.display()
        );
        Ok(())
    }
}

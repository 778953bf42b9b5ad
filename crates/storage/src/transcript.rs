use std::fs;
use std::path::Path;

use tracing::debug;

use crate::repository::StorageError;

/// Plain-text log of one finite session, written once at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTranscript {
    lines: Vec<String>,
}

impl SessionTranscript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// A horizontal rule of `width` copies of `ch`.
    pub fn rule(&mut self, ch: char, width: usize) {
        self.lines.push(ch.to_string().repeat(width));
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every line terminated by `\n`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory or file cannot be written.
    pub fn write(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        fs::write(path, self.render()).map_err(|e| StorageError::io(path, e))?;
        debug!(path = %path.display(), lines = self.lines.len(), "transcript written");
        Ok(())
    }
}

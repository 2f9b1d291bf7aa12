use crate::error::{ProcessingError, ValidationError};
use crate::record::ProcessedRecord;
use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// Extensions accepted by the file picker and the processor (lowercase).
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Turns one image file into a record.
///
/// The controller only talks to this trait, so a real analysis backend can
/// replace [`MockProcessor`] without touching the rest of the pipeline.
pub trait ImageProcessor {
    fn process(&self, path: &Path) -> Result<ProcessedRecord, ProcessingError>;
}

/// Placeholder processor returning synthetic values next to real file facts.
#[derive(Debug, Clone, Default)]
pub struct MockProcessor {
    simulated_delay: Duration,
    fixed_timestamp: Option<NaiveDateTime>,
}

impl MockProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long per file, to make the blocking pass visible.
    pub fn with_simulated_delay(mut self, delay: Duration) -> Self {
        self.simulated_delay = delay;
        self
    }

    /// Stamp every record with `at` instead of the current local time.
    pub fn with_fixed_timestamp(mut self, at: NaiveDateTime) -> Self {
        self.fixed_timestamp = Some(at);
        self
    }

    pub fn set_simulated_delay(&mut self, delay: Duration) {
        self.simulated_delay = delay;
    }

    pub fn simulated_delay(&self) -> Duration {
        self.simulated_delay
    }

    fn timestamp(&self) -> String {
        match self.fixed_timestamp {
            Some(at) => at.format(TIMESTAMP_FORMAT).to_string(),
            None => Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

impl ImageProcessor for MockProcessor {
    fn process(&self, path: &Path) -> Result<ProcessedRecord, ProcessingError> {
        check_image_file(path)?;
        if !self.simulated_delay.is_zero() {
            thread::sleep(self.simulated_delay);
        }

        let metadata = fs::metadata(path).map_err(|source| ProcessingError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;
        let size_kb = (metadata.len() as f64 / 1024.0 * 100.0).round() / 100.0;

        let mut record = ProcessedRecord::with_filename(base_name(path));
        record.insert("file_path", path.to_string_lossy().into_owned());
        record.insert("file_size_kb", size_kb);
        record.insert("processed_timestamp", self.timestamp());
        // Placeholders until a real analysis step exists.
        record.insert("mock_width", 1920u32);
        record.insert("mock_height", 1080u32);
        record.insert("mock_detected_objects", "person, car, tree");
        record.insert("mock_confidence_score", 0.95);

        tracing::debug!("processed {}", path.display());
        Ok(record)
    }
}

/// Process `path` with the default [`MockProcessor`].
pub fn process_image(path: impl AsRef<Path>) -> Result<ProcessedRecord, ProcessingError> {
    MockProcessor::default().process(path.as_ref())
}

/// True if `path` has a supported extension and is an existing file.
/// The file is never opened.
pub fn validate_image_file(path: impl AsRef<Path>) -> bool {
    check_image_file(path.as_ref()).is_ok()
}

/// Like [`validate_image_file`] but reports why the path was rejected.
pub fn check_image_file(path: &Path) -> Result<(), ValidationError> {
    if !is_supported_image(path) {
        return Err(ValidationError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(ValidationError::NotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Final path component as text, or the whole path when there is none.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

//! Select image files, run a per-file processing step, export the rows to CSV.
//!
//! The processing step is a placeholder ([`MockProcessor`]); swap in another
//! [`ImageProcessor`] to do real analysis. The [`Controller`] drives any
//! [`UiSurface`] and is usable without a display.

pub mod controller;
pub mod error;
pub mod exporter;
pub mod processor;
pub mod record;
pub mod settings;
pub mod surface;

pub use controller::{Controller, Phase, ProcessSummary};
pub use error::{ExportError, ProcessingError, ValidationError};
pub use exporter::{export_to_csv, validate_data, with_csv_extension};
pub use processor::{
    ImageProcessor, MockProcessor, SUPPORTED_EXTENSIONS, base_name, check_image_file,
    process_image, validate_image_file,
};
pub use record::{FILENAME_FIELD, FieldValue, ProcessedRecord};
pub use settings::{MAX_SIMULATED_DELAY_MS, SessionSettings};
pub use surface::{Action, Notice, NoticeLevel, UiSurface};

use std::time::Duration;

/// Upper bound for the mock delay. Processing blocks the window, so larger
/// values would freeze it for too long.
pub const MAX_SIMULATED_DELAY_MS: u64 = 1000;

/// In-memory settings for one session. Nothing is written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// File name proposed by the save dialog.
    pub default_export_name: String,
    /// Artificial per-file delay of the mock processor, in milliseconds.
    /// Capped at [`MAX_SIMULATED_DELAY_MS`].
    pub simulated_delay_ms: u64,
    /// Show an info notice after a successful processing pass or export.
    pub announce_success: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_export_name: "processed_images.csv".to_string(),
            simulated_delay_ms: 0,
            announce_success: true,
        }
    }
}

impl SessionSettings {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms.min(MAX_SIMULATED_DELAY_MS))
    }

    /// Falls back to the default name when the field was cleared.
    pub fn export_name(&self) -> &str {
        let trimmed = self.default_export_name.trim();
        if trimmed.is_empty() {
            "processed_images.csv"
        } else {
            trimmed
        }
    }
}

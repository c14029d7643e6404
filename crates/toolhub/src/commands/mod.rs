pub mod blog;
pub mod seo;
pub mod users;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::prelude::{eprintln, *};
use toolhub::service::ServiceConfig;
use toolhub::storage::{FileSlots, MemorySlots, Slots};

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Directory holding the stored collections
    #[clap(long, env = "TOOLHUB_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Artificial delay applied to every service call, in milliseconds
    #[clap(long, env = "TOOLHUB_LATENCY_MS", global = true, default_value = "500")]
    latency_ms: u64,

    /// Keep everything in memory and start from seed data
    #[clap(long, global = true, default_value = "false")]
    ephemeral: bool,

    /// Whether to display additional information.
    #[clap(long, env = "TOOLHUB_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    pub fn config(&self) -> ServiceConfig {
        ServiceConfig::with_latency(Duration::from_millis(self.latency_ms))
    }

    /// Storage backend selected by the global flags
    pub fn slots(&self) -> Result<Arc<dyn Slots>> {
        if self.ephemeral {
            if self.verbose {
                eprintln!("Using in-memory storage");
            }
            return Ok(Arc::new(MemorySlots::new()));
        }

        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => FileSlots::default_dir().map_err(|e| eyre!("{}", e))?,
        };

        if self.verbose {
            eprintln!("Data directory: {}", dir.display());
            eprintln!("Latency: {}ms", self.latency_ms);
            eprintln!();
        }

        Ok(Arc::new(FileSlots::new(dir)))
    }
}

/// Convert any serializable output to pretty JSON
pub fn format_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Shorten text for table cells
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_short() {
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn test_truncate_text_long() {
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_truncate_text_multibyte() {
        assert_eq!(truncate_text("ééééé", 2), "éé...");
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&vec![1, 2]).unwrap();
        assert!(json.contains("1,\n"));
    }
}

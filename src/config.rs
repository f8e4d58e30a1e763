//! Configuration management

use anyhow::{self, Context, Result};

/// Digits below which a cleaned phone cannot identify a contact.
/// Overridable via `MIN_PHONE_DIGITS`.
pub const DEFAULT_MIN_PHONE_DIGITS: usize = 10;

/// Rows between progress pushes to the job store.
pub const DEFAULT_PROGRESS_ROW_INTERVAL: usize = 1000;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where output artifacts are written
    pub output_dir: String,

    /// Minimum digit count for a cleaned phone to be considered valid
    pub min_phone_digits: usize,

    /// Progress is pushed to the job store every this many rows
    pub progress_row_interval: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let output_dir = std::env::var("OUTPUT_DIR")
            .unwrap_or_else(|_| "output".to_string());

        let min_phone_digits = match std::env::var("MIN_PHONE_DIGITS") {
            Ok(v) => v.parse::<usize>()
                .context("MIN_PHONE_DIGITS must be a positive integer")?,
            Err(_) => DEFAULT_MIN_PHONE_DIGITS,
        };
        if min_phone_digits == 0 {
            anyhow::bail!("MIN_PHONE_DIGITS must be at least 1");
        }

        let progress_row_interval = match std::env::var("PROGRESS_ROW_INTERVAL") {
            Ok(v) => v.parse::<usize>()
                .context("PROGRESS_ROW_INTERVAL must be a positive integer")?,
            Err(_) => DEFAULT_PROGRESS_ROW_INTERVAL,
        };
        if progress_row_interval == 0 {
            anyhow::bail!("PROGRESS_ROW_INTERVAL must be at least 1");
        }

        Ok(Self {
            output_dir,
            min_phone_digits,
            progress_row_interval,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: "output".to_string(),
            min_phone_digits: DEFAULT_MIN_PHONE_DIGITS,
            progress_row_interval: DEFAULT_PROGRESS_ROW_INTERVAL,
        }
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable pointing at an alternative settings file.
pub const SETTINGS_ENV: &str = "RUSTY_BASELINE_SETTINGS";
const DEFAULT_FILE: &str = "rusty-baseline.json";

/// Tunables read once at startup. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Right-click removal radius as a fraction of the visible x-span.
    pub removal_radius_fraction: f64,
    /// Number of points used to draw the fit line.
    pub fit_line_samples: usize,
    /// Digits after the decimal point in exported files.
    pub export_decimals: usize,
    /// Initial window size in logical pixels.
    pub window_size: [f32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            removal_radius_fraction: 0.05,
            fit_line_samples: 500,
            export_decimals: 8,
            window_size: [1000.0, 700.0],
        }
    }
}

impl Settings {
    /// Load from `$RUSTY_BASELINE_SETTINGS` or `./rusty-baseline.json`,
    /// falling back to defaults on any problem.
    pub fn load() -> Self {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));

        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings.sanitized())
    }

    /// Clamp values that would make the UI misbehave.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.removal_radius_fraction.is_finite() && self.removal_radius_fraction > 0.0) {
            log::warn!(
                "removal_radius_fraction {} is invalid, using {}",
                self.removal_radius_fraction,
                defaults.removal_radius_fraction
            );
            self.removal_radius_fraction = defaults.removal_radius_fraction;
        }
        self.fit_line_samples = self.fit_line_samples.max(2);
        self.export_decimals = self.export_decimals.min(17);
        if !self.window_size.iter().all(|v| v.is_finite() && *v >= 200.0) {
            self.window_size = defaults.window_size;
        }
        self
    }
}

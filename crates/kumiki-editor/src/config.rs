//! Editor configuration loaded from RON files.
//!
//! Every field has a default, so an empty `()` file is valid and partial
//! files override only what they name:
//!
//! ```ron
//! (
//!     grid_cell: 16.0,
//!     disconnect_threshold: 3.0,
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use kumiki_types::Position;

/// Errors from loading an [`EditorConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// EDITOR CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Screen units per grid cell.
    #[serde(default = "default_grid_cell")]
    pub grid_cell: f64,

    /// Plug-to-socket distance (grid cells) at which a dragged block tears off.
    #[serde(default = "default_disconnect_threshold")]
    pub disconnect_threshold: f64,

    /// How long a freshly connected socket stays highlighted.
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,

    /// Where loaded programs are laid out.
    #[serde(default = "default_origin")]
    pub origin: Position,
}

fn default_grid_cell() -> f64 {
    10.0
}
fn default_disconnect_threshold() -> f64 {
    kumiki_graph::DEFAULT_DISCONNECT_DISTANCE
}
fn default_highlight_ms() -> u64 {
    500
}
fn default_origin() -> Position {
    Position::new(1, 1)
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_cell: default_grid_cell(),
            disconnect_threshold: default_disconnect_threshold(),
            highlight_ms: default_highlight_ms(),
            origin: default_origin(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a RON document.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_ron(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded editor config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid_cell.is_finite() && self.grid_cell > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid_cell must be positive, got {}",
                self.grid_cell
            )));
        }
        if !(self.disconnect_threshold.is_finite() && self.disconnect_threshold > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "disconnect_threshold must be positive, got {}",
                self.disconnect_threshold
            )));
        }
        Ok(())
    }

    pub fn highlight_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.highlight_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EditorConfig::from_ron("()").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.grid_cell, 10.0);
        assert_eq!(config.disconnect_threshold, 2.0);
        assert_eq!(config.highlight_ms, 500);
        assert_eq!(config.origin, Position::new(1, 1));
    }

    #[test]
    fn test_partial_override() {
        let config = EditorConfig::from_ron("(grid_cell: 16.0, origin: (x: 4, y: 0))").unwrap();
        assert_eq!(config.grid_cell, 16.0);
        assert_eq!(config.origin, Position::new(4, 0));
        assert_eq!(config.disconnect_threshold, 2.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EditorConfig::from_ron("(grid_cell: 0.0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = EditorConfig::from_ron("(disconnect_threshold: -1.0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = EditorConfig::from_ron("(grid_cell: \"ten\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(highlight_ms: 250)").unwrap();

        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.highlight_ms, 250);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            EditorConfig::load(&missing),
            Err(ConfigError::Io { .. })
        ));
    }
}

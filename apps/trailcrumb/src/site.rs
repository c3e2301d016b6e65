//! # Site Loading
//!
//! A [`Site`] bundles the content graph and settings the binary serves
//! trails from. It is loaded once at startup and never mutated.

use std::path::{Path, PathBuf};
use trailcrumb_core::{Settings, SiteGraph, TrailError, site_from_json};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a site fixture (50 MB).
const MAX_SITE_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Maximum size of a settings or request file (1 MB).
pub const MAX_SMALL_FILE_SIZE: u64 = 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), TrailError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| TrailError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(TrailError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve a user-supplied path to an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, TrailError> {
    let canonical = path
        .canonicalize()
        .map_err(|e| TrailError::Io(format!("Invalid file path '{}': {}", path.display(), e)))?;

    if !canonical.is_file() {
        return Err(TrailError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read a user-supplied file after path and size validation.
pub fn read_input_file(path: &Path, max_size: u64) -> Result<String, TrailError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, max_size)?;
    std::fs::read_to_string(&validated)
        .map_err(|e| TrailError::Io(format!("Cannot read '{}': {}", path.display(), e)))
}

// =============================================================================
// SITE
// =============================================================================

/// Content graph plus settings.
#[derive(Debug, Clone)]
pub struct Site {
    pub graph: SiteGraph,
    pub settings: Settings,
}

impl Site {
    #[must_use]
    pub fn new(graph: SiteGraph, settings: Settings) -> Self {
        Self { graph, settings }
    }

    /// Load the site fixture and, when given, the settings file.
    ///
    /// A settings path that does not exist falls back to defaults.
    pub fn load(site_path: &Path, settings_path: Option<&Path>) -> Result<Self, TrailError> {
        let json = read_input_file(site_path, MAX_SITE_FILE_SIZE)?;
        let graph = site_from_json(&json)?;

        let settings = match settings_path {
            Some(path) if path.exists() => {
                Settings::from_toml_str(&read_input_file(path, MAX_SMALL_FILE_SIZE)?)?
            }
            Some(path) => {
                tracing::info!("Settings file {:?} not found, using defaults", path);
                Settings::default()
            }
            None => Settings::default(),
        };

        tracing::info!(
            items = graph.item_count(),
            terms = graph.term_count(),
            "Loaded site from {:?}",
            site_path
        );

        Ok(Self::new(graph, settings))
    }
}

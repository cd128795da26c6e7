// LogSift - platform/config.rs
//
// Platform-specific configuration, directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogSift configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logsift/ or %APPDATA%\LogSift\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Location of `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[mapping]` section.
    pub mapping: MappingSection,
    /// `[scan]` section.
    pub scan: ScanSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[mapping]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct MappingSection {
    /// Directory containing `mapping_table<N>` files.
    pub directory: Option<String>,
}

/// `[scan]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ScanSection {
    /// Scan steps performed per GUI frame.
    pub steps_per_frame: Option<usize>,
    /// Lines shown either side of a selected match.
    pub context_radius: Option<u64>,
    /// Expression used by the "Auto" search mode.
    pub auto_search_term: Option<String>,
    /// Accepted log file extensions.
    pub file_extensions: Option<Vec<String>>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Mapping --
    /// Directory searched for mapping tables. `None` = next to the executable.
    pub mapping_dir: Option<PathBuf>,

    // -- Scan --
    pub steps_per_frame: usize,
    pub context_radius: u64,
    pub auto_search_term: String,
    /// Lower-case extensions without the leading dot.
    pub file_extensions: Vec<String>,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mapping_dir: None,
            steps_per_frame: constants::DEFAULT_STEPS_PER_FRAME,
            context_radius: constants::DEFAULT_CONTEXT_RADIUS,
            auto_search_term: constants::DEFAULT_AUTO_SEARCH_TERM.to_string(),
            file_extensions: constants::DEFAULT_FILE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning;
/// the application still starts but the user is informed.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match read_raw(config_path) {
        Ok(raw) => {
            tracing::info!(path = %config_path.display(), "Loaded config.toml");
            validate(raw)
        }
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

fn read_raw(config_path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
        path: config_path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source: e,
    })
}

/// Validate each field against named constants, accumulating all warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Mapping: directory --
    if let Some(dir) = raw.mapping.directory {
        if dir.trim().is_empty() {
            warnings.push(
                "[mapping] directory is empty. Using the data directory next to the executable."
                    .to_string(),
            );
        } else {
            config.mapping_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Scan: steps_per_frame --
    if let Some(steps) = raw.scan.steps_per_frame {
        if (constants::MIN_STEPS_PER_FRAME..=constants::MAX_STEPS_PER_FRAME).contains(&steps) {
            config.steps_per_frame = steps;
        } else {
            warnings.push(format!(
                "[scan] steps_per_frame = {steps} is out of range ({}-{}). Using default ({}).",
                constants::MIN_STEPS_PER_FRAME,
                constants::MAX_STEPS_PER_FRAME,
                constants::DEFAULT_STEPS_PER_FRAME,
            ));
        }
    }

    // -- Scan: context_radius --
    if let Some(radius) = raw.scan.context_radius {
        if radius <= constants::MAX_CONTEXT_RADIUS {
            config.context_radius = radius;
        } else {
            warnings.push(format!(
                "[scan] context_radius = {radius} is out of range (0-{}). Using default ({}).",
                constants::MAX_CONTEXT_RADIUS,
                constants::DEFAULT_CONTEXT_RADIUS,
            ));
        }
    }

    // -- Scan: auto_search_term --
    if let Some(term) = raw.scan.auto_search_term {
        if term.trim().is_empty() {
            warnings.push(format!(
                "[scan] auto_search_term is empty. Using default (\"{}\").",
                constants::DEFAULT_AUTO_SEARCH_TERM,
            ));
        } else {
            config.auto_search_term = term.trim().to_string();
        }
    }

    // -- Scan: file_extensions --
    if let Some(exts) = raw.scan.file_extensions {
        let cleaned: Vec<String> = exts
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        if cleaned.is_empty() {
            warnings.push(format!(
                "[scan] file_extensions has no usable entries. Using default ({}).",
                constants::DEFAULT_FILE_EXTENSIONS.join(", "),
            ));
        } else {
            config.file_extensions = cleaned;
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_text: &str) -> (AppConfig, Vec<String>) {
        validate(toml::from_str(toml_text).unwrap())
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let (config, warnings) = parse("");
        assert!(warnings.is_empty());
        assert_eq!(config.steps_per_frame, constants::DEFAULT_STEPS_PER_FRAME);
        assert_eq!(config.auto_search_term, "ALARM");
        assert_eq!(config.file_extensions, vec!["log".to_string()]);
        assert!(config.mapping_dir.is_none());
    }

    #[test]
    fn test_valid_values_applied() {
        let (config, warnings) = parse(
            r#"
            [mapping]
            directory = "/opt/maps"

            [scan]
            steps_per_frame = 50
            context_radius = 3
            auto_search_term = " FAULT "
            file_extensions = [".LOG", "txt"]

            [logging]
            level = "debug"
            "#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.mapping_dir, Some(PathBuf::from("/opt/maps")));
        assert_eq!(config.steps_per_frame, 50);
        assert_eq!(config.context_radius, 3);
        assert_eq!(config.auto_search_term, "FAULT");
        assert_eq!(config.file_extensions, vec!["log", "txt"]);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_fall_back() {
        let (config, warnings) = parse(
            r#"
            [scan]
            steps_per_frame = 0
            context_radius = 1000
            file_extensions = ["", "  "]

            [logging]
            level = "loud"
            "#,
        );
        assert_eq!(warnings.len(), 4);
        assert_eq!(config.steps_per_frame, constants::DEFAULT_STEPS_PER_FRAME);
        assert_eq!(config.context_radius, constants::DEFAULT_CONTEXT_RADIUS);
        assert_eq!(config.file_extensions, vec!["log".to_string()]);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (_, warnings) = parse("[future]\nthing = 1\n[scan]\nnew_key = true\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_file_is_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let (_, warnings) = load_config(&dir.path().join("config.toml"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unparseable_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scan\nsteps = ").unwrap();
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.steps_per_frame, constants::DEFAULT_STEPS_PER_FRAME);
    }
}

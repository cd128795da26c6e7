// LogSift - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogSift operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogSiftError {
    /// Mapping table could not be located or read.
    Mapping(LoadError),

    /// A scan could not start or failed mid-way.
    Scan(ScanError),

    /// Context around a match could not be read.
    Extract(ExtractError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for LogSiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping(e) => write!(f, "Mapping table error: {e}"),
            Self::Scan(e) => write!(f, "Scan error: {e}"),
            Self::Extract(e) => write!(f, "Context error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for LogSiftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mapping(e) => Some(e),
            Self::Scan(e) => Some(e),
            Self::Extract(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping table load errors
// ---------------------------------------------------------------------------

/// Errors raised while locating or reading the mapping table.
///
/// Never fatal: the caller degrades to an empty table and surfaces a warning.
#[derive(Debug)]
pub enum LoadError {
    /// No `mapping_table<N>` file exists in the mapping directory.
    NoSourceFound { dir: PathBuf },

    /// The file extension is neither `.xlsx` nor `.csv`.
    UnsupportedFormat { path: PathBuf },

    /// The workbook could not be opened or a sheet could not be read.
    Workbook {
        path: PathBuf,
        source: calamine::Error,
    },

    /// The workbook has no sheet with the required name.
    MissingSheet { path: PathBuf, sheet: &'static str },

    /// A required header label is absent.
    MissingColumn { path: PathBuf, column: &'static str },

    /// CSV decoding failed.
    Csv { path: PathBuf, source: csv::Error },

    /// I/O error reading the mapping directory or file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSourceFound { dir } => write!(
                f,
                "No valid mapping_tableNNNN.xlsx or .csv file found in '{}'",
                dir.display()
            ),
            Self::UnsupportedFormat { path } => write!(
                f,
                "'{}' is not a supported mapping table format (expected .xlsx or .csv)",
                path.display()
            ),
            Self::Workbook { path, source } => {
                write!(f, "Cannot read workbook '{}': {source}", path.display())
            }
            Self::MissingSheet { path, sheet } => {
                write!(f, "Workbook '{}' has no sheet '{sheet}'", path.display())
            }
            Self::MissingColumn { path, column } => write!(
                f,
                "Mapping table '{}' is missing required column '{column}'",
                path.display()
            ),
            Self::Csv { path, source } => {
                write!(f, "Cannot parse CSV '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Workbook { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for LogSiftError {
    fn from(e: LoadError) -> Self {
        Self::Mapping(e)
    }
}

// ---------------------------------------------------------------------------
// Scan errors
// ---------------------------------------------------------------------------

/// Errors related to starting or running a scan.
#[derive(Debug)]
pub enum ScanError {
    /// The file list was empty.
    NoFiles,

    /// The search expression has no non-blank term.
    EmptySearch,

    /// A file could not be opened while counting lines; no session exists.
    Unreadable { path: PathBuf, source: io::Error },

    /// A file became unreadable after the scan started.
    ReadFailed { path: PathBuf, source: io::Error },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFiles => write!(f, "No log files selected"),
            Self::EmptySearch => write!(f, "Please enter an error code or search text"),
            Self::Unreadable { path, source } => {
                write!(f, "Cannot open '{}': {source}", path.display())
            }
            Self::ReadFailed { path, source } => write!(
                f,
                "'{}' became unreadable during the scan: {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            Self::ReadFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ScanError> for LogSiftError {
    fn from(e: ScanError) -> Self {
        Self::Scan(e)
    }
}

// ---------------------------------------------------------------------------
// Context extraction errors
// ---------------------------------------------------------------------------

/// Errors raised while reading the lines around a match.
#[derive(Debug)]
pub enum ExtractError {
    /// The file no longer exists.
    NotFound { path: PathBuf },

    /// Any other read failure.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "File not found: '{}'", path.display()),
            Self::Io { path, source } => {
                write!(f, "Error reading file '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ExtractError> for LogSiftError {
    fn from(e: ExtractError) -> Self {
        Self::Extract(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed maximum record count.
    TooManyRecords { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyRecords { count, max } => write!(
                f,
                "Export of {count} matches exceeds maximum of {max}. \
                 Narrow the search expression to reduce the result set."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for LogSiftError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for LogSiftError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogSift results.
pub type Result<T> = std::result::Result<T, LogSiftError>;

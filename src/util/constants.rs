// LogSift - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogSift";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogSift";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Mapping table
// =============================================================================

/// Directory (next to the executable) searched for mapping tables when
/// `[mapping] directory` is not configured.
pub const DEFAULT_MAPPING_DIR_NAME: &str = "data";

/// File stem prefix of a mapping table. The numeric suffix is the version,
/// e.g. `mapping_table0042.xlsx`.
pub const MAPPING_FILE_PREFIX: &str = "mapping_table";

/// Worksheet holding the mapping rows in `.xlsx` sources.
pub const MAPPING_SHEET_NAME: &str = "Sample";

/// Header label of the error code column.
pub const COLUMN_ERR_CODE: &str = "Err Code";

/// Header label of the cause column.
pub const COLUMN_CAUSE: &str = "Cause";

/// Header label of the corrective action column.
pub const COLUMN_ACTION: &str = "Action";

/// Cause reported when the matched row has no cause even after forward-fill.
pub const NO_CAUSE_TEXT: &str = "None";

/// Actions text reported when a cause has no non-empty corrective actions.
pub const NO_ACTION_TEXT: &str = "No corrective action available.";

// =============================================================================
// Scanning
// =============================================================================

/// Number of `step` calls the GUI performs per frame while a scan is active.
/// Each step is bounded (one line or one file-open), so this caps frame time.
pub const DEFAULT_STEPS_PER_FRAME: usize = 2_000;

/// Minimum user-configurable steps per frame.
pub const MIN_STEPS_PER_FRAME: usize = 1;

/// Maximum user-configurable steps per frame.
pub const MAX_STEPS_PER_FRAME: usize = 100_000;

/// Search expression used by the "Auto" search mode.
pub const DEFAULT_AUTO_SEARCH_TERM: &str = "ALARM";

/// Extensions (without dot, case-insensitive) accepted for scanning.
pub const DEFAULT_FILE_EXTENSIONS: &[&str] = &["log"];

/// Characters that split a search expression into OR-combined terms.
pub const SEARCH_TERM_DELIMITERS: &[char] = &[',', ';'];

// =============================================================================
// Context view
// =============================================================================

/// Lines shown either side of a selected match.
pub const DEFAULT_CONTEXT_RADIUS: u64 = 5;

/// Maximum user-configurable context radius.
pub const MAX_CONTEXT_RADIUS: u64 = 100;

/// Prefix of the target line in a rendered context block.
pub const CONTEXT_TARGET_MARKER: &str = ">>> ";

/// Prefix of every other line in a rendered context block.
pub const CONTEXT_PLAIN_MARKER: &str = "    ";

// =============================================================================
// Export
// =============================================================================

/// Maximum number of match records that can be exported in one operation.
pub const MAX_EXPORT_RECORDS: usize = 5_000_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

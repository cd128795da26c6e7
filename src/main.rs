// LogSift - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration and logging initialisation (debug mode support)
// 3. One-time mapping table load
// 4. Headless search / lookup / context, or eframe GUI launch

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::ui::...` etc.
pub use logsift::app;
pub use logsift::core;
pub use logsift::platform;
pub use logsift::ui;
pub use logsift::util;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::model::ResolveResult;
use crate::platform::config::AppConfig;

/// LogSift - search log files for error codes and look up their causes.
///
/// Without an action flag the GUI opens. With `--search`, `--auto`,
/// `--lookup` or `--context` the tool runs in the terminal.
#[derive(Parser, Debug)]
#[command(name = "LogSift", version, about)]
struct Cli {
    /// Log files to scan.
    files: Vec<PathBuf>,

    /// Search expression; several terms separated by ',' or ';'.
    #[arg(short = 's', long = "search", conflicts_with = "auto")]
    search: Option<String>,

    /// Search for the configured auto term (default "ALARM").
    #[arg(short = 'a', long = "auto")]
    auto: bool,

    /// Look up an error code in the mapping table.
    #[arg(short = 'l', long = "lookup", value_name = "CODE")]
    lookup: Option<String>,

    /// Print the lines around LINE of the single given file.
    #[arg(short = 'c', long = "context", value_name = "LINE")]
    context: Option<u64>,

    /// Write the matches to PATH (.json for JSON, anything else CSV).
    #[arg(short = 'e', long = "export", value_name = "PATH")]
    export: Option<PathBuf>,

    /// Directory containing mapping_table<N>.xlsx / .csv.
    #[arg(short = 'm', long = "mapping-dir", value_name = "DIR")]
    mapping_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    fn is_headless(&self) -> bool {
        self.search.is_some() || self.auto || self.lookup.is_some() || self.context.is_some()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_file());

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );
    for w in &config_warnings {
        tracing::warn!("{}", w);
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LogSift starting"
    );

    // Mapping directory: CLI override > config > next to the executable.
    let mapping_dir = cli
        .mapping_dir
        .clone()
        .or_else(|| config.mapping_dir.clone())
        .unwrap_or_else(platform::mapping_source::default_mapping_dir);
    let mapping = app::mapping_store::global()
        .get_or_init(|| platform::mapping_source::load_from_dir(&mapping_dir));

    if cli.is_headless() {
        return run_headless(&cli, &config, mapping);
    }

    let mut state = app::state::AppState::new(config, mapping, cli.debug);
    state.warnings.extend(config_warnings);
    if !cli.files.is_empty() {
        state.select_files(cli.files.clone());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_ID,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::LogSiftApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LogSift GUI: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Terminal mode. Each requested action runs in turn; any failure makes the
/// exit code non-zero.
fn run_headless(
    cli: &Cli,
    config: &AppConfig,
    mapping: &app::mapping_store::LoadedMapping,
) -> ExitCode {
    let mut ok = true;

    if let Some(code) = &cli.lookup {
        ok &= print_lookup(mapping, code);
    }

    let raw_search = match (&cli.search, cli.auto) {
        (Some(raw), _) => Some(raw.clone()),
        (None, true) => Some(config.auto_search_term.clone()),
        (None, false) => None,
    };
    if let Some(raw) = raw_search {
        ok &= report(run_search(cli, config, &raw));
    }

    if let Some(line) = cli.context {
        ok &= report(print_context(cli, config, line));
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_lookup(mapping: &app::mapping_store::LoadedMapping, code: &str) -> bool {
    let result = crate::core::resolver::resolve(&mapping.table, code);
    match &result {
        ResolveResult::TableUnavailable => {
            let reason = mapping.warning.as_deref().unwrap_or("Mapping table not loaded");
            eprintln!("Error: {reason}");
            return false;
        }
        ResolveResult::InvalidInput => {
            eprintln!("Error: Please enter an error code.");
            return false;
        }
        ResolveResult::NotFound | ResolveResult::Found { .. } => {}
    }
    let (cause, actions) = result.display_texts();
    println!("Cause:\n{cause}\n");
    println!("Corrective Actions:\n{actions}");
    true
}

fn run_search(cli: &Cli, config: &AppConfig, raw: &str) -> util::error::Result<bool> {
    let outcome = app::headless::search(cli.files.clone(), config, raw)?;

    for m in &outcome.matches {
        println!("{}:{}: {}", m.file_path.display(), m.line_number, m.text);
    }
    eprintln!("{} match(es)", outcome.matches.len());

    if let Some(dest) = &cli.export {
        let n = app::headless::export_matches(&outcome.matches, dest)?;
        eprintln!("Exported {n} match(es) to {}", dest.display());
    }
    if let Some(error) = outcome.failure {
        return Err(error.into());
    }
    Ok(true)
}

fn print_context(cli: &Cli, config: &AppConfig, line: u64) -> util::error::Result<bool> {
    let [file] = cli.files.as_slice() else {
        eprintln!("Error: --context needs exactly one log file");
        return Ok(false);
    };
    let block = app::headless::context_for(file, line, config)?;
    println!("{block}");
    Ok(true)
}

/// Fold a headless result into a success flag, printing any error.
fn report(result: util::error::Result<bool>) -> bool {
    match result {
        Ok(ok) => ok,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            false
        }
    }
}

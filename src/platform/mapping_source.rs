// LogSift - platform/mapping_source.rs
//
// Locates the newest mapping table file and reads its rows.
//
// File naming: `mapping_table<N>.xlsx` or `mapping_table<N>.csv`, where the
// highest numeric <N> in the directory wins. Workbooks are read from the
// `Sample` sheet; CSV files use their header row. Either way the header must
// carry `Err Code`, `Cause` and `Action` (labels trimmed, case-sensitive).

use crate::core::mapping::MappingTable;
use crate::core::model::{MappingSourceInfo, RawMappingRecord};
use crate::util::constants;
use crate::util::error::LoadError;
use calamine::{open_workbook_auto, Data, Reader};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Pick the highest-versioned mapping table file in `dir`.
pub fn locate_latest(dir: &Path) -> Result<MappingSourceInfo, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let pattern = format!(
        r"^{}(\d+)\.(?i:xlsx|csv)$",
        regex::escape(constants::MAPPING_FILE_PREFIX)
    );
    // Built from constants; a failure is reported as no source found.
    let Ok(re) = Regex::new(&pattern) else {
        tracing::error!(pattern, "Invalid mapping file pattern");
        return Err(LoadError::NoSourceFound {
            dir: dir.to_path_buf(),
        });
    };

    let mut best: Option<MappingSourceInfo> = None;
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(version) = re
            .captures(name)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
        else {
            continue;
        };

        tracing::trace!(file = name, version, "Mapping table candidate");
        if best.as_ref().map_or(true, |b| version > b.version) {
            best = Some(MappingSourceInfo {
                path: entry.path(),
                version,
            });
        }
    }

    best.ok_or_else(|| LoadError::NoSourceFound {
        dir: dir.to_path_buf(),
    })
}

/// Locate and read the newest mapping table in `dir`.
pub fn load_from_dir(dir: &Path) -> Result<MappingTable, LoadError> {
    let source = locate_latest(dir)?;
    let records = read_records(&source.path)?;
    let table = MappingTable::from_records(records).with_source(source.clone());
    tracing::info!(
        file = %source.file_name(),
        version = source.version,
        rows = table.len(),
        "Loaded mapping table"
    );
    Ok(table)
}

/// Read raw rows from a workbook or CSV file, chosen by extension.
pub fn read_records(path: &Path) -> Result<Vec<RawMappingRecord>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("xlsx") => read_workbook(path),
        Some("csv") => read_csv(path),
        _ => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Column positions of the three required headers.
#[derive(Debug, Clone, Copy)]
struct Columns {
    code: usize,
    cause: usize,
    action: usize,
}

impl Columns {
    fn locate<I>(headers: I, path: &Path) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let headers: Vec<Option<String>> = headers.into_iter().collect();
        let find = |label: &'static str| {
            headers
                .iter()
                .position(|h| h.as_deref().map(str::trim) == Some(label))
                .ok_or_else(|| LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column: label,
                })
        };
        Ok(Self {
            code: find(constants::COLUMN_ERR_CODE)?,
            cause: find(constants::COLUMN_CAUSE)?,
            action: find(constants::COLUMN_ACTION)?,
        })
    }

    fn record<F>(&self, cell: F) -> RawMappingRecord
    where
        F: Fn(usize) -> Option<String>,
    {
        RawMappingRecord {
            err_code: cell(self.code),
            cause: cell(self.cause),
            action: cell(self.action),
        }
    }
}

fn read_workbook(path: &Path) -> Result<Vec<RawMappingRecord>, LoadError> {
    let wb_err = |source| LoadError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(wb_err)?;
    if !workbook
        .sheet_names()
        .iter()
        .any(|s| s == constants::MAPPING_SHEET_NAME)
    {
        return Err(LoadError::MissingSheet {
            path: path.to_path_buf(),
            sheet: constants::MAPPING_SHEET_NAME,
        });
    }
    let range = workbook
        .worksheet_range(constants::MAPPING_SHEET_NAME)
        .map_err(wb_err)?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: constants::COLUMN_ERR_CODE,
        });
    };
    let columns = Columns::locate(header.iter().map(cell_text), path)?;

    Ok(rows
        .map(|row| columns.record(|i| row.get(i).and_then(cell_text)))
        .collect())
}

fn read_csv(path: &Path) -> Result<Vec<RawMappingRecord>, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = Columns::locate(headers.iter().map(|h| Some(h.to_string())), path)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        records.push(columns.record(|i| {
            row.get(i)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }));
    }
    Ok(records)
}

/// String form of a workbook cell; `None` for empty cells.
///
/// Whole-number floats render without a fractional part so numeric error
/// codes such as `1001` match what the operator types.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}

/// Directory searched when no mapping directory is configured: `data/` next
/// to the running executable, or under the current directory as a fallback.
pub fn default_mapping_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(constants::DEFAULT_MAPPING_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_locate_latest_picks_highest_version() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "mapping_table0003.csv",
            "mapping_table12.xlsx",
            "mapping_table0010.csv",
            "mapping_table_old.csv",
            "notes.txt",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let found = locate_latest(dir.path()).unwrap();
        assert_eq!(found.version, 12);
        assert_eq!(found.file_name(), "mapping_table12.xlsx");
    }

    #[test]
    fn test_locate_latest_without_candidates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mapping.xlsx"), "").unwrap();
        assert!(matches!(
            locate_latest(dir.path()),
            Err(LoadError::NoSourceFound { .. })
        ));
    }

    #[test]
    fn test_read_csv_with_padded_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping_table1.csv");
        fs::write(
            &path,
            " Err Code ,Cause,Action\nE001,Power Fail, Restart PSU \n,,Check Fuse\n",
        )
        .unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            RawMappingRecord::new(Some("E001"), Some("Power Fail"), Some(" Restart PSU "))
        );
        assert_eq!(records[1], RawMappingRecord::new(None, None, Some("Check Fuse")));
    }

    #[test]
    fn test_read_csv_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping_table1.csv");
        fs::write(&path, "Err Code,Reason,Action\nE1,x,y\n").unwrap();
        assert!(matches!(
            read_records(&path),
            Err(LoadError::MissingColumn { column: "Cause", .. })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            read_records(Path::new("/tmp/mapping_table1.ods")),
            Err(LoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_cell_text_numbers() {
        assert_eq!(cell_text(&Data::Float(1001.0)).as_deref(), Some("1001"));
        assert_eq!(cell_text(&Data::Int(7)).as_deref(), Some("7"));
        assert_eq!(cell_text(&Data::Empty), None);
    }
}

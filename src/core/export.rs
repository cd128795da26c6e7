// LogSift - core/export.rs
//
// CSV and JSON export of scan matches.
// Core layer: writes to any Write trait object.

use crate::core::model::MatchRecord;
use crate::util::constants::MAX_EXPORT_RECORDS;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export format, chosen by the destination's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` selects JSON; anything else is CSV.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Export matches to CSV format.
///
/// Writes: file, path, line, text
pub fn export_csv<W: Write>(
    records: &[MatchRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_size(records)?;
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["file", "path", "line", "text"])
        .map_err(csv_err)?;

    for record in records {
        csv_writer
            .write_record([
                record.file_display_name.as_str(),
                &record.file_path.display().to_string(),
                &record.line_number.to_string(),
                &record.text,
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export matches to JSON format (array of objects).
pub fn export_json<W: Write>(
    records: &[MatchRecord],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_size(records)?;
    serde_json::to_writer_pretty(&mut writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    // A buffered writer only reports a full disk on flush.
    writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

/// Create `path` and write `records` in the format its extension implies.
pub fn export_to_file(records: &[MatchRecord], path: &Path) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);

    let count = match ExportFormat::for_path(path) {
        ExportFormat::Csv => export_csv(records, writer, path)?,
        ExportFormat::Json => export_json(records, writer, path)?,
    };
    tracing::info!(path = %path.display(), count, "Matches exported");
    Ok(count)
}

fn check_size(records: &[MatchRecord]) -> Result<(), ExportError> {
    if records.len() > MAX_EXPORT_RECORDS {
        return Err(ExportError::TooManyRecords {
            count: records.len(),
            max: MAX_EXPORT_RECORDS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_record(line: u64, text: &str) -> MatchRecord {
        MatchRecord {
            file_display_name: "app.log".to_string(),
            file_path: PathBuf::from("/var/log/app.log"),
            line_number: line,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_csv_export() {
        let records = vec![make_record(3, "ALARM one"), make_record(9, "ALARM, two")];
        let mut buf = Vec::new();
        let count = export_csv(&records, &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("file,path,line,text"));
        assert!(output.contains("app.log,/var/log/app.log,3,ALARM one"));
        assert!(output.contains("\"ALARM, two\""));
    }

    #[test]
    fn test_json_export() {
        let records = vec![make_record(1, "Test message")];
        let mut buf = Vec::new();
        let count = export_json(&records, &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 1);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["file"], "app.log");
        assert_eq!(value[0]["line"], 1);
        assert_eq!(value[0]["text"], "Test message");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_export_to_full_device_reports_error() {
        let records = vec![make_record(1, "ALARM")];
        let dir = tempfile::tempdir().unwrap();
        for name in ["out.json", "out.csv"] {
            let link = dir.path().join(name);
            std::os::unix::fs::symlink("/dev/full", &link).unwrap();
            let err = export_to_file(&records, &link).unwrap_err();
            assert!(matches!(err, ExportError::Io { .. }), "{name}: got {err:?}");
        }
    }

    #[test]
    fn test_format_for_path() {
        assert_eq!(ExportFormat::for_path(Path::new("x.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::for_path(Path::new("x.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::for_path(Path::new("x")), ExportFormat::Csv);
    }
}

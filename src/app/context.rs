// LogSift - app/context.rs
//
// Reads the lines surrounding a match for the context pane.
// The file is reopened on every call; nothing is cached between selections.

use crate::core::model::{ContextBlock, ContextLine};
use crate::platform::fs;
use crate::util::error::ExtractError;
use std::io;
use std::path::Path;

/// Return lines `line_number - radius ..= line_number + radius`, clamped to
/// the file, with the target line marked.
///
/// An out-of-range `line_number` narrows (possibly empties) the window rather
/// than failing.
pub fn extract(path: &Path, line_number: u64, radius: u64) -> Result<ContextBlock, ExtractError> {
    let lines = fs::read_lines_lossy(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ExtractError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ExtractError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let last = lines.len() as u64;
    let start = line_number.saturating_sub(radius).max(1);
    let end = line_number.saturating_add(radius).min(last);

    let window = if start <= end {
        lines
            .iter()
            .enumerate()
            .skip((start - 1) as usize)
            .take((end - start + 1) as usize)
            .map(|(idx, text)| {
                let n = idx as u64 + 1;
                ContextLine {
                    line_number: n,
                    text: text.trim_end().to_string(),
                    is_target: n == line_number,
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    tracing::debug!(
        file = %path.display(),
        line = line_number,
        shown = window.len(),
        "Context extracted"
    );

    Ok(ContextBlock {
        file_path: path.to_path_buf(),
        target_line: line_number,
        lines: window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn numbered_file(count: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for i in 1..=count {
            writeln!(file, "line {i}   ").unwrap();
        }
        file
    }

    #[test]
    fn test_window_clamped_to_small_file() {
        let file = numbered_file(5);
        let block = extract(file.path(), 3, 5).unwrap();

        let numbers: Vec<u64> = block.lines.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        let targets: Vec<u64> = block
            .lines
            .iter()
            .filter(|l| l.is_target)
            .map(|l| l.line_number)
            .collect();
        assert_eq!(targets, vec![3]);
        assert_eq!(block.lines[0].text, "line 1");
    }

    #[test]
    fn test_window_in_middle_of_large_file() {
        let file = numbered_file(40);
        let block = extract(file.path(), 20, 5).unwrap();
        assert_eq!(block.lines.len(), 11);
        assert_eq!(block.lines.first().unwrap().line_number, 15);
        assert_eq!(block.lines.last().unwrap().line_number, 25);
        assert!(block.to_string().contains(">>> Line 20: line 20"));
        assert!(block.to_string().contains("    Line 19: line 19"));
    }

    #[test]
    fn test_out_of_range_line_does_not_fail() {
        let file = numbered_file(5);
        let block = extract(file.path(), 100, 5).unwrap();
        assert!(block.lines.is_empty());

        let near_end = extract(file.path(), 7, 5).unwrap();
        assert_eq!(near_end.lines.len(), 4);
        assert!(near_end.lines.iter().all(|l| !l.is_target));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract(&dir.path().join("gone.log"), 1, 5);
        assert!(matches!(result, Err(ExtractError::NotFound { .. })));
    }
}

// LogSift - platform/fs.rs
//
// Filesystem helpers shared by the scan engine and the context view.
// Invalid UTF-8 is always replaced, never an error. Lines end at `\n`,
// `\r\n` or a lone `\r`, so old Mac-style logs split the same way as others.

use std::io;
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a file and split it into lines without their terminators.
///
/// A final unterminated line still counts.
pub fn read_lines_lossy(path: &Path) -> io::Result<Vec<String>> {
    let content = read_file_lossy(path)?;
    Ok(split_lines(&content).into_iter().map(str::to_string).collect())
}

/// Number of lines `read_lines_lossy` would return for `path`.
pub fn count_lines(path: &Path) -> io::Result<u64> {
    let content = read_file_lossy(path)?;
    Ok(split_lines(&content).len() as u64)
}

/// Split `text` at `\n`, `\r\n` and lone `\r`. A trailing terminator does
/// not start an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// True when `path` has one of `extensions` (without dot, case-insensitive).
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

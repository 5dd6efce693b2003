//! Input loading.

use std::io::{self, Read};

use crate::errors::CliError;

/// Reads raw receipt bytes from a file, or stdin when no path is given.
pub fn read_input(path: Option<&str>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .map_err(CliError::Stdin)?;
            Ok(buffer)
        }
    }
}

/// Reads a whole file.
pub fn read_file(path: &str) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

/// Splits a line-oriented file into lines, dropping `\r` line endings.
pub fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = bytes
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

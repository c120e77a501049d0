//! Input file parsing: one hash per line, blank lines ignored.

use std::path::Path;

use crate::error::Result;

/// A single input line, normalized to a lowercase-hex MD5 digest when
/// valid. Invalid lines still carry the raw text so the output writer
/// can report `INVALID_INPUT` against the original hash value.
#[derive(Debug, Clone)]
pub struct InputLine {
    pub raw: String,
    pub normalized: Option<String>,
}

fn normalize(line: &str) -> Option<String> {
    let trimmed = line.trim().to_lowercase();
    if trimmed.len() == 32 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(trimmed)
    } else {
        None
    }
}

pub fn parse_input_file(path: &Path) -> Result<Vec<InputLine>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| InputLine {
            raw: line.to_string(),
            normalized: normalize(line),
        })
        .collect())
}

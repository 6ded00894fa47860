//! Parsing numeric input typed by a user or read from a data file.

use crate::error::{NumkitError, Result};
use crate::linalg::Matrix;
use crate::series::SampleSeries;

/// Parse numbers separated by commas and/or whitespace.
pub fn parse_values(text: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| NumkitError::invalid_input(format!("'{}' is not a number", token)))
        })
        .collect()
}

/// Parse a matrix whose rows are separated by `;` or newlines.
pub fn parse_matrix(text: &str) -> Result<Matrix> {
    let rows = text
        .split(|c: char| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(parse_values)
        .collect::<Result<Vec<_>>>()?;
    if rows.is_empty() {
        return Err(NumkitError::invalid_input("matrix has no rows"));
    }
    Matrix::from_rows(&rows)
}

/// Parse a two-column `x y` table, one sample per line; `#` starts a comment.
pub fn parse_series(text: &str) -> Result<SampleSeries> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        match parse_values(content)?.as_slice() {
            &[xi, yi] => {
                x.push(xi);
                y.push(yi);
            }
            other => {
                return Err(NumkitError::invalid_input(format!(
                    "line {}: expected 2 columns, got {}",
                    line_no + 1,
                    other.len()
                )));
            }
        }
    }
    SampleSeries::new(x, y)
}

/// Read a two-column data file, see [`parse_series`].
#[cfg(feature = "cli")]
pub fn read_series_file(path: &std::path::Path) -> Result<SampleSeries> {
    let content = std::fs::read_to_string(path).map_err(|e| NumkitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_series(&content)
}

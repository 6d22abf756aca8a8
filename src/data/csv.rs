//! Delimited-text parsing for dataset files.
//!
//! Supported format:
//! - UTF-8, any single-character separator (the survival data uses `;`)
//! - Optional header row (auto-detected: first row is a header if it contains
//!   any non-numeric, non-empty cell)
//! - Double-quoted fields with embedded separators and `""` escapes
//! - Blank lines are skipped; every remaining row must have the same width

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvParseError(pub String);

impl std::fmt::Display for CsvParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CsvParseError {}

/// Splits `text` into rows of trimmed string cells.
///
/// A detected header row is dropped. Returns an error for input with no data
/// rows or with rows of differing width.
pub fn parse_rows(text: &str, separator: char) -> Result<Vec<Vec<String>>, CsvParseError> {
    let mut lines = text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    if let Some(first) = lines.peek() {
        if is_header(first, separator) {
            lines.next();
        }
    }

    let rows: Vec<Vec<String>> = lines
        .map(|line| parse_row(line, separator).into_iter().map(|c| c.trim().to_string()).collect())
        .collect();

    let Some(first) = rows.first() else {
        return Err(CsvParseError("CSV contains no data rows after parsing".into()));
    };

    let width = first.len();
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(CsvParseError(format!(
                "Row {}: column count {} does not match first row's {}",
                i + 1, row.len(), width
            )));
        }
    }

    Ok(rows)
}

/// Parses a slice of string cells as `f64`, returning an error with row info on failure.
pub fn parse_floats(cells: &[String], row_num: usize) -> Result<Vec<f64>, CsvParseError> {
    cells.iter()
        .map(|c| {
            c.trim().parse::<f64>().map_err(|_| {
                CsvParseError(format!(
                    "Row {}: '{}' is not a valid number",
                    row_num, c
                ))
            })
        })
        .collect()
}

/// Returns `true` if the row looks like a header (any cell non-numeric).
fn is_header(line: &str, separator: char) -> bool {
    parse_row(line, separator).iter().any(|c| {
        let t = c.trim();
        !t.is_empty() && t.parse::<f64>().is_err()
    })
}

/// Parses a single row, handling double-quoted fields.
fn parse_row(line: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                // Escaped quote inside quoted field.
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == separator && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

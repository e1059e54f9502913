//! CSV reading and writing for `tasksheet`.
//!
//! Reading is lenient the way spreadsheet exports need: short rows are padded,
//! long rows keep their extra cells, blank lines are skipped and a leading
//! UTF-8 BOM is dropped. Only an unterminated quoted field is a hard error.
//!
//! Writing quotes a field only when it contains a comma, quote, or line
//! break, and ends every record with CRLF.

use crate::error::{Result, TaskSheetError};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

const BOM: char = '\u{feff}';

/// A syntax error found while splitting CSV text into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSyntaxError {
    /// 1-based line where the offending record starts.
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for CsvSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for CsvSyntaxError {}

/// Escape a CSV field value.
///
/// Wraps in double quotes if the value contains commas, quotes, or newlines.
/// Doubles any existing quotes within the value.
#[must_use]
pub fn escape_field(value: &str) -> String {
    let needs_quoting = value.contains(',')
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');

    if needs_quoting {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Format one record as a CSV line (without terminator).
#[must_use]
pub fn format_record<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| escape_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write a header and rows as CSV to the given writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write, H: AsRef<str>>(
    writer: &mut W,
    header: &[H],
    rows: &[Vec<String>],
) -> io::Result<()> {
    write!(writer, "{}\r\n", format_record(header))?;
    for row in rows {
        write!(writer, "{}\r\n", format_record(row))?;
    }
    Ok(())
}

/// Format a header and rows as a complete CSV string.
#[must_use]
pub fn format_csv<H: AsRef<str>>(header: &[H], rows: &[Vec<String>]) -> String {
    let mut output = String::new();
    output.push_str(&format_record(header));
    output.push_str("\r\n");
    for row in rows {
        output.push_str(&format_record(row));
        output.push_str("\r\n");
    }
    output
}

/// Split CSV text into records.
///
/// # Errors
///
/// Returns an error if a quoted field is never closed.
pub fn parse_records(text: &str) -> std::result::Result<Vec<Vec<String>>, CsvSyntaxError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut started = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
                started = true;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                started = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if started || !field.is_empty() {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                started = false;
                line += 1;
            }
            _ => {
                field.push(c);
                started = true;
            }
        }
    }

    if in_quotes {
        return Err(CsvSyntaxError {
            line: quote_line,
            reason: "unterminated quoted field".to_string(),
        });
    }

    if started || !field.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

/// A parsed table: one header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse CSV text. The first record becomes the header.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid CSV.
    pub fn parse(text: &str) -> std::result::Result<Self, CsvSyntaxError> {
        let mut records = parse_records(text)?.into_iter();
        let header = records.next().unwrap_or_default();
        Ok(Self {
            header,
            rows: records.collect(),
        })
    }

    /// Read and parse a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSheetError::InputNotFound`] if the file is missing,
    /// [`TaskSheetError::CsvParse`] for invalid UTF-8 or CSV syntax, and
    /// [`TaskSheetError::Io`] for other read failures.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                TaskSheetError::InputNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                TaskSheetError::Io(err)
            }
        })?;

        let text = String::from_utf8(bytes).map_err(|err| {
            let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            TaskSheetError::CsvParse {
                path: path.to_path_buf(),
                line,
                reason: "invalid UTF-8".to_string(),
            }
        })?;

        let table = Self::parse(&text).map_err(|err| TaskSheetError::CsvParse {
            path: path.to_path_buf(),
            line: err.line,
            reason: err.reason,
        })?;

        tracing::debug!(
            path = %path.display(),
            columns = table.header.len(),
            rows = table.rows.len(),
            "Read CSV table"
        );
        Ok(table)
    }

    /// Whether the table has no header row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }

    /// Position of a header column; surrounding whitespace is ignored.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.trim() == name)
    }

    /// Iterate data rows with by-name field access.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |row| Record { table: self, row })
    }

    /// Pad every row with empty cells up to the header width.
    pub fn pad_rows(&mut self) {
        let width = self.header.len();
        for row in &mut self.rows {
            if row.len() < width {
                row.resize(width, String::new());
            }
        }
    }
}

/// A data row viewed through its table's header.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a CsvTable,
    row: &'a [String],
}

impl<'a> Record<'a> {
    /// Value of the named column, or `""` if the column or cell is missing.
    #[must_use]
    pub fn get(&self, name: &str) -> &'a str {
        self.table
            .column(name)
            .and_then(|idx| self.row.get(idx))
            .map_or("", String::as_str)
    }
}

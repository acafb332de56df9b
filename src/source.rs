use std::fs;
use std::path::PathBuf;

use serde_json::{Number, Value};
use tracing::{debug, warn};

use crate::error::SourceUnavailable;

/// One raw sheet row: column label → cell value. Cells are strings or
/// numbers; absent and blank cells are simply not present in the map.
pub type RawRow = serde_json::Map<String, Value>;

/// The raw table plus where it came from.
#[derive(Clone, Debug)]
pub struct SheetData {
    pub rows: Vec<RawRow>,
    pub source_id: String,
}

/// Synchronous "read the table" capability consumed by the pipeline.
/// Implementations fail with [`SourceUnavailable`] when the table cannot be
/// located or parsed; individual malformed cells never fail a read.
pub trait TableSource: Send + Sync {
    fn read(&self) -> Result<SheetData, SourceUnavailable>;
}

/// Reads the sheet from a CSV export on disk. The first non-blank line is
/// taken as the header row of column labels.
pub struct CsvTableSource {
    path: PathBuf,
}

impl CsvTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for CsvTableSource {
    fn read(&self) -> Result<SheetData, SourceUnavailable> {
        let source_id = self.path.display().to_string();
        debug!(path = %source_id, "reading sheet");
        let text = fs::read_to_string(&self.path)
            .map_err(|e| SourceUnavailable::new(source_id.clone(), e))?;
        let rows = parse_sheet(&text)
            .ok_or_else(|| SourceUnavailable::new(source_id.clone(), NoHeaderRow))?;
        Ok(SheetData { rows, source_id })
    }
}

#[derive(Debug)]
struct NoHeaderRow;

impl std::fmt::Display for NoHeaderRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sheet has no header row")
    }
}

impl std::error::Error for NoHeaderRow {}

/// Fixed set of rows, for tests and embedding.
pub struct StaticSource {
    pub rows: Vec<RawRow>,
    pub source_id: String,
}

impl StaticSource {
    pub fn new(rows: Vec<RawRow>, source_id: impl Into<String>) -> Self {
        Self {
            rows,
            source_id: source_id.into(),
        }
    }
}

impl TableSource for StaticSource {
    fn read(&self) -> Result<SheetData, SourceUnavailable> {
        Ok(SheetData {
            rows: self.rows.clone(),
            source_id: self.source_id.clone(),
        })
    }
}

/// Header line + data lines → row maps. `None` when the text holds no
/// non-blank line to act as the header.
///
/// Records are one physical line each: a quoted cell containing a literal
/// newline is not supported and splits into two (likely blank-skipped)
/// rows. Exports feeding this loader keep free-text cells single-line.
fn parse_sheet(text: &str) -> Option<Vec<RawRow>> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header_line = lines.next()?;
    let headers: Vec<String> = split_csv_line(header_line);

    let mut rows = Vec::new();
    for line in lines {
        let fields = split_csv_line(line);
        if fields.len() > headers.len() {
            warn!(
                expected = headers.len(),
                got = fields.len(),
                "row wider than header; extra fields dropped"
            );
        }
        let mut row = RawRow::new();
        for (label, field) in headers.iter().zip(fields) {
            if field.is_empty() {
                continue;
            }
            row.insert(label.clone(), sniff_cell(field));
        }
        // Sheet exports commonly end in separator-only lines; a row with no
        // populated cell would otherwise become a phantom record.
        if row.is_empty() {
            continue;
        }
        rows.push(row);
    }
    Some(rows)
}

/// A cell that parses cleanly as a number becomes one; everything else
/// stays text. Locale-formatted numbers ("1,234.5") keep their commas here
/// and are handled by the normalizer's coercion.
fn sniff_cell(field: String) -> Value {
    if let Ok(i) = field.parse::<i64>() {
        return Value::Number(Number::from(i));
    }
    match field.parse::<f64>() {
        Ok(n) if n.is_finite() => Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::String(field)),
        _ => Value::String(field),
    }
}

/// Split one CSV line into trimmed, unquoted fields. Handles quoted fields
/// containing commas and doubled-quote escapes.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

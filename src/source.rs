//! Decoding of uploaded sales exports into an in-memory [`Table`].
//!
//! The file name only selects the decoder: spreadsheet extensions go through
//! `calamine`, everything else is read as delimited text. Every decoder
//! failure is reported as [`ReportError::Decode`] so the caller can halt the
//! run without producing a partial summary.

use std::{
    fmt,
    io::{Cursor, Read, Seek},
    path::Path,
};

use calamine::{Data, DataType, Range, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use chrono::NaiveDateTime;
use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::{
    error::{BoxError, ReportError},
    io_utils,
};

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Delimited,
    Spreadsheet,
}

impl InputFormat {
    pub fn detect(name: &str) -> Self {
        let path = Path::new(name);
        if SPREADSHEET_EXTENSIONS
            .iter()
            .any(|ext| io_utils::has_extension(path, ext))
        {
            InputFormat::Spreadsheet
        } else {
            InputFormat::Delimited
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Delimited => f.write_str("delimited text"),
            InputFormat::Spreadsheet => f.write_str("spreadsheet"),
        }
    }
}

/// One decoded cell, before any textual coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    /// Spreadsheet error marker such as `#N/A`.
    Error(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Textual form used for grouping. Numbers are not normalized beyond
    /// dropping a zero fraction, so `"007"` and `7` stay distinct.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.clone(),
            Cell::Integer(value) => value.to_string(),
            Cell::Float(value) => format_float(*value),
            Cell::Boolean(value) => value.to_string(),
            Cell::DateTime(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            Cell::Error(marker) => marker.clone(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Cell::Empty,
            Data::String(text) => Cell::from(text.as_str()),
            Data::Int(number) => Cell::Integer(*number),
            Data::Float(number) => Cell::Float(*number),
            Data::Bool(flag) => Cell::Boolean(*flag),
            Data::DateTime(serial) => match value.as_datetime() {
                Some(datetime) => Cell::DateTime(datetime),
                None => Cell::Float(serial.as_f64()),
            },
            Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
            Data::Error(err) => Cell::Error(err.to_string()),
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Overrides extension-based delimiter detection for delimited input.
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
    /// Sheet name or 0-based index; the first sheet when unset.
    pub sheet: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
            sheet: None,
        }
    }
}

/// A header row plus its data rows. Rows consisting only of empty cells are
/// dropped on construction and never counted.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let total = rows.len();
        let rows = rows
            .into_iter()
            .filter(|row| !row.iter().all(Cell::is_empty))
            .collect::<Vec<_>>();
        if rows.len() < total {
            debug!("Skipped {} blank row(s)", total - rows.len());
        }
        Self { headers, rows }
    }

    /// Reads `path`, choosing the decoder from its extension. `-` reads
    /// delimited text from stdin.
    pub fn from_path(path: &Path, options: &LoadOptions) -> Result<Self, ReportError> {
        let label = path.display().to_string();
        let format = if io_utils::is_dash(path) {
            InputFormat::Delimited
        } else {
            InputFormat::detect(&label)
        };
        debug!("Decoding '{label}' as {format}");
        if format == InputFormat::Spreadsheet {
            let mut workbook =
                open_workbook_auto(path).map_err(|err| ReportError::decode(&label, err))?;
            return Self::from_workbook(&label, &mut workbook, options.sheet.as_deref());
        }
        let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
        let reader = io_utils::open_csv_reader_from_path(path, delimiter)
            .map_err(|err| ReportError::decode(&label, err))?;
        Self::from_csv_reader(&label, reader, options.encoding)
    }

    /// Decodes an in-memory upload; `name` only selects the decoder.
    pub fn from_bytes(name: &str, bytes: Vec<u8>, options: &LoadOptions) -> Result<Self, ReportError> {
        match InputFormat::detect(name) {
            InputFormat::Spreadsheet => {
                let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
                    .map_err(|err| ReportError::decode(name, err))?;
                Self::from_workbook(name, &mut workbook, options.sheet.as_deref())
            }
            InputFormat::Delimited => {
                let delimiter = io_utils::resolve_input_delimiter(Path::new(name), options.delimiter);
                let reader = io_utils::open_csv_reader(Cursor::new(bytes), delimiter);
                Self::from_csv_reader(name, reader, options.encoding)
            }
        }
    }

    fn from_csv_reader<R: Read>(
        name: &str,
        mut reader: csv::Reader<R>,
        encoding: &'static Encoding,
    ) -> Result<Self, ReportError> {
        let headers = io_utils::reader_headers(&mut reader, encoding)
            .map_err(|err| ReportError::decode(name, err))?;
        if headers.is_empty() {
            return Err(ReportError::decode(name, "no columns to parse"));
        }
        let mut rows = Vec::new();
        for (row_idx, record) in reader.byte_records().enumerate() {
            let record = record.map_err(|err| {
                ReportError::decode(name, format!("row {}: {err}", row_idx + 2))
            })?;
            let decoded = io_utils::decode_record(&record, encoding).map_err(|err| {
                ReportError::decode(name, format!("row {}: {err}", row_idx + 2))
            })?;
            rows.push(decoded.into_iter().map(Cell::from).collect());
        }
        Ok(Self::new(headers, rows))
    }

    fn from_workbook<RS: Read + Seek>(
        name: &str,
        workbook: &mut Sheets<RS>,
        sheet: Option<&str>,
    ) -> Result<Self, ReportError> {
        let range = select_sheet(workbook, sheet).map_err(|err| ReportError::decode(name, err))?;
        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|data| Cell::from(data).to_text())
                .collect::<Vec<_>>(),
            None => return Err(ReportError::decode(name, "worksheet is empty")),
        };
        let rows = rows
            .map(|row| row.iter().map(Cell::from).collect())
            .collect();
        Ok(Self::new(headers, rows))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells of one column in row order; short rows yield [`Cell::Empty`].
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&EMPTY_CELL))
    }
}

fn select_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet: Option<&str>,
) -> Result<Range<Data>, BoxError> {
    if workbook.sheet_names().is_empty() {
        return Err("workbook has no worksheets".into());
    }
    let range = match sheet {
        Some(selector) => match selector.parse::<usize>() {
            Ok(idx) => workbook
                .worksheet_range_at(idx)
                .ok_or_else(|| format!("no sheet at index {idx}"))??,
            Err(_) => workbook.worksheet_range(selector)?,
        },
        None => workbook
            .worksheet_range_at(0)
            .ok_or("no first sheet")??,
    };
    Ok(range)
}

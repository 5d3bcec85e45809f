//! I/O helpers shared by the input decoders and the exporters.
//!
//! - **Delimiter resolution**: `.tsv` reads and writes tab-separated, anything
//!   else defaults to comma unless overridden.
//! - **Encoding**: delimited input is decoded through `encoding_rs`, UTF-8 by
//!   default. Exports are always UTF-8.
//! - **stdin/stdout**: the `-` path routes through the standard streams.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| {
        if has_extension(path, "tsv") {
            DEFAULT_TSV_DELIMITER
        } else {
            DEFAULT_CSV_DELIMITER
        }
    })
}

pub fn resolve_output_delimiter(path: Option<&Path>, provided: Option<u8>) -> u8 {
    if let Some(delim) = provided {
        return delim;
    }
    match path {
        Some(path) if has_extension(path, "tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    }
}

/// Sales exports are frequently ragged, so short and long records are
/// accepted and reconciled against the header row by the caller.
pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(path: &Path, delimiter: u8) -> Result<csv::Reader<Box<dyn Read>>> {
    let reader: Box<dyn Read> = if is_dash(path) {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Opening input file {path:?}"))?,
        ))
    };
    Ok(open_csv_reader(reader, delimiter))
}

pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(std::io::stdout()),
    })
}

/// Quotes only fields that would otherwise break the record, which keeps
/// plain identifiers byte-for-byte while staying lossless for the rest.
pub fn open_csv_writer<W: Write>(writer: W, delimiter: u8) -> csv::Writer<W> {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true);
    builder.from_writer(writer)
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.byte_headers().context("Reading header row")?.clone();
    decode_record(&headers, encoding)
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tsv_extension_selects_tab() {
        assert_eq!(resolve_input_delimiter(Path::new("orders.TSV"), None), b'\t');
        assert_eq!(resolve_input_delimiter(Path::new("orders.csv"), None), b',');
        assert_eq!(resolve_input_delimiter(Path::new("orders.tsv"), Some(b';')), b';');
        assert_eq!(resolve_output_delimiter(Some(Path::new("out.tsv")), None), b'\t');
        assert_eq!(resolve_output_delimiter(None, None), b',');
    }

    #[test]
    fn ragged_records_are_tolerated() {
        let data = "a,b,c\n1,2\n3,4,5,6\n";
        let mut reader = open_csv_reader(data.as_bytes(), b',');
        let headers = reader_headers(&mut reader, UTF_8).expect("headers");
        assert_eq!(headers, vec!["a", "b", "c"]);
        let lengths = reader
            .byte_records()
            .map(|r| r.expect("record").len())
            .collect::<Vec<_>>();
        assert_eq!(lengths, vec![2, 4]);
    }

    #[test]
    fn writer_quotes_only_when_needed() {
        let mut buffer = Vec::new();
        {
            let mut writer = open_csv_writer(&mut buffer, b',');
            writer.write_record(["plain", "with,comma"]).expect("write");
            writer.flush().expect("flush");
        }
        assert_eq!(String::from_utf8(buffer).unwrap(), "plain,\"with,comma\"\n");
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        assert!(decode_bytes(&[0x66, 0xff, 0x6f], UTF_8).is_err());
        let windows = resolve_encoding(Some("windows-1252")).expect("encoding");
        assert_eq!(decode_bytes(&[0x63, 0x61, 0x66, 0xe9], windows).unwrap(), "café");
    }
}

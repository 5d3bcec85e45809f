//! Summary serializers: delimited text, a single-sheet workbook, and JSON.
//!
//! All three carry the `sellerSku` / `total_sold_count` header and one record
//! per summary row, so reading an export back yields the same pairs.

use std::{io::Write, path::Path};

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::{
    aggregate::{COUNT_HEADER, SKU_HEADER, Summary},
    error::ReportError,
    io_utils,
};

pub const SHEET_NAME: &str = "SalesSummary";

pub fn write_csv<W: Write>(summary: &Summary, writer: W, delimiter: u8) -> csv::Result<()> {
    let mut writer = io_utils::open_csv_writer(writer, delimiter);
    writer.write_record([SKU_HEADER, COUNT_HEADER])?;
    for row in summary {
        writer.write_record([row.sku.as_str(), row.total_sold_count.to_string().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_bytes(summary: &Summary, delimiter: u8) -> Result<Vec<u8>, ReportError> {
    let mut buffer = Vec::new();
    write_csv(summary, &mut buffer, delimiter)
        .map_err(|err| ReportError::export("CSV", "memory", err))?;
    Ok(buffer)
}

pub fn save_csv(summary: &Summary, path: &Path, delimiter: u8) -> Result<(), ReportError> {
    let target = path.display().to_string();
    let output = io_utils::open_output(Some(path))
        .map_err(|err| ReportError::export("CSV", &target, err))?;
    write_csv(summary, output, delimiter).map_err(|err| ReportError::export("CSV", &target, err))
}

fn build_workbook(summary: &Summary) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    worksheet.write_string_with_format(0, 0, SKU_HEADER, &header)?;
    worksheet.write_string_with_format(0, 1, COUNT_HEADER, &header)?;
    for (idx, row) in summary.iter().enumerate() {
        let sheet_row = u32::try_from(idx + 1)
            .map_err(|_| XlsxError::RowColumnLimitError)?;
        worksheet.write_string(sheet_row, 0, &row.sku)?;
        worksheet.write_number(sheet_row, 1, row.total_sold_count as f64)?;
    }
    Ok(workbook)
}

pub fn to_xlsx_bytes(summary: &Summary) -> Result<Vec<u8>, ReportError> {
    build_workbook(summary)
        .and_then(|mut workbook| workbook.save_to_buffer())
        .map_err(|err| ReportError::export("XLSX", "memory", err))
}

pub fn save_xlsx(summary: &Summary, path: &Path) -> Result<(), ReportError> {
    let target = path.display().to_string();
    build_workbook(summary)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|err| ReportError::export("XLSX", target, err))
}

pub fn write_json<W: Write>(summary: &Summary, writer: W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, summary)
}

pub fn save_json(summary: &Summary, path: &Path) -> Result<(), ReportError> {
    let target = path.display().to_string();
    let mut output = io_utils::open_output(Some(path))
        .map_err(|err| ReportError::export("JSON", &target, err))?;
    write_json(summary, &mut output).map_err(|err| ReportError::export("JSON", &target, err))?;
    writeln!(output)
        .and_then(|_| output.flush())
        .map_err(|err| ReportError::export("JSON", target, err))
}

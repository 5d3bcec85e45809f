#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::{TempDir, tempdir};

/// A spreadsheet cell used when building fixture workbooks.
pub enum SheetCell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file contents");
        path
    }

    /// Builds a single-sheet workbook from `rows` (first row is the header).
    pub fn write_xlsx(&self, name: &str, sheet: &str, rows: &[Vec<SheetCell<'_>>]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).expect("sheet name");
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    SheetCell::Text(text) => {
                        worksheet.write_string(r, c, *text).expect("write string");
                    }
                    SheetCell::Number(value) => {
                        worksheet.write_number(r, c, *value).expect("write number");
                    }
                    SheetCell::Blank => {}
                }
            }
        }
        workbook.save(&path).expect("save workbook");
        path
    }
}

/// A small marketplace order export: three orders of A1, one of B2.
pub const ORDERS_CSV: &str = "Order ID,Seller SKU,Qty\n\
1001,A1,1\n\
1002,A1,1\n\
1003,B2,3\n\
1004,A1,1\n";

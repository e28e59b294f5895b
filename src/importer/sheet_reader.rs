// ==========================================
// IGM Loader - Worksheet readers
// ==========================================
// Spreadsheet collaborator implementations:
// - WorkbookReader:     one workbook export, one tab per market
// - CsvDirectoryReader: one <worksheet>.csv per market
// Cells arrive as text exactly as stored; only headers are trimmed
// (by the row source).
// ==========================================

use crate::domain::DATE_FORMAT;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::WorksheetReader;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

// ==========================================
// WorkbookReader
// ==========================================
pub struct WorkbookReader {
    path: PathBuf,
}

impl WorkbookReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn check_path(&self) -> ImportResult<()> {
        if !self.path.exists() {
            return Err(ImportError::FileNotFound(self.path.display().to_string()));
        }

        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        Ok(())
    }
}

/// Render a workbook cell the way the spreadsheet UI shows it
fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| cell.to_string()),
        _ => cell.to_string(),
    }
}

impl WorksheetReader for WorkbookReader {
    fn read_worksheet(&self, worksheet_name: &str) -> ImportResult<Vec<Vec<String>>> {
        self.check_path()?;

        let mut workbook = open_workbook_auto(&self.path)?;
        if !workbook.sheet_names().iter().any(|n| n == worksheet_name) {
            return Err(ImportError::WorksheetNotFound(worksheet_name.to_string()));
        }

        let range = workbook.worksheet_range(worksheet_name)?;
        let grid: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_to_text).collect())
            .collect();

        debug!(worksheet = worksheet_name, rows = grid.len(), "workbook worksheet read");
        Ok(grid)
    }

    fn worksheet_names(&self) -> ImportResult<Vec<String>> {
        self.check_path()?;
        let workbook = open_workbook_auto(&self.path)?;
        Ok(workbook.sheet_names())
    }
}

// ==========================================
// CsvDirectoryReader
// ==========================================
pub struct CsvDirectoryReader {
    dir: PathBuf,
}

impl CsvDirectoryReader {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn worksheet_path(&self, worksheet_name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", worksheet_name))
    }
}

impl WorksheetReader for CsvDirectoryReader {
    fn read_worksheet(&self, worksheet_name: &str) -> ImportResult<Vec<Vec<String>>> {
        if !self.dir.is_dir() {
            return Err(ImportError::FileNotFound(self.dir.display().to_string()));
        }

        let path = self.worksheet_path(worksheet_name);
        if !path.is_file() {
            return Err(ImportError::WorksheetNotFound(worksheet_name.to_string()));
        }

        let file = File::open(&path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false) // header is returned as the first grid row
            .flexible(true)
            .from_reader(file);

        let mut grid = Vec::new();
        for result in reader.records() {
            let record = result?;
            grid.push(record.iter().map(str::to_string).collect());
        }

        debug!(worksheet = worksheet_name, rows = grid.len(), "csv worksheet read");
        Ok(grid)
    }

    fn worksheet_names(&self) -> ImportResult<Vec<String>> {
        if !self.dir.is_dir() {
            return Err(ImportError::FileNotFound(self.dir.display().to_string()));
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .map(|e| e.eq_ignore_ascii_case("csv"))
                .unwrap_or(false);
            if is_csv {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, lines: &[&str]) {
        let mut file = File::create(dir.path().join(format!("{}.csv", name))).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    #[test]
    fn test_csv_reader_returns_header_first() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "it_sheet", &["talent,fee", "X,100", "Y,200"]);

        let reader = CsvDirectoryReader::new(dir.path());
        let grid = reader.read_worksheet("it_sheet").unwrap();

        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0], vec!["talent", "fee"]);
        assert_eq!(grid[1], vec!["X", "100"]);
    }

    #[test]
    fn test_csv_reader_keeps_cell_whitespace() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "sheet", &["talent,link", "X ,  padded  "]);

        let grid = CsvDirectoryReader::new(dir.path())
            .read_worksheet("sheet")
            .unwrap();
        assert_eq!(grid[1], vec!["X ", "  padded  "]);
    }

    #[test]
    fn test_csv_reader_ragged_rows() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "sheet", &["a,b,c", "1", "1,2,3,4"]);

        let grid = CsvDirectoryReader::new(dir.path())
            .read_worksheet("sheet")
            .unwrap();
        assert_eq!(grid[1].len(), 1);
        assert_eq!(grid[2].len(), 4);
    }

    #[test]
    fn test_csv_reader_unknown_worksheet() {
        let dir = TempDir::new().unwrap();
        let reader = CsvDirectoryReader::new(dir.path());

        let result = reader.read_worksheet("missing");
        assert!(matches!(result, Err(ImportError::WorksheetNotFound(name)) if name == "missing"));
    }

    #[test]
    fn test_csv_reader_lists_worksheets() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "es_sheet", &["a"]);
        write_csv(&dir, "de_sheet", &["a"]);
        File::create(dir.path().join("notes.txt")).unwrap();

        let names = CsvDirectoryReader::new(dir.path()).worksheet_names().unwrap();
        assert_eq!(names, vec!["de_sheet", "es_sheet"]);
    }

    #[test]
    fn test_workbook_reader_file_not_found() {
        let reader = WorkbookReader::new("does_not_exist.xlsx");
        let result = reader.read_worksheet("it_igm_lightdash_data");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_workbook_reader_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Influencers.txt");
        File::create(&path).unwrap();

        let result = WorkbookReader::new(&path).read_worksheet("sheet");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_cell_to_text() {
        assert_eq!(cell_to_text(&Data::Empty), "");
        assert_eq!(cell_to_text(&Data::Float(100.0)), "100");
        assert_eq!(cell_to_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_text(&Data::Bool(true)), "true");
        assert_eq!(cell_to_text(&Data::String(" X ".to_string())), " X ");
        assert_eq!(
            cell_to_text(&Data::DateTimeIso("2024-03-05".to_string())),
            "2024-03-05"
        );
    }
}

use std::fs::File;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::FileLoadError;
use crate::table::Table;

/// Extensions the file chooser shows and `load_table` accepts.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods", "csv"];

/// Whether a path carries one of the accepted spreadsheet extensions.
pub fn is_spreadsheet(path: &Path) -> bool {
    extension(path)
        .map(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Read a spreadsheet into a [`Table`], coercing every cell to text.
///
/// The first row is the header. Workbooks contribute their first worksheet only.
pub fn load_table(path: &Path) -> Result<Table, FileLoadError> {
    std::fs::metadata(path).map_err(|source| FileLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = match extension(path).as_deref() {
        Some("csv") => read_csv_records(path)?,
        Some(ext) if SPREADSHEET_EXTENSIONS.contains(&ext) => read_workbook_records(path)?,
        _ => {
            return Err(FileLoadError::Unsupported {
                path: path.to_path_buf(),
            })
        }
    };

    match Table::from_records(records) {
        Some(table) if table.column_count() > 0 => {
            tracing::debug!(
                path = %path.display(),
                rows = table.row_count(),
                cols = table.column_count(),
                "loaded table"
            );
            Ok(table)
        }
        _ => Err(FileLoadError::Empty {
            path: path.to_path_buf(),
        }),
    }
}

fn read_workbook_records(path: &Path) -> Result<Vec<Vec<String>>, FileLoadError> {
    let workbook_error = |source| FileLoadError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FileLoadError::Empty {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;

    if let Some(name) = workbook.sheet_names().first() {
        tracing::debug!(sheet = %name, size = ?range.get_size(), "reading first worksheet");
    }

    // The range begins at the first used cell; empty leading columns still
    // count towards column indices.
    let (_, first_col) = range.start().unwrap_or((0, 0));
    let lead = first_col as usize;

    Ok(range
        .rows()
        .map(|row| {
            let mut record = vec![String::new(); lead];
            record.extend(row.iter().map(cell_text));
            record
        })
        .collect())
}

fn read_csv_records(path: &Path) -> Result<Vec<Vec<String>>, FileLoadError> {
    let file = File::open(path).map_err(|source| FileLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| FileLoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

/// Render one workbook cell as the text shown in its field.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Integral values lose the trailing ".0"
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => datetime.to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_xlsx(dir: &Path, name: &str, rows: &[&[&str]]) -> PathBuf {
        let path = dir.join(name);
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn test_is_spreadsheet() {
        assert!(is_spreadsheet(Path::new("a.xlsx")));
        assert!(is_spreadsheet(Path::new("A.XLSX")));
        assert!(is_spreadsheet(Path::new("data.csv")));
        assert!(!is_spreadsheet(Path::new("notes.txt")));
        assert!(!is_spreadsheet(Path::new("xlsx")));
    }

    #[test]
    fn test_load_xlsx_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_xlsx(
            dir.path(),
            "people.xlsx",
            &[&["Name", "Age"], &["Ann", "30"], &["Bo", "41"], &["Cy", "19"]],
        );

        let table = load_table(&path).unwrap();
        assert_eq!(table.columns(), &["Name".to_string(), "Age".to_string()][..]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell(0, 0), Some("Ann"));
        assert_eq!(table.cell(2, 1), Some("19"));
    }

    #[test]
    fn test_load_xlsx_coerces_numbers_and_bools() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typed.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Count").unwrap();
        sheet.write_string(0, 1, "Ratio").unwrap();
        sheet.write_string(0, 2, "Flag").unwrap();
        sheet.write_number(1, 0, 30.0).unwrap();
        sheet.write_number(1, 1, 0.25).unwrap();
        sheet.write_boolean(1, 2, true).unwrap();
        workbook.save(&path).unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.cell(0, 0), Some("30"));
        assert_eq!(table.cell(0, 1), Some("0.25"));
        assert_eq!(table.cell(0, 2), Some("True"));
    }

    #[test]
    fn test_load_xlsx_keeps_empty_leading_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 1, "Name").unwrap();
        sheet.write_string(0, 2, "Age").unwrap();
        sheet.write_string(1, 1, "Ann").unwrap();
        sheet.write_number(1, 2, 30.0).unwrap();
        workbook.save(&path).unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(
            table.columns(),
            &["Unnamed: 0".to_string(), "Name".to_string(), "Age".to_string()][..]
        );
        assert_eq!(table.rows(), &[vec![String::new(), "Ann".to_string(), "30".to_string()]][..]);
    }

    #[test]
    fn test_load_xlsx_dates_errors_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        let date_format = rust_xlsxwriter::Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        for (c, name) in ["When", "Ratio", "Blank", "Last"].iter().enumerate() {
            sheet.write_string(0, c as u16, *name).unwrap();
        }
        // 2024-01-01 12:00:00 as an Excel serial
        sheet.write_number_with_format(1, 0, 45292.5, &date_format).unwrap();
        sheet
            .write_formula(1, 1, rust_xlsxwriter::Formula::new("=1/0").set_result("#DIV/0!"))
            .unwrap();
        sheet.write_string(1, 3, "end").unwrap();
        workbook.save(&path).unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.cell(0, 0), Some("2024-01-01 12:00:00"));
        assert_eq!(table.cell(0, 1), Some("#DIV/0!"));
        assert_eq!(table.cell(0, 2), Some(""));
        assert_eq!(table.cell(0, 3), Some("end"));
    }

    #[test]
    fn test_float_text() {
        assert_eq!(cell_text(&Data::Float(30.0)), "30");
        assert_eq!(cell_text(&Data::Float(-2.5)), "-2.5");
        assert_eq!(cell_text(&Data::Float(0.1)), "0.1");
        assert_eq!(cell_text(&Data::Float(1e15)), "1000000000000000");
        assert_eq!(cell_text(&Data::Float(2.5e20)), "250000000000000000000");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Bool(false)), "False");
        assert_eq!(cell_text(&Data::Error(calamine::CellErrorType::Div0)), "#DIV/0!");
    }

    #[test]
    fn test_load_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        std::fs::write(&path, "Name,Age\nAnn,30\nBo\n").unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 1), Some(""));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("gone.xlsx")).unwrap_err();
        assert!(matches!(err, FileLoadError::Io { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, FileLoadError::Unsupported { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn test_garbage_xlsx_is_workbook_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.xlsx");
        std::fs::write(&path, "not a zip archive").unwrap();
        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, FileLoadError::Workbook { .. }));
    }

    #[test]
    fn test_empty_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();
        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, FileLoadError::Empty { .. }));
    }
}

/// A loaded spreadsheet, every cell held as text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from a header and data rows.
    ///
    /// Blank header names become `Unnamed: <index>`. Rows are padded with
    /// empty strings or cut so each one has exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns: Vec<String> = columns
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                if name.trim().is_empty() {
                    format!("Unnamed: {}", idx)
                } else {
                    name
                }
            })
            .collect();

        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Split raw records into header + rows, the first record being the header.
    ///
    /// The header is widened to the longest record so no cell is dropped.
    pub fn from_records(records: Vec<Vec<String>>) -> Option<Self> {
        let width = records.iter().map(Vec::len).max()?;
        let mut records = records.into_iter();
        let mut header = records.next()?;
        header.resize(width, String::new());
        Some(Self::new(header, records.collect()))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Cells in row-major order, the order the grid lays its fields out in.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, value)| (row, col, value.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_blank_header_is_named_by_index() {
        let table = Table::new(strings(&["Name", "", " "]), vec![]);
        assert_eq!(table.columns(), &strings(&["Name", "Unnamed: 1", "Unnamed: 2"])[..]);
    }

    #[test]
    fn test_rows_are_normalised_to_column_count() {
        let table = Table::new(
            strings(&["A", "B"]),
            vec![strings(&["1"]), strings(&["1", "2", "3"])],
        );
        assert_eq!(table.rows()[0], strings(&["1", ""]));
        assert_eq!(table.rows()[1], strings(&["1", "2"]));
    }

    #[test]
    fn test_from_records_widens_header() {
        let table = Table::from_records(vec![
            strings(&["Name"]),
            strings(&["Ann", "30"]),
        ])
        .unwrap();
        assert_eq!(table.columns(), &strings(&["Name", "Unnamed: 1"])[..]);
        assert_eq!(table.cell(0, 1), Some("30"));
    }

    #[test]
    fn test_from_records_empty() {
        assert!(Table::from_records(vec![]).is_none());
    }

    #[test]
    fn test_cells_are_row_major() {
        let table = Table::new(
            strings(&["Name", "Age"]),
            vec![strings(&["Ann", "30"]), strings(&["Bo", "41"])],
        );
        let order: Vec<_> = table.cells().map(|(_, _, v)| v).collect();
        assert_eq!(order, vec!["Ann", "30", "Bo", "41"]);
        assert_eq!(table.cell(5, 0), None);
    }
}

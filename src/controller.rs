use std::path::{Path, PathBuf};

use crate::error::FileLoadError;
use crate::state::{DisplayMode, ViewState};
use crate::table::Table;
use crate::table_io;

/// Owns the view state and performs every transition between browsing
/// for a file and editing its contents.
#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
    display_mode: DisplayMode,
    loaded_path: Option<PathBuf>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn table(&self) -> Option<&Table> {
        self.state.table()
    }

    pub fn is_editing(&self) -> bool {
        self.state.is_editing()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Path of the file whose table is on screen.
    pub fn loaded_path(&self) -> Option<&Path> {
        self.loaded_path.as_deref()
    }

    /// Load `path` and switch to editing it.
    ///
    /// On failure nothing changes: a chooser stays a chooser and a table
    /// already being edited stays on screen.
    pub fn select_file(&mut self, path: &Path) -> Result<(), FileLoadError> {
        match table_io::load_table(path) {
            Ok(table) => {
                tracing::info!(
                    path = %path.display(),
                    rows = table.row_count(),
                    cols = table.column_count(),
                    "editing spreadsheet"
                );
                self.loaded_path = Some(path.to_path_buf());
                self.state = ViewState::Editing(table);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = %e.path().display(), "Failed to open file: {}", e);
                Err(e)
            }
        }
    }

    /// Change the chooser layout. Ignored while editing.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> bool {
        if self.is_editing() {
            tracing::debug!(?mode, "display mode change ignored while editing");
            return false;
        }
        self.display_mode = mode;
        true
    }

    /// Drop the table and any edits, returning to a fresh chooser in the
    /// default icon layout.
    pub fn go_back(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }
        tracing::debug!(path = ?self.loaded_path, "closing table view");
        self.state = ViewState::Browsing;
        self.display_mode = DisplayMode::default();
        self.loaded_path = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_people_xlsx(dir: &Path) -> PathBuf {
        let path = dir.join("people.xlsx");
        let rows = [["Name", "Age"], ["Ann", "30"], ["Bo", "41"], ["Cy", "19"]];
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
    fn test_starts_browsing() {
        let controller = ViewController::new();
        assert_eq!(controller.state(), &ViewState::Browsing);
        assert!(controller.table().is_none());
        assert_eq!(controller.display_mode(), DisplayMode::IconGrid);
    }

    #[test]
    fn test_select_file_enters_editing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_people_xlsx(dir.path());
        let mut controller = ViewController::new();

        controller.select_file(&path).unwrap();
        let table = controller.table().unwrap();
        assert_eq!(table.columns(), &["Name".to_string(), "Age".to_string()][..]);
        let values: Vec<&str> = table.cells().map(|(_, _, v)| v).collect();
        assert_eq!(values, vec!["Ann", "30", "Bo", "41", "Cy", "19"]);

        assert!(controller.is_editing());
        assert_eq!(controller.loaded_path(), Some(path.as_path()));
        assert_eq!(controller.table().map(Table::row_count), Some(3));
        assert_eq!(controller.table().map(Table::column_count), Some(2));
    }

    #[test]
    fn test_failed_select_keeps_browsing() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, "just text").unwrap();
        let mut controller = ViewController::new();

        assert!(controller.select_file(&notes).is_err());
        assert!(controller.select_file(&dir.path().join("missing.xlsx")).is_err());
        assert_eq!(controller.state(), &ViewState::Browsing);
        assert!(controller.loaded_path().is_none());
    }

    #[test]
    fn test_failed_select_keeps_current_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_people_xlsx(dir.path());
        let mut controller = ViewController::new();
        controller.select_file(&path).unwrap();
        let before = controller.state().clone();

        assert!(controller.select_file(&dir.path().join("missing.csv")).is_err());
        assert_eq!(controller.state(), &before);
        assert_eq!(controller.loaded_path(), Some(path.as_path()));
    }

    #[test]
    fn test_new_selection_replaces_table() {
        let dir = tempfile::tempdir().unwrap();
        let xlsx = write_people_xlsx(dir.path());
        let csv = dir.path().join("one.csv");
        std::fs::write(&csv, "Only\nvalue\n").unwrap();
        let mut controller = ViewController::new();

        controller.select_file(&xlsx).unwrap();
        controller.select_file(&csv).unwrap();
        assert_eq!(controller.table().map(Table::column_count), Some(1));
        assert_eq!(controller.loaded_path(), Some(csv.as_path()));
    }

    #[test]
    fn test_go_back_discards_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_people_xlsx(dir.path());
        let mut controller = ViewController::new();
        controller.select_file(&path).unwrap();

        assert!(controller.go_back());
        assert_eq!(controller.state(), &ViewState::Browsing);
        assert!(controller.table().is_none());
        assert!(controller.loaded_path().is_none());
        assert!(!controller.go_back());
    }

    #[test]
    fn test_go_back_restores_icon_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_people_xlsx(dir.path());
        let mut controller = ViewController::new();
        controller.set_display_mode(DisplayMode::ListView);
        controller.select_file(&path).unwrap();

        assert!(controller.go_back());
        assert_eq!(controller.display_mode(), DisplayMode::IconGrid);
    }

    #[test]
    fn test_display_mode_never_touches_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_people_xlsx(dir.path());
        let mut controller = ViewController::new();

        assert!(controller.set_display_mode(DisplayMode::ListView));
        assert_eq!(controller.state(), &ViewState::Browsing);
        assert_eq!(controller.display_mode(), DisplayMode::ListView);

        controller.select_file(&path).unwrap();
        let before = controller.state().clone();
        assert!(!controller.set_display_mode(DisplayMode::IconGrid));
        assert_eq!(controller.state(), &before);
        assert_eq!(controller.display_mode(), DisplayMode::ListView);
    }
}

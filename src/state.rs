use crate::table::Table;

/// What the main window is showing.
///
/// The table only exists while editing, so the two can never disagree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Browsing,
    Editing(Table),
}

impl ViewState {
    pub fn table(&self) -> Option<&Table> {
        match self {
            ViewState::Browsing => None,
            ViewState::Editing(table) => Some(table),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, ViewState::Editing(_))
    }
}

/// Layout of the file chooser. Has no effect while editing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    IconGrid,
    ListView,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 2] = [DisplayMode::IconGrid, DisplayMode::ListView];

    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::IconGrid => "Icon view",
            DisplayMode::ListView => "List view",
        }
    }
}

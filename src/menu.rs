use gpui::*;

use crate::field::{Copy, Cut, Paste, SelectAll};
use crate::viewer::{GoBack, IconMode, ListMode, OpenFile, Quit};

/// Set up the application menu bar
pub fn setup_menu(cx: &mut App) {
    cx.set_menus(vec![
        Menu {
            name: "sheetpick".into(),
            items: vec![MenuItem::action("Quit", Quit)],
        },
        Menu {
            name: "File".into(),
            items: vec![
                MenuItem::action("Open...", OpenFile),
                MenuItem::separator(),
                MenuItem::action("Back", GoBack),
            ],
        },
        Menu {
            name: "Edit".into(),
            items: vec![
                MenuItem::action("Cut", Cut),
                MenuItem::action("Copy", Copy),
                MenuItem::action("Paste", Paste),
                MenuItem::separator(),
                MenuItem::action("Select All", SelectAll),
            ],
        },
        Menu {
            name: "View".into(),
            items: vec![
                MenuItem::action("Icon View", IconMode),
                MenuItem::action("List View", ListMode),
            ],
        },
    ]);
}

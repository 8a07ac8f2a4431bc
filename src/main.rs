mod assets;
mod controller;
mod directory;
mod error;
mod field;
mod file_chooser;
mod logging;
mod menu;
mod state;
mod table;
mod table_io;
mod table_view;
mod theme;
mod viewer;

use gpui::*;

use assets::Assets;
use field::*;
use theme::Theme;
use viewer::*;

fn main() {
    logging::init();

    Application::new()
        .with_assets(Assets)
        .run(|cx| {
            Theme::init(cx);

            menu::setup_menu(cx);

            cx.bind_keys([
                // Browsing and editing
                KeyBinding::new("secondary-o", OpenFile, Some("SheetViewer")),
                KeyBinding::new("escape", GoBack, Some("SheetViewer")),

                // Text editing in a cell
                KeyBinding::new("backspace", Backspace, Some("TextField")),
                KeyBinding::new("delete", Delete, Some("TextField")),
                KeyBinding::new("left", Left, Some("TextField")),
                KeyBinding::new("right", Right, Some("TextField")),
                KeyBinding::new("shift-left", SelectLeft, Some("TextField")),
                KeyBinding::new("shift-right", SelectRight, Some("TextField")),
                KeyBinding::new("secondary-a", SelectAll, Some("TextField")),
                KeyBinding::new("home", Home, Some("TextField")),
                KeyBinding::new("end", End, Some("TextField")),
                KeyBinding::new("cmd-left", Home, Some("TextField")),
                KeyBinding::new("cmd-right", End, Some("TextField")),
                KeyBinding::new("alt-left", WordLeft, Some("TextField")),
                KeyBinding::new("alt-right", WordRight, Some("TextField")),
                KeyBinding::new("ctrl-cmd-space", ShowCharacterPalette, Some("TextField")),
                KeyBinding::new("secondary-v", Paste, Some("TextField")),
                KeyBinding::new("secondary-c", Copy, Some("TextField")),
                KeyBinding::new("secondary-x", Cut, Some("TextField")),

                // Global
                KeyBinding::new("secondary-q", Quit, None),
            ]);

            cx.on_action::<Quit>(|_, cx| {
                cx.quit();
            });

            let window_options = WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                    None,
                    size(px(WINDOW_WIDTH), px(WINDOW_HEIGHT)),
                    cx,
                ))),
                titlebar: Some(TitlebarOptions {
                    title: Some("sheetpick".into()),
                    appears_transparent: false,
                    ..Default::default()
                }),
                window_min_size: Some(size(px(MIN_WINDOW_WIDTH), px(MIN_WINDOW_HEIGHT))),
                ..Default::default()
            };

            let opened = cx.open_window(window_options, |window, cx| {
                let viewer = cx.new(|cx| SheetViewer::new(cx));
                let focus_handle = viewer.read(cx).focus_handle(cx);
                focus_handle.focus(window);
                viewer
            });

            if let Err(e) = opened {
                tracing::error!("Failed to open window: {}", e);
                cx.quit();
            }
        });
}

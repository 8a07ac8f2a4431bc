use std::path::Path;

use gpui::prelude::FluentBuilder;
use gpui::*;

use crate::assets::Icon;
use crate::controller::ViewController;
use crate::directory::start_dir;
use crate::file_chooser::FileChooser;
use crate::state::{DisplayMode, ViewState};
use crate::table_io::SPREADSHEET_EXTENSIONS;
use crate::table_view::TableView;
use crate::Theme;

pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;
pub const TOOLBAR_HEIGHT: f32 = 44.0;
pub const BACK_BUTTON_HEIGHT: f32 = 44.0;
pub const FOOTER_HEIGHT: f32 = 24.0;
pub const DROPDOWN_WIDTH: f32 = 140.0;

pub const MIN_WINDOW_WIDTH: f32 = 360.0;
pub const MIN_WINDOW_HEIGHT: f32 = TOOLBAR_HEIGHT + BACK_BUTTON_HEIGHT + FOOTER_HEIGHT + 120.0;

const TITLE: &str = "Spreadsheet Editor";

actions!(viewer, [OpenFile, GoBack, IconMode, ListMode]);

// Global actions
actions!(sheetpick, [Quit]);

/// Root view: a toolbar and file chooser while browsing, the table and a
/// back button while editing.
pub struct SheetViewer {
    focus_handle: FocusHandle,
    controller: ViewController,
    chooser: Entity<FileChooser>,
    table_view: Option<Entity<TableView>>,
    mode_menu_open: bool,
    status: Option<SharedString>,
}

impl SheetViewer {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let controller = ViewController::new();
        let chooser = Self::build_chooser(&start_dir(), controller.display_mode(), cx);

        Self {
            focus_handle: cx.focus_handle(),
            controller,
            chooser,
            table_view: None,
            mode_menu_open: false,
            status: None,
        }
    }

    fn build_chooser(dir: &Path, mode: DisplayMode, cx: &mut Context<Self>) -> Entity<FileChooser> {
        let viewer = cx.weak_entity();
        cx.new(|cx| {
            let mut chooser = FileChooser::new(dir, mode, cx);
            chooser.set_select_handler(move |path, window, app| {
                let path = path.to_path_buf();
                if let Err(e) = viewer.update(app, |viewer, cx| viewer.select_file(&path, window, cx)) {
                    tracing::debug!("viewer released before selection: {}", e);
                }
            });
            chooser
        })
    }

    /// Load `path` into a fresh table view, or report why it could not be read.
    pub fn select_file(&mut self, path: &Path, window: &mut Window, cx: &mut Context<Self>) {
        match self.controller.select_file(path) {
            Ok(()) => {
                let view = self
                    .controller
                    .table()
                    .map(|table| cx.new(|cx| TableView::new(table, cx)));
                if let Some(view) = &view {
                    let view = view.read(cx);
                    tracing::debug!(
                        columns = view.column_count(),
                        fields = view.field_count(),
                        "built table view"
                    );
                }
                self.table_view = view;
                self.status = None;
                self.mode_menu_open = false;
                self.focus_handle.focus(window);
            }
            Err(e) => {
                self.status = Some(e.to_string().into());
            }
        }
        cx.notify();
    }

    fn go_back(&mut self, _: &GoBack, window: &mut Window, cx: &mut Context<Self>) {
        if !self.controller.go_back() {
            return;
        }
        self.table_view = None;

        self.chooser = Self::build_chooser(&start_dir(), self.controller.display_mode(), cx);
        self.status = None;
        self.focus_handle.focus(window);
        cx.notify();
    }

    fn set_display_mode(&mut self, mode: DisplayMode, cx: &mut Context<Self>) {
        if self.controller.set_display_mode(mode) {
            self.chooser.update(cx, |chooser, cx| chooser.set_mode(mode, cx));
        }
        self.mode_menu_open = false;
        cx.notify();
    }

    fn icon_mode(&mut self, _: &IconMode, _window: &mut Window, cx: &mut Context<Self>) {
        self.set_display_mode(DisplayMode::IconGrid, cx);
    }

    fn list_mode(&mut self, _: &ListMode, _window: &mut Window, cx: &mut Context<Self>) {
        self.set_display_mode(DisplayMode::ListView, cx);
    }

    fn open_file(&mut self, _: &OpenFile, window: &mut Window, cx: &mut Context<Self>) {
        let path = rfd::FileDialog::new()
            .add_filter("Spreadsheets", SPREADSHEET_EXTENSIONS)
            .set_directory(self.chooser.read(cx).dir())
            .pick_file();

        if let Some(path) = path {
            self.select_file(&path, window, cx);
        }
        self.focus_handle.focus(window);
    }

    fn toggle_mode_menu(&mut self, cx: &mut Context<Self>) {
        self.mode_menu_open = !self.mode_menu_open;
        cx.notify();
    }

    fn render_toolbar(&self, theme: &Theme, cx: &Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_row()
            .items_center()
            .w_full()
            .h(px(TOOLBAR_HEIGHT))
            .px(px(12.))
            .bg(theme.mantle)
            .border_b_1()
            .border_color(theme.surface)
            .child(
                div()
                    .flex_1()
                    .text_size(px(16.))
                    .font_weight(FontWeight::BOLD)
                    .child(TITLE),
            )
            .child(self.render_mode_dropdown(theme, cx))
    }

    fn render_mode_dropdown(&self, theme: &Theme, cx: &Context<Self>) -> impl IntoElement {
        let current = self.controller.display_mode();
        let hover = theme.hover;

        div()
            .relative()
            .w(px(DROPDOWN_WIDTH))
            .child(
                div()
                    .id("mode-dropdown")
                    .flex()
                    .flex_row()
                    .items_center()
                    .justify_between()
                    .h(px(28.))
                    .px(px(8.))
                    .rounded(px(4.))
                    .bg(theme.surface)
                    .hover(move |s| s.bg(hover))
                    .text_size(px(13.))
                    .on_click(cx.listener(|this, _, _, cx| this.toggle_mode_menu(cx)))
                    .child(current.label())
                    .child(
                        svg()
                            .path(Icon::ChevronDown.path())
                            .size(px(12.))
                            .text_color(theme.subtext),
                    ),
            )
            .when(self.mode_menu_open, |d| {
                d.child(
                    deferred(
                        div()
                            .absolute()
                            .top(px(30.))
                            .left_0()
                            .w_full()
                            .occlude()
                            .bg(theme.surface)
                            .border_1()
                            .border_color(theme.border)
                            .rounded(px(4.))
                            .children(DisplayMode::ALL.into_iter().map(|option| {
                                div()
                                    .id(ElementId::Name(format!("mode-{:?}", option).into()))
                                    .flex()
                                    .items_center()
                                    .h(px(26.))
                                    .px(px(8.))
                                    .text_size(px(13.))
                                    .hover(move |s| s.bg(hover))
                                    .when(option == current, |d| d.text_color(theme.accent))
                                    .on_click(cx.listener(move |this, _, _, cx| {
                                        this.set_display_mode(option, cx);
                                    }))
                                    .child(option.label())
                            })),
                    )
                    .with_priority(1),
                )
            })
    }

    fn render_back_button(&self, theme: &Theme, cx: &Context<Self>) -> impl IntoElement {
        let hover = theme.hover;

        div()
            .id("back-button")
            .flex()
            .items_center()
            .justify_center()
            .w_full()
            .h(px(BACK_BUTTON_HEIGHT))
            .bg(theme.surface)
            .border_t_1()
            .border_color(theme.border)
            .hover(move |s| s.bg(hover))
            .font_weight(FontWeight::BOLD)
            .on_click(cx.listener(|this, _, window, cx| this.go_back(&GoBack, window, cx)))
            .child("Back")
    }

    fn render_footer(&self, theme: &Theme) -> impl IntoElement {
        let (message, is_error): (SharedString, bool) = match (&self.status, self.controller.table()) {
            (Some(status), _) => (status.clone(), true),
            (None, Some(table)) => {
                let name = self
                    .controller
                    .loaded_path()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (
                    format!("{}  {} rows x {} columns", name, table.row_count(), table.column_count()).into(),
                    false,
                )
            }
            (None, None) => (
                format!("Select a spreadsheet (.{})", SPREADSHEET_EXTENSIONS.join(" .")).into(),
                false,
            ),
        };

        div()
            .flex()
            .flex_row()
            .items_center()
            .w_full()
            .h(px(FOOTER_HEIGHT))
            .px(px(8.))
            .bg(theme.mantle)
            .border_t_1()
            .border_color(theme.surface)
            .text_size(px(12.))
            .text_color(if is_error { theme.error } else { theme.subtext })
            .overflow_hidden()
            .text_ellipsis()
            .child(message)
    }
}

impl Render for SheetViewer {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        div()
            .flex()
            .flex_col()
            .size_full()
            .bg(theme.base)
            .text_color(theme.text)
            .key_context("SheetViewer")
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::open_file))
            .on_action(cx.listener(Self::go_back))
            .on_action(cx.listener(Self::icon_mode))
            .on_action(cx.listener(Self::list_mode))
            .map(|d| match (self.controller.state(), &self.table_view) {
                (ViewState::Editing(_), Some(view)) => d
                    .child(div().flex_1().overflow_hidden().child(view.clone()))
                    .child(self.render_back_button(theme, cx)),
                _ => d
                    .child(self.render_toolbar(theme, cx))
                    .child(div().flex_1().overflow_hidden().child(self.chooser.clone())),
            })
            .child(self.render_footer(theme))
    }
}

impl Focusable for SheetViewer {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

use std::path::{Path, PathBuf};

use gpui::prelude::FluentBuilder;
use gpui::*;

use crate::assets::Icon;
use crate::directory::{DirEntry, DirectoryListing};
use crate::state::DisplayMode;
use crate::Theme;

pub const TILE_SIZE: f32 = 96.0;
pub const ICON_SIZE: f32 = 40.0;
pub const LIST_ROW_HEIGHT: f32 = 26.0;
pub const PATH_BAR_HEIGHT: f32 = 30.0;

type SelectHandler = Box<dyn Fn(&Path, &mut Window, &mut App) + 'static>;

/// Browses one directory at a time, showing folders and spreadsheet files.
pub struct FileChooser {
    listing: DirectoryListing,
    mode: DisplayMode,
    on_select: Option<SelectHandler>,
}

impl FileChooser {
    pub fn new(dir: &Path, mode: DisplayMode, _cx: &mut Context<Self>) -> Self {
        let listing = DirectoryListing::read(dir).unwrap_or_else(|e| {
            tracing::warn!("Failed to list {}: {}", dir.display(), e);
            DirectoryListing::empty(dir)
        });
        Self {
            listing,
            mode,
            on_select: None,
        }
    }

    /// Called with the path of a spreadsheet the user clicked.
    pub fn set_select_handler<F>(&mut self, handler: F)
    where
        F: Fn(&Path, &mut Window, &mut App) + 'static,
    {
        self.on_select = Some(Box::new(handler));
    }

    pub fn dir(&self) -> &Path {
        self.listing.dir()
    }

    pub fn set_mode(&mut self, mode: DisplayMode, cx: &mut Context<Self>) {
        self.mode = mode;
        cx.notify();
    }

    /// Show `dir`; an unreadable directory leaves the current listing in place.
    pub fn navigate(&mut self, dir: &Path, cx: &mut Context<Self>) {
        match DirectoryListing::read(dir) {
            Ok(listing) => {
                tracing::debug!(dir = %dir.display(), entries = listing.entries().len(), "listed directory");
                self.listing = listing;
                cx.notify();
            }
            Err(e) => {
                tracing::warn!("Failed to list {}: {}", dir.display(), e);
            }
        }
    }

    fn open_entry(&mut self, path: PathBuf, is_dir: bool, window: &mut Window, cx: &mut Context<Self>) {
        if is_dir {
            self.navigate(&path, cx);
        } else if let Some(handler) = &self.on_select {
            handler(&path, window, cx);
        }
    }

    fn open_parent(&mut self, cx: &mut Context<Self>) {
        if let Some(parent) = self.listing.parent().map(Path::to_path_buf) {
            self.navigate(&parent, cx);
        }
    }

    fn render_path_bar(&self, theme: &Theme, cx: &Context<Self>) -> impl IntoElement {
        let has_parent = self.listing.parent().is_some();

        div()
            .flex()
            .flex_row()
            .items_center()
            .gap(px(8.))
            .h(px(PATH_BAR_HEIGHT))
            .px(px(8.))
            .bg(theme.mantle)
            .border_b_1()
            .border_color(theme.surface)
            .child(
                div()
                    .id("chooser-up")
                    .flex()
                    .items_center()
                    .justify_center()
                    .size(px(22.))
                    .rounded(px(4.))
                    .when(has_parent, |d| {
                        let hover = theme.hover;
                        d.hover(move |s| s.bg(hover))
                    })
                    .on_click(cx.listener(|this, _, _, cx| this.open_parent(cx)))
                    .child(
                        svg()
                            .path(Icon::Parent.path())
                            .size(px(14.))
                            .text_color(if has_parent { theme.text } else { theme.border }),
                    ),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_hidden()
                    .text_ellipsis()
                    .text_size(px(12.))
                    .text_color(theme.subtext)
                    .child(self.listing.dir().display().to_string()),
            )
    }

    fn render_tile(&self, idx: usize, entry: &DirEntry, theme: &Theme, cx: &Context<Self>) -> impl IntoElement {
        let path = entry.path.clone();
        let is_dir = entry.is_dir();
        let icon = if is_dir { Icon::Folder } else { Icon::Sheet };
        let hover = theme.hover;

        div()
            .id(ElementId::Name(format!("tile-{}", idx).into()))
            .flex()
            .flex_col()
            .items_center()
            .gap(px(4.))
            .w(px(TILE_SIZE))
            .h(px(TILE_SIZE))
            .p(px(6.))
            .rounded(px(6.))
            .hover(move |s| s.bg(hover))
            .on_click(cx.listener(move |this, _, window, cx| {
                this.open_entry(path.clone(), is_dir, window, cx);
            }))
            .child(
                svg()
                    .path(icon.path())
                    .size(px(ICON_SIZE))
                    .text_color(if is_dir { theme.accent } else { theme.text }),
            )
            .child(
                div()
                    .w_full()
                    .overflow_hidden()
                    .text_ellipsis()
                    .text_center()
                    .text_size(px(12.))
                    .child(entry.name.clone()),
            )
    }

    fn render_row(&self, idx: usize, entry: &DirEntry, theme: &Theme, cx: &Context<Self>) -> impl IntoElement {
        let path = entry.path.clone();
        let is_dir = entry.is_dir();
        let icon = if is_dir { Icon::Folder } else { Icon::Sheet };
        let hover = theme.hover;

        div()
            .id(ElementId::Name(format!("row-{}", idx).into()))
            .flex()
            .flex_row()
            .items_center()
            .gap(px(8.))
            .h(px(LIST_ROW_HEIGHT))
            .px(px(8.))
            .border_b_1()
            .border_color(theme.surface)
            .hover(move |s| s.bg(hover))
            .on_click(cx.listener(move |this, _, window, cx| {
                this.open_entry(path.clone(), is_dir, window, cx);
            }))
            .child(
                svg()
                    .path(icon.path())
                    .size(px(16.))
                    .text_color(if is_dir { theme.accent } else { theme.text }),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_hidden()
                    .text_ellipsis()
                    .text_size(px(13.))
                    .child(entry.name.clone()),
            )
            .child(
                div()
                    .w(px(80.))
                    .text_size(px(12.))
                    .text_color(theme.subtext)
                    .child(entry.human_size()),
            )
    }
}

impl Render for FileChooser {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let entries = self.listing.entries();

        let body = match self.mode {
            DisplayMode::IconGrid => div()
                .flex()
                .flex_row()
                .flex_wrap()
                .gap(px(8.))
                .p(px(8.))
                .children(
                    entries
                        .iter()
                        .enumerate()
                        .map(|(idx, entry)| self.render_tile(idx, entry, theme, cx)),
                ),
            DisplayMode::ListView => div()
                .flex()
                .flex_col()
                .children(
                    entries
                        .iter()
                        .enumerate()
                        .map(|(idx, entry)| self.render_row(idx, entry, theme, cx)),
                ),
        };

        div()
            .flex()
            .flex_col()
            .size_full()
            .child(self.render_path_bar(theme, cx))
            .child(
                div()
                    .id("chooser-scroll")
                    .flex_1()
                    .overflow_y_scroll()
                    .when(entries.is_empty(), |d| {
                        d.child(
                            div()
                                .p(px(16.))
                                .text_size(px(13.))
                                .text_color(theme.subtext)
                                .child("No spreadsheets here"),
                        )
                    })
                    .child(body),
            )
    }
}

use gpui::*;

use crate::field::{TextField, FIELD_HEIGHT};
use crate::table::Table;
use crate::Theme;

pub const CELL_WIDTH: f32 = 140.0;
pub const HEADER_HEIGHT: f32 = 28.0;
pub const CELL_SPACING: f32 = 5.0;

/// A loaded table laid out as bold column headers followed by one
/// editable field per cell, row-major.
///
/// Fields start with the table's text; whatever the user types stays in
/// the fields and is dropped together with the view.
pub struct TableView {
    columns: Vec<SharedString>,
    fields: Vec<Vec<Entity<TextField>>>,
}

impl TableView {
    pub fn new(table: &Table, cx: &mut Context<Self>) -> Self {
        let columns = table.columns().iter().cloned().map(SharedString::from).collect();
        let fields = table
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|value| {
                        let value = value.clone();
                        cx.new(|cx| TextField::new(value, cx))
                    })
                    .collect()
            })
            .collect();

        Self { columns, fields }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.iter().map(Vec::len).sum()
    }

    fn render_header(&self, theme: &Theme) -> impl IntoElement {
        div()
            .flex()
            .flex_row()
            .gap(px(CELL_SPACING))
            .h(px(HEADER_HEIGHT))
            .children(self.columns.iter().map(|name| {
                div()
                    .w(px(CELL_WIDTH))
                    .flex_none()
                    .flex()
                    .items_center()
                    .justify_center()
                    .overflow_hidden()
                    .text_ellipsis()
                    .text_size(px(14.))
                    .text_color(theme.text)
                    .font_weight(FontWeight::BOLD)
                    .child(name.clone())
            }))
    }

    fn render_rows(&self) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .gap(px(CELL_SPACING))
            .children(self.fields.iter().map(|row| {
                div()
                    .flex()
                    .flex_row()
                    .gap(px(CELL_SPACING))
                    .h(px(FIELD_HEIGHT))
                    .children(row.iter().map(|field| {
                        div().w(px(CELL_WIDTH)).flex_none().child(field.clone())
                    }))
            }))
    }
}

impl Render for TableView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        div()
            .id("table-scroll")
            .size_full()
            .overflow_scroll()
            .p(px(8.))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap(px(CELL_SPACING))
                    .child(self.render_header(theme))
                    .child(self.render_rows()),
            )
    }
}

// Single-line editable text field used for every cell of a loaded table

use std::ops::Range;

use gpui::*;
use unicode_segmentation::*;

use crate::Theme;

pub const FIELD_HEIGHT: f32 = 28.0;

actions!(
    text_field,
    [
        Backspace,
        Delete,
        Left,
        Right,
        SelectLeft,
        SelectRight,
        SelectAll,
        Home,
        End,
        WordLeft,
        WordRight,
        ShowCharacterPalette,
        Paste,
        Cut,
        Copy,
    ]
);

fn is_word_char(grapheme: &str) -> bool {
    grapheme
        .chars()
        .next()
        .map(|c| c.is_alphanumeric() || c == '_')
        .unwrap_or(false)
}

/// Text and selection of a field, independent of any window.
///
/// Offsets are UTF-8 byte offsets that always sit on grapheme boundaries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldBuffer {
    content: String,
    selected_range: Range<usize>,
    selection_reversed: bool,
    marked_range: Option<Range<usize>>,
}

impl FieldBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let content = text.into();
        let len = content.len();
        Self {
            content,
            selected_range: len..len,
            selection_reversed: false,
            marked_range: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn selected_range(&self) -> Range<usize> {
        self.selected_range.clone()
    }

    pub fn selected_text(&self) -> &str {
        &self.content[self.selected_range.clone()]
    }

    pub fn is_reversed(&self) -> bool {
        self.selection_reversed
    }

    pub fn cursor(&self) -> usize {
        if self.selection_reversed {
            self.selected_range.start
        } else {
            self.selected_range.end
        }
    }

    pub fn move_to(&mut self, offset: usize) {
        let offset = offset.min(self.content.len());
        self.selected_range = offset..offset;
        self.selection_reversed = false;
    }

    /// Extend the selection so its moving end lands on `offset`.
    pub fn select_to(&mut self, offset: usize) {
        let offset = offset.min(self.content.len());
        if self.selection_reversed {
            self.selected_range.start = offset;
        } else {
            self.selected_range.end = offset;
        }
        if self.selected_range.end < self.selected_range.start {
            self.selection_reversed = !self.selection_reversed;
            self.selected_range = self.selected_range.end..self.selected_range.start;
        }
    }

    pub fn select_all(&mut self) {
        self.move_to(0);
        self.select_to(self.content.len());
    }

    pub fn left(&mut self) {
        if self.selected_range.is_empty() {
            self.move_to(self.previous_boundary(self.cursor()));
        } else {
            self.move_to(self.selected_range.start);
        }
    }

    pub fn right(&mut self) {
        if self.selected_range.is_empty() {
            self.move_to(self.next_boundary(self.cursor()));
        } else {
            self.move_to(self.selected_range.end);
        }
    }

    pub fn backspace(&mut self) {
        if self.selected_range.is_empty() {
            self.select_to(self.previous_boundary(self.cursor()));
        }
        self.replace(None, "");
    }

    pub fn delete(&mut self) {
        if self.selected_range.is_empty() {
            self.select_to(self.next_boundary(self.cursor()));
        }
        self.replace(None, "");
    }

    /// Replace `range`, else the marked text, else the selection, with `text`.
    pub fn replace(&mut self, range: Option<Range<usize>>, text: &str) {
        let range = self.clamp_range(
            range
                .or(self.marked_range.clone())
                .unwrap_or(self.selected_range.clone()),
        );
        self.content.replace_range(range.clone(), text);
        let end = range.start + text.len();
        self.selected_range = end..end;
        self.selection_reversed = false;
        self.marked_range = None;
    }

    /// Insert IME composition text, keeping it marked.
    pub fn replace_and_mark(
        &mut self,
        range: Option<Range<usize>>,
        text: &str,
        selected_within: Option<Range<usize>>,
    ) {
        let range = self.clamp_range(
            range
                .or(self.marked_range.clone())
                .unwrap_or(self.selected_range.clone()),
        );
        self.content.replace_range(range.clone(), text);
        self.marked_range = (!text.is_empty()).then(|| range.start..range.start + text.len());
        self.selected_range = selected_within
            .map(|inner| range.start + inner.start..range.start + inner.end)
            .unwrap_or_else(|| range.start + text.len()..range.start + text.len());
    }

    /// Order `range` and pull both ends back onto char boundaries within the text.
    fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let floor = |mut offset: usize| {
            offset = offset.min(self.content.len());
            while !self.content.is_char_boundary(offset) {
                offset -= 1;
            }
            offset
        };
        let (start, end) = (floor(range.start), floor(range.end));
        start.min(end)..start.max(end)
    }

    pub fn marked_range(&self) -> Option<Range<usize>> {
        self.marked_range.clone()
    }

    pub fn unmark(&mut self) {
        self.marked_range = None;
    }

    pub fn previous_boundary(&self, offset: usize) -> usize {
        self.content
            .grapheme_indices(true)
            .rev()
            .find_map(|(idx, _)| (idx < offset).then_some(idx))
            .unwrap_or(0)
    }

    pub fn next_boundary(&self, offset: usize) -> usize {
        self.content
            .grapheme_indices(true)
            .find_map(|(idx, _)| (idx > offset).then_some(idx))
            .unwrap_or(self.content.len())
    }

    /// Start of the word before `offset`, skipping separators first.
    pub fn previous_word_boundary(&self, offset: usize) -> usize {
        let mut seen_word = false;
        for (idx, grapheme) in self.content.grapheme_indices(true).rev() {
            if idx >= offset {
                continue;
            }
            if is_word_char(grapheme) {
                seen_word = true;
            } else if seen_word {
                return idx + grapheme.len();
            }
        }
        0
    }

    /// End of the word after `offset`.
    pub fn next_word_boundary(&self, offset: usize) -> usize {
        let mut seen_word = false;
        for (idx, grapheme) in self.content.grapheme_indices(true) {
            if idx < offset {
                continue;
            }
            if is_word_char(grapheme) {
                seen_word = true;
            } else if seen_word {
                return idx;
            }
        }
        self.content.len()
    }

    pub fn offset_from_utf16(&self, offset: usize) -> usize {
        let mut utf8_offset = 0;
        let mut utf16_count = 0;
        for ch in self.content.chars() {
            if utf16_count >= offset {
                break;
            }
            utf16_count += ch.len_utf16();
            utf8_offset += ch.len_utf8();
        }
        utf8_offset
    }

    pub fn offset_to_utf16(&self, offset: usize) -> usize {
        self.content[..offset.min(self.content.len())]
            .chars()
            .map(char::len_utf16)
            .sum()
    }

    pub fn range_to_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_to_utf16(range.start)..self.offset_to_utf16(range.end)
    }

    pub fn range_from_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_from_utf16(range.start)..self.offset_from_utf16(range.end)
    }
}

/// An editable cell. Edits stay inside the field and are never saved.
pub struct TextField {
    focus_handle: FocusHandle,
    buffer: FieldBuffer,
    last_layout: Option<ShapedLine>,
    last_bounds: Option<Bounds<Pixels>>,
    is_selecting: bool,
    scroll_offset: Pixels,
}

impl TextField {
    pub fn new(text: impl Into<String>, cx: &mut Context<Self>) -> Self {
        Self {
            focus_handle: cx.focus_handle(),
            buffer: FieldBuffer::new(text),
            last_layout: None,
            last_bounds: None,
            is_selecting: false,
            scroll_offset: px(0.),
        }
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    fn edit(&mut self, cx: &mut Context<Self>, f: impl FnOnce(&mut FieldBuffer)) {
        f(&mut self.buffer);
        cx.notify();
    }

    fn backspace(&mut self, _: &Backspace, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, FieldBuffer::backspace);
    }

    fn delete(&mut self, _: &Delete, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, FieldBuffer::delete);
    }

    fn left(&mut self, _: &Left, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, FieldBuffer::left);
    }

    fn right(&mut self, _: &Right, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, FieldBuffer::right);
    }

    fn select_left(&mut self, _: &SelectLeft, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, |b| b.select_to(b.previous_boundary(b.cursor())));
    }

    fn select_right(&mut self, _: &SelectRight, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, |b| b.select_to(b.next_boundary(b.cursor())));
    }

    fn select_all(&mut self, _: &SelectAll, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, FieldBuffer::select_all);
    }

    fn home(&mut self, _: &Home, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, |b| b.move_to(0));
    }

    fn end(&mut self, _: &End, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, |b| b.move_to(b.text().len()));
    }

    fn word_left(&mut self, _: &WordLeft, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, |b| b.move_to(b.previous_word_boundary(b.cursor())));
    }

    fn word_right(&mut self, _: &WordRight, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, |b| b.move_to(b.next_word_boundary(b.cursor())));
    }

    fn show_character_palette(&mut self, _: &ShowCharacterPalette, window: &mut Window, _: &mut Context<Self>) {
        window.show_character_palette();
    }

    fn paste(&mut self, _: &Paste, _: &mut Window, cx: &mut Context<Self>) {
        if let Some(text) = cx.read_from_clipboard().and_then(|item| item.text()) {
            // Single-line field: newlines become spaces
            let text = text.replace(['\r', '\n'], " ");
            self.edit(cx, |b| b.replace(None, &text));
        }
    }

    fn copy(&mut self, _: &Copy, _: &mut Window, cx: &mut Context<Self>) {
        if !self.buffer.selected_range().is_empty() {
            cx.write_to_clipboard(ClipboardItem::new_string(self.buffer.selected_text().to_string()));
        }
    }

    fn cut(&mut self, _: &Cut, _: &mut Window, cx: &mut Context<Self>) {
        if !self.buffer.selected_range().is_empty() {
            cx.write_to_clipboard(ClipboardItem::new_string(self.buffer.selected_text().to_string()));
            self.edit(cx, |b| b.replace(None, ""));
        }
    }

    fn on_mouse_down(&mut self, event: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        self.is_selecting = true;
        self.focus_handle.focus(window);
        let offset = self.index_for_mouse_position(event.position);
        if event.modifiers.shift {
            self.edit(cx, |b| b.select_to(offset));
        } else {
            self.edit(cx, |b| b.move_to(offset));
        }
    }

    fn on_mouse_up(&mut self, _: &MouseUpEvent, _: &mut Window, _: &mut Context<Self>) {
        self.is_selecting = false;
    }

    fn on_mouse_move(&mut self, event: &MouseMoveEvent, _: &mut Window, cx: &mut Context<Self>) {
        if self.is_selecting {
            let offset = self.index_for_mouse_position(event.position);
            self.edit(cx, |b| b.select_to(offset));
        }
    }

    fn index_for_mouse_position(&self, position: Point<Pixels>) -> usize {
        let (Some(bounds), Some(line)) = (self.last_bounds.as_ref(), self.last_layout.as_ref()) else {
            return 0;
        };
        if self.buffer.text().is_empty() || position.y < bounds.top() {
            return 0;
        }
        if position.y > bounds.bottom() {
            return self.buffer.text().len();
        }
        line.closest_index_for_x(position.x - bounds.left() + self.scroll_offset)
    }
}

impl EntityInputHandler for TextField {
    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        actual_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<String> {
        let range = self.buffer.range_from_utf16(&range_utf16);
        actual_range.replace(self.buffer.range_to_utf16(&range));
        Some(self.buffer.text()[range].to_string())
    }

    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<UTF16Selection> {
        Some(UTF16Selection {
            range: self.buffer.range_to_utf16(&self.buffer.selected_range()),
            reversed: self.buffer.is_reversed(),
        })
    }

    fn marked_text_range(&self, _window: &mut Window, _cx: &mut Context<Self>) -> Option<Range<usize>> {
        self.buffer
            .marked_range()
            .map(|range| self.buffer.range_to_utf16(&range))
    }

    fn unmark_text(&mut self, _window: &mut Window, _cx: &mut Context<Self>) {
        self.buffer.unmark();
    }

    fn replace_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let range = range_utf16.map(|r| self.buffer.range_from_utf16(&r));
        self.edit(cx, |b| b.replace(range, new_text));
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        new_selected_range_utf16: Option<Range<usize>>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let range = range_utf16.map(|r| self.buffer.range_from_utf16(&r));
        // Selection inside the composition is relative to the new text
        let selected = new_selected_range_utf16.map(|r| {
            let inner = FieldBuffer::new(new_text);
            inner.range_from_utf16(&r)
        });
        self.edit(cx, |b| b.replace_and_mark(range, new_text, selected));
    }

    fn bounds_for_range(
        &mut self,
        range_utf16: Range<usize>,
        bounds: Bounds<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Bounds<Pixels>> {
        let line = self.last_layout.as_ref()?;
        let range = self.buffer.range_from_utf16(&range_utf16);
        Some(Bounds::from_corners(
            point(bounds.left() + line.x_for_index(range.start) - self.scroll_offset, bounds.top()),
            point(bounds.left() + line.x_for_index(range.end) - self.scroll_offset, bounds.bottom()),
        ))
    }

    fn character_index_for_point(
        &mut self,
        point: gpui::Point<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<usize> {
        let local = self.last_bounds?.localize(&point)?;
        let line = self.last_layout.as_ref()?;
        let utf8_index = line.index_for_x(local.x + self.scroll_offset)?;
        Some(self.buffer.offset_to_utf16(utf8_index))
    }
}

/// Paints the shaped text, selection and cursor of a [`TextField`].
struct TextFieldElement {
    field: Entity<TextField>,
}

struct TextFieldPaint {
    line: Option<ShapedLine>,
    cursor: Option<PaintQuad>,
    selection: Option<PaintQuad>,
    scroll_offset: Pixels,
}

impl IntoElement for TextFieldElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for TextFieldElement {
    type RequestLayoutState = ();
    type PrepaintState = TextFieldPaint;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let mut style = Style::default();
        style.size.width = relative(1.).into();
        style.size.height = window.line_height().into();
        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let field = self.field.read(cx);
        let buffer = &field.buffer;
        let style = window.text_style();
        let accent = cx.global::<Theme>().accent;
        let selection_color = cx.global::<Theme>().selection;

        // An empty field still shapes one invisible glyph so the line has height
        let (text, color): (SharedString, Hsla) = if buffer.text().is_empty() {
            (" ".into(), Hsla::transparent_black())
        } else {
            (buffer.text().to_string().into(), style.color)
        };

        let base_run = TextRun {
            len: text.len(),
            font: style.font(),
            color,
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let runs: Vec<TextRun> = match buffer.marked_range() {
            Some(marked) if !buffer.text().is_empty() => [
                (0..marked.start, None),
                (
                    marked.clone(),
                    Some(UnderlineStyle {
                        color: Some(color),
                        thickness: px(1.0),
                        wavy: false,
                    }),
                ),
                (marked.end..text.len(), None),
            ]
            .into_iter()
            .filter(|(range, _)| !range.is_empty())
            .map(|(range, underline)| TextRun {
                len: range.len(),
                underline,
                ..base_run.clone()
            })
            .collect(),
            _ => vec![base_run],
        };

        let font_size = style.font_size.to_pixels(window.rem_size());
        let line = window.text_system().shape_line(text, font_size, &runs, None);

        let selected = buffer.selected_range();
        let cursor_x = if buffer.text().is_empty() {
            px(0.)
        } else {
            line.x_for_index(buffer.cursor())
        };

        // Keep the cursor inside the visible part of the field
        let visible_width = bounds.size.width - px(2.);
        let mut scroll_offset = field.scroll_offset;
        if cursor_x - scroll_offset > visible_width {
            scroll_offset = cursor_x - visible_width;
        }
        if cursor_x < scroll_offset {
            scroll_offset = cursor_x;
        }
        if scroll_offset < px(0.) {
            scroll_offset = px(0.);
        }

        let (selection, cursor) = if selected.is_empty() {
            let cursor = fill(
                Bounds::new(
                    point(bounds.left() + cursor_x - scroll_offset, bounds.top()),
                    size(px(1.5), bounds.bottom() - bounds.top()),
                ),
                accent,
            );
            (None, Some(cursor))
        } else {
            let selection = fill(
                Bounds::from_corners(
                    point(bounds.left() + line.x_for_index(selected.start) - scroll_offset, bounds.top()),
                    point(bounds.left() + line.x_for_index(selected.end) - scroll_offset, bounds.bottom()),
                ),
                selection_color,
            );
            (Some(selection), None)
        };

        TextFieldPaint {
            line: Some(line),
            cursor,
            selection,
            scroll_offset,
        }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let focus_handle = self.field.read(cx).focus_handle.clone();
        window.handle_input(&focus_handle, ElementInputHandler::new(bounds, self.field.clone()), cx);

        if let Some(selection) = prepaint.selection.take() {
            window.paint_quad(selection);
        }

        let Some(line) = prepaint.line.take() else {
            return;
        };
        let origin = point(bounds.origin.x - prepaint.scroll_offset, bounds.origin.y);
        if let Err(e) = line.paint(origin, window.line_height(), window, cx) {
            tracing::error!("failed to paint field text: {}", e);
        }

        if focus_handle.is_focused(window) {
            if let Some(cursor) = prepaint.cursor.take() {
                window.paint_quad(cursor);
            }
        }

        let scroll_offset = prepaint.scroll_offset;
        self.field.update(cx, |field, _cx| {
            field.last_layout = Some(line);
            field.last_bounds = Some(bounds);
            field.scroll_offset = scroll_offset;
        });
    }
}

impl Render for TextField {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let focused = self.focus_handle.is_focused(window);

        div()
            .flex()
            .items_center()
            .key_context("TextField")
            .track_focus(&self.focus_handle)
            .cursor(CursorStyle::IBeam)
            .on_action(cx.listener(Self::backspace))
            .on_action(cx.listener(Self::delete))
            .on_action(cx.listener(Self::left))
            .on_action(cx.listener(Self::right))
            .on_action(cx.listener(Self::select_left))
            .on_action(cx.listener(Self::select_right))
            .on_action(cx.listener(Self::select_all))
            .on_action(cx.listener(Self::home))
            .on_action(cx.listener(Self::end))
            .on_action(cx.listener(Self::word_left))
            .on_action(cx.listener(Self::word_right))
            .on_action(cx.listener(Self::show_character_palette))
            .on_action(cx.listener(Self::paste))
            .on_action(cx.listener(Self::cut))
            .on_action(cx.listener(Self::copy))
            .on_mouse_down(MouseButton::Left, cx.listener(Self::on_mouse_down))
            .on_mouse_up(MouseButton::Left, cx.listener(Self::on_mouse_up))
            .on_mouse_up_out(MouseButton::Left, cx.listener(Self::on_mouse_up))
            .on_mouse_move(cx.listener(Self::on_mouse_move))
            .w_full()
            .h(px(FIELD_HEIGHT))
            .px(px(4.))
            .bg(theme.field)
            .text_color(theme.field_text)
            .border_1()
            .border_color(if focused { theme.accent } else { theme.border })
            .rounded(px(3.))
            .overflow_hidden()
            .line_height(px(20.))
            .text_size(px(14.))
            .child(TextFieldElement {
                field: cx.entity().clone(),
            })
    }
}

impl Focusable for TextField {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

#[cfg(test)]
mod tests {
    // Not a glob: `gpui::*` would shadow the built-in test attribute.
    use super::FieldBuffer;

    #[test]
    fn test_new_places_cursor_at_end() {
        let buffer = FieldBuffer::new("Ann");
        assert_eq!(buffer.cursor(), 3);
        assert!(buffer.selected_range().is_empty());
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut buffer = FieldBuffer::new("caf\u{65}\u{301}");
        buffer.backspace();
        assert_eq!(buffer.text(), "caf");
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut buffer = FieldBuffer::new("Bo");
        buffer.select_all();
        assert_eq!(buffer.selected_text(), "Bo");
        buffer.replace(None, "Cy");
        assert_eq!(buffer.text(), "Cy");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_reversed_selection() {
        let mut buffer = FieldBuffer::new("hello");
        buffer.select_to(2);
        assert_eq!(buffer.selected_range(), 2..5);
        assert_eq!(buffer.cursor(), 2);
        buffer.left();
        assert_eq!(buffer.cursor(), 2);
        assert!(buffer.selected_range().is_empty());
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut buffer = FieldBuffer::new("abc");
        buffer.move_to(1);
        buffer.delete();
        assert_eq!(buffer.text(), "ac");
        buffer.move_to(2);
        buffer.delete();
        assert_eq!(buffer.text(), "ac");
    }

    #[test]
    fn test_word_boundaries() {
        let buffer = FieldBuffer::new("foo bar_baz  qux");
        assert_eq!(buffer.previous_word_boundary(16), 13);
        assert_eq!(buffer.previous_word_boundary(13), 4);
        assert_eq!(buffer.previous_word_boundary(3), 0);
        assert_eq!(buffer.next_word_boundary(0), 3);
        assert_eq!(buffer.next_word_boundary(3), 11);
        assert_eq!(buffer.next_word_boundary(13), 16);
    }

    #[test]
    fn test_utf16_offsets() {
        let buffer = FieldBuffer::new("a\u{1F600}b");
        assert_eq!(buffer.offset_to_utf16(5), 3);
        assert_eq!(buffer.offset_from_utf16(3), 5);
        assert_eq!(buffer.range_from_utf16(&(1..3)), 1..5);
    }

    #[test]
    fn test_marked_text_is_replaced_by_commit() {
        let mut buffer = FieldBuffer::new("x");
        buffer.replace_and_mark(None, "ni", None);
        assert_eq!(buffer.marked_range(), Some(1..3));
        buffer.replace(None, "\u{4f60}");
        assert_eq!(buffer.text(), "x\u{4f60}");
        assert_eq!(buffer.marked_range(), None);
    }

    #[test]
    fn test_out_of_range_replace_is_clamped() {
        let mut buffer = FieldBuffer::new("abc");
        buffer.replace(Some(2..10), "Z");
        assert_eq!(buffer.text(), "abZ");

        buffer.replace(Some(3..1), "-");
        assert_eq!(buffer.text(), "a-");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_out_of_range_mark_is_clamped() {
        let mut buffer = FieldBuffer::new("\u{e9}");
        buffer.replace_and_mark(Some(1..9), "e", None);
        assert_eq!(buffer.text(), "e");
        assert_eq!(buffer.marked_range(), Some(0..1));
    }
}

// The editable text widget: composes the line buffer, dual-space
// cursor, viewport and render cache, and keeps all four consistent
// through character edits, arrow navigation, mouse selection, wheel
// scrolling and resizes. Bounds violations are clamped or rejected,
// never reported; there is no error state in here.

use super::cursor::Cursor;
use super::line_buffer::LineBuffer;
use super::render_cache::RenderCache;
use super::viewport::{BoundsShift, Viewport};
use super::{CellSize, CharPos, Rect};
use crate::draw_context::{DrawContext, LineArtifact};

/// Editing mode. The selection anchor lives inside `Highlight`, so an
/// anchor cannot exist while the widget is in normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Normal,
    Highlight { anchor: CharPos },
}

/// Colors used when rendering the widget, 0xRRGGBBAA.
#[derive(Debug, Clone, Copy)]
pub struct EntryColors {
    pub background: u32,
    pub text: u32,
    pub highlight: u32,
    pub caret: u32,
}

impl Default for EntryColors {
    fn default() -> Self {
        EntryColors {
            background: 0x1e1e1eff,
            text: 0xffffffff,
            highlight: 0x264f78ff,
            caret: 0xffffffff,
        }
    }
}

/// Order two positions by line, then column.
fn order_positions(a: CharPos, b: CharPos) -> (CharPos, CharPos) {
    if (a.line, a.col) <= (b.line, b.col) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Floor `col` to a char boundary of `s`, capped at its length. Mouse
/// clicks and column arithmetic address bytes; this keeps line splits
/// from landing inside a multi-byte character.
fn floor_char_boundary(s: &str, col: usize) -> usize {
    let mut i = col.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// The visible substring of a buffer line, clipped to the horizontal
/// window and the line's length.
fn visible_slice<'a>(buffer: &'a LineBuffer, viewport: &Viewport, line: i32) -> &'a str {
    if line < 0 {
        return "";
    }
    let text = buffer.line(line as usize);
    let start = (viewport.min().col.max(0) as usize).min(text.len());
    let end = (viewport.max().col.max(0) as usize).min(text.len());
    text.get(start..end).unwrap_or("")
}

pub struct TextEntry {
    buffer: LineBuffer,
    cursor: Cursor,
    viewport: Viewport,
    cache: RenderCache<Box<dyn LineArtifact>>,
    mode: EntryMode,
    colors: EntryColors,
    // horizontal scroll step, in columns
    bounds_step: i32,
    dragging: bool,
    hidden: bool,
}

impl TextEntry {
    pub fn new(rect: Rect, cell: CellSize, contents: &str, colors: EntryColors) -> Self {
        let buffer = LineBuffer::from_text(contents);
        let viewport = Viewport::new(rect, cell);
        let cache = RenderCache::new(Self::window_len(&buffer, &viewport));
        TextEntry {
            buffer,
            cursor: Cursor::new(),
            viewport,
            cache,
            mode: EntryMode::Normal,
            colors,
            bounds_step: 5,
            dragging: false,
            hidden: false,
        }
    }

    // ------------------------------------------------------------------
    // contents

    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    pub fn to_text(&self) -> String {
        self.buffer.to_text()
    }

    /// Replace the whole contents: window back to the origin, cursor to
    /// (0, 0), cache rebuilt from scratch.
    pub fn set_contents(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.viewport.reset_bounds_x();
        self.viewport.reset_bounds_y();
        self.cursor = Cursor::new();
        self.mode = EntryMode::Normal;
        self.dragging = false;
        self.cache
            .rebuild(Self::window_len(&self.buffer, &self.viewport));
    }

    // ------------------------------------------------------------------
    // editing

    /// Insert a character at the cursor. An active selection is erased
    /// first; a newline splits the current line at the cursor column.
    pub fn insert_char(&mut self, c: char) {
        if matches!(self.mode, EntryMode::Highlight { .. }) {
            self.erase_highlighted_section();
        }
        let pos = self.cursor.real();
        let (col, line) = (pos.col.max(0) as usize, pos.line.max(0) as usize);
        self.buffer.insert(col, line, c);

        if c == '\n' {
            // redistribute the tail of the split line onto the new one
            let full = self.buffer.line(line).to_string();
            let split = floor_char_boundary(&full, col);
            let tail = full[split..].to_string();
            self.buffer.set_line(line, &full[..split]);
            self.buffer.set_line(line + 1, &tail);

            let was_scrolled_x = self.viewport.min().col > 0;
            self.viewport.reset_bounds_x();

            // follow the cursor past the bottom edge
            if pos.line + 1 >= self.viewport.max().line && self.viewport.move_bounds(0, 1) {
                self.cache.shift(1);
            }
            self.cursor
                .set_position(CharPos::new(0, pos.line + 1), &self.viewport);
            self.sync_cache_len();

            if was_scrolled_x {
                // every visible substring changed with the horizontal reset
                let len = self.cache.len();
                self.cache.rebuild(len);
            } else {
                self.invalidate_from_row_of(pos.line);
            }
        } else {
            self.invalidate_row_of(pos.line);
            self.cursor.move_characters(1, 0, &self.buffer);
            let step = self.bounds_step;
            let shift = self.viewport.check_bounds(&mut self.cursor, step, 0);
            self.apply_shift(shift, 0);
        }
    }

    /// Backspace. At column zero the current line is merged onto the end
    /// of the previous one; at the very start of the buffer this is a
    /// no-op. Suppressed while a mouse drag is in progress.
    pub fn remove_char(&mut self) {
        if self.dragging {
            return;
        }
        if matches!(self.mode, EntryMode::Highlight { .. }) {
            self.erase_highlighted_section();
            return;
        }
        let pos = self.cursor.real();
        if pos.col == 0 && pos.line == 0 {
            return;
        }

        if pos.col == 0 {
            let line = pos.line as usize;
            let prev_len = self.buffer.line_len(line - 1) as i32;
            let merged = format!("{}{}", self.buffer.line(line - 1), self.buffer.line(line));
            self.buffer.set_line(line - 1, &merged);
            self.buffer.remove_line(line);

            let row = pos.line - self.viewport.min().line;
            if row < 0 {
                // merge above the window: the window follows by one
                // line, which cancels the numbering shift of the
                // deletion, so the surviving slots keep their content
                self.viewport.move_bounds(0, -1);
                self.sync_cache_len();
            } else {
                // the merged line's slot goes away; the rows below
                // slide up
                if (row as usize) < self.cache.len() {
                    self.cache.remove_slot(row as usize);
                }
                self.sync_cache_len();

                // follow the cursor past the top edge
                if pos.line - 1 < self.viewport.min().line && self.viewport.move_bounds(0, -1) {
                    self.cache.shift(-1);
                    self.sync_cache_len();
                }
            }
            self.cursor
                .set_position(CharPos::new(prev_len, pos.line - 1), &self.viewport);
            self.ensure_cursor_visible_x();
            self.invalidate_row_of(pos.line - 1);
        } else {
            self.buffer.erase((pos.col - 1) as usize, pos.line as usize, true);
            self.cursor.move_characters(-1, 0, &self.buffer);
            let step = self.h_step(-1);
            let shift = self.viewport.check_bounds(&mut self.cursor, step, 0);
            self.apply_shift(shift, 0);
            self.invalidate_row_of(pos.line);
        }
    }

    /// Delete the character under the cursor (the Delete key). On the
    /// last line the newline-erase path is disabled so the buffer's
    /// final line can never be removed.
    pub fn delete_char(&mut self) {
        if matches!(self.mode, EntryMode::Highlight { .. }) {
            self.erase_highlighted_section();
            return;
        }
        let pos = self.cursor.real();
        let line = pos.line.max(0) as usize;
        if line >= self.buffer.line_count() {
            return;
        }
        let last = line == self.buffer.line_count() - 1;
        if self.buffer.line(line).is_empty() {
            self.buffer.erase(0, line, !last);
            if !last {
                let row = pos.line - self.viewport.min().line;
                if row < 0 {
                    // deletion above the window: every visible line
                    // slides up by one
                    self.cache.shift(1);
                } else if (row as usize) < self.cache.len() {
                    self.cache.remove_slot(row as usize);
                }
                self.sync_cache_len();
            }
        } else {
            self.buffer.erase(pos.col.max(0) as usize, line, true);
            self.invalidate_row_of(pos.line);
        }
    }

    // ------------------------------------------------------------------
    // navigation

    /// Arrow-key navigation. Horizontal motion stops at the start and
    /// end of the line's content; vertical motion stops at the first and
    /// last line and snaps the cursor to the end of a shorter line.
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let pos = self.cursor.real();
        let mut dx = dx;
        if dx < 0 && pos.col == 0 {
            dx = 0;
        }
        if dx > 0 && pos.col >= self.buffer.line_len(pos.line.max(0) as usize) as i32 {
            dx = 0;
        }
        if dx == 0 && dy == 0 {
            return;
        }
        if !self.cursor.move_characters(dx, dy, &self.buffer) {
            return;
        }
        let step = self.h_step(dx);
        let shift = self.viewport.check_bounds(&mut self.cursor, step, dy);
        self.apply_shift(shift, dy);

        if dy != 0 {
            let pos = self.cursor.real();
            if (self.buffer.line_len(pos.line.max(0) as usize) as i32) < pos.col {
                self.jump_to_eol();
            }
        }
    }

    /// Move the cursor to the end of the current line, scrolling the
    /// window horizontally if the end is not visible.
    pub fn jump_to_eol(&mut self) {
        if self.cursor.jump_to_end_of_line(&self.buffer, &self.viewport) {
            self.ensure_cursor_visible_x();
        }
    }

    /// Programmatic reposition in character units; the column is treated
    /// as end-of-line when it exceeds the line's length.
    pub fn set_cursor_position(&mut self, col: i32, line: i32) {
        let pos = self.clamp_to_content(CharPos::new(col, line));
        self.cursor.set_position(pos, &self.viewport);
    }

    // ------------------------------------------------------------------
    // mouse

    pub fn check_clicked(&self, mx: i32, my: i32) -> bool {
        self.viewport.rect().contains(mx, my)
    }

    /// Button press: place the cursor on the clicked cell and anchor a
    /// potential drag selection there.
    pub fn mouse_down(&mut self, mx: i32, my: i32) {
        let pos = self.clamp_to_content(self.viewport.char_at_pixel(mx, my));
        self.cursor.set_position(pos, &self.viewport);
        self.dragging = true;
        self.start_highlight();
    }

    /// Drag motion: extend the selection from the anchor to the cell
    /// under the mouse.
    pub fn mouse_move(&mut self, mx: i32, my: i32) {
        if !self.dragging {
            return;
        }
        let pos = self.clamp_to_content(self.viewport.char_at_pixel(mx, my));
        self.cursor.set_position(pos, &self.viewport);
    }

    /// Button release: a click without drag motion leaves no selection.
    pub fn mouse_up(&mut self) {
        self.dragging = false;
        self.conditional_stop_highlight();
    }

    /// Mouse-wheel scroll; positive moves the content up. Never moves
    /// the real cursor.
    pub fn scroll(&mut self, lines: i32) {
        if lines == 0 {
            return;
        }
        if self.viewport.move_bounds(0, lines) {
            self.cache.shift(lines);
            self.sync_cache_len();
            self.cursor.clamp_display(&self.viewport);
        }
    }

    // ------------------------------------------------------------------
    // selection

    pub fn start_highlight(&mut self) {
        self.mode = EntryMode::Highlight {
            anchor: self.cursor.real(),
        };
    }

    pub fn stop_highlight(&mut self) {
        self.mode = EntryMode::Normal;
    }

    /// Drop the selection only if nothing is actually highlighted.
    pub fn conditional_stop_highlight(&mut self) {
        if let EntryMode::Highlight { anchor } = self.mode {
            if anchor == self.cursor.real() {
                self.mode = EntryMode::Normal;
            }
        }
    }

    /// Remove the highlighted range from the buffer and leave the cursor
    /// at its start, back in normal mode.
    pub fn erase_highlighted_section(&mut self) {
        let EntryMode::Highlight { anchor } = self.mode else {
            return;
        };
        self.mode = EntryMode::Normal;
        let (start, end) = order_positions(anchor, self.cursor.real());
        if start == end {
            return;
        }

        let last = self.buffer.line_count() - 1;
        let start_line = (start.line.max(0) as usize).min(last);
        let end_line = (end.line.max(0) as usize).min(last);
        if start_line == end_line {
            let text = self.buffer.line(start_line).to_string();
            let s = floor_char_boundary(&text, start.col.max(0) as usize);
            let e = floor_char_boundary(&text, end.col.max(0) as usize);
            self.buffer
                .set_line(start_line, &format!("{}{}", &text[..s], &text[e..]));
        } else {
            let head = self.buffer.line(start_line);
            let head = head[..floor_char_boundary(head, start.col.max(0) as usize)].to_string();
            let tail = self.buffer.line(end_line);
            let tail = tail[floor_char_boundary(tail, end.col.max(0) as usize)..].to_string();
            self.buffer.set_line(start_line, &format!("{head}{tail}"));
            for _ in start_line + 1..=end_line {
                self.buffer.remove_line(start_line + 1);
            }
        }

        self.cursor.set_position(
            CharPos::new(start.col, start_line as i32),
            &self.viewport,
        );
        self.ensure_cursor_visible_y();
        self.ensure_cursor_visible_x();
        self.sync_cache_len();
        self.invalidate_from_row_of(start_line as i32);
    }

    // ------------------------------------------------------------------
    // layout / visibility

    /// Host window resize: recompute the visible extent and rebuild the
    /// cache for the new window.
    pub fn resize_to(&mut self, w: i32, h: i32) {
        self.viewport.resize_to(w, h);
        self.cursor.clamp_display(&self.viewport);
        self.cache
            .rebuild(Self::window_len(&self.buffer, &self.viewport));
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn rect(&self) -> Rect {
        self.viewport.rect()
    }

    // ------------------------------------------------------------------
    // rendering

    /// Draw background, selection, visible line artifacts and optionally
    /// the caret. Empty cache slots are filled lazily through `ctx`.
    pub fn render(&mut self, ctx: &mut dyn DrawContext, show_cursor: bool) {
        if self.hidden {
            return;
        }
        let rect = self.viewport.rect();
        let cell = self.viewport.cell();
        ctx.set_color(self.colors.background);
        ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);

        if let EntryMode::Highlight { anchor } = self.mode {
            self.draw_highlighted_areas(ctx, anchor);
        }

        let min_line = self.viewport.min().line;
        for i in 0..self.cache.len() {
            let line = min_line + i as i32;
            if !self.cache.is_filled(i) {
                let visible = visible_slice(&self.buffer, &self.viewport, line).to_string();
                self.cache.fill(i, ctx.render_text(&visible, self.colors.text));
            }
            if let Some(artifact) = self.cache.get_mut(i) {
                artifact.draw(rect.x, rect.y + i as i32 * cell.h);
            }
        }

        if show_cursor {
            let d = self.cursor.display();
            let x = self.viewport.col_x(d.col);
            let y = self.viewport.line_y(d.line);
            ctx.set_color(self.colors.caret);
            ctx.draw_line(x, y, x, y + cell.h);
        }
    }

    fn draw_highlighted_areas(&self, ctx: &mut dyn DrawContext, anchor: CharPos) {
        let (start, end) = order_positions(anchor, self.cursor.real());
        if start == end {
            return;
        }
        ctx.set_color(self.colors.highlight);
        let min = self.viewport.min();
        let max = self.viewport.max();
        let first = start.line.max(min.line);
        let last = end.line.min(max.line - 1);
        for line in first..=last {
            let len = self.buffer.line_len(line.max(0) as usize) as i32;
            let from = if line == start.line { start.col } else { 0 };
            let to = if line == end.line { end.col } else { len };
            let from = from.clamp(min.col, max.col);
            let to = to.clamp(min.col, max.col);
            if to > from {
                let x1 = self.viewport.col_x(from);
                let x2 = self.viewport.col_x(to);
                ctx.fill_rect(x1, self.viewport.line_y(line), x2 - x1, self.viewport.cell().h);
            }
        }
    }

    // ------------------------------------------------------------------
    // accessors

    pub fn real_cursor(&self) -> CharPos {
        self.cursor.real()
    }

    pub fn display_cursor(&self) -> CharPos {
        self.cursor.display()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn bounds_step(&self) -> i32 {
        self.bounds_step
    }

    pub fn set_bounds_step(&mut self, step: i32) {
        self.bounds_step = step.max(1);
    }

    // ------------------------------------------------------------------
    // internals

    /// Slot count the cache must have: one per line inside the vertical
    /// window, capped by the buffer's line count.
    fn window_len(buffer: &LineBuffer, viewport: &Viewport) -> usize {
        let max = viewport.max().line.min(buffer.line_count() as i32);
        (max - viewport.min().line).max(0) as usize
    }

    /// Grow or shrink the cache tail until it matches the window again.
    fn sync_cache_len(&mut self) {
        let want = Self::window_len(&self.buffer, &self.viewport);
        while self.cache.len() > want {
            let i = self.cache.len() - 1;
            self.cache.remove_slot(i);
        }
        while self.cache.len() < want {
            self.cache.append_slot();
        }
    }

    fn apply_shift(&mut self, shift: BoundsShift, dy: i32) {
        if shift.horizontal {
            let len = self.cache.len();
            self.cache.rebuild(len);
        }
        if shift.vertical {
            self.cache.shift(dy);
            self.sync_cache_len();
        }
    }

    fn invalidate_row_of(&mut self, line: i32) {
        let row = line - self.viewport.min().line;
        if row >= 0 {
            self.cache.invalidate(row as usize);
        }
    }

    fn invalidate_from_row_of(&mut self, line: i32) {
        let first = (line - self.viewport.min().line).max(0) as usize;
        for row in first..self.cache.len() {
            self.cache.invalidate(row);
        }
    }

    /// Horizontal shift step in the direction of `dir`, clamped so a
    /// leftward shift never gets rejected at the buffer origin.
    fn h_step(&self, dir: i32) -> i32 {
        if dir >= 0 {
            self.bounds_step
        } else {
            -self.bounds_step.min(self.viewport.min().col)
        }
    }

    /// Snap the horizontal window so the real cursor column is visible.
    fn ensure_cursor_visible_x(&mut self) {
        let col = self.cursor.real().col;
        let min = self.viewport.min().col;
        let max = self.viewport.max().col;
        let dx = if col < min {
            col - min
        } else if col > max {
            col - max
        } else {
            0
        };
        if dx != 0 && self.viewport.move_bounds(dx, 0) {
            let len = self.cache.len();
            self.cache.rebuild(len);
        }
        self.cursor.clamp_display(&self.viewport);
    }

    /// Shift the vertical window so the real cursor line is visible.
    fn ensure_cursor_visible_y(&mut self) {
        let line = self.cursor.real().line;
        let min = self.viewport.min().line;
        let max = self.viewport.max().line;
        let dy = if line < min {
            line - min
        } else if line >= max {
            line - max + 1
        } else {
            0
        };
        if dy != 0 && self.viewport.move_bounds(0, dy) {
            self.cache.shift(dy);
            self.sync_cache_len();
        }
        self.cursor.clamp_display(&self.viewport);
    }

    /// Clamp a grid position onto an existing line, with the column
    /// treated as end-of-line when past the content.
    fn clamp_to_content(&self, pos: CharPos) -> CharPos {
        let line = pos.line.clamp(0, self.buffer.line_count() as i32 - 1);
        let col = pos.col.clamp(0, self.buffer.line_len(line as usize) as i32);
        CharPos::new(col, line)
    }
}

// Dual-space cursor for the entry widget.

use super::CharPos;
use super::line_buffer::LineBuffer;
use super::viewport::Viewport;

/// Cursor tracked in two coordinate spaces at once: `real` is the
/// logical position in full document character units, `display` the
/// clamped on-screen caret cell. Both are updated by the same movement
/// path; they diverge whenever the viewport is scrolled horizontally, so
/// neither is ever derived from the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    real: CharPos,
    display: CharPos,
}

impl Cursor {
    pub fn new() -> Self {
        Cursor::default()
    }

    /// Logical position in document character units, unclamped by the
    /// current scroll.
    pub fn real(&self) -> CharPos {
        self.real
    }

    /// Caret cell, clamped into the visible window.
    pub fn display(&self) -> CharPos {
        self.display
    }

    /// Move by `(dx, dy)` character cells. A vertical move whose target
    /// line does not exist rejects the whole move and returns false;
    /// horizontal motion saturates at column zero and never crosses a
    /// line boundary. The display position picks up the same applied
    /// delta; clamping it back into the window is the viewport's job.
    pub fn move_characters(&mut self, dx: i32, dy: i32, buffer: &LineBuffer) -> bool {
        if dy != 0 {
            let target = self.real.line + dy;
            if target < 0 || target >= buffer.line_count() as i32 {
                return false;
            }
        }
        let applied_dx = (self.real.col + dx).max(0) - self.real.col;
        self.real.col += applied_dx;
        self.real.line += dy;
        self.display.col += applied_dx;
        self.display.line += dy;
        true
    }

    /// Snap the real column to the end of the current line and pull the
    /// display column along. Returns true if the end of the line lies
    /// outside the window, in which case the caller shifts the bounds
    /// and refreshes its cache.
    pub fn jump_to_end_of_line(&mut self, buffer: &LineBuffer, viewport: &Viewport) -> bool {
        let line = self.real.line.max(0) as usize;
        let eol = buffer.line_len(line) as i32;
        self.real.col = eol;
        self.display.col = eol;
        self.clamp_display(viewport);
        eol < viewport.min().col || eol > viewport.max().col
    }

    /// Absolute reposition in character units, e.g. after a buffer
    /// replacement or a mouse click. The caller validates the position
    /// against the buffer; the display cell is clamped into the window.
    pub fn set_position(&mut self, pos: CharPos, viewport: &Viewport) {
        self.real = CharPos::new(pos.col.max(0), pos.line.max(0));
        self.display = self.real;
        self.clamp_display(viewport);
    }

    /// Clamp the display cell into the window rectangle. The caret may
    /// sit on the right edge (one past the last visible column) but not
    /// below the last visible line.
    pub fn clamp_display(&mut self, viewport: &Viewport) {
        let min = viewport.min();
        let max = viewport.max();
        self.display.col = self.display.col.clamp(min.col, max.col);
        self.display.line = self.display.line.clamp(min.line, (max.line - 1).max(min.line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textedit::{CellSize, Rect};

    fn viewport() -> Viewport {
        // 10 columns by 4 lines
        Viewport::new(Rect::new(0, 0, 80, 64), CellSize::new(8, 16))
    }

    #[test]
    fn test_move_updates_both_spaces() {
        let buffer = LineBuffer::from_text("hello\nworld");
        let mut cursor = Cursor::new();
        assert!(cursor.move_characters(3, 1, &buffer));
        assert_eq!(cursor.real(), CharPos::new(3, 1));
        assert_eq!(cursor.display(), CharPos::new(3, 1));
    }

    #[test]
    fn test_vertical_move_rejected_outside_buffer() {
        let buffer = LineBuffer::from_text("hello");
        let mut cursor = Cursor::new();
        assert!(!cursor.move_characters(2, -1, &buffer));
        assert!(!cursor.move_characters(2, 1, &buffer));
        // rejection is total: the horizontal part did not apply either
        assert_eq!(cursor.real(), CharPos::new(0, 0));
    }

    #[test]
    fn test_horizontal_move_saturates_at_zero() {
        let buffer = LineBuffer::from_text("hello");
        let mut cursor = Cursor::new();
        assert!(cursor.move_characters(-3, 0, &buffer));
        assert_eq!(cursor.real(), CharPos::new(0, 0));
        assert_eq!(cursor.display(), CharPos::new(0, 0));
    }

    #[test]
    fn test_jump_to_end_of_line() {
        let buffer = LineBuffer::from_text("abc");
        let vp = viewport();
        let mut cursor = Cursor::new();
        assert!(!cursor.jump_to_end_of_line(&buffer, &vp));
        assert_eq!(cursor.real().col, 3);
        assert_eq!(cursor.display().col, 3);
    }

    #[test]
    fn test_jump_past_window_edge_reports_shift() {
        let buffer = LineBuffer::from_text("a long line well past ten columns");
        let vp = viewport();
        let mut cursor = Cursor::new();
        assert!(cursor.jump_to_end_of_line(&buffer, &vp));
        assert_eq!(cursor.real().col, 33);
        // display pinned to the right edge
        assert_eq!(cursor.display().col, 10);
    }

    #[test]
    fn test_set_position_clamps_display_only() {
        let vp = viewport();
        let mut cursor = Cursor::new();
        cursor.set_position(CharPos::new(25, 2), &vp);
        assert_eq!(cursor.real(), CharPos::new(25, 2));
        assert_eq!(cursor.display(), CharPos::new(10, 2));
    }
}

// Scrollable character-unit window over the buffer.

use super::cursor::Cursor;
use super::{CellSize, CharPos, Rect};

/// Which axes a `check_bounds` call actually shifted. A horizontal shift
/// changes every visible substring, so the caller rebuilds its render
/// cache; a vertical shift slides it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundsShift {
    pub horizontal: bool,
    pub vertical: bool,
}

impl BoundsShift {
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}

/// The rectangular window, in character units, of the buffer that is
/// currently drawable. `min` is inclusive, `max` exclusive; their
/// difference always equals the widget's pixel size divided by the cell
/// size on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    rect: Rect,
    cell: CellSize,
    min: CharPos,
    max: CharPos,
}

impl Viewport {
    pub fn new(rect: Rect, cell: CellSize) -> Self {
        let mut vp = Viewport {
            rect,
            cell,
            min: CharPos::default(),
            max: CharPos::default(),
        };
        vp.reset_bounds_x();
        vp.reset_bounds_y();
        vp
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn cell(&self) -> CellSize {
        self.cell
    }

    pub fn min(&self) -> CharPos {
        self.min
    }

    pub fn max(&self) -> CharPos {
        self.max
    }

    /// Visible line count of the window.
    pub fn rows(&self) -> usize {
        (self.max.line - self.min.line).max(0) as usize
    }

    /// Visible column count of the window.
    pub fn cols(&self) -> usize {
        (self.max.col - self.min.col).max(0) as usize
    }

    pub fn reset_bounds_x(&mut self) {
        self.min.col = 0;
        self.max.col = self.rect.w / self.cell.w;
    }

    pub fn reset_bounds_y(&mut self) {
        self.min.line = 0;
        self.max.line = self.rect.h / self.cell.h;
    }

    /// Shift both bounds by the same amount. Rejected without mutation
    /// if the window would scroll above or left of the buffer origin.
    pub fn move_bounds(&mut self, dx: i32, dy: i32) -> bool {
        if self.min.col + dx < 0 || self.min.line + dy < 0 {
            return false;
        }
        self.min.col += dx;
        self.min.line += dy;
        self.max.col += dx;
        self.max.line += dy;
        true
    }

    /// If the display cursor fell outside the window, shift the bounds
    /// by `(dx, dy)` on the offending axes and re-clamp the display
    /// cursor to the window edge. Reports which axes actually moved.
    pub fn check_bounds(&mut self, cursor: &mut Cursor, dx: i32, dy: i32) -> BoundsShift {
        let mut shift = BoundsShift::default();
        let d = cursor.display();
        if d.col < self.min.col || d.col > self.max.col {
            shift.horizontal = self.move_bounds(dx, 0);
        }
        if d.line < self.min.line || d.line >= self.max.line {
            shift.vertical = self.move_bounds(0, dy);
        }
        cursor.clamp_display(self);
        shift
    }

    /// Recompute the visible extent from a new pixel size, holding the
    /// window origin fixed.
    pub fn resize_to(&mut self, w: i32, h: i32) {
        self.rect.w = w;
        self.rect.h = h;
        self.max.col = self.min.col + w / self.cell.w;
        self.max.line = self.min.line + h / self.cell.h;
    }

    /// Map a pixel point to the character cell under it, scroll offset
    /// included.
    pub fn char_at_pixel(&self, mx: i32, my: i32) -> CharPos {
        CharPos::new(
            self.min.col + (mx - self.rect.x) / self.cell.w,
            self.min.line + (my - self.rect.y) / self.cell.h,
        )
    }

    /// Pixel x of a display column.
    pub fn col_x(&self, col: i32) -> i32 {
        self.rect.x + (col - self.min.col) * self.cell.w
    }

    /// Pixel y of a display line.
    pub fn line_y(&self, line: i32) -> i32 {
        self.rect.y + (line - self.min.line) * self.cell.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        // 10 columns by 4 lines
        Viewport::new(Rect::new(0, 0, 80, 64), CellSize::new(8, 16))
    }

    #[test]
    fn test_bounds_match_pixel_size() {
        let vp = viewport();
        assert_eq!(vp.min(), CharPos::new(0, 0));
        assert_eq!(vp.max(), CharPos::new(10, 4));
        assert_eq!(vp.cols(), 10);
        assert_eq!(vp.rows(), 4);
    }

    #[test]
    fn test_move_bounds_shifts_both_edges() {
        let mut vp = viewport();
        assert!(vp.move_bounds(2, 1));
        assert_eq!(vp.min(), CharPos::new(2, 1));
        assert_eq!(vp.max(), CharPos::new(12, 5));
    }

    #[test]
    fn test_move_bounds_rejects_negative_origin() {
        let mut vp = viewport();
        assert!(!vp.move_bounds(-1, 0));
        assert!(!vp.move_bounds(0, -1));
        assert_eq!(vp.min(), CharPos::new(0, 0));
        assert_eq!(vp.max(), CharPos::new(10, 4));
    }

    #[test]
    fn test_reset_bounds_after_scroll() {
        let mut vp = viewport();
        vp.move_bounds(3, 2);
        vp.reset_bounds_x();
        assert_eq!(vp.min().col, 0);
        assert_eq!(vp.max().col, 10);
        // vertical untouched
        assert_eq!(vp.min().line, 2);
    }

    #[test]
    fn test_resize_holds_origin() {
        let mut vp = viewport();
        vp.move_bounds(0, 2);
        vp.resize_to(40, 32);
        assert_eq!(vp.min(), CharPos::new(0, 2));
        assert_eq!(vp.max(), CharPos::new(5, 4));
    }

    #[test]
    fn test_char_at_pixel_uses_scroll_offset() {
        let mut vp = viewport();
        vp.move_bounds(2, 1);
        assert_eq!(vp.char_at_pixel(0, 0), CharPos::new(2, 1));
        assert_eq!(vp.char_at_pixel(17, 33), CharPos::new(4, 3));
    }

    #[test]
    fn test_check_bounds_shifts_vertical() {
        use crate::textedit::line_buffer::LineBuffer;

        let mut vp = viewport();
        let mut cursor = Cursor::new();
        let buffer = LineBuffer::from_text("a\nb\nc\nd\ne");
        // walk the display cursor one past the bottom edge
        for _ in 0..4 {
            cursor.move_characters(0, 1, &buffer);
        }
        let shift = vp.check_bounds(&mut cursor, 0, 1);
        assert!(shift.vertical);
        assert!(!shift.horizontal);
        assert_eq!(vp.min().line, 1);
        // display cursor re-clamped to the bottom edge of the window
        assert_eq!(cursor.display().line, 4);
    }

    #[test]
    fn test_check_bounds_inside_window_is_noop() {
        let mut vp = viewport();
        let mut cursor = Cursor::new();
        let shift = vp.check_bounds(&mut cursor, 1, 1);
        assert!(!shift.any());
        assert_eq!(vp.min(), CharPos::new(0, 0));
    }
}

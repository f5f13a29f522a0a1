// Editable-text widget core: line buffer, dual-space cursor, scrollable
// viewport and a per-visible-line render cache, composed by TextEntry.
// Everything in here is toolkit-independent; rendering goes through the
// DrawContext trait.

pub mod cursor;
pub mod line_buffer;
pub mod render_cache;
pub mod text_entry;
pub mod viewport;

/// A position on the character grid of the document, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharPos {
    pub col: i32,
    pub line: i32,
}

impl CharPos {
    pub fn new(col: i32, line: i32) -> Self {
        CharPos { col, line }
    }
}

/// Widget rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// Fixed character cell size in pixels, established once from the font
/// metrics when a widget is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub w: i32,
    pub h: i32,
}

impl CellSize {
    pub fn new(w: i32, h: i32) -> Self {
        CellSize { w, h }
    }
}

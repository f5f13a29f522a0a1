// Drawing backend traits - abstract over the host toolkit's rendering
// primitives so the text widget core never touches it directly.
// Colors are 0xRRGGBBAA.

/// A pre-rendered drawable for one visible line of text. Slots of the
/// render cache own these; an artifact is released when its slot is
/// invalidated or overwritten.
pub trait LineArtifact {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    /// Draw at pixel position `(x, y)` (top-left corner).
    fn draw(&mut self, x: i32, y: i32);
}

/// Drawing backend trait - abstracts the toolkit's drawing primitives.
pub trait DrawContext {
    fn set_color(&mut self, color: u32);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);
    /// Produce a drawable artifact for one line of text in the given
    /// color. `text` is the already-clipped visible substring; the
    /// artifact is sized `text.len()` cells wide and one cell high.
    fn render_text(&mut self, text: &str, color: u32) -> Box<dyn LineArtifact>;
}

// FLTK integration for the TextEntry widget.
// Wraps the toolkit-independent core in a Group with draw/handle
// callbacks and provides the FLTK DrawContext implementation.

use crate::draw_context::{DrawContext, LineArtifact};
use crate::textedit::text_entry::{EntryColors, TextEntry};
use crate::textedit::{CellSize, Rect};
use fltk::app::MouseWheel;
use fltk::{draw as fltk_draw, enums::*, prelude::*};
use std::cell::RefCell;
use std::rc::Rc;

// wheel scroll distance, in lines
const SCROLL_LINES: i32 = 3;
const TAB_WIDTH: usize = 4;

fn set_draw_color(color: u32) {
    let r = ((color >> 24) & 0xff) as u8;
    let g = ((color >> 16) & 0xff) as u8;
    let b = ((color >> 8) & 0xff) as u8;
    fltk_draw::set_draw_color(Color::from_rgb(r, g, b));
}

/// FLTK implementation of DrawContext. Line artifacts hold the prepared
/// visible substring and draw through FLTK's immediate-mode text path,
/// which is transparent over whatever was painted below them.
pub struct FltkDrawContext {
    font: Font,
    size: i32,
    cell: CellSize,
}

impl FltkDrawContext {
    pub fn new(font: Font, size: i32) -> Self {
        fltk_draw::set_font(font, size);
        let cell = CellSize::new(fltk_draw::width("M").ceil() as i32, fltk_draw::height());
        FltkDrawContext { font, size, cell }
    }

    /// The fixed character cell measured from the font metrics.
    pub fn cell_size(&self) -> CellSize {
        self.cell
    }
}

impl DrawContext for FltkDrawContext {
    fn set_color(&mut self, color: u32) {
        set_draw_color(color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        fltk_draw::draw_rectf(x, y, w, h);
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        fltk_draw::draw_line(x1, y1, x2, y2);
    }

    fn render_text(&mut self, text: &str, color: u32) -> Box<dyn LineArtifact> {
        Box::new(FltkLineArtifact {
            text: text.to_string(),
            color,
            font: self.font,
            size: self.size,
            cell: self.cell,
        })
    }
}

struct FltkLineArtifact {
    text: String,
    color: u32,
    font: Font,
    size: i32,
    cell: CellSize,
}

impl LineArtifact for FltkLineArtifact {
    fn width(&self) -> i32 {
        self.text.len() as i32 * self.cell.w
    }

    fn height(&self) -> i32 {
        self.cell.h
    }

    fn draw(&mut self, x: i32, y: i32) {
        if self.text.is_empty() {
            return;
        }
        fltk_draw::set_font(self.font, self.size);
        set_draw_color(self.color);
        fltk_draw::draw_text2(&self.text, x, y, self.width(), self.cell.h, Align::Left);
    }
}

/// Wrap a TextEntry in an FLTK widget. The character cell is measured
/// once from the given font and stays fixed for the widget's lifetime.
pub fn create_text_entry_widget(
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    font: Font,
    font_size: i32,
    colors: EntryColors,
    contents: &str,
) -> (fltk::group::Group, Rc<RefCell<TextEntry>>) {
    let mut widget = fltk::group::Group::new(x, y, w, h, None);
    widget.end();

    let cell = FltkDrawContext::new(font, font_size).cell_size();
    let entry = Rc::new(RefCell::new(TextEntry::new(
        Rect::new(x, y, w, h),
        cell,
        contents,
        colors,
    )));

    widget.draw({
        let entry = entry.clone();
        move |w| {
            let has_focus = fltk::app::focus().map(|f| f.as_base_widget()).as_ref()
                == Some(&w.as_base_widget());
            let mut ctx = FltkDrawContext::new(font, font_size);
            entry.borrow_mut().render(&mut ctx, has_focus);
        }
    });

    widget.handle({
        let entry = entry.clone();
        move |w, event| match event {
            Event::Push => {
                w.take_focus().ok();
                entry
                    .borrow_mut()
                    .mouse_down(fltk::app::event_x(), fltk::app::event_y());
                w.redraw();
                true
            }
            Event::Drag => {
                entry
                    .borrow_mut()
                    .mouse_move(fltk::app::event_x(), fltk::app::event_y());
                w.redraw();
                true
            }
            Event::Released => {
                entry.borrow_mut().mouse_up();
                w.redraw();
                true
            }
            Event::MouseWheel => {
                let lines = match fltk::app::event_dy() {
                    MouseWheel::Up => -SCROLL_LINES,
                    MouseWheel::Down => SCROLL_LINES,
                    _ => 0,
                };
                if lines != 0 {
                    entry.borrow_mut().scroll(lines);
                    w.redraw();
                    true
                } else {
                    false
                }
            }
            Event::Focus | Event::Unfocus => {
                w.redraw();
                true
            }
            Event::KeyDown => {
                let key = fltk::app::event_key();
                let mut e = entry.borrow_mut();
                let handled = match key {
                    Key::Left => {
                        e.move_cursor(-1, 0);
                        true
                    }
                    Key::Right => {
                        e.move_cursor(1, 0);
                        true
                    }
                    Key::Up => {
                        e.move_cursor(0, -1);
                        true
                    }
                    Key::Down => {
                        e.move_cursor(0, 1);
                        true
                    }
                    Key::Enter | Key::KPEnter => {
                        e.insert_char('\n');
                        true
                    }
                    Key::BackSpace => {
                        e.remove_char();
                        true
                    }
                    Key::Delete => {
                        e.delete_char();
                        true
                    }
                    Key::Tab => {
                        for _ in 0..TAB_WIDTH {
                            e.insert_char(' ');
                        }
                        true
                    }
                    _ => match fltk::app::event_text().chars().next() {
                        // single-byte fixed-advance core: ASCII input only
                        Some(c) if c.is_ascii() && !c.is_control() => {
                            e.insert_char(c);
                            true
                        }
                        _ => false,
                    },
                };
                drop(e);
                if handled {
                    w.redraw();
                }
                handled
            }
            _ => false,
        }
    });

    widget.resize_callback({
        let entry = entry.clone();
        move |_w, _x, _y, width, height| {
            entry.borrow_mut().resize_to(width, height);
        }
    });

    (widget, entry)
}

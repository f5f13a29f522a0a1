// Library exports for meadow

pub mod config;
pub mod document;
pub mod draw_context;
pub mod fltk_text_entry;
pub mod textedit;

// Render-sequence tests for the text entry widget
// Uses a recording draw context to verify draw order and that the
// line cache avoids re-rendering unchanged lines.


use meadow::textedit::text_entry::{EntryColors, TextEntry};
use meadow::textedit::{CellSize, Rect};

use crate::record_draw_context::RecordingDrawContext;

const CELL_W: i32 = 10;
const CELL_H: i32 = 20;

/// A 5-column, 3-line window over four lines of text.
fn small_entry() -> TextEntry {
    TextEntry::new(
        Rect::new(0, 0, 50, 60),
        CellSize::new(CELL_W, CELL_H),
        "hello world\nsecond\nthird\nfourth",
        EntryColors::default(),
    )
}

fn render_count(log: &[String]) -> usize {
    log.iter().filter(|l| l.starts_with("render [")).count()
}

#[test]
fn test_initial_render_sequence() {
    let mut entry = small_entry();
    let mut ctx = RecordingDrawContext::new(CELL_W, CELL_H);
    entry.render(&mut ctx, true);

    insta::assert_snapshot!(ctx.log().join("\n"), @r"
    color #1e1e1eff
    rect 0,0 50x60
    render [hello]
    text 0,0 [hello]
    render [secon]
    text 0,20 [secon]
    render [third]
    text 0,40 [third]
    color #ffffffff
    line 0,0,0,20
    ");
}

#[test]
fn test_second_render_reuses_cached_lines() {
    let mut entry = small_entry();
    let mut ctx = RecordingDrawContext::new(CELL_W, CELL_H);
    entry.render(&mut ctx, false);
    assert_eq!(render_count(&ctx.log()), 3);

    ctx.clear_log();
    entry.render(&mut ctx, false);
    let log = ctx.log();
    assert_eq!(render_count(&log), 0);
    assert!(log.contains(&"text 0,0 [hello]".to_string()));
    assert!(log.contains(&"text 0,40 [third]".to_string()));
}

#[test]
fn test_scroll_renders_only_incoming_lines() {
    let mut entry = small_entry();
    let mut ctx = RecordingDrawContext::new(CELL_W, CELL_H);
    entry.render(&mut ctx, false);

    ctx.clear_log();
    entry.scroll(2);
    entry.render(&mut ctx, false);
    let log = ctx.log();

    // lines 2..4 are visible now; only line 3 was never rendered
    assert_eq!(render_count(&log), 1);
    assert!(log.contains(&"render [fourt]".to_string()));
    assert!(log.contains(&"text 0,0 [third]".to_string()));
    assert!(log.contains(&"text 0,20 [fourt]".to_string()));
}

#[test]
fn test_typing_re_renders_edited_line_only() {
    let mut entry = small_entry();
    let mut ctx = RecordingDrawContext::new(CELL_W, CELL_H);
    entry.render(&mut ctx, false);

    ctx.clear_log();
    entry.insert_char('x');
    entry.render(&mut ctx, false);
    let log = ctx.log();
    assert_eq!(render_count(&log), 1);
    assert!(log.contains(&"render [xhell]".to_string()));
}

#[test]
fn test_selection_drawn_between_background_and_text() {
    let mut entry = small_entry();
    // drag from the start of "hello" to column 3
    entry.mouse_down(0, 0);
    entry.mouse_move(3 * CELL_W, 0);

    let mut ctx = RecordingDrawContext::new(CELL_W, CELL_H);
    entry.render(&mut ctx, false);
    let log = ctx.log();

    let highlight = log
        .iter()
        .position(|l| l == "rect 0,0 30x20")
        .expect("selection rectangle drawn");
    assert_eq!(log[highlight - 1], "color #264f78ff");

    let first_text = log
        .iter()
        .position(|l| l.starts_with("text "))
        .expect("line text drawn");
    assert!(highlight < first_text);
}

#[test]
fn test_caret_follows_cursor() {
    let mut entry = small_entry();
    entry.move_cursor(1, 0);
    entry.move_cursor(0, 1);

    let mut ctx = RecordingDrawContext::new(CELL_W, CELL_H);
    entry.render(&mut ctx, true);
    let log = ctx.log();
    assert!(log.contains(&format!("line {},{},{},{}", CELL_W, CELL_H, CELL_W, 2 * CELL_H)));
}

#[test]
fn test_backspace_merge_above_window_keeps_rows_aligned() {
    let mut entry = TextEntry::new(
        Rect::new(0, 0, 50, 60),
        CellSize::new(CELL_W, CELL_H),
        "aa\nbb\ncc\ndd\nee\nff",
        EntryColors::default(),
    );
    let mut ctx = RecordingDrawContext::new(CELL_W, CELL_H);
    entry.scroll(2);
    entry.render(&mut ctx, false);

    // cursor above the scrolled window; backspace merges bb onto aa
    ctx.clear_log();
    entry.set_cursor_position(0, 1);
    entry.remove_char();
    entry.render(&mut ctx, false);
    let log = ctx.log();

    // window followed by one line and shows the same three lines,
    // straight from the cache
    assert_eq!(render_count(&log), 0);
    assert!(log.contains(&"text 0,0 [cc]".to_string()));
    assert!(log.contains(&"text 0,20 [dd]".to_string()));
    assert!(log.contains(&"text 0,40 [ee]".to_string()));
}

#[test]
fn test_delete_empty_line_above_window_slides_rows_up() {
    let mut entry = TextEntry::new(
        Rect::new(0, 0, 50, 60),
        CellSize::new(CELL_W, CELL_H),
        "aa\n\ncc\ndd\nee\nff",
        EntryColors::default(),
    );
    let mut ctx = RecordingDrawContext::new(CELL_W, CELL_H);
    entry.scroll(2);
    entry.render(&mut ctx, false);

    // cursor on the empty line above the window; delete removes it
    ctx.clear_log();
    entry.set_cursor_position(0, 1);
    entry.delete_char();
    entry.render(&mut ctx, false);
    let log = ctx.log();

    // the window holds its position, so every line slid up by one;
    // only the line entering at the bottom is rendered fresh
    assert_eq!(render_count(&log), 1);
    assert!(log.contains(&"text 0,0 [dd]".to_string()));
    assert!(log.contains(&"text 0,20 [ee]".to_string()));
    assert!(log.contains(&"render [ff]".to_string()));
    assert!(log.contains(&"text 0,40 [ff]".to_string()));
}

#[test]
fn test_hidden_entry_draws_nothing() {
    let mut entry = small_entry();
    entry.hide();

    let mut ctx = RecordingDrawContext::new(CELL_W, CELL_H);
    entry.render(&mut ctx, true);
    assert!(ctx.log().is_empty());

    entry.show();
    entry.render(&mut ctx, true);
    assert!(!ctx.log().is_empty());
}

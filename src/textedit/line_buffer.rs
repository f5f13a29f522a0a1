// Line-oriented text buffer for the entry widget.
// The widget operates on single-byte characters of fixed advance width,
// so columns index bytes directly. Multi-byte content loaded from disk
// is tolerated by skipping mutations that would split a character.

/// Ordered, mutable sequence of text lines. Never empty: there is always
/// at least one (possibly empty) line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        LineBuffer {
            lines: vec![String::new()],
        }
    }

    /// Split `text` on newlines. An empty input still yields one empty
    /// line.
    pub fn from_text(text: &str) -> Self {
        LineBuffer {
            lines: text.split('\n').map(String::from).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line content, or an empty string if `i` is out of range.
    pub fn line(&self, i: usize) -> &str {
        self.lines.get(i).map(String::as_str).unwrap_or("")
    }

    pub fn line_len(&self, i: usize) -> usize {
        self.line(i).len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Insert a character at `(col, line)`. A newline inserts a new
    /// empty line directly after `line`; redistributing the split
    /// content between the two lines is the caller's job.
    pub fn insert(&mut self, col: usize, line: usize, c: char) {
        if line >= self.lines.len() {
            return;
        }
        if c == '\n' {
            self.lines.insert(line + 1, String::new());
        } else {
            let col = col.min(self.lines[line].len());
            if self.lines[line].is_char_boundary(col) {
                self.lines[line].insert(col, c);
            }
        }
    }

    /// Erase the character at `(col, line)`. An empty line is removed
    /// entirely when `erase_newline` is set and more than one line
    /// exists; with `erase_newline` unset that case is a no-op, which
    /// keeps the buffer's last line alive.
    pub fn erase(&mut self, col: usize, line: usize, erase_newline: bool) {
        if line >= self.lines.len() {
            return;
        }
        if self.lines[line].is_empty() {
            if erase_newline && self.lines.len() > 1 {
                self.lines.remove(line);
            }
        } else if col < self.lines[line].len() && self.lines[line].is_char_boundary(col) {
            self.lines[line].remove(col);
        }
    }

    pub fn set_line(&mut self, i: usize, text: &str) {
        if i < self.lines.len() {
            self.lines[i] = text.to_string();
        }
    }

    /// Insert an empty line at `i`.
    pub fn insert_line(&mut self, i: usize) {
        if i <= self.lines.len() {
            self.lines.insert(i, String::new());
        }
    }

    /// Remove line `i`. Refuses to remove the buffer's only line.
    pub fn remove_line(&mut self, i: usize) {
        if i < self.lines.len() && self.lines.len() > 1 {
            self.lines.remove(i);
        }
    }

    /// Join all lines with newlines. No trailing newline is appended
    /// after the last line.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the whole contents.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(String::from).collect();
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

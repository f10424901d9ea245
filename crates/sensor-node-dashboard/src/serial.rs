//! Bounded buffer of recent log lines served by `GET /api/serial`.

use heapless::{Deque, String};
use serde::{Serialize, Serializer};

/// Ring of the `LINES` most recent log lines, each cut to `WIDTH` bytes.
#[derive(Debug, Clone)]
pub struct SerialLog<const LINES: usize, const WIDTH: usize> {
    lines: Deque<String<WIDTH>, LINES>,
}

impl<const LINES: usize, const WIDTH: usize> Default for SerialLog<LINES, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LINES: usize, const WIDTH: usize> SerialLog<LINES, WIDTH> {
    pub const fn new() -> Self {
        Self {
            lines: Deque::new(),
        }
    }

    /// Append a line, evicting the oldest one when full.
    pub fn push(&mut self, line: &str) {
        let mut end = line.len().min(WIDTH);
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        let mut entry = String::new();
        // Fits by construction.
        let _ = entry.push_str(&line[..end]);

        if self.lines.is_full() {
            self.lines.pop_front();
        }
        let _ = self.lines.push_back(entry);
    }

    /// Lines from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl<const LINES: usize, const WIDTH: usize> Serialize for SerialLog<LINES, WIDTH> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

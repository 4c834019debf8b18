//! Inclusive 1-based page range sent with a split request.

use super::SelectionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl Default for PageRange {
    fn default() -> Self {
        Self { start: 1, end: 1 }
    }
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Result<Self, SelectionError> {
        if start == 0 || end < start {
            return Err(SelectionError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Form fields as the service expects them (`start`, `end`, decimal text).
    pub fn form_fields(&self) -> [(&'static str, String); 2] {
        [
            ("start", self.start.to_string()),
            ("end", self.end.to_string()),
        ]
    }
}

use crate::common::TrimPolicy;
use std::iter::FusedIterator;

/// Lazy line splitter over one decoded window.
///
/// Holds the text and a byte cursor; the next `\n` is located only when
/// `next` is called. Forward-only and not restartable.
#[derive(Debug)]
pub struct Lines {
    text: String,
    pos: usize,
    done: bool,
    trim: TrimPolicy,
    // a trailing `\n` ends in one more empty segment
    emit_trailing_empty: bool,
}

impl Lines {
    /// Every `\n`-delimited segment, including the empty one after a
    /// trailing newline. Empty text has no segments.
    pub fn segments(text: String, trim: TrimPolicy) -> Self {
        let emit_trailing_empty = !text.is_empty();
        Self::build(text, trim, emit_trailing_empty)
    }

    /// `\n`-terminated records; a trailing newline ends the last record
    /// instead of opening an empty one.
    pub fn records(text: String, trim: TrimPolicy) -> Self {
        Self::build(text, trim, false)
    }

    fn build(text: String, trim: TrimPolicy, emit_trailing_empty: bool) -> Self {
        Self {
            text,
            pos: 0,
            done: false,
            trim,
            emit_trailing_empty,
        }
    }

    /// Bytes of the window not yet consumed
    pub fn remaining(&self) -> &str {
        if self.done {
            ""
        } else {
            &self.text[self.pos..]
        }
    }
}

impl Iterator for Lines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let start = self.pos;
        let end = match self.text[start..].find('\n') {
            Some(i) => {
                self.pos = start + i + 1;
                start + i
            }
            None => {
                self.done = true;
                if start == self.text.len() && !self.emit_trailing_empty {
                    return None;
                }
                self.text.len()
            }
        };

        Some(self.trim.apply(&self.text[start..end]).to_string())
    }
}

impl FusedIterator for Lines {}

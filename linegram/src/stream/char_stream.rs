//! Backtrackable character cursor with line bookkeeping

use super::error::{StreamError, StreamResult};
use crate::config::runtime::StreamPreferences;
use crate::utils::Position;
use std::collections::VecDeque;

/// Line separator recognised by the bookkeeping
pub const LINE_SEPARATOR: char = '\n';

/// A buffered character source with an absolute cursor.
///
/// The stream remembers the positions of the most recent line separators it
/// has consumed so that backward seeks can restore the line number and the
/// offset into the line. Once the log has discarded entries, a backward seek
/// past the oldest remembered separator falls back to scanning the buffer.
#[derive(Debug, Clone)]
pub struct Stream {
    buffer: Vec<char>,
    position: usize,
    /// 1-based line of the cursor
    line: usize,
    /// Characters between the last separator and the cursor
    line_offset: usize,
    separators: VecDeque<usize>,
    separator_capacity: usize,
    truncated: bool,
}

impl Stream {
    /// Create a stream over in-memory text using the default preferences
    pub fn new(text: &str) -> Self {
        Self::with_preferences(text, &StreamPreferences::default())
    }

    /// Create a stream honouring the given preferences
    pub fn with_preferences(text: &str, preferences: &StreamPreferences) -> Self {
        Self::with_line_log_capacity(text, preferences.effective_line_log_capacity())
    }

    /// Create a stream whose separator log keeps at most `capacity` entries
    pub fn with_line_log_capacity(text: &str, capacity: usize) -> Self {
        Self {
            buffer: text.chars().collect(),
            position: 0,
            line: 1,
            line_offset: 0,
            separators: VecDeque::new(),
            separator_capacity: capacity.max(1),
            truncated: false,
        }
    }

    // ========================================================================
    // Reading
    // ========================================================================

    /// Return the current character and advance past it
    pub fn get(&mut self) -> StreamResult<char> {
        let c = self.peek()?;
        self.position += 1;

        if c == LINE_SEPARATOR {
            self.line += 1;
            self.line_offset = 0;
            self.separators.push_back(self.position - 1);
            if self.separators.len() > self.separator_capacity {
                self.separators.pop_front();
                self.truncated = true;
            }
        } else {
            self.line_offset += 1;
        }

        Ok(c)
    }

    /// Return the current character without advancing
    pub fn peek(&self) -> StreamResult<char> {
        self.buffer
            .get(self.position)
            .copied()
            .ok_or(StreamError::Exhausted {
                position: self.location(),
            })
    }

    /// Step back over the previously read character
    pub fn unget(&mut self) -> StreamResult<()> {
        if self.position == 0 {
            return Err(StreamError::SeekOutOfRange {
                target: 0,
                length: self.buffer.len(),
            });
        }
        self.retreat_to(self.position - 1);
        Ok(())
    }

    // ========================================================================
    // Seeking
    // ========================================================================

    /// Move the cursor to an absolute position.
    ///
    /// Backward moves restore bookkeeping from the separator log; forward
    /// moves replay `get` until the target.
    pub fn seek(&mut self, target: usize) -> StreamResult<()> {
        if target > self.buffer.len() {
            return Err(StreamError::SeekOutOfRange {
                target,
                length: self.buffer.len(),
            });
        }

        if target < self.position {
            self.retreat_to(target);
        } else {
            while self.position < target {
                self.get()?;
            }
        }
        Ok(())
    }

    /// Restore a position previously observed on this stream
    pub fn rewind_to(&mut self, target: usize) {
        if target < self.position {
            self.retreat_to(target);
        } else {
            let target = target.min(self.buffer.len());
            while self.position < target {
                // In range, cannot fail
                let _ = self.get();
            }
        }
    }

    fn retreat_to(&mut self, target: usize) {
        while let Some(&separator) = self.separators.back() {
            if separator < target {
                break;
            }
            self.separators.pop_back();
            self.line -= 1;
        }

        if self.separators.is_empty() && self.truncated {
            self.rescan(target);
            return;
        }

        self.position = target;
        self.line_offset = match self.separators.back() {
            Some(&separator) => target - separator - 1,
            None => target,
        };
    }

    /// Recompute every piece of bookkeeping for `target` from the buffer
    fn rescan(&mut self, target: usize) {
        let prefix = &self.buffer[..target];
        let positions: Vec<usize> = prefix
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == LINE_SEPARATOR)
            .map(|(i, _)| i)
            .collect();

        self.position = target;
        self.line = positions.len() + 1;
        self.line_offset = match positions.last() {
            Some(&separator) => target - separator - 1,
            None => target,
        };

        let keep_from = positions.len().saturating_sub(self.separator_capacity);
        self.truncated = keep_from > 0;
        self.separators = positions[keep_from..].iter().copied().collect();
    }

    // ========================================================================
    // State
    // ========================================================================

    /// True when every character has been consumed
    pub fn eof(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// True while characters remain to be read
    pub fn good(&self) -> bool {
        !self.eof()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Absolute character index of the cursor
    pub fn position(&self) -> usize {
        self.position
    }

    /// 1-based line of the cursor
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the cursor
    pub fn column(&self) -> usize {
        self.line_offset + 1
    }

    /// Characters already consumed on the current line
    pub fn line_offset(&self) -> usize {
        self.line_offset
    }

    pub fn location(&self) -> Position {
        Position::new(self.position, self.line, self.column())
    }

    /// Total number of buffered characters
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Text between two absolute positions, clamped to the buffer
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.buffer.len());
        let start = start.min(end);
        self.buffer[start..end].iter().collect()
    }

    /// Count of line separators in the whole buffer plus one
    pub fn line_count(&self) -> usize {
        self.buffer.iter().filter(|&&c| c == LINE_SEPARATOR).count() + 1
    }
}

//! Scoped rewind of a stream

use crate::stream::Stream;
use std::ops::{Deref, DerefMut};

/// Records the stream position on creation and restores it when dropped,
/// unless [`RewindGuard::commit`] was called first.
///
/// The guard derefs to the stream, so sub-parsers read through it directly.
/// Early returns and `?` both restore the position.
pub struct RewindGuard<'a> {
    stream: &'a mut Stream,
    start: usize,
    committed: bool,
}

impl<'a> RewindGuard<'a> {
    pub fn new(stream: &'a mut Stream) -> Self {
        let start = stream.position();
        Self {
            stream,
            start,
            committed: false,
        }
    }

    /// Position recorded when the guard was created
    pub fn start(&self) -> usize {
        self.start
    }

    /// Characters consumed since the guard was created
    pub fn consumed(&self) -> usize {
        self.stream.position().saturating_sub(self.start)
    }

    /// Restore the recorded position now, keeping the guard armed
    pub fn rewind(&mut self) {
        self.stream.rewind_to(self.start);
    }

    /// Keep everything consumed since the guard was created
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Deref for RewindGuard<'_> {
    type Target = Stream;

    fn deref(&self) -> &Stream {
        self.stream
    }
}

impl DerefMut for RewindGuard<'_> {
    fn deref_mut(&mut self) -> &mut Stream {
        self.stream
    }
}

impl Drop for RewindGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.stream.rewind_to(self.start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropped_guard_rewinds() {
        let mut stream = Stream::new("ab\ncd");
        stream.get().unwrap();
        let before = stream.location();
        {
            let mut guard = RewindGuard::new(&mut stream);
            guard.get().unwrap();
            guard.get().unwrap();
            guard.get().unwrap();
            assert_eq!(guard.consumed(), 3);
            assert_eq!(guard.line(), 2);
        }
        assert_eq!(stream.location(), before);
    }

    #[test]
    fn test_committed_guard_keeps_position() {
        let mut stream = Stream::new("abc");
        {
            let mut guard = RewindGuard::new(&mut stream);
            guard.get().unwrap();
            guard.commit();
        }
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn test_explicit_rewind_keeps_guard_armed() {
        let mut stream = Stream::new("abc");
        let mut guard = RewindGuard::new(&mut stream);
        guard.get().unwrap();
        guard.rewind();
        assert_eq!(guard.position(), 0);
        guard.get().unwrap();
        drop(guard);
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_nested_guards() {
        let mut stream = Stream::new("abcd");
        {
            let mut outer = RewindGuard::new(&mut stream);
            outer.get().unwrap();
            {
                let mut inner = RewindGuard::new(&mut outer);
                inner.get().unwrap();
                inner.commit();
            }
            assert_eq!(outer.position(), 2);
        }
        assert_eq!(stream.position(), 0);
    }
}

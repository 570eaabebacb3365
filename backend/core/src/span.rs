use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` into a document or phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end >= start, "span end {end} precedes start {start}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Move a phrase-local span into document coordinates.
    pub fn shift(self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// True when the two ranges share at least one position.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict() {
        let a = Span::new(0, 4);
        assert!(a.overlaps(&Span::new(3, 6)));
        assert!(!a.overlaps(&Span::new(4, 6)));
        assert!(!Span::new(2, 2).overlaps(&a));
    }

    #[test]
    fn shift_and_slice() {
        let s = Span::new(1, 3).shift(10);
        assert_eq!(s, Span::new(11, 13));
        assert_eq!(Span::new(4, 9).slice("last Monday"), Some(" Mond"));
        assert_eq!(Span::new(4, 90).slice("short"), None);
    }
}

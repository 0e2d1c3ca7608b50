/// A span in the source being validated.
///
/// The scanner passes the span of the construct it is reporting on; it ends
/// up unchanged in any diagnostic raised for that construct.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceSpan(usize, usize);

impl SourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start, end)
    }

    pub fn empty() -> Self {
        Self(0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == self.1
    }

    /// Get the range of the span.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.0..self.1
    }
}

impl From<std::ops::Range<usize>> for SourceSpan {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self(range.start, range.end)
    }
}

impl From<&xot::Span> for SourceSpan {
    fn from(span: &xot::Span) -> Self {
        Self(span.start, span.end)
    }
}

impl std::fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.0, self.1)
    }
}

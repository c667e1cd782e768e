//! Pagination specification.

use std::fmt;

/// Records per page. Only the three sizes offered by the selector exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// 10 records per page.
    #[default]
    Ten,
    /// 50 records per page.
    Fifty,
    /// 100 records per page.
    Hundred,
}

impl PageSize {
    /// Selector order.
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Fifty, PageSize::Hundred];

    /// Number of records per page.
    pub fn get(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }

    /// Next size in the selector, wrapping around.
    pub fn cycled(self) -> Self {
        match self {
            PageSize::Ten => PageSize::Fifty,
            PageSize::Fifty => PageSize::Hundred,
            PageSize::Hundred => PageSize::Ten,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(PageSize::Ten),
            50 => Ok(PageSize::Fifty),
            100 => Ok(PageSize::Hundred),
            other => Err(InvalidPageSize(other)),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A page size outside the selector values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Page size must be 10, 50 or 100 (got {0})")]
pub struct InvalidPageSize(pub usize);

/// Page size plus 1-based page index.
///
/// The index is never clamped against the listing here; the projection clamps
/// the visible slice instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    size: PageSize,
    index: usize,
}

impl PageSpec {
    /// Create a spec; an index of 0 is raised to 1.
    pub fn new(size: PageSize, index: usize) -> Self {
        Self {
            size,
            index: index.max(1),
        }
    }

    /// Records per page.
    pub fn size(&self) -> PageSize {
        self.size
    }

    /// 1-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Same index with a different page size.
    pub fn with_size(self, size: PageSize) -> Self {
        Self { size, ..self }
    }

    /// Same size with a different index; 0 is raised to 1.
    pub fn with_index(self, index: usize) -> Self {
        Self::new(self.size, index)
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::new(PageSize::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_accepts_only_selector_sizes() {
        assert_eq!(PageSize::try_from(10), Ok(PageSize::Ten));
        assert_eq!(PageSize::try_from(50), Ok(PageSize::Fifty));
        assert_eq!(PageSize::try_from(100), Ok(PageSize::Hundred));
        assert_eq!(PageSize::try_from(25), Err(InvalidPageSize(25)));
    }

    #[test]
    fn cycled_wraps() {
        assert_eq!(PageSize::Hundred.cycled(), PageSize::Ten);
        assert_eq!(PageSize::Ten.cycled().cycled(), PageSize::Hundred);
    }

    #[test]
    fn index_zero_becomes_one() {
        assert_eq!(PageSpec::new(PageSize::Ten, 0).index(), 1);
        assert_eq!(PageSpec::default().with_index(0).index(), 1);
    }

    #[test]
    fn with_size_preserves_index() {
        let spec = PageSpec::new(PageSize::Ten, 3).with_size(PageSize::Hundred);
        assert_eq!(spec.index(), 3);
        assert_eq!(spec.size(), PageSize::Hundred);
    }
}

use crate::span::Span;

/// A reusable set of capture slots populated by a single engine search.
///
/// A region records where a match and each of its capture groups landed in
/// the haystack. Slot `0` always corresponds to the span of the whole match,
/// while slots `i >= 1` correspond to the capture groups of the pattern in
/// declaration order. A slot holds `None` when its group did not participate
/// in the match.
///
/// A region is logically immutable once populated by a search, but the same
/// value can be cleared and handed to a subsequent search so that iteration
/// does not pay one allocation per match.
#[derive(Clone, Debug, Default)]
pub struct Region {
    slots: Vec<Option<Span>>,
}

impl Region {
    /// Create a new empty region.
    ///
    /// An engine search is expected to size the region via
    /// [`Region::resize`] before writing any slots.
    pub fn new() -> Region {
        Region { slots: Vec::new() }
    }

    /// Returns the number of slots, including the whole-match slot.
    ///
    /// For a populated region this is always `group_count + 1`.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if this region has no slots at all.
    ///
    /// Note that this says nothing about whether a match occurred. A region
    /// is only empty before its first search or after [`Region::clear`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the span of the slot at the given index, or `None` when the
    /// index is out of bounds or when the corresponding group did not
    /// participate in the match.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Span> {
        self.slots.get(index).copied().flatten()
    }

    /// Reset this region so it can be reused by another search.
    ///
    /// The underlying allocation is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Prepare exactly `len` empty slots, reusing the allocation when
    /// possible. Engine implementations call this before recording spans.
    #[inline]
    pub fn resize(&mut self, len: usize) {
        self.slots.clear();
        self.slots.resize(len, None);
    }

    /// Record the span for the slot at the given index.
    ///
    /// # Panics
    ///
    /// This panics when `index` is not less than [`Region::len`].
    #[inline]
    pub fn set(&mut self, index: usize, span: Option<Span>) {
        self.slots[index] = span;
    }
}

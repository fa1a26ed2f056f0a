//! Per-row offsets for variable-length data.

use std::ops::Range;

use crate::values::Values;

/// A collection of monotonically non-decreasing offsets mapping each
/// variable-length row to a contiguous range in a shared child buffer.
///
/// The first offset is always present and marks the start of the first item,
/// so a collection describing `n` items stores `n + 1` offsets.
#[derive(Debug, Clone)]
pub struct Offsets(Values);

impl Offsets {
    /// Creates a new empty collection, holding the single offset 0.
    pub fn new() -> Offsets {
        Self::with_capacity(0)
    }

    /// Creates a new collection with space reserved for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Offsets {
        let mut buf = Values::with_capacity::<u64>(capacity + 1);
        buf.push(0u64);
        Offsets(buf)
    }

    /// Returns the number of items represented by these offsets.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.0.len::<u64>() - 1
    }

    /// Returns `true` if the collection contains no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Returns the underlying slice of offsets, including the sentinel.
    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        self.0.as_slice()
    }

    /// Returns the first offset.
    #[inline]
    pub fn first(&self) -> u64 {
        self.as_slice()[0]
    }

    /// Returns the last offset, which marks the end of the last item.
    #[inline]
    pub fn last(&self) -> u64 {
        *self.as_slice().last().expect("sentinel offset")
    }

    /// Returns the child range of the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= item_count()`.
    #[inline]
    pub fn range_at(&self, index: usize) -> Range<u64> {
        let offsets = self.as_slice();
        offsets[index]..offsets[index + 1]
    }

    /// Returns the length of the item at `index`.
    #[inline]
    pub fn length_at(&self, index: usize) -> usize {
        let r = self.range_at(index);
        (r.end - r.start) as usize
    }

    /// Adds a new offset to the end of the collection, closing one item.
    ///
    /// # Panics
    ///
    /// Panics if `next_offset` is less than the current last offset.
    #[inline]
    pub fn push_offset(&mut self, next_offset: u64) {
        assert!(next_offset >= self.last());
        self.0.push(next_offset);
    }

    /// Closes one item of the given length.
    #[inline]
    pub fn push_length(&mut self, len: usize) {
        let last = self.last();
        self.0.push(last + len as u64);
    }

    /// Reserves space for at least `additional` more items.
    pub fn reserve(&mut self, additional: usize) {
        self.0.reserve::<u64>(additional);
    }

    /// Clears the collection, leaving only the initial offset 0.
    pub fn clear(&mut self) {
        self.0.clear();
        self.0.push(0u64);
    }
}

impl Default for Offsets {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Offsets {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

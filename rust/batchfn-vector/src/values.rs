//! A collection of primitive values stored as aligned bytes.

use crate::buffer::AlignedVec;

/// A contiguous buffer of primitive values, stored as bytes with alignment
/// guarantees.
///
/// `Values` wraps an [`AlignedVec`] and provides typed access on top of raw
/// byte storage. The element type is not recorded here; the owning vector
/// knows it and is responsible for consistent typed access.
#[derive(Debug, Clone, Default)]
pub struct Values(AlignedVec);

impl Values {
    /// Creates a new, empty `Values` buffer.
    pub fn new() -> Values {
        Values(AlignedVec::new())
    }

    /// Creates a new buffer with capacity for `capacity` elements of type `T`.
    pub fn with_capacity<T>(capacity: usize) -> Values {
        Values(AlignedVec::with_capacity(capacity * size_of::<T>()))
    }

    /// Creates a new buffer with the specified byte capacity.
    pub fn with_byte_capacity(capacity: usize) -> Values {
        Values(AlignedVec::with_capacity(capacity))
    }

    /// Creates a new buffer of `len` zeroed elements of type `T`.
    pub fn zeroed<T>(len: usize) -> Values
    where
        T: bytemuck::Zeroable,
    {
        Values(AlignedVec::zeroed(len * size_of::<T>()))
    }

    /// Returns the number of whole elements of type `T` in the buffer.
    #[inline]
    pub fn len<T>(&self) -> usize {
        self.0.len() / size_of::<T>()
    }

    /// Returns the number of bytes in the buffer.
    #[inline]
    pub fn bytes_len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the buffer contains no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the buffer contents as raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Interprets the buffer as a slice of `T`.
    #[inline]
    pub fn as_slice<T>(&self) -> &[T]
    where
        T: bytemuck::AnyBitPattern,
    {
        self.0.typed_data()
    }

    /// Interprets the buffer as a mutable slice of `T`.
    #[inline]
    pub fn as_mut_slice<T>(&mut self) -> &mut [T]
    where
        T: bytemuck::AnyBitPattern + bytemuck::NoUninit,
    {
        self.0.typed_data_mut()
    }

    /// Appends a single element.
    #[inline]
    pub fn push<T>(&mut self, value: T)
    where
        T: bytemuck::NoUninit,
    {
        self.0.push_typed(value);
    }

    /// Appends a slice of elements.
    #[inline]
    pub fn extend_from_slice<T>(&mut self, values: &[T])
    where
        T: bytemuck::NoUninit,
    {
        self.0.extend_from_typed_slice(values);
    }

    /// Resizes the buffer to `new_len` elements of type `T`, filling any new
    /// slots with `value`.
    pub fn resize<T>(&mut self, new_len: usize, value: T)
    where
        T: bytemuck::AnyBitPattern + bytemuck::NoUninit,
    {
        self.0.resize_typed(new_len, value);
    }

    /// Reserves capacity for at least `additional` more elements of type `T`.
    ///
    /// A capacity hint only; observable contents never change.
    pub fn reserve<T>(&mut self, additional: usize) {
        self.0.reserve(additional * size_of::<T>());
    }

    /// Clears the buffer, keeping the allocation.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl PartialEq for Values {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

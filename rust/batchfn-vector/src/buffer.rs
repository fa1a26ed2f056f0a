//! A growable byte vector with alignment guarantees for its storage.

/// A byte vector whose data always starts on a 64-byte boundary.
///
/// The alignment guarantee makes `bytemuck` casts to any primitive slice
/// type valid regardless of the element size. Internally the vector
/// over-allocates a plain `Vec<u8>` and skips to the first aligned offset;
/// growth doubles the capacity, so appends are amortized O(1).
pub struct AlignedVec {
    /// Underlying storage; may include padding before `start`.
    inner: Vec<u8>,
    /// Offset from the start of `inner` to the first aligned byte.
    start: usize,
}

impl AlignedVec {
    const ALIGNMENT: usize = 64;

    /// Creates a new empty vector without allocating.
    pub fn new() -> AlignedVec {
        AlignedVec {
            inner: Vec::new(),
            start: 0,
        }
    }

    /// Creates a new vector with capacity for at least `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> AlignedVec {
        Self::make(capacity)
    }

    /// Creates a new vector of `len` zero bytes.
    pub fn zeroed(len: usize) -> AlignedVec {
        let mut v = AlignedVec::with_capacity(len);
        v.resize(len, 0);
        v
    }

    /// Creates a new vector containing a copy of the provided slice.
    pub fn copy_from_slice(data: &[u8]) -> AlignedVec {
        let mut v = AlignedVec::with_capacity(data.len());
        v.extend_from_slice(data);
        v
    }

    /// Returns the number of bytes in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len() - self.start
    }

    /// Returns `true` if the vector contains no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of bytes the vector can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity().saturating_sub(self.start)
    }

    /// Returns a slice containing the entire vector.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner[self.start..]
    }

    /// Returns a mutable slice containing the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        let start = self.start;
        &mut self.inner[start..]
    }

    /// Reserves capacity for at least `additional` more bytes.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        if self.capacity() - self.len() >= additional {
            return;
        }
        self.grow(additional);
    }

    /// Appends a byte slice to the vector.
    #[inline]
    pub fn extend_from_slice(&mut self, s: &[u8]) {
        self.reserve(s.len());
        self.inner.extend_from_slice(s);
    }

    /// Resizes the vector to `new_len` bytes, filling new space with `value`.
    pub fn resize(&mut self, new_len: usize, value: u8) {
        let len = self.len();
        if new_len > len {
            self.reserve(new_len - len);
            self.inner.resize(self.start + new_len, value);
        } else {
            self.inner.truncate(self.start + new_len);
        }
    }

    /// Truncates the vector to `new_len` bytes.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len < self.len() {
            self.inner.truncate(self.start + new_len);
        }
    }

    /// Clears the vector, removing all bytes but keeping the allocation.
    pub fn clear(&mut self) {
        self.inner.truncate(self.start);
    }
}

impl AlignedVec {
    /// Appends a value of type `T` by copying its bytes.
    #[inline]
    pub fn push_typed<T>(&mut self, value: T)
    where
        T: bytemuck::NoUninit,
    {
        self.extend_from_slice(bytemuck::bytes_of(&value));
    }

    /// Appends a slice of `T` values by copying their bytes.
    #[inline]
    pub fn extend_from_typed_slice<T>(&mut self, values: &[T])
    where
        T: bytemuck::NoUninit,
    {
        self.extend_from_slice(bytemuck::cast_slice(values));
    }

    /// Resizes the vector to `new_count` elements of type `T`, filling any
    /// new slots with `value`.
    pub fn resize_typed<T>(&mut self, new_count: usize, value: T)
    where
        T: bytemuck::AnyBitPattern + bytemuck::NoUninit,
    {
        let count = self.len() / size_of::<T>();
        if new_count > count {
            self.reserve((new_count - count) * size_of::<T>());
            for _ in count..new_count {
                self.inner.extend_from_slice(bytemuck::bytes_of(&value));
            }
        } else {
            self.inner.truncate(self.start + new_count * size_of::<T>());
        }
    }

    /// Returns the vector's contents as a slice of `T`.
    ///
    /// The cast is total: the data pointer is 64-byte aligned, and any
    /// trailing bytes that do not form a whole `T` cause a panic in
    /// `cast_slice` rather than a partial view.
    #[inline]
    pub fn typed_data<T>(&self) -> &[T]
    where
        T: bytemuck::AnyBitPattern,
    {
        if self.is_empty() {
            // An unallocated vector has a dangling, 1-aligned data pointer.
            return &[];
        }
        bytemuck::cast_slice(self.as_slice())
    }

    /// Returns the vector's contents as a mutable slice of `T`.
    #[inline]
    pub fn typed_data_mut<T>(&mut self) -> &mut [T]
    where
        T: bytemuck::AnyBitPattern + bytemuck::NoUninit,
    {
        if self.is_empty() {
            return &mut [];
        }
        bytemuck::cast_slice_mut(self.as_mut_slice())
    }
}

impl AlignedVec {
    fn make(capacity: usize) -> AlignedVec {
        if capacity == 0 {
            return AlignedVec::new();
        }

        let vec_capacity = capacity
            .checked_add(Self::ALIGNMENT)
            .expect("capacity overflow");
        let mut inner = Vec::<u8>::with_capacity(vec_capacity);

        let p = inner.as_ptr() as usize;
        let start = p.next_multiple_of(Self::ALIGNMENT) - p;
        inner.resize(start, 0);

        let v = AlignedVec { inner, start };
        debug_assert!(v.capacity() >= capacity);
        v
    }

    #[cold]
    fn grow(&mut self, additional: usize) {
        let needed = self.len().checked_add(additional).expect("length overflow");
        let new_cap = std::cmp::max(self.capacity() * 2, needed);
        let mut v = Self::make(new_cap);
        v.inner.extend_from_slice(self.as_slice());
        *self = v;
    }
}

impl std::ops::Deref for AlignedVec {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl Clone for AlignedVec {
    fn clone(&self) -> AlignedVec {
        AlignedVec::copy_from_slice(self.as_slice())
    }
}

impl Default for AlignedVec {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for AlignedVec {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl std::fmt::Debug for AlignedVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedVec")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

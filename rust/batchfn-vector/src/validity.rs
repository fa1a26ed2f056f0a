//! Per-row validity (null) tracking.

/// Validity flags for the rows of a vector.
///
/// Three representations keep the common cases cheap:
/// - `AllValid`: no row is null; only a length is stored.
/// - `AllNull`: every row is null; only a length is stored.
/// - `Mask`: mixed rows, one byte per row (`1` valid, `0` null).
#[derive(Debug, Clone)]
pub enum Validity {
    /// Every row is valid (present).
    AllValid(usize),

    /// Every row is null.
    AllNull(usize),

    /// Mixed validity, one byte per row.
    Mask(Vec<u8>),
}

impl Validity {
    /// Creates an empty validity.
    pub fn new() -> Validity {
        Validity::AllValid(0)
    }

    /// Returns the number of rows tracked, null or not.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::AllValid(len) => *len,
            Self::AllNull(len) => *len,
            Self::Mask(mask) => mask.len(),
        }
    }

    /// Returns `true` if no rows are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the row at `index` is null.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn is_null(&self, index: usize) -> bool {
        match self {
            Self::AllValid(len) => {
                assert!(index < *len);
                false
            }
            Self::AllNull(len) => {
                assert!(index < *len);
                true
            }
            Self::Mask(mask) => mask[index] == 0,
        }
    }

    /// Returns `true` if the row at `index` is valid (not null).
    #[inline]
    pub fn is_valid(&self, index: usize) -> bool {
        !self.is_null(index)
    }

    /// Returns the number of null rows.
    pub fn null_count(&self) -> usize {
        match self {
            Self::AllValid(_) => 0,
            Self::AllNull(len) => *len,
            Self::Mask(mask) => mask.iter().filter(|&&b| b == 0).count(),
        }
    }

    /// Appends one valid row.
    pub fn push_valid(&mut self) {
        match self {
            Self::AllValid(len) => *len += 1,
            Self::AllNull(len) => {
                if *len == 0 {
                    *self = Self::AllValid(1);
                } else {
                    let mut mask = vec![0u8; *len];
                    mask.push(1);
                    *self = Self::Mask(mask);
                }
            }
            Self::Mask(mask) => mask.push(1),
        }
    }

    /// Appends one null row.
    pub fn push_null(&mut self) {
        match self {
            Self::AllValid(len) => {
                if *len == 0 {
                    *self = Self::AllNull(1);
                } else {
                    let mut mask = vec![1u8; *len];
                    mask.push(0);
                    *self = Self::Mask(mask);
                }
            }
            Self::AllNull(len) => *len += 1,
            Self::Mask(mask) => mask.push(0),
        }
    }

    /// Marks an already tracked row as null.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set_null(&mut self, index: usize) {
        assert!(index < self.len());
        match self {
            Self::AllNull(_) => {}
            Self::AllValid(len) => {
                let mut mask = vec![1u8; *len];
                mask[index] = 0;
                *self = Self::Mask(mask);
            }
            Self::Mask(mask) => mask[index] = 0,
        }
    }

    /// Reserves space for at least `additional` more rows.
    ///
    /// Only the mask representation holds memory; for the trivial
    /// representations this is a no-op.
    pub fn reserve(&mut self, additional: usize) {
        if let Self::Mask(mask) = self {
            mask.reserve(additional);
        }
    }
}

impl Default for Validity {
    fn default() -> Self {
        Validity::new()
    }
}

/// Equality is semantic: two validities are equal when they agree on every
/// row, regardless of representation. Vectors assembled through different
/// code paths must compare equal.
impl PartialEq for Validity {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        match (self, other) {
            (Self::AllValid(_), Self::AllValid(_)) => true,
            (Self::AllNull(_), Self::AllNull(_)) => true,
            _ => (0..self.len()).all(|i| self.is_null(i) == other.is_null(i)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_valid() {
        let mut validity = Validity::new();
        validity.push_valid();
        validity.push_valid();

        assert_eq!(validity.len(), 2);
        assert_eq!(validity.null_count(), 0);
        assert!(validity.is_valid(0));
        assert!(!validity.is_null(1));
        assert!(matches!(validity, Validity::AllValid(2)));
    }

    #[test]
    fn test_all_null() {
        let mut validity = Validity::new();
        validity.push_null();
        validity.push_null();

        assert_eq!(validity.len(), 2);
        assert_eq!(validity.null_count(), 2);
        assert!(validity.is_null(0));
        assert!(matches!(validity, Validity::AllNull(2)));
    }

    #[test]
    fn test_mixed() {
        let mut validity = Validity::new();
        validity.push_valid();
        validity.push_null();
        validity.push_valid();

        assert_eq!(validity.len(), 3);
        assert_eq!(validity.null_count(), 1);
        assert!(!validity.is_null(0));
        assert!(validity.is_null(1));
        assert!(!validity.is_null(2));
        assert!(matches!(validity, Validity::Mask(_)));
    }

    #[test]
    fn test_null_then_valid() {
        let mut validity = Validity::new();
        validity.push_null();
        validity.push_valid();

        assert!(validity.is_null(0));
        assert!(validity.is_valid(1));
    }

    #[test]
    fn test_semantic_equality() {
        let mut a = Validity::new();
        a.push_valid();
        a.push_valid();

        let b = Validity::Mask(vec![1, 1]);
        assert_eq!(a, b);

        let c = Validity::Mask(vec![1, 0]);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_set_null() {
        let mut validity = Validity::new();
        validity.push_valid();
        validity.push_valid();
        validity.set_null(1);

        assert!(!validity.is_null(0));
        assert!(validity.is_null(1));
        assert_eq!(validity.null_count(), 1);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds() {
        let validity = Validity::AllValid(2);
        validity.is_null(2);
    }
}

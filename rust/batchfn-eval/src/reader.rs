//! Zero-copy reader views over one input column at one row.
//!
//! A view never copies underlying data: dereferencing a nested element
//! recomputes the child offset and projects a narrower view over the same
//! buffers. Views are purely projective, so repeated reads of the same view
//! return identical values. A view is valid only as long as its underlying
//! vector is not mutated, which the invoker guarantees by projecting views
//! over completed input vectors only.

use batchfn_vector::logical::{NativeType, PrimitiveKind};
use batchfn_vector::vector::{RowVector, Vector};

/// A single row's value, projected from a columnar vector.
#[derive(Debug, Clone, Copy)]
pub enum ValueRef<'a> {
    Null,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Array(ArrayView<'a>),
    Row(RowView<'a>),
}

impl<'a> ValueRef<'a> {
    /// Projects the value of `vector` at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn read(vector: &'a Vector, row: usize) -> ValueRef<'a> {
        if vector.is_null(row) {
            return ValueRef::Null;
        }
        match vector {
            Vector::Primitive(v) => match v.kind() {
                PrimitiveKind::Int8 => ValueRef::Int8(v.get(row)),
                PrimitiveKind::Int16 => ValueRef::Int16(v.get(row)),
                PrimitiveKind::Int32 => ValueRef::Int32(v.get(row)),
                PrimitiveKind::Int64 => ValueRef::Int64(v.get(row)),
                PrimitiveKind::Float32 => ValueRef::Float32(v.get(row)),
                PrimitiveKind::Float64 => ValueRef::Float64(v.get(row)),
            },
            Vector::Array(v) => ValueRef::Array(ArrayView {
                element: v.element(),
                start: v.offset_at(row),
                len: v.length_at(row),
            }),
            Vector::Row(v) => ValueRef::Row(RowView { vector: v, row }),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, ValueRef::Null)
    }

    pub fn as_i8(&self) -> Option<i8> {
        match self {
            ValueRef::Int8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            ValueRef::Int16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ValueRef::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ValueRef::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ValueRef::Float32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ValueRef::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<ArrayView<'a>> {
        match self {
            ValueRef::Array(view) => Some(*view),
            _ => None,
        }
    }

    pub fn as_row(&self) -> Option<RowView<'a>> {
        match self {
            ValueRef::Row(view) => Some(*view),
            _ => None,
        }
    }

    /// Typed extraction, `None` for a null or a kind mismatch.
    pub fn get<T: FromValueRef>(&self) -> Option<T> {
        T::from_value(self)
    }
}

/// A read-only view over one row of an array vector.
///
/// The view holds the flattened element child plus the row's precomputed
/// start and length, so `len` is O(1) and `at` is a single offset addition.
#[derive(Debug, Clone, Copy)]
pub struct ArrayView<'a> {
    element: &'a Vector,
    start: usize,
    len: usize,
}

impl<'a> ArrayView<'a> {
    /// Returns the element count of this row. Zero is a valid length,
    /// distinct from the row being null.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Projects the element at `index` as a narrower view.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`; indexing past the declared length is a
    /// caller contract violation, checked consistently.
    pub fn at(&self, index: usize) -> ValueRef<'a> {
        assert!(index < self.len, "array element index out of range");
        ValueRef::read(self.element, self.start + index)
    }

    /// Iterates the elements of this row in order.
    pub fn iter(&self) -> impl Iterator<Item = ValueRef<'a>> + '_ {
        (0..self.len).map(|i| self.at(i))
    }
}

/// A read-only view over one row of a row (tuple) vector.
///
/// Fields of a row vector are aligned 1:1 with the parent by row index, so
/// field access needs no offset indirection.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    vector: &'a RowVector,
    row: usize,
}

impl<'a> RowView<'a> {
    pub fn field_count(&self) -> usize {
        self.vector.field_count()
    }

    /// Projects the field at `index` at this view's row.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn field(&self, index: usize) -> ValueRef<'a> {
        ValueRef::read(self.vector.field(index), self.row)
    }
}

/// Typed extraction of a primitive from a [`ValueRef`].
pub trait FromValueRef: NativeType {
    fn from_value(value: &ValueRef<'_>) -> Option<Self>;
}

impl FromValueRef for i8 {
    fn from_value(value: &ValueRef<'_>) -> Option<Self> {
        value.as_i8()
    }
}

impl FromValueRef for i16 {
    fn from_value(value: &ValueRef<'_>) -> Option<Self> {
        value.as_i16()
    }
}

impl FromValueRef for i32 {
    fn from_value(value: &ValueRef<'_>) -> Option<Self> {
        value.as_i32()
    }
}

impl FromValueRef for i64 {
    fn from_value(value: &ValueRef<'_>) -> Option<Self> {
        value.as_i64()
    }
}

impl FromValueRef for f32 {
    fn from_value(value: &ValueRef<'_>) -> Option<Self> {
        value.as_f32()
    }
}

impl FromValueRef for f64 {
    fn from_value(value: &ValueRef<'_>) -> Option<Self> {
        value.as_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchfn_vector::logical::LogicalType;

    fn sample_array_vector() -> Vector {
        let dtype = LogicalType::array(LogicalType::int64());
        let mut v = Vector::with_capacity(&dtype, 3);
        let array = v.as_array_mut().unwrap();
        for x in [1i64, 2, 3] {
            array.element_mut().as_primitive_mut().unwrap().push(x);
        }
        array.commit_row(true);
        array.commit_row(true); // empty row
        array.commit_row(false); // null row
        v
    }

    #[test]
    fn test_primitive_read() {
        let v = Vector::from_options(&[Some(5i64), None]);
        assert_eq!(ValueRef::read(&v, 0).as_i64(), Some(5));
        assert!(ValueRef::read(&v, 1).is_null());
        assert_eq!(ValueRef::read(&v, 0).get::<i64>(), Some(5));
        assert_eq!(ValueRef::read(&v, 0).get::<f64>(), None);
    }

    #[test]
    fn test_array_view() {
        let v = sample_array_vector();

        let view = ValueRef::read(&v, 0).as_array().unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.at(0).as_i64(), Some(1));
        assert_eq!(view.at(2).as_i64(), Some(3));
        let collected: Vec<i64> = view.iter().map(|e| e.as_i64().unwrap()).collect();
        assert_eq!(collected, vec![1, 2, 3]);

        let empty = ValueRef::read(&v, 1).as_array().unwrap();
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());

        assert!(ValueRef::read(&v, 2).is_null());
    }

    #[test]
    fn test_reads_are_idempotent() {
        let v = sample_array_vector();
        let view = ValueRef::read(&v, 0).as_array().unwrap();
        for _ in 0..3 {
            assert_eq!(view.len(), 3);
            assert_eq!(view.at(1).as_i64(), Some(2));
        }
    }

    #[test]
    #[should_panic(expected = "array element index out of range")]
    fn test_array_view_out_of_range() {
        let v = sample_array_vector();
        let view = ValueRef::read(&v, 0).as_array().unwrap();
        view.at(3);
    }

    #[test]
    fn test_row_view() {
        let dtype = LogicalType::row(vec![LogicalType::int64(), LogicalType::float64()]);
        let mut v = Vector::with_capacity(&dtype, 1);
        let row = v.as_row_mut().unwrap();
        row.field_mut(0).as_primitive_mut().unwrap().push(7i64);
        row.field_mut(1).as_primitive_mut().unwrap().push(1.5f64);
        row.commit_row(true);

        let view = ValueRef::read(&v, 0).as_row().unwrap();
        assert_eq!(view.field_count(), 2);
        assert_eq!(view.field(0).as_i64(), Some(7));
        assert_eq!(view.field(1).as_f64(), Some(1.5));
    }
}

//! Columnar vectors over the closed logical type universe.
//!
//! A [`Vector`] is a tagged variant over the three shapes:
//!
//! - [`PrimitiveVector`]: a contiguous value buffer plus validity.
//! - [`ArrayVector`]: a single flattened element child plus per-row offsets
//!   and validity. The row at index `r` covers the element range
//!   `offsets[r]..offsets[r + 1]`.
//! - [`RowVector`]: one child per field, aligned with the parent 1:1 by row
//!   index, plus validity.
//!
//! Vectors are append-only while under construction (rows are written in
//! strictly increasing index order by exactly one writer) and treated as
//! immutable once handed to readers.

use crate::logical::{LogicalType, LogicalTypeRef, NativeType, PrimitiveKind};
use crate::offsets::Offsets;
use crate::validity::Validity;
use crate::values::Values;

/// A columnar vector for one logical column.
#[derive(Debug, Clone, PartialEq)]
pub enum Vector {
    Primitive(PrimitiveVector),
    Array(ArrayVector),
    Row(RowVector),
}

impl Vector {
    /// Creates an empty vector of the given logical type, with space
    /// reserved for `capacity` rows at every nesting level.
    pub fn with_capacity(data_type: &LogicalTypeRef, capacity: usize) -> Vector {
        match data_type.as_ref() {
            LogicalType::Primitive(_) => {
                Vector::Primitive(PrimitiveVector::with_capacity(data_type.clone(), capacity))
            }
            LogicalType::Array(element) => Vector::Array(ArrayVector {
                data_type: data_type.clone(),
                element: Box::new(Vector::with_capacity(element, capacity)),
                offsets: Offsets::with_capacity(capacity),
                validity: Validity::new(),
            }),
            LogicalType::Row(fields) => Vector::Row(RowVector {
                data_type: data_type.clone(),
                fields: fields
                    .iter()
                    .map(|field| Vector::with_capacity(field, capacity))
                    .collect(),
                validity: Validity::new(),
            }),
        }
    }

    /// Creates a primitive vector from a slice of values, all valid.
    pub fn from_slice<T: NativeType>(values: &[T]) -> Vector {
        Vector::Primitive(PrimitiveVector::from_slice(values))
    }

    /// Creates a primitive vector from optional values, `None` meaning null.
    pub fn from_options<T: NativeType>(values: &[Option<T>]) -> Vector {
        Vector::Primitive(PrimitiveVector::from_options(values))
    }

    /// Returns the logical type shared by this vector.
    pub fn data_type(&self) -> &LogicalTypeRef {
        match self {
            Vector::Primitive(v) => &v.data_type,
            Vector::Array(v) => &v.data_type,
            Vector::Row(v) => &v.data_type,
        }
    }

    /// Returns the number of rows, null or not.
    pub fn len(&self) -> usize {
        self.validity().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the row at `index` is null.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn is_null(&self, index: usize) -> bool {
        self.validity().is_null(index)
    }

    pub fn validity(&self) -> &Validity {
        match self {
            Vector::Primitive(v) => &v.validity,
            Vector::Array(v) => &v.validity,
            Vector::Row(v) => &v.validity,
        }
    }

    /// Appends one null row, keeping all child bookkeeping consistent.
    pub fn push_null(&mut self) {
        match self {
            Vector::Primitive(v) => v.push_null(),
            Vector::Array(v) => v.commit_row(false),
            Vector::Row(v) => v.commit_row(false),
        }
    }

    /// Reserves space for at least `additional` more rows.
    ///
    /// A capacity hint only; observable behavior never changes.
    pub fn reserve(&mut self, additional: usize) {
        match self {
            Vector::Primitive(v) => {
                v.values.reserve::<u8>(additional * v.kind.size());
                v.validity.reserve(additional);
            }
            Vector::Array(v) => {
                v.offsets.reserve(additional);
                v.validity.reserve(additional);
            }
            Vector::Row(v) => {
                for field in &mut v.fields {
                    field.reserve(additional);
                }
                v.validity.reserve(additional);
            }
        }
    }

    pub fn as_primitive(&self) -> Option<&PrimitiveVector> {
        match self {
            Vector::Primitive(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_primitive_mut(&mut self) -> Option<&mut PrimitiveVector> {
        match self {
            Vector::Primitive(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayVector> {
        match self {
            Vector::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayVector> {
        match self {
            Vector::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_row(&self) -> Option<&RowVector> {
        match self {
            Vector::Row(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_row_mut(&mut self) -> Option<&mut RowVector> {
        match self {
            Vector::Row(v) => Some(v),
            _ => None,
        }
    }
}

/// A vector of primitive values.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveVector {
    data_type: LogicalTypeRef,
    kind: PrimitiveKind,
    values: Values,
    validity: Validity,
}

impl PrimitiveVector {
    /// Creates an empty vector of the given primitive type with space for
    /// `capacity` rows.
    ///
    /// # Panics
    ///
    /// Panics if `data_type` is not a primitive type.
    pub fn with_capacity(data_type: LogicalTypeRef, capacity: usize) -> PrimitiveVector {
        let kind = data_type
            .as_primitive()
            .expect("primitive vector requires a primitive type");
        PrimitiveVector {
            data_type,
            kind,
            values: Values::with_byte_capacity(capacity * kind.size()),
            validity: Validity::new(),
        }
    }

    /// Creates a vector from a slice of values, all valid.
    pub fn from_slice<T: NativeType>(values: &[T]) -> PrimitiveVector {
        let mut vector =
            PrimitiveVector::with_capacity(LogicalType::primitive(T::KIND), values.len());
        vector.values.extend_from_slice(values);
        for _ in values {
            vector.validity.push_valid();
        }
        vector
    }

    /// Creates a vector from optional values, `None` meaning null.
    pub fn from_options<T: NativeType>(values: &[Option<T>]) -> PrimitiveVector {
        let mut vector =
            PrimitiveVector::with_capacity(LogicalType::primitive(T::KIND), values.len());
        for value in values {
            match value {
                Some(v) => vector.push(*v),
                None => vector.push_null(),
            }
        }
        vector
    }

    #[inline]
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.validity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_null(&self, index: usize) -> bool {
        self.validity.is_null(index)
    }

    /// Appends one valid value.
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the vector's primitive kind.
    #[inline]
    pub fn push<T: NativeType>(&mut self, value: T) {
        assert_eq!(T::KIND, self.kind, "primitive kind mismatch");
        self.values.push(value);
        self.validity.push_valid();
    }

    /// Appends one null row. The value slot is zero-filled so that value
    /// and validity buffers stay index-aligned.
    pub fn push_null(&mut self) {
        match self.kind {
            PrimitiveKind::Int8 => self.values.push(0i8),
            PrimitiveKind::Int16 => self.values.push(0i16),
            PrimitiveKind::Int32 => self.values.push(0i32),
            PrimitiveKind::Int64 => self.values.push(0i64),
            PrimitiveKind::Float32 => self.values.push(0f32),
            PrimitiveKind::Float64 => self.values.push(0f64),
        }
        self.validity.push_null();
    }

    /// Marks an already written row as null. The value slot is retained but
    /// never read by callers that honor validity.
    pub fn set_null(&mut self, index: usize) {
        self.validity.set_null(index);
    }

    /// Returns the value at `index`.
    ///
    /// Reading a null row returns the zero-filled slot; callers are expected
    /// to check validity first.
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the vector's kind or `index` is out of
    /// bounds.
    #[inline]
    pub fn get<T: NativeType>(&self, index: usize) -> T {
        assert_eq!(T::KIND, self.kind, "primitive kind mismatch");
        self.values.as_slice::<T>()[index]
    }

    /// Returns the whole value buffer as a typed slice.
    pub fn values_as<T: NativeType>(&self) -> &[T] {
        assert_eq!(T::KIND, self.kind, "primitive kind mismatch");
        self.values.as_slice::<T>()
    }
}

/// A vector of variable-length arrays over a flattened element child.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayVector {
    data_type: LogicalTypeRef,
    element: Box<Vector>,
    offsets: Offsets,
    validity: Validity,
}

impl ArrayVector {
    #[inline]
    pub fn len(&self) -> usize {
        self.validity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_null(&self, index: usize) -> bool {
        self.validity.is_null(index)
    }

    /// The flattened element child shared by all rows.
    pub fn element(&self) -> &Vector {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut Vector {
        &mut self.element
    }

    /// Returns the element child index where the row at `index` starts.
    #[inline]
    pub fn offset_at(&self, index: usize) -> usize {
        self.offsets.range_at(index).start as usize
    }

    /// Returns the element count of the row at `index`, in O(1).
    #[inline]
    pub fn length_at(&self, index: usize) -> usize {
        self.offsets.length_at(index)
    }

    /// Closes the row currently under construction.
    ///
    /// The element child's current length becomes the row's closing offset:
    /// whatever was appended since the previous commit belongs to this row.
    /// For a null row any partially appended elements are retained inside
    /// the (never read) null range, and the next row's bookkeeping continues
    /// from the child's current length.
    pub fn commit_row(&mut self, valid: bool) {
        self.offsets.push_offset(self.element.len() as u64);
        if valid {
            self.validity.push_valid();
        } else {
            self.validity.push_null();
        }
    }
}

/// A vector of rows (tuples) with one child per field.
#[derive(Debug, Clone, PartialEq)]
pub struct RowVector {
    data_type: LogicalTypeRef,
    fields: Vec<Vector>,
    validity: Validity,
}

impl RowVector {
    #[inline]
    pub fn len(&self) -> usize {
        self.validity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_null(&self, index: usize) -> bool {
        self.validity.is_null(index)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[Vector] {
        &self.fields
    }

    /// Returns the child vector of the field at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn field(&self, index: usize) -> &Vector {
        &self.fields[index]
    }

    pub fn field_mut(&mut self, index: usize) -> &mut Vector {
        &mut self.fields[index]
    }

    /// Closes the row currently under construction.
    ///
    /// Fields written during this row have advanced by exactly one entry;
    /// any field left unset is padded with null, so that after the commit
    /// every child has exactly the parent's row count.
    pub fn commit_row(&mut self, valid: bool) {
        let row = self.validity.len();
        for field in &mut self.fields {
            match field.len() {
                len if len == row => field.push_null(),
                len if len == row + 1 => {}
                len => panic!("row field out of sync: child len {len}, committing row {row}"),
            }
        }
        if valid {
            self.validity.push_valid();
        } else {
            self.validity.push_null();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_roundtrip() {
        let mut v = PrimitiveVector::with_capacity(LogicalType::int64(), 4);
        v.push(10i64);
        v.push_null();
        v.push(30i64);

        assert_eq!(v.len(), 3);
        assert!(!v.is_null(0));
        assert!(v.is_null(1));
        assert_eq!(v.get::<i64>(0), 10);
        assert_eq!(v.get::<i64>(2), 30);
        assert_eq!(v.values_as::<i64>(), &[10, 0, 30]);
    }

    #[test]
    fn test_from_slice_and_options() {
        let a = Vector::from_slice(&[1i32, 2, 3]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.data_type().as_ref(), LogicalType::int32().as_ref());

        let b = Vector::from_options(&[Some(1i32), None, Some(3)]);
        assert!(b.is_null(1));
        assert_eq!(b.as_primitive().unwrap().get::<i32>(2), 3);
    }

    #[test]
    #[should_panic(expected = "primitive kind mismatch")]
    fn test_push_kind_mismatch() {
        let mut v = PrimitiveVector::with_capacity(LogicalType::int64(), 0);
        v.push(1.0f64);
    }

    #[test]
    fn test_array_commit_rows() {
        let dtype = LogicalType::array(LogicalType::int64());
        let mut v = Vector::with_capacity(&dtype, 3);
        let array = v.as_array_mut().unwrap();

        for x in [0i64, 1, 2, 4] {
            array.element_mut().as_primitive_mut().unwrap().push(x);
        }
        array.commit_row(true);

        // An empty row is valid and distinct from a null row.
        array.commit_row(true);

        array.element_mut().as_primitive_mut().unwrap().push(7i64);
        array.commit_row(false);

        assert_eq!(array.len(), 3);
        assert_eq!(array.length_at(0), 4);
        assert_eq!(array.offset_at(0), 0);
        assert_eq!(array.length_at(1), 0);
        assert!(!array.is_null(1));
        assert!(array.is_null(2));
        // The null row's partial append stays inside its range; the next
        // offset continues from the child's length.
        assert_eq!(array.offset_at(2), 4);
        assert_eq!(array.length_at(2), 1);
    }

    #[test]
    fn test_row_commit_pads_unset_fields() {
        let dtype = LogicalType::row(vec![LogicalType::int64(), LogicalType::float64()]);
        let mut v = Vector::with_capacity(&dtype, 2);
        let row = v.as_row_mut().unwrap();

        row.field_mut(0).as_primitive_mut().unwrap().push(5i64);
        row.commit_row(true);

        assert_eq!(row.len(), 1);
        assert_eq!(row.field(0).len(), 1);
        assert_eq!(row.field(1).len(), 1);
        assert!(!row.is_null(0));
        assert!(row.field(1).is_null(0));
    }

    #[test]
    fn test_nested_with_capacity_shape() {
        let dtype = LogicalType::array(LogicalType::row(vec![
            LogicalType::int64(),
            LogicalType::float64(),
        ]));
        let v = Vector::with_capacity(&dtype, 8);
        let array = v.as_array().unwrap();
        let row = array.element().as_row().unwrap();
        assert_eq!(row.field_count(), 2);
        assert!(row.field(1).data_type().is_primitive());
    }

    #[test]
    fn test_vector_equality() {
        let a = Vector::from_slice(&[1i64, 2]);
        let mut b = Vector::with_capacity(&LogicalType::int64(), 0);
        let p = b.as_primitive_mut().unwrap();
        p.push(1i64);
        p.push(2i64);
        assert_eq!(a, b);
    }
}

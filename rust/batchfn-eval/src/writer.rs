//! Scoped writer cursors over the output column under construction.
//!
//! The invoker exclusively owns the output vector; a writer is a non-owning
//! cursor into it, valid only for the duration of one row's call. Appends
//! extend the current row's logical slot, and the invoker (not the user
//! function) commits the row's length and validity when the call returns.
//!
//! Nested composition is closure-scoped: appending a row element to an
//! array runs a closure over a narrower [`RowWriter`] and commits that
//! element when the closure returns, recursively reusing the same contract
//! at every nesting level.

use batchfn_common::error::Error;
use batchfn_common::{Result, verify_arg};
use batchfn_vector::logical::NativeType;
use batchfn_vector::vector::{ArrayVector, PrimitiveVector, RowVector, Vector};

/// A writer cursor over the output vector, positioned at one row.
pub enum ValueWriter<'a> {
    Primitive(PrimitiveWriter<'a>),
    Array(ArrayWriter<'a>),
    Row(RowWriter<'a>),
}

impl<'a> ValueWriter<'a> {
    /// Creates a cursor for the row at `row`, which must be the next row to
    /// be committed.
    pub fn new(vector: &'a mut Vector, row: usize) -> ValueWriter<'a> {
        debug_assert_eq!(vector.len(), row, "writer scoped past the current row");
        match vector {
            Vector::Primitive(v) => ValueWriter::Primitive(PrimitiveWriter { vector: v, row }),
            Vector::Array(v) => ValueWriter::Array(ArrayWriter { vector: v }),
            Vector::Row(v) => ValueWriter::Row(RowWriter { vector: v, row }),
        }
    }

    pub fn as_primitive_mut(&mut self) -> Result<&mut PrimitiveWriter<'a>> {
        match self {
            ValueWriter::Primitive(w) => Ok(w),
            _ => Err(Error::invalid_operation("output is not a primitive slot")),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut ArrayWriter<'a>> {
        match self {
            ValueWriter::Array(w) => Ok(w),
            _ => Err(Error::invalid_operation("output is not an array slot")),
        }
    }

    pub fn as_row_mut(&mut self) -> Result<&mut RowWriter<'a>> {
        match self {
            ValueWriter::Row(w) => Ok(w),
            _ => Err(Error::invalid_operation("output is not a row slot")),
        }
    }

    /// Convenience for primitive outputs: sets the current row's value.
    pub fn set<T: NativeType>(&mut self, value: T) -> Result<()> {
        self.as_primitive_mut()?.set(value)
    }
}

/// Writer for a primitive output slot.
pub struct PrimitiveWriter<'a> {
    vector: &'a mut PrimitiveVector,
    row: usize,
}

impl PrimitiveWriter<'_> {
    /// Sets the current row's value. Each row accepts exactly one value.
    pub fn set<T: NativeType>(&mut self, value: T) -> Result<()> {
        if T::KIND != self.vector.kind() {
            return Err(Error::type_mismatch(
                "primitive output",
                self.vector.kind().to_string(),
                T::KIND.to_string(),
            ));
        }
        if self.vector.len() != self.row {
            return Err(Error::invalid_operation("output row already written"));
        }
        self.vector.push(value);
        Ok(())
    }
}

/// Writer for an array output slot.
///
/// Appends extend the current row's backing element child; the running
/// element count becomes the row's length when the invoker commits it.
pub struct ArrayWriter<'a> {
    vector: &'a mut ArrayVector,
}

impl ArrayWriter<'_> {
    /// Capacity hint for `additional` further elements. Never changes
    /// observable behavior, only amortizes growth.
    pub fn reserve(&mut self, additional: usize) {
        self.vector.element_mut().reserve(additional);
    }

    /// Appends one primitive element to the current row.
    pub fn push<T: NativeType>(&mut self, value: T) -> Result<()> {
        match self.vector.element_mut() {
            Vector::Primitive(element) => {
                if T::KIND != element.kind() {
                    return Err(Error::type_mismatch(
                        "array element",
                        element.kind().to_string(),
                        T::KIND.to_string(),
                    ));
                }
                element.push(value);
                Ok(())
            }
            element => Err(Error::type_mismatch(
                "array element",
                element.data_type().to_string(),
                T::KIND.to_string(),
            )),
        }
    }

    /// Appends one null element to the current row.
    pub fn push_null(&mut self) {
        self.vector.element_mut().push_null();
    }

    /// Appends one row-typed element, populated by the closure.
    ///
    /// The closure receives a [`RowWriter`] scoped to the new element; the
    /// element is committed when the closure returns successfully, with any
    /// unset fields defaulting to null.
    pub fn push_row(&mut self, f: impl FnOnce(&mut RowWriter<'_>) -> Result<()>) -> Result<()> {
        match self.vector.element_mut() {
            Vector::Row(element) => {
                let row = element.len();
                let mut writer = RowWriter {
                    vector: &mut *element,
                    row,
                };
                f(&mut writer)?;
                element.commit_row(true);
                Ok(())
            }
            element => Err(Error::type_mismatch(
                "array element",
                element.data_type().to_string(),
                "ROW",
            )),
        }
    }

    /// Appends one array-typed element, populated by the closure.
    pub fn push_array(&mut self, f: impl FnOnce(&mut ArrayWriter<'_>) -> Result<()>) -> Result<()> {
        match self.vector.element_mut() {
            Vector::Array(element) => {
                let mut writer = ArrayWriter {
                    vector: &mut *element,
                };
                f(&mut writer)?;
                element.commit_row(true);
                Ok(())
            }
            element => Err(Error::type_mismatch(
                "array element",
                element.data_type().to_string(),
                "ARRAY",
            )),
        }
    }
}

/// Writer for a row (tuple) output slot.
pub struct RowWriter<'a> {
    vector: &'a mut RowVector,
    row: usize,
}

impl RowWriter<'_> {
    pub fn field_count(&self) -> usize {
        self.vector.field_count()
    }

    /// Sets the primitive field at `index` for the current row. Setting the
    /// same field twice is an error; a field left unset defaults to null at
    /// commit.
    pub fn set<T: NativeType>(&mut self, index: usize, value: T) -> Result<()> {
        verify_arg!(index, index < self.vector.field_count());
        let row = self.row;
        match self.vector.field_mut(index) {
            Vector::Primitive(field) => {
                if T::KIND != field.kind() {
                    return Err(Error::type_mismatch(
                        "row field",
                        field.kind().to_string(),
                        T::KIND.to_string(),
                    ));
                }
                if field.len() != row {
                    return Err(Error::invalid_operation("row field already set"));
                }
                field.push(value);
                Ok(())
            }
            field => Err(Error::type_mismatch(
                "row field",
                field.data_type().to_string(),
                T::KIND.to_string(),
            )),
        }
    }

    /// Explicitly sets the field at `index` to null for the current row.
    pub fn set_null(&mut self, index: usize) -> Result<()> {
        verify_arg!(index, index < self.vector.field_count());
        let row = self.row;
        let field = self.vector.field_mut(index);
        if field.len() != row {
            return Err(Error::invalid_operation("row field already set"));
        }
        field.push_null();
        Ok(())
    }

    /// Populates the array-typed field at `index` through the closure.
    pub fn set_array(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut ArrayWriter<'_>) -> Result<()>,
    ) -> Result<()> {
        verify_arg!(index, index < self.vector.field_count());
        let row = self.row;
        match self.vector.field_mut(index) {
            Vector::Array(field) => {
                if field.len() != row {
                    return Err(Error::invalid_operation("row field already set"));
                }
                let mut writer = ArrayWriter {
                    vector: &mut *field,
                };
                f(&mut writer)?;
                field.commit_row(true);
                Ok(())
            }
            field => Err(Error::type_mismatch(
                "row field",
                field.data_type().to_string(),
                "ARRAY",
            )),
        }
    }

    /// Populates the row-typed field at `index` through the closure.
    pub fn set_row(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut RowWriter<'_>) -> Result<()>,
    ) -> Result<()> {
        verify_arg!(index, index < self.vector.field_count());
        let row = self.row;
        match self.vector.field_mut(index) {
            Vector::Row(field) => {
                if field.len() != row {
                    return Err(Error::invalid_operation("row field already set"));
                }
                let mut writer = RowWriter {
                    vector: &mut *field,
                    row,
                };
                f(&mut writer)?;
                field.commit_row(true);
                Ok(())
            }
            field => Err(Error::type_mismatch(
                "row field",
                field.data_type().to_string(),
                "ROW",
            )),
        }
    }
}

//! The row-vectorized invoker: drives a bound function over a batch.

use std::sync::Arc;

use batchfn_common::error::Error;
use batchfn_common::{Result, verify_arg};
use batchfn_vector::logical::LogicalTypeRef;
use batchfn_vector::vector::Vector;

use crate::function::RowStatus;
use crate::reader::ValueRef;
use crate::registry::FunctionEntry;
use crate::writer::ValueWriter;

/// A function resolved against concrete argument types, ready to evaluate.
///
/// Binding is separate from evaluation so that type errors surface once per
/// plan, not once per batch. A bound function is cheap to clone and can be
/// invoked over any number of batches.
#[derive(Clone)]
pub struct BoundFunction {
    entry: Arc<FunctionEntry>,
}

impl std::fmt::Debug for BoundFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundFunction")
            .field("name", &self.entry.name)
            .field("arg_types", &self.entry.arg_types)
            .field("return_type", &self.entry.return_type)
            .finish()
    }
}

impl BoundFunction {
    pub(crate) fn new(entry: Arc<FunctionEntry>) -> BoundFunction {
        BoundFunction { entry }
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn arg_types(&self) -> &[LogicalTypeRef] {
        &self.entry.arg_types
    }

    pub fn return_type(&self) -> &LogicalTypeRef {
        &self.entry.return_type
    }

    /// Evaluates the function over `row_count` rows of `inputs`, producing
    /// an output vector with exactly one slot per row.
    ///
    /// Per row, the outcome is one of:
    /// - a value, when the body writes one and reports [`RowStatus::Value`];
    /// - a null, when any argument is null and the function does not accept
    ///   nulls, or when the body reports [`RowStatus::Null`];
    /// - an error, which aborts the whole batch and discards the output.
    ///
    /// Rows are evaluated in index order; output bookkeeping for row `r` is
    /// committed before row `r + 1` starts, so a failed batch leaves no
    /// observable partial output.
    pub fn invoke(&self, inputs: &[Vector], row_count: usize) -> Result<Vector> {
        let entry = self.entry.as_ref();
        if inputs.len() != entry.arg_types.len() {
            return Err(Error::type_mismatch(
                format!("function '{}' input count", entry.name),
                entry.arg_types.len().to_string(),
                inputs.len().to_string(),
            ));
        }
        for (i, (input, declared)) in inputs.iter().zip(&entry.arg_types).enumerate() {
            if input.data_type() != declared {
                return Err(Error::type_mismatch(
                    format!("function '{}' input {i}", entry.name),
                    declared.to_string(),
                    input.data_type().to_string(),
                ));
            }
            verify_arg!(inputs, input.len() == row_count);
        }

        log::trace!(
            "invoking '{}' over {} rows, {} inputs",
            entry.name,
            row_count,
            inputs.len()
        );

        let mut output = Vector::with_capacity(&entry.return_type, row_count);
        let mut args: Vec<ValueRef<'_>> = Vec::with_capacity(inputs.len());
        for row in 0..row_count {
            args.clear();
            args.extend(inputs.iter().map(|input| ValueRef::read(input, row)));

            if !entry.options.accepts_nulls && args.iter().any(ValueRef::is_null) {
                output.push_null();
                continue;
            }

            let mut writer = ValueWriter::new(&mut output, row);
            let status = entry.function.call(&args, &mut writer)?;
            commit_row(&mut output, row, status)?;
        }
        debug_assert_eq!(output.len(), row_count);
        Ok(output)
    }
}

/// Closes the output slot for `row` according to the reported status.
///
/// For a primitive output, a value row must have been written through the
/// writer (exactly one push), and a null row tolerates a value that was
/// written before the function decided on null. For nested outputs, the
/// commit finalizes whatever the writer appended, discarding it into the
/// unread null range when the row is null.
fn commit_row(output: &mut Vector, row: usize, status: RowStatus) -> Result<()> {
    match output {
        Vector::Primitive(v) => match status {
            RowStatus::Value => {
                if v.len() != row + 1 {
                    return Err(Error::invalid_operation(
                        "function reported a value without writing one",
                    ));
                }
            }
            RowStatus::Null => {
                if v.len() == row + 1 {
                    v.set_null(row);
                } else {
                    v.push_null();
                }
            }
        },
        Vector::Array(v) => v.commit_row(status == RowStatus::Value),
        Vector::Row(v) => v.commit_row(status == RowStatus::Value),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FunctionOptions, FunctionRegistry};
    use batchfn_common::error::ErrorKind;
    use batchfn_vector::logical::LogicalType;

    #[test]
    fn test_unary_invoke() {
        let mut registry = FunctionRegistry::new();
        registry
            .register_unary("double", |x: i64| Some(x * 2))
            .unwrap();
        let bound = registry.bind("double", &[LogicalType::int64()]).unwrap();

        let input = Vector::from_slice(&[1i64, 2, 3]);
        let output = bound.invoke(&[input], 3).unwrap();
        assert_eq!(output.as_primitive().unwrap().values_as::<i64>(), &[2, 4, 6]);
        assert_eq!(output.validity().null_count(), 0);
    }

    #[test]
    fn test_null_arguments_skip_the_body() {
        let mut registry = FunctionRegistry::new();
        registry
            .register_unary("double", |x: i64| Some(x * 2))
            .unwrap();
        let bound = registry.bind("double", &[LogicalType::int64()]).unwrap();

        let input = Vector::from_options(&[Some(1i64), None, Some(3)]);
        let output = bound.invoke(&[input], 3).unwrap();
        assert!(!output.is_null(0));
        assert!(output.is_null(1));
        assert_eq!(output.as_primitive().unwrap().get::<i64>(2), 6);
    }

    #[test]
    fn test_accepts_nulls_sees_null_arguments() {
        let mut registry = FunctionRegistry::new();
        registry
            .register_with_options(
                "is_null",
                vec![LogicalType::int64()],
                LogicalType::int64(),
                FunctionOptions { accepts_nulls: true },
                |args: &[ValueRef<'_>], out: &mut ValueWriter<'_>| {
                    out.set(args[0].is_null() as i64)?;
                    Ok(RowStatus::Value)
                },
            )
            .unwrap();
        let bound = registry.bind("is_null", &[LogicalType::int64()]).unwrap();

        let input = Vector::from_options(&[Some(7i64), None]);
        let output = bound.invoke(&[input], 2).unwrap();
        assert_eq!(output.as_primitive().unwrap().values_as::<i64>(), &[0, 1]);
        assert_eq!(output.validity().null_count(), 0);
    }

    #[test]
    fn test_row_status_null_after_write() {
        // The body writes a value, then reconsiders; the committed row must
        // still be null.
        let mut registry = FunctionRegistry::new();
        registry
            .register(
                "fickle",
                vec![LogicalType::int64()],
                LogicalType::int64(),
                |args: &[ValueRef<'_>], out: &mut ValueWriter<'_>| {
                    let x = args[0].as_i64().unwrap();
                    out.set(x)?;
                    if x % 2 == 0 {
                        Ok(RowStatus::Null)
                    } else {
                        Ok(RowStatus::Value)
                    }
                },
            )
            .unwrap();
        let bound = registry.bind("fickle", &[LogicalType::int64()]).unwrap();

        let input = Vector::from_slice(&[1i64, 2, 3, 4]);
        let output = bound.invoke(&[input], 4).unwrap();
        assert!(!output.is_null(0));
        assert!(output.is_null(1));
        assert!(!output.is_null(2));
        assert!(output.is_null(3));
        assert_eq!(output.len(), 4);
    }

    #[test]
    fn test_value_status_without_write_is_an_error() {
        let mut registry = FunctionRegistry::new();
        registry
            .register(
                "lazy",
                vec![LogicalType::int64()],
                LogicalType::int64(),
                |_args: &[ValueRef<'_>], _out: &mut ValueWriter<'_>| Ok(RowStatus::Value),
            )
            .unwrap();
        let bound = registry.bind("lazy", &[LogicalType::int64()]).unwrap();

        let input = Vector::from_slice(&[1i64]);
        let err = bound.invoke(&[input], 1).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidOperation { .. }));
    }

    #[test]
    fn test_body_error_aborts_the_batch() {
        let mut registry = FunctionRegistry::new();
        registry
            .register(
                "checked",
                vec![LogicalType::int64()],
                LogicalType::int64(),
                |args: &[ValueRef<'_>], out: &mut ValueWriter<'_>| {
                    let x = args[0].as_i64().unwrap();
                    verify_arg!(x, x >= 0);
                    out.set(x)?;
                    Ok(RowStatus::Value)
                },
            )
            .unwrap();
        let bound = registry.bind("checked", &[LogicalType::int64()]).unwrap();

        let input = Vector::from_slice(&[1i64, -2, 3]);
        let err = bound.invoke(&[input], 3).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn test_invoke_input_validation() {
        let mut registry = FunctionRegistry::new();
        registry
            .register_unary("double", |x: i64| Some(x * 2))
            .unwrap();
        let bound = registry.bind("double", &[LogicalType::int64()]).unwrap();

        // Wrong input count.
        assert!(bound.invoke(&[], 0).is_err());

        // Wrong input type.
        let wrong = Vector::from_slice(&[1.0f64]);
        assert!(bound.invoke(&[wrong], 1).is_err());

        // Wrong input length.
        let short = Vector::from_slice(&[1i64]);
        assert!(bound.invoke(&[short], 2).is_err());
    }

    #[test]
    fn test_binary_invoke() {
        let mut registry = FunctionRegistry::new();
        registry
            .register_binary("scale", |x: i64, f: f64| Some(x as f64 * f))
            .unwrap();
        let bound = registry
            .bind("scale", &[LogicalType::int64(), LogicalType::float64()])
            .unwrap();

        let a = Vector::from_slice(&[1i64, 2]);
        let b = Vector::from_slice(&[0.5f64, 4.0]);
        let output = bound.invoke(&[a, b], 2).unwrap();
        assert_eq!(
            output.as_primitive().unwrap().values_as::<f64>(),
            &[0.5, 8.0]
        );
    }

    #[test]
    fn test_empty_batch() {
        let mut registry = FunctionRegistry::new();
        registry
            .register_unary("double", |x: i64| Some(x * 2))
            .unwrap();
        let bound = registry.bind("double", &[LogicalType::int64()]).unwrap();

        let input = Vector::from_slice::<i64>(&[]);
        let output = bound.invoke(&[input], 0).unwrap();
        assert!(output.is_empty());
    }
}

//! Name-based registry of typed row functions.

use std::collections::HashMap;
use std::sync::Arc;

use batchfn_common::error::Error;
use batchfn_common::{Result, verify_arg};
use batchfn_vector::logical::{LogicalType, LogicalTypeRef, NativeType};

use crate::function::{RowFunction, RowStatus};
use crate::invoke::BoundFunction;
use crate::reader::{FromValueRef, ValueRef};
use crate::writer::ValueWriter;

/// Per-function evaluation options.
#[derive(Debug, Clone, Copy)]
pub struct FunctionOptions {
    /// When `false` (the default), a null in any argument short-circuits the
    /// row: the function body is not called and the output row is null. When
    /// `true`, the body is called with the nulls visible as
    /// [`ValueRef::Null`] and decides the outcome itself.
    pub accepts_nulls: bool,
}

impl Default for FunctionOptions {
    fn default() -> Self {
        FunctionOptions {
            accepts_nulls: false,
        }
    }
}

/// A registered function together with its declared signature.
pub(crate) struct FunctionEntry {
    pub(crate) name: String,
    pub(crate) arg_types: Vec<LogicalTypeRef>,
    pub(crate) return_type: LogicalTypeRef,
    pub(crate) options: FunctionOptions,
    pub(crate) function: Box<dyn RowFunction>,
}

/// Maps function names to typed entries.
///
/// Registration is exact-name and single-signature: registering the same
/// name twice is an error, and [`bind`](FunctionRegistry::bind) matches the
/// requested argument types structurally against the declared ones.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<FunctionEntry>>,
}

impl FunctionRegistry {
    pub fn new() -> FunctionRegistry {
        FunctionRegistry::default()
    }

    /// Registers a row function under `name` with the default options.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        arg_types: Vec<LogicalTypeRef>,
        return_type: LogicalTypeRef,
        function: impl RowFunction + 'static,
    ) -> Result<()> {
        self.register_with_options(
            name,
            arg_types,
            return_type,
            FunctionOptions::default(),
            function,
        )
    }

    /// Registers a row function under `name`.
    ///
    /// Returns a `DuplicateFunction` error if the name is taken; the
    /// existing registration is left untouched.
    pub fn register_with_options(
        &mut self,
        name: impl Into<String>,
        arg_types: Vec<LogicalTypeRef>,
        return_type: LogicalTypeRef,
        options: FunctionOptions,
        function: impl RowFunction + 'static,
    ) -> Result<()> {
        let name = name.into();
        verify_arg!(name, !name.is_empty());
        if self.functions.contains_key(&name) {
            return Err(Error::duplicate_function(name));
        }
        log::debug!(
            "registering function '{}' ({} args) -> {}",
            name,
            arg_types.len(),
            return_type
        );
        let entry = FunctionEntry {
            name: name.clone(),
            arg_types,
            return_type,
            options,
            function: Box::new(function),
        };
        self.functions.insert(name, Arc::new(entry));
        Ok(())
    }

    /// Registers a unary primitive function from a plain Rust closure.
    ///
    /// `None` returned by the closure makes the output row null. Null
    /// arguments short-circuit per the default options.
    pub fn register_unary<A, R, F>(&mut self, name: impl Into<String>, f: F) -> Result<()>
    where
        A: FromValueRef,
        R: NativeType,
        F: Fn(A) -> Option<R> + Send + Sync + 'static,
    {
        self.register(
            name,
            vec![LogicalType::primitive(A::KIND)],
            LogicalType::primitive(R::KIND),
            move |args: &[ValueRef<'_>], out: &mut ValueWriter<'_>| {
                let Some(a) = args[0].get::<A>() else {
                    return Ok(RowStatus::Null);
                };
                match f(a) {
                    Some(value) => {
                        out.set(value)?;
                        Ok(RowStatus::Value)
                    }
                    None => Ok(RowStatus::Null),
                }
            },
        )
    }

    /// Registers a binary primitive function from a plain Rust closure.
    pub fn register_binary<A, B, R, F>(&mut self, name: impl Into<String>, f: F) -> Result<()>
    where
        A: FromValueRef,
        B: FromValueRef,
        R: NativeType,
        F: Fn(A, B) -> Option<R> + Send + Sync + 'static,
    {
        self.register(
            name,
            vec![LogicalType::primitive(A::KIND), LogicalType::primitive(B::KIND)],
            LogicalType::primitive(R::KIND),
            move |args: &[ValueRef<'_>], out: &mut ValueWriter<'_>| {
                let (Some(a), Some(b)) = (args[0].get::<A>(), args[1].get::<B>()) else {
                    return Ok(RowStatus::Null);
                };
                match f(a, b) {
                    Some(value) => {
                        out.set(value)?;
                        Ok(RowStatus::Value)
                    }
                    None => Ok(RowStatus::Null),
                }
            },
        )
    }

    /// Resolves `name` against the given argument types.
    ///
    /// The requested types must match the declared signature structurally
    /// and positionally. Mismatches are configuration errors reported at
    /// bind time, never deferred to evaluation.
    pub fn bind(&self, name: &str, arg_types: &[LogicalTypeRef]) -> Result<BoundFunction> {
        let entry = self
            .functions
            .get(name)
            .ok_or_else(|| Error::unknown_function(name))?;
        if entry.arg_types.len() != arg_types.len() {
            return Err(Error::type_mismatch(
                format!("function '{name}' argument count"),
                entry.arg_types.len().to_string(),
                arg_types.len().to_string(),
            ));
        }
        for (i, (declared, requested)) in entry.arg_types.iter().zip(arg_types).enumerate() {
            if declared != requested {
                return Err(Error::type_mismatch(
                    format!("function '{name}' argument {i}"),
                    declared.to_string(),
                    requested.to_string(),
                ));
            }
        }
        Ok(BoundFunction::new(entry.clone()))
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Returns the registered names in unspecified order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchfn_common::error::ErrorKind;

    fn identity_registry() -> FunctionRegistry {
        let mut registry = FunctionRegistry::new();
        registry
            .register_unary("identity", |x: i64| Some(x))
            .unwrap();
        registry
    }

    #[test]
    fn test_register_and_bind() {
        let registry = identity_registry();
        assert!(registry.contains("identity"));

        let bound = registry.bind("identity", &[LogicalType::int64()]).unwrap();
        assert_eq!(bound.name(), "identity");
        assert_eq!(bound.return_type().as_ref(), LogicalType::int64().as_ref());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = identity_registry();
        let err = registry
            .register_unary("identity", |x: i64| Some(x))
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::DuplicateFunction { .. }));
        // The original registration survives.
        assert!(registry.bind("identity", &[LogicalType::int64()]).is_ok());
    }

    #[test]
    fn test_bind_unknown_name() {
        let registry = identity_registry();
        let err = registry.bind("missing", &[LogicalType::int64()]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownFunction { .. }));
    }

    #[test]
    fn test_bind_type_mismatch() {
        let registry = identity_registry();

        let err = registry
            .bind("identity", &[LogicalType::float64()])
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
        assert!(err.to_string().contains("BIGINT"));

        let err = registry
            .bind("identity", &[LogicalType::int64(), LogicalType::int64()])
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_bind_structural_nested_types() {
        let mut registry = FunctionRegistry::new();
        let arg = LogicalType::array(LogicalType::row(vec![
            LogicalType::int64(),
            LogicalType::float64(),
        ]));
        registry
            .register(
                "first_len",
                vec![arg.clone()],
                LogicalType::int64(),
                |args: &[ValueRef<'_>], out: &mut ValueWriter<'_>| {
                    let Some(array) = args[0].as_array() else {
                        return Ok(RowStatus::Null);
                    };
                    out.set(array.len() as i64)?;
                    Ok(RowStatus::Value)
                },
            )
            .unwrap();

        // An equal but separately constructed descriptor binds.
        let same = LogicalType::array(LogicalType::row(vec![
            LogicalType::int64(),
            LogicalType::float64(),
        ]));
        assert!(registry.bind("first_len", &[same]).is_ok());

        let different = LogicalType::array(LogicalType::int64());
        assert!(registry.bind("first_len", &[different]).is_err());
    }

    #[test]
    fn test_names() {
        let mut registry = identity_registry();
        registry.register_unary("negate", |x: i64| Some(-x)).unwrap();
        let mut names: Vec<&str> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["identity", "negate"]);
    }
}

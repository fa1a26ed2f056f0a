//! # Batchfn: Row Functions over Columnar Batches
//!
//! Batchfn is an adapter between two worlds: functions authored one row at
//! a time, and data that lives in batch-oriented, nullable, possibly nested
//! columnar vectors. A function author writes a plain per-row body; the
//! engine registers it with a typed signature, binds it against concrete
//! argument types, and invokes it over whole batches, handling nulls,
//! nested shapes, and output bookkeeping.
//!
//! ## Module Organization
//!
//! This crate is a convenience entry point that re-exports the member
//! crates:
//!
//! * [`common`] - Shared error and result types
//! * [`vector`] - Logical types and columnar vectors (primitive, array, row)
//! * [`eval`] - Reader views, writer cursors, the function registry, and
//!   the row-vectorized invoker
//!
//! ## Getting Started
//!
//! ```
//! use batchfn::eval::FunctionRegistry;
//! use batchfn::vector::logical::LogicalType;
//! use batchfn::vector::vector::Vector;
//!
//! # fn main() -> batchfn::common::Result<()> {
//! let mut registry = FunctionRegistry::new();
//! registry.register_unary("double", |x: i64| Some(x * 2))?;
//!
//! let bound = registry.bind("double", &[LogicalType::int64()])?;
//! let input = Vector::from_options(&[Some(10i64), None, Some(30)]);
//! let output = bound.invoke(&[input], 3)?;
//!
//! assert_eq!(output.as_primitive().unwrap().get::<i64>(0), 20);
//! assert!(output.is_null(1));
//! # Ok(())
//! # }
//! ```

pub use batchfn_common as common;
pub use batchfn_eval as eval;
pub use batchfn_vector as vector;

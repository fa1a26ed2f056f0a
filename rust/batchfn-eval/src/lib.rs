//! Row-at-a-time function evaluation over columnar vectors.
//!
//! This crate lets a function author write a simple per-row body while the
//! engine runs it over whole batches of columnar, nullable, possibly nested
//! data. Inputs are projected through zero-copy [`reader`] views, outputs
//! are appended through scoped [`writer`] cursors, and the
//! [`invoke`] driver wires both to the per-row callable, tracking per-row
//! success and nulls.
//!
//! # Flow
//!
//! 1. Register a [`function::RowFunction`] with its argument and return
//!    [`batchfn_vector::logical::LogicalType`]s in a
//!    [`registry::FunctionRegistry`].
//! 2. [`registry::FunctionRegistry::bind`] the name against the input
//!    types, producing a [`invoke::BoundFunction`] (type mismatches are
//!    fatal configuration errors).
//! 3. [`invoke::BoundFunction::invoke`] drives the batch: for each row it
//!    projects reader views over the inputs, scopes a writer cursor to the
//!    output row, calls the function, and commits the row as a value or a
//!    null. The returned output vector always has exactly one slot per
//!    input row.

pub mod function;
pub mod invoke;
pub mod reader;
pub mod registry;
pub mod writer;

pub use function::{RowFunction, RowStatus};
pub use invoke::BoundFunction;
pub use reader::{ArrayView, FromValueRef, RowView, ValueRef};
pub use registry::{FunctionOptions, FunctionRegistry};
pub use writer::{ArrayWriter, PrimitiveWriter, RowWriter, ValueWriter};

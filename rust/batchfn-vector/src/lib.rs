//! Columnar vector storage for the batchfn adapter.
//!
//! This crate provides the storage layer that reader views decode from and
//! writer cursors append into: contiguous value buffers, per-row offsets for
//! variable-length data, validity (null) tracking, and the logical type
//! descriptors that select vector shapes.
//!
//! # Main Components
//!
//! - [`logical::LogicalType`]: the closed type universe
//!   (`Primitive`, `Array`, `Row`), shared by reference via
//!   [`logical::LogicalTypeRef`] among every vector, reader, and writer that
//!   describes the same shape.
//! - [`vector::Vector`]: the vector tree. Primitive vectors store values in
//!   a contiguous aligned buffer; array vectors store a flattened element
//!   child plus offsets; row vectors store one child per field, aligned by
//!   row index.
//! - [`values::Values`], [`offsets::Offsets`], [`validity::Validity`]: the
//!   underlying buffers.
//!
//! Vectors grow monotonically while being written and are treated as
//! logically immutable once handed to readers. For any null row, the
//! corresponding value slot, offset range, or children are never read.

pub mod buffer;
pub mod logical;
pub mod offsets;
pub mod validity;
pub mod values;
pub mod vector;

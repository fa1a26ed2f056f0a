//! The per-row callable contract.

use batchfn_common::Result;

use crate::reader::ValueRef;
use crate::writer::ValueWriter;

/// Per-row outcome reported by a [`RowFunction`].
///
/// A function that produced a value through its writer reports
/// [`RowStatus::Value`]; one that declined to produce a value reports
/// [`RowStatus::Null`], and the invoker records a null output row. Errors
/// are reported through `Result` and abort the whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// The function wrote a value for this row.
    Value,

    /// The output row is null. Anything partially appended through the
    /// writer for this row is discarded by the invoker's null commit.
    Null,
}

/// A row-at-a-time function body.
///
/// The author sees exactly one row per call: `args` holds one projected
/// [`ValueRef`] per bound argument, and `out` is a writer cursor scoped to
/// the current output row. The invoker supplies both and commits the row
/// according to the returned [`RowStatus`].
///
/// Implementations must be deterministic per row with respect to their
/// arguments; the invoker is free to assume that a failed batch can be
/// retried from scratch.
pub trait RowFunction: Send + Sync {
    fn call(&self, args: &[ValueRef<'_>], out: &mut ValueWriter<'_>) -> Result<RowStatus>;
}

impl<F> RowFunction for F
where
    F: Fn(&[ValueRef<'_>], &mut ValueWriter<'_>) -> Result<RowStatus> + Send + Sync,
{
    fn call(&self, args: &[ValueRef<'_>], out: &mut ValueWriter<'_>) -> Result<RowStatus> {
        self(args, out)
    }
}

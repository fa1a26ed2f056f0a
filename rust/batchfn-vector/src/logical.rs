//! Logical type descriptors for the closed vector type universe.

use std::fmt;
use std::sync::Arc;

/// The primitive storage kinds.
///
/// This is a closed set: every primitive vector stores exactly one of these
/// kinds, and the reader/writer adapters dispatch over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl PrimitiveKind {
    /// Returns the size of a single value of this kind, in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        match self {
            PrimitiveKind::Int8 => 1,
            PrimitiveKind::Int16 => 2,
            PrimitiveKind::Int32 => 4,
            PrimitiveKind::Int64 => 8,
            PrimitiveKind::Float32 => 4,
            PrimitiveKind::Float64 => 8,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::Int8 => "TINYINT",
            PrimitiveKind::Int16 => "SMALLINT",
            PrimitiveKind::Int32 => "INTEGER",
            PrimitiveKind::Int64 => "BIGINT",
            PrimitiveKind::Float32 => "REAL",
            PrimitiveKind::Float64 => "DOUBLE",
        };
        f.write_str(name)
    }
}

/// A shared, immutable reference to a logical type.
///
/// One descriptor is shared by every vector, reader view, and writer cursor
/// that describes the same shape.
pub type LogicalTypeRef = Arc<LogicalType>;

/// A logical type shape: a primitive kind, an array of an element type, or
/// a row of ordered field types.
///
/// Immutable once constructed. Row field order is significant and fixed at
/// construction; an array has exactly one element type.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Primitive(PrimitiveKind),
    Array(LogicalTypeRef),
    Row(Vec<LogicalTypeRef>),
}

impl LogicalType {
    pub fn primitive(kind: PrimitiveKind) -> LogicalTypeRef {
        Arc::new(LogicalType::Primitive(kind))
    }

    pub fn int8() -> LogicalTypeRef {
        Self::primitive(PrimitiveKind::Int8)
    }

    pub fn int16() -> LogicalTypeRef {
        Self::primitive(PrimitiveKind::Int16)
    }

    pub fn int32() -> LogicalTypeRef {
        Self::primitive(PrimitiveKind::Int32)
    }

    pub fn int64() -> LogicalTypeRef {
        Self::primitive(PrimitiveKind::Int64)
    }

    pub fn float32() -> LogicalTypeRef {
        Self::primitive(PrimitiveKind::Float32)
    }

    pub fn float64() -> LogicalTypeRef {
        Self::primitive(PrimitiveKind::Float64)
    }

    /// Constructs `ARRAY(element)`.
    pub fn array(element: LogicalTypeRef) -> LogicalTypeRef {
        Arc::new(LogicalType::Array(element))
    }

    /// Constructs `ROW(fields...)`.
    pub fn row(fields: Vec<LogicalTypeRef>) -> LogicalTypeRef {
        Arc::new(LogicalType::Row(fields))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, LogicalType::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, LogicalType::Array(_))
    }

    pub fn is_row(&self) -> bool {
        matches!(self, LogicalType::Row(_))
    }

    /// Returns the primitive kind when this is a primitive type.
    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            LogicalType::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the element type when this is an array type.
    pub fn as_array_element(&self) -> Option<&LogicalTypeRef> {
        match self {
            LogicalType::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the ordered field types when this is a row type.
    pub fn as_row_fields(&self) -> Option<&[LogicalTypeRef]> {
        match self {
            LogicalType::Row(fields) => Some(fields),
            _ => None,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Primitive(kind) => write!(f, "{kind}"),
            LogicalType::Array(element) => write!(f, "ARRAY({element})"),
            LogicalType::Row(fields) => {
                f.write_str("ROW(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Maps a Rust primitive to its storage kind.
///
/// The `bytemuck` bounds are what allow typed views over the aligned byte
/// buffers without copying.
pub trait NativeType:
    bytemuck::AnyBitPattern + bytemuck::NoUninit + PartialEq + std::fmt::Debug + Send + Sync
{
    const KIND: PrimitiveKind;
}

impl NativeType for i8 {
    const KIND: PrimitiveKind = PrimitiveKind::Int8;
}

impl NativeType for i16 {
    const KIND: PrimitiveKind = PrimitiveKind::Int16;
}

impl NativeType for i32 {
    const KIND: PrimitiveKind = PrimitiveKind::Int32;
}

impl NativeType for i64 {
    const KIND: PrimitiveKind = PrimitiveKind::Int64;
}

impl NativeType for f32 {
    const KIND: PrimitiveKind = PrimitiveKind::Float32;
}

impl NativeType for f64 {
    const KIND: PrimitiveKind = PrimitiveKind::Float64;
}

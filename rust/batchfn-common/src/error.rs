use thiserror::Error;

/// Error type shared by all batchfn crates.
///
/// The kind is boxed to keep `Result<T>` at a single pointer of overhead
/// on the success path.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn type_mismatch(
        context: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Error {
        Error(
            ErrorKind::TypeMismatch {
                context: context.into(),
                expected: expected.into(),
                actual: actual.into(),
            }
            .into(),
        )
    }

    pub fn duplicate_function(name: impl Into<String>) -> Error {
        Error(ErrorKind::DuplicateFunction { name: name.into() }.into())
    }

    pub fn unknown_function(name: impl Into<String>) -> Error {
        Error(ErrorKind::UnknownFunction { name: name.into() }.into())
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("type mismatch in {context}: expected {expected}, got {actual}")]
    TypeMismatch {
        context: String,
        expected: String,
        actual: String,
    },

    #[error("function '{name}' is already registered")]
    DuplicateFunction { name: String },

    #[error("function '{name}' is not registered")]
    UnknownFunction { name: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

use std::path::PathBuf;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised while describing types and assembling documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A kind with no schema representation (functions, channels, raw pointers,
    /// non-empty trait objects)
    #[error("type {ty} is not supported: {reason}")]
    UnsupportedType { ty: String, reason: String },

    /// A parameter struct field that does not reduce to a scalar or a flat array of scalars
    #[error("unsupported field {field} of parameter struct {parent}: {reason}")]
    UnsupportedParameter {
        parent: String,
        field: String,
        reason: String,
    },

    #[error("parameters must be described by a struct, got {0}")]
    NotAStruct(String),

    /// An operation references a security scheme that was never declared
    #[error("undefined security definition: {0}")]
    UndefinedSecurity(String),

    #[error("unsupported HTTP method: {0}")]
    InvalidMethod(String),

    #[error("invalid parameter location {location:?} on field {field}")]
    InvalidLocation { field: String, location: String },

    /// A schema or parameter hook reported a failure
    #[error("{0}")]
    Hook(String),

    #[error("unknown type: {0}")]
    UnknownType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error in {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn unsupported(ty: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::UnsupportedType {
            ty: ty.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(format!("YAML: {}", err))
    }
}

impl From<syn::Error> for Error {
    fn from(err: syn::Error) -> Self {
        Error::Parse {
            file: PathBuf::from("<unknown>"),
            message: err.to_string(),
        }
    }
}

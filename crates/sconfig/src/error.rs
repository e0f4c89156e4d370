use std::borrow::Cow;

/// Errors returned by [`Binder::parse`](crate::Binder::parse).
///
/// Nothing in this crate logs an error; every failure is returned to the caller,
/// who decides whether it is fatal.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The descriptor table does not describe a record with named fields.
    #[error("specification must be a struct with named fields: {reason}")]
    InvalidSpecification { reason: Cow<'static, str> },

    /// Registering a source for `field` failed.
    #[error("invalid field {field}: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: Box<BindError>,
    },

    /// The declared type has no coercion or flag registration path.
    #[error("{ty} is an unsupported type")]
    UnsupportedFieldType { ty: String },

    /// A `flag` tag that is not `long` or `long,s`.
    #[error("invalid flag format \"{format}\"")]
    InvalidFlagFormat { format: String },

    /// Two fields, or a field and the command itself, claim the same flag.
    #[error("flag {flag} is already registered")]
    DuplicateFlag { flag: String },

    /// The resolved text could not be converted to the field's type.
    #[error("invalid value \"{value}\" for field {field}: {reason}")]
    Coercion { field: String, value: String, reason: String },

    /// Parsing the command line failed (unknown flag, malformed value, `--help`).
    #[error("{source}")]
    Arguments {
        #[from]
        source: clap::Error,
    },

    /// The source registry failed to build or to read a value.
    #[error("configuration source error: {source}")]
    Source { source: Box<config::ConfigError> },
}

impl BindError {
    /// Wraps `cause` into [`BindError::InvalidField`] for `field`.
    pub fn invalid_field(field: impl Into<String>, cause: Self) -> Self {
        Self::InvalidField { field: field.into(), source: Box::new(cause) }
    }

    /// The innermost error, unwrapping any [`BindError::InvalidField`] layers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::InvalidField { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<config::ConfigError> for BindError {
    fn from(source: config::ConfigError) -> Self {
        Self::Source { source: Box::new(source) }
    }
}

//! Field descriptors and the [`Specification`] trait.

use crate::error::BindError;
use crate::kind::FieldKind;
use crate::registry::Resolved;
use std::collections::HashMap;

/// Descriptor for one field of a configuration record.
///
/// Produced by `#[derive(Specification)]`; hand-written tables can use the
/// `const` builder methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: Option<&'static str>,
    pub flag: Option<&'static str>,
    pub help: Option<&'static str>,
}

impl FieldSpec {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, default: None, flag: None, help: None }
    }

    #[must_use = "Sets the default text for the field"]
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use = "Binds the field to a command-line flag"]
    pub const fn with_flag(mut self, flag: &'static str) -> Self {
        self.flag = Some(flag);
        self
    }

    #[must_use = "Sets the flag help text"]
    pub const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Environment variable bound to this field: `PREFIX_FIELD`, uppercased.
    /// An empty prefix yields just the uppercased field name.
    #[must_use]
    pub fn env_var(&self, prefix: &str) -> String {
        if prefix.is_empty() {
            self.name.to_uppercase()
        } else {
            format!("{prefix}_{}", self.name).to_uppercase()
        }
    }
}

/// A configuration record the binder can fill.
///
/// Usually derived:
///
/// ```rust
/// use sconfig::Specification;
///
/// #[derive(Debug, Default, Specification)]
/// struct ServerConfig {
///     #[sconfig(default = "127.0.0.1", flag = "host")]
///     host: String,
///     #[sconfig(default = "8080", flag = "port,p")]
///     port: u16,
/// }
///
/// assert_eq!(ServerConfig::fields().len(), 2);
/// ```
pub trait Specification {
    /// Descriptor table, in declaration order.
    fn fields() -> Vec<FieldSpec>;

    /// Writes resolved values into the record.
    ///
    /// Implementations should coerce every field before writing any of them.
    /// Fields without a resolved value keep their current value.
    ///
    /// # Errors
    /// Returns [`BindError::Coercion`] when resolved text does not fit a field's type.
    fn assign(&mut self, resolved: &Resolved) -> Result<(), BindError>;
}

/// Rejects descriptor tables that cannot come from a record with named fields,
/// including names that collide once uppercased for the environment.
pub(crate) fn validate(fields: &[FieldSpec]) -> Result<(), BindError> {
    let mut seen: HashMap<String, &'static str> = HashMap::with_capacity(fields.len());

    for field in fields {
        if !is_identifier(field.name) {
            return Err(BindError::InvalidSpecification {
                reason: format!("\"{}\" is not a field name", field.name).into(),
            });
        }

        let folded = field.name.to_uppercase();
        if let Some(previous) = seen.insert(folded.clone(), field.name) {
            return Err(BindError::InvalidSpecification {
                reason: format!(
                    "fields `{previous}` and `{}` collide as `{folded}`",
                    field.name
                )
                .into(),
            });
        }
    }

    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A parsed `flag` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FlagTag {
    pub(crate) long: &'static str,
    pub(crate) short: Option<char>,
}

/// Parses `long` or `long,s`.
pub(crate) fn parse_flag_tag(tag: &'static str) -> Result<FlagTag, BindError> {
    let invalid = || BindError::InvalidFlagFormat { format: tag.to_owned() };

    let mut parts = tag.split(',').map(str::trim);
    let long = parts.next().filter(|long| is_flag_name(long)).ok_or_else(invalid)?;
    let short = match parts.next() {
        None => None,
        Some(alias) => {
            let mut chars = alias.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => Some(c),
                _ => return Err(invalid()),
            }
        },
    };
    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(FlagTag { long, short })
}

fn is_flag_name(name: &str) -> bool {
    name.chars().next().is_some_and(|first| first.is_ascii_alphanumeric())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

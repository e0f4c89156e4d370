//! Source registry: defaults, environment bindings and explicit flags layered
//! through the `config` crate.
//!
//! The builder's own layering is the precedence order: defaults, then sources
//! (the bound environment variables), then overrides (explicit flags).

use crate::error::BindError;
use crate::kind::FieldValue;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Map, Source, Value, ValueKind};
use std::collections::HashMap;
use std::env::VarError;
use tracing::trace;

/// Registry key for a field. Keys are case-folded; descriptor validation
/// guarantees folding cannot merge two fields.
fn key(field: &str) -> String {
    field.to_lowercase()
}

/// Where environment variables are read from.
#[derive(Debug, Clone, Default)]
pub(crate) enum EnvLookup {
    #[default]
    Process,
    Fixed(HashMap<String, String>),
}

impl EnvLookup {
    /// Set-but-empty variables count as unset.
    fn get(&self, name: &str) -> Result<Option<String>, ConfigError> {
        let value = match self {
            Self::Process => match std::env::var(name) {
                Ok(value) => Some(value),
                Err(VarError::NotPresent) => None,
                Err(VarError::NotUnicode(_)) => {
                    return Err(ConfigError::Message(format!(
                        "environment variable {name} is not valid unicode"
                    )));
                },
            },
            Self::Fixed(vars) => vars.get(name).cloned(),
        };
        Ok(value.filter(|value| !value.is_empty()))
    }
}

/// A `config` source that reads exactly the bound variables and nothing else.
#[derive(Debug, Clone, Default)]
struct EnvironmentBindings {
    lookup: EnvLookup,
    bindings: Vec<(String, String)>,
}

impl Source for EnvironmentBindings {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let mut values = Map::new();
        for (key, var) in &self.bindings {
            if let Some(text) = self.lookup.get(var)? {
                trace!(key = %key, var = %var, "environment variable set");
                values.insert(key.clone(), Value::new(Some(var), ValueKind::String(text)));
            }
        }
        Ok(values)
    }
}

/// Per-call source registry. Built during registration, consumed by [`resolve`](Self::resolve).
#[derive(Debug)]
pub(crate) struct SourceRegistry {
    builder: ConfigBuilder<DefaultState>,
    env: EnvironmentBindings,
}

impl SourceRegistry {
    pub(crate) fn new(lookup: EnvLookup) -> Self {
        Self {
            builder: config::Config::builder(),
            env: EnvironmentBindings { lookup, bindings: Vec::new() },
        }
    }

    pub(crate) fn set_default(mut self, field: &str, text: &str) -> Result<Self, BindError> {
        self.builder = self.builder.set_default(key(field), text.to_owned())?;
        Ok(self)
    }

    pub(crate) fn bind_env(&mut self, field: &str, var: String) {
        self.env.bindings.push((key(field), var));
    }

    pub(crate) fn set_flag(mut self, field: &str, text: &str) -> Result<Self, BindError> {
        self.builder = self.builder.set_override(key(field), text.to_owned())?;
        Ok(self)
    }

    pub(crate) fn resolve(self) -> Result<Resolved, BindError> {
        let config = self.builder.add_source(self.env).build()?;
        Ok(Resolved { config })
    }
}

/// Final per-field values after precedence resolution, still as text.
///
/// Handed to [`Specification::assign`](crate::Specification::assign), which
/// coerces each field with [`Resolved::coerce`].
#[derive(Debug)]
pub struct Resolved {
    config: config::Config,
}

impl Resolved {
    /// Winning text for `field`, or `None` when no source supplied one.
    ///
    /// # Errors
    /// Returns [`BindError::Source`] if the registry cannot read the value.
    pub fn text(&self, field: &str) -> Result<Option<String>, BindError> {
        match self.config.get_string(&key(field)) {
            Ok(text) => Ok(Some(text)),
            Err(ConfigError::NotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Winning value for `field`, converted to `T`.
    ///
    /// # Errors
    /// Returns [`BindError::Coercion`] naming the field and the offending text.
    pub fn coerce<T: FieldValue>(&self, field: &str) -> Result<Option<T>, BindError> {
        let Some(text) = self.text(field)? else {
            return Ok(None);
        };
        match T::from_text(&text) {
            Ok(value) => Ok(Some(value)),
            Err(reason) => Err(BindError::Coercion { field: field.to_owned(), value: text, reason }),
        }
    }
}

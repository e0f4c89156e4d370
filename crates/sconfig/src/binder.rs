use crate::error::BindError;
use crate::flags::{FlagDefinition, FlagRegistry};
use crate::registry::{EnvLookup, SourceRegistry};
use crate::spec::{FieldSpec, Specification, parse_flag_tag, validate};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Binds defaults, environment variables and command-line flags onto a record.
///
/// Nothing happens until [`parse`](Self::parse); the other methods only
/// configure which sources take part.
///
/// ```rust
/// use sconfig::{Binder, Specification};
///
/// #[derive(Debug, Default, Specification)]
/// struct Settings {
///     #[sconfig(default = "info")]
///     log_level: String,
///     workers: u8,
/// }
///
/// let mut settings = Settings::default();
/// Binder::new(&mut settings)
///     .enable_environment("APP")
///     .with_environment_vars([("APP_WORKERS", "4")])
///     .parse()?;
///
/// assert_eq!(settings.log_level, "info");
/// assert_eq!(settings.workers, 4);
/// # Ok::<(), sconfig::BindError>(())
/// ```
#[must_use = "Binder does nothing until parse() is called"]
pub struct Binder<'a, S: Specification> {
    spec: &'a mut S,
    env_prefix: Option<String>,
    env_vars: Option<HashMap<String, String>>,
    flags: Option<&'a mut dyn FlagRegistry>,
}

impl<'a, S: Specification> Binder<'a, S> {
    pub fn new(spec: &'a mut S) -> Self {
        Self { spec, env_prefix: None, env_vars: None, flags: None }
    }

    /// Binds every field to `PREFIX_FIELD` (uppercased). An empty prefix binds `FIELD`.
    pub fn enable_environment(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Reads environment bindings from `vars` instead of the process environment.
    pub fn with_environment_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Registers fields carrying a `flag` tag on `flags`, which is invoked during parse.
    pub fn bind_flags(mut self, flags: &'a mut dyn FlagRegistry) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Registers every source, resolves precedence and writes the record.
    ///
    /// On error the record keeps its pre-call values.
    ///
    /// # Errors
    /// - [`BindError::InvalidSpecification`] before any registration.
    /// - [`BindError::InvalidField`] wrapping the registration failure of one field.
    /// - [`BindError::Arguments`] when the command line does not parse.
    /// - [`BindError::Coercion`] when a resolved value does not fit its field.
    pub fn parse(self) -> Result<(), BindError> {
        let Self { spec, env_prefix, env_vars, mut flags } = self;

        let fields = S::fields();
        validate(&fields)?;
        debug!(
            fields = fields.len(),
            environment = ?env_prefix,
            flags = flags.is_some(),
            "binding configuration"
        );

        let lookup = env_vars.map_or(EnvLookup::Process, EnvLookup::Fixed);
        let mut registry = SourceRegistry::new(lookup);
        let mut bound_flags = Vec::new();
        for field in &fields {
            registry = register_field(
                registry,
                field,
                env_prefix.as_deref(),
                flags.as_deref_mut(),
                &mut bound_flags,
            )
            .map_err(|err| BindError::invalid_field(field.name, err))?;
        }

        if let Some(flags) = flags {
            flags.invoke()?;
            for (field, long) in bound_flags {
                if let Some(text) = flags.explicit_value(long) {
                    trace!(field, flag = long, "explicit flag value");
                    registry = registry.set_flag(field, &text)?;
                }
            }
        }

        let resolved = registry.resolve()?;
        spec.assign(&resolved)?;
        debug!("configuration bound");
        Ok(())
    }
}

impl<S: Specification> fmt::Debug for Binder<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("env_prefix", &self.env_prefix)
            .field("env_vars", &self.env_vars.as_ref().map(HashMap::len))
            .field("flags", &self.flags.is_some())
            .finish_non_exhaustive()
    }
}

fn register_field(
    mut registry: SourceRegistry,
    field: &FieldSpec,
    env_prefix: Option<&str>,
    flags: Option<&mut (dyn FlagRegistry + '_)>,
    bound_flags: &mut Vec<(&'static str, &'static str)>,
) -> Result<SourceRegistry, BindError> {
    if let Some(default) = field.default {
        trace!(field = field.name, default, "registering default");
        registry = registry.set_default(field.name, default)?;
    }

    // Unsupported fields are never assigned, so binding a variable to them is pointless.
    if let Some(prefix) = env_prefix.filter(|_| field.kind.is_supported()) {
        let var = field.env_var(prefix);
        trace!(field = field.name, var = %var, "binding environment variable");
        registry.bind_env(field.name, var);
    }

    if let (Some(tag), Some(flags)) = (field.flag, flags) {
        let tag = parse_flag_tag(tag)?;
        if !field.kind.is_supported() {
            return Err(BindError::UnsupportedFieldType { ty: field.kind.to_string() });
        }
        flags.register(FlagDefinition {
            long: tag.long,
            short: tag.short,
            kind: field.kind,
            default: field.default,
            help: field.help,
        })?;
        bound_flags.push((field.name, tag.long));
    }

    Ok(registry)
}

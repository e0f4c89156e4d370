//! Command-line flag registration.
//!
//! [`FlagRegistry`] is the seam between the binder and a command-line
//! framework. [`CommandLine`] implements it over [`clap::Command`].

use crate::error::BindError;
use crate::kind::{FieldKind, ScalarKind};
use clap::builder::TypedValueParser;
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::{OsStr, OsString};
use std::mem;
use tracing::trace;

/// A typed flag to register for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDefinition {
    pub long: &'static str,
    pub short: Option<char>,
    pub kind: FieldKind,
    /// Shown in help only; defaults are resolved by the source registry.
    pub default: Option<&'static str>,
    pub help: Option<&'static str>,
}

/// Registration target for typed flags.
pub trait FlagRegistry {
    /// Registers a flag.
    ///
    /// # Errors
    /// Returns [`BindError::DuplicateFlag`] when the long or short name is taken,
    /// or [`BindError::UnsupportedFieldType`] for kinds without a flag form.
    fn register(&mut self, flag: FlagDefinition) -> Result<(), BindError>;

    /// Parses the command line against the registered flags.
    ///
    /// # Errors
    /// Returns [`BindError::Arguments`] for unknown flags, malformed values, or
    /// help/version requests.
    fn invoke(&mut self) -> Result<(), BindError>;

    /// Text of a flag the user supplied explicitly; list occurrences are joined with `,`.
    fn explicit_value(&self, long: &str) -> Option<String>;
}

/// A [`FlagRegistry`] over a [`clap::Command`].
///
/// The command may carry its own arguments; they are parsed along with the
/// registered flags and can be read back through [`CommandLine::matches`].
#[derive(Debug, Default)]
pub struct CommandLine {
    command: Command,
    args: Option<Vec<OsString>>,
    registered: Vec<&'static str>,
    matches: Option<ArgMatches>,
}

impl CommandLine {
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self { command, ..Self::default() }
    }

    /// Parses `args` instead of the process arguments. The first element is the binary name.
    #[must_use = "Sets the arguments to parse"]
    pub fn with_args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// Matches from the last successful [`invoke`](FlagRegistry::invoke).
    #[must_use]
    pub const fn matches(&self) -> Option<&ArgMatches> {
        self.matches.as_ref()
    }

    fn has_version_flag(&self) -> bool {
        (self.command.get_version().is_some() || self.command.get_long_version().is_some())
            && !self.command.is_disable_version_flag_set()
    }

    fn ensure_available(&self, flag: &FlagDefinition) -> Result<(), BindError> {
        let reserved = flag.long == "help" || (flag.long == "version" && self.has_version_flag());
        let taken = self.command.get_arguments().any(|arg| {
            arg.get_id().as_str() == flag.long || arg.get_long() == Some(flag.long)
        });
        if reserved || taken {
            return Err(BindError::DuplicateFlag { flag: format!("--{}", flag.long) });
        }

        if let Some(short) = flag.short {
            let reserved = short == 'V' && self.has_version_flag();
            let taken = self.command.get_arguments().any(|arg| arg.get_short() == Some(short));
            if reserved || taken {
                return Err(BindError::DuplicateFlag { flag: format!("-{short}") });
            }
        }

        Ok(())
    }

    /// Moves clap's generated help to `--help` only, freeing `-h`.
    fn release_help_short(&mut self) {
        if self.command.is_disable_help_flag_set() {
            return;
        }
        let command = mem::take(&mut self.command);
        self.command = command.disable_help_flag(true).arg(
            Arg::new("help").long("help").action(ArgAction::Help).help("Print help"),
        );
    }
}

impl FlagRegistry for CommandLine {
    fn register(&mut self, flag: FlagDefinition) -> Result<(), BindError> {
        let Some(element) = flag.kind.element() else {
            return Err(BindError::UnsupportedFieldType { ty: flag.kind.to_string() });
        };
        self.ensure_available(&flag)?;
        if flag.short == Some('h') {
            self.release_help_short();
        }

        let mut arg = Arg::new(flag.long)
            .long(flag.long)
            .value_name(value_name(element))
            .value_parser(KindValueParser { kind: flag.kind });
        if let Some(short) = flag.short {
            arg = arg.short(short);
        }
        if let Some(help) = help_text(&flag) {
            arg = arg.help(help);
        }
        arg = match flag.kind {
            FieldKind::List(_) => arg.action(ArgAction::Append),
            FieldKind::Scalar(ScalarKind::Bool) => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true"),
            _ => arg.action(ArgAction::Set),
        };

        trace!(flag = flag.long, short = ?flag.short, kind = %flag.kind, "registering flag");
        let command = mem::take(&mut self.command);
        self.command = command.arg(arg);
        self.registered.push(flag.long);
        Ok(())
    }

    fn invoke(&mut self) -> Result<(), BindError> {
        let matches = match &self.args {
            Some(args) => self.command.try_get_matches_from_mut(args.clone())?,
            None => self.command.try_get_matches_from_mut(std::env::args_os())?,
        };
        self.matches = Some(matches);
        Ok(())
    }

    fn explicit_value(&self, long: &str) -> Option<String> {
        let matches = self.matches.as_ref()?;
        if !self.registered.iter().any(|name| *name == long) {
            return None;
        }
        if matches.value_source(long) != Some(ValueSource::CommandLine) {
            return None;
        }

        let values = matches.try_get_many::<String>(long).ok().flatten()?;
        Some(values.map(String::as_str).collect::<Vec<_>>().join(","))
    }
}

const fn value_name(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Text => "TEXT",
        ScalarKind::Bool => "BOOL",
        ScalarKind::F32 | ScalarKind::F64 => "FLOAT",
        ScalarKind::Duration => "DURATION",
        _ => "INT",
    }
}

fn help_text(flag: &FlagDefinition) -> Option<String> {
    match (flag.help, flag.default) {
        (Some(help), Some(default)) => Some(format!("{help} [default: {default}]")),
        (Some(help), None) => Some(help.to_owned()),
        (None, Some(default)) => Some(format!("[default: {default}]")),
        (None, None) => None,
    }
}

/// Validates flag text with the same coercion the resolver applies, keeping the text.
#[derive(Debug, Clone, Copy)]
struct KindValueParser {
    kind: FieldKind,
}

impl TypedValueParser for KindValueParser {
    type Value = String;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let Some(text) = value.to_str() else {
            return Err(clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd));
        };

        self.kind.check(text).map_err(|reason| {
            let flag = arg.and_then(Arg::get_long).map_or_else(String::new, |long| format!(" for --{long}"));
            clap::Error::raw(
                ErrorKind::ValueValidation,
                format!("invalid value \"{text}\"{flag}: {reason}\n"),
            )
            .with_cmd(cmd)
        })?;

        Ok(text.to_owned())
    }
}

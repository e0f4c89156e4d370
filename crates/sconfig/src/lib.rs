//! # sconfig
//!
//! Binds configuration values from command-line flags, environment variables and
//! declared defaults onto a typed record.
//!
//! ## Precedence
//! For every field, highest first:
//! 1. A flag given explicitly on the command line.
//! 2. A non-empty environment variable `PREFIX_FIELD`.
//! 3. The field's `default` tag.
//! 4. Whatever the field held before [`Binder::parse`] (its zero value for a
//!    `Default` record).
//!
//! ## Example
//!
//! ```rust
//! use clap::Command;
//! use sconfig::{Binder, CommandLine, Specification};
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, Specification)]
//! struct ServerConfig {
//!     /// Interface to bind
//!     #[sconfig(default = "127.0.0.1", flag = "host")]
//!     host: String,
//!     /// Port to listen on
//!     #[sconfig(default = "8080", flag = "port,p")]
//!     port: u16,
//!     #[sconfig(default = "30s")]
//!     timeout: Duration,
//! }
//!
//! let mut config = ServerConfig::default();
//! let mut cli = CommandLine::new(Command::new("server")).with_args(["server", "-p=9090"]);
//!
//! Binder::new(&mut config)
//!     .enable_environment("SERVER")
//!     .with_environment_vars([("SERVER_HOST", "0.0.0.0"), ("SERVER_PORT", "80")])
//!     .bind_flags(&mut cli)
//!     .parse()?;
//!
//! assert_eq!(config.host, "0.0.0.0");
//! assert_eq!(config.port, 9090);
//! assert_eq!(config.timeout, Duration::from_secs(30));
//! # Ok::<(), sconfig::BindError>(())
//! ```

mod binder;
mod error;
mod flags;
mod kind;
mod registry;
mod spec;

pub use binder::Binder;
pub use error::BindError;
pub use flags::{CommandLine, FlagDefinition, FlagRegistry};
pub use kind::{FieldKind, FieldValue, LIST_SEPARATOR, ScalarKind, ScalarValue, split_list};
pub use registry::Resolved;
pub use sconfig_derive::Specification;
pub use spec::{FieldSpec, Specification};

pub type Result<T, E = BindError> = std::result::Result<T, E>;

#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros for `sconfig`.
//! This crate provides the derive that turns a plain struct into a configuration
//! record: it enumerates the named fields, classifies their declared types and
//! collects the `default`/`flag` tags the binder needs.
//!
//! ## Usage
//! Consumers depend on `sconfig`, which re-exports the derive:
//! ```toml
//! [dependencies]
//! sconfig = { path = "../crates/sconfig" }
//! ```
//!
//! The examples below are `ignore`d to avoid compiling in this crate; the
//! generated code refers to `::sconfig` paths.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro implementing `sconfig::Specification` for a struct with named fields.
///
/// # Field Attributes
///
/// * `#[sconfig(default = "...")]` - Text used when neither a flag nor an environment
///   variable supplies a value.
/// * `#[sconfig(flag = "long")]` or `#[sconfig(flag = "long,s")]` - Binds the field to a
///   command-line flag with an optional one-character short alias.
/// * `#[sconfig(skip)]` - Excludes the field from binding entirely.
///
/// The first line of a field's doc comment becomes the flag's help text.
///
/// # Type Handling
///
/// Declared types are classified by their last path segment:
/// `String`, `bool`, `i8`..`i64`, `isize`, `u8`..`u64`, `usize`, `f32`, `f64`,
/// `Duration`, and `Vec<T>` of any of those. Other types are recorded as
/// unsupported and rejected by the binder at run time as soon as a source is
/// registered for them.
///
/// # Errors
///
/// Emits a compile-time error when applied to an enum, a union, a tuple struct or a
/// unit struct, and for unknown or repeated `sconfig` attribute keys.
///
/// # Example
///
/// ```rust,ignore
/// use sconfig::Specification;
///
/// #[derive(Debug, Default, Specification)]
/// pub struct ServerConfig {
///     /// Address to listen on
///     #[sconfig(default = "127.0.0.1", flag = "host")]
///     pub host: String,
///
///     /// Port to listen on
///     #[sconfig(default = "8080", flag = "port,p")]
///     pub port: u16,
///
///     #[sconfig(skip)]
///     pub started: bool,
/// }
/// ```
#[proc_macro_derive(Specification, attributes(sconfig))]
pub fn derive_specification(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    macros::specification::expand_derive(&input).into()
}

//! Field type classification and text-to-value coercion.

use std::fmt;
use std::time::Duration;

/// Separator for list values, on the command line and in environment variables.
pub const LIST_SEPARATOR: char = ',';

/// The closed set of element types a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Text,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Duration,
}

impl ScalarKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "String",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Duration => "Duration",
        }
    }

    /// Checks that `text` coerces to this kind without keeping the value.
    ///
    /// # Errors
    /// Returns the coercion failure reason.
    pub fn check(self, text: &str) -> Result<(), String> {
        match self {
            Self::Text => Ok(()),
            Self::Bool => bool::from_text(text).map(drop),
            Self::I8 => i8::from_text(text).map(drop),
            Self::I16 => i16::from_text(text).map(drop),
            Self::I32 => i32::from_text(text).map(drop),
            Self::I64 => i64::from_text(text).map(drop),
            Self::Isize => isize::from_text(text).map(drop),
            Self::U8 => u8::from_text(text).map(drop),
            Self::U16 => u16::from_text(text).map(drop),
            Self::U32 => u32::from_text(text).map(drop),
            Self::U64 => u64::from_text(text).map(drop),
            Self::Usize => usize::from_text(text).map(drop),
            Self::F32 => f32::from_text(text).map(drop),
            Self::F64 => f64::from_text(text).map(drop),
            Self::Duration => Duration::from_text(text).map(drop),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field's declared type as seen by the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// Ordered sequence of scalars, comma-separated on input.
    List(ScalarKind),
    /// Anything else; carries the declared type's name for error reporting.
    Unsupported(&'static str),
}

impl FieldKind {
    /// Element kind, `None` for unsupported types.
    #[must_use]
    pub const fn element(self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind) | Self::List(kind) => Some(kind),
            Self::Unsupported(_) => None,
        }
    }

    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Checks one occurrence of input text; list text is checked element by element.
    ///
    /// # Errors
    /// Returns the coercion failure reason.
    pub fn check(self, text: &str) -> Result<(), String> {
        match self {
            Self::Scalar(kind) => kind.check(text),
            Self::List(kind) => split_list(text).try_for_each(|item| kind.check(item)),
            Self::Unsupported(ty) => Err(format!("{ty} is an unsupported type")),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::List(kind) => write!(f, "Vec<{kind}>"),
            Self::Unsupported(ty) => f.write_str(ty),
        }
    }
}

/// Conversion from resolved text into a field's native type.
///
/// Implemented for every type the derive classifies as supported. Lists are
/// `Vec<T>` of any [`ScalarValue`]. Numbers and booleans read empty text as
/// their zero value.
pub trait FieldValue: Sized {
    /// # Errors
    /// Returns a human-readable reason when `text` is not a valid value.
    fn from_text(text: &str) -> Result<Self, String>;
}

/// Marker for single values that may appear as list elements.
pub trait ScalarValue: FieldValue {}

impl FieldValue for String {
    fn from_text(text: &str) -> Result<Self, String> {
        Ok(text.to_owned())
    }
}
impl ScalarValue for String {}

impl FieldValue for bool {
    fn from_text(text: &str) -> Result<Self, String> {
        match text {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err(format!("\"{text}\" is not a boolean")),
        }
    }
}
impl ScalarValue for bool {}

impl FieldValue for Duration {
    fn from_text(text: &str) -> Result<Self, String> {
        humantime::parse_duration(text).map_err(|e| format!("\"{text}\" is not a duration: {e}"))
    }
}
impl ScalarValue for Duration {}

macro_rules! parsed_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl FieldValue for $ty {
            fn from_text(text: &str) -> Result<Self, String> {
                if text.is_empty() {
                    return Ok(<$ty>::default());
                }
                text.parse::<$ty>()
                    .map_err(|e| format!("\"{text}\" is not a valid {}: {e}", stringify!($ty)))
            }
        }
        impl ScalarValue for $ty {}
    )*};
}

parsed_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: ScalarValue> FieldValue for Vec<T> {
    fn from_text(text: &str) -> Result<Self, String> {
        split_list(text).map(T::from_text).collect()
    }
}

/// Splits list text on [`LIST_SEPARATOR`]; the empty string is the empty list.
pub fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(LIST_SEPARATOR).filter(move |_| !text.is_empty())
}

//! Error and result types used throughout the crate.

use std::fmt;
use std::io;

use crate::Tag;

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// An error from decoding, framing detection or decompression.
#[derive(Debug, Clone)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// The category of an [`Error`].
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A read ran past the end of the input.
    UnexpectedEof,

    /// A kind byte outside 0..=12, an end tag where a value was expected, or
    /// a negative length prefix.
    InvalidTag,

    /// Strict mode only: the root tag completed but bytes remain.
    UnexpectedEndTag,

    /// A varint kept its continuation bit set past the widest shift the
    /// target type allows.
    VarnumTooLarge,

    /// The root tag was neither a compound nor a list.
    InvalidOpeningTag,

    /// The root name on the wire differs from the exact name asked for.
    UnexpectedRootName,

    /// A framing hint was spelled in a way the crate does not recognise.
    Validation,

    /// Containers nested deeper than the configured limit.
    DepthLimit,

    /// String data was not valid Modified UTF-8. Contains the raw bytes.
    Nonunicode(Vec<u8>),

    /// Anything else, including decompression failures. Users should not
    /// match on this variant; errors in this category may move to new
    /// variants.
    Other,
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    fn new(msg: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            msg: msg.into(),
            kind,
        }
    }

    pub(crate) fn eof() -> Self {
        Self::new("unexpected end of buffer", ErrorKind::UnexpectedEof)
    }

    pub(crate) fn invalid_tag(tag: u8) -> Self {
        Self::new(format!("invalid tag: {}", tag), ErrorKind::InvalidTag)
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::new(msg, ErrorKind::InvalidTag)
    }

    pub(crate) fn trailing_data(remaining: usize, offset: usize) -> Self {
        Self::new(
            format!(
                "unexpected end tag: {} bytes remain at offset {}",
                remaining, offset
            ),
            ErrorKind::UnexpectedEndTag,
        )
    }

    pub(crate) fn varnum_too_large() -> Self {
        Self::new("varint too large", ErrorKind::VarnumTooLarge)
    }

    pub(crate) fn invalid_opening_tag(tag: Tag) -> Self {
        Self::new(
            format!("invalid opening tag: expected Compound or List, got {:?}", tag),
            ErrorKind::InvalidOpeningTag,
        )
    }

    pub(crate) fn unexpected_root_name(got: &str, want: &str) -> Self {
        Self::new(
            format!("unexpected root name: {:?}, wanted {:?}", got, want),
            ErrorKind::UnexpectedRootName,
        )
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::new(msg, ErrorKind::Validation)
    }

    pub(crate) fn depth_limit(max: usize) -> Self {
        Self::new(
            format!("containers nested deeper than {} levels", max),
            ErrorKind::DepthLimit,
        )
    }

    pub(crate) fn nonunicode(bytes: &[u8]) -> Self {
        Self::new(
            format!(
                "invalid string, non-unicode: {}",
                String::from_utf8_lossy(bytes)
            ),
            ErrorKind::Nonunicode(bytes.to_vec()),
        )
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Self::new(e.to_string(), ErrorKind::UnexpectedEof),
            _ => Self::new(e.to_string(), ErrorKind::Other),
        }
    }
}

// SPDX-License-Identifier: (Apache-2.0 OR MIT)

//! Error type shared by every stage of the extractor.
//!
//! Errors follow the same shape as `std::io::Error`: a coarse [`ErrorKind`]
//! that callers can match on, plus a human readable message carrying the
//! offending offset or the expected-vs-found values.

use alloc::string::String;
use core::fmt;

/// The kind of failure that terminated an extraction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source bytes could not be obtained (missing or unreadable file).
    ResourceUnavailable,
    /// The buffer does not begin with the ELF magic signature.
    InvalidFormat,
    /// A computed offset or size falls outside the buffer.
    MalformedFile,
    /// The file is well-formed but the requested section is absent.
    SectionNotFound,
}

impl ErrorKind {
    fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ResourceUnavailable => "resource unavailable",
            ErrorKind::InvalidFormat => "invalid format",
            ErrorKind::MalformedFile => "malformed file",
            ErrorKind::SectionNotFound => "section not found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Error {
        Error {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::ResourceUnavailable, format!("{}", err))
    }
}

/// Shorthand for the out-of-bounds failures raised by every validation point.
pub(crate) fn malformed<S: Into<String>>(message: S) -> Error {
    Error::new(ErrorKind::MalformedFile, message)
}

//! Error type definitions.
//!
//! This module defines every error that the core can surface. The taxonomy
//! is deliberately small: the only fatal, caller-visible failure is the
//! load-time boundary (a transcript or configuration file that cannot be
//! opened or whose header is unusable). Everything downstream of a
//! successful load is total: malformed rows are skipped and counted, and
//! decomposition never fails for any string input.

use std::error::Error;
use std::fmt::{self, Debug};

/// A specialized Result type for this crate.
///
/// Uses [`VmsError`] as the default error type.
pub type Result<T, E = VmsError> = std::result::Result<T, E>;

/// The error type for the transcript core.
#[derive(Debug, thiserror::Error)]
pub enum VmsError {
    /// The error variant for [`InvalidArgumentError`].
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// The error variant for [`InvalidFormatError`].
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// The error variant for [`std::io::Error`].
    ///
    /// Raised when a transcript or configuration file cannot be opened or
    /// read. This is the single fatal boundary case of the core.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl VmsError {
    /// Creates an invalid-argument error.
    ///
    /// # Arguments
    ///
    /// * `arg` - The name of the offending argument.
    /// * `msg` - The error message.
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// Creates an invalid-format error.
    ///
    /// # Arguments
    ///
    /// * `arg` - The name of the input whose format is invalid.
    /// * `msg` - The error message.
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }
}

/// Used when an argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// The name of the argument.
    pub(crate) arg: &'static str,

    /// The error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Used when an input format is invalid.
#[derive(Debug)]
pub struct InvalidFormatError {
    /// The name of the input.
    pub(crate) arg: &'static str,

    /// The error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

//! Error types for the fixed-income workspace.
//!
//! Every crate reports failures through the single `thiserror`-derived
//! [`Error`] enum. Validation problems, unsupported instrument/engine
//! pairings and calibration issues each get their own variant so callers
//! can match on them.

use thiserror::Error;

/// The top-level error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (raised by `fail!`).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (raised by `ensure!`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Bad caller input: unknown enum names, mismatched lengths and counts.
    #[error("validation error: {0}")]
    Validation(String),

    /// Market data is missing or malformed.
    #[error("market data error: {0}")]
    MarketData(String),

    /// Calibration could not be set up.
    #[error("calibration error: {0}")]
    Calibration(String),

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// A pricing engine was handed an instrument variant it cannot price.
    #[error("{engine} does not support instrument type: {instrument}")]
    UnsupportedInstrument {
        /// Name of the engine.
        engine: String,
        /// Name of the instrument variant.
        instrument: String,
    },

    /// Not implemented.
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

impl Error {
    /// Build an [`Error::UnsupportedInstrument`].
    pub fn unsupported(engine: impl Into<String>, instrument: impl Into<String>) -> Self {
        Error::UnsupportedInstrument {
            engine: engine.into(),
            instrument: instrument.into(),
        }
    }
}

/// Shorthand `Result` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use fi_core::ensure;
/// fn positive(x: f64) -> fi_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Validation(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use fi_core::{validate, errors::Error};
/// fn same_len(a: &[f64], b: &[f64]) -> fi_core::errors::Result<()> {
///     validate!(a.len() == b.len(), "lengths differ: {} vs {}", a.len(), b.len());
///     Ok(())
/// }
/// assert!(matches!(same_len(&[1.0], &[]), Err(Error::Validation(_))));
/// ```
#[macro_export]
macro_rules! validate {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Validation(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use fi_core::fail;
/// fn always_err() -> fi_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
